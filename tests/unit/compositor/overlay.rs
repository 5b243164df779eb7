use std::io::Cursor;

use super::*;
use crate::foundation::core::Rgba8Premul;

const PAPER: [u8; 4] = [250, 246, 238, 255];

fn png(rgba: [u8; 4]) -> SignatureImage {
    let img = image::RgbaImage::from_pixel(8, 4, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    SignatureImage::raster(buf)
}

fn compositor(width: u32, height: u32) -> OverlayCompositor {
    let paper = Rgba8Premul::from_straight_rgba(PAPER[0], PAPER[1], PAPER[2], PAPER[3]);
    OverlayCompositor::new(
        width,
        height,
        StampLayout::default(),
        Bitmap::solid(width, height, paper).unwrap(),
        Bitmap::solid(width, height, paper).unwrap(),
    )
    .unwrap()
}

fn three_signers() -> SignatureLedger {
    let mut ledger = SignatureLedger::new();
    ledger.append("Alice", png([255, 0, 0, 255])).unwrap();
    ledger.append("Bob", png([0, 255, 0, 255])).unwrap();
    ledger.append("Carol", png([0, 0, 255, 255])).unwrap();
    ledger
}

fn decode_all(requests: &[DecodeRequest]) -> BTreeMap<u64, Result<Bitmap, DecodeError>> {
    requests.iter().map(|r| (r.index(), r.decode())).collect()
}

/// Rebuild face A and complete its decodes in `order`, returning the published texture.
fn compose_in_order(order: &[u64]) -> (Arc<CompositeTexture>, Vec<CompositorEvent>) {
    let ledger = three_signers();
    let mut comp = compositor(512, 512);
    let mut events = Vec::new();

    let outcome = comp.rebuild(Face::A, &ledger, &mut events);
    assert!(outcome.published.is_none());
    let mut decoded = decode_all(&outcome.requests);

    let mut published = None;
    for index in order {
        let result = decoded.remove(index).expect("requested");
        assert!(published.is_none(), "texture published before the last decode");
        published = comp.complete_decode(*index, result, &mut events);
    }
    (published.expect("batch complete"), events)
}

#[test]
fn rebuild_requests_only_the_faces_entries() {
    let ledger = three_signers();
    let mut comp = compositor(512, 512);
    let mut events = Vec::new();

    let a = comp.rebuild(Face::A, &ledger, &mut events);
    let idx: Vec<u64> = a.requests.iter().map(DecodeRequest::index).collect();
    assert_eq!(idx, vec![0, 2]);
    assert!(a.requests.iter().all(|r| r.face() == Face::A));
    assert_eq!(a.requests[0].stamp_size(), (120, 60));
    assert_eq!(comp.pending(Face::A), Some(2));
    assert_eq!(comp.pending(Face::B), None);
    assert!(comp.is_in_flight(0));
    assert!(!comp.is_in_flight(1));
}

#[test]
fn decode_arrival_order_does_not_change_the_texture() {
    let (shuffled, _) = compose_in_order(&[2, 0]);
    let (ordered, _) = compose_in_order(&[0, 2]);

    assert_eq!(shuffled.pixels(), ordered.pixels());
    assert_eq!(shuffled.fingerprint(), ordered.fingerprint());
    assert_eq!(shuffled.stamped(), &[0, 2]);

    // Alice at column 0, Carol at column 1; Bob lives on the other face.
    let alice = shuffled.pixel(90, 60).unwrap();
    assert!(alice[0] > 240 && alice[1] < 15 && alice[2] < 15, "{alice:?}");
    let carol = shuffled.pixel(240, 60).unwrap();
    assert!(carol[2] > 240 && carol[0] < 15 && carol[1] < 15, "{carol:?}");
    assert_eq!(shuffled.pixel(5, 5).unwrap(), PAPER);
    assert!(shuffled.pixels().chunks_exact(4).all(|px| px[1] < 250));
}

#[test]
fn partial_batches_are_never_published() {
    let ledger = three_signers();
    let mut comp = compositor(512, 512);
    let mut events = Vec::new();

    let empty = SignatureLedger::new();
    let base = comp
        .rebuild(Face::A, &empty, &mut events)
        .published
        .expect("empty face publishes immediately");
    assert_eq!(base.generation(), 1);
    assert!(base.stamped().is_empty());

    let outcome = comp.rebuild(Face::A, &ledger, &mut events);
    let mut decoded = decode_all(&outcome.requests);

    let first = comp.complete_decode(2, decoded.remove(&2).unwrap(), &mut events);
    assert!(first.is_none());
    assert_eq!(comp.texture(Face::A).unwrap().generation(), 1);
    assert_eq!(comp.pending(Face::A), Some(1));

    let done = comp
        .complete_decode(0, decoded.remove(&0).unwrap(), &mut events)
        .unwrap();
    assert_eq!(done.generation(), 2);
    assert_eq!(done.stamped(), &[0, 2]);
    assert_eq!(comp.pending(Face::A), None);
    assert!(Arc::ptr_eq(comp.texture(Face::A).unwrap(), &done));
}

#[test]
fn failed_decode_skips_only_that_stamp() {
    let mut ledger = SignatureLedger::new();
    ledger
        .append("Mallory", SignatureImage::raster(vec![0xde, 0xad]))
        .unwrap();
    ledger.append("Bob", png([0, 255, 0, 255])).unwrap();
    ledger.append("Carol", png([0, 0, 255, 255])).unwrap();

    let mut comp = compositor(512, 512);
    let mut events = Vec::new();
    let outcome = comp.rebuild(Face::A, &ledger, &mut events);

    let mut published = None;
    for req in outcome.requests.iter().rev() {
        published = comp.complete_decode(req.index(), req.decode(), &mut events);
    }
    let texture = published.expect("failure must not block the batch");
    assert_eq!(texture.stamped(), &[2]);
    assert_eq!(texture.pixel(90, 60).unwrap(), PAPER);
    assert!(comp.decode_failure(0).is_some());
    assert!(comp.decode_failure(2).is_none());
    assert!(events.iter().any(|e| matches!(
        e,
        CompositorEvent::DecodeFailed { face: Face::A, error } if error.index == 0
    )));
}

#[test]
fn rebuilding_the_same_snapshot_is_pixel_identical() {
    let (first, _) = compose_in_order(&[0, 2]);

    let ledger = three_signers();
    let mut comp = compositor(512, 512);
    let mut events = Vec::new();
    let outcome = comp.rebuild(Face::A, &ledger, &mut events);
    for req in &outcome.requests {
        comp.complete_decode(req.index(), req.decode(), &mut events);
    }
    let again = comp.rebuild(Face::A, &ledger, &mut events);
    assert!(again.requests.is_empty(), "decodes are cached per index");
    let again = again.published.expect("all members cached");

    assert_eq!(again.generation(), 2);
    assert_eq!(again.pixels(), first.pixels());
    assert_eq!(again.fingerprint(), first.fingerprint());
}

#[test]
fn newer_snapshot_supersedes_pending_batch() {
    let mut ledger = SignatureLedger::new();
    ledger.append("Alice", png([255, 0, 0, 255])).unwrap();

    let mut comp = compositor(512, 512);
    let mut events = Vec::new();
    let first = comp.rebuild(Face::A, &ledger, &mut events);
    assert_eq!(first.requests.len(), 1);

    ledger.append("Bob", png([0, 255, 0, 255])).unwrap();
    ledger.append("Carol", png([0, 0, 255, 255])).unwrap();
    let second = comp.rebuild(Face::A, &ledger, &mut events);
    let idx: Vec<u64> = second.requests.iter().map(DecodeRequest::index).collect();
    assert_eq!(idx, vec![2], "index 0 is already in flight");
    assert!(events.contains(&CompositorEvent::BatchSuperseded {
        face: Face::A,
        generation: 1,
        remaining: 1,
    }));

    let r0 = first.requests[0].decode();
    assert!(comp.complete_decode(0, r0, &mut events).is_none());
    let done = comp
        .complete_decode(2, second.requests[0].decode(), &mut events)
        .unwrap();
    assert_eq!(done.generation(), 2);
    assert_eq!(done.stamped(), &[0, 2]);
    assert!(comp.buffer(Face::A).painted().contains(&0));
}

#[test]
fn unrequested_and_duplicate_completions_are_ignored() {
    let ledger = three_signers();
    let mut comp = compositor(512, 512);
    let mut events = Vec::new();
    let outcome = comp.rebuild(Face::A, &ledger, &mut events);

    let stray = Bitmap::solid(120, 60, Rgba8Premul::from_straight_rgba(0, 0, 0, 255)).unwrap();
    assert!(comp.complete_decode(1, Ok(stray.clone()), &mut events).is_none());
    assert!(comp.complete_decode(99, Ok(stray.clone()), &mut events).is_none());

    comp.complete_decode(0, outcome.requests[0].decode(), &mut events);
    assert!(comp.complete_decode(0, Ok(stray), &mut events).is_none());
    assert_eq!(comp.pending(Face::A), Some(1));
}

#[test]
fn host_bitmaps_are_fitted_to_the_stamp() {
    let mut ledger = SignatureLedger::new();
    ledger.append("Alice", png([255, 0, 0, 255])).unwrap();
    let mut comp = compositor(512, 512);
    let mut events = Vec::new();
    comp.rebuild(Face::A, &ledger, &mut events);

    let tiny = Bitmap::solid(2, 2, Rgba8Premul::from_straight_rgba(0, 0, 0, 255)).unwrap();
    let texture = comp.complete_decode(0, Ok(tiny), &mut events).unwrap();
    for (x, y) in [(30, 30), (149, 89)] {
        let px = texture.pixel(x, y).unwrap();
        assert!(px[0] < 5 && px[3] > 250, "({x},{y}) {px:?}");
    }
    assert_eq!(texture.pixel(150, 90).unwrap(), PAPER);
}

#[test]
fn host_bitmap_with_short_pixel_buffer_is_a_decode_failure() {
    let mut ledger = SignatureLedger::new();
    ledger.append("Alice", png([255, 0, 0, 255])).unwrap();
    let mut comp = compositor(512, 512);
    let mut events = Vec::new();
    comp.rebuild(Face::A, &ledger, &mut events);

    let truncated = Bitmap {
        width: 120,
        height: 60,
        rgba8_premul: Arc::new(vec![255; 16]),
    };
    let texture = comp
        .complete_decode(0, Ok(truncated), &mut events)
        .expect("batch still publishes");
    assert!(texture.stamped().is_empty());
    assert_eq!(texture.pixel(90, 60).unwrap(), PAPER);
    assert!(comp.decode_failure(0).is_some());
    assert!(events.iter().any(|e| matches!(
        e,
        CompositorEvent::DecodeFailed { face: Face::A, error } if error.index == 0
    )));
}

#[test]
fn stamps_past_the_texture_edge_are_clipped_or_reported() {
    let mut ledger = SignatureLedger::new();
    for name in ["a", "b", "c", "d", "e"] {
        ledger.append(name, png([255, 0, 0, 255])).unwrap();
    }
    let mut comp = compositor(200, 100);
    let mut events = Vec::new();
    let outcome = comp.rebuild(Face::A, &ledger, &mut events);
    let mut texture = None;
    for req in &outcome.requests {
        texture = comp.complete_decode(req.index(), req.decode(), &mut events);
    }
    let texture = texture.unwrap();

    assert_eq!(texture.stamped(), &[0, 2]);
    let layout = StampLayout::default();
    assert!(events.contains(&CompositorEvent::StampClipped {
        slot: layout.slot(2)
    }));
    assert!(events.contains(&CompositorEvent::StampOutOfBounds {
        slot: layout.slot(4)
    }));
    assert!(!comp.buffer(Face::A).painted().contains(&4));
}

#[test]
fn base_images_must_match_texture_size() {
    let paper = Rgba8Premul::from_straight_rgba(255, 255, 255, 255);
    let err = OverlayCompositor::new(
        64,
        64,
        StampLayout::default(),
        Bitmap::solid(64, 64, paper).unwrap(),
        Bitmap::solid(32, 64, paper).unwrap(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("face B"));

    let mut comp = compositor(64, 64);
    assert!(
        comp.set_base(Face::A, Bitmap::solid(1, 1, paper).unwrap())
            .is_err()
    );
}

#[test]
fn texture_pixels_read_through_its_bitmap() {
    let (texture, _) = compose_in_order(&[0, 2]);
    let bitmap = texture.bitmap();
    assert_eq!((bitmap.width, bitmap.height), (texture.width(), texture.height()));
    assert_eq!(bitmap.rgba8_premul.as_slice(), texture.pixels());
    assert_eq!(texture.pixel(90, 60), bitmap.pixel(90, 60));
    assert_eq!(texture.pixel(512, 0), None);
    assert_eq!(texture.pixel(0, 512), None);
}
