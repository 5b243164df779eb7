use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::{
    assets::decode::{decode_signature, fit_to_size},
    compositor::{batch::Batch, blend::Coverage, buffer::FaceBuffer, texture::CompositeTexture},
    foundation::core::Bitmap,
    foundation::error::{CardError, CardResult, DecodeError},
    ledger::{
        entry::{SignatureEntry, SignatureImage},
        slot::{Face, StampLayout},
        store::SignatureLedger,
    },
    surface::diagnostics::{CompositorEvent, Diagnostics},
};

/// A signature the compositor needs decoded before its face can be published.
///
/// Hosts may decode on their own schedule and report back through
/// [`OverlayCompositor::complete_decode`] in any order, or call [`DecodeRequest::decode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeRequest {
    index: u64,
    image: SignatureImage,
    stamp_width: u32,
    stamp_height: u32,
}

impl DecodeRequest {
    /// Ledger index of the signature.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Face the signature will be stamped on.
    pub fn face(&self) -> Face {
        Face::for_index(self.index)
    }

    /// Encoded signature image.
    pub fn image(&self) -> &SignatureImage {
        &self.image
    }

    /// `(width, height)` the decoded stamp should have.
    pub fn stamp_size(&self) -> (u32, u32) {
        (self.stamp_width, self.stamp_height)
    }

    /// Decode synchronously with the built-in raster/SVG decoders.
    pub fn decode(&self) -> Result<Bitmap, DecodeError> {
        decode_signature(self.index, &self.image, self.stamp_width, self.stamp_height)
    }
}

/// What a rebuild produced right away.
#[derive(Debug, Default)]
pub struct RebuildOutcome {
    /// Decodes the batch still waits on and that nobody has been asked for yet.
    pub requests: Vec<DecodeRequest>,
    /// Texture published synchronously when every member was already decoded.
    pub published: Option<Arc<CompositeTexture>>,
}

type DecodeOutcome = Result<Arc<Bitmap>, DecodeError>;

#[derive(Debug)]
struct FaceState {
    base: Bitmap,
    buffer: FaceBuffer,
    generation: u64,
    pending: Option<Batch>,
    published: Option<Arc<CompositeTexture>>,
}

impl FaceState {
    fn new(base: Bitmap) -> Self {
        let buffer = FaceBuffer::new(base.width, base.height);
        Self {
            base,
            buffer,
            generation: 0,
            pending: None,
            published: None,
        }
    }
}

/// Turns ledger contents into per-face composite textures.
///
/// Stamp placement depends only on ledger indices, and a face's texture is published only once
/// every decode of its current snapshot has resolved, so decode completion order never shows.
/// Decoded stamps are cached per index since ledger entries never change.
#[derive(Debug)]
pub struct OverlayCompositor {
    layout: StampLayout,
    width: u32,
    height: u32,
    faces: [FaceState; 2],
    decoded: BTreeMap<u64, DecodeOutcome>,
    in_flight: BTreeSet<u64>,
}

impl OverlayCompositor {
    /// Build a compositor for `width x height` textures over the given face base images.
    pub fn new(
        width: u32,
        height: u32,
        layout: StampLayout,
        base_a: Bitmap,
        base_b: Bitmap,
    ) -> CardResult<Self> {
        if width == 0 || height == 0 {
            return Err(CardError::config("texture size must be non-zero"));
        }
        layout.validate()?;
        for (face, base) in [(Face::A, &base_a), (Face::B, &base_b)] {
            check_base_size(face, base, width, height)?;
        }
        Ok(Self {
            layout,
            width,
            height,
            faces: [FaceState::new(base_a), FaceState::new(base_b)],
            decoded: BTreeMap::new(),
            in_flight: BTreeSet::new(),
        })
    }

    /// Replace a face's base image. Takes effect on the face's next rebuild.
    pub fn set_base(&mut self, face: Face, base: Bitmap) -> CardResult<()> {
        check_base_size(face, &base, self.width, self.height)?;
        self.faces[face.ordinal()].base = base;
        Ok(())
    }

    /// Stamp grid geometry.
    pub fn layout(&self) -> &StampLayout {
        &self.layout
    }

    /// `(width, height)` of every texture.
    pub fn texture_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Most recently published texture of `face`.
    pub fn texture(&self, face: Face) -> Option<&Arc<CompositeTexture>> {
        self.faces[face.ordinal()].published.as_ref()
    }

    /// Offscreen stamp overlay of `face`.
    pub fn buffer(&self, face: Face) -> &FaceBuffer {
        &self.faces[face.ordinal()].buffer
    }

    /// Decodes the pending batch of `face` still waits on, if a batch is pending.
    pub fn pending(&self, face: Face) -> Option<usize> {
        self.faces[face.ordinal()].pending.as_ref().map(Batch::remaining)
    }

    /// Recorded decode failure for ledger entry `index`.
    pub fn decode_failure(&self, index: u64) -> Option<&DecodeError> {
        self.decoded.get(&index).and_then(|o| o.as_ref().err())
    }

    /// Whether a decode of `index` has been requested and not completed.
    pub fn is_in_flight(&self, index: u64) -> bool {
        self.in_flight.contains(&index)
    }

    /// Snapshot `face` from `ledger` and start a new batch for it.
    ///
    /// Any batch still pending for the face is superseded; the new snapshot contains all of its
    /// entries. Decodes already in flight are awaited rather than requested again.
    #[tracing::instrument(skip(self, ledger, diagnostics), fields(entries = ledger.len()))]
    pub fn rebuild<D: Diagnostics + ?Sized>(
        &mut self,
        face: Face,
        ledger: &SignatureLedger,
        diagnostics: &mut D,
    ) -> RebuildOutcome {
        let (stamp_width, stamp_height) = self.layout.stamp_size();
        let state = &mut self.faces[face.ordinal()];
        state.generation += 1;

        let members = ledger
            .entries_for_face(face)
            .map(SignatureEntry::index)
            .collect();
        let mut batch = Batch::new(state.generation, members);
        let mut requests = Vec::new();
        for entry in ledger.entries_for_face(face) {
            let index = entry.index();
            if self.decoded.contains_key(&index) {
                batch.resolve(index);
            } else if self.in_flight.insert(index) {
                requests.push(DecodeRequest {
                    index,
                    image: entry.image().clone(),
                    stamp_width,
                    stamp_height,
                });
            }
        }

        let ready = batch.is_ready();
        if let Some(old) = state.pending.replace(batch) {
            diagnostics.record(CompositorEvent::BatchSuperseded {
                face,
                generation: old.generation(),
                remaining: old.remaining(),
            });
        }

        let published = if ready {
            self.publish(face, diagnostics)
        } else {
            None
        };
        RebuildOutcome {
            requests,
            published,
        }
    }

    /// Deliver the outcome of a requested decode.
    ///
    /// Returns the new texture when this completion was the last one its face's batch waited on.
    /// Completions for indices that were never requested, or already completed, are ignored.
    pub fn complete_decode<D: Diagnostics + ?Sized>(
        &mut self,
        index: u64,
        result: Result<Bitmap, DecodeError>,
        diagnostics: &mut D,
    ) -> Option<Arc<CompositeTexture>> {
        if !self.in_flight.remove(&index) {
            tracing::debug!(index, "ignoring unrequested decode completion");
            return None;
        }

        let face = Face::for_index(index);
        let (stamp_width, stamp_height) = self.layout.stamp_size();
        let outcome = result
            .and_then(|bitmap| {
                fit_to_size(bitmap, stamp_width, stamp_height)
                    .map_err(|e| DecodeError::new(index, format!("{e:#}")))
            })
            .map(Arc::new)
            .map_err(|mut error| {
                error.index = index;
                diagnostics.record(CompositorEvent::DecodeFailed {
                    face,
                    error: error.clone(),
                });
                error
            });
        self.decoded.insert(index, outcome);

        let ready = match self.faces[face.ordinal()].pending.as_mut() {
            Some(batch) => {
                batch.resolve(index);
                batch.is_ready()
            }
            None => false,
        };
        if ready {
            self.publish(face, diagnostics)
        } else {
            None
        }
    }

    /// Replay the ready batch of `face` onto a cleared buffer and publish the result.
    fn publish<D: Diagnostics + ?Sized>(
        &mut self,
        face: Face,
        diagnostics: &mut D,
    ) -> Option<Arc<CompositeTexture>> {
        let state = &mut self.faces[face.ordinal()];
        let batch = state.pending.take()?;
        debug_assert!(batch.is_ready());

        state.buffer.clear_raster();
        let mut stamped = Vec::with_capacity(batch.members().len());
        for &index in batch.members() {
            let Some(Ok(bitmap)) = self.decoded.get(&index) else {
                continue;
            };
            let slot = self.layout.slot(index);
            match state.buffer.stamp(index, bitmap, self.layout.origin(slot)) {
                Coverage::Full => stamped.push(index),
                Coverage::Clipped => {
                    stamped.push(index);
                    diagnostics.record(CompositorEvent::StampClipped { slot });
                }
                Coverage::Outside => {
                    diagnostics.record(CompositorEvent::StampOutOfBounds { slot });
                }
            }
        }

        let texture = Arc::new(CompositeTexture::compose(
            face,
            batch.generation(),
            &state.base,
            &state.buffer,
            stamped,
        ));
        diagnostics.record(CompositorEvent::TexturePublished {
            face,
            generation: texture.generation(),
            stamps: texture.stamped().len(),
            fingerprint: texture.fingerprint(),
        });
        state.published = Some(Arc::clone(&texture));
        Some(texture)
    }
}

fn check_base_size(face: Face, base: &Bitmap, width: u32, height: u32) -> CardResult<()> {
    if (base.width, base.height) != (width, height) {
        return Err(CardError::config(format!(
            "{face} base image is {}x{}, expected {width}x{height}",
            base.width, base.height
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/overlay.rs"]
mod tests;
