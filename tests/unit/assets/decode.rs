use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn png_at_stamp_size_is_premultiplied_without_resampling() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let sig = SignatureImage::raster(png_bytes(img));

    let bmp = decode_signature(0, &sig, 1, 1).unwrap();
    assert_eq!(bmp.width, 1);
    assert_eq!(bmp.height, 1);
    assert_eq!(
        bmp.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn png_is_scaled_to_requested_stamp_size() {
    let img = image::RgbaImage::from_pixel(8, 4, image::Rgba([0, 0, 255, 255]));
    let sig = SignatureImage::raster(png_bytes(img));

    let bmp = decode_signature(3, &sig, 120, 60).unwrap();
    assert_eq!((bmp.width, bmp.height), (120, 60));
    assert_eq!(bmp.rgba8_premul.len(), 120 * 60 * 4);
    let px = bmp.pixel(60, 30).unwrap();
    assert!(px[2] > 250 && px[0] < 5 && px[3] > 250, "{px:?}");
}

#[test]
fn svg_is_rasterized_at_stamp_size() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20"><rect width="40" height="20" fill="#ff0000"/></svg>"##;
    let bmp = decode_signature(1, &SignatureImage::svg(svg.to_vec()), 12, 6).unwrap();
    assert_eq!((bmp.width, bmp.height), (12, 6));
    let px = bmp.pixel(6, 3).unwrap();
    assert!(px[0] > 250 && px[3] > 250, "{px:?}");
}

#[test]
fn garbage_bytes_fail_with_the_entry_index() {
    let err = decode_signature(5, &SignatureImage::raster(vec![1, 2, 3]), 10, 10).unwrap_err();
    assert_eq!(err.index, 5);
    assert!(!err.reason.is_empty());

    let err = decode_signature(6, &SignatureImage::svg(b"<svg".to_vec()), 10, 10).unwrap_err();
    assert_eq!(err.index, 6);
}

#[test]
fn empty_image_fails_to_decode() {
    let err = decode_signature(2, &SignatureImage::empty(), 10, 10).unwrap_err();
    assert_eq!(err.index, 2);
}

#[test]
fn base_image_is_scaled_to_texture() {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([10, 200, 10, 255]));
    let bmp = decode_base_image(&png_bytes(img), 16, 8).unwrap();
    assert_eq!((bmp.width, bmp.height), (16, 8));
    assert!(decode_base_image(b"nope", 16, 8).is_err());
}

#[test]
fn premultiply_zeroes_transparent_pixels() {
    let mut px = vec![255u8, 255, 255, 0, 255, 0, 0, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0, 255, 0, 0, 255]);
}

#[test]
fn fit_rejects_pixel_buffers_that_disagree_with_the_size() {
    let short = Bitmap {
        width: 4,
        height: 2,
        rgba8_premul: std::sync::Arc::new(vec![0; 12]),
    };
    let err = fit_to_size(short.clone(), 4, 2).unwrap_err();
    assert!(format!("{err:#}").contains("expected 32"), "{err:#}");
    assert!(fit_to_size(short, 8, 4).is_err());
}
