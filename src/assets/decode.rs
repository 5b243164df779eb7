use anyhow::Context;
use image::imageops::FilterType;

use crate::{
    assets::svg_raster::rasterize_svg_to_premul_rgba8,
    foundation::core::{Bitmap, byte_len},
    foundation::error::{CardResult, DecodeError},
    ledger::entry::{ImageEncoding, SignatureImage},
};

/// Decode a signature into a premultiplied stamp of exactly `width x height` pixels.
///
/// Failures are reported per entry as [`DecodeError`] tagged with `index`.
pub fn decode_signature(
    index: u64,
    image: &SignatureImage,
    width: u32,
    height: u32,
) -> Result<Bitmap, DecodeError> {
    if image.is_empty() {
        return Err(DecodeError::new(index, "signature image has no bytes"));
    }
    let decoded = match image.encoding() {
        ImageEncoding::Raster => decode_raster_scaled(image.bytes(), width, height),
        ImageEncoding::Svg => decode_svg_scaled(image.bytes(), width, height),
    };
    decoded.map_err(|e| DecodeError::new(index, format!("{e:#}")))
}

/// Decode a face base image and scale it to the texture size.
pub fn decode_base_image(bytes: &[u8], width: u32, height: u32) -> CardResult<Bitmap> {
    Ok(decode_raster_scaled(bytes, width, height).context("decode face base image")?)
}

fn decode_raster_scaled(bytes: &[u8], width: u32, height: u32) -> anyhow::Result<Bitmap> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (src_w, src_h) = rgba.dimensions();

    // Filter in premultiplied space so transparent stroke edges do not bleed dark fringes.
    let mut premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut premul);
    fit_to_size(Bitmap::from_premul(src_w, src_h, premul)?, width, height)
}

/// Resample a premultiplied bitmap to exactly `width x height`.
pub(crate) fn fit_to_size(bitmap: Bitmap, width: u32, height: u32) -> anyhow::Result<Bitmap> {
    let expected = byte_len(bitmap.width, bitmap.height);
    if expected != Some(bitmap.rgba8_premul.len()) {
        anyhow::bail!(
            "{}x{} bitmap carries {} bytes, expected {}",
            bitmap.width,
            bitmap.height,
            bitmap.rgba8_premul.len(),
            expected.map_or_else(|| "an overflowing size".to_owned(), |n| n.to_string())
        );
    }
    if (bitmap.width, bitmap.height) == (width, height) {
        return Ok(bitmap);
    }
    if bitmap.width == 0 || bitmap.height == 0 {
        anyhow::bail!("cannot scale a {}x{} bitmap", bitmap.width, bitmap.height);
    }
    let src = image::RgbaImage::from_raw(
        bitmap.width,
        bitmap.height,
        bitmap.rgba8_premul.as_ref().clone(),
    )
    .context("wrap bitmap as image buffer")?;
    let scaled = image::imageops::resize(&src, width, height, FilterType::Triangle);
    Ok(Bitmap::from_premul(width, height, scaled.into_raw())?)
}

fn decode_svg_scaled(bytes: &[u8], width: u32, height: u32) -> anyhow::Result<Bitmap> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    let data = rasterize_svg_to_premul_rgba8(&tree, width, height)?;
    Ok(Bitmap::from_premul(width, height, data)?)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
