use anyhow::Context;

const MAX_DIM: u32 = 4096;

/// Rasterize `tree` stretched to `width x height`, returning premultiplied RGBA8.
///
/// Signature exports are drawn on a canvas whose aspect may not match the stamp cell; the stroke
/// bounds are stretched to fill the stamp exactly like raster signatures are.
pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> anyhow::Result<Vec<u8>> {
    if width > MAX_DIM || height > MAX_DIM {
        anyhow::bail!("svg raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})");
    }
    let size = tree.size();
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if !valid(size.width()) || !valid(size.height()) {
        anyhow::bail!("svg has invalid width/height");
    }

    let mut pixmap =
        resvg::tiny_skia::Pixmap::new(width, height).context("failed to allocate svg pixmap")?;

    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}
