use crate::foundation::core::Bitmap;
use crate::foundation::math::mul_div255_u8;

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// How much of a stamp landed inside the destination raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coverage {
    /// Every stamp pixel was inside the destination.
    Full,
    /// Part of the stamp was cut off at the destination edge.
    Clipped,
    /// No stamp pixel was inside the destination.
    Outside,
}

/// Source-over of premultiplied `src` onto `dst`, with `src` scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Layer a full raster over an equally sized one. Extra trailing bytes of the longer buffer are
/// left untouched.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) {
    debug_assert_eq!(dst.len(), src.len(), "over_in_place expects equal-length rgba8 buffers");
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
}

/// Source-over `stamp` onto a `dst_width x dst_height` raster with its top-left at `(x, y)`.
///
/// Pixels falling outside the destination are clipped.
pub fn stamp_over(
    dst: &mut [u8],
    dst_width: u32,
    dst_height: u32,
    stamp: &Bitmap,
    x: i64,
    y: i64,
) -> Coverage {
    let (dw, dh) = (i64::from(dst_width), i64::from(dst_height));
    let (sw, sh) = (i64::from(stamp.width), i64::from(stamp.height));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return Coverage::Outside;
    }

    let src = stamp.rgba8_premul.as_slice();
    for dy in y0..y1 {
        let sy = dy - y;
        for dx in x0..x1 {
            let sx = dx - x;
            let si = ((sy * sw + sx) * 4) as usize;
            let di = ((dy * dw + dx) * 4) as usize;
            let s = [src[si], src[si + 1], src[si + 2], src[si + 3]];
            if s[3] == 0 {
                continue;
            }
            let d = [dst[di], dst[di + 1], dst[di + 2], dst[di + 3]];
            dst[di..di + 4].copy_from_slice(&over(d, s, 1.0));
        }
    }

    if x0 == x && y0 == y && x1 == x + sw && y1 == y + sh {
        Coverage::Full
    } else {
        Coverage::Clipped
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/blend.rs"]
mod tests;
