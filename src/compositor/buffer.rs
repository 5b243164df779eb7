use std::collections::BTreeSet;

use crate::compositor::blend::{Coverage, stamp_over};
use crate::foundation::core::{Bitmap, Point};

/// Offscreen stamp overlay for one face.
///
/// The raster is rebuilt from scratch on every replay, while the set of painted indices only
/// grows: a face never loses a signature it has shown.
#[derive(Clone, Debug)]
pub struct FaceBuffer {
    width: u32,
    height: u32,
    rgba8_premul: Vec<u8>,
    painted: BTreeSet<u64>,
}

impl FaceBuffer {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba8_premul: vec![0; (width as usize) * (height as usize) * 4],
            painted: BTreeSet::new(),
        }
    }

    /// `(width, height)` in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Overlay pixels, premultiplied RGBA8.
    pub fn pixels(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Every ledger index that has been stamped onto this face so far.
    pub fn painted(&self) -> &BTreeSet<u64> {
        &self.painted
    }

    /// Reset the raster to transparent before a replay.
    pub(crate) fn clear_raster(&mut self) {
        self.rgba8_premul.fill(0);
    }

    /// Stamp `bitmap` for ledger entry `index` with its top-left at `origin`.
    pub(crate) fn stamp(&mut self, index: u64, bitmap: &Bitmap, origin: Point) -> Coverage {
        let coverage = stamp_over(
            &mut self.rgba8_premul,
            self.width,
            self.height,
            bitmap,
            origin.x.round() as i64,
            origin.y.round() as i64,
        );
        if coverage != Coverage::Outside {
            self.painted.insert(index);
        }
        coverage
    }
}
