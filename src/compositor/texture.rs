use std::sync::Arc;

use crate::compositor::blend::over_in_place;
use crate::compositor::buffer::FaceBuffer;
use crate::foundation::core::Bitmap;
use crate::ledger::slot::Face;

/// Finished face texture: base image with the face's stamp overlay on top.
///
/// Textures are never patched; every rebuild produces a new one and the render surface swaps its
/// reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeTexture {
    face: Face,
    generation: u64,
    pixels: Bitmap,
    stamped: Vec<u64>,
    fingerprint: u64,
}

impl CompositeTexture {
    pub(crate) fn compose(
        face: Face,
        generation: u64,
        base: &Bitmap,
        overlay: &FaceBuffer,
        stamped: Vec<u64>,
    ) -> Self {
        debug_assert_eq!((base.width, base.height), overlay.size());
        let mut data = base.rgba8_premul.as_ref().clone();
        over_in_place(&mut data, overlay.pixels(), 1.0);
        let fingerprint = fingerprint_rgba8(base.width, base.height, &data);
        Self {
            face,
            generation,
            pixels: Bitmap {
                width: base.width,
                height: base.height,
                rgba8_premul: Arc::new(data),
            },
            stamped,
            fingerprint,
        }
    }

    /// Face this texture belongs to.
    pub fn face(&self) -> Face {
        self.face
    }

    /// Rebuild generation that produced this texture; increases with every rebuild of the face.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height
    }

    /// Premultiplied RGBA8 pixels, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels.rgba8_premul
    }

    /// The texture as a bitmap sharing its pixel storage.
    pub fn bitmap(&self) -> &Bitmap {
        &self.pixels
    }

    /// Read one pixel; `None` outside the texture.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.pixel(x, y)
    }

    /// Ledger indices whose stamps are visible, ascending.
    pub fn stamped(&self) -> &[u64] {
        &self.stamped
    }

    /// Content hash of size and pixels; equal fingerprints mean an upload can be skipped.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}

fn fingerprint_rgba8(width: u32, height: u32, data: &[u8]) -> u64 {
    let seed = (u64::from(width) << 32) | u64::from(height);
    xxhash_rust::xxh3::xxh3_64_with_seed(data, seed)
}
