use std::sync::Arc;
use std::time::SystemTime;

use crate::ledger::slot::Face;

/// How a signature's bytes are encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ImageEncoding {
    /// Any raster container the `image` crate can sniff (PNG, JPEG, WebP, ...).
    Raster,
    /// SVG document, rasterized at stamp size.
    Svg,
}

/// Opaque encoded signature image as exported by a signature pad.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureImage {
    encoding: ImageEncoding,
    bytes: Arc<[u8]>,
}

impl SignatureImage {
    /// Encoded raster bytes.
    pub fn raster(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            encoding: ImageEncoding::Raster,
            bytes: bytes.into(),
        }
    }

    /// SVG document bytes.
    pub fn svg(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            encoding: ImageEncoding::Svg,
            bytes: bytes.into(),
        }
    }

    /// An image of a blank canvas.
    pub fn empty() -> Self {
        Self::raster(Vec::new())
    }

    /// Encoding of [`SignatureImage::bytes`].
    pub fn encoding(&self) -> ImageEncoding {
        self.encoding
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether there are no encoded bytes. Drawn content is not inspected.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// One accepted signature. Immutable once appended to the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureEntry {
    pub(crate) index: u64,
    pub(crate) signer_name: String,
    pub(crate) image: SignatureImage,
    pub(crate) submitted_at: SystemTime,
}

impl SignatureEntry {
    /// Ledger position, assigned at append time and never reused.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Trimmed, non-empty signer name.
    pub fn signer_name(&self) -> &str {
        &self.signer_name
    }

    /// Encoded signature image.
    pub fn image(&self) -> &SignatureImage {
        &self.image
    }

    /// Submission timestamp.
    pub fn submitted_at(&self) -> SystemTime {
        self.submitted_at
    }

    /// Face this entry is stamped on.
    pub fn face(&self) -> Face {
        Face::for_index(self.index)
    }
}
