use crate::ledger::entry::SignatureImage;

/// Freehand signature capture widget.
///
/// Only queried synchronously at the moment of submission.
pub trait SignaturePad {
    /// Whether no stroke has been drawn.
    fn is_empty(&self) -> bool;

    /// Export the current drawing.
    fn export_image(&self) -> SignatureImage;

    /// Wipe the drawing.
    fn clear(&mut self);
}

/// Pad backed by an already-encoded image.
#[derive(Clone, Debug, Default)]
pub struct MemoryPad {
    image: Option<SignatureImage>,
    clears: usize,
}

impl MemoryPad {
    /// A blank pad.
    pub fn new() -> Self {
        Self::default()
    }

    /// A pad holding `image`.
    pub fn with_image(image: SignatureImage) -> Self {
        Self {
            image: Some(image),
            clears: 0,
        }
    }

    /// Replace the drawing with `image`.
    pub fn draw(&mut self, image: SignatureImage) {
        self.image = Some(image);
    }

    /// How many times the pad has been cleared.
    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl SignaturePad for MemoryPad {
    fn is_empty(&self) -> bool {
        self.image.as_ref().is_none_or(SignatureImage::is_empty)
    }

    fn export_image(&self) -> SignatureImage {
        self.image.clone().unwrap_or_else(SignatureImage::empty)
    }

    fn clear(&mut self) {
        self.image = None;
        self.clears += 1;
    }
}
