use std::sync::Arc;

use crate::compositor::texture::CompositeTexture;
use crate::ledger::slot::Face;

/// The 3-D scene that displays the card.
///
/// The core never expects a result back: presenting and texture swaps are fire-and-forget.
pub trait RenderSurface {
    /// Draw a frame with the front panel rotated to `hinge_angle_rad`.
    fn present_frame(&mut self, hinge_angle_rad: f64);

    /// Swap the texture shown on `face`.
    fn set_face_texture(&mut self, face: Face, texture: Arc<CompositeTexture>);
}

impl<S: RenderSurface + ?Sized> RenderSurface for &mut S {
    fn present_frame(&mut self, hinge_angle_rad: f64) {
        (**self).present_frame(hinge_angle_rad);
    }

    fn set_face_texture(&mut self, face: Face, texture: Arc<CompositeTexture>) {
        (**self).set_face_texture(face, texture);
    }
}

/// In-memory surface for tests and headless hosts: records every call.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    angles: Vec<f64>,
    swaps: Vec<(Face, Arc<CompositeTexture>)>,
}

impl RecordingSurface {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every presented hinge angle, in call order.
    pub fn presented_angles(&self) -> &[f64] {
        &self.angles
    }

    /// Every texture swap, in call order.
    pub fn texture_swaps(&self) -> &[(Face, Arc<CompositeTexture>)] {
        &self.swaps
    }

    /// Texture currently shown on `face`.
    pub fn current_texture(&self, face: Face) -> Option<&Arc<CompositeTexture>> {
        self.swaps
            .iter()
            .rev()
            .find(|(f, _)| *f == face)
            .map(|(_, t)| t)
    }
}

impl RenderSurface for RecordingSurface {
    fn present_frame(&mut self, hinge_angle_rad: f64) {
        self.angles.push(hinge_angle_rad);
    }

    fn set_face_texture(&mut self, face: Face, texture: Arc<CompositeTexture>) {
        self.swaps.push((face, texture));
    }
}
