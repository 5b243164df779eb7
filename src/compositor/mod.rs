//! Overlay compositing: per-face stamp buffers layered over base images.

pub(crate) mod batch;
/// Premultiplied RGBA8 blending and stamp placement.
pub mod blend;
/// Offscreen per-face stamp buffer.
pub mod buffer;
/// The compositor and its decode requests.
pub mod overlay;
/// Published composite textures.
pub mod texture;
