//! Collaborator seams: render surface, signature pad, and diagnostics sink.

/// Compositor observability events.
pub mod diagnostics;
/// Signature capture widget.
pub mod pad;
/// Render surface adapter.
pub mod render;
