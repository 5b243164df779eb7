use crate::foundation::error::DecodeError;
use crate::ledger::slot::{Face, StampSlot};

/// Observable compositor occurrences that never surface as errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompositorEvent {
    /// A signature could not be decoded; it will never be stamped.
    DecodeFailed {
        /// Face the signature belongs to.
        face: Face,
        /// Per-entry failure.
        error: DecodeError,
    },
    /// A stamp was cut off at the texture edge.
    StampClipped {
        /// Cell of the stamp.
        slot: StampSlot,
    },
    /// A stamp's cell lies entirely outside the texture; it is not visible.
    StampOutOfBounds {
        /// Cell of the stamp.
        slot: StampSlot,
    },
    /// A pending batch was replaced by a newer snapshot of the same face before it completed.
    BatchSuperseded {
        /// Face being rebuilt.
        face: Face,
        /// Generation of the abandoned batch.
        generation: u64,
        /// Decodes it was still waiting on.
        remaining: usize,
    },
    /// A new composite texture was handed to the render surface.
    TexturePublished {
        /// Face of the texture.
        face: Face,
        /// Generation of the texture.
        generation: u64,
        /// Number of visible stamps.
        stamps: usize,
        /// Content fingerprint.
        fingerprint: u64,
    },
}

/// Observability collaborator for compositor events.
pub trait Diagnostics {
    /// Record one event.
    fn record(&mut self, event: CompositorEvent);
}

/// Default sink: forwards events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&mut self, event: CompositorEvent) {
        match event {
            CompositorEvent::DecodeFailed { face, error } => {
                tracing::warn!(%face, index = error.index, reason = %error.reason, "signature decode failed");
            }
            CompositorEvent::StampClipped { slot } => {
                tracing::debug!(index = slot.index, row = slot.row, "stamp clipped at texture edge");
            }
            CompositorEvent::StampOutOfBounds { slot } => {
                tracing::warn!(
                    face = %slot.face,
                    index = slot.index,
                    column = slot.column,
                    row = slot.row,
                    "stamp cell outside texture; signature not visible"
                );
            }
            CompositorEvent::BatchSuperseded {
                face,
                generation,
                remaining,
            } => {
                tracing::debug!(%face, generation, remaining, "pending batch superseded");
            }
            CompositorEvent::TexturePublished {
                face,
                generation,
                stamps,
                fingerprint,
            } => {
                tracing::debug!(%face, generation, stamps, fingerprint, "face texture published");
            }
        }
    }
}

/// Collects events in order; handy for tests and for hosts that batch telemetry.
impl Diagnostics for Vec<CompositorEvent> {
    fn record(&mut self, event: CompositorEvent) {
        self.push(event);
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn record(&mut self, event: CompositorEvent) {
        (**self).record(event);
    }
}
