//! signcard drives an interactive, hinged 3-D signature card.
//!
//! The host owns a [`CardSession`] and feeds it three things from a single thread:
//!
//! - per-frame callbacks, which advance the hinge animation and present the current angle
//! - user input: hinge toggles and signature submissions from a [`SignaturePad`]
//! - decode results for the [`DecodeRequest`]s the session hands out
//!
//! Accepted signatures are stamped onto the two card faces in a grid derived only from their ledger
//! index. A face's composite texture reaches the [`RenderSurface`] only once every signature of
//! its snapshot has been decoded, so the order in which decodes complete never shows.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

/// Hinge easing, animation and per-frame scheduling.
pub mod animation;
/// Per-face stamp overlays and composite textures.
pub mod compositor;
/// Session configuration.
pub mod config;
/// Signature ledger and stamp grid geometry.
pub mod ledger;
/// Owned session context.
pub mod session;
/// Host collaborator seams.
pub mod surface;

pub use crate::foundation::core::{Bitmap, Point, Rect, Rgba8Premul};
pub use crate::foundation::error::{CardError, CardResult, DecodeError};

pub use crate::animation::ease::{Ease, EaseSample, EasingClock};
pub use crate::animation::hinge::{
    CLOSED_ANGLE, HingeAnimator, HingePhase, HingeState, OPEN_ANGLE, TickStatus,
};
pub use crate::animation::scheduler::FrameScheduler;
pub use crate::assets::decode::{decode_base_image, decode_signature};
pub use crate::compositor::blend::Coverage;
pub use crate::compositor::buffer::FaceBuffer;
pub use crate::compositor::overlay::{DecodeRequest, OverlayCompositor, RebuildOutcome};
pub use crate::compositor::texture::CompositeTexture;
pub use crate::config::card::{CardConfig, FacesConfig, HingeConfig, TextureConfig};
pub use crate::ledger::entry::{ImageEncoding, SignatureEntry, SignatureImage};
pub use crate::ledger::slot::{Face, StampLayout, StampSlot};
pub use crate::ledger::store::SignatureLedger;
pub use crate::session::card_session::CardSession;
pub use crate::surface::diagnostics::{CompositorEvent, Diagnostics, TracingDiagnostics};
pub use crate::surface::pad::{MemoryPad, SignaturePad};
pub use crate::surface::render::{RecordingSurface, RenderSurface};
