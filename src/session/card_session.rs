use std::collections::VecDeque;
use std::sync::Arc;
use std::time::SystemTime;

use crate::animation::hinge::{HingeAnimator, HingeState};
use crate::animation::scheduler::FrameScheduler;
use crate::assets::decode::decode_base_image;
use crate::compositor::overlay::{DecodeRequest, OverlayCompositor};
use crate::compositor::texture::CompositeTexture;
use crate::config::card::CardConfig;
use crate::foundation::core::Bitmap;
use crate::foundation::error::{CardError, CardResult, DecodeError};
use crate::ledger::entry::SignatureEntry;
use crate::ledger::slot::Face;
use crate::ledger::store::{SignatureLedger, validate_signer_name};
use crate::surface::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::surface::pad::SignaturePad;
use crate::surface::render::RenderSurface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrameTask {
    Hinge,
}

/// One open signature card: hinge, ledger, compositor and the host collaborators.
///
/// All state is owned here and mutated through `&mut self`. The host drives it from a single
/// thread: [`CardSession::frame`] once per display frame, [`CardSession::complete_decode`] whenever
/// a requested decode finishes, and the input methods as the user acts.
pub struct CardSession<S, D = TracingDiagnostics> {
    config: CardConfig,
    hinge: HingeAnimator,
    scheduler: FrameScheduler<FrameTask>,
    ledger: SignatureLedger,
    compositor: OverlayCompositor,
    decode_queue: VecDeque<DecodeRequest>,
    surface: S,
    diagnostics: D,
}

impl<S: RenderSurface> CardSession<S> {
    /// Start a session that logs compositor events through `tracing`.
    pub fn new(config: CardConfig, surface: S) -> CardResult<Self> {
        Self::with_diagnostics(config, surface, TracingDiagnostics)
    }
}

impl<S: RenderSurface, D: Diagnostics> CardSession<S, D> {
    /// Start a session reporting compositor events to `diagnostics`.
    ///
    /// Both faces publish their base-only texture to `surface` before this returns.
    pub fn with_diagnostics(config: CardConfig, surface: S, diagnostics: D) -> CardResult<Self> {
        config.validate()?;
        let (width, height) = (config.texture.width, config.texture.height);
        let base_a = Bitmap::solid(width, height, config.faces.base_color(Face::A))?;
        let base_b = Bitmap::solid(width, height, config.faces.base_color(Face::B))?;
        let compositor = OverlayCompositor::new(width, height, config.layout, base_a, base_b)?;

        let mut session = Self {
            hinge: HingeAnimator::new(config.hinge.clock()),
            scheduler: FrameScheduler::new(),
            ledger: SignatureLedger::new(),
            compositor,
            decode_queue: VecDeque::new(),
            surface,
            diagnostics,
            config,
        };
        for face in Face::ALL {
            session.rebuild(face);
        }
        Ok(session)
    }

    /// Replace a face's base image with encoded raster bytes, scaled to the texture size.
    pub fn set_base_image(&mut self, face: Face, bytes: &[u8]) -> CardResult<()> {
        let (width, height) = self.compositor.texture_size();
        let base = decode_base_image(bytes, width, height)?;
        self.compositor.set_base(face, base)?;
        self.rebuild(face);
        Ok(())
    }

    /// Start a hinge animation. Returns `false` if one is already running.
    pub fn toggle(&mut self, now_ms: f64) -> bool {
        let started = self.hinge.toggle(now_ms);
        if started {
            self.scheduler.register(FrameTask::Hinge);
        }
        started
    }

    /// Toggle the hinge when `key` is one of the configured toggle keys.
    pub fn handle_key(&mut self, key: &str, now_ms: f64) -> bool {
        if !self.config.toggle_keys.iter().any(|k| k == key) {
            return false;
        }
        self.toggle(now_ms)
    }

    /// Advance every running task to `now_ms` and present the frame.
    pub fn frame(&mut self, now_ms: f64) {
        let hinge = &mut self.hinge;
        self.scheduler.run_frame(|task| match task {
            FrameTask::Hinge => hinge.tick(now_ms),
        });
        self.surface.present_frame(self.hinge.angle());
    }

    /// Submit the pad's drawing under `signer_name`, timestamped now.
    pub fn submit<P: SignaturePad + ?Sized>(
        &mut self,
        pad: &mut P,
        signer_name: &str,
    ) -> CardResult<SignatureEntry> {
        self.submit_at(pad, signer_name, SystemTime::now())
    }

    /// Submit the pad's drawing under `signer_name`.
    ///
    /// On success the pad is cleared and the target face is rebuilt; its decodes are queued for
    /// [`CardSession::take_decode_requests`]. A blank name or an empty pad fails with
    /// [`CardError::Validation`] and leaves both the ledger and the pad untouched.
    #[tracing::instrument(skip(self, pad, submitted_at))]
    pub fn submit_at<P: SignaturePad + ?Sized>(
        &mut self,
        pad: &mut P,
        signer_name: &str,
        submitted_at: SystemTime,
    ) -> CardResult<SignatureEntry> {
        let signer_name = validate_signer_name(signer_name)?;
        if pad.is_empty() {
            return Err(CardError::validation("signature pad is empty"));
        }
        let entry = self
            .ledger
            .append_at(signer_name, pad.export_image(), submitted_at)?
            .clone();
        pad.clear();
        self.rebuild(entry.face());
        Ok(entry)
    }

    /// Hand the queued decode requests to the host.
    pub fn take_decode_requests(&mut self) -> Vec<DecodeRequest> {
        self.decode_queue.drain(..).collect()
    }

    /// Number of decode requests not yet taken.
    pub fn pending_decode_count(&self) -> usize {
        self.decode_queue.len()
    }

    /// Deliver a decode result. Returns `true` when it completed a face's batch and a new texture
    /// was sent to the surface.
    pub fn complete_decode(&mut self, index: u64, result: Result<Bitmap, DecodeError>) -> bool {
        self.decode_queue.retain(|r| r.index() != index);
        match self
            .compositor
            .complete_decode(index, result, &mut self.diagnostics)
        {
            Some(texture) => {
                self.surface.set_face_texture(texture.face(), texture);
                true
            }
            None => false,
        }
    }

    /// Decode every queued request synchronously, in queue order. Returns how many ran.
    pub fn pump_decodes(&mut self) -> usize {
        let mut ran = 0;
        while let Some(request) = self.decode_queue.pop_front() {
            let result = request.decode();
            self.complete_decode(request.index(), result);
            ran += 1;
        }
        ran
    }

    /// Hinge animator.
    pub fn hinge(&self) -> &HingeAnimator {
        &self.hinge
    }

    /// Snapshot of the hinge state.
    pub fn hinge_state(&self) -> HingeState {
        self.hinge.state()
    }

    /// Accepted signatures.
    pub fn ledger(&self) -> &SignatureLedger {
        &self.ledger
    }

    /// Overlay compositor.
    pub fn compositor(&self) -> &OverlayCompositor {
        &self.compositor
    }

    /// Texture most recently published for `face`.
    pub fn face_texture(&self, face: Face) -> Option<&Arc<CompositeTexture>> {
        self.compositor.texture(face)
    }

    /// Render surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable render surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Diagnostics sink.
    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Session configuration.
    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    fn rebuild(&mut self, face: Face) {
        let outcome = self
            .compositor
            .rebuild(face, &self.ledger, &mut self.diagnostics);
        self.decode_queue.extend(outcome.requests);
        if let Some(texture) = outcome.published {
            self.surface.set_face_texture(face, texture);
        }
    }
}
