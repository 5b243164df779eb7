use std::f64::consts::PI;

use crate::animation::ease::EasingClock;
use crate::foundation::math::lerp;

/// Hinge angle of a fully closed card, in radians.
pub const CLOSED_ANGLE: f64 = 0.0;
/// Hinge angle of a fully open card, in radians.
pub const OPEN_ANGLE: f64 = -PI;

/// Observable hinge state.
///
/// `is_animating` is true only between the start and completion of one toggle, and
/// `current_angle` always lies in `[OPEN_ANGLE, CLOSED_ANGLE]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HingeState {
    /// Whether the card rests open (updated only when an animation completes).
    pub is_open: bool,
    /// Whether a toggle animation currently owns the angle.
    pub is_animating: bool,
    /// Current rotation in radians.
    pub current_angle: f64,
}

impl Default for HingeState {
    fn default() -> Self {
        Self {
            is_open: false,
            is_animating: false,
            current_angle: CLOSED_ANGLE,
        }
    }
}

/// Hinge state machine phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HingePhase {
    /// At rest, closed.
    Closed,
    /// At rest, open.
    Open,
    /// Rotating from closed towards open.
    AnimatingToOpen,
    /// Rotating from open towards closed.
    AnimatingToClose,
}

/// Result of one per-frame update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickStatus {
    /// The task wants another tick next frame.
    Continue,
    /// The task is finished and can be unregistered.
    Done,
}

#[derive(Clone, Copy, Debug)]
struct Flight {
    start_ms: f64,
    start_angle: f64,
    target_angle: f64,
    last_eased: f64,
}

/// Drives the hinge rotation with an eased, non-reentrant toggle animation.
#[derive(Clone, Debug)]
pub struct HingeAnimator {
    clock: EasingClock,
    state: HingeState,
    flight: Option<Flight>,
}

impl HingeAnimator {
    /// A closed hinge animated with `clock`.
    pub fn new(clock: EasingClock) -> Self {
        Self {
            clock,
            state: HingeState::default(),
            flight: None,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> HingeState {
        self.state
    }

    /// Current rotation in radians.
    pub fn angle(&self) -> f64 {
        self.state.current_angle
    }

    /// Clock used for toggle animations.
    pub fn clock(&self) -> EasingClock {
        self.clock
    }

    /// Current state machine phase.
    pub fn phase(&self) -> HingePhase {
        match (self.state.is_animating, self.state.is_open) {
            (false, false) => HingePhase::Closed,
            (false, true) => HingePhase::Open,
            (true, false) => HingePhase::AnimatingToOpen,
            (true, true) => HingePhase::AnimatingToClose,
        }
    }

    /// Start rotating towards the opposite rest position.
    ///
    /// Returns `false` without touching any state when an animation is already in flight.
    pub fn toggle(&mut self, now_ms: f64) -> bool {
        if self.flight.is_some() {
            tracing::debug!(angle = self.state.current_angle, "hinge toggle ignored mid-flight");
            return false;
        }

        let target_angle = if self.state.is_open {
            CLOSED_ANGLE
        } else {
            OPEN_ANGLE
        };
        self.flight = Some(Flight {
            start_ms: if now_ms.is_finite() { now_ms } else { 0.0 },
            start_angle: self.state.current_angle,
            target_angle,
            last_eased: 0.0,
        });
        self.state.is_animating = true;
        tracing::debug!(target_angle, "hinge animation started");
        true
    }

    /// Advance the in-flight animation to `now_ms`.
    ///
    /// Completion is the only transition that flips `is_open`. Timestamps that go backwards never
    /// move the angle back towards its start.
    pub fn tick(&mut self, now_ms: f64) -> TickStatus {
        let Some(flight) = self.flight.as_mut() else {
            return TickStatus::Done;
        };

        let sample = self.clock.sample(now_ms - flight.start_ms);
        if sample.is_complete() {
            self.state.current_angle = flight.target_angle;
            self.state.is_open = !self.state.is_open;
            self.state.is_animating = false;
            self.flight = None;
            tracing::debug!(is_open = self.state.is_open, "hinge animation finished");
            return TickStatus::Done;
        }

        let eased = sample.eased.max(flight.last_eased);
        flight.last_eased = eased;
        self.state.current_angle =
            lerp(flight.start_angle, flight.target_angle, eased).clamp(OPEN_ANGLE, CLOSED_ANGLE);
        TickStatus::Continue
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/hinge.rs"]
mod tests;
