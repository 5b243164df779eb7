//! Hinge motion: easing, the toggle state machine, and the per-frame task loop.

/// Easing curves and the elapsed-time clock.
pub mod ease;
/// Hinge toggle state machine.
pub mod hinge;
/// Cooperative per-frame scheduler.
pub mod scheduler;
