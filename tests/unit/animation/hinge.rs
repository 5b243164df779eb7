use super::*;

fn hinge() -> HingeAnimator {
    HingeAnimator::new(EasingClock::out_cubic(1200.0))
}

#[test]
fn starts_closed_at_rest() {
    let h = hinge();
    assert_eq!(h.state(), HingeState::default());
    assert_eq!(h.phase(), HingePhase::Closed);
    assert_eq!(h.angle(), CLOSED_ANGLE);
}

#[test]
fn opening_follows_out_cubic_and_lands_on_target() {
    let mut h = hinge();
    assert!(h.toggle(0.0));
    assert_eq!(h.phase(), HingePhase::AnimatingToOpen);

    assert_eq!(h.tick(600.0), TickStatus::Continue);
    assert!((h.angle() - (-0.875 * PI)).abs() < 1e-12);
    assert!(h.state().is_animating);
    assert!(!h.state().is_open);

    assert_eq!(h.tick(1200.0), TickStatus::Done);
    let s = h.state();
    assert_eq!(s.current_angle, OPEN_ANGLE);
    assert!(s.is_open);
    assert!(!s.is_animating);
    assert_eq!(h.phase(), HingePhase::Open);
}

#[test]
fn toggles_mid_flight_are_no_ops() {
    let mut h = hinge();
    assert!(h.toggle(0.0));
    h.tick(100.0);
    let before = h.state();

    for t in [150.0, 200.0, 200.0, 900.0] {
        assert!(!h.toggle(t));
        assert_eq!(h.phase(), HingePhase::AnimatingToOpen);
    }
    assert_eq!(h.state(), before);

    assert_eq!(h.tick(1200.0), TickStatus::Done);
    assert_eq!(h.angle(), OPEN_ANGLE);
    assert!(h.state().is_open);
}

#[test]
fn angle_is_monotonic_without_overshoot() {
    let mut h = hinge();
    h.toggle(0.0);
    let mut prev = h.angle();
    let mut t = 0.0;
    while h.tick(t) == TickStatus::Continue {
        let a = h.angle();
        assert!(a <= prev, "angle moved back at t={t}");
        assert!(a >= OPEN_ANGLE, "angle overshot at t={t}");
        prev = a;
        t += 16.7;
    }
    assert_eq!(h.angle(), OPEN_ANGLE);
}

#[test]
fn closing_runs_back_to_zero() {
    let mut h = hinge();
    h.toggle(0.0);
    h.tick(1200.0);

    assert!(h.toggle(2000.0));
    assert_eq!(h.phase(), HingePhase::AnimatingToClose);
    h.tick(2600.0);
    assert!((h.angle() - (-0.125 * PI)).abs() < 1e-12);
    assert_eq!(h.tick(3200.0), TickStatus::Done);
    assert_eq!(h.angle(), CLOSED_ANGLE);
    assert_eq!(h.phase(), HingePhase::Closed);
}

#[test]
fn late_frame_completes_in_one_tick() {
    let mut h = hinge();
    h.toggle(10.0);
    assert_eq!(h.tick(50_000.0), TickStatus::Done);
    assert_eq!(h.angle(), OPEN_ANGLE);
}

#[test]
fn backwards_timestamps_do_not_unwind_the_angle() {
    let mut h = hinge();
    h.toggle(1000.0);
    h.tick(1600.0);
    let mid = h.angle();
    assert_eq!(h.tick(1100.0), TickStatus::Continue);
    assert_eq!(h.angle(), mid);
    h.tick(500.0);
    assert_eq!(h.angle(), mid);
}

#[test]
fn tick_without_flight_is_inert() {
    let mut h = hinge();
    assert_eq!(h.tick(100.0), TickStatus::Done);
    assert_eq!(h.state(), HingeState::default());
}
