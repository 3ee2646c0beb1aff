use std::cell::Cell;
use std::rc::Rc;

use blitzframe::timer::Timer;
use proptest::prelude::*;

fn counting_hook() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
    let count = Rc::new(Cell::new(0));
    let inner = Rc::clone(&count);
    (count, move || inner.set(inner.get() + 1))
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn new_timer_is_inactive_and_ready() {
    let mut t = Timer::new(1.0);
    assert!(!t.is_active());
    assert!(t.is_ready());
    assert!(!t.update(5.0)); // inactive timers never fire
    assert_eq!(t.remaining(), 0.0);
}

// ── One-shot ──────────────────────────────────────────────────────────────────

#[test]
fn one_shot_fires_once_then_deactivates() {
    let (count, hook) = counting_hook();
    let mut t = Timer::new(1.0).with_hook(hook).started();

    for _ in 0..3 {
        assert!(!t.update(0.25));
    }
    assert!(t.update(0.25));
    assert!(!t.is_active());
    assert_eq!(count.get(), 1);

    for _ in 0..10 {
        assert!(!t.update(0.25));
    }
    assert_eq!(count.get(), 1);
}

#[test]
fn activate_restarts_from_zero() {
    let mut t = Timer::new(1.0).started();
    t.update(0.75);
    t.activate();
    assert_eq!(t.elapsed(), 0.0);
    assert!(!t.update(0.75));
    assert!(t.update(0.25));
}

#[test]
fn deactivate_does_not_call_hook() {
    let (count, hook) = counting_hook();
    let mut t = Timer::new(0.5).with_hook(hook).started();
    t.update(0.25);
    t.deactivate();
    assert!(!t.is_active());
    t.update(1.0);
    assert_eq!(count.get(), 0);
}

// ── Repeating ─────────────────────────────────────────────────────────────────

#[test]
fn repeating_fires_every_period() {
    let (count, hook) = counting_hook();
    let mut t = Timer::new(0.5).repeating().with_hook(hook).started();

    let fired = (0..10).filter(|_| t.update(0.25)).count();
    assert_eq!(fired, 5);
    assert_eq!(count.get(), 5);
    assert!(t.is_active());
    assert!(t.is_repeating());
}

#[test]
fn repeating_fires_at_most_once_per_update() {
    let mut t = Timer::new(0.1).repeating().started();
    assert!(t.update(1.0));
    assert!(t.is_active());
    assert_eq!(t.elapsed(), 0.0);
}

#[test]
fn repeating_drops_overshoot_on_restart() {
    // 0.3 does not divide 0.5, so each cycle takes two steps (0.6 s)
    let (fired, hook) = counting_hook();
    let mut t = Timer::new(0.5).repeating().with_hook(hook).started();
    for _ in 0..10 {
        t.update(0.3);
    }
    assert_eq!(fired.get(), 5);
    assert!(t.is_active());
}

// ── Properties ────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn one_shot_fires_exactly_once(duration in 0.05f32..5.0, dt in 0.01f32..1.0) {
        let mut t = Timer::new(duration).started();
        let steps = (duration / dt).ceil() as usize + 5;
        let fired = (0..steps).filter(|_| t.update(dt)).count();
        prop_assert_eq!(fired, 1);
        prop_assert!(!t.is_active());
    }
}
