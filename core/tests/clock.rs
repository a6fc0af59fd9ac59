//! Clock engine tests — phase machine, 1-second ticks, and the
//! regulation auto-pause boundary.

use playtime_core::clock::{ClockPhase, GameClock};
use playtime_core::error::GameError;

#[test]
fn new_clock_starts_in_setup() {
    let clock = GameClock::new(600);
    assert_eq!(clock.phase, ClockPhase::Setup);
    assert_eq!(clock.elapsed_sec, 0);
    assert!(!clock.has_started());
    assert!(!clock.is_running());
}

#[test]
fn tick_advances_exactly_one_second() {
    let mut clock = GameClock::new(600);
    clock.start().unwrap();
    for expected in 1..=10 {
        let outcome = clock.tick().unwrap();
        assert_eq!(outcome.elapsed_sec, expected);
        assert!(!outcome.auto_paused);
    }
    assert_eq!(clock.elapsed_sec, 10);
}

/// Ticking from one second before regulation clamps to the scheduled
/// duration and pauses — it never ends the game on its own.
#[test]
fn auto_pause_at_regulation_time() {
    let mut clock = GameClock::new(120);
    clock.start().unwrap();
    clock.elapsed_sec = 119;

    let outcome = clock.tick().unwrap();
    assert_eq!(outcome.elapsed_sec, 120);
    assert!(outcome.auto_paused);
    assert_eq!(clock.phase, ClockPhase::Paused);
    assert!(!clock.is_running());
}

/// Further ticks delivered after the boundary are no-ops, regardless of
/// how many a stale timer still fires.
#[test]
fn ticks_after_auto_pause_do_nothing() {
    let mut clock = GameClock::new(120);
    clock.start().unwrap();
    clock.elapsed_sec = 119;
    clock.tick().unwrap();

    for _ in 0..5 {
        let outcome = clock.tick().unwrap();
        assert_eq!(outcome.elapsed_sec, 120);
        assert!(!outcome.auto_paused);
    }
    assert_eq!(clock.elapsed_sec, 120);
}

#[test]
fn toggle_preserves_elapsed_time() {
    let mut clock = GameClock::new(600);
    clock.start().unwrap();
    clock.tick().unwrap();
    clock.tick().unwrap();

    assert!(!clock.toggle_running().unwrap());
    assert_eq!(clock.phase, ClockPhase::Paused);
    assert_eq!(clock.elapsed_sec, 2);

    assert!(clock.toggle_running().unwrap());
    assert_eq!(clock.phase, ClockPhase::Running);
    assert_eq!(clock.elapsed_sec, 2);
}

#[test]
fn reset_requires_paused() {
    let mut clock = GameClock::new(600);
    clock.start().unwrap();
    clock.tick().unwrap();

    assert!(matches!(clock.reset(), Err(GameError::ResetWhileRunning)));

    clock.toggle_running().unwrap();
    clock.reset().unwrap();
    assert_eq!(clock.phase, ClockPhase::Setup);
    assert_eq!(clock.elapsed_sec, 0);
}

#[test]
fn end_is_terminal() {
    let mut clock = GameClock::new(600);
    clock.start().unwrap();
    clock.end().unwrap();
    assert_eq!(clock.phase, ClockPhase::Ended);

    assert!(matches!(clock.tick(), Err(GameError::Ended)));
    assert!(matches!(clock.toggle_running(), Err(GameError::Ended)));
    assert!(matches!(clock.reset(), Err(GameError::Ended)));
    assert!(matches!(clock.end(), Err(GameError::Ended)));
}

#[test]
fn duration_is_immutable_after_start() {
    let mut clock = GameClock::new(3600);
    clock.set_duration_min(70).unwrap();
    assert_eq!(clock.scheduled_duration_sec, 4200);

    clock.start().unwrap();
    assert!(matches!(
        clock.set_duration_min(90),
        Err(GameError::AlreadyStarted)
    ));
}

/// A wall-clock fast-forward past regulation is clamped back to the
/// boundary and paused when the boundary is re-applied.
#[test]
fn apply_boundary_clamps_overshoot() {
    let mut clock = GameClock::new(120);
    clock.start().unwrap();
    clock.elapsed_sec = 150; // restored with a large wall-clock gap

    assert!(clock.apply_boundary());
    assert_eq!(clock.elapsed_sec, 120);
    assert_eq!(clock.phase, ClockPhase::Paused);
}

#[test]
fn apply_boundary_is_a_noop_mid_game() {
    let mut clock = GameClock::new(120);
    clock.start().unwrap();
    clock.elapsed_sec = 60;

    assert!(!clock.apply_boundary());
    assert_eq!(clock.elapsed_sec, 60);
    assert_eq!(clock.phase, ClockPhase::Running);
}
