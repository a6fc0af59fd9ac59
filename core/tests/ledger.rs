//! Player time ledger tests — accumulators, status toggles, and roster
//! locking.

use chrono::Utc;
use playtime_core::clock::GameClock;
use playtime_core::error::GameError;
use playtime_core::roster::GamePlayer;
use playtime_core::session::GameSession;

fn two_player_session(duration_sec: u32) -> GameSession {
    GameSession {
        id: "game-test".into(),
        team_id: "team-test".into(),
        team_name: "Test FC".into(),
        players: vec![
            GamePlayer::new(1, "Ada", Some(7), None),
            GamePlayer::new(2, "Ben", None, None),
        ],
        clock: GameClock::new(duration_sec),
        started_at: None,
    }
}

/// While both statuses are fixed, playing + sitting time equals elapsed
/// time for every player, every tick.
#[test]
fn accumulators_sum_to_elapsed() {
    let mut session = two_player_session(600);
    session.start(Utc::now()).unwrap();
    session.set_playing(2, false).unwrap();

    for _ in 0..45 {
        session.tick().unwrap();
        for p in &session.players {
            assert_eq!(
                p.playing_time_sec + p.sitting_time_sec,
                session.elapsed_sec(),
                "accumulators must sum to elapsed time for {}",
                p.name
            );
        }
    }
    assert_eq!(session.players[0].playing_time_sec, 45);
    assert_eq!(session.players[1].sitting_time_sec, 45);
}

/// Toggling a status affects subsequent ticks only; already-accumulated
/// time is never rewritten.
#[test]
fn status_toggle_is_not_retroactive() {
    let mut session = two_player_session(600);
    session.start(Utc::now()).unwrap();

    for _ in 0..30 {
        session.tick().unwrap();
    }
    session.set_playing(1, false).unwrap();
    for _ in 0..20 {
        session.tick().unwrap();
    }

    let ada = &session.players[0];
    assert_eq!(ada.playing_time_sec, 30);
    assert_eq!(ada.sitting_time_sec, 20);
}

#[test]
fn set_playing_rejected_before_start() {
    let mut session = two_player_session(600);
    assert!(matches!(
        session.set_playing(1, false),
        Err(GameError::NotStarted)
    ));
}

#[test]
fn roster_locks_once_started() {
    let mut session = two_player_session(600);
    session.start(Utc::now()).unwrap();

    assert!(matches!(
        session.add_player("Late", None, None),
        Err(GameError::RosterLocked)
    ));
    assert!(matches!(
        session.remove_player(1),
        Err(GameError::RosterLocked)
    ));
}

#[test]
fn roster_editable_during_setup() {
    let mut session = two_player_session(600);
    let id = session.add_player("Cleo", Some(10), None).unwrap();
    assert_eq!(session.players.len(), 3);

    session.remove_player(id).unwrap();
    assert_eq!(session.players.len(), 2);

    assert!(matches!(
        session.remove_player(99),
        Err(GameError::PlayerNotFound(99))
    ));
}

/// Jersey numbers compare numerically and must be unique in the roster.
#[test]
fn duplicate_jersey_rejected() {
    let mut session = two_player_session(600);
    assert!(matches!(
        session.add_player("Copycat", Some(7), None),
        Err(GameError::JerseyTaken(7))
    ));
    // An unclaimed number is fine.
    session.add_player("Cleo", Some(8), None).unwrap();
}

#[test]
fn jersey_must_be_in_range() {
    let mut session = two_player_session(600);
    assert!(matches!(
        session.add_player("Zero", Some(0), None),
        Err(GameError::JerseyOutOfRange(0))
    ));
}

#[test]
fn start_with_empty_roster_rejected() {
    let mut session = two_player_session(600);
    session.remove_player(1).unwrap();
    session.remove_player(2).unwrap();
    assert!(matches!(
        session.start(Utc::now()),
        Err(GameError::EmptyRoster)
    ));
}

/// Reset returns everything to Setup: accumulators, percentages, statuses.
#[test]
fn reset_zeroes_the_ledger() {
    let mut session = two_player_session(600);
    session.start(Utc::now()).unwrap();
    session.set_playing(2, false).unwrap();
    for _ in 0..10 {
        session.tick().unwrap();
    }
    session.toggle_running().unwrap();
    session.reset().unwrap();

    assert!(!session.has_started());
    assert_eq!(session.elapsed_sec(), 0);
    for p in &session.players {
        assert!(p.is_playing);
        assert_eq!(p.playing_time_sec, 0);
        assert_eq!(p.sitting_time_sec, 0);
        assert_eq!(p.playing_pct, 0.0);
        assert_eq!(p.projected_playing_pct, 0.0);
    }
}
