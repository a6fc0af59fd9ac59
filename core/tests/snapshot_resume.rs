//! Snapshot and resume tests — round-trip fidelity, wall-clock
//! gap-filling, and corruption recovery.

use chrono::{Duration, Utc};
use playtime_core::clock::{ClockPhase, GameClock};
use playtime_core::roster::GamePlayer;
use playtime_core::session::GameSession;
use playtime_core::snapshot::{self, SessionSnapshot, FORMAT_VERSION};
use playtime_core::store::team::Team;
use playtime_core::store::GameStore;
use playtime_core::types::AgeGroup;

fn store() -> GameStore {
    let store = GameStore::in_memory().unwrap();
    store.migrate().unwrap();
    store
}

fn started_session() -> GameSession {
    let mut session = GameSession {
        id: "game-test".into(),
        team_id: "team-test".into(),
        team_name: "Test FC".into(),
        players: vec![
            GamePlayer::new(1, "Ada", Some(7), None),
            GamePlayer::new(2, "Ben", Some(9), None),
        ],
        clock: GameClock::new(600),
        started_at: None,
    };
    session.start(Utc::now()).unwrap();
    session.set_playing(2, false).unwrap();
    for _ in 0..100 {
        session.tick().unwrap();
    }
    session
}

/// Saving and loading with no wall-clock gap reproduces the session
/// field for field.
#[test]
fn round_trip_is_exact() {
    let store = store();
    let session = started_session();
    let now = Utc::now();

    snapshot::save(&store, &session, now);
    let restored = snapshot::load(&store, now).unwrap().expect("session");
    assert_eq!(restored, session);
}

/// Nothing is persisted before the game starts.
#[test]
fn save_is_a_noop_in_setup() {
    let store = store();
    let session = GameSession {
        id: "game-test".into(),
        team_id: "team-test".into(),
        team_name: "Test FC".into(),
        players: vec![GamePlayer::new(1, "Ada", None, None)],
        clock: GameClock::new(600),
        started_at: None,
    };
    snapshot::save(&store, &session, Utc::now());
    assert!(store.get_live_session().unwrap().is_none());
}

/// A session saved running at 100s and loaded 30s later resumes at 130s.
#[test]
fn gap_fills_running_session() {
    let store = store();
    let mut session = started_session();
    assert!(session.is_running());
    assert_eq!(session.elapsed_sec(), 100);

    let saved_at = Utc::now();
    snapshot::save(&store, &session, saved_at);

    let restored = snapshot::load(&store, saved_at + Duration::seconds(30))
        .unwrap()
        .expect("session");
    assert_eq!(restored.elapsed_sec(), 130);
    assert!(restored.is_running());

    // Accumulators are not gap-filled; only the clock moves.
    session.clock.elapsed_sec = 130;
    assert_eq!(restored.players, session.players);
}

/// A paused session resumes with no time added, however long the gap.
#[test]
fn paused_session_resumes_unchanged() {
    let store = store();
    let mut session = started_session();
    session.toggle_running().unwrap();

    let saved_at = Utc::now();
    snapshot::save(&store, &session, saved_at);

    let restored = snapshot::load(&store, saved_at + Duration::seconds(30))
        .unwrap()
        .expect("session");
    assert_eq!(restored.elapsed_sec(), 100);
    assert!(!restored.is_running());
}

/// Malformed payloads are treated as "no session" and the corrupt entry
/// is deleted — nothing surfaces as an error.
#[test]
fn malformed_snapshot_is_discarded() {
    let store = store();
    store
        .put_live_session("{not json at all", Utc::now())
        .unwrap();

    assert!(snapshot::load(&store, Utc::now()).unwrap().is_none());
    assert!(store.get_live_session().unwrap().is_none());
}

/// A payload from an incompatible format version is discarded the same
/// way.
#[test]
fn wrong_version_snapshot_is_discarded() {
    let store = store();
    let session = started_session();
    let now = Utc::now();
    let mut snap = SessionSnapshot::capture(&session, now).unwrap();
    snap.version = FORMAT_VERSION + 1;
    store
        .put_live_session(&serde_json::to_string(&snap).unwrap(), now)
        .unwrap();

    assert!(snapshot::load(&store, now).unwrap().is_none());
    assert!(store.get_live_session().unwrap().is_none());
}

/// resume() validates the referenced team and discards the snapshot when
/// the team no longer exists.
#[test]
fn dangling_team_reference_is_discarded() {
    let store = store();
    let session = started_session(); // team-test is never inserted
    let now = Utc::now();
    snapshot::save(&store, &session, now);

    assert!(snapshot::resume(&store, now).unwrap().is_none());
    assert!(store.get_live_session().unwrap().is_none());
}

/// resume() re-applies the regulation boundary: a gap that overshoots the
/// scheduled duration comes back clamped and paused.
#[test]
fn resume_reclamps_overshot_clock() {
    let store = store();
    let mut team = Team::new("Test FC", "2026", AgeGroup::U10, None);
    team.add_player("Ada", Some(7), None).unwrap();
    team.add_player("Ben", Some(9), None).unwrap();
    store.insert_team(&team).unwrap();

    let mut session = started_session();
    session.team_id = team.id.clone();
    let saved_at = Utc::now();
    snapshot::save(&store, &session, saved_at);

    // 600s scheduled, 100s elapsed at save, 10 minutes of wall clock.
    let restored = snapshot::resume(&store, saved_at + Duration::seconds(600))
        .unwrap()
        .expect("session");
    assert_eq!(restored.elapsed_sec(), 600);
    assert_eq!(restored.clock.phase, ClockPhase::Paused);
}

/// load() itself does not reclamp — the raw gap-filled value is visible
/// to callers that want it.
#[test]
fn load_does_not_reclamp() {
    let store = store();
    let session = started_session();
    let saved_at = Utc::now();
    snapshot::save(&store, &session, saved_at);

    let restored = snapshot::load(&store, saved_at + Duration::seconds(600))
        .unwrap()
        .expect("session");
    assert_eq!(restored.elapsed_sec(), 700);
    assert!(restored.is_running());
}

#[test]
fn clear_deletes_the_singleton_key() {
    let store = store();
    let session = started_session();
    snapshot::save(&store, &session, Utc::now());
    assert!(store.get_live_session().unwrap().is_some());

    snapshot::clear(&store).unwrap();
    assert!(store.get_live_session().unwrap().is_none());
}
