//! Session snapshot — crash-safe persistence of the one in-progress game.
//!
//! The snapshot is written after every state change that touches the
//! clock, the ledger, or the run flag. On load the elapsed wall-clock
//! gap since the last save is replayed into the clock, so a game whose
//! page was closed mid-half resumes where it really is, not where it was
//! last saved. Gap-filling only applies when the session was running at
//! save time; a paused game resumes with no time added.

use crate::{
    clock::{ClockPhase, GameClock},
    error::GameResult,
    roster::GamePlayer,
    session::GameSession,
    store::GameStore,
    types::{GameId, Seconds, TeamId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bumped whenever the serialized shape changes incompatibly. A payload
/// with a different version is treated as malformed and discarded.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub version: u32,
    pub id: GameId,
    pub team_id: TeamId,
    pub team_name: String,
    pub players: Vec<GamePlayer>,
    pub elapsed_sec: Seconds,
    pub scheduled_duration_sec: Seconds,
    pub is_running: bool,
    pub has_started: bool,
    pub started_at: DateTime<Utc>,
    pub last_saved_at: DateTime<Utc>,
}

impl SessionSnapshot {
    /// Capture the current session state. Returns None before the game
    /// has started — there is nothing worth resuming in Setup.
    pub fn capture(session: &GameSession, now: DateTime<Utc>) -> Option<Self> {
        if !session.has_started() {
            return None;
        }
        Some(Self {
            version: FORMAT_VERSION,
            id: session.id.clone(),
            team_id: session.team_id.clone(),
            team_name: session.team_name.clone(),
            players: session.players.clone(),
            elapsed_sec: session.clock.elapsed_sec,
            scheduled_duration_sec: session.clock.scheduled_duration_sec,
            is_running: session.is_running(),
            has_started: true,
            started_at: session.started_at.unwrap_or(now),
            last_saved_at: now,
        })
    }

    /// Rebuild the session, replaying the wall-clock gap since the last
    /// save. Does not re-clamp against the scheduled duration — resume
    /// paths call `GameClock::apply_boundary` right after this so the
    /// numbers here stay exact for round-trip checks.
    pub fn into_session(self, now: DateTime<Utc>) -> GameSession {
        let gap_sec: i64 = if self.is_running {
            let gap_ms = (now - self.last_saved_at).num_milliseconds();
            ((gap_ms as f64) / 1000.0).round() as i64
        } else {
            0
        };
        let elapsed_sec = (self.elapsed_sec as i64 + gap_sec.max(0)) as Seconds;

        let phase = if self.is_running {
            ClockPhase::Running
        } else {
            ClockPhase::Paused
        };
        GameSession {
            id: self.id,
            team_id: self.team_id,
            team_name: self.team_name,
            players: self.players,
            clock: GameClock {
                elapsed_sec,
                scheduled_duration_sec: self.scheduled_duration_sec,
                phase,
            },
            started_at: Some(self.started_at),
        }
    }
}

/// Persist the session under the singleton key. No-op before the game
/// starts. A storage failure is logged and swallowed: losing resumability
/// is preferable to crashing a live game.
pub fn save(store: &GameStore, session: &GameSession, now: DateTime<Utc>) {
    let Some(snapshot) = SessionSnapshot::capture(session, now) else {
        return;
    };
    let result = serde_json::to_string(&snapshot)
        .map_err(crate::error::GameError::from)
        .and_then(|json| store.put_live_session(&json, now));
    match result {
        Ok(()) => log::debug!("snapshot saved at {}s", snapshot.elapsed_sec),
        Err(e) => log::warn!("failed to persist in-progress game, continuing in memory: {e}"),
    }
}

/// Load the singleton snapshot, gap-filled to `now`. An absent, malformed,
/// or wrong-version payload yields `Ok(None)` and the corrupt entry is
/// deleted — corruption never surfaces as an error to the caller.
pub fn load(store: &GameStore, now: DateTime<Utc>) -> GameResult<Option<GameSession>> {
    let Some(json) = store.get_live_session()? else {
        return Ok(None);
    };
    let snapshot: SessionSnapshot = match serde_json::from_str(&json) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("discarding malformed in-progress game snapshot: {e}");
            store.delete_live_session()?;
            return Ok(None);
        }
    };
    if snapshot.version != FORMAT_VERSION || !snapshot.has_started {
        log::warn!(
            "discarding in-progress game snapshot (version {}, started {})",
            snapshot.version,
            snapshot.has_started
        );
        store.delete_live_session()?;
        return Ok(None);
    }
    Ok(Some(snapshot.into_session(now)))
}

/// Full resume path: load, validate the referenced team still exists, and
/// re-apply the regulation boundary. A dangling team reference discards
/// the snapshot instead of failing.
pub fn resume(store: &GameStore, now: DateTime<Utc>) -> GameResult<Option<GameSession>> {
    let Some(mut session) = load(store, now)? else {
        return Ok(None);
    };
    if store.get_team(&session.team_id)?.is_none() {
        log::warn!(
            "in-progress game references unknown team {}; discarding",
            session.team_id
        );
        store.delete_live_session()?;
        return Ok(None);
    }
    if session.clock.apply_boundary() {
        log::info!(
            "resumed game had passed regulation time; clamped to {}s and paused",
            session.clock.elapsed_sec
        );
    }
    Ok(Some(session))
}

/// Delete the singleton snapshot. Invoked on end, on reset, on dangling
/// team references, and before a new session takes the key.
pub fn clear(store: &GameStore) -> GameResult<()> {
    store.delete_live_session()
}
