//! The live game session — roster snapshot, clock, and the per-tick
//! pipeline.
//!
//! ORDER WITHIN ONE TICK (fixed, never reordered):
//!   1. Clock advances.
//!   2. Ledger credits each player's accumulator.
//!   3. Projector recomputes every percentage.
//!   4. Caller persists the snapshot.
//! Persisted state is therefore always internally consistent — never a
//! half-updated ledger paired with stale percentages.

use crate::{
    clock::{ClockPhase, GameClock},
    config::GameConfig,
    error::{GameError, GameResult},
    event::GameEvent,
    roster::{check_jersey, GamePlayer},
    stats,
    store::team::Team,
    types::{GameId, PlayerId, Position, Seconds, TeamId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSession {
    pub id: GameId,
    pub team_id: TeamId,
    pub team_name: String,
    /// Roster snapshot taken at session creation. Membership is frozen
    /// once the game starts; roster-store edits never reach a live session.
    pub players: Vec<GamePlayer>,
    pub clock: GameClock,
    /// Set exactly once, when the game starts.
    pub started_at: Option<DateTime<Utc>>,
}

/// Immutable per-player result line, produced when a session ends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinalPlayerStats {
    pub player_id: PlayerId,
    pub playing_time_sec: Seconds,
    pub sitting_time_sec: Seconds,
    pub playing_pct: f64,
}

/// The only part of a session that outlives it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinalGameStats {
    pub players: Vec<FinalPlayerStats>,
    pub total_game_time_sec: Seconds,
}

impl GameSession {
    /// Create a session for a team: roster copied in, statuses reset,
    /// duration preselected from the age-group default.
    pub fn for_team(team: &Team, config: &GameConfig) -> Self {
        let players = team
            .players
            .iter()
            .map(|p| GamePlayer::new(p.id, &p.name, p.jersey_number, p.position))
            .collect();
        Self {
            id: format!("game-{}", Uuid::new_v4()),
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            players,
            clock: GameClock::new(config.default_duration_sec(team.age_group)),
            started_at: None,
        }
    }

    pub fn has_started(&self) -> bool {
        self.clock.has_started()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn elapsed_sec(&self) -> Seconds {
        self.clock.elapsed_sec
    }

    fn player_mut(&mut self, id: PlayerId) -> GameResult<&mut GamePlayer> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GameError::PlayerNotFound(id))
    }

    fn next_player_id(&self) -> PlayerId {
        self.players.iter().map(|p| p.id).max().map_or(1, |m| m + 1)
    }

    // ── Pre-game roster editing ────────────────────────────────

    /// Add a player. Rejected once the game has started.
    pub fn add_player(
        &mut self,
        name: &str,
        jersey_number: Option<u8>,
        position: Option<Position>,
    ) -> GameResult<PlayerId> {
        if self.has_started() {
            return Err(GameError::RosterLocked);
        }
        if let Some(j) = jersey_number {
            check_jersey(&self.players, j, None)?;
        }
        let id = self.next_player_id();
        self.players
            .push(GamePlayer::new(id, name.trim(), jersey_number, position));
        Ok(id)
    }

    /// Remove a player. Rejected once the game has started.
    pub fn remove_player(&mut self, id: PlayerId) -> GameResult<()> {
        if self.has_started() {
            return Err(GameError::RosterLocked);
        }
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        if self.players.len() == before {
            return Err(GameError::PlayerNotFound(id));
        }
        Ok(())
    }

    /// Change the scheduled duration to one of the offered overrides.
    /// Immutable after start.
    pub fn set_duration_min(&mut self, minutes: u32, config: &GameConfig) -> GameResult<()> {
        if !config.is_valid_override(minutes) {
            return Err(GameError::Other(anyhow::anyhow!(
                "{minutes} minutes is not an offered game length"
            )));
        }
        self.clock.set_duration_min(minutes)
    }

    // ── Game lifecycle ─────────────────────────────────────────

    /// Start the game. Requires a non-empty roster; freezes membership,
    /// zeroes all accumulators, and stamps `started_at`.
    pub fn start(&mut self, now: DateTime<Utc>) -> GameResult<GameEvent> {
        if self.clock.phase == ClockPhase::Setup && self.players.is_empty() {
            return Err(GameError::EmptyRoster);
        }
        self.clock.start()?;
        for player in &mut self.players {
            player.reset_stats();
        }
        self.started_at = Some(now);
        Ok(GameEvent::GameStarted {
            game_id: self.id.clone(),
            scheduled_duration_sec: self.clock.scheduled_duration_sec,
        })
    }

    /// One 1-second advancement: clock, then ledger, then projector.
    pub fn tick(&mut self) -> GameResult<Vec<GameEvent>> {
        let was_running = self.clock.is_running();
        let outcome = self.clock.tick()?;
        if !was_running {
            // Straggler callback after pause: nothing moved.
            return Ok(Vec::new());
        }

        for player in &mut self.players {
            player.on_tick(1);
        }
        stats::recompute(
            self.clock.elapsed_sec,
            self.clock.scheduled_duration_sec,
            &mut self.players,
        );

        let mut events = vec![GameEvent::TickAdvanced {
            elapsed_sec: outcome.elapsed_sec,
        }];
        if outcome.auto_paused {
            events.push(GameEvent::AutoPaused {
                elapsed_sec: outcome.elapsed_sec,
            });
        }
        Ok(events)
    }

    /// Pause or resume the clock.
    pub fn toggle_running(&mut self) -> GameResult<GameEvent> {
        let running = self.clock.toggle_running()?;
        let elapsed_sec = self.clock.elapsed_sec;
        Ok(if running {
            GameEvent::ClockResumed { elapsed_sec }
        } else {
            GameEvent::ClockPaused { elapsed_sec }
        })
    }

    /// Toggle a player's on-field status. Pre-game, everyone is fixed at
    /// "playing" and membership is edited instead, so this requires a
    /// started game. Already-accumulated time is never altered.
    pub fn set_playing(&mut self, id: PlayerId, playing: bool) -> GameResult<GameEvent> {
        if !self.has_started() {
            return Err(GameError::NotStarted);
        }
        if self.clock.phase == ClockPhase::Ended {
            return Err(GameError::Ended);
        }
        let player = self.player_mut(id)?;
        player.is_playing = playing;
        stats::recompute(
            self.clock.elapsed_sec,
            self.clock.scheduled_duration_sec,
            &mut self.players,
        );
        Ok(GameEvent::PlayerStatusChanged {
            player_id: id,
            is_playing: playing,
            elapsed_sec: self.clock.elapsed_sec,
        })
    }

    /// Abandon the game and return to Setup. Paused only. The caller
    /// clears the persisted snapshot.
    pub fn reset(&mut self) -> GameResult<GameEvent> {
        self.clock.reset()?;
        for player in &mut self.players {
            player.reset_stats();
        }
        self.started_at = None;
        Ok(GameEvent::GameReset {
            game_id: self.id.clone(),
        })
    }

    /// Terminal: freeze state and emit the final stats. Callers gate this
    /// behind an explicit confirmation step and then clear the snapshot.
    pub fn end(&mut self) -> GameResult<(FinalGameStats, GameEvent)> {
        self.clock.end()?;
        let stats = FinalGameStats {
            players: self
                .players
                .iter()
                .map(|p| FinalPlayerStats {
                    player_id: p.id,
                    playing_time_sec: p.playing_time_sec,
                    sitting_time_sec: p.sitting_time_sec,
                    playing_pct: p.playing_pct,
                })
                .collect(),
            total_game_time_sec: self.clock.elapsed_sec,
        };
        let event = GameEvent::GameEnded {
            game_id: self.id.clone(),
            total_game_time_sec: self.clock.elapsed_sec,
        };
        Ok((stats, event))
    }
}
