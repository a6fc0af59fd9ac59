//! Roster members and the per-player time ledger.

use crate::{
    error::{GameError, GameResult},
    types::{PlayerId, Position, Seconds},
};
use serde::{Deserialize, Serialize};

/// One roster member during a live game.
///
/// The two accumulators are the source of truth; every percentage field
/// is derived and recomputed each tick (see `stats`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GamePlayer {
    pub id: PlayerId,
    pub name: String,
    pub is_playing: bool,
    pub playing_time_sec: Seconds,
    pub sitting_time_sec: Seconds,
    pub playing_pct: f64,
    pub sitting_pct: f64,
    pub projected_playing_pct: f64,
    pub projected_sitting_pct: f64,
    pub jersey_number: Option<u8>,
    pub position: Option<Position>,
}

impl GamePlayer {
    /// A fresh player: on the field, nothing accumulated.
    pub fn new(id: PlayerId, name: &str, jersey_number: Option<u8>, position: Option<Position>) -> Self {
        Self {
            id,
            name: name.to_string(),
            is_playing: true,
            playing_time_sec: 0,
            sitting_time_sec: 0,
            playing_pct: 0.0,
            sitting_pct: 0.0,
            projected_playing_pct: 0.0,
            projected_sitting_pct: 0.0,
            jersey_number,
            position,
        }
    }

    /// Zero all accumulated time and derived percentages, and put the
    /// player back on the field. Used at game start and on reset.
    pub fn reset_stats(&mut self) {
        self.is_playing = true;
        self.playing_time_sec = 0;
        self.sitting_time_sec = 0;
        self.playing_pct = 0.0;
        self.sitting_pct = 0.0;
        self.projected_playing_pct = 0.0;
        self.projected_sitting_pct = 0.0;
    }

    /// Credit one tick's worth of time to the appropriate accumulator.
    pub fn on_tick(&mut self, delta_sec: Seconds) {
        if self.is_playing {
            self.playing_time_sec += delta_sec;
        } else {
            self.sitting_time_sec += delta_sec;
        }
    }
}

/// Validate a jersey number against the rest of the roster. The player
/// being edited (if any) is excluded from the uniqueness check, so saving
/// a player without changing their number is never rejected.
pub fn check_jersey(
    players: &[GamePlayer],
    jersey: u8,
    editing: Option<PlayerId>,
) -> GameResult<()> {
    if !(1..=99).contains(&jersey) {
        return Err(GameError::JerseyOutOfRange(jersey));
    }
    let taken = players
        .iter()
        .filter(|p| Some(p.id) != editing)
        .any(|p| p.jersey_number == Some(jersey));
    if taken {
        Err(GameError::JerseyTaken(jersey))
    } else {
        Ok(())
    }
}
