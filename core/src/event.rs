//! Events emitted by session operations.
//!
//! The core does not persist these; callers (the runner, tests) use them
//! for logging and display.

use crate::types::{GameId, PlayerId, Seconds};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        game_id: GameId,
        scheduled_duration_sec: Seconds,
    },
    TickAdvanced {
        elapsed_sec: Seconds,
    },
    /// Regulation time reached; the clock stopped itself but the game
    /// is still open for review.
    AutoPaused {
        elapsed_sec: Seconds,
    },
    ClockPaused {
        elapsed_sec: Seconds,
    },
    ClockResumed {
        elapsed_sec: Seconds,
    },
    PlayerStatusChanged {
        player_id: PlayerId,
        is_playing: bool,
        elapsed_sec: Seconds,
    },
    GameReset {
        game_id: GameId,
    },
    GameEnded {
        game_id: GameId,
        total_game_time_sec: Seconds,
    },
}
