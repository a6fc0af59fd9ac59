use crate::types::{PlayerId, TeamId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Game has already started")]
    AlreadyStarted,

    #[error("Game has not started")]
    NotStarted,

    #[error("Game has ended")]
    Ended,

    #[error("Cannot start a game with an empty roster")]
    EmptyRoster,

    #[error("Roster is locked once the game has started")]
    RosterLocked,

    #[error("Reset is only allowed while the clock is paused")]
    ResetWhileRunning,

    #[error("Jersey number {0} is already taken")]
    JerseyTaken(u8),

    #[error("Jersey number {0} is out of range (1-99)")]
    JerseyOutOfRange(u8),

    #[error("Player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("Team '{0}' not found")]
    TeamNotFound(TeamId),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type GameResult<T> = Result<T, GameError>;
