//! Shared primitive types used across the tracker.

use serde::{Deserialize, Serialize};

/// Whole seconds of game time. The clock only ever moves in 1-second steps.
pub type Seconds = u32;

/// A player's identifier, unique within one team.
pub type PlayerId = u32;

/// The canonical team identifier.
pub type TeamId = String;

/// The canonical game/session identifier.
pub type GameId = String;

/// AYSO age group. Determines the default game length.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AgeGroup {
    #[serde(rename = "6U")]
    U6,
    #[serde(rename = "8U")]
    U8,
    #[serde(rename = "10U")]
    U10,
    #[serde(rename = "12U")]
    U12,
    #[serde(rename = "14U")]
    U14,
    #[serde(rename = "16U")]
    U16,
    #[serde(rename = "19U")]
    U19,
}

impl AgeGroup {
    /// Regulation game length in minutes for this age group.
    pub fn default_duration_min(&self) -> u32 {
        match self {
            AgeGroup::U6 => 20,
            AgeGroup::U8 => 40,
            AgeGroup::U10 => 50,
            AgeGroup::U12 => 60,
            AgeGroup::U14 => 80,
            AgeGroup::U16 => 80,
            AgeGroup::U19 => 90,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::U6 => "6U",
            AgeGroup::U8 => "8U",
            AgeGroup::U10 => "10U",
            AgeGroup::U12 => "12U",
            AgeGroup::U14 => "14U",
            AgeGroup::U16 => "16U",
            AgeGroup::U19 => "19U",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "6U" => Some(AgeGroup::U6),
            "8U" => Some(AgeGroup::U8),
            "10U" => Some(AgeGroup::U10),
            "12U" => Some(AgeGroup::U12),
            "14U" => Some(AgeGroup::U14),
            "16U" => Some(AgeGroup::U16),
            "19U" => Some(AgeGroup::U19),
            _ => None,
        }
    }
}

/// Field position a roster player can be assigned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Position {
    Forward,
    Midfielder,
    Defender,
    Goalkeeper,
    Utility,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Forward => "Forward",
            Position::Midfielder => "Midfielder",
            Position::Defender => "Defender",
            Position::Goalkeeper => "Goalkeeper",
            Position::Utility => "Utility",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Forward" => Some(Position::Forward),
            "Midfielder" => Some(Position::Midfielder),
            "Defender" => Some(Position::Defender),
            "Goalkeeper" => Some(Position::Goalkeeper),
            "Utility" => Some(Position::Utility),
            _ => None,
        }
    }
}
