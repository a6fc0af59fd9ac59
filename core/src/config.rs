//! Game-length configuration.
//!
//! Two mechanisms coexist by design: the age-group table supplies the
//! default when a session is created, and the coach may explicitly pick
//! one of the fixed override options before the game starts. Neither
//! applies once the clock has started.

use crate::types::AgeGroup;

/// Duration choices offered at game setup, in minutes.
pub const DURATION_OPTIONS_MIN: [u32; 4] = [60, 70, 80, 90];

#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Selectable pre-start duration overrides, minutes.
    pub duration_options_min: Vec<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            duration_options_min: DURATION_OPTIONS_MIN.to_vec(),
        }
    }
}

impl GameConfig {
    /// The duration a new session is created with, in seconds.
    pub fn default_duration_sec(&self, age_group: AgeGroup) -> u32 {
        age_group.default_duration_min() * 60
    }

    /// True if `minutes` is one of the offered override choices.
    pub fn is_valid_override(&self, minutes: u32) -> bool {
        self.duration_options_min.contains(&minutes)
    }
}
