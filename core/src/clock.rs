//! Game clock — owns elapsed time, the run flag, and the regulation boundary.

use crate::{
    error::{GameError, GameResult},
    types::Seconds,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClockPhase {
    /// Pre-game: roster editable, clock at zero.
    Setup,
    Running,
    Paused,
    /// Terminal. Only reached through an explicit end() call.
    Ended,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameClock {
    pub elapsed_sec: Seconds,
    pub scheduled_duration_sec: Seconds,
    pub phase: ClockPhase,
}

/// What a single tick did. Callers cancel their timer registration
/// when the regulation boundary fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub elapsed_sec: Seconds,
    pub auto_paused: bool,
}

impl GameClock {
    pub fn new(scheduled_duration_sec: Seconds) -> Self {
        Self {
            elapsed_sec: 0,
            scheduled_duration_sec,
            phase: ClockPhase::Setup,
        }
    }

    pub fn has_started(&self) -> bool {
        self.phase != ClockPhase::Setup
    }

    pub fn is_running(&self) -> bool {
        self.phase == ClockPhase::Running
    }

    pub fn remaining_sec(&self) -> Seconds {
        self.scheduled_duration_sec.saturating_sub(self.elapsed_sec)
    }

    /// Change the scheduled duration. Only valid before the game starts;
    /// the duration is immutable once the clock leaves Setup.
    pub fn set_duration_min(&mut self, minutes: u32) -> GameResult<()> {
        if self.phase != ClockPhase::Setup {
            return Err(GameError::AlreadyStarted);
        }
        self.scheduled_duration_sec = minutes * 60;
        Ok(())
    }

    /// Leave Setup and start ticking. Roster non-emptiness is the
    /// session's precondition, not the clock's.
    pub fn start(&mut self) -> GameResult<()> {
        match self.phase {
            ClockPhase::Setup => {
                self.elapsed_sec = 0;
                self.phase = ClockPhase::Running;
                Ok(())
            }
            ClockPhase::Ended => Err(GameError::Ended),
            _ => Err(GameError::AlreadyStarted),
        }
    }

    /// Advance one second. Clamps at the scheduled duration and
    /// auto-pauses there — the session is never auto-ended, so the
    /// coach can still review before explicitly ending it.
    pub fn tick(&mut self) -> GameResult<TickOutcome> {
        match self.phase {
            ClockPhase::Running => {}
            ClockPhase::Ended => return Err(GameError::Ended),
            ClockPhase::Setup => return Err(GameError::NotStarted),
            // A straggler timer callback after pause is a no-op.
            ClockPhase::Paused => {
                return Ok(TickOutcome {
                    elapsed_sec: self.elapsed_sec,
                    auto_paused: false,
                })
            }
        }

        let next = self.elapsed_sec + 1;
        if next >= self.scheduled_duration_sec {
            self.elapsed_sec = self.scheduled_duration_sec;
            self.phase = ClockPhase::Paused;
            Ok(TickOutcome {
                elapsed_sec: self.elapsed_sec,
                auto_paused: true,
            })
        } else {
            self.elapsed_sec = next;
            Ok(TickOutcome {
                elapsed_sec: next,
                auto_paused: false,
            })
        }
    }

    /// Flip between Running and Paused. Elapsed time is never reset here.
    pub fn toggle_running(&mut self) -> GameResult<bool> {
        match self.phase {
            ClockPhase::Running => {
                self.phase = ClockPhase::Paused;
                Ok(false)
            }
            ClockPhase::Paused => {
                self.phase = ClockPhase::Running;
                Ok(true)
            }
            ClockPhase::Setup => Err(GameError::NotStarted),
            ClockPhase::Ended => Err(GameError::Ended),
        }
    }

    /// Return to Setup. Only allowed while paused.
    pub fn reset(&mut self) -> GameResult<()> {
        match self.phase {
            ClockPhase::Paused => {
                self.elapsed_sec = 0;
                self.phase = ClockPhase::Setup;
                Ok(())
            }
            ClockPhase::Running => Err(GameError::ResetWhileRunning),
            ClockPhase::Setup => Err(GameError::NotStarted),
            ClockPhase::Ended => Err(GameError::Ended),
        }
    }

    /// Terminal transition. Callers gate this behind explicit
    /// confirmation; it must never fire from a timer or pause event.
    pub fn end(&mut self) -> GameResult<()> {
        match self.phase {
            ClockPhase::Running | ClockPhase::Paused => {
                self.phase = ClockPhase::Ended;
                Ok(())
            }
            ClockPhase::Setup => Err(GameError::NotStarted),
            ClockPhase::Ended => Err(GameError::Ended),
        }
    }

    /// Re-apply the regulation boundary after a wall-clock fast-forward.
    /// A restore that overshot the scheduled duration comes back clamped
    /// and paused. Returns true if anything changed.
    pub fn apply_boundary(&mut self) -> bool {
        if !self.has_started() {
            return false;
        }
        let overshot = self.elapsed_sec > self.scheduled_duration_sec;
        let running_at_cap =
            self.elapsed_sec >= self.scheduled_duration_sec && self.phase == ClockPhase::Running;
        if overshot || running_at_cap {
            self.elapsed_sec = self.scheduled_duration_sec;
            if self.phase == ClockPhase::Running {
                self.phase = ClockPhase::Paused;
            }
            return true;
        }
        false
    }
}
