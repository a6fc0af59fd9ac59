//! Statistics projector — pure recomputation of current and projected
//! playing percentages.
//!
//! The projection assumes the player's *current* status holds for 100%
//! of the remaining time. It is an approximation, not a forecast of any
//! substitution plan.

use crate::{roster::GamePlayer, types::Seconds};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPercentages {
    pub playing_pct: f64,
    pub sitting_pct: f64,
    pub projected_playing_pct: f64,
    pub projected_sitting_pct: f64,
}

fn clamp_pct(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

/// Compute all four percentage fields for one player.
///
/// A player who has not played at all shows 0% sitting as well as 0%
/// playing, even with sitting time accumulated — the percentages only
/// activate once the player has been on the field. Intentional quirk.
pub fn project(
    elapsed_sec: Seconds,
    scheduled_duration_sec: Seconds,
    player: &GamePlayer,
) -> PlayerPercentages {
    let playing_pct = if elapsed_sec > 0 && player.playing_time_sec > 0 {
        clamp_pct(100.0 * player.playing_time_sec as f64 / elapsed_sec as f64)
    } else {
        0.0
    };
    let sitting_pct = if player.playing_time_sec > 0 {
        clamp_pct(100.0 - playing_pct)
    } else {
        0.0
    };

    let remaining_sec = scheduled_duration_sec.saturating_sub(elapsed_sec);
    let projected = if player.is_playing {
        player.playing_time_sec + remaining_sec
    } else {
        player.playing_time_sec
    };
    let projected_playing_pct = if scheduled_duration_sec > 0 {
        clamp_pct(100.0 * projected as f64 / scheduled_duration_sec as f64)
    } else {
        0.0
    };
    let projected_sitting_pct = clamp_pct(100.0 - projected_playing_pct);

    PlayerPercentages {
        playing_pct,
        sitting_pct,
        projected_playing_pct,
        projected_sitting_pct,
    }
}

/// Recompute every player's percentages in place. Called after each tick
/// and after each status toggle, before anything is persisted.
pub fn recompute(elapsed_sec: Seconds, scheduled_duration_sec: Seconds, players: &mut [GamePlayer]) {
    for player in players.iter_mut() {
        let pct = project(elapsed_sec, scheduled_duration_sec, player);
        player.playing_pct = pct.playing_pct;
        player.sitting_pct = pct.sitting_pct;
        player.projected_playing_pct = pct.projected_playing_pct;
        player.projected_sitting_pct = pct.projected_sitting_pct;
    }
}
