//! Game-history database queries — the history store collaborator.
//!
//! The core only produces records here; browsing and pagination belong
//! to the caller.

use super::GameStore;
use crate::{
    error::GameResult,
    session::{FinalGameStats, FinalPlayerStats, GameSession},
    types::{GameId, PlayerId, Seconds, TeamId},
};
use chrono::{DateTime, Utc};
use rusqlite::params;
use serde::{Deserialize, Serialize};

/// One finalized game, wrapping the FinalGameStats it was ended with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub id: GameId,
    pub team_id: TeamId,
    pub team_name: String,
    pub played_at: DateTime<Utc>,
    pub duration_min: u32,
    pub final_stats: FinalGameStats,
}

impl GameRecord {
    pub fn from_session(session: &GameSession, stats: &FinalGameStats, now: DateTime<Utc>) -> Self {
        Self {
            id: session.id.clone(),
            team_id: session.team_id.clone(),
            team_name: session.team_name.clone(),
            played_at: now,
            duration_min: stats.total_game_time_sec / 60,
            final_stats: stats.clone(),
        }
    }
}

impl GameStore {
    pub fn insert_game(&self, record: &GameRecord) -> GameResult<()> {
        self.conn().execute(
            "INSERT INTO game_history (game_id, team_id, team_name, played_at,
                                       duration_min, total_game_time_sec)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.id,
                record.team_id,
                record.team_name,
                record.played_at.to_rfc3339(),
                record.duration_min,
                record.final_stats.total_game_time_sec,
            ],
        )?;
        for line in &record.final_stats.players {
            self.conn().execute(
                "INSERT INTO game_history_player (game_id, player_id, playing_time_sec,
                                                  sitting_time_sec, playing_pct)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.id,
                    line.player_id,
                    line.playing_time_sec,
                    line.sitting_time_sec,
                    line.playing_pct,
                ],
            )?;
        }
        Ok(())
    }

    pub fn games_for_team(&self, team_id: &str) -> GameResult<Vec<GameRecord>> {
        self.query_games(
            "SELECT game_id, team_id, team_name, played_at, duration_min, total_game_time_sec
             FROM game_history WHERE team_id = ?1 ORDER BY played_at DESC",
            params![team_id],
        )
    }

    pub fn list_games(&self) -> GameResult<Vec<GameRecord>> {
        self.query_games(
            "SELECT game_id, team_id, team_name, played_at, duration_min, total_game_time_sec
             FROM game_history ORDER BY played_at DESC",
            [],
        )
    }

    pub fn game_count(&self) -> GameResult<i64> {
        let count = self
            .conn()
            .query_row("SELECT COUNT(*) FROM game_history", [], |row| row.get(0))?;
        Ok(count)
    }

    fn query_games<P: rusqlite::Params>(&self, sql: &str, params: P) -> GameResult<Vec<GameRecord>> {
        let mut stmt = self.conn().prepare(sql)?;
        let headers = stmt
            .query_map(params, |row| {
                let played_at: String = row.get(3)?;
                Ok((
                    row.get::<_, GameId>(0)?,
                    row.get::<_, TeamId>(1)?,
                    row.get::<_, String>(2)?,
                    played_at,
                    row.get::<_, i64>(4)? as u32,
                    row.get::<_, i64>(5)? as Seconds,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = Vec::with_capacity(headers.len());
        for (id, team_id, team_name, played_at, duration_min, total) in headers {
            let players = self.stats_for_game(&id)?;
            records.push(GameRecord {
                id,
                team_id,
                team_name,
                played_at: DateTime::parse_from_rfc3339(&played_at)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now()),
                duration_min,
                final_stats: FinalGameStats {
                    players,
                    total_game_time_sec: total,
                },
            });
        }
        Ok(records)
    }

    fn stats_for_game(&self, game_id: &str) -> GameResult<Vec<FinalPlayerStats>> {
        let mut stmt = self.conn().prepare(
            "SELECT player_id, playing_time_sec, sitting_time_sec, playing_pct
             FROM game_history_player WHERE game_id = ?1 ORDER BY player_id ASC",
        )?;
        let lines = stmt
            .query_map(params![game_id], |row| {
                Ok(FinalPlayerStats {
                    player_id: row.get::<_, i64>(0)? as PlayerId,
                    playing_time_sec: row.get::<_, i64>(1)? as Seconds,
                    sitting_time_sec: row.get::<_, i64>(2)? as Seconds,
                    playing_pct: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lines)
    }
}
