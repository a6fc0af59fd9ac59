//! Team and roster database queries — the roster store collaborator.

use super::GameStore;
use crate::{
    error::{GameError, GameResult},
    types::{AgeGroup, PlayerId, Position, TeamId},
};
use chrono::{DateTime, Utc};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One roster member as stored on a team, before any game state exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamPlayer {
    pub id: PlayerId,
    pub name: String,
    pub jersey_number: Option<u8>,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub season: String,
    pub age_group: AgeGroup,
    pub division: Option<String>,
    pub players: Vec<TeamPlayer>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn new(name: &str, season: &str, age_group: AgeGroup, division: Option<&str>) -> Self {
        let now = Utc::now();
        Self {
            id: format!("team-{}", Uuid::new_v4()),
            name: name.to_string(),
            season: season.to_string(),
            age_group,
            division: division.map(str::to_string),
            players: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn next_player_id(&self) -> PlayerId {
        self.players.iter().map(|p| p.id).max().map_or(1, |m| m + 1)
    }

    /// Add a roster member. Jersey numbers, when set, must be unique
    /// within the team.
    pub fn add_player(
        &mut self,
        name: &str,
        jersey_number: Option<u8>,
        position: Option<Position>,
    ) -> GameResult<PlayerId> {
        if let Some(j) = jersey_number {
            self.check_jersey(j, None)?;
        }
        let id = self.next_player_id();
        self.players.push(TeamPlayer {
            id,
            name: name.trim().to_string(),
            jersey_number,
            position,
        });
        Ok(id)
    }

    /// Edit a roster member in place. The jersey check excludes the
    /// player being edited, so keeping their own number is fine.
    pub fn edit_player(
        &mut self,
        id: PlayerId,
        name: &str,
        jersey_number: Option<u8>,
        position: Option<Position>,
    ) -> GameResult<()> {
        if let Some(j) = jersey_number {
            self.check_jersey(j, Some(id))?;
        }
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GameError::PlayerNotFound(id))?;
        player.name = name.trim().to_string();
        player.jersey_number = jersey_number;
        player.position = position;
        Ok(())
    }

    pub fn remove_player(&mut self, id: PlayerId) -> GameResult<()> {
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        if self.players.len() == before {
            return Err(GameError::PlayerNotFound(id));
        }
        Ok(())
    }

    fn check_jersey(&self, jersey: u8, editing: Option<PlayerId>) -> GameResult<()> {
        if !(1..=99).contains(&jersey) {
            return Err(GameError::JerseyOutOfRange(jersey));
        }
        let taken = self
            .players
            .iter()
            .filter(|p| Some(p.id) != editing)
            .any(|p| p.jersey_number == Some(jersey));
        if taken {
            Err(GameError::JerseyTaken(jersey))
        } else {
            Ok(())
        }
    }
}

impl GameStore {
    pub fn insert_team(&self, team: &Team) -> GameResult<()> {
        self.conn().execute(
            "INSERT INTO team (team_id, name, season, age_group, division, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                team.id,
                team.name,
                team.season,
                team.age_group.as_str(),
                team.division,
                team.created_at.to_rfc3339(),
                team.updated_at.to_rfc3339(),
            ],
        )?;
        self.replace_roster(&team.id, &team.players)?;
        Ok(())
    }

    pub fn update_team(&self, team: &Team) -> GameResult<()> {
        let changed = self.conn().execute(
            "UPDATE team SET name = ?2, season = ?3, age_group = ?4, division = ?5,
                             updated_at = ?6
             WHERE team_id = ?1",
            params![
                team.id,
                team.name,
                team.season,
                team.age_group.as_str(),
                team.division,
                Utc::now().to_rfc3339(),
            ],
        )?;
        if changed == 0 {
            return Err(GameError::TeamNotFound(team.id.clone()));
        }
        self.replace_roster(&team.id, &team.players)?;
        Ok(())
    }

    pub fn delete_team(&self, team_id: &str) -> GameResult<()> {
        self.conn()
            .execute("DELETE FROM team WHERE team_id = ?1", params![team_id])?;
        Ok(())
    }

    pub fn get_team(&self, team_id: &str) -> GameResult<Option<Team>> {
        let mut stmt = self.conn().prepare(
            "SELECT team_id, name, season, age_group, division, created_at, updated_at
             FROM team WHERE team_id = ?1",
        )?;
        let team = stmt.query_row(params![team_id], team_row_mapper);
        match team {
            Ok(mut team) => {
                team.players = self.roster_for(team_id)?;
                Ok(Some(team))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_teams(&self) -> GameResult<Vec<Team>> {
        let mut stmt = self.conn().prepare(
            "SELECT team_id, name, season, age_group, division, created_at, updated_at
             FROM team ORDER BY created_at ASC",
        )?;
        let teams = stmt
            .query_map([], team_row_mapper)?
            .collect::<Result<Vec<_>, _>>()?;
        let mut result = Vec::with_capacity(teams.len());
        for mut team in teams {
            team.players = self.roster_for(&team.id)?;
            result.push(team);
        }
        Ok(result)
    }

    /// Overwrite a team's stored roster with the given players,
    /// preserving their order. Jersey uniqueness is re-validated.
    pub fn replace_roster(&self, team_id: &str, players: &[TeamPlayer]) -> GameResult<()> {
        let mut seen = std::collections::HashSet::new();
        for player in players {
            if let Some(j) = player.jersey_number {
                if !(1..=99).contains(&j) {
                    return Err(GameError::JerseyOutOfRange(j));
                }
                if !seen.insert(j) {
                    return Err(GameError::JerseyTaken(j));
                }
            }
        }
        self.conn().execute(
            "DELETE FROM roster_player WHERE team_id = ?1",
            params![team_id],
        )?;
        for (order, player) in players.iter().enumerate() {
            self.conn().execute(
                "INSERT INTO roster_player (team_id, player_id, name, jersey_number, position, sort_order)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    team_id,
                    player.id,
                    player.name,
                    player.jersey_number,
                    player.position.map(|p| p.as_str()),
                    order as i64,
                ],
            )?;
        }
        Ok(())
    }

    fn roster_for(&self, team_id: &str) -> GameResult<Vec<TeamPlayer>> {
        let mut stmt = self.conn().prepare(
            "SELECT player_id, name, jersey_number, position
             FROM roster_player WHERE team_id = ?1
             ORDER BY sort_order ASC",
        )?;
        let players = stmt
            .query_map(params![team_id], |row| {
                Ok(TeamPlayer {
                    id: row.get::<_, i64>(0)? as PlayerId,
                    name: row.get(1)?,
                    jersey_number: row.get::<_, Option<i64>>(2)?.map(|j| j as u8),
                    position: row
                        .get::<_, Option<String>>(3)?
                        .and_then(|s| Position::parse(&s)),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(players)
    }
}

fn team_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<Team> {
    let age_group: String = row.get(3)?;
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;
    Ok(Team {
        id: row.get(0)?,
        name: row.get(1)?,
        season: row.get(2)?,
        age_group: AgeGroup::parse(&age_group).unwrap_or(AgeGroup::U12),
        division: row.get(4)?,
        players: Vec::new(),
        created_at: parse_rfc3339(&created_at),
        updated_at: parse_rfc3339(&updated_at),
    })
}

fn parse_rfc3339(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
