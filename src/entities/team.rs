use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::LeagueError;
use crate::entities::player::{Player, Position};

pub const ROSTER_SIZE: usize = 15;
pub const STARTER_COUNT: usize = 5;
pub const MINUTES_PER_GAME: u16 = 240;

/// A 15-player roster with a designated starting five and an optional
/// rotation plan. Construction and updates both re-validate the invariants
/// in [`Team::validate`]; nothing outside this module produces a `Team`
/// without going through it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub city: String,
    pub name: String,
    pub players: Vec<Player>,
    pub starters: HashSet<Uuid>,
    #[serde(default)]
    pub rotation: Option<RotationConfig>,
}

impl Team {
    pub fn new(
        id: Uuid,
        city: String,
        name: String,
        players: Vec<Player>,
        starters: HashSet<Uuid>,
    ) -> Result<Team, LeagueError> {
        let team = Team {
            id,
            city,
            name,
            players,
            starters,
            rotation: None,
        };
        team.validate()?;
        Ok(team)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.city, self.name)
    }

    pub fn player(&self, id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Re-checks every invariant from the data model: exactly 15 unique
    /// players, exactly 5 starters all drawn from the roster, and (if a
    /// rotation is configured) depth-1 entries matching the starter set.
    pub fn validate(&self) -> Result<(), LeagueError> {
        if self.players.len() != ROSTER_SIZE {
            return Err(LeagueError::InvalidTeam(format!(
                "team {} has {} players, expected {}",
                self.id,
                self.players.len(),
                ROSTER_SIZE
            )));
        }

        let unique_ids: HashSet<Uuid> = self.players.iter().map(|p| p.id).collect();
        if unique_ids.len() != self.players.len() {
            return Err(LeagueError::InvalidTeam(format!(
                "team {} has duplicate player ids",
                self.id
            )));
        }

        if self.starters.len() != STARTER_COUNT {
            return Err(LeagueError::InvalidTeam(format!(
                "team {} has {} starters, expected {}",
                self.id,
                self.starters.len(),
                STARTER_COUNT
            )));
        }

        if !self.starters.is_subset(&unique_ids) {
            return Err(LeagueError::InvalidTeam(format!(
                "team {} starters are not all on the roster",
                self.id
            )));
        }

        if let Some(rotation) = &self.rotation {
            rotation.validate(&unique_ids)?;
            let depth_one_players: HashSet<Uuid> = rotation
                .depth_chart
                .iter()
                .filter(|entry| entry.depth == 1)
                .map(|entry| entry.player_id)
                .collect();
            if depth_one_players != self.starters {
                return Err(LeagueError::InvalidRotation(format!(
                    "team {} rotation depth-1 entries do not match starters",
                    self.id
                )));
            }
        }

        Ok(())
    }
}

/// Per-team plan assigning minutes and depth ranks to players. Drives lineup
/// cycling during possession simulation (`systems::possession`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationConfig {
    pub rotation_size: u8,
    pub minutes: HashMap<Uuid, u16>,
    pub depth_chart: Vec<DepthEntry>,
}

/// One (player, slot, depth) assignment in a team's depth chart. Depth 1 is
/// the starter at that slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthEntry {
    pub player_id: Uuid,
    pub slot: Position,
    pub depth: u8,
}

impl RotationConfig {
    pub fn validate(&self, roster: &HashSet<Uuid>) -> Result<(), LeagueError> {
        if !(5..=12).contains(&self.rotation_size) {
            return Err(LeagueError::InvalidRotation(format!(
                "rotation size {} out of range [5,12]",
                self.rotation_size
            )));
        }

        for (player_id, minutes) in &self.minutes {
            if !roster.contains(player_id) {
                return Err(LeagueError::InvalidRotation(format!(
                    "rotation references unknown player {player_id}"
                )));
            }
            if *minutes == 0 {
                return Err(LeagueError::InvalidRotation(format!(
                    "active player {player_id} has zero allocated minutes"
                )));
            }
        }

        for slot in Position::ALL {
            let depth_one_count = self
                .depth_chart
                .iter()
                .filter(|entry| entry.slot == slot && entry.depth == 1)
                .count();
            if depth_one_count != 1 {
                return Err(LeagueError::InvalidRotation(format!(
                    "slot {slot:?} does not have exactly one depth-1 entry"
                )));
            }
        }

        let mut seen = HashSet::new();
        for entry in &self.depth_chart {
            if !seen.insert((entry.slot, entry.depth)) {
                return Err(LeagueError::InvalidRotation(format!(
                    "duplicate depth chart entry for slot {:?} depth {}",
                    entry.slot, entry.depth
                )));
            }
        }

        let total_minutes: u32 = self.minutes.values().map(|m| *m as u32).sum();
        if total_minutes != MINUTES_PER_GAME as u32 {
            return Err(LeagueError::InvalidRotation(format!(
                "rotation minutes sum to {total_minutes}, expected {MINUTES_PER_GAME}"
            )));
        }

        Ok(())
    }

    /// The depth-1 (starting) player assigned to a given slot, if any.
    pub fn starter_for_slot(&self, slot: Position) -> Option<Uuid> {
        self.depth_chart
            .iter()
            .find(|entry| entry.slot == slot && entry.depth == 1)
            .map(|entry| entry.player_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::player::Attributes;

    fn dummy_player(position: Position) -> Player {
        Player {
            id: Uuid::new_v4(),
            name: "Dummy".to_string(),
            age: 25,
            height: 78,
            position,
            role: None,
            attributes: Attributes {
                shooting: 50,
                post_shooting: 50,
                three_point: 50,
                ball_handling: 50,
                passing: 50,
                rebounding: 50,
                defense: 50,
                speed: 50,
                blocks: 50,
                steals: 50,
            },
        }
    }

    fn sample_roster() -> Vec<Player> {
        let positions = [
            Position::PG,
            Position::PG,
            Position::PG,
            Position::SG,
            Position::SG,
            Position::SG,
            Position::SF,
            Position::SF,
            Position::SF,
            Position::PF,
            Position::PF,
            Position::PF,
            Position::C,
            Position::C,
            Position::C,
        ];
        positions.iter().map(|p| dummy_player(*p)).collect()
    }

    #[test]
    fn valid_team_passes_validation() {
        let players = sample_roster();
        let starters: HashSet<Uuid> = players.iter().take(5).map(|p| p.id).collect();
        let team = Team::new(
            Uuid::new_v4(),
            "Testville".to_string(),
            "Testers".to_string(),
            players,
            starters,
        );
        assert!(team.is_ok());
    }

    #[test]
    fn wrong_roster_size_is_rejected() {
        let mut players = sample_roster();
        players.pop();
        let starters: HashSet<Uuid> = players.iter().take(5).map(|p| p.id).collect();
        let team = Team::new(
            Uuid::new_v4(),
            "Testville".to_string(),
            "Testers".to_string(),
            players,
            starters,
        );
        assert!(matches!(team, Err(LeagueError::InvalidTeam(_))));
    }

    #[test]
    fn starters_not_on_roster_are_rejected() {
        let players = sample_roster();
        let mut starters: HashSet<Uuid> = players.iter().take(4).map(|p| p.id).collect();
        starters.insert(Uuid::new_v4());
        let team = Team::new(
            Uuid::new_v4(),
            "Testville".to_string(),
            "Testers".to_string(),
            players,
            starters,
        );
        assert!(matches!(team, Err(LeagueError::InvalidTeam(_))));
    }
}
