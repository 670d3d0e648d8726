use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::LeagueError;
use crate::entities::{Season, Team};

pub const TEAM_COUNT: usize = 30;
pub const GAMES_PER_TEAM: usize = 82;

/// The single process-wide state value (spec §9: "model as explicit context
/// objects"). The League owns an arena of Teams; all cross-references
/// elsewhere are by `Uuid` looked up through this arena, so there are no
/// structural cycles at the ownership level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueState {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub user_team_id: Uuid,
    pub teams: HashMap<Uuid, Team>,
    pub season: Season,
}

pub fn default_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

impl LeagueState {
    pub fn new(user_team_id: Uuid, teams: Vec<Team>, season: Season) -> LeagueState {
        LeagueState {
            schema_version: CURRENT_SCHEMA_VERSION,
            user_team_id,
            teams: teams.into_iter().map(|t| (t.id, t)).collect(),
            season,
        }
    }

    pub fn list_teams(&self) -> Vec<&Team> {
        self.teams.values().collect()
    }

    pub fn get_team(&self, id: Uuid) -> Result<&Team, LeagueError> {
        self.teams
            .get(&id)
            .ok_or_else(|| LeagueError::NotFound(format!("team {id}")))
    }

    /// Atomic, all-or-nothing replacement of a team record. Re-validates
    /// invariants before the swap so a bad update never partially lands.
    pub fn update_team(&mut self, team: Team) -> Result<(), LeagueError> {
        team.validate()?;
        if !self.teams.contains_key(&team.id) {
            return Err(LeagueError::NotFound(format!("team {}", team.id)));
        }
        self.teams.insert(team.id, team);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::player::{Attributes, Position};
    use crate::entities::{Game, Player};
    use std::collections::HashSet;

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

    fn dummy_team() -> Team {
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
        let players: Vec<Player> = positions.iter().map(|p| dummy_player(*p)).collect();
        let starters: HashSet<Uuid> = players.iter().take(5).map(|p| p.id).collect();
        Team::new(
            Uuid::new_v4(),
            "Testville".to_string(),
            "Testers".to_string(),
            players,
            starters,
        )
        .unwrap()
    }

    #[test]
    fn update_team_rejects_unknown_invariant_violations() {
        let team = dummy_team();
        let user_team_id = team.id;
        let season = Season::new(
            Uuid::new_v4(),
            2026,
            user_team_id,
            Vec::<Game>::new(),
        );
        let mut state = LeagueState::new(user_team_id, vec![team.clone()], season);

        let mut broken = team.clone();
        broken.starters.clear();
        let result = state.update_team(broken);
        assert!(matches!(result, Err(LeagueError::InvalidTeam(_))));

        let unknown = Team {
            id: Uuid::new_v4(),
            ..team
        };
        let result = state.update_team(unknown);
        assert!(matches!(result, Err(LeagueError::NotFound(_))));
    }
}
