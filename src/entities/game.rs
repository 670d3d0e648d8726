use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single scheduled or completed game between two teams. `is_played` is
/// kept in lockstep with `home_score`/`away_score`/`box_score` being
/// populated; nothing outside `GameService` should set one without the
/// others (see `GameService::apply_result`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_score: Option<u16>,
    pub away_score: Option<u16>,
    pub is_played: bool,
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub series_id: Option<Uuid>,
    #[serde(default)]
    pub box_score: Option<HashMap<Uuid, PlayerGameStats>>,
}

impl Game {
    pub fn new_unplayed(
        id: Uuid,
        home_team_id: Uuid,
        away_team_id: Uuid,
        scheduled_date: NaiveDate,
    ) -> Game {
        Game {
            id,
            home_team_id,
            away_team_id,
            home_score: None,
            away_score: None,
            is_played: false,
            scheduled_date,
            series_id: None,
            box_score: None,
        }
    }

    pub fn involves(&self, team_id: Uuid) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    pub fn winner(&self) -> Option<Uuid> {
        match (self.home_score, self.away_score) {
            (Some(h), Some(a)) if h > a => Some(self.home_team_id),
            (Some(h), Some(a)) if a > h => Some(self.away_team_id),
            _ => None,
        }
    }
}

/// Counters for a single player's performance in a single game. Derived
/// percentages guard against division by zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerGameStats {
    pub points: u16,
    pub rebounds: u16,
    pub assists: u16,
    pub field_goals_made: u16,
    pub field_goals_attempted: u16,
    pub three_pointers_made: u16,
    pub three_pointers_attempted: u16,
    pub free_throws_made: u16,
    pub free_throws_attempted: u16,
    pub turnovers: u16,
    pub steals: u16,
    pub blocks: u16,
    pub fouls: u16,
    pub minutes: u16,
}

impl PlayerGameStats {
    pub fn field_goal_pct(&self) -> f32 {
        safe_pct(self.field_goals_made, self.field_goals_attempted)
    }

    pub fn three_point_pct(&self) -> f32 {
        safe_pct(self.three_pointers_made, self.three_pointers_attempted)
    }

    pub fn free_throw_pct(&self) -> f32 {
        safe_pct(self.free_throws_made, self.free_throws_attempted)
    }
}

pub(crate) fn safe_pct(made: u16, attempted: u16) -> f32 {
    if attempted == 0 {
        0.0
    } else {
        made as f32 / attempted as f32
    }
}
