use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::game::{safe_pct, Game, PlayerGameStats};
use crate::entities::playoff::PlayoffBracket;

/// Cumulative per-player totals, accumulated additively and commutatively
/// over every game a player appears in. Used for both the regular season
/// (`PlayerSeasonStats`) and the playoffs (`PlayerPlayoffStats`) via the
/// same underlying shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CumulativeStats {
    pub games_played: u16,
    pub points: u32,
    pub rebounds: u32,
    pub assists: u32,
    pub field_goals_made: u32,
    pub field_goals_attempted: u32,
    pub three_pointers_made: u32,
    pub three_pointers_attempted: u32,
    pub free_throws_made: u32,
    pub free_throws_attempted: u32,
    pub turnovers: u32,
    pub steals: u32,
    pub blocks: u32,
    pub fouls: u32,
    pub minutes: u32,
}

impl CumulativeStats {
    /// Folds in one game's box-score line for a player. Additive and
    /// commutative: accumulating games in any order yields the same totals.
    pub fn accumulate(&mut self, game_stats: &PlayerGameStats) {
        self.games_played += 1;
        self.points += game_stats.points as u32;
        self.rebounds += game_stats.rebounds as u32;
        self.assists += game_stats.assists as u32;
        self.field_goals_made += game_stats.field_goals_made as u32;
        self.field_goals_attempted += game_stats.field_goals_attempted as u32;
        self.three_pointers_made += game_stats.three_pointers_made as u32;
        self.three_pointers_attempted += game_stats.three_pointers_attempted as u32;
        self.free_throws_made += game_stats.free_throws_made as u32;
        self.free_throws_attempted += game_stats.free_throws_attempted as u32;
        self.turnovers += game_stats.turnovers as u32;
        self.steals += game_stats.steals as u32;
        self.blocks += game_stats.blocks as u32;
        self.fouls += game_stats.fouls as u32;
        self.minutes += game_stats.minutes as u32;
    }

    pub fn points_per_game(&self) -> f32 {
        self.per_game(self.points)
    }

    pub fn rebounds_per_game(&self) -> f32 {
        self.per_game(self.rebounds)
    }

    pub fn assists_per_game(&self) -> f32 {
        self.per_game(self.assists)
    }

    pub fn field_goal_pct(&self) -> f32 {
        safe_pct_u32(self.field_goals_made, self.field_goals_attempted)
    }

    pub fn three_point_pct(&self) -> f32 {
        safe_pct_u32(self.three_pointers_made, self.three_pointers_attempted)
    }

    pub fn free_throw_pct(&self) -> f32 {
        safe_pct_u32(self.free_throws_made, self.free_throws_attempted)
    }

    fn per_game(&self, total: u32) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            total as f32 / self.games_played as f32
        }
    }
}

fn safe_pct_u32(made: u32, attempted: u32) -> f32 {
    if attempted == 0 {
        0.0
    } else {
        made as f32 / attempted as f32
    }
}

pub type PlayerSeasonStats = CumulativeStats;
pub type PlayerPlayoffStats = CumulativeStats;

/// Which accumulator a finished game's box score should be folded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsTarget {
    Season,
    Playoff,
}

/// Owns the league-wide schedule and the season's cumulative state. The
/// user's `games` view is derived from `league_schedule` rather than
/// duplicated, so a played game is always the same object (by id and score)
/// in both views by construction — see DESIGN.md for this resolution of
/// the open question in spec §3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub id: Uuid,
    pub year: u32,
    pub user_team_id: Uuid,
    pub league_schedule: Vec<Game>,
    pub season_stats: HashMap<Uuid, PlayerSeasonStats>,
    #[serde(default)]
    pub is_post_season: bool,
    #[serde(default)]
    pub bracket: Option<PlayoffBracket>,
    #[serde(default)]
    pub playoff_stats: Option<HashMap<Uuid, PlayerPlayoffStats>>,
}

impl Season {
    pub fn new(id: Uuid, year: u32, user_team_id: Uuid, league_schedule: Vec<Game>) -> Season {
        Season {
            id,
            year,
            user_team_id,
            league_schedule,
            season_stats: HashMap::new(),
            is_post_season: false,
            bracket: None,
            playoff_stats: None,
        }
    }

    /// The ordered subset of `league_schedule` that involves the user's
    /// team. Derived on demand rather than stored, so it can never drift
    /// from the league-wide schedule.
    pub fn user_games(&self) -> Vec<&Game> {
        self.league_schedule
            .iter()
            .filter(|g| g.involves(self.user_team_id) && g.series_id.is_none())
            .collect()
    }

    /// True once every *regular-season* game is played. Playoff games may
    /// already be sitting unplayed in `league_schedule` by the time this is
    /// checked again post-postseason-start, so regular-season games (no
    /// `series_id`) are the only ones considered.
    pub fn is_regular_season_complete(&self) -> bool {
        self.league_schedule
            .iter()
            .filter(|g| g.series_id.is_none())
            .all(|g| g.is_played)
    }

    pub fn next_unplayed_game_for_user(&self) -> Option<&Game> {
        self.league_schedule
            .iter()
            .filter(|g| g.involves(self.user_team_id) && g.series_id.is_none() && !g.is_played)
            .min_by_key(|g| g.scheduled_date)
    }

    /// The user's next unplayed playoff game, if any exists yet. Playoff
    /// games are created lazily (one per series at a time) by the game
    /// service, so "none yet created" and "none eligible" look the same here.
    pub fn next_unplayed_playoff_game_for_user(&self) -> Option<&Game> {
        self.league_schedule
            .iter()
            .filter(|g| g.involves(self.user_team_id) && g.series_id.is_some() && !g.is_played)
            .min_by_key(|g| g.scheduled_date)
    }

    /// Folds a finished game's box score into the appropriate cumulative
    /// accumulator for every player who appeared in it.
    pub fn accumulate_stats(&mut self, game: &Game, target: StatsTarget) {
        let Some(box_score) = &game.box_score else {
            return;
        };
        let table = match target {
            StatsTarget::Season => &mut self.season_stats,
            StatsTarget::Playoff => self.playoff_stats.get_or_insert_with(HashMap::new),
        };
        for (player_id, stats) in box_score {
            table.entry(*player_id).or_default().accumulate(stats);
        }
    }

    /// Replaces a league-schedule game in place by id, keeping the schedule
    /// the single source of truth for both the user and league-wide views.
    pub fn record_game_result(&mut self, game: Game) {
        if let Some(existing) = self.league_schedule.iter_mut().find(|g| g.id == game.id) {
            *existing = game;
        } else {
            self.league_schedule.push(game);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn accumulate_stats_is_additive_across_games() {
        let mut stats = CumulativeStats::default();
        let game_one = PlayerGameStats {
            points: 20,
            field_goals_made: 8,
            field_goals_attempted: 15,
            ..Default::default()
        };
        let game_two = PlayerGameStats {
            points: 10,
            field_goals_made: 4,
            field_goals_attempted: 9,
            ..Default::default()
        };
        stats.accumulate(&game_one);
        stats.accumulate(&game_two);
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.points, 30);
        assert_eq!(stats.field_goals_made, 12);
        assert_eq!(stats.field_goals_attempted, 24);
    }

    #[test]
    fn user_games_view_reflects_league_schedule_updates() {
        let user_team = Uuid::new_v4();
        let opponent = Uuid::new_v4();
        let game_id = Uuid::new_v4();
        let game = Game::new_unplayed(
            game_id,
            user_team,
            opponent,
            NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
        );
        let mut season = Season::new(Uuid::new_v4(), 2026, user_team, vec![game]);

        let mut finished = season.league_schedule[0].clone();
        finished.is_played = true;
        finished.home_score = Some(100);
        finished.away_score = Some(90);
        season.record_game_result(finished);

        let user_games = season.user_games();
        assert_eq!(user_games.len(), 1);
        assert!(user_games[0].is_played);
        assert_eq!(user_games[0].home_score, Some(100));
    }
}
