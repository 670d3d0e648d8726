use std::collections::HashMap;

use uuid::Uuid;

use crate::core::errors::LeagueError;
use crate::entities::game::Game;
use crate::entities::playoff::Conference;
use crate::entities::team::Team;
use crate::utils::conferences::TEAMS;

/// A single conference standings row: raw record plus the win percentage
/// used as the secondary sort key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandingRow {
    pub team_id: Uuid,
    pub wins: u32,
    pub losses: u32,
}

impl StandingRow {
    pub fn win_pct(&self) -> f32 {
        let total = self.wins + self.losses;
        if total == 0 {
            0.0
        } else {
            self.wins as f32 / total as f32
        }
    }
}

/// Looks up a team's conference via the fixed city/name table. Teams not
/// present in the table (e.g. ad hoc teams built for isolated tests) have no
/// conference and are excluded from standings.
pub fn conference_of(team: &Team) -> Option<Conference> {
    TEAMS
        .iter()
        .find(|(city, name, _)| *city == team.city && *name == team.name)
        .map(|(_, _, conference)| *conference)
}

fn record_for(team_id: Uuid, games: &[Game]) -> (u32, u32) {
    let mut wins = 0;
    let mut losses = 0;
    for game in games {
        if !game.is_played || !game.involves(team_id) {
            continue;
        }
        match game.winner() {
            Some(winner) if winner == team_id => wins += 1,
            Some(_) => losses += 1,
            None => {}
        }
    }
    (wins, losses)
}

/// Standings for one conference, sorted wins desc, win% desc, team full name
/// asc — the deterministic tiebreaker order from §4.7.
pub fn standings_for_conference(
    conference: Conference,
    teams: &HashMap<Uuid, Team>,
    games: &[Game],
) -> Vec<StandingRow> {
    let mut rows: Vec<(StandingRow, String)> = teams
        .values()
        .filter(|t| conference_of(t) == Some(conference))
        .map(|t| {
            let (wins, losses) = record_for(t.id, games);
            (
                StandingRow {
                    team_id: t.id,
                    wins,
                    losses,
                },
                t.full_name(),
            )
        })
        .collect();

    rows.sort_by(|(a, a_name), (b, b_name)| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.win_pct().partial_cmp(&a.win_pct()).unwrap())
            .then_with(|| a_name.cmp(b_name))
    });

    rows.into_iter().map(|(row, _)| row).collect()
}

/// Computes seeds 1..N (N = teams in conference) for both conferences from a
/// set of played games. Pure function of `teams`/`games`; calling it twice on
/// identical input yields identical output (§8 determinism property).
pub fn compute_seedings(
    teams: &HashMap<Uuid, Team>,
    games: &[Game],
) -> Result<HashMap<Uuid, u8>, LeagueError> {
    let mut seedings = HashMap::new();
    for conference in [Conference::East, Conference::West] {
        let rows = standings_for_conference(conference, teams, games);
        for (index, row) in rows.iter().enumerate() {
            let seed = u8::try_from(index + 1).map_err(|_| {
                LeagueError::InvalidSeeding(format!(
                    "conference {conference:?} has more than 255 teams"
                ))
            })?;
            seedings.insert(row.team_id, seed);
        }
    }
    Ok(seedings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn played_game(home: Uuid, away: Uuid, home_score: u16, away_score: u16) -> Game {
        let mut game = Game::new_unplayed(
            Uuid::new_v4(),
            home,
            away,
            NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
        );
        game.is_played = true;
        game.home_score = Some(home_score);
        game.away_score = Some(away_score);
        game
    }

    fn team_named(city: &str, name: &str) -> Team {
        use crate::entities::player::{Attributes, Position};
        use crate::entities::player::Player;
        use std::collections::HashSet;

        let attrs = Attributes {
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
        };
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
        let players: Vec<Player> = positions
            .iter()
            .map(|p| Player {
                id: Uuid::new_v4(),
                name: "Filler".to_string(),
                age: 25,
                height: 78,
                position: *p,
                role: None,
                attributes: attrs,
            })
            .collect();
        let starters: HashSet<Uuid> = players.iter().take(5).map(|p| p.id).collect();
        Team::new(Uuid::new_v4(), city.to_string(), name.to_string(), players, starters).unwrap()
    }

    #[test]
    fn tied_records_break_by_team_name_alphabetically() {
        let a = team_named("Boston", "Lighthouses");
        let b = team_named("New York", "Comets");
        let c = team_named("Philadelphia", "Founders");

        let mut games = Vec::new();
        for team in [&a, &b, &c] {
            for _ in 0..45 {
                games.push(played_game(team.id, Uuid::new_v4(), 100, 90));
            }
            for _ in 0..37 {
                games.push(played_game(Uuid::new_v4(), team.id, 100, 90));
            }
        }

        let mut teams = HashMap::new();
        for team in [a.clone(), b.clone(), c.clone()] {
            teams.insert(team.id, team);
        }

        let rows = standings_for_conference(Conference::East, &teams, &games);
        assert_eq!(rows[0].team_id, a.id);
        assert_eq!(rows[1].team_id, b.id);
        assert_eq!(rows[2].team_id, c.id);
    }

    #[test]
    fn win_is_not_counted_when_opponent_did_not_lose() {
        let a = team_named("Boston", "Lighthouses");
        let unplayed = Game::new_unplayed(
            Uuid::new_v4(),
            a.id,
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
        );
        let (wins, losses) = record_for(a.id, &[unplayed]);
        assert_eq!((wins, losses), (0, 0));
    }

    #[test]
    fn seedings_are_deterministic_across_repeated_calls() {
        let a = team_named("Boston", "Lighthouses");
        let b = team_named("New York", "Comets");
        let games = vec![played_game(a.id, b.id, 100, 90)];
        let mut teams = HashMap::new();
        teams.insert(a.id, a.clone());
        teams.insert(b.id, b.clone());

        let first = compute_seedings(&teams, &games).unwrap();
        let second = compute_seedings(&teams, &games).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.get(&a.id), Some(&1));
    }
}
