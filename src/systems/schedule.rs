use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::core::errors::LeagueError;
use crate::entities::game::Game;
use crate::utils::constants::GAMES_PER_TEAM;

/// Produces a league-wide schedule with exactly `GAMES_PER_TEAM` games per
/// team via rotating round-robin pairing: each round shuffles the teams
/// still needing games and pairs them off adjacently, alternating which
/// side of the pair is designated home to balance the count.
pub fn generate_schedule(
    team_ids: &[Uuid],
    rng: &mut ChaCha8Rng,
    start_date: NaiveDate,
) -> Result<Vec<Game>, LeagueError> {
    let mut remaining: HashMap<Uuid, u32> = team_ids
        .iter()
        .map(|id| (*id, GAMES_PER_TEAM as u32))
        .collect();
    let mut home_counts: HashMap<Uuid, u32> = team_ids.iter().map(|id| (*id, 0)).collect();
    let mut games = Vec::new();
    let mut round = 0u32;
    let mut stall_rounds = 0;

    while remaining.values().any(|&count| count > 0) {
        let mut pool: Vec<Uuid> = remaining
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(id, _)| *id)
            .collect();
        pool.shuffle(rng);

        let games_before = games.len();
        let scheduled_date = start_date + Duration::days(round as i64);

        let mut chunks = pool.chunks_exact(2);
        for pair in &mut chunks {
            let (first, second) = (pair[0], pair[1]);
            let first_home = home_counts[&first] <= home_counts[&second];
            let (home, away) = if first_home {
                (first, second)
            } else {
                (second, first)
            };

            games.push(Game::new_unplayed(Uuid::new_v4(), home, away, scheduled_date));
            *remaining.get_mut(&home).unwrap() -= 1;
            *remaining.get_mut(&away).unwrap() -= 1;
            *home_counts.get_mut(&home).unwrap() += 1;
        }

        if games.len() == games_before {
            stall_rounds += 1;
            if stall_rounds > team_ids.len() {
                return Err(LeagueError::ScheduleInfeasible(format!(
                    "no progress possible with {} teams still needing games",
                    pool.len()
                )));
            }
        } else {
            stall_rounds = 0;
        }

        round += 1;
        if round > GAMES_PER_TEAM as u32 * team_ids.len() as u32 {
            return Err(LeagueError::ScheduleInfeasible(
                "exceeded maximum scheduling rounds".to_string(),
            ));
        }
    }

    log::info!("generated {} games for {} teams over {round} rounds", games.len(), team_ids.len());
    Ok(games)
}
