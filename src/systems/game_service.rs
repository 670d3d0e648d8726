use chrono::Duration;
use uuid::Uuid;

use crate::core::errors::LeagueError;
use crate::core::league_state::LeagueState;
use crate::entities::game::Game;
use crate::entities::playoff::Round;
use crate::systems::{playoff_engine, possession, season_manager};

/// Plays one game end to end: reads the **current** home/away `Team`
/// snapshots from `state.teams` (never a stale capture — §5's ordering
/// guarantee), simulates it, and folds the result back into the season.
/// Returns the finished `Game`.
fn simulate_game_by_id(state: &mut LeagueState, game_id: Uuid, seed: Option<u64>) -> Result<Game, LeagueError> {
    let pending = state
        .season
        .league_schedule
        .iter()
        .find(|g| g.id == game_id)
        .cloned()
        .ok_or_else(|| LeagueError::NotFound(format!("game {game_id}")))?;
    if pending.is_played {
        return Err(LeagueError::NothingToSimulate(format!("game {game_id} already played")));
    }

    let home = state.get_team(pending.home_team_id)?.clone();
    let away = state.get_team(pending.away_team_id)?.clone();

    let mut finished = possession::simulate_game(pending.id, &home, &away, pending.scheduled_date, seed);
    finished.series_id = pending.series_id;
    log::info!(
        "game {} final: {} {} - {} {}",
        finished.id,
        home.full_name(),
        finished.home_score.unwrap_or(0),
        finished.away_score.unwrap_or(0),
        away.full_name(),
    );
    season_manager::apply_result(state, finished.clone())?;
    Ok(finished)
}

/// Creates the next unplayed game for every incomplete series in the
/// bracket's current round that doesn't already have one pending. Playoff
/// games are synthesized lazily, one at a time per series, rather than all
/// seven up front, since a series may end before game 7 is ever needed.
fn ensure_pending_playoff_games(state: &mut LeagueState) -> Result<(), LeagueError> {
    let Some(bracket) = &state.season.bracket else {
        return Ok(());
    };
    if bracket.current_round == Round::Complete {
        return Ok(());
    }

    let mut to_create: Vec<(Uuid, Uuid, Uuid)> = Vec::new(); // (series_id, home, away)
    for series in bracket.series_in_round(bracket.current_round) {
        if series.is_complete {
            continue;
        }
        let already_pending = state
            .season
            .league_schedule
            .iter()
            .any(|g| g.series_id == Some(series.id) && !g.is_played);
        if already_pending {
            continue;
        }
        let game_number = series.games_played() + 1;
        let home = playoff_engine::home_team_for_game(series, game_number);
        let away = if home == series.higher_seed_team_id {
            series.lower_seed_team_id
        } else {
            series.higher_seed_team_id
        };
        to_create.push((series.id, home, away));
    }

    let next_date = state
        .season
        .league_schedule
        .iter()
        .map(|g| g.scheduled_date)
        .max()
        .map(|d| d + Duration::days(1))
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    for (series_id, home, away) in to_create {
        let mut game = Game::new_unplayed(Uuid::new_v4(), home, away, next_date);
        game.series_id = Some(series_id);
        state.season.league_schedule.push(game);
    }
    Ok(())
}

/// Plays the user's next eligible game — regular season if still in season,
/// otherwise their next playoff game — and also advances any other
/// in-progress series in the current playoff round so the bracket stays
/// synchronized while the user plays through their own series.
pub fn simulate_next_game(state: &mut LeagueState, seed: Option<u64>) -> Result<Game, LeagueError> {
    ensure_pending_playoff_games(state)?;

    let user_team_id = state.user_team_id;
    let game_id = if state.season.is_post_season {
        state.season.next_unplayed_playoff_game_for_user().map(|g| g.id)
    } else {
        state.season.next_unplayed_game_for_user().map(|g| g.id)
    }
    .ok_or_else(|| LeagueError::NothingToSimulate("no eligible game for the user's team".to_string()))?;

    let finished = simulate_game_by_id(state, game_id, seed)?;

    if state.season.is_post_season {
        simulate_other_current_round_games(state, user_team_id, seed)?;
    }

    Ok(finished)
}

fn simulate_other_current_round_games(
    state: &mut LeagueState,
    user_team_id: Uuid,
    seed: Option<u64>,
) -> Result<(), LeagueError> {
    ensure_pending_playoff_games(state)?;
    let Some(bracket) = &state.season.bracket else {
        return Ok(());
    };
    let current_round = bracket.current_round;

    let other_game_ids: Vec<Uuid> = state
        .season
        .league_schedule
        .iter()
        .filter(|g| {
            !g.is_played
                && !g.involves(user_team_id)
                && g.series_id
                    .and_then(|sid| bracket.series.get(&sid))
                    .map(|s| s.round == current_round)
                    .unwrap_or(false)
        })
        .map(|g| g.id)
        .collect();

    for game_id in other_game_ids {
        simulate_game_by_id(state, game_id, seed)?;
    }
    Ok(())
}

/// Batch-simulates every unplayed regular-season game, in schedule order.
pub fn simulate_remaining_regular_season(state: &mut LeagueState, seed: Option<u64>) -> Result<(), LeagueError> {
    loop {
        let next = state
            .season
            .league_schedule
            .iter()
            .filter(|g| g.series_id.is_none() && !g.is_played)
            .min_by_key(|g| g.scheduled_date)
            .map(|g| g.id);
        let Some(game_id) = next else {
            break;
        };
        simulate_game_by_id(state, game_id, seed)?;
    }
    Ok(())
}

/// Advances the postseason — simulating every remaining game of every
/// in-progress series — until `currentRound = complete`, returning the
/// champion. Runs even when the user's own team missed the playoffs.
pub fn simulate_rest_of_playoffs(state: &mut LeagueState, seed: Option<u64>) -> Result<Option<Uuid>, LeagueError> {
    if !state.season.is_post_season {
        return Err(LeagueError::NothingToSimulate(
            "regular season is not complete".to_string(),
        ));
    }

    loop {
        ensure_pending_playoff_games(state)?;
        let Some(bracket) = &state.season.bracket else {
            return Ok(None);
        };
        if bracket.current_round == Round::Complete {
            return Ok(bracket.champion());
        }

        let pending: Vec<Uuid> = state
            .season
            .league_schedule
            .iter()
            .filter(|g| !g.is_played && g.series_id.is_some())
            .map(|g| g.id)
            .collect();

        if pending.is_empty() {
            // Nothing pending and round isn't complete: no further progress
            // is possible (shouldn't occur given `ensure_pending_playoff_games`).
            return Ok(bracket.champion());
        }

        for game_id in pending {
            simulate_game_by_id(state, game_id, seed)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::season::Season;
    use crate::systems::factory::{generate_league_teams, make_rng};
    use crate::systems::schedule::generate_schedule;
    use chrono::NaiveDate;

    fn sample_state(seed: u64) -> LeagueState {
        let mut rng = make_rng(Some(seed));
        let teams = generate_league_teams(&mut rng).unwrap();
        let team_ids: Vec<Uuid> = teams.iter().map(|t| t.id).collect();
        let user_team_id = team_ids[0];
        let schedule = generate_schedule(&team_ids, &mut rng, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()).unwrap();
        let season = Season::new(Uuid::new_v4(), 2026, user_team_id, schedule);
        LeagueState::new(user_team_id, teams, season)
    }

    #[test]
    fn simulate_next_game_plays_the_earliest_unplayed_user_game() {
        let mut state = sample_state(21);
        let game = simulate_next_game(&mut state, Some(1)).unwrap();
        assert!(game.is_played);
        assert!(game.involves(state.user_team_id));
        assert_ne!(game.home_score, game.away_score);
    }

    #[test]
    fn no_eligible_game_reports_nothing_to_simulate() {
        let mut state = sample_state(22);
        state.season.league_schedule.clear();
        let result = simulate_next_game(&mut state, Some(1));
        assert!(matches!(result, Err(LeagueError::NothingToSimulate(_))));
    }
}
