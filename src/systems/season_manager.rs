use std::collections::HashMap;

use uuid::Uuid;

use crate::core::errors::LeagueError;
use crate::core::league_state::LeagueState;
use crate::entities::game::Game;
use crate::entities::playoff::Conference;
use crate::entities::season::StatsTarget;
use crate::systems::{playoff_engine, standings};

/// Builds conference seedings and the postseason bracket once the regular
/// season finishes, per §4.6's postseason-trigger policy.
pub fn start_post_season(state: &mut LeagueState) -> Result<(), LeagueError> {
    state.season.is_post_season = true;

    let seedings = standings::compute_seedings(&state.teams, &state.season.league_schedule)?;
    let conferences: HashMap<Uuid, Conference> = state
        .teams
        .values()
        .filter_map(|t| standings::conference_of(t).map(|c| (t.id, c)))
        .collect();

    let bracket = playoff_engine::build_bracket(state.season.id, &seedings, &conferences)?;
    log::info!("regular season complete, postseason bracket built with {} play-in series", bracket.play_in_games.len());
    state.season.bracket = Some(bracket);
    Ok(())
}

/// Whether the user's team qualified for the postseason. Only meaningful
/// once `start_post_season` has run.
pub fn user_missed_playoffs(state: &LeagueState) -> Result<bool, LeagueError> {
    let Some(bracket) = &state.season.bracket else {
        return Ok(true);
    };
    Ok(!playoff_engine::user_made_playoffs(&bracket.team_seedings, state.user_team_id)?)
}

/// Folds a finished game into season/playoff stats, records it back into the
/// schedule, and (for playoff games) updates the bracket or (for the final
/// regular-season game) triggers the postseason.
pub fn apply_result(state: &mut LeagueState, finished: Game) -> Result<(), LeagueError> {
    let target = if finished.series_id.is_some() {
        StatsTarget::Playoff
    } else {
        StatsTarget::Season
    };
    state.season.accumulate_stats(&finished, target);

    if finished.series_id.is_some() {
        if let Some(bracket) = state.season.bracket.as_mut() {
            playoff_engine::apply_game_result(bracket, &finished)?;
        }
    }

    let is_regular_season_game = finished.series_id.is_none();
    state.season.record_game_result(finished);

    if is_regular_season_game && state.season.is_regular_season_complete() {
        start_post_season(state)?;
    }

    Ok(())
}
