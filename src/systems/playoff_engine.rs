use std::collections::HashMap;

use uuid::Uuid;

use crate::core::errors::LeagueError;
use crate::entities::game::Game;
use crate::entities::playoff::{Conference, PlayoffBracket, PlayoffSeries, Round};

const CONFERENCES: [Conference; 2] = [Conference::East, Conference::West];

/// Builds the initial bracket (the eager 4 play-in series) from a completed
/// set of conference seedings. The bracket always covers the real top-10
/// teams of each conference regardless of where the user's team finished —
/// `simulate_rest_of_playoffs` must produce a champion even when the user
/// misses the postseason (§8 scenario 3). Callers use
/// [`user_made_playoffs`] to decide the user-facing "missed playoffs" report
/// separately from whether a bracket exists.
pub fn build_bracket(
    season_id: Uuid,
    seedings: &HashMap<Uuid, u8>,
    conferences: &HashMap<Uuid, Conference>,
) -> Result<PlayoffBracket, LeagueError> {
    let mut bracket = PlayoffBracket::new(season_id, seedings.clone(), conferences.clone());
    for conference in CONFERENCES {
        let seed7 = team_with_seed(seedings, conferences, conference, 7)?;
        let seed8 = team_with_seed(seedings, conferences, conference, 8)?;
        let seed9 = team_with_seed(seedings, conferences, conference, 9)?;
        let seed10 = team_with_seed(seedings, conferences, conference, 10)?;
        bracket.insert_series(PlayoffSeries::new(Uuid::new_v4(), seed7, seed8, conference, Round::PlayIn));
        bracket.insert_series(PlayoffSeries::new(Uuid::new_v4(), seed9, seed10, conference, Round::PlayIn));
    }
    Ok(bracket)
}

/// Whether the user's team qualified for the postseason bracket (seed ≤ 10).
pub fn user_made_playoffs(seedings: &HashMap<Uuid, u8>, user_team_id: Uuid) -> Result<bool, LeagueError> {
    let user_seed = *seedings
        .get(&user_team_id)
        .ok_or_else(|| LeagueError::InvalidSeeding(format!("no seed recorded for {user_team_id}")))?;
    Ok(user_seed <= 10)
}

fn team_with_seed(
    seedings: &HashMap<Uuid, u8>,
    conferences: &HashMap<Uuid, Conference>,
    conference: Conference,
    seed: u8,
) -> Result<Uuid, LeagueError> {
    seedings
        .iter()
        .find(|(team_id, &s)| s == seed && conferences.get(team_id) == Some(&conference))
        .map(|(team_id, _)| *team_id)
        .ok_or_else(|| {
            LeagueError::InvalidSeeding(format!("conference {conference:?} missing seed {seed}"))
        })
}

/// Records a finished game's result into its series (by `series_id`) and
/// then tries to advance the bracket. No-op if the game has no series id or
/// the bracket has no matching series.
pub fn apply_game_result(bracket: &mut PlayoffBracket, game: &Game) -> Result<(), LeagueError> {
    let Some(series_id) = game.series_id else {
        return Ok(());
    };
    let Some(winner) = game.winner() else {
        return Ok(());
    };
    if let Some(series) = bracket.series.get_mut(&series_id) {
        series.record_win(winner);
        if !series.game_ids.contains(&game.id) {
            series.game_ids.push(game.id);
        }
    }
    advance(bracket)
}

/// Tries to progress `bracket.current_round`, generating the next round's
/// series from the current round's winners once every series in it (and, for
/// play-in, all six play-in games) is complete. Idempotent: calling it when
/// nothing is ready to advance does nothing.
pub fn advance(bracket: &mut PlayoffBracket) -> Result<(), LeagueError> {
    let round_before = bracket.current_round;
    let result = advance_inner(bracket, round_before);
    if bracket.current_round != round_before {
        log::info!("playoff bracket advanced from {:?} to {:?}", round_before, bracket.current_round);
    }
    result
}

fn advance_inner(bracket: &mut PlayoffBracket, current_round: Round) -> Result<(), LeagueError> {
    match current_round {
        Round::PlayIn => advance_play_in(bracket),
        Round::First => advance_to_round(bracket, Round::First, Round::Semis, pair_from_first_round),
        Round::Semis => advance_to_round(bracket, Round::Semis, Round::ConfFinal, pair_from_semis),
        Round::ConfFinal => advance_conf_finals_to_finals(bracket),
        Round::Finals => {
            if let Some(series) = bracket.series_in_round(Round::Finals).first() {
                if series.is_complete {
                    bracket.current_round = Round::Complete;
                }
            }
            Ok(())
        }
        Round::Complete => Ok(()),
    }
}

fn advance_play_in(bracket: &mut PlayoffBracket) -> Result<(), LeagueError> {
    if bracket.play_in_games.len() == 4 {
        if !bracket.play_in_games.iter().all(|id| bracket.series[id].is_complete) {
            return Ok(());
        }
        for conference in CONFERENCES {
            let (seven_eight, nine_ten) = initial_play_in_pair(bracket, conference);
            let loser = seven_eight
                .loser()
                .ok_or_else(|| LeagueError::InvalidSeeding("7v8 game incomplete".to_string()))?;
            let winner = nine_ten
                .winner()
                .ok_or_else(|| LeagueError::InvalidSeeding("9v10 game incomplete".to_string()))?;
            let (higher, lower) = order_by_seed(bracket, loser, winner);
            bracket.insert_series(PlayoffSeries::new(Uuid::new_v4(), higher, lower, conference, Round::PlayIn));
        }
        return Ok(());
    }

    if bracket.play_in_games.len() == 6 {
        if !bracket.play_in_games.iter().all(|id| bracket.series[id].is_complete) {
            return Ok(());
        }
        finalize_play_in_seeds(bracket)?;
        build_first_round(bracket)?;
        bracket.current_round = Round::First;
    }

    Ok(())
}

/// Identifies, among a conference's two eager play-in series, which is the
/// 7-vs-8 game and which is 9-vs-10, by the teams' original seeds (fixed at
/// bracket construction and never mutated until `finalize_play_in_seeds`).
fn initial_play_in_pair(bracket: &PlayoffBracket, conference: Conference) -> (PlayoffSeries, PlayoffSeries) {
    let mut seven_eight = None;
    let mut nine_ten = None;
    for &id in &bracket.play_in_games[..4.min(bracket.play_in_games.len())] {
        let series = &bracket.series[&id];
        if series.conference != conference {
            continue;
        }
        let a = bracket.team_seedings.get(&series.higher_seed_team_id).copied().unwrap_or(0);
        let b = bracket.team_seedings.get(&series.lower_seed_team_id).copied().unwrap_or(0);
        let mut pair = [a, b];
        pair.sort();
        if pair == [7, 8] {
            seven_eight = Some(series.clone());
        } else if pair == [9, 10] {
            nine_ten = Some(series.clone());
        }
    }
    (seven_eight.expect("7v8 series must exist"), nine_ten.expect("9v10 series must exist"))
}

fn order_by_seed(bracket: &PlayoffBracket, a: Uuid, b: Uuid) -> (Uuid, Uuid) {
    let seed_a = bracket.team_seedings.get(&a).copied().unwrap_or(255);
    let seed_b = bracket.team_seedings.get(&b).copied().unwrap_or(255);
    if seed_a <= seed_b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Once all 6 play-in games finish: winner of the 7v8 game claims seed 7,
/// winner of the decider (loser-of-7v8 vs winner-of-9v10) claims seed 8.
/// `team_seedings` is overwritten in place for the two new holders; the
/// eliminated teams' prior seed-7/8/9/10 entries are removed since only a
/// team's *current* seed is meaningful once it is out of the race.
fn finalize_play_in_seeds(bracket: &mut PlayoffBracket) -> Result<(), LeagueError> {
    for conference in CONFERENCES {
        let (seven_eight, _) = initial_play_in_pair(bracket, conference);
        let decider = decider_series(bracket, conference)
            .ok_or_else(|| LeagueError::InvalidSeeding("missing play-in decider game".to_string()))?;

        let new_seven = seven_eight
            .winner()
            .ok_or_else(|| LeagueError::InvalidSeeding("7v8 game incomplete".to_string()))?;
        let new_eight = decider
            .winner()
            .ok_or_else(|| LeagueError::InvalidSeeding("decider game incomplete".to_string()))?;

        for seed in [7u8, 8, 9, 10] {
            if let Some(team_id) = team_with_seed(&bracket.team_seedings, &bracket.team_conferences, conference, seed).ok() {
                bracket.team_seedings.remove(&team_id);
            }
        }
        bracket.team_seedings.insert(new_seven, 7);
        bracket.team_seedings.insert(new_eight, 8);
    }
    Ok(())
}

fn decider_series(bracket: &PlayoffBracket, conference: Conference) -> Option<PlayoffSeries> {
    bracket
        .play_in_games
        .get(4..)
        .unwrap_or(&[])
        .iter()
        .map(|id| &bracket.series[id])
        .find(|s| s.conference == conference)
        .cloned()
}

fn build_first_round(bracket: &mut PlayoffBracket) -> Result<(), LeagueError> {
    for conference in CONFERENCES {
        let one = team_with_seed(&bracket.team_seedings, &bracket.team_conferences, conference, 1)?;
        let two = team_with_seed(&bracket.team_seedings, &bracket.team_conferences, conference, 2)?;
        let three = team_with_seed(&bracket.team_seedings, &bracket.team_conferences, conference, 3)?;
        let four = team_with_seed(&bracket.team_seedings, &bracket.team_conferences, conference, 4)?;
        let five = team_with_seed(&bracket.team_seedings, &bracket.team_conferences, conference, 5)?;
        let six = team_with_seed(&bracket.team_seedings, &bracket.team_conferences, conference, 6)?;
        let seven = team_with_seed(&bracket.team_seedings, &bracket.team_conferences, conference, 7)?;
        let eight = team_with_seed(&bracket.team_seedings, &bracket.team_conferences, conference, 8)?;

        bracket.insert_series(PlayoffSeries::new(Uuid::new_v4(), one, eight, conference, Round::First));
        bracket.insert_series(PlayoffSeries::new(Uuid::new_v4(), four, five, conference, Round::First));
        bracket.insert_series(PlayoffSeries::new(Uuid::new_v4(), three, six, conference, Round::First));
        bracket.insert_series(PlayoffSeries::new(Uuid::new_v4(), two, seven, conference, Round::First));
    }
    Ok(())
}

/// Generic "all series in `from` complete -> build `to`" step, parameterized
/// by a per-conference pairing function.
fn advance_to_round(
    bracket: &mut PlayoffBracket,
    from: Round,
    to: Round,
    pair_fn: fn(&PlayoffBracket, Conference) -> Vec<(Uuid, Uuid)>,
) -> Result<(), LeagueError> {
    let series = bracket.series_in_round(from);
    if series.is_empty() || !series.iter().all(|s| s.is_complete) {
        return Ok(());
    }

    for conference in CONFERENCES {
        for (higher, lower) in pair_fn(bracket, conference) {
            bracket.insert_series(PlayoffSeries::new(Uuid::new_v4(), higher, lower, conference, to));
        }
    }
    bracket.current_round = to;
    Ok(())
}

fn pair_from_first_round(bracket: &PlayoffBracket, conference: Conference) -> Vec<(Uuid, Uuid)> {
    let series: Vec<&PlayoffSeries> = bracket
        .series_in_round(Round::First)
        .into_iter()
        .filter(|s| s.conference == conference)
        .collect();

    // Bracket slots are fixed at first-round construction time (1v8, 4v5,
    // 3v6, 2v7), identified here by each series' two original seed numbers
    // rather than by who actually won — an upset still slots its winner into
    // the same semifinal matchup the bracket shape assigns that slot.
    let winner_of_seed_pair = |wanted: [u8; 2]| -> Option<Uuid> {
        series
            .iter()
            .find(|s| {
                let a = bracket.team_seedings.get(&s.higher_seed_team_id).copied().unwrap_or(0);
                let b = bracket.team_seedings.get(&s.lower_seed_team_id).copied().unwrap_or(0);
                let mut pair = [a, b];
                pair.sort();
                pair == wanted
            })
            .and_then(|s| s.winner())
    };

    let one_eight = winner_of_seed_pair([1, 8]);
    let four_five = winner_of_seed_pair([4, 5]);
    let three_six = winner_of_seed_pair([3, 6]);
    let two_seven = winner_of_seed_pair([2, 7]);

    match (one_eight, four_five, three_six, two_seven) {
        (Some(a), Some(b), Some(c), Some(d)) => {
            vec![order_pair(bracket, a, b), order_pair(bracket, c, d)]
        }
        _ => Vec::new(),
    }
}

fn pair_from_semis(bracket: &PlayoffBracket, conference: Conference) -> Vec<(Uuid, Uuid)> {
    let series: Vec<&PlayoffSeries> = bracket
        .series_in_round(Round::Semis)
        .into_iter()
        .filter(|s| s.conference == conference)
        .collect();
    let winners: Vec<Uuid> = series.iter().filter_map(|s| s.winner()).collect();
    if winners.len() != 2 {
        return Vec::new();
    }
    vec![order_pair(bracket, winners[0], winners[1])]
}

fn order_pair(bracket: &PlayoffBracket, a: Uuid, b: Uuid) -> (Uuid, Uuid) {
    order_by_seed(bracket, a, b)
}

fn advance_conf_finals_to_finals(bracket: &mut PlayoffBracket) -> Result<(), LeagueError> {
    let series = bracket.series_in_round(Round::ConfFinal);
    if series.len() != 2 || !series.iter().all(|s| s.is_complete) {
        return Ok(());
    }
    let east_champion = series
        .iter()
        .find(|s| s.conference == Conference::East)
        .and_then(|s| s.winner());
    let west_champion = series
        .iter()
        .find(|s| s.conference == Conference::West)
        .and_then(|s| s.winner());
    let (Some(east), Some(west)) = (east_champion, west_champion) else {
        return Ok(());
    };

    let (higher, lower) = order_by_seed(bracket, east, west);
    bracket.insert_series(PlayoffSeries::new(Uuid::new_v4(), higher, lower, Conference::Final, Round::Finals));
    bracket.current_round = Round::Finals;
    Ok(())
}

/// Home-court sequence for a best-of-seven series: games 1,2,5,7 at the
/// higher seed; games 3,4,6 at the lower seed.
pub fn home_team_for_game(series: &PlayoffSeries, game_number_one_indexed: u8) -> Uuid {
    match game_number_one_indexed {
        1 | 2 | 5 | 7 => series.higher_seed_team_id,
        _ => series.lower_seed_team_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_league() -> (HashMap<Uuid, u8>, HashMap<Uuid, Conference>, Uuid) {
        let mut seedings = HashMap::new();
        let mut conferences = HashMap::new();
        let mut user = Uuid::nil();
        for conference in CONFERENCES {
            for seed in 1..=15u8 {
                let team_id = Uuid::new_v4();
                seedings.insert(team_id, seed);
                conferences.insert(team_id, conference);
                if conference == Conference::East && seed == 3 {
                    user = team_id;
                }
            }
        }
        (seedings, conferences, user)
    }

    #[test]
    fn seed_above_ten_is_reported_as_missed_playoffs() {
        let (seedings, _conferences, _user) = seeded_league();
        let user = seedings.iter().find(|(_, &s)| s == 12).map(|(id, _)| *id).unwrap();
        assert!(!user_made_playoffs(&seedings, user).unwrap());
    }

    #[test]
    fn eligible_seed_builds_four_initial_play_in_series() {
        let (seedings, conferences, user) = seeded_league();
        assert!(user_made_playoffs(&seedings, user).unwrap());
        let bracket = build_bracket(Uuid::new_v4(), &seedings, &conferences).unwrap();
        assert_eq!(bracket.play_in_games.len(), 4);
        assert_eq!(bracket.current_round, Round::PlayIn);
    }

    #[test]
    fn home_court_sequence_follows_2_2_1_1_1() {
        let higher = Uuid::new_v4();
        let lower = Uuid::new_v4();
        let series = PlayoffSeries::new(Uuid::new_v4(), higher, lower, Conference::East, Round::First);
        assert_eq!(home_team_for_game(&series, 1), higher);
        assert_eq!(home_team_for_game(&series, 3), lower);
        assert_eq!(home_team_for_game(&series, 5), higher);
    }
}
