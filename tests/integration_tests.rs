use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use league_manager::core::league_state::LeagueState;
use league_manager::entities::game::Game;
use league_manager::entities::player::{Attributes, Player, Position};
use league_manager::entities::playoff::{Conference, Round};
use league_manager::entities::season::Season;
use league_manager::entities::team::Team;
use league_manager::save::SaveManager;
use league_manager::systems::factory::{generate_league_teams, make_rng};
use league_manager::systems::schedule::generate_schedule;
use league_manager::systems::{game_service, season_manager, standings};
use league_manager::utils::conferences::TEAMS;

fn filler_player(position: Position) -> Player {
    Player {
        id: Uuid::new_v4(),
        name: "Filler".to_string(),
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

fn filler_team(city: &str, name: &str) -> Team {
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
    let players: Vec<Player> = positions.iter().map(|p| filler_player(*p)).collect();
    let starters: HashSet<Uuid> = players.iter().take(5).map(|p| p.id).collect();
    Team::new(Uuid::new_v4(), city.to_string(), name.to_string(), players, starters).unwrap()
}

fn played_game(home: Uuid, away: Uuid, home_score: u16, away_score: u16) -> Game {
    let mut game = Game::new_unplayed(Uuid::new_v4(), home, away, NaiveDate::from_ymd_opt(2026, 11, 1).unwrap());
    game.is_played = true;
    game.home_score = Some(home_score);
    game.away_score = Some(away_score);
    game
}

/// Scenario 1: full season. Seed 42; every team ends with 82 games; the top
/// seed in each conference has at least 45 wins; a save round-trips.
#[test]
fn full_season_yields_complete_records_and_round_trips_through_save() {
    let seed = 42u64;
    let mut rng = make_rng(Some(seed));
    let teams = generate_league_teams(&mut rng).unwrap();
    let team_ids: Vec<Uuid> = teams.iter().map(|t| t.id).collect();
    let user_team_id = team_ids[0];
    let schedule = generate_schedule(&team_ids, &mut rng, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()).unwrap();
    let season = Season::new(Uuid::new_v4(), 2026, user_team_id, schedule);
    let mut state = LeagueState::new(user_team_id, teams, season);

    game_service::simulate_remaining_regular_season(&mut state, Some(seed)).unwrap();

    for team_id in &team_ids {
        let played = state
            .season
            .league_schedule
            .iter()
            .filter(|g| g.series_id.is_none() && g.involves(*team_id))
            .count();
        assert_eq!(played, 82);
    }
    assert!(state.season.is_post_season);

    for conference in [Conference::East, Conference::West] {
        let rows = standings::standings_for_conference(conference, &state.teams, &state.season.league_schedule);
        assert_eq!(rows[0].wins + rows[0].losses, 82);
        assert!(rows[0].wins >= 45, "top seed in {conference:?} won only {} games", rows[0].wins);
    }

    let dir = std::env::temp_dir().join(format!("league_integration_save_{}", Uuid::new_v4()));
    let manager = SaveManager::new(&dir);
    manager.save("season-42", &state).unwrap();
    let loaded = manager.load("season-42").unwrap();
    assert_eq!(loaded.teams.len(), state.teams.len());
    assert_eq!(loaded.season.league_schedule.len(), state.season.league_schedule.len());
    let _ = std::fs::remove_dir_all(&dir);
}

/// Scenarios 2 & 4: once the regular season completes, the bracket runs
/// through play-in -> first round (8 series, 4 per conference) -> ... ->
/// a champion, and every completed series hits exactly its series length.
#[test]
fn postseason_runs_play_in_through_champion_with_valid_series_lengths() {
    let seed = 7u64;
    let mut rng = make_rng(Some(seed));
    let teams = generate_league_teams(&mut rng).unwrap();
    let team_ids: Vec<Uuid> = teams.iter().map(|t| t.id).collect();
    let user_team_id = team_ids[0];
    let schedule = generate_schedule(&team_ids, &mut rng, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()).unwrap();
    let season = Season::new(Uuid::new_v4(), 2026, user_team_id, schedule);
    let mut state = LeagueState::new(user_team_id, teams, season);

    game_service::simulate_remaining_regular_season(&mut state, Some(seed)).unwrap();
    assert!(state.season.is_post_season);

    let champion = game_service::simulate_rest_of_playoffs(&mut state, Some(seed)).unwrap();
    assert!(champion.is_some());

    let bracket = state.season.bracket.as_ref().unwrap();
    assert_eq!(bracket.current_round, Round::Complete);
    assert_eq!(bracket.play_in_games.len(), 6, "4 eager + 2 decider play-in games");
    assert_eq!(bracket.first_round.len(), 8, "exactly 8 first-round series, 4 per conference");

    for series in bracket.series.values() {
        if !series.is_complete {
            continue;
        }
        let needed = series.round.series_length();
        let (hi, lo) = (series.home_wins.max(series.away_wins), series.home_wins.min(series.away_wins));
        assert_eq!(hi, needed);
        assert!(lo < needed);
    }
}

/// Scenario 3: a team seeded outside the top 10 is flagged as having missed
/// the playoffs, yet the postseason still runs to completion and produces a
/// champion among the teams that did qualify.
#[test]
fn missed_playoffs_team_does_not_block_the_rest_of_the_bracket() {
    let east_teams: Vec<Team> = TEAMS
        .iter()
        .filter(|(_, _, conference)| *conference == Conference::East)
        .map(|(city, name, _)| filler_team(city, name))
        .collect();
    let west_teams: Vec<Team> = TEAMS
        .iter()
        .filter(|(_, _, conference)| *conference == Conference::West)
        .map(|(city, name, _)| filler_team(city, name))
        .collect();
    assert_eq!(east_teams.len(), 15);
    assert_eq!(west_teams.len(), 15);

    // Team i beats every team with a higher index, giving a strict,
    // unambiguous win-count ordering: team 0 finishes 1st, team 14 last.
    // Both conferences use the same pattern so a full bracket can be built.
    let mut games = Vec::new();
    for conference_teams in [&east_teams, &west_teams] {
        for i in 0..conference_teams.len() {
            for j in (i + 1)..conference_teams.len() {
                games.push(played_game(conference_teams[i].id, conference_teams[j].id, 100, 90));
            }
        }
    }

    let user_team_id = east_teams[11].id; // seed 12: outside the top 10
    let mut teams = std::collections::HashMap::new();
    for team in east_teams.iter().chain(west_teams.iter()) {
        teams.insert(team.id, team.clone());
    }

    let season = Season::new(Uuid::new_v4(), 2026, user_team_id, games);
    let mut state = LeagueState {
        schema_version: league_manager::core::league_state::CURRENT_SCHEMA_VERSION,
        user_team_id,
        teams,
        season,
    };

    assert!(state.season.is_regular_season_complete());
    season_manager::start_post_season(&mut state).unwrap();
    assert!(state.season.is_post_season);
    assert!(season_manager::user_missed_playoffs(&state).unwrap());

    let champion = game_service::simulate_rest_of_playoffs(&mut state, Some(3)).unwrap();
    assert!(champion.is_some());
}

/// Scenario 5: after a single simulated game, each side's per-player points
/// sum to the final team score, and minutes sum to 240 per team.
#[test]
fn single_game_stat_lines_are_internally_consistent() {
    let seed = 11u64;
    let mut rng = make_rng(Some(seed));
    let teams = generate_league_teams(&mut rng).unwrap();
    let home = &teams[0];
    let away = &teams[1];

    let game = league_manager::systems::possession::simulate_game(
        Uuid::new_v4(),
        home,
        away,
        NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
        Some(seed),
    );

    let box_score = game.box_score.as_ref().unwrap();
    let home_points: u32 = box_score
        .iter()
        .filter(|(id, _)| home.player(**id).is_some())
        .map(|(_, stats)| stats.points as u32)
        .sum();
    let away_points: u32 = box_score
        .iter()
        .filter(|(id, _)| away.player(**id).is_some())
        .map(|(_, stats)| stats.points as u32)
        .sum();
    assert_eq!(home_points, game.home_score.unwrap() as u32);
    assert_eq!(away_points, game.away_score.unwrap() as u32);

    let home_minutes: u32 = box_score
        .iter()
        .filter(|(id, _)| home.player(**id).is_some())
        .map(|(_, stats)| stats.minutes as u32)
        .sum();
    assert!((home_minutes as i64 - 240).abs() <= 5, "home minutes {home_minutes} not near 240");

    for stats in box_score.values() {
        if stats.field_goals_attempted > 0 {
            let expected = stats.field_goals_made as f32 / stats.field_goals_attempted as f32;
            assert!((stats.field_goal_pct() - expected).abs() < 1e-6);
        }
    }
}
