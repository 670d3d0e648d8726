use chrono::NaiveDate;
use uuid::Uuid;

use league_manager::core::league_state::LeagueState;
use league_manager::entities::season::Season;
use league_manager::systems::factory::{generate_league_teams, make_rng};
use league_manager::systems::schedule::generate_schedule;
use league_manager::systems::{game_service, season_manager, standings};
use league_manager::entities::playoff::Conference;

/// Non-interactive driver: builds a league, plays out the full regular
/// season and postseason, and prints the final standings and champion.
/// Exercises the public API end to end; every line below comes from a
/// read-only accessor, never from internal state.
fn main() {
    env_logger::init();

    let seed = 42u64;
    let mut rng = make_rng(Some(seed));
    let teams = generate_league_teams(&mut rng).expect("team generation");
    let team_ids: Vec<Uuid> = teams.iter().map(|t| t.id).collect();
    let user_team_id = team_ids[0];

    let start_date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
    let schedule = generate_schedule(&team_ids, &mut rng, start_date).expect("schedule generation");
    let season = Season::new(Uuid::new_v4(), 2026, user_team_id, schedule);
    let mut state = LeagueState::new(user_team_id, teams, season);

    println!("League initialized with {} teams.", state.teams.len());

    game_service::simulate_remaining_regular_season(&mut state, Some(seed)).expect("regular season simulation");
    println!("Regular season complete.");

    if state.season.is_post_season {
        if season_manager::user_missed_playoffs(&state).unwrap_or(true) {
            println!("The user's team missed the playoffs.");
        }
        let champion = game_service::simulate_rest_of_playoffs(&mut state, Some(seed)).expect("playoff simulation");
        print_standings(&state);
        match champion.and_then(|id| state.teams.get(&id)) {
            Some(team) => println!("Champion: {}", team.full_name()),
            None => println!("No champion determined."),
        }
    } else {
        print_standings(&state);
        println!("Regular season did not complete to a postseason.");
    }
}

fn print_standings(state: &LeagueState) {
    for conference in [Conference::East, Conference::West] {
        println!("-- {conference:?} conference --");
        let rows = standings::standings_for_conference(conference, &state.teams, &state.season.league_schedule);
        for (seed, row) in rows.iter().enumerate() {
            let name = state
                .teams
                .get(&row.team_id)
                .map(|t| t.full_name())
                .unwrap_or_else(|| "Unknown".to_string());
            println!("{}. {name} ({}-{})", seed + 1, row.wins, row.losses);
        }
    }
}
