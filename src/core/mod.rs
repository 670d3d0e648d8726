pub mod errors;
pub mod league_state;

pub use errors::LeagueError;
pub use league_state::{LeagueState, CURRENT_SCHEMA_VERSION, GAMES_PER_TEAM, TEAM_COUNT};
