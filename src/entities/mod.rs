pub mod game;
pub mod player;
pub mod playoff;
pub mod season;
pub mod team;

pub use game::{Game, PlayerGameStats};
pub use player::{AttributeField, Attributes, Player, Position};
pub use playoff::{Conference, PlayoffBracket, PlayoffSeries, Round};
pub use season::{CumulativeStats, PlayerPlayoffStats, PlayerSeasonStats, Season, StatsTarget};
pub use team::{DepthEntry, RotationConfig, Team, MINUTES_PER_GAME, ROSTER_SIZE, STARTER_COUNT};
