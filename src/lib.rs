pub mod core;
pub mod entities;
pub mod save;
pub mod systems;
pub mod utils;

pub use core::*;
pub use entities::*;
pub use save::*;
pub use systems::{game_service, season_manager};
