pub mod factory;
pub mod game_service;
pub mod playoff_engine;
pub mod position;
pub mod possession;
pub mod schedule;
pub mod season_manager;
pub mod standings;
