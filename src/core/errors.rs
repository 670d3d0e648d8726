use thiserror::Error;

/// The single error taxonomy surfaced at every public boundary of the core.
/// Validation errors are recoverable by the caller; simulation errors are
/// fatal only to the in-progress call; `StorageFailure` never rolls back
/// in-memory state.
#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid team: {0}")]
    InvalidTeam(String),

    #[error("invalid rotation: {0}")]
    InvalidRotation(String),

    #[error("schedule infeasible: {0}")]
    ScheduleInfeasible(String),

    #[error("invalid seeding: {0}")]
    InvalidSeeding(String),

    #[error("nothing to simulate: {0}")]
    NothingToSimulate(String),

    #[error("storage failure: {0}")]
    StorageFailure(String),

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
}

impl From<std::io::Error> for LeagueError {
    fn from(err: std::io::Error) -> Self {
        LeagueError::StorageFailure(err.to_string())
    }
}
