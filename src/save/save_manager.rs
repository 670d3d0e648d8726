use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::LeagueError;
use crate::core::league_state::{LeagueState, CURRENT_SCHEMA_VERSION};

/// The envelope actually written to disk: a schema version tag and the save
/// name travel alongside the payload so a load can recognize a stale or
/// foreign document without first deserializing the whole `LeagueState`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveRecord {
    schema_version: u32,
    save_name: String,
    state: LeagueState,
}

/// One JSON file per named save slot under a caller-supplied base directory.
pub struct SaveManager {
    base_dir: PathBuf,
}

impl SaveManager {
    pub fn new(base_dir: impl Into<PathBuf>) -> SaveManager {
        SaveManager { base_dir: base_dir.into() }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{name}.json"))
    }

    /// Serializes `state` into a `SaveRecord` and writes it to `<name>.json`,
    /// creating the base directory if needed. Overwrites an existing save of
    /// the same name.
    pub fn save(&self, name: &str, state: &LeagueState) -> Result<(), LeagueError> {
        fs::create_dir_all(&self.base_dir)?;
        let record = SaveRecord {
            schema_version: CURRENT_SCHEMA_VERSION,
            save_name: name.to_string(),
            state: state.clone(),
        };
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| LeagueError::StorageFailure(e.to_string()))?;
        fs::write(self.path_for(name), json)?;
        log::info!("saved league state to slot '{name}'");
        Ok(())
    }

    /// Loads `<name>.json`. Missing file -> `NotFound`; a schema version
    /// newer than what this build understands -> `SchemaMismatch` rather
    /// than risking a silent misread. Older schema versions are accepted;
    /// `serde`'s `#[serde(default)]` fields on `LeagueState`/its entities
    /// absorb the gap (see DESIGN.md for the legacy-attribute defaults).
    pub fn load(&self, name: &str) -> Result<LeagueState, LeagueError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(LeagueError::NotFound(format!("save '{name}'")));
        }
        let json = fs::read_to_string(&path)?;
        let record: SaveRecord =
            serde_json::from_str(&json).map_err(|e| LeagueError::SchemaMismatch(e.to_string()))?;
        if record.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(LeagueError::SchemaMismatch(format!(
                "save '{name}' is schema v{}, this build understands up to v{}",
                record.schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        log::info!("loaded league state from slot '{name}'");
        Ok(record.state)
    }

    /// Names of every save slot present in the base directory, sorted for
    /// deterministic output. An absent base directory lists as empty rather
    /// than erroring.
    pub fn list(&self) -> Result<Vec<String>, LeagueError> {
        let mut names = Vec::new();
        if !self.base_dir.exists() {
            return Ok(names);
        }
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Deletes a save slot. Deleting a slot that doesn't exist is a no-op,
    /// not an error — matches the idempotent delete semantics the rest of
    /// the public API expects.
    pub fn delete(&self, name: &str) -> Result<(), LeagueError> {
        let path = self.path_for(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }
}
