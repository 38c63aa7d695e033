//! Failures raised while reading the data directory.
//!
//! Gameplay itself never fails: out-of-range cursor moves and empty talk or
//! search targets resolve to no-ops or fallback messages inside `Game`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path}:{line}: {message}")]
    Parse { path: PathBuf, line: usize, message: String },

    #[error("malformed map file {path}: {reason}")]
    MalformedMap { path: PathBuf, reason: String },

    #[error("{path}:{line}: unknown directive `{directive}`")]
    UnknownDirective { path: PathBuf, line: usize, directive: String },

    #[error("{path}: item index {index} is not in the item catalog")]
    UnknownItem { path: PathBuf, index: usize },

    #[error("{path}: enemy id {id} is not in the enemy catalog")]
    UnknownEnemy { path: PathBuf, id: u32 },

    #[error("{path}: enemy id {id} at level {level} overflows its statistics")]
    EnemyOverflow { path: PathBuf, id: u32, level: i32 },

    #[error("map `{name}` was never loaded")]
    MissingMap { name: String },

    #[error("no archetype named `{name}`")]
    UnknownArchetype { name: String },

    #[error("the starting party has no members")]
    EmptyParty,

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LoadError::Io { path: path.into(), source }
    }

    pub fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        LoadError::Parse { path: path.into(), line, message: message.into() }
    }
}

pub type LoadResult<T> = Result<T, LoadError>;
