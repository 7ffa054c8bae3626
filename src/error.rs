//! Error and warning types
//!
//! Storage failures are recoverable: reads fall back to an empty leaderboard,
//! writes surface as `EngineWarning`s.

use thiserror::Error;

/// Failure talking to the key-value store
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage backend is unavailable: {0}")]
    Unavailable(String),
    #[error("storage I/O error")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("leaderboard serialization error")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

/// Recoverable problem the engine hit while running; the simulation keeps going
#[derive(Error, Debug)]
pub enum EngineWarning {
    #[error("could not save final score {score} to the leaderboard")]
    LeaderboardWrite {
        score: i64,
        #[source]
        source: StorageError,
    },
}
