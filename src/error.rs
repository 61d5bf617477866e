use std::io;

use thiserror::Error;

/// Fatal conditions surfaced to the caller. Malformed transcript blocks are
/// never errors; they are counted in a `ParseReport` and dropped.
#[derive(Debug, Error)]
pub enum Error {
    #[error("format '{0}' is not recognized")]
    UnknownDialect(String),
    #[error("unknown {kind} strategy '{value}'")]
    UnknownStrategy { kind: &'static str, value: String },
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("json export failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
