//! Error types for blogdoc operations.

use thiserror::Error;

use crate::blog::BlogError;
use crate::document::ContentError;

/// Errors surfaced by the library's I/O-facing entry points.
///
/// The traversal core (rendering, heading extraction, read time) never
/// fails; only reading input, validating submissions and persisting
/// configuration do.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("could not serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("could not determine config directory")]
    NoConfigDir,

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Blog(#[from] BlogError),
}

pub type Result<T> = std::result::Result<T, Error>;
