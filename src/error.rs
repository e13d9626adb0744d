use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("source host responded with {status}: {body}")]
    Api { status: u16, body: String },
    #[error("failed to decode commit listing: {0}")]
    Decode(String),
    #[error("chat error: {0}")]
    Chat(String),
    #[error("failed to read marker file {}: {source}", path.display())]
    CacheRead { path: PathBuf, source: io::Error },
    #[error("failed to write marker file {}: {source}", path.display())]
    CacheWrite { path: PathBuf, source: io::Error },
}

pub type AppResult<T> = Result<T, AppError>;
