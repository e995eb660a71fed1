use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("board error: {0}")]
    Board(String),
    #[error("board OAuth token invalid or expired")]
    BoardUnauthorized,
    #[error("error sending request to Bugzilla: {0}")]
    Tracker(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
