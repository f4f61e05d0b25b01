//! Unified error type for the viewer application.

use thiserror::Error;
use webtoon_core::error::BookError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Book(#[from] BookError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid preferences: {0}")]
    ReadPreferences(#[from] toml::de::Error),
    #[error("Cannot encode preferences: {0}")]
    WritePreferences(#[from] toml::ser::Error),
    /// The user dismissed a dialog.
    #[error("Cancelled")]
    Cancelled,
    #[error("Window error: {0}")]
    Eframe(#[from] eframe::Error),
}
