//! Error types for studyboard

use thiserror::Error;

/// Errors that can occur while aggregating activity or loading configuration.
///
/// The responsive resolver never produces one of these; it falls back to
/// mobile / single-column layouts instead.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Failed to parse payload: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Unknown route: {0}")]
    UnknownRoute(String),
}
