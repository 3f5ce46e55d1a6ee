//! Application-wide error types.
//!
//! `AppError` covers startup and server-lifecycle failures. Request-scoped
//! failures have their own enum in [`crate::generate`] because they map to
//! specific HTTP statuses rather than a process exit.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("server error: {0}")]
    Server(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
