// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent user-facing messages.

/// Application error type.
///
/// Errors never escape an event handler: the controller turns them into
/// alerts (see [`AppError::user_message`]) or log lines.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: all numeric fields must be positive finite numbers")]
    InvalidInput,

    #[error("Unknown workout type: {0}")]
    UnknownWorkoutType(String),

    #[error("Geolocation unavailable")]
    GeolocationUnavailable,

    #[error("Invalid event script: {0}")]
    Script(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl AppError {
    /// Alert text shown when invalid numbers are submitted.
    pub const INVALID_INPUT_MESSAGE: &'static str = "Please use positive number";

    /// Alert text shown when the position cannot be determined.
    pub const GEOLOCATION_MESSAGE: &'static str = "Could not get your position!";

    /// Text suitable for a blocking user alert.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput => Self::INVALID_INPUT_MESSAGE.to_string(),
            AppError::UnknownWorkoutType(value) => format!("Unknown workout type: {}", value),
            AppError::GeolocationUnavailable => Self::GEOLOCATION_MESSAGE.to_string(),
            AppError::Script(_) | AppError::Export(_) => {
                tracing::error!(error = %self, "Unexpected error surfaced to user");
                "Something went wrong".to_string()
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Export(err.to_string())
    }
}

/// Result type alias for fallible operations.
pub type Result<T> = std::result::Result<T, AppError>;
