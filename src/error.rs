//! Central error types for TubeDeck.
//!
//! Errors produced by the shell seams (window, tray, notifications) and the
//! engine boundary. All errors implement `Serialize` for Tauri IPC compatibility.

use serde::Serialize;
use thiserror::Error;

/// Main error type for TubeDeck shell operations.
#[derive(Error, Debug)]
pub enum TubeDeckError {
    /// Tray icon could not be created, updated or removed
    #[error("Tray error: {0}")]
    TrayError(String),

    /// Window management error
    #[error("Window error: {0}")]
    WindowError(String),

    /// Shell or in-app notification could not be delivered
    #[error("Notification error: {0}")]
    NotificationError(String),

    /// Download engine reported a failure at the shell boundary
    #[error("Engine error: {0}")]
    EngineError(String),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Logger could not be installed
    #[error("Logging error: {0}")]
    LoggingError(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Tauri requires errors to be serializable to send to the frontend.
impl Serialize for TubeDeckError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<String> for TubeDeckError {
    fn from(msg: String) -> Self {
        TubeDeckError::Other(msg)
    }
}

impl From<&str> for TubeDeckError {
    fn from(msg: &str) -> Self {
        TubeDeckError::Other(msg.to_string())
    }
}

/// Extension trait for adding context to Results.
///
/// # Example
/// ```ignore
/// use crate::error::{ResultExt, TubeDeckResult};
///
/// fn remove_icon(app: &AppHandle) -> TubeDeckResult<()> {
///     app.remove_tray_by_id("main").context("tray was already gone")?;
///     Ok(())
/// }
/// ```
pub trait ResultExt<T> {
    /// Add context to an error, converting it to TubeDeckError::Other.
    fn context(self, msg: &str) -> TubeDeckResult<T>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F: FnOnce() -> String>(self, f: F) -> TubeDeckResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context(self, msg: &str) -> TubeDeckResult<T> {
        self.map_err(|e| TubeDeckError::Other(format!("{}: {}", msg, e)))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> TubeDeckResult<T> {
        self.map_err(|e| TubeDeckError::Other(format!("{}: {}", f(), e)))
    }
}

/// Extension trait for adding context to Option types.
pub trait OptionExt<T> {
    /// Convert None to TubeDeckError::Other with the given message.
    fn context(self, msg: &str) -> TubeDeckResult<T>;

    /// Convert None to TubeDeckError::Other with a lazily evaluated message.
    fn with_context<F: FnOnce() -> String>(self, f: F) -> TubeDeckResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn context(self, msg: &str) -> TubeDeckResult<T> {
        self.ok_or_else(|| TubeDeckError::Other(msg.to_string()))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> TubeDeckResult<T> {
        self.ok_or_else(|| TubeDeckError::Other(f()))
    }
}

/// Type alias for Results using TubeDeckError.
pub type TubeDeckResult<T> = Result<T, TubeDeckError>;
