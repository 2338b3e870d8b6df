//! Boundary with the download engine.
//!
//! The engine performs the actual downloads and owns the user preferences.
//! The shell queries it through [`DownloadEngine`] and receives its events as
//! [`EngineEvent`]s on a channel, in emission order.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::app::notifications::NotificationSeverity;
use crate::downloads::{Download, DownloadId};
use crate::error::TubeDeckResult;

/// Commands and queries the shell issues to the download engine.
///
/// Implementations must be thread-safe; the engine raises its events from
/// background I/O while the shell calls in from its own loop.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DownloadEngine: Send + Sync {
    /// First-run dependency setup. Awaited once during window startup.
    async fn startup(&self) -> TubeDeckResult<()>;

    fn are_downloads_running(&self) -> bool;

    /// The "run in background" preference.
    fn run_in_background(&self) -> bool;

    fn stop_all_downloads(&self);

    /// Release engine resources. Called once, right before the process exits.
    fn dispose(&self);

    /// One-line summary of current activity, shown in the tray tooltip.
    fn background_activity_report(&self) -> String;

    fn add_download(&self, download: Download);
}

/// Events raised by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A new download exists and needs a row.
    DownloadCreated(Download),
    /// A download moved to a new stage; the snapshot carries the new stage.
    StageChanged(Download),
    /// A queued download was cancelled before it started.
    RemovedFromQueue(DownloadId),
    NotificationSent {
        message: String,
        severity: NotificationSeverity,
    },
    /// The "run in background" preference changed.
    BackgroundModeChanged,
}
