//! Download snapshots as seen by the shell, and their row projections.
//!
//! The download engine owns and mutates downloads; the shell only reads the
//! snapshots it emits and keeps one [`DownloadRow`] per download.

pub mod sections;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use sections::{DownloadSectionRouter, MoveOutcome, SectionVisibility};

/// Unique identity of a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DownloadId(Uuid);

impl DownloadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DownloadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DownloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Presentation stage of a download. Each stage has exactly one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    InQueue,
    Downloading,
    Completed,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::InQueue, Stage::Downloading, Stage::Completed];
}

/// Engine-side snapshot of one media acquisition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Download {
    pub id: DownloadId,
    pub stage: Stage,
    pub finished_with_error: bool,
    pub filename: String,
}

impl Download {
    /// A freshly queued download.
    pub fn queued(filename: impl Into<String>) -> Self {
        Self {
            id: DownloadId::new(),
            stage: Stage::InQueue,
            finished_with_error: false,
            filename: filename.into(),
        }
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    pub fn with_error(mut self, finished_with_error: bool) -> Self {
        self.finished_with_error = finished_with_error;
        self
    }
}

/// Handle the engine keeps to refer to a row it asked the shell to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowHandle(pub DownloadId);

/// UI projection of a [`Download`]. Moved between sections, never recreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRow {
    pub id: DownloadId,
    pub filename: String,
    pub finished_with_error: bool,
}

impl DownloadRow {
    pub fn from_download(download: &Download) -> Self {
        Self {
            id: download.id,
            filename: download.filename.clone(),
            finished_with_error: download.finished_with_error,
        }
    }

    /// Refresh the fields that can change while a download progresses.
    pub fn refresh(&mut self, download: &Download) {
        self.filename.clone_from(&download.filename);
        self.finished_with_error = download.finished_with_error;
    }
}
