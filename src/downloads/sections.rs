//! The three download sections (Queued, Downloading, Completed).
//!
//! Every row lives in at most one section. A move removes the row from
//! whichever section holds it and appends it to the target, so once a move
//! returns the row is in exactly one section. Visibility of each section is
//! recomputed after every move or delete.

use std::collections::HashMap;

use serde::Serialize;

use super::{Download, DownloadId, DownloadRow, RowHandle, Stage};

/// Whether each section currently has rows to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionVisibility {
    pub queued: bool,
    pub downloading: bool,
    pub completed: bool,
}

impl SectionVisibility {
    pub fn is_visible(&self, stage: Stage) -> bool {
        match stage {
            Stage::InQueue => self.queued,
            Stage::Downloading => self.downloading,
            Stage::Completed => self.completed,
        }
    }
}

/// Result of moving a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Stage the row was in before the move, if any.
    pub from: Option<Stage>,
    /// Set when the row landed in Completed.
    pub completed: Option<DownloadRow>,
}

/// Routes download rows between the display sections.
#[derive(Debug, Default)]
pub struct DownloadSectionRouter {
    rows: HashMap<DownloadId, DownloadRow>,
    queued: Vec<DownloadId>,
    downloading: Vec<DownloadId>,
    completed: Vec<DownloadId>,
    visibility: SectionVisibility,
}

impl DownloadSectionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the row for a new download. Idempotent per download id.
    pub fn create_row(&mut self, download: &Download) -> RowHandle {
        self.rows
            .entry(download.id)
            .or_insert_with(|| {
                log::debug!("[SECTIONS] created row for {}", download.id);
                DownloadRow::from_download(download)
            });
        RowHandle(download.id)
    }

    /// Refresh the row from a stage-changed snapshot and move it.
    pub fn apply_stage_change(&mut self, download: &Download) -> MoveOutcome {
        match self.rows.get_mut(&download.id) {
            Some(row) => row.refresh(download),
            None => {
                log::warn!(
                    "[SECTIONS] stage change for unknown download {}, creating its row",
                    download.id
                );
                self.create_row(download);
            },
        }
        self.move_row(download.id, download.stage)
    }

    /// Move a row to the section of `target`.
    ///
    /// Ids without a row are ignored (nothing to display) and reported as an
    /// outcome with no source and no completion.
    pub fn move_row(&mut self, id: DownloadId, target: Stage) -> MoveOutcome {
        if !self.rows.contains_key(&id) {
            log::warn!("[SECTIONS] move for download {} without a row", id);
            return MoveOutcome {
                from: None,
                completed: None,
            };
        }

        let from = self.section_of(id);
        for stage in Stage::ALL {
            self.section_mut(stage).retain(|held| *held != id);
        }
        self.section_mut(target).push(id);
        self.recompute_visibility();

        log::debug!("[SECTIONS] moved {} from {:?} to {:?}", id, from, target);

        let completed = match target {
            Stage::Completed => self.rows.get(&id).cloned(),
            Stage::InQueue | Stage::Downloading => None,
        };
        MoveOutcome { from, completed }
    }

    /// Remove a row from the Queued section only. Returns whether it was there.
    pub fn delete_from_queue(&mut self, id: DownloadId) -> bool {
        let before = self.queued.len();
        self.queued.retain(|held| *held != id);
        self.visibility.queued = !self.queued.is_empty();
        before != self.queued.len()
    }

    pub fn section(&self, stage: Stage) -> &[DownloadId] {
        match stage {
            Stage::InQueue => &self.queued,
            Stage::Downloading => &self.downloading,
            Stage::Completed => &self.completed,
        }
    }

    /// Section currently holding the row, if any.
    pub fn section_of(&self, id: DownloadId) -> Option<Stage> {
        Stage::ALL
            .into_iter()
            .find(|stage| self.section(*stage).contains(&id))
    }

    pub fn row(&self, id: DownloadId) -> Option<&DownloadRow> {
        self.rows.get(&id)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn visibility(&self) -> SectionVisibility {
        self.visibility
    }

    fn section_mut(&mut self, stage: Stage) -> &mut Vec<DownloadId> {
        match stage {
            Stage::InQueue => &mut self.queued,
            Stage::Downloading => &mut self.downloading,
            Stage::Completed => &mut self.completed,
        }
    }

    fn recompute_visibility(&mut self) {
        self.visibility = SectionVisibility {
            queued: !self.queued.is_empty(),
            downloading: !self.downloading.is_empty(),
            completed: !self.completed.is_empty(),
        };
    }
}
