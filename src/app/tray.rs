//! Background-mode tray presence.
//!
//! The tray exists only while "run in background" is enabled. Enabling builds
//! the icon with its Open/Quit menu and starts the tooltip refresh tick;
//! disabling stops the tick and removes the icon.

use std::time::Duration;

use tokio::time::{self, Interval, MissedTickBehavior};

use crate::error::TubeDeckResult;
use crate::l10n::{Localizer, Text};

/// Context menu entries of the tray icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayMenuAction {
    /// Bring the main window to the front.
    Open,
    /// Stop downloads and exit without confirmation.
    Quit,
}

impl TrayMenuAction {
    pub const fn id(self) -> &'static str {
        match self {
            TrayMenuAction::Open => "open",
            TrayMenuAction::Quit => "quit",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "open" => Some(TrayMenuAction::Open),
            "quit" => Some(TrayMenuAction::Quit),
            _ => None,
        }
    }
}

/// What the backend needs to build the icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayMenuSpec {
    pub tooltip: String,
    pub open_label: String,
    pub quit_label: String,
}

impl TrayMenuSpec {
    pub fn new(app_name: &str, localizer: &dyn Localizer) -> Self {
        Self {
            tooltip: app_name.to_string(),
            open_label: localizer.text(Text::Open).into_owned(),
            quit_label: localizer.text(Text::Quit).into_owned(),
        }
    }
}

/// Platform tray icon. Menu clicks are reported by the backend as
/// [`TrayMenuAction`]s through the UI event channel.
pub trait TrayBackend: Send {
    /// Create the icon with a two-item menu (Open, separator, Quit).
    fn create(&mut self, spec: &TrayMenuSpec) -> TubeDeckResult<()>;

    fn set_tooltip(&mut self, text: &str) -> TubeDeckResult<()>;

    /// Remove the icon from the notification area and release it.
    fn remove(&mut self) -> TubeDeckResult<()>;
}

struct ActiveTray {
    ticker: Interval,
}

pub struct TrayPresence {
    backend: Box<dyn TrayBackend>,
    active: Option<ActiveTray>,
    refresh_interval: Duration,
}

impl TrayPresence {
    pub fn new(backend: Box<dyn TrayBackend>, refresh_interval: Duration) -> Self {
        Self {
            backend,
            active: None,
            refresh_interval,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.active.is_some()
    }

    /// Create the icon and start the refresh tick.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn enable(&mut self, spec: &TrayMenuSpec) -> TubeDeckResult<()> {
        if self.is_enabled() {
            log::debug!("[TRAY] already enabled");
            return Ok(());
        }

        self.backend.create(spec)?;
        let mut ticker = time::interval(self.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.active = Some(ActiveTray { ticker });

        log::info!("[TRAY] enabled (refresh every {:?})", self.refresh_interval);
        Ok(())
    }

    /// Stop the tick and remove the icon. No-op when disabled.
    ///
    /// A failing removal is logged; the tray counts as disabled regardless.
    pub fn disable(&mut self) {
        if self.active.take().is_none() {
            return;
        }
        if let Err(e) = self.backend.remove() {
            log::warn!("[TRAY] failed to remove tray icon: {}", e);
        }
        log::info!("[TRAY] disabled");
    }

    /// Wait for the next refresh tick. Pending forever while disabled.
    pub async fn tick(&mut self) {
        match self.active.as_mut() {
            Some(active) => {
                active.ticker.tick().await;
            },
            None => std::future::pending::<()>().await,
        }
    }

    /// Write the activity report into the tooltip. Skipped while disabled.
    pub fn refresh_tooltip(&mut self, report: &str) {
        if !self.is_enabled() {
            return;
        }
        if let Err(e) = self.backend.set_tooltip(report) {
            log::warn!("[TRAY] failed to update tooltip: {}", e);
        }
    }
}

impl Drop for TrayPresence {
    fn drop(&mut self) {
        self.disable();
    }
}
