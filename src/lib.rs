//! Window lifecycle and download-queue presentation for a desktop media
//! downloader.
//!
//! The core is headless: [`app::WindowLifecycleController`] drives the main
//! window, tray and notifications through traits, fed by engine and UI event
//! channels. The `desktop` feature adds the Tauri shell in [`desktop`].

pub mod app;
pub mod config;
pub mod downloads;
pub mod engine;
pub mod error;
pub mod l10n;
pub mod logging;

#[cfg(feature = "desktop")]
pub mod desktop;

pub use app::{ExitReason, ShellParts, UiEvent, WindowLifecycleController};
pub use config::ShellConfig;
pub use downloads::{Download, DownloadId, DownloadSectionRouter, Stage};
pub use engine::{DownloadEngine, EngineEvent};
pub use error::{TubeDeckError, TubeDeckResult};
