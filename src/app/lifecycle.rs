//! Main window lifecycle controller.
//!
//! Owns the section router, the shutdown gate, the tray presence and the
//! notification router, and drives them from one cooperative loop fed by the
//! UI and engine channels. All presentation state is mutated only here.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::mpsc;

use super::events::{UiEvent, UiEventReceiver};
use super::notifications::{
    NotificationRouter, NotificationSeverity, NotificationSink, ShellNotification,
};
use super::shutdown::{CloseDecision, ShutdownGate};
use super::tray::{TrayBackend, TrayMenuAction, TrayMenuSpec, TrayPresence};
use super::window::{ChromeState, ConfirmationPrompt, Page, WindowShell};
use crate::config::ShellConfig;
use crate::downloads::{Download, DownloadSectionRouter};
use crate::engine::{DownloadEngine, EngineEvent};
use crate::error::TubeDeckResult;
use crate::l10n::{EnglishLocalizer, Localizer};

type StartupFuture = Pin<Box<dyn Future<Output = TubeDeckResult<()>> + Send>>;

/// Why the controller stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Closed with no downloads running.
    Closed,
    /// Closed after the user agreed to stop running downloads.
    ConfirmedClose,
    /// Quit from the tray menu.
    TrayQuit,
    /// The window went away without a close request.
    WindowDestroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartupState {
    Pending,
    Running,
    Ready,
}

/// Platform implementations of the shell seams.
pub struct ShellParts {
    pub window: Box<dyn WindowShell>,
    pub tray: Box<dyn TrayBackend>,
    pub notifications: Box<dyn NotificationSink>,
}

pub struct WindowLifecycleController {
    config: ShellConfig,
    engine: Arc<dyn DownloadEngine>,
    localizer: Arc<dyn Localizer>,
    window: Box<dyn WindowShell>,
    sections: DownloadSectionRouter,
    gate: ShutdownGate,
    tray: TrayPresence,
    notifications: NotificationRouter,
    chrome: ChromeState,
    startup: StartupState,
    exit: Option<ExitReason>,
}

impl WindowLifecycleController {
    pub fn new(config: ShellConfig, engine: Arc<dyn DownloadEngine>, parts: ShellParts) -> Self {
        let tray = TrayPresence::new(parts.tray, config.tray_refresh_interval());
        Self {
            config,
            engine,
            localizer: Arc::new(EnglishLocalizer),
            window: parts.window,
            sections: DownloadSectionRouter::new(),
            gate: ShutdownGate::new(),
            tray,
            notifications: NotificationRouter::new(parts.notifications),
            chrome: ChromeState::default(),
            startup: StartupState::Pending,
            exit: None,
        }
    }

    pub fn with_localizer(mut self, localizer: Arc<dyn Localizer>) -> Self {
        self.localizer = localizer;
        self
    }

    pub fn sections(&self) -> &DownloadSectionRouter {
        &self.sections
    }

    pub fn gate(&self) -> &ShutdownGate {
        &self.gate
    }

    pub fn chrome(&self) -> &ChromeState {
        &self.chrome
    }

    pub fn is_tray_enabled(&self) -> bool {
        self.tray.is_enabled()
    }

    pub fn is_ready(&self) -> bool {
        self.startup == StartupState::Ready
    }

    pub fn exit_reason(&self) -> Option<ExitReason> {
        self.exit
    }

    /// Push the initial window state and sync the tray with the preference.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn attach(&mut self) {
        self.window.apply_chrome(&self.chrome);
        self.window.set_section_visibility(self.sections.visibility());
        self.window.show_page(Page::Home);
        self.sync_background_mode();
    }

    /// Run the controller until the process should exit.
    pub async fn run(
        mut self,
        mut ui_events: UiEventReceiver,
        mut engine_events: mpsc::UnboundedReceiver<EngineEvent>,
    ) -> ExitReason {
        self.attach();
        let mut startup = self.begin_startup();
        let mut engine_open = true;

        loop {
            tokio::select! {
                biased;

                result = wait_startup(&mut startup), if startup.is_some() => {
                    startup = None;
                    self.finish_startup(result);
                },
                event = engine_events.recv(), if engine_open => match event {
                    Some(event) => self.handle_engine_event(event),
                    None => {
                        log::warn!("[LIFECYCLE] engine event channel closed");
                        engine_open = false;
                    },
                },
                event = ui_events.recv() => match event {
                    Some(event) => self.handle_ui_event(event),
                    None => self.terminate(ExitReason::WindowDestroyed),
                },
                _ = self.tray.tick(), if self.tray.is_enabled() => self.on_tray_tick(),
            }

            if let Some(reason) = self.exit {
                log::info!("[LIFECYCLE] controller stopped: {:?}", reason);
                return reason;
            }
        }
    }

    /// Show the loading indicator and hand back the startup work.
    ///
    /// Returns `None` once startup has begun; it runs once per window.
    pub fn begin_startup(&mut self) -> Option<StartupFuture> {
        if self.startup != StartupState::Pending {
            return None;
        }
        self.startup = StartupState::Running;
        self.window.set_loading(true);

        let engine = Arc::clone(&self.engine);
        let paint_delay = self.config.startup_paint_delay();
        Some(Box::pin(async move {
            // Let the window surface paint before a potentially slow startup.
            tokio::time::sleep(paint_delay).await;
            engine.startup().await
        }))
    }

    pub fn finish_startup(&mut self, result: TubeDeckResult<()>) {
        if let Err(e) = result {
            log::error!("[LIFECYCLE] engine startup failed: {}", e);
            self.notifications
                .show_in_app(&e.to_string(), NotificationSeverity::Error);
        }
        self.window.set_loading(false);
        self.startup = StartupState::Ready;
        log::info!("[LIFECYCLE] window ready");
    }

    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        if self.exit.is_some() {
            return;
        }
        match event {
            EngineEvent::DownloadCreated(download) => {
                self.sections.create_row(&download);
            },
            EngineEvent::StageChanged(download) => self.on_stage_changed(&download),
            EngineEvent::RemovedFromQueue(id) => {
                self.sections.delete_from_queue(id);
                self.window.set_section_visibility(self.sections.visibility());
            },
            EngineEvent::NotificationSent { message, severity } => {
                self.notifications.show_in_app(&message, severity);
            },
            EngineEvent::BackgroundModeChanged => self.sync_background_mode(),
        }
    }

    pub fn handle_ui_event(&mut self, event: UiEvent) {
        if self.exit.is_some() {
            return;
        }
        match event {
            UiEvent::CloseRequested => self.on_close_requested(),
            UiEvent::CloseConfirmed(confirmed) => {
                if let Some(CloseDecision::Terminate) = self.gate.on_confirmation(confirmed) {
                    self.terminate(ExitReason::ConfirmedClose);
                }
            },
            UiEvent::Activated(active) => {
                self.chrome.set_active(active);
                self.window.apply_chrome(&self.chrome);
            },
            UiEvent::ThemeChanged(theme) => {
                self.chrome.set_theme(theme);
                self.window.apply_chrome(&self.chrome);
            },
            UiEvent::Tray(TrayMenuAction::Open) => self.window.bring_to_front(),
            UiEvent::Tray(TrayMenuAction::Quit) => self.terminate(ExitReason::TrayQuit),
            UiEvent::DownloadsAdded(downloads) => self.on_downloads_added(downloads),
        }
    }

    pub fn on_tray_tick(&mut self) {
        if !self.tray.is_enabled() {
            return;
        }
        let report = self.engine.background_activity_report();
        self.tray.refresh_tooltip(&report);
    }

    fn on_stage_changed(&mut self, download: &Download) {
        let outcome = self.sections.apply_stage_change(download);
        if let Some(row) = outcome.completed {
            if !self.chrome.active {
                let notice = ShellNotification::download_finished(&row, self.localizer.as_ref());
                self.notifications.send(&notice);
            }
        }
        self.window.set_section_visibility(self.sections.visibility());
    }

    fn on_downloads_added(&mut self, downloads: Vec<Download>) {
        self.window.show_page(Page::Downloads);
        for download in downloads {
            log::debug!("[LIFECYCLE] adding download {}", download.id);
            self.engine.add_download(download);
        }
    }

    fn on_close_requested(&mut self) {
        let decision = self.gate.on_close_requested(
            self.engine.run_in_background(),
            self.engine.are_downloads_running(),
        );
        match decision {
            CloseDecision::HideToBackground => {
                if !self.tray.is_enabled() {
                    log::warn!("[LIFECYCLE] hiding to background without a tray icon");
                }
                self.window.hide();
            },
            CloseDecision::AskConfirmation => {
                let prompt = ConfirmationPrompt::close_and_stop(self.localizer.as_ref());
                self.window.request_close_confirmation(&prompt);
            },
            CloseDecision::AwaitingAnswer => {
                log::debug!("[LIFECYCLE] close prompt already showing");
            },
            CloseDecision::Terminate => {
                let reason = if self.gate.is_latched() {
                    ExitReason::ConfirmedClose
                } else {
                    ExitReason::Closed
                };
                self.terminate(reason);
            },
        }
    }

    fn sync_background_mode(&mut self) {
        if self.engine.run_in_background() {
            let spec = TrayMenuSpec::new(&self.config.app_name, self.localizer.as_ref());
            if let Err(e) = self.tray.enable(&spec) {
                log::warn!("[LIFECYCLE] could not enable tray: {}", e);
            }
        } else {
            self.tray.disable();
        }
    }

    /// Stop downloads, release resources and end the process. Runs once.
    fn terminate(&mut self, reason: ExitReason) {
        if self.exit.is_some() {
            log::debug!("[LIFECYCLE] already terminated, ignoring {:?}", reason);
            return;
        }
        log::info!("[LIFECYCLE] terminating: {:?}", reason);

        self.engine.stop_all_downloads();
        self.tray.disable();
        self.window.hide();
        if let Err(e) = self.window.release_backdrop() {
            log::warn!("[LIFECYCLE] failed to release backdrop: {}", e);
        }
        self.engine.dispose();

        self.exit = Some(reason);
        self.window.terminate(0);
    }
}

async fn wait_startup(startup: &mut Option<StartupFuture>) -> TubeDeckResult<()> {
    match startup.as_mut() {
        Some(future) => future.await,
        None => std::future::pending().await,
    }
}
