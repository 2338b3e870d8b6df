//! Main window and notifications backed by Tauri.

use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager, WebviewWindow};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tauri_plugin_notification::NotificationExt;

use crate::app::events::send_ui_event;
use crate::app::notifications::{BannerSeverity, NotificationSink, ShellNotification};
use crate::app::window::{ChromeState, ConfirmationPrompt, Page, WindowShell};
use crate::app::{UiEvent, UiEventSender};
use crate::downloads::SectionVisibility;
use crate::error::{OptionExt, ResultExt, TubeDeckResult};

/// Frontend event names.
pub const EVENT_LOADING: &str = "shell://loading";
pub const EVENT_SECTIONS: &str = "shell://sections";
pub const EVENT_PAGE: &str = "shell://page";
pub const EVENT_CHROME: &str = "shell://chrome";
pub const EVENT_BANNER: &str = "shell://banner";

fn emit<S: Serialize + Clone>(app: &AppHandle, event: &str, payload: S) {
    if let Err(e) = app.emit(event, payload) {
        log::warn!("[DESKTOP] failed to emit {}: {}", event, e);
    }
}

pub struct TauriWindow {
    app: AppHandle,
    label: String,
    ui: UiEventSender,
}

impl TauriWindow {
    pub fn new(app: AppHandle, label: &str, ui: UiEventSender) -> Self {
        Self {
            app,
            label: label.to_string(),
            ui,
        }
    }

    fn window(&self) -> TubeDeckResult<WebviewWindow> {
        self.app
            .get_webview_window(&self.label)
            .with_context(|| format!("Window '{}' not found", self.label))
    }
}

impl WindowShell for TauriWindow {
    fn hide(&mut self) {
        let result = self
            .window()
            .and_then(|w| w.hide().context("Failed to hide window"));
        if let Err(e) = result {
            log::warn!("[DESKTOP] {}", e);
        }
    }

    fn bring_to_front(&mut self) {
        let result = self.window().and_then(|w| {
            w.show().context("Failed to show window")?;
            w.unminimize().context("Failed to unminimize window")?;
            w.set_focus().context("Failed to focus window")
        });
        if let Err(e) = result {
            log::warn!("[DESKTOP] {}", e);
        }
    }

    fn set_loading(&mut self, loading: bool) {
        emit(&self.app, EVENT_LOADING, loading);
    }

    fn set_section_visibility(&mut self, visibility: SectionVisibility) {
        emit(&self.app, EVENT_SECTIONS, visibility);
    }

    fn show_page(&mut self, page: Page) {
        emit(&self.app, EVENT_PAGE, page);
    }

    fn apply_chrome(&mut self, chrome: &ChromeState) {
        emit(&self.app, EVENT_CHROME, *chrome);
    }

    fn request_close_confirmation(&mut self, prompt: &ConfirmationPrompt) {
        let ui = self.ui.clone();
        let mut dialog = self
            .app
            .dialog()
            .message(prompt.description.clone())
            .title(prompt.title.clone())
            .kind(MessageDialogKind::Warning)
            .buttons(MessageDialogButtons::OkCancelCustom(
                prompt.confirm_label.clone(),
                prompt.cancel_label.clone(),
            ));
        if let Ok(window) = self.window() {
            dialog = dialog.parent(&window);
        }
        dialog.show(move |confirmed| send_ui_event(&ui, UiEvent::CloseConfirmed(confirmed)));
    }

    fn release_backdrop(&mut self) -> TubeDeckResult<()> {
        self.window()?
            .set_effects(None::<tauri::utils::config::WindowEffectsConfig>)
            .context("Failed to clear window effects")
    }

    fn terminate(&mut self, exit_code: i32) {
        log::info!("[DESKTOP] exiting with code {}", exit_code);
        self.app.exit(exit_code);
    }
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct BannerPayload<'a> {
    message: &'a str,
    severity: BannerSeverity,
}

/// In-app banners go to the frontend; shell notifications go to the OS.
pub struct TauriNotifier {
    app: AppHandle,
}

impl TauriNotifier {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl NotificationSink for TauriNotifier {
    fn show_banner(&mut self, message: &str, severity: BannerSeverity) {
        emit(&self.app, EVENT_BANNER, BannerPayload { message, severity });
    }

    fn show_shell(&mut self, notification: &ShellNotification) {
        let result = self
            .app
            .notification()
            .builder()
            .title(&notification.title)
            .body(&notification.message)
            .show();
        if let Err(e) = result {
            log::warn!("[DESKTOP] failed to show notification: {}", e);
        }
    }
}
