//! Tauri desktop shell.
//!
//! Wires the lifecycle controller to a real Tauri window:
//! - `window`: window operations, frontend events, confirmation dialog, shell notifications
//! - `tray`: tray icon and menu
//!
//! The native close of the main window is always prevented and forwarded to
//! the controller, which hides, asks, or exits.

mod tray;
mod window;

use std::sync::Arc;

use tauri::{Manager, WindowEvent};
use tokio::sync::mpsc;

use crate::app::events::send_ui_event;
use crate::app::window::Theme;
use crate::app::{ui_channel, ShellParts, UiEvent, UiEventSender, WindowLifecycleController};
use crate::config::ShellConfig;
use crate::downloads::Download;
use crate::engine::{DownloadEngine, EngineEvent};
use crate::logging;

pub use tray::TauriTray;
pub use window::{TauriNotifier, TauriWindow};

/// State shared with IPC commands.
struct DesktopState {
    ui: UiEventSender,
}

/// Forward the Add Download dialog result to the controller.
#[tauri::command]
fn add_downloads(state: tauri::State<'_, DesktopState>, downloads: Vec<Download>) {
    log::debug!("[DESKTOP] add_downloads({} items)", downloads.len());
    send_ui_event(&state.ui, UiEvent::DownloadsAdded(downloads));
}

/// Translate native window events of the main window into UI events.
fn handle_window_event(
    ui: &UiEventSender,
    main_label: &str,
    window: &tauri::Window,
    event: &WindowEvent,
) {
    if window.label() != main_label {
        return;
    }
    match event {
        WindowEvent::CloseRequested { api, .. } => {
            api.prevent_close();
            send_ui_event(ui, UiEvent::CloseRequested);
        },
        WindowEvent::Focused(focused) => send_ui_event(ui, UiEvent::Activated(*focused)),
        WindowEvent::ThemeChanged(theme) => {
            send_ui_event(ui, UiEvent::ThemeChanged(map_theme(*theme)));
        },
        _ => {},
    }
}

fn map_theme(theme: tauri::Theme) -> Theme {
    match theme {
        tauri::Theme::Light => Theme::Light,
        tauri::Theme::Dark => Theme::Dark,
        _ => Theme::Default,
    }
}

/// Run the desktop application until the controller exits.
///
/// `context` comes from `tauri::generate_context!()` in the host binary.
pub fn run(
    context: tauri::Context<tauri::Wry>,
    config: ShellConfig,
    engine: Arc<dyn DownloadEngine>,
    engine_events: mpsc::UnboundedReceiver<EngineEvent>,
) -> tauri::Result<()> {
    logging::init_once();

    let (ui_tx, ui_rx) = ui_channel();
    let window_events_tx = ui_tx.clone();
    let main_label = config.main_window_label.clone();

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_notification::init())
        .manage(DesktopState { ui: ui_tx.clone() })
        .on_window_event(move |window, event| {
            handle_window_event(&window_events_tx, &main_label, window, event);
        })
        .invoke_handler(tauri::generate_handler![add_downloads])
        .setup(move |app| {
            let handle = app.handle().clone();

            if let Some(window) = app.get_webview_window(&config.main_window_label) {
                if let Ok(theme) = window.theme() {
                    send_ui_event(&ui_tx, UiEvent::ThemeChanged(map_theme(theme)));
                }
            }

            let parts = ShellParts {
                window: Box::new(TauriWindow::new(
                    handle.clone(),
                    &config.main_window_label,
                    ui_tx.clone(),
                )),
                tray: Box::new(TauriTray::new(handle.clone(), ui_tx.clone())),
                notifications: Box::new(TauriNotifier::new(handle)),
            };
            let controller = WindowLifecycleController::new(config, engine, parts);

            tauri::async_runtime::spawn(async move {
                let reason = controller.run(ui_rx, engine_events).await;
                log::info!("[DESKTOP] shell exited: {:?}", reason);
            });

            Ok(())
        })
        .run(context)
}
