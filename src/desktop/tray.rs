//! Tray icon backed by Tauri.

use tauri::menu::{Menu, MenuItem, PredefinedMenuItem};
use tauri::tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent};
use tauri::AppHandle;

use crate::app::events::send_ui_event;
use crate::app::tray::{TrayBackend, TrayMenuAction, TrayMenuSpec};
use crate::app::UiEventSender;
use crate::error::{OptionExt, ResultExt, TubeDeckError, TubeDeckResult};

const TRAY_ID: &str = "tubedeck-tray";

pub struct TauriTray {
    app: AppHandle,
    ui: UiEventSender,
}

impl TauriTray {
    pub fn new(app: AppHandle, ui: UiEventSender) -> Self {
        Self { app, ui }
    }
}

impl TrayBackend for TauriTray {
    fn create(&mut self, spec: &TrayMenuSpec) -> TubeDeckResult<()> {
        let open = MenuItem::with_id(
            &self.app,
            TrayMenuAction::Open.id(),
            &spec.open_label,
            true,
            None::<&str>,
        )
        .context("Failed to create Open menu item")?;
        let separator =
            PredefinedMenuItem::separator(&self.app).context("Failed to create separator")?;
        let quit = MenuItem::with_id(
            &self.app,
            TrayMenuAction::Quit.id(),
            &spec.quit_label,
            true,
            None::<&str>,
        )
        .context("Failed to create Quit menu item")?;
        let menu = Menu::with_items(&self.app, &[&open, &separator, &quit])
            .context("Failed to create tray menu")?;

        let menu_ui = self.ui.clone();
        let click_ui = self.ui.clone();
        let mut builder = TrayIconBuilder::with_id(TRAY_ID)
            .tooltip(&spec.tooltip)
            .menu(&menu)
            .show_menu_on_left_click(false)
            .on_menu_event(move |_app, event| {
                match TrayMenuAction::from_id(event.id.as_ref()) {
                    Some(action) => send_ui_event(&menu_ui, action.into()),
                    None => log::debug!("[TRAY] unknown menu id {:?}", event.id),
                }
            })
            .on_tray_icon_event(move |_tray, event| {
                if let TrayIconEvent::Click {
                    button: MouseButton::Left,
                    button_state: MouseButtonState::Up,
                    ..
                } = event
                {
                    send_ui_event(&click_ui, TrayMenuAction::Open.into());
                }
            });

        if let Some(icon) = self.app.default_window_icon() {
            builder = builder.icon(icon.clone().to_owned());
        }

        builder
            .build(&self.app)
            .map_err(|e| TubeDeckError::TrayError(e.to_string()))?;
        Ok(())
    }

    fn set_tooltip(&mut self, text: &str) -> TubeDeckResult<()> {
        let tray = self.app.tray_by_id(TRAY_ID).context("Tray icon not found")?;
        tray.set_tooltip(Some(text))
            .map_err(|e| TubeDeckError::TrayError(e.to_string()))
    }

    fn remove(&mut self) -> TubeDeckResult<()> {
        self.app
            .remove_tray_by_id(TRAY_ID)
            .context("Tray icon not found")?;
        Ok(())
    }
}
