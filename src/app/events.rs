//! Events raised by the window, its dialogs and the tray.
//!
//! The platform shell translates native window events into [`UiEvent`]s and
//! sends them to the lifecycle controller's loop.

use tokio::sync::mpsc;

use super::tray::TrayMenuAction;
use super::window::Theme;
use crate::downloads::Download;

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The user asked to close the main window. The native close has already
    /// been cancelled; the controller decides what happens.
    CloseRequested,
    /// Answer to the close confirmation prompt.
    CloseConfirmed(bool),
    /// The window gained (`true`) or lost (`false`) focus.
    Activated(bool),
    ThemeChanged(Theme),
    Tray(TrayMenuAction),
    /// The Add Download dialog was confirmed with these downloads.
    DownloadsAdded(Vec<Download>),
}

impl From<TrayMenuAction> for UiEvent {
    fn from(action: TrayMenuAction) -> Self {
        UiEvent::Tray(action)
    }
}

pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Channel used by the platform shell to reach the controller.
pub fn ui_channel() -> (UiEventSender, UiEventReceiver) {
    mpsc::unbounded_channel()
}

/// Send an event, logging if the controller loop has already stopped.
pub fn send_ui_event(sender: &UiEventSender, event: UiEvent) {
    if let Err(e) = sender.send(event) {
        log::debug!("[EVENTS] controller stopped, dropping {:?}", e.0);
    }
}
