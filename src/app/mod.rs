//! Application lifecycle and platform integration.
//!
//! - `lifecycle`: the window lifecycle controller and its event loop
//! - `shutdown`: close-request gate
//! - `tray`: background-mode tray presence
//! - `notifications`: in-app banners and shell notifications
//! - `window`: window seam and chrome state
//! - `events`: UI events fed to the controller

pub mod events;
pub mod lifecycle;
pub mod notifications;
pub mod shutdown;
pub mod tray;
pub mod window;

pub use events::{ui_channel, UiEvent, UiEventReceiver, UiEventSender};
pub use lifecycle::{ExitReason, ShellParts, WindowLifecycleController};
pub use tray::TrayMenuAction;
