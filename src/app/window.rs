//! The main window as seen by the coordinator.
//!
//! [`WindowShell`] is the seam to the real window (Tauri in the desktop
//! build, recording fakes in tests). [`ChromeState`] holds the render-only
//! reactions to focus and theme changes.

use serde::Serialize;

use crate::downloads::SectionVisibility;
use crate::error::TubeDeckResult;
use crate::l10n::{Localizer, Text};

/// Navigation pages of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Page {
    Home,
    Downloads,
    Settings,
}

/// Theme the window content is rendered with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Theme {
    #[default]
    Default,
    Light,
    Dark,
}

/// Theme handed to the system backdrop (mica) controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BackdropTheme {
    #[default]
    Default,
    Light,
    Dark,
}

impl From<Theme> for BackdropTheme {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Default => Self::Default,
            Theme::Light => Self::Light,
            Theme::Dark => Self::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackdropConfig {
    pub input_active: bool,
    pub theme: BackdropTheme,
}

/// Caption (title text and caption buttons) foreground resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CaptionBrush {
    Foreground,
    ForegroundDisabled,
}

/// Window chrome derived from focus and theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChromeState {
    pub active: bool,
    pub theme: Theme,
    pub caption: CaptionBrush,
    pub backdrop: BackdropConfig,
}

impl ChromeState {
    /// Windows open focused.
    pub fn new(theme: Theme) -> Self {
        Self {
            active: true,
            theme,
            caption: CaptionBrush::Foreground,
            backdrop: BackdropConfig {
                input_active: true,
                theme: theme.into(),
            },
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.caption = self.caption_brush();
        self.backdrop.input_active = active;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.caption = self.caption_brush();
        self.backdrop.theme = theme.into();
    }

    fn caption_brush(&self) -> CaptionBrush {
        if self.active {
            CaptionBrush::Foreground
        } else {
            CaptionBrush::ForegroundDisabled
        }
    }
}

impl Default for ChromeState {
    fn default() -> Self {
        Self::new(Theme::Default)
    }
}

/// Yes/no prompt shown before closing stops active downloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationPrompt {
    pub title: String,
    pub description: String,
    pub confirm_label: String,
    /// Also the default button.
    pub cancel_label: String,
}

impl ConfirmationPrompt {
    pub fn close_and_stop(localizer: &dyn Localizer) -> Self {
        Self {
            title: localizer.text(Text::CloseAndStopTitle).into_owned(),
            description: localizer.text(Text::CloseAndStopDescription).into_owned(),
            confirm_label: localizer.text(Text::Yes).into_owned(),
            cancel_label: localizer.text(Text::No).into_owned(),
        }
    }
}

/// Operations the coordinator performs on the main window.
pub trait WindowShell: Send {
    fn hide(&mut self);

    /// Show, unminimize and focus the window.
    fn bring_to_front(&mut self);

    fn set_loading(&mut self, loading: bool);

    fn set_section_visibility(&mut self, visibility: SectionVisibility);

    fn show_page(&mut self, page: Page);

    fn apply_chrome(&mut self, chrome: &ChromeState);

    /// Present the prompt without blocking. The answer must come back as
    /// [`crate::app::events::UiEvent::CloseConfirmed`].
    fn request_close_confirmation(&mut self, prompt: &ConfirmationPrompt);

    /// Dispose the system backdrop controller.
    fn release_backdrop(&mut self) -> TubeDeckResult<()>;

    /// End the process.
    fn terminate(&mut self, exit_code: i32);
}
