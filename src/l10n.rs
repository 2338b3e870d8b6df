//! User-facing strings used by the coordinator.
//!
//! The real string catalog belongs to the host application; the coordinator
//! only needs a handful of keys, looked up through [`Localizer`].

use std::borrow::Cow;

/// Keys of the strings the coordinator renders itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Text {
    DownloadFinished,
    /// Contains one `{}` placeholder for the quoted filename.
    DownloadFinishedDescription,
    DownloadFinishedWithError,
    /// Contains one `{}` placeholder for the quoted filename.
    DownloadFinishedWithErrorDescription,
    CloseAndStopTitle,
    CloseAndStopDescription,
    Yes,
    No,
    Open,
    Quit,
}

pub trait Localizer: Send + Sync {
    fn text(&self, key: Text) -> Cow<'_, str>;

    /// Look up `key` and substitute `arg` for its first `{}` placeholder.
    fn format(&self, key: Text, arg: &str) -> String {
        self.text(key).replacen("{}", arg, 1)
    }
}

/// Built-in English strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLocalizer;

impl Localizer for EnglishLocalizer {
    fn text(&self, key: Text) -> Cow<'_, str> {
        Cow::Borrowed(match key {
            Text::DownloadFinished => "Download Finished",
            Text::DownloadFinishedDescription => "{} has finished downloading.",
            Text::DownloadFinishedWithError => "Download Finished With Error",
            Text::DownloadFinishedWithErrorDescription => {
                "{} has finished with an error. Open the app to see the log."
            },
            Text::CloseAndStopTitle => "Close and Stop Downloads?",
            Text::CloseAndStopDescription => {
                "Some downloads are still running. Closing the app will stop them."
            },
            Text::Yes => "Yes",
            Text::No => "No",
            Text::Open => "Open",
            Text::Quit => "Quit",
        })
    }
}
