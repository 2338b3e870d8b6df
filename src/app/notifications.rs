//! In-app banners and OS-level shell notifications.
//!
//! Every engine notification produces exactly one banner; every completion
//! while the window is unfocused produces exactly one shell notification.
//! Nothing is rate-limited or deduplicated here.

use serde::{Deserialize, Serialize};

use crate::downloads::DownloadRow;
use crate::l10n::{Localizer, Text};

/// Severity attached to engine notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationSeverity {
    Informational,
    Success,
    Warning,
    Error,
}

/// Severity understood by the banner widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BannerSeverity {
    Informational,
    Success,
    Warning,
    Error,
}

impl From<NotificationSeverity> for BannerSeverity {
    fn from(severity: NotificationSeverity) -> Self {
        match severity {
            NotificationSeverity::Informational => Self::Informational,
            NotificationSeverity::Success => Self::Success,
            NotificationSeverity::Warning => Self::Warning,
            NotificationSeverity::Error => Self::Error,
        }
    }
}

/// An OS-level notification: a one-line title and a message line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellNotification {
    pub title: String,
    pub message: String,
    pub severity: NotificationSeverity,
}

impl ShellNotification {
    pub fn new(title: &str, message: impl Into<String>, severity: NotificationSeverity) -> Self {
        Self {
            title: single_line(title),
            message: message.into(),
            severity,
        }
    }

    /// Completion notice for a row that just landed in Completed.
    pub fn download_finished(row: &DownloadRow, localizer: &dyn Localizer) -> Self {
        let (title, description, severity) = if row.finished_with_error {
            (
                Text::DownloadFinishedWithError,
                Text::DownloadFinishedWithErrorDescription,
                NotificationSeverity::Error,
            )
        } else {
            (
                Text::DownloadFinished,
                Text::DownloadFinishedDescription,
                NotificationSeverity::Success,
            )
        };
        let quoted = format!("\"{}\"", row.filename);
        Self::new(
            &localizer.text(title),
            localizer.format(description, &quoted),
            severity,
        )
    }
}

fn single_line(title: &str) -> String {
    title.lines().next().unwrap_or_default().trim_end().to_string()
}

/// Where notifications are rendered.
pub trait NotificationSink: Send {
    fn show_banner(&mut self, message: &str, severity: BannerSeverity);
    fn show_shell(&mut self, notification: &ShellNotification);
}

pub struct NotificationRouter {
    sink: Box<dyn NotificationSink>,
}

impl NotificationRouter {
    pub fn new(sink: Box<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    pub fn show_in_app(&mut self, message: &str, severity: NotificationSeverity) {
        self.sink.show_banner(message, severity.into());
    }

    pub fn show_shell(&mut self, title: &str, message: &str, severity: NotificationSeverity) {
        self.send(&ShellNotification::new(title, message, severity));
    }

    pub fn send(&mut self, notification: &ShellNotification) {
        log::debug!("[NOTIFY] shell notification: {}", notification.title);
        self.sink.show_shell(notification);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::downloads::Download;
    use crate::l10n::EnglishLocalizer;

    #[derive(Default)]
    struct Recorded {
        banners: Vec<(String, BannerSeverity)>,
        shell: Vec<ShellNotification>,
    }

    struct RecordingSink(Arc<Mutex<Recorded>>);

    impl NotificationSink for RecordingSink {
        fn show_banner(&mut self, message: &str, severity: BannerSeverity) {
            self.0.lock().banners.push((message.to_string(), severity));
        }

        fn show_shell(&mut self, notification: &ShellNotification) {
            self.0.lock().shell.push(notification.clone());
        }
    }

    fn router() -> (NotificationRouter, Arc<Mutex<Recorded>>) {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let router = NotificationRouter::new(Box::new(RecordingSink(recorded.clone())));
        (router, recorded)
    }

    #[test]
    fn severities_map_one_to_one() {
        let (mut router, recorded) = router();
        router.show_in_app("a", NotificationSeverity::Informational);
        router.show_in_app("b", NotificationSeverity::Success);
        router.show_in_app("c", NotificationSeverity::Warning);
        router.show_in_app("d", NotificationSeverity::Error);

        let severities: Vec<_> = recorded.lock().banners.iter().map(|(_, s)| *s).collect();
        assert_eq!(
            severities,
            vec![
                BannerSeverity::Informational,
                BannerSeverity::Success,
                BannerSeverity::Warning,
                BannerSeverity::Error,
            ]
        );
    }

    #[test]
    fn repeated_messages_are_not_deduplicated() {
        let (mut router, recorded) = router();
        router.show_in_app("same", NotificationSeverity::Warning);
        router.show_in_app("same", NotificationSeverity::Warning);
        assert_eq!(recorded.lock().banners.len(), 2);
    }

    #[test]
    fn shell_title_is_clamped_to_one_line() {
        let (mut router, recorded) = router();
        router.show_shell("First line\nsecond line", "body", NotificationSeverity::Success);

        let shell = &recorded.lock().shell;
        assert_eq!(shell.len(), 1);
        assert_eq!(shell[0].title, "First line");
        assert_eq!(shell[0].message, "body");
    }

    #[test]
    fn finished_notice_quotes_filename() {
        let row = DownloadRow::from_download(&Download::queued("song.opus"));
        let notice = ShellNotification::download_finished(&row, &EnglishLocalizer);
        assert_eq!(notice.title, "Download Finished");
        assert_eq!(notice.message, "\"song.opus\" has finished downloading.");
        assert_eq!(notice.severity, NotificationSeverity::Success);
    }

    #[test]
    fn finished_with_error_notice_uses_error_texts() {
        let row = DownloadRow::from_download(&Download::queued("broken.mp4").with_error(true));
        let notice = ShellNotification::download_finished(&row, &EnglishLocalizer);
        assert_eq!(notice.title, "Download Finished With Error");
        assert!(notice.message.starts_with("\"broken.mp4\" has finished with an error"));
        assert_eq!(notice.severity, NotificationSeverity::Error);
    }
}
