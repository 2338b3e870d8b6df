//! End-to-end tests of the controller loop with recording fakes for the
//! window, tray, notifications and download engine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use tubedeck_lib::app::notifications::{BannerSeverity, NotificationSink, ShellNotification};
use tubedeck_lib::app::tray::{TrayBackend, TrayMenuAction, TrayMenuSpec};
use tubedeck_lib::app::window::{ChromeState, ConfirmationPrompt, Page, WindowShell};
use tubedeck_lib::app::{ui_channel, UiEventSender};
use tubedeck_lib::downloads::SectionVisibility;
use tubedeck_lib::{
    Download, DownloadEngine, EngineEvent, ExitReason, ShellConfig, ShellParts, Stage,
    TubeDeckError, TubeDeckResult, UiEvent, WindowLifecycleController,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Hide,
    BringToFront,
    Loading(bool),
    Sections(SectionVisibility),
    Page(Page),
    Chrome(ChromeState),
    Confirm,
    ReleaseBackdrop,
    Terminate(i32),
    TrayCreate,
    TrayTooltip(String),
    TrayRemove,
    Banner(String, BannerSeverity),
    Shell(String),
    StopAll,
    Dispose,
    Add(String),
}

type CallLog = Arc<Mutex<Vec<Call>>>;

struct FakeWindow(CallLog);

impl WindowShell for FakeWindow {
    fn hide(&mut self) {
        self.0.lock().push(Call::Hide);
    }

    fn bring_to_front(&mut self) {
        self.0.lock().push(Call::BringToFront);
    }

    fn set_loading(&mut self, loading: bool) {
        self.0.lock().push(Call::Loading(loading));
    }

    fn set_section_visibility(&mut self, visibility: SectionVisibility) {
        self.0.lock().push(Call::Sections(visibility));
    }

    fn show_page(&mut self, page: Page) {
        self.0.lock().push(Call::Page(page));
    }

    fn apply_chrome(&mut self, chrome: &ChromeState) {
        self.0.lock().push(Call::Chrome(*chrome));
    }

    fn request_close_confirmation(&mut self, _prompt: &ConfirmationPrompt) {
        self.0.lock().push(Call::Confirm);
    }

    fn release_backdrop(&mut self) -> TubeDeckResult<()> {
        self.0.lock().push(Call::ReleaseBackdrop);
        Ok(())
    }

    fn terminate(&mut self, exit_code: i32) {
        self.0.lock().push(Call::Terminate(exit_code));
    }
}

struct FakeTray(CallLog);

impl TrayBackend for FakeTray {
    fn create(&mut self, _spec: &TrayMenuSpec) -> TubeDeckResult<()> {
        self.0.lock().push(Call::TrayCreate);
        Ok(())
    }

    fn set_tooltip(&mut self, text: &str) -> TubeDeckResult<()> {
        self.0.lock().push(Call::TrayTooltip(text.to_string()));
        Ok(())
    }

    fn remove(&mut self) -> TubeDeckResult<()> {
        self.0.lock().push(Call::TrayRemove);
        Ok(())
    }
}

struct FakeNotifier(CallLog);

impl NotificationSink for FakeNotifier {
    fn show_banner(&mut self, message: &str, severity: BannerSeverity) {
        self.0.lock().push(Call::Banner(message.to_string(), severity));
    }

    fn show_shell(&mut self, notification: &ShellNotification) {
        self.0.lock().push(Call::Shell(notification.message.clone()));
    }
}

struct FakeEngine {
    log: CallLog,
    running: AtomicBool,
    background: AtomicBool,
    fail_startup: bool,
}

#[async_trait]
impl DownloadEngine for FakeEngine {
    async fn startup(&self) -> TubeDeckResult<()> {
        if self.fail_startup {
            return Err(TubeDeckError::EngineError("dependencies missing".into()));
        }
        Ok(())
    }

    fn are_downloads_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn run_in_background(&self) -> bool {
        self.background.load(Ordering::SeqCst)
    }

    fn stop_all_downloads(&self) {
        self.log.lock().push(Call::StopAll);
    }

    fn dispose(&self) {
        self.log.lock().push(Call::Dispose);
    }

    fn background_activity_report(&self) -> String {
        "1 download running".to_string()
    }

    fn add_download(&self, download: Download) {
        self.log.lock().push(Call::Add(download.filename));
    }
}

struct Harness {
    ui: UiEventSender,
    engine_tx: mpsc::UnboundedSender<EngineEvent>,
    engine: Arc<FakeEngine>,
    log: CallLog,
    handle: JoinHandle<ExitReason>,
}

impl Harness {
    fn start(running: bool, background: bool, fail_startup: bool) -> Self {
        let log = CallLog::default();
        let engine = Arc::new(FakeEngine {
            log: log.clone(),
            running: AtomicBool::new(running),
            background: AtomicBool::new(background),
            fail_startup,
        });
        let parts = ShellParts {
            window: Box::new(FakeWindow(log.clone())),
            tray: Box::new(FakeTray(log.clone())),
            notifications: Box::new(FakeNotifier(log.clone())),
        };
        let controller = WindowLifecycleController::new(ShellConfig::default(), engine.clone(), parts);

        let (ui, ui_rx) = ui_channel();
        let (engine_tx, engine_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(controller.run(ui_rx, engine_rx));

        Self {
            ui,
            engine_tx,
            engine,
            log,
            handle,
        }
    }

    fn ui(&self, event: UiEvent) {
        self.ui.send(event).unwrap();
    }

    fn engine(&self, event: EngineEvent) {
        self.engine_tx.send(event).unwrap();
    }

    fn calls(&self) -> Vec<Call> {
        self.log.lock().clone()
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.log.lock().iter().filter(|c| pred(c)).count()
    }

    /// Let the controller drain everything sent so far.
    async fn settle(&self) {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

fn teardown_calls(calls: &[Call]) -> Vec<Call> {
    calls
        .iter()
        .filter(|c| {
            matches!(
                c,
                Call::StopAll
                    | Call::TrayRemove
                    | Call::ReleaseBackdrop
                    | Call::Dispose
                    | Call::Terminate(_)
            )
        })
        .cloned()
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_idle_close_tears_down_in_order() {
    let h = Harness::start(false, false, false);
    h.settle().await;

    h.ui(UiEvent::CloseRequested);
    assert_eq!(h.handle.await.unwrap(), ExitReason::Closed);

    let log = h.log.lock().clone();
    assert_eq!(
        teardown_calls(&log),
        vec![Call::StopAll, Call::ReleaseBackdrop, Call::Dispose, Call::Terminate(0)]
    );
    let stop = log.iter().position(|c| *c == Call::StopAll).unwrap();
    let hide = log.iter().rposition(|c| *c == Call::Hide).unwrap();
    assert!(stop < hide);
}

#[tokio::test(start_paused = true)]
async fn test_startup_shows_loading_then_home() {
    let h = Harness::start(false, false, false);
    h.settle().await;

    let calls = h.calls();
    assert!(calls.contains(&Call::Page(Page::Home)));
    let on = calls.iter().position(|c| *c == Call::Loading(true)).unwrap();
    let off = calls.iter().position(|c| *c == Call::Loading(false)).unwrap();
    assert!(on < off);
    assert_eq!(h.count(|c| matches!(c, Call::Banner(..))), 0);

    drop(h.ui);
    assert_eq!(h.handle.await.unwrap(), ExitReason::WindowDestroyed);
}

#[tokio::test(start_paused = true)]
async fn test_startup_failure_shows_error_banner() {
    let h = Harness::start(false, false, true);
    h.settle().await;

    let calls = h.calls();
    assert!(calls.contains(&Call::Banner(
        "Engine error: dependencies missing".to_string(),
        BannerSeverity::Error
    )));
    assert!(calls.contains(&Call::Loading(false)));
}

#[tokio::test(start_paused = true)]
async fn test_running_downloads_need_confirmation() {
    let mut h = Harness::start(true, false, false);
    h.settle().await;

    h.ui(UiEvent::CloseRequested);
    h.ui(UiEvent::CloseRequested);
    h.settle().await;
    assert_eq!(h.count(|c| *c == Call::Confirm), 1);
    assert_eq!(h.count(|c| matches!(c, Call::Terminate(_))), 0);

    h.ui(UiEvent::CloseConfirmed(true));
    assert_eq!((&mut h.handle).await.unwrap(), ExitReason::ConfirmedClose);
    assert_eq!(h.count(|c| *c == Call::StopAll), 1);
    assert_eq!(h.count(|c| *c == Call::Dispose), 1);
}

#[tokio::test(start_paused = true)]
async fn test_declined_close_keeps_window_open() {
    let h = Harness::start(true, false, false);
    h.settle().await;

    h.ui(UiEvent::CloseRequested);
    h.settle().await;
    h.ui(UiEvent::CloseConfirmed(false));
    h.settle().await;
    assert!(!h.handle.is_finished());
    assert_eq!(h.count(|c| *c == Call::StopAll), 0);

    // Asks again on the next close.
    h.ui(UiEvent::CloseRequested);
    h.settle().await;
    assert_eq!(h.count(|c| *c == Call::Confirm), 2);

    h.engine.running.store(false, Ordering::SeqCst);
    h.ui(UiEvent::CloseConfirmed(false));
    h.ui(UiEvent::CloseRequested);
    assert_eq!(h.handle.await.unwrap(), ExitReason::Closed);
}

#[tokio::test(start_paused = true)]
async fn test_background_close_hides_and_tray_quits() {
    let mut h = Harness::start(true, true, false);
    h.settle().await;
    assert_eq!(h.count(|c| *c == Call::TrayCreate), 1);

    h.ui(UiEvent::CloseRequested);
    h.settle().await;
    assert_eq!(h.count(|c| *c == Call::Hide), 1);
    assert_eq!(h.count(|c| *c == Call::Confirm), 0);
    assert!(!h.handle.is_finished());

    h.ui(TrayMenuAction::Open.into());
    h.settle().await;
    assert_eq!(h.count(|c| *c == Call::BringToFront), 1);

    h.ui(TrayMenuAction::Quit.into());
    assert_eq!((&mut h.handle).await.unwrap(), ExitReason::TrayQuit);
    assert_eq!(
        teardown_calls(&h.calls()),
        vec![
            Call::StopAll,
            Call::TrayRemove,
            Call::ReleaseBackdrop,
            Call::Dispose,
            Call::Terminate(0)
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_tray_tooltip_follows_activity() {
    let h = Harness::start(true, true, false);
    tokio::time::sleep(Duration::from_millis(3500)).await;

    let tooltips = h.count(|c| *c == Call::TrayTooltip("1 download running".to_string()));
    assert!(tooltips >= 3, "expected at least 3 refreshes, got {}", tooltips);

    // Turning background mode off removes the icon and stops refreshing.
    h.engine.background.store(false, Ordering::SeqCst);
    h.engine(EngineEvent::BackgroundModeChanged);
    h.settle().await;
    assert_eq!(h.count(|c| *c == Call::TrayRemove), 1);

    let before = h.count(|c| matches!(c, Call::TrayTooltip(_)));
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(h.count(|c| matches!(c, Call::TrayTooltip(_))), before);
}

#[tokio::test(start_paused = true)]
async fn test_completion_notifies_only_when_unfocused() {
    let h = Harness::start(false, false, false);
    h.settle().await;

    let first = Download::queued("talk.mp4");
    h.engine(EngineEvent::DownloadCreated(first.clone()));
    h.engine(EngineEvent::StageChanged(first.clone().with_stage(Stage::Completed)));
    h.settle().await;
    assert_eq!(h.count(|c| matches!(c, Call::Shell(_))), 0);

    h.ui(UiEvent::Activated(false));
    h.settle().await;
    let second = Download::queued("song.mp3");
    h.engine(EngineEvent::DownloadCreated(second.clone()));
    h.engine(EngineEvent::StageChanged(second.clone().with_stage(Stage::Downloading)));
    h.engine(EngineEvent::StageChanged(second.with_stage(Stage::Completed)));
    h.settle().await;

    let shells: Vec<Call> = h
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Shell(_)))
        .collect();
    assert_eq!(shells.len(), 1);
    assert!(matches!(&shells[0], Call::Shell(msg) if msg.contains("song.mp3")));

    let last_sections = h
        .calls()
        .into_iter()
        .rev()
        .find_map(|c| match c {
            Call::Sections(v) => Some(v),
            _ => None,
        })
        .unwrap();
    assert!(last_sections.completed);
    assert!(!last_sections.queued);
    assert!(!last_sections.downloading);
}

#[tokio::test(start_paused = true)]
async fn test_engine_notifications_become_banners() {
    let h = Harness::start(false, false, false);
    h.settle().await;

    h.engine(EngineEvent::NotificationSent {
        message: "Update available".to_string(),
        severity: tubedeck_lib::app::notifications::NotificationSeverity::Informational,
    });
    h.settle().await;
    assert!(h.calls().contains(&Call::Banner(
        "Update available".to_string(),
        BannerSeverity::Informational
    )));
}

#[tokio::test(start_paused = true)]
async fn test_added_downloads_switch_to_downloads_page() {
    let h = Harness::start(false, false, false);
    h.settle().await;

    h.ui(UiEvent::DownloadsAdded(vec![
        Download::queued("a.mp4"),
        Download::queued("b.mp4"),
    ]));
    h.settle().await;

    let calls = h.calls();
    let page = calls
        .iter()
        .position(|c| *c == Call::Page(Page::Downloads))
        .unwrap();
    let first_add = calls
        .iter()
        .position(|c| *c == Call::Add("a.mp4".to_string()))
        .unwrap();
    assert!(page < first_add);
    assert!(calls.contains(&Call::Add("b.mp4".to_string())));
}

#[tokio::test(start_paused = true)]
async fn test_focus_changes_update_chrome() {
    let h = Harness::start(false, false, false);
    h.settle().await;

    h.ui(UiEvent::Activated(false));
    h.settle().await;

    let chrome = h
        .calls()
        .into_iter()
        .rev()
        .find_map(|c| match c {
            Call::Chrome(chrome) => Some(chrome),
            _ => None,
        })
        .unwrap();
    assert!(!chrome.active);
    assert!(!chrome.backdrop.input_active);
}
