//! Global application state for the TUI (the "Model" in Elm architecture).

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::controller::{Controller, InputTab, ViewEffect};
use crate::error::RequestError;
use crate::model::result::ClassificationResult;
use crate::notify::NoticeBoard;

/// Outcome of a request, sent back from the runtime.
pub type Outcome = Result<ClassificationResult, RequestError>;

/// How long the result panel border stays highlighted after it appears.
pub const ENTRANCE: Duration = Duration::from_millis(600);

/// Which panel receives scroll keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFocus {
    Input,
    Results,
}

/// Complete TUI state.
pub struct App {
    // ── Form ──────────────────────────────────
    pub controller: Controller<NoticeBoard>,
    /// `host:port` of the service, for the header.
    pub server_label: String,

    // ── Requests ──────────────────────────────
    runtime: Handle,
    outcome_tx: UnboundedSender<Outcome>,
    outcome_rx: UnboundedReceiver<Outcome>,
    /// View effects waiting for their due time.
    scheduled: Vec<(Instant, ViewEffect)>,

    // ── UI state ──────────────────────────────
    pub focus: PanelFocus,
    /// Keys go to the text editor.
    pub editing: bool,
    /// Path being typed in the open-file prompt.
    pub path_prompt: Option<String>,
    pub show_help: bool,
    pub input_scroll: u16,
    pub result_scroll: u16,
    /// Set during render.
    pub result_view_height: u16,
    /// When the result panel appeared.
    pub revealed_at: Option<Instant>,

    // ── Lifecycle ─────────────────────────────
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: Controller<NoticeBoard>, runtime: Handle, server_label: String) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            server_label,
            runtime,
            outcome_tx,
            outcome_rx,
            scheduled: Vec::new(),
            focus: PanelFocus::Input,
            editing: false,
            path_prompt: None,
            show_help: false,
            input_scroll: 0,
            result_scroll: 0,
            result_view_height: 0,
            revealed_at: None,
            should_quit: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    /// Submit the active tab. The request runs on the runtime and its
    /// outcome is applied by [`App::tick`].
    pub fn submit(&mut self) {
        let pending = match self.controller.begin_submission() {
            Ok(pending) => pending,
            Err(e) => {
                tracing::debug!(error = %e, "Submission not started");
                return;
            }
        };
        self.editing = false;
        let classifier = self.controller.classifier();
        let tx = self.outcome_tx.clone();
        self.runtime.spawn(async move {
            let outcome = classifier.classify(pending).await;
            // The receiver only goes away when the UI is shutting down.
            let _ = tx.send(outcome);
        });
    }

    pub fn open_path_prompt(&mut self) {
        self.controller.switch_tab(InputTab::File);
        self.path_prompt = Some(String::new());
    }

    /// Load the path typed in the prompt. The prompt closes either way.
    pub fn confirm_path_prompt(&mut self) {
        let Some(raw) = self.path_prompt.take() else {
            return;
        };
        if let Some(path) = normalize_dropped_path(&raw) {
            self.select_path(&path);
        }
    }

    fn select_path(&mut self, path: &Path) {
        self.controller.switch_tab(InputTab::File);
        if let Err(e) = self.controller.select_path(path) {
            tracing::debug!(path = %path.display(), error = %e, "File not staged");
        }
    }

    /// Bracketed paste. Terminals deliver dropped files this way.
    pub fn handle_paste(&mut self, text: &str) {
        if self.is_busy() {
            return;
        }
        if let Some(prompt) = self.path_prompt.as_mut() {
            prompt.push_str(text.trim_end_matches(['\r', '\n']));
            return;
        }
        if self.editing {
            let text = text.replace("\r\n", "\n").replace('\r', "\n");
            self.controller.edit_text(|buf| buf.push_str(&text));
            return;
        }
        match normalize_dropped_path(text) {
            Some(path) if path.is_file() => self.select_path(&path),
            _ if self.controller.state().active_tab == InputTab::Text => {
                let text = text.replace("\r\n", "\n");
                self.controller.edit_text(|buf| buf.push_str(&text));
            }
            _ => tracing::debug!("Ignoring paste that is not a file path"),
        }
    }

    pub fn scroll_result(&mut self, delta: i32) {
        if self.controller.state().result_view().is_none() {
            return;
        }
        self.focus = PanelFocus::Results;
        self.result_scroll = if delta < 0 {
            self.result_scroll.saturating_sub(delta.unsigned_abs() as u16)
        } else {
            self.result_scroll.saturating_add(delta as u16)
        };
    }

    /// Whether the result panel is still in its entrance.
    pub fn is_entering(&self, now: Instant) -> bool {
        self.revealed_at
            .is_some_and(|at| now.duration_since(at) < ENTRANCE)
    }

    /// Periodic housekeeping: apply finished requests, fire due effects,
    /// expire toasts.
    pub fn tick(&mut self, now: Instant) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            // Failures are already on the notice board.
            let _ = self.controller.finish_submission(outcome);
        }

        let batch = self.controller.take_effects();
        // A reveal or a reset starts a new view; effects queued for the old one are stale.
        if batch.iter().any(|s| {
            matches!(s.effect, ViewEffect::RevealResults | ViewEffect::ScrollToTop)
        }) {
            self.scheduled.clear();
        }
        for scheduled in batch {
            self.scheduled
                .push((now + scheduled.delay, scheduled.effect));
        }

        let (due, later): (Vec<_>, Vec<_>) = std::mem::take(&mut self.scheduled)
            .into_iter()
            .partition(|(at, _)| *at <= now);
        self.scheduled = later;
        for (_, effect) in due {
            self.apply_effect(effect, now);
        }

        self.controller.notifier_mut().expire(now);
    }

    fn apply_effect(&mut self, effect: ViewEffect, now: Instant) {
        tracing::trace!(?effect, "Applying view effect");
        match effect {
            ViewEffect::RevealResults => {
                self.revealed_at = Some(now);
                self.result_scroll = 0;
            }
            ViewEffect::ScrollResultsIntoView => {
                self.focus = PanelFocus::Results;
                self.result_scroll = 0;
            }
            ViewEffect::ScrollToTop => {
                self.focus = PanelFocus::Input;
                self.editing = false;
                self.input_scroll = 0;
                self.result_scroll = 0;
                self.revealed_at = None;
            }
            ViewEffect::FocusTextInput => {
                self.focus = PanelFocus::Input;
                self.editing = true;
            }
            ViewEffect::ScrollTextInputIntoView => {
                self.focus = PanelFocus::Input;
                self.input_scroll = 0;
            }
        }
    }
}

/// Turn pasted or typed text into a file path.
///
/// Strips surrounding quotes, a `file://` scheme and the backslash escapes
/// some terminals put before spaces.
pub fn normalize_dropped_path(raw: &str) -> Option<PathBuf> {
    let mut s = raw.trim();
    if s.contains('\n') {
        return None;
    }
    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            s = &s[1..s.len() - 1];
        }
    }
    if s.is_empty() {
        return None;
    }
    if s.starts_with("file://") {
        return url::Url::parse(s).ok()?.to_file_path().ok();
    }
    Some(PathBuf::from(s.replace("\\ ", " ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Classifier;
    use crate::clipboard::{ClipboardChain, SelectionCopier};
    use crate::controller::ControllerSettings;
    use crate::error::ClipboardError;
    use crate::model::input::PendingInput;
    use crate::model::result::{Category, HealthStatus};
    use crate::model::sample::SampleKind;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct EchoClassifier;

    #[async_trait]
    impl Classifier for EchoClassifier {
        async fn classify(&self, input: PendingInput) -> Result<ClassificationResult, RequestError> {
            let filename = match input {
                PendingInput::File(file) => Some(file.name),
                PendingInput::Text(_) => None,
            };
            Ok(ClassificationResult {
                category: Category::Productive,
                suggested_response: "Ok".to_string(),
                char_count: 10,
                word_count: 2,
                reasoning: None,
                filename,
            })
        }

        async fn health(&self) -> Result<HealthStatus, RequestError> {
            unreachable!()
        }
    }

    struct NoCopy;

    impl SelectionCopier for NoCopy {
        fn copy_selection(&self, _scratch: &Path) -> Result<(), ClipboardError> {
            Err(ClipboardError::Fallback("none".to_string()))
        }
    }

    fn app(rt: &tokio::runtime::Runtime) -> App {
        let controller = Controller::new(
            ControllerSettings::default(),
            Arc::new(EchoClassifier),
            NoticeBoard::new(Duration::from_secs(5)),
            ClipboardChain::new(None, Box::new(NoCopy)),
        );
        App::new(controller, rt.handle().clone(), "localhost:5000".to_string())
    }

    fn wait_until_idle(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.is_busy() {
            assert!(Instant::now() < deadline, "request never finished");
            std::thread::sleep(Duration::from_millis(10));
            app.tick(Instant::now());
        }
    }

    #[test]
    fn test_normalize_dropped_path() {
        assert_eq!(
            normalize_dropped_path("  '/tmp/my mail.txt' \n"),
            Some(PathBuf::from("/tmp/my mail.txt"))
        );
        assert_eq!(
            normalize_dropped_path("/tmp/my\\ mail.txt"),
            Some(PathBuf::from("/tmp/my mail.txt"))
        );
        assert_eq!(normalize_dropped_path("   "), None);
        assert_eq!(normalize_dropped_path("line one\nline two"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_file_url() {
        assert_eq!(
            normalize_dropped_path("file:///tmp/caixa%20de%20entrada.pdf"),
            Some(PathBuf::from("/tmp/caixa de entrada.pdf"))
        );
    }

    #[test]
    fn test_submit_applies_outcome_on_tick() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt);
        app.controller.load_example(SampleKind::Produtivo);
        app.editing = true;
        app.submit();
        assert!(app.is_busy());
        assert!(!app.editing);
        assert!(app.controller.notifier().is_loading());

        wait_until_idle(&mut app);
        assert!(!app.controller.notifier().is_loading());
        assert!(app.controller.state().result_view().is_some());
        assert!(app.revealed_at.is_some());
    }

    #[test]
    fn test_effects_fire_when_due() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt);
        let start = Instant::now();
        app.controller.load_example(SampleKind::Improdutivo);
        app.tick(start);
        assert!(!app.editing);
        app.tick(start + Duration::from_millis(200));
        assert!(app.editing);
    }

    #[test]
    fn test_reset_cancels_pending_result_scroll() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt);
        app.controller.load_example(SampleKind::Produtivo);
        app.submit();
        wait_until_idle(&mut app);
        assert!(app.revealed_at.is_some());

        // "n" right away, before the 300 ms scroll is due
        app.controller.analyze_another();
        let now = Instant::now();
        app.tick(now);
        app.tick(now + Duration::from_secs(1));
        assert_eq!(app.focus, PanelFocus::Input);
        assert!(app.revealed_at.is_none());
    }

    #[test]
    fn test_reveal_keeps_its_own_scroll() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt);
        app.controller.load_example(SampleKind::Produtivo);
        app.submit();
        wait_until_idle(&mut app);
        app.tick(Instant::now() + Duration::from_secs(1));
        assert_eq!(app.focus, PanelFocus::Results);
    }

    #[test]
    fn test_paste_of_file_path_stages_file() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("email.txt");
        std::fs::write(&path, "Olá, preciso de ajuda.").unwrap();

        app.controller.switch_tab(InputTab::Text);
        app.handle_paste(&format!("'{}'", path.display()));
        let state = app.controller.state();
        assert_eq!(state.active_tab, InputTab::File);
        assert_eq!(state.selected_file().map(|f| f.name.as_str()), Some("email.txt"));
        assert!(state.text_input.is_empty());
    }

    #[test]
    fn test_paste_of_plain_text_goes_to_text_tab() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt);
        app.controller.switch_tab(InputTab::Text);
        app.handle_paste("Bom dia,\r\nsegue o relatório.");
        assert_eq!(
            app.controller.state().text_input,
            "Bom dia,\nsegue o relatório."
        );
    }
}
