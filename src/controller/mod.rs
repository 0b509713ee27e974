//! Form controller.
//!
//! Owns the [`UiState`] and applies user actions to it: staging input,
//! submitting, showing results, copying, resetting and loading examples.
//! Front ends (the terminal UI and the one-shot CLI commands) only forward
//! actions and draw the state. Notices, the clipboard and the service are
//! injected, so everything here runs headless in tests.

pub mod state;
pub mod view;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::client::Classifier;
use crate::clipboard::{ClipboardChain, CopyOutcome};
use crate::config::Config;
use crate::error::{ClassifyError, RequestError, Result, ValidationError};
use crate::i18n;
use crate::model::input::{self, FilePayload, InputLimits, PendingInput};
use crate::model::result::ClassificationResult;
use crate::model::sample::SampleKind;
use crate::notify::{NoticeKind, Notifier};

pub use self::state::{
    InputTab, RequestStatus, ResultPanel, ScheduledEffect, UiState, ViewEffect,
};
pub use self::view::{BadgeStyle, ResultView};

/// Tunables the controller needs from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    pub limits: InputLimits,
    pub result_scroll_delay: Duration,
    pub example_focus_delay: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ControllerSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            limits: InputLimits::from(&cfg.limits),
            result_scroll_delay: Duration::from_millis(cfg.ui.result_scroll_delay_ms),
            example_focus_delay: Duration::from_millis(cfg.ui.example_focus_delay_ms),
        }
    }
}

/// State reducer for the classification form.
pub struct Controller<N: Notifier> {
    state: UiState,
    settings: ControllerSettings,
    classifier: Arc<dyn Classifier>,
    notifier: N,
    clipboard: ClipboardChain,
}

impl<N: Notifier> Controller<N> {
    pub fn new(
        settings: ControllerSettings,
        classifier: Arc<dyn Classifier>,
        notifier: N,
        clipboard: ClipboardChain,
    ) -> Self {
        Self {
            state: UiState::default(),
            settings,
            classifier,
            notifier,
            clipboard,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Shared handle to the service, for running a request off the UI thread.
    pub fn classifier(&self) -> Arc<dyn Classifier> {
        Arc::clone(&self.classifier)
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Effects queued since the last call.
    pub fn take_effects(&mut self) -> Vec<ScheduledEffect> {
        self.state.take_effects()
    }

    // ── Input ───────────────────────────────────────────────────

    pub fn switch_tab(&mut self, tab: InputTab) {
        if self.is_busy() {
            return;
        }
        self.state.active_tab = tab;
    }

    /// Replace the text form contents.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.is_busy() {
            return;
        }
        self.state.text_input = text.into();
    }

    /// Edit the text form contents in place.
    pub fn edit_text(&mut self, edit: impl FnOnce(&mut String)) {
        if self.is_busy() {
            return;
        }
        edit(&mut self.state.text_input);
    }

    /// Stage a file. A rejected file leaves the staged input untouched.
    pub fn select_file(&mut self, file: FilePayload) -> Result<()> {
        if self.is_busy() {
            return Err(ClassifyError::Busy);
        }
        if let Err(e) = input::validate_file(
            &file.name,
            &file.mime_type,
            file.size_bytes,
            &self.settings.limits,
        ) {
            return Err(self.reject(e));
        }
        tracing::info!(file = %file.name, size = file.size_bytes, "File selected");
        self.state.active_input = Some(PendingInput::File(file));
        self.state.last_error = None;
        Ok(())
    }

    /// Read a file from disk and stage it.
    pub fn select_path(&mut self, path: &Path) -> Result<()> {
        if self.is_busy() {
            return Err(ClassifyError::Busy);
        }
        match input::read_file(path, &self.settings.limits) {
            Ok(file) => self.select_file(file),
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Drop the staged file.
    pub fn clear_file(&mut self) {
        if self.is_busy() {
            return;
        }
        if self.state.selected_file().is_some() {
            self.state.active_input = None;
        }
    }

    fn reject(&mut self, error: ValidationError) -> ClassifyError {
        let message = error.to_string();
        tracing::info!(%message, "Input rejected");
        self.notifier.show(NoticeKind::Error, &message);
        self.state.last_error = Some(message);
        error.into()
    }

    // ── Submission ──────────────────────────────────────────────

    /// Start submitting whatever the front tab holds.
    pub fn begin_submission(&mut self) -> Result<PendingInput> {
        match self.state.active_tab {
            InputTab::File => self.begin_file_submission(),
            InputTab::Text => self.begin_text_submission(),
        }
    }

    /// Take the staged file for submission.
    pub fn begin_file_submission(&mut self) -> Result<PendingInput> {
        if self.is_busy() {
            return Err(ClassifyError::Busy);
        }
        match self.state.active_input.take() {
            Some(PendingInput::File(file)) => {
                let pending = PendingInput::File(file);
                self.enter_flight(&pending);
                Ok(pending)
            }
            other => {
                self.state.active_input = other;
                Err(self.reject(ValidationError::NoFileSelected))
            }
        }
    }

    /// Validate the text form and take it for submission.
    pub fn begin_text_submission(&mut self) -> Result<PendingInput> {
        if self.is_busy() {
            return Err(ClassifyError::Busy);
        }
        let payload = match input::validate_text(&self.state.text_input, &self.settings.limits) {
            Ok(payload) => payload,
            Err(e) => return Err(self.reject(e)),
        };
        // The text replaces any staged file as the one active input.
        self.state.active_input = None;
        let pending = PendingInput::Text(payload);
        self.enter_flight(&pending);
        Ok(pending)
    }

    fn enter_flight(&mut self, pending: &PendingInput) {
        tracing::debug!(input = %pending.describe(), "Submission started");
        self.notifier.show(NoticeKind::Loading, i18n::msg_analyzing());
        self.state.result_panel = ResultPanel::Hidden;
        self.state.last_result = None;
        self.state.last_error = None;
        self.state.request_status = RequestStatus::InFlight;
    }

    /// Apply the outcome of the request started by a `begin_*` call.
    pub fn finish_submission(
        &mut self,
        outcome: std::result::Result<ClassificationResult, RequestError>,
    ) -> Result<()> {
        if !self.is_busy() {
            tracing::warn!("Submission finished with no request in flight");
        }
        self.notifier.hide(NoticeKind::Loading);
        self.state.request_status = RequestStatus::Idle;

        match outcome {
            Ok(result) => {
                tracing::info!(category = %result.category, "Email classified");
                self.state.last_result = Some(result);
                self.state.result_panel = ResultPanel::Revealed;
                self.state.schedule(ScheduledEffect::now(ViewEffect::RevealResults));
                self.state.schedule(ScheduledEffect::after(
                    ViewEffect::ScrollResultsIntoView,
                    self.settings.result_scroll_delay,
                ));
                self.notifier.show(NoticeKind::Success, i18n::msg_analyzed());
                Ok(())
            }
            Err(e) => {
                let message = e.user_message();
                tracing::error!(error = %e, "Classification failed");
                self.notifier.show(NoticeKind::Error, &message);
                self.state.last_error = Some(message);
                Err(e.into())
            }
        }
    }

    /// Submit the front tab's input and wait for the result.
    pub async fn submit(&mut self) -> Result<()> {
        let pending = self.begin_submission()?;
        self.run(pending).await
    }

    /// Submit the text form and wait for the result.
    pub async fn submit_text(&mut self) -> Result<()> {
        let pending = self.begin_text_submission()?;
        self.run(pending).await
    }

    /// Submit the staged file and wait for the result.
    pub async fn submit_file(&mut self) -> Result<()> {
        let pending = self.begin_file_submission()?;
        self.run(pending).await
    }

    async fn run(&mut self, pending: PendingInput) -> Result<()> {
        let classifier = self.classifier();
        let outcome = classifier.classify(pending).await;
        self.finish_submission(outcome)
    }

    // ── Result actions ──────────────────────────────────────────

    /// Copy the suggested response of the result on screen.
    pub fn copy_response(&mut self) -> Result<CopyOutcome> {
        if self.is_busy() {
            return Err(ClassifyError::Busy);
        }
        let Some(view) = self.state.result_view() else {
            self.notifier.show(NoticeKind::Error, i18n::err_nothing_to_copy());
            return Err(ClassifyError::NothingToCopy);
        };
        let outcome = self.clipboard.copy(&view.suggested_response);
        match outcome {
            CopyOutcome::Copied(via) => {
                tracing::debug!(?via, "Suggested response copied");
                self.notifier.show(NoticeKind::Success, i18n::msg_copied());
            }
            CopyOutcome::NeedsManualSelection => {
                self.notifier.show(NoticeKind::Error, i18n::err_copy_failed());
            }
        }
        Ok(outcome)
    }

    /// Clear both forms and the result, and go back to the top.
    pub fn analyze_another(&mut self) {
        if self.is_busy() {
            return;
        }
        self.state.result_panel = ResultPanel::Hidden;
        self.state.last_result = None;
        self.state.last_error = None;
        self.state.active_input = None;
        self.state.text_input.clear();
        self.state.schedule(ScheduledEffect::now(ViewEffect::ScrollToTop));
    }

    /// Fill the text form with a built-in sample.
    pub fn load_example(&mut self, kind: SampleKind) {
        if self.is_busy() {
            return;
        }
        tracing::debug!(example = kind.name(), "Loading example");
        self.state.active_tab = InputTab::Text;
        self.state.text_input = kind.text().to_string();
        let delay = self.settings.example_focus_delay;
        self.state
            .schedule(ScheduledEffect::after(ViewEffect::FocusTextInput, delay));
        self.state.schedule(ScheduledEffect::after(
            ViewEffect::ScrollTextInputIntoView,
            delay,
        ));
    }
}
