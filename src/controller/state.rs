//! Form state owned by the [`Controller`](super::Controller).

use std::time::Duration;

use crate::model::input::{FilePayload, PendingInput};
use crate::model::result::ClassificationResult;

use super::view::ResultView;

/// Which input form is in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputTab {
    #[default]
    File,
    Text,
}

impl InputTab {
    pub fn toggle(self) -> Self {
        match self {
            Self::File => Self::Text,
            Self::Text => Self::File,
        }
    }
}

/// Where the current submission stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    InFlight,
}

/// Visibility of the result panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultPanel {
    #[default]
    Hidden,
    Revealed,
}

/// Presentation side effects the front end carries out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEffect {
    /// Start the result panel's entrance.
    RevealResults,
    ScrollResultsIntoView,
    ScrollToTop,
    FocusTextInput,
    ScrollTextInputIntoView,
}

/// A [`ViewEffect`] due `delay` after it was queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEffect {
    pub effect: ViewEffect,
    pub delay: Duration,
}

impl ScheduledEffect {
    pub fn now(effect: ViewEffect) -> Self {
        Self {
            effect,
            delay: Duration::ZERO,
        }
    }

    pub fn after(effect: ViewEffect, delay: Duration) -> Self {
        Self { effect, delay }
    }
}

/// Everything the front end needs to draw the form.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub active_tab: InputTab,
    /// Contents of the text form, exactly as typed.
    pub text_input: String,
    /// The one staged input, if any. Taken when submitted.
    pub active_input: Option<PendingInput>,
    pub request_status: RequestStatus,
    pub last_result: Option<ClassificationResult>,
    /// Message of the last failed request or rejected input.
    pub last_error: Option<String>,
    pub result_panel: ResultPanel,
    pub(crate) effects: Vec<ScheduledEffect>,
}

impl UiState {
    pub fn is_busy(&self) -> bool {
        self.request_status == RequestStatus::InFlight
    }

    /// The staged file, if the staged input is a file.
    pub fn selected_file(&self) -> Option<&FilePayload> {
        match &self.active_input {
            Some(PendingInput::File(file)) => Some(file),
            _ => None,
        }
    }

    /// `"<name> (<size>)"` of the staged file.
    pub fn file_label(&self) -> Option<String> {
        self.selected_file().map(FilePayload::label)
    }

    /// Render model for the result panel, when it is showing.
    pub fn result_view(&self) -> Option<ResultView> {
        match (self.result_panel, &self.last_result) {
            (ResultPanel::Revealed, Some(result)) => Some(ResultView::from_result(result)),
            _ => None,
        }
    }

    /// Effects queued since the last call, in order.
    pub fn take_effects(&mut self) -> Vec<ScheduledEffect> {
        std::mem::take(&mut self.effects)
    }

    pub(crate) fn schedule(&mut self, effect: ScheduledEffect) {
        self.effects.push(effect);
    }
}
