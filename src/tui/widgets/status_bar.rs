//! Bottom status bar showing the current toast or context-sensitive keyboard hints.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::controller::InputTab;
use crate::i18n;
use crate::notify::NoticeKind;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Version string shown at the right edge of the status bar.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render the status bar at the bottom with a toast or hints, and the version.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();

    let version_text = format!("v{VERSION} ");
    let version_width = version_text.len() as u16;

    // Split: hints (flexible) | version (fixed)
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(version_width)])
        .split(area);

    let content = if let Some(toast) = app.controller.notifier().toast() {
        let style = match toast.kind {
            NoticeKind::Error => theme.toast_error,
            _ => theme.toast_success,
        };
        Line::from(Span::styled(format!(" {}", toast.message), style))
    } else {
        let mut spans = Vec::new();
        for (i, (key, desc)) in build_hints(app).iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ", theme.status_bar));
            }
            spans.push(Span::styled(format!(" {key}"), theme.key_hint));
            spans.push(Span::styled(format!(":{desc}"), theme.status_bar));
        }
        Line::from(spans)
    };

    let bar = Paragraph::new(content).style(theme.status_bar);
    frame.render_widget(bar, chunks[0]);

    let version = Paragraph::new(Line::from(Span::styled(version_text, theme.border)))
        .alignment(Alignment::Right)
        .style(theme.status_bar);
    frame.render_widget(version, chunks[1]);
}

/// Return context-sensitive hint pairs (key, description).
fn build_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.is_busy() {
        return vec![("Ctrl-C", i18n::tui_hint_quit())];
    }
    if app.editing {
        return vec![
            ("Esc", i18n::tui_hint_done()),
            ("Ctrl-S", i18n::tui_hint_submit()),
        ];
    }

    let state = app.controller.state();
    let mut hints = vec![("Tab", i18n::tui_hint_tab())];
    match state.active_tab {
        InputTab::File => {
            hints.push(("o", i18n::tui_hint_open()));
            if state.selected_file().is_some() {
                hints.push(("x", i18n::tui_hint_clear()));
            }
        }
        InputTab::Text => hints.push(("Enter", i18n::tui_hint_edit())),
    }
    hints.push(("Ctrl-S", i18n::tui_hint_submit()));
    hints.push(("p/u", i18n::tui_hint_examples()));
    if state.result_view().is_some() {
        hints.push(("c", i18n::tui_hint_copy()));
        hints.push(("n", i18n::tui_hint_another()));
    }
    hints.push(("?", i18n::tui_hint_help()));
    hints.push(("q", i18n::tui_hint_quit()));
    hints
}
