//! Result panel: category badge, suggested response, counts and reasoning.

use std::time::Instant;

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::controller::{BadgeStyle, ResultView};
use crate::i18n;
use crate::tui::app::{App, PanelFocus};
use crate::tui::theme::current_theme;

/// Render the result panel. Does nothing while the panel is hidden.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(view) = app.controller.state().result_view() else {
        return;
    };
    let theme = current_theme();

    let border_style = if app.is_entering(Instant::now()) {
        theme.border_entering
    } else if app.focus == PanelFocus::Results {
        theme.border_focused
    } else {
        theme.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(i18n::tui_results_title());
    let inner = block.inner(area);
    app.result_view_height = inner.height;
    frame.render_widget(block, area);

    let paragraph = Paragraph::new(build_lines(&view))
        .wrap(Wrap { trim: false })
        .scroll((app.result_scroll, 0));
    frame.render_widget(paragraph, inner);
}

fn build_lines(view: &ResultView) -> Vec<Line<'static>> {
    let theme = current_theme();
    let badge_style = match view.badge_style {
        BadgeStyle::Emphasis => theme.badge_emphasis,
        BadgeStyle::Neutral => theme.badge_neutral,
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{}: ", i18n::lbl_category()), theme.label),
            Span::styled(format!(" {} ", view.badge), badge_style),
        ]),
        Line::from(vec![
            Span::styled(format!("{}: ", i18n::lbl_char_count()), theme.label),
            Span::styled(view.char_count.clone(), theme.value),
            Span::styled(format!("   {}: ", i18n::lbl_word_count()), theme.label),
            Span::styled(view.word_count.clone(), theme.value),
        ]),
    ];
    if let Some(name) = &view.filename {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", i18n::lbl_file()), theme.label),
            Span::styled(name.clone(), theme.value),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("{}:", i18n::lbl_suggested_response()),
        theme.label,
    )));
    for line in view.suggested_response.lines() {
        lines.push(Line::from(Span::styled(line.to_string(), theme.body)));
    }

    if let Some(reasoning) = &view.reasoning {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{}:", i18n::lbl_reasoning()),
            theme.label,
        )));
        for line in reasoning.lines() {
            lines.push(Line::from(Span::styled(line.to_string(), theme.help_dim)));
        }
    }

    lines
}
