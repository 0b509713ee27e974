//! Popup for typing the path of the file to analyze.

use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect_exact;
use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Render the path prompt, if open.
pub fn render(frame: &mut Frame, app: &App) {
    let Some(input) = app.path_prompt.as_deref() else {
        return;
    };
    let theme = current_theme();
    let screen = frame.area();

    let width = (screen.width * 70 / 100)
        .max(40)
        .min(screen.width.saturating_sub(4));
    let area = centered_rect_exact(width, 6, screen);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(i18n::tui_path_prompt_title())
        .style(theme.popup);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Show the tail of long paths
    let avail = inner.width.saturating_sub(4) as usize;
    let count = input.chars().count();
    let shown: String = if count > avail {
        input.chars().skip(count - avail).collect()
    } else {
        input.to_string()
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" > ", theme.key_hint),
            Span::styled(shown, theme.value),
            Span::styled("\u{258f}", theme.key_hint),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", i18n::tui_path_footer()),
            theme.help_dim,
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
