//! Modal loading notice shown while a request is in flight.

use std::time::{SystemTime, UNIX_EPOCH};

use ratatui::layout::Alignment;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect_exact;
use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Render the loading notice, if one is showing.
pub fn render(frame: &mut Frame, app: &App) {
    let Some(message) = app.controller.notifier().loading_message() else {
        return;
    };
    let theme = current_theme();

    let frame_idx = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_millis() / 100) as usize % SPINNER.len())
        .unwrap_or(0);

    let width = (message.chars().count() as u16 + 10).max(30);
    let area = centered_rect_exact(width, 5, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(i18n::tui_loading_title())
        .style(theme.popup);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} ", SPINNER[frame_idx]), theme.key_hint),
            Span::styled(message.to_string(), theme.popup),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
