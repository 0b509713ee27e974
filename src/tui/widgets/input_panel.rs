//! Input panel: File / Text tabs and the active form.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use crate::controller::InputTab;
use crate::format::{format_file_size, format_number};
use crate::i18n;
use crate::tui::app::{App, PanelFocus};
use crate::tui::theme::{current_theme, Theme};

/// Lines of a `.txt` file shown under its label.
const PREVIEW_LINES: usize = 12;

/// Render the input panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();
    let state = app.controller.state();

    let border_style = if app.editing || app.focus == PanelFocus::Input {
        theme.border_focused
    } else {
        theme.border
    };
    let mut title = i18n::tui_input_title().to_string();
    if app.editing {
        title.push_str(i18n::tui_editing());
        title.push(' ');
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let selected = match state.active_tab {
        InputTab::File => 0,
        InputTab::Text => 1,
    };
    let tabs = Tabs::new(vec![i18n::tui_tab_file(), i18n::tui_tab_text()])
        .select(selected)
        .style(theme.tab_inactive)
        .highlight_style(theme.tab_active)
        .divider("|");
    frame.render_widget(tabs, split[0]);

    match state.active_tab {
        InputTab::File => render_file_form(frame, app, split[1], &theme),
        InputTab::Text => render_text_form(frame, app, split[1], &theme),
    }
}

fn render_file_form(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let state = app.controller.state();
    let max = app.controller.settings().limits.max_upload_bytes;

    let mut lines: Vec<Line> = Vec::new();
    match state.selected_file() {
        Some(file) => {
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", i18n::lbl_file()), theme.label),
                Span::styled(file.label(), theme.value),
            ]));
            lines.push(Line::from(""));
            match file.preview(PREVIEW_LINES) {
                Some(preview) => {
                    lines.push(Line::from(Span::styled(
                        format!("{}:", i18n::tui_preview()),
                        theme.label,
                    )));
                    for line in preview.lines() {
                        lines.push(Line::from(Span::styled(line.to_string(), theme.body)));
                    }
                }
                None => lines.push(Line::from(Span::styled(
                    i18n::tui_no_preview(),
                    theme.placeholder,
                ))),
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                i18n::tui_file_drop_hint(),
                theme.placeholder,
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("{} {}", i18n::tui_file_limits(), format_file_size(max)),
                theme.help_dim,
            )));
        }
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_text_form(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let text = &app.controller.state().text_input;

    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    if text.is_empty() && !app.editing {
        let placeholder =
            Paragraph::new(i18n::tui_text_placeholder()).style(theme.placeholder);
        frame.render_widget(placeholder, split[0]);
    } else {
        let mut lines: Vec<Line> = text
            .split('\n')
            .map(|l| Line::from(Span::styled(l.replace('\t', "    "), theme.body)))
            .collect();
        if app.editing {
            if let Some(last) = lines.last_mut() {
                last.push_span(Span::styled("\u{258f}", theme.key_hint));
            }
        }
        // Keep the end of the text in view while typing
        let height = split[0].height as usize;
        let scroll = if app.editing {
            lines.len().saturating_sub(height) as u16
        } else {
            app.input_scroll
        };
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(paragraph, split[0]);
    }

    let chars = text.trim().chars().count() as u64;
    let counter = Line::from(vec![
        Span::styled(format!("{}: ", i18n::lbl_char_count()), theme.help_dim),
        Span::styled(format_number(chars), theme.help_dim),
    ]);
    frame.render_widget(Paragraph::new(counter), split[1]);
}
