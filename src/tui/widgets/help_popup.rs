//! Help popup showing keyboard shortcuts in multi-column layout.

use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use super::centered_rect_exact;
use crate::i18n;
use crate::tui::theme::{current_theme, Theme};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A single shortcut entry.
struct Shortcut {
    key: &'static str,
    desc: &'static str,
}

/// Render the help popup centered on screen.
pub fn render(frame: &mut Frame) {
    let theme = current_theme();
    let screen = frame.area();

    let popup_width = (screen.width * 78 / 100).min(screen.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(2) as usize;
    let cols = if inner_width >= 80 { 2 } else { 1 };
    let col_width = inner_width / cols;
    let sep_width = inner_width.saturating_sub(2);

    let lines = build_lines(cols, col_width, sep_width, &theme);

    let popup_height = (lines.len() as u16 + 3).min(screen.height.saturating_sub(2));
    let area = centered_rect_exact(popup_width, popup_height, screen);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(i18n::tui_help_title())
        .style(theme.popup);

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Build all the help content lines.
fn build_lines(
    cols: usize,
    col_width: usize,
    sep_width: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(format!("  {}", i18n::app_name()), theme.popup_title),
        Span::styled(format!("  v{VERSION}"), theme.help_dim),
    ]));
    lines.push(Line::from(Span::styled(
        format!("  {}", i18n::app_about()),
        theme.help_dim,
    )));
    lines.push(Line::from(""));

    add_section_header(&mut lines, i18n::tui_help_input(), theme, sep_width);
    add_shortcuts_columns(
        &mut lines,
        &[
            Shortcut {
                key: "Tab",
                desc: i18n::tui_help_switch_tab(),
            },
            Shortcut {
                key: "Enter/Esc",
                desc: i18n::tui_help_edit_text(),
            },
            Shortcut {
                key: "o",
                desc: i18n::tui_help_open_path(),
            },
            Shortcut {
                key: "x",
                desc: i18n::tui_help_clear_file(),
            },
            Shortcut {
                key: "Ctrl-S",
                desc: i18n::tui_help_submit(),
            },
            Shortcut {
                key: "p / u",
                desc: i18n::tui_help_examples(),
            },
        ],
        cols,
        col_width,
        theme,
    );
    lines.push(Line::from(Span::styled(
        format!("    {}", i18n::tui_help_drop()),
        theme.help_dim,
    )));
    lines.push(Line::from(""));

    add_section_header(&mut lines, i18n::tui_help_result(), theme, sep_width);
    add_shortcuts_columns(
        &mut lines,
        &[
            Shortcut {
                key: "c",
                desc: i18n::tui_help_copy(),
            },
            Shortcut {
                key: "n",
                desc: i18n::tui_help_another(),
            },
            Shortcut {
                key: "j / k",
                desc: i18n::tui_help_scroll(),
            },
        ],
        cols,
        col_width,
        theme,
    );
    lines.push(Line::from(""));

    add_section_header(&mut lines, i18n::tui_help_general(), theme, sep_width);
    add_shortcuts_columns(
        &mut lines,
        &[
            Shortcut {
                key: "?",
                desc: i18n::tui_help_this_help(),
            },
            Shortcut {
                key: "q",
                desc: i18n::tui_help_quit(),
            },
            Shortcut {
                key: "Ctrl-C",
                desc: i18n::tui_help_force_quit(),
            },
        ],
        cols,
        col_width,
        theme,
    );

    lines
}

/// Add a section header with a trailing separator line.
fn add_section_header(lines: &mut Vec<Line<'static>>, title: &str, theme: &Theme, width: usize) {
    let remaining = width.saturating_sub(title.width() + 4);
    lines.push(Line::from(vec![
        Span::styled(format!("  {title} "), theme.help_section),
        Span::styled("\u{2500}".repeat(remaining), theme.help_dim),
    ]));
}

/// Lay out shortcuts in N columns per row.
fn add_shortcuts_columns(
    lines: &mut Vec<Line<'static>>,
    shortcuts: &[Shortcut],
    cols: usize,
    col_width: usize,
    theme: &Theme,
) {
    let key_w: usize = 10;

    for row in shortcuts.chunks(cols) {
        let mut spans: Vec<Span<'static>> = vec![Span::raw("  ")];
        for s in row {
            let desc_avail = col_width.saturating_sub(key_w + 3);
            let desc = truncate(s.desc, desc_avail);
            let padding = col_width.saturating_sub(key_w + 1 + desc.width()).max(1);

            spans.push(Span::styled(
                format!("{:>width$}", s.key, width = key_w),
                theme.key_hint,
            ));
            spans.push(Span::styled(format!(" {desc}"), theme.popup));
            spans.push(Span::raw(" ".repeat(padding)));
        }
        lines.push(Line::from(spans));
    }
}

/// Cut `s` to `max` display columns, marking the cut with a dot.
fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for c in s.chars() {
        if out.width() + 2 > max {
            break;
        }
        out.push(c);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("Alternar aba", 40), "Alternar aba");
        let cut = truncate("Editar texto / parar edição", 10);
        assert!(cut.width() <= 10);
        assert!(cut.ends_with('.'));
    }
}
