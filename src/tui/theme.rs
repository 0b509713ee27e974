//! Color theme definitions for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// A complete color theme for the TUI.
pub struct Theme {
    pub header_bar: Style,
    pub status_bar: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub label: Style,
    pub value: Style,
    pub body: Style,
    pub placeholder: Style,
    pub badge_emphasis: Style,
    pub badge_neutral: Style,
    pub toast_success: Style,
    pub toast_error: Style,
    pub border: Style,
    pub border_focused: Style,
    pub border_entering: Style,
    pub popup: Style,
    pub popup_title: Style,
    pub key_hint: Style,
    pub help_section: Style,
    pub help_dim: Style,
}

impl Theme {
    /// Dark theme (default).
    pub fn dark() -> Self {
        Self {
            header_bar: Style::default()
                .fg(Color::Rgb(200, 200, 220))
                .bg(Color::Rgb(30, 30, 46)),
            status_bar: Style::default()
                .fg(Color::Rgb(150, 150, 170))
                .bg(Color::Rgb(30, 30, 46)),
            tab_active: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(60, 60, 100))
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Rgb(150, 150, 170)),
            label: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            value: Style::default().fg(Color::Rgb(220, 220, 230)),
            body: Style::default().fg(Color::Rgb(220, 220, 230)),
            placeholder: Style::default()
                .fg(Color::Rgb(110, 110, 130))
                .add_modifier(Modifier::ITALIC),
            badge_emphasis: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(120, 220, 140))
                .add_modifier(Modifier::BOLD),
            badge_neutral: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(170, 170, 190))
                .add_modifier(Modifier::BOLD),
            toast_success: Style::default()
                .fg(Color::Rgb(120, 220, 140))
                .bg(Color::Rgb(30, 30, 46))
                .add_modifier(Modifier::BOLD),
            toast_error: Style::default()
                .fg(Color::Rgb(255, 120, 120))
                .bg(Color::Rgb(30, 30, 46))
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Rgb(80, 80, 100)),
            border_focused: Style::default().fg(Color::Cyan),
            border_entering: Style::default()
                .fg(Color::Rgb(120, 220, 140))
                .add_modifier(Modifier::BOLD),
            popup: Style::default()
                .fg(Color::Rgb(220, 220, 230))
                .bg(Color::Rgb(20, 20, 35)),
            popup_title: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            key_hint: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            help_section: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            help_dim: Style::default().fg(Color::Rgb(110, 110, 130)),
        }
    }
}

/// Return the active theme.
pub fn current_theme() -> Theme {
    Theme::dark()
}
