//! Keyboard and paste event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, PanelFocus};
use crate::controller::InputTab;
use crate::model::sample::SampleKind;

/// Process a key event and update the application state.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    // Ctrl+C always quits, even while a request is in flight
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return Ok(());
    }

    // ── Loading notice is modal ───────────────────────────
    if app.is_busy() {
        return Ok(());
    }

    // ── Popups and editors capture all keys ───────────────
    if app.path_prompt.is_some() {
        handle_path_prompt(app, key);
        return Ok(());
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return Ok(());
    }

    if app.editing {
        handle_text_editing(app, key);
        return Ok(());
    }

    // ── Form shortcuts ────────────────────────────────────
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => app.submit(),
        (_, KeyCode::Char('q')) => app.should_quit = true,
        (_, KeyCode::Char('?')) => app.show_help = true,
        (_, KeyCode::Tab) | (_, KeyCode::BackTab) => {
            let tab = app.controller.state().active_tab.toggle();
            app.controller.switch_tab(tab);
            app.focus = PanelFocus::Input;
        }
        (_, KeyCode::Enter) | (_, KeyCode::Char('i')) => {
            match app.controller.state().active_tab {
                InputTab::Text => {
                    app.editing = true;
                    app.focus = PanelFocus::Input;
                }
                InputTab::File => app.open_path_prompt(),
            }
        }
        (_, KeyCode::Char('o')) => app.open_path_prompt(),
        (_, KeyCode::Char('x')) => app.controller.clear_file(),
        (_, KeyCode::Char('p')) => app.controller.load_example(SampleKind::Produtivo),
        (_, KeyCode::Char('u')) => app.controller.load_example(SampleKind::Improdutivo),
        (_, KeyCode::Char('c')) => {
            // The outcome is shown as a notice
            let _ = app.controller.copy_response();
        }
        (_, KeyCode::Char('n')) => app.controller.analyze_another(),
        (_, KeyCode::Char('j')) | (_, KeyCode::Down) => app.scroll_result(1),
        (_, KeyCode::Char('k')) | (_, KeyCode::Up) => app.scroll_result(-1),
        (_, KeyCode::PageDown) => {
            let page = app.result_view_height.max(1) as i32;
            app.scroll_result(page);
        }
        (_, KeyCode::PageUp) => {
            let page = app.result_view_height.max(1) as i32;
            app.scroll_result(-page);
        }
        (_, KeyCode::Esc) => app.focus = PanelFocus::Input,
        _ => {}
    }

    Ok(())
}

/// Keys while the text editor is active.
fn handle_text_editing(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.editing = false,
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => app.submit(),
        (_, KeyCode::Enter) => app.controller.edit_text(|t| t.push('\n')),
        (_, KeyCode::Backspace) => app.controller.edit_text(|t| {
            t.pop();
        }),
        (_, KeyCode::Tab) => app.controller.edit_text(|t| t.push('\t')),
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            app.controller.edit_text(|t| t.push(c));
        }
        _ => {}
    }
}

/// Keys while the open-file prompt is active.
fn handle_path_prompt(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.path_prompt = None,
        KeyCode::Enter => app.confirm_path_prompt(),
        KeyCode::Backspace => {
            if let Some(p) = app.path_prompt.as_mut() {
                p.pop();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(p) = app.path_prompt.as_mut() {
                p.push(c);
            }
        }
        _ => {}
    }
}
