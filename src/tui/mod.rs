//! Terminal UI entry point and event loop.

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    poll as ct_poll, read as ct_read, DisableBracketedPaste, EnableBracketedPaste, Event,
    KeyEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::runtime::Handle;

use self::app::App;
use crate::controller::Controller;
use crate::notify::NoticeBoard;

/// Run the TUI application. Blocks until the user quits.
///
/// Requests are spawned on `runtime`; this thread only draws and handles input.
pub fn run_tui(
    controller: Controller<NoticeBoard>,
    runtime: Handle,
    server_label: String,
) -> anyhow::Result<()> {
    let app = App::new(controller, runtime, server_label);

    // Setup terminal (alternate screen, bracketed paste for dropped files)
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, app);

    // Restore terminal (always, even on error)
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableBracketedPaste)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main event loop: render → poll → handle → repeat.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|frame| {
            ui::render(frame, &mut app);
        })?;

        if ct_poll(tick_rate)? {
            match ct_read()? {
                // Windows reports both press and release
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    event::handle_key_event(&mut app, key)?;
                }
                Event::Paste(text) => app.handle_paste(&text),
                _ => {}
            }
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
