//! Transient notifications: the blocking loading notice and success/error toasts.
//!
//! The controller only sees the [`Notifier`] trait. The terminal UI renders a
//! [`NoticeBoard`]; one-shot CLI commands use a [`ConsoleNotifier`].

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// What a notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Request in flight. Blocks further interaction until hidden.
    Loading,
    Success,
    Error,
}

/// Show/hide capability for notices.
pub trait Notifier {
    fn show(&mut self, kind: NoticeKind, message: &str);
    fn hide(&mut self, kind: NoticeKind);
}

/// A success or error toast.
#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: NoticeKind,
    pub message: String,
    pub shown_at: Instant,
}

/// Notice state for the terminal UI. Toasts expire after `ttl`.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    loading: Option<String>,
    toast: Option<Toast>,
    ttl: Duration,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            loading: None,
            toast: None,
            ttl,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn loading_message(&self) -> Option<&str> {
        self.loading.as_deref()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Drop the toast once it has been visible for `ttl`.
    pub fn expire(&mut self, now: Instant) {
        if let Some(toast) = &self.toast {
            if now.duration_since(toast.shown_at) >= self.ttl {
                self.toast = None;
            }
        }
    }
}

impl Notifier for NoticeBoard {
    fn show(&mut self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Loading => self.loading = Some(message.to_string()),
            NoticeKind::Success | NoticeKind::Error => {
                self.toast = Some(Toast {
                    kind,
                    message: message.to_string(),
                    shown_at: Instant::now(),
                });
            }
        }
    }

    fn hide(&mut self, kind: NoticeKind) {
        match kind {
            NoticeKind::Loading => self.loading = None,
            _ => {
                if self.toast.as_ref().is_some_and(|t| t.kind == kind) {
                    self.toast = None;
                }
            }
        }
    }
}

/// Notices for one-shot commands: a spinner while loading, one line on stderr otherwise.
#[derive(Default)]
pub struct ConsoleNotifier {
    spinner: Option<ProgressBar>,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for ConsoleNotifier {
    fn show(&mut self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Loading => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} {msg}")
                        .expect("valid template"),
                );
                pb.set_message(message.to_string());
                pb.enable_steady_tick(Duration::from_millis(100));
                self.spinner = Some(pb);
            }
            NoticeKind::Success => eprintln!("  \u{2714} {message}"),
            NoticeKind::Error => eprintln!("  \u{2716} {message}"),
        }
    }

    fn hide(&mut self, kind: NoticeKind) {
        if kind == NoticeKind::Loading {
            if let Some(pb) = self.spinner.take() {
                pb.finish_and_clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_loading_and_toasts() {
        let mut board = NoticeBoard::new(Duration::from_secs(5));
        board.show(NoticeKind::Loading, "Analyzing");
        assert!(board.is_loading());
        board.hide(NoticeKind::Loading);
        assert!(!board.is_loading());

        board.show(NoticeKind::Error, "boom");
        assert_eq!(board.toast().map(|t| t.kind), Some(NoticeKind::Error));
        // Hiding a different kind leaves the toast alone
        board.hide(NoticeKind::Success);
        assert!(board.toast().is_some());
        board.hide(NoticeKind::Error);
        assert!(board.toast().is_none());
    }

    #[test]
    fn test_board_toast_expires() {
        let mut board = NoticeBoard::new(Duration::from_secs(5));
        board.show(NoticeKind::Success, "done");
        let shown = board.toast().map(|t| t.shown_at).unwrap();
        board.expire(shown + Duration::from_secs(4));
        assert!(board.toast().is_some());
        board.expire(shown + Duration::from_secs(5));
        assert!(board.toast().is_none());
    }
}
