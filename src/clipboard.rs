//! Copying the suggested response.
//!
//! The system clipboard is tried first. If it cannot be opened or written,
//! the text goes into a scratch file that is piped to a platform copy
//! command. The scratch file is owned by a guard and removed on every exit
//! path, including a panicking copier.

use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;

use crate::config::ClipboardConfig;
use crate::error::ClipboardError;

/// Primary copy path.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Fallback copy path: copy whatever is in the scratch file.
pub trait SelectionCopier {
    fn copy_selection(&self, scratch: &Path) -> Result<(), ClipboardError>;
}

/// Which path ended up copying the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyVia {
    Clipboard,
    Fallback,
}

/// Result of a copy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied(CopyVia),
    /// Both paths failed; the user has to select the text by hand.
    NeedsManualSelection,
}

/// The OS clipboard via `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn open() -> Result<Self, ClipboardError> {
        arboard::Clipboard::new()
            .map(|inner| Self { inner })
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text)
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

/// Pipes the scratch file into the first copy command that exists.
#[derive(Debug, Clone)]
pub struct CommandCopier {
    candidates: Vec<Vec<String>>,
}

impl CommandCopier {
    pub fn new(candidates: Vec<Vec<String>>) -> Self {
        Self { candidates }
    }

    /// The configured command, or the usual commands for this platform.
    pub fn from_config(cfg: &ClipboardConfig) -> Self {
        if cfg.fallback_command.is_empty() {
            Self::platform_default()
        } else {
            Self::new(vec![cfg.fallback_command.clone()])
        }
    }

    pub fn platform_default() -> Self {
        let raw: &[&[&str]] = if cfg!(target_os = "macos") {
            &[&["pbcopy"]]
        } else if cfg!(windows) {
            &[&["clip"]]
        } else {
            &[
                &["wl-copy"],
                &["xclip", "-selection", "clipboard"],
                &["xsel", "--clipboard", "--input"],
            ]
        };
        Self::new(
            raw.iter()
                .map(|cmd| cmd.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }
}

impl SelectionCopier for CommandCopier {
    fn copy_selection(&self, scratch: &Path) -> Result<(), ClipboardError> {
        for candidate in &self.candidates {
            let Some((program, args)) = candidate.split_first() else {
                continue;
            };
            let stdin = File::open(scratch)?;
            let status = Command::new(program)
                .args(args)
                .stdin(Stdio::from(stdin))
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            match status {
                Ok(status) if status.success() => {
                    tracing::debug!(%program, "Copied through fallback command");
                    return Ok(());
                }
                Ok(status) => {
                    return Err(ClipboardError::Fallback(format!(
                        "{program} exited with {status}"
                    )));
                }
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(ClipboardError::Fallback(format!("{program}: {e}"))),
            }
        }
        Err(ClipboardError::Fallback(
            "no clipboard command available".to_string(),
        ))
    }
}

/// Temporary holder for the text being copied. Removed when dropped.
struct ScratchSelection {
    file: NamedTempFile,
}

impl ScratchSelection {
    fn acquire(text: &str) -> std::io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("mailclassify-copy-")
            .suffix(".txt")
            .tempfile()?;
        file.write_all(text.as_bytes())?;
        file.flush()?;
        Ok(Self { file })
    }

    fn path(&self) -> &Path {
        self.file.path()
    }
}

impl Drop for ScratchSelection {
    fn drop(&mut self) {
        tracing::trace!(path = %self.file.path().display(), "Releasing copy scratch buffer");
    }
}

fn selection_dies_with_owner() -> bool {
    cfg!(all(
        unix,
        not(any(target_os = "macos", target_os = "ios", target_os = "android"))
    ))
}

/// Copy through the fallback path. The scratch file is gone when this returns or unwinds.
pub fn fallback_copy(copier: &dyn SelectionCopier, text: &str) -> Result<(), ClipboardError> {
    let scratch = ScratchSelection::acquire(text)?;
    copier.copy_selection(scratch.path())
}

/// Primary clipboard plus fallback copier.
pub struct ClipboardChain {
    primary: Option<Box<dyn ClipboardWriter>>,
    fallback: Box<dyn SelectionCopier>,
}

impl ClipboardChain {
    pub fn new(
        primary: Option<Box<dyn ClipboardWriter>>,
        fallback: Box<dyn SelectionCopier>,
    ) -> Self {
        Self { primary, fallback }
    }

    /// The OS clipboard when it can be opened, with the command fallback behind it.
    pub fn system(cfg: &ClipboardConfig) -> Self {
        let primary = match SystemClipboard::open() {
            Ok(clipboard) => Some(Box::new(clipboard) as Box<dyn ClipboardWriter>),
            Err(e) => {
                tracing::info!(error = %e, "System clipboard unavailable, using fallback only");
                None
            }
        };
        Self::new(primary, Box::new(CommandCopier::from_config(cfg)))
    }

    /// Chain for a process that exits right after copying.
    ///
    /// On X11 and Wayland the selection lives only as long as its owner, so
    /// an `arboard` clipboard loses the text when the process ends. There the
    /// copy command goes first; `xclip`, `xsel` and `wl-copy` keep serving the
    /// text after we exit.
    pub fn one_shot(cfg: &ClipboardConfig) -> Self {
        if selection_dies_with_owner() {
            tracing::debug!("Copying through a command so the text outlives the process");
            Self::new(None, Box::new(CommandCopier::from_config(cfg)))
        } else {
            Self::system(cfg)
        }
    }

    /// Copy `text`, trying the primary path first.
    pub fn copy(&mut self, text: &str) -> CopyOutcome {
        if let Some(primary) = self.primary.as_mut() {
            match primary.write_text(text) {
                Ok(()) => return CopyOutcome::Copied(CopyVia::Clipboard),
                Err(e) => tracing::warn!(error = %e, "Clipboard write failed, trying fallback"),
            }
        }
        match fallback_copy(self.fallback.as_ref(), text) {
            Ok(()) => CopyOutcome::Copied(CopyVia::Fallback),
            Err(e) => {
                tracing::warn!(error = %e, "Fallback copy failed");
                CopyOutcome::NeedsManualSelection
            }
        }
    }
}
