//! Staged email input and its client-side validation.
//!
//! A file is accepted when its MIME type OR its extension is one of the
//! accepted kinds; either check passing is enough. Size is checked after
//! the type.

use std::path::{Path, PathBuf};

use crate::config::LimitsConfig;
use crate::error::ValidationError;
use crate::format::format_file_size;

/// MIME types accepted for upload.
pub const ACCEPTED_MIME_TYPES: &[&str] = &["text/plain", "application/pdf"];

/// File extensions accepted for upload (compared case-insensitively).
pub const ACCEPTED_EXTENSIONS: &[&str] = &[".txt", ".pdf"];

/// Raw email text typed or pasted by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPayload {
    /// Trimmed email text.
    pub content: String,
}

/// An email file picked or dropped by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    /// File name without directories.
    pub name: String,
    /// MIME type as reported by the picker or guessed from the extension.
    pub mime_type: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// The email content staged for the next submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingInput {
    Text(TextPayload),
    File(FilePayload),
}

/// Limits applied before anything is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLimits {
    pub max_upload_bytes: u64,
    pub min_text_chars: usize,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self::from(&LimitsConfig::default())
    }
}

impl From<&LimitsConfig> for InputLimits {
    fn from(cfg: &LimitsConfig) -> Self {
        Self {
            max_upload_bytes: cfg.max_upload_bytes,
            min_text_chars: cfg.min_text_chars,
        }
    }
}

impl FilePayload {
    /// Build a payload from in-memory bytes. The size is taken from `bytes`.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: bytes.len() as u64,
            bytes,
        }
    }

    /// Human-readable label: `"<name> (<size>)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, format_file_size(self.size_bytes))
    }

    /// Whether the file holds plain text rather than a PDF.
    pub fn is_plain_text(&self) -> bool {
        self.mime_type == "text/plain" || has_extension(&self.name, ".txt")
    }

    /// First `max_lines` lines of a plain-text file.
    ///
    /// Decoded as UTF-8, falling back to Windows-1252 for legacy files.
    /// Returns `None` for PDFs.
    pub fn preview(&self, max_lines: usize) -> Option<String> {
        if !self.is_plain_text() {
            return None;
        }
        let (text, _, had_errors) = encoding_rs::UTF_8.decode(&self.bytes);
        let text = if had_errors {
            encoding_rs::WINDOWS_1252.decode(&self.bytes).0
        } else {
            text
        };
        let lines: Vec<&str> = text.lines().take(max_lines).collect();
        Some(lines.join("\n"))
    }
}

impl PendingInput {
    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Text(text) => format!("text ({} chars)", text.content.chars().count()),
            Self::File(file) => format!("file {}", file.label()),
        }
    }
}

fn has_extension(name: &str, ext: &str) -> bool {
    name.to_lowercase().ends_with(ext)
}

/// Whether a file of this name and MIME type may be uploaded.
pub fn is_accepted_kind(name: &str, mime_type: &str) -> bool {
    ACCEPTED_MIME_TYPES.contains(&mime_type)
        || ACCEPTED_EXTENSIONS
            .iter()
            .any(|ext| has_extension(name, ext))
}

/// Check type, then size. Both rules reject without touching any state.
pub fn validate_file(
    name: &str,
    mime_type: &str,
    size_bytes: u64,
    limits: &InputLimits,
) -> Result<(), ValidationError> {
    if !is_accepted_kind(name, mime_type) {
        return Err(ValidationError::FileType {
            name: name.to_string(),
        });
    }
    if size_bytes > limits.max_upload_bytes {
        return Err(ValidationError::FileTooLarge {
            size_bytes,
            max_bytes: limits.max_upload_bytes,
        });
    }
    Ok(())
}

/// Trim and check the email text.
pub fn validate_text(raw: &str, limits: &InputLimits) -> Result<TextPayload, ValidationError> {
    let content = raw.trim();
    if content.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    let chars = content.chars().count();
    if chars < limits.min_text_chars {
        return Err(ValidationError::TextTooShort {
            chars,
            min_chars: limits.min_text_chars,
        });
    }
    Ok(TextPayload {
        content: content.to_string(),
    })
}

/// Guess a MIME type from the file name.
pub fn guess_mime(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Load a file from disk for upload.
///
/// Type and size are validated from metadata before any bytes are read, so
/// an oversized file is rejected without loading it.
pub fn read_file(path: &Path, limits: &InputLimits) -> Result<FilePayload, ValidationError> {
    let unreadable = || ValidationError::Unreadable {
        path: PathBuf::from(path),
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(unreadable)?;
    let mime_type = guess_mime(&name);

    let metadata = std::fs::metadata(path).map_err(|e| {
        tracing::debug!(path = %path.display(), error = %e, "Cannot stat file");
        unreadable()
    })?;
    if !metadata.is_file() {
        return Err(unreadable());
    }

    validate_file(&name, &mime_type, metadata.len(), limits)?;

    let bytes = std::fs::read(path).map_err(|e| {
        tracing::debug!(path = %path.display(), error = %e, "Cannot read file");
        unreadable()
    })?;
    // The file may have grown between stat and read.
    validate_file(&name, &mime_type, bytes.len() as u64, limits)?;

    Ok(FilePayload::new(name, mime_type, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> InputLimits {
        InputLimits::default()
    }

    #[test]
    fn test_accepts_by_mime_or_extension() {
        assert!(is_accepted_kind("email.txt", "text/plain"));
        // Extension alone is enough
        assert!(is_accepted_kind("EMAIL.PDF", "application/octet-stream"));
        // MIME alone is enough
        assert!(is_accepted_kind("email", "text/plain"));
        assert!(!is_accepted_kind("email.docx", "application/msword"));
        assert!(!is_accepted_kind("email.txt.exe", ""));
    }

    #[test]
    fn test_validate_file_type_before_size() {
        let err = validate_file("huge.png", "image/png", u64::MAX, &limits()).unwrap_err();
        assert!(matches!(err, ValidationError::FileType { .. }));
    }

    #[test]
    fn test_validate_file_size_boundary() {
        let max = limits().max_upload_bytes;
        assert!(validate_file("a.pdf", "application/pdf", max, &limits()).is_ok());
        let err = validate_file("a.pdf", "application/pdf", max + 1, &limits()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::FileTooLarge {
                size_bytes: max + 1,
                max_bytes: max,
            }
        );
    }

    #[test]
    fn test_validate_text_trims() {
        let payload = validate_text("   Hello there, team!  \n", &limits()).unwrap();
        assert_eq!(payload.content, "Hello there, team!");
    }

    #[test]
    fn test_validate_text_rejects_empty_and_short() {
        assert_eq!(
            validate_text(" \n\t ", &limits()).unwrap_err(),
            ValidationError::EmptyText
        );
        assert_eq!(
            validate_text("  too short ", &limits()).unwrap_err(),
            ValidationError::TextTooShort {
                chars: 9,
                min_chars: 10,
            }
        );
        assert!(validate_text("ten chars!", &limits()).is_ok());
    }

    #[test]
    fn test_validate_text_counts_characters_not_bytes() {
        // 9 characters, 18 bytes
        let err = validate_text("ééééééééé", &limits()).unwrap_err();
        assert!(matches!(err, ValidationError::TextTooShort { chars: 9, .. }));
    }

    #[test]
    fn test_label_and_preview() {
        let file = FilePayload::new("msg.txt", "text/plain", b"line one\nline two\nline three".to_vec());
        assert_eq!(file.label(), "msg.txt (28 Bytes)");
        assert_eq!(file.preview(2).as_deref(), Some("line one\nline two"));

        let pdf = FilePayload::new("msg.pdf", "application/pdf", b"%PDF-1.4".to_vec());
        assert_eq!(pdf.preview(5), None);
    }

    #[test]
    fn test_preview_falls_back_to_windows_1252() {
        // "Olá" in Latin-1
        let file = FilePayload::new("legacy.txt", "text/plain", vec![0x4f, 0x6c, 0xe1]);
        assert_eq!(file.preview(1).as_deref(), Some("Olá"));
    }

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime("a.txt"), "text/plain");
        assert_eq!(guess_mime("a.pdf"), "application/pdf");
        assert_eq!(guess_mime("noext"), "application/octet-stream");
    }

    #[test]
    fn test_read_file_missing_is_unreadable() {
        let err = read_file(Path::new("/definitely/not/here.txt"), &limits()).unwrap_err();
        assert!(matches!(err, ValidationError::Unreadable { .. }));
    }

    #[test]
    fn test_read_file_checks_size_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        std::fs::write(&path, vec![b'a'; 64]).unwrap();
        let small = InputLimits {
            max_upload_bytes: 32,
            min_text_chars: 10,
        };
        let err = read_file(&path, &small).unwrap_err();
        assert!(matches!(err, ValidationError::FileTooLarge { size_bytes: 64, .. }));
    }
}
