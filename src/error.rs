//! Centralized error types for mailclassify.

use std::path::PathBuf;
use thiserror::Error;

use crate::i18n;

/// All errors produced by the mailclassify library.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// Input was rejected before anything was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The classification service failed or answered with an unusable body.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Neither the system clipboard nor the fallback could copy the text.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A request is already in flight; the action was ignored.
    #[error("{}", i18n::err_busy())]
    Busy,

    /// Copy requested with no result on screen.
    #[error("{}", i18n::err_nothing_to_copy())]
    NothingToCopy,

    /// The configured server URL cannot be used.
    #[error("Invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Convenience alias for `Result<T, ClassifyError>`.
pub type Result<T> = std::result::Result<T, ClassifyError>;

impl ClassifyError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Client-side rejection of the staged input. Never reaches the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Neither the MIME type nor the extension is accepted.
    #[error("{}", i18n::err_file_type())]
    FileType { name: String },

    /// The file is larger than the upload limit.
    #[error("{} {}", i18n::err_file_too_large(), limit_label(.max_bytes))]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },

    /// The file could not be read from disk.
    #[error("{}: {path}", i18n::err_file_unreadable())]
    Unreadable { path: PathBuf },

    /// File submission without a staged file.
    #[error("{}", i18n::err_no_file_selected())]
    NoFileSelected,

    /// Text submission with nothing but whitespace.
    #[error("{}", i18n::err_empty_text())]
    EmptyText,

    /// Trimmed text shorter than the minimum.
    #[error("{} {min_chars} {}", i18n::err_text_too_short(), i18n::msg_characters())]
    TextTooShort { chars: usize, min_chars: usize },
}

fn limit_label(max_bytes: &u64) -> String {
    crate::format::format_file_size(*max_bytes)
}

/// Failure of a classification request.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Non-2xx status. `message` comes from the body's `error` field when present.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// 2xx status but the body does not have the expected shape.
    #[error("{}: {reason}", i18n::err_malformed_response())]
    Malformed { reason: String },

    /// The request never completed (connection refused, reset, DNS, ...).
    #[error("{}: {}", i18n::err_request_failed(), .0)]
    Transport(#[source] reqwest::Error),

    /// The configured client timeout elapsed.
    #[error("{}", i18n::err_request_timeout())]
    Timeout,
}

impl RequestError {
    /// One-line message for the error notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            Self::Malformed { .. } | Self::Transport(_) => i18n::err_processing_email().to_string(),
            Self::Timeout => i18n::err_request_timeout().to_string(),
        }
    }

    /// Map a reqwest error, keeping timeouts distinct from other transport failures.
    pub fn from_transport(source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(source)
        }
    }
}

/// Both copy paths failed; the user has to select the text by hand.
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// The system clipboard could not be opened or written.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The fallback copy command failed.
    #[error("fallback copy failed: {0}")]
    Fallback(String),

    /// The scratch buffer for the fallback could not be prepared.
    #[error("scratch buffer error: {0}")]
    Scratch(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_uses_server_message() {
        let err = RequestError::Server {
            status: 400,
            message: "Content is required".to_string(),
        };
        assert_eq!(err.user_message(), "Content is required");
        assert_eq!(err.to_string(), "Content is required");
    }

    #[test]
    fn test_malformed_uses_generic_message() {
        let err = RequestError::Malformed {
            reason: "missing field `suggested_response`".to_string(),
        };
        assert_eq!(err.user_message(), i18n::err_processing_email());
    }

    #[test]
    fn test_transport_error_names_the_cause() {
        let source = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        let err = RequestError::from_transport(source);
        assert!(matches!(err, RequestError::Transport(_)));
        assert!(err.to_string().starts_with(i18n::err_request_failed()));
        assert_eq!(err.user_message(), i18n::err_processing_email());
    }

    #[test]
    fn test_validation_converts_into_classify_error() {
        let err: ClassifyError = ValidationError::EmptyText.into();
        assert!(matches!(
            err,
            ClassifyError::Validation(ValidationError::EmptyText)
        ));
    }
}
