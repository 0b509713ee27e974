//! Classification service client.
//!
//! The service exposes several request shapes for text submissions. One of
//! them is picked by configuration ([`TextContract`]); file submissions
//! always go to `POST /upload` as a multipart `file` part.

pub mod http;

use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::model::input::PendingInput;
use crate::model::result::{ClassificationResult, HealthStatus};

pub use self::http::HttpClassifier;

/// How text submissions are encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextContract {
    /// JSON `{"content": ...}` to `POST /classify-text`.
    #[default]
    ClassifyText,
    /// Multipart field `email_text` to `POST /upload`.
    UploadForm,
    /// JSON `{"content": ...}` to `POST /api/classify`.
    Api,
}

impl TextContract {
    /// Endpoint path, relative to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::ClassifyText => "classify-text",
            Self::UploadForm => UPLOAD_PATH,
            Self::Api => "api/classify",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ClassifyText => "classify-text",
            Self::UploadForm => "upload-form",
            Self::Api => "api",
        }
    }
}

impl FromStr for TextContract {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classify-text" => Ok(Self::ClassifyText),
            "upload-form" => Ok(Self::UploadForm),
            "api" => Ok(Self::Api),
            other => Err(format!(
                "unknown contract '{other}' (expected classify-text, upload-form or api)"
            )),
        }
    }
}

/// Endpoint for file uploads.
pub const UPLOAD_PATH: &str = "upload";

/// Endpoint for the service health check.
pub const HEALTH_PATH: &str = "health";

/// Multipart field carrying an uploaded file.
pub const FILE_FIELD: &str = "file";

/// Multipart field carrying email text (`upload-form` contract).
pub const TEXT_FIELD: &str = "email_text";

/// The remote classification service.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Submit one staged input and wait for the verdict.
    async fn classify(&self, input: PendingInput) -> Result<ClassificationResult, RequestError>;

    /// Ask the service whether it is up.
    async fn health(&self) -> Result<HealthStatus, RequestError>;
}
