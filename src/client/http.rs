//! `reqwest`-backed [`Classifier`].

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use url::Url;

use super::{Classifier, TextContract, FILE_FIELD, HEALTH_PATH, TEXT_FIELD, UPLOAD_PATH};
use crate::config::ServerConfig;
use crate::error::{ClassifyError, RequestError};
use crate::i18n;
use crate::model::input::{FilePayload, PendingInput, TextPayload};
use crate::model::result::{ClassificationResult, HealthStatus};

#[derive(Serialize)]
struct TextBody<'a> {
    content: &'a str,
}

/// HTTP client for the classification service.
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    http: Client,
    base_url: Url,
    text_contract: TextContract,
}

impl HttpClassifier {
    /// Build a client from the `[server]` configuration.
    pub fn new(server: &ServerConfig) -> crate::error::Result<Self> {
        let base_url = parse_base_url(&server.base_url)?;

        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = server.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ClassifyError::InvalidUrl {
            url: server.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http,
            base_url,
            text_contract: server.text_contract,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn text_contract(&self) -> TextContract {
        self.text_contract
    }

    fn endpoint(&self, path: &str) -> Url {
        // `parse_base_url` guarantees a trailing slash, so joining a relative
        // path cannot fail or drop a path prefix.
        self.base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone())
    }

    fn text_request(&self, text: TextPayload) -> RequestBuilder {
        let url = self.endpoint(self.text_contract.path());
        match self.text_contract {
            TextContract::ClassifyText | TextContract::Api => self.http.post(url).json(&TextBody {
                content: &text.content,
            }),
            TextContract::UploadForm => {
                let form = Form::new().text(TEXT_FIELD, text.content);
                self.http.post(url).multipart(form)
            }
        }
    }

    fn file_request(&self, file: FilePayload) -> Result<RequestBuilder, RequestError> {
        let part = Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(&file.mime_type)
            .map_err(RequestError::Transport)?;
        let form = Form::new().part(FILE_FIELD, part);
        Ok(self.http.post(self.endpoint(UPLOAD_PATH)).multipart(form))
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, input: PendingInput) -> Result<ClassificationResult, RequestError> {
        let request = match input {
            PendingInput::Text(text) => {
                tracing::info!(
                    contract = self.text_contract.name(),
                    chars = text.content.chars().count(),
                    "Submitting email text"
                );
                self.text_request(text)
            }
            PendingInput::File(file) => {
                tracing::info!(
                    file = %file.name,
                    mime = %file.mime_type,
                    size = file.size_bytes,
                    "Uploading email file"
                );
                self.file_request(file)?
            }
        };

        let response = request.send().await.map_err(RequestError::from_transport)?;
        let body = read_json(response).await?;
        ClassificationResult::from_json(body).map_err(|reason| {
            tracing::warn!(%reason, "Unexpected classification response");
            RequestError::Malformed { reason }
        })
    }

    async fn health(&self) -> Result<HealthStatus, RequestError> {
        let response = self
            .http
            .get(self.endpoint(HEALTH_PATH))
            .send()
            .await
            .map_err(RequestError::from_transport)?;
        let body = read_json(response).await?;
        serde_json::from_value(body).map_err(|e| RequestError::Malformed {
            reason: e.to_string(),
        })
    }
}

/// Read the body as JSON, turning non-2xx statuses into [`RequestError::Server`].
async fn read_json(response: Response) -> Result<serde_json::Value, RequestError> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(RequestError::from_transport)?;
    let body: Option<serde_json::Value> = serde_json::from_slice(&bytes).ok();
    tracing::debug!(status = status.as_u16(), len = bytes.len(), "Response received");

    if !status.is_success() {
        let message = body
            .as_ref()
            .and_then(|b| b.get("error"))
            .and_then(serde_json::Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| i18n::err_server().to_string());
        tracing::warn!(status = status.as_u16(), %message, "Service returned an error");
        return Err(RequestError::Server {
            status: status.as_u16(),
            message,
        });
    }

    body.ok_or_else(|| RequestError::Malformed {
        reason: "response body is not JSON".to_string(),
    })
}

/// Parse the base URL and make sure its path ends with `/`.
pub fn parse_base_url(raw: &str) -> crate::error::Result<Url> {
    let invalid = |reason: String| ClassifyError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_adds_trailing_slash() {
        let url = parse_base_url("http://localhost:5000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/");
        let url = parse_base_url("https://example.com/classifier").unwrap();
        assert_eq!(url.as_str(), "https://example.com/classifier/");
    }

    #[test]
    fn test_parse_base_url_rejects_bad_input() {
        assert!(parse_base_url("not a url").is_err());
        assert!(parse_base_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_endpoints_keep_path_prefix() {
        let server = ServerConfig {
            base_url: "https://example.com/classifier".to_string(),
            ..ServerConfig::default()
        };
        let client = HttpClassifier::new(&server).unwrap();
        assert_eq!(
            client.endpoint(UPLOAD_PATH).as_str(),
            "https://example.com/classifier/upload"
        );
        assert_eq!(
            client.endpoint(TextContract::Api.path()).as_str(),
            "https://example.com/classifier/api/classify"
        );
    }
}
