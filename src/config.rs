//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$MAILCLASSIFY_CONFIG` (environment variable)
//! 2. `~/.config/mailclassify/config.toml` (Linux/macOS)
//!    `%APPDATA%\mailclassify\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::TextContract;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Classification service settings.
    pub server: ServerConfig,
    /// Client-side input limits.
    pub limits: LimitsConfig,
    /// Terminal UI timing.
    pub ui: UiConfig,
    /// Clipboard fallback.
    pub clipboard: ClipboardConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
    /// UI language ("en", "pt"). `None` follows the system locale.
    pub lang: Option<String>,
}

/// Classification service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the service, e.g. `http://localhost:5000`.
    pub base_url: String,
    /// How text submissions are sent: "classify-text", "upload-form" or "api".
    pub text_contract: TextContract,
    /// Give up on a request after this many seconds. `None` waits forever.
    pub request_timeout_secs: Option<u64>,
}

/// Client-side input limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest accepted upload in bytes (default: 16 MiB).
    pub max_upload_bytes: u64,
    /// Minimum trimmed text length in characters.
    pub min_text_chars: usize,
}

/// Terminal UI timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Seconds a success/error toast stays visible.
    pub toast_secs: u64,
    /// Delay before the result panel is scrolled into view.
    pub result_scroll_delay_ms: u64,
    /// Delay before the text input gets focus after loading an example.
    pub example_focus_delay_ms: u64,
}

/// Clipboard fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    /// Command that reads the text to copy from stdin, e.g. `["xclip", "-selection", "clipboard"]`.
    /// Empty means probe the usual platform commands.
    pub fallback_command: Vec<String>,
}

// ── Default implementations ─────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            log_level: "warn".to_string(),
            lang: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            text_contract: TextContract::default(),
            request_timeout_secs: None,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 16 * 1024 * 1024, // 16 MiB
            min_text_chars: 10,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_secs: 5,
            result_scroll_delay_ms: 300,
            example_focus_delay_ms: 200,
        }
    }
}

impl ServerConfig {
    /// The configured client timeout, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }
}

// ── Load / save ─────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    // 1. Environment variable override
    if let Ok(env_path) = std::env::var("MAILCLASSIFY_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    // 2. Standard config directory
    dirs::config_dir().map(|d| d.join("mailclassify").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mailclassify")
}

/// Return the log file path.
pub fn log_file_path(config: &Config) -> PathBuf {
    cache_dir(config).join("mailclassify.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.server.base_url, "http://localhost:5000");
        assert_eq!(cfg.server.text_contract, TextContract::ClassifyText);
        assert_eq!(cfg.server.request_timeout(), None);
        assert_eq!(cfg.limits.max_upload_bytes, 16_777_216);
        assert_eq!(cfg.limits.min_text_chars, 10);
        assert_eq!(cfg.ui.result_scroll_delay_ms, 300);
        assert!(cfg.clipboard.fallback_command.is_empty());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial = r#"
[server]
base_url = "https://classifier.internal:8443"
text_contract = "upload-form"
request_timeout_secs = 30

[ui]
toast_secs = 2
"#;
        let cfg: Config = toml::from_str(partial).expect("parse partial");
        assert_eq!(cfg.server.base_url, "https://classifier.internal:8443");
        assert_eq!(cfg.server.text_contract, TextContract::UploadForm);
        assert_eq!(cfg.server.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(cfg.ui.toast_secs, 2);
        // Other fields use defaults
        assert_eq!(cfg.ui.example_focus_delay_ms, 200);
        assert_eq!(cfg.general.log_level, "warn");
    }

    #[test]
    fn test_zero_timeout_means_no_timeout() {
        let server = ServerConfig {
            request_timeout_secs: Some(0),
            ..ServerConfig::default()
        };
        assert_eq!(server.request_timeout(), None);
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.server.base_url, cfg.server.base_url);
        assert_eq!(parsed.limits.max_upload_bytes, cfg.limits.max_upload_bytes);
    }

    #[test]
    fn test_log_file_lives_in_cache_dir() {
        let mut cfg = Config::default();
        cfg.general.cache_dir = Some(PathBuf::from("/tmp/mc-cache"));
        assert_eq!(
            log_file_path(&cfg),
            PathBuf::from("/tmp/mc-cache/mailclassify.log")
        );
    }
}
