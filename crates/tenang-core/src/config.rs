//! Environment configuration.
//!
//! Defaults target a local development backend. Override via environment
//! variables or build one explicitly for tests.

use url::Url;

use crate::error::ConfigError;
use crate::upload::resolve_upload_url;

/// Default base URL under which the backend serves uploaded files.
pub const DEFAULT_STORAGE_URL: &str = "http://localhost:8000/storage/";

/// Runtime configuration shared by the CLI and library consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenangConfig {
    /// Base URL for uploaded files. Always ends with `/`.
    pub storage_url: Url,
}

impl TenangConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `TENANG_STORAGE_URL` (default: `http://localhost:8000/storage/`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            storage_url: env_url("TENANG_STORAGE_URL", DEFAULT_STORAGE_URL)?,
        })
    }

    /// Create a configuration pointing at a loopback backend (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the loopback URL cannot be
    /// parsed.
    pub fn local(port: u16) -> Result<Self, ConfigError> {
        Ok(Self {
            storage_url: parse_base_url("local", &format!("http://127.0.0.1:{port}/storage"))?,
        })
    }

    /// Resolve a stored upload path against [`storage_url`](Self::storage_url).
    pub fn upload_url(&self, path: &str) -> Option<Url> {
        resolve_upload_url(&self.storage_url, path)
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_base_url(var, &raw)
}

/// Parse a base URL, enforcing a trailing slash so that `Url::join`
/// appends to the last path segment instead of replacing it.
fn parse_base_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            var.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
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
    fn local_builds_loopback_storage_url() {
        let cfg = TenangConfig::local(9000).unwrap();
        assert_eq!(cfg.storage_url.as_str(), "http://127.0.0.1:9000/storage/");
    }

    #[test]
    fn env_url_uses_default_when_var_absent() {
        let url = env_url("TENANG_NONEXISTENT_VAR_12345", DEFAULT_STORAGE_URL).unwrap();
        assert_eq!(url.as_str(), DEFAULT_STORAGE_URL);
    }

    #[test]
    fn env_url_rejects_invalid_url() {
        std::env::set_var("TENANG_TEST_BAD_URL", "not a url");
        let result = env_url("TENANG_TEST_BAD_URL", DEFAULT_STORAGE_URL);
        std::env::remove_var("TENANG_TEST_BAD_URL");
        assert!(matches!(result, Err(ConfigError::InvalidUrl(var, _)) if var == "TENANG_TEST_BAD_URL"));
    }

    #[test]
    fn trailing_slash_is_enforced() {
        let url = parse_base_url("X", "https://cdn.example.com/files").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/files/");
    }

    #[test]
    fn non_base_url_is_rejected() {
        assert!(parse_base_url("X", "mailto:someone@example.com").is_err());
    }

    #[test]
    fn upload_url_joins_onto_storage() {
        let cfg = TenangConfig::local(8000).unwrap();
        let url = cfg.upload_url("avatars/a.png").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/storage/avatars/a.png");
    }
}
