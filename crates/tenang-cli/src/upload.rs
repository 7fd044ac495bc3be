//! # Upload-URL Subcommand
//!
//! Resolves a stored upload path (as saved by the backend, e.g.
//! `avatars/42.png` or `/storage/articles/cover.jpg`) to the absolute URL
//! clients display. The storage base comes from `TENANG_STORAGE_URL`.

use anyhow::{Context, Result};
use clap::Args;

use tenang_core::TenangConfig;

/// Arguments for the `tenang upload-url` subcommand.
#[derive(Args, Debug)]
pub struct UploadUrlArgs {
    /// Stored upload path or absolute URL.
    #[arg(value_name = "PATH")]
    pub path: String,
}

/// Execute the upload-url subcommand.
///
/// Returns exit code: 0 with the URL printed, 1 when the path is empty or
/// refused.
pub fn run_upload_url(args: &UploadUrlArgs) -> Result<u8> {
    let config = TenangConfig::from_env().context("invalid storage configuration")?;
    tracing::debug!(storage_url = %config.storage_url, "loaded storage configuration");
    match resolve(&config, &args.path) {
        Some(url) => {
            println!("{url}");
            Ok(0)
        }
        None => {
            eprintln!("no displayable URL for {:?}", args.path);
            Ok(1)
        }
    }
}

/// Resolve `path` against `config`, as a display string.
pub fn resolve(config: &TenangConfig, path: &str) -> Option<String> {
    config.upload_url(path).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_the_storage_base() {
        let config = TenangConfig::local(8000).unwrap();
        assert_eq!(
            resolve(&config, "/storage/avatars/42.png").as_deref(),
            Some("http://127.0.0.1:8000/storage/avatars/42.png")
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        let config = TenangConfig::local(8000).unwrap();
        assert_eq!(
            resolve(&config, "https://cdn.example.com/a.png").as_deref(),
            Some("https://cdn.example.com/a.png")
        );
    }

    #[test]
    fn refused_paths_resolve_to_nothing() {
        let config = TenangConfig::local(8000).unwrap();
        assert_eq!(resolve(&config, "javascript:alert(1)"), None);
        assert_eq!(resolve(&config, "../secrets.env"), None);
        assert_eq!(resolve(&config, "   "), None);
    }
}
