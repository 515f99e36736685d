// Content source: where site.json, stats CSVs and other data files come from.
//
// Every fetch is a single best-effort attempt. Callers decide how a failure
// degrades (usually a per-section placeholder).

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, SourceConfig, SourceKind};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("invalid JSON in {location}: {source}")]
    Json {
        location: String,
        source: serde_json::Error,
    },
}

/// A content root: a local directory or a remote base URL.
#[derive(Debug, Clone)]
pub enum DataSource {
    Local { root: PathBuf },
    Http { client: reqwest::Client, base_url: String },
}

impl DataSource {
    pub fn local(root: impl Into<PathBuf>) -> Self {
        DataSource::Local { root: root.into() }
    }

    pub fn http(base_url: &str) -> Self {
        DataSource::Http {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the source described by `[source]`, resolving a local root
    /// against `base_dir`.
    pub fn from_config(config: &SourceConfig, base_dir: &Path) -> Result<Self, ConfigError> {
        match config.kind {
            SourceKind::Local => Ok(Self::local(base_dir.join(&config.root))),
            SourceKind::Http => match config.base_url.as_deref() {
                Some(url) if !url.trim().is_empty() => Ok(Self::http(url.trim())),
                _ => Err(ConfigError::ValidationError {
                    field: "source.base_url".into(),
                    message: "required when source.kind = \"http\"".into(),
                }),
            },
        }
    }

    /// Human-readable location of `path` within this source (for logs and
    /// error messages).
    pub fn location(&self, path: &str) -> String {
        let rel = path.trim_start_matches('/');
        match self {
            DataSource::Local { root } => root.join(rel).display().to_string(),
            DataSource::Http { base_url, .. } => format!("{base_url}/{rel}"),
        }
    }

    /// Fetch `path` as text. Site paths may carry a leading `/`.
    pub async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let rel = path.trim_start_matches('/');
        match self {
            DataSource::Local { root } => {
                let full = root.join(rel);
                debug!("reading {}", full.display());
                tokio::fs::read_to_string(&full)
                    .await
                    .map_err(|e| FetchError::Io {
                        path: full,
                        source: e,
                    })
            }
            DataSource::Http { client, base_url } => {
                let url = format!("{base_url}/{rel}");
                debug!("fetching {url}");
                let response = client
                    .get(&url)
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| FetchError::Http {
                        url: url.clone(),
                        source: e,
                    })?;
                response
                    .text()
                    .await
                    .map_err(|e| FetchError::Http { url, source: e })
            }
        }
    }

    /// Fetch `path` and deserialize it as JSON.
    pub async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let text = self.fetch_text(path).await?;
        serde_json::from_str(&text).map_err(|e| FetchError::Json {
            location: self.location(path),
            source: e,
        })
    }
}
