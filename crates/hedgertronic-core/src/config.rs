// Build configuration loading and parsing (config/build.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read build config {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("build config {} is not valid: {source}", path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to parse site config {origin}: {source}")]
    SiteParseError {
        origin: String,
        source: serde_json::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error(
        "no defaults/build.toml or config/ directory under {}; \
         run hedgertronic from the site repository root",
        dir.display()
    )]
    NoBuildConfig { dir: PathBuf },

    #[error("failed to seed {} from defaults/: {source}", path.display())]
    Seed {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the site JSON, resolved against the data source.
    pub site_config: String,
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// build.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire build.toml file.
#[derive(Debug, Clone, Deserialize)]
struct BuildFile {
    site: SiteSection,
    source: SourceConfig,
    output: OutputConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct SiteSection {
    config: String,
}

/// Where site content is fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Local,
    Http,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Local content root, relative to the build directory.
    #[serde(default = "default_root")]
    pub root: String,
    /// Base URL for `kind = "http"`.
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    /// Category selected when the page first renders.
    #[serde(default = "default_category")]
    pub default_category: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            dir: default_log_dir(),
        }
    }
}

fn default_root() -> String {
    ".".into()
}

fn default_category() -> String {
    "Minors".into()
}

fn default_filter() -> String {
    "hedgertronic_site=info,hedgertronic_stats=info,hedgertronic_core=info,warn".into()
}

fn default_log_dir() -> String {
    "logs".into()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Path of the build config under `base_dir`.
pub fn build_config_path(base_dir: &Path) -> PathBuf {
    base_dir.join("config").join("build.toml")
}

/// Load and validate `config/build.toml` under `base_dir`. Nothing is
/// seeded; `load_config` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = build_config_path(base_dir);
    let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Unreadable {
        path: path.clone(),
        source: e,
    })?;
    let file: BuildFile =
        toml::from_str(&text).map_err(|e| ConfigError::ParseError { path, source: e })?;

    let config = Config {
        site_config: file.site.config,
        source: file.source,
        output: file.output,
        logging: file.logging,
    };
    validate(&config)?;
    Ok(config)
}

/// Seed `config/` from `defaults/` on a fresh checkout. Files already in
/// `config/` are left alone and `*.example` templates are never copied.
/// Returns the files written.
pub fn seed_build_config(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults.is_dir() {
        return if config_dir.is_dir() {
            Ok(Vec::new())
        } else {
            Err(ConfigError::NoBuildConfig {
                dir: base_dir.to_path_buf(),
            })
        };
    }

    let seed_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ConfigError::Seed { path, source }
    };

    std::fs::create_dir_all(&config_dir).map_err(seed_err(&config_dir))?;
    let mut sources = Vec::new();
    for entry in std::fs::read_dir(&defaults).map_err(seed_err(&defaults))? {
        let path = entry.map_err(seed_err(&defaults))?.path();
        if path.is_file() && !is_template(&path) {
            sources.push(path);
        }
    }
    sources.sort();

    let mut written = Vec::new();
    for src in sources {
        let Some(name) = src.file_name() else {
            continue;
        };
        let dest = config_dir.join(name);
        if copy_if_absent(&src, &dest).map_err(seed_err(&dest))? {
            written.push(dest);
        }
    }
    Ok(written)
}

fn is_template(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "example")
}

/// Copy `src` to `dest` unless `dest` exists. `create_new` keeps a
/// hand-edited build.toml from being overwritten.
fn copy_if_absent(src: &Path, dest: &Path) -> std::io::Result<bool> {
    use std::io::Write;

    let mut out = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dest)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(e),
    };
    out.write_all(&std::fs::read(src)?)?;
    Ok(true)
}

/// Seed defaults into the working directory, then load its build config.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::Unreadable {
        path: PathBuf::from("."),
        source: e,
    })?;
    seed_build_config(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.site_config.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "site.config".into(),
            message: "must not be empty".into(),
        });
    }

    if config.source.kind == SourceKind::Http {
        let has_url = config
            .source
            .base_url
            .as_deref()
            .is_some_and(|u| !u.trim().is_empty());
        if !has_url {
            return Err(ConfigError::ValidationError {
                field: "source.base_url".into(),
                message: "required when source.kind = \"http\"".into(),
            });
        }
    }

    if config.output.path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "output.path".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
