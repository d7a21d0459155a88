//! Site configuration loaded from `mdsite.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "mdsite.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Where the site comes from and where it goes.
///
/// Every key is optional in the file; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Markdown sources and page assets (default `content`).
    pub content_dir: PathBuf,
    /// Copied to the output as-is before pages are generated (default `static`).
    pub static_dir: PathBuf,
    /// HTML template with `{{ Title }}` and `{{ Content }}` (default `template.html`).
    pub template: PathBuf,
    /// Generated site, wiped on every build (default `public`).
    pub output_dir: PathBuf,
    /// Prefix for root-relative `href`/`src` links (default `/`).
    pub base_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            template: PathBuf::from("template.html"),
            output_dir: PathBuf::from("public"),
            base_path: "/".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load a config file that must exist.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given, otherwise `mdsite.toml` if it exists,
    /// otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            log::debug!("using config file {}", default_path.display());
            Self::load_from_path(default_path)
        } else {
            Ok(Self::default())
        }
    }
}
