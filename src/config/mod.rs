//! Settings for hn-digest.
//!
//! Settings are read from `~/.config/hn-digest/config.toml` at startup.
//! If the file doesn't exist, a default file with comments is created.
//! The provider credentials live in a separate JSON bundle, see [`provider`].

pub mod provider;

pub use provider::{BundleSource, ConfigProvider, FileBundleSource, StaticBundleSource};

use crate::extractor::ExtractorConfig;
use crate::scheduler::PacingConfig;
use crate::summarizer::SummarizerConfig;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "hn-digest";

/// Main settings struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub page: PageConfig,
    pub pacing: PacingConfig,
    pub extractor: ExtractorConfig,
    pub summarizer: SummarizerConfig,
}

/// Where the listing page lives and how to find links on it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Listing page to augment (default: Hacker News front page)
    pub url: String,

    /// CSS selector matching candidate links, in document order
    pub link_selector: String,

    /// Links starting with this prefix are the aggregator's own discussion pages
    pub discussion_prefix: String,

    /// JSON config bundle; defaults to `config.json` next to this file
    pub bundle_path: Option<PathBuf>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            url: "https://news.ycombinator.com/".to_string(),
            link_selector: ".titleline > a".to_string(),
            discussion_prefix: "https://news.ycombinator.com/item".to_string(),
            bundle_path: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the default path when `None`.
    ///
    /// If the file doesn't exist, creates a default one with comments.
    /// Missing fields use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(settings)
    }

    /// Get the default settings path: `~/.config/hn-digest/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    /// Resolve the bundle path, falling back to `config.json` beside the settings.
    pub fn bundle_path(&self, settings_path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(ref p) = self.page.bundle_path {
            return Ok(p.clone());
        }
        let settings_path = match settings_path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };
        Ok(settings_path.with_file_name("config.json"))
    }

    /// Create a default settings file with comments.
    pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default settings file content with comments.
    fn default_config_content() -> String {
        r##"# hn-digest configuration
#
# Provider credentials (endpointUrl, apiKey, modelName, systemPrompt,
# proxyUrlPrefix) are read from a JSON bundle, `config.json` next to this
# file unless `bundle_path` is set below.

[page]
# Listing page to augment
url = "https://news.ycombinator.com/"

# Selector for candidate links
link_selector = ".titleline > a"

# Links under this prefix are discussion threads and are never summarized
discussion_prefix = "https://news.ycombinator.com/item"

# bundle_path = "/path/to/config.json"

[pacing]
# Links processed concurrently per batch
batch_size = 15

# Pause between batches (milliseconds)
cooldown_ms = 60000

[extractor]
# Hard cap on extracted characters sent for summarization
max_chars = 8000

# Proxy fetch timeout in seconds
timeout_secs = 30

# Content regions tried in order; paragraphs are the fallback
content_selectors = ["article", "main", ".article-content", "#content"]

[summarizer]
temperature = 0.5
max_tokens = 150

# Request timeout in seconds
timeout_secs = 60
"##
        .to_string()
    }
}

/// Settings errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
