//! Plugin configuration.
//!
//! Loads the zone list and helper names from a TOML file (`imdex.toml` by
//! default) and turns them into [`PluginOptions`] by reading each zone's
//! index JSON.
//!
//! ## Configuration Options
//!
//! ```toml
//! img_shortcode = "image"       # Shortcode name (omit to skip the shortcode)
//! img_url_filter = "imageUrl"   # Filter name (omit to skip the filter)
//!
//! [[zones]]
//! prefix = "en/"                # Source prefix (required with 2+ zones)
//! index = "imdexer/en.json"     # Index JSON, relative to the config file
//! base_url = "/img/en"          # URL the zone's image paths are joined onto
//!
//! [[zones]]
//! prefix = "fr/"
//! index = "imdexer/fr.json"
//! base_url = "/img/fr"
//! ```
//!
//! With a single zone `prefix` is ignored and every source belongs to it.
//! With several zones, sources are matched against prefixes in file order
//! and the first match wins.
//!
//! Unknown keys are rejected to catch typos early.

use crate::plugin::PluginOptions;
use crate::types::{ImageIndex, IndexError};
use crate::zone::Zone;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Index error: {0}")]
    Index(#[from] IndexError),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginConfig {
    /// Name the image shortcode is registered under.
    pub img_shortcode: Option<String>,
    /// Name the image URL filter is registered under.
    pub img_url_filter: Option<String>,
    /// Zones in matching order.
    pub zones: Vec<ZoneConfig>,
}

/// One `[[zones]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneConfig {
    #[serde(default)]
    pub prefix: Option<String>,
    /// Path of the index JSON file.
    #[serde(alias = "imdexer")]
    pub index: PathBuf,
    #[serde(default, alias = "baseUrl")]
    pub base_url: String,
}

impl PluginConfig {
    /// Validate the zone list and helper names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.zones.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[zones]] entry is required".into(),
            ));
        }
        for (key, name) in [
            ("img_shortcode", &self.img_shortcode),
            ("img_url_filter", &self.img_url_filter),
        ] {
            if name.as_deref().is_some_and(str::is_empty) {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        if self.zones.len() == 1 {
            return Ok(());
        }
        for (i, zone) in self.zones.iter().enumerate() {
            let Some(prefix) = zone.prefix.as_deref() else {
                return Err(ConfigError::Validation(format!(
                    "zones[{i}] needs a prefix when more than one zone is configured"
                )));
            };
            // First match wins, so a zone behind a shorter prefix is dead.
            if let Some(j) = self.zones[..i]
                .iter()
                .position(|earlier| earlier.prefix.as_deref().is_some_and(|p| prefix.starts_with(p)))
            {
                return Err(ConfigError::Validation(format!(
                    "zones[{i}] prefix {prefix:?} is unreachable behind zones[{j}]"
                )));
            }
        }
        Ok(())
    }

    /// Load every zone's index. Relative index paths resolve against `base_dir`.
    pub fn load_zones(&self, base_dir: &Path) -> Result<Vec<Zone>, ConfigError> {
        self.zones
            .iter()
            .map(|zone| -> Result<Zone, ConfigError> {
                let index = ImageIndex::load(&base_dir.join(&zone.index))?;
                tracing::debug!(
                    index = %zone.index.display(),
                    records = index.len(),
                    "loaded image index"
                );
                Ok(Zone {
                    prefix: zone.prefix.clone(),
                    index: Some(index),
                    base_url: zone.base_url.clone(),
                })
            })
            .collect()
    }

    /// Load all indexes and assemble the registration options.
    pub fn plugin_options(&self, base_dir: &Path) -> Result<PluginOptions, ConfigError> {
        Ok(PluginOptions {
            img_shortcode: self.img_shortcode.clone(),
            img_url_filter: self.img_url_filter.clone(),
            zones: self.load_zones(base_dir)?,
        })
    }
}

/// Parse and validate a config from a TOML string.
pub fn parse_config(content: &str) -> Result<PluginConfig, ConfigError> {
    let config: PluginConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate the config file at `path`.
pub fn load_config(path: &Path) -> Result<PluginConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Directory that relative index paths in `config_path` resolve against.
pub fn config_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Returns a fully-commented stock config.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# imdex-img configuration
# =======================
# Index paths are relative to this file.
# Unknown keys will cause an error.

# Name of the image shortcode. Remove to skip registering it.
img_shortcode = "image"

# Name of the image URL filter. Remove to skip registering it.
img_url_filter = "imageUrl"

# ---------------------------------------------------------------------------
# Zones
# ---------------------------------------------------------------------------
# Each zone pairs an index (written by the indexer) with the base URL its
# images are served from.
#
# With one zone, every image source belongs to it and `prefix` is ignored.
# With several zones, `prefix` is required: a source is matched against the
# prefixes in the order listed here, the first match wins, and the prefix
# is stripped before the index lookup ("fr/hero.jpg" -> "hero.jpg").

[[zones]]
prefix = "en/"
index = "imdexer/en.json"
base_url = "/img/en"

[[zones]]
prefix = "fr/"
index = "imdexer/fr.json"
base_url = "/img/fr"
"##
}
