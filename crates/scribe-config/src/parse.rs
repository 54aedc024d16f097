//! Configuration file parsing.
//!
//! Parses individual `.scribe.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Index population section.
    pub index: Option<RawIndexSettings>,
    /// Retrieval section.
    pub search: Option<RawSearchSettings>,
}

/// Raw index settings.
///
/// Extension and exclude lists accept either a single string or an array.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawIndexSettings {
    /// File extensions (without the dot) that mark source-language documents.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub source_extensions: Option<Vec<String>>,
    /// File extensions (without the dot) that mark target-language documents.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub target_extensions: Option<Vec<String>>,
    /// Cell type tag that marks translatable text.
    pub text_cell_type: Option<String>,
    /// Stemming language, or `none`.
    pub stemmer: Option<String>,
    /// Glob patterns for project paths to skip.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub exclude: Option<Vec<String>>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Default number of results.
    pub limit: Option<usize>,
    /// Fuzziness for target searches and the precise source tier.
    pub fuzziness: Option<f32>,
    /// Fuzziness for the lenient source tier.
    pub fallback_fuzziness: Option<f32>,
    /// Whether the wildcard tier runs when nothing else matched.
    pub wildcard_fallback: Option<bool>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
