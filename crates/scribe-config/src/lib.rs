//! Configuration system for scribe.
//!
//! scribe uses TOML configuration files named `.scribe.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.scribe.toml` files found, then loading `~/.scribe.toml` as the global config with lowest
//! precedence. The directory of the closest project config is the project root that gets
//! scanned for source and target notebooks.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod patterns;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{
    CONFIG_FILENAME, ConfigFile, ConfigScope, discover_config_files, global_config_path,
};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawIndexSettings, RawSearchSettings, parse_config_file, parse_config_str,
};
pub use patterns::{CompiledPatterns, FileRole};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Stemmer names accepted by `index.stemmer`.
///
/// `none` disables stemming; the rest are the languages the search engine ships stemmers for.
pub const SUPPORTED_STEMMERS: &[&str] = &[
    "none",
    "arabic",
    "danish",
    "dutch",
    "english",
    "finnish",
    "french",
    "german",
    "greek",
    "hungarian",
    "italian",
    "norwegian",
    "portuguese",
    "romanian",
    "russian",
    "spanish",
    "swedish",
    "tamil",
    "turkish",
];

/// Top-level merged configuration for scribe.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.scribe.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Index population settings.
    pub index: IndexSettings,
    /// Retrieval settings.
    pub search: SearchSettings,
    /// Directory containing the most specific config file (the project root).
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.scribe.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.scribe.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.scribe.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        Self::load_config_files(discover_config_files(cwd))
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first. The home
    /// directory's config is treated as global.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        Self::load_config_files(files.iter().cloned().map(ConfigFile::at).collect())
    }

    /// Parses and merges classified config files.
    fn load_config_files(files: Vec<ConfigFile>) -> Result<Self, ConfigError> {
        let parsed: Vec<ParsedConfig> = files
            .into_iter()
            .map(|file| {
                let config = parse_config_file(&file.path)?;
                Ok(ParsedConfig { file, config })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Compiles the exclude patterns and extension lists for this configuration.
    pub fn compile_patterns(&self) -> Result<CompiledPatterns, ConfigError> {
        CompiledPatterns::compile(&self.index)
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - Fuzziness values outside `[0, 1]` or a fallback stricter than the primary tier
    /// - A zero default limit
    /// - Missing or overlapping source/target extensions
    /// - Unsupported stemmers and invalid exclude globs
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Returns the directory to scan: the config root, or `cwd` when no project config exists.
    pub fn project_root(&self, cwd: &Path) -> PathBuf {
        self.config_root
            .clone()
            .unwrap_or_else(|| cwd.to_path_buf())
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// This outputs the merged configuration in the same format as a `.scribe.toml` file,
    /// making it easy to see the effective configuration.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            index: self.index.clone(),
            search: self.search.clone(),
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Settings that control how project files populate the indexes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Extensions (without the dot) of source-language notebooks.
    pub source_extensions: Vec<String>,
    /// Extensions (without the dot) of target-language notebooks.
    pub target_extensions: Vec<String>,
    /// Cell type tag that marks translatable text.
    pub text_cell_type: String,
    /// Stemming language, or `none`.
    pub stemmer: String,
    /// Glob patterns for project paths to skip.
    pub exclude: Vec<String>,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            source_extensions: vec!["source".to_string()],
            target_extensions: vec!["codex".to_string()],
            text_cell_type: "text".to_string(),
            stemmer: "none".to_string(),
            exclude: vec!["**/node_modules/**".to_string()],
        }
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Default number of results per query.
    pub limit: usize,
    /// Fuzziness for target searches and the precise source tier.
    pub fuzziness: f32,
    /// Fuzziness for the lenient source tier.
    pub fallback_fuzziness: f32,
    /// Whether the wildcard tier runs when nothing else matched.
    pub wildcard_fallback: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            limit: 5,
            fuzziness: 0.2,
            fallback_fuzziness: 0.4,
            wildcard_fallback: true,
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Index population settings.
    index: IndexSettings,
    /// Retrieval settings.
    search: SearchSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_defaults() {
        let index = IndexSettings::default();
        assert_eq!(index.source_extensions, vec!["source"]);
        assert_eq!(index.target_extensions, vec!["codex"]);
        assert_eq!(index.text_cell_type, "text");
        assert_eq!(index.stemmer, "none");
        assert_eq!(index.exclude, vec!["**/node_modules/**"]);
    }

    #[test]
    fn test_search_settings_defaults() {
        let search = SearchSettings::default();
        assert_eq!(search.limit, 5);
        assert!((search.fuzziness - 0.2).abs() < f32::EPSILON);
        assert!((search.fallback_fuzziness - 0.4).abs() < f32::EPSILON);
        assert!(search.wildcard_fallback);
    }

    #[test]
    fn test_project_root_falls_back_to_cwd() {
        let config = Config::default();
        assert_eq!(config.project_root(Path::new("/tmp/x")), PathBuf::from("/tmp/x"));

        let rooted = Config {
            config_root: Some(PathBuf::from("/work/project")),
            ..Config::default()
        };
        assert_eq!(
            rooted.project_root(Path::new("/tmp/x")),
            PathBuf::from("/work/project")
        );
    }

    #[test]
    fn test_settings_to_toml() {
        let toml = Config::default().settings_to_toml().unwrap();

        assert!(toml.contains("[index]"));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("stemmer = \"none\""));
        assert!(toml.contains("limit = 5"));

        let parsed: toml::Value = toml::from_str(&toml).unwrap();
        assert!(parsed.get("index").is_some());
        assert!(parsed.get("search").is_some());
    }

    #[test]
    fn test_settings_to_toml_round_trips_through_parser() {
        let mut config = Config::default();
        config.search.limit = 11;
        config.index.stemmer = "french".into();

        let toml = config.settings_to_toml().unwrap();
        let raw = parse_config_str(&toml, Path::new("effective.toml")).unwrap();
        assert_eq!(raw.search.unwrap().limit, Some(11));
        assert_eq!(raw.index.unwrap().stemmer.as_deref(), Some("french"));
    }
}
