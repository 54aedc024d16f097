//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules.

use std::path::Path;

use crate::{
    Config, IndexSettings, SearchSettings,
    discovery::ConfigFile,
    parse::{RawConfig, RawIndexSettings, RawSearchSettings},
};

/// A parsed config file with where it came from.
pub struct ParsedConfig {
    /// The config file.
    pub file: ConfigFile,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings and extension lists: first defined value wins
/// - Exclude patterns: accumulated from every file, duplicates dropped
/// - The project root is the directory of the closest project config
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    if configs.is_empty() {
        return Config::default();
    }

    let index = merge_index_settings(configs);
    let search = merge_search_settings(configs);
    let config_root = configs
        .iter()
        .find_map(|c| c.file.project_dir())
        .map(Path::to_path_buf);

    Config {
        index,
        search,
        config_root,
    }
}

/// Merges index settings.
fn merge_index_settings(configs: &[ParsedConfig]) -> IndexSettings {
    let mut result = IndexSettings::default();

    // Reverse order (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref index) = parsed.config.index {
            apply_raw_index(&mut result, index);
        }
    }

    // Excludes are additive, highest precedence listed first
    let mut exclude: Vec<String> = Vec::new();
    for parsed in configs {
        if let Some(ref index) = parsed.config.index
            && let Some(ref patterns) = index.exclude
        {
            for pattern in patterns {
                if !exclude.contains(pattern) {
                    exclude.push(pattern.clone());
                }
            }
        }
    }
    if configs
        .iter()
        .any(|c| c.config.index.as_ref().is_some_and(|i| i.exclude.is_some()))
    {
        result.exclude = exclude;
    }

    result
}

/// Applies raw index settings to result, overwriting any present values.
fn apply_raw_index(result: &mut IndexSettings, raw: &RawIndexSettings) {
    if let Some(ref v) = raw.source_extensions {
        result.source_extensions = normalize_extensions(v);
    }
    if let Some(ref v) = raw.target_extensions {
        result.target_extensions = normalize_extensions(v);
    }
    if let Some(ref v) = raw.text_cell_type {
        result.text_cell_type = v.clone();
    }
    if let Some(ref v) = raw.stemmer {
        result.stemmer = v.clone();
    }
}

/// Strips a leading dot so `.source` and `source` are equivalent.
fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.trim_start_matches('.').to_string())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Merges search settings.
fn merge_search_settings(configs: &[ParsedConfig]) -> SearchSettings {
    let mut result = SearchSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref search) = parsed.config.search {
            apply_raw_search(&mut result, search);
        }
    }

    result
}

/// Applies raw search settings to result.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.limit {
        result.limit = v;
    }
    if let Some(v) = raw.fuzziness {
        result.fuzziness = v;
    }
    if let Some(v) = raw.fallback_fuzziness {
        result.fallback_fuzziness = v;
    }
    if let Some(v) = raw.wildcard_fallback {
        result.wildcard_fallback = v;
    }
}
