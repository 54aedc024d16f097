//! Configuration file discovery.
//!
//! A scribe project is the tree under the closest `.scribe.toml`. Discovery walks up from the
//! working directory collecting project configs until one sets `root = true`, then adds the
//! user's `~/.scribe.toml` unless the walk stopped at a root.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".scribe.toml";

/// Where a configuration file applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// A project config. The closest one marks the project root.
    Project,
    /// The user's `~/.scribe.toml`, which never marks a project.
    Global,
}

/// A configuration file and the scope it applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// Path to the file.
    pub path: PathBuf,
    /// Scope of the file.
    pub scope: ConfigScope,
}

impl ConfigFile {
    /// Classifies a config path: `~/.scribe.toml` is global, anything else is a project config.
    pub fn at(path: PathBuf) -> Self {
        let scope = if global_config_path().is_some_and(|global| global == path) {
            ConfigScope::Global
        } else {
            ConfigScope::Project
        };
        Self { path, scope }
    }

    /// Returns the directory a project config governs, or `None` for the global config.
    pub fn project_dir(&self) -> Option<&Path> {
        match self.scope {
            ConfigScope::Project => self.path.parent(),
            ConfigScope::Global => None,
        }
    }
}

/// Discovers the configuration files that apply in `cwd`.
///
/// Returns files in precedence order: project configs closest to `cwd` first, the global
/// config last. The home directory's config counts as global even when the walk passes
/// through it.
pub fn discover_config_files(cwd: &Path) -> Vec<ConfigFile> {
    let global = global_config_path();
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let path = dir.join(CONFIG_FILENAME);
        if !path.is_file() || global.as_ref() == Some(&path) {
            continue;
        }
        let is_root = is_root_config(&path);
        configs.push(ConfigFile {
            path,
            scope: ConfigScope::Project,
        });
        if is_root {
            return configs;
        }
    }

    if let Some(path) = global
        && path.is_file()
    {
        configs.push(ConfigFile {
            path,
            scope: ConfigScope::Global,
        });
    }
    configs
}

/// Returns the path to the global configuration file (`~/.scribe.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}
