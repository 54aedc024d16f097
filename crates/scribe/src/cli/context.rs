//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use scribe_config::Config;
use scribe_index::{ProjectIndexes, TracingReporter};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Indexes built for this invocation.
    indexes: Option<ProjectIndexes>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self {
            cwd,
            config,
            indexes: None,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            indexes: None,
        })
    }

    /// Returns the directory whose files are indexed.
    pub fn project_root(&self) -> PathBuf {
        self.config.project_root(&self.cwd)
    }

    /// Returns the project indexes, building them on first use.
    pub fn indexes(&mut self) -> Result<&ProjectIndexes, ExitCode> {
        if self.indexes.is_none() {
            let indexes = build_indexes_or_failure(&self.config, &self.project_root())?;
            self.indexes = Some(indexes);
        }
        self.indexes.as_ref().ok_or(ExitCode::FAILURE)
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}

/// Builds both indexes from the project files, exiting with an error on failure.
fn build_indexes_or_failure(config: &Config, root: &Path) -> Result<ProjectIndexes, ExitCode> {
    ProjectIndexes::build(config, root, &mut TracingReporter).map_err(|e| {
        eprintln!("error: indexing failed: {e}");
        ExitCode::FAILURE
    })
}
