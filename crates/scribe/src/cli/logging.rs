//! Log output for the CLI.
//!
//! Library crates emit `tracing` events; the binary installs a stderr subscriber. The
//! `SCRIBE_LOG` environment variable takes an `EnvFilter` directive and overrides `-v`.

use std::{env, io};

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding a log filter directive.
pub const LOG_ENV: &str = "SCRIBE_LOG";

/// Returns the default filter directive for a `-v` count.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Installs the stderr subscriber.
pub fn init(verbose: u8) {
    let filter = env::var(LOG_ENV)
        .ok()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)));

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(filter);

    if tracing_subscriber::registry().with(layer).try_init().is_err() {
        eprintln!("warning: log subscriber already initialized");
    }
}
