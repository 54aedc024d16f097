//! Command implementations and dispatch.

pub mod config;
pub mod init;
pub mod pair;
pub mod search;
pub mod source;
pub mod status;
pub mod verse;

use std::process::ExitCode;

use scribe_index::VerseScope;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &mut CommandContext) -> ExitCode {
    match command {
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Status => status::run(ctx),
        Commands::Config => config::run(ctx),
        Commands::Verse(cmd) => verse::run(ctx, &cmd),
        Commands::Pair(cmd) => pair::run(ctx, &cmd),
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Source(cmd) => source::run(ctx, &cmd),
    }
}

/// Parses an optional `--in` scope, reporting a malformed one.
fn parse_scope(scope: Option<&str>) -> Result<Option<VerseScope>, ExitCode> {
    scope
        .map(VerseScope::parse)
        .transpose()
        .map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
}
