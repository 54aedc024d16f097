//! Implementation of `scribe pair`.

use std::process::ExitCode;

use scribe_index::get_translation_pair_by_vref;

use crate::cli::{args::PairCommand, context::CommandContext, output::output_pair};

/// Shows the source text and translation of one verse.
pub fn run(ctx: &mut CommandContext, cmd: &PairCommand) -> ExitCode {
    let root = ctx.project_root();
    let indexes = match ctx.indexes() {
        Ok(indexes) => indexes,
        Err(code) => return code,
    };

    match get_translation_pair_by_vref(&indexes.pairs, &cmd.id) {
        Ok(Some(pair)) => output_pair(&pair, cmd.output.json, &root),
        Ok(None) => {
            eprintln!("error: not found: {}", cmd.id);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: failed to read translation pair: {e}");
            ExitCode::FAILURE
        }
    }
}
