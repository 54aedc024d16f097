//! Implementation of `scribe verse`.

use std::process::ExitCode;

use scribe_index::{get_source_verse_by_vref, get_target_verse_by_vref};

use crate::cli::{
    args::VerseCommand,
    context::CommandContext,
    output::{output_source_verse, output_verse},
};

/// Shows the translation, or with `--source` the source text, of one verse.
pub fn run(ctx: &mut CommandContext, cmd: &VerseCommand) -> ExitCode {
    let root = ctx.project_root();
    let indexes = match ctx.indexes() {
        Ok(indexes) => indexes,
        Err(code) => return code,
    };

    if cmd.source {
        return match get_source_verse_by_vref(&indexes.source, &cmd.id) {
            Ok(Some(verse)) => output_source_verse(&verse, cmd.output.json),
            Ok(None) => not_found(&cmd.id),
            Err(e) => {
                eprintln!("error: failed to read source verse: {e}");
                ExitCode::FAILURE
            }
        };
    }

    match get_target_verse_by_vref(&indexes.pairs, &cmd.id) {
        Ok(Some(verse)) => output_verse(&verse, cmd.output.json, &root),
        Ok(None) => not_found(&cmd.id),
        Err(e) => {
            eprintln!("error: failed to read verse: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Reports a missing verse.
fn not_found(id: &str) -> ExitCode {
    eprintln!("error: not found: {id}");
    ExitCode::FAILURE
}
