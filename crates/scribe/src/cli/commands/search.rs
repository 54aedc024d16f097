//! Implementation of `scribe search`.

use std::process::ExitCode;

use scribe_index::rank_target_verses;

use crate::cli::{
    args::SearchCommand,
    commands::parse_scope,
    context::CommandContext,
    output::output_verses,
};

/// Searches translated text and prints matching verses.
pub fn run(ctx: &mut CommandContext, cmd: &SearchCommand) -> ExitCode {
    let limit = cmd.limit.unwrap_or(ctx.config.search.limit);
    let fuzziness = cmd.fuzziness.unwrap_or(ctx.config.search.fuzziness);
    let query = cmd.query.join(" ");
    let root = ctx.project_root();
    let scope = match parse_scope(cmd.scope.as_deref()) {
        Ok(scope) => scope,
        Err(code) => return code,
    };

    let indexes = match ctx.indexes() {
        Ok(indexes) => indexes,
        Err(code) => return code,
    };

    match rank_target_verses(&indexes.pairs, &query, limit, fuzziness, scope.as_ref()) {
        Ok(hits) => output_verses(&hits, &query, cmd.output.json, &root),
        Err(e) => {
            eprintln!("error: search failed: {e}");
            ExitCode::FAILURE
        }
    }
}
