//! Implementation of `scribe source`.

use std::process::ExitCode;

use scribe_index::{rank_pairs_with_tiers, tiers_from_settings};

use crate::cli::{
    args::SourceCommand,
    commands::parse_scope,
    context::CommandContext,
    output::output_pairs,
};

/// Finds translation pairs by source text, widening through the configured tiers.
pub fn run(ctx: &mut CommandContext, cmd: &SourceCommand) -> ExitCode {
    let limit = cmd.limit.unwrap_or(ctx.config.search.limit);
    let tiers = tiers_from_settings(&ctx.config.search);
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

    match rank_pairs_with_tiers(&indexes.pairs, &query, limit, &tiers, scope.as_ref()) {
        Ok(hits) => output_pairs(&hits, &query, cmd.output.json, &root),
        Err(e) => {
            eprintln!("error: search failed: {e}");
            ExitCode::FAILURE
        }
    }
}
