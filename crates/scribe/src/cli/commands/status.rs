//! Implementation of `scribe status`.

use std::{path::Path, process::ExitCode};

use scribe_config::{ConfigScope, ConfigWarning, discover_config_files};

use crate::cli::{
    context::CommandContext,
    output::{dim, display_uri, subheader, warning},
};

/// Shows configuration files, project files, index sizes, and validation warnings.
pub fn run(ctx: &mut CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("scribe init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    for file in &config_files {
        match file.scope {
            ConfigScope::Project => println!("   {}", file.path.display()),
            ConfigScope::Global => println!("   {} {}", file.path.display(), dim("(global)")),
        }
    }
    println!();

    let root = ctx.project_root();
    println!("{}", subheader("Project root:"));
    println!("   {}", root.display());
    println!();

    print_indexes(ctx, &root);

    let warnings = ctx.config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints the project files and index sizes.
fn print_indexes(ctx: &mut CommandContext, root: &Path) {
    let Ok(indexes) = ctx.indexes() else {
        println!("{}", subheader("Indexes:"));
        println!("   {}", warning("(not built)"));
        println!();
        return;
    };

    println!("{}", subheader("Source notebooks:"));
    print_paths(indexes.files.sources.iter().map(|p| p.display().to_string()), root);
    println!("{}", subheader("Target notebooks:"));
    print_paths(indexes.files.targets.iter().map(|p| p.display().to_string()), root);

    println!("{}", subheader("Indexes:"));
    println!("   source verses       {}", indexes.source.len());
    println!("   translation pairs   {}", indexes.pairs.len());
    println!();
}

/// Prints project-relative paths, or a placeholder when there are none.
fn print_paths(paths: impl Iterator<Item = String>, root: &Path) {
    let mut any = false;
    for path in paths {
        any = true;
        println!("   {}", display_uri(&path, root));
    }
    if !any {
        println!("   {}", dim("(none found)"));
    }
    println!();
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::NoSourceExtensions | ConfigWarning::NoTargetExtensions => {
                println!(
                    "{}",
                    dim("Hint: set index.source_extensions and index.target_extensions")
                );
            }
            ConfigWarning::UnknownStemmer { .. } => {
                println!("{}", dim("Hint: use \"none\" or a language such as \"english\""));
            }
            _ => {}
        }
    }
}
