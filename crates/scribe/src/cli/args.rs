//! Clap argument definitions for the `scribe` CLI.

use std::{env, process::exit};

use clap::{Args, CommandFactory, Parser, Subcommand, error::ErrorKind};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "Scribe - Translation pair lookup and search")]
pub struct Cli {
    /// Log verbosity (-v for info, -vv for debug); SCRIBE_LOG overrides
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `scribe init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.scribe.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `scribe verse`.
#[derive(Args, Debug, Clone)]
pub struct VerseCommand {
    /// Verse identifier, e.g. "GEN 1:1"
    pub id: String,

    /// Show the source verse and its versions instead of the translation
    #[arg(long)]
    pub source: bool,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `scribe pair`.
#[derive(Args, Debug, Clone)]
pub struct PairCommand {
    /// Verse identifier, e.g. "GEN 1:1"
    pub id: String,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `scribe search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Words to look for in the translation
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Maximum results [default: search.limit]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Edit-distance budget, as a fraction of term length below 1 [default: search.fuzziness]
    #[arg(short = 'f', long)]
    pub fuzziness: Option<f32>,

    /// Only search this book or chapter, e.g. `GEN` or `GEN 1`
    #[arg(long = "in", value_name = "BOOK [CHAPTER]")]
    pub scope: Option<String>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `scribe source`.
#[derive(Args, Debug, Clone)]
pub struct SourceCommand {
    /// Words to look for in the source text
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Maximum results [default: search.limit]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Only search this book or chapter, e.g. `GEN` or `GEN 1`
    #[arg(long = "in", value_name = "BOOK [CHAPTER]")]
    pub scope: Option<String>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Supported `scribe` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Initialize scribe configuration in current directory
    Init(InitCommand),

    /// Show project files, index counts, and validate configuration
    Status,

    /// Show effective configuration settings
    Config,

    /// Show the translation (or source) of one verse
    Verse(VerseCommand),

    /// Show the source and translation of one verse side by side
    Pair(PairCommand),

    /// Search translated text
    #[command(after_help = "\
Terms match as prefixes and tolerate typos in proportion to their length.
A verse matches if any term matches.

EXAMPLES:
  scribe search commencement
  scribe search 'la terre' -n 10
  scribe search lumiere --fuzziness 0.4")]
    Search(SearchCommand),

    /// Find translation pairs whose source text resembles a query
    #[command(after_help = "\
The search widens until something is found:
  1. precise   prefix matching with search.fuzziness
  2. lenient   search.fallback_fuzziness, when fewer than the limit matched
  3. wildcard  any verses, when nothing matched (search.wildcard_fallback)

EXAMPLES:
  scribe source 'in the beginning'
  scribe source light -n 3 --json
  scribe source light --in 'GEN 1'")]
    Source(SourceCommand),
}

/// Parses CLI arguments, printing the command overview for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp {
                let args: Vec<_> = env::args().collect();
                if args.len() <= 2 {
                    print_overview_help();
                    exit(0);
                }
            }
            e.exit();
        }
    }
}

/// Prints custom help listing each subcommand on one line.
fn print_overview_help() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: scribe [-v...] <COMMAND>");
    println!();
    println!("Commands:");

    for sub in cmd.get_subcommands() {
        let name = sub.get_name();
        if name == "help" {
            continue;
        }
        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {name:8} {about}");
    }

    println!(
        "  {:<8} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("  -v, --verbose...  Log verbosity (-v for info, -vv for debug)");
    println!("  -h, --help        Print help");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verbosity_after_subcommand() {
        let cli = Cli::try_parse_from(["scribe", "search", "terre", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Search(cmd) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(cmd.query, vec!["terre"]);
        assert_eq!(cmd.limit, None);
    }

    #[test]
    fn query_words_are_collected() {
        let cli =
            Cli::try_parse_from(["scribe", "source", "in", "the", "beginning", "-n", "3"]).unwrap();
        let Commands::Source(cmd) = cli.command else {
            panic!("expected source");
        };
        assert_eq!(cmd.query.join(" "), "in the beginning");
        assert_eq!(cmd.limit, Some(3));
        assert_eq!(cmd.scope, None);
    }

    #[test]
    fn scope_is_separate_from_query_words() {
        let cli = Cli::try_parse_from(["scribe", "search", "in", "--in", "GEN 1"]).unwrap();
        let Commands::Search(cmd) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(cmd.query, vec!["in"]);
        assert_eq!(cmd.scope.as_deref(), Some("GEN 1"));
    }

    #[test]
    fn verse_requires_an_id() {
        assert!(Cli::try_parse_from(["scribe", "verse"]).is_err());
        let cli = Cli::try_parse_from(["scribe", "verse", "GEN 1:1", "--source", "--json"]).unwrap();
        let Commands::Verse(cmd) = cli.command else {
            panic!("expected verse");
        };
        assert!(cmd.source);
        assert!(cmd.output.json);
    }
}
