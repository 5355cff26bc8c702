//! Command-line interface definitions

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// recipebox CLI
#[derive(Parser, Debug)]
#[command(name = "recipebox")]
#[command(about = "Personal recipe collection with fuzzy search", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Base URL of the recipe API; selects remote storage
    #[arg(long, global = true, env = "RECIPEBOX_API_BASE")]
    pub api_base: Option<String>,

    /// Path of the local recipe file
    #[arg(long, global = true, env = "RECIPEBOX_STORE")]
    pub store: Option<PathBuf>,

    /// Path of the stored session tokens
    #[arg(long, global = true)]
    pub token_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search recipes
    Search(SearchArgs),
    /// List every tag in the collection
    Tags,
    /// Suggest tags for a query ending in `tag:<partial>`
    Suggest(SuggestArgs),
    /// Show one recipe in cook view
    Show(IdArgs),
    /// Add a recipe from a JSON file
    Add(AddArgs),
    /// Update a recipe from a JSON file; fields left out keep their current values
    Update(UpdateArgs),
    /// Delete a recipe
    Delete(IdArgs),
    /// Read queries from stdin and print matches as you type
    Browse(BrowseArgs),
    /// Show who the stored session belongs to
    Whoami,
}

/// Search arguments
#[derive(Args, Deserialize, Serialize, Clone, Debug, Default)]
pub struct SearchArgs {
    /// Query: free text, `tag:<value>`, `ing:<value>`, quoted phrases
    #[arg(short = 'q', long, default_value = "")]
    #[serde(default)]
    pub query: String,

    /// Only recipes carrying this exact tag (repeatable)
    #[arg(short = 't', long = "tag")]
    #[serde(default)]
    pub tags: Vec<String>,

    /// Maximum number of results (default 50, max 200)
    #[arg(short = 'l', long)]
    pub limit: Option<usize>,
}

#[derive(Args, Deserialize, Serialize, Clone, Debug)]
pub struct SuggestArgs {
    /// Partial query, e.g. "soup tag:des"
    #[arg(short = 'q', long)]
    pub query: String,
}

#[derive(Args, Clone, Debug)]
pub struct IdArgs {
    /// Recipe id
    pub id: String,
}

#[derive(Args, Clone, Debug)]
pub struct AddArgs {
    /// JSON file holding the recipe
    pub file: PathBuf,
}

#[derive(Args, Clone, Debug)]
pub struct UpdateArgs {
    /// Recipe id
    pub id: String,
    /// JSON file holding the fields to change
    pub file: PathBuf,
}

#[derive(Args, Clone, Debug, Default)]
pub struct BrowseArgs {
    /// Only recipes carrying this exact tag (repeatable)
    #[arg(short = 't', long = "tag")]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_args() {
        let cli = Cli::parse_from([
            "recipebox", "search", "-q", "chicken tag:din", "-t", "dinner", "-t", "quick", "-l", "10",
        ]);
        match cli.command {
            Some(Commands::Search(args)) => {
                assert_eq!(args.query, "chicken tag:din");
                assert_eq!(args.tags, vec!["dinner", "quick"]);
                assert_eq!(args.limit, Some(10));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "recipebox", "tags", "--store", "/tmp/r.json", "--verbose",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/r.json")));
        assert!(matches!(cli.command, Some(Commands::Tags)));
    }

    #[test]
    fn test_update_args() {
        let cli = Cli::parse_from(["recipebox", "update", "17", "soup.json"]);
        match cli.command {
            Some(Commands::Update(args)) => {
                assert_eq!(args.id, "17");
                assert_eq!(args.file, PathBuf::from("soup.json"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_search_args_deserialization() {
        let args: SearchArgs = serde_json::from_str(r#"{"query":"tag:pasta"}"#).unwrap();
        assert_eq!(args.query, "tag:pasta");
        assert!(args.tags.is_empty());
        assert_eq!(args.limit, None);
    }
}
