//! CLI argument parsing for px

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "px")]
#[command(author, version, about = "Browse and search improvement proposals", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the proposals directory from the config
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format for all commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List proposals, optionally filtered
    List {
        /// Only proposals with this status (case-insensitive)
        #[arg(short, long)]
        status: Option<String>,

        /// Only proposals of this type (case-insensitive)
        #[arg(short = 't', long = "type")]
        proposal_type: Option<String>,

        /// Only proposals carrying this tag (case-insensitive)
        #[arg(long)]
        tag: Option<String>,

        /// Only proposals whose front-matter category matches (case-insensitive)
        #[arg(long)]
        category: Option<String>,
    },

    /// Show a single proposal
    Show {
        /// Slug, e.g. lp-42
        #[arg(required = true)]
        slug: String,
    },

    /// Search titles, descriptions, bodies and tags
    Search {
        /// Free-text query (at least 2 characters)
        #[arg(required = true)]
        query: String,
    },

    /// Show corpus statistics
    Stats,

    /// List categories with their proposals
    Categories {
        /// Include categories with no proposals
        #[arg(short, long)]
        all: bool,
    },

    /// Show one category by slug
    Category {
        /// Category slug, e.g. core
        #[arg(required = true)]
        slug: String,
    },

    /// Print the navigation tree
    Tree,

    /// List every tag in use
    Tags,

    /// List every proposal slug
    Slugs,

    /// Show the most recently created proposals
    Recent {
        /// Number of proposals to show
        #[arg(short = 'n', long, default_value = "6")]
        count: usize,
    },
}
