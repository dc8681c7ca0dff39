//! CLI argument definitions.

use std::path::PathBuf;

use catalog_model::LevelSet;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "catalog",
    version,
    about = "Browse and search a product catalog as a category tree",
    long_about = "Build the category > subcategory > class > product tree from a flat CSV \
                  catalog, search it, and inspect expansion and selection state."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// JSON filter config (levels, debounce_ms, auto_expand_on_search).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the catalog tree.
    Tree(TreeArgs),

    /// List the catalog rows matching a free-text query.
    Search(SearchArgs),
}

#[derive(Parser)]
pub struct TreeArgs {
    /// CSV file with one row per product.
    #[arg(value_name = "ROWS_CSV")]
    pub rows: PathBuf,

    /// Comma-separated levels to build (category is always included).
    #[arg(long = "levels", value_name = "LEVELS")]
    pub levels: Option<LevelSet>,

    /// Free-text search; matching branches are expanded automatically.
    #[arg(long = "query", value_name = "TEXT")]
    pub query: Option<String>,

    /// Expand a node by id before searching. Repeatable.
    #[arg(long = "expand", value_name = "NODE_ID")]
    pub expand: Vec<String>,

    /// Select a node by id.
    #[arg(long = "select", value_name = "NODE_ID")]
    pub select: Option<String>,

    /// Show node ids next to names.
    #[arg(long = "ids")]
    pub ids: bool,
}

#[derive(Parser)]
pub struct SearchArgs {
    /// CSV file with one row per product.
    #[arg(value_name = "ROWS_CSV")]
    pub rows: PathBuf,

    /// Text matched against id, name, category, subcategory and class.
    #[arg(value_name = "QUERY")]
    pub query: String,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
