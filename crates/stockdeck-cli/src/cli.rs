//! CLI argument definitions for stockdeck.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `list` | Fetch once and print one page of the watchlist |
//! | `show` | Fetch once and print the detail for one record |
//! | `watch` | Interactive session driven by line commands on stdin |
//! | `sample` | Describe the dataset the simulated source draws from |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--config` | none | JSON config file |
//! | `--dataset` | bundled | Alternative dataset file |
//! | `--seed` | entropy | Seed for the simulated source |
//! | `--latency-ms` | `1200` | Simulated fetch latency |
//! | `--failure-rate` | `0.1` | Probability that a fetch fails |
//!
//! # Examples
//!
//! ```bash
//! stockdeck list --query tata --sort futures --format table
//! stockdeck show 2 --retries 3 --pretty
//! stockdeck watch --latency-ms 300
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Stockdeck - capital market and futures watchlist
#[derive(Debug, Parser)]
#[command(
    name = "stockdeck",
    author,
    version,
    about = "Capital market and futures watchlist over a simulated data source",
    long_about = "Stockdeck shapes a watchlist of stocks with capital market and futures \
prices: search by symbol, sort by change or price, page through results and open a \
detail view with a synthetic trend.\n\
\n\
Data comes from a bundled dataset served through a simulated network call that is \
shuffled, capped and occasionally fails.\n\
\n\
Use 'stockdeck <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// JSON config file; environment and flags override it.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset file to use instead of the bundled one.
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Seed for the simulated source (deterministic shuffles and failures).
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Simulated fetch latency in milliseconds.
    #[arg(long, global = true)]
    pub latency_ms: Option<u64>,

    /// Probability in [0, 1] that a fetch fails.
    #[arg(long, global = true)]
    pub failure_rate: Option<f64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable frames for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch once and print one page of the watchlist.
    ///
    /// # Examples
    ///
    ///   stockdeck list
    ///   stockdeck list --query bank --sort capital --direction asc
    ///   stockdeck list --page 2 --density compact --format table
    List(ListArgs),

    /// Fetch once and print the detail view for one record.
    ///
    /// Incomplete records list what is missing instead of failing.
    ///
    /// # Examples
    ///
    ///   stockdeck show 2
    ///   stockdeck show 34 --format table
    Show(ShowArgs),

    /// Interactive session; type `help` for the command list.
    Watch(WatchArgs),

    /// Describe the dataset the simulated source draws from.
    Sample,
}

/// View preferences shared by `list` and `watch`.
#[derive(Debug, Clone, Args)]
pub struct ViewArgs {
    /// Case-insensitive symbol substring.
    #[arg(long, short = 'q', default_value = "")]
    pub query: String,

    #[arg(long, value_enum, default_value_t = SortSelector::Change)]
    pub sort: SortSelector,

    #[arg(long, value_enum, default_value_t = DirectionSelector::Desc)]
    pub direction: DirectionSelector,

    #[arg(long, value_enum, default_value_t = OrientationSelector::CapitalFirst)]
    pub orientation: OrientationSelector,

    #[arg(long, value_enum, default_value_t = DensitySelector::Grid)]
    pub density: DensitySelector,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Page to show; clamped to the available pages.
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Re-issue a failed fetch up to this many times.
    #[arg(long, default_value_t = 0)]
    pub retries: u32,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Record id (numeric or text).
    pub id: String,

    /// Re-issue a failed fetch up to this many times.
    #[arg(long, default_value_t = 0)]
    pub retries: u32,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortSelector {
    Change,
    Capital,
    Futures,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionSelector {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrientationSelector {
    FuturesFirst,
    CapitalFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DensitySelector {
    Compact,
    Grid,
}
