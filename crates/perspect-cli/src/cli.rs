use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Perspect CLI - A command-line interface for scoring perspectival density from the five structural invariants of a system.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a TOML file supplying defaults for all commands
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score an invariant vector and situate it in the preset catalog.
    Score(ScoreArgs),
    /// List, rank, or inspect the reference presets.
    Presets(PresetsArgs),
    /// Sample density and its derivative along one invariant axis.
    Sweep(SweepArgs),
    /// Run the perturbation driver for a fixed duration and summarize it.
    Simulate(SimulateArgs),
}

/// Per-component overrides for the invariant vector. Each one replaces the
/// corresponding component of whatever base the command starts from.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct VectorArgs {
    /// Integration φ: how unified the state space is
    #[arg(long, value_name = "FLOAT")]
    pub phi: Option<f64>,

    /// Temporal depth τ: how far structure extends through time
    #[arg(long, value_name = "FLOAT")]
    pub tau: Option<f64>,

    /// Recursive binding ρ: coupling of states to a self-model
    #[arg(long, value_name = "FLOAT")]
    pub rho: Option<f64>,

    /// Entropy H: disorder of the state distribution
    #[arg(long, value_name = "FLOAT")]
    pub entropy: Option<f64>,

    /// Coherence κ: global order co-existing with entropy
    #[arg(long, value_name = "FLOAT")]
    pub kappa: Option<f64>,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Five values in φ τ ρ H κ order; defaults to the baseline operating
    /// point when omitted
    #[arg(value_name = "VALUES", num_args = 0..=5)]
    pub values: Vec<f64>,

    /// Score a named catalog preset instead of an explicit vector
    #[arg(short = 'P', long, value_name = "NAME", conflicts_with = "values")]
    pub preset: Option<String>,

    #[command(flatten)]
    pub vector: VectorArgs,

    /// Restrict the closest-preset match to one category
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Per-invariant uncertainty for the envelope (defaults to 0.05)
    #[arg(short, long, value_name = "FLOAT")]
    pub uncertainty: Option<f64>,

    /// Load the preset catalog from a .toml or .csv file
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

/// Arguments for the `presets` subcommand.
#[derive(Args, Debug)]
pub struct PresetsArgs {
    /// Restrict the listing to one category
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Rank by density (ascending) instead of catalog order
    #[arg(long)]
    pub spectrum: bool,

    /// Output format for the listing
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Show the full card for a single preset
    #[arg(long, value_name = "NAME", conflicts_with_all = ["category", "spectrum"])]
    pub show: Option<String>,

    /// Load the preset catalog from a .toml or .csv file
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
}

/// Arguments for the `sweep` subcommand.
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Which invariant to sweep across [0, 1]
    #[arg(short, long, value_name = "PARAM")]
    pub param: String,

    /// Number of intervals; the sweep prints steps + 1 rows
    #[arg(short, long, default_value_t = 20, value_name = "INT")]
    pub steps: usize,

    #[command(flatten)]
    pub vector: VectorArgs,
}

/// Arguments for the `simulate` subcommand.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Simulated seconds to run
    #[arg(short, long, value_name = "SECONDS")]
    pub duration: Option<f64>,

    /// Frames per second of the fixed timestep
    #[arg(long, value_name = "RATE")]
    pub fps: Option<f64>,

    /// Seed for the burst schedule; seeded runs replay identically
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Disable burst impulses
    #[arg(long)]
    pub no_bursts: bool,

    /// Override the drift amplitude
    #[arg(long, value_name = "FLOAT")]
    pub amplitude: Option<f64>,

    /// Sleep between frames so the run takes real time
    #[arg(long)]
    pub realtime: bool,

    /// Print every frame instead of a progress bar
    #[arg(long)]
    pub watch: bool,

    /// Start from a named catalog preset
    #[arg(short = 'P', long, value_name = "NAME")]
    pub preset: Option<String>,

    #[command(flatten)]
    pub vector: VectorArgs,

    /// Load the preset catalog from a .toml or .csv file
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}
