use clap::{Args, Parser, Subcommand};
use mmffkit::core::forcefield::term::TermKind;
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
    about = "MMFF Kit CLI - Inspect, query and export MMFF94 force-field parameter files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output; a failing command still prints its error
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a parameter file and report how many entries each section holds.
    Inspect(InspectArgs),
    /// Look up the parameters of a single term by atom types.
    Query(QueryArgs),
    /// Export every entry of one section to a CSV file.
    Dump(DumpArgs),
}

/// Options shared by every command that reads a parameter file.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Override the parameter file from the config file.
    #[arg(short, long = "params", value_name = "PATH")]
    pub params: Option<PathBuf>,

    /// Override the parameter format (e.g., 'mmff94').
    #[arg(long, value_name = "NAME")]
    pub format: Option<String>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the `query` subcommand.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Term kind: bond, angle, stbn, dfsb, oop, torsion, vdw, charge or pbci.
    #[arg(required = true, value_name = "KIND")]
    pub kind: TermKind,

    /// Atom type numbers of the term, in term order
    /// (periodic-table rows for default stretch-bend).
    #[arg(required = true, num_args = 1..=4, value_name = "TYPE")]
    pub types: Vec<u8>,

    /// Topological class of the term (bond, angle, stretch-bend or torsion type).
    #[arg(long = "class", value_name = "INT", default_value_t = 0)]
    pub class: u8,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the `dump` subcommand.
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Term kind of the section to export.
    #[arg(required = true, value_name = "KIND")]
    pub kind: TermKind,

    /// Path for the output CSV file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub source: SourceArgs,
}
