use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "meshprep - Preprocessing for molecular-electrostatics surface meshing: van der Waals parameter resolution, mesher radii files and OFF conversion.",
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

    /// Set the number of threads used for batch processing.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S radii.stern-offset=2.0
    #[arg(short = 'S', long = "set", global = true, value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve van der Waals parameters for the atoms of structure files.
    Vdw(VdwArgs),
    /// Write scaled radii files (and their Stern-layer variants) for the surface mesher.
    Xyzr(XyzrArgs),
    /// Convert surface mesher vertex/face output to the OFF format.
    Off(OffArgs),
}

/// Batch mode: a molecule list resolved against a root folder.
#[derive(Args, Debug, Clone, Default)]
pub struct BatchArgs {
    /// File listing one molecule name per line.
    #[arg(short, long, value_name = "PATH")]
    pub molecules: Option<PathBuf>,

    /// Folder containing the per-molecule files. Defaults to the current directory.
    #[arg(short, long, value_name = "DIR", requires = "molecules")]
    pub root: Option<PathBuf>,

    /// Write a CSV report with one row per molecule.
    #[arg(long, value_name = "PATH", requires = "molecules")]
    pub report: Option<PathBuf>,
}

/// Arguments for the `vdw` subcommand.
#[derive(Args, Debug, Clone)]
pub struct VdwArgs {
    /// Path to the force-field parameter table (e.g., gaff.dat).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub forcefield: PathBuf,

    /// Path to the input structure file (single-molecule mode).
    #[arg(
        short,
        long,
        value_name = "PATH",
        required_unless_present = "molecules",
        conflicts_with = "molecules"
    )]
    pub pqr: Option<PathBuf>,

    /// Path to the topology file; enables index-based type matching.
    #[arg(short, long, value_name = "PATH", requires = "pqr")]
    pub topology: Option<PathBuf>,

    /// Path for the parameter report (single-molecule mode).
    #[arg(
        short,
        long,
        value_name = "PATH",
        required_unless_present = "molecules",
        requires = "pqr"
    )]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub batch: BatchArgs,

    /// Write a `None` line for unresolved atoms instead of omitting them.
    #[arg(long)]
    pub flag_unresolved: bool,

    /// Override the radius tolerance used for name/radius matching.
    #[arg(long, value_name = "FLOAT")]
    pub tolerance: Option<f64>,
}

/// Arguments for the `xyzr` subcommand.
#[derive(Args, Debug, Clone)]
pub struct XyzrArgs {
    /// Input `.xyzr` or `.pqr` file (single-molecule mode).
    #[arg(
        short,
        long,
        value_name = "PATH",
        required_unless_present = "molecules",
        conflicts_with = "molecules"
    )]
    pub input: Option<PathBuf>,

    /// Output radii file (single-molecule mode).
    #[arg(
        short,
        long,
        value_name = "PATH",
        required_unless_present = "molecules",
        requires = "input"
    )]
    pub output: Option<PathBuf>,

    /// Output Stern-layer radii file (single-molecule mode).
    #[arg(long, value_name = "PATH", requires = "input")]
    pub stern_output: Option<PathBuf>,

    #[command(flatten)]
    pub batch: BatchArgs,

    /// Override the factor applied to every radius (default 1.0).
    ///
    /// Use 1.0870 (1/0.92) to undo the 0.92 radius scaling applied upstream by the
    /// legacy meshing pipeline.
    #[arg(short, long, value_name = "FLOAT")]
    pub scale: Option<f64>,

    /// Override the radius offset of the Stern layer.
    #[arg(long, value_name = "FLOAT")]
    pub stern_offset: Option<f64>,
}

/// Arguments for the `off` subcommand.
#[derive(Args, Debug, Clone)]
pub struct OffArgs {
    /// Surface base path; `.vert` and `.face` are appended (single-molecule mode).
    #[arg(
        short,
        long,
        value_name = "BASE",
        required_unless_present = "molecules",
        conflicts_with = "molecules"
    )]
    pub surface: Option<PathBuf>,

    /// Output OFF file. Defaults to the surface base with an `.off` extension.
    #[arg(short, long, value_name = "PATH", requires = "surface")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub batch: BatchArgs,
}
