use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "LatticeView CLI - Builds view orientations, cell wireframes, lattice-constant annotations and wrapped coordinates for periodic structures.",
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

    /// Set the number of threads used to wrap coordinates.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the full scene geometry of a structure and write it as JSON.
    Scene(SceneArgs),
    /// Print the view quaternion that aligns the structure's lattice with the screen.
    Align(AlignArgs),
    /// Wrap atom coordinates into the periodic cell, or restore the original ones.
    Wrap(WrapArgs),
}

/// Scene configuration shared by the commands that orient a structure.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a scene configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Align a basis vector with a view direction, e.g. 'up=c'.
    /// Can be given at most twice and replaces the configured alignments.
    #[arg(short = 'a', long = "align", value_name = "DIR=LABEL")]
    pub alignments: Vec<String>,

    /// Skip the extra view rotations applied after the alignment.
    #[arg(long)]
    pub no_rotations: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S cell.line-width=2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// Arguments for the `scene` subcommand.
#[derive(Args, Debug)]
pub struct SceneArgs {
    /// Path to the input structure description (TOML).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the scene JSON. Printed to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Keep the original coordinates instead of wrapping them into the cell.
    #[arg(long)]
    pub no_wrap: bool,

    /// Do not build the cell wireframe.
    #[arg(long)]
    pub no_cell: bool,

    /// Do not build the lattice-constant annotations.
    #[arg(long)]
    pub no_lattice_constants: bool,

    /// Build the scene even if the structure exceeds the configured size limit.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `align` subcommand.
#[derive(Args, Debug)]
pub struct AlignArgs {
    /// Path to the input structure description (TOML).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the `wrap` subcommand.
#[derive(Args, Debug)]
pub struct WrapArgs {
    /// Path to the input structure description (TOML).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Output path. A '.toml' extension writes a full structure description,
    /// anything else writes the positions as JSON. Printed to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the original, unwrapped coordinates.
    #[arg(long)]
    pub unwrap: bool,
}
