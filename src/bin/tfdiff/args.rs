//! Command line arguments for tfdiff.

use clap::{Parser, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;
use tfdiff::{render::Format, source::DEFAULT_PATTERN};

/// Print `-target` flags for terraform resources and modules that changed compared to a base
/// revision.
///
/// The `*.tf` files of the target directory are compared against the same directory at the base
/// revision. Every `resource` and `module` block that was added, removed or changed in any way
/// is printed as `-target <name>`. If nothing changed, `-refresh=false` is printed instead.
///
/// Example: terraform plan $(tfdiff)
#[derive(Parser, Debug)]
#[command(
    name = "tfdiff",
    version,
    after_help = "Hint: `tfdiff -h` only provides a usage summary. Run `tfdiff --help` for the full details to each flag."
)]
pub struct Options {
    /// Git revision to compare against.
    ///
    /// If absent, `master` is used if it exists, then `main`.
    #[arg(short, long, env = "TFDIFF_BASE", value_name = "REV")]
    pub base: Option<String>,

    /// Compare against a directory instead of a git revision.
    #[arg(
        long,
        env = "TFDIFF_BASE_DIR",
        value_name = "DIR",
        value_hint = ValueHint::DirPath,
        conflicts_with = "base"
    )]
    pub base_dir: Option<PathBuf>,

    /// The directory containing the terraform configuration.
    #[arg(
        short = 'C',
        long,
        env = "TFDIFF_DIR",
        value_name = "DIR",
        value_hint = ValueHint::DirPath,
        default_value = "."
    )]
    pub dir: PathBuf,

    /// Glob pattern for selecting configuration files inside of the directory.
    #[arg(short, long, env = "TFDIFF_GLOB", default_value = DEFAULT_PATTERN)]
    pub glob: String,

    /// Output format.
    #[arg(value_enum, short, long, default_value_t = Format::Targets)]
    pub output: Format,

    /// Add a trailing newline to the output.
    #[arg(short, long)]
    pub newline: bool,

    /// If provided, outputs the completion file for the given shell.
    #[arg(value_enum, long, value_name = "SHELL")]
    pub generate_completion: Option<Shell>,
}
