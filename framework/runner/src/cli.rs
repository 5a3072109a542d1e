use std::path::PathBuf;

use clap::Parser;

/// Command line for a sweep binary.
///
/// Every option overrides the matching value from the sweep definition, or from the `--config`
/// file when one is given.
#[derive(Parser, Debug, Clone, Default)]
#[command(about, long_about = None)]
pub struct SweepCli {
    /// A TOML file describing the sweep. Replaces the sweep defined by the binary.
    ///
    /// Keys that are missing from the file take their default values.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Path to the mapping tool binary.
    ///
    /// The `NAMAP_BIN_PATH` environment variable takes precedence over this option.
    #[clap(long)]
    pub binary: Option<PathBuf>,

    /// Directory of `.qasm` circuits passed to the mapping tool
    #[clap(long)]
    pub input_dir: Option<PathBuf>,

    /// Directory the mapping tool writes mapped circuits to
    #[clap(long)]
    pub output_dir: Option<PathBuf>,

    /// Maximum wall-clock time for a single run, in seconds
    #[clap(long)]
    pub timeout_s: Option<u64>,

    /// Time given to a timed out run to exit after SIGTERM before it is killed, in seconds
    #[clap(long)]
    pub grace_period_s: Option<u64>,

    /// Append the result records of the sweep to this JSON lines file
    #[clap(long)]
    pub results: Option<PathBuf>,

    /// Stop the whole sweep when a run prints a metric that cannot be parsed.
    ///
    /// By default only the offending run's results are discarded.
    #[clap(long, default_value = "false")]
    pub abort_on_malformed: bool,

    /// Do not show a progress bar on the CLI.
    ///
    /// This is recommended for CI/CD environments where the progress bar isn't being looked at by anyone and is just adding noise to the logs.
    #[clap(long, default_value = "false")]
    pub no_progress: bool,
}
