use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use namap_bench_model::{
    ArchitectureKind, ArchitectureVariant, CoordinateMapping, MapperParameters, WeightPair,
};
use namap_bench_summariser::ReportLayout;
use serde::Deserialize;

use crate::cli::SweepCli;
use crate::types::SweepResult;

/// Default per-run time limit, in seconds.
pub const DEFAULT_TIMEOUT_S: u64 = 10_000;

/// Default time between SIGTERM and SIGKILL for a timed out run, in seconds.
pub const DEFAULT_GRACE_PERIOD_S: u64 = 5;

/// What to do when a run prints a metric that is not a valid number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MalformedOutputPolicy {
    /// Log the error, drop every record of that run and continue with the next run.
    #[default]
    SkipRun,
    /// Stop the sweep with an error.
    AbortSweep,
}

/// Everything needed to run a sweep.
///
/// Can be loaded from TOML, in which case missing keys take the values of
/// [SweepConfig::default].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    pub binary: PathBuf,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub architectures: Vec<ArchitectureVariant>,
    pub coordinate_mappings: Vec<CoordinateMapping>,
    pub weights: Vec<WeightPair>,
    pub circuit_mapping: String,
    pub parameters: MapperParameters,
    pub timeout_s: u64,
    pub grace_period_s: u64,
    pub results_path: Option<PathBuf>,
    pub malformed_output: MalformedOutputPolicy,
    pub report_layout: ReportLayout,
    pub no_progress: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("./NaMain"),
            input_dir: PathBuf::from("circuits"),
            output_dir: PathBuf::from("output"),
            architectures: vec![
                ArchitectureVariant::new(
                    ArchitectureKind::Gate,
                    "architectures/rubidium_gate.json",
                ),
                ArchitectureVariant::new(
                    ArchitectureKind::Shuttling,
                    "architectures/rubidium_shuttling.json",
                ),
                ArchitectureVariant::new(
                    ArchitectureKind::Hybrid,
                    "architectures/rubidium_hybrid.json",
                ),
            ],
            coordinate_mappings: vec![
                CoordinateMapping::Trivial,
                CoordinateMapping::Random,
                CoordinateMapping::Graph,
            ],
            weights: vec![WeightPair::new(1.0, 1.0)],
            circuit_mapping: "identity".to_string(),
            parameters: MapperParameters::default(),
            timeout_s: DEFAULT_TIMEOUT_S,
            grace_period_s: DEFAULT_GRACE_PERIOD_S,
            results_path: None,
            malformed_output: MalformedOutputPolicy::default(),
            report_layout: ReportLayout::default(),
            no_progress: false,
        }
    }
}

impl SweepConfig {
    pub fn from_toml_str(input: &str) -> SweepResult<Self> {
        toml::from_str(input).context("Invalid sweep configuration")
    }

    pub fn from_toml_file(path: &Path) -> SweepResult<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sweep configuration {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load sweep configuration {}", path.display()))
    }

    /// Overwrite the values that were given on the command line.
    pub fn apply_cli(&mut self, cli: &SweepCli) {
        if let Some(binary) = &cli.binary {
            self.binary = binary.clone();
        }
        if let Some(input_dir) = &cli.input_dir {
            self.input_dir = input_dir.clone();
        }
        if let Some(output_dir) = &cli.output_dir {
            self.output_dir = output_dir.clone();
        }
        if let Some(timeout_s) = cli.timeout_s {
            self.timeout_s = timeout_s;
        }
        if let Some(grace_period_s) = cli.grace_period_s {
            self.grace_period_s = grace_period_s;
        }
        if let Some(results) = &cli.results {
            self.results_path = Some(results.clone());
        }
        if cli.abort_on_malformed {
            self.malformed_output = MalformedOutputPolicy::AbortSweep;
        }
        if cli.no_progress {
            self.no_progress = true;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_s)
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period_s)
    }

    /// Reject configurations that cannot produce a single run.
    pub fn validate(&self) -> SweepResult<()> {
        if self.architectures.is_empty() {
            anyhow::bail!("No architectures configured");
        }
        if self.coordinate_mappings.is_empty() {
            anyhow::bail!("No coordinate mappings configured");
        }
        if self.weights.iter().all(WeightPair::is_degenerate) {
            anyhow::bail!("No weight pair with a non-zero weight configured");
        }
        if self.timeout_s == 0 {
            anyhow::bail!("The run timeout must be at least one second");
        }
        Ok(())
    }
}
