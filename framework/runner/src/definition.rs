use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use namap_bench_model::{ArchitectureVariant, CoordinateMapping, MapperParameters, WeightPair};
use namap_bench_summariser::ReportLayout;

use crate::cli::SweepCli;
use crate::config::{MalformedOutputPolicy, SweepConfig};
use crate::types::SweepResult;

/// The builder for a sweep definition.
///
/// Sets the sweep that a binary runs when it is started without a `--config` file. Values given on
/// the command line always win.
pub struct SweepDefinitionBuilder {
    /// The name of the sweep, used in logs and for the default results file name.
    ///
    /// Recommended value is `env!("CARGO_PKG_NAME")`.
    name: String,
    /// This value is initialised for you by [SweepDefinitionBuilder::new_with_init].
    #[doc(hidden)]
    cli: SweepCli,
    config: SweepConfig,
    timestamped_results: bool,
}

pub struct SweepDefinition {
    pub name: String,
    pub config: SweepConfig,
}

impl SweepDefinitionBuilder {
    /// Initialise logging, parse the command line and start a definition from the default sweep.
    pub fn new_with_init(name: &str) -> Self {
        let cli = crate::init::init();
        Self::new_with_cli(name, cli)
    }

    /// Start a definition with an already parsed command line.
    pub fn new_with_cli(name: &str, cli: SweepCli) -> Self {
        Self {
            name: name.to_string(),
            cli,
            config: SweepConfig::default(),
            timestamped_results: false,
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.config.binary = binary.into();
        self
    }

    pub fn with_input_dir(mut self, input_dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = input_dir.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = output_dir.into();
        self
    }

    pub fn with_architectures(mut self, architectures: Vec<ArchitectureVariant>) -> Self {
        self.config.architectures = architectures;
        self
    }

    pub fn with_coordinate_mappings(mut self, mappings: Vec<CoordinateMapping>) -> Self {
        self.config.coordinate_mappings = mappings;
        self
    }

    pub fn with_weights(mut self, weights: Vec<WeightPair>) -> Self {
        self.config.weights = weights;
        self
    }

    pub fn with_circuit_mapping(mut self, circuit_mapping: &str) -> Self {
        self.config.circuit_mapping = circuit_mapping.to_string();
        self
    }

    pub fn with_parameters(mut self, parameters: MapperParameters) -> Self {
        self.config.parameters = parameters;
        self
    }

    /// Maximum wall-clock time for one run of the mapping tool.
    ///
    /// The timeout is configured in whole seconds, so any fraction of a second is rounded up.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_s = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self
    }

    pub fn with_report_layout(mut self, layout: ReportLayout) -> Self {
        self.config.report_layout = layout;
        self
    }

    pub fn with_malformed_output_policy(mut self, policy: MalformedOutputPolicy) -> Self {
        self.config.malformed_output = policy;
        self
    }

    pub fn with_results_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.results_path = Some(path.into());
        self
    }

    /// Export results to `<name>-<timestamp>.jsonl` in the working directory, unless a results
    /// path is configured some other way.
    pub fn with_timestamped_results(mut self) -> Self {
        self.timestamped_results = true;
        self
    }

    pub(crate) fn build(self) -> SweepResult<SweepDefinition> {
        let mut config = match &self.cli.config {
            Some(path) => {
                log::info!("Loading sweep configuration from {}", path.display());
                SweepConfig::from_toml_file(path)?
            }
            None => self.config,
        };
        config.apply_cli(&self.cli);

        if config.results_path.is_none() && self.timestamped_results {
            config.results_path = Some(timestamped_results_path(&self.name));
        }

        config.validate()?;

        Ok(SweepDefinition {
            name: self.name,
            config,
        })
    }
}

fn timestamped_results_path(name: &str) -> PathBuf {
    PathBuf::from(format!(
        "{name}-{}.jsonl",
        Utc::now().format("%Y-%m-%dT%H.%M.%S%.fZ")
    ))
}
