use serde::{Deserialize, Serialize};

use crate::architecture::{ArchitectureKind, CoordinateMapping};
use crate::run_config::{RunConfig, WeightPair};

/// Metrics reported by the mapping tool for one benchmark circuit.
///
/// Every field is optional because not every architecture variant reports every metric. For
/// example, shuttling-only runs have no bridge count and only the mixed-hardware build reports
/// `totalnCZs`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub swaps: Option<u64>,
    pub bridges: Option<u64>,
    pub moves: Option<u64>,
    pub cz_count: Option<u64>,
    pub execution_time: Option<f64>,
    pub idle_time: Option<f64>,
    pub gate_fidelity: Option<f64>,
    pub fidelity: Option<f64>,
    pub runtime_ms: Option<u64>,
}

/// One benchmark's metrics from one invocation of the mapping tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Circuit file name without directory and `.qasm` extension.
    pub benchmark: String,
    pub architecture: ArchitectureKind,
    pub coordinate_mapping: CoordinateMapping,
    pub run_idx: usize,
    pub weights: WeightPair,
    pub metrics: Metrics,
}

impl ResultRecord {
    /// Record stub carrying the run-level fields of `config` and no metrics yet.
    pub fn for_run(benchmark: impl Into<String>, config: &RunConfig) -> Self {
        Self {
            benchmark: benchmark.into(),
            architecture: config.architecture.kind,
            coordinate_mapping: config.coordinate_mapping,
            run_idx: config.run_idx,
            weights: config.weights,
            metrics: Metrics::default(),
        }
    }
}

/// All records for one benchmark, in ranking order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultGroup {
    pub benchmark: String,
    pub records: Vec<ResultRecord>,
}

impl ResultGroup {
    /// The best ranked record, if the group has been ranked.
    pub fn best(&self) -> Option<&ResultRecord> {
        self.records.first()
    }
}
