use serde::{Deserialize, Serialize};

use crate::architecture::{ArchitectureVariant, CoordinateMapping};

/// Cost weights handed to the mapper for gate-based and shuttling-based routing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightPair {
    pub gate: f64,
    pub shuttling: f64,
}

impl WeightPair {
    pub fn new(gate: f64, shuttling: f64) -> Self {
        Self { gate, shuttling }
    }

    /// Both weights zero gives the mapper nothing to optimise, so the sweep skips it.
    pub fn is_degenerate(&self) -> bool {
        self.gate == 0.0 && self.shuttling == 0.0
    }
}

/// Mapper tuning knobs that are held fixed across a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperParameters {
    pub lookahead_gate: f64,
    pub lookahead_shuttling: f64,
    pub decay: f64,
    pub shuttling_time_weight: f64,
    pub verbose: bool,
}

impl Default for MapperParameters {
    fn default() -> Self {
        Self {
            lookahead_gate: 0.1,
            lookahead_shuttling: 0.1,
            decay: 0.0,
            shuttling_time_weight: 0.1,
            verbose: false,
        }
    }
}

/// A single point of the sweep grid.
///
/// Only created by the sweep generator, which assigns `run_idx`. Consumed by the executor and
/// copied into every [crate::ResultRecord] that the run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub run_idx: usize,
    pub architecture: ArchitectureVariant,
    pub coordinate_mapping: CoordinateMapping,
    /// Initial circuit mapping, passed through to the tool. The tool currently accepts `identity`.
    pub circuit_mapping: String,
    pub weights: WeightPair,
    pub parameters: MapperParameters,
}
