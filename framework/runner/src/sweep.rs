use itertools::iproduct;
use namap_bench_model::{
    ArchitectureVariant, CoordinateMapping, MapperParameters, RunConfig, WeightPair,
};

use crate::config::SweepConfig;

/// The grid of run configurations for a sweep.
///
/// Architecture variants vary slowest and weight pairs fastest. Weight pairs where both weights
/// are zero are skipped and do not use up a run index.
#[derive(Debug, Clone)]
pub struct SweepGrid {
    architectures: Vec<ArchitectureVariant>,
    coordinate_mappings: Vec<CoordinateMapping>,
    weights: Vec<WeightPair>,
    circuit_mapping: String,
    parameters: MapperParameters,
}

impl SweepGrid {
    pub fn new(
        architectures: Vec<ArchitectureVariant>,
        coordinate_mappings: Vec<CoordinateMapping>,
        weights: Vec<WeightPair>,
        circuit_mapping: impl Into<String>,
        parameters: MapperParameters,
    ) -> Self {
        Self {
            architectures,
            coordinate_mappings,
            weights,
            circuit_mapping: circuit_mapping.into(),
            parameters,
        }
    }

    pub fn from_config(config: &SweepConfig) -> Self {
        Self::new(
            config.architectures.clone(),
            config.coordinate_mappings.clone(),
            config.weights.clone(),
            config.circuit_mapping.clone(),
            config.parameters,
        )
    }

    /// Lazily produce the run configurations, starting from run index 0 on every call.
    pub fn iter(&self) -> impl Iterator<Item = RunConfig> + '_ {
        iproduct!(
            self.architectures.iter(),
            self.coordinate_mappings.iter(),
            self.weights.iter().filter(|weights| !weights.is_degenerate())
        )
        .enumerate()
        .map(
            |(run_idx, (architecture, coordinate_mapping, weights))| RunConfig {
                run_idx,
                architecture: architecture.clone(),
                coordinate_mapping: *coordinate_mapping,
                circuit_mapping: self.circuit_mapping.clone(),
                weights: *weights,
                parameters: self.parameters,
            },
        )
    }

    /// The number of configurations that [SweepGrid::iter] yields.
    pub fn len(&self) -> usize {
        let weights = self
            .weights
            .iter()
            .filter(|weights| !weights.is_degenerate())
            .count();
        self.architectures.len() * self.coordinate_mappings.len() * weights
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use namap_bench_model::ArchitectureKind;

    use super::*;

    fn architectures() -> Vec<ArchitectureVariant> {
        vec![
            ArchitectureVariant::new(ArchitectureKind::Gate, "gate.json"),
            ArchitectureVariant::new(ArchitectureKind::Shuttling, "shuttling.json"),
            ArchitectureVariant::new(ArchitectureKind::Hybrid, "hybrid.json"),
        ]
    }

    fn mappings() -> Vec<CoordinateMapping> {
        vec![CoordinateMapping::Trivial, CoordinateMapping::Random]
    }

    fn grid(weights: Vec<WeightPair>) -> SweepGrid {
        SweepGrid::new(
            architectures(),
            mappings(),
            weights,
            "identity",
            MapperParameters::default(),
        )
    }

    #[test]
    fn test_should_skip_degenerate_weights_without_using_an_index() {
        let grid = grid(vec![
            WeightPair::new(0.0, 0.0),
            WeightPair::new(1.0, 0.0),
            WeightPair::new(0.0, 1.0),
        ]);

        let configs = grid.iter().collect::<Vec<_>>();

        assert_eq!(configs.len(), 3 * 2 * 2);
        assert_eq!(grid.len(), configs.len());
        for (expected, config) in configs.iter().enumerate() {
            assert_eq!(config.run_idx, expected);
            assert!(!config.weights.is_degenerate());
        }
    }

    #[test]
    fn test_should_nest_architecture_then_mapping_then_weights() {
        let grid = grid(vec![WeightPair::new(1.0, 0.0), WeightPair::new(0.5, 0.5)]);

        let order = grid
            .iter()
            .map(|c| (c.architecture.kind, c.coordinate_mapping, c.weights.gate))
            .take(5)
            .collect::<Vec<_>>();

        assert_eq!(
            order,
            vec![
                (ArchitectureKind::Gate, CoordinateMapping::Trivial, 1.0),
                (ArchitectureKind::Gate, CoordinateMapping::Trivial, 0.5),
                (ArchitectureKind::Gate, CoordinateMapping::Random, 1.0),
                (ArchitectureKind::Gate, CoordinateMapping::Random, 0.5),
                (ArchitectureKind::Shuttling, CoordinateMapping::Trivial, 1.0),
            ]
        );
    }

    #[test]
    fn test_should_restart_from_zero() {
        let grid = grid(vec![WeightPair::new(1.0, 1.0)]);

        let first = grid.iter().collect::<Vec<_>>();
        let second = grid.iter().collect::<Vec<_>>();

        assert_eq!(first, second);
        assert_eq!(second[0].run_idx, 0);
    }

    #[test]
    fn test_should_be_empty_with_only_degenerate_weights() {
        let grid = grid(vec![WeightPair::new(0.0, 0.0)]);

        assert!(grid.is_empty());
        assert_eq!(grid.iter().count(), 0);
    }

    #[test]
    fn test_should_carry_fixed_settings_into_every_config() {
        let config = SweepConfig::default();
        let grid = SweepGrid::from_config(&config);

        assert_eq!(grid.len(), 9);
        assert!(grid
            .iter()
            .all(|c| c.circuit_mapping == "identity" && c.parameters == config.parameters));
    }
}
