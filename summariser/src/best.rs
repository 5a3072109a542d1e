use namap_bench_model::{ArchitectureKind, CoordinateMapping, ResultGroup};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::aggregator::best_per_group;

/// The best configuration found for one benchmark.
#[derive(Tabled)]
pub struct BestRunRow {
    #[tabled(rename = "Benchmark")]
    pub benchmark: String,
    #[tabled(rename = "Architecture")]
    pub architecture: ArchitectureKind,
    #[tabled(rename = "Mapping")]
    pub coordinate_mapping: CoordinateMapping,
    #[tabled(rename = "Run")]
    pub run_idx: usize,
    #[tabled(rename = "gateW", display = "float")]
    pub gate_weight: f64,
    #[tabled(rename = "shutW", display = "float")]
    pub shuttling_weight: f64,
    #[tabled(rename = "Fidelity", display = "optional_float")]
    pub fidelity: Option<f64>,
    #[tabled(rename = "Runtime [ms]", display = "optional_int")]
    pub runtime_ms: Option<u64>,
}

fn float(n: &f64) -> String {
    crate::report::float(*n)
}

fn optional_float(n: &Option<f64>) -> String {
    crate::report::optional(n.map(crate::report::float))
}

fn optional_int(n: &Option<u64>) -> String {
    crate::report::optional(*n)
}

/// Rows of the best-run table, one per non-empty group.
pub fn best_run_rows(groups: &[ResultGroup]) -> Vec<BestRunRow> {
    best_per_group(groups)
        .into_iter()
        .map(|record| BestRunRow {
            benchmark: record.benchmark.clone(),
            architecture: record.architecture,
            coordinate_mapping: record.coordinate_mapping,
            run_idx: record.run_idx,
            gate_weight: record.weights.gate,
            shuttling_weight: record.weights.shuttling,
            fidelity: record.metrics.fidelity,
            runtime_ms: record.metrics.runtime_ms,
        })
        .collect()
}

/// Render the best run per benchmark, or [None] if there are no results at all.
pub fn best_runs_table(groups: &[ResultGroup]) -> Option<String> {
    let rows = best_run_rows(groups);
    if rows.is_empty() {
        return None;
    }

    let mut table = Table::new(rows);
    table.with(Style::modern());

    Some(table.to_string())
}
