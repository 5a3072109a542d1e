//! Fixed-width text report of ranked result groups.

use std::fmt::{self, Display};
use std::str::FromStr;

use namap_bench_model::{ResultGroup, ResultRecord};
use serde::{Deserialize, Serialize};

const BENCHMARK_WIDTH: usize = 50;
const FLAG_WIDTH: usize = 5;
const INDEX_WIDTH: usize = 5;
const WEIGHT_WIDTH: usize = 6;
const COUNT_WIDTH: usize = 8;
const EXEC_TIME_WIDTH: usize = 10;
const FIDELITY_WIDTH: usize = 12;
const RUNTIME_WIDTH: usize = 12;

const CELL_SEPARATOR: &str = " | ";
const SECTION_SEPARATOR: &str = " || ";

/// Which counts the three count columns of the report show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportLayout {
    /// nSwaps | nBridges | nMoves
    #[default]
    GateBased,
    /// nCZs | nSwaps | nMoves
    CzCount,
}

impl ReportLayout {
    fn count_labels(&self) -> [&'static str; 3] {
        match self {
            ReportLayout::GateBased => ["nSwaps", "nBridges", "nMoves"],
            ReportLayout::CzCount => ["nCZs", "nSwaps", "nMoves"],
        }
    }

    fn counts(&self, record: &ResultRecord) -> [Option<u64>; 3] {
        let m = &record.metrics;
        match self {
            ReportLayout::GateBased => [m.swaps, m.bridges, m.moves],
            ReportLayout::CzCount => [m.cz_count, m.swaps, m.moves],
        }
    }
}

impl FromStr for ReportLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gate-based" => Ok(ReportLayout::GateBased),
            "cz-count" => Ok(ReportLayout::CzCount),
            other => Err(format!("Unknown report layout: {other}")),
        }
    }
}

impl Display for ReportLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportLayout::GateBased => write!(f, "gate-based"),
            ReportLayout::CzCount => write!(f, "cz-count"),
        }
    }
}

/// Render the groups, in order, as a fixed-width table.
///
/// Values wider than their column push the rest of the row to the right. Absent metrics are left
/// blank.
pub fn render(groups: &[ResultGroup], layout: ReportLayout) -> String {
    let label_row = format_row(&label_sections(layout));
    let width = label_row.chars().count();
    let rule = "-".repeat(width);

    let mut out = String::new();
    out.push_str(&format!("{:-^width$}\n", " Result "));
    out.push_str(&label_row);
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    for record in groups.iter().flat_map(|group| group.records.iter()) {
        out.push_str(&format_row(&record_sections(record, layout)));
        out.push('\n');
    }
    out.push_str(&rule);
    out.push('\n');

    out
}

fn label_sections(layout: ReportLayout) -> Vec<Vec<String>> {
    let [c1, c2, c3] = layout.count_labels();
    vec![
        vec![cell("benchmark", BENCHMARK_WIDTH)],
        vec![
            cell("g s h", FLAG_WIDTH),
            cell("t r g", FLAG_WIDTH),
            cell("index", INDEX_WIDTH),
            cell("gateW", WEIGHT_WIDTH),
            cell("shutW", WEIGHT_WIDTH),
        ],
        vec![
            cell(c1, COUNT_WIDTH),
            cell(c2, COUNT_WIDTH),
            cell(c3, COUNT_WIDTH),
        ],
        vec![
            cell("ExecTime", EXEC_TIME_WIDTH),
            cell("Fidelity", FIDELITY_WIDTH),
        ],
        vec![cell("runtime[ms]", RUNTIME_WIDTH)],
    ]
}

fn record_sections(record: &ResultRecord, layout: ReportLayout) -> Vec<Vec<String>> {
    let metrics = &record.metrics;
    vec![
        vec![cell(&record.benchmark, BENCHMARK_WIDTH)],
        vec![
            cell(record.architecture.report_flag(), FLAG_WIDTH),
            cell(record.coordinate_mapping.report_flag(), FLAG_WIDTH),
            cell(record.run_idx, INDEX_WIDTH),
            cell(float(record.weights.gate), WEIGHT_WIDTH),
            cell(float(record.weights.shuttling), WEIGHT_WIDTH),
        ],
        layout
            .counts(record)
            .iter()
            .map(|count| cell(optional(*count), COUNT_WIDTH))
            .collect(),
        vec![
            cell(optional(metrics.execution_time.map(float)), EXEC_TIME_WIDTH),
            cell(optional(metrics.fidelity.map(float)), FIDELITY_WIDTH),
        ],
        vec![cell(optional(metrics.runtime_ms), RUNTIME_WIDTH)],
    ]
}

fn format_row(sections: &[Vec<String>]) -> String {
    let sections = sections
        .iter()
        .map(|cells| cells.join(CELL_SEPARATOR))
        .collect::<Vec<_>>();
    format!("| {} |", sections.join(SECTION_SEPARATOR))
}

fn cell(value: impl Display, width: usize) -> String {
    format!("{value:<width$}")
}

/// Shortest representation that reads back to the same value, always with a decimal point or
/// exponent.
pub(crate) fn float(value: f64) -> String {
    format!("{value:?}")
}

pub(crate) fn optional<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
