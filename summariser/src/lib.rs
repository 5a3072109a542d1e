//! Turns raw mapping tool output into ranked, rendered results.
//!
//! [parser] extracts records from the output of one run, [aggregator] groups and ranks them per
//! benchmark and [report] and [best] render the ranked groups.

pub mod aggregator;
pub mod best;
pub mod parser;
pub mod report;

pub use aggregator::{aggregate, best_per_group};
pub use best::best_runs_table;
pub use parser::{OutputParser, ParseError, RecordAccumulator};
pub use report::{render, ReportLayout};

use namap_bench_model::ResultGroup;

/// The full text summary of a sweep: the fixed-width report followed by the best run per
/// benchmark.
pub fn render_summary(groups: &[ResultGroup], layout: ReportLayout) -> String {
    let mut out = render(groups, layout);
    if let Some(best) = best_runs_table(groups) {
        out.push('\n');
        out.push_str("Best run per benchmark\n");
        out.push_str(&best);
        out.push('\n');
    }
    out
}
