use std::path::PathBuf;

use anyhow::Context;
use namap_bench_model::load_records_from_file;
use namap_bench_summariser::{aggregate, render_summary, ReportLayout};

/// Environment variable name to set a custom results file path
const SWEEP_RESULTS_PATH_ENV: &str = "SWEEP_RESULTS_PATH";
/// Default path for the results file
const DEFAULT_SWEEP_RESULTS_PATH: &str = "sweep_results.jsonl";
/// Environment variable name to choose the report layout, `gate-based` or `cz-count`
const REPORT_LAYOUT_ENV: &str = "REPORT_LAYOUT";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let results_path = std::env::var(SWEEP_RESULTS_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SWEEP_RESULTS_PATH));

    let layout = match std::env::var(REPORT_LAYOUT_ENV) {
        Ok(value) => value
            .parse::<ReportLayout>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid {REPORT_LAYOUT_ENV}"))?,
        Err(_) => ReportLayout::default(),
    };

    log::debug!("Loading results from {}", results_path.display());
    let records = load_records_from_file(&results_path)
        .with_context(|| format!("Failed to load results from {}", results_path.display()))?;
    log::info!("Loaded {} results", records.len());

    let groups = aggregate(records);
    println!("{}", render_summary(&groups, layout));

    Ok(())
}
