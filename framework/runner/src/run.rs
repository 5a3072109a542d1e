use anyhow::Context;
use namap_bench_model::{append_records, ResultGroup, ResultRecord, RunConfig, RunOutcome};
use namap_bench_summariser::{aggregate, render_summary, OutputParser};

use crate::config::MalformedOutputPolicy;
use crate::definition::SweepDefinitionBuilder;
use crate::executor::RunExecutor;
use crate::progress::SweepProgress;
use crate::shutdown::{start_shutdown_listener, ShutdownSignalError};
use crate::sweep::SweepGrid;
use crate::tool_binary::tool_binary_path;
use crate::types::SweepResult;

/// Run every configuration of the sweep in turn, then print the ranked report.
///
/// Runs are executed one at a time. Pressing Ctrl-C cancels the run in progress and skips the rest
/// of the sweep, but the results collected so far are still exported and reported.
pub fn run(definition: SweepDefinitionBuilder) -> SweepResult<Vec<ResultGroup>> {
    let definition = definition.build()?;
    let config = &definition.config;

    log::info!("Running sweep: {}", definition.name);

    let binary = tool_binary_path(&config.binary)?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    let shutdown_handle = start_shutdown_listener(&runtime);
    let executor = RunExecutor::new(
        runtime,
        shutdown_handle.clone(),
        binary,
        config.input_dir.clone(),
        config.output_dir.clone(),
    )
    .with_timeout(config.timeout())
    .with_grace_period(config.grace_period());

    let grid = SweepGrid::from_config(config);
    let parser = OutputParser::new(&config.input_dir);
    let progress = SweepProgress::new(grid.len(), !config.no_progress);
    let shutdown_listener = shutdown_handle.new_listener();

    log::info!("Sweep has {} runs", grid.len());

    let mut records = Vec::new();
    for run_config in grid.iter() {
        if shutdown_listener.should_shutdown() {
            log::info!("Stopping sweep before run {}", run_config.run_idx);
            break;
        }

        progress.start_run(&run_config);
        let outcome = match executor.execute(&run_config) {
            Ok(outcome) => outcome,
            Err(e) if e.is::<ShutdownSignalError>() => {
                log::warn!("Run {} cancelled", run_config.run_idx);
                break;
            }
            Err(e) => {
                progress.finish();
                return Err(e.context(format!("Run {} could not be executed", run_config.run_idx)));
            }
        };

        match records_for_outcome(&parser, &run_config, outcome, config.malformed_output) {
            Ok(run_records) => records.extend(run_records),
            Err(e) => {
                progress.finish();
                return Err(e);
            }
        }
        progress.finish_run();
    }
    progress.finish();

    if let Some(path) = &config.results_path {
        append_records(&records, path)
            .with_context(|| format!("Failed to write results to {}", path.display()))?;
        log::info!("Wrote {} results to {}", records.len(), path.display());
    }

    let groups = aggregate(records);
    println!("{}", render_summary(&groups, config.report_layout));

    Ok(groups)
}

/// The records that a finished run contributes to the sweep.
///
/// Only a successful run contributes records. Failed and timed out runs are logged and contribute
/// nothing, whatever output they produced before they ended.
pub(crate) fn records_for_outcome(
    parser: &OutputParser,
    config: &RunConfig,
    outcome: RunOutcome,
    policy: MalformedOutputPolicy,
) -> SweepResult<Vec<ResultRecord>> {
    match outcome {
        RunOutcome::Success { stdout } => match parser.parse(&stdout, config) {
            Ok(records) => {
                log::info!("Run {} produced {} results", config.run_idx, records.len());
                Ok(records)
            }
            Err(e) => match policy {
                MalformedOutputPolicy::SkipRun => {
                    log::error!("Discarding all results of run {}: {e}", config.run_idx);
                    Ok(Vec::new())
                }
                MalformedOutputPolicy::AbortSweep => Err(anyhow::Error::new(e)
                    .context(format!("Malformed output from run {}", config.run_idx))),
            },
        },
        RunOutcome::Failed {
            code,
            stdout,
            stderr,
        } => {
            match code {
                Some(code) => log::error!(
                    "Run {} failed with exit code {code}: {}",
                    config.run_idx,
                    stderr.trim()
                ),
                None => log::error!(
                    "Run {} was terminated by a signal: {}",
                    config.run_idx,
                    stderr.trim()
                ),
            }
            log::debug!("Output of failed run {}:\n{stdout}", config.run_idx);
            Ok(Vec::new())
        }
        RunOutcome::TimedOut => {
            log::warn!("Run {} timed out", config.run_idx);
            Ok(Vec::new())
        }
    }
}
