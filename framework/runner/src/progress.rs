use indicatif::{ProgressBar, ProgressStyle};
use namap_bench_model::RunConfig;

/// Displays a progress bar while the sweep is running to show the user how many runs are left.
///
/// When disabled every method is a no-op.
pub(crate) struct SweepProgress {
    bar: Option<ProgressBar>,
}

impl SweepProgress {
    pub(crate) fn new(total_runs: usize, enabled: bool) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total_runs as u64);
        match ProgressStyle::with_template(
            "{spinner:.green} [{wide_bar:.cyan/blue}] {pos}/{len} runs [{elapsed_precise}] {msg}",
        ) {
            Ok(style) => bar.set_style(style.progress_chars("#>-")),
            Err(e) => log::warn!("Failed to set progress style: {e}"),
        }

        Self { bar: Some(bar) }
    }

    pub(crate) fn start_run(&self, config: &RunConfig) {
        if let Some(bar) = &self.bar {
            bar.set_message(format!(
                "{} / {}",
                config.architecture.kind, config.coordinate_mapping
            ));
        }
    }

    pub(crate) fn finish_run(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    pub(crate) fn finish(&self) {
        if let Some(bar) = &self.bar {
            log::trace!("Clearing progress bar");
            bar.finish_and_clear();
        }
    }
}
