//! Per-generation progress display

use crate::algorithm::engine::StepReport;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static GENERATION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar advanced once per substitution step
pub struct GenerationProgress {
    bar: ProgressBar,
}

impl GenerationProgress {
    /// Bar for `steps` generations of `tiling`, drawn on stderr
    pub fn new(tiling: &str, steps: usize) -> Self {
        let bar = ProgressBar::new(steps as u64);
        bar.set_style(GENERATION_STYLE.clone());
        bar.set_prefix(tiling.to_string());
        Self { bar }
    }

    /// Bar that records progress without drawing anything
    pub fn hidden(steps: usize) -> Self {
        let bar = ProgressBar::with_draw_target(Some(steps as u64), ProgressDrawTarget::hidden());
        Self { bar }
    }

    /// Record a completed generation
    pub fn record(&self, report: StepReport) {
        self.bar.set_position(report.step as u64);
        self.bar.set_message(format!("{} tiles", report.tiles));
    }

    /// Generations recorded so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Clear the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
