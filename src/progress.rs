use indicatif::{ProgressBar, ProgressStyle};

use crate::harness::RunSummary;

/// Progress bar for the sequential run loop
pub struct RunProgressTracker {
    pub progress_bar: ProgressBar,
}

impl RunProgressTracker {
    /// Create a new tracker for `total_iterations` iterations
    pub fn new(operation: &str, total_iterations: u64) -> Self {
        let pb = ProgressBar::new(total_iterations);

        pb.set_style(
            ProgressStyle::default_bar()
                .template(&format!(
                    "{operation}: {{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{per_sec}}, ETA: {{eta}})"
                ))
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏  "),
        );

        Self { progress_bar: pb }
    }

    /// A tracker that draws nothing, for quiet runs and tests
    pub fn hidden(total_iterations: u64) -> Self {
        let pb = ProgressBar::hidden();
        pb.set_length(total_iterations);
        Self { progress_bar: pb }
    }

    /// Update with the number of completed iterations
    pub fn update(&self, completed: u64) {
        self.progress_bar.set_position(completed);
    }

    pub fn position(&self) -> u64 {
        self.progress_bar.position()
    }

    /// Finish the progress bar with the run summary
    pub fn finish(&self, operation: &str, summary: &RunSummary) {
        self.progress_bar.set_position(summary.iterations);
        self.progress_bar
            .finish_with_message(format!("{operation} complete! {summary}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn hidden_tracker_follows_updates() {
        let tracker = RunProgressTracker::hidden(100);
        assert_eq!(tracker.progress_bar.length(), Some(100));
        tracker.update(42);
        assert_eq!(tracker.position(), 42);

        let summary = RunSummary {
            iterations: 100,
            elapsed: Duration::from_millis(1),
            bytes_per_iteration: 0,
        };
        tracker.finish("run", &summary);
        assert_eq!(tracker.position(), 100);
        assert!(tracker.progress_bar.is_finished());
    }
}
