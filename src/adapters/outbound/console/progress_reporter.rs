use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;

const BAR_TEMPLATE: &str =
    "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}";

/// StderrProgressReporter adapter for phase messages and progress bars
///
/// Writes to stderr so the SBOM on stdout stays clean. Each counted phase
/// (license resolution, dependency fetching) gets its own bar; a report with a
/// different total starts a fresh bar.
pub struct StderrProgressReporter {
    bar: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: RefCell::new(None),
        }
    }

    fn bar_for(&self, total: usize) -> ProgressBar {
        let mut slot = self.bar.borrow_mut();
        match slot.as_ref() {
            Some(bar) if bar.length() == Some(total as u64) && !bar.is_finished() => bar.clone(),
            _ => {
                if let Some(previous) = slot.take() {
                    previous.finish_and_clear();
                }
                let bar = ProgressBar::new(total as u64);
                bar.set_style(bar_style());
                *slot = Some(bar.clone());
                bar
            }
        }
    }

    fn clear_bar(&self) {
        if let Some(bar) = self.bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-")
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.clear_bar();
        eprintln!("{}", message);
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let bar = self.bar_for(total);
        bar.set_position(current as u64);
        if let Some(msg) = message {
            bar.set_message(msg.to_string());
        }
        if current >= total {
            self.clear_bar();
        }
    }

    fn report_error(&self, message: &str) {
        match self.bar.borrow().as_ref() {
            Some(bar) => bar.suspend(|| eprintln!("{}", message)),
            None => eprintln!("{}", message),
        }
    }

    fn report_completion(&self, message: &str) {
        self.clear_bar();
        eprintln!();
        eprintln!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases_do_not_panic() {
        let reporter = StderrProgressReporter::new();
        reporter.report("📋 Listing installed packages (dpkg)...");
        reporter.report_progress(1, 3, Some("Resolving licenses"));
        reporter.report_error("⚠️  Warning: skipped");
        reporter.report_progress(3, 3, Some("Resolving licenses"));
        reporter.report_progress(1, 5, Some("Fetching dependencies"));
        reporter.report_completion("✅ Done");
    }

    #[test]
    fn test_new_total_starts_new_bar() {
        let reporter = StderrProgressReporter::default();
        reporter.report_progress(1, 4, None);
        let first = reporter.bar.borrow().as_ref().and_then(|b| b.length());
        reporter.report_progress(1, 9, None);
        let second = reporter.bar.borrow().as_ref().and_then(|b| b.length());

        assert_eq!(first, Some(4));
        assert_eq!(second, Some(9));
    }

    #[test]
    fn test_bar_cleared_when_phase_completes() {
        let reporter = StderrProgressReporter::new();
        reporter.report_progress(2, 2, None);
        assert!(reporter.bar.borrow().is_none());
    }
}
