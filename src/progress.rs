//! Progress reporting for the scaffold and install phases.
//!
//! The generator reports against a notional total of [`TOTAL_UNITS`]; the
//! scaffold phase is worth [`SCAFFOLD_UNITS`] and the install phase
//! [`INSTALL_UNITS`].

use std::cell::{Cell, RefCell};
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressFinish, ProgressStyle};

pub const TOTAL_UNITS: u64 = 100;
pub const SCAFFOLD_UNITS: u64 = 60;
pub const INSTALL_UNITS: u64 = 40;

/// Observer notified as a project is generated.
pub trait Reporter {
    /// Announces the phase that is starting.
    fn stage(&self, message: &str);
    fn advance(&self, units: u64);
    fn finish(&self);
}

/// Terminal progress bar: spinner, description, bar and elapsed time.
pub struct ProgressBarReporter {
    bar: ProgressBar,
}

impl ProgressBarReporter {
    /// Adds a bar to `progress`, the display the logger suspends around records.
    pub fn new(progress: &MultiProgress) -> Self {
        // Also cleared when dropped unfinished.
        let bar = progress.add(ProgressBar::new(TOTAL_UNITS).with_finish(ProgressFinish::AndClear));
        let style = ProgressStyle::with_template("{spinner:.green} {msg} {wide_bar} {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Bar that draws nothing; every update still goes through indicatif.
    pub fn hidden() -> Self {
        Self { bar: ProgressBar::hidden() }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl Reporter for ProgressBarReporter {
    fn stage(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    fn advance(&self, units: u64) {
        self.bar.inc(units);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Reporter that only records progress, for callers that print nothing.
#[derive(Debug, Default)]
pub struct SilentReporter {
    units: Cell<u64>,
    stages: RefCell<Vec<String>>,
}

impl SilentReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn units(&self) -> u64 {
        self.units.get()
    }

    pub fn stages(&self) -> Vec<String> {
        self.stages.borrow().clone()
    }
}

impl Reporter for SilentReporter {
    fn stage(&self, message: &str) {
        self.stages.borrow_mut().push(message.to_string());
    }

    fn advance(&self, units: u64) {
        self.units.set(self.units.get() + units);
    }

    fn finish(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_weights_fill_total() {
        assert_eq!(SCAFFOLD_UNITS + INSTALL_UNITS, TOTAL_UNITS);
    }

    #[test]
    fn test_hidden_bar_tracks_position() {
        let reporter = ProgressBarReporter::hidden();
        reporter.stage("Scaffolding project...");
        reporter.advance(SCAFFOLD_UNITS);
        assert_eq!(reporter.position(), SCAFFOLD_UNITS);
        reporter.finish();
    }

    #[test]
    fn test_bar_is_cleared_from_shared_display() {
        let progress = MultiProgress::with_draw_target(indicatif::ProgressDrawTarget::hidden());
        let reporter = ProgressBarReporter::new(&progress);
        reporter.advance(SCAFFOLD_UNITS);
        reporter.advance(INSTALL_UNITS);
        assert_eq!(reporter.position(), TOTAL_UNITS);

        reporter.finish();
        assert!(reporter.bar.is_finished());
    }
}
