use env_logger::Env;
use indicatif::MultiProgress;
use log::{Log, Metadata, Record};

/// Initializes logging for the command-line front ends and returns the
/// progress display that log lines are coordinated with.
///
/// Progress messages are shown at `info`; `--verbose` adds `debug`. `RUST_LOG`
/// takes precedence over both when set. Bars attached to the returned
/// [`MultiProgress`] are cleared while a record is written and redrawn below it.
pub fn init_logger(verbose: bool) -> MultiProgress {
    let level = if verbose { "debug" } else { "info" };
    let logger = env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .build();

    let progress = MultiProgress::new();
    let max_level = logger.filter();
    if log::set_boxed_logger(Box::new(ProgressLogger::new(logger, progress.clone()))).is_ok() {
        log::set_max_level(max_level);
    }
    progress
}

/// Forwards records to `inner` with the progress bars suspended.
pub struct ProgressLogger<L> {
    inner: L,
    progress: MultiProgress,
}

impl<L: Log> ProgressLogger<L> {
    pub fn new(inner: L, progress: MultiProgress) -> Self {
        Self { inner, progress }
    }
}

impl<L: Log> Log for ProgressLogger<L> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if self.inner.enabled(record.metadata()) {
            self.progress.suspend(|| self.inner.log(record));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}
