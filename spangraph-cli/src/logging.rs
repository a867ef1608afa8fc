//! Stderr logger for the `log` facade.
//!
//! The libraries only emit through `log`; this is the one place that decides
//! where records go. Warnings are shown by default, `--verbose` adds info and
//! debug records.

use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Installs the stderr logger. Calling it again only changes the level.
pub fn init(verbose: bool) {
    // a second set_logger fails; the first logger stays in place
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level_for(verbose));
}
