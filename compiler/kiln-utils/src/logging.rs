//! Kiln logging utilities. This defines a simple logger with a style which
//! should be used across the VM to log and print messages.

use std::io::{self, Write};

use crate::log::{Level, LevelFilter, Log, Metadata, Record};

/// The logger that is used by the VM for `log!` statements.
///
/// Errors and warnings are written to standard error, everything else to
/// standard output.
#[derive(Debug, Default)]
pub struct VmLogger;

impl VmLogger {
    /// Create a new VM logger.
    pub const fn new() -> Self {
        Self
    }
}

impl Log for VmLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_prefix = match record.level() {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        };

        // A failed write to a standard stream has nowhere else to be
        // reported, so it is dropped.
        let _ = if record.level() <= Level::Warn {
            writeln!(io::stderr().lock(), "{level_prefix}: {}", record.args())
        } else {
            writeln!(io::stdout().lock(), "{level_prefix}: {}", record.args())
        };
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
    }
}

static LOGGER: VmLogger = VmLogger::new();

/// Install the [VmLogger] as the global logger and set the maximum level
/// that is emitted.
///
/// Only the first installation registers the logger. Later calls (or a
/// different logger having been installed by the host) only adjust the
/// level, which is why this never fails.
pub fn install(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        log::trace!("a global logger is already installed, only updating the level");
    }

    log::set_max_level(level);
}
