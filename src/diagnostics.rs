//! Run diagnostics.
//!
//! Every component that reports progress receives a [`Diagnostics`] sink by
//! reference. The production sink, [`RunLog`], keeps a copy of every line so
//! the whole run can be written to disk once the destination is known, and
//! forwards each message to the `log` facade for the console.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::constants::LOG_TIMESTAMP_FORMAT;

/// Sink for run diagnostics.
#[cfg_attr(test, mockall::automock)]
pub trait Diagnostics {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);

    /// Write everything recorded so far to `path`, creating its parent directory.
    fn flush_to(&self, path: &Path) -> Result<()>;
}

/// Buffered run log backed by the `log` facade.
#[derive(Debug, Default)]
pub struct RunLog {
    buffer: RefCell<String>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines recorded so far.
    pub fn contents(&self) -> String {
        self.buffer.borrow().clone()
    }

    fn record(&self, level: &str, message: &str) {
        let timestamp = chrono::Local::now().format(LOG_TIMESTAMP_FORMAT);
        let mut buffer = self.buffer.borrow_mut();
        buffer.push_str(&format!("[{}] {:<5} {}\n", timestamp, level, message));
    }
}

impl Diagnostics for RunLog {
    fn info(&self, message: &str) {
        log::info!("{}", message);
        self.record("INFO", message);
    }

    fn warn(&self, message: &str) {
        log::warn!("{}", message);
        self.record("WARN", message);
    }

    fn error(&self, message: &str) {
        log::error!("{}", message);
        self.record("ERROR", message);
    }

    fn debug(&self, message: &str) {
        log::debug!("{}", message);
        self.record("DEBUG", message);
    }

    fn flush_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .context(format!("Failed to create log directory: {}", parent.display()))?;
            }
        }

        fs::write(path, self.buffer.borrow().as_bytes())
            .context(format!("Failed to write log file: {}", path.display()))
    }
}
