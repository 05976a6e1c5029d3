use std::collections::VecDeque;
use std::sync::Arc;

use log::{Log, Metadata, Record, SetLoggerError};
use parking_lot::Mutex;

const DEFAULT_CAPACITY: usize = 256;

/// Ring buffer of formatted log records, shared between the logger and the UI
#[derive(Debug)]
pub struct LogBuffer {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl LogBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&self, line: String) {
        let mut lines = self.lines.lock();
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    /// Take every buffered line, oldest first
    pub fn drain(&self) -> Vec<String> {
        self.lines.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }
}

/// `log` backend that captures records instead of writing to the terminal,
/// which is owned by the UI while the playground runs
struct CaptureLogger {
    buffer: Arc<LogBuffer>,
}

impl Log for CaptureLogger {
    // Filtering happens through `log::max_level`, which the app adjusts
    // when debug logging is toggled.
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.buffer
            .push(format!("[{}] {}", record.level(), record.args()));
    }

    fn flush(&self) {}
}

/// Route the global logger into `buffer`
pub fn install(buffer: Arc<LogBuffer>, level: log::LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(CaptureLogger { buffer }))?;
    log::set_max_level(level);
    Ok(())
}
