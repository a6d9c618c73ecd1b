use serde::{Deserialize, Serialize};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Destination for page-object diagnostics, handed to every page through
/// its context.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, page: &str, message: &str);

    fn debug(&self, page: &str, message: &str) {
        self.log(LogLevel::Debug, page, message);
    }

    fn info(&self, page: &str, message: &str) {
        self.log(LogLevel::Info, page, message);
    }

    fn warn(&self, page: &str, message: &str) {
        self.log(LogLevel::Warn, page, message);
    }

    fn error(&self, page: &str, message: &str) {
        self.log(LogLevel::Error, page, message);
    }
}

/// Forwards to the `tracing` subscriber installed by the host process.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: LogLevel, page: &str, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!(page = %page, "{}", message),
            LogLevel::Info => tracing::info!(page = %page, "{}", message),
            LogLevel::Warn => tracing::warn!(page = %page, "{}", message),
            LogLevel::Error => tracing::error!(page = %page, "{}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub page: String,
    pub message: String,
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn records_at(&self, level: LogLevel) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .collect()
    }

    pub fn contains(&self, level: LogLevel, fragment: &str) -> bool {
        self.records_at(level)
            .iter()
            .any(|r| r.message.contains(fragment))
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: LogLevel, page: &str, message: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(LogRecord {
                level,
                page: page.to_string(),
                message: message.to_string(),
            });
        }
    }
}
