pub mod config;
pub mod driver;
pub mod logging;
pub mod wait;

pub use config::{Config, ExecutionMode};
pub use driver::DriverTrait;
pub use logging::{LogLevel, LogRecord, LogSink, MemorySink, TracingSink};
pub use wait::{WaitConfig, WaitOutcome};
