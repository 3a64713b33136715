pub mod log;
pub mod severity;
pub mod time;

pub use log::{log, min_severity, set_min_severity};
pub use severity::LogSeverity;
