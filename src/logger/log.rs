use crate::logger::severity::LogSeverity;
use crate::logger::time::now;
use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU8, Ordering};

/// Process-wide minimum severity, seeded from `GLIDER_LOG`
static MIN_SEVERITY: Lazy<AtomicU8> = Lazy::new(|| {
    let severity = std::env::var("GLIDER_LOG")
        .ok()
        .and_then(|value| value.parse::<LogSeverity>().ok())
        .unwrap_or(LogSeverity::Info);
    AtomicU8::new(severity.level())
});

pub fn log(msg: String, log_severity: LogSeverity) {
    if log_severity < min_severity() {
        return;
    }
    println!("[{}] {} {}", log_severity, now(), msg);
}

pub fn min_severity() -> LogSeverity {
    LogSeverity::from_level(MIN_SEVERITY.load(Ordering::Relaxed))
}

pub fn set_min_severity(severity: LogSeverity) {
    MIN_SEVERITY.store(severity.level(), Ordering::Relaxed);
}
