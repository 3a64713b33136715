use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Log severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl LogSeverity {
    pub(crate) fn from_level(level: u8) -> Self {
        match level {
            0 => LogSeverity::Debug,
            1 => LogSeverity::Info,
            2 => LogSeverity::Warning,
            3 => LogSeverity::Error,
            _ => LogSeverity::Fatal,
        }
    }

    pub(crate) fn level(self) -> u8 {
        self as u8
    }
}

/// Display impl for LogSeverity
impl Display for LogSeverity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LogSeverity::Debug => write!(f, "DEBUG"),
            LogSeverity::Info => write!(f, "INFO"),
            LogSeverity::Warning => write!(f, "WARNING"),
            LogSeverity::Error => write!(f, "ERROR"),
            LogSeverity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Parses the values accepted by the `GLIDER_LOG` environment variable
impl FromStr for LogSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogSeverity::Debug),
            "info" => Ok(LogSeverity::Info),
            "warning" | "warn" => Ok(LogSeverity::Warning),
            "error" => Ok(LogSeverity::Error),
            "fatal" => Ok(LogSeverity::Fatal),
            other => Err(format!("unknown log severity: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_severity_display() {
        assert_eq!(format!("{}", LogSeverity::Debug), "DEBUG");
        assert_eq!(format!("{}", LogSeverity::Info), "INFO");
        assert_eq!(format!("{}", LogSeverity::Warning), "WARNING");
        assert_eq!(format!("{}", LogSeverity::Error), "ERROR");
        assert_eq!(format!("{}", LogSeverity::Fatal), "FATAL");
    }

    #[test]
    fn test_log_severity_parse() {
        assert_eq!("debug".parse::<LogSeverity>(), Ok(LogSeverity::Debug));
        assert_eq!(" WARN ".parse::<LogSeverity>(), Ok(LogSeverity::Warning));
        assert!("loud".parse::<LogSeverity>().is_err());
    }

    #[test]
    fn test_log_severity_ordering() {
        assert!(LogSeverity::Debug < LogSeverity::Info);
        assert!(LogSeverity::Error < LogSeverity::Fatal);
        for level in 0..5 {
            assert_eq!(LogSeverity::from_level(level).level(), level);
        }
    }
}
