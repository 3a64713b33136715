use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum GliderError {
    IoError(std::io::Error),
    /// Field slicing ended at `consumed` bytes but the payload held `length`
    DecodeError { consumed: usize, length: usize },
    ColumnNotLoaded { cx: i32, cz: i32 },
    OutOfWorld { y: i32 },
    UnknownControl(String),
    UnknownPacket(u8),
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, GliderError>;

impl fmt::Display for GliderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GliderError::IoError(err) => write!(f, "IO error: {}", err),
            GliderError::DecodeError { consumed, length } => write!(
                f,
                "Decode error: consumed {} bytes of a {} byte payload",
                consumed, length
            ),
            GliderError::ColumnNotLoaded { cx, cz } => {
                write!(f, "Column ({}, {}) is not loaded", cx, cz)
            }
            GliderError::OutOfWorld { y } => write!(f, "Block y {} is outside the world", y),
            GliderError::UnknownControl(name) => write!(f, "Unknown control: {}", name),
            GliderError::UnknownPacket(id) => write!(f, "Unknown packet 0x{:02x}", id),
            GliderError::ConfigError(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl Error for GliderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GliderError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GliderError {
    fn from(err: std::io::Error) -> Self {
        GliderError::IoError(err)
    }
}

impl From<serde_json::Error> for GliderError {
    fn from(err: serde_json::Error) -> Self {
        GliderError::ConfigError(err.to_string())
    }
}
