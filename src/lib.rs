pub mod config;
pub mod error;
pub mod event;
pub mod logger;
pub mod physics;
pub mod protocol;
pub mod session;
pub mod world;

// Re-export commonly used items
pub use config::ClientConfig;
pub use error::{GliderError, Result};
pub use event::Event;
pub use logger::{log, LogSeverity};
pub use protocol::packet::Packet;
pub use session::Client;
pub use world::{Block, WorldStore};
