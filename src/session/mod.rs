pub mod client;
pub mod runtime;
pub mod state;

pub use client::Client;
pub use runtime::{spawn, Command, SessionHandle};
pub use state::SessionState;
