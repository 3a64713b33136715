use std::fmt;

/// Bootstrap progress of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Waiting for the first authoritative position
    #[default]
    Uninitialized,
    /// Physics ticks and position updates run
    Active,
    Terminated,
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        *self == SessionState::Active
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Uninitialized => write!(f, "uninitialized"),
            SessionState::Active => write!(f, "active"),
            SessionState::Terminated => write!(f, "terminated"),
        }
    }
}
