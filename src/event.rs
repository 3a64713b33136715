use glam::{DVec3, IVec3};
use std::collections::VecDeque;

/// Signals raised by the core. The session drains them after every mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ColumnLoaded { cx: i32, cz: i32 },
    ColumnUnloaded { cx: i32, cz: i32 },
    /// Every column was dropped because the dimension changed
    WorldReset { dimension: i32 },
    BlockUpdated(IVec3),
    EntityMoved(DVec3),
    Spawned,
    DecodeError(String),
}

/// Events kept for a caller that never drains. Older ones are discarded first.
pub const MAX_QUEUED_EVENTS: usize = 4096;

#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        if self.events.len() == MAX_QUEUED_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
