//! Dispatch loop state

use crate::event::EventSet;

/// What the dispatch loop is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopState {
    /// Nothing pending; the caller may sleep until the next event
    #[default]
    Idle,
    /// At least one event is pending
    Dispatching,
}

impl LoopState {
    /// Next state given the events currently pending
    pub fn transition(self, pending: EventSet) -> Self {
        if pending.is_empty() {
            LoopState::Idle
        } else {
            LoopState::Dispatching
        }
    }

    pub fn is_idle(self) -> bool {
        self == LoopState::Idle
    }
}
