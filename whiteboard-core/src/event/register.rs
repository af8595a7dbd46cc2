//! Pending-event bit register
//!
//! One bit per event kind. Producers (interrupt handlers or their async
//! equivalents) only ever set bits; the main loop clears a bit once the
//! matching handler has finished. Setting an already-set bit coalesces the
//! two occurrences into one.

use portable_atomic::{AtomicU8, Ordering};

/// Kind of asynchronous event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    /// Left motor encoder changed level
    LeftEdge,
    /// Right motor encoder changed level
    RightEdge,
    /// A byte arrived on the serial link
    SerialRx,
}

impl EventKind {
    /// All kinds, highest service priority first
    ///
    /// Encoder edges go before serial input so the control loops see every
    /// edge promptly even under a steady stream of commands.
    pub const PRIORITY: [EventKind; 3] =
        [EventKind::LeftEdge, EventKind::RightEdge, EventKind::SerialRx];

    /// Register bit for this kind
    pub const fn bit(self) -> u8 {
        match self {
            EventKind::SerialRx => 1 << 0,
            EventKind::LeftEdge => 1 << 1,
            EventKind::RightEdge => 1 << 2,
        }
    }
}

/// Snapshot of pending events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventSet(u8);

impl EventSet {
    pub const EMPTY: EventSet = EventSet(0);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    const MASK: u8 =
        EventKind::LeftEdge.bit() | EventKind::RightEdge.bit() | EventKind::SerialRx.bit();

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, kind: EventKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn insert(&mut self, kind: EventKind) {
        self.0 |= kind.bit();
    }

    pub fn remove(&mut self, kind: EventKind) {
        self.0 &= !kind.bit();
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Highest-priority pending event, if any
    pub fn highest_priority(self) -> Option<EventKind> {
        EventKind::PRIORITY
            .into_iter()
            .find(|kind| self.contains(*kind))
    }

    /// Pending events in priority order
    pub fn iter(self) -> impl Iterator<Item = EventKind> {
        EventKind::PRIORITY
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

/// Shared pending-event register
///
/// Lives in a `static` and is shared between producers and the main loop.
/// All access goes through atomic read-modify-write operations, so a bit set
/// by a producer between the loop's read and its clear of a *different* bit
/// is never lost.
#[derive(Debug)]
pub struct EventRegister {
    bits: AtomicU8,
}

impl EventRegister {
    pub const fn new() -> Self {
        Self {
            bits: AtomicU8::new(0),
        }
    }

    /// Mark an event as pending
    ///
    /// Returns `true` if it was already pending, i.e. this occurrence was
    /// coalesced with an earlier one.
    pub fn set(&self, kind: EventKind) -> bool {
        let previous = self.bits.fetch_or(kind.bit(), Ordering::Release);
        previous & kind.bit() != 0
    }

    /// Snapshot of the pending events
    ///
    /// Nothing is cleared; each bit stays set until `clear()` is called for
    /// it.
    pub fn take_pending(&self) -> EventSet {
        EventSet::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Mark an event as handled
    pub fn clear(&self, kind: EventKind) {
        self.bits.fetch_and(!kind.bit(), Ordering::AcqRel);
    }

    pub fn is_pending(&self, kind: EventKind) -> bool {
        self.take_pending().contains(kind)
    }

    pub fn is_empty(&self) -> bool {
        self.take_pending().is_empty()
    }
}

impl Default for EventRegister {
    fn default() -> Self {
        Self::new()
    }
}
