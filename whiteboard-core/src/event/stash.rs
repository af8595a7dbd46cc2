//! Single-byte receive stash
//!
//! The serial receive path stores the most recent byte here and raises
//! [`EventKind::SerialRx`]. There is no queue: if a second byte arrives
//! before the main loop has consumed the first, the first is overwritten.
//! Such overruns are counted so they can be reported.

use portable_atomic::{AtomicU16, AtomicU8, Ordering};

use super::register::{EventKind, EventRegister};

#[derive(Debug)]
pub struct ByteStash {
    byte: AtomicU8,
    overruns: AtomicU16,
}

impl ByteStash {
    pub const fn new() -> Self {
        Self {
            byte: AtomicU8::new(0),
            overruns: AtomicU16::new(0),
        }
    }

    /// Store a received byte and flag it as pending
    ///
    /// The byte is written before the event bit is raised, so a consumer
    /// that sees the bit also sees this byte. Returns `true` if an unread
    /// byte was overwritten.
    pub fn receive(&self, byte: u8, events: &EventRegister) -> bool {
        self.byte.store(byte, Ordering::Relaxed);
        let overrun = events.set(EventKind::SerialRx);
        if overrun {
            self.overruns.fetch_add(1, Ordering::Relaxed);
        }
        overrun
    }

    /// Most recently stored byte
    pub fn byte(&self) -> u8 {
        self.byte.load(Ordering::Acquire)
    }

    /// Number of bytes overwritten before they were read
    pub fn overruns(&self) -> u16 {
        self.overruns.load(Ordering::Relaxed)
    }
}

impl Default for ByteStash {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receive_raises_event() {
        let events = EventRegister::new();
        let stash = ByteStash::new();

        assert!(!stash.receive(b'M', &events));
        assert!(events.is_pending(EventKind::SerialRx));
        assert_eq!(stash.byte(), b'M');
        assert_eq!(stash.overruns(), 0);
    }

    #[test]
    fn test_overrun_overwrites() {
        let events = EventRegister::new();
        let stash = ByteStash::new();

        stash.receive(b'M', &events);
        assert!(stash.receive(b' ', &events));
        assert_eq!(stash.byte(), b' ');
        assert_eq!(stash.overruns(), 1);

        // Consumed: the next byte is not an overrun
        events.clear(EventKind::SerialRx);
        assert!(!stash.receive(b'1', &events));
        assert_eq!(stash.overruns(), 1);
    }
}
