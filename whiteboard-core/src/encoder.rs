//! Single-channel encoder pulse counter
//!
//! The encoder pin is sampled on demand. Every observed level change, rising
//! *and* falling, adds one to the count, so the count runs at twice the
//! mechanical pulse rate ([`COUNTS_PER_PULSE`]). The scale is left to the
//! caller; `check()` stays a single comparison.
//!
//! Sampling a level rather than counting edges means an even number of edges
//! between two `check()` calls is invisible. That undercounts position but
//! never corrupts the counter.

use whiteboard_hal::InputPin;

/// Encoder counts per mechanical pulse (both edges are counted)
pub const COUNTS_PER_PULSE: u16 = 2;

/// Edge counter for one encoder input
#[derive(Debug)]
pub struct Encoder<P> {
    pin: P,
    /// Level seen at the previous `check()`
    level: bool,
    /// Transitions seen, wrapping at 16 bits
    count: u16,
}

impl<P: InputPin> Encoder<P> {
    /// Create an encoder, taking the pin's current level as the baseline
    pub fn new(pin: P) -> Self {
        let level = pin.is_high();
        Self {
            pin,
            level,
            count: 0,
        }
    }

    /// Sample the pin and count a transition if its level changed
    ///
    /// Returns `true` if the count was incremented. Calling this again
    /// without a level change is a no-op, so spurious extra calls are
    /// harmless.
    pub fn check(&mut self) -> bool {
        let level = self.pin.is_high();
        if level == self.level {
            return false;
        }
        self.level = level;
        self.count = self.count.wrapping_add(1);
        true
    }

    /// Raw transition count
    pub fn count(&self) -> u16 {
        self.count
    }

    /// Raw transition count as a signed value (wraps at 16 bits)
    pub fn get_count(&self) -> i16 {
        self.count as i16
    }

    /// Level recorded at the last `check()`
    pub fn level(&self) -> bool {
        self.level
    }

    /// Zero the count and re-sample the baseline level
    pub fn reset(&mut self) {
        self.level = self.pin.is_high();
        self.count = 0;
    }
}
