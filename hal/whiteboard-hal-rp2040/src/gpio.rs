//! Encoder inputs
//!
//! The dispatch task samples encoder levels through [`InputPin`], but the
//! `Input` itself is owned by the task that awaits its edges. The edge task
//! therefore mirrors every level it sees into a [`PinLevel`] static, which
//! is what the encoder reads.

use embassy_rp::gpio::Input;
use portable_atomic::{AtomicBool, Ordering};
use whiteboard_hal::InputPin;

/// Last observed level of an input pin
#[derive(Debug)]
pub struct PinLevel {
    high: AtomicBool,
}

impl PinLevel {
    pub const fn new() -> Self {
        Self {
            high: AtomicBool::new(false),
        }
    }

    pub fn store(&self, high: bool) {
        self.high.store(high, Ordering::Release);
    }
}

impl Default for PinLevel {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPin for PinLevel {
    fn is_high(&self) -> bool {
        self.high.load(Ordering::Acquire)
    }
}

/// Awaits edges on an encoder input and keeps its [`PinLevel`] current
pub struct EdgeWatcher<'d> {
    input: Input<'d>,
    level: &'static PinLevel,
}

impl<'d> EdgeWatcher<'d> {
    /// Take ownership of the input and publish its current level
    pub fn new(input: Input<'d>, level: &'static PinLevel) -> Self {
        level.store(input.is_high());
        Self { input, level }
    }

    /// Wait for the next rising or falling edge
    ///
    /// Returns the new level, which has already been stored.
    pub async fn wait_for_edge(&mut self) -> bool {
        self.input.wait_for_any_edge().await;
        let high = self.input.is_high();
        self.level.store(high);
        high
    }

    pub fn level(&self) -> &'static PinLevel {
        self.level
    }
}
