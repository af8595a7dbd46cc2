//! Simulated hardware shared by the driver tests

use core::cell::Cell;

use heapless::Vec;
use whiteboard_hal::{InputPin, PwmPin, UartTx};

/// Encoder input backed by a shared cell
#[derive(Clone, Copy)]
pub struct SimPin<'a>(pub &'a Cell<bool>);

impl InputPin for SimPin<'_> {
    fn is_high(&self) -> bool {
        self.0.get()
    }
}

impl SimPin<'_> {
    pub fn toggle(&self) {
        self.0.set(!self.0.get());
    }
}

pub const SIM_MAX_DUTY: u16 = 1000;

/// PWM channel whose duty is visible through a shared cell
#[derive(Clone, Copy)]
pub struct SimPwm<'a>(pub &'a Cell<u16>);

impl PwmPin for SimPwm<'_> {
    fn max_duty(&self) -> u16 {
        SIM_MAX_DUTY
    }

    fn set_duty(&mut self, duty: u16) {
        self.0.set(duty.min(SIM_MAX_DUTY));
    }

    fn duty(&self) -> u16 {
        self.0.get()
    }
}

/// Serial output that records what was written
#[derive(Default)]
pub struct SimUart {
    pub sent: Vec<u8, 32>,
}

impl UartTx for SimUart {
    type Error = ();

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), ()> {
        self.sent.extend_from_slice(data)
    }
}
