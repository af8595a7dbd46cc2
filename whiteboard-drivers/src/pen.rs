//! Pen lift servo
//!
//! A hobby servo holds the pen. Position is set by the pulse width within a
//! fixed frame period; the PWM channel must already run at that period.

use whiteboard_core::config::PenConfig;
use whiteboard_core::traits::{PenActuator, PenState};
use whiteboard_hal::PwmPin;

pub struct PenServo<S> {
    pwm: S,
    config: PenConfig,
    state: PenState,
}

impl<S: PwmPin> PenServo<S> {
    /// Create the servo driver and lift the pen
    pub fn new(pwm: S, config: PenConfig) -> Self {
        let mut servo = Self {
            pwm,
            config,
            state: PenState::Up,
        };
        servo.apply();
        servo
    }

    /// Pulse width for a pen position, in microseconds
    pub fn pulse_us(&self, pen: PenState) -> u16 {
        match pen {
            PenState::Up => self.config.up_us,
            PenState::Down => self.config.down_us,
        }
    }

    pub fn duty(&self) -> u16 {
        self.pwm.duty()
    }

    fn apply(&mut self) {
        let pulse = self.pulse_us(self.state) as u32;
        let period = (self.config.period_us as u32).max(1);
        let duty = pulse * self.pwm.max_duty() as u32 / period;
        self.pwm.set_duty(duty.min(u16::MAX as u32) as u16);
    }
}

impl<S: PwmPin> PenActuator for PenServo<S> {
    fn set_pen(&mut self, pen: PenState) {
        if pen != self.state {
            self.state = pen;
            self.apply();
        }
    }

    fn pen(&self) -> PenState {
        self.state
    }
}
