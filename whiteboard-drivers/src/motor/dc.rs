//! Closed-loop DC motor driver
//!
//! This driver provides:
//! - Position tracking from a single-channel encoder
//! - Saturated proportional control toward a target position
//! - H-bridge output through a forward/reverse PWM pair
//!
//! # Usage
//!
//! The control loop runs in `check()`, which the dispatch loop calls once
//! per encoder edge. `move_by()` starts a move and drives the outputs
//! straight away so the first edge arrives.
//!
//! ```ignore
//! let mut motor = DcMotor::new(encoder_pin, fwd_pwm, rev_pwm, config);
//! motor.move_by(100);
//!
//! // On every encoder edge:
//! motor.check();
//! if motor.is_stopped() { /* on target */ }
//! ```
//!
//! The encoder has a single channel, so it cannot tell direction. Counts
//! are credited in the direction the motor was last driven, which also
//! covers coasting after the outputs switch off.

use whiteboard_core::config::MotorConfig;
use whiteboard_core::traits::{Direction, MotorController};
use whiteboard_core::Encoder;
use whiteboard_hal::{InputPin, PwmPin};

/// DC gear motor with encoder feedback
pub struct DcMotor<P, F, R> {
    encoder: Encoder<P>,
    forward: F,
    reverse: R,
    config: MotorConfig,
    /// Encoder count already folded into `position`
    last_count: u16,
    /// Measured position in encoder counts
    position: i32,
    /// Target position in encoder counts
    target: i32,
    /// Commanded drive level, signed by direction
    speed: i16,
    /// Direction last driven
    direction: Direction,
}

impl<P, F, R> DcMotor<P, F, R>
where
    P: InputPin,
    F: PwmPin,
    R: PwmPin,
{
    /// Create a motor at position zero with its outputs off
    pub fn new(encoder_pin: P, forward: F, reverse: R, config: MotorConfig) -> Self {
        let encoder = Encoder::new(encoder_pin);
        let mut motor = Self {
            last_count: encoder.count(),
            encoder,
            forward,
            reverse,
            config,
            position: 0,
            target: 0,
            speed: 0,
            direction: Direction::Forward,
        };
        motor.drive(0);
        motor
    }

    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    /// Direction counts are currently credited to
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Forward and reverse duty, after any output swap
    pub fn outputs(&self) -> (u16, u16) {
        (self.forward.duty(), self.reverse.duty())
    }

    /// Fold new encoder counts into the position
    fn sample(&mut self) {
        self.encoder.check();
        let count = self.encoder.count();
        let delta = count.wrapping_sub(self.last_count);
        self.last_count = count;
        self.position += delta as i32 * self.direction.sign();
    }

    /// One proportional control step
    fn update(&mut self) {
        let error = self.target - self.position;
        let distance = error.unsigned_abs();

        if distance <= self.config.tolerance as u32 {
            self.speed = 0;
            self.drive(0);
            return;
        }

        let level = distance
            .saturating_mul(self.config.gain as u32)
            .saturating_add(self.config.min_speed as u32)
            .min(self.config.max_speed as u32) as u8;

        self.direction = Direction::toward(error);
        self.speed = level as i16 * self.direction.sign() as i16;
        self.drive(level);
    }

    /// Apply a drive level in the current direction
    fn drive(&mut self, level: u8) {
        let forward = (self.direction == Direction::Forward) != self.config.reversed;
        // Break before make: never drive both sides of the bridge
        if forward {
            self.reverse.off();
            self.forward.set_level(level);
        } else {
            self.forward.off();
            self.reverse.set_level(level);
        }
    }
}

impl<P, F, R> MotorController for DcMotor<P, F, R>
where
    P: InputPin,
    F: PwmPin,
    R: PwmPin,
{
    fn move_by(&mut self, delta: i16) {
        self.sample();
        // Chain from the last target so in-band shortfalls do not accumulate
        self.target += delta as i32 * self.config.counts_per_pulse as i32;
        self.update();
    }

    fn check(&mut self) {
        self.sample();
        self.update();
    }

    fn speed(&self) -> i16 {
        self.speed
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn target(&self) -> i32 {
        self.target
    }

    fn halt(&mut self) {
        self.sample();
        self.target = self.position;
        self.speed = 0;
        self.drive(0);
    }
}
