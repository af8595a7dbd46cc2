//! PWM output abstractions
//!
//! One [`PwmPin`] is one compare channel. A DC motor on an H-bridge uses two
//! (forward and reverse); the pen servo uses one.

/// A single PWM compare channel
pub trait PwmPin {
    /// Compare value that corresponds to 100% duty
    fn max_duty(&self) -> u16;

    /// Set the raw compare value, `0..=max_duty()`
    ///
    /// Values above `max_duty()` are clamped by the implementation.
    fn set_duty(&mut self, duty: u16);

    /// Current raw compare value
    fn duty(&self) -> u16;

    /// Set the duty cycle from an 8-bit drive level (0 = off, 255 = full)
    fn set_level(&mut self, level: u8) {
        let duty = (level as u32 * self.max_duty() as u32 / u8::MAX as u32) as u16;
        self.set_duty(duty);
    }

    /// Turn the output fully off
    fn off(&mut self) {
        self.set_duty(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakePwm {
        max: u16,
        duty: u16,
    }

    impl PwmPin for FakePwm {
        fn max_duty(&self) -> u16 {
            self.max
        }

        fn set_duty(&mut self, duty: u16) {
            self.duty = duty.min(self.max);
        }

        fn duty(&self) -> u16 {
            self.duty
        }
    }

    #[test]
    fn test_set_level_scales_to_max() {
        let mut pwm = FakePwm { max: 1000, duty: 0 };

        pwm.set_level(255);
        assert_eq!(pwm.duty(), 1000);

        pwm.set_level(0);
        assert_eq!(pwm.duty(), 0);

        // 128/255 of 1000, truncated
        pwm.set_level(128);
        assert_eq!(pwm.duty(), 501);
    }

    #[test]
    fn test_off() {
        let mut pwm = FakePwm { max: 255, duty: 200 };
        pwm.off();
        assert_eq!(pwm.duty(), 0);
    }
}
