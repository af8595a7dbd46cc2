//! PWM outputs
//!
//! Each motor uses one PWM slice with channel A driving the bridge forward
//! and channel B driving it in reverse. The pen servo uses channel A of its
//! own slice, clocked so that one counter tick is one microsecond.
//!
//! Slices are configured here, then split into per-channel outputs that
//! implement `embedded_hal::pwm::SetDutyCycle`; [`DutyChannel`] adapts
//! those to [`PwmPin`].

use embassy_rp::pwm::Config;
use embedded_hal::pwm::SetDutyCycle;
use fixed::types::U12F4;
use whiteboard_hal::PwmPin;

/// System clock frequency (RP2040 default)
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// Motor bridge PWM frequency
pub const MOTOR_PWM_HZ: u32 = 20_000;

/// Counter ticks per second for the servo slice
const SERVO_TICK_HZ: u32 = 1_000_000;

/// PWM channel adapter
pub struct DutyChannel<C> {
    channel: C,
    duty: u16,
}

impl<C: SetDutyCycle> DutyChannel<C> {
    /// Wrap a channel and switch it off
    ///
    /// If the channel rejects the write, `duty()` reports full duty since
    /// the output state is unknown.
    pub fn new(channel: C) -> Self {
        let duty = channel.max_duty_cycle();
        let mut pwm = Self { channel, duty };
        pwm.off();
        pwm
    }
}

impl<C: SetDutyCycle> PwmPin for DutyChannel<C> {
    fn max_duty(&self) -> u16 {
        self.channel.max_duty_cycle()
    }

    fn set_duty(&mut self, duty: u16) {
        let duty = duty.min(self.channel.max_duty_cycle());
        if self.channel.set_duty_cycle(duty).is_ok() {
            self.duty = duty;
        }
    }

    fn duty(&self) -> u16 {
        self.duty
    }
}

/// Counter top value for a PWM frequency with no clock division
pub fn top_for_frequency(sys_clk_hz: u32, freq_hz: u32) -> u16 {
    let ticks = sys_clk_hz / freq_hz.max(1);
    ticks.clamp(2, u16::MAX as u32 + 1).saturating_sub(1) as u16
}

/// Clock divider (8.4 fixed point) giving `tick_hz` counter ticks per second
pub fn divider_for_tick(sys_clk_hz: u32, tick_hz: u32) -> U12F4 {
    let tick_hz = tick_hz.max(1) as u64;
    // Round to the nearest 1/16; hardware range is 1.0 to 255 + 15/16
    let sixteenths = (sys_clk_hz as u64 * 16 + tick_hz / 2) / tick_hz;
    U12F4::from_bits(sixteenths.clamp(16, 0x0FFF) as u16)
}

/// Slice configuration for a motor bridge, both channels off
pub fn bridge_config() -> Config {
    let mut config = Config::default();
    config.top = top_for_frequency(SYS_CLK_HZ, MOTOR_PWM_HZ);
    config.compare_a = 0;
    config.compare_b = 0;
    config
}

/// Slice configuration for the pen servo
///
/// One tick per microsecond, so a compare value is a pulse width in
/// microseconds and `PwmPin::max_duty()` is the frame period.
pub fn servo_config(period_us: u16) -> Config {
    let mut config = Config::default();
    config.divider = divider_for_tick(SYS_CLK_HZ, SERVO_TICK_HZ);
    config.top = period_us.saturating_sub(1);
    config.phase_correct = false;
    config.compare_a = 0;
    config
}
