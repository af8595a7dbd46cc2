//! Whiteboard plotter firmware
//!
//! Main firmware binary for an RP2040 driving a hanging-pen whiteboard
//! plotter: two DC gear motors with single-channel encoders wind the cords,
//! a servo lifts the pen, and commands arrive over UART.
//!
//! Board wiring:
//!
//! | Function              | Pin          | Peripheral     |
//! |-----------------------|--------------|----------------|
//! | Command link TX / RX  | GPIO0 / 1    | UART0          |
//! | Left motor fwd / rev  | GPIO2 / 3    | PWM slice 1    |
//! | Pen servo             | GPIO4        | PWM slice 2 A  |
//! | Right motor fwd / rev | GPIO6 / 7    | PWM slice 3    |
//! | Left / right encoder  | GPIO8 / 9    | GPIO edge IRQ  |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::Pwm;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use whiteboard_core::traits::Axis;
use whiteboard_core::{Dispatcher, EventKind};
use whiteboard_drivers::{DcMotor, Motors, PenServo};
use whiteboard_hal_rp2040::pwm::{bridge_config, servo_config};
use whiteboard_hal_rp2040::uart::uart_config;
use whiteboard_hal_rp2040::{DutyChannel, EdgeWatcher};

use crate::channels::{EVENTS, LEFT_LEVEL, RIGHT_LEVEL, STASH};
use crate::status::StatusTx;
use crate::tasks::PwmChannel;

mod channels;
mod config;
mod status;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Whiteboard firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();

    // Command link
    let tx_buf = TX_BUF.init([0u8; 16]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config(&config.serial));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config.serial.baudrate);

    // Motor bridges: channel A forward, channel B reverse
    let (left_fwd, left_rev) = split_bridge(Pwm::new_output_ab(
        p.PWM_SLICE1,
        p.PIN_2,
        p.PIN_3,
        bridge_config(),
    ));
    let (right_fwd, right_rev) = split_bridge(Pwm::new_output_ab(
        p.PWM_SLICE3,
        p.PIN_6,
        p.PIN_7,
        bridge_config(),
    ));

    // Pen servo
    let (servo, _) =
        Pwm::new_output_a(p.PWM_SLICE2, p.PIN_4, servo_config(config.pen.period_us)).split();
    let pen = PenServo::new(DutyChannel::new(unwrap!(servo)), config.pen);

    info!("PWM initialized");

    // Encoders: the watchers own the pins, motors read the mirrored level
    let left_watcher = EdgeWatcher::new(Input::new(p.PIN_8, Pull::Up), &LEFT_LEVEL);
    let right_watcher = EdgeWatcher::new(Input::new(p.PIN_9, Pull::Up), &RIGHT_LEVEL);

    let left = DcMotor::new(&LEFT_LEVEL, left_fwd, left_rev, *config.motor(Axis::Left));
    let right = DcMotor::new(&RIGHT_LEVEL, right_fwd, right_rev, *config.motor(Axis::Right));
    let motion = Motors::new([left, right], pen);

    let dispatcher = Dispatcher::new(&EVENTS, &STASH, motion, StatusTx);

    info!("Motors initialized");

    // Spawn tasks
    spawner.spawn(tasks::dispatch_task(dispatcher)).unwrap();
    spawner.spawn(tasks::status_tx_task(tx)).unwrap();
    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();
    spawner
        .spawn(tasks::encoder_task(left_watcher, EventKind::LeftEdge))
        .unwrap();
    spawner
        .spawn(tasks::encoder_task(right_watcher, EventKind::RightEdge))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat, {} serial overruns", STASH.overruns());
    }
}

/// Split a motor slice into its forward and reverse channels
fn split_bridge(pwm: Pwm<'static>) -> (PwmChannel, PwmChannel) {
    let (a, b) = pwm.split();
    (DutyChannel::new(unwrap!(a)), DutyChannel::new(unwrap!(b)))
}
