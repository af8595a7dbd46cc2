//! Dispatch task
//!
//! The main loop: services pending events until none are left, then sleeps
//! until an encoder or serial task wakes it.

use defmt::*;
use embassy_rp::pwm::PwmOutput;

use whiteboard_core::{Dispatcher, EventKind, Handled};
use whiteboard_drivers::{DcMotor, Motors, PenServo};
use whiteboard_hal_rp2040::{DutyChannel, PinLevel};

use crate::channels::{RX_READY, WAKE};
use crate::status::StatusTx;

/// One PWM channel of a bridge or the servo
pub type PwmChannel = DutyChannel<PwmOutput<'static>>;

pub type PlotterMotor = DcMotor<&'static PinLevel, PwmChannel, PwmChannel>;

pub type PlotterMotion = Motors<PlotterMotor, PenServo<PwmChannel>>;

pub type PlotterDispatcher = Dispatcher<'static, PlotterMotion, StatusTx>;

#[embassy_executor::task]
pub async fn dispatch_task(mut dispatcher: PlotterDispatcher) {
    info!("Dispatch task started");

    loop {
        match dispatcher.poll() {
            Ok(Some(handled)) => {
                log_handled(&handled);
                if handled.event == EventKind::SerialRx {
                    RX_READY.signal(());
                }
            }
            Ok(None) => {
                RX_READY.signal(());
                WAKE.wait().await;
            }
            Err(e) => {
                warn!("Motion complete not reported: {:?}", e);
                RX_READY.signal(());
            }
        }
    }
}

fn log_handled(handled: &Handled) {
    if let Some(command) = handled.command {
        debug!("Command: {:?}", command);
    }
    if handled.motion_complete {
        debug!("Motion complete");
    }
    trace!("{:?} serviced", handled.event);
}
