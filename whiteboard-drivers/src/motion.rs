//! Two-axis motion dispatcher
//!
//! Fans a [`MoveRequest`] out to the left and right motors and the pen, and
//! routes per-axis encoder checks to the matching motor.

use whiteboard_core::traits::{
    Axis, MotionDispatcher, MotorController, MoveRequest, PenActuator, PenState,
};

pub struct Motors<M, S> {
    motors: [M; 2],
    pen: S,
}

impl<M: MotorController, S: PenActuator> Motors<M, S> {
    /// `motors` is indexed by [`Axis::index`]: left first
    pub fn new(motors: [M; 2], pen: S) -> Self {
        Self { motors, pen }
    }

    pub fn motor(&self, axis: Axis) -> &M {
        &self.motors[axis.index()]
    }

    pub fn motor_mut(&mut self, axis: Axis) -> &mut M {
        &mut self.motors[axis.index()]
    }

    pub fn pen(&self) -> &S {
        &self.pen
    }
}

impl<M: MotorController, S: PenActuator> MotionDispatcher for Motors<M, S> {
    fn move_axes(&mut self, request: MoveRequest) {
        self.pen.set_pen(request.pen);
        for axis in Axis::ALL {
            self.motors[axis.index()].move_by(request.delta(axis));
        }
    }

    fn hold(&mut self) {
        self.pen.set_pen(PenState::Up);
        for motor in &mut self.motors {
            motor.halt();
        }
    }

    fn check(&mut self, axis: Axis) {
        self.motors[axis.index()].check();
    }

    fn speed(&self, axis: Axis) -> i16 {
        self.motors[axis.index()].speed()
    }
}
