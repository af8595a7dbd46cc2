//! Closed-loop motor contract
//!
//! A motor here is a DC gear motor with a single-channel encoder. The
//! controller owns its encoder and output stage, tracks a target position
//! and advances its control loop each time `check()` is called (normally
//! once per encoder edge).

/// Drive axis of the plotter
///
/// The board hangs from two cords wound on the left and right spools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    Left = 0,
    Right = 1,
}

impl Axis {
    /// Both axes, in service priority order
    pub const ALL: [Axis; 2] = [Axis::Left, Axis::Right];

    /// Index into per-axis arrays
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Rotation direction of a spool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Winds the cord in
    #[default]
    Forward,
    /// Pays the cord out
    Reverse,
}

impl Direction {
    /// Direction that reduces a signed position error
    pub fn toward(error: i32) -> Self {
        if error < 0 {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    /// +1 or -1
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }
}

/// A position-controlled motor
///
/// `speed()` reports the drive level the control loop currently commands,
/// signed by direction. Zero means the motor has reached its target (within
/// tolerance) and its outputs are off.
pub trait MotorController {
    /// Start a relative move of `delta` encoder pulses from the measured
    /// position
    ///
    /// The output stage is driven immediately; later progress happens in
    /// `check()`.
    fn move_by(&mut self, delta: i16);

    /// Sample the encoder and advance the control loop
    fn check(&mut self);

    /// Commanded drive level, signed by direction
    fn speed(&self) -> i16;

    /// Measured position in encoder counts
    fn position(&self) -> i32;

    /// Target position in encoder counts
    fn target(&self) -> i32;

    /// Remove drive and hold the current position as target
    fn halt(&mut self);

    /// Check if the motor has settled on its target
    fn is_stopped(&self) -> bool {
        self.speed() == 0
    }
}
