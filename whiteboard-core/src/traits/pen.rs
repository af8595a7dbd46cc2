//! Pen lift contract

/// Pen position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PenState {
    /// Lifted off the board
    #[default]
    Up,
    /// Touching the board
    Down,
}

/// Something that can raise and lower the pen
pub trait PenActuator {
    fn set_pen(&mut self, pen: PenState);

    fn pen(&self) -> PenState;
}
