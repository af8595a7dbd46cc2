//! Event dispatcher
//!
//! Owns the command parser, the motion dispatcher and the status output.
//! Each call to [`Dispatcher::poll`] services exactly one pending event:
//!
//! ```text
//! pending = events.take_pending()
//!   LeftEdge  -> motion.check(Left)   -> completion check
//!   RightEdge -> motion.check(Right)  -> completion check
//!   SerialRx  -> parser.feed(byte)    -> execute command -> completion check
//! events.clear(event)
//! ```
//!
//! The completion check writes [`Status::MotionComplete`] once per move:
//! it is armed when a move is dispatched and disarmed when the byte goes
//! out, so idle polls with both speeds at zero stay silent.

use whiteboard_hal::UartTx;
use whiteboard_protocol::{Command, Parser, Status};

use super::state::LoopState;
use crate::event::{ByteStash, EventKind, EventRegister};
use crate::traits::{Axis, MotionDispatcher, MoveRequest};

/// Outcome of servicing one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Handled {
    /// Event that was serviced
    pub event: EventKind,
    /// Command completed by this byte, for `SerialRx`
    pub command: Option<Command>,
    /// True if the motion-complete status byte was written
    pub motion_complete: bool,
}

/// Running totals kept by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DispatchStats {
    /// Encoder edges serviced per axis
    pub edges: [u32; 2],
    /// Serial bytes fed to the parser
    pub bytes: u32,
    /// Commands completed
    pub commands: u32,
    /// Motion-complete notifications sent
    pub completions: u32,
}

/// Main-loop event dispatcher
pub struct Dispatcher<'a, M, T> {
    events: &'a EventRegister,
    stash: &'a ByteStash,
    parser: Parser,
    motion: M,
    status: T,
    state: LoopState,
    /// A move is in flight and has not been reported yet
    completion_armed: bool,
    stats: DispatchStats,
}

impl<'a, M, T> Dispatcher<'a, M, T>
where
    M: MotionDispatcher,
    T: UartTx,
{
    pub fn new(events: &'a EventRegister, stash: &'a ByteStash, motion: M, status: T) -> Self {
        Self {
            events,
            stash,
            parser: Parser::new(),
            motion,
            status,
            state: LoopState::Idle,
            completion_armed: false,
            stats: DispatchStats::default(),
        }
    }

    /// Service the highest-priority pending event
    ///
    /// Returns `Ok(None)` if nothing was pending. The event's bit is
    /// cleared only after its handler has run, including when writing the
    /// status byte failed.
    pub fn poll(&mut self) -> Result<Option<Handled>, T::Error> {
        let pending = self.events.take_pending();
        self.state = self.state.transition(pending);

        let Some(event) = pending.highest_priority() else {
            return Ok(None);
        };

        let result = match event {
            EventKind::LeftEdge => self.service_edge(Axis::Left),
            EventKind::RightEdge => self.service_edge(Axis::Right),
            EventKind::SerialRx => self.service_serial(),
        };
        self.events.clear(event);
        self.state = self.state.transition(self.events.take_pending());

        result.map(Some)
    }

    /// Poll until no event is pending
    ///
    /// Returns the number of events serviced. Stops at the first status
    /// write error; events still pending stay pending.
    pub fn run_until_idle(&mut self) -> Result<usize, T::Error> {
        let mut serviced = 0;
        while self.poll()?.is_some() {
            serviced += 1;
        }
        Ok(serviced)
    }

    /// Dispatch a command as if it had arrived on the serial link
    ///
    /// Returns true if the motion-complete byte was written.
    pub fn execute(&mut self, command: Command) -> Result<bool, T::Error> {
        self.stats.commands = self.stats.commands.wrapping_add(1);

        match command {
            Command::Move { left, right } => self.motion.move_axes(MoveRequest::travel(left, right)),
            Command::Draw { left, right } => self.motion.move_axes(MoveRequest::draw(left, right)),
            Command::Stop => self.motion.hold(),
            // Surfaced through `Handled`; no motion effect
            Command::SetParam { .. } => return Ok(false),
        }

        self.completion_armed = true;
        self.report_completion()
    }

    fn service_edge(&mut self, axis: Axis) -> Result<Handled, T::Error> {
        let edges = &mut self.stats.edges[axis.index()];
        *edges = edges.wrapping_add(1);

        self.motion.check(axis);
        let motion_complete = self.report_completion()?;

        Ok(Handled {
            event: match axis {
                Axis::Left => EventKind::LeftEdge,
                Axis::Right => EventKind::RightEdge,
            },
            command: None,
            motion_complete,
        })
    }

    fn service_serial(&mut self) -> Result<Handled, T::Error> {
        self.stats.bytes = self.stats.bytes.wrapping_add(1);

        let byte = self.stash.byte();
        let command = self.parser.feed(byte);
        let motion_complete = match command {
            Some(command) => self.execute(command)?,
            None => false,
        };

        Ok(Handled {
            event: EventKind::SerialRx,
            command,
            motion_complete,
        })
    }

    /// Write the status byte if an armed move has come to rest
    fn report_completion(&mut self) -> Result<bool, T::Error> {
        if !self.completion_armed || !self.motion.is_stopped() {
            return Ok(false);
        }
        self.completion_armed = false;
        self.stats.completions = self.stats.completions.wrapping_add(1);
        self.status.write_byte(Status::MotionComplete.to_byte())?;
        Ok(true)
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Check if a dispatched move has not been reported complete yet
    pub fn is_moving(&self) -> bool {
        self.completion_armed
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    pub fn motion(&self) -> &M {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut M {
        &mut self.motion
    }

    pub fn status(&self) -> &T {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Motion stand-in: each `check()` brings one axis's speed one step
    /// closer to zero
    #[derive(Default)]
    struct MockMotion {
        speeds: [i16; 2],
        moves: Vec<MoveRequest, 8>,
        holds: u32,
        checks: [u32; 2],
    }

    impl MotionDispatcher for MockMotion {
        fn move_axes(&mut self, request: MoveRequest) {
            self.moves.push(request).ok();
            self.speeds = [request.left.signum(), request.right.signum()];
        }

        fn hold(&mut self) {
            self.holds += 1;
            self.speeds = [0, 0];
        }

        fn check(&mut self, axis: Axis) {
            self.checks[axis.index()] += 1;
            self.speeds[axis.index()] = 0;
        }

        fn speed(&self, axis: Axis) -> i16 {
            self.speeds[axis.index()]
        }
    }

    #[derive(Default)]
    struct MockUart {
        sent: Vec<u8, 16>,
        fail: bool,
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Full;

    impl UartTx for MockUart {
        type Error = Full;

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), Full> {
            if self.fail {
                return Err(Full);
            }
            self.sent.extend_from_slice(data).map_err(|_| Full)
        }
    }

    fn send(
        dispatcher: &mut Dispatcher<'_, MockMotion, MockUart>,
        events: &EventRegister,
        stash: &ByteStash,
        bytes: &[u8],
    ) {
        for &byte in bytes {
            stash.receive(byte, events);
            dispatcher.run_until_idle().unwrap();
        }
    }

    #[test]
    fn test_idle_when_nothing_pending() {
        let events = EventRegister::new();
        let stash = ByteStash::new();
        let mut d = Dispatcher::new(&events, &stash, MockMotion::default(), MockUart::default());

        assert_eq!(d.poll(), Ok(None));
        assert!(d.state().is_idle());
        assert_eq!(d.run_until_idle(), Ok(0));
    }

    #[test]
    fn test_serial_move_reaches_motion() {
        let events = EventRegister::new();
        let stash = ByteStash::new();
        let mut d = Dispatcher::new(&events, &stash, MockMotion::default(), MockUart::default());

        send(&mut d, &events, &stash, b"M 456 -789 ");

        assert_eq!(d.motion().moves.as_slice(), &[MoveRequest::travel(456, -789)]);
        assert!(d.is_moving());
        assert!(d.status().sent.is_empty());
        assert_eq!(d.stats().bytes, 11);
        assert_eq!(d.stats().commands, 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_draw_lowers_pen() {
        let events = EventRegister::new();
        let stash = ByteStash::new();
        let mut d = Dispatcher::new(&events, &stash, MockMotion::default(), MockUart::default());

        send(&mut d, &events, &stash, b"d 5 5 ");
        assert_eq!(d.motion().moves.as_slice(), &[MoveRequest::draw(5, 5)]);
    }

    #[test]
    fn test_motion_complete_reported_once() {
        let events = EventRegister::new();
        let stash = ByteStash::new();
        let mut d = Dispatcher::new(&events, &stash, MockMotion::default(), MockUart::default());

        send(&mut d, &events, &stash, b"M 10 10 ");
        assert!(d.status().sent.is_empty());

        // Left settles, right still moving
        events.set(EventKind::LeftEdge);
        let handled = d.poll().unwrap().unwrap();
        assert_eq!(handled.event, EventKind::LeftEdge);
        assert!(!handled.motion_complete);
        assert!(d.status().sent.is_empty());

        // Right settles: both speeds zero after a check
        events.set(EventKind::RightEdge);
        let handled = d.poll().unwrap().unwrap();
        assert!(handled.motion_complete);
        assert_eq!(d.status().sent.as_slice(), b"1");

        // Further checks while stopped stay silent
        for _ in 0..3 {
            events.set(EventKind::LeftEdge);
            events.set(EventKind::RightEdge);
            d.run_until_idle().unwrap();
        }
        assert_eq!(d.status().sent.as_slice(), b"1");
        assert_eq!(d.stats().completions, 1);
        assert!(!d.is_moving());
    }

    #[test]
    fn test_each_move_reports_once() {
        let events = EventRegister::new();
        let stash = ByteStash::new();
        let mut d = Dispatcher::new(&events, &stash, MockMotion::default(), MockUart::default());

        for _ in 0..2 {
            send(&mut d, &events, &stash, b"m 3 -3 ");
            events.set(EventKind::LeftEdge);
            events.set(EventKind::RightEdge);
            d.run_until_idle().unwrap();
        }
        assert_eq!(d.status().sent.as_slice(), b"11");
    }

    #[test]
    fn test_stop_completes_immediately() {
        let events = EventRegister::new();
        let stash = ByteStash::new();
        let mut d = Dispatcher::new(&events, &stash, MockMotion::default(), MockUart::default());

        stash.receive(b'S', &events);
        let handled = d.poll().unwrap().unwrap();
        assert_eq!(handled.command, Some(Command::Stop));
        assert!(handled.motion_complete);
        assert_eq!(d.motion().holds, 1);
        assert!(d.motion().moves.is_empty());
        assert_eq!(d.status().sent.as_slice(), b"1");
    }

    #[test]
    fn test_zero_move_completes_immediately() {
        let events = EventRegister::new();
        let stash = ByteStash::new();
        let mut d = Dispatcher::new(&events, &stash, MockMotion::default(), MockUart::default());

        send(&mut d, &events, &stash, b"M 0 0 ");
        assert_eq!(d.motion().moves.as_slice(), &[MoveRequest::travel(0, 0)]);
        assert!(!d.is_moving());
        assert_eq!(d.status().sent.as_slice(), b"1");
    }

    #[test]
    fn test_set_param_has_no_motion_effect() {
        let events = EventRegister::new();
        let stash = ByteStash::new();
        let mut d = Dispatcher::new(&events, &stash, MockMotion::default(), MockUart::default());

        let mut completed = None;
        for &byte in b"p 123 " {
            stash.receive(byte, &events);
            if let Some(handled) = d.poll().unwrap() {
                completed = completed.or(handled.command);
            }
        }

        assert_eq!(completed, Some(Command::SetParam { value: 123 }));
        assert!(d.motion().moves.is_empty());
        assert!(!d.is_moving());
        assert!(d.status().sent.is_empty());
    }

    #[test]
    fn test_edges_serviced_before_serial() {
        let events = EventRegister::new();
        let stash = ByteStash::new();
        let mut d = Dispatcher::new(&events, &stash, MockMotion::default(), MockUart::default());

        stash.receive(b'x', &events);
        events.set(EventKind::RightEdge);
        events.set(EventKind::LeftEdge);

        let order: Vec<EventKind, 3> = core::iter::from_fn(|| d.poll().unwrap())
            .map(|handled| handled.event)
            .collect();
        assert_eq!(
            order.as_slice(),
            &[EventKind::LeftEdge, EventKind::RightEdge, EventKind::SerialRx]
        );
        assert_eq!(d.motion().checks, [1, 1]);
        assert!(d.state().is_idle());
    }

    #[test]
    fn test_event_cleared_only_after_handling() {
        let events = EventRegister::new();
        let stash = ByteStash::new();
        let mut d = Dispatcher::new(&events, &stash, MockMotion::default(), MockUart::default());

        events.set(EventKind::LeftEdge);
        events.set(EventKind::SerialRx);

        d.poll().unwrap();
        assert!(!events.is_pending(EventKind::LeftEdge));
        assert!(events.is_pending(EventKind::SerialRx));
        assert_eq!(d.state(), LoopState::Dispatching);

        d.poll().unwrap();
        assert!(events.is_empty());
        assert!(d.state().is_idle());
    }

    #[test]
    fn test_status_error_still_clears_event() {
        let events = EventRegister::new();
        let stash = ByteStash::new();
        let uart = MockUart {
            fail: true,
            ..MockUart::default()
        };
        let mut d = Dispatcher::new(&events, &stash, MockMotion::default(), uart);

        stash.receive(b's', &events);
        assert_eq!(d.poll(), Err(Full));
        assert!(events.is_empty());
        // The notification is not retried
        assert!(!d.is_moving());
    }
}
