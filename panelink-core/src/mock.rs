//! Recording transport for host tests
//!
//! [`MockTransport`] and [`MockDelay`] share one ordered [`MockLog`], so a
//! test can assert the exact interleaving of line changes, byte writes and
//! delays a driver produced.

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use panelink_hal::{PinId, StatusRead, Transport};

/// A recorded transport or delay call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Pins configured as outputs
    Configure(Vec<PinId>),
    /// Physical level driven onto a pin
    Line(PinId, bool),
    /// Bytes written to the bus
    Write(Vec<u8>),
    /// Delay in milliseconds
    Delay(u32),
}

/// A bus write tagged by the data/command line level at the time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tx {
    Command(u8),
    Data(Vec<u8>),
}

/// Error returned once injected failures kick in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

#[derive(Debug, Default)]
struct MockState {
    events: Vec<Event>,
    writes: usize,
    fail_after: Option<usize>,
    registers: Vec<(u8, u16)>,
}

/// Shared, ordered call log
#[derive(Debug, Clone, Default)]
pub struct MockLog(Rc<RefCell<MockState>>);

impl MockLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport that records into this log
    pub fn transport(&self) -> MockTransport {
        MockTransport { log: self.clone() }
    }

    /// Delay that records into this log
    pub fn delay(&self) -> MockDelay {
        MockDelay { log: self.clone() }
    }

    /// Make every write after the first `n` fail
    pub fn fail_writes_after(&self, n: usize) {
        self.0.borrow_mut().fail_after = Some(n);
    }

    /// Stop injecting write failures
    pub fn stop_failing(&self) {
        self.0.borrow_mut().fail_after = None;
    }

    /// Value returned by [`StatusRead::read_register`] for `register`
    pub fn set_register(&self, register: u8, value: u16) {
        let mut state = self.0.borrow_mut();
        state.registers.retain(|(r, _)| *r != register);
        state.registers.push((register, value));
    }

    /// Drop everything recorded so far
    pub fn clear(&self) {
        let mut state = self.0.borrow_mut();
        state.events.clear();
        state.writes = 0;
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    /// All written bytes, concatenated
    pub fn written_bytes(&self) -> Vec<u8> {
        self.0
            .borrow()
            .events
            .iter()
            .filter_map(|event| match event {
                Event::Write(bytes) => Some(bytes.as_slice()),
                _ => None,
            })
            .flatten()
            .copied()
            .collect()
    }

    /// Sum of all recorded delays
    pub fn total_delay_ms(&self) -> u32 {
        self.0
            .borrow()
            .events
            .iter()
            .map(|event| match event {
                Event::Delay(ms) => *ms,
                _ => 0,
            })
            .sum()
    }

    /// Last physical level driven onto `pin`
    pub fn line_level(&self, pin: PinId) -> Option<bool> {
        self.0
            .borrow()
            .events
            .iter()
            .rev()
            .find_map(|event| match event {
                Event::Line(p, level) if *p == pin => Some(*level),
                _ => None,
            })
    }

    /// Writes tagged as command or data by the level of `dc`
    ///
    /// A physical low on `dc` marks a command. Single-byte command writes
    /// become [`Tx::Command`]; everything else becomes [`Tx::Data`].
    pub fn transactions(&self, dc: PinId) -> Vec<Tx> {
        let mut dc_high = true;
        let mut out = Vec::new();
        for event in self.0.borrow().events.iter() {
            match event {
                Event::Line(pin, level) if *pin == dc => dc_high = *level,
                Event::Write(bytes) if !dc_high && bytes.len() == 1 => {
                    out.push(Tx::Command(bytes[0]))
                }
                Event::Write(bytes) => out.push(Tx::Data(bytes.clone())),
                _ => {}
            }
        }
        out
    }

    /// Command bytes in order
    pub fn commands(&self, dc: PinId) -> Vec<u8> {
        self.transactions(dc)
            .into_iter()
            .filter_map(|tx| match tx {
                Tx::Command(cmd) => Some(cmd),
                Tx::Data(_) => None,
            })
            .collect()
    }

    /// Data bytes following each occurrence of `cmd`, up to the next command
    pub fn data_after(&self, dc: PinId, cmd: u8) -> Vec<Vec<u8>> {
        let mut out: Vec<Vec<u8>> = Vec::new();
        let mut capturing = false;
        for tx in self.transactions(dc) {
            match tx {
                Tx::Command(c) => {
                    capturing = c == cmd;
                    if capturing {
                        out.push(Vec::new());
                    }
                }
                Tx::Data(bytes) if capturing => {
                    if let Some(last) = out.last_mut() {
                        last.extend_from_slice(&bytes);
                    }
                }
                Tx::Data(_) => {}
            }
        }
        out
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().events.push(event);
    }
}

/// Recording [`Transport`]
#[derive(Debug, Clone)]
pub struct MockTransport {
    log: MockLog,
}

impl Transport for MockTransport {
    type Error = MockError;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let mut state = self.log.0.borrow_mut();
        if let Some(limit) = state.fail_after {
            if state.writes >= limit {
                return Err(MockError);
            }
        }
        state.writes += 1;
        state.events.push(Event::Write(data.to_vec()));
        Ok(())
    }

    fn set_line(&mut self, pin: PinId, level: bool) -> Result<(), Self::Error> {
        self.log.push(Event::Line(pin, level));
        Ok(())
    }

    fn configure_outputs(&mut self, pins: &[PinId]) -> Result<(), Self::Error> {
        self.log.push(Event::Configure(pins.to_vec()));
        Ok(())
    }
}

impl StatusRead for MockTransport {
    type Error = MockError;

    fn read_register(&mut self, register: u8) -> Result<u16, Self::Error> {
        self.log
            .0
            .borrow()
            .registers
            .iter()
            .find(|(r, _)| *r == register)
            .map(|(_, value)| *value)
            .ok_or(MockError)
    }
}

/// Recording [`DelayNs`]
#[derive(Debug, Clone)]
pub struct MockDelay {
    log: MockLog,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(Event::Delay(ns.div_ceil(1_000_000)));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Event::Delay(ms));
    }
}
