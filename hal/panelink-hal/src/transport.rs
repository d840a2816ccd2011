//! Transport shim
//!
//! The transport is the only way a driver reaches the hardware. Every call
//! is synchronous from the driver's point of view: when `write` returns the
//! bytes have been handed over, though not necessarily clocked out.

use crate::gpio::PinId;

/// Byte transport plus control-line access
///
/// Implementations must not reorder calls. The chip samples the
/// data/command line at byte-transfer time, so a `set_line` followed by a
/// `write` has to reach the bus in that order.
pub trait Transport {
    /// Error type for bus and GPIO operations
    type Error;

    /// Write bytes onto the data bus
    ///
    /// Blocks until all bytes are queued.
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Drive a control line to a physical level
    ///
    /// Drivers never call this with an unwired pin.
    fn set_line(&mut self, pin: PinId, level: bool) -> Result<(), Self::Error>;

    /// Configure a set of pins as push-pull outputs
    ///
    /// Only wired pins are passed in.
    fn configure_outputs(&mut self, pins: &[PinId]) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, data)
    }

    fn set_line(&mut self, pin: PinId, level: bool) -> Result<(), Self::Error> {
        T::set_line(self, pin, level)
    }

    fn configure_outputs(&mut self, pins: &[PinId]) -> Result<(), Self::Error> {
        T::configure_outputs(self, pins)
    }
}

/// Register read-back
///
/// Optional. Only some bridge chips have a read path wired to the MCU;
/// drivers fall back to fixed delays when it is absent.
pub trait StatusRead {
    /// Error type for read operations
    type Error;

    /// Read a 16-bit register
    fn read_register(&mut self, register: u8) -> Result<u16, Self::Error>;
}
