//! Command/data signalling over the transport shim
//!
//! Every byte sent to a controller is either a command (data/command line
//! low) or register/pixel data (line high). The line is driven immediately
//! before the write it qualifies; nothing else touches the data/command
//! line in between, since the chip latches it at byte-transfer time.

use embedded_hal::delay::DelayNs;
use panelink_hal::{PinId, Transport};

use crate::config::{ControllerSettings, PinAssignment, PinInversion};
use crate::error::LcmError;

/// Reset hold time mandated by the controller datasheets
pub const RESET_HOLD_MS: u32 = 100;

/// Control signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Signal {
    /// Data/command select
    Dc,
    /// Read strobe
    Rd,
    /// Chip select
    Cs,
    /// Hardware reset
    Rst,
    /// Backlight
    Bk,
}

/// How chip select is driven around writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipSelectMode {
    /// Asserted once after reset and left asserted
    Held,
    /// Asserted before every write and released after it
    PerTransfer,
}

/// Shape of the hardware reset pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetPulse {
    /// Low for the hold time, then high for the hold time
    LowHigh,
    /// High, low, high, each for the hold time
    HighLowHigh,
}

/// Transport wrapper that tags bytes as command or data
#[derive(Debug)]
pub struct SignalBus<T> {
    transport: T,
    pins: PinAssignment,
    invert: PinInversion,
    cs_mode: ChipSelectMode,
}

impl<T> SignalBus<T> {
    /// Wrap a transport
    pub fn new(transport: T, settings: &ControllerSettings, cs_mode: ChipSelectMode) -> Self {
        Self {
            transport,
            pins: settings.pins,
            invert: settings.invert,
            cs_mode,
        }
    }

    /// Chip-select discipline in use
    pub fn cs_mode(&self) -> ChipSelectMode {
        self.cs_mode
    }

    /// Unwrap the transport
    pub fn into_inner(self) -> T {
        self.transport
    }

    fn line(&self, signal: Signal) -> (PinId, bool) {
        match signal {
            Signal::Dc => (self.pins.dc, self.invert.dc),
            Signal::Rd => (self.pins.rd, self.invert.rd),
            Signal::Cs => (self.pins.cs, self.invert.cs),
            Signal::Rst => (self.pins.rst, self.invert.rst),
            Signal::Bk => (self.pins.bk, self.invert.bk),
        }
    }
}

impl<T: Transport> SignalBus<T> {
    /// Drive a signal to a logical level
    ///
    /// Applies the per-pin inversion. Unwired signals are ignored.
    pub fn set_level(&mut self, signal: Signal, level: bool) -> Result<(), LcmError<T::Error>> {
        let (pin, inverted) = self.line(signal);
        if !pin.is_wired() {
            return Ok(());
        }
        self.transport
            .set_line(pin, level != inverted)
            .map_err(LcmError::Transport)
    }

    /// Configure every wired control pin as an output
    pub fn configure_outputs(&mut self) -> Result<(), LcmError<T::Error>> {
        let wired = self.pins.wired();
        if wired.is_empty() {
            return Ok(());
        }
        self.transport
            .configure_outputs(&wired)
            .map_err(LcmError::Transport)
    }

    /// Send a command byte
    pub fn write_command(&mut self, cmd: u8) -> Result<(), LcmError<T::Error>> {
        self.tagged_write(false, &[cmd])
    }

    /// Send one register byte
    pub fn write_register(&mut self, value: u8) -> Result<(), LcmError<T::Error>> {
        self.tagged_write(true, &[value])
    }

    /// Send a command followed by its register bytes, one write per byte
    pub fn write_command_with(
        &mut self,
        cmd: u8,
        params: &[u8],
    ) -> Result<(), LcmError<T::Error>> {
        self.write_command(cmd)?;
        for &value in params {
            self.write_register(value)?;
        }
        Ok(())
    }

    /// Send a block of data bytes in a single write
    ///
    /// Empty blocks generate no bus traffic.
    pub fn write_data(&mut self, data: &[u8]) -> Result<(), LcmError<T::Error>> {
        if data.is_empty() {
            return Ok(());
        }
        self.tagged_write(true, data)
    }

    /// Pulse the reset line and wait for the controller to settle
    pub fn reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
        pulse: ResetPulse,
    ) -> Result<(), LcmError<T::Error>> {
        if pulse == ResetPulse::HighLowHigh {
            self.set_level(Signal::Rst, true)?;
            delay.delay_ms(RESET_HOLD_MS);
        }
        self.set_level(Signal::Rst, false)?;
        delay.delay_ms(RESET_HOLD_MS);
        self.set_level(Signal::Rst, true)?;
        delay.delay_ms(RESET_HOLD_MS);
        Ok(())
    }

    fn tagged_write(&mut self, data: bool, bytes: &[u8]) -> Result<(), LcmError<T::Error>> {
        match self.cs_mode {
            ChipSelectMode::Held => {
                self.set_level(Signal::Dc, data)?;
                self.transport.write(bytes).map_err(LcmError::Transport)
            }
            ChipSelectMode::PerTransfer => {
                self.set_level(Signal::Cs, false)?;
                self.set_level(Signal::Dc, data)?;
                self.transport.write(bytes).map_err(LcmError::Transport)?;
                self.set_level(Signal::Cs, true)
            }
        }
    }
}
