//! Parallel-to-MIPI bridge controllers
//!
//! The bridge sits between the parallel bus and a MIPI DSI panel. Its own
//! registers are programmed directly; panel commands travel as packets
//! framed by [`panelink_protocol::PacketEncoder`].

pub mod panel;
pub mod ssd2805;

use panelink_hal::StatusRead;
use panelink_protocol::{registers, PllConfig};

pub use ssd2805::Ssd2805Controller;

/// Longest wait for PLL lock
pub const PLL_LOCK_TIMEOUT_MS: u32 = 20;

/// Interval between lock status reads
pub const PLL_POLL_INTERVAL_MS: u32 = 1;

/// Bridge-specific settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeSettings {
    /// PLL multiplier and dividers
    pub pll: PllConfig,
    /// Largest declared packet length accepted
    pub max_packet_len: u32,
    /// Run PLL and panel configuration twice when the bus is 8 bits wide
    /// and no reset line is wired
    ///
    /// Not confirmed against the datasheet; needs validation on hardware.
    pub repeat_unreset_bringup: bool,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            pll: PllConfig::default(),
            max_packet_len: u32::MAX,
            repeat_unreset_bringup: true,
        }
    }
}

/// Source of the bridge PLL lock state
pub trait LockMonitor {
    /// `Some(locked)` when the status can be read, `None` otherwise
    fn pll_locked(&mut self) -> Option<bool>;
}

impl<P: LockMonitor + ?Sized> LockMonitor for &mut P {
    fn pll_locked(&mut self) -> Option<bool> {
        P::pll_locked(self)
    }
}

/// No read path; lock is assumed after a fixed delay
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLockMonitor;

impl LockMonitor for NoLockMonitor {
    fn pll_locked(&mut self) -> Option<bool> {
        None
    }
}

/// Reads the lock bit from the bridge status register
#[derive(Debug)]
pub struct StatusMonitor<R> {
    reader: R,
}

impl<R> StatusMonitor<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: StatusRead> LockMonitor for StatusMonitor<R> {
    fn pll_locked(&mut self) -> Option<bool> {
        self.reader
            .read_register(registers::STATUS)
            .ok()
            .map(|status| status & registers::STATUS_PLL_LOCK != 0)
    }
}

/// How the PLL lock wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockOutcome {
    /// Status reported lock
    Locked,
    /// Status unreadable, waited the fixed time
    Assumed,
    /// Status never reported lock within the timeout
    TimedOut,
}
