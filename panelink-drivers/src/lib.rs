//! Controller drivers
//!
//! Concrete implementations of [`panelink_core::Controller`]:
//!
//! - Direct-parallel controllers (ST7789, ST7796, GC9A01) that take DCS
//!   commands straight off the bus
//! - SSD2805 parallel-to-MIPI bridge, which frames every command as a
//!   length-prefixed packet

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod bridge;
pub mod direct;

pub use bridge::{BridgeSettings, LockMonitor, NoLockMonitor, Ssd2805Controller, StatusMonitor};
pub use direct::{ChipProfile, DirectParallelController, GC9A01, ST7789, ST7796};
