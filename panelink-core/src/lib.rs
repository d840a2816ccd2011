//! Board-agnostic display controller plumbing
//!
//! This crate contains everything a controller driver needs that does not
//! depend on a specific chip:
//!
//! - Controller contract ([`traits::Controller`])
//! - Controller configuration and validation
//! - Bring-up step tables
//! - Command/data signalling over the transport shim
//! - Error taxonomy
//! - Recording mock transport (feature `mock`)

#![no_std]
#![deny(unsafe_code)]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod bringup;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod signal;
pub mod traits;

pub use bringup::InitStep;
pub use config::{
    ColorOrder, ConfigError, ControllerConfig, ControllerSettings, Orientation, PinAssignment,
    PinInversion,
};
pub use error::LcmError;
pub use signal::{ChipSelectMode, ResetPulse, Signal, SignalBus};
pub use traits::Controller;
