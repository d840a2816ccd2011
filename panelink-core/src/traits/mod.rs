//! Controller abstraction traits
//!
//! These traits define the interface between the frame pipeline and the
//! chip-specific controller drivers.

pub mod controller;

pub use controller::{Controller, Window};
