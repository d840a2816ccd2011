//! Panelink Hardware Abstraction Layer
//!
//! This crate defines the transport shim that display controller drivers
//! talk through. A board support package implements it on top of its
//! parallel LCD peripheral (or a bit-banged bus) and its GPIO driver.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Frame pipeline (DMA, camera, etc.)     │
//! └─────────────────────────────────────────┘
//!                     │ set_window / write_pixels
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  panelink-drivers (controller drivers)  │
//! └─────────────────────────────────────────┘
//!                     │ write / set_line / configure_outputs
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  panelink-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          board-specific implementation
//! ```
//!
//! # Traits
//!
//! - [`transport::Transport`] - Byte writes and control-line levels
//! - [`transport::StatusRead`] - Optional register read-back
//!
//! Delays are consumed through [`embedded_hal::delay::DelayNs`] by the
//! driver crates, not through this crate.
//!
//! [`embedded_hal::delay::DelayNs`]: https://docs.rs/embedded-hal/1.0/embedded_hal/delay/trait.DelayNs.html

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod gpio;
pub mod transport;

// Re-export key traits at crate root for convenience
pub use bus::{BusWidth, InvalidBusWidth};
pub use gpio::PinId;
pub use transport::{StatusRead, Transport};
