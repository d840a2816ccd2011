//! Controller configuration
//!
//! [`ControllerSettings`] is plain data (pins, inversion, orientation,
//! colour handling). [`ControllerConfig`] pairs it with the transport the
//! driver will own.

#[cfg(feature = "toml")]
mod toml;
mod types;

#[cfg(feature = "toml")]
pub use self::toml::from_toml;
pub use types::*;
