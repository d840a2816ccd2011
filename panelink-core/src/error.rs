//! Error taxonomy shared by all controller drivers

use core::fmt;

use crate::config::ConfigError;

/// Errors returned by controller operations
///
/// Generic over the transport error so bus failures keep their detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcmError<E> {
    /// Configuration or call arguments rejected
    InvalidArgument,
    /// Driver state could not be allocated
    OutOfMemory,
    /// Operation on a controller that is not initialised
    NotInitialized,
    /// Transfer larger than the bridge can frame in one packet
    PayloadTooLarge,
    /// Transport shim failure
    Transport(E),
}

impl<E> From<ConfigError> for LcmError<E> {
    fn from(_: ConfigError) -> Self {
        LcmError::InvalidArgument
    }
}

impl<E: fmt::Debug> fmt::Display for LcmError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LcmError::InvalidArgument => write!(f, "Invalid argument"),
            LcmError::OutOfMemory => write!(f, "Out of memory"),
            LcmError::NotInitialized => write!(f, "Controller not initialized"),
            LcmError::PayloadTooLarge => write!(f, "Payload too large for one packet"),
            LcmError::Transport(e) => write!(f, "Transport error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for LcmError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            LcmError::InvalidArgument => defmt::write!(f, "Invalid argument"),
            LcmError::OutOfMemory => defmt::write!(f, "Out of memory"),
            LcmError::NotInitialized => defmt::write!(f, "Controller not initialized"),
            LcmError::PayloadTooLarge => defmt::write!(f, "Payload too large"),
            LcmError::Transport(e) => defmt::write!(f, "Transport error: {}", e),
        }
    }
}
