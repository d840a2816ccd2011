//! Control-line pin identifiers
//!
//! Pins are opaque to the drivers. The transport decides what a pin number
//! means; the drivers only pass it back when changing a line level.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque control-line identifier
///
/// Any negative value means the signal is not wired on this board. Level
/// changes on an unwired pin are dropped before they reach the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinId(pub i8);

impl PinId {
    /// Sentinel for a signal that is not connected
    pub const UNUSED: Self = Self(-1);

    /// Create a pin identifier
    pub const fn new(pin: i8) -> Self {
        Self(pin)
    }

    /// Check if this pin is connected
    pub const fn is_wired(self) -> bool {
        self.0 >= 0
    }

    /// Raw pin number
    pub const fn number(self) -> i8 {
        self.0
    }
}

impl Default for PinId {
    fn default() -> Self {
        Self::UNUSED
    }
}

impl From<i8> for PinId {
    fn from(pin: i8) -> Self {
        Self(pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_unwired() {
        assert!(!PinId::UNUSED.is_wired());
        assert!(!PinId::new(-7).is_wired());
        assert_eq!(PinId::default(), PinId::UNUSED);
    }

    #[test]
    fn test_zero_is_wired() {
        assert!(PinId::new(0).is_wired());
        assert_eq!(PinId::from(21).number(), 21);
    }
}
