//! Parallel bus width
//!
//! The drivers never clock the bus themselves. The width only changes
//! which bring-up workarounds a driver applies.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Data bus width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub enum BusWidth {
    /// 1-bit serial bus
    One,
    /// 8-bit parallel (8080) bus
    #[default]
    Eight,
    /// 16-bit parallel (8080) bus
    Sixteen,
}

/// Bus width not in {1, 8, 16}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidBusWidth(pub u8);

impl core::fmt::Display for InvalidBusWidth {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unsupported bus width: {} bits", self.0)
    }
}

impl BusWidth {
    /// Number of data lines
    pub const fn bits(self) -> u8 {
        match self {
            BusWidth::One => 1,
            BusWidth::Eight => 8,
            BusWidth::Sixteen => 16,
        }
    }
}

impl TryFrom<u8> for BusWidth {
    type Error = InvalidBusWidth;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            1 => Ok(BusWidth::One),
            8 => Ok(BusWidth::Eight),
            16 => Ok(BusWidth::Sixteen),
            other => Err(InvalidBusWidth(other)),
        }
    }
}

impl From<BusWidth> for u8 {
    fn from(width: BusWidth) -> Self {
        width.bits()
    }
}
