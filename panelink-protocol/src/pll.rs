//! Bridge PLL configuration
//!
//! The PLL configuration register packs three fields:
//!
//! ```text
//! 15    12 11     8 7              0
//! ┌───────┬────────┬────────────────┐
//! │ PDIV  │  NDIV  │      MUL       │
//! └───────┴────────┴────────────────┘
//! f_pll = f_ref * (MUL + 1) / ((PDIV + 1) * (NDIV + 1))
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lowest VCO frequency the bridge locks at
pub const VCO_MIN_HZ: u64 = 225_000_000;

/// Highest VCO frequency (350 Mbps per lane)
pub const VCO_MAX_HZ: u64 = 350_000_000;

/// PLL register fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PllConfig {
    /// Multiplier field (MUL)
    pub multiplier: u8,
    /// Input divider field (NDIV, 4 bits)
    pub input_divider: u8,
    /// Post divider field (PDIV, 4 bits)
    pub post_divider: u8,
}

impl Default for PllConfig {
    fn default() -> Self {
        Self::from_register(0x0012)
    }
}

impl PllConfig {
    /// Decode a raw register value
    pub const fn from_register(value: u16) -> Self {
        Self {
            multiplier: (value & 0xFF) as u8,
            input_divider: ((value >> 8) & 0x0F) as u8,
            post_divider: ((value >> 12) & 0x0F) as u8,
        }
    }

    /// Encode as a register value
    ///
    /// Divider fields are truncated to 4 bits.
    pub const fn register_value(&self) -> u16 {
        ((self.post_divider as u16 & 0x0F) << 12)
            | ((self.input_divider as u16 & 0x0F) << 8)
            | self.multiplier as u16
    }

    /// PLL output frequency for a given reference clock
    pub const fn output_hz(&self, reference_hz: u32) -> u64 {
        let num = reference_hz as u64 * (self.multiplier as u64 + 1);
        let den = (self.post_divider as u64 + 1) * (self.input_divider as u64 + 1);
        num / den
    }

    /// Check if the output lands in the lockable VCO range
    pub const fn in_vco_range(&self, reference_hz: u32) -> bool {
        let f = self.output_hz(reference_hz);
        f >= VCO_MIN_HZ && f <= VCO_MAX_HZ
    }
}
