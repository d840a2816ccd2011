//! Configuration type definitions

use heapless::Vec;
use panelink_hal::{BusWidth, PinId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of control signals a controller can use
pub const SIGNAL_COUNT: usize = 5;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No transport was supplied to the builder
    MissingTransport,
    /// Two signals share the same wired pin
    DuplicatePin(PinId),
    /// Orientation index outside 0-3
    InvalidOrientation,
    /// Settings text could not be parsed
    Parse,
}

/// Scan orientation
///
/// Controllers expose four scan states through their memory access control
/// register. What each state means physically (rotation, mirroring, axis
/// swap) is defined by the chip profile that consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub enum Orientation {
    #[default]
    Rotation0,
    Rotation1,
    Rotation2,
    Rotation3,
}

impl Orientation {
    /// Index into per-orientation chip tables
    pub const fn index(self) -> usize {
        match self {
            Orientation::Rotation0 => 0,
            Orientation::Rotation1 => 1,
            Orientation::Rotation2 => 2,
            Orientation::Rotation3 => 3,
        }
    }

    /// All four states, in index order
    pub const ALL: [Orientation; 4] = [
        Orientation::Rotation0,
        Orientation::Rotation1,
        Orientation::Rotation2,
        Orientation::Rotation3,
    ];
}

impl TryFrom<u8> for Orientation {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Orientation::ALL
            .get(value as usize)
            .copied()
            .ok_or(ConfigError::InvalidOrientation)
    }
}

impl From<Orientation> for u8 {
    fn from(orientation: Orientation) -> Self {
        orientation.index() as u8
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::MissingTransport => write!(f, "no transport supplied"),
            ConfigError::DuplicatePin(pin) => write!(f, "pin {} assigned twice", pin.number()),
            ConfigError::InvalidOrientation => write!(f, "orientation must be 0-3"),
            ConfigError::Parse => write!(f, "settings could not be parsed"),
        }
    }
}

/// Sub-pixel colour order of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorOrder {
    #[default]
    Rgb,
    Bgr,
}

/// Control pin assignment
///
/// Any pin may be [`PinId::UNUSED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PinAssignment {
    /// Data/command select
    pub dc: PinId,
    /// Read strobe
    pub rd: PinId,
    /// Chip select
    pub cs: PinId,
    /// Hardware reset
    pub rst: PinId,
    /// Backlight enable
    pub bk: PinId,
}

impl PinAssignment {
    /// All signals unwired
    pub const fn unused() -> Self {
        Self {
            dc: PinId::UNUSED,
            rd: PinId::UNUSED,
            cs: PinId::UNUSED,
            rst: PinId::UNUSED,
            bk: PinId::UNUSED,
        }
    }

    /// Pins in signal order (dc, rd, cs, rst, bk)
    pub const fn as_array(&self) -> [PinId; SIGNAL_COUNT] {
        [self.dc, self.rd, self.cs, self.rst, self.bk]
    }

    /// Wired pins only, in signal order
    pub fn wired(&self) -> Vec<PinId, SIGNAL_COUNT> {
        self.as_array()
            .into_iter()
            .filter(|pin| pin.is_wired())
            .collect()
    }
}

/// Per-signal inversion (true = active level is physically low)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PinInversion {
    pub dc: bool,
    pub rd: bool,
    pub cs: bool,
    pub rst: bool,
    pub bk: bool,
}

/// Controller settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerSettings {
    /// Data bus width
    pub bus_width: BusWidth,
    /// Control pin assignment
    pub pins: PinAssignment,
    /// Control pin inversion
    pub invert: PinInversion,
    /// Scan orientation
    pub orientation: Orientation,
    /// Panel colour order
    pub color_order: ColorOrder,
    /// Enable display inversion (INVON)
    pub display_inversion: bool,
}

impl ControllerSettings {
    /// Settings with every pin unwired and chip defaults elsewhere
    pub const fn new() -> Self {
        Self {
            bus_width: BusWidth::Eight,
            pins: PinAssignment::unused(),
            invert: PinInversion {
                dc: false,
                rd: false,
                cs: false,
                rst: false,
                bk: false,
            },
            orientation: Orientation::Rotation0,
            color_order: ColorOrder::Rgb,
            display_inversion: false,
        }
    }

    /// Check the settings for conflicts
    pub fn validate(&self) -> Result<(), ConfigError> {
        let wired = self.pins.wired();
        for (i, pin) in wired.iter().enumerate() {
            if wired[i + 1..].contains(pin) {
                return Err(ConfigError::DuplicatePin(*pin));
            }
        }
        Ok(())
    }
}

/// Validated settings plus the transport the driver will own
#[derive(Debug)]
pub struct ControllerConfig<T> {
    /// Controller settings
    pub settings: ControllerSettings,
    /// Transport shim
    pub transport: T,
}

impl<T> ControllerConfig<T> {
    /// Start building a configuration
    pub fn builder() -> ControllerConfigBuilder<T> {
        ControllerConfigBuilder::new()
    }

    /// Build directly from validated settings and a transport
    pub fn new(settings: ControllerSettings, transport: T) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            settings,
            transport,
        })
    }

    /// Split into settings and transport
    pub fn into_parts(self) -> (ControllerSettings, T) {
        (self.settings, self.transport)
    }
}

/// Builder for [`ControllerConfig`]
///
/// `build()` fails unless a transport was supplied.
#[derive(Debug)]
pub struct ControllerConfigBuilder<T> {
    settings: ControllerSettings,
    transport: Option<T>,
}

impl<T> Default for ControllerConfigBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ControllerConfigBuilder<T> {
    /// Create a builder with default settings and no transport
    pub fn new() -> Self {
        Self {
            settings: ControllerSettings::new(),
            transport: None,
        }
    }

    /// Replace all settings at once
    pub fn settings(mut self, settings: ControllerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the bus width
    pub fn bus_width(mut self, width: BusWidth) -> Self {
        self.settings.bus_width = width;
        self
    }

    /// Set the control pins
    pub fn pins(mut self, pins: PinAssignment) -> Self {
        self.settings.pins = pins;
        self
    }

    /// Set control pin inversion
    pub fn invert(mut self, invert: PinInversion) -> Self {
        self.settings.invert = invert;
        self
    }

    /// Set the scan orientation
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.settings.orientation = orientation;
        self
    }

    /// Set the panel colour order
    pub fn color_order(mut self, order: ColorOrder) -> Self {
        self.settings.color_order = order;
        self
    }

    /// Enable or disable display inversion
    pub fn display_inversion(mut self, enabled: bool) -> Self {
        self.settings.display_inversion = enabled;
        self
    }

    /// Set the transport the driver will write through
    pub fn transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<ControllerConfig<T>, ConfigError> {
        let transport = self.transport.ok_or(ConfigError::MissingTransport)?;
        ControllerConfig::new(self.settings, transport)
    }
}
