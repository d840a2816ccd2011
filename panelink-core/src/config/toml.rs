//! TOML settings loader
//!
//! Reads the `[panel]` table of a board description:
//!
//! ```toml
//! [panel]
//! bus_width = 8
//! orientation = 0
//! color_order = "rgb"
//! display_inversion = true
//!
//! [panel.pins]
//! dc = 1
//! rd = 2
//! cs = 21
//! rst = 18
//! bk = -1
//!
//! [panel.invert]
//! cs = false
//! ```
//!
//! Missing keys keep their defaults; missing pins are unwired.

use serde::Deserialize;

use super::types::{ConfigError, ControllerSettings};

#[derive(Deserialize)]
struct BoardFile {
    panel: ControllerSettings,
}

/// Parse and validate panel settings from TOML text
pub fn from_toml(input: &str) -> Result<ControllerSettings, ConfigError> {
    let file: BoardFile = ::toml::from_str(input).map_err(|_| ConfigError::Parse)?;
    file.panel.validate()?;
    Ok(file.panel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorOrder, Orientation};
    use panelink_hal::{BusWidth, PinId};

    const BOARD: &str = r#"
        [panel]
        bus_width = 8
        orientation = 2
        color_order = "bgr"
        display_inversion = true

        [panel.pins]
        dc = 1
        rd = 2
        cs = 21
        rst = 18

        [panel.invert]
        rst = true
    "#;

    #[test]
    fn test_parse_board() {
        let settings = from_toml(BOARD).unwrap();
        assert_eq!(settings.bus_width, BusWidth::Eight);
        assert_eq!(settings.orientation, Orientation::Rotation2);
        assert_eq!(settings.color_order, ColorOrder::Bgr);
        assert!(settings.display_inversion);
        assert_eq!(settings.pins.cs, PinId::new(21));
        assert_eq!(settings.pins.bk, PinId::UNUSED);
        assert!(settings.invert.rst);
        assert!(!settings.invert.dc);
    }

    #[test]
    fn test_defaults_when_empty() {
        let settings = from_toml("[panel]\n").unwrap();
        assert_eq!(settings, ControllerSettings::new());
    }

    #[test]
    fn test_invalid_bus_width() {
        let result = from_toml("[panel]\nbus_width = 4\n");
        assert_eq!(result, Err(ConfigError::Parse));
    }

    #[test]
    fn test_invalid_orientation() {
        let result = from_toml("[panel]\norientation = 7\n");
        assert_eq!(result, Err(ConfigError::Parse));
    }

    #[test]
    fn test_duplicate_pin() {
        let result = from_toml("[panel.pins]\ndc = 3\ncs = 3\n");
        assert_eq!(result, Err(ConfigError::DuplicatePin(PinId::new(3))));
    }
}
