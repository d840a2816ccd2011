//! Sitronix ST7789 with 240x240 glass
//!
//! The frame memory is 240x320. The glass is mapped at its origin for two
//! scan states; the other two scan from the far end, so the active area
//! is shifted by 80 lines along the affected axis.

use panelink_core::bringup::{cmd, dcs, delay_ms};
use panelink_core::InitStep;

use super::{ChipProfile, WindowOffset};

/// Porch control
const PORCTRL: u8 = 0xB2;
/// Gate control
const GCTRL: u8 = 0xB7;
/// VCOM setting
const VCOMS: u8 = 0xBB;
/// LCM control
const LCMCTRL: u8 = 0xC0;
/// VDV and VRH command enable
const VDVVRHEN: u8 = 0xC2;
/// VRH set
const VRHS: u8 = 0xC3;
/// VDV set
const VDVS: u8 = 0xC4;
/// Frame rate control in normal mode
const FRCTRL2: u8 = 0xC6;
/// Power control 1
const PWCTRL1: u8 = 0xD0;
/// Positive voltage gamma
const PVGAMCTRL: u8 = 0xE0;
/// Negative voltage gamma
const NVGAMCTRL: u8 = 0xE1;

const INIT: &[InitStep] = &[
    InitStep::MemoryAccess,
    cmd(dcs::PIXEL_FORMAT, &[0x05]),
    cmd(PORCTRL, &[0x0C, 0x0C, 0x00, 0x33, 0x33]),
    cmd(GCTRL, &[0x35]),
    cmd(VCOMS, &[0x19]),
    cmd(LCMCTRL, &[0x2C]),
    cmd(VDVVRHEN, &[0x01]),
    cmd(VRHS, &[0x12]),
    cmd(VDVS, &[0x20]),
    cmd(FRCTRL2, &[0x0F]),
    cmd(PWCTRL1, &[0xA4, 0xA1]),
    cmd(
        PVGAMCTRL,
        &[
            0xD0, 0x04, 0x0D, 0x11, 0x13, 0x2B, 0x3F, 0x54, 0x4C, 0x18, 0x0D, 0x0B, 0x1F, 0x23,
        ],
    ),
    cmd(
        NVGAMCTRL,
        &[
            0xD0, 0x04, 0x0C, 0x11, 0x13, 0x2C, 0x3F, 0x44, 0x51, 0x2F, 0x1F, 0x1F, 0x20, 0x23,
        ],
    ),
    InitStep::Inversion,
    cmd(dcs::SLEEP_OUT, &[]),
    delay_ms(120),
    cmd(dcs::DISPLAY_ON, &[]),
];

/// ST7789 profile
pub static ST7789: ChipProfile = ChipProfile {
    name: "ST7789",
    init: INIT,
    memory_access: [0x00, 0xC0, 0x70, 0xA0],
    offsets: [
        WindowOffset::NONE,
        WindowOffset::rows(80),
        WindowOffset::NONE,
        WindowOffset::columns(80),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direct::tests::{controller, window_bytes, BK, DC};
    use panelink_core::mock::{Event, MockLog, Tx};
    use panelink_core::{ColorOrder, Controller, Orientation};
    use std::vec;

    #[test]
    fn test_bring_up_ends_with_display_on_and_backlight() {
        let log = MockLog::new();
        let mut lcd = controller(&log, &ST7789, Orientation::Rotation0, ColorOrder::Rgb);

        lcd.init().unwrap();

        let tx = log.transactions(DC);
        assert_eq!(tx.last(), Some(&Tx::Command(dcs::DISPLAY_ON)));
        assert_eq!(log.events().last(), Some(&Event::Line(BK, true)));
        assert_eq!(log.line_level(BK), Some(true));
    }

    #[test]
    fn test_bring_up_commands() {
        let log = MockLog::new();
        let mut lcd = controller(&log, &ST7789, Orientation::Rotation0, ColorOrder::Rgb);

        lcd.init().unwrap();

        assert_eq!(
            log.commands(DC),
            vec![
                0x36, 0x3A, 0xB2, 0xB7, 0xBB, 0xC0, 0xC2, 0xC3, 0xC4, 0xC6, 0xD0, 0xE0, 0xE1,
                0x21, 0x11, 0x29
            ]
        );
        assert_eq!(log.data_after(DC, dcs::MEMORY_ACCESS), vec![vec![0x00]]);
        assert_eq!(
            log.data_after(DC, PORCTRL),
            vec![vec![0x0C, 0x0C, 0x00, 0x33, 0x33]]
        );
        // Reset 200 + settle 100 + sleep out 120
        assert_eq!(log.total_delay_ms(), 420);
    }

    #[test]
    fn test_bgr_sets_madctl_bit() {
        let log = MockLog::new();
        let mut lcd = controller(&log, &ST7789, Orientation::Rotation1, ColorOrder::Bgr);

        lcd.init().unwrap();

        assert_eq!(log.data_after(DC, dcs::MEMORY_ACCESS), vec![vec![0xC8]]);
    }

    #[test]
    fn test_window_golden_bytes() {
        let cases = [
            (Orientation::Rotation0, window_bytes(10, 20, 109, 219)),
            (Orientation::Rotation1, window_bytes(10, 100, 109, 299)),
            (Orientation::Rotation2, window_bytes(10, 20, 109, 219)),
            (Orientation::Rotation3, window_bytes(90, 20, 189, 219)),
        ];
        for (orientation, expected) in cases {
            let log = MockLog::new();
            let mut lcd = controller(&log, &ST7789, orientation, ColorOrder::Rgb);
            lcd.init().unwrap();
            log.clear();

            lcd.set_window(10, 20, 109, 219).unwrap();

            assert_eq!(log.transactions(DC), expected, "{:?}", orientation);
        }
    }

    #[test]
    fn test_reinit_replays_identical_stream() {
        let log = MockLog::new();
        let mut lcd = controller(&log, &ST7789, Orientation::Rotation2, ColorOrder::Rgb);

        lcd.init().unwrap();
        let first = log.events();
        lcd.deinit().unwrap();
        log.clear();
        lcd.init().unwrap();

        assert_eq!(log.events(), first);
    }
}
