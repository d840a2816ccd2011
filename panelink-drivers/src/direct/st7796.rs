//! Sitronix ST7796 (320x480)
//!
//! Vendor registers sit behind the command set 2 unlock and are locked
//! again once programmed.

use panelink_core::bringup::{cmd, dcs, delay_ms};
use panelink_core::InitStep;

use super::{ChipProfile, WindowOffset};

/// Command set control
const CSCON: u8 = 0xF0;
/// Display inversion control
const DIC: u8 = 0xB4;
/// Entry mode set
const EM: u8 = 0xB7;
/// Display output ctrl adjust
const DOCA: u8 = 0xE8;
/// Power control 2
const PWR2: u8 = 0xC1;
/// Power control 3
const PWR3: u8 = 0xC2;
/// VCOM control
const VCMPCTL: u8 = 0xC5;
/// Positive gamma
const PGC: u8 = 0xE0;
/// Negative gamma
const NGC: u8 = 0xE1;

const INIT: &[InitStep] = &[
    cmd(dcs::SLEEP_OUT, &[]),
    delay_ms(200),
    cmd(CSCON, &[0xC3]),
    cmd(CSCON, &[0x96]),
    InitStep::MemoryAccess,
    cmd(dcs::PIXEL_FORMAT, &[0x55]),
    cmd(DIC, &[0x01]),
    cmd(EM, &[0xC6]),
    cmd(DOCA, &[0x40, 0x8A, 0x00, 0x00, 0x29, 0x19, 0xA5, 0x33]),
    cmd(PWR2, &[0x06]),
    cmd(PWR3, &[0xA7]),
    cmd(VCMPCTL, &[0x18]),
    cmd(
        PGC,
        &[
            0xF0, 0x09, 0x0B, 0x06, 0x04, 0x15, 0x2F, 0x54, 0x42, 0x3C, 0x17, 0x14, 0x18, 0x1B,
        ],
    ),
    cmd(
        NGC,
        &[
            0xF0, 0x09, 0x0B, 0x06, 0x04, 0x03, 0x2D, 0x43, 0x42, 0x3B, 0x16, 0x14, 0x17, 0x1B,
        ],
    ),
    cmd(CSCON, &[0x3C]),
    cmd(CSCON, &[0x69]),
    InitStep::Inversion,
    delay_ms(120),
    cmd(dcs::DISPLAY_ON, &[]),
];

/// ST7796 profile
pub static ST7796: ChipProfile = ChipProfile {
    name: "ST7796",
    init: INIT,
    memory_access: [0x20, 0xA0, 0x40, 0xC0],
    offsets: [WindowOffset::NONE; 4],
};
