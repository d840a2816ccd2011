//! GalaxyCore GC9A01 (240x240 round)
//!
//! Most of the table programs undocumented vendor registers behind the
//! inter-register enable pair.

use panelink_core::bringup::{cmd, dcs, delay_ms};
use panelink_core::InitStep;

use super::{ChipProfile, WindowOffset};

/// Inter register enable 1
const INTER_REG_ENABLE1: u8 = 0xFE;
/// Inter register enable 2
const INTER_REG_ENABLE2: u8 = 0xEF;
/// Display function control
const DISPLAY_FUNCTION: u8 = 0xB6;
/// Power control 2
const POWER2: u8 = 0xC3;
/// Power control 3
const POWER3: u8 = 0xC4;
/// Power control 4
const POWER4: u8 = 0xC9;
/// Frame rate
const FRAME_RATE: u8 = 0xE8;
/// Gamma 1 to 4
const GAMMA1: u8 = 0xF0;
const GAMMA2: u8 = 0xF1;
const GAMMA3: u8 = 0xF2;
const GAMMA4: u8 = 0xF3;

const INIT: &[InitStep] = &[
    cmd(INTER_REG_ENABLE2, &[]),
    cmd(0xEB, &[0x14]),
    cmd(INTER_REG_ENABLE1, &[]),
    cmd(INTER_REG_ENABLE2, &[]),
    cmd(0xEB, &[0x14]),
    cmd(0x84, &[0x40]),
    cmd(0x85, &[0xFF]),
    cmd(0x86, &[0xFF]),
    cmd(0x87, &[0xFF]),
    cmd(0x88, &[0x0A]),
    cmd(0x89, &[0x21]),
    cmd(0x8A, &[0x00]),
    cmd(0x8B, &[0x80]),
    cmd(0x8C, &[0x01]),
    cmd(0x8D, &[0x01]),
    cmd(0x8E, &[0xFF]),
    cmd(0x8F, &[0xFF]),
    cmd(DISPLAY_FUNCTION, &[0x00, 0x20]),
    InitStep::MemoryAccess,
    cmd(dcs::PIXEL_FORMAT, &[0x05]),
    cmd(0x90, &[0x08, 0x08, 0x08, 0x08]),
    cmd(0xBD, &[0x06]),
    cmd(0xBC, &[0x00]),
    cmd(0xFF, &[0x60, 0x01, 0x04]),
    cmd(POWER2, &[0x13]),
    cmd(POWER3, &[0x13]),
    cmd(POWER4, &[0x22]),
    cmd(0xBE, &[0x11]),
    cmd(0xE1, &[0x10, 0x0E]),
    cmd(0xDF, &[0x21, 0x0C, 0x02]),
    cmd(GAMMA1, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    cmd(GAMMA2, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    cmd(GAMMA3, &[0x45, 0x09, 0x08, 0x08, 0x26, 0x2A]),
    cmd(GAMMA4, &[0x43, 0x70, 0x72, 0x36, 0x37, 0x6F]),
    cmd(0xED, &[0x1B, 0x0B]),
    cmd(0xAE, &[0x77]),
    cmd(0xCD, &[0x63]),
    cmd(
        0x70,
        &[0x07, 0x07, 0x04, 0x0E, 0x0F, 0x09, 0x07, 0x08, 0x03],
    ),
    cmd(FRAME_RATE, &[0x34]),
    cmd(
        0x62,
        &[
            0x18, 0x0D, 0x71, 0xED, 0x70, 0x70, 0x18, 0x0F, 0x71, 0xEF, 0x70, 0x70,
        ],
    ),
    cmd(
        0x63,
        &[
            0x18, 0x11, 0x71, 0xF1, 0x70, 0x70, 0x18, 0x13, 0x71, 0xF3, 0x70, 0x70,
        ],
    ),
    cmd(0x64, &[0x28, 0x29, 0xF1, 0x01, 0xF1, 0x00, 0x07]),
    cmd(
        0x66,
        &[0x3C, 0x00, 0xCD, 0x67, 0x45, 0x45, 0x10, 0x00, 0x00, 0x00],
    ),
    cmd(
        0x67,
        &[0x00, 0x3C, 0x00, 0x00, 0x00, 0x01, 0x54, 0x10, 0x32, 0x98],
    ),
    cmd(0x74, &[0x10, 0x85, 0x80, 0x00, 0x00, 0x4E, 0x00]),
    cmd(0x98, &[0x3E, 0x07]),
    cmd(dcs::TEARING_ON, &[]),
    InitStep::Inversion,
    cmd(dcs::SLEEP_OUT, &[]),
    delay_ms(120),
    cmd(dcs::DISPLAY_ON, &[]),
    delay_ms(20),
];

/// GC9A01 profile
pub static GC9A01: ChipProfile = ChipProfile {
    name: "GC9A01",
    init: INIT,
    memory_access: [0x00, 0xC0, 0x60, 0xA0],
    offsets: [WindowOffset::NONE; 4],
};
