//! Bring-up table for the DSI panel behind the bridge
//!
//! Every command here is sent as a generic packet. The table unlocks the
//! panel's manufacturer pages, programs power and gamma, then wakes the
//! panel.

use panelink_core::bringup::{cmd, dcs, delay_ms};
use panelink_core::InitStep;

/// Manufacturer command set enable
const MCS_ENABLE: u8 = 0xFF;
/// Page select
const PAGE_SELECT: u8 = 0xF0;

const GAMMA_1: &[u8] = &[
    0x00, 0x17, 0x00, 0x24, 0x00, 0x3D, 0x00, 0x52, 0x00, 0x66, 0x00, 0x86, 0x00, 0xA0, 0x00,
    0xCC,
];
const GAMMA_2: &[u8] = &[
    0x00, 0xF1, 0x01, 0x26, 0x01, 0x4E, 0x01, 0x8C, 0x01, 0xBC, 0x01, 0xBE, 0x01, 0xE7, 0x02,
    0x0E,
];
const GAMMA_3: &[u8] = &[
    0x02, 0x22, 0x02, 0x3C, 0x02, 0x4F, 0x02, 0x71, 0x02, 0x90, 0x02, 0xC6, 0x02, 0xF1, 0x03,
    0x3A,
];
const GAMMA_4: &[u8] = &[0x03, 0xB5, 0x03, 0xC1];

/// Panel table, run after generic framing is selected
// 0xD4 carries 0x15 where the other channels carry 0xB5. Kept as measured
// on the first boards until checked against the panel datasheet.
pub const PANEL_INIT: &[InitStep] = &[
    cmd(MCS_ENABLE, &[0xAA, 0x55, 0x25, 0x01]),
    // Page 0
    cmd(PAGE_SELECT, &[0x55, 0xAA, 0x52, 0x08, 0x00]),
    cmd(0xB1, &[0xFC]),
    cmd(0xB8, &[0x01, 0x02, 0x02, 0x02]),
    cmd(0xBC, &[0x05, 0x05, 0x05]),
    cmd(0xB7, &[0x00, 0x00]),
    cmd(
        0xC8,
        &[
            0x01, 0x00, 0x46, 0x1E, 0x46, 0x1E, 0x46, 0x1E, 0x46, 0x1E, 0x64, 0x3C, 0x3C, 0x64,
            0x64, 0x3C, 0x3C, 0x64,
        ],
    ),
    // Page 1
    cmd(PAGE_SELECT, &[0xAA, 0x55, 0x52, 0x08, 0x01]),
    cmd(0xB0, &[0x05, 0x05, 0x05]),
    cmd(0xB6, &[0x44, 0x44, 0x44]),
    cmd(0xB1, &[0x05, 0x05, 0x05]),
    cmd(0xB7, &[0x34, 0x34, 0x34]),
    cmd(0xB3, &[0x16, 0x16, 0x16]),
    cmd(0xB4, &[0x0A, 0x0A, 0x0A]),
    cmd(0xBC, &[0x00, 0x90, 0x11]),
    cmd(0xBD, &[0x00, 0x90, 0x11]),
    cmd(0xBE, &[0x51]),
    // Gamma, red
    cmd(0xD1, GAMMA_1),
    cmd(0xD2, GAMMA_2),
    cmd(0xD3, GAMMA_3),
    cmd(0xD4, &[0x03, 0x15, 0x03, 0xC1]),
    // Green
    cmd(0xD5, GAMMA_1),
    cmd(0xD6, GAMMA_2),
    cmd(0xD7, GAMMA_3),
    cmd(0xD8, GAMMA_4),
    // Blue
    cmd(0xD9, GAMMA_1),
    cmd(0xDD, GAMMA_2),
    cmd(0xDE, GAMMA_3),
    cmd(0xDF, GAMMA_4),
    // Negative red
    cmd(0xE0, GAMMA_1),
    cmd(0xE1, GAMMA_2),
    cmd(0xE2, GAMMA_3),
    cmd(0xE3, GAMMA_4),
    // Negative green
    cmd(0xE4, GAMMA_1),
    cmd(0xE5, GAMMA_2),
    cmd(0xE6, GAMMA_3),
    cmd(0xE7, GAMMA_4),
    // Negative blue
    cmd(0xE8, GAMMA_1),
    cmd(0xE9, GAMMA_2),
    cmd(0xEA, GAMMA_3),
    cmd(0xEB, GAMMA_4),
    delay_ms(200),
    cmd(dcs::TEARING_ON, &[]),
    cmd(dcs::SLEEP_OUT, &[]),
    delay_ms(200),
    cmd(dcs::DISPLAY_ON, &[]),
];
