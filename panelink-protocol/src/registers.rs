//! Bridge register map
//!
//! Registers are 16 bits wide. A register write is the register address
//! sent as a command byte, followed by the value as two data bytes, low
//! byte first.

/// Configuration register (framing mode, EOT, HS/LP)
pub const CONFIG: u8 = 0xB7;

/// Virtual channel control
pub const VC_CONTROL: u8 = 0xB8;

/// PLL control (bit 0 = enable)
pub const PLL_CONTROL: u8 = 0xB9;

/// PLL configuration (multiplier and dividers)
pub const PLL_CONFIG: u8 = 0xBA;

/// Clock control (SYS_CLK and LP clock dividers)
pub const CLOCK_CONTROL: u8 = 0xBB;

/// Transfer data count, low 16 bits
pub const TDC_SIZE_LOW: u8 = 0xBC;

/// Transfer data count, high 16 bits
pub const TDC_SIZE_HIGH: u8 = 0xBD;

/// Generic packet trigger
pub const PACKET_DATA: u8 = 0xBF;

/// Interrupt/status register
pub const STATUS: u8 = 0xC6;

/// Test register (debug clock output, colour/endian control)
pub const TEST: u8 = 0xD6;

// ---------------------------------------------------------------------------
// Register values
// ---------------------------------------------------------------------------

/// CONFIG value selecting generic packets
pub const CONFIG_GENERIC: u16 = 0x0210;

/// CONFIG value selecting compact DCS packets
pub const CONFIG_DCS: u16 = 0x0340;

/// PLL_CONTROL value: PLL off
pub const PLL_DISABLE: u16 = 0x0000;

/// PLL_CONTROL value: PLL on
pub const PLL_ENABLE: u16 = 0x0001;

/// STATUS bit set once the PLL has locked
pub const STATUS_PLL_LOCK: u16 = 0x0080;

/// Default virtual channel (channel 0 for every packet type)
pub const VC_DEFAULT: u16 = 0x0000;

/// Default clock control: SYS_CLK and LP clock dividers
pub const CLOCK_CONTROL_DEFAULT: u16 = 0x0003;

/// Default test register: R2 PNB, END and COLOR bits
pub const TEST_DEFAULT: u16 = 0x0105;
