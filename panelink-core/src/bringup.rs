//! Bring-up step tables
//!
//! A chip's bring-up sequence is a constant slice of [`InitStep`]s taken
//! from the vendor datasheet. Two steps depend on the settings and are
//! resolved when the table runs: the memory access control byte and the
//! inversion command.

/// MIPI DCS commands shared by every supported panel controller
pub mod dcs {
    /// Sleep out
    pub const SLEEP_OUT: u8 = 0x11;
    /// Display inversion off
    pub const INVERSION_OFF: u8 = 0x20;
    /// Display inversion on
    pub const INVERSION_ON: u8 = 0x21;
    /// Display on
    pub const DISPLAY_ON: u8 = 0x29;
    /// Column address set
    pub const COLUMN_ADDRESS: u8 = 0x2A;
    /// Row (page) address set
    pub const ROW_ADDRESS: u8 = 0x2B;
    /// Memory write
    pub const MEMORY_WRITE: u8 = 0x2C;
    /// Tearing effect line on
    pub const TEARING_ON: u8 = 0x35;
    /// Memory data access control
    pub const MEMORY_ACCESS: u8 = 0x36;
    /// Interface pixel format
    pub const PIXEL_FORMAT: u8 = 0x3A;
}

/// One entry of a bring-up table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStep {
    /// Command byte followed by zero or more register bytes
    Command { cmd: u8, params: &'static [u8] },
    /// Fixed wait in milliseconds
    Delay(u32),
    /// Memory access control, value taken from orientation and colour order
    MemoryAccess,
    /// Inversion on or off, taken from the display inversion flag
    Inversion,
}

/// Table entry helper: command with register bytes
pub const fn cmd(cmd: u8, params: &'static [u8]) -> InitStep {
    InitStep::Command { cmd, params }
}

/// Table entry helper: fixed delay
pub const fn delay_ms(ms: u32) -> InitStep {
    InitStep::Delay(ms)
}

/// Settings-dependent values substituted into a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepContext {
    /// Memory access control byte for the active orientation
    pub memory_access: u8,
    /// Display inversion enabled
    pub inversion: bool,
}

/// Register bytes of a resolved command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Params {
    Static(&'static [u8]),
    Byte([u8; 1]),
}

impl Params {
    /// Register bytes as a slice
    pub fn as_slice(&self) -> &[u8] {
        match self {
            Params::Static(bytes) => bytes,
            Params::Byte(byte) => byte,
        }
    }
}

/// A table entry with the settings applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedStep {
    Command { cmd: u8, params: Params },
    Delay(u32),
}

impl InitStep {
    /// Apply the settings-dependent values
    pub const fn resolve(&self, ctx: &StepContext) -> ResolvedStep {
        match *self {
            InitStep::Command { cmd, params } => ResolvedStep::Command {
                cmd,
                params: Params::Static(params),
            },
            InitStep::Delay(ms) => ResolvedStep::Delay(ms),
            InitStep::MemoryAccess => ResolvedStep::Command {
                cmd: dcs::MEMORY_ACCESS,
                params: Params::Byte([ctx.memory_access]),
            },
            InitStep::Inversion => ResolvedStep::Command {
                cmd: if ctx.inversion {
                    dcs::INVERSION_ON
                } else {
                    dcs::INVERSION_OFF
                },
                params: Params::Static(&[]),
            },
        }
    }
}

/// Total fixed delay of a table in milliseconds
pub fn total_delay_ms(table: &[InitStep]) -> u32 {
    table
        .iter()
        .map(|step| match step {
            InitStep::Delay(ms) => *ms,
            _ => 0,
        })
        .sum()
}
