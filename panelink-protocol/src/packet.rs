//! Packet framing for the bridge
//!
//! [`PacketEncoder`] turns a logical packet (command byte plus payload)
//! into the ordered bus operations the bridge expects. It tracks which
//! framing mode the bridge is in, so a generic packet following a compact
//! one reselects generic framing first.

use heapless::Vec;

use crate::registers;

/// Longest operation list a single packet encodes to
///
/// A generic packet that has to reselect generic framing: framing
/// register, two length registers, trigger, command byte, payload.
pub const MAX_PACKET_OPS: usize = 6;

/// Errors that can occur while framing a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Declared length exceeds what the bridge accepts in one packet
    PayloadTooLarge,
}

/// Packet framing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketKind {
    /// Length, generic trigger, then command byte and payload as data
    Generic,
    /// Length, DCS framing, then the command byte itself as trigger
    Compact,
}

/// Framing mode the bridge was last switched to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Framing {
    /// Not known (after reset or before bring-up)
    Unknown,
    Generic,
    Compact,
}

/// Transfer length split across the two 16-bit count registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LengthRegisters {
    /// Value for the low count register
    pub low: u16,
    /// Value for the high count register
    pub high: u16,
}

impl LengthRegisters {
    /// Split a byte count
    pub const fn new(len: u32) -> Self {
        Self {
            low: (len & 0xFFFF) as u16,
            high: (len >> 16) as u16,
        }
    }

    /// Byte count these register values declare
    pub const fn len(&self) -> u32 {
        self.low as u32 | (self.high as u32) << 16
    }

    /// Check if the declared count is zero
    pub const fn is_empty(&self) -> bool {
        self.low == 0 && self.high == 0
    }
}

/// One step on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp<'a> {
    /// 16-bit register write
    Register { reg: u8, value: u16 },
    /// Command byte
    Command(u8),
    /// Single data byte
    DataByte(u8),
    /// Block of data bytes
    Data(&'a [u8]),
}

impl BusOp<'_> {
    /// Packet payload bytes carried by this operation
    pub fn payload_len(&self) -> usize {
        match self {
            BusOp::DataByte(_) => 1,
            BusOp::Data(bytes) => bytes.len(),
            BusOp::Register { .. } | BusOp::Command(_) => 0,
        }
    }
}

/// Encoded packet
pub type PacketOps<'a> = Vec<BusOp<'a>, MAX_PACKET_OPS>;

/// A logical packet: command byte and its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet<'a> {
    pub kind: PacketKind,
    pub command: u8,
    pub payload: &'a [u8],
}

impl<'a> Packet<'a> {
    /// Generic packet
    pub const fn generic(command: u8, payload: &'a [u8]) -> Self {
        Self {
            kind: PacketKind::Generic,
            command,
            payload,
        }
    }

    /// Compact (DCS) packet
    pub const fn compact(command: u8, payload: &'a [u8]) -> Self {
        Self {
            kind: PacketKind::Compact,
            command,
            payload,
        }
    }

    /// Byte count to program into the length registers
    ///
    /// Generic packets count the leading command byte; compact packets
    /// count only the payload.
    pub fn declared_len(&self) -> Result<u32, PacketError> {
        let len = match self.kind {
            PacketKind::Generic => self.payload.len().checked_add(1),
            PacketKind::Compact => Some(self.payload.len()),
        };
        len.and_then(|l| u32::try_from(l).ok())
            .ok_or(PacketError::PayloadTooLarge)
    }
}

/// Stateful packet encoder
#[derive(Debug, Clone)]
pub struct PacketEncoder {
    framing: Framing,
    max_len: u32,
}

impl Default for PacketEncoder {
    fn default() -> Self {
        Self::new(u32::MAX)
    }
}

impl PacketEncoder {
    /// Create an encoder accepting packets up to `max_len` declared bytes
    pub const fn new(max_len: u32) -> Self {
        Self {
            framing: Framing::Unknown,
            max_len,
        }
    }

    /// Current framing mode
    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// Largest declared length accepted
    pub fn max_len(&self) -> u32 {
        self.max_len
    }

    /// Forget the framing mode (bridge was reset)
    pub fn reset(&mut self) {
        self.framing = Framing::Unknown;
    }

    /// Register write selecting generic framing
    pub fn select_generic(&mut self) -> BusOp<'static> {
        self.framing = Framing::Generic;
        BusOp::Register {
            reg: registers::CONFIG,
            value: registers::CONFIG_GENERIC,
        }
    }

    /// Encode a packet into bus operations
    ///
    /// Fails without touching the framing state if the packet is too large.
    pub fn encode<'a>(&mut self, packet: &Packet<'a>) -> Result<PacketOps<'a>, PacketError> {
        let len = packet.declared_len()?;
        if len > self.max_len {
            return Err(PacketError::PayloadTooLarge);
        }
        let count = LengthRegisters::new(len);

        let mut ops = PacketOps::new();
        match packet.kind {
            PacketKind::Generic => {
                if self.framing != Framing::Generic {
                    let select = self.select_generic();
                    push(&mut ops, select);
                }
                push_length(&mut ops, count);
                push(&mut ops, BusOp::Command(registers::PACKET_DATA));
                push(&mut ops, BusOp::DataByte(packet.command));
            }
            PacketKind::Compact => {
                push_length(&mut ops, count);
                push(
                    &mut ops,
                    BusOp::Register {
                        reg: registers::CONFIG,
                        value: registers::CONFIG_DCS,
                    },
                );
                push(&mut ops, BusOp::Command(packet.command));
                self.framing = Framing::Compact;
            }
        }
        if !packet.payload.is_empty() {
            push(&mut ops, BusOp::Data(packet.payload));
        }
        Ok(ops)
    }
}

fn push_length(ops: &mut PacketOps<'_>, count: LengthRegisters) {
    push(
        ops,
        BusOp::Register {
            reg: registers::TDC_SIZE_LOW,
            value: count.low,
        },
    );
    push(
        ops,
        BusOp::Register {
            reg: registers::TDC_SIZE_HIGH,
            value: count.high,
        },
    );
}

fn push<'a>(ops: &mut PacketOps<'a>, op: BusOp<'a>) {
    let pushed = ops.push(op).is_ok();
    debug_assert!(pushed, "packet exceeds MAX_PACKET_OPS");
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    static ZEROS: [u8; 300_000] = [0; 300_000];

    fn length_of(ops: &[BusOp<'_>]) -> u32 {
        let low = ops.iter().find_map(|op| match op {
            BusOp::Register { reg, value } if *reg == registers::TDC_SIZE_LOW => Some(*value),
            _ => None,
        });
        let high = ops.iter().find_map(|op| match op {
            BusOp::Register { reg, value } if *reg == registers::TDC_SIZE_HIGH => Some(*value),
            _ => None,
        });
        LengthRegisters {
            low: low.unwrap(),
            high: high.unwrap(),
        }
        .len()
    }

    #[test]
    fn test_length_split() {
        let count = LengthRegisters::new(230_400);
        assert_eq!(count.low, 0x8400);
        assert_eq!(count.high, 0x0003);
        assert_eq!(count.len(), 230_400);
        assert!(LengthRegisters::new(0).is_empty());
    }

    #[test]
    fn test_generic_from_unknown_framing() {
        let mut encoder = PacketEncoder::default();
        let ops = encoder
            .encode(&Packet::generic(0xF0, &[0x55, 0xAA, 0x52, 0x08, 0x00]))
            .unwrap();

        assert_eq!(
            ops.as_slice(),
            &[
                BusOp::Register {
                    reg: registers::CONFIG,
                    value: registers::CONFIG_GENERIC
                },
                BusOp::Register {
                    reg: registers::TDC_SIZE_LOW,
                    value: 6
                },
                BusOp::Register {
                    reg: registers::TDC_SIZE_HIGH,
                    value: 0
                },
                BusOp::Command(registers::PACKET_DATA),
                BusOp::DataByte(0xF0),
                BusOp::Data(&[0x55, 0xAA, 0x52, 0x08, 0x00]),
            ]
        );
        assert_eq!(encoder.framing(), Framing::Generic);
        assert_eq!(ops.len(), MAX_PACKET_OPS);
    }

    #[test]
    fn test_generic_keeps_framing() {
        let mut encoder = PacketEncoder::default();
        encoder.select_generic();

        let ops = encoder.encode(&Packet::generic(0x11, &[])).unwrap();

        assert_eq!(
            ops.as_slice(),
            &[
                BusOp::Register {
                    reg: registers::TDC_SIZE_LOW,
                    value: 1
                },
                BusOp::Register {
                    reg: registers::TDC_SIZE_HIGH,
                    value: 0
                },
                BusOp::Command(registers::PACKET_DATA),
                BusOp::DataByte(0x11),
            ]
        );
    }

    #[test]
    fn test_compact_packet() {
        let mut encoder = PacketEncoder::default();
        let ops = encoder
            .encode(&Packet::compact(0x2A, &[0x00, 0x00, 0x00, 0xEF]))
            .unwrap();

        assert_eq!(
            ops.as_slice(),
            &[
                BusOp::Register {
                    reg: registers::TDC_SIZE_LOW,
                    value: 4
                },
                BusOp::Register {
                    reg: registers::TDC_SIZE_HIGH,
                    value: 0
                },
                BusOp::Register {
                    reg: registers::CONFIG,
                    value: registers::CONFIG_DCS
                },
                BusOp::Command(0x2A),
                BusOp::Data(&[0x00, 0x00, 0x00, 0xEF]),
            ]
        );
        assert_eq!(encoder.framing(), Framing::Compact);
    }

    #[test]
    fn test_generic_after_compact_reselects() {
        let mut encoder = PacketEncoder::default();
        encoder.encode(&Packet::compact(0x2C, &[1, 2])).unwrap();

        let ops = encoder.encode(&Packet::generic(0x29, &[])).unwrap();

        assert_eq!(
            ops[0],
            BusOp::Register {
                reg: registers::CONFIG,
                value: registers::CONFIG_GENERIC
            }
        );
    }

    #[test]
    fn test_payload_too_large() {
        let mut encoder = PacketEncoder::new(1024);
        encoder.select_generic();

        let result = encoder.encode(&Packet::compact(0x2C, &ZEROS[..1025]));
        assert_eq!(result, Err(PacketError::PayloadTooLarge));
        // Rejected packets leave the framing untouched
        assert_eq!(encoder.framing(), Framing::Generic);

        // Generic packets count the command byte against the limit
        let result = encoder.encode(&Packet::generic(0x2C, &ZEROS[..1024]));
        assert_eq!(result, Err(PacketError::PayloadTooLarge));
        assert!(encoder.encode(&Packet::generic(0x2C, &ZEROS[..1023])).is_ok());
    }

    proptest! {
        #[test]
        fn prop_compact_length_matches_trailing_bytes(len in 0usize..300_000) {
            let mut encoder = PacketEncoder::default();
            let ops = encoder.encode(&Packet::compact(0x2C, &ZEROS[..len])).unwrap();

            let trigger = ops.iter().position(|op| *op == BusOp::Command(0x2C)).unwrap();
            let trailing: usize = ops[trigger + 1..].iter().map(BusOp::payload_len).sum();

            prop_assert_eq!(length_of(&ops) as usize, len);
            prop_assert_eq!(trailing, len);
        }

        #[test]
        fn prop_generic_length_counts_command_byte(len in 0usize..300_000) {
            let mut encoder = PacketEncoder::default();
            let ops = encoder.encode(&Packet::generic(0xD1, &ZEROS[..len])).unwrap();

            let trigger = ops
                .iter()
                .position(|op| *op == BusOp::Command(registers::PACKET_DATA))
                .unwrap();
            let trailing: usize = ops[trigger + 1..].iter().map(BusOp::payload_len).sum();

            prop_assert_eq!(length_of(&ops) as usize, len + 1);
            prop_assert_eq!(trailing, len + 1);
        }
    }
}
