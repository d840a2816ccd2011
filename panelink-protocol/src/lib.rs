//! Bridge-chip packet protocol
//!
//! A parallel-to-MIPI bridge (SSD2805 class) does not take panel commands
//! directly. Every transfer is announced through its length registers and
//! framed in one of two modes before the payload is accepted:
//!
//! ```text
//! Generic packet:
//! ┌──────────────┬──────────────┬─────────┬─────────┬─────────────┐
//! │ BCh len lo16 │ BDh len hi16 │ BFh     │ CMD     │ PAYLOAD     │
//! │ register     │ register     │ command │ data    │ data        │
//! └──────────────┴──────────────┴─────────┴─────────┴─────────────┘
//!   len = 1 + payload
//!
//! Compact (DCS) packet:
//! ┌──────────────┬──────────────┬──────────────┬─────────┬─────────┐
//! │ BCh len lo16 │ BDh len hi16 │ B7h = 0x0340 │ CMD     │ PAYLOAD │
//! │ register     │ register     │ register     │ command │ data    │
//! └──────────────┴──────────────┴──────────────┴─────────┴─────────┘
//!   len = payload
//! ```
//!
//! The declared length must equal the bytes that follow. A mismatch
//! desynchronises the bridge until its PLL/clock bring-up is run again.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod packet;
pub mod pll;
pub mod registers;

pub use packet::{
    BusOp, Framing, LengthRegisters, Packet, PacketEncoder, PacketError, PacketKind, PacketOps,
};
pub use pll::PllConfig;
