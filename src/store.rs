//! Byte-addressed non-volatile storage and the mode marker format.

use crate::config::{NORMAL_MARKER, SWAP_MARKER};

/// Non-volatile byte storage.
///
/// Reads return the last committed value. Writes wait for any write still in
/// flight, then erase and rewrite the containing cell; they block until done.
pub trait ByteStore {
    type Error;

    fn read_byte(&mut self, addr: u16) -> u8;
    fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), Self::Error>;
}

pub mod marker {
    use super::{NORMAL_MARKER, SWAP_MARKER};

    pub const fn encode(swapped: bool) -> u8 {
        if swapped {
            SWAP_MARKER
        } else {
            NORMAL_MARKER
        }
    }

    /// Programming can only clear bits; anything else needs the cell erased
    /// first.
    pub const fn needs_erase(stored: u8, value: u8) -> bool {
        value & !stored != 0
    }

    /// Only the exact swap marker means swapped; erased or corrupt cells read
    /// as normal.
    pub const fn decode(byte: u8) -> bool {
        byte == SWAP_MARKER
    }
}
