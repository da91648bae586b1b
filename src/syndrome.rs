//! Syndrome computation and block role identification.
//!
//! Every RDS block carries a 10-bit checkword that is the CRC of its data word
//! XORed with an offset word. Multiplying the 26 received bits by the parity
//! check matrix removes the CRC part and leaves the syndrome of the offset word,
//! which identifies the block's position in the group. Anything else means
//! either a bit error or a window that is not aligned on a block boundary.

use crate::consts::{
    BLOCK_MASK, BLOCK_SIZE_USIZE, CHECKWORD_LEN, OFFSET_WORDS, PARITY_MATRIX, SYNDROMES,
};

/// Position of a block within a group, as identified by its offset word.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum BlockRole {
    /// First block. Always carries the PI code.
    A,
    /// Second block. Group type, version and the segment address.
    B,
    /// Third block of a version A group.
    C,
    /// Third block of a version B group (C prime).
    CPrime,
    /// Fourth block.
    D,
}

impl BlockRole {
    /// All roles, in table order.
    pub const ALL: [BlockRole; 5] = [
        BlockRole::A,
        BlockRole::B,
        BlockRole::C,
        BlockRole::CPrime,
        BlockRole::D,
    ];

    /// Slot of this role inside a group. C and C′ share slot 2.
    pub const fn slot(self) -> usize {
        match self {
            BlockRole::A => 0,
            BlockRole::B => 1,
            BlockRole::C | BlockRole::CPrime => 2,
            BlockRole::D => 3,
        }
    }

    /// Expected syndrome of an error-free block in this role.
    pub const fn syndrome(self) -> u16 {
        SYNDROMES[self as usize]
    }

    /// Offset word added to the checkword of a block in this role.
    pub const fn offset_word(self) -> u16 {
        OFFSET_WORDS[self as usize]
    }

    /// Looks up the role whose syndrome equals `syndrome`.
    ///
    /// The five syndromes are pairwise distinct so at most one role can match.
    pub fn from_syndrome(syndrome: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.syndrome() == syndrome)
    }
}

/// Computes the 10-bit syndrome of the 26 least significant bits of `window`.
///
/// Bit 25 is the oldest (first received) bit and uses row 0 of the matrix.
pub fn syndrome(window: u32) -> u16 {
    let block = window & BLOCK_MASK;
    let mut syndrome = 0;
    for (i, row) in PARITY_MATRIX.iter().enumerate() {
        if block & (1 << (BLOCK_SIZE_USIZE - 1 - i)) != 0 {
            syndrome ^= row;
        }
    }
    syndrome
}

/// Identifies the role of the block held in the low 26 bits of `window`.
///
/// Returns `None` when the syndrome matches no offset word. That is the normal
/// outcome for a misaligned window and is not an error.
pub fn decode_block(window: u32) -> Option<BlockRole> {
    BlockRole::from_syndrome(syndrome(window))
}

/// Extracts the 16-bit data word of the block held in the low 26 bits of `window`.
pub fn data_word(window: u32) -> u16 {
    ((window & BLOCK_MASK) >> CHECKWORD_LEN) as u16
}
