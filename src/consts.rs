//! Constants used across the RDS block and group decoder.
//!
//! This module defines the block geometry, the (26, 16) shortened cyclic code
//! tables used to identify block roles, and the layout of the decoded output
//! buffers.
//!
//! ## Key Concepts
//!
//! - **Block**: 26 bits, a 16-bit data word followed by a 10-bit checkword.
//! - **Group**: four blocks (A, B, C or C′, D), 104 bits in total.
//! - **Offset word**: a 10-bit pattern XORed into each checkword so the receiver
//!   can tell the four block positions apart from the checkword alone.
//! - **Syndrome**: the 10-bit result of multiplying a received block by the
//!   parity check matrix. A block with no bit errors has a syndrome equal to the
//!   syndrome of its offset word.
//!
//! These values follow EN 50067 / IEC 62106 and should be used wherever framing
//! or buffer logic is implemented.

/// Number of bits in one block (data word + checkword).
pub const BLOCK_SIZE: u8 = 26;

/// See [`BLOCK_SIZE`](crate::consts::BLOCK_SIZE)
pub const BLOCK_SIZE_USIZE: usize = BLOCK_SIZE as usize;

/// Number of checkword bits at the low end of a block.
pub const CHECKWORD_LEN: u8 = 10;

/// Mask selecting the 26 bits of the most recent block from the rolling window.
pub const BLOCK_MASK: u32 = (1 << BLOCK_SIZE) - 1;

/// Mask selecting the 10-bit checkword / syndrome.
pub const CHECKWORD_MASK: u16 = (1 << CHECKWORD_LEN) - 1;

/// Number of blocks in one group.
pub const BLOCKS_PER_GROUP: usize = 4;

/// Number of bits in one group.
pub const GROUP_SIZE: usize = BLOCK_SIZE_USIZE * BLOCKS_PER_GROUP;

/// Generator polynomial `x^10 + x^8 + x^7 + x^5 + x^4 + x^3 + 1`, including the
/// `x^10` term.
pub const GENERATOR_POLY: u16 = 0x5b9;

/// Parity check matrix.
///
/// Row `i` is added (mod 2) into the syndrome when bit `25 - i` of the block is
/// set; row 0 therefore belongs to the first transmitted bit.
///
/// ```text
/// 1000000000 0100000000 0010000000 0001000000
/// 0000100000 0000010000 0000001000 0000000100
/// 0000000010 0000000001 1011011100 0101101110
/// 0010110111 1010000111 1110011111 1100010011
/// 1101010101 1101110110 0110111011 1000000001
/// 1111011100 0111101110 0011110111 1010100111
/// 1110001111 1100011011
/// ```
pub const PARITY_MATRIX: [u16; BLOCK_SIZE_USIZE] = [
    0x0200, 0x0100, 0x0080, 0x0040, 0x0020, 0x0010, 0x0008, 0x0004, 0x0002, 0x0001, 0x02dc,
    0x016e, 0x00b7, 0x0287, 0x039f, 0x0313, 0x0355, 0x0376, 0x01bb, 0x0201, 0x03dc, 0x01ee,
    0x00f7, 0x02a7, 0x038f, 0x031b,
];

/// Offset words, indexed A, B, C, C′, D.
///
/// | block | offset word  | syndrome     |
/// |-------|--------------|--------------|
/// | A     | `0011111100` | `1111011000` |
/// | B     | `0110011000` | `1111010100` |
/// | C     | `0101101000` | `1001011100` |
/// | C′    | `1101010000` | `1111001100` |
/// | D     | `0110110100` | `1001011000` |
pub const OFFSET_WORDS: [u16; 5] = [0x00fc, 0x0198, 0x0168, 0x0350, 0x01b4];

/// Expected syndromes, indexed A, B, C, C′, D. Pairwise distinct.
pub const SYNDROMES: [u16; 5] = [0x03d8, 0x03d4, 0x025c, 0x03cc, 0x0258];

/// Length (in bytes) of the program service name.
pub const PROGRAM_NAME_LEN: usize = 8;

/// Number of 2-character program name segments.
pub const PROGRAM_NAME_SEGMENTS: usize = 4;

/// Length (in bytes) of one radio text buffer.
pub const MESSAGE_TEXT_LEN: usize = 64;

/// Number of 4-character radio text segments.
pub const MESSAGE_TEXT_SEGMENTS: usize = 16;

/// Group type carrying basic tuning info and the program service name.
pub const GROUP_TYPE_PROGRAM_NAME: u8 = 0;

/// Group type carrying radio text.
pub const GROUP_TYPE_MESSAGE_TEXT: u8 = 2;

/// Group type carrying fast basic tuning info, decoded like group type 0.
pub const GROUP_TYPE_FAST_PROGRAM_NAME: u8 = 15;

/// Radio text end-of-message marker (carriage return).
pub const MESSAGE_TEXT_END: u8 = 0x0d;

/// RDS data rate: 57 kHz / 48 = 1187.5 bits / second
pub const BITS_PER_SECOND: f64 = 1_187.5;

/// 1,000,000,000 nanoseconds = 1 second
pub const NANOSECONDS_PER_SECOND: u64 = 1_000_000_000;
