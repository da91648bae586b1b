//! Block and group encoding.
//!
//! The transmit-side counterpart of [`crate::syndrome`]: computes checkwords,
//! builds 26-bit blocks for a given role, and serializes groups into the bit
//! order the receiver expects (most significant bit first).
//!
//! ## Purpose
//!
//! A receiver never needs to encode, but a decoder without an encoder is hard
//! to exercise. These functions produce the exact bitstreams a BU1924-style
//! demodulator clocks out, which is what the synchronizer and its tests consume.
//!
//! ## Functions
//!
//! - [`checkword`]: CRC of a data word, before the offset word is applied
//! - [`encode_block`]: data word + checkword + offset word for one role
//! - [`encode_group`]: the four blocks of one group
//! - [`block_bits`] / [`group_bits`]: bit iterators in transmission order

use crate::consts::{BLOCK_SIZE, BLOCK_SIZE_USIZE, CHECKWORD_LEN, CHECKWORD_MASK, GENERATOR_POLY};
use crate::syndrome::BlockRole;

/// Computes the 10-bit checkword of `data`, i.e. the remainder of
/// `data * x^10` divided by the generator polynomial.
pub fn checkword(data: u16) -> u16 {
    let mut reg = u32::from(data) << CHECKWORD_LEN;
    for bit in (CHECKWORD_LEN..BLOCK_SIZE).rev() {
        if reg & (1 << bit) != 0 {
            reg ^= u32::from(GENERATOR_POLY) << (bit - CHECKWORD_LEN);
        }
    }
    (reg as u16) & CHECKWORD_MASK
}

/// Encodes one 26-bit block carrying `data` in the given role.
pub fn encode_block(data: u16, role: BlockRole) -> u32 {
    (u32::from(data) << CHECKWORD_LEN) | u32::from(checkword(data) ^ role.offset_word())
}

/// Encodes the four blocks of a group.
///
/// `words` holds the A, B, C and D data words. The third block uses offset C′
/// when `c_prime` is set (version B groups), otherwise offset C.
pub fn encode_group(words: &[u16; 4], c_prime: bool) -> [u32; 4] {
    let third = if c_prime {
        BlockRole::CPrime
    } else {
        BlockRole::C
    };
    [
        encode_block(words[0], BlockRole::A),
        encode_block(words[1], BlockRole::B),
        encode_block(words[2], third),
        encode_block(words[3], BlockRole::D),
    ]
}

/// Iterates over the 26 bits of `block`, first transmitted bit first.
pub fn block_bits(block: u32) -> impl Iterator<Item = bool> + use<> {
    (0..BLOCK_SIZE_USIZE)
        .rev()
        .map(move |bit| block & (1 << bit) != 0)
}

/// Iterates over the 104 bits of a group, first transmitted bit first.
pub fn group_bits(words: &[u16; 4], c_prime: bool) -> impl Iterator<Item = bool> + use<> {
    encode_group(words, c_prime).into_iter().flat_map(block_bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GROUP_SIZE, SYNDROMES};
    use crate::syndrome::{data_word, decode_block, syndrome};

    #[test]
    fn test_zero_data_has_zero_checkword() {
        assert_eq!(checkword(0), 0);
    }

    #[test]
    fn test_codeword_has_zero_syndrome() {
        for data in [0x0001, 0x1234, 0x8000, 0xffff] {
            let codeword = (u32::from(data) << 10) | u32::from(checkword(data));
            assert_eq!(syndrome(codeword), 0);
        }
    }

    #[test]
    fn test_encode_block_roles() {
        for (role, expected) in BlockRole::ALL.into_iter().zip(SYNDROMES) {
            let block = encode_block(0x4142, role);
            assert_eq!(syndrome(block), expected);
            assert_eq!(data_word(block), 0x4142);
        }
    }

    #[test]
    fn test_encode_group_third_block_offset() {
        let words = [0x1234, 0x0002, 0xe0cd, 0x4142];
        assert_eq!(decode_block(encode_group(&words, false)[2]), Some(BlockRole::C));
        assert_eq!(decode_block(encode_group(&words, true)[2]), Some(BlockRole::CPrime));
    }

    #[test]
    fn test_block_bits_msb_first() {
        let bits: Vec<bool> = block_bits(0x0200_0001).collect();
        assert_eq!(bits.len(), 26);
        assert!(bits[0]);
        assert!(bits[25]);
        assert!(bits[1..25].iter().all(|b| !b));
    }

    #[test]
    fn test_group_bits_len() {
        assert_eq!(group_bits(&[0; 4], false).count(), GROUP_SIZE);
    }
}
