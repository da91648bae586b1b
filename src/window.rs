//! Rolling bit window.
//!
//! Received bits are shifted in at the low end of a 32-bit accumulator, so the
//! most recent 26 bits always form a candidate block. A position counter tracks
//! how many bits arrived since the synchronizer last consumed a block.

use crate::consts::{BLOCK_MASK, BLOCK_SIZE};
use crate::syndrome::data_word;

/// Rolling accumulator of the most recently received bits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BitWindow {
    /// Last 32 bits received; bit 0 is the newest.
    bits: u32,

    /// Bits received since the last block boundary.
    ///
    /// Wraps at `u8::MAX` like the 8-bit counter of the demodulator firmware.
    position: u8,
}

impl BitWindow {
    /// Creates an empty window at position 0.
    pub const fn new() -> Self {
        Self {
            bits: 0,
            position: 0,
        }
    }

    /// Shifts in one bit and advances the position counter.
    pub fn push(&mut self, bit: bool) {
        self.bits = (self.bits << 1) | u32::from(bit);
        self.position = self.position.wrapping_add(1);
    }

    /// The raw accumulator, newest bit in bit 0.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// The most recent 26 bits.
    pub fn block(&self) -> u32 {
        self.bits & BLOCK_MASK
    }

    /// Data word of the most recent 26 bits.
    pub fn data_word(&self) -> u16 {
        data_word(self.bits)
    }

    /// Bits received since the last boundary.
    pub fn position(&self) -> u8 {
        self.position
    }

    /// `true` once at least one full block has arrived since the last boundary.
    pub fn is_full(&self) -> bool {
        self.position >= BLOCK_SIZE
    }

    /// `true` when exactly one block has arrived since the last boundary.
    pub fn at_boundary(&self) -> bool {
        self.position == BLOCK_SIZE
    }

    /// Holds the position at the block width while the window slides bit by bit.
    pub fn saturate(&mut self) {
        if self.position > BLOCK_SIZE {
            self.position = BLOCK_SIZE;
        }
    }

    /// Marks a block boundary: the next block starts with the next bit.
    pub fn restart(&mut self) {
        self.position = 0;
    }

    /// Forgets every received bit.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_shifts_in_at_low_end() {
        let mut window = BitWindow::new();
        window.push(true);
        window.push(false);
        window.push(true);
        assert_eq!(window.bits(), 0b101);
        assert_eq!(window.position(), 3);
    }

    #[test]
    fn test_block_keeps_last_26_bits() {
        let mut window = BitWindow::new();
        for _ in 0..40 {
            window.push(true);
        }
        assert_eq!(window.block(), BLOCK_MASK);
        assert_eq!(window.data_word(), 0xffff);
    }

    #[test]
    fn test_boundary_and_saturation() {
        let mut window = BitWindow::new();
        for _ in 0..26 {
            assert!(!window.at_boundary());
            window.push(false);
        }
        assert!(window.at_boundary());
        window.push(false);
        assert!(window.is_full());
        assert!(!window.at_boundary());
        window.saturate();
        assert!(window.at_boundary());
    }

    #[test]
    fn test_position_wraps() {
        let mut window = BitWindow::new();
        for _ in 0..256 {
            window.push(false);
        }
        assert_eq!(window.position(), 0);
    }

    #[test]
    fn test_restart_and_clear() {
        let mut window = BitWindow::new();
        window.push(true);
        window.restart();
        assert_eq!(window.position(), 0);
        assert_eq!(window.bits(), 1);
        window.clear();
        assert_eq!(window, BitWindow::new());
    }
}
