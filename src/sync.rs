//! Block synchronizer.
//!
//! RDS has no frame marker. The synchronizer finds block boundaries by sliding
//! the [`BitWindow`] one bit at a time until the syndrome of the last 26 bits
//! identifies an A block. From then on blocks are expected at fixed 26-bit
//! intervals, and the syndrome is only checked on those boundaries so that
//! random data inside a block cannot cause a false lock.
//!
//! ## States
//!
//! ```text
//!            A found             B                C / C'
//! SeekingA ---------> ExpectingB ----> ExpectingC -------> ExpectingD
//!    ^                                                         |
//!    +------------------------- D (group complete) -----------+
//! ```
//!
//! What happens when a boundary check fails while locked is selected by
//! [`ResyncPolicy`].

use crate::syndrome::{BlockRole, decode_block};
use crate::window::BitWindow;

/// Which block the synchronizer is waiting for.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum SyncState {
    /// No lock. Every new bit retries the syndrome check on a window shifted
    /// by one bit.
    #[default]
    SeekingA,
    /// Locked; the next boundary should close a B block.
    ExpectingB,
    /// Locked; the next boundary should close a C or C′ block.
    ExpectingC,
    /// Locked; the next boundary should close a D block.
    ExpectingD,
}

/// Recovery behavior for a failed boundary check while locked.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum ResyncPolicy {
    /// Drop the lock and return to [`SyncState::SeekingA`].
    ///
    /// The failed window is searched immediately, so a block that is not the
    /// expected role but is a valid A block re-locks without losing a bit.
    #[default]
    Seek,
    /// Keep the behavior of the BU1924 reference firmware.
    ///
    /// - Expecting B: state and position are left as they are. The position
    ///   counter keeps counting and wraps at 256, so the next B check happens
    ///   only once it reads 26 again.
    /// - Expecting C or D: the position is reset and B is expected next.
    Stall,
}

/// A block that passed its boundary check.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Block {
    /// Role identified from the syndrome
    pub role: BlockRole,
    /// 16-bit data word
    pub data: u16,
}

/// State machine locking onto block boundaries.
#[derive(Debug, Clone)]
pub struct BlockSynchronizer {
    state: SyncState,
    window: BitWindow,
    policy: ResyncPolicy,
    blocks_lost: u32,
}

impl BlockSynchronizer {
    /// Creates a synchronizer in [`SyncState::SeekingA`] with an empty window.
    pub const fn new(policy: ResyncPolicy) -> Self {
        Self {
            state: SyncState::SeekingA,
            window: BitWindow::new(),
            policy,
            blocks_lost: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Bits received since the last boundary.
    pub fn position(&self) -> u8 {
        self.window.position()
    }

    /// The active recovery policy.
    pub fn policy(&self) -> ResyncPolicy {
        self.policy
    }

    /// Number of failed boundary checks while locked.
    pub fn blocks_lost(&self) -> u32 {
        self.blocks_lost
    }

    /// The underlying bit window.
    pub fn window(&self) -> &BitWindow {
        &self.window
    }

    /// Returns to [`SyncState::SeekingA`] with an empty window at position 0.
    pub fn reset(&mut self) {
        self.state = SyncState::SeekingA;
        self.window.clear();
    }

    /// Feeds one received bit.
    ///
    /// Returns the block whose boundary this bit closed, if it passed the check
    /// for the role expected in the current state.
    pub fn push_bit(&mut self, bit: bool) -> Option<Block> {
        self.window.push(bit);
        match self.state {
            SyncState::SeekingA => self.seek(),
            SyncState::ExpectingB => self.check_boundary(|role| role == BlockRole::B),
            SyncState::ExpectingC => {
                self.check_boundary(|role| matches!(role, BlockRole::C | BlockRole::CPrime))
            }
            SyncState::ExpectingD => self.check_boundary(|role| role == BlockRole::D),
        }
    }

    fn seek(&mut self) -> Option<Block> {
        self.window.saturate();
        if !self.window.is_full() {
            return None;
        }
        match decode_block(self.window.block()) {
            Some(BlockRole::A) => {
                debug!("rds: lock acquired");
                Some(self.accept(BlockRole::A))
            }
            _ => None,
        }
    }

    fn check_boundary(&mut self, expected: impl Fn(BlockRole) -> bool) -> Option<Block> {
        if !self.window.at_boundary() {
            return None;
        }
        match decode_block(self.window.block()) {
            Some(role) if expected(role) => Some(self.accept(role)),
            _ => self.lose_block(),
        }
    }

    fn accept(&mut self, role: BlockRole) -> Block {
        self.window.restart();
        self.state = match role {
            BlockRole::A => SyncState::ExpectingB,
            BlockRole::B => SyncState::ExpectingC,
            BlockRole::C | BlockRole::CPrime => SyncState::ExpectingD,
            BlockRole::D => SyncState::SeekingA,
        };
        let block = Block {
            role,
            data: self.window.data_word(),
        };
        trace!("rds: block slot {} data {}", role.slot(), block.data);
        block
    }

    fn lose_block(&mut self) -> Option<Block> {
        self.blocks_lost = self.blocks_lost.wrapping_add(1);
        match self.policy {
            ResyncPolicy::Seek => {
                debug!("rds: lock lost, seeking");
                self.state = SyncState::SeekingA;
                self.seek()
            }
            ResyncPolicy::Stall => {
                debug!("rds: block lost, stalling");
                if self.state != SyncState::ExpectingB {
                    self.window.restart();
                    self.state = SyncState::ExpectingB;
                }
                None
            }
        }
    }
}

impl Default for BlockSynchronizer {
    fn default() -> Self {
        Self::new(ResyncPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{block_bits, encode_block};

    fn feed(sync: &mut BlockSynchronizer, block: u32) -> Option<Block> {
        let mut last = None;
        for bit in block_bits(block) {
            if let Some(block) = sync.push_bit(bit) {
                last = Some(block);
            }
        }
        last
    }

    fn locked_at_b(policy: ResyncPolicy) -> BlockSynchronizer {
        let mut sync = BlockSynchronizer::new(policy);
        assert!(feed(&mut sync, encode_block(0x1234, BlockRole::A)).is_some());
        assert_eq!(sync.state(), SyncState::ExpectingB);
        sync
    }

    #[test]
    fn test_initial_state() {
        let sync = BlockSynchronizer::default();
        assert_eq!(sync.state(), SyncState::SeekingA);
        assert_eq!(sync.position(), 0);
        assert_eq!(sync.policy(), ResyncPolicy::Seek);
    }

    #[test]
    fn test_locks_on_a_block() {
        let mut sync = BlockSynchronizer::default();
        let block = feed(&mut sync, encode_block(0x1234, BlockRole::A));
        assert_eq!(
            block,
            Some(Block {
                role: BlockRole::A,
                data: 0x1234
            })
        );
        assert_eq!(sync.position(), 0);
    }

    #[test]
    fn test_ignores_non_a_blocks_while_seeking() {
        let mut sync = BlockSynchronizer::default();
        assert_eq!(feed(&mut sync, encode_block(0x0002, BlockRole::B)), None);
        assert_eq!(sync.state(), SyncState::SeekingA);
        assert_eq!(sync.position(), 26);
    }

    #[test]
    fn test_sliding_search_finds_offset_a_block() {
        let mut sync = BlockSynchronizer::default();
        for _ in 0..5 {
            assert_eq!(sync.push_bit(false), None);
        }
        let block = feed(&mut sync, encode_block(0x1234, BlockRole::A));
        assert_eq!(block.map(|b| b.role), Some(BlockRole::A));
        assert_eq!(sync.state(), SyncState::ExpectingB);
    }

    #[test]
    fn test_full_group_cycle() {
        let mut sync = locked_at_b(ResyncPolicy::Seek);
        assert!(feed(&mut sync, encode_block(0x0002, BlockRole::B)).is_some());
        assert_eq!(sync.state(), SyncState::ExpectingC);
        let c = feed(&mut sync, encode_block(0xe0cd, BlockRole::CPrime));
        assert_eq!(c.map(|b| b.role), Some(BlockRole::CPrime));
        assert_eq!(sync.state(), SyncState::ExpectingD);
        let d = feed(&mut sync, encode_block(0x4142, BlockRole::D));
        assert_eq!(d.map(|b| b.data), Some(0x4142));
        assert_eq!(sync.state(), SyncState::SeekingA);
        assert_eq!(sync.blocks_lost(), 0);
    }

    #[test]
    fn test_out_of_order_block_is_rejected() {
        let mut sync = locked_at_b(ResyncPolicy::Seek);
        assert_eq!(feed(&mut sync, encode_block(0x4142, BlockRole::D)), None);
        assert_eq!(sync.blocks_lost(), 1);
        assert_eq!(sync.state(), SyncState::SeekingA);
    }

    #[test]
    fn test_seek_policy_drops_lock_on_corrupt_b() {
        let mut sync = locked_at_b(ResyncPolicy::Seek);
        let corrupt = encode_block(0x0002, BlockRole::B) ^ 0x0100;
        assert_eq!(feed(&mut sync, corrupt), None);
        assert_eq!(sync.state(), SyncState::SeekingA);
        assert_eq!(sync.blocks_lost(), 1);
    }

    #[test]
    fn test_seek_policy_relocks_when_b_slot_holds_a() {
        let mut sync = locked_at_b(ResyncPolicy::Seek);
        let block = feed(&mut sync, encode_block(0x5678, BlockRole::A));
        assert_eq!(block.map(|b| b.data), Some(0x5678));
        assert_eq!(sync.state(), SyncState::ExpectingB);
        assert_eq!(sync.blocks_lost(), 1);
    }

    #[test]
    fn test_stall_policy_stays_at_b_on_corrupt_b() {
        let mut sync = locked_at_b(ResyncPolicy::Stall);
        let corrupt = encode_block(0x0002, BlockRole::B) ^ 0x0100;
        assert_eq!(feed(&mut sync, corrupt), None);
        assert_eq!(sync.state(), SyncState::ExpectingB);
        assert_eq!(sync.position(), 26);

        // The next properly aligned B block is missed: the counter is past 26.
        assert_eq!(feed(&mut sync, encode_block(0x0002, BlockRole::B)), None);
        assert_eq!(sync.state(), SyncState::ExpectingB);
        assert_eq!(sync.position(), 52);
    }

    #[test]
    fn test_stall_policy_rechecks_b_after_position_wraps() {
        let mut sync = locked_at_b(ResyncPolicy::Stall);
        let corrupt = encode_block(0x0002, BlockRole::B) ^ 0x0100;
        assert_eq!(feed(&mut sync, corrupt), None);
        assert_eq!(sync.blocks_lost(), 1);

        // 26 + 230 = 256, so the counter wraps to 0 on the last filler bit.
        for _ in 0..230 {
            assert_eq!(sync.push_bit(false), None);
        }
        assert_eq!(sync.position(), 0);

        let block = feed(&mut sync, encode_block(0x0002, BlockRole::B));
        assert_eq!(
            block,
            Some(Block {
                role: BlockRole::B,
                data: 0x0002
            })
        );
        assert_eq!(sync.state(), SyncState::ExpectingC);
        assert_eq!(sync.blocks_lost(), 1);
    }

    #[test]
    fn test_seek_policy_drops_lock_on_corrupt_c() {
        let mut sync = locked_at_b(ResyncPolicy::Seek);
        assert!(feed(&mut sync, encode_block(0x2015, BlockRole::B)).is_some());
        let corrupt = encode_block(0x4869, BlockRole::C) ^ 0x0100;
        assert_eq!(feed(&mut sync, corrupt), None);
        assert_eq!(sync.state(), SyncState::SeekingA);
        assert_eq!(sync.blocks_lost(), 1);
    }

    #[test]
    fn test_seek_policy_drops_lock_on_corrupt_d() {
        let mut sync = locked_at_b(ResyncPolicy::Seek);
        assert!(feed(&mut sync, encode_block(0x2015, BlockRole::B)).is_some());
        assert!(feed(&mut sync, encode_block(0x4869, BlockRole::C)).is_some());
        let corrupt = encode_block(0x2021, BlockRole::D) ^ 0x0100;
        assert_eq!(feed(&mut sync, corrupt), None);
        assert_eq!(sync.state(), SyncState::SeekingA);
        assert_eq!(sync.blocks_lost(), 1);
    }

    #[test]
    fn test_stall_policy_c_mismatch_falls_back_to_b() {
        let mut sync = locked_at_b(ResyncPolicy::Stall);
        assert!(feed(&mut sync, encode_block(0x2015, BlockRole::B)).is_some());
        assert_eq!(feed(&mut sync, encode_block(0x4869, BlockRole::D)), None);
        assert_eq!(sync.state(), SyncState::ExpectingB);
        assert_eq!(sync.position(), 0);
    }

    #[test]
    fn test_stall_policy_d_mismatch_falls_back_to_b() {
        let mut sync = locked_at_b(ResyncPolicy::Stall);
        assert!(feed(&mut sync, encode_block(0x2015, BlockRole::B)).is_some());
        assert!(feed(&mut sync, encode_block(0x4869, BlockRole::C)).is_some());
        assert_eq!(feed(&mut sync, encode_block(0x2021, BlockRole::A)), None);
        assert_eq!(sync.state(), SyncState::ExpectingB);
        assert_eq!(sync.position(), 0);
    }

    #[test]
    fn test_reset_returns_to_seeking() {
        let mut sync = locked_at_b(ResyncPolicy::Seek);
        let _ = sync.push_bit(true);
        sync.reset();
        assert_eq!(sync.state(), SyncState::SeekingA);
        assert_eq!(sync.position(), 0);
        assert_eq!(sync.window().bits(), 0);
    }
}
