//! RDS decoding core.
//!
//! [`RdsDecoder`] ties the pipeline together. Each call to
//! [`submit_bit()`](RdsDecoder::submit_bit) runs, synchronously and in bounded
//! time:
//!
//! ```text
//! BitWindow -> syndrome -> BlockSynchronizer -> GroupAssembler -> decode_group -> OutputStore
//! ```
//!
//! The decoder has no knowledge of pins, clocks or interrupts. It is an owned
//! value, so several decoders (one per tuned channel, say) can live side by
//! side. See [`crate::driver::RdsDriver`] for the pin-driven wrapper and
//! [`crate::clock`] for interrupt and polling helpers.
//!
//! ## Example
//!
//! ```rust
//! use bu1924::decoder::RdsDecoder;
//! use bu1924::encoding::group_bits;
//!
//! let mut decoder = RdsDecoder::new();
//! // PI 0x1234, group 0A segment 2, "AB"
//! for bit in group_bits(&[0x1234, 0x0002, 0xe0cd, 0x4142], false) {
//!     decoder.submit_bit(bit);
//! }
//! assert_eq!(&decoder.program_name()[4..6], b"AB");
//! ```

use crate::consts::{MESSAGE_TEXT_LEN, PROGRAM_NAME_LEN};
use crate::group::{Decoded, GroupAssembler, decode_group};
use crate::store::{OutputStore, TextVariant};
use crate::sync::{BlockSynchronizer, ResyncPolicy, SyncState};

/// Decoder options.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct RdsConfig {
    /// What to do when a block fails its check while locked.
    pub resync: ResyncPolicy,
    /// Decode version B radio text groups with the 2-character layout.
    ///
    /// Off by default: every type 2 group is then decoded as 4 characters
    /// from blocks C and D.
    pub version_b_text: bool,
}

/// Blind block synchronizer and group decoder for a clocked RDS bitstream.
#[derive(Debug, Clone)]
pub struct RdsDecoder {
    config: RdsConfig,
    sync: BlockSynchronizer,
    assembler: GroupAssembler,
    store: OutputStore,
    groups_decoded: u32,
    groups_ignored: u32,
}

impl RdsDecoder {
    /// Creates a decoder with the default [`RdsConfig`].
    pub const fn new() -> Self {
        Self::with_config(RdsConfig {
            resync: ResyncPolicy::Seek,
            version_b_text: false,
        })
    }

    /// Creates a decoder with the given configuration.
    pub const fn with_config(config: RdsConfig) -> Self {
        Self {
            config,
            sync: BlockSynchronizer::new(config.resync),
            assembler: GroupAssembler::new(),
            store: OutputStore::new(),
            groups_decoded: 0,
            groups_ignored: 0,
        }
    }

    /// The configuration this decoder was built with.
    pub fn config(&self) -> RdsConfig {
        self.config
    }

    /// Feeds one received bit through the whole pipeline.
    ///
    /// Call once per clock edge of the demodulator, oldest bit first.
    pub fn submit_bit(&mut self, bit: bool) {
        let Some(block) = self.sync.push_bit(bit) else {
            return;
        };
        let Some(group) = self.assembler.capture(block) else {
            return;
        };
        self.groups_decoded = self.groups_decoded.wrapping_add(1);
        match decode_group(&group, &mut self.store, self.config.version_b_text) {
            Decoded::ProgramName { segment } => {
                debug!("rds: program name segment {}", segment);
            }
            Decoded::MessageText { segment, short, .. } => {
                debug!("rds: radio text segment {} short {}", segment, short);
            }
            Decoded::Ignored { group_type } => {
                self.groups_ignored = self.groups_ignored.wrapping_add(1);
                trace!("rds: group type {} ignored", group_type);
            }
        }
    }

    /// Feeds several bits in order.
    pub fn submit_bits(&mut self, bits: impl IntoIterator<Item = bool>) {
        for bit in bits {
            self.submit_bit(bit);
        }
    }

    /// The live program service name.
    ///
    /// Segments are updated independently as groups arrive; there is no
    /// "complete" signal.
    pub fn program_name(&self) -> &[u8; PROGRAM_NAME_LEN] {
        self.store.program_name()
    }

    /// The radio text variant most recently written by a decoded group.
    pub fn message_text(&self) -> &[u8; MESSAGE_TEXT_LEN] {
        self.store.message_text()
    }

    /// The radio text buffer for an explicit variant.
    pub fn message_text_variant(&self, variant: TextVariant) -> &[u8; MESSAGE_TEXT_LEN] {
        self.store.message_text_variant(variant)
    }

    /// Variant returned by [`message_text()`](RdsDecoder::message_text).
    pub fn message_variant(&self) -> TextVariant {
        self.store.message_variant()
    }

    /// PI code of the last decoded program name or radio text group.
    pub fn program_id(&self) -> u16 {
        self.store.program_id()
    }

    /// Output buffers.
    pub fn store(&self) -> &OutputStore {
        &self.store
    }

    /// Printable program name.
    #[cfg(not(feature = "std"))]
    pub fn program_name_string(&self) -> heapless::String<PROGRAM_NAME_LEN> {
        self.store.program_name_string()
    }

    /// Printable program name.
    #[cfg(feature = "std")]
    pub fn program_name_string(&self) -> String {
        self.store.program_name_string()
    }

    /// Printable radio text, up to the end-of-message marker.
    #[cfg(not(feature = "std"))]
    pub fn message_text_string(&self) -> heapless::String<MESSAGE_TEXT_LEN> {
        self.store.message_text_string()
    }

    /// Printable radio text, up to the end-of-message marker.
    #[cfg(feature = "std")]
    pub fn message_text_string(&self) -> String {
        self.store.message_text_string()
    }

    /// Synchronizer state.
    pub fn state(&self) -> SyncState {
        self.sync.state()
    }

    /// Bits received since the last block boundary.
    pub fn position(&self) -> u8 {
        self.sync.position()
    }

    /// Complete groups seen, of any type.
    pub fn groups_decoded(&self) -> u32 {
        self.groups_decoded
    }

    /// Complete groups of an unsupported type.
    pub fn groups_ignored(&self) -> u32 {
        self.groups_ignored
    }

    /// Boundary checks failed while locked.
    pub fn blocks_lost(&self) -> u32 {
        self.sync.blocks_lost()
    }

    /// Zeroes the program name and both radio text buffers and restarts the
    /// search for an A block, whatever the current state.
    pub fn reset(&mut self) {
        debug!("rds: reset");
        self.store.clear();
        self.sync.reset();
        self.assembler.reset();
    }
}

impl Default for RdsDecoder {
    fn default() -> Self {
        Self::new()
    }
}
