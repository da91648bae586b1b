//! Group assembly and decoding.
//!
//! Four consecutive blocks (A, B, C or C′, D) make one group. The group type in
//! the top four bits of block B decides what blocks C and D carry. Only two
//! group types are interpreted here:
//!
//! | type   | content                  | segment field  | characters     |
//! |--------|--------------------------|----------------|----------------|
//! | 0, 15  | program service name     | B bits 0–1     | 2 from D       |
//! | 2      | radio text               | B bits 0–3     | 4 from C and D |
//!
//! Every other group type is assembled and then dropped without touching the
//! output buffers.

use crate::consts::{
    BLOCKS_PER_GROUP, GROUP_TYPE_FAST_PROGRAM_NAME, GROUP_TYPE_MESSAGE_TEXT,
    GROUP_TYPE_PROGRAM_NAME,
};
use crate::store::{OutputStore, TextVariant};
use crate::sync::Block;
use crate::syndrome::BlockRole;

/// The four data words of one complete group.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Group {
    /// Data words indexed by slot: A, B, C/C′, D
    pub words: [u16; BLOCKS_PER_GROUP],
}

impl Group {
    /// PI code (block A).
    pub fn program_id(&self) -> u16 {
        self.words[0]
    }

    /// Group type, 0–15 (block B bits 12–15).
    pub fn group_type(&self) -> u8 {
        (self.words[1] >> 12) as u8
    }

    /// `true` for a version B group (block B bit 11).
    pub fn is_version_b(&self) -> bool {
        self.words[1] & 0x0800 != 0
    }

    /// Program name segment address, 0–3.
    pub fn program_name_segment(&self) -> u8 {
        (self.words[1] & 0x03) as u8
    }

    /// Radio text segment address, 0–15.
    pub fn message_text_segment(&self) -> u8 {
        (self.words[1] & 0x0f) as u8
    }

    /// Radio text buffer selected by the text A/B flag (block B bit 4).
    pub fn message_text_variant(&self) -> TextVariant {
        TextVariant::from_flag(self.words[1] & 0x10 != 0)
    }
}

/// Collects blocks into groups.
///
/// Words are kept between groups and only overwritten, so slots from an
/// earlier group stay readable until replaced.
#[derive(Debug, Default, Clone)]
pub struct GroupAssembler {
    words: [u16; BLOCKS_PER_GROUP],
    /// One bit per slot captured since the last A block
    filled: u8,
}

impl GroupAssembler {
    const COMPLETE: u8 = 0b1111;

    /// Creates an empty assembler.
    pub const fn new() -> Self {
        Self {
            words: [0; BLOCKS_PER_GROUP],
            filled: 0,
        }
    }

    /// Stores `block` in its slot.
    ///
    /// An A block starts a new group. A D block completes it, and the group
    /// is returned if every slot was captured since that A block.
    pub fn capture(&mut self, block: Block) -> Option<Group> {
        let slot = block.role.slot();
        self.words[slot] = block.data;
        if block.role == BlockRole::A {
            self.filled = 1;
            return None;
        }
        self.filled |= 1 << slot;
        if block.role != BlockRole::D {
            return None;
        }
        let complete = self.filled == Self::COMPLETE;
        self.filled = 0;
        complete.then_some(Group { words: self.words })
    }

    /// Last captured word of every slot.
    pub fn words(&self) -> &[u16; BLOCKS_PER_GROUP] {
        &self.words
    }

    /// Forgets the group in progress.
    pub fn reset(&mut self) {
        self.filled = 0;
    }
}

/// What [`decode_group`] did with a group.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Decoded {
    /// Two program name characters were written.
    ProgramName {
        /// Segment address, 0–3
        segment: u8,
    },
    /// Radio text characters were written.
    MessageText {
        /// Buffer written
        variant: TextVariant,
        /// Segment address, 0–15
        segment: u8,
        /// `true` for the 2-character version B layout
        short: bool,
    },
    /// Unsupported group type; nothing was written.
    Ignored {
        /// The group type
        group_type: u8,
    },
}

/// Applies one group to the output buffers.
///
/// `version_b_text` enables the 2-character radio text layout for version B
/// groups. When it is off, every type 2 group is decoded with the 4-character
/// layout.
pub fn decode_group(group: &Group, store: &mut OutputStore, version_b_text: bool) -> Decoded {
    match group.group_type() {
        GROUP_TYPE_PROGRAM_NAME | GROUP_TYPE_FAST_PROGRAM_NAME => {
            store.set_program_id(group.program_id());
            let segment = group.program_name_segment();
            store.write_program_name(segment, group.words[3]);
            Decoded::ProgramName { segment }
        }
        GROUP_TYPE_MESSAGE_TEXT => {
            store.set_program_id(group.program_id());
            let segment = group.message_text_segment();
            let variant = group.message_text_variant();
            let short = version_b_text && group.is_version_b();
            if short {
                store.write_message_text_short(variant, segment, group.words[3]);
            } else {
                store.write_message_text(variant, segment, group.words[2], group.words[3]);
            }
            Decoded::MessageText {
                variant,
                segment,
                short,
            }
        }
        group_type => Decoded::Ignored { group_type },
    }
}
