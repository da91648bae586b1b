//! Decoded output buffers.
//!
//! The program service name and the two radio text buffers are plain byte
//! arrays that the group decoder overwrites one segment at a time. There is no
//! completion flag: a reader sees whatever segments have arrived so far, and
//! may see segments from different transmissions side by side.

use crate::consts::{
    MESSAGE_TEXT_END, MESSAGE_TEXT_LEN, MESSAGE_TEXT_SEGMENTS, PROGRAM_NAME_LEN,
    PROGRAM_NAME_SEGMENTS,
};

/// Selects one of the two independent radio text buffers (the text A/B flag
/// carried in bit 4 of block B).
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum TextVariant {
    /// Flag cleared
    #[default]
    Zero,
    /// Flag set
    One,
}

impl TextVariant {
    /// Variant selected by a flag bit.
    pub const fn from_flag(flag: bool) -> Self {
        if flag { TextVariant::One } else { TextVariant::Zero }
    }

    const fn index(self) -> usize {
        match self {
            TextVariant::Zero => 0,
            TextVariant::One => 1,
        }
    }
}

/// Program name and radio text buffers plus the last seen PI code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputStore {
    program_id: u16,
    program_name: [u8; PROGRAM_NAME_LEN],
    message_text: [[u8; MESSAGE_TEXT_LEN]; 2],
    variant: TextVariant,
}

impl OutputStore {
    /// Creates a store with every buffer zeroed.
    pub const fn new() -> Self {
        Self {
            program_id: 0,
            program_name: [0; PROGRAM_NAME_LEN],
            message_text: [[0; MESSAGE_TEXT_LEN]; 2],
            variant: TextVariant::Zero,
        }
    }

    /// PI code recorded by the last decoded program name or radio text group.
    pub fn program_id(&self) -> u16 {
        self.program_id
    }

    /// The live 8-byte program service name.
    pub fn program_name(&self) -> &[u8; PROGRAM_NAME_LEN] {
        &self.program_name
    }

    /// The radio text buffer most recently selected by a decoded group.
    pub fn message_text(&self) -> &[u8; MESSAGE_TEXT_LEN] {
        self.message_text_variant(self.variant)
    }

    /// The radio text buffer for an explicit variant.
    pub fn message_text_variant(&self, variant: TextVariant) -> &[u8; MESSAGE_TEXT_LEN] {
        &self.message_text[variant.index()]
    }

    /// Variant most recently selected by a decoded group.
    pub fn message_variant(&self) -> TextVariant {
        self.variant
    }

    /// Records the PI code of a decoded group.
    pub fn set_program_id(&mut self, program_id: u16) {
        self.program_id = program_id;
    }

    /// Writes the two characters of `word` (high byte first) into program name
    /// segment `segment` (0–3, higher bits ignored).
    pub fn write_program_name(&mut self, segment: u8, word: u16) {
        let offset = (usize::from(segment) % PROGRAM_NAME_SEGMENTS) * 2;
        self.program_name[offset..offset + 2].copy_from_slice(&word.to_be_bytes());
    }

    /// Writes four characters (`first` then `second`, high bytes first) into
    /// radio text segment `segment` (0–15) of `variant`, and selects `variant`
    /// as the current one.
    pub fn write_message_text(
        &mut self,
        variant: TextVariant,
        segment: u8,
        first: u16,
        second: u16,
    ) {
        let offset = (usize::from(segment) % MESSAGE_TEXT_SEGMENTS) * 4;
        let text = &mut self.message_text[variant.index()];
        text[offset..offset + 2].copy_from_slice(&first.to_be_bytes());
        text[offset + 2..offset + 4].copy_from_slice(&second.to_be_bytes());
        self.variant = variant;
    }

    /// Writes two characters into 2-character radio text segment `segment`
    /// (0–15, filling the first 32 bytes) of `variant`, and selects `variant`.
    pub fn write_message_text_short(&mut self, variant: TextVariant, segment: u8, word: u16) {
        let offset = (usize::from(segment) % MESSAGE_TEXT_SEGMENTS) * 2;
        self.message_text[variant.index()][offset..offset + 2]
            .copy_from_slice(&word.to_be_bytes());
        self.variant = variant;
    }

    /// Zeroes the program name and both radio text buffers.
    pub fn clear(&mut self) {
        self.program_name = [0; PROGRAM_NAME_LEN];
        self.message_text = [[0; MESSAGE_TEXT_LEN]; 2];
    }

    /// Printable form of the program name. See [`printable`].
    #[cfg(not(feature = "std"))]
    pub fn program_name_string(&self) -> heapless::String<PROGRAM_NAME_LEN> {
        collect_heapless(printable(&self.program_name))
    }

    /// Printable form of the program name. See [`printable`].
    #[cfg(feature = "std")]
    pub fn program_name_string(&self) -> String {
        printable(&self.program_name).collect()
    }

    /// Printable form of the current radio text. See [`printable`].
    #[cfg(not(feature = "std"))]
    pub fn message_text_string(&self) -> heapless::String<MESSAGE_TEXT_LEN> {
        collect_heapless(printable(self.message_text()))
    }

    /// Printable form of the current radio text. See [`printable`].
    #[cfg(feature = "std")]
    pub fn message_text_string(&self) -> String {
        printable(self.message_text()).collect()
    }
}

impl Default for OutputStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders a received buffer as text.
///
/// Stops at the carriage return that terminates a radio text message.
/// Never-written bytes (NUL) become spaces, anything outside printable ASCII
/// becomes `?`.
pub fn printable(bytes: &[u8]) -> impl Iterator<Item = char> + '_ {
    bytes
        .iter()
        .take_while(|&&b| b != MESSAGE_TEXT_END)
        .map(|&b| match b {
            0 => ' ',
            0x20..=0x7e => char::from(b),
            _ => '?',
        })
}

#[cfg(not(feature = "std"))]
fn collect_heapless<const N: usize>(chars: impl Iterator<Item = char>) -> heapless::String<N> {
    let mut text = heapless::String::new();
    for c in chars {
        // at most N single-byte chars
        let _ = text.push(c);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_zeroed() {
        let store = OutputStore::new();
        assert_eq!(store.program_name(), &[0; 8]);
        assert_eq!(store.message_text(), &[0; 64]);
        assert_eq!(store.message_variant(), TextVariant::Zero);
        assert_eq!(store.program_id(), 0);
    }

    #[test]
    fn test_program_name_segments() {
        let mut store = OutputStore::new();
        store.write_program_name(2, u16::from_be_bytes(*b"AB"));
        assert_eq!(store.program_name(), b"\0\0\0\0AB\0\0");
        store.write_program_name(0, u16::from_be_bytes(*b"RA"));
        assert_eq!(store.program_name(), b"RA\0\0AB\0\0");
    }

    #[test]
    fn test_message_text_variants_are_independent() {
        let mut store = OutputStore::new();
        store.write_message_text(
            TextVariant::One,
            5,
            u16::from_be_bytes(*b"Hi"),
            u16::from_be_bytes(*b" !"),
        );
        assert_eq!(store.message_variant(), TextVariant::One);
        assert_eq!(&store.message_text()[20..24], b"Hi !");
        assert_eq!(store.message_text_variant(TextVariant::Zero), &[0; 64]);

        store.write_message_text(TextVariant::Zero, 0, 0x4142, 0x4344);
        assert_eq!(store.message_variant(), TextVariant::Zero);
        assert_eq!(&store.message_text()[..4], b"ABCD");
        assert_eq!(&store.message_text_variant(TextVariant::One)[20..24], b"Hi !");
    }

    #[test]
    fn test_short_message_text() {
        let mut store = OutputStore::new();
        store.write_message_text_short(TextVariant::Zero, 15, 0x4f4b);
        assert_eq!(&store.message_text()[30..32], b"OK");
        assert!(store.message_text()[32..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_clear_keeps_program_id() {
        let mut store = OutputStore::new();
        store.set_program_id(0xc201);
        store.write_program_name(1, 0x4142);
        store.write_message_text(TextVariant::One, 0, 0x4142, 0x4344);
        store.clear();
        assert_eq!(store.program_name(), &[0; 8]);
        assert_eq!(store.message_text_variant(TextVariant::Zero), &[0; 64]);
        assert_eq!(store.message_text_variant(TextVariant::One), &[0; 64]);
        assert_eq!(store.program_id(), 0xc201);
    }

    #[test]
    fn test_printable_text() {
        let mut store = OutputStore::new();
        store.write_program_name(0, u16::from_be_bytes(*b"FM"));
        store.write_program_name(1, 0xe941);
        assert_eq!(store.program_name_string(), "FM?A    ");

        store.write_message_text(TextVariant::Zero, 0, u16::from_be_bytes(*b"He"), 0x0d00);
        assert_eq!(store.message_text_string(), "He");
    }
}
