//! The printable alphabet shared by every layer.
//!
//! Symbols are the 95 characters from `' '` (32) to `'~'` (126). Indices run
//! from 0 to 94 and all arithmetic on them is modulo 95.

use crate::error::DomainError;
use crate::{ALPHABET_SIZE, ALPHABET_START};

const LAST_CODEPOINT: u32 = ALPHABET_START + ALPHABET_SIZE - 1;

/// Index <-> character mapping over the printable range.
///
/// Zero-sized: all instances are identical, so layers hold one by value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintableAlphabet;

impl PrintableAlphabet {
    /// Number of symbols in the alphabet.
    pub const fn size(&self) -> u32 {
        ALPHABET_SIZE
    }

    /// Whether `ch` belongs to the alphabet.
    pub fn contains(&self, ch: char) -> bool {
        (ALPHABET_START..=LAST_CODEPOINT).contains(&u32::from(ch))
    }

    /// Maps a character to its 0..=94 offset, rejecting anything out of range.
    pub fn to_index(&self, ch: char) -> Result<u8, DomainError> {
        self.to_index_at(ch, 0)
    }

    /// Same as [`to_index`](Self::to_index), reporting `position` on failure.
    pub fn to_index_at(&self, ch: char, position: usize) -> Result<u8, DomainError> {
        if self.contains(ch) {
            Ok((u32::from(ch) - ALPHABET_START) as u8)
        } else {
            Err(DomainError::OutOfAlphabet {
                character: ch,
                position,
            })
        }
    }

    /// Maps any character into 0..=94 by Euclidean remainder.
    ///
    /// Identical to [`to_index`](Self::to_index) for printable input. Out of
    /// range characters are folded back in, which is lossy: `'\n'` and `'i'`
    /// share an index.
    pub fn fold_index(&self, ch: char) -> u8 {
        let offset = i64::from(u32::from(ch)) - i64::from(ALPHABET_START);
        offset.rem_euclid(i64::from(self.size())) as u8
    }

    /// Maps any integer onto a printable character, wrapping in both directions.
    pub fn from_index(&self, index: i64) -> char {
        let offset = index.rem_euclid(i64::from(self.size())) as u32;
        // offset < 95, so the codepoint is always within 32..=126
        char::from_u32(ALPHABET_START + offset).unwrap_or(' ')
    }

    /// Moves `ch` by `delta` positions, folding it into range first.
    pub fn shift(&self, ch: char, delta: i64) -> char {
        self.from_index(i64::from(self.fold_index(ch)) + delta)
    }

    /// Iterates over all symbols in index order.
    pub fn chars(&self) -> impl Iterator<Item = char> {
        (ALPHABET_START..=LAST_CODEPOINT).filter_map(char::from_u32)
    }

    /// Finds the first character outside the alphabet, with its position.
    pub fn validate(&self, text: &str) -> Result<(), DomainError> {
        for (position, ch) in text.chars().enumerate() {
            self.to_index_at(ch, position)?;
        }
        Ok(())
    }
}
