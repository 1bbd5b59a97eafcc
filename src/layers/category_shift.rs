//! Layer 1: category-tagged cyclic shift.
//!
//! Every input character is classified (vowel, consonant, digit, symbol),
//! shifted forward inside the printable alphabet by its category's amount,
//! and emitted as a two-character unit: the category tag followed by the
//! shifted character. The tag makes decryption unambiguous, so the layer
//! needs no state beyond its shift table.

use std::fmt;

use serde::Serialize;
use tracing::trace;

use super::{Direction, Layer, LayerOutput, LayerTrace, TraceStep};
use crate::alphabet::PrintableAlphabet;

const VOWELS: &str = "AEIOUaeiou";

/// Character class driving the shift amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Vowel,
    Consonant,
    Digit,
    Symbol,
}

impl Category {
    /// All categories in tag order.
    pub const ALL: [Category; 4] = [
        Category::Vowel,
        Category::Consonant,
        Category::Digit,
        Category::Symbol,
    ];

    /// Classifies a character. Total: every char gets exactly one category.
    ///
    /// Vowel membership is checked first, then ASCII letters, then digits;
    /// everything else (space and punctuation included) is a symbol.
    pub fn classify(ch: char) -> Self {
        if VOWELS.contains(ch) {
            Category::Vowel
        } else if ch.is_ascii_alphabetic() {
            Category::Consonant
        } else if ch.is_ascii_digit() {
            Category::Digit
        } else {
            Category::Symbol
        }
    }

    /// Single-character tag written ahead of each shifted character.
    pub fn tag(self) -> char {
        match self {
            Category::Vowel => 'V',
            Category::Consonant => 'C',
            Category::Digit => 'D',
            Category::Symbol => 'S',
        }
    }

    /// Reverse of [`tag`](Self::tag).
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'V' => Some(Category::Vowel),
            'C' => Some(Category::Consonant),
            'D' => Some(Category::Digit),
            'S' => Some(Category::Symbol),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Vowel => "Vowel",
            Category::Consonant => "Consonant",
            Category::Digit => "Digit",
            Category::Symbol => "Symbol",
        };
        f.write_str(name)
    }
}

/// Shift amount per category. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftTable {
    vowel: u8,
    consonant: u8,
    digit: u8,
    symbol: u8,
}

impl ShiftTable {
    /// The standard table: vowels 5, consonants 3, digits 2, symbols 1.
    pub const STANDARD: ShiftTable = ShiftTable {
        vowel: 5,
        consonant: 3,
        digit: 2,
        symbol: 1,
    };

    /// Shift applied to characters of `category`.
    pub fn shift(&self, category: Category) -> u8 {
        match category {
            Category::Vowel => self.vowel,
            Category::Consonant => self.consonant,
            Category::Digit => self.digit,
            Category::Symbol => self.symbol,
        }
    }
}

impl Default for ShiftTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Layer 1 output element: category tag + shifted character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedUnit {
    pub tag: char,
    pub symbol: char,
}

impl fmt::Display for TaggedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tag, self.symbol)
    }
}

/// Trace record for one character (encrypt) or one unit (decrypt).
///
/// `category` is absent when decryption met a unit it could not interpret
/// (unknown tag, or a stray trailing character) and copied it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftStep {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub shift: u8,
    pub output: String,
}

/// Layer 1.
#[derive(Debug, Clone, Default)]
pub struct CategoryShift {
    alphabet: PrintableAlphabet,
    shifts: ShiftTable,
}

impl CategoryShift {
    /// Creates the layer with the standard shift table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shift table in use.
    pub fn shifts(&self) -> &ShiftTable {
        &self.shifts
    }

    /// Classifies and shifts one character.
    ///
    /// Classification sees the original character; out of range characters
    /// are folded into the alphabet before shifting.
    pub fn encrypt_char(&self, ch: char) -> TaggedUnit {
        let category = Category::classify(ch);
        let shift = self.shifts.shift(category);
        TaggedUnit {
            tag: category.tag(),
            symbol: self.alphabet.shift(ch, i64::from(shift)),
        }
    }

    /// Recovers the original character from a tagged unit.
    ///
    /// Returns `None` when the tag is not one of `V`, `C`, `D`, `S`.
    pub fn decrypt_unit(&self, unit: TaggedUnit) -> Option<char> {
        let category = Category::from_tag(unit.tag)?;
        let shift = self.shifts.shift(category);
        Some(self.alphabet.shift(unit.symbol, -i64::from(shift)))
    }
}

impl Layer for CategoryShift {
    fn name(&self) -> &'static str {
        "Layer 1: Category Shift"
    }

    fn encrypt(&self, text: &str) -> LayerOutput {
        let mut output = String::with_capacity(text.len() * 2);
        let mut steps = Vec::with_capacity(text.len());

        for ch in text.chars() {
            let category = Category::classify(ch);
            let unit = self.encrypt_char(ch);
            output.push(unit.tag);
            output.push(unit.symbol);
            steps.push(TraceStep::Shift(ShiftStep {
                input: ch.to_string(),
                category: Some(category),
                shift: self.shifts.shift(category),
                output: unit.to_string(),
            }));
        }

        trace!(units = steps.len(), "category shift applied");
        LayerOutput {
            text: output,
            trace: LayerTrace::Steps(steps),
        }
    }

    fn decrypt(&self, text: &str) -> LayerOutput {
        let mut output = String::with_capacity(text.len() / 2 + 1);
        let mut steps = Vec::with_capacity(text.len() / 2 + 1);
        let mut chars = text.chars();

        while let Some(tag) = chars.next() {
            let Some(symbol) = chars.next() else {
                // Odd length: the trailing tag has no partner, keep it as is
                output.push(tag);
                steps.push(TraceStep::Shift(ShiftStep {
                    input: tag.to_string(),
                    category: None,
                    shift: 0,
                    output: tag.to_string(),
                }));
                break;
            };

            let unit = TaggedUnit { tag, symbol };
            let step = match self.decrypt_unit(unit) {
                Some(plain) => {
                    output.push(plain);
                    let category = Category::from_tag(tag);
                    ShiftStep {
                        input: unit.to_string(),
                        category,
                        shift: category.map_or(0, |c| self.shifts.shift(c)),
                        output: plain.to_string(),
                    }
                }
                None => {
                    output.push(tag);
                    output.push(symbol);
                    ShiftStep {
                        input: unit.to_string(),
                        category: None,
                        shift: 0,
                        output: unit.to_string(),
                    }
                }
            };
            steps.push(TraceStep::Shift(step));
        }

        trace!(units = steps.len(), "category shift reversed");
        LayerOutput {
            text: output,
            trace: LayerTrace::Steps(steps),
        }
    }

    fn formula(&self, direction: Direction) -> Option<String> {
        let s = self.shifts();
        let sign = match direction {
            Direction::Encrypt => '+',
            Direction::Decrypt => '-',
        };
        Some(format!(
            "V{sign}{} C{sign}{} D{sign}{} S{sign}{} (mod {})",
            s.vowel,
            s.consonant,
            s.digit,
            s.symbol,
            self.alphabet.size()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> CategoryShift {
        CategoryShift::new()
    }

    #[test]
    fn test_classify() {
        assert_eq!(Category::classify('a'), Category::Vowel);
        assert_eq!(Category::classify('U'), Category::Vowel);
        assert_eq!(Category::classify('H'), Category::Consonant);
        assert_eq!(Category::classify('y'), Category::Consonant);
        assert_eq!(Category::classify('7'), Category::Digit);
        assert_eq!(Category::classify(' '), Category::Symbol);
        assert_eq!(Category::classify('!'), Category::Symbol);
        assert_eq!(Category::classify('é'), Category::Symbol);
    }

    #[test]
    fn test_classify_printable_counts() {
        let alphabet = PrintableAlphabet;
        let mut counts = [0usize; 4];
        for ch in alphabet.chars() {
            let idx = Category::ALL
                .iter()
                .position(|c| *c == Category::classify(ch))
                .unwrap();
            counts[idx] += 1;
        }
        // 10 vowels, 42 consonants, 10 digits, 33 symbols
        assert_eq!(counts, [10, 42, 10, 33]);
        assert_eq!(counts.iter().sum::<usize>(), 95);
    }

    #[test]
    fn test_tags_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_tag(category.tag()), Some(category));
        }
        assert_eq!(Category::from_tag('X'), None);
    }

    #[test]
    fn test_encrypt_char() {
        let l = layer();
        assert_eq!(l.encrypt_char('H').to_string(), "CK");
        assert_eq!(l.encrypt_char('i').to_string(), "Vn");
        assert_eq!(l.encrypt_char('!').to_string(), "S\"");
        assert_eq!(l.encrypt_char('9').to_string(), "D;");
        // wraps past the end of the alphabet
        assert_eq!(l.encrypt_char('~').to_string(), "S ");
    }

    #[test]
    fn test_encrypt_doubles_length() {
        let out = layer().encrypt("Hi!");
        assert_eq!(out.text, "CKVnS\"");
        assert_eq!(out.trace.len(), 3);
    }

    #[test]
    fn test_encrypt_trace() {
        let out = layer().encrypt("i");
        let LayerTrace::Steps(steps) = out.trace else {
            panic!("expected steps");
        };
        assert_eq!(
            steps[0],
            TraceStep::Shift(ShiftStep {
                input: "i".to_string(),
                category: Some(Category::Vowel),
                shift: 5,
                output: "Vn".to_string(),
            })
        );
    }

    #[test]
    fn test_decrypt() {
        let out = layer().decrypt("CKVnS\"");
        assert_eq!(out.text, "Hi!");
    }

    #[test]
    fn test_round_trip_full_alphabet() {
        let l = layer();
        let text: String = PrintableAlphabet.chars().collect();
        let encrypted = l.encrypt(&text);
        assert_eq!(l.decrypt(&encrypted.text).text, text);
    }

    #[test]
    fn test_decrypt_is_unambiguous_where_untagged_shift_is_not() {
        // 'e' (vowel, +5) and 'g' (consonant, +3) both land on 'j'
        let l = layer();
        assert_eq!(l.encrypt_char('e').symbol, 'j');
        assert_eq!(l.encrypt_char('g').symbol, 'j');
        assert_eq!(l.decrypt("Vj").text, "e");
        assert_eq!(l.decrypt("Cj").text, "g");
    }

    #[test]
    fn test_decrypt_stray_tag() {
        let out = layer().decrypt("CKV");
        assert_eq!(out.text, "HV");
        let LayerTrace::Steps(steps) = out.trace else {
            panic!("expected steps");
        };
        assert_eq!(steps.len(), 2);
        assert_eq!(
            steps[1],
            TraceStep::Shift(ShiftStep {
                input: "V".to_string(),
                category: None,
                shift: 0,
                output: "V".to_string(),
            })
        );
    }

    #[test]
    fn test_decrypt_unknown_tag_copied() {
        let out = layer().decrypt("XyCK");
        assert_eq!(out.text, "XyH");
    }

    #[test]
    fn test_empty() {
        let l = layer();
        let out = l.encrypt("");
        assert!(out.text.is_empty());
        assert!(out.trace.is_empty());
        assert!(l.decrypt("").text.is_empty());
    }

    #[test]
    fn test_never_rejects_non_printable() {
        let out = layer().encrypt("a\nb");
        assert_eq!(out.text.chars().count(), 6);
        assert!(out.text.chars().all(|c| PrintableAlphabet.contains(c)));
    }

    #[test]
    fn test_standard_shift_table() {
        let l = layer();
        assert_eq!(*l.shifts(), ShiftTable::STANDARD);
        let amounts: Vec<u8> = Category::ALL.iter().map(|c| l.shifts().shift(*c)).collect();
        assert_eq!(amounts, vec![5, 3, 2, 1]);
    }

    #[test]
    fn test_formula() {
        assert_eq!(
            layer().formula(Direction::Encrypt).unwrap(),
            "V+5 C+3 D+2 S+1 (mod 95)"
        );
        assert_eq!(
            layer().formula(Direction::Decrypt).unwrap(),
            "V-5 C-3 D-2 S-1 (mod 95)"
        );
    }
}
