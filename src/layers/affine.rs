//! Layer 2: affine substitution over alphabet indices.
//!
//! `f(x) = (a·x + b) mod 95`, reversed by `f⁻¹(y) = (a⁻¹·(y − b)) mod 95`.
//! The map is a bijection exactly when `a` is a unit modulo 95, i.e. not a
//! multiple of 5 or 19; construction refuses anything else.

use serde::Serialize;
use tracing::trace;

use super::{Direction, Layer, LayerOutput, LayerTrace, TraceStep};
use crate::alphabet::PrintableAlphabet;
use crate::error::ConfigurationError;
use crate::{DEFAULT_INCREMENT, DEFAULT_MULTIPLIER};

/// `DEFAULT_MULTIPLIER⁻¹ mod 95`: 3 × 32 = 96 ≡ 1.
const DEFAULT_INVERSE: i64 = 32;

/// Trace record for one substituted character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AffineStep {
    pub input: char,
    pub input_index: u8,
    pub output: char,
    pub output_index: u8,
    pub formula: String,
}

/// Layer 2. Parameters are normalised into `0..95` and never change.
#[derive(Debug, Clone)]
pub struct AffineSubstitution {
    alphabet: PrintableAlphabet,
    a: i64,
    b: i64,
    a_inv: i64,
    m: i64,
}

impl AffineSubstitution {
    /// Builds the layer, precomputing `a⁻¹ mod 95`.
    ///
    /// Fails with [`ConfigurationError::NonInvertibleMultiplier`] when
    /// `gcd(a, 95) != 1`. Negative or oversized `a` and `b` are reduced
    /// modulo 95 first.
    pub fn new(a: i64, b: i64) -> Result<Self, ConfigurationError> {
        let alphabet = PrintableAlphabet;
        let m = i64::from(alphabet.size());
        let reduced = a.rem_euclid(m);

        if gcd(reduced, m) != 1 {
            return Err(ConfigurationError::NonInvertibleMultiplier { a, m });
        }

        let a_inv = mod_inverse(reduced, m)
            .ok_or(ConfigurationError::NonInvertibleMultiplier { a, m })?;

        Ok(Self {
            alphabet,
            a: reduced,
            b: b.rem_euclid(m),
            a_inv,
            m,
        })
    }

    /// Multiplier `a` (reduced).
    pub fn multiplier(&self) -> i64 {
        self.a
    }

    /// Increment `b` (reduced).
    pub fn increment(&self) -> i64 {
        self.b
    }

    /// Precomputed `a⁻¹ mod m`.
    pub fn inverse(&self) -> i64 {
        self.a_inv
    }

    /// Modulus (alphabet size).
    pub fn modulus(&self) -> i64 {
        self.m
    }

    /// Forward map on an index in `0..m`.
    pub fn encrypt_index(&self, x: u8) -> u8 {
        ((self.a * i64::from(x) + self.b).rem_euclid(self.m)) as u8
    }

    /// Inverse map on an index in `0..m`. The subtraction can go negative,
    /// so the result is reduced with Euclidean remainder.
    pub fn decrypt_index(&self, y: u8) -> u8 {
        ((self.a_inv * (i64::from(y) - self.b)).rem_euclid(self.m)) as u8
    }

    /// Substitutes one character.
    pub fn encrypt_char(&self, ch: char) -> char {
        let y = self.encrypt_index(self.alphabet.fold_index(ch));
        self.alphabet.from_index(i64::from(y))
    }

    /// Reverses [`encrypt_char`](Self::encrypt_char).
    pub fn decrypt_char(&self, ch: char) -> char {
        let x = self.decrypt_index(self.alphabet.fold_index(ch));
        self.alphabet.from_index(i64::from(x))
    }

    fn map(&self, text: &str, direction: Direction) -> LayerOutput {
        let mut output = String::with_capacity(text.len());
        let mut steps = Vec::with_capacity(text.len());

        for ch in text.chars() {
            let input_index = self.alphabet.fold_index(ch);
            let (output_index, formula) = match direction {
                Direction::Encrypt => {
                    let y = self.encrypt_index(input_index);
                    let formula = format!(
                        "({}×{}+{}) mod {} = {}",
                        self.a, input_index, self.b, self.m, y
                    );
                    (y, formula)
                }
                Direction::Decrypt => {
                    let x = self.decrypt_index(input_index);
                    let formula = format!(
                        "f⁻¹({}) = ({}×({}-{})) mod {} = {}",
                        input_index, self.a_inv, input_index, self.b, self.m, x
                    );
                    (x, formula)
                }
            };
            let out = self.alphabet.from_index(i64::from(output_index));
            output.push(out);
            steps.push(TraceStep::Affine(AffineStep {
                input: ch,
                input_index,
                output: out,
                output_index,
                formula,
            }));
        }

        trace!(chars = steps.len(), ?direction, "affine substitution");
        LayerOutput {
            text: output,
            trace: LayerTrace::Steps(steps),
        }
    }
}

impl Default for AffineSubstitution {
    fn default() -> Self {
        let alphabet = PrintableAlphabet;
        Self {
            alphabet,
            a: DEFAULT_MULTIPLIER,
            b: DEFAULT_INCREMENT,
            a_inv: DEFAULT_INVERSE,
            m: i64::from(alphabet.size()),
        }
    }
}

impl Layer for AffineSubstitution {
    fn name(&self) -> &'static str {
        "Layer 2: Affine Substitution"
    }

    fn encrypt(&self, text: &str) -> LayerOutput {
        self.map(text, Direction::Encrypt)
    }

    fn decrypt(&self, text: &str) -> LayerOutput {
        self.map(text, Direction::Decrypt)
    }

    fn formula(&self, direction: Direction) -> Option<String> {
        Some(match direction {
            Direction::Encrypt => format!("f(x) = ({}x + {}) mod {}", self.a, self.b, self.m),
            Direction::Decrypt => format!(
                "f⁻¹(y) = ({}×(y-{})) mod {}",
                self.a_inv, self.b, self.m
            ),
        })
    }
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.abs()
}

/// Exhaustive search over `1..m`; `m` is small.
fn mod_inverse(a: i64, m: i64) -> Option<i64> {
    (1..m).find(|x| (a * x) % m == 1)
}
