//! Error types for CipherMesh.
//!
//! Construction problems and alphabet violations are kept apart so callers
//! can tell a bad configuration (fatal, fix the parameters) from bad input
//! (reject the payload, keep the pipeline).

use thiserror::Error;

/// Raised while building a layer or pipeline from parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The affine multiplier has no inverse modulo the alphabet size.
    #[error("Multiplier {a} is not invertible modulo {m} (gcd must be 1)")]
    NonInvertibleMultiplier {
        /// Multiplier as supplied.
        a: i64,
        /// Alphabet size.
        m: i64,
    },

    /// Block reversal needs at least one character per block.
    #[error("Block size must be at least 1, got {0}")]
    InvalidBlockSize(usize),
}

/// Raised when input falls outside the printable alphabet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Character {character:?} at position {position} is outside the printable alphabet")]
    OutOfAlphabet {
        /// The offending character.
        character: char,
        /// Character (not byte) offset within the input.
        position: usize,
    },
}

/// Errors returned by the pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}
