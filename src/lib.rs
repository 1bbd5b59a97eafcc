//! # CipherMesh - layered reversible text transformation
//!
//! CipherMesh pushes printable text through three deterministic, invertible
//! layers and can undo them in reverse order to recover the input exactly.
//! It exists to demonstrate layered encoding; it is NOT a secure cipher
//! (every parameter is a small public constant).
//!
//! ## Layers
//!
//! ```text
//! plaintext
//!   │  Layer 1  CategoryShift       classify (V/C/D/S), shift 5/3/2/1, emit tag + char
//!   │  Layer 2  AffineSubstitution  f(x) = (a·x + b) mod 95 on alphabet indices
//!   ▼  Layer 3  BlockReversal       reverse each block of 4 characters
//! ciphertext
//! ```
//!
//! All arithmetic happens over the 95 printable characters `' '..='~'`.
//!
//! ## Example Usage
//!
//! ```rust
//! use ciphermesh::CipherMesh;
//!
//! let mesh = CipherMesh::new();
//!
//! let ciphertext = mesh.encrypt("Hi!").unwrap();
//! assert_eq!(ciphertext, "SjI1-a");
//!
//! let plaintext = mesh.decrypt(&ciphertext).unwrap();
//! assert_eq!(plaintext, "Hi!");
//! ```
//!
//! With a trace of every layer:
//!
//! ```rust
//! use ciphermesh::CipherMesh;
//!
//! let mesh = CipherMesh::new();
//! let result = mesh.encrypt_with_details("Hi!").unwrap();
//!
//! for layer in &result.details.layers {
//!     println!("{}: {} -> {}", layer.name, layer.input, layer.output);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`alphabet`]: the printable alphabet and index arithmetic
//! - [`layers`]: the three layers and their shared [`Layer`] capability
//! - [`mesh`]: the pipeline and its trace shapes
//! - [`config`]: TOML configuration and input policy
//! - [`error`]: error taxonomy

/// Number of symbols in the printable alphabet.
pub const ALPHABET_SIZE: u32 = 95;

/// Codepoint of the first printable symbol (space).
pub const ALPHABET_START: u32 = 32;

/// Default characters per reversed block.
pub const DEFAULT_BLOCK_SIZE: usize = 4;

/// Default affine multiplier `a`.
pub const DEFAULT_MULTIPLIER: i64 = 3;

/// Default affine increment `b`.
pub const DEFAULT_INCREMENT: i64 = 7;

pub mod alphabet;
pub mod config;
pub mod error;
pub mod layers;
pub mod mesh;

// Re-export commonly used types at the crate root
pub use alphabet::PrintableAlphabet;
pub use config::{ConfigError, InputPolicy, MeshConfig};
pub use error::{ConfigurationError, DomainError, MeshError};
pub use layers::{
    AffineSubstitution, BlockReversal, Category, CategoryShift, Direction, Layer, LayerOutput,
    LayerTrace,
};
pub use mesh::{CipherMesh, DecryptionResult, Details, EncryptionResult, LayerDetails, Payload};
