//! The three reversible layers and the capability they share.
//!
//! Each layer is a pure function of its input and its construction-time
//! parameters. Layers never reject input: characters outside the printable
//! alphabet are folded into it. Rejection, when wanted, happens at the
//! pipeline boundary (see [`crate::mesh`]).

pub mod affine;
pub mod block_reversal;
pub mod category_shift;

pub use affine::{AffineStep, AffineSubstitution};
pub use block_reversal::{BlockReversal, BlockStep};
pub use category_shift::{Category, CategoryShift, ShiftStep, ShiftTable, TaggedUnit};

use serde::Serialize;

/// Which way a layer is being applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// One per-unit operation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TraceStep {
    Shift(ShiftStep),
    Affine(AffineStep),
}

/// Everything a layer did to its input, for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerTrace {
    /// Per-character (or per tagged unit) operations.
    Steps(Vec<TraceStep>),
    /// Per-block operations.
    Blocks(Vec<BlockStep>),
}

impl LayerTrace {
    /// Number of recorded operations.
    pub fn len(&self) -> usize {
        match self {
            LayerTrace::Steps(steps) => steps.len(),
            LayerTrace::Blocks(blocks) => blocks.len(),
        }
    }

    /// Whether nothing was recorded (empty input).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of applying a layer in either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerOutput {
    /// Transformed text, fed to the next layer.
    pub text: String,
    /// Operation records.
    pub trace: LayerTrace,
}

/// Capability shared by every pipeline stage.
///
/// `decrypt` is each layer's own inverse, not a generic one: the pipeline
/// calls it on the output of the stage that followed this one during
/// encryption.
pub trait Layer: Send + Sync {
    /// Human-readable stage name.
    fn name(&self) -> &'static str;

    /// Applies the forward transform.
    fn encrypt(&self, text: &str) -> LayerOutput;

    /// Undoes [`encrypt`](Layer::encrypt).
    fn decrypt(&self, text: &str) -> LayerOutput;

    /// Formula describing the transform, if it has one.
    fn formula(&self, _direction: Direction) -> Option<String> {
        None
    }

    /// Applies the layer in the given direction.
    fn apply(&self, direction: Direction, text: &str) -> LayerOutput {
        match direction {
            Direction::Encrypt => self.encrypt(text),
            Direction::Decrypt => self.decrypt(text),
        }
    }
}
