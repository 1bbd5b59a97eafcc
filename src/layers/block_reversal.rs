//! Layer 3: block-reversal transposition.
//!
//! Text is cut into consecutive blocks of `block_size` characters (the last
//! one may be shorter) and each block is reversed in place. Applying the
//! transform twice restores the input, so encrypt and decrypt are the same
//! operation.

use serde::Serialize;
use tracing::trace;

use super::{Layer, LayerOutput, LayerTrace};
use crate::error::ConfigurationError;
use crate::DEFAULT_BLOCK_SIZE;

/// Trace record for one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockStep {
    pub original: String,
    pub transformed: String,
}

/// Layer 3.
#[derive(Debug, Clone)]
pub struct BlockReversal {
    block_size: usize,
}

impl BlockReversal {
    /// Builds the layer. `block_size` must be at least 1.
    pub fn new(block_size: usize) -> Result<Self, ConfigurationError> {
        if block_size == 0 {
            return Err(ConfigurationError::InvalidBlockSize(block_size));
        }
        Ok(Self { block_size })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Reverses every block. Operates on `char`s, never splitting UTF-8.
    pub fn transform(&self, text: &str) -> String {
        self.transform_with_blocks(text).0
    }

    fn transform_with_blocks(&self, text: &str) -> (String, Vec<BlockStep>) {
        let chars: Vec<char> = text.chars().collect();
        let mut output = String::with_capacity(text.len());
        let mut blocks = Vec::with_capacity(chars.len().div_ceil(self.block_size));

        for block in chars.chunks(self.block_size) {
            let original: String = block.iter().collect();
            let transformed: String = block.iter().rev().collect();
            output.push_str(&transformed);
            blocks.push(BlockStep {
                original,
                transformed,
            });
        }

        trace!(blocks = blocks.len(), block_size = self.block_size, "blocks reversed");
        (output, blocks)
    }

    fn apply_traced(&self, text: &str) -> LayerOutput {
        let (text, blocks) = self.transform_with_blocks(text);
        LayerOutput {
            text,
            trace: LayerTrace::Blocks(blocks),
        }
    }
}

impl Default for BlockReversal {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl Layer for BlockReversal {
    fn name(&self) -> &'static str {
        "Layer 3: Block Reversal"
    }

    fn encrypt(&self, text: &str) -> LayerOutput {
        self.apply_traced(text)
    }

    // Reversal is its own inverse.
    fn decrypt(&self, text: &str) -> LayerOutput {
        self.apply_traced(text)
    }
}
