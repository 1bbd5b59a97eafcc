//! The CipherMesh pipeline.
//!
//! Encryption runs Layer 1 → Layer 2 → Layer 3, decryption runs the same
//! list backwards calling each layer's own `decrypt`. Every call is a pure
//! function of its input; a single instance can be shared across threads.
//!
//! Input is checked once, here, according to the configured
//! [`InputPolicy`]. Layers themselves never fail.

use serde::Serialize;
use tracing::{debug, warn};

use crate::alphabet::PrintableAlphabet;
use crate::config::{InputPolicy, MeshConfig};
use crate::error::{ConfigurationError, MeshError};
use crate::layers::{
    AffineSubstitution, BlockReversal, CategoryShift, Direction, Layer, LayerTrace,
};

/// One layer's contribution to a trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerDetails {
    pub name: String,
    pub input: String,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    /// Serialised as a `steps` or `blocks` key.
    #[serde(flatten)]
    pub trace: LayerTrace,
}

/// The payload a trace started from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Payload {
    Plaintext(String),
    Ciphertext(String),
}

/// Full trace of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Details {
    #[serde(flatten)]
    pub payload: Payload,
    /// Payload length in characters.
    pub length: usize,
    /// Layers in the order they ran.
    pub layers: Vec<LayerDetails>,
}

/// Result of [`CipherMesh::encrypt_with_details`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncryptionResult {
    pub ciphertext: String,
    pub details: Details,
}

/// Result of [`CipherMesh::decrypt_with_details`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecryptionResult {
    pub plaintext: String,
    pub details: Details,
}

/// Three-layer reversible pipeline.
pub struct CipherMesh {
    layers: [Box<dyn Layer>; 3],
    config: MeshConfig,
    alphabet: PrintableAlphabet,
}

impl CipherMesh {
    /// Pipeline with the default parameters (a=3, b=7, blocks of 4, strict).
    pub fn new() -> Self {
        Self {
            layers: [
                Box::new(CategoryShift::new()),
                Box::new(AffineSubstitution::default()),
                Box::new(BlockReversal::default()),
            ],
            config: MeshConfig::default(),
            alphabet: PrintableAlphabet,
        }
    }

    /// Builds a pipeline from configuration, refusing invalid parameters.
    pub fn from_config(config: &MeshConfig) -> Result<Self, ConfigurationError> {
        let affine = AffineSubstitution::new(config.multiplier, config.increment)?;
        let blocks = BlockReversal::new(config.block_size)?;

        debug!(
            a = affine.multiplier(),
            b = affine.increment(),
            a_inv = affine.inverse(),
            block_size = blocks.block_size(),
            policy = %config.input_policy,
            "pipeline configured"
        );

        Ok(Self {
            layers: [
                Box::new(CategoryShift::new()),
                Box::new(affine),
                Box::new(blocks),
            ],
            config: config.clone(),
            alphabet: PrintableAlphabet,
        })
    }

    /// The configuration this pipeline was built from.
    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Encrypts `plaintext`, returning only the ciphertext.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, MeshError> {
        Ok(self.encrypt_with_details(plaintext)?.ciphertext)
    }

    /// Decrypts `ciphertext`, returning only the plaintext.
    pub fn decrypt(&self, ciphertext: &str) -> Result<String, MeshError> {
        Ok(self.decrypt_with_details(ciphertext)?.plaintext)
    }

    /// Encrypts and records what every layer did.
    pub fn encrypt_with_details(&self, plaintext: &str) -> Result<EncryptionResult, MeshError> {
        self.check_input(plaintext)?;
        let (ciphertext, layers) = self.run(Direction::Encrypt, plaintext);

        Ok(EncryptionResult {
            ciphertext,
            details: Details {
                payload: Payload::Plaintext(plaintext.to_string()),
                length: plaintext.chars().count(),
                layers,
            },
        })
    }

    /// Decrypts and records what every layer did, in reverse layer order.
    pub fn decrypt_with_details(&self, ciphertext: &str) -> Result<DecryptionResult, MeshError> {
        self.check_input(ciphertext)?;
        let (plaintext, layers) = self.run(Direction::Decrypt, ciphertext);

        Ok(DecryptionResult {
            plaintext,
            details: Details {
                payload: Payload::Ciphertext(ciphertext.to_string()),
                length: ciphertext.chars().count(),
                layers,
            },
        })
    }

    fn check_input(&self, text: &str) -> Result<(), MeshError> {
        match self.config.input_policy {
            InputPolicy::Strict => self.alphabet.validate(text).map_err(MeshError::from),
            InputPolicy::Fold => {
                let folded = text.chars().filter(|c| !self.alphabet.contains(*c)).count();
                if folded > 0 {
                    warn!(folded, "characters outside the printable alphabet will be folded");
                }
                Ok(())
            }
        }
    }

    fn run(&self, direction: Direction, input: &str) -> (String, Vec<LayerDetails>) {
        let mut order: Vec<&dyn Layer> = self.layers.iter().map(|layer| &**layer).collect();
        if direction == Direction::Decrypt {
            order.reverse();
        }

        let mut text = input.to_string();
        let mut details = Vec::with_capacity(order.len());

        for layer in order {
            let output = layer.apply(direction, &text);
            let name = match direction {
                Direction::Encrypt => layer.name().to_string(),
                Direction::Decrypt => format!("Reversing {}", layer.name()),
            };

            debug!(
                layer = layer.name(),
                ?direction,
                input_len = text.chars().count(),
                output_len = output.text.chars().count(),
                "layer applied"
            );

            details.push(LayerDetails {
                name,
                input: std::mem::replace(&mut text, output.text.clone()),
                output: output.text,
                formula: layer.formula(direction),
                trace: output.trace,
            });
        }

        (text, details)
    }
}

impl Default for CipherMesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    #[test]
    fn test_hi_fixture() {
        let mesh = CipherMesh::new();
        let result = mesh.encrypt_with_details("Hi!").unwrap();
        assert_eq!(result.ciphertext, "SjI1-a");

        let outputs: Vec<&str> = result
            .details
            .layers
            .iter()
            .map(|l| l.output.as_str())
            .collect();
        assert_eq!(outputs, vec!["CKVnS\"", "1IjSa-", "SjI1-a"]);

        assert_eq!(mesh.decrypt("SjI1-a").unwrap(), "Hi!");
    }

    #[test]
    fn test_layers_threaded() {
        let mesh = CipherMesh::new();
        let result = mesh.encrypt_with_details("hello world").unwrap();
        let layers = &result.details.layers;
        assert_eq!(layers.len(), 3);
        assert_eq!(layers[0].input, "hello world");
        assert_eq!(layers[1].input, layers[0].output);
        assert_eq!(layers[2].input, layers[1].output);
        assert_eq!(layers[2].output, result.ciphertext);
    }

    #[test]
    fn test_decrypt_reverse_order() {
        let mesh = CipherMesh::new();
        let result = mesh.decrypt_with_details("SjI1-a").unwrap();
        let names: Vec<&str> = result
            .details
            .layers
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Reversing Layer 3: Block Reversal",
                "Reversing Layer 2: Affine Substitution",
                "Reversing Layer 1: Category Shift",
            ]
        );
        assert_eq!(result.details.payload, Payload::Ciphertext("SjI1-a".to_string()));
        assert_eq!(result.details.length, 6);
    }

    #[test]
    fn test_empty_round_trip() {
        let mesh = CipherMesh::new();
        let ciphertext = mesh.encrypt("").unwrap();
        assert_eq!(ciphertext, "");
        assert_eq!(mesh.decrypt(&ciphertext).unwrap(), "");
    }

    #[test]
    fn test_strict_rejects_non_printable() {
        let mesh = CipherMesh::new();
        let err = mesh.encrypt("tab\there").unwrap_err();
        assert_eq!(
            err,
            MeshError::Domain(DomainError::OutOfAlphabet {
                character: '\t',
                position: 3
            })
        );
        assert!(mesh.decrypt("ab\u{7f}").is_err());
    }

    #[test]
    fn test_fold_accepts_non_printable() {
        let config = MeshConfig {
            input_policy: InputPolicy::Fold,
            ..Default::default()
        };
        let mesh = CipherMesh::from_config(&config).unwrap();
        let ciphertext = mesh.encrypt("a\nb").unwrap();
        assert!(ciphertext.chars().all(|c| PrintableAlphabet.contains(c)));
        // '\n' folds onto index 73, the same index as 'i'
        assert_eq!(mesh.decrypt(&ciphertext).unwrap(), "aib");
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = MeshConfig {
            multiplier: 5,
            ..Default::default()
        };
        assert!(matches!(
            CipherMesh::from_config(&config),
            Err(ConfigurationError::NonInvertibleMultiplier { a: 5, m: 95 })
        ));

        let config = MeshConfig {
            block_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            CipherMesh::from_config(&config),
            Err(ConfigurationError::InvalidBlockSize(0))
        ));
    }

    #[test]
    fn test_custom_parameters_round_trip() {
        let config = MeshConfig {
            multiplier: 7,
            increment: 40,
            block_size: 3,
            input_policy: InputPolicy::Strict,
        };
        let mesh = CipherMesh::from_config(&config).unwrap();
        let text = "Custom params: 123 & more!";
        let ciphertext = mesh.encrypt(text).unwrap();
        assert_ne!(ciphertext, CipherMesh::new().encrypt(text).unwrap());
        assert_eq!(mesh.decrypt(&ciphertext).unwrap(), text);
    }

    #[test]
    fn test_mesh_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CipherMesh>();
    }
}
