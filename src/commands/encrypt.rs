//! Encrypt command - run plaintext through all three layers.

use anyhow::{Context, Result};
use clap::Args;

use super::render::print_details;
use super::{read_input, require_input, CommandExecutor, MeshArgs, OutputArgs};

/// Encrypt plaintext (printable ASCII) into CipherMesh ciphertext.
///
/// Reads from stdin when --text is not given.
#[derive(Args, Debug)]
pub struct EncryptCommand {
    /// Plaintext to encrypt (reads from stdin if not provided)
    #[arg(short, long)]
    pub text: Option<String>,

    #[command(flatten)]
    pub mesh: MeshArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl CommandExecutor for EncryptCommand {
    fn execute(&self) -> Result<()> {
        let input = read_input(self.text.as_deref(), "plaintext")?;
        let plaintext = require_input(input, "Plaintext")?;

        let mesh = self.mesh.build()?;
        let result = mesh
            .encrypt_with_details(&plaintext)
            .context("Encryption failed")?;

        if self.output.json {
            let json = serde_json::to_string_pretty(&result)
                .context("Failed to serialize result")?;
            println!("{}", json);
        } else if self.output.details {
            print_details(&result.details);
            println!();
            println!("Ciphertext: {}", result.ciphertext);
        } else {
            println!("{}", result.ciphertext);
        }

        Ok(())
    }
}
