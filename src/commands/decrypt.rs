//! Decrypt command - undo the three layers in reverse order.

use anyhow::{Context, Result};
use clap::Args;

use super::render::print_details;
use super::{read_input, require_input, CommandExecutor, MeshArgs, OutputArgs};

/// Decrypt CipherMesh ciphertext back into plaintext.
///
/// Malformed ciphertext does not fail: stray or unknown tagged units are
/// copied through unchanged. Only characters outside the printable
/// alphabet are rejected (under the strict policy).
#[derive(Args, Debug)]
pub struct DecryptCommand {
    /// Ciphertext to decrypt (reads from stdin if not provided)
    #[arg(short, long)]
    pub text: Option<String>,

    #[command(flatten)]
    pub mesh: MeshArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl CommandExecutor for DecryptCommand {
    fn execute(&self) -> Result<()> {
        let input = read_input(self.text.as_deref(), "ciphertext")?;
        let ciphertext = require_input(input, "Ciphertext")?;

        let mesh = self.mesh.build()?;
        let result = mesh
            .decrypt_with_details(&ciphertext)
            .context("Decryption failed")?;

        if self.output.json {
            let json = serde_json::to_string_pretty(&result)
                .context("Failed to serialize result")?;
            println!("{}", json);
        } else if self.output.details {
            print_details(&result.details);
            println!();
            println!("Plaintext: {}", result.plaintext);
        } else {
            println!("{}", result.plaintext);
        }

        Ok(())
    }
}
