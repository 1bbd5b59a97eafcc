//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.
//! The pipeline itself lives in the library; commands only gather input,
//! call it, and print what it returns.

mod config;
mod decrypt;
mod encrypt;
mod render;

pub use config::ConfigCommand;
pub use decrypt::DecryptCommand;
pub use encrypt::EncryptCommand;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ciphermesh::{CipherMesh, InputPolicy, MeshConfig};

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self) -> Result<()>;
}

/// Options shared by `encrypt` and `decrypt` for building the pipeline.
#[derive(Args, Debug, Clone)]
pub struct MeshArgs {
    /// Configuration file (default: ~/.ciphermesh/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the input policy: strict (reject non-printable) or fold
    #[arg(long)]
    pub policy: Option<InputPolicy>,
}

impl MeshArgs {
    /// Loads the configuration, applies overrides and builds the pipeline.
    pub fn build(&self) -> Result<CipherMesh> {
        let mut config = match &self.config {
            Some(path) => MeshConfig::load_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => MeshConfig::load().context("Failed to load config")?,
        };

        if let Some(policy) = self.policy {
            config.input_policy = policy;
        }

        CipherMesh::from_config(&config).context("Invalid pipeline configuration")
    }
}

/// How the result is printed.
#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Show what every layer did
    #[arg(short, long)]
    pub details: bool,

    /// Print the full result (with trace) as JSON
    #[arg(long, conflicts_with = "details")]
    pub json: bool,
}

/// Returns `text` if given, otherwise reads stdin.
///
/// Only the trailing line break is dropped from stdin; other whitespace is
/// part of the payload.
pub fn read_input(text: Option<&str>, what: &str) -> Result<String> {
    if let Some(t) = text {
        return Ok(t.to_string());
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("Reading {} from stdin (Ctrl+D to finish):", what);
    }

    let mut buffer = String::new();
    stdin
        .lock()
        .read_to_string(&mut buffer)
        .with_context(|| format!("Failed to read {} from stdin", what))?;

    Ok(strip_line_break(&buffer).to_string())
}

/// Rejects an empty payload; `what` names it in the error ("Plaintext").
pub fn require_input(text: String, what: &str) -> Result<String> {
    if text.is_empty() {
        anyhow::bail!("{} is required", what);
    }
    Ok(text)
}

fn strip_line_break(input: &str) -> &str {
    input
        .strip_suffix("\r\n")
        .or_else(|| input.strip_suffix('\n'))
        .unwrap_or(input)
}
