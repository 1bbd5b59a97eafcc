//! CipherMesh - layered reversible text transformation
//!
//! A CLI over the CipherMesh pipeline: encrypt, decrypt (optionally with a
//! per-layer trace) and manage the configuration file.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CommandExecutor, ConfigCommand, DecryptCommand, EncryptCommand};

/// CipherMesh - layered reversible text transformation
///
/// Category shift, affine substitution and block reversal over the 95
/// printable ASCII characters. For teaching only: this is not a secure cipher.
#[derive(Parser)]
#[command(name = "ciphermesh")]
#[command(version)]
#[command(about = "Three-layer reversible text transformation (educational, not secure)")]
#[command(long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt plaintext
    Encrypt(EncryptCommand),

    /// Decrypt ciphertext
    Decrypt(DecryptCommand),

    /// Show or create the configuration file
    Config(ConfigCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Encrypt(cmd) => cmd.execute(),
        Commands::Decrypt(cmd) => cmd.execute(),
        Commands::Config(cmd) => cmd.execute(),
    }
}

/// Logs go to stderr so stdout stays clean for ciphertext and JSON.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
