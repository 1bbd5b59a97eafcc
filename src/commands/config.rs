//! Config command - inspect or create the pipeline configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use ciphermesh::layers::AffineSubstitution;
use ciphermesh::{Direction, Layer, MeshConfig};

use super::CommandExecutor;

/// Show or initialise the configuration file (~/.ciphermesh/config.toml).
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration and derived parameters
    Show(ConfigPathArgs),

    /// Write a configuration file with default values
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigPathArgs {
    /// Configuration file (default: ~/.ciphermesh/config.toml)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Configuration file (default: ~/.ciphermesh/config.toml)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

impl CommandExecutor for ConfigCommand {
    fn execute(&self) -> Result<()> {
        match &self.action {
            ConfigAction::Show(args) => show_config(args.path.as_deref()),
            ConfigAction::Init(args) => init_config(args.path.as_deref(), args.force),
        }
    }
}

fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => MeshConfig::config_path().context("Failed to locate config directory"),
    }
}

/// Show the configuration in effect.
fn show_config(path: Option<&Path>) -> Result<()> {
    let path = resolve_path(path)?;
    let config = MeshConfig::load_from(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    let affine = AffineSubstitution::new(config.multiplier, config.increment)
        .context("Invalid affine parameters")?;

    if path.exists() {
        println!("Config file: {}", path.display());
    } else {
        println!("Config file: {} (not found, using defaults)", path.display());
    }
    println!();
    println!("  multiplier (a):   {}", affine.multiplier());
    println!("  inverse (a⁻¹):    {}", affine.inverse());
    println!("  increment (b):    {}", affine.increment());
    println!("  block size:       {}", config.block_size);
    println!("  input policy:     {}", config.input_policy);
    println!();
    if let Some(formula) = affine.formula(Direction::Encrypt) {
        println!("  {}", formula);
    }
    if let Some(formula) = affine.formula(Direction::Decrypt) {
        println!("  {}", formula);
    }

    Ok(())
}

/// Write defaults to the configuration file.
fn init_config(path: Option<&Path>, force: bool) -> Result<()> {
    let target = resolve_path(path)?;

    if target.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {} (use --force to overwrite)",
            target.display()
        );
    }

    let config = MeshConfig::default();
    let saved = match path {
        Some(p) => config.save_to(p),
        None => config.save(),
    };
    saved.with_context(|| format!("Failed to write config to {}", target.display()))?;

    println!("Config written to: {}", target.display());
    Ok(())
}
