//! mdforge - a Markdown/MDX content compiler.

mod cli;
mod compiler;
mod config;
mod content;
mod core;
mod embed;
mod error;
mod logger;
mod markdown;
mod pipeline;
mod queue;
mod tree;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ForgeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = ForgeConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Compile { args } => cli::compile::run_compile(args, config).await,
    }
}
