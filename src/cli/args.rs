//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Config file location
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "issuesmith.toml";

/// issuesmith - generate labeled GitHub issues from a project description
#[derive(Parser, Debug)]
#[command(name = "issuesmith")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate issues from the configured project description and create
    /// them in the target repository
    #[command(
        long_about = "Generate issues from the configured project description and create \
            them in the target repository.\n\n\
            The run probes the repository first, creates any labels the generated \
            issues reference that do not exist yet, then submits the issues one at a \
            time with a pause between requests. A rejected issue does not stop the \
            rest of the batch; the final summary lists every outcome."
    )]
    Run {
        /// Milliseconds to pause between issue-creation requests
        #[arg(long, default_value_t = 1000)]
        delay_ms: u64,
    },

    /// Generate issues and print them without creating anything
    Preview {
        /// Print the generated issues as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Shells supported for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
