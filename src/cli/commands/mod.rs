//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads and validates configuration (a missing field aborts here,
//!    before any network call)
//! 2. Builds the tracker/generator collaborators from it
//! 3. Runs the pipeline and formats output
//!
//! # Async Commands
//!
//! The run and preview commands are async because they involve network
//! I/O. Dispatch is sync; each handler creates a tokio runtime and uses
//! `block_on`.

mod completion;
mod preview;
mod run;

pub use completion::completion;
pub use preview::preview;
pub use run::run;

use anyhow::Result;

use crate::cli::args::Command;
use crate::ui::output::Verbosity;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, config_path: &std::path::Path, verbosity: Verbosity) -> Result<()> {
    match command {
        Command::Run { delay_ms } => run::run(config_path, delay_ms, verbosity),
        Command::Preview { json } => preview::preview(config_path, json, verbosity),
        Command::Completion { shell } => completion::completion(shell),
    }
}
