//! Command dispatch, kept out of the binary.

use super::args::Commands;
use super::handlers::{handle_contrast, handle_guidelines, handle_init, handle_rules, handle_scan};
use crate::exit::UxscanExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands) -> Result<UxscanExit> {
    match command {
        Commands::Scan(args) => handle_scan(&args),
        Commands::Contrast {
            foreground,
            background,
            large,
            level,
            json,
        } => handle_contrast(&foreground, &background, large, level, json),
        Commands::Rules { json } => handle_rules(json),
        Commands::Guidelines { json } => handle_guidelines(json),
        Commands::Init { force } => handle_init(force),
    }
}
