//! Command-line interface definitions and handlers.

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

pub use args::{Args, Command, KeysCommand};

use crate::deck::DeckError;

/// Maps an error to the process exit status.
///
/// Problems with the input document are data errors; everything else is
/// reported as an internal failure.
pub fn exit_code(err: &anyhow::Error) -> exitcode::ExitCode {
    if err.chain().any(|cause| cause.is::<DeckError>()) {
        exitcode::DATAERR
    } else {
        exitcode::SOFTWARE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_for_deck_errors() {
        let err = anyhow::Error::new(DeckError::UnsupportedFormat("notes.txt".to_string()));
        assert_eq!(exit_code(&err), exitcode::DATAERR);

        let wrapped = err.context("Failed to translate notes.txt");
        assert_eq!(exit_code(&wrapped), exitcode::DATAERR);
    }

    #[test]
    fn test_exit_code_for_other_errors() {
        let err = anyhow::anyhow!("Provider 'x' not found");
        assert_eq!(exit_code(&err), exitcode::SOFTWARE);
    }
}
