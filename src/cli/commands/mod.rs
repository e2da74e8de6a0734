//! Subcommand implementations.

/// Chat mode command handler.
pub mod chat;

/// Key store command handler.
pub mod keys;

/// Provider listing command handler.
pub mod providers;

/// Presentation translation command handler.
pub mod translate;
