//! # slidetl - Slide Translation CLI
//!
//! `slidetl` translates the text of PowerPoint (`.pptx`) presentations with
//! OpenAI-compatible chat completion APIs, and offers a small interactive chat
//! mode against the same providers.
//!
//! ## Features
//!
//! - **Deck translation**: every text shape of every slide is translated and
//!   written back into a copy of the file, everything else is left as it was
//! - **Multiple providers**: configure and switch between API providers
//! - **Key store**: keep API keys in a local JSON file
//! - **Chat mode**: a streaming conversation with `slidetl chat`
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate a deck into English (writes deck_en.pptx)
//! slidetl translate deck.pptx
//!
//! # Translate into Korean with a larger font
//! slidetl translate deck.pptx --to ko --font-size 14
//!
//! # Interactive chat mode
//! slidetl chat
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/slidetl/config.toml`:
//!
//! ```toml
//! [slidetl]
//! provider = "openai"
//! model = "gpt-4o-mini"
//! to = "en"
//! font_size = 10
//!
//! [providers.openai]
//! endpoint = "https://api.openai.com"
//! api_key_env = "OPENAI_API_KEY"
//! models = ["gpt-4o-mini", "o1-mini"]
//! ```

/// OpenAI-compatible chat completion client.
pub mod api;

/// Interactive chat mode.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// Reading and rewriting the text of `.pptx` presentations.
pub mod deck;

/// File system utilities.
pub mod fs;

/// Reading presentation files from disk.
pub mod input;

/// Stored API keys.
pub mod keystore;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// End-to-end translation runs.
pub mod pipeline;

/// Fragment translation and supported languages.
pub mod translation;

/// Terminal UI components (spinner, progress, colors).
pub mod ui;
