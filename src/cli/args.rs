use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slidetl")]
#[command(about = "Translate PowerPoint decks and chat with an LLM from the terminal")]
#[command(version)]
pub struct Args {
    /// Suppress status output (warnings and errors are still shown)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate the text of every slide in a .pptx file
    Translate {
        /// Presentation to translate
        file: PathBuf,

        /// Target language code (ISO 639-1, e.g., ja, en, zh)
        #[arg(short = 't', long = "to")]
        to: Option<String>,

        /// Provider name from the config file
        #[arg(short = 'p', long)]
        provider: Option<String>,

        /// Model name
        #[arg(short = 'm', long)]
        model: Option<String>,

        /// Output file (defaults to <name>_<lang>.pptx next to the input)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Font size in points applied to translated text (1-4000)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=4000))]
        font_size: Option<u32>,
    },
    /// Interactive chat with a completion model
    Chat {
        /// Provider name from the config file
        #[arg(short = 'p', long)]
        provider: Option<String>,

        /// Model name
        #[arg(short = 'm', long)]
        model: Option<String>,
    },
    /// Manage stored API keys
    Keys {
        #[command(subcommand)]
        command: KeysCommand,
    },
    /// List supported language codes
    Languages,
    /// List configured providers
    Providers {
        /// Show details for a single provider
        provider: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum KeysCommand {
    /// List stored keys (masked)
    List,
    /// Store a new API key
    Add {
        /// The API key
        key: String,
    },
    /// Remove a stored key by its position in `keys list`
    Remove {
        /// Position of the key, starting at 1
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        index: u32,
    },
}
