use anyhow::Result;
use clap::Parser;

use slidetl::cli::commands::{chat, keys, providers, translate};
use slidetl::cli::{self, Args, Command};
use slidetl::output::{self, OutputConfig};
use slidetl::translation::print_languages;
use slidetl::ui::Style;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    output::init(OutputConfig::from_flags(args.quiet, args.no_color));

    if let Err(err) = run(args.command).await {
        eprintln!("{} {err:#}", Style::error("Error:"));
        std::process::exit(cli::exit_code(&err));
    }
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Translate {
            file,
            to,
            provider,
            model,
            output,
            font_size,
        } => {
            let options = translate::TranslateOptions {
                file,
                to,
                provider,
                model,
                output,
                font_size,
            };
            translate::run_translate(options).await
        }
        Command::Chat { provider, model } => {
            chat::run_chat(chat::ChatOptions { provider, model }).await
        }
        Command::Keys { command } => keys::run_keys(command),
        Command::Languages => {
            print_languages();
            Ok(())
        }
        Command::Providers { provider } => providers::print_providers(provider.as_deref()),
    }
}
