//! Chat mode UI components.

use crate::api::ChatMessage;
use crate::ui::Style;

use super::session::SessionConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header(config: &SessionConfig) {
    println!(
        "{} {} - Chat with {}",
        Style::header("slidetl"),
        Style::version(format!("v{VERSION}")),
        Style::value(&config.model)
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_config(config: &SessionConfig) {
    println!("{}", Style::header("Configuration"));
    println!(
        "  {}   {}",
        Style::label("provider"),
        Style::value(&config.provider_name)
    );
    println!(
        "  {}      {}",
        Style::label("model"),
        Style::value(&config.model)
    );
    println!(
        "  {}   {}",
        Style::label("endpoint"),
        Style::secondary(&config.endpoint)
    );
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    println!(
        "  {}   {}",
        Style::command("/config"),
        Style::secondary("Show current configuration")
    );
    println!(
        "  {}     {}",
        Style::command("/help"),
        Style::secondary("Show this help")
    );
    println!(
        "  {}  {}",
        Style::command("/history"),
        Style::secondary("Show the conversation so far")
    );
    println!(
        "  {}     {}",
        Style::command("/quit"),
        Style::secondary("Exit chat mode")
    );
    println!();
}

pub fn print_history(messages: &[ChatMessage]) {
    if messages.is_empty() {
        println!("{}", Style::secondary("No messages yet."));
        println!();
        return;
    }

    for message in messages {
        println!("{}", Style::role(message.role.as_str()));
        println!("{}", message.content);
        println!();
    }
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}
