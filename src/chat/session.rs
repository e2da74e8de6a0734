use anyhow::Result;
use futures_util::StreamExt;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use std::io::{self, Write};

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::history::MessageLog;
use super::ui;
use crate::api::{CompletionClient, CompletionRequest};
use crate::ui::{Spinner, is_prompt_cancelled};

/// Configuration for a chat session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The provider name.
    pub provider_name: String,
    /// The API endpoint URL.
    pub endpoint: String,
    /// The model to use.
    pub model: String,
    /// The API key (if required).
    pub api_key: Option<String>,
}

/// An interactive chat session.
///
/// Every request carries the whole conversation so far.
pub struct ChatSession {
    config: SessionConfig,
    client: CompletionClient,
    log: MessageLog,
}

impl ChatSession {
    pub fn new(config: SessionConfig) -> Self {
        let client = CompletionClient::new(config.endpoint.clone(), config.api_key.clone());
        Self {
            config,
            client,
            log: MessageLog::new(),
        }
    }

    pub const fn log(&self) -> &MessageLog {
        &self.log
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header(&self.config);

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        // Non-highlighted suggestions: gray
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        // Highlighted suggestion: purple
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Type a message, /help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd) {
                            break;
                        }
                    }
                    Input::Text(text) => {
                        self.send(&text).await;
                    }
                },
                Err(e) if is_prompt_cancelled(&e) => {
                    println!(); // Clear line before goodbye message
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    fn handle_command(&self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Config => {
                ui::print_config(&self.config);
                true
            }
            SlashCommand::Help => {
                ui::print_help();
                true
            }
            SlashCommand::History => {
                ui::print_history(self.log.messages());
                true
            }
            SlashCommand::Quit => false,
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
                true
            }
        }
    }

    /// Sends one user message. The exchange is logged only if the reply
    /// arrives in full; otherwise the error is printed and the log is left
    /// as it was.
    pub async fn send(&mut self, prompt: &str) {
        match self.stream_reply(prompt).await {
            Ok(reply) => self.log.push_exchange(prompt, reply),
            Err(e) => ui::print_error(&format!("{e:#}")),
        }
    }

    async fn stream_reply(&self, prompt: &str) -> Result<String> {
        let request = CompletionRequest::new(
            self.config.model.clone(),
            self.log.request_messages(prompt),
        );

        let spinner = Spinner::new("Thinking...");

        let mut stream = self.client.stream(&request).await?;
        let mut reply = String::new();
        let mut first_chunk = true;

        while let Some(chunk_result) = stream.next().await {
            let chunk = match chunk_result {
                Ok(chunk) => chunk,
                Err(e) => {
                    if !first_chunk {
                        println!();
                    }
                    return Err(e);
                }
            };

            if first_chunk {
                spinner.stop();
                first_chunk = false;
            }

            print!("{chunk}");
            io::stdout().flush()?;
            reply.push_str(&chunk);
        }

        if first_chunk {
            spinner.stop();
        }

        println!();
        println!();
        Ok(reply)
    }
}
