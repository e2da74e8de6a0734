mod client;
mod sse_parser;

pub use client::{ChatMessage, CompletionClient, CompletionRequest, Role, TextStream};
