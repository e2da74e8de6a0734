use crate::api::ChatMessage;

/// Ordered conversation log of a chat session.
///
/// Entries are only ever appended, and always as a complete user/assistant
/// exchange, so the log never ends with an unanswered user message.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<ChatMessage>,
}

impl MessageLog {
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub const fn len(&self) -> usize {
        self.messages.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The full log followed by a pending user message, ready to send.
    pub fn request_messages(&self, prompt: &str) -> Vec<ChatMessage> {
        let mut messages = self.messages.clone();
        messages.push(ChatMessage::user(prompt));
        messages
    }

    /// Records a completed exchange.
    pub fn push_exchange(&mut self, prompt: impl Into<String>, reply: impl Into<String>) {
        self.messages.push(ChatMessage::user(prompt));
        self.messages.push(ChatMessage::assistant(reply));
    }
}
