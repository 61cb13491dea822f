//! Chat assistant state and reply rules.
//!
//! The assistant answers from a small keyword rule set with a simulated
//! typing delay. When an inference API key is configured the reply comes
//! from the hosted generation model instead, fetched on a worker thread;
//! either way the conversation state is driven by [`ChatState::poll`] from
//! the UI loop.

use crate::constants::{CHAT_INPUT_LIMIT, CHAT_TYPING_DELAY_MS};
use crate::inference::{InferenceClient, InferenceWorker};
use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// Message the assistant opens with, and resets to on clear.
pub const GREETING: &str = "Hello! How can I help you today?";

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatSender {
    /// The signed-in (or anonymous) person typing
    User,
    /// The assistant
    Bot,
}

/// One message in the conversation.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Message text
    pub text: String,
    /// Author
    pub sender: ChatSender,
    /// Local time the message was added
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    fn new(text: impl Into<String>, sender: ChatSender) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: Local::now(),
        }
    }
}

/// Keyword-matched canned reply for `input`.
#[must_use]
pub fn rule_response(input: &str) -> &'static str {
    let lower = input.to_lowercase();

    if lower.contains("cv") || lower.contains("resume") {
        return "To create or edit your CV, go to the CV Builder section. \
                You can choose from various templates and customize them \
                according to your needs.";
    }

    if lower.contains("job") || lower.contains("work") {
        return "You can search for jobs using our job search feature. \
                Use filters to find positions that match your preferences \
                and skills.";
    }

    if lower.contains("premium") {
        return "Our premium features include advanced CV templates, \
                priority job matching, and unlimited applications. \
                Check out our Premium Plans page for more details.";
    }

    if lower.contains("help") || lower.contains("support") {
        return "I'm here to help! You can ask me about CV creation, \
                job searching, or our premium features. What would you \
                like to know more about?";
    }

    "I'm here to help with any questions about our platform. \
     Feel free to ask about CV creation, job searching, or premium features!"
}

enum PendingReply {
    /// Canned reply held back by the typing delay
    Rule { reply: &'static str, due: Instant },
    /// Generation request running on the worker thread
    Inference,
}

/// Conversation state for the chat overlay.
pub struct ChatState {
    messages: Vec<ChatMessage>,
    input: String,
    pending: Option<PendingReply>,
    worker: InferenceWorker,
    client: Option<InferenceClient>,
}

impl ChatState {
    /// Creates a conversation seeded with the greeting. With a client the
    /// assistant answers from the generation model, otherwise from the
    /// keyword rules.
    #[must_use]
    pub fn new(client: Option<InferenceClient>) -> Self {
        Self {
            messages: vec![ChatMessage::new(GREETING, ChatSender::Bot)],
            input: String::new(),
            pending: None,
            worker: InferenceWorker::new(),
            client,
        }
    }

    /// The conversation, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Current contents of the input field.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether a reply is pending (input is disabled meanwhile).
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.pending.is_some()
    }

    /// Appends a character to the input, up to the 250-character limit.
    /// Ignored while a reply is pending.
    pub fn push_char(&mut self, c: char) {
        if self.is_typing() || self.input.chars().count() >= CHAT_INPUT_LIMIT {
            return;
        }
        self.input.push(c);
    }

    /// Removes the last input character.
    pub fn backspace(&mut self) {
        if self.is_typing() {
            return;
        }
        self.input.pop();
    }

    /// Sends the current input. No-op when the input is blank or a reply
    /// is already pending.
    pub fn send(&mut self) {
        let trimmed = self.input.trim();
        if trimmed.is_empty() || self.is_typing() {
            return;
        }

        let raw = std::mem::take(&mut self.input);
        self.messages
            .push(ChatMessage::new(raw.trim(), ChatSender::User));

        if let Some(client) = &self.client {
            self.worker.start(client.clone(), raw);
            self.pending = Some(PendingReply::Inference);
        } else {
            self.pending = Some(PendingReply::Rule {
                reply: rule_response(&raw),
                due: Instant::now() + Duration::from_millis(CHAT_TYPING_DELAY_MS),
            });
        }
    }

    /// Advances pending replies. Returns true when a new message arrived.
    pub fn poll(&mut self) -> bool {
        match &self.pending {
            Some(PendingReply::Rule { reply, due }) => {
                if Instant::now() < *due {
                    return false;
                }
                let reply = *reply;
                self.messages.push(ChatMessage::new(reply, ChatSender::Bot));
                self.pending = None;
                true
            }
            Some(PendingReply::Inference) => match self.worker.poll() {
                Some(reply) => {
                    self.messages.push(ChatMessage::new(reply, ChatSender::Bot));
                    self.pending = None;
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// Resets the conversation to the greeting. A reply already pending
    /// still arrives afterwards.
    pub fn clear(&mut self) {
        self.messages = vec![ChatMessage::new(GREETING, ChatSender::Bot)];
    }

    /// Rewinds the typing deadline so tests can observe the reply without
    /// sleeping.
    #[cfg(test)]
    pub(crate) fn force_typing_due(&mut self) {
        if let Some(PendingReply::Rule { due, .. }) = &mut self.pending {
            *due = Instant::now() - Duration::from_millis(1);
        }
    }
}
