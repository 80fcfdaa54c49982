//! Chat session
//!
//! Holds the transcript and the replies still being "typed". Submitting a
//! message only schedules a reply; resolving it later generates the text,
//! counts the message towards the profile and saves the settings.

use chrono::{DateTime, Local};
use eyre::Result;
use std::time::{Duration, Instant};

pub mod queue;

use crate::profile::LevelUp;
use crate::responder;
use crate::settings::SettingsStore;
use queue::ReplyQueue;

pub const WELCOME_MESSAGE: &str = "Привет! Я твой ИИ-помощник. Напиши мне что-нибудь, и я отвечу!";

/// Shown while a reply is pending
pub const TYPING_INDICATOR: &str = "ИИ печатает...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub author: Author,
    pub text: String,
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    fn new(author: Author, text: impl Into<String>) -> Self {
        Self {
            author,
            text: text.into(),
            sent_at: Local::now(),
        }
    }
}

/// A reply that has been generated and recorded
#[derive(Debug, Clone)]
pub struct Delivery {
    pub reply: ChatMessage,
    pub level_up: Option<LevelUp>,
}

pub struct ChatSession {
    transcript: Vec<ChatMessage>,
    queue: ReplyQueue,
    typing_delay: Duration,
}

impl ChatSession {
    pub fn new(typing_delay: Duration) -> Self {
        Self {
            transcript: Vec::new(),
            queue: ReplyQueue::new(),
            typing_delay,
        }
    }

    /// Append the assistant greeting
    pub fn greet(&mut self) -> &ChatMessage {
        self.push(ChatMessage::new(Author::Assistant, WELCOME_MESSAGE))
    }

    /// Record a user message and schedule its reply. Blank input is ignored.
    pub fn submit(&mut self, text: &str, now: Instant) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.queue.schedule(text.to_string(), now + self.typing_delay);
        log::debug!("Reply scheduled, {} pending", self.queue.len());
        Some(self.push(ChatMessage::new(Author::User, text)))
    }

    /// Resolve every reply due at `now`, oldest first
    pub fn resolve_due(&mut self, store: &mut SettingsStore, now: Instant) -> Result<Vec<Delivery>> {
        let mut deliveries = Vec::new();

        while let Some(pending) = self.queue.pop_due(now) {
            let text = responder::respond(&pending.message, &store.document().character);
            let level_up = store.update(|doc| doc.profile.record_message())?;

            let reply = self.push(ChatMessage::new(Author::Assistant, text)).clone();
            deliveries.push(Delivery { reply, level_up });
        }

        Ok(deliveries)
    }

    pub fn is_typing(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.queue.next_due()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.transcript.push(message);
        &self.transcript[self.transcript.len() - 1]
    }
}
