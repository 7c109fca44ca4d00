use bevy::prelude::*;
use std::sync::{
    Arc, Mutex,
    mpsc::{Receiver, Sender},
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const SYSTEM_INSTRUCTION: &str = "You are an expert astronomer specialized in Near-Earth Objects (NEOs). Provide scientific, accurate, and engaging information. Keep responses concise and informative.";

pub const GREETING: &str = "Greeting, enthusiast! I am the Cosmic Watch Intelligence. Ask me anything about Near-Earth Objects, orbits, or planetary defense.";
pub const EMPTY_REPLY: &str =
    "I'm having trouble connecting to my orbital sensors. Please try again later.";
pub const TRANSMISSION_ERROR: &str = "Error in transmission. Deep space interference detected.";

#[derive(Resource, Clone, Debug)]
pub struct ChatConfig {
    pub base_url: String,
    pub model: String,
    /// Without a key every question is answered with the transmission error.
    pub api_key: Option<String>,
    pub system_instruction: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(model) = present("COSMICWATCH_CHAT_MODEL") {
            config.model = model;
        }
        config.api_key = present("GEMINI_API_KEY").or_else(|| present("API_KEY"));
        config
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    fn bot(text: &str) -> Self {
        Self {
            role: ChatRole::Bot,
            text: text.to_string(),
        }
    }
}

/// Conversation shown in the chat window. One question may be in flight.
#[derive(Resource, Debug)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    next_request_id: u64,
    pending: Option<u64>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::bot(GREETING)],
            input: String::new(),
            next_request_id: 0,
            pending: None,
        }
    }
}

impl ChatState {
    pub fn awaiting_reply(&self) -> bool {
        self.pending.is_some()
    }

    /// Moves the trimmed input into the transcript and returns it with a
    /// fresh request id. Blank input or an outstanding reply yields `None`
    /// and leaves the input alone.
    pub fn begin_submission(&mut self) -> Option<(u64, String)> {
        if self.awaiting_reply() {
            return None;
        }
        let prompt = self.input.trim().to_string();
        if prompt.is_empty() {
            return None;
        }
        self.input.clear();
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: prompt.clone(),
        });
        self.next_request_id += 1;
        self.pending = Some(self.next_request_id);
        Some((self.next_request_id, prompt))
    }

    /// Back to the greeting. Request ids keep counting so a reply to the
    /// previous conversation can't match a new question.
    pub fn restart(&mut self) {
        self.messages = vec![ChatMessage::bot(GREETING)];
        self.input.clear();
        self.pending = None;
    }

    /// Releases the gate without a reply, e.g. when the request never left.
    pub fn abandon(&mut self, request_id: u64, text: &str) {
        if self.pending == Some(request_id) {
            self.pending = None;
            self.messages.push(ChatMessage::bot(text));
        }
    }

    /// Appends the reply if it answers the outstanding question.
    pub fn receive_reply(&mut self, request_id: u64, text: &str) -> bool {
        if self.pending != Some(request_id) {
            return false;
        }
        self.pending = None;
        self.messages.push(ChatMessage::bot(text));
        true
    }
}

#[derive(Resource)]
pub struct ChatChannels {
    pub cmd_tx: Sender<ChatCommand>,
    pub res_rx: Arc<Mutex<Receiver<ChatResult>>>,
}

#[derive(Debug)]
pub enum ChatCommand {
    Ask { request_id: u64, prompt: String },
}

/// Always carries displayable text; failures are already mapped to the
/// fixed fallback strings.
#[derive(Debug)]
pub struct ChatResult {
    pub request_id: u64,
    pub text: String,
}
