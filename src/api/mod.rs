pub mod chat;
pub mod decoder;

pub use chat::{ArcChatBackend, ChatApi, ChatBackend, build_chat_form};
pub use decoder::Utf8ChunkDecoder;

use serde::Deserialize;
use thiserror::Error;

pub const CHAT_PATH: &str = "/chat";
pub const CHAT_STREAM_PATH: &str = "/chat/stream";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat backend responded with {status}: {body}")]
    Http { status: u16, body: String },

    #[error("chat backend returned no stream body")]
    NoStreamBody,
}

/// Body of a non-streaming chat answer.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}
