#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{FileBlock, MessageBlock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    System,
    User,
}

impl Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::System => write!(f, "system"),
            Sender::User => write!(f, "user"),
        }
    }
}

/// A single chat message. Messages never change once built; the only way
/// to get one is through [`Message::new`] and the `with_*` builders.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    id: String,
    text: String,
    sender: Sender,
    timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    blocks: Option<Vec<MessageBlock>>,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp: chrono::Utc::now(),
            avatar_url: None,
            blocks: None,
        }
    }

    pub fn new_system(text: impl Into<String>) -> Self {
        Self::new(Sender::System, text)
    }

    pub fn new_user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: chrono::DateTime<chrono::Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    pub fn with_blocks(mut self, blocks: Vec<MessageBlock>) -> Self {
        self.blocks = Some(blocks);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn is_system(&self) -> bool {
        self.sender == Sender::System
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::Utc> {
        self.timestamp
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    pub fn blocks(&self) -> Option<&[MessageBlock]> {
        self.blocks.as_deref()
    }

    /// Iterate over the file attachments of this message, skipping cards.
    pub fn file_blocks(&self) -> impl Iterator<Item = &FileBlock> {
        self.blocks
            .iter()
            .flatten()
            .filter_map(|block| match block {
                MessageBlock::File(file) => Some(file),
                MessageBlock::Card(_) => None,
            })
    }
}
