use serde::{Deserialize, Serialize};

/// Attachment unit of a message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MessageBlock {
    File(FileBlock),
    Card(CardBlock),
}

/// Reference to an uploaded file. `id` is also the key of the persisted
/// [`super::DBFile`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FileBlock {
    pub id: String,
    pub name: String,
    pub mime: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CardBlock {
    pub id: String,
    pub info: String,
}

impl MessageBlock {
    pub fn id(&self) -> &str {
        match self {
            MessageBlock::File(file) => &file.id,
            MessageBlock::Card(card) => &card.id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            MessageBlock::File(_) => "file",
            MessageBlock::Card(_) => "card",
        }
    }
}

impl CardBlock {
    pub fn new(info: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            info: info.into(),
        }
    }
}

impl From<FileBlock> for MessageBlock {
    fn from(value: FileBlock) -> Self {
        MessageBlock::File(value)
    }
}

impl From<CardBlock> for MessageBlock {
    fn from(value: CardBlock) -> Self {
        MessageBlock::Card(value)
    }
}
