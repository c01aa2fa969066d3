#[cfg(test)]
#[path = "conversation_store_test.rs"]
mod tests;

use eyre::Result;

use crate::{
    config::{
        Configuration,
        constants::{HELLO_MESSAGE, NEW_CHAT_TITLE, WELCOME_TITLE},
    },
    models::{Conversation, Message, Sender},
    services::{BlockService, MessageService},
};

/// In-memory list of conversations, newest first, plus the one the user is
/// looking at. All mutation goes through the methods below.
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    current: Option<String>,
    blocks: BlockService,
}

impl ConversationStore {
    /// Starts with a single welcome conversation holding the hello message,
    /// built like any other system message.
    pub fn new(messages: &MessageService) -> Self {
        let hello = Configuration::instance()
            .general
            .hello_message
            .as_deref()
            .unwrap_or(HELLO_MESSAGE);
        let welcome = messages.create_simple(Sender::System, hello);
        Self::with_welcome(messages.block_service().clone(), welcome)
    }

    pub fn with_welcome(blocks: BlockService, welcome: Message) -> Self {
        let first = Conversation::new(WELCOME_TITLE).with_messages(vec![welcome]);
        Self {
            current: Some(first.id().to_string()),
            conversations: vec![first],
            blocks,
        }
    }

    pub fn empty(blocks: BlockService) -> Self {
        Self {
            conversations: vec![],
            current: None,
            blocks,
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id() == id)
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current(&self) -> Option<&Conversation> {
        self.current.as_deref().and_then(|id| self.get(id))
    }

    fn current_mut(&mut self) -> Option<&mut Conversation> {
        let id = self.current.as_deref()?;
        self.conversations.iter_mut().find(|c| c.id() == id)
    }

    pub fn create_conversation(&mut self, title: Option<&str>) -> &Conversation {
        let title = match title {
            Some(title) => title.to_string(),
            None => format!("Chat {}", self.conversations.len() + 1),
        };
        let conversation = Conversation::new(title);
        log::debug!(
            "Created conversation {} ({})",
            conversation.id(),
            conversation.title()
        );
        self.current = Some(conversation.id().to_string());
        self.conversations.insert(0, conversation);
        &self.conversations[0]
    }

    /// Unknown ids are ignored.
    pub fn set_current_by_id(&mut self, id: &str) {
        if self.get(id).is_some() {
            log::debug!("Switched to conversation {}", id);
            self.current = Some(id.to_string());
        }
    }

    pub fn add_message_to_current(&mut self, message: Message) {
        if self.current_mut().is_none() {
            self.create_conversation(Some(NEW_CHAT_TITLE));
        }
        if let Some(conversation) = self.current_mut() {
            conversation.append_message(message);
        }
    }

    pub fn update_title_for_current_conversation(&mut self, title: impl Into<String>) {
        if let Some(conversation) = self.current_mut() {
            conversation.set_title(title);
        }
    }

    /// Removes the conversation after releasing every file block it holds.
    /// Blocks are cleaned up one at a time; the first failure stops the
    /// deletion and leaves the conversation in place.
    pub async fn delete_conversation(&mut self, id: &str) -> Result<()> {
        let Some(index) = self.conversations.iter().position(|c| c.id() == id) else {
            return Ok(());
        };

        for block in self.conversations[index].file_blocks() {
            self.blocks.delete_file_block(block).await?;
        }

        let removed = self.conversations.remove(index);
        log::debug!(
            "Deleted conversation {} ({})",
            removed.id(),
            removed.title()
        );

        if self.current.as_deref() == Some(id) {
            match self.conversations.first() {
                Some(first) => self.current = Some(first.id().to_string()),
                None => {
                    self.create_conversation(Some(NEW_CHAT_TITLE));
                }
            }
        }
        Ok(())
    }
}
