#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use eyre::{Context, Result};
use tokio::task::JoinSet;

use crate::{
    config::AvatarConfig,
    models::{FileBlock, Message, MessageBlock, Sender, UploadFile},
    services::BlockService,
};

/// Avatar image URLs, one per sender role.
#[derive(Debug, Clone)]
pub struct Avatars {
    system: String,
    user: String,
}

impl Avatars {
    pub fn url(&self, sender: Sender) -> &str {
        match sender {
            Sender::System => &self.system,
            Sender::User => &self.user,
        }
    }
}

impl From<&AvatarConfig> for Avatars {
    fn from(value: &AvatarConfig) -> Self {
        let base = value.base_url.trim_end_matches('/');
        Self {
            system: format!("{}/bottts/svg?seed={}", base, value.system_seed),
            user: format!("{}/avataaars/svg?seed={}", base, value.user_seed),
        }
    }
}

impl Default for Avatars {
    fn default() -> Self {
        Self::from(&AvatarConfig::default())
    }
}

#[derive(Clone)]
pub struct MessageService {
    blocks: BlockService,
    avatars: Avatars,
}

impl MessageService {
    pub fn new(blocks: BlockService, avatars: Avatars) -> Self {
        Self { blocks, avatars }
    }

    pub fn block_service(&self) -> &BlockService {
        &self.blocks
    }

    pub fn create_simple(&self, sender: Sender, text: impl Into<String>) -> Message {
        Message::new(sender, text).with_avatar_url(self.avatars.url(sender))
    }

    /// Builds a message carrying one file block per input file. Blocks are
    /// created concurrently but keep the order of `files`.
    ///
    /// The first failure is returned as is; blocks created before it are
    /// left in place.
    pub async fn create_upload(
        &self,
        sender: Sender,
        text: impl Into<String>,
        files: Vec<UploadFile>,
    ) -> Result<Message> {
        let total = files.len();
        let mut tasks: JoinSet<(usize, Result<FileBlock>)> = JoinSet::new();
        for (index, file) in files.into_iter().enumerate() {
            let blocks = self.blocks.clone();
            tasks.spawn(async move { (index, blocks.create_file_block(file).await) });
        }

        let mut slots: Vec<Option<FileBlock>> = vec![None; total];
        while let Some(joined) = tasks.join_next().await {
            let (index, block) = joined.wrap_err("joining file block task")?;
            slots[index] = Some(block?);
        }

        let blocks = slots
            .into_iter()
            .enumerate()
            .map(|(index, block)| {
                block
                    .map(MessageBlock::File)
                    .ok_or_else(|| eyre::eyre!("file block {} was not created", index))
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Created upload message with {} block(s)", blocks.len());
        Ok(self.create_simple(sender, text).with_blocks(blocks))
    }
}
