#[cfg(test)]
#[path = "app_test.rs"]
mod tests;

use std::io::Write;

use eyre::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    api::ArcChatBackend,
    app::ConversationStore,
    config::constants::INVALID_FILES_NOTICE,
    models::{Action, Message, MessageBlock, Sender, UploadFile},
    services::MessageService,
    utils::file::{FileSelection, FileTypes, extract_files},
};

const HELP: &str = r#"Commands:
  <text>                          send a message and stream the answer
  /ask <text>                     send a message and wait for the full answer
  /attach <path>... -- <text>     send files along with a message
  /new [title]                    start a conversation
  /list                           list conversations
  /switch <id>                    switch conversation
  /rename <title>                 rename the current conversation
  /delete [id]                    delete a conversation (current by default)
  /show                           print the current conversation
  /quit                           exit"#;

pub struct App {
    store: ConversationStore,
    messages: MessageService,
    backend: ArcChatBackend,
    accepted_types: Option<FileTypes>,
}

impl App {
    pub fn new(
        store: ConversationStore,
        messages: MessageService,
        backend: ArcChatBackend,
        accepted_types: Option<FileTypes>,
    ) -> Self {
        Self {
            store,
            messages,
            backend,
            accepted_types,
        }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub async fn run(&mut self) -> Result<()> {
        if let Some(message) = self.store.current().and_then(|c| c.last_message()) {
            println!("{}\n", message.text());
        }
        println!("Type /help for commands.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            std::io::stdout().flush().ok();

            let Some(line) = lines.next_line().await.wrap_err("reading input")? else {
                return Ok(());
            };
            let Some(action) = Action::parse(&line) else {
                continue;
            };
            if action == Action::Quit {
                return Ok(());
            }
            if let Err(err) = self.handle(action).await {
                log::error!("Action failed: {:?}", err);
                eprintln!("Error: {err:#}");
            }
        }
    }

    pub async fn handle(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Send(text) => self.send(text, vec![], true).await?,
            Action::Ask(text) => self.send(text, vec![], false).await?,
            Action::Attach { paths, text } => self.attach(paths, text).await?,

            Action::NewConversation(title) => {
                let conversation = self.store.create_conversation(title.as_deref());
                println!("Started {} ({})", conversation.title(), conversation.id());
            }
            Action::ListConversations => self.print_conversations(),
            Action::SwitchConversation(id) => {
                self.store.set_current_by_id(&id);
                if self.store.current_id() != Some(id.as_str()) {
                    println!("No conversation with id {}", id);
                }
            }
            Action::RenameConversation(title) => {
                self.store.update_title_for_current_conversation(title)
            }
            Action::DeleteConversation(id) => {
                let id = match id.or_else(|| self.store.current_id().map(str::to_string)) {
                    Some(id) => id,
                    None => return Ok(()),
                };
                self.store
                    .delete_conversation(&id)
                    .await
                    .wrap_err(format!("deleting conversation {}", id))?;
            }
            Action::ShowConversation => self.print_current(),

            Action::Help => println!("{}", HELP),
            Action::Quit => {}
            Action::Unknown(input) => println!("Unknown command: {}. Type /help.", input),
        }
        Ok(())
    }

    async fn attach(&mut self, paths: Vec<String>, text: String) -> Result<()> {
        let mut files = Vec::with_capacity(paths.len());
        for path in &paths {
            files.push(UploadFile::from_path(path).await?);
        }

        let files = match extract_files(files, self.accepted_types.as_ref()) {
            FileSelection::Accepted(files) => files,
            FileSelection::Rejected => {
                eprintln!("{}", INVALID_FILES_NOTICE);
                return Ok(());
            }
        };
        self.send(text, files, true).await
    }

    async fn send(&mut self, text: String, files: Vec<UploadFile>, stream: bool) -> Result<()> {
        let message = if files.is_empty() {
            self.messages.create_simple(Sender::User, &text)
        } else {
            self.messages
                .create_upload(Sender::User, &text, files.clone())
                .await?
        };
        self.store.add_message_to_current(message);

        let thread_id = match self.store.current_id() {
            Some(id) => id.to_string(),
            None => eyre::bail!("no current conversation"),
        };
        let files = (!files.is_empty()).then_some(files.as_slice());

        let answer = if stream {
            let mut answer = String::new();
            let res = self
                .backend
                .chat_stream(&thread_id, &text, files, &mut |chunk| {
                    print!("{}", chunk);
                    std::io::stdout().flush().ok();
                    answer.push_str(chunk);
                })
                .await;
            println!();
            res.map(|_| answer)
        } else {
            self.backend.chat(&thread_id, &text, files).await.inspect(|answer| {
                println!("{}", answer);
            })
        };

        let reply = match answer {
            Ok(answer) => self.messages.create_simple(Sender::System, answer),
            Err(err) => {
                log::error!("Chat backend failed: {:?}", err);
                self.messages.create_simple(
                    Sender::System,
                    format!("Error: Backend failed with the following error: \n\n {err:#}"),
                )
            }
        };
        self.store.add_message_to_current(reply);
        Ok(())
    }

    fn print_conversations(&self) {
        let current = self.store.current_id();
        for conversation in self.store.conversations() {
            let marker = if Some(conversation.id()) == current {
                "*"
            } else {
                " "
            };
            println!(
                "{} {}  {}  ({} messages, {})",
                marker,
                conversation.id(),
                conversation.title(),
                conversation.len(),
                conversation.created_at().format("%Y-%m-%d %H:%M")
            );
        }
    }

    fn print_current(&self) {
        let Some(conversation) = self.store.current() else {
            return;
        };
        println!("# {}", conversation.title());
        for message in conversation.messages() {
            print_message(message);
        }
    }
}

fn print_message(message: &Message) {
    println!(
        "[{}] {}: {}",
        message.timestamp().format("%H:%M:%S"),
        message.sender(),
        message.text()
    );
    for block in message.blocks().unwrap_or_default() {
        match block {
            MessageBlock::File(file) => {
                println!("    [file] {} ({}) {}", file.name, file.mime, file.url)
            }
            MessageBlock::Card(card) => println!("    [card] {}", card.info),
        }
    }
}
