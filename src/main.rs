use std::sync::Arc;

use eyre::{Context, Result};
use parley::api::{ArcChatBackend, ChatApi};
use parley::app::{App, ConversationStore};
use parley::cli::Command;
use parley::config::{Configuration, init_logger, verbose};
use parley::services::{Avatars, BlockService, MemoryObjectUrls, MessageService};
use parley::storage::file_store;
use parley::utils::file::FileTypes;

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Command::new();
    if cmd.version() {
        cmd.print_version();
        return Ok(());
    }

    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let config = cmd.get_config()?;
    Configuration::init(config)?;
    let config = Configuration::instance();

    init_logger(&config.log)?;
    verbose!("[+] Logger initialized");

    verbose!("[+] Initializing file store...");
    let store = file_store(&config.storage)
        .await
        .wrap_err("initializing file store")?;
    verbose!("[+] File store initialized");

    let blocks = BlockService::new(store, Arc::new(MemoryObjectUrls::new()));
    let messages = MessageService::new(blocks, Avatars::from(&config.avatar));
    let conversations = ConversationStore::new(&messages);

    let backend: ArcChatBackend = ChatApi::from(&config.backend).into();
    verbose!("[+] Chat backend: {}", config.backend.endpoint);
    log::info!("Using chat backend {}", config.backend.endpoint);

    let accepted_types = config.upload.accepted_types.clone().map(FileTypes::List);

    let mut app = App::new(conversations, messages, backend, accepted_types);
    if let Err(err) = app.run().await {
        log::error!("App error: {:?}", err);
        eprintln!("Error: {}", err);
    }

    Ok(())
}
