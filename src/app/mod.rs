pub mod app;
pub mod conversation_store;

pub use app::App;
pub use conversation_store::ConversationStore;
