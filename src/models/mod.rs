pub mod action;
pub mod block;
pub mod conversation;
pub mod file;
pub mod message;

pub use action::Action;
pub use block::{CardBlock, FileBlock, MessageBlock};
pub use conversation::Conversation;
pub use file::{DBFile, UploadFile};
pub use message::{Message, Sender};
