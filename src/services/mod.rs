pub mod block;
pub mod message;
pub mod object_url;

#[cfg(test)]
pub(crate) mod test_utils;

pub use block::BlockService;
pub use message::{Avatars, MessageService};
pub use object_url::{ArcObjectUrls, MemoryObjectUrls, ObjectUrls};
