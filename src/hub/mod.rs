pub mod engine;
pub mod feed;
pub mod message;
pub mod options;
mod topic;

pub use engine::{Hub, HubStats};
pub use feed::{Feed, FeedId, TryRecvError};
pub use message::Message;
pub use options::{DEFAULT_CHANNEL_SIZE, HubConfig, HubOption, MAX_CHANNEL_SIZE};
