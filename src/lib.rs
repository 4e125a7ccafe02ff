//! # TopicHub
//!
//! `topichub` is a minimalist, in-process publish/subscribe hub.
//! Producers publish messages tagged with a topic; consumers subscribe to a
//! topic and receive a private, bounded feed of everything published to it
//! after they subscribed. There is no persistence, no network transport and
//! no delivery acknowledgment.
//!
//! ## Core Modules
//!
//! - `hub`: The hub itself, its feeds, messages and construction options.
//! - `config`: Loads embedding-application settings from a file and the environment.
//! - `utils`: Shared error type and logging setup.
//!
//! ## Example
//!
//! ```rust
//! use topichub::{Hub, HubOption};
//!
//! let hub = Hub::new([HubOption::channel_size(2)]);
//! let mut feed = hub.subscribe("news").unwrap();
//!
//! hub.publish("news", "hello").unwrap();
//! assert_eq!(feed.try_recv().unwrap().payload, "hello");
//!
//! hub.close().unwrap();
//! assert!(hub.publish("news", "world").is_err());
//! ```

pub mod config;
pub mod hub;
pub mod utils;

pub use hub::{Feed, FeedId, Hub, HubOption, HubStats, Message};
pub use utils::error::{HubError, Result};
