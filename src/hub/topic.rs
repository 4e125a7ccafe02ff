//! Topic management
//!
//! A `Topic` holds the sending halves of every feed subscribed to a topic
//! name, in subscription order. Subscriptions are identified by the
//! [`FeedId`] of the feed they deliver to, so removing one feed never touches
//! another feed on the same topic.
//!
//! Concurrency note: callers must synchronize access to `Topic` (the hub
//! keeps every topic behind its registry lock).

use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use tokio::sync::mpsc;

use crate::hub::feed::FeedId;
use crate::hub::message::Message;

/// The hub's side of a single subscription.
#[derive(Debug)]
pub(crate) struct Subscription {
    pub id: FeedId,
    pub sender: mpsc::Sender<Message>,
    /// Shared with the owning [`Feed`](crate::hub::Feed).
    pub dropped: Arc<AtomicU64>,
}

#[derive(Debug, Default)]
pub(crate) struct Topic {
    pub name: String,
    pub subscriptions: Vec<Subscription>,
}

impl Topic {
    /// Create a new topic with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            subscriptions: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Remove the subscription feeding `id`, returning it if it was present.
    ///
    /// Dropping the returned value closes the feed for sending.
    pub fn unsubscribe(&mut self, id: &FeedId) -> Option<Subscription> {
        let index = self.subscriptions.iter().position(|s| &s.id == id)?;
        Some(self.subscriptions.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
