//! Hub engine
//!
//! This module contains the in-memory hub responsible for:
//! - managing topics and the feeds subscribed to them
//! - fanning published messages out to every feed of a topic
//! - shutting every feed down when the hub is closed
//!
//! Concurrency and usage notes:
//! - The registry and the closed flag sit behind a single `RwLock`.
//!   Subscribe, unsubscribe and close take it exclusively; publish and the
//!   introspection calls take it shared.
//! - Publish never waits on a subscriber. Delivery is a non-blocking
//!   `try_send` while the read lock is held; a feed whose buffer is full
//!   loses that message (drop-and-continue) and the loss is counted both on
//!   the feed and on the hub.
//! - Share a hub between tasks or threads with `Arc<Hub>`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};

use crate::config::HubSettings;
use crate::hub::feed::{Feed, FeedId};
use crate::hub::message::Message;
use crate::hub::options::{HubConfig, HubOption};
use crate::hub::topic::{Subscription, Topic};
use crate::utils::error::{HubError, Result};

#[derive(Debug, Default)]
struct State {
    closed: bool,
    topics: HashMap<String, Topic>,
}

/// Point-in-time counters describing a hub.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HubStats {
    /// Topics with at least one subscribed feed.
    pub topics: usize,
    /// Feeds currently registered across all topics.
    pub subscriptions: usize,
    /// Successful publish calls.
    pub published: u64,
    /// Messages handed to a feed.
    pub delivered: u64,
    /// Messages discarded because a feed was full or its consumer was gone.
    pub dropped: u64,
}

#[derive(Debug)]
pub struct Hub {
    config: HubConfig,
    state: RwLock<State>,
    published: AtomicU64,
    delivered: AtomicU64,
    dropped: AtomicU64,
}

impl Default for Hub {
    fn default() -> Self {
        Self::new([])
    }
}

impl Hub {
    /// Creates an open hub with an empty registry.
    ///
    /// `options` are applied in order onto the default [`HubConfig`].
    pub fn new(options: impl IntoIterator<Item = HubOption>) -> Self {
        Self::with_config(HubConfig::from_options(options))
    }

    /// Creates a hub from loaded [`HubSettings`].
    pub fn from_settings(settings: &HubSettings) -> Self {
        Self::new(settings.options())
    }

    fn with_config(config: HubConfig) -> Self {
        Self {
            config,
            state: RwLock::new(State::default()),
            published: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    /// Buffer capacity given to every feed this hub creates.
    pub fn channel_size(&self) -> usize {
        self.config.channel_size
    }

    // Every mutation completes without panicking, so a poisoned lock still
    // guards a consistent registry.
    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribes a new feed to `topic`. The topic is created if it doesn't exist.
    ///
    /// The feed only sees messages published after this call returns.
    pub fn subscribe(&self, topic: &str) -> Result<Feed> {
        let mut state = self.write();
        if state.closed {
            return Err(HubError::Closed);
        }

        let (sender, receiver) = mpsc::channel(self.config.channel_size);
        let id = FeedId::new();
        let dropped = Arc::new(AtomicU64::new(0));

        state
            .topics
            .entry(topic.to_string())
            .or_insert_with(|| Topic::new(topic))
            .subscribe(Subscription {
                id,
                sender,
                dropped: dropped.clone(),
            });

        debug!(feed = %id, topic, "subscribed");
        Ok(Feed::new(id, topic, self.config.channel_size, receiver, dropped))
    }

    /// Unsubscribes `feed` from `topic`.
    ///
    /// Only the given feed is removed; other feeds on the topic keep
    /// receiving. The feed reports end-of-stream once its buffer is drained.
    /// Fails with [`HubError::NotSubscribed`] if the feed is not registered
    /// under `topic`.
    pub fn unsubscribe(&self, topic: &str, feed: &Feed) -> Result<()> {
        let mut state = self.write();
        if state.closed {
            return Err(HubError::Closed);
        }

        let not_subscribed = || HubError::NotSubscribed {
            topic: topic.to_string(),
        };
        let entry = state.topics.get_mut(topic).ok_or_else(not_subscribed)?;
        let subscription = entry.unsubscribe(&feed.id()).ok_or_else(not_subscribed)?;
        if entry.is_empty() {
            state.topics.remove(topic);
        }

        // Dropping the sender closes the feed.
        drop(subscription);
        debug!(feed = %feed.id(), topic, "unsubscribed");
        Ok(())
    }

    /// Publishes `payload` to every feed currently subscribed to `topic`.
    ///
    /// Publishing to a topic nobody listens to succeeds and does nothing.
    /// A feed whose buffer is full misses this message; the others still get it.
    pub fn publish(&self, topic: &str, payload: impl Into<String>) -> Result<()> {
        let state = self.read();
        if state.closed {
            return Err(HubError::Closed);
        }
        self.published.fetch_add(1, Ordering::Relaxed);

        let Some(entry) = state.topics.get(topic) else {
            debug!(topic, "no subscribers, message discarded");
            return Ok(());
        };

        let message = Message::new(topic, payload);
        for subscription in &entry.subscriptions {
            match subscription.sender.try_send(message.clone()) {
                Ok(()) => {
                    self.delivered.fetch_add(1, Ordering::Relaxed);
                }
                Err(TrySendError::Full(_)) => {
                    let earlier = subscription.dropped.fetch_add(1, Ordering::Relaxed);
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                    // warn once per feed, the counters track the rest
                    if earlier == 0 {
                        warn!(feed = %subscription.id, topic = %entry.name, "feed full, dropping messages");
                    } else {
                        debug!(feed = %subscription.id, topic = %entry.name, "feed full, message dropped");
                    }
                }
                Err(TrySendError::Closed(_)) => {
                    subscription.dropped.fetch_add(1, Ordering::Relaxed);
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                    debug!(feed = %subscription.id, topic = %entry.name, "feed receiver gone, message dropped");
                }
            }
        }

        Ok(())
    }

    /// Closes the hub.
    ///
    /// Every registered feed is closed for sending and the registry is
    /// cleared, so no consumer is left waiting forever. A second call fails
    /// with [`HubError::AlreadyClosed`] and has no effect.
    pub fn close(&self) -> Result<()> {
        let mut state = self.write();
        if state.closed {
            return Err(HubError::AlreadyClosed);
        }
        state.closed = true;

        let feeds: usize = state.topics.values().map(|t| t.subscriptions.len()).sum();
        let topics = state.topics.len();
        state.topics.clear();

        info!(topics, feeds, "hub closed");
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.read().closed
    }

    /// Number of feeds currently subscribed to `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.read()
            .topics
            .get(topic)
            .map_or(0, |t| t.subscriptions.len())
    }

    /// Topics that currently have at least one subscriber, sorted by name.
    pub fn topics(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().topics.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn stats(&self) -> HubStats {
        let state = self.read();
        HubStats {
            topics: state.topics.len(),
            subscriptions: state.topics.values().map(|t| t.subscriptions.len()).sum(),
            published: self.published.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}
