//! Subscriber feeds
//!
//! A [`Feed`] is the receiving end of one subscription: a bounded FIFO of
//! [`Message`]s published on its topic after it subscribed. The hub keeps
//! the sending end. Once the hub lets go of it (unsubscribe or close), the
//! feed yields whatever is still buffered and then reports end-of-stream.
//!
//! Feeds can be consumed from async code ([`Feed::recv`] or as a
//! [`futures::Stream`]), from plain threads ([`Feed::blocking_recv`]), or
//! polled without waiting ([`Feed::try_recv`]).

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::hub::message::Message;

pub use tokio::sync::mpsc::error::TryRecvError;

/// Identity of a feed, used to remove exactly one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedId(Uuid);

impl FeedId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug)]
pub struct Feed {
    id: FeedId,
    topic: String,
    capacity: usize,
    receiver: mpsc::Receiver<Message>,
    dropped: Arc<AtomicU64>,
}

impl Feed {
    pub(crate) fn new(
        id: FeedId,
        topic: &str,
        capacity: usize,
        receiver: mpsc::Receiver<Message>,
        dropped: Arc<AtomicU64>,
    ) -> Self {
        Self {
            id,
            topic: topic.to_string(),
            capacity,
            receiver,
            dropped,
        }
    }

    pub fn id(&self) -> FeedId {
        self.id
    }

    /// Topic this feed was subscribed to.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Buffer capacity the feed was created with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of messages discarded for this feed because its buffer was full
    /// or the feed itself had been dropped by its consumer.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Waits for the next message.
    ///
    /// Returns `None` once the feed has been unsubscribed or the hub closed
    /// and every buffered message has been consumed.
    pub async fn recv(&mut self) -> Option<Message> {
        self.receiver.recv().await
    }

    /// Blocking variant of [`Feed::recv`] for use outside an async runtime.
    ///
    /// # Panics
    ///
    /// Panics when called from within an asynchronous execution context.
    pub fn blocking_recv(&mut self) -> Option<Message> {
        self.receiver.blocking_recv()
    }

    /// Takes the next buffered message without waiting.
    ///
    /// `TryRecvError::Empty` means nothing is buffered yet,
    /// `TryRecvError::Disconnected` means the feed has ended.
    pub fn try_recv(&mut self) -> Result<Message, TryRecvError> {
        self.receiver.try_recv()
    }
}

impl Stream for Feed {
    type Item = Message;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Message>> {
        self.receiver.poll_recv(cx)
    }
}
