//! The `error` module defines the error types returned by the hub.
//!
//! Every variant describes an expected, recoverable condition for callers
//! racing shutdown or holding stale feeds. None of them is ever raised as a
//! panic.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HubError {
    /// The hub has been closed; no further subscribe, unsubscribe or publish
    /// succeeds.
    #[error("hub closed")]
    Closed,

    /// [`Hub::close`](crate::hub::Hub::close) was called on an already closed hub.
    #[error("hub already closed")]
    AlreadyClosed,

    /// The feed is not currently subscribed to the given topic.
    #[error("feed is not subscribed to topic '{topic}'")]
    NotSubscribed { topic: String },
}

pub type Result<T> = std::result::Result<T, HubError>;
