use serde::{Deserialize, Serialize};

/// Represents a published message in the hub.
///
/// A message consists of the topic it was published on and the payload
/// handed to [`Hub::publish`](crate::hub::Hub::publish). Every receiving feed
/// gets its own copy; nothing is shared between subscribers.
///
/// # Fields
///
/// - `topic` - The name of the topic this message belongs to.
/// - `payload` - The actual message content.
///
/// # Example
///
/// ```rust
/// use topichub::hub::Message;
///
/// let msg = Message::new("sensor_updates", "{\"temp\":25}");
/// assert_eq!(msg.topic, "sensor_updates");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub topic: String,
    pub payload: String,
}

impl Message {
    pub fn new(topic: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}
