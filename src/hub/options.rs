//! Hub construction options
//!
//! A [`HubConfig`] starts from its defaults and is adjusted by an ordered list
//! of [`HubOption`]s when the hub is built. Options are applied exactly once,
//! in the order supplied; later options see the effect of earlier ones.

use std::fmt;

/// Buffer capacity given to every feed when no option overrides it.
pub const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Largest buffer capacity a feed can have; larger sizes are clamped to it.
pub const MAX_CHANNEL_SIZE: usize = tokio::sync::Semaphore::MAX_PERMITS;

/// Configuration fixed at hub construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubConfig {
    /// Buffer capacity of each subscriber feed.
    pub channel_size: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            channel_size: DEFAULT_CHANNEL_SIZE,
        }
    }
}

/// A single adjustment applied to a [`HubConfig`] while building a hub.
pub struct HubOption(Box<dyn FnOnce(&mut HubConfig) + Send>);

impl HubOption {
    /// Sets the per-feed buffer capacity.
    ///
    /// Non-positive sizes are ignored and the previous value is kept.
    /// Sizes above [`MAX_CHANNEL_SIZE`] are clamped to it.
    pub fn channel_size(size: i64) -> Self {
        Self(Box::new(move |cfg| match usize::try_from(size) {
            Ok(size) if size > 0 => cfg.channel_size = size.min(MAX_CHANNEL_SIZE),
            _ => {}
        }))
    }

    pub(crate) fn apply(self, cfg: &mut HubConfig) {
        (self.0)(cfg)
    }
}

impl fmt::Debug for HubOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HubOption").field(&"FnOnce(&mut HubConfig)").finish()
    }
}

impl HubConfig {
    /// Builds a configuration by applying `options` in order onto the defaults.
    pub fn from_options(options: impl IntoIterator<Item = HubOption>) -> Self {
        let mut cfg = Self::default();
        for option in options {
            option.apply(&mut cfg);
        }
        cfg
    }
}
