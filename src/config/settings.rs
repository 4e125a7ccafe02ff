use serde::Deserialize;

use crate::hub::{DEFAULT_CHANNEL_SIZE, HubOption};

/// Top-level configuration settings for applications embedding the hub.
///
/// Includes settings for both the hub and logging.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    pub hub: HubSettings,
    pub logging: LoggingSettings,
}

/// Configuration settings for the hub.
///
/// `channel_size` is signed so that out-of-range values from files or the
/// environment reach the hub and are ignored there like any other
/// non-positive size.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HubSettings {
    pub channel_size: i64,
}

impl HubSettings {
    /// Converts the settings into construction options for [`Hub::new`](crate::hub::Hub::new).
    pub fn options(&self) -> Vec<HubOption> {
        vec![HubOption::channel_size(self.channel_size)]
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub hub: Option<PartialHubSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialHubSettings {
    pub channel_size: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hub: HubSettings {
                channel_size: DEFAULT_CHANNEL_SIZE as i64,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}
