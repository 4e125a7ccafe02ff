mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{HubSettings, LoggingSettings, Settings};

/// Prefix of environment variables read by [`load_config`],
/// e.g. `TOPICHUB_HUB__CHANNEL_SIZE=128`.
pub const ENV_PREFIX: &str = "TOPICHUB";

/// Loads the configuration from `config/default` and environment variables
/// Merges the configuration with default values
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from("config/default")
}

/// Same as [`load_config`] but reads the file source from `path`
/// (extension optional, the file itself may be missing).
pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        hub: HubSettings {
            channel_size: partial
                .hub
                .as_ref()
                .and_then(|h| h.channel_size)
                .unwrap_or(default.hub.channel_size),
        },
        logging: LoggingSettings {
            level: partial
                .logging
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.logging.level),
        },
    })
}
