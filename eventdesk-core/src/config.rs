//! eventdesk configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{EventDeskError, EventDeskResult};

static DEFAULT_DATA_DIR: &str = "~/.eventdesk";
static DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:5173/";
static DEFAULT_LOG: &str = "warn";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_public_base_url() -> String {
    DEFAULT_PUBLIC_BASE_URL.to_string()
}

fn default_log() -> String {
    DEFAULT_LOG.to_string()
}

/// Configuration at ~/.config/eventdesk/config.toml
///
/// Every key can be overridden from the environment with an `EVENTDESK_`
/// prefix, e.g. `EVENTDESK_DATA_DIR`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DeskConfig {
    /// Where the users/events/notifications blobs live.
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// Base URL that public registration links are built on.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Log filter used when RUST_LOG is not set.
    #[serde(default = "default_log")]
    pub log: String,
}

impl Default for DeskConfig {
    fn default() -> Self {
        DeskConfig {
            data_dir: default_data_dir(),
            public_base_url: default_public_base_url(),
            log: default_log(),
        }
    }
}

impl DeskConfig {
    pub fn config_path() -> EventDeskResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventDeskError::Config("Could not determine config directory".into()))?
            .join("eventdesk");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented template there
    /// on first run.
    pub fn load() -> EventDeskResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> EventDeskResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("EVENTDESK"))
            .build()
            .map_err(|e| EventDeskError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EventDeskError::Config(e.to_string()))
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn save_to(&self, path: &Path) -> EventDeskResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| EventDeskError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| EventDeskError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EventDeskResult<()> {
        let contents = format!(
            "\
# eventdesk configuration

# Where users, events and notifications are stored:
# data_dir = \"{}\"

# Base URL for public registration links:
# public_base_url = \"{}\"

# Log level when RUST_LOG is unset (error, warn, info, debug, trace):
# log = \"{}\"
",
            DEFAULT_DATA_DIR, DEFAULT_PUBLIC_BASE_URL, DEFAULT_LOG
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventDeskError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EventDeskError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
