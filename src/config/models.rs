use eyre::Result;
use serde::{Deserialize, Serialize};
#[cfg(not(test))]
use std::sync::OnceLock;

#[cfg(not(test))]
use super::CONFIG;

use super::constants::{BACKEND_URL_ENV, HELLO_MESSAGE, LOG_FILE_PATH};
use super::defaults::*;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Configuration {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub avatar: AvatarConfig,

    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeneralConfig {
    #[serde(default = "hello_message")]
    pub hello_message: Option<String>,

    #[serde(default)]
    pub verbose: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogConfig {
    #[serde(default = "log_level")]
    pub level: Option<String>,

    #[serde(default)]
    pub filters: Option<Vec<LogFilter>>,

    #[serde(default)]
    pub file: LogFile,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFilter {
    #[serde(default)]
    pub module: Option<String>,

    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFile {
    #[serde(default = "log_file_path")]
    pub path: String,

    #[serde(default)]
    pub append: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BackendConfig {
    #[serde(default = "backend_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub timeout_secs: Option<u16>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub enum StorageConfig {
    #[serde(rename = "sqlite")]
    Sqlite(SqliteStorage),
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SqliteStorage {
    pub path: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AvatarConfig {
    #[serde(default = "avatar_base_url")]
    pub base_url: String,

    #[serde(default = "system_avatar_seed")]
    pub system_seed: String,

    #[serde(default = "user_avatar_seed")]
    pub user_seed: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct UploadConfig {
    /// Accepted mime types. Everything is accepted when unset.
    #[serde(default)]
    pub accepted_types: Option<Vec<String>>,
}

impl Configuration {
    #[cfg(not(test))]
    pub fn instance() -> &'static Configuration {
        static FALLBACK: OnceLock<Configuration> = OnceLock::new();
        CONFIG
            .get()
            .unwrap_or_else(|| FALLBACK.get_or_init(Configuration::default))
    }

    #[cfg(not(test))]
    pub fn init(config: Configuration) -> Result<()> {
        CONFIG
            .set(config)
            .map_err(|_| eyre::eyre!("Config already initialized"))?;
        Ok(())
    }

    #[cfg(test)]
    pub fn instance() -> &'static Configuration {
        use super::TEST_CONFIG;
        TEST_CONFIG.with(|config| *config.borrow())
    }

    #[cfg(test)]
    pub fn init(config: Configuration) -> Result<()> {
        use super::TEST_CONFIG;
        TEST_CONFIG.with(|test_config| {
            *test_config.borrow_mut() = Box::leak(Box::new(config));
        });
        Ok(())
    }

    /// Apply the environment override for the backend base URL.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var(BACKEND_URL_ENV) {
            if !endpoint.trim().is_empty() {
                self.backend.endpoint = endpoint;
            }
        }
        self
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            hello_message: Some(HELLO_MESSAGE.to_string()),
            verbose: false,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Some("info".to_string()),
            file: LogFile::default(),
            filters: None,
        }
    }
}

impl Default for LogFile {
    fn default() -> Self {
        Self {
            path: LOG_FILE_PATH.to_string(),
            append: false,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: backend_endpoint(),
            timeout_secs: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Sqlite(SqliteStorage::default())
    }
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            base_url: avatar_base_url(),
            system_seed: system_avatar_seed(),
            user_seed: user_avatar_seed(),
        }
    }
}

impl SqliteStorage {
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}
