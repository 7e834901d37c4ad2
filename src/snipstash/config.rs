use crate::error::{Result, StashError};
use crate::store::fs::DEFAULT_QUOTA_BYTES;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for snipstash, stored in <vault>/config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StashConfig {
    /// Ceiling on the serialized collection, in bytes
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: u64,
}

fn default_quota_bytes() -> u64 {
    DEFAULT_QUOTA_BYTES
}

impl Default for StashConfig {
    fn default() -> Self {
        Self {
            quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }
}

impl StashConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(StashError::Io)?;
        let config: StashConfig =
            serde_json::from_str(&content).map_err(StashError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(StashError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StashError::Serialization)?;
        fs::write(config_path, content).map_err(StashError::Io)?;
        Ok(())
    }

    /// Look up a key's display value. Returns None for unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "quota_bytes" => Some(self.quota_bytes.to_string()),
            _ => None,
        }
    }

    /// Set a key from its string form. The error is a user-facing message.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "quota_bytes" => {
                let parsed: u64 = value
                    .parse()
                    .map_err(|_| format!("quota_bytes must be a number of bytes, got '{}'", value))?;
                if parsed == 0 {
                    return Err("quota_bytes must be greater than zero".to_string());
                }
                self.quota_bytes = parsed;
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }
}
