//! Profile management
//!
//! Profiles are named API targets for iamctl: an API URL plus the Keystone
//! token used to reach it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DEFAULT_API_URL;
use crate::config::ConfigManager;
use crate::error::ConfigError;

/// A profile represents a named IAM API endpoint and its credentials
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// Unique name for this profile
    pub name: String,

    /// IAM API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Keystone token sent as `X-Auth-Token`
    pub keystone_token: String,

    /// Prepended to the client user agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent_prefix: Option<String>,

    /// Total request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Profile {
    /// Create a new profile with required fields
    pub fn new(
        name: impl Into<String>,
        api_url: impl Into<String>,
        keystone_token: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            api_url: api_url.into(),
            keystone_token: keystone_token.into(),
            user_agent_prefix: None,
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("api_url", &self.api_url)
            .field("keystone_token", &"<redacted>")
            .field("user_agent_prefix", &self.user_agent_prefix)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Manager for profile operations
pub struct ProfileManager {
    config_manager: ConfigManager,
}

impl ProfileManager {
    /// Create a new ProfileManager with a specific ConfigManager
    pub fn with_config_manager(config_manager: ConfigManager) -> Self {
        Self { config_manager }
    }

    /// Create a new ProfileManager using the default config location
    pub fn new() -> Result<Self, ConfigError> {
        let config_manager = ConfigManager::new()?;
        Ok(Self { config_manager })
    }

    /// List all configured profiles
    pub fn list(&self) -> Result<Vec<Profile>, ConfigError> {
        let config = self.config_manager.load()?;
        Ok(config.profiles)
    }

    /// Get a profile by name
    pub fn get(&self, name: &str) -> Result<Profile, ConfigError> {
        let config = self.config_manager.load()?;
        config
            .profiles
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))
    }

    /// Add or replace a profile
    pub fn set(&self, profile: Profile) -> Result<(), ConfigError> {
        let mut config = self.config_manager.load()?;

        config.profiles.retain(|p| p.name != profile.name);
        config.profiles.push(profile);

        self.config_manager.save(&config)
    }

    /// Remove a profile
    pub fn remove(&self, name: &str) -> Result<(), ConfigError> {
        let mut config = self.config_manager.load()?;
        let original_len = config.profiles.len();

        config.profiles.retain(|p| p.name != name);

        if config.profiles.len() == original_len {
            return Err(ConfigError::ProfileNotFound(name.to_string()));
        }

        self.config_manager.save(&config)
    }

    /// Check if a profile exists
    pub fn exists(&self, name: &str) -> Result<bool, ConfigError> {
        let config = self.config_manager.load()?;
        Ok(config.profiles.iter().any(|p| p.name == name))
    }

    /// Name of the profile used when none is given
    pub fn default_name(&self) -> Result<String, ConfigError> {
        Ok(self.config_manager.load()?.defaults.profile)
    }

    /// Make an existing profile the default
    pub fn set_default(&self, name: &str) -> Result<(), ConfigError> {
        let mut config = self.config_manager.load()?;
        if !config.profiles.iter().any(|p| p.name == name) {
            return Err(ConfigError::ProfileNotFound(name.to_string()));
        }

        config.defaults.profile = name.to_string();
        self.config_manager.save(&config)
    }
}
