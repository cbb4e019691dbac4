//! # Bot Configuration Module
//!
//! Reads the process configuration from environment variables. The bot token
//! is the only required value; the image directory has a default next to the
//! executable.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;

/// Environment variable holding the Telegram bot token
pub const TOKEN_VAR: &str = "BOT_TOKEN";
/// Environment variable overriding the image directory
pub const IMAGE_DIR_VAR: &str = "IMAGE_DIR";
/// Directory name used when no override is given
pub const DEFAULT_IMAGE_DIR: &str = "images";

/// Runtime configuration for the bot
#[derive(Clone)]
pub struct BotConfig {
    /// Telegram bot token
    pub token: String,
    /// Directory that catalog image filenames are resolved against
    pub image_dir: PathBuf,
}

impl BotConfig {
    /// Load configuration from the process environment
    ///
    /// Call `dotenv::dotenv()` beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let token = non_empty(TOKEN_VAR).ok_or(ConfigError::MissingVar(TOKEN_VAR))?;
        let image_dir = non_empty(IMAGE_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_image_dir);

        Ok(Self {
            token: token.trim().to_string(),
            image_dir,
        })
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }
}

// Keep the token out of logs.
impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("image_dir", &self.image_dir)
            .finish()
    }
}

/// `images/` next to the running executable, or relative to the working
/// directory when the executable path is unavailable
pub fn default_image_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_IMAGE_DIR)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_DIR))
}
