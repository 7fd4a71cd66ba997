use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::Credentials;

/// Configuration for hitcast.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. Environment variables (HITCAST_* prefix)
/// 2. Config file (~/.config/hitcast/config.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Spotify application client id.
    ///
    /// Can be set via:
    /// - ENV: HITCAST_SPOTIFY_CLIENT_ID
    /// - Config: spotify_client_id = "..."
    pub spotify_client_id: Option<String>,

    /// Spotify application client secret.
    ///
    /// Can be set via:
    /// - ENV: HITCAST_SPOTIFY_CLIENT_SECRET
    /// - Config: spotify_client_secret = "..."
    pub spotify_client_secret: Option<String>,
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/hitcast/config.toml
    /// Reads environment variables with HITCAST_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new()
            .context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path.to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder.add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("hitcast");
        builder.add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build()
            .context("Failed to build configuration")?;

        Ok(config)
    }

    /// Extract the client credentials, failing when either half is missing.
    ///
    /// Missing credentials are a startup error: nothing downstream can run
    /// without an authenticated session.
    pub fn credentials(&self) -> Result<Credentials> {
        match (&self.spotify_client_id, &self.spotify_client_secret) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => Ok(Credentials {
                client_id: id.clone(),
                client_secret: secret.clone(),
            }),
            _ => anyhow::bail!(
                "Spotify client credentials not set; add spotify_client_id and \
                 spotify_client_secret to {} or export HITCAST_SPOTIFY_CLIENT_ID \
                 and HITCAST_SPOTIFY_CLIENT_SECRET",
                config_file_path().display()
            ),
        }
    }
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/hitcast/config.toml
/// - macOS: ~/Library/Application Support/hitcast/config.toml
/// - Windows: %APPDATA%\hitcast\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hitcast")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Hitcast Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. Environment variables (HITCAST_* prefix)
# 2. This config file

# Spotify application credentials for the client-credentials grant.
# Create an application at: https://developer.spotify.com/dashboard
#
# Can also be set via:
# - Environment: HITCAST_SPOTIFY_CLIENT_ID=... HITCAST_SPOTIFY_CLIENT_SECRET=...
spotify_client_id = "your-client-id-here"
spotify_client_secret = "your-client-secret-here"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config())
        .context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_credentials() {
        let config = Config::default();
        assert!(config.spotify_client_id.is_none());
        assert!(config.credentials().is_err());
    }

    #[test]
    fn test_credentials_require_both_halves() {
        let config = Config {
            spotify_client_id: Some("id".to_string()),
            spotify_client_secret: None,
        };
        assert!(config.credentials().is_err());

        let config = Config {
            spotify_client_id: Some("id".to_string()),
            spotify_client_secret: Some(String::new()),
        };
        assert!(config.credentials().is_err());
    }

    #[test]
    fn test_credentials_from_complete_config() {
        let config = Config {
            spotify_client_id: Some("id".to_string()),
            spotify_client_secret: Some("secret".to_string()),
        };
        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.client_id, "id");
        assert_eq!(credentials.client_secret, "secret");
    }

    #[test]
    fn test_example_config_names_both_settings() {
        let example = example_config();
        assert!(example.contains("spotify_client_id"));
        assert!(example.contains("spotify_client_secret"));
        assert!(example.contains("HITCAST_SPOTIFY_CLIENT_ID"));
    }
}
