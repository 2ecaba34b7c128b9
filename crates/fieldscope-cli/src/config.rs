//! Connection settings for the Apex gateway
//!
//! Resolution order: command-line flags, then environment variables, then
//! the config file at `~/.fieldscope/config.json`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the org base URL
pub const INSTANCE_URL_ENV: &str = "FIELDSCOPE_INSTANCE_URL";

/// Environment variable holding the access token
pub const ACCESS_TOKEN_ENV: &str = "FIELDSCOPE_ACCESS_TOKEN";

/// Persisted connection settings
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Org base URL, e.g. `https://example.my.salesforce.com`
    #[serde(default)]
    pub instance_url: Option<String>,
    /// OAuth access token
    #[serde(default)]
    pub access_token: Option<String>,
}

impl ConfigFile {
    /// Load the config file if one exists; a missing file is an empty config
    pub fn load() -> Result<Self> {
        let Some(path) = config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Fully resolved connection settings
#[derive(Debug)]
pub struct Connection {
    pub instance_url: String,
    pub access_token: String,
}

/// Resolve connection settings from flags, environment, and the config file
pub fn resolve_connection(
    flag_url: Option<String>,
    flag_token: Option<String>,
) -> Result<Connection> {
    let file = ConfigFile::load()?;

    let instance_url = flag_url
        .or_else(|| std::env::var(INSTANCE_URL_ENV).ok())
        .or(file.instance_url)
        .filter(|value| !value.is_empty());
    let access_token = flag_token
        .or_else(|| std::env::var(ACCESS_TOKEN_ENV).ok())
        .or(file.access_token)
        .filter(|value| !value.is_empty());

    let Some(instance_url) = instance_url else {
        bail!(
            "No instance URL configured. Pass --instance-url, set {INSTANCE_URL_ENV}, \
             or add instance_url to ~/.fieldscope/config.json"
        );
    };
    let Some(access_token) = access_token else {
        bail!(
            "No access token configured. Pass --access-token, set {ACCESS_TOKEN_ENV}, \
             or add access_token to ~/.fieldscope/config.json"
        );
    };

    Ok(Connection {
        instance_url,
        access_token,
    })
}

/// `~/.fieldscope/config.json`, via HOME (Unix) or USERPROFILE (Windows)
fn config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()?;
    Some(PathBuf::from(home).join(".fieldscope").join("config.json"))
}
