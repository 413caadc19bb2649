use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::ThemeError;
use super::navigation::ProxyEndpoint;

/// Top-level configuration container, stored as `settings.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub navigation: NavigationSettings,
    pub network: NetworkSettings,
    #[serde(default)]
    pub data_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            navigation: NavigationSettings::default(),
            network: NetworkSettings::default(),
            data_dir: None,
        }
    }
}

/// Fallback chain settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavigationSettings {
    pub proxies: Vec<ProxyEndpoint>,
    /// `None` lets an attempt wait for the sink indefinitely.
    pub attempt_timeout_ms: Option<u64>,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            proxies: ProxyEndpoint::default_chain(),
            attempt_timeout_ms: Some(20_000),
        }
    }
}

/// HTTP client settings for the fetching frame sink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkSettings {
    pub user_agent: String,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            user_agent: format!("darkproxy/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Theme mode selection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
    /// Follows the system color-scheme preference.
    Auto,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
            ThemeMode::Auto => "auto",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            "auto" | "system" => Ok(ThemeMode::Auto),
            other => Err(ThemeError::UnknownTheme(other.to_string())),
        }
    }
}
