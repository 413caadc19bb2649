// DarkProxy platform paths
// Resolves where the config file and the storage database live on each OS.
//
// Config: $XDG_CONFIG_HOME/darkproxy | ~/Library/Application Support/DarkProxy | %APPDATA%/DarkProxy
// Data:   $XDG_DATA_HOME/darkproxy   | ~/Library/Application Support/DarkProxy | %APPDATA%/DarkProxy

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "DARKPROXY_DATA_DIR";

/// File name of the local storage database inside the data directory.
pub const DATABASE_FILE: &str = "darkproxy.db";

#[cfg(not(target_os = "windows"))]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

#[cfg(target_os = "windows")]
fn appdata_dir() -> PathBuf {
    PathBuf::from(
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming")),
    )
}

/// Returns the platform-specific configuration directory for DarkProxy.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join("DarkProxy")
    }
    #[cfg(target_os = "windows")]
    {
        appdata_dir().join("DarkProxy")
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) => PathBuf::from(xdg).join("darkproxy"),
            Err(_) => home_dir().join(".config").join("darkproxy"),
        }
    }
}

/// Returns the platform-specific data directory for DarkProxy.
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join("DarkProxy")
    }
    #[cfg(target_os = "windows")]
    {
        appdata_dir().join("DarkProxy")
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        match env::var("XDG_DATA_HOME") {
            Ok(xdg) => PathBuf::from(xdg).join("darkproxy"),
            Err(_) => home_dir().join(".local").join("share").join("darkproxy"),
        }
    }
}

/// Picks the data directory: `DARKPROXY_DATA_DIR`, then the configured
/// directory, then the platform default.
pub fn resolve_data_dir(configured: Option<&str>) -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    match configured {
        Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => get_data_dir(),
    }
}

/// Path of the storage database inside `data_dir`.
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILE)
}
