//! Screen configuration, stored as JSON in the platform cache directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::event::Key;
use crate::error::Result;

const APP_DIR: &str = "nurses";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Delay between two key polls of the input loop.
    pub poll_interval_ms: u64,
    /// Key binding that stops the screen, e.g. `q` or `ctrl+c`.
    pub exit_key: String,
    /// Extra columns allocated to the right of every surface.
    pub reserved_columns: usize,
    /// `EnvFilter` directive for the log file. `RUST_LOG` wins when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            exit_key: "q".to_string(),
            reserved_columns: 1,
            log_filter: None,
        }
    }
}

impl ScreenConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn exit_key(&self) -> Result<Key> {
        Ok(self.exit_key.parse()?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::from_json_str(&text)?;
                config.exit_key()?;
                tracing::debug!(path = %path.display(), "config loaded");
                Ok(config)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Load from [`config_path`], or the defaults when there is no cache
    /// directory.
    pub fn load_default() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    Some(get_cache_dir()?.join(APP_DIR).join(CONFIG_FILE))
}

/// Directory holding the log files.
pub fn log_dir() -> Option<PathBuf> {
    Some(get_cache_dir()?.join(APP_DIR).join("logs"))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

fn get_cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
