use std::path::PathBuf;

use chrono::TimeDelta;
use thiserror::Error;

// =============================================================================
// Time-related constants
// =============================================================================

/// Maximum age of the cached release list in seconds (1 hour)
pub const DEFAULT_CACHE_TTL_SECS: i64 = 60 * 60;

/// Timeout for fetching the release list in seconds
pub const FETCH_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Locations
// =============================================================================

/// GitHub Releases endpoint for Bazel
pub const DEFAULT_RELEASES_URL: &str = "https://api.github.com/repos/bazelbuild/bazel/releases";

/// Directory under the platform cache dir; shared with bazelisk
pub const CACHE_DIR_NAME: &str = "bazelisk";

pub const RELEASES_FILE_NAME: &str = "releases.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine a cache directory; set BAZELISK_HOME")]
    NoCacheDir,
}

/// Runtime configuration for a resolution run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub cache_dir: PathBuf,
    pub releases_url: String,
    pub github_token: Option<String>,
    pub cache_ttl: TimeDelta,
}

impl Config {
    /// Builds a configuration, falling back to the platform cache directory
    /// when no explicit one is given.
    pub fn new(cache_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        let cache_dir = cache_dir_with_env(cache_dir, dirs::cache_dir())?;
        Ok(Self {
            cache_dir,
            releases_url: DEFAULT_RELEASES_URL.to_string(),
            github_token: None,
            cache_ttl: TimeDelta::seconds(DEFAULT_CACHE_TTL_SECS),
        })
    }

    /// Returns the path to the cached release list.
    pub fn releases_path(&self) -> PathBuf {
        self.cache_dir.join(RELEASES_FILE_NAME)
    }
}

fn cache_dir_with_env(
    override_dir: Option<PathBuf>,
    platform_cache_dir: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }

    platform_cache_dir
        .map(|dir| dir.join(CACHE_DIR_NAME))
        .ok_or(ConfigError::NoCacheDir)
}
