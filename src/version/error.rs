use thiserror::Error;

/// A version string that does not start with at least one digit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid version: '{0}'")]
pub struct InvalidVersion(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    InvalidVersion(#[from] InvalidVersion),

    #[error("No valid versions found")]
    NoVersionsFound,

    #[error("No stable versions found")]
    NoStableVersion,

    #[error("No version found for major version '{0}'")]
    NoVersionForMajor(String),

    #[error("Version '{0}' not found in releases")]
    VersionNotFound(String),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Release feed not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O error")]
    Io(#[from] std::io::Error),

    #[error("Invalid release list")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Failure of a full resolution: either the release list could not be
/// obtained or the query matched nothing.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn error_chain_mentions_inner_cause_once() {
        let err = Error::from(CacheError::from(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "read-only file system",
        )));

        let message = format!("{:#}", anyhow::Error::from(err));

        assert_eq!(message, "Cache I/O error: read-only file system");
    }

    #[test]
    fn json_error_chain_mentions_inner_cause_once() {
        let json = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let expected = format!("Invalid release list: {json}");

        let message = format!("{:#}", anyhow::Error::from(CacheError::from(json)));

        assert_eq!(message, expected);
    }
}
