//! Resolve symbolic Bazel version requests against published releases.
//!
//! Queries such as `latest`, `last_rc`, `7.x`, `7.*` or an exact tag are
//! matched against the release list, which is cached locally for an hour.

pub mod config;
pub mod version;

use crate::config::Config;
use crate::version::cache::{FileStore, ReleaseCache, ReleaseSource};
use crate::version::error::{Error, RegistryError};
use crate::version::registries::GitHubRegistry;
use crate::version::resolver::resolve_version_string;

/// Resolve `query` to a single release tag using releases from `source`.
pub fn resolve<S: ReleaseSource + ?Sized>(query: &str, source: &S) -> Result<String, Error> {
    let releases = source.releases()?;
    Ok(resolve_version_string(query, &releases)?)
}

/// Creates the file-backed release cache described by `config`.
pub fn release_cache(
    config: &Config,
) -> Result<ReleaseCache<FileStore, GitHubRegistry>, RegistryError> {
    let registry = GitHubRegistry::new(&config.releases_url, config.github_token.clone())?;
    Ok(ReleaseCache::new(
        FileStore::new(config.releases_path()),
        registry,
        config.cache_ttl,
    ))
}
