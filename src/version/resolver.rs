//! Query resolution
//!
//! Maps a user query to a single release tag:
//! - `latest`: highest stable release
//! - `last_rc`: highest release candidate, unless its final release is out
//! - `N.x`: highest non-prerelease version with major `N`
//! - `N.*`: highest version with major `N`, prereleases included
//! - anything else: exact tag lookup

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::version::catalog::{Catalog, CatalogEntry, highest};
use crate::version::error::ResolveError;
use crate::version::types::Release;

static MAJOR_STABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.x$").expect("major pattern regex is valid"));

static MAJOR_ANY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\*$").expect("major pattern regex is valid"));

/// A classified version query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Latest,
    LastRc,
    /// `N.x` (`include_prerelease == false`) or `N.*`.
    Major {
        major: String,
        include_prerelease: bool,
    },
    Exact(String),
}

impl Query {
    pub fn parse(query: &str) -> Self {
        match query {
            "latest" => return Self::Latest,
            "last_rc" => return Self::LastRc,
            _ => {}
        }

        if let Some(caps) = MAJOR_STABLE_RE.captures(query) {
            return Self::Major {
                major: caps[1].to_string(),
                include_prerelease: false,
            };
        }
        if let Some(caps) = MAJOR_ANY_RE.captures(query) {
            return Self::Major {
                major: caps[1].to_string(),
                include_prerelease: true,
            };
        }

        Self::Exact(query.to_string())
    }

    /// Resolve this query against a release list.
    pub fn resolve(&self, releases: &[Release]) -> Result<String, ResolveError> {
        match self {
            Self::Latest => latest_stable(&Catalog::build(releases)),
            Self::LastRc => last_rc(&Catalog::build(releases)),
            Self::Major {
                major,
                include_prerelease,
            } => by_major(&Catalog::build(releases), major, *include_prerelease),
            Self::Exact(tag) => exact(releases, tag),
        }
    }
}

/// Resolve a raw query string against a release list.
pub fn resolve_version_string(query: &str, releases: &[Release]) -> Result<String, ResolveError> {
    let query = Query::parse(query);
    debug!("Resolving {:?} against {} releases", query, releases.len());
    query.resolve(releases)
}

fn latest_stable(catalog: &Catalog) -> Result<String, ResolveError> {
    highest(&catalog.stable)
        .map(str::to_string)
        .ok_or(ResolveError::NoStableVersion)
}

fn last_rc(catalog: &Catalog) -> Result<String, ResolveError> {
    let Some(rc) = catalog.release_candidates.first() else {
        return highest(&catalog.stable)
            .map(str::to_string)
            .ok_or(ResolveError::NoVersionsFound);
    };

    // Once a candidate ships, its final release takes precedence
    let released = catalog
        .stable
        .iter()
        .find(|stable| stable.version.same_release(&rc.version));

    Ok(released.unwrap_or(rc).tag.clone())
}

fn by_major(
    catalog: &Catalog,
    major: &str,
    include_prerelease: bool,
) -> Result<String, ResolveError> {
    let matches = |entry: &&CatalogEntry| {
        entry.version.major.to_string() == major
            && (include_prerelease || !entry.version.is_prerelease)
    };

    catalog
        .all
        .iter()
        .find(matches)
        .map(|entry| entry.tag.clone())
        .ok_or_else(|| ResolveError::NoVersionForMajor(major.to_string()))
}

fn exact(releases: &[Release], tag: &str) -> Result<String, ResolveError> {
    releases
        .iter()
        .find(|release| release.tag_name == tag)
        .map(|release| release.tag_name.clone())
        .ok_or_else(|| ResolveError::VersionNotFound(tag.to_string()))
}
