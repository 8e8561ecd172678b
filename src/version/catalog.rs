//! Categorized, ordered views over a release list

use tracing::debug;

use crate::version::semver::Version;
use crate::version::types::Release;

/// A release whose tag parsed as a [`Version`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub version: Version,
    pub tag: String,
}

/// Releases split into all / release candidates / stable, each sorted
/// newest first.
///
/// Routing into `release_candidates` and `stable` follows the feed's own
/// `prerelease` flag, not [`Version::is_prerelease`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub all: Vec<CatalogEntry>,
    pub release_candidates: Vec<CatalogEntry>,
    pub stable: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from raw releases. Never fails: releases whose tag
    /// does not parse are skipped.
    pub fn build(releases: &[Release]) -> Self {
        let mut catalog = Self::default();

        for release in releases {
            let version = match Version::parse(&release.tag_name) {
                Ok(version) => version,
                Err(e) => {
                    debug!("Skipping release: {}", e);
                    continue;
                }
            };
            let entry = CatalogEntry {
                version,
                tag: release.tag_name.clone(),
            };

            if release.prerelease {
                catalog.release_candidates.push(entry.clone());
            } else {
                catalog.stable.push(entry.clone());
            }
            catalog.all.push(entry);
        }

        sort_newest_first(&mut catalog.all);
        sort_newest_first(&mut catalog.release_candidates);
        sort_newest_first(&mut catalog.stable);

        catalog
    }
}

/// Returns the tag of the first (highest) entry.
pub fn highest(entries: &[CatalogEntry]) -> Option<&str> {
    entries.first().map(|e| e.tag.as_str())
}

// Equal versions fall back to tag order so the result never depends on feed order
fn sort_newest_first(entries: &mut [CatalogEntry]) {
    entries.sort_by(|a, b| {
        b.version
            .cmp(&a.version)
            .then_with(|| b.tag.cmp(&a.tag))
    });
}
