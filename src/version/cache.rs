//! Time-bounded local cache of the release list
//!
//! The raw feed response is stored verbatim. A cached entry is served while
//! its age is below the TTL; otherwise the list is fetched again from the
//! registry and the entry is replaced.

use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::version::error::CacheError;
use crate::version::registry::Registry;
use crate::version::types::Release;

/// Source of the current time, injectable for tests.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A stored release list and the time it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub contents: Vec<u8>,
    pub modified: DateTime<Utc>,
}

/// Backing storage for a single cache entry.
pub trait CacheStore {
    /// Returns the stored entry, or `None` if nothing has been stored.
    fn load(&self) -> Result<Option<CacheEntry>, CacheError>;

    /// Replaces the stored entry. `now` is the write time as seen by the cache.
    fn save(&self, contents: &[u8], now: DateTime<Utc>) -> Result<(), CacheError>;

    /// Removes the stored entry. Removing a missing entry succeeds.
    fn remove(&self) -> Result<(), CacheError>;
}

/// Stores the entry as a file; freshness comes from its modification time.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CacheStore for FileStore {
    fn load(&self) -> Result<Option<CacheEntry>, CacheError> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let modified = DateTime::<Utc>::from(metadata.modified()?);
        let contents = fs::read(&self.path)?;

        Ok(Some(CacheEntry { contents, modified }))
    }

    fn save(&self, contents: &[u8], _now: DateTime<Utc>) -> Result<(), CacheError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        // Write beside the target and rename so readers never see a partial file
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(contents)?;
        file.persist(&self.path).map_err(|e| e.error)?;

        debug!("Wrote {} bytes to {:?}", contents.len(), self.path);
        Ok(())
    }

    fn remove(&self) -> Result<(), CacheError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store, stamped with the cache's clock on write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entry: RefCell<Option<CacheEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(contents: impl Into<Vec<u8>>, modified: DateTime<Utc>) -> Self {
        Self {
            entry: RefCell::new(Some(CacheEntry {
                contents: contents.into(),
                modified,
            })),
        }
    }

    pub fn entry(&self) -> Option<CacheEntry> {
        self.entry.borrow().clone()
    }
}

impl CacheStore for MemoryStore {
    fn load(&self) -> Result<Option<CacheEntry>, CacheError> {
        Ok(self.entry())
    }

    fn save(&self, contents: &[u8], now: DateTime<Utc>) -> Result<(), CacheError> {
        *self.entry.borrow_mut() = Some(CacheEntry {
            contents: contents.to_vec(),
            modified: now,
        });
        Ok(())
    }

    fn remove(&self) -> Result<(), CacheError> {
        self.entry.borrow_mut().take();
        Ok(())
    }
}

/// Anything that can supply the current release list.
pub trait ReleaseSource {
    fn releases(&self) -> Result<Vec<Release>, CacheError>;
}

impl ReleaseSource for [Release] {
    fn releases(&self) -> Result<Vec<Release>, CacheError> {
        Ok(self.to_vec())
    }
}

impl ReleaseSource for Vec<Release> {
    fn releases(&self) -> Result<Vec<Release>, CacheError> {
        Ok(self.clone())
    }
}

pub struct ReleaseCache<S, R, C = SystemClock> {
    store: S,
    registry: R,
    clock: C,
    ttl: TimeDelta,
}

impl<S: CacheStore, R: Registry> ReleaseCache<S, R> {
    pub fn new(store: S, registry: R, ttl: TimeDelta) -> Self {
        Self {
            store,
            registry,
            clock: SystemClock,
            ttl,
        }
    }
}

impl<S: CacheStore, R: Registry, C: Clock> ReleaseCache<S, R, C> {
    pub fn with_clock<C2: Clock>(self, clock: C2) -> ReleaseCache<S, R, C2> {
        ReleaseCache {
            store: self.store,
            registry: self.registry,
            clock,
            ttl: self.ttl,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the release list, from the store while fresh, otherwise from
    /// the registry.
    ///
    /// A corrupted entry is discarded and treated as a miss.
    pub fn get_releases(&self) -> Result<Vec<Release>, CacheError> {
        if let Some(releases) = self.load_fresh()? {
            return Ok(releases);
        }
        self.refresh()
    }

    fn load_fresh(&self) -> Result<Option<Vec<Release>>, CacheError> {
        let Some(entry) = self.store.load()? else {
            debug!("No cached releases");
            return Ok(None);
        };

        let age = self.clock.now() - entry.modified;
        if age.abs() >= self.ttl {
            debug!("Cached releases are stale (age {}s)", age.num_seconds());
            return Ok(None);
        }

        match serde_json::from_slice::<Vec<Release>>(&entry.contents) {
            Ok(releases) => {
                debug!("Using {} cached releases", releases.len());
                Ok(Some(releases))
            }
            Err(e) => {
                warn!("Could not parse cached releases: {}", e);
                if let Err(e) = self.store.remove() {
                    debug!("Failed to remove corrupted cache entry: {}", e);
                }
                Ok(None)
            }
        }
    }

    fn refresh(&self) -> Result<Vec<Release>, CacheError> {
        let body = self.registry.fetch_releases()?;
        let releases: Vec<Release> = serde_json::from_str(&body)?;

        self.store.save(body.as_bytes(), self.clock.now())?;
        info!("Cached {} releases", releases.len());

        Ok(releases)
    }
}

impl<S: CacheStore, R: Registry, C: Clock> ReleaseSource for ReleaseCache<S, R, C> {
    fn releases(&self) -> Result<Vec<Release>, CacheError> {
        self.get_releases()
    }
}
