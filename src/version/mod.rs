//! Version resolution layer
//!
//! This module provides the core functionality for fetching, caching, parsing,
//! and resolving Bazel release versions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│    Cache    │◀────│  Resolver   │
//! │  (fetch)    │     │  (storage)  │     │  (query)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │   Semver    │◀────│   Catalog   │
//!                     │ (parse/cmp) │     │ (categorize)│
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache`]: TTL-bounded release list cache with pluggable store and clock
//! - [`catalog`]: Splits releases into all / release candidates / stable, newest first
//! - [`error`]: Error types for parsing, resolution, cache and registry operations
//! - [`registry`]: Registry trait for fetching the release list
//! - [`registries`]: Concrete registry implementations (GitHub Releases)
//! - [`resolver`]: Query classification and resolution strategies
//! - [`semver`]: Release version grammar and ordering
//! - [`types`]: Common types like `Release`

pub mod cache;
pub mod catalog;
pub mod error;
pub mod registries;
pub mod registry;
pub mod resolver;
pub mod semver;
pub mod types;
