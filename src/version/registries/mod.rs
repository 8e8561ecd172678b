//! Registry implementations for fetching release lists

pub mod github;

pub use github::GitHubRegistry;
