//! Registry trait for fetching the release list from a remote feed

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;

/// Trait for fetching the raw release list
#[cfg_attr(test, automock)]
pub trait Registry {
    /// Fetches the release list
    ///
    /// # Returns
    /// * `Ok(String)` - The response body verbatim: a JSON array of release objects
    /// * `Err(RegistryError)` - If the fetch fails
    fn fetch_releases(&self) -> Result<String, RegistryError>;
}
