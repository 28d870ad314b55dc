//! Fetch Module
//!
//! The fetch collaborator boundary: the cache composes with anything that
//! can resolve a key to content, and the filesystem fetcher is the one
//! implementation this server ships.

mod fs;

use std::future::Future;

pub use fs::{FsFetcher, ReadMode};

use crate::cache::CacheEntry;
use crate::error::FetchError;

// == Fetch Trait ==
/// Resolves a key to content bytes and a content type.
///
/// Implementations report failures through the shared error taxonomy; the
/// cache layer passes them through without inspecting them.
pub trait Fetch: Send + Sync + 'static {
    fn fetch(&self, key: &str) -> impl Future<Output = Result<CacheEntry, FetchError>> + Send;
}
