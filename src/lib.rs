//! Static Cache - A lightweight static file server
//!
//! Serves files through a read-through cache with TTL revalidation and
//! size-bounded, insertion-order eviction.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod units;

pub use api::AppState;
pub use cache::{CacheEntry, CacheStore, CachedFetcher, UpdateMode, UpdatePolicy};
pub use config::Config;
pub use fetch::{Fetch, FsFetcher, ReadMode};
