//! Cache Entry Module
//!
//! Defines the structure for individual cached files with expiry support.

use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;

// == Cache Entry ==
/// A single cached file: payload bytes, content type, optional expiry.
///
/// `Bytes` keeps clones cheap, which matters when stale content is handed
/// to a caller while a background revalidation is in flight.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The file contents
    pub payload: Bytes,
    /// Content type reported by the fetcher, stored verbatim
    pub content_type: String,
    /// Expiration timestamp (Unix milliseconds), None = never expires
    pub expires_at: Option<u64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry with no expiry set. The read-through policy stamps
    /// `expires_at` when it stores a fetch result.
    pub fn new(payload: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            content_type: content_type.into(),
            expires_at: None,
        }
    }

    // == Size ==
    /// Payload size in bytes. Only payload bytes count toward capacity;
    /// metadata overhead is not accounted.
    pub fn size(&self) -> u64 {
        self.payload.len() as u64
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to the expiration time. An entry with no
    /// expiration never expires.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
