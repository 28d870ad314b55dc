//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::{UpdateMode, UpdatePolicy};
use crate::fetch::ReadMode;
use crate::units::{parse_interval, parse_size, IntervalSpec, SizeSpec};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory files are served from
    pub root_dir: PathBuf,
    /// HTTP server port
    pub server_port: u16,
    /// Maximum total cached payload bytes, None = unbounded
    pub capacity: Option<u64>,
    /// Cache update policy, None = caching disabled
    pub update: Option<UpdatePolicy>,
    /// Read strategy hint passed through to the filesystem fetcher
    pub read_mode: ReadMode,
    /// Retry directory requests with index.html appended
    pub index_redirect: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `ROOT_DIR` - Directory to serve (default: ./public)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_CAPACITY` - Size spec, e.g. "50mb", "1gi", "unlimited"
    ///   (default: unlimited)
    /// - `CACHE_UPDATE` - Interval spec enabling the cache, e.g. "5 minutes",
    ///   "30s", "never"; "immediate" or "enabled" revalidate on every
    ///   access; "disabled" or unset turns caching off entirely (default:
    ///   disabled)
    /// - `CACHE_MODE` - "cache_first" or "wait" (default: cache_first)
    /// - `READ_MODE` - "async" or "sync" (default: async)
    /// - `INDEX_REDIRECT` - "true" or "false" (default: true)
    pub fn from_env() -> Self {
        let mode = update_mode_from(env::var("CACHE_MODE").ok());
        Self {
            root_dir: env::var("ROOT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./public")),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            capacity: capacity_from(env::var("CACHE_CAPACITY").ok()),
            update: update_from(env::var("CACHE_UPDATE").ok(), mode),
            read_mode: read_mode_from(env::var("READ_MODE").ok()),
            index_redirect: env::var("INDEX_REDIRECT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("./public"),
            server_port: 3000,
            capacity: None,
            update: None,
            read_mode: ReadMode::Async,
            index_redirect: true,
        }
    }
}

// == Parsing Helpers ==

/// Capacity spec to an optional byte bound.
fn capacity_from(value: Option<String>) -> Option<u64> {
    let spec = value.map(SizeSpec::Text);
    let bytes = parse_size(spec.as_ref());
    (bytes >= 0).then_some(bytes as u64)
}

/// Update spec to an optional policy. Unset or "disabled" turns caching
/// off; an enabled cache with no usable interval revalidates immediately.
fn update_from(value: Option<String>, mode: UpdateMode) -> Option<UpdatePolicy> {
    let value = value?;
    let normalized = value.trim().to_ascii_lowercase();
    let expire_after = match normalized.as_str() {
        "disabled" => return None,
        "" | "enabled" | "immediate" => 0,
        _ => parse_interval(Some(&IntervalSpec::Text(value))),
    };
    Some(UpdatePolicy::new(expire_after, mode))
}

fn update_mode_from(value: Option<String>) -> UpdateMode {
    match value.as_deref() {
        Some("wait") => UpdateMode::Wait,
        _ => UpdateMode::CacheFirst,
    }
}

fn read_mode_from(value: Option<String>) -> ReadMode {
    match value.as_deref() {
        Some("sync") => ReadMode::Sync,
        _ => ReadMode::Async,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.root_dir, PathBuf::from("./public"));
        assert_eq!(config.server_port, 3000);
        assert!(config.capacity.is_none());
        assert!(config.update.is_none());
        assert_eq!(config.read_mode, ReadMode::Async);
        assert!(config.index_redirect);
    }

    #[test]
    fn test_capacity_from_spec() {
        assert_eq!(capacity_from(Some("50mb".to_string())), Some(50_000_000));
        assert_eq!(capacity_from(Some("unlimited".to_string())), None);
        assert_eq!(capacity_from(None), None);
    }

    #[test]
    fn test_update_disabled_by_default() {
        assert!(update_from(None, UpdateMode::CacheFirst).is_none());
        assert!(update_from(Some("disabled".to_string()), UpdateMode::CacheFirst).is_none());
    }

    #[test]
    fn test_update_enabled_without_interval_is_immediate() {
        let policy = update_from(Some("enabled".to_string()), UpdateMode::Wait).unwrap();
        assert_eq!(policy.expire_after, 0);
        assert_eq!(policy.mode, UpdateMode::Wait);
    }

    #[test]
    fn test_update_with_interval() {
        let policy = update_from(Some("5 minutes".to_string()), UpdateMode::CacheFirst).unwrap();
        assert_eq!(policy.expire_after, 300_000);
        assert_eq!(policy.mode, UpdateMode::CacheFirst);
    }

    #[test]
    fn test_update_never_expires() {
        let policy = update_from(Some("never".to_string()), UpdateMode::CacheFirst).unwrap();
        assert!(policy.expire_after < 0);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(update_mode_from(Some("wait".to_string())), UpdateMode::Wait);
        assert_eq!(update_mode_from(None), UpdateMode::CacheFirst);
        assert_eq!(
            update_mode_from(Some("cache_first".to_string())),
            UpdateMode::CacheFirst
        );
    }

    #[test]
    fn test_read_mode_parsing() {
        assert_eq!(read_mode_from(Some("sync".to_string())), ReadMode::Sync);
        assert_eq!(read_mode_from(None), ReadMode::Async);
    }
}
