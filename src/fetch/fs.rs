//! Filesystem Fetcher Module
//!
//! Reads files relative to a root directory and tags them with a guessed
//! content type.

use std::io;
use std::path::{Path, PathBuf};

use crate::cache::CacheEntry;
use crate::error::FetchError;
use crate::fetch::Fetch;

const BINARY_CONTENT_TYPE: &str = "application/octet-stream";

// == Read Mode ==
/// How file contents are read. A hint interpreted only here; the cache
/// never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Non-blocking read on the async runtime
    #[default]
    Async,
    /// Blocking read, dispatched to the blocking thread pool
    Sync,
}

// == Fs Fetcher ==
/// Fetches files from a root directory.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    /// Directory keys are resolved against
    root: PathBuf,
    /// Read strategy
    mode: ReadMode,
}

impl FsFetcher {
    // == Constructor ==
    pub fn new(root: impl Into<PathBuf>, mode: ReadMode) -> Self {
        Self {
            root: root.into(),
            mode,
        }
    }

    // == Resolve ==
    /// Maps a key to a path under the root.
    ///
    /// Keys containing a `..` segment never reach the filesystem.
    fn resolve(&self, key: &str) -> Option<PathBuf> {
        if key.split(['/', '\\']).any(|segment| segment == "..") {
            return None;
        }
        Some(self.root.join(key.trim_start_matches('/')))
    }
}

impl Fetch for FsFetcher {
    async fn fetch(&self, key: &str) -> Result<CacheEntry, FetchError> {
        let Some(path) = self.resolve(key) else {
            return Err(FetchError::NotFound(key.to_string()));
        };

        let bytes = match self.mode {
            ReadMode::Async => tokio::fs::read(&path).await,
            ReadMode::Sync => {
                let path = path.clone();
                tokio::task::spawn_blocking(move || std::fs::read(path))
                    .await
                    .map_err(|err| FetchError::Other(err.to_string()))?
            }
        }
        .map_err(|err| map_io_error(err, &path))?;

        Ok(CacheEntry::new(bytes, content_type_for(&path)))
    }
}

// == Error Mapping ==
fn map_io_error(err: io::Error, path: &Path) -> FetchError {
    let shown = path.display().to_string();
    match err.kind() {
        io::ErrorKind::NotFound => FetchError::NotFound(shown),
        io::ErrorKind::IsADirectory => FetchError::IsDirectory(shown),
        // Some platforms report a directory read as a generic error
        _ if path.is_dir() => FetchError::IsDirectory(shown),
        _ => FetchError::Other(err.to_string()),
    }
}

// == Content Type ==
/// Guesses a content type from the file extension, falling back to a
/// binary type when nothing matches.
fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(BINARY_CONTENT_TYPE)
        .to_string()
}
