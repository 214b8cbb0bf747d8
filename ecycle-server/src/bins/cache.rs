//! Process-wide cache for loaded bin tables.
//!
//! The source file changes rarely, so the parsed table is memoized with
//! an explicit invalidation key of (path, modification time): a repeat
//! load of an unchanged file returns the cached table without touching
//! the filesystem beyond a stat, and touching the file forces a fresh
//! parse. Entries hold the table behind an `Arc`, so concurrent
//! sessions share one immutable copy.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use moka::future::Cache as MokaCache;

use super::error::DataError;
use super::load::load_table;
use super::table::BinTable;

/// A parsed table stamped with the mtime it was parsed from.
#[derive(Clone)]
struct CachedTable {
    mtime: SystemTime,
    table: Arc<BinTable>,
}

/// Configuration for the table cache.
#[derive(Debug, Clone)]
pub struct BinCacheConfig {
    /// Maximum number of distinct source paths to keep.
    pub max_capacity: u64,
}

impl Default for BinCacheConfig {
    fn default() -> Self {
        Self { max_capacity: 8 }
    }
}

/// Mtime-keyed cache over [`load_table`].
pub struct CachedBinSource {
    tables: MokaCache<PathBuf, CachedTable>,
}

impl CachedBinSource {
    /// Create a cache with the given configuration.
    pub fn new(config: &BinCacheConfig) -> Self {
        let tables = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .build();

        Self { tables }
    }

    /// Load the table for `path`, reusing the cached parse while the
    /// file's modification time is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Unavailable`] if the file does not exist;
    /// parse failures propagate from [`load_table`]. A failed reparse
    /// does not overwrite a previously cached entry.
    pub async fn load(&self, path: &Path) -> Result<Arc<BinTable>, DataError> {
        let mtime = modified_time(path)?;

        if let Some(entry) = self.tables.get(path).await
            && entry.mtime == mtime
        {
            return Ok(entry.table);
        }

        let table = Arc::new(load_table(path)?);
        self.tables
            .insert(
                path.to_path_buf(),
                CachedTable {
                    mtime,
                    table: Arc::clone(&table),
                },
            )
            .await;

        Ok(table)
    }

    /// Number of cached source paths.
    pub fn entry_count(&self) -> u64 {
        self.tables.entry_count()
    }

    /// Drop all cached tables.
    pub fn invalidate_all(&self) {
        self.tables.invalidate_all();
    }
}

/// Stat the source file for its modification time.
fn modified_time(path: &Path) -> Result<SystemTime, DataError> {
    let metadata = std::fs::metadata(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            DataError::Unavailable(path.to_path_buf())
        } else {
            DataError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    metadata.modified().map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::OpenOptions;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    const HEADER: &str = "상호명,수거장소(주소),위도,경도\n";

    fn write_csv(dir: &TempDir, rows: &str) -> PathBuf {
        let path = dir.path().join("daejeon_map.csv");
        std::fs::write(&path, format!("{HEADER}{rows}")).unwrap();
        path
    }

    fn set_mtime(path: &Path, mtime: SystemTime) {
        let file = OpenOptions::new().write(true).open(path).unwrap();
        file.set_modified(mtime).unwrap();
    }

    #[tokio::test]
    async fn unchanged_file_reuses_the_cached_table() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "A,대전 유성구 1,36.1,127.3\n");
        let source = CachedBinSource::new(&BinCacheConfig::default());

        let first = source.load(&path).await.unwrap();
        let second = source.load(&path).await.unwrap();

        assert_eq!(first, second);
        // Same allocation, not just equal contents
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn cache_key_is_mtime_not_content() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "A,대전 유성구 1,36.1,127.3\n");
        let original_mtime = modified_time(&path).unwrap();

        let source = CachedBinSource::new(&BinCacheConfig::default());
        let first = source.load(&path).await.unwrap();
        assert_eq!(first.len(), 1);

        // Rewrite the content but restore the original mtime: the cache
        // must keep serving the first parse.
        std::fs::write(
            &path,
            format!("{HEADER}A,대전 유성구 1,36.1,127.3\nB,대전 서구 2,36.2,127.4\n"),
        )
        .unwrap();
        set_mtime(&path, original_mtime);

        let cached = source.load(&path).await.unwrap();
        assert_eq!(cached.len(), 1);
        assert!(Arc::ptr_eq(&first, &cached));

        // Advancing the mtime invalidates the entry and reparses.
        set_mtime(&path, original_mtime + Duration::from_secs(10));
        let fresh = source.load(&path).await.unwrap();
        assert_eq!(fresh.len(), 2);
    }

    #[tokio::test]
    async fn touched_but_unchanged_file_reparses_to_an_equal_table() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "A,대전 유성구 1,36.1,127.3\n");

        let source = CachedBinSource::new(&BinCacheConfig::default());
        let first = source.load(&path).await.unwrap();

        let mtime = modified_time(&path).unwrap();
        set_mtime(&path, mtime + Duration::from_secs(60));

        let second = source.load(&path).await.unwrap();
        assert_eq!(first, second);
        // A different parse, driven by the changed key
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let source = CachedBinSource::new(&BinCacheConfig::default());
        let result = source.load(Path::new("/nonexistent/daejeon_map.csv")).await;
        assert!(matches!(result, Err(DataError::Unavailable(_))));
        assert_eq!(source.entry_count(), 0);
    }
}
