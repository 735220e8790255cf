//! Result cache for generated reports.
//!
//! Reports are keyed by the absolute path of the source file, flattened
//! into a single file name under `<save_dir>/cache/<tool>/`. A cache entry
//! is only served while it is at least as new as its source file.

use chunkwise_core::AppResult;
use std::path::{Path, PathBuf};

/// Per-tool cache of rendered reports.
pub struct ResultCache {
    dir: PathBuf,
}

impl ResultCache {
    /// Create a cache for `tool` rooted under `save_dir`.
    pub fn new(save_dir: &Path, tool: &str) -> Self {
        Self {
            dir: save_dir.join("cache").join(tool),
        }
    }

    /// Cache file path for a source file.
    pub fn cache_path(&self, source: &Path) -> PathBuf {
        let absolute = std::fs::canonicalize(source).unwrap_or_else(|_| source.to_path_buf());
        let flattened = absolute
            .to_string_lossy()
            .replace(['/', '\\', ':'], "_");
        self.dir.join(format!("{}.md", flattened))
    }

    /// Read a cached report, if it is still fresh.
    ///
    /// Returns `None` when either file is missing or the source has been
    /// modified after the cache entry was written.
    pub fn read(&self, source: &Path) -> Option<String> {
        let cache_path = self.cache_path(source);

        let source_mtime = std::fs::metadata(source).and_then(|m| m.modified()).ok()?;
        let cache_mtime = std::fs::metadata(&cache_path)
            .and_then(|m| m.modified())
            .ok()?;

        if source_mtime > cache_mtime {
            tracing::debug!("Cache entry for {:?} is stale", source);
            return None;
        }

        std::fs::read_to_string(&cache_path).ok()
    }

    /// Write a report to the cache.
    pub fn write(&self, source: &Path, content: &str) -> AppResult<PathBuf> {
        let cache_path = self.cache_path(source);

        if let Some(parent) = cache_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&cache_path, content)?;
        Ok(cache_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_path_flattens_separators() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResultCache::new(dir.path(), "explain");

        let path = cache.cache_path(Path::new("/some/source/file.rs"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();

        assert!(path.starts_with(dir.path().join("cache").join("explain")));
        assert_eq!(name, "_some_source_file.rs.md");
    }

    #[test]
    fn test_read_misses_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResultCache::new(dir.path(), "explain");

        assert!(cache.read(Path::new("/no/such/file.rs")).is_none());
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("input.rs");
        std::fs::write(&source, "fn main() {}").unwrap();

        let cache = ResultCache::new(dir.path(), "explain");
        cache.write(&source, "# report").unwrap();

        assert_eq!(cache.read(&source).as_deref(), Some("# report"));
    }

    #[test]
    fn test_stale_entry_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("input.rs");
        std::fs::write(&source, "fn main() {}").unwrap();

        let cache = ResultCache::new(dir.path(), "explain");
        cache.write(&source, "# report").unwrap();

        // Push the source mtime past the cache entry's.
        std::thread::sleep(std::time::Duration::from_millis(1100));
        std::fs::write(&source, "fn main() { changed() }").unwrap();

        assert!(cache.read(&source).is_none());
    }
}
