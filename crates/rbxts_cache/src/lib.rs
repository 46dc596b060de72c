//! rbxts-lint cache - File caching for incremental linting
//!
//! Stores file content hashes and lint results to skip unchanged files,
//! plus directory listings for the cache-aware walker. Uses DashMap for
//! lock-free concurrent access from the rayon workers.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::SystemTime;

const CACHE_VERSION: u32 = 2;
const CACHE_DIR: &str = ".rbxts-lint-cache";
const CACHE_FILE: &str = "cache.json";

/// Cached tsconfig.json data
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TsconfigCache {
    pub mtime: u64,
    pub type_roots: Vec<String>,
}

/// A cached directory entry for smart walking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirCacheEntry {
    /// Modification time of the directory
    pub mtime: u64,
    /// Direct child TypeScript files
    pub files: Vec<PathBuf>,
    /// Direct child subdirectories
    pub subdirs: Vec<PathBuf>,
}

/// A cached file entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Hash of the file contents
    pub content_hash: u64,
    /// Modification time (unix timestamp)
    pub mtime: u64,
    /// Number of diagnostics found
    pub diagnostic_count: usize,
    /// Whether the file had errors
    pub has_errors: bool,
}

/// Serializable version of Cache for disk storage
#[derive(Debug, Serialize, Deserialize)]
struct SerializableCache {
    version: u32,
    entries: HashMap<PathBuf, CacheEntry>,
    directories: HashMap<PathBuf, DirCacheEntry>,
    tsconfig: Option<TsconfigCache>,
}

/// The file cache - uses DashMap for lock-free concurrent access
pub struct Cache {
    /// Cache format version
    version: u32,
    /// Cached entries by file path
    entries: DashMap<PathBuf, CacheEntry>,
    /// Cached directory structures
    pub directories: DashMap<PathBuf, DirCacheEntry>,
    /// Cached tsconfig data (single value)
    tsconfig: RwLock<Option<TsconfigCache>>,
}

impl Cache {
    pub fn new() -> Self {
        Self {
            version: CACHE_VERSION,
            entries: DashMap::new(),
            directories: DashMap::new(),
            tsconfig: RwLock::new(None),
        }
    }

    /// Load cache from disk
    pub fn load(project_root: &Path) -> Self {
        let cache_path = project_root.join(CACHE_DIR).join(CACHE_FILE);

        if let Ok(content) = fs::read_to_string(&cache_path) {
            if let Ok(serializable) = serde_json::from_str::<SerializableCache>(&content) {
                if serializable.version == CACHE_VERSION {
                    let cache = Cache::new();
                    for (k, v) in serializable.entries {
                        cache.entries.insert(k, v);
                    }
                    for (k, v) in serializable.directories {
                        cache.directories.insert(k, v);
                    }
                    if let Ok(mut guard) = cache.tsconfig.write() {
                        *guard = serializable.tsconfig;
                    }
                    return cache;
                }
            }
        }

        Self::new()
    }

    /// Save cache to disk
    pub fn save(&self, project_root: &Path) -> std::io::Result<()> {
        let cache_dir = project_root.join(CACHE_DIR);
        fs::create_dir_all(&cache_dir)?;

        let serializable = SerializableCache {
            version: self.version,
            entries: self
                .entries
                .iter()
                .map(|r| (r.key().clone(), r.value().clone()))
                .collect(),
            directories: self
                .directories
                .iter()
                .map(|r| (r.key().clone(), r.value().clone()))
                .collect(),
            tsconfig: self.tsconfig.read().ok().and_then(|g| g.clone()),
        };

        let cache_path = cache_dir.join(CACHE_FILE);
        let content = serde_json::to_string_pretty(&serializable)?;
        fs::write(cache_path, content)
    }

    /// Get cached typeRoots if the tsconfig hasn't changed
    pub fn get_tsconfig_type_roots(&self, tsconfig_path: &Path) -> Option<Vec<String>> {
        let mtime = get_mtime(tsconfig_path)?;
        let guard = self.tsconfig.read().ok()?;
        guard
            .as_ref()
            .filter(|c| c.mtime == mtime)
            .map(|c| c.type_roots.clone())
    }

    /// Cache tsconfig typeRoots
    pub fn set_tsconfig_type_roots(&self, tsconfig_path: &Path, type_roots: Vec<String>) {
        let mtime = get_mtime(tsconfig_path).unwrap_or(0);
        if let Ok(mut guard) = self.tsconfig.write() {
            *guard = Some(TsconfigCache { mtime, type_roots });
        }
    }

    /// Check if a file is cached and unchanged using a pre-computed hash
    pub fn is_fresh_with_hash(&self, path: &Path, hash: u64) -> bool {
        self.entries
            .get(path)
            .is_some_and(|entry| entry.content_hash == hash)
    }

    pub fn is_fresh(&self, path: &Path, content: &str) -> bool {
        self.is_fresh_with_hash(path, hash_content(content))
    }

    /// Get a cached entry (cloned; DashMap cannot hand out references)
    pub fn get(&self, path: &Path) -> Option<CacheEntry> {
        self.entries.get(path).map(|r| r.value().clone())
    }

    /// Update a file's cache entry
    pub fn update(&self, path: PathBuf, content: &str, diagnostic_count: usize, has_errors: bool) {
        self.entries.insert(
            path.clone(),
            CacheEntry {
                content_hash: hash_content(content),
                mtime: get_mtime(&path).unwrap_or(0),
                diagnostic_count,
                has_errors,
            },
        );
    }

    /// Remove stale entries based on a set of confirmed files
    pub fn prune_with_confirmed(&self, confirmed: &dashmap::DashSet<PathBuf>) {
        self.entries.retain(|path, _| confirmed.contains(path));
    }

    /// Get all cached file paths
    pub fn get_files(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|r| r.key().clone()).collect()
    }

    /// Clear all cache entries
    pub fn clear(&self) {
        self.entries.clear();
        self.directories.clear();
        if let Ok(mut guard) = self.tsconfig.write() {
            *guard = None;
        }
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("version", &self.version)
            .field("entries_count", &self.entries.len())
            .field("directories_count", &self.directories.len())
            .finish()
    }
}

/// Compute a fast hash of file content
pub fn hash_content(content: &str) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = ahash::AHasher::default();
    content.hash(&mut hasher);
    hasher.finish()
}

/// Get file modification time as unix timestamp
pub fn get_mtime(path: &Path) -> Option<u64> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_and_content_sensitive() {
        assert_eq!(hash_content("abc"), hash_content("abc"));
        assert_ne!(hash_content("abc"), hash_content("abd"));
    }

    #[test]
    fn freshness_follows_content_hash() {
        let cache = Cache::new();
        let path = PathBuf::from("src/main.ts");
        cache.update(path.clone(), "let a = 1;", 0, false);
        assert!(cache.is_fresh(&path, "let a = 1;"));
        assert!(!cache.is_fresh(&path, "let a = 2;"));
    }

    #[test]
    fn prune_drops_unconfirmed_entries() {
        let cache = Cache::new();
        cache.update(PathBuf::from("a.ts"), "", 0, false);
        cache.update(PathBuf::from("b.ts"), "", 0, false);
        let confirmed = dashmap::DashSet::new();
        confirmed.insert(PathBuf::from("a.ts"));
        cache.prune_with_confirmed(&confirmed);
        assert_eq!(cache.get_files(), vec![PathBuf::from("a.ts")]);
    }

    #[test]
    fn entry_round_trip() {
        let cache = Cache::new();
        cache.update(PathBuf::from("x.ts"), "const x = 0;", 3, true);
        let entry = cache.get(Path::new("x.ts")).expect("entry");
        assert_eq!(entry.diagnostic_count, 3);
        assert!(entry.has_errors);
    }

    #[test]
    fn disk_round_trip() {
        let root = std::env::temp_dir().join(format!(
            "rbxts-lint-cache-test-{}",
            std::process::id()
        ));
        fs::create_dir_all(&root).expect("temp dir");

        let cache = Cache::new();
        cache.update(PathBuf::from("src/a.ts"), "let a = 1;", 2, false);
        cache.save(&root).expect("save");

        let loaded = Cache::load(&root);
        let entry = loaded.get(Path::new("src/a.ts")).expect("loaded entry");
        assert_eq!(entry.diagnostic_count, 2);
        assert!(loaded.is_fresh(Path::new("src/a.ts"), "let a = 1;"));

        let _ = fs::remove_dir_all(&root);
    }
}
