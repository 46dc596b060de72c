//! Cache-aware directory walker
//!
//! Recursively walks the project tree. For each directory:
//! 1. Checks mtime against the cache.
//! 2. If mtime matches (fast path): emits cached files and recurses into
//!    cached subdirs.
//! 3. If mtime differs (slow path): reads the directory, updates the
//!    cache, emits files, and recurses.

use crossbeam_channel::Sender;
use dashmap::DashSet;
use rayon::prelude::*;
use rbxts_cache::{get_mtime, Cache, DirCacheEntry};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct SmartWalker {
    tx: Sender<PathBuf>,
    seen: Arc<DashSet<PathBuf>>,
    confirmed: Arc<DashSet<PathBuf>>,
    exclude_patterns: Option<Vec<String>>,
    cache: Arc<Cache>,
}

fn is_lintable(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "ts" || ext == "tsx")
        && !path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(".d.ts"))
}

impl SmartWalker {
    pub fn new(
        tx: Sender<PathBuf>,
        seen: Arc<DashSet<PathBuf>>,
        confirmed: Arc<DashSet<PathBuf>>,
        exclude_patterns: Option<Vec<String>>,
        cache: Arc<Cache>,
    ) -> Self {
        // Normalize patterns on creation to avoid re-normalizing in loop
        let exclude_patterns = exclude_patterns
            .map(|patterns| patterns.into_iter().map(|p| p.replace('\\', "/")).collect());

        Self {
            tx,
            seen,
            confirmed,
            exclude_patterns,
            cache,
        }
    }

    pub fn run(&self, paths: &[PathBuf]) {
        paths.par_iter().for_each(|path| {
            if path.is_file() {
                self.handle_file(path);
            } else if path.is_dir() {
                self.walk_dir(path, true);
            }
        });
    }

    fn handle_file(&self, path: &Path) {
        if is_lintable(path) && !self.is_excluded(path) {
            self.confirmed.insert(path.to_path_buf());
            if self.seen.insert(path.to_path_buf()) {
                let _ = self.tx.send(path.to_path_buf());
            }
        }
    }

    fn walk_dir(&self, dir: &Path, is_root: bool) {
        if !is_root {
            if let Some(name) = dir.file_name().and_then(|n| n.to_str()) {
                if name == "node_modules" || name == "target" || name.starts_with('.') {
                    return;
                }
            }
        }

        if self.is_excluded(dir) {
            return;
        }

        let current_mtime = get_mtime(dir);

        // Fast path: unchanged directory, replay the cached listing
        let cached_entry = current_mtime.and_then(|mtime| {
            self.cache
                .directories
                .get(dir)
                .filter(|entry| entry.mtime == mtime)
                .map(|entry| entry.clone())
        });

        if let Some(entry) = cached_entry {
            for file_path in &entry.files {
                self.handle_file(file_path);
            }
            entry.subdirs.par_iter().for_each(|subdir| {
                self.walk_dir(subdir, false);
            });
            return;
        }

        // Slow path: read the directory and refresh the cache
        let Ok(read_dir) = std::fs::read_dir(dir) else {
            return;
        };

        let mut files = Vec::new();
        let mut subdirs = Vec::new();

        for entry in read_dir.flatten() {
            let path = entry.path();
            let file_name = entry.file_name();
            let name_str = file_name.to_string_lossy();

            if name_str == "node_modules" || name_str == "target" || name_str.starts_with('.') {
                continue;
            }

            if path.is_dir() {
                subdirs.push(path.clone());
            } else if path.is_file() && is_lintable(&path) {
                files.push(path.clone());
                self.handle_file(&path);
            }
        }

        if let Some(mtime) = current_mtime {
            self.cache.directories.insert(
                dir.to_path_buf(),
                DirCacheEntry {
                    mtime,
                    files: files.clone(),
                    subdirs: subdirs.clone(),
                },
            );
        }

        subdirs.par_iter().for_each(|subdir| {
            self.walk_dir(subdir, false);
        });
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let Some(patterns) = &self.exclude_patterns else {
            return false;
        };

        let path_str_cow = path.to_string_lossy();
        if path_str_cow.is_empty() {
            return false;
        }

        let path_ref = if path_str_cow.contains('\\') {
            std::borrow::Cow::Owned(path_str_cow.replace('\\', "/"))
        } else {
            path_str_cow
        };

        patterns
            .iter()
            .any(|pattern| matches_glob_pattern(&path_ref, pattern))
    }
}

fn matches_glob_pattern(path: &str, pattern: &str) -> bool {
    // pattern and path are assumed to be normalized (forward slashes)
    if let Some(double_star_pos) = pattern.find("**") {
        let prefix = &pattern[..double_star_pos];
        let suffix = &pattern[double_star_pos + 2..];

        if !suffix.contains("**") {
            let prefix = prefix.trim_end_matches('/');
            let suffix = suffix.trim_start_matches('/');

            if !prefix.is_empty() && !path.contains(prefix) {
                return false;
            }
            if !suffix.is_empty() && !path.contains(suffix) {
                return false;
            }

            if !prefix.is_empty() && !suffix.is_empty() {
                if let (Some(prefix_pos), Some(suffix_pos)) = (path.find(prefix), path.find(suffix))
                {
                    return suffix_pos > prefix_pos + prefix.len();
                }
                return false;
            }
            return true;
        }
    }

    if pattern.contains('*') {
        let clean_pattern = pattern.trim_matches('*');
        return path.contains(clean_pattern);
    }

    path.contains(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lintable_extensions() {
        assert!(is_lintable(Path::new("src/main.ts")));
        assert!(is_lintable(Path::new("src/App.tsx")));
        assert!(!is_lintable(Path::new("src/types.d.ts")));
        assert!(!is_lintable(Path::new("src/readme.md")));
    }

    #[test]
    fn glob_matching() {
        assert!(matches_glob_pattern("src/generated/a.ts", "**/generated/**"));
        assert!(matches_glob_pattern("src/vendor/lib.ts", "vendor"));
        assert!(matches_glob_pattern("a/b/c.spec.ts", "*.spec.ts"));
        assert!(!matches_glob_pattern("src/main.ts", "tests/**"));
    }
}
