//! rbxts-project - tsconfig.json project model
//!
//! Locates the project's tsconfig.json, extracts the compiler options the
//! linter consumes (typeRoots), and derives the allowed npm scopes.

mod tsconfig;

pub use tsconfig::{CompilerOptions, Tsconfig};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default typeRoots when a project does not declare any, matching the
/// standard roblox-ts template.
pub const DEFAULT_TYPE_ROOTS: &[&str] = &["node_modules/@rbxts"];

/// A located roblox-ts project
#[derive(Debug)]
pub struct Project {
    /// Directory containing tsconfig.json
    pub root: PathBuf,
    /// Path to tsconfig.json
    pub tsconfig_path: PathBuf,
    tsconfig: Tsconfig,
}

impl Project {
    /// Locate a project by walking upward from `start` until a
    /// tsconfig.json is found.
    pub fn locate(start: &Path) -> Option<PathBuf> {
        let mut current = if start.is_dir() {
            Some(start)
        } else {
            start.parent()
        };
        while let Some(dir) = current {
            let candidate = dir.join("tsconfig.json");
            if candidate.is_file() {
                return Some(candidate);
            }
            current = dir.parent();
        }
        None
    }

    /// Open the project rooted at the given tsconfig.json
    pub fn open(tsconfig_path: PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(&tsconfig_path)
            .with_context(|| format!("failed to read {}", tsconfig_path.display()))?;
        let tsconfig = Tsconfig::parse(&content)
            .with_context(|| format!("failed to parse {}", tsconfig_path.display()))?;
        let root = tsconfig_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self {
            root,
            tsconfig_path,
            tsconfig,
        })
    }

    /// Locate and open the project for a path, if any
    pub fn discover(start: &Path) -> Option<Self> {
        let tsconfig_path = Self::locate(start)?;
        Self::open(tsconfig_path).ok()
    }

    /// Declared typeRoots, or the roblox-ts default when absent
    pub fn type_roots(&self) -> Vec<String> {
        self.tsconfig
            .compiler_options
            .as_ref()
            .and_then(|o| o.type_roots.clone())
            .unwrap_or_else(|| DEFAULT_TYPE_ROOTS.iter().map(|s| s.to_string()).collect())
    }

    /// typeRoots that exist on disk (fast synchronous existence check,
    /// consulted once per run, never during a file's traversal)
    pub fn existing_type_roots(&self) -> Vec<PathBuf> {
        self.type_roots()
            .iter()
            .map(|root| self.root.join(root))
            .filter(|path| path.is_dir())
            .collect()
    }

    /// npm scopes derived from the typeRoots directory names
    pub fn allowed_scopes(&self) -> Vec<String> {
        allowed_scopes_from(&self.type_roots())
    }
}

/// Extract `@scope` names from typeRoots paths: a root ending in `@x`
/// allows imports from `@x/...`.
pub fn allowed_scopes_from(type_roots: &[String]) -> Vec<String> {
    let mut scopes = Vec::new();
    for root in type_roots {
        let normalized = root.replace('\\', "/");
        let last = normalized.rsplit('/').next().unwrap_or(&normalized);
        if let Some(name) = last.strip_prefix('@') {
            if !name.is_empty() && !scopes.iter().any(|s| s == last) {
                scopes.push(last.to_string());
            }
        }
    }
    scopes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_scopes_from_type_roots() {
        let roots = vec![
            "node_modules/@rbxts".to_string(),
            "node_modules/@flamework".to_string(),
            "node_modules/plain".to_string(),
        ];
        assert_eq!(
            allowed_scopes_from(&roots),
            vec!["@rbxts".to_string(), "@flamework".to_string()]
        );
    }

    #[test]
    fn deduplicates_scopes() {
        let roots = vec![
            "a/@rbxts".to_string(),
            "b/@rbxts".to_string(),
        ];
        assert_eq!(allowed_scopes_from(&roots), vec!["@rbxts".to_string()]);
    }
}
