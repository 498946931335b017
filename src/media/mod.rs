//! Media-context resolution and directory scanning.
//!
//! Everything here is request-scoped: each call re-reads the filesystem and
//! returns a fresh value. Nothing is cached and nothing is shared mutably.
//!
//! - [`sanitize`]: escaping of raw request paths and root containment
//! - [`scanner`]: sorted listing of the media files directly in a directory
//! - [`context`]: current/previous/next resolution for a requested path

pub mod context;
pub mod sanitize;
pub mod scanner;

pub use context::{parent_relative, MediaContextResolver, NavigationContext};
pub use sanitize::{escape_control_chars, resolve_lenient, PathSanitizer};
pub use scanner::DirectoryScanner;

use mediacycle_common::{Error, Result};
use std::path::{Component, Path};
use std::sync::Arc;

/// The canonical directory outside of which no path may resolve.
///
/// Canonicalized once at construction and immutable afterwards; clones share
/// the same path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRoot {
    path: Arc<Path>,
}

impl MediaRoot {
    /// Canonicalize `path` and check that it is a directory.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let canonical = std::fs::canonicalize(path).map_err(|e| {
            Error::config(format!("media root {} cannot be resolved: {}", path.display(), e))
        })?;

        if !canonical.is_dir() {
            return Err(Error::config(format!(
                "media root {} is not a directory",
                canonical.display()
            )));
        }

        Ok(Self {
            path: Arc::from(canonical.as_path()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `path` equals the root or lies beneath it.
    ///
    /// Compares whole path segments, so `/media-evil` is not inside `/media`.
    /// `path` is expected to be already resolved.
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.path)
    }

    /// Forward-slash path of `path` relative to the root.
    ///
    /// The root itself is `""`. Returns `None` when `path` is not under the
    /// root, or carries a segment that is not plain UTF-8.
    pub fn relative(&self, path: &Path) -> Option<String> {
        let rest = path.strip_prefix(&self.path).ok()?;
        let mut segments = Vec::new();
        for component in rest.components() {
            match component {
                Component::Normal(segment) => segments.push(segment.to_str()?),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_media_root_canonicalizes() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let root = MediaRoot::new(dir.path().join("sub/../sub")).unwrap();
        assert_eq!(
            root.path(),
            std::fs::canonicalize(dir.path().join("sub")).unwrap()
        );
    }

    #[test]
    fn test_media_root_rejects_missing_and_files() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            MediaRoot::new(dir.path().join("missing")),
            Err(Error::Config(_))
        ));

        let file = dir.path().join("a.png");
        std::fs::write(&file, b"x").unwrap();
        assert!(matches!(MediaRoot::new(&file), Err(Error::Config(_))));
    }

    #[test]
    fn test_contains_compares_segments() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("media")).unwrap();
        let root = MediaRoot::new(dir.path().join("media")).unwrap();
        let base = root.path().to_path_buf();

        assert!(root.contains(&base));
        assert!(root.contains(&base.join("a/b.png")));

        let sibling = base.with_file_name("media-evil");
        assert!(!root.contains(&sibling));
        assert!(!root.contains(base.parent().unwrap()));
    }

    #[test]
    fn test_relative_uses_forward_slashes() {
        let dir = tempdir().unwrap();
        let root = MediaRoot::new(dir.path()).unwrap();
        let base = root.path().to_path_buf();

        assert_eq!(root.relative(&base).as_deref(), Some(""));
        assert_eq!(root.relative(&base.join("trips")).as_deref(), Some("trips"));
        assert_eq!(
            root.relative(&base.join("trips").join("2024")).as_deref(),
            Some("trips/2024")
        );
        assert_eq!(root.relative(base.parent().unwrap()), None);
    }
}
