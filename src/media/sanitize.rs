//! Request path escaping and media-root containment.

use mediacycle_common::{Error, Result};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

use super::MediaRoot;

/// Characters replaced by their two-character literal escape.
///
/// Applied one substitution at a time in this order. Backslash comes last,
/// so the backslash introduced by an earlier substitution is doubled too.
const ESCAPE_SEQUENCES: [(char, &str); 8] = [
    ('\u{07}', "\\a"),
    ('\u{08}', "\\b"),
    ('\u{0C}', "\\f"),
    ('\n', "\\n"),
    ('\r', "\\r"),
    ('\t', "\\t"),
    ('\u{0B}', "\\v"),
    ('\\', "\\\\"),
];

/// Replace control and escape-sensitive characters in a raw request path.
pub fn escape_control_chars(raw: &str) -> String {
    ESCAPE_SEQUENCES
        .iter()
        .fold(raw.to_string(), |path, (ch, escaped)| path.replace(*ch, escaped))
}

/// Resolve `path` to an absolute path without requiring it to exist.
///
/// Every prefix is canonicalized, so symlinks are followed wherever the
/// path exists, including after a `..` climbs back out of a missing
/// segment. A segment that does not exist is kept lexically. `..` is
/// applied after the preceding segment's symlinks were resolved.
pub fn resolve_lenient(path: &Path) -> io::Result<PathBuf> {
    let mut resolved = if path.is_absolute() {
        PathBuf::new()
    } else {
        std::env::current_dir()?
    };

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(segment) => {
                resolved.push(segment);
                match std::fs::canonicalize(&resolved) {
                    Ok(canonical) => resolved = canonical,
                    Err(e)
                        if matches!(
                            e.kind(),
                            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                        ) => {}
                    Err(e) => return Err(e),
                }
            }
        }
    }

    Ok(resolved)
}

/// Escapes request paths and keeps their resolution inside the media root.
#[derive(Debug, Clone)]
pub struct PathSanitizer {
    root: MediaRoot,
}

impl PathSanitizer {
    pub fn new(root: MediaRoot) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &MediaRoot {
        &self.root
    }

    /// Escape a raw request path. See [`escape_control_chars`].
    pub fn sanitize(&self, raw: &str) -> String {
        escape_control_chars(raw)
    }

    /// Join `relative` onto the root, resolve it, and refuse anything that
    /// lands outside the root.
    ///
    /// A path that does not exist is not a refusal; containment is judged on
    /// the resolved path. Resolution failures (permissions, symlink loops)
    /// are refused as well, and their detail only reaches the log.
    pub fn resolve_and_contain(&self, relative: &str) -> Result<PathBuf> {
        let candidate = self.root.path().join(relative);
        let resolved = resolve_lenient(&candidate).map_err(|e| {
            warn!(path = %relative, error = %e, "Failed to resolve requested path");
            Error::Forbidden
        })?;

        if self.root.contains(&resolved) {
            debug!(path = %relative, resolved = %resolved.display(), "Resolved requested path");
            Ok(resolved)
        } else {
            warn!(
                path = %relative,
                resolved = %resolved.display(),
                "Refusing path outside the media root"
            );
            Err(Error::Forbidden)
        }
    }

    /// Escape `raw`, then resolve it as in [`Self::resolve_and_contain`].
    pub fn sanitize_and_contain(&self, raw: &str) -> Result<PathBuf> {
        self.resolve_and_contain(&self.sanitize(raw))
    }
}
