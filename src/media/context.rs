//! Navigation context for a requested file or directory.
//!
//! A context names the current media file, its cyclic neighbours, and the
//! directory listing they were taken from.

use mediacycle_common::{MediaExtensions, MediaKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::sanitize::resolve_lenient;
use super::scanner::DirectoryScanner;
use super::MediaRoot;

/// Current item plus previous/next siblings, as returned by `/media_context`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationContext {
    /// File name of the current item.
    pub current: String,
    /// Previous sibling, wrapping to the last file.
    #[serde(rename = "prev")]
    pub previous: String,
    /// Next sibling, wrapping to the first file.
    pub next: String,
    /// Directory relative to the media root; `""` is the root itself.
    pub directory: String,
    /// Parent of `directory`; absent at the root.
    pub parent_directory: Option<String>,
    pub is_video: bool,
    /// Every media file in `directory`, sorted.
    pub files: Vec<String>,
    pub current_index: usize,
    pub has_media: bool,
}

impl NavigationContext {
    /// Root-relative forward-slash path of a file in this context's directory.
    pub fn file_path(&self, name: &str) -> String {
        if self.directory.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.directory, name)
        }
    }

    pub fn kind(&self) -> MediaKind {
        if self.is_video {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

/// Parent of a root-relative forward-slash path.
///
/// The root (`""`) has no parent; a top-level entry's parent is the root.
///
/// ```
/// use mediacycle::media::parent_relative;
///
/// assert_eq!(parent_relative("trips/2024").as_deref(), Some("trips"));
/// assert_eq!(parent_relative("trips").as_deref(), Some(""));
/// assert_eq!(parent_relative(""), None);
/// ```
pub fn parent_relative(relative: &str) -> Option<String> {
    let trimmed = relative.trim_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    Some(
        trimmed
            .rsplit_once('/')
            .map(|(parent, _)| parent.to_string())
            .unwrap_or_default(),
    )
}

/// Builds [`NavigationContext`]s for paths under the media root.
#[derive(Debug, Clone)]
pub struct MediaContextResolver {
    root: MediaRoot,
    scanner: DirectoryScanner,
    extensions: MediaExtensions,
}

impl MediaContextResolver {
    pub fn new(root: MediaRoot, extensions: MediaExtensions) -> Self {
        Self {
            root,
            scanner: DirectoryScanner::new(extensions),
            extensions,
        }
    }

    pub fn root(&self) -> &MediaRoot {
        &self.root
    }

    pub fn scanner(&self) -> &DirectoryScanner {
        &self.scanner
    }

    /// Resolve the navigation context of `requested`, relative to the root.
    ///
    /// A file selects itself among its siblings; a directory selects its
    /// first media file. Returns `None` when there is nothing to navigate:
    /// an empty or unreadable directory, a file outside the allow-list, a
    /// file that vanished mid-request, or a path that resolves outside the
    /// root. Containment is expected to be checked by the caller first.
    pub fn resolve(&self, requested: &str) -> Option<NavigationContext> {
        let path = match resolve_lenient(&self.root.path().join(requested)) {
            Ok(path) => path,
            Err(e) => {
                debug!(path = %requested, error = %e, "Failed to resolve requested path");
                return None;
            }
        };

        let (directory, current_file) = if path.is_file() {
            let name = path.file_name()?.to_str()?.to_string();
            (path.parent()?.to_path_buf(), Some(name))
        } else {
            (path, None)
        };

        let files = self.scanner.list_media(&directory);

        let current_index = match current_file {
            Some(name) => match files.iter().position(|f| *f == name) {
                Some(index) => index,
                None => {
                    debug!(file = %name, "Requested file is not among the directory's media files");
                    return None;
                }
            },
            None if files.is_empty() => {
                debug!(directory = %directory.display(), "No media files to navigate");
                return None;
            }
            None => 0,
        };

        let len = files.len();
        let previous_index = (current_index + len - 1) % len;
        let next_index = (current_index + 1) % len;

        let Some(directory_rel) = self.root.relative(&directory) else {
            debug!(directory = %directory.display(), "Directory is not under the media root");
            return None;
        };
        let parent_directory = parent_relative(&directory_rel);

        let current = files[current_index].clone();
        let is_video = self.extensions.kind_of(Path::new(&current)) == Some(MediaKind::Video);

        Some(NavigationContext {
            previous: files[previous_index].clone(),
            next: files[next_index].clone(),
            current,
            directory: directory_rel,
            parent_directory,
            is_video,
            has_media: !files.is_empty(),
            files,
            current_index,
        })
    }
}
