//! Media classification by file extension.
//!
//! Only files whose (case-insensitive) extension appears in the allow-list
//! are treated as media. Everything else is invisible to directory scans.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Extensions displayed as still images.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];

/// Extensions displayed with a video player.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];

/// How a media file is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
        }
    }
}

/// The extension allow-list, split into image and video sets.
///
/// Built once at startup and handed to every component that classifies
/// files, so no component reads the lists from ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaExtensions {
    image: &'static [&'static str],
    video: &'static [&'static str],
}

impl Default for MediaExtensions {
    fn default() -> Self {
        Self {
            image: IMAGE_EXTENSIONS,
            video: VIDEO_EXTENSIONS,
        }
    }
}

impl MediaExtensions {
    /// Classify a path by its extension.
    ///
    /// ```
    /// use std::path::Path;
    /// use mediacycle_common::{MediaExtensions, MediaKind};
    ///
    /// let extensions = MediaExtensions::default();
    /// assert_eq!(extensions.kind_of(Path::new("holiday.JPG")), Some(MediaKind::Image));
    /// assert_eq!(extensions.kind_of(Path::new("/srv/media/clip.webm")), Some(MediaKind::Video));
    /// assert_eq!(extensions.kind_of(Path::new("movie.mkv")), None);
    /// ```
    pub fn kind_of(&self, path: &Path) -> Option<MediaKind> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        if self.image.contains(&ext.as_str()) {
            Some(MediaKind::Image)
        } else if self.video.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    pub fn is_media(&self, path: &Path) -> bool {
        self.kind_of(path).is_some()
    }
}

/// MIME type sent when streaming a file's bytes.
///
/// Files outside the allow-list can still be served; they fall back to
/// `application/octet-stream`.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        _ => "application/octet-stream",
    }
}
