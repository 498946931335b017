//! Listing of the media files directly inside one directory.

use mediacycle_common::MediaExtensions;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Lists allow-listed media files in a directory, without recursion.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryScanner {
    extensions: MediaExtensions,
}

impl DirectoryScanner {
    pub fn new(extensions: MediaExtensions) -> Self {
        Self { extensions }
    }

    /// Names of the media files directly in `directory`, in codepoint order.
    ///
    /// Subdirectories and files outside the allow-list are skipped. An
    /// unreadable or vanished directory yields an empty listing; the failure
    /// is logged and not returned.
    pub fn list_media(&self, directory: &Path) -> Vec<String> {
        match self.scan(directory) {
            Ok(files) => files,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(directory = %directory.display(), "Directory does not exist, listing is empty");
                Vec::new()
            }
            Err(e) => {
                warn!(
                    directory = %directory.display(),
                    error = %e,
                    "Failed to read directory, treating listing as empty"
                );
                Vec::new()
            }
        }
    }

    fn scan(&self, directory: &Path) -> io::Result<Vec<String>> {
        let mut files = Vec::new();

        for entry in std::fs::read_dir(directory)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(directory = %directory.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            let path = entry.path();
            // Follows symlinks, like serving the file later will.
            if !path.is_file() || !self.extensions.is_media(&path) {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => files.push(name),
                Err(name) => debug!(?name, "Skipping file name that is not valid UTF-8"),
            }
        }

        files.sort();
        Ok(files)
    }
}
