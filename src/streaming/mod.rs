//! Raw byte streaming of media files.
//!
//! Files are served straight from disk with HTTP range support so that
//! browsers can seek inside videos.

mod direct;

pub use direct::stream_file;
