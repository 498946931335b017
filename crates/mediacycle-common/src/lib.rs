//! Mediacycle-Common: Shared types and utilities.
//!
//! This crate provides the pieces of mediacycle that carry no I/O:
//!
//! - **Media Classification**: the extension allow-list and [`MediaKind`]
//! - **Error Handling**: the error taxonomy shared by the core and the HTTP layer
//!
//! # Examples
//!
//! ```
//! use mediacycle_common::{Error, MediaExtensions, MediaKind, Result};
//! use std::path::Path;
//!
//! let extensions = MediaExtensions::default();
//! assert_eq!(extensions.kind_of(Path::new("clip.MOV")), Some(MediaKind::Video));
//! assert_eq!(extensions.kind_of(Path::new("notes.txt")), None);
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("media context"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod paths;

pub use error::{Error, Result};
pub use paths::{MediaExtensions, MediaKind};
