//! Mediacycle - browse a tree of images and videos one file at a time
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod media;
pub mod server;
pub mod streaming;
