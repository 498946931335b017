//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates a temporary media root, a default
//! config, and the full [`AppContext`]. The [`TestHarness::with_server`]
//! constructor starts Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::Router;
use mediacycle::config::Config;
use mediacycle::media::MediaRoot;
use mediacycle::server::{create_router, AppContext};
use tempfile::TempDir;

/// Test harness wrapping a fully-constructed [`AppContext`] backed by a
/// temporary media root.
pub struct TestHarness {
    pub ctx: AppContext,
    /// Holds the media root (`<tmp>/media`) and, next to it, files that
    /// must stay unreachable.
    pub dir: TempDir,
}

impl TestHarness {
    /// Create a harness with an empty media root.
    pub fn new() -> Self {
        Self::with_files(&[])
    }

    /// Create a harness whose media root holds `files`.
    ///
    /// Entries ending in `/` are created as directories; everything else is
    /// written as a small file with its own name as content.
    pub fn with_files(files: &[&str]) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let media = dir.path().join("media");
        std::fs::create_dir(&media).expect("failed to create media root");
        std::fs::write(dir.path().join("secret.txt"), b"top secret").unwrap();

        for file in files {
            create_entry(&media, file);
        }

        let root = MediaRoot::new(&media).expect("failed to open media root");
        let ctx = AppContext::with_root(Config::default(), root);

        Self { ctx, dir }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server(files: &[&str]) -> (Self, SocketAddr) {
        let harness = Self::with_files(files);
        let app = harness.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    pub fn router(&self) -> Router {
        create_router(self.ctx.clone())
    }

    /// Canonical media root.
    pub fn root(&self) -> PathBuf {
        self.ctx.root().path().to_path_buf()
    }

    /// Add a file or directory under the media root after construction.
    pub fn add(&self, file: &str) {
        create_entry(&self.root(), file);
    }
}

fn create_entry(root: &Path, file: &str) {
    let path = root.join(file);
    if file.ends_with('/') {
        std::fs::create_dir_all(&path).unwrap();
    } else {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, file.as_bytes()).unwrap();
    }
}
