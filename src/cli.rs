use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediacycle")]
#[command(author, version, about = "Browse a tree of images and videos over HTTP")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Media root directory (overrides the config file)
    #[arg(long, global = true)]
    pub media_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the navigation context of a path under the media root as JSON
    Context {
        /// Path relative to the media root (empty for the root itself)
        #[arg(default_value = "")]
        path: String,
    },

    /// List the media files directly inside a directory under the media root
    List {
        /// Directory relative to the media root (empty for the root itself)
        #[arg(default_value = "")]
        directory: String,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
