mod cli;

use mediacycle::{
    config::{self, Config},
    media::{MediaContextResolver, MediaRoot, PathSanitizer},
    server,
};
use mediacycle_common::MediaExtensions;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mediacycle=trace,tower_http=debug".to_string()
        } else {
            "mediacycle=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = load_config(cli.config.as_deref(), cli.media_root.as_deref())?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config::validate_config(&config)?;

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(server::start_server(config))
        }
        Commands::Context { path } => {
            let config = load_config(cli.config.as_deref(), cli.media_root.as_deref())?;
            print_context(&config, &path)
        }
        Commands::List { directory } => {
            let config = load_config(cli.config.as_deref(), cli.media_root.as_deref())?;
            list_directory(&config, &directory)
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("mediacycle {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_config(config_path: Option<&Path>, media_root: Option<&Path>) -> Result<Config> {
    let mut config = config::load_config_or_default(config_path)?;
    if let Some(root) = media_root {
        config.media.root = root.to_path_buf();
    }
    Ok(config)
}

fn open_root(config: &Config) -> Result<MediaRoot> {
    MediaRoot::new(config.media.expanded_root()).context("Failed to open media root")
}

fn print_context(config: &Config, path: &str) -> Result<()> {
    let root = open_root(config)?;
    let sanitizer = PathSanitizer::new(root.clone());
    let resolver = MediaContextResolver::new(root, MediaExtensions::default());

    let relative = sanitizer.sanitize(path);
    if sanitizer.resolve_and_contain(&relative).is_err() {
        anyhow::bail!("forbidden: {:?} is outside the media root", path);
    }

    match resolver.resolve(&relative) {
        Some(context) => {
            println!("{}", serde_json::to_string_pretty(&context)?);
            Ok(())
        }
        None => anyhow::bail!("no media context for {:?}", path),
    }
}

fn list_directory(config: &Config, directory: &str) -> Result<()> {
    let root = open_root(config)?;
    let sanitizer = PathSanitizer::new(root.clone());
    let resolver = MediaContextResolver::new(root, MediaExtensions::default());

    let target = sanitizer
        .sanitize_and_contain(directory)
        .map_err(|_| anyhow::anyhow!("forbidden: {:?} is outside the media root", directory))?;

    for name in resolver.scanner().list_media(&target) {
        println!("{}", name);
    }
    Ok(())
}

fn validate_config(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    println!("Configuration is valid!");
    println!();
    println!("Server: {}:{}", config.server.host, config.server.port);
    println!("Media root: {}", config.media.expanded_root().display());

    match MediaRoot::new(config.media.expanded_root()) {
        Ok(root) => println!("  resolves to {}", root.path().display()),
        Err(e) => println!("  warning: {}", e),
    }

    Ok(())
}
