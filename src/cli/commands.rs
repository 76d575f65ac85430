use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::route_file::RouteManifest;
use crate::router::Router;
use crate::runtime_config::{parse_method, RuntimeConfig};

/// Command-line interface for pathmux
///
/// Loads a route manifest and either lists or exercises its routes.
#[derive(Parser)]
#[command(name = "pathmux")]
#[command(about = "Typed-placeholder URL router", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print every registered route, grouped by method
    Routes {
        /// Path to the route manifest (YAML)
        #[arg(short, long)]
        routes: PathBuf,
    },
    /// Dispatch a path and print the matched handler's JSON result
    Match {
        /// Path to the route manifest (YAML)
        #[arg(short, long)]
        routes: PathBuf,

        /// Request method; falls back to REQUEST_METHOD, then GET
        #[arg(short, long)]
        method: Option<String>,

        /// Request path, e.g. /catalog/1/
        path: String,
    },
}

fn load_router(routes: &Path, config: &RuntimeConfig) -> Result<Router> {
    let manifest = RouteManifest::load(routes)?;
    let mut router = Router::with_config(config);
    manifest.register(&mut router)?;
    Ok(router)
}

/// Execute a parsed command, writing results to `out`
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded, a method is invalid,
/// or no route matches.
pub fn run(cli: Cli, config: &RuntimeConfig, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Commands::Routes { routes } => {
            let router = load_router(&routes, config)?;
            for method in router.table().methods() {
                writeln!(out, "{}", router.table().trace_all(Some(method)))?;
            }
            Ok(())
        }
        Commands::Match {
            routes,
            method,
            path,
        } => {
            let mut router = load_router(&routes, config)?;
            if let Some(method) = method {
                router.set_request_method(parse_method(&method)?);
            }
            let result = router
                .call_route(&path)
                .with_context(|| format!("{} {path}", router.request_method()))?;
            writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
            Ok(())
        }
    }
}

/// Parse arguments and run against stdout
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let config = RuntimeConfig::from_env();
    run(cli, &config, &mut std::io::stdout().lock())
}
