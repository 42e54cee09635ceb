//! Request router command line.
//!
//! Loads a route configuration and resolves request paths against it.
//!
//! ```text
//! request-router --config router.toml resolve users/42 admin/users/7
//! request-router --config router.toml check
//! request-router --config router.toml routes
//! request-router --config router.toml watch < paths.txt
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use request_router::config::loader::load_config;
use request_router::config::watcher::ConfigWatcher;
use request_router::config::RouterConfig;
use request_router::observability::logging::init_logging;
use request_router::routing::{Outcome, Router, SharedRouter, Target};

#[derive(Parser)]
#[command(name = "request-router")]
#[command(about = "Resolve request paths to controllers", long_about = None)]
struct Cli {
    /// Route configuration file (TOML).
    #[arg(short, long, default_value = "router.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one or more paths and print the outcome as JSON
    Resolve {
        /// Request paths, e.g. `users/42`
        #[arg(required = true)]
        paths: Vec<String>,

        /// Look up controllers in this sub-directory only
        #[arg(short, long)]
        directory: Option<String>,
    },
    /// Validate the configuration file
    Check,
    /// List the explicit routes in match order
    Routes,
    /// Resolve paths read from stdin, reloading routes when the file changes
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            if matches!(cli.command, Commands::Check) {
                eprintln!("{}: {}", cli.config.display(), e);
                std::process::exit(1);
            }
            return Err(e.into());
        }
    };

    init_logging(&config.observability);
    tracing::debug!(
        config = %cli.config.display(),
        routes = config.routes.len(),
        auto_route = config.routing.auto_route,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Resolve { paths, directory } => {
            let router = Router::from_config(&config)?;
            for path in paths {
                let outcome = match &directory {
                    Some(dir) => router.resolve_within(&path, dir)?,
                    None => router.resolve(&path)?,
                };
                print_outcome(&outcome)?;
            }
        }
        Commands::Check => {
            Router::from_config(&config)?;
            println!("{}: OK ({} routes)", cli.config.display(), config.routes.len());
        }
        Commands::Routes => print_routes(&config)?,
        Commands::Watch => watch(&cli.config, &config).await?,
    }

    Ok(())
}

async fn watch(path: &std::path::Path, config: &RouterConfig) -> Result<(), Box<dyn std::error::Error>> {
    let shared = Arc::new(SharedRouter::new(Router::from_config(config)?));

    let (watcher, mut updates) = ConfigWatcher::new(path);
    let _watcher = watcher.run()?;

    let reload = shared.clone();
    tokio::spawn(async move {
        while let Some(new_config) = updates.recv().await {
            match Router::from_config(&new_config) {
                Ok(router) => {
                    reload.store(router);
                    tracing::info!(routes = new_config.routes.len(), "Routes reloaded");
                }
                Err(e) => tracing::warn!(error = %e, "Rejected reloaded routes"),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        print_outcome(&shared.resolve(line.trim())?)?;
    }

    Ok(())
}

fn print_outcome(outcome: &Outcome) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    Ok(())
}

fn print_routes(config: &RouterConfig) -> Result<(), Box<dyn std::error::Error>> {
    let router = Router::from_config(config)?;
    let routes = router.routes();

    for (i, rule) in routes.rules().iter().enumerate() {
        let target = match rule.target() {
            Target::Controller(target) => target.clone(),
            Target::Closure(closure) => format!("closure:{}", closure.label()),
        };
        if routes.is_redirect(rule.pattern()) {
            println!("{:>3}  {}  → {} ({})", i, rule.pattern(), target, routes.redirect_code(rule.pattern()));
        } else {
            println!("{:>3}  {}  → {}", i, rule.pattern(), target);
        }
    }

    if routes.should_auto_route() {
        println!("     (auto-routing under {})", config.controllers.root);
    }
    Ok(())
}
