mod config;
mod error;
mod tools;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use registry::Registry;
use server::{Dispatcher, Server};

use config::Config;
use error::{Error, Result};
use tools::{AddTool, ListFilesTool};

const CONFIG_FILE: &str = "dockhand.toml";

#[derive(Parser)]
#[command(name = "dockhand")]
#[command(about = "A tool-registration and dispatch server speaking MCP over stdio", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the configuration file (default: dockhand.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve tools over stdio (the default)
    Serve,
    /// List the registered tools and their parameters
    Tools,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Serve) | None => cmd_serve(config).await,
        Some(Commands::Tools) => cmd_tools(config),
    }
}

fn init_tracing() {
    // Logs go to stderr; stdout is reserved for the protocol.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(Error::ConfigNotFound(path.display().to_string()));
            }
            Ok(Config::load(path)?)
        }
        None => {
            if Path::new(CONFIG_FILE).exists() {
                Ok(Config::load(CONFIG_FILE)?)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn build_registry(config: &Config) -> Result<Registry> {
    let registry = Registry::builder()
        .register(AddTool::new())?
        .register(ListFilesTool::new(config.tools.root.clone()))?
        .build();
    Ok(registry)
}

async fn cmd_serve(config: Config) -> Result<()> {
    let registry = Arc::new(build_registry(&config)?);
    tracing::info!(
        name = %config.server.name,
        tools = registry.len(),
        root = %config.tools.root.display(),
        "starting"
    );

    let dispatcher = Dispatcher::new(registry);
    let server = Arc::new(Server::new(config.server_config(), dispatcher));
    server::serve(server, config.limits.max_request_bytes).await?;
    Ok(())
}

fn cmd_tools(config: Config) -> Result<()> {
    let registry = build_registry(&config)?;

    for spec in registry.specs() {
        println!("{}  {}", spec.name, spec.description);
        for param in &spec.params {
            let requirement = if param.required {
                "required".to_string()
            } else {
                match &param.default {
                    Some(default) => format!("default: {default}"),
                    None => "optional".to_string(),
                }
            };
            println!(
                "    {} ({}, {requirement})  {}",
                param.name,
                param.ty.type_name(),
                param.description
            );
        }
        println!("    returns {}", spec.returns.type_name());
        println!();
    }

    Ok(())
}
