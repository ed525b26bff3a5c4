//! Hyclone player list status endpoint entry point.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hyclone_status::config::{Config, SourceKind};
use hyclone_status::metrics;
use hyclone_status::players::{source_from_config, PlayerSource};
use hyclone_status::server::StatusServer;
use hyclone_status::utils::shutdown_signal;

/// Player list status endpoint for the Hyclone multiserver proxy.
#[derive(Parser, Debug)]
#[command(name = "hyclone-status")]
#[command(about = "Serves the proxy's connected player list over HTTP")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

/// Overrides applied on top of the environment configuration.
#[derive(ClapArgs, Debug, Clone, Default)]
struct ServeArgs {
    /// Port for the status endpoint.
    #[arg(short, long)]
    port: Option<u16>,

    /// Interface for the status endpoint.
    #[arg(long)]
    host: Option<String>,

    /// Roster file re-read on every request.
    #[arg(long)]
    players_file: Option<PathBuf>,

    /// Upstream URL returning the player list as JSON.
    #[arg(long)]
    players_url: Option<String>,

    /// Seed the in-process roster (repeatable).
    #[arg(long = "player")]
    players: Vec<String>,

    /// Port for the Prometheus exporter.
    #[arg(long)]
    metrics_port: Option<u16>,
}

impl ServeArgs {
    /// Fill unset values from `fallback`. Values given here win; roster
    /// seeds from both are kept.
    fn or(mut self, fallback: ServeArgs) -> ServeArgs {
        self.port = self.port.or(fallback.port);
        self.host = self.host.or(fallback.host);
        self.players_file = self.players_file.or(fallback.players_file);
        self.players_url = self.players_url.or(fallback.players_url);
        self.metrics_port = self.metrics_port.or(fallback.metrics_port);
        let mut players = fallback.players;
        players.append(&mut self.players);
        self.players = players;
        self
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the player list (default).
    Serve(ServeArgs),

    /// Check configuration validity.
    CheckConfig(ServeArgs),

    /// Query the player source once and print the list.
    Players(ServeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = match Config::load() {
        Ok(config) => EnvFilter::new(config.log_filter(args.verbose)),
        Err(_) if args.verbose => EnvFilter::new("hyclone_status=debug,info"),
        Err(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Initialize metrics
    metrics::init_metrics();

    // Top-level overrides apply to every subcommand
    match args.command {
        Some(Command::Serve(overrides)) => cmd_serve(overrides.or(args.serve)).await,
        Some(Command::CheckConfig(overrides)) => cmd_check_config(overrides.or(args.serve)),
        Some(Command::Players(overrides)) => cmd_players(overrides.or(args.serve)).await,
        None => cmd_serve(args.serve).await,
    }
}

/// Load configuration from the environment and apply CLI overrides.
fn load_config(overrides: &ServeArgs) -> anyhow::Result<Config> {
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Some(port) = overrides.port {
        config.status_port = port;
    }
    if let Some(host) = &overrides.host {
        config.status_host = host.clone();
    }
    if let Some(path) = &overrides.players_file {
        config.players_file = Some(path.clone());
    }
    if let Some(url) = &overrides.players_url {
        config.players_url = Some(url.clone());
    }
    if let Some(port) = overrides.metrics_port {
        config.metrics_port = Some(port);
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    Ok(config)
}

/// Serve the player list until a shutdown signal arrives.
async fn cmd_serve(overrides: ServeArgs) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let config = load_config(&overrides)?;

    if !overrides.players.is_empty() && config.source_kind() != SourceKind::Roster {
        warn!(
            "--player seeds are ignored with the {} source",
            config.source_kind()
        );
    }

    if let Some(port) = config.metrics_port {
        let host = config.socket_addr()?.ip();
        metrics::install_exporter(SocketAddr::new(host, port))?;
    }

    let source = source_from_config(&config, &overrides.players)?;
    let server = StatusServer::bind(&config, source).await?;

    server.serve_with_shutdown(shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Check configuration validity.
fn cmd_check_config(overrides: ServeArgs) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("HYCLONE STATUS - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match load_config(&overrides) {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration check failed"));
        }
    };

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}", config.socket_addr()?);
    println!("  Player Source: {}", config.source_kind());
    match config.source_kind() {
        SourceKind::File => {
            if let Some(path) = &config.players_file {
                println!("  Roster File: {}", path.display());
            }
        }
        SourceKind::Remote => {
            if let Some(url) = &config.players_url {
                println!("  Upstream URL: {}", url);
                println!("  Upstream Timeout: {}ms", config.players_timeout_ms);
            }
        }
        SourceKind::Roster => {
            println!("  Seeded Players: {}", overrides.players.len());
        }
    }
    match config.metrics_port {
        Some(port) => println!("  Metrics Port: {}", port),
        None => println!("  Metrics: Disabled"),
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Query the player source once and print the rendered list.
async fn cmd_players(overrides: ServeArgs) -> anyhow::Result<()> {
    let config = load_config(&overrides)?;
    let source = source_from_config(&config, &overrides.players)?;

    let players = source.players().await?;
    println!("{}", players);

    Ok(())
}
