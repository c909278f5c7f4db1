//! LEXREF CLI
//!
//! Command-line interface for the legal reference proxy: run the API server
//! or issue one-shot fetches and probes against the upstream store.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lexref_api::{ApiConfig, ApiServer};
use lexref_core::types::FetchOptions;
use lexref_proxy::{ProxyConfig, ReferenceProxy};

/// LEXREF - cached proxy for legal reference data
#[derive(Parser)]
#[command(name = "lexref")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Upstream base URL
    #[arg(long, global = true, env = "LEGAL_API_BASE_URL")]
    base_url: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, global = true, env = "LEGAL_API_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3002")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Fetch one reference set (endpoint key, /path, or absolute URL)
    Fetch {
        /// Endpoint key, base-relative path, or absolute URL
        target: String,
        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// List the built-in endpoint table
    Endpoints,

    /// Probe the upstream store
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);
    let api = api_config(&cli);
    let config = api.proxy_config();

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(api, port, &bind).await,
        Commands::Fetch { target, compact } => cmd_fetch(&config, &target, compact).await,
        Commands::Endpoints => cmd_endpoints(&config),
        Commands::Health => cmd_health(&config).await,
    }
}

fn init_logging(verbose: bool, json: bool) {
    let filter = if verbose {
        "lexref=debug,info"
    } else {
        "lexref=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Environment (and `.env`) settings with command-line overrides applied.
fn api_config(cli: &Cli) -> ApiConfig {
    with_overrides(cli, ApiConfig::from_env())
}

fn with_overrides(cli: &Cli, mut config: ApiConfig) -> ApiConfig {
    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout_seconds = secs;
    }
    config
}

/// Run API server
async fn cmd_serve(config: ApiConfig, port: u16, bind: &str) -> Result<()> {
    println!("{}", "Starting LEXREF API server...".cyan().bold());

    println!("   {} {}", "Upstream:".dimmed(), config.base_url);
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("\n   Press Ctrl+C to stop.\n");

    let server = ApiServer::new(config).context("Failed to configure API server")?;
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .context("Invalid bind address")?;
    server.run(addr).await?;

    Ok(())
}

/// Fetch a reference set once
async fn cmd_fetch(config: &ProxyConfig, target: &str, compact: bool) -> Result<()> {
    let proxy = ReferenceProxy::from_config(config.clone()).context("Failed to build proxy")?;
    let url = proxy.resolve(target).context("Failed to resolve target")?;
    debug!(input = target, %url, "Resolved fetch target");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(format!("Fetching {}", url));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = proxy.fetch(target, FetchOptions::bypass_cache()).await;
    spinner.finish_and_clear();

    let data = result.with_context(|| format!("Failed to fetch {}", url))?;

    eprintln!("{} {}", "Fetched:".green().bold(), url);
    if compact {
        println!("{}", serde_json::to_string(&data)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&data)?);
    }

    Ok(())
}

/// List endpoint table
fn cmd_endpoints(config: &ProxyConfig) -> Result<()> {
    let proxy = ReferenceProxy::from_config(config.clone()).context("Failed to build proxy")?;

    println!("{} {}", "Base URL:".cyan().bold(), proxy.base_url());
    for (key, path) in proxy.list_endpoints() {
        let url = proxy.resolve(&key)?;
        println!("   {:<16} {:<28} {}", key.yellow(), path, url.dimmed());
    }

    Ok(())
}

/// Probe upstream
async fn cmd_health(config: &ProxyConfig) -> Result<()> {
    let proxy = ReferenceProxy::from_config(config.clone()).context("Failed to build proxy")?;
    let report = proxy.health_report().await;

    let probe = report.probe_url.as_deref().unwrap_or(proxy.probe_endpoint());
    println!("   {} {}", "Probe:".dimmed(), probe);
    println!("   {} {}", "Checked at:".dimmed(), report.checked_at.to_rfc3339());

    if report.healthy {
        println!("{}", "Upstream healthy".green().bold());
        return Ok(());
    }

    println!("{}", "Upstream unhealthy".red().bold());
    if let Some(failure) = &report.failure {
        println!("   {} {}", "Kind:".dimmed(), failure.kind);
        if let Some(status) = failure.status {
            println!("   {} {}", "Status:".dimmed(), status);
        }
        println!("   {} {}", "Error:".dimmed(), failure.message);
    }
    bail!("upstream health probe failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fetch_with_globals() {
        let cli = Cli::try_parse_from([
            "lexref",
            "--base-url",
            "http://localhost:9000",
            "fetch",
            "uu",
            "--timeout-secs",
            "3",
        ])
        .unwrap();

        let config = api_config(&cli).proxy_config();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.upstream.timeout_seconds, 3);
        assert!(matches!(cli.command, Commands::Fetch { ref target, .. } if target == "uu"));
    }

    #[test]
    fn test_overrides_keep_env_settings() {
        let env = ApiConfig::from_lookup(|name| match name {
            "LEGAL_API_BASE_URL" => Some("https://env.example".into()),
            "LEGAL_API_CACHE_TTL_SECS" => Some("60".into()),
            "LEGAL_API_PROBE_ENDPOINT" => Some("peraturan".into()),
            _ => None,
        });
        let cli = Cli::try_parse_from(["lexref", "--timeout-secs", "7", "health"]).unwrap();

        let config = with_overrides(&cli, env).proxy_config();
        assert_eq!(config.base_url, "https://env.example");
        assert_eq!(config.default_ttl_seconds, 60);
        assert_eq!(config.probe_endpoint, "peraturan");
        assert_eq!(config.upstream.timeout_seconds, 7);
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["lexref", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { port, bind } => {
                assert_eq!(port, 3002);
                assert_eq!(bind, "0.0.0.0");
            }
            _ => panic!("expected serve"),
        }
    }
}
