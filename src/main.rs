//! MCP server for UniProt gene annotations.
//!
//! Run with `uniproscope-mcp`, optionally pointing `--base-url` at a mirror.

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use uniproscope_mcp::{GeneLookup, McpServer, UniprotClient, UpstreamConfig};

/// MCP server for UniProt gene annotations.
///
/// Exposes human gene lookups as MCP tools for AI agents.
/// Communicates via JSON-RPC 2.0 over stdin/stdout.
#[derive(Parser)]
#[command(name = "uniproscope-mcp")]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the UniProt REST API.
    #[arg(long, env = "UNIPROT_BASE_URL", default_value = "https://rest.uniprot.org")]
    base_url: String,

    /// Upstream request timeout in seconds.
    #[arg(long, env = "UNIPROT_TIMEOUT", default_value_t = 30.0)]
    timeout: f64,

    /// Delay between upstream requests in seconds.
    /// Accepted for compatibility; requests are not throttled.
    #[arg(long, env = "UNIPROT_REQUEST_DELAY", default_value_t = 1.0)]
    request_delay: f64,

    /// API key sent to the upstream as a bearer token.
    #[arg(long, env = "UNIPROT_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Enable debug logging to stderr.
    #[arg(long, short)]
    verbose: bool,
}

/// Default log filter: startup and lookup events at `info`, everything with `--verbose`.
fn log_directive(verbose: bool) -> &'static str {
    if verbose {
        "uniproscope_mcp=debug"
    } else {
        "uniproscope_mcp=info"
    }
}

fn seconds(flag: &str, value: f64) -> Duration {
    match Duration::try_from_secs_f64(value) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: invalid --{} '{}': {}", flag, value, e);
            std::process::exit(1);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    // Set up logging. Stdout carries the protocol, so everything goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_directive(args.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = UpstreamConfig {
        base_url: args.base_url,
        timeout: seconds("timeout", args.timeout),
        request_delay: seconds("request-delay", args.request_delay),
        api_key: args.api_key,
    };

    let client = match UniprotClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        base_url = %client.config().base_url,
        request_delay = ?client.config().request_delay,
        "uniproscope MCP server ready"
    );

    // Create lookup and server
    let mut server = McpServer::new(GeneLookup::new(client));

    // Run the server
    if let Err(e) = server.run().await {
        eprintln!("Error: Server error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::Directive;

    #[test]
    fn test_default_filter_shows_ready_line() {
        let directive = log_directive(false);
        assert!(directive.ends_with("=info"));
        assert!(directive.parse::<Directive>().is_ok());
    }

    #[test]
    fn test_verbose_filter_enables_debug() {
        assert_eq!(log_directive(true), "uniproscope_mcp=debug");
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["uniproscope-mcp"]);
        assert!(!args.verbose);
        assert_eq!(args.timeout, 30.0);
        assert_eq!(args.request_delay, 1.0);
    }
}
