//! Crypto News MCP Server - Rust Implementation
//!
//! A Model Context Protocol (MCP) server for the free crypto news API.
//! Runs on stdio by default; the subcommands are debugging aids.

use anyhow::Context;
use clap::{Parser, Subcommand};

use crypto_news_mcp::config::Config;
use crypto_news_mcp::mcp::catalog;
use crypto_news_mcp::mcp::server::McpServer;
use crypto_news_mcp::mcp::tools::ToolHandler;
use crypto_news_mcp::news::client::NewsClient;

/// Crypto News MCP Server
#[derive(Parser)]
#[command(name = "crypto-news-mcp")]
#[command(author, version, about = "Crypto News MCP Server - A Model Context Protocol server for crypto news")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tool catalog as JSON
    Tools,

    /// Invoke a single tool and print its output
    Call {
        /// Tool name, e.g. get_breaking_news
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// List the news sources known to the API
    Sources,
}

#[tokio::main]
async fn main() {
    // Initialize logging; stdout belongs to the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = Config::new().context("failed to load configuration")?;
    let client = NewsClient::new(&config).context("failed to initialize news API client")?;

    match cli.command {
        None => {
            tracing::info!(api = %config.api_base_url, "Crypto News MCP server running on stdio");
            McpServer::new(client)
                .run_stdio()
                .await
                .context("stdio transport failed")?;
            Ok(0)
        }
        Some(Commands::Tools) => {
            let tools = serde_json::to_string_pretty(&catalog::list_tools())?;
            println!("{}", tools);
            Ok(0)
        }
        Some(Commands::Call { tool, args }) => {
            let args: serde_json::Value =
                serde_json::from_str(&args).context("--args must be valid JSON")?;
            let result = ToolHandler::new(client).call_tool(&tool, args).await;
            for block in &result.content {
                println!("{}\n", block.as_text());
            }
            Ok(if result.is_error { 1 } else { 0 })
        }
        Some(Commands::Sources) => {
            let response = client.get_sources().await?;
            for source in response.sources() {
                println!(
                    "{:<18} {:<24} {} {}",
                    source.key.as_deref().unwrap_or("-"),
                    source.name.as_deref().unwrap_or("-"),
                    source.url.as_deref().unwrap_or("-"),
                    source.status.as_deref().unwrap_or("")
                );
            }
            Ok(0)
        }
    }
}
