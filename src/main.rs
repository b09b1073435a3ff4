mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mindful::{config, server};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mindful",
    version,
    about = "Mood analysis with empathetic responses and mood-matched recommendations"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP tool server (stdio transport)
    Serve {
        /// Serve MCP over Streamable HTTP at /mcp instead of stdio
        #[arg(long)]
        http: bool,
    },
    /// Start the mood analysis HTTP API
    Web,
    /// Analyze a piece of text and record the result in history
    Analyze {
        /// What's on your mind
        text: String,
    },
    /// Show stored analyses, newest first
    History {
        /// Maximum number of entries to show
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the emotional pattern over stored history
    Pattern,
    /// Delete all stored analyses
    HistoryClear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = config::MindfulConfig::load()?;

    // Log to stderr so stdout stays clean for MCP JSON-RPC and CLI output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve { http: false } => {
            server::serve_stdio(config).await?;
        }
        Command::Serve { http: true } => {
            server::serve_http(config).await?;
        }
        Command::Web => {
            server::serve_web(config).await?;
        }
        Command::Analyze { text } => {
            cli::analyze(&config, &text).await?;
        }
        Command::History { limit } => {
            cli::history(&config, limit)?;
        }
        Command::Pattern => {
            cli::pattern(&config)?;
        }
        Command::HistoryClear => {
            cli::history_clear(&config)?;
        }
    }

    Ok(())
}
