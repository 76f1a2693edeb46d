//! qbroker CLI - Command-line producer/consumer for a qbroker daemon

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use qbroker_sdk::{QBrokerClient, QueueStats};
use tabled::{Table, Tabled};

const DEFAULT_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "qbrokerctl")]
#[command(about = "qbroker CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Broker base URL
    #[arg(long, env = "QBROKER_URL", default_value = DEFAULT_URL)]
    url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a message to a queue
    Put {
        /// Queue name
        queue: String,

        /// Message text
        message: String,
    },

    /// Take the next message from a queue
    Get {
        /// Queue name
        queue: String,

        /// Seconds to wait (broker default if omitted)
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// Show queues and their occupancy
    Stats,
}

#[derive(Tabled)]
struct QueueRow {
    queue: String,
    messages: usize,
    capacity: usize,
}

impl From<QueueStats> for QueueRow {
    fn from(q: QueueStats) -> Self {
        Self {
            queue: q.name,
            messages: q.len,
            capacity: q.capacity,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = QBrokerClient::connect(&cli.url).context("Invalid broker URL")?;

    match cli.command {
        Commands::Put { queue, message } => {
            client
                .put(&queue, message)
                .await
                .with_context(|| format!("Failed to publish to '{}'", queue))?;

            println!("{}", format!("✓ Message published to {}", queue).green().bold());
        }

        Commands::Get { queue, timeout } => {
            let message = client
                .get(&queue, timeout)
                .await
                .with_context(|| format!("Failed to read from '{}'", queue))?;

            match message {
                Some(message) => println!("{}", message),
                None => println!("{}", format!("No message in {}", queue).yellow()),
            }
        }

        Commands::Stats => {
            let stats = client.stats().await.context("Failed to fetch stats")?;

            println!("{}", "Broker Status".cyan().bold());
            println!();
            println!("  {} {}", "URL:".bold(), cli.url);
            println!(
                "  {} {} / {}",
                "Queues:".bold(),
                stats.queue_count,
                stats.max_queues
            );
            println!(
                "  {} {}s",
                "Default timeout:".bold(),
                stats.default_timeout_secs
            );
            println!("  {} {} seconds", "Uptime:".bold(), stats.uptime_seconds);

            if !stats.queues.is_empty() {
                println!();
                let rows: Vec<QueueRow> = stats.queues.into_iter().map(QueueRow::from).collect();
                println!("{}", Table::new(rows));
            }
        }
    }

    Ok(())
}
