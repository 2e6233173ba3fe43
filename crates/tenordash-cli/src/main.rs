mod fetch;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tenordash_dashboard::{ExportKind, RankingsClient};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tenordash-cli")]
#[command(about = "Tenor GIF ranking dashboard for the terminal")]
struct Cli {
    /// Base URL of a running tenordash-server
    #[arg(long, env = "TENORDASH_API_URL", default_value = "http://localhost:3000")]
    api_url: String,
    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch and display the rankings for a Tenor profile
    Fetch {
        /// Profile URL (`https://tenor.com/users/<name>`) or bare username
        profile: String,
        /// Write a CSV export; may be repeated
        #[arg(long, value_enum)]
        export: Vec<ExportTarget>,
        /// Directory the CSV exports are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Check that the server and its document store are reachable
    Health,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportTarget {
    Rankings,
    Stats,
}

impl From<ExportTarget> for ExportKind {
    fn from(target: ExportTarget) -> Self {
        match target {
            ExportTarget::Rankings => ExportKind::Rankings,
            ExportTarget::Stats => ExportKind::Stats,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = RankingsClient::new(&cli.api_url, cli.timeout_secs)?;

    match cli.command {
        Commands::Fetch {
            profile,
            export,
            out_dir,
        } => {
            let kinds: Vec<ExportKind> = export.into_iter().map(ExportKind::from).collect();
            fetch::run_fetch(&client, &profile, &kinds, &out_dir).await?;
        }
        Commands::Health => {
            if client.health().await? {
                println!("ok: {} is healthy", cli.api_url);
            } else {
                anyhow::bail!("{} reports a degraded document store", cli.api_url);
            }
        }
    }

    Ok(())
}
