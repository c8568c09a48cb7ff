mod dashboard;
mod registry;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use influtrust_core::Platform;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "influtrust-cli")]
#[command(about = "Influencer trust-score command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch every tracked influencer and print the ranked dashboard
    Dashboard {
        /// Only show records from this platform
        #[arg(long)]
        platform: Option<Platform>,
        /// Print the dashboard as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Score platform profiles from a JSON file without network access
    Score {
        /// File holding one profile object or an array of them
        file: PathBuf,
        /// YAML category dictionary overriding the built-in one
        #[arg(long)]
        categories: Option<PathBuf>,
        /// Print records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Read influencers stored in the registry
    Influencers {
        #[command(subcommand)]
        command: InfluencerCommands,
    },
    /// Read claims stored in the registry
    Claims {
        #[command(subcommand)]
        command: ClaimCommands,
    },
}

#[derive(Debug, Subcommand)]
enum InfluencerCommands {
    /// List every registered influencer
    List,
}

#[derive(Debug, Subcommand)]
enum ClaimCommands {
    /// List claims, optionally for one influencer
    List {
        /// Registry id of the influencer
        #[arg(long)]
        influencer: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let fallback_level =
        std::env::var("INFLUTRUST_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Dashboard { platform, json }) => {
            let config = influtrust_core::load_app_config()?;
            dashboard::run_dashboard(&config, platform, json).await?;
        }
        Some(Commands::Score {
            file,
            categories,
            json,
        }) => dashboard::run_score(&file, categories.as_deref(), json)?,
        Some(Commands::Influencers {
            command: InfluencerCommands::List,
        }) => {
            let config = influtrust_core::load_app_config()?;
            registry::run_influencers_list(&config).await?;
        }
        Some(Commands::Claims {
            command: ClaimCommands::List { influencer },
        }) => {
            let config = influtrust_core::load_app_config()?;
            registry::run_claims_list(&config, influencer.as_deref()).await?;
        }
        None => println!("no command given; run `influtrust-cli --help` for usage"),
    }

    Ok(())
}
