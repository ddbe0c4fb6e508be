mod ingest;
mod inspect;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "brandlens-cli")]
#[command(about = "BrandLens command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze a tweet CSV and persist the four model artifacts.
    Ingest {
        /// Path to the CSV file; the brand is derived from the filename.
        csv_path: PathBuf,
    },
    /// List brands that have stored models.
    Brands,
    /// Print one stored artifact as JSON.
    Show {
        brand_id: String,
        /// One of: engagement, sentiment, topic, hashtags.
        model_type: String,
    },
    /// List artifact files in the model store.
    Models,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = brandlens_core::load_app_config_from_env()?;
    let cli = Cli::parse();
    match cli.command {
        Commands::Ingest { csv_path } => ingest::run(&config, &csv_path),
        Commands::Brands => inspect::brands(&config),
        Commands::Show {
            brand_id,
            model_type,
        } => inspect::show(&config, &brand_id, &model_type),
        Commands::Models => inspect::models(&config),
    }
}
