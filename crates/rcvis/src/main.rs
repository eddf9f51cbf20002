//! RCVis CLI binary.
//!
//! - Print the narration of a tabulation summary
//! - Render both movie variants of a summary
//! - Show the resolved configuration

use clap::Parser;
use rcvis::{ObservabilityConfig, RcvisConfig, init_observability_with_config};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, narrate, render, show_config};

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::new("rcvis").with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability_with_config(observability)?;

    let config = match &cli.config {
        Some(path) => RcvisConfig::from_file(path)?,
        None => RcvisConfig::load()?,
    };

    match cli.command {
        Commands::Narrate { summary } => {
            narrate(&summary)?;
        }

        Commands::Render {
            summary,
            slug,
            base_url,
            rounds,
        } => {
            render(&config, &summary, &slug, &base_url, rounds).await?;
        }

        Commands::Config => {
            show_config(&config)?;
        }
    }

    Ok(())
}
