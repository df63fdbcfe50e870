use anyhow::Result;
use clap::{Args, Subcommand};

use purview_cli::config::Config;

#[derive(Args)]
pub struct QualityCommands {
    #[command(subcommand)]
    pub command: QualitySubcommands,
}

#[derive(Subcommand)]
pub enum QualitySubcommands {
    /// List business domains
    Domains,
    /// List quality rules for a data asset
    Rules {
        #[arg(long)]
        domain: String,
        #[arg(long)]
        product: String,
        #[arg(long)]
        asset: String,
    },
    /// Delete one quality rule
    DeleteRule {
        #[arg(long)]
        domain: String,
        #[arg(long)]
        product: String,
        #[arg(long)]
        asset: String,
        rule_id: String,
    },
    /// List run history for a data asset, newest first
    Runs {
        #[arg(long)]
        asset: String,
        /// "Profile" or "Quality"
        #[arg(long, default_value = "Profile")]
        run_type: String,
    },
}

pub async fn handle(commands: QualityCommands, config: Config) -> Result<()> {
    let clients = config.clients();

    match commands.command {
        QualitySubcommands::Domains => {
            let domains = clients.quality.list_domains().await?;
            println!("Found {} domains", domains.len());
            for domain in &domains {
                println!(
                    "{}  {}",
                    domain["id"].as_str().unwrap_or("-"),
                    domain["name"].as_str().unwrap_or("-"),
                );
            }
        }
        QualitySubcommands::Rules { domain, product, asset } => {
            let rules = clients.quality.list_rules(&domain, &product, &asset).await?;
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
        QualitySubcommands::DeleteRule { domain, product, asset, rule_id } => {
            clients.quality.delete_rule(&domain, &product, &asset, &rule_id).await?;
            println!("Deleted rule {rule_id}");
        }
        QualitySubcommands::Runs { asset, run_type } => {
            let runs = clients.quality.list_runs(&asset, &run_type).await?;
            for run in &runs {
                println!(
                    "{}  {}  {}",
                    run["runId"].as_str().unwrap_or("-"),
                    run["status"].as_str().unwrap_or("-"),
                    run["submissionTime"].as_str().unwrap_or("-"),
                );
            }
        }
    }
    Ok(())
}
