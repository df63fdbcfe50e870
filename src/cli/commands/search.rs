use anyhow::Result;
use clap::Args;

use purview_cli::api::SearchOptions;
use purview_cli::config::Config;

#[derive(Args)]
pub struct SearchCommands {
    /// Search keywords (* for all assets)
    #[arg(default_value = "*")]
    pub keywords: String,
    /// Filter by entity type (e.g. "azure_sql_table")
    #[arg(long)]
    pub entity_type: Option<String>,
    /// Maximum results per page
    #[arg(long, default_value_t = 50)]
    pub limit: u32,
    /// Fetch every page instead of just the first
    #[arg(long)]
    pub all: bool,
}

pub async fn handle(commands: SearchCommands, config: Config) -> Result<()> {
    let clients = config.clients();
    let options = SearchOptions {
        keywords: commands.keywords,
        entity_type: commands.entity_type,
        limit: commands.limit,
        offset: 0,
    };

    let results = if commands.all {
        clients.datamap.search_all(&options, 100).await?
    } else {
        clients.datamap.search(&options).await?
    };

    println!("Found {} assets", results.len());
    for asset in &results {
        println!(
            "{}  {}  {}",
            asset["id"].as_str().unwrap_or("-"),
            asset["typeName"].as_str().unwrap_or("-"),
            asset["qualifiedName"].as_str().unwrap_or("-"),
        );
    }
    Ok(())
}
