use anyhow::Result;
use clap::{Args, Subcommand};

use purview_cli::api::LineageDirection;
use purview_cli::config::Config;

#[derive(Args)]
pub struct EntityCommands {
    #[command(subcommand)]
    pub command: EntitySubcommands,
}

#[derive(Subcommand)]
pub enum EntitySubcommands {
    /// Get full entity details by GUID
    Get {
        guid: String,
    },
    /// Set an entity description
    Describe {
        guid: String,
        description: String,
    },
    /// Show classifications on an entity
    Classifications {
        guid: String,
    },
    /// Show lineage around an entity
    Lineage {
        guid: String,
        /// INPUT, OUTPUT or BOTH
        #[arg(long, default_value = "BOTH")]
        direction: String,
        #[arg(long, default_value_t = 3)]
        depth: u32,
    },
}

pub async fn handle(commands: EntityCommands, config: Config) -> Result<()> {
    let clients = config.clients();

    match commands.command {
        EntitySubcommands::Get { guid } => {
            let entity = clients.datamap.get_entity(&guid).await?;
            println!("{}", serde_json::to_string_pretty(&entity)?);
        }
        EntitySubcommands::Describe { guid, description } => {
            clients.datamap.set_description(&guid, &description).await?;
            println!("Updated description for {guid}");
        }
        EntitySubcommands::Classifications { guid } => {
            let classifications = clients.datamap.get_classifications(&guid).await?;
            println!("{}", serde_json::to_string_pretty(&classifications)?);
        }
        EntitySubcommands::Lineage { guid, direction, depth } => {
            let direction = match direction.to_uppercase().as_str() {
                "INPUT" => LineageDirection::Input,
                "OUTPUT" => LineageDirection::Output,
                _ => LineageDirection::Both,
            };
            let lineage = clients.catalog.get_lineage(&guid, direction, depth).await?;
            println!("{}", serde_json::to_string_pretty(&lineage)?);
        }
    }
    Ok(())
}
