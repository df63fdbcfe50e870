use anyhow::Result;
use clap::{Args, Subcommand};

use purview_cli::config::Config;

#[derive(Args)]
pub struct AuthCommands {
    #[command(subcommand)]
    pub command: AuthSubcommands,
}

#[derive(Subcommand)]
pub enum AuthSubcommands {
    /// Show the configured endpoint and tenant
    Status,
    /// Acquire a token and report its remaining lifetime
    Token,
}

pub async fn handle(commands: AuthCommands, config: Config) -> Result<()> {
    match commands.command {
        AuthSubcommands::Status => {
            println!("Endpoint:         {}", config.endpoint);
            println!("Quality endpoint: {}", config.quality_endpoint);
            println!("Tenant:           {}", config.credentials.tenant_id);
            println!("Client id:        {}", config.credentials.client_id);
            Ok(())
        }
        AuthSubcommands::Token => {
            let clients = config.clients();
            clients.tokens.get_token().await?;
            println!("Token acquired successfully");
            Ok(())
        }
    }
}
