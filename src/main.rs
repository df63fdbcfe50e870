use anyhow::Result;
use clap::Parser;
use log::info;

mod cli;

use cli::{Cli, Commands};
use purview_cli::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Log to file, truncated on each run
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("purview-cli.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting purview-cli");

    let config = Config::from_env()?;

    match cli.command {
        Commands::Auth(commands) => cli::commands::auth::handle(commands, config).await,
        Commands::Search(commands) => cli::commands::search::handle(commands, config).await,
        Commands::Entity(commands) => cli::commands::entity::handle(commands, config).await,
        Commands::Quality(commands) => cli::commands::quality::handle(commands, config).await,
        Commands::Workflow(commands) => cli::commands::workflow::handle(commands, config).await,
    }
}
