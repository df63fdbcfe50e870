use clap::{Parser, Subcommand};

use super::commands::auth::AuthCommands;
use super::commands::entity::EntityCommands;
use super::commands::quality::QualityCommands;
use super::commands::search::SearchCommands;
use super::commands::workflow::WorkflowCommands;

#[derive(Parser)]
#[command(name = "purview-cli")]
#[command(about = "A CLI tool for interacting with Microsoft Purview")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authentication status and token checks
    Auth(AuthCommands),
    /// Search the data catalog
    Search(SearchCommands),
    /// Inspect and annotate catalog entities
    Entity(EntityCommands),
    /// Data quality rules and runs
    Quality(QualityCommands),
    /// Workflows and approval tasks
    Workflow(WorkflowCommands),
}
