use anyhow::Result;
use clap::{Args, Subcommand};

use purview_cli::config::Config;

#[derive(Args)]
pub struct WorkflowCommands {
    #[command(subcommand)]
    pub command: WorkflowSubcommands,
}

#[derive(Subcommand)]
pub enum WorkflowSubcommands {
    /// List workflows
    List,
    /// List pending approval tasks
    Tasks {
        #[arg(long)]
        workflow_id: Option<String>,
    },
    /// Approve a task
    Approve {
        task_id: String,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Reject a task
    Reject {
        task_id: String,
        #[arg(long)]
        comment: Option<String>,
    },
    /// List workflow runs
    Runs {
        #[arg(long)]
        workflow_id: Option<String>,
    },
}

pub async fn handle(commands: WorkflowCommands, config: Config) -> Result<()> {
    let clients = config.clients();

    match commands.command {
        WorkflowSubcommands::List => {
            let workflows = clients.workflow.list_workflows().await?;
            println!("Found {} workflows", workflows.len());
            for workflow in &workflows {
                println!(
                    "{}  {}",
                    workflow["id"].as_str().unwrap_or("-"),
                    workflow["name"].as_str().unwrap_or("-"),
                );
            }
        }
        WorkflowSubcommands::Tasks { workflow_id } => {
            let tasks = clients.workflow.list_tasks(workflow_id.as_deref(), None).await?;
            for task in &tasks {
                println!(
                    "{}  {}",
                    task["id"].as_str().unwrap_or("-"),
                    task["status"].as_str().unwrap_or("-"),
                );
            }
        }
        WorkflowSubcommands::Approve { task_id, comment } => {
            clients.workflow.approve_task(&task_id, comment.as_deref()).await?;
            println!("Approved task {task_id}");
        }
        WorkflowSubcommands::Reject { task_id, comment } => {
            clients.workflow.reject_task(&task_id, comment.as_deref()).await?;
            println!("Rejected task {task_id}");
        }
        WorkflowSubcommands::Runs { workflow_id } => {
            let runs = clients.workflow.list_workflow_runs(workflow_id.as_deref()).await?;
            for run in &runs {
                println!(
                    "{}  {}  {}",
                    run["id"].as_str().unwrap_or("-"),
                    run["status"].as_str().unwrap_or("-"),
                    run["startTime"].as_str().unwrap_or("-"),
                );
            }
        }
    }
    Ok(())
}
