//! CDE Workflow CLI
//!
//! Renders and checks the bucket workflow declaration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cde_workflow::Workflow;
use cde_workflow::bucket::bucket_workflow;

#[derive(Parser)]
#[command(name = "cde-workflow")]
#[command(about = "Bucket workflow declaration for CDE", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the workflow as JSON
    Render {
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },
    /// Check the workflow and print its task order
    Validate,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cde_workflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let workflow = bucket_workflow().context("Failed to build bucket workflow")?;
    debug!("Built workflow {}", workflow.dag_id());

    match cli.command {
        Commands::Render { compact } => render(&workflow, compact),
        Commands::Validate => validate(&workflow),
    }
}

fn render(workflow: &Workflow, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(workflow)?
    } else {
        workflow.to_json()?
    };

    println!("{}", json);
    Ok(())
}

fn validate(workflow: &Workflow) -> Result<()> {
    let order = workflow.validate()?;

    println!(
        "{} {}",
        "✓".green(),
        format!("Workflow {} is valid", workflow.dag_id()).bold()
    );
    println!(
        "  Schedule: {} from {} to {}",
        workflow.default_args.schedule_interval,
        workflow.default_args.start_date,
        workflow.default_args.end_date
    );
    println!();

    for (position, task_id) in order.iter().enumerate() {
        let operator = workflow
            .graph
            .task(task_id)
            .map(|t| t.operator.kind())
            .unwrap_or_default();
        println!(
            "  {} {} {}",
            format!("{}.", position + 1).dimmed(),
            task_id.cyan(),
            format!("({})", operator).dimmed()
        );
    }

    Ok(())
}
