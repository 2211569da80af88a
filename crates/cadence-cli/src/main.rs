//! Cadence CLI
//!
//! Command-line front end for the cadence study-plan scheduler.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use cadence_core::{params::ListPlans, SchedulerBuilder};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        horizon_days,
        command,
    } = Args::parse();

    let scheduler = SchedulerBuilder::new()
        .with_database_path(database_file)
        .with_horizon_days(horizon_days)
        .build()
        .await
        .context("Failed to initialize scheduler")?;

    let cli = Cli::new(scheduler, TerminalRenderer::new(!no_color));

    info!("Cadence started");

    match command {
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Goal { command }) => cli.handle_goal_command(command).await,
        Some(Day { command }) => cli.handle_day_command(command).await,
        Some(Taxonomy { command }) => cli.handle_taxonomy_command(command).await,
        Some(Import(args)) => cli.handle_import(args).await,
        None => cli.list_plans(&ListPlans::default()).await,
    }
}
