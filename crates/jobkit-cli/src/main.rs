//! jobkit CLI Application
//!
//! Command-line front end for editing template-backed job, step and
//! environment assets.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use jobkit_core::{params::ListAssets, AssetKind, WorkbenchBuilder};
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        templates_dir,
        cache_templates,
        fix_strategy,
        no_color,
        command,
    } = Args::parse();

    let workbench = WorkbenchBuilder::new()
        .with_database_path(database_file)
        .with_templates_dir(templates_dir)
        .with_template_cache(cache_templates)
        .with_fix_strategy(fix_strategy.into())
        .build()
        .context("Failed to initialize workbench")?;

    let mut cli = Cli::new(workbench, TerminalRenderer::new(!no_color));

    info!("jobkit started");

    match command {
        Some(Job { command }) => cli.handle_asset_command(AssetKind::Job, command),
        Some(Step { command }) => cli.handle_asset_command(AssetKind::Step, command),
        Some(Environment { command }) => {
            cli.handle_asset_command(AssetKind::Environment, command)
        }
        Some(Link(args)) => cli.link(args, false),
        Some(Unlink(args)) => cli.link(args, true),
        Some(Depend(args)) => cli.set_dependencies(args),
        Some(Validate(args)) => cli.validate_job(args),
        Some(List(args)) => cli.list_assets(&args.into()),
        None => cli.list_assets(&ListAssets::default()),
    }
}
