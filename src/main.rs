//! viewcache CLI
//!
//! Usage: viewcache [OPTIONS] <COMMAND>
//!
//! Commands:
//!   render  Compile a view and render it with a JSON model
//!   check   Compile views and report their model types
//!   watch   Keep views fresh while their files change

mod cli;
mod commands;

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing::Level;

use cli::{Cli, Commands};

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Logs go to stderr; stdout carries rendered output and events
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = commands::resolve_config(&cli)?;

    match &cli.command {
        Commands::Render {
            view,
            model,
            model_file,
        } => commands::render::cmd_render(&config, view, model.as_deref(), model_file.as_deref()),
        Commands::Check { views } => commands::check::cmd_check(&config, views),
        Commands::Watch { json, views } => commands::watch::cmd_watch(&config, views, *json),
    }
}
