use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};

/// viewcache - compiled view template cache with live invalidation
#[derive(Parser, Debug)]
#[command(name = "viewcache")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./viewcache.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Application root, overriding the config file
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// View file suffix, overriding the config file
    #[arg(long, global = true)]
    pub suffix: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a view and render it with a JSON model
    #[command(group(ArgGroup::new("model_source").args(["model", "model_file"])))]
    Render {
        /// Logical view path, relative to the root
        view: String,

        /// Model as an inline JSON document
        #[arg(long)]
        model: Option<String>,

        /// Model read from a JSON file
        #[arg(long)]
        model_file: Option<PathBuf>,
    },

    /// Compile views and report their model types (exits non-zero on failure)
    Check {
        /// Logical view paths
        #[arg(required = true)]
        views: Vec<String>,
    },

    /// Warm views and keep them fresh until Ctrl+C, printing cache events
    Watch {
        /// Print events as NDJSON
        #[arg(long)]
        json: bool,

        /// Logical view paths to compile up front
        views: Vec<String>,
    },
}
