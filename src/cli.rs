use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
pub struct FolioArgs {
    /// Load configuration from a custom location. Defaults to: $XDG_CONFIG/folio/config.yml
    #[arg(short, long = "config", value_name = "FILE", global = true)]
    pub config_path: Option<PathBuf>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Run the web server (default)
    Serve,
    /// Print a config template
    ConfigTemplate,
    /// Create a config file. Defaults to: $XDG_CONFIG/folio/config.yml
    ConfigInit,
    /// Insert fake community posts for local development
    Seed {
        /// Number of posts to create
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },
}

#[derive(Clone, Debug, Parser)]
#[command(version, about = "Personal site, blog and community")]
pub struct Cli {
    #[command(flatten)]
    pub args: FolioArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}
