use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "tracky-tui")]
#[command(about = "Terminal UI for Tracky time tracking")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the time tracker
    Run,
    /// Print config path and create default file if missing
    ConfigPath,
}
