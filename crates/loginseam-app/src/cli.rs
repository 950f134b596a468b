use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "loginseam", about = "Log in through a swappable login provider")]
pub struct Cli {
    /// Path to config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Press the login button once and print the outcome
    Login {
        /// Permission to request (repeatable); defaults to the configured list
        #[arg(long = "permission")]
        permissions: Vec<String>,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive session: each empty line or `login` presses the button, `quit` exits
    Run,
}
