use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "autootvet")]
#[command(about = "Launcher and setup tool for the AutoOtvet stack")]
pub struct CliConfig {
    /// Path to the launcher configuration file
    #[arg(short, long, default_value = "launcher.toml")]
    pub config: String,

    /// Project root directory (where .env, venv and docker-compose.yml live)
    #[arg(long, default_value = ".")]
    pub root: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable system monitoring output
    #[arg(long)]
    pub monitor: bool,

    #[command(subcommand)]
    pub command: LaunchCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum LaunchCommand {
    /// Build and start the stack with Docker Compose
    Up {
        /// Show what would run without executing or changing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Set up a local development environment (venv + dependencies)
    Local {
        /// Show what would run without executing or changing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Probe the running services and report their health
    Status,
    /// Check host prerequisites and configuration
    Doctor,
}
