pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, LaunchCommand};
pub use config::LauncherConfig;

pub use adapters::{ProjectLayout, SystemRunner};
pub use core::{
    docker::DockerLauncher, engine::LaunchEngine, health::HealthProbe, local::LocalLauncher,
};
pub use utils::error::{LaunchError, Result};
