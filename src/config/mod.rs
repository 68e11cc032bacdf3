#[cfg(feature = "cli")]
pub mod cli;
pub mod env_file;
pub mod launcher_toml;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, LaunchCommand};
pub use launcher_toml::LauncherConfig;
