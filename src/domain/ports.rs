use crate::domain::model::{CommandOutput, CommandSpec, LaunchReport};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Runs external tooling (docker, python, pip). Mocked in tests.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput>;
}

/// Resolves the well-known files and directories of an AutoOtvet checkout.
pub trait PathLayout: Send + Sync {
    fn root(&self) -> &Path;
    fn env_file(&self) -> PathBuf;
    fn env_example(&self) -> PathBuf;
    fn venv_dir(&self) -> PathBuf;
    fn log_dir(&self) -> PathBuf;
    fn requirements(&self) -> Vec<PathBuf>;
}

#[async_trait]
pub trait Launcher: Send + Sync {
    fn name(&self) -> &str;

    /// Setup checks and one-time preparation before anything is started.
    async fn preflight(&self, report: &mut LaunchReport) -> Result<()>;

    /// The actual start/install sequence.
    async fn launch(&self, report: &mut LaunchReport) -> Result<()>;

    /// What the user should do next, printed after a successful run.
    fn instructions(&self) -> Vec<String>;
}
