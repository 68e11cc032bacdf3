use crate::config::LauncherConfig;
use crate::core::{CommandOutput, CommandRunner, CommandSpec, PathLayout};
use crate::utils::error::{LaunchError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Real command execution through the OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        let mut command = tokio::process::Command::new(&spec.program);
        command.args(&spec.args);
        if let Some(cwd) = &spec.cwd {
            command.current_dir(cwd);
        }

        tracing::debug!("Executing: {}", spec.display());
        let output = command.output().await.map_err(|e| LaunchError::SpawnError {
            program: spec.program.clone(),
            source: e,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if !spec.quiet && !stdout.trim().is_empty() {
            tracing::debug!("stdout: {}", stdout.trim());
        }

        Ok(CommandOutput {
            status_code: output.status.code(),
            stdout,
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Filesystem layout of an AutoOtvet checkout, rooted at the project directory.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
    env_file: String,
    env_example: String,
    venv_dir: String,
    log_dir: String,
    requirements: Vec<String>,
}

impl ProjectLayout {
    pub fn new(root: PathBuf, config: &LauncherConfig) -> Self {
        Self {
            root,
            env_file: config.env_file(),
            env_example: config.env_template(),
            venv_dir: config.venv_dir(),
            log_dir: config.log_dir(),
            requirements: config.requirements(),
        }
    }
}

impl PathLayout for ProjectLayout {
    fn root(&self) -> &Path {
        &self.root
    }

    fn env_file(&self) -> PathBuf {
        self.root.join(&self.env_file)
    }

    fn env_example(&self) -> PathBuf {
        self.root.join(&self.env_example)
    }

    fn venv_dir(&self) -> PathBuf {
        self.root.join(&self.venv_dir)
    }

    fn log_dir(&self) -> PathBuf {
        self.root.join(&self.log_dir)
    }

    fn requirements(&self) -> Vec<PathBuf> {
        self.requirements
            .iter()
            .map(|r| PathBuf::from(r))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_joins_paths_under_root() {
        let config = LauncherConfig::default();
        let layout = ProjectLayout::new(PathBuf::from("/srv/autootvet"), &config);

        assert_eq!(layout.env_file(), PathBuf::from("/srv/autootvet/.env"));
        assert_eq!(
            layout.env_example(),
            PathBuf::from("/srv/autootvet/.env.example")
        );
        assert_eq!(layout.venv_dir(), PathBuf::from("/srv/autootvet/venv"));
        assert_eq!(layout.log_dir(), PathBuf::from("/srv/autootvet/data/logs"));
        assert_eq!(layout.requirements().len(), 2);
    }
}
