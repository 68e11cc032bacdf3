use crate::config::LauncherConfig;
use crate::core::{CommandRunner, CommandSpec, Launcher, PathLayout, Result, StepStatus};
use crate::domain::model::LaunchReport;
use crate::utils::error::LaunchError;
use async_trait::async_trait;

/// Local launcher: create the venv if absent, install the declared
/// dependency manifests quietly, make sure the log directory exists.
pub struct LocalLauncher<R: CommandRunner, P: PathLayout> {
    runner: R,
    layout: P,
    python: String,
    venv_name: String,
    dry_run: bool,
}

impl<R: CommandRunner, P: PathLayout> LocalLauncher<R, P> {
    pub fn new(runner: R, layout: P, config: &LauncherConfig, dry_run: bool) -> Self {
        Self {
            runner,
            layout,
            python: config.python_bin(),
            venv_name: config.venv_dir(),
            dry_run,
        }
    }

    fn pip_path(&self) -> std::path::PathBuf {
        self.layout.venv_dir().join("bin").join("pip")
    }

    async fn run_checked(&self, spec: CommandSpec) -> Result<()> {
        let output = self.runner.run(&spec).await?;
        if !output.success() {
            return Err(LaunchError::CommandFailed {
                command: spec.display(),
                status: output.status_code.unwrap_or(-1),
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<R: CommandRunner, P: PathLayout> Launcher for LocalLauncher<R, P> {
    fn name(&self) -> &str {
        "local"
    }

    async fn preflight(&self, report: &mut LaunchReport) -> Result<()> {
        let venv = self.layout.venv_dir();

        if venv.exists() {
            report.record("venv", StepStatus::Skipped, "already present");
            return Ok(());
        }

        let spec = CommandSpec::new(self.python.clone(), &["-m", "venv", &self.venv_name])
            .with_cwd(self.layout.root());

        if self.dry_run {
            report.record(
                "venv",
                StepStatus::Skipped,
                format!("would run: {}", spec.display()),
            );
            return Ok(());
        }

        tracing::info!("🐍 Creating virtual environment: {}", spec.display());
        self.run_checked(spec).await?;
        report.record("venv", StepStatus::Completed, "created");
        Ok(())
    }

    async fn launch(&self, report: &mut LaunchReport) -> Result<()> {
        let pip = self.pip_path();

        for manifest in self.layout.requirements() {
            let manifest_str = manifest.display().to_string();
            // 安裝輸出不顯示
            let spec = CommandSpec::new(
                pip.display().to_string(),
                &["install", "-q", "-r", &manifest_str],
            )
            .with_cwd(self.layout.root())
            .quiet();

            if self.dry_run {
                report.record(
                    "pip-install",
                    StepStatus::Skipped,
                    format!("would run: {}", spec.display()),
                );
                continue;
            }

            tracing::info!("📦 Installing dependencies from {}", manifest_str);
            self.run_checked(spec).await?;
            report.record("pip-install", StepStatus::Completed, manifest_str);
        }

        let log_dir = self.layout.log_dir();
        if self.dry_run {
            report.record(
                "log-dir",
                StepStatus::Skipped,
                format!("would create {}", log_dir.display()),
            );
        } else {
            std::fs::create_dir_all(&log_dir)?;
            report.record(
                "log-dir",
                StepStatus::Completed,
                log_dir.display().to_string(),
            );
        }

        Ok(())
    }

    fn instructions(&self) -> Vec<String> {
        vec![
            format!(
                "Activate the environment: source {}/bin/activate",
                self.venv_name
            ),
            format!(
                "Start the backend:  cd backend && ../{}/bin/uvicorn main:app --reload --host 0.0.0.0 --port 8000",
                self.venv_name
            ),
            format!(
                "Start the frontend: cd frontend && ../{}/bin/streamlit run streamlit_app.py",
                self.venv_name
            ),
        ]
    }
}
