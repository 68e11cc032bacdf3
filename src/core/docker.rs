use crate::config::env_file::{self, EnvFile};
use crate::config::LauncherConfig;
use crate::core::{CommandRunner, CommandSpec, Launcher, PathLayout, Result, StepStatus};
use crate::domain::model::LaunchReport;
use crate::utils::error::LaunchError;
use async_trait::async_trait;

/// Docker launcher: single `.env` existence check, then one compose
/// build-and-start invocation. No retries.
pub struct DockerLauncher<R: CommandRunner, P: PathLayout> {
    runner: R,
    layout: P,
    program: String,
    compose_args: Vec<String>,
    up_args: Vec<String>,
    frontend_url: String,
    api_url: String,
    logs_command: String,
    down_command: String,
    dry_run: bool,
}

impl<R: CommandRunner, P: PathLayout> DockerLauncher<R, P> {
    pub fn new(runner: R, layout: P, config: &LauncherConfig, dry_run: bool) -> Self {
        Self {
            runner,
            layout,
            program: config.docker_program(),
            compose_args: config.compose_args(),
            up_args: config.up_args(),
            frontend_url: config.frontend_url(),
            api_url: config.api_url(),
            logs_command: config.compose_command(&["logs", "-f"]),
            down_command: config.compose_command(&["down"]),
            dry_run,
        }
    }

    fn compose_up_spec(&self) -> CommandSpec {
        let mut args: Vec<String> = self.compose_args.clone();
        args.extend(self.up_args.clone());
        let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
        CommandSpec::new(self.program.clone(), &arg_refs).with_cwd(self.layout.root())
    }
}

#[async_trait]
impl<R: CommandRunner, P: PathLayout> Launcher for DockerLauncher<R, P> {
    fn name(&self) -> &str {
        "docker"
    }

    async fn preflight(&self, report: &mut LaunchReport) -> Result<()> {
        let env_path = self.layout.env_file();
        let template_path = self.layout.env_example();

        if !env_path.exists() {
            if !template_path.exists() {
                report.record(
                    "env-file",
                    StepStatus::Failed,
                    "no .env and no template to create it from",
                );
                return Err(LaunchError::EnvTemplateMissing {
                    env_file: env_path.display().to_string(),
                    template: template_path.display().to_string(),
                });
            }

            if self.dry_run {
                report.record(
                    "env-file",
                    StepStatus::Skipped,
                    format!(
                        "would create {} from {}",
                        env_path.display(),
                        template_path.display()
                    ),
                );
                return Ok(());
            }

            env_file::copy_template(&template_path, &env_path)?;
            report.record("env-file", StepStatus::Failed, "created from template");
            tracing::warn!(
                "⚠️ {} was missing; created it from {}",
                env_path.display(),
                template_path.display()
            );
            return Err(LaunchError::EnvTemplateCopied {
                env_file: env_path.display().to_string(),
                template: template_path.display().to_string(),
            });
        }

        // Placeholder values are a warning, not a stop: the user may be
        // intentionally running without marketplace credentials.
        let env = EnvFile::load(&env_path)?;
        let placeholders = env.placeholder_required_keys();
        if placeholders.is_empty() {
            report.record("env-file", StepStatus::Completed, "present");
        } else {
            tracing::warn!(
                "⚠️ {} still holds placeholder values for: {}",
                env_path.display(),
                placeholders.join(", ")
            );
            report.record(
                "env-file",
                StepStatus::Completed,
                format!("present, placeholders: {}", placeholders.join(", ")),
            );
        }

        Ok(())
    }

    async fn launch(&self, report: &mut LaunchReport) -> Result<()> {
        let spec = self.compose_up_spec();

        if self.dry_run {
            report.record(
                "compose-up",
                StepStatus::Skipped,
                format!("would run: {}", spec.display()),
            );
            return Ok(());
        }

        tracing::info!("🐳 Running: {}", spec.display());
        let output = self.runner.run(&spec).await?;

        if !output.success() {
            report.record(
                "compose-up",
                StepStatus::Failed,
                format!("exit status {:?}", output.status_code),
            );
            return Err(LaunchError::CommandFailed {
                command: spec.display(),
                status: output.status_code.unwrap_or(-1),
                stderr: output.stderr.trim().to_string(),
            });
        }

        report.record("compose-up", StepStatus::Completed, "containers starting");
        Ok(())
    }

    fn instructions(&self) -> Vec<String> {
        vec![
            format!("Frontend:  {}", self.frontend_url),
            format!("API:       {}", self.api_url),
            format!("API docs:  {}/docs", self.api_url),
            format!("Follow logs with: {}", self.logs_command),
            format!("Stop the stack with: {}", self.down_command),
        ]
    }
}
