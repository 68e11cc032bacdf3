use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 要執行的外部命令
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    /// Discard stdout instead of logging it.
    pub quiet: bool,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: None,
            quiet: false,
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutput {
    pub status_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status_code == Some(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    Completed,
    Skipped,
    Failed,
}

impl StepStatus {
    pub fn symbol(&self) -> &'static str {
        match self {
            StepStatus::Completed => "✅",
            StepStatus::Skipped => "⏭️",
            StepStatus::Failed => "❌",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub name: String,
    pub status: StepStatus,
    pub detail: String,
}

/// 單次啟動流程的結果摘要
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchReport {
    pub launcher: String,
    pub started_at: DateTime<Utc>,
    pub steps: Vec<StepRecord>,
    pub instructions: Vec<String>,
}

impl LaunchReport {
    pub fn new(launcher: impl Into<String>) -> Self {
        Self {
            launcher: launcher.into(),
            started_at: Utc::now(),
            steps: Vec::new(),
            instructions: Vec::new(),
        }
    }

    pub fn record(
        &mut self,
        name: impl Into<String>,
        status: StepStatus,
        detail: impl Into<String>,
    ) {
        self.steps.push(StepRecord {
            name: name.into(),
            status,
            detail: detail.into(),
        });
    }

    pub fn step(&self, name: &str) -> Option<&StepRecord> {
        self.steps.iter().find(|s| s.name == name)
    }

    pub fn has_failures(&self) -> bool {
        self.steps.iter().any(|s| s.status == StepStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_spec_display() {
        let spec = CommandSpec::new("docker", &["compose", "up", "-d", "--build"]);
        assert_eq!(spec.display(), "docker compose up -d --build");

        let bare = CommandSpec::new("docker", &[]);
        assert_eq!(bare.display(), "docker");
    }

    #[test]
    fn test_report_lookup_and_failures() {
        let mut report = LaunchReport::new("docker");
        report.record("env-file", StepStatus::Completed, "present");
        report.record("compose-up", StepStatus::Failed, "exit 1");

        assert_eq!(
            report.step("env-file").map(|s| s.status),
            Some(StepStatus::Completed)
        );
        assert!(report.has_failures());
    }
}
