use crate::core::{Launcher, Result};
use crate::domain::model::LaunchReport;
use crate::utils::monitor::LaunchMonitor;

pub struct LaunchEngine<L: Launcher> {
    launcher: L,
    monitor: LaunchMonitor,
}

impl<L: Launcher> LaunchEngine<L> {
    pub fn new(launcher: L) -> Self {
        Self {
            launcher,
            monitor: LaunchMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(launcher: L, monitor_enabled: bool) -> Self {
        Self {
            launcher,
            monitor: LaunchMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<LaunchReport> {
        let mut report = LaunchReport::new(self.launcher.name());
        tracing::info!("🚀 Starting {} launcher", self.launcher.name());

        tracing::info!("Running preflight checks...");
        self.launcher.preflight(&mut report).await?;
        self.monitor.log_stats("preflight");

        tracing::info!("Launching...");
        self.launcher.launch(&mut report).await?;
        self.monitor.log_stats("launch");

        for step in &report.steps {
            tracing::info!("{} {}: {}", step.status.symbol(), step.name, step.detail);
        }

        report.instructions = self.launcher.instructions();
        self.monitor.log_final_stats();

        Ok(report)
    }
}
