use anyhow::Context;
use autootvet_launcher::config::env_file::EnvFile;
use autootvet_launcher::core::{CommandRunner, CommandSpec, LaunchReport, PathLayout};
use autootvet_launcher::utils::monitor::LaunchMonitor;
use autootvet_launcher::utils::{logger, validation::Validate};
use autootvet_launcher::{
    CliConfig, DockerLauncher, HealthProbe, LaunchCommand, LaunchEngine, LaunchError,
    LauncherConfig, LocalLauncher, ProjectLayout, SystemRunner,
};
use clap::Parser;
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting autootvet launcher");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入配置（launcher.toml 可選）
    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file is valid TOML");
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let layout = ProjectLayout::new(PathBuf::from(&cli.root), &config);
    let runner = SystemRunner::new();

    let monitor_enabled = cli.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let result = match &cli.command {
        LaunchCommand::Up { dry_run } => {
            let launcher = DockerLauncher::new(runner, layout, &config, *dry_run);
            let engine = LaunchEngine::new_with_monitoring(launcher, monitor_enabled);
            engine.run().await.map(|report| {
                print_report(&format!("{} stack is starting!", config.project_name()), &report);
            })
        }
        LaunchCommand::Local { dry_run } => {
            let launcher = LocalLauncher::new(runner, layout, &config, *dry_run);
            let engine = LaunchEngine::new_with_monitoring(launcher, monitor_enabled);
            engine.run().await.map(|report| {
                print_report("Local environment is ready!", &report);
            })
        }
        LaunchCommand::Status => run_status(&config).await,
        LaunchCommand::Doctor => run_doctor(&runner, &layout, &config).await,
    };

    if let Err(e) = result {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ Launcher failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        // 輸出用戶友好的錯誤信息
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            autootvet_launcher::utils::error::ErrorSeverity::Low => 0,
            autootvet_launcher::utils::error::ErrorSeverity::Medium => 2,
            autootvet_launcher::utils::error::ErrorSeverity::High => 1,
            autootvet_launcher::utils::error::ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn load_config(path: &str) -> anyhow::Result<LauncherConfig> {
    if !Path::new(path).exists() {
        tracing::debug!("No {} found, using defaults", path);
        return Ok(LauncherConfig::default());
    }

    tracing::info!("📁 Loading configuration from: {}", path);
    LauncherConfig::from_file(path).with_context(|| format!("failed to parse {}", path))
}

fn print_report(headline: &str, report: &LaunchReport) {
    println!("✅ {}", headline);
    if !report.instructions.is_empty() {
        println!();
        for line in &report.instructions {
            println!("  {}", line);
        }
    }
}

async fn run_status(config: &LauncherConfig) -> Result<(), LaunchError> {
    let probe = HealthProbe::new(config)?;
    let results = probe.check().await;

    println!("📋 {} service status:", config.project_name());
    for service in &results {
        let symbol = if service.healthy { "✅" } else { "❌" };
        println!(
            "  {} {:<10} {} ({})",
            symbol, service.service, service.detail, service.url
        );
    }

    if let Some(bad) = results.iter().find(|s| !s.healthy) {
        return Err(LaunchError::ServiceUnhealthy {
            service: bad.service.clone(),
            detail: bad.detail.clone(),
        });
    }
    Ok(())
}

async fn run_doctor(
    runner: &SystemRunner,
    layout: &ProjectLayout,
    config: &LauncherConfig,
) -> Result<(), LaunchError> {
    println!("🩺 {} environment check", config.project_name());
    println!();

    // 外部工具
    let tools = [
        ("Docker", config.docker_program()),
        ("Python", config.python_bin()),
    ];
    for (name, program) in &tools {
        let spec = CommandSpec::new(program.clone(), &["--version"]).quiet();
        match runner.run(&spec).await {
            Ok(output) if output.success() => {
                println!("  ✅ {}: {}", name, output.stdout.trim())
            }
            Ok(output) => println!(
                "  ❌ {} exited with status {:?}",
                name, output.status_code
            ),
            Err(e) => println!("  ❌ {} not available: {}", name, e),
        }
    }

    // 環境檔案
    let env_path = layout.env_file();
    if env_path.exists() {
        let env = EnvFile::load(&env_path)?;
        let missing = env.missing_required();
        let placeholders = env.placeholder_required_keys();
        if missing.is_empty() && placeholders.is_empty() {
            println!("  ✅ {} present, required keys filled in", env_path.display());
        } else {
            if !missing.is_empty() {
                println!("  ⚠️ {} missing keys: {}", env_path.display(), missing.join(", "));
            }
            if !placeholders.is_empty() {
                println!(
                    "  ⚠️ {} placeholder values: {}",
                    env_path.display(),
                    placeholders.join(", ")
                );
            }
        }
    } else {
        println!("  ⚠️ {} missing (run `autootvet up` to create it from the template)", env_path.display());
    }

    // 虛擬環境
    if layout.venv_dir().exists() {
        println!("  ✅ {} present", layout.venv_dir().display());
    } else {
        println!("  ℹ️ {} not created yet (run `autootvet local`)", layout.venv_dir().display());
    }

    // 主機資源
    if let Some(stats) = LaunchMonitor::new(true).get_stats() {
        println!(
            "  📊 Host memory: {}MB free of {}MB",
            stats.available_memory_mb, stats.total_memory_mb
        );
    }

    Ok(())
}
