mod common;

use autootvet_launcher::core::StepStatus;
use autootvet_launcher::{LaunchEngine, LaunchError, LauncherConfig, LocalLauncher, ProjectLayout};
use common::RecordingRunner;
use tempfile::TempDir;

fn layout_for(root: &TempDir) -> ProjectLayout {
    ProjectLayout::new(root.path().to_path_buf(), &LauncherConfig::default())
}

#[tokio::test]
async fn test_creates_venv_before_installs() {
    let root = TempDir::new().unwrap();

    let runner = RecordingRunner::new();
    let config = LauncherConfig::default();
    let launcher = LocalLauncher::new(runner.clone(), layout_for(&root), &config, false);

    let report = LaunchEngine::new(launcher).run().await.unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 3);

    // venv creation comes first
    assert_eq!(calls[0].program, "python3");
    assert_eq!(calls[0].args, vec!["-m", "venv", "venv"]);

    // then the two quiet manifest installs, in declared order
    assert!(calls[1].program.ends_with("venv/bin/pip"));
    assert_eq!(
        calls[1].args,
        vec!["install", "-q", "-r", "backend/requirements.txt"]
    );
    assert!(calls[1].quiet);
    assert_eq!(
        calls[2].args,
        vec!["install", "-q", "-r", "frontend/requirements.txt"]
    );

    assert_eq!(
        report.step("venv").map(|s| s.status),
        Some(StepStatus::Completed)
    );
    assert!(root.path().join("data/logs").is_dir());
}

#[tokio::test]
async fn test_existing_venv_skips_creation() {
    let root = TempDir::new().unwrap();
    std::fs::create_dir(root.path().join("venv")).unwrap();

    let runner = RecordingRunner::new();
    let config = LauncherConfig::default();
    let launcher = LocalLauncher::new(runner.clone(), layout_for(&root), &config, false);

    let report = LaunchEngine::new(launcher).run().await.unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.program.ends_with("pip")));

    assert_eq!(
        report.step("venv").map(|s| s.status),
        Some(StepStatus::Skipped)
    );
}

#[tokio::test]
async fn test_log_dir_creation_is_idempotent() {
    let root = TempDir::new().unwrap();
    std::fs::create_dir_all(root.path().join("data/logs")).unwrap();
    std::fs::write(root.path().join("data/logs/autootvet.log"), "old line\n").unwrap();

    let runner = RecordingRunner::new();
    let config = LauncherConfig::default();
    let launcher = LocalLauncher::new(runner.clone(), layout_for(&root), &config, false);

    LaunchEngine::new(launcher).run().await.unwrap();

    assert!(root.path().join("data/logs").is_dir());
    // existing logs untouched
    let content = std::fs::read_to_string(root.path().join("data/logs/autootvet.log")).unwrap();
    assert_eq!(content, "old line\n");
}

#[tokio::test]
async fn test_install_failure_propagates() {
    let root = TempDir::new().unwrap();

    let runner = RecordingRunner::failing_on("pip");
    let config = LauncherConfig::default();
    let launcher = LocalLauncher::new(runner.clone(), layout_for(&root), &config, false);

    let err = LaunchEngine::new(launcher)
        .run()
        .await
        .expect_err("pip failure must surface");
    assert!(matches!(err, LaunchError::CommandFailed { .. }));

    // the first failing install stops the sequence
    assert_eq!(runner.calls().len(), 2);
}

#[tokio::test]
async fn test_instructions_cover_both_processes() {
    let root = TempDir::new().unwrap();

    let runner = RecordingRunner::new();
    let config = LauncherConfig::default();
    let launcher = LocalLauncher::new(runner.clone(), layout_for(&root), &config, false);

    let report = LaunchEngine::new(launcher).run().await.unwrap();

    assert!(report.instructions.iter().any(|l| l.contains("uvicorn")));
    assert!(report.instructions.iter().any(|l| l.contains("streamlit")));
}

#[tokio::test]
async fn test_dry_run_changes_nothing() {
    let root = TempDir::new().unwrap();

    let runner = RecordingRunner::new();
    let config = LauncherConfig::default();
    let launcher = LocalLauncher::new(runner.clone(), layout_for(&root), &config, true);

    let report = LaunchEngine::new(launcher).run().await.unwrap();

    assert!(runner.calls().is_empty());
    assert!(!root.path().join("venv").exists());
    assert!(!root.path().join("data/logs").exists());
    assert!(report
        .steps
        .iter()
        .all(|s| s.status == StepStatus::Skipped));
}
