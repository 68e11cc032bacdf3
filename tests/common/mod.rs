use async_trait::async_trait;
use autootvet_launcher::core::{CommandOutput, CommandRunner, CommandSpec};
use autootvet_launcher::Result;
use std::sync::{Arc, Mutex};

/// Records every command instead of executing it. Clones share the log.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    calls: Arc<Mutex<Vec<CommandSpec>>>,
    fail_matching: Option<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands whose rendered form contains `substring` report exit status 1.
    #[allow(dead_code)]
    pub fn failing_on(substring: &str) -> Self {
        Self {
            calls: Arc::default(),
            fail_matching: Some(substring.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.calls.lock().unwrap().push(spec.clone());

        let fail = self
            .fail_matching
            .as_ref()
            .map(|m| spec.display().contains(m))
            .unwrap_or(false);

        if fail {
            Ok(CommandOutput {
                status_code: Some(1),
                stdout: String::new(),
                stderr: "simulated failure".to_string(),
            })
        } else {
            Ok(CommandOutput {
                status_code: Some(0),
                stdout: String::new(),
                stderr: String::new(),
            })
        }
    }
}
