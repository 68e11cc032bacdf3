use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{env_file} was missing, created it from {template}")]
    EnvTemplateCopied { env_file: String, template: String },

    #[error("neither {env_file} nor the template {template} exists")]
    EnvTemplateMissing { env_file: String, template: String },

    #[error("command `{command}` exited with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("failed to spawn `{program}`: {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("service {service} is not healthy: {detail}")]
    ServiceUnhealthy { service: String, detail: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Environment,
    Process,
    Network,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LaunchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LaunchError::ConfigError { .. }
            | LaunchError::MissingConfigError { .. }
            | LaunchError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            LaunchError::EnvTemplateCopied { .. } | LaunchError::EnvTemplateMissing { .. } => {
                ErrorCategory::Environment
            }
            LaunchError::CommandFailed { .. } | LaunchError::SpawnError { .. } => {
                ErrorCategory::Process
            }
            LaunchError::HttpError(_) | LaunchError::ServiceUnhealthy { .. } => {
                ErrorCategory::Network
            }
            LaunchError::IoError(_) | LaunchError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LaunchError::EnvTemplateCopied { .. } => ErrorSeverity::High,
            LaunchError::EnvTemplateMissing { .. } => ErrorSeverity::Critical,
            LaunchError::CommandFailed { .. } => ErrorSeverity::High,
            LaunchError::SpawnError { .. } => ErrorSeverity::Critical,
            LaunchError::ServiceUnhealthy { .. } => ErrorSeverity::Medium,
            LaunchError::HttpError(_) => ErrorSeverity::Medium,
            LaunchError::ConfigError { .. }
            | LaunchError::MissingConfigError { .. }
            | LaunchError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            LaunchError::IoError(_) | LaunchError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            LaunchError::EnvTemplateCopied { env_file, .. } => format!(
                "Edit {} and fill in your credentials (SECRET_KEY, ENCRYPTION_KEY, marketplace API keys), then run the launcher again",
                env_file
            ),
            LaunchError::EnvTemplateMissing { template, .. } => format!(
                "Restore {} from the repository; the launcher needs it to bootstrap the environment file",
                template
            ),
            LaunchError::CommandFailed { command, .. } => {
                format!("Run `{}` manually to see the full output", command)
            }
            LaunchError::SpawnError { program, .. } => {
                format!("Make sure `{}` is installed and on your PATH", program)
            }
            LaunchError::ServiceUnhealthy { service, .. } => format!(
                "Check `docker compose logs -f` for {} and retry once it has finished starting",
                service
            ),
            LaunchError::HttpError(_) => {
                "Verify the stack is running (`autootvet up`) and the URLs in launcher.toml are correct"
                    .to_string()
            }
            LaunchError::ConfigError { .. }
            | LaunchError::MissingConfigError { .. }
            | LaunchError::InvalidConfigValueError { .. } => {
                "Fix launcher.toml and run the command again".to_string()
            }
            LaunchError::IoError(_) => {
                "Check filesystem permissions and free disk space in the project directory"
                    .to_string()
            }
            LaunchError::SerializationError(_) => {
                "The service returned malformed JSON; check its logs".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LaunchError::EnvTemplateCopied { env_file, template } => format!(
                "{} did not exist, so it was created from {}. Fill in your credentials before starting the stack.",
                env_file, template
            ),
            LaunchError::EnvTemplateMissing { env_file, template } => format!(
                "Cannot create {}: the template {} is missing.",
                env_file, template
            ),
            LaunchError::CommandFailed {
                command, status, ..
            } => format!("`{}` failed with exit status {}.", command, status),
            LaunchError::SpawnError { program, .. } => {
                format!("Could not run `{}`. Is it installed?", program)
            }
            LaunchError::ServiceUnhealthy { service, detail } => {
                format!("{} is not responding as expected: {}", service, detail)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LaunchError>;
