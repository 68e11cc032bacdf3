use crate::utils::error::{LaunchError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional `launcher.toml` overrides. Every section and field has a default
/// matching the stock AutoOtvet checkout, so an absent file means stock behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LauncherConfig {
    pub project: Option<ProjectSection>,
    pub docker: Option<DockerSection>,
    pub urls: Option<UrlsSection>,
    pub local: Option<LocalSection>,
    pub env: Option<EnvSection>,
    pub health: Option<HealthSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSection {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DockerSection {
    pub program: Option<String>,
    pub compose_args: Option<Vec<String>>,
    pub up_args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlsSection {
    pub frontend: Option<String>,
    pub api: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalSection {
    pub python: Option<String>,
    pub venv_dir: Option<String>,
    pub log_dir: Option<String>,
    pub requirements: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvSection {
    pub file: Option<String>,
    pub template: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthSection {
    pub timeout_seconds: Option<u64>,
}

impl LauncherConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LaunchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| LaunchError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_URL})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn project_name(&self) -> String {
        self.project
            .as_ref()
            .and_then(|p| p.name.clone())
            .unwrap_or_else(|| "AutoOtvet".to_string())
    }

    pub fn docker_program(&self) -> String {
        self.docker
            .as_ref()
            .and_then(|d| d.program.clone())
            .unwrap_or_else(|| "docker".to_string())
    }

    pub fn compose_args(&self) -> Vec<String> {
        self.docker
            .as_ref()
            .and_then(|d| d.compose_args.clone())
            .unwrap_or_else(|| vec!["compose".to_string()])
    }

    pub fn up_args(&self) -> Vec<String> {
        self.docker
            .as_ref()
            .and_then(|d| d.up_args.clone())
            .unwrap_or_else(|| {
                vec!["up".to_string(), "-d".to_string(), "--build".to_string()]
            })
    }

    /// Full compose invocation, e.g. `docker compose logs -f`.
    pub fn compose_command(&self, tail: &[&str]) -> String {
        let mut words = vec![self.docker_program()];
        words.extend(self.compose_args());
        words.extend(tail.iter().map(|s| s.to_string()));
        words.join(" ")
    }

    pub fn frontend_url(&self) -> String {
        self.urls
            .as_ref()
            .and_then(|u| u.frontend.clone())
            .unwrap_or_else(|| "http://localhost:8501".to_string())
    }

    pub fn api_url(&self) -> String {
        self.urls
            .as_ref()
            .and_then(|u| u.api.clone())
            .unwrap_or_else(|| "http://localhost:8000".to_string())
    }

    pub fn python_bin(&self) -> String {
        self.local
            .as_ref()
            .and_then(|l| l.python.clone())
            .unwrap_or_else(|| "python3".to_string())
    }

    pub fn venv_dir(&self) -> String {
        self.local
            .as_ref()
            .and_then(|l| l.venv_dir.clone())
            .unwrap_or_else(|| "venv".to_string())
    }

    pub fn log_dir(&self) -> String {
        self.local
            .as_ref()
            .and_then(|l| l.log_dir.clone())
            .unwrap_or_else(|| "data/logs".to_string())
    }

    pub fn requirements(&self) -> Vec<String> {
        self.local
            .as_ref()
            .and_then(|l| l.requirements.clone())
            .unwrap_or_else(|| {
                vec![
                    "backend/requirements.txt".to_string(),
                    "frontend/requirements.txt".to_string(),
                ]
            })
    }

    pub fn env_file(&self) -> String {
        self.env
            .as_ref()
            .and_then(|e| e.file.clone())
            .unwrap_or_else(|| ".env".to_string())
    }

    pub fn env_template(&self) -> String {
        self.env
            .as_ref()
            .and_then(|e| e.template.clone())
            .unwrap_or_else(|| ".env.example".to_string())
    }

    pub fn health_timeout_seconds(&self) -> u64 {
        self.health
            .as_ref()
            .and_then(|h| h.timeout_seconds)
            .unwrap_or(5)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_url("urls.frontend", &self.frontend_url())?;
        validate_url("urls.api", &self.api_url())?;

        validate_non_empty_string("docker.program", &self.docker_program())?;
        validate_non_empty_string("local.python", &self.python_bin())?;

        validate_path("local.venv_dir", &self.venv_dir())?;
        validate_path("local.log_dir", &self.log_dir())?;
        for req in self.requirements() {
            validate_path("local.requirements", &req)?;
        }

        validate_positive_number(
            "health.timeout_seconds",
            self.health_timeout_seconds() as usize,
            1,
        )?;

        Ok(())
    }
}

impl Validate for LauncherConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
