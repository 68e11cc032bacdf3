use crate::config::LauncherConfig;
use crate::utils::error::{LaunchError, Result};
use reqwest::Client;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServiceHealth {
    pub service: String,
    pub url: String,
    pub healthy: bool,
    pub detail: String,
}

/// Read-only probe of the URLs the launchers print. One GET per endpoint,
/// bounded timeout, no retries.
pub struct HealthProbe {
    client: Client,
    api_url: String,
    frontend_url: String,
}

impl HealthProbe {
    pub fn new(config: &LauncherConfig) -> Result<Self> {
        Self::with_urls(
            config.api_url(),
            config.frontend_url(),
            Duration::from_secs(config.health_timeout_seconds()),
        )
    }

    pub fn with_urls(
        api_url: impl Into<String>,
        frontend_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            frontend_url: frontend_url.into(),
        })
    }

    /// Probe every service. Network failures are reported as unhealthy
    /// entries, never as errors.
    pub async fn check(&self) -> Vec<ServiceHealth> {
        vec![
            self.probe_backend_health().await,
            self.probe_backend_root().await,
            self.probe_frontend().await,
        ]
    }

    /// Like [`check`](Self::check) but fails on the first unhealthy service,
    /// so the CLI exits non-zero.
    pub async fn ensure_healthy(&self) -> Result<Vec<ServiceHealth>> {
        let results = self.check().await;
        if let Some(bad) = results.iter().find(|s| !s.healthy) {
            return Err(LaunchError::ServiceUnhealthy {
                service: bad.service.clone(),
                detail: bad.detail.clone(),
            });
        }
        Ok(results)
    }

    async fn probe_backend_health(&self) -> ServiceHealth {
        let url = format!("{}/health", self.api_url.trim_end_matches('/'));
        match self.get_json(&url).await {
            Ok(body) => {
                let status = body
                    .get("status")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown");
                ServiceHealth {
                    service: "backend".to_string(),
                    url,
                    healthy: status == "healthy",
                    detail: format!("status: {}", status),
                }
            }
            Err(detail) => ServiceHealth {
                service: "backend".to_string(),
                url,
                healthy: false,
                detail,
            },
        }
    }

    async fn probe_backend_root(&self) -> ServiceHealth {
        let url = format!("{}/", self.api_url.trim_end_matches('/'));
        match self.get_json(&url).await {
            Ok(body) => {
                let app = body.get("app").and_then(|v| v.as_str()).unwrap_or("?");
                let version = body
                    .get("version")
                    .and_then(|v| v.as_str())
                    .unwrap_or("?");
                ServiceHealth {
                    service: "api".to_string(),
                    url,
                    healthy: true,
                    detail: format!("{} v{}", app, version),
                }
            }
            Err(detail) => ServiceHealth {
                service: "api".to_string(),
                url,
                healthy: false,
                detail,
            },
        }
    }

    async fn probe_frontend(&self) -> ServiceHealth {
        let url = self.frontend_url.clone();
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => ServiceHealth {
                service: "frontend".to_string(),
                url,
                healthy: true,
                detail: "reachable".to_string(),
            },
            Ok(response) => ServiceHealth {
                service: "frontend".to_string(),
                url,
                healthy: false,
                detail: format!("HTTP {}", response.status()),
            },
            Err(e) => ServiceHealth {
                service: "frontend".to_string(),
                url,
                healthy: false,
                detail: e.to_string(),
            },
        }
    }

    async fn get_json(&self, url: &str) -> std::result::Result<serde_json::Value, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status()));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| format!("malformed JSON: {}", e))
    }
}
