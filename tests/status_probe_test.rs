use autootvet_launcher::{HealthProbe, LaunchError};
use httpmock::prelude::*;
use std::time::Duration;

fn healthy_api(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/health");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"status": "healthy"}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "app": "AutoOtvet",
                "version": "0.1.0",
                "status": "running"
            }));
    });
}

#[tokio::test]
async fn test_all_services_healthy() {
    let api = MockServer::start();
    let frontend = MockServer::start();

    healthy_api(&api);
    frontend.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200).body("<html></html>");
    });

    let probe =
        HealthProbe::with_urls(api.base_url(), frontend.base_url(), Duration::from_secs(2))
            .unwrap();

    let results = probe.ensure_healthy().await.unwrap();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|s| s.healthy));

    let api_info = results.iter().find(|s| s.service == "api").unwrap();
    assert!(api_info.detail.contains("AutoOtvet"));
}

#[tokio::test]
async fn test_failing_health_endpoint_reports_backend_unhealthy() {
    let api = MockServer::start();
    let frontend = MockServer::start();

    api.mock(|when, then| {
        when.method(GET).path("/health");
        then.status(500);
    });
    api.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .json_body(serde_json::json!({"app": "AutoOtvet", "version": "0.1.0"}));
    });
    frontend.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200).body("ok");
    });

    let probe =
        HealthProbe::with_urls(api.base_url(), frontend.base_url(), Duration::from_secs(2))
            .unwrap();

    let results = probe.check().await;
    let backend = results.iter().find(|s| s.service == "backend").unwrap();
    assert!(!backend.healthy);
    assert!(backend.detail.contains("500"));

    let err = probe.ensure_healthy().await.expect_err("backend is down");
    match err {
        LaunchError::ServiceUnhealthy { service, .. } => assert_eq!(service, "backend"),
        other => panic!("expected ServiceUnhealthy, got {:?}", other),
    }
}

#[tokio::test]
async fn test_starting_backend_is_not_healthy_yet() {
    let api = MockServer::start();
    let frontend = MockServer::start();

    api.mock(|when, then| {
        when.method(GET).path("/health");
        then.status(200)
            .json_body(serde_json::json!({"status": "starting"}));
    });
    api.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .json_body(serde_json::json!({"app": "AutoOtvet", "version": "0.1.0"}));
    });
    frontend.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200).body("ok");
    });

    let probe =
        HealthProbe::with_urls(api.base_url(), frontend.base_url(), Duration::from_secs(2))
            .unwrap();

    let results = probe.check().await;
    let backend = results.iter().find(|s| s.service == "backend").unwrap();
    assert!(!backend.healthy);
    assert_eq!(backend.detail, "status: starting");
}

#[tokio::test]
async fn test_unreachable_services_reported_not_errored() {
    // a server that is immediately dropped leaves a closed port behind
    let api = MockServer::start();
    let frontend_url = "http://127.0.0.1:1";
    healthy_api(&api);

    let probe = HealthProbe::with_urls(api.base_url(), frontend_url, Duration::from_secs(1))
        .unwrap();

    let results = probe.check().await;
    let frontend = results.iter().find(|s| s.service == "frontend").unwrap();
    assert!(!frontend.healthy);
}
