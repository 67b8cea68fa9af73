//! Simulated latency, interleaving and cancellation.

use std::time::Duration;

use axum::http::StatusCode;
use crm_mock_api::config::parse_config;
use crm_mock_api::{ApiRequest, Cancelled, CollectionKind, MockApi};
use serde_json::json;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

mod common;

#[tokio::test(start_paused = true)]
async fn test_response_arrives_after_delay() {
    let api = common::api_with_latency(Duration::from_millis(300));
    let start = Instant::now();

    let res = api.send(ApiRequest::get("/api/analytics")).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(start.elapsed() >= Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn test_mutation_commits_before_delay() {
    let api = common::api_with_latency(Duration::from_millis(300));
    let task_api = api.clone();

    let handle = tokio::spawn(async move {
        task_api
            .send(ApiRequest::post("/api/leads").with_json(&json!({"name": "Late"})))
            .await
    });

    // Let the spawned request run up to its delay
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(api.store().len(CollectionKind::Leads), 3);

    let res = handle.await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_requests_interleave_at_delay() {
    let api = common::api_with_latency(Duration::from_millis(300));
    let start = Instant::now();

    let mut tasks = Vec::new();
    for i in 0..20 {
        let api = api.clone();
        tasks.push(tokio::spawn(async move {
            api.send(ApiRequest::post("/.netlify/functions/leads").with_json(&json!({ "name": i })))
                .await
        }));
    }

    let mut ids = std::collections::HashSet::new();
    for task in tasks {
        let res = task.await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let id = common::data(&res)["id"].as_str().unwrap().to_string();
        assert!(ids.insert(id));
    }

    assert_eq!(api.store().len(CollectionKind::Leads), 22);
    // All delays overlapped rather than running back to back
    assert!(start.elapsed() < Duration::from_millis(600));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_delay_discards_response() {
    let api = common::api_with_latency(Duration::from_millis(300));
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let result = api.request(ApiRequest::delete("/api/leads/1"), &token).await;

    assert_eq!(result.unwrap_err(), Cancelled);
    // The delete had already committed
    assert_eq!(api.store().len(CollectionKind::Leads), 1);
}

#[tokio::test]
async fn test_cancel_before_dispatch_does_no_work() {
    let api = common::seeded_api();
    let token = CancellationToken::new();
    token.cancel();

    let result = api.request(ApiRequest::delete("/api/leads/1"), &token).await;

    assert!(result.is_err());
    assert_eq!(api.store().len(CollectionKind::Leads), 2);
}

#[tokio::test]
async fn test_uncancelled_request_delivers() {
    let api = common::seeded_api();
    let res = api
        .request(ApiRequest::get("/api/leads/1"), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(common::data(&res)["name"], "John Doe");
}

#[tokio::test]
async fn test_api_from_config() {
    let config = parse_config(
        r#"
        [routing]
        accepted_prefixes = ["/mock/"]

        [latency]
        delay_ms = 0

        [store]
        seed = false
        "#,
    )
    .unwrap();
    let api = MockApi::from_config(&config);

    let res = api.send(ApiRequest::get("/mock/leads")).await;
    assert_eq!(common::data(&res), json!([]));

    // The serverless prefix is not accepted by this configuration
    let res = api.send(ApiRequest::get("/.netlify/functions/leads")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
