//! Typed async client for the Quantlix model deployment API.
//!
//! Two entry points mirror the two stages of a user's session:
//!
//! - [`PublicClient`] for signup, login, verification and password recovery,
//!   none of which send an API key.
//! - [`QuantlixClient`] for everything else, sending the key in the
//!   [`API_KEY_HEADER`] header on every request.
//!
//! Every non-2xx response becomes [`QuantlixError::Request`] whose message is
//! the server's `detail`. The client never retries.

mod client;
mod error;
mod public;
mod transport;
mod types;

pub use client::QuantlixClient;
pub use error::QuantlixError;
pub use public::PublicClient;
pub use transport::API_KEY_HEADER;
pub use types::*;

/// Base URL of the hosted Quantlix API.
pub const DEFAULT_BASE_URL: &str = "https://api.quantlix.ai";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(mock_server: &MockServer) -> QuantlixClient {
        QuantlixClient::with_timeout("test-api-key", mock_server.uri(), Duration::from_secs(5))
            .unwrap()
    }

    #[tokio::test]
    async fn test_status_sends_api_key_header() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/status/dep-1"))
            .and(header("X-API-Key", "test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "dep-1",
                "type": "deployment",
                "status": "ready",
                "created_at": "2024-05-01T10:00:00",
                "updated_at": "2024-05-01T10:05:00",
                "error_message": null,
                "output_data": null,
                "tokens_used": null,
                "compute_seconds": null
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let status = client.status("dep-1").await.unwrap();

        assert_eq!(status.id, "dep-1");
        assert!(status.is_deployment());
        assert_eq!(status.status, "ready");
        assert!(status.output_data.is_none());
    }

    #[tokio::test]
    async fn test_status_for_job_includes_job_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/status/job-9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "job-9",
                "type": "job",
                "status": "completed",
                "created_at": "2024-05-01T10:00:00",
                "updated_at": "2024-05-01T10:00:03",
                "error_message": null,
                "output_data": {"text": "hi"},
                "tokens_used": 42,
                "compute_seconds": 1.5
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let status = client.status("job-9").await.unwrap();

        assert!(status.is_job());
        assert_eq!(status.output_data, Some(json!({"text": "hi"})));
        assert_eq!(status.tokens_used, Some(42));
        assert_eq!(status.compute_seconds, Some(1.5));
    }

    #[tokio::test]
    async fn test_status_relays_only_fields_the_server_sent() {
        let mock_server = MockServer::start().await;

        let body = json!({"id": "dep-2", "type": "deployment", "status": "ready"});
        Mock::given(method("GET"))
            .and(path("/status/dep-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let status = client.status("dep-2").await.unwrap();

        assert!(status.created_at.is_none());
        assert_eq!(serde_json::to_value(&status).unwrap(), body);
    }

    #[tokio::test]
    async fn test_status_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/status/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Resource not found"})),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let err = client.status("missing").await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Resource not found");
    }

    #[tokio::test]
    async fn test_unauthorized_is_a_plain_request_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid API key"})),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.me().await;

        assert!(matches!(
            result,
            Err(QuantlixError::Request { status: 401, ref detail }) if detail == "Invalid API key"
        ));
    }

    #[tokio::test]
    async fn test_rate_limit_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/run"))
            .respond_with(
                ResponseTemplate::new(429).set_body_json(json!({"detail": "Rate limit exceeded"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let err = client.run("dep-1", json!({"prompt": "hi"})).await.unwrap_err();

        assert_eq!(err.status(), Some(429));
        assert_eq!(err.to_string(), "Rate limit exceeded");
    }

    #[tokio::test]
    async fn test_run_forwards_input_verbatim() {
        let mock_server = MockServer::start().await;
        let input = json!([{"role": "user", "content": "Hello"}, 3, null]);

        Mock::given(method("POST"))
            .and(path("/run"))
            .and(body_json(json!({"deployment_id": "dep-1", "input": input.clone()})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "job_id": "job-1",
                "status": "pending",
                "message": "Inference job queued"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.run("dep-1", input).await.unwrap();

        assert_eq!(
            result,
            RunResult {
                job_id: "job-1".into(),
                status: "pending".into(),
                message: "Inference job queued".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_deploy_update_sends_deployment_id() {
        let mock_server = MockServer::start().await;

        let mut config = serde_json::Map::new();
        config.insert("replicas".into(), json!(2));

        Mock::given(method("POST"))
            .and(path("/deploy"))
            .and(body_json(json!({
                "model_id": "llama-7b",
                "model_path": "models/u1/llama",
                "config": {"replicas": 2},
                "deployment_id": "dep-1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "deployment_id": "dep-1",
                "status": "pending",
                "message": "Deployment queued",
                "revision": 3
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let options = DeployOptions::default()
            .model_path("models/u1/llama")
            .config(config)
            .deployment_id("dep-1");
        let result = client.deploy("llama-7b", options).await.unwrap();

        assert_eq!(result.revision, Some(3));
    }

    #[tokio::test]
    async fn test_rollback_sends_revision_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/deployments/dep-1/rollback"))
            .and(query_param("revision", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"deployment_id": "dep-1", "revision": 2})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.rollback("dep-1", 2).await.unwrap();

        assert_eq!(
            result,
            RollbackResult {
                deployment_id: "dep-1".into(),
                revision: 2
            }
        );
    }

    #[tokio::test]
    async fn test_list_deployments_and_revisions() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/deployments"))
            .and(query_param("limit", "10"))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "deployments": [{
                    "id": "dep-1",
                    "model_id": "llama-7b",
                    "status": "ready",
                    "created_at": "2024-05-01T10:00:00",
                    "updated_at": "2024-05-02T10:00:00",
                    "revision_count": 2
                }],
                "total": 1
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/deployments/dep-1/revisions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "deployment_id": "dep-1",
                "revisions": [
                    {"revision_number": 2, "model_id": "llama-7b", "model_path": null,
                     "config": {"gpu": true}, "created_at": "2024-05-02T10:00:00"},
                    {"revision_number": 1, "model_id": "llama-7b", "model_path": null,
                     "config": {}, "created_at": "2024-05-01T10:00:00"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);

        let list = client.list_deployments(10, 0).await.unwrap();
        assert_eq!(list.total, 1);
        assert_eq!(list.deployments[0].revision_count, 2);

        let revisions = client.list_revisions("dep-1").await.unwrap();
        let numbers: Vec<u32> = revisions
            .revisions
            .iter()
            .map(|r| r.revision_number)
            .collect();
        assert_eq!(numbers, vec![2, 1]);
        assert_eq!(revisions.revisions[0].config.get("gpu"), Some(&json!(true)));
    }

    #[tokio::test]
    async fn test_list_jobs_and_usage_breakdowns() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/jobs"))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jobs": [{
                    "id": "job-1",
                    "deployment_id": "dep-1",
                    "status": "completed",
                    "tokens_used": 12,
                    "compute_seconds": 0.4,
                    "created_at": "2024-05-01T10:00:00",
                    "completed_at": "2024-05-01T10:00:01"
                }]
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/usage/history"))
            .and(query_param("days", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "daily": [
                    {"date": "2024-05-01", "tokens_used": 100, "compute_seconds": 2.0,
                     "gpu_seconds": 0.0, "job_count": 3}
                ]
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/usage/metrics"))
            .and(query_param("days", "30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success_rate": 0.75,
                "total_jobs": 4
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);

        let jobs = client.list_jobs(20).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].tokens_used, Some(12));

        let history = client.usage_history(7).await.unwrap();
        assert_eq!(history[0].date, chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(history[0].job_count, 3);

        let metrics = client.usage_metrics(30).await.unwrap();
        assert_eq!(metrics.total_jobs, 4);
        assert!(metrics.p95_latency_s.is_none());
    }

    #[tokio::test]
    async fn test_ids_are_percent_encoded_in_paths() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/auth/api-keys/key%2F1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "API key revoked"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.revoke_api_key("key/1").await.unwrap();
        assert_eq!(result.message, "API key revoked");
    }

    #[tokio::test]
    async fn test_network_error_has_no_status() {
        // Nothing listens on the discard port
        let client = QuantlixClient::with_timeout(
            "test-api-key",
            "http://127.0.0.1:9",
            Duration::from_secs(2),
        )
        .unwrap();

        let err = client.me().await.unwrap_err();
        assert!(matches!(err, QuantlixError::Network(_)));
        assert!(err.status().is_none());
    }

    #[test]
    fn test_invalid_api_key_rejected_at_construction() {
        let result = QuantlixClient::new("line\nbreak", "http://localhost:8000");
        assert!(matches!(result, Err(QuantlixError::InvalidApiKey)));
    }

    #[test]
    fn test_client_debug_hides_api_key() {
        let client = QuantlixClient::new("qlx_super_secret", "http://localhost:8000/").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("qlx_super_secret"));
        assert!(debug.contains("http://localhost:8000"));
    }

    #[test]
    fn test_secret_results_debug_redacted() {
        let auth = AuthResult {
            api_key: "qlx_abc".into(),
            user_id: "user-1".into(),
        };
        let created = CreateApiKeyResult {
            api_key: "qlx_def".into(),
            id: "key-1".into(),
            name: None,
        };
        let credentials = Credentials::new("a@example.com", "Hunter2!Hunter2");

        assert!(!format!("{:?}", auth).contains("qlx_abc"));
        assert!(!format!("{:?}", created).contains("qlx_def"));
        assert!(!format!("{:?}", credentials).contains("Hunter2"));
    }

    #[test]
    fn test_deploy_request_defaults() {
        let request = DeployOptions::default().into_request("llama-7b".into());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            json!({"model_id": "llama-7b", "model_path": null, "config": {}})
        );
    }

    #[test]
    fn test_usage_limits_zero_means_unlimited() {
        let usage: UsageResult = serde_json::from_value(json!({
            "user_id": "user-1",
            "tokens_used": 1500,
            "compute_seconds": 12.5,
            "job_count": 4,
            "start_date": null,
            "end_date": null,
            "tokens_limit": 0,
            "compute_limit": null
        }))
        .unwrap();

        assert!(usage.token_limit().is_none());
        assert!(usage.tokens_remaining().is_none());
        assert!(usage.compute_limit_seconds().is_none());
    }

    #[test]
    fn test_usage_tokens_remaining_saturates() {
        let usage: UsageResult = serde_json::from_value(json!({
            "user_id": "user-1",
            "plan": "free",
            "tokens_used": 1200,
            "compute_seconds": 0.0,
            "gpu_seconds": 0.0,
            "job_count": 1,
            "tokens_limit": 1000,
            "compute_limit": 3600.0
        }))
        .unwrap();

        assert_eq!(usage.token_limit(), Some(1000));
        assert_eq!(usage.tokens_remaining(), Some(0));
        assert_eq!(usage.compute_limit_seconds(), Some(3600.0));
        assert!(usage.gpu_limit_seconds().is_none());
    }

    #[test]
    fn test_status_rejects_unknown_resource_type() {
        let result = serde_json::from_value::<StatusResult>(json!({
            "id": "x",
            "type": "cluster",
            "status": "ready"
        }));
        assert!(result.is_err());
    }
}
