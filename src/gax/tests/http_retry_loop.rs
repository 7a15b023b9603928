// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Verify the HTTP client uses the retry and backoff policies as expected.
//!
//! The tests use an HTTP server that returns a sequence of responses. The
//! sequence is specific to each test, intended to drive the retry loop as
//! needed for that test.

#[cfg(test)]
mod tests {
    use cloud_network_gax as gax;
    use gax::backoff_policy::BackoffPolicy;
    use gax::client_builder::internal::ClientConfig;
    use gax::credentials::AnonymousCredentials;
    use gax::exponential_backoff::ExponentialBackoff;
    use gax::http_client::ReqwestClient;
    use gax::options::*;
    use gax::retry_policy::{NeverRetry, RetryPolicyExt, TransientErrors};
    use http::StatusCode;
    use httptest::{Expectation, Server, all_of, matchers::*, responders::*};
    use serde_json::json;
    use std::time::Duration;

    type Result<T> = anyhow::Result<T>;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn immediate_success() -> Result<()> {
        let server = start(vec![success()]);
        let client = ReqwestClient::new(test_config(&server)).await?;
        let builder = client.builder(reqwest::Method::GET, "/retry".into());
        let response = client
            .execute::<serde_json::Value, serde_json::Value>(builder, None, idempotent())
            .await?;
        assert_eq!(response.into_body(), json!({"name": "vnet1"}));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn immediate_failure() -> Result<()> {
        let server = start(vec![permanent()]);
        let client = ReqwestClient::new(test_config(&server)).await?;
        let builder = client.builder(reqwest::Method::GET, "/retry".into());
        let err = client
            .execute::<serde_json::Value, serde_json::Value>(builder, None, idempotent())
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), Some(400));
        let status = err.status().cloned().unwrap_or_default();
        assert_eq!(status.code, "InvalidParameter");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn retry_success() -> Result<()> {
        let server = start(vec![transient(), transient(), success()]);
        let client = ReqwestClient::new(test_config(&server)).await?;
        let builder = client.builder(reqwest::Method::GET, "/retry".into());
        let response = client
            .execute::<serde_json::Value, serde_json::Value>(builder, None, idempotent())
            .await?;
        assert_eq!(response.into_body(), json!({"name": "vnet1"}));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn retries_keep_client_request_id() -> Result<()> {
        let server = Server::run();
        let responses = vec![transient(), transient(), success()];
        server.expect(
            Expectation::matching(all_of![
                request::path("/retry"),
                request::headers(contains(("x-ms-client-request-id", "op-7"))),
            ])
            .times(responses.len())
            .respond_with(cycle(
                responses
                    .into_iter()
                    .map(|(status, body)| to_responder(status, body))
                    .collect(),
            )),
        );
        let client = ReqwestClient::new(test_config(&server)).await?;
        let builder = client.builder(reqwest::Method::GET, "/retry".into());
        let mut options = idempotent();
        options.set_client_request_id("op-7");
        let response = client
            .execute::<serde_json::Value, serde_json::Value>(builder, None, options)
            .await?;
        assert_eq!(response.into_body(), json!({"name": "vnet1"}));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn retry_exhausted() -> Result<()> {
        let server = start(vec![transient(), transient(), transient()]);
        let client = ReqwestClient::new(test_config(&server)).await?;
        let builder = client.builder(reqwest::Method::GET, "/retry".into());
        let mut options = idempotent();
        options.set_retry_policy(TransientErrors.with_attempt_limit(3));
        let err = client
            .execute::<serde_json::Value, serde_json::Value>(builder, None, options)
            .await
            .unwrap_err();
        assert!(err.is_exhausted(), "{err:?}");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn no_retry_for_non_idempotent() -> Result<()> {
        let server = start(vec![transient()]);
        let client = ReqwestClient::new(test_config(&server)).await?;
        let builder = client.builder(reqwest::Method::POST, "/retry".into());
        let mut options = RequestOptions::default();
        options.set_backoff_policy(test_backoff());
        options.set_idempotency(false);
        let err = client
            .execute::<serde_json::Value, serde_json::Value>(builder, Some(json!({})), options)
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), Some(503));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn put_retried_by_default() -> Result<()> {
        let server = start(vec![transient(), success()]);
        let client = ReqwestClient::new(test_config(&server)).await?;
        let builder = client.builder(reqwest::Method::PUT, "/retry".into());
        let mut options = RequestOptions::default();
        options.set_backoff_policy(test_backoff());
        let response = client
            .execute::<serde_json::Value, serde_json::Value>(builder, Some(json!({})), options)
            .await?;
        assert_eq!(response.into_body(), json!({"name": "vnet1"}));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn post_not_retried_by_default() -> Result<()> {
        let server = start(vec![transient()]);
        let client = ReqwestClient::new(test_config(&server)).await?;
        let builder = client.builder(reqwest::Method::POST, "/retry".into());
        let mut options = RequestOptions::default();
        options.set_backoff_policy(test_backoff());
        let err = client
            .execute::<serde_json::Value, serde_json::Value>(builder, Some(json!({})), options)
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), Some(503));
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn never_retry() -> Result<()> {
        let server = start(vec![transient()]);
        let mut config = test_config(&server);
        config.retry_policy = Some(std::sync::Arc::new(NeverRetry));
        let client = ReqwestClient::new(config).await?;
        let builder = client.builder(reqwest::Method::GET, "/retry".into());
        let err = client
            .execute::<serde_json::Value, serde_json::Value>(builder, None, idempotent())
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), Some(503));
        Ok(())
    }

    fn idempotent() -> RequestOptions {
        let mut options = RequestOptions::default();
        options.set_backoff_policy(test_backoff());
        options.set_idempotency(true);
        options
    }

    fn success() -> (StatusCode, String) {
        (StatusCode::OK, json!({"name": "vnet1"}).to_string())
    }

    fn transient() -> (StatusCode, String) {
        let status = json!({"error": {
            "code": "ServiceUnavailable",
            "message": "try-again",
        }});
        (StatusCode::SERVICE_UNAVAILABLE, status.to_string())
    }

    fn permanent() -> (StatusCode, String) {
        let status = json!({"error": {
            "code": "InvalidParameter",
            "message": "uh-oh",
        }});
        (StatusCode::BAD_REQUEST, status.to_string())
    }

    fn test_config(server: &Server) -> ClientConfig {
        ClientConfig {
            endpoint: Some(format!("http://{}", server.addr())),
            subscription: Some("sub-123".to_string()),
            cred: Some(AnonymousCredentials.into()),
            ..Default::default()
        }
    }

    fn test_backoff() -> impl BackoffPolicy {
        ExponentialBackoff::builder()
            .with_initial_delay(Duration::from_millis(1))
            .with_maximum_delay(Duration::from_millis(1))
            .build()
            .expect("a valid backoff policy")
    }

    fn start(responses: Vec<(StatusCode, String)>) -> Server {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::path("/retry"))
                .times(responses.len())
                .respond_with(cycle(
                    responses
                        .into_iter()
                        .map(|(status, body)| to_responder(status, body))
                        .collect(),
                )),
        );
        server
    }

    fn to_responder(status: StatusCode, response: String) -> Box<dyn Responder> {
        Box::new(
            status_code(status.as_u16())
                .insert_header("Content-Type", "application/json")
                .body(response),
        )
    }
}
