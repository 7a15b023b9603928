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

//! The HTTP transport used by the clients.

use crate::Result;
use crate::backoff_policy::BackoffPolicy;
use crate::client_builder::internal::ClientConfig;
use crate::credentials::Credentials;
use crate::error::{CloudError, Error};
use crate::exponential_backoff::ExponentialBackoff;
use crate::options::{RequestOptions, is_idempotent_method};
use crate::polling_policy::{self, PollingBackoffPolicy, PollingErrorPolicy};
use crate::response::{CLIENT_REQUEST_ID_HEADER, Parts, Response};
use crate::retry_policy::{LimitedAttemptCount, RetryPolicy};
use std::sync::Arc;

/// The version of the REST API used by this crate.
pub const API_VERSION: &str = "2023-09-01";

const DEFAULT_ATTEMPTS: u32 = 3;

#[derive(Clone, Debug)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    cred: Credentials,
    endpoint: String,
    subscription: String,
    retry_policy: Option<Arc<dyn RetryPolicy>>,
    backoff_policy: Option<Arc<dyn BackoffPolicy>>,
    polling_error_policy: Option<Arc<dyn PollingErrorPolicy>>,
    polling_backoff_policy: Option<Arc<dyn PollingBackoffPolicy>>,
}

impl ReqwestClient {
    pub async fn new(config: ClientConfig) -> crate::client_builder::Result<Self> {
        let cred = config.resolve_credentials()?;
        let subscription = config.resolve_subscription()?;
        let endpoint = config.resolve_endpoint().trim_end_matches('/').to_string();
        let inner = reqwest::Client::builder()
            .build()
            .map_err(crate::client_builder::Error::transport)?;
        Ok(Self {
            inner,
            cred,
            endpoint,
            subscription,
            retry_policy: config.retry_policy,
            backoff_policy: config.backoff_policy,
            polling_error_policy: config.polling_error_policy,
            polling_backoff_policy: config.polling_backoff_policy,
        })
    }

    /// The subscription used to build request paths.
    pub fn subscription(&self) -> &str {
        &self.subscription
    }

    /// The endpoint, without any trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Starts a request for `path`, relative to the endpoint.
    ///
    /// The request includes the `api-version` query parameter.
    pub fn builder(&self, method: reqwest::Method, path: String) -> reqwest::RequestBuilder {
        self.inner
            .request(method, format!("{}{path}", &self.endpoint))
            .query(&[("api-version", API_VERSION)])
    }

    /// Starts a request for an absolute URL, such as a `nextLink`.
    ///
    /// These URLs already include the `api-version` query parameter.
    pub fn builder_for_url(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.inner.request(method, url)
    }

    pub async fn execute<I: serde::ser::Serialize, O: serde::de::DeserializeOwned + Default>(
        &self,
        mut builder: reqwest::RequestBuilder,
        body: Option<I>,
        options: RequestOptions,
    ) -> Result<Response<O>> {
        if let Some(user_agent) = options.user_agent() {
            builder = builder.header(
                reqwest::header::USER_AGENT,
                reqwest::header::HeaderValue::from_str(user_agent).map_err(Error::ser)?,
            );
        }
        // All attempts share the id, so the service logs group them together.
        let client_request_id = options
            .client_request_id()
            .map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_string);
        builder = builder.header(CLIENT_REQUEST_ID_HEADER, client_request_id);
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        let retry_policy = self.get_retry_policy(&options);
        self.retry_loop::<O>(builder, options, retry_policy).await
    }

    async fn retry_loop<O: serde::de::DeserializeOwned + Default>(
        &self,
        builder: reqwest::RequestBuilder,
        options: RequestOptions,
        retry_policy: Arc<dyn RetryPolicy>,
    ) -> Result<Response<O>> {
        let idempotent = options.idempotent().unwrap_or_else(|| {
            builder
                .try_clone()
                .and_then(|b| b.build().ok())
                .is_some_and(|r| is_idempotent_method(r.method()))
        });
        let backoff = self.get_backoff_policy(&options);
        let this = self.clone();
        let inner = async move |d| {
            let builder = builder
                .try_clone()
                .ok_or_else(|| Error::other("cannot clone a streaming request"))?;
            this.request_attempt(builder, &options, d).await
        };
        let sleep = async |d| tokio::time::sleep(d).await;
        crate::retry_loop::retry_loop(inner, sleep, idempotent, retry_policy, backoff).await
    }

    async fn request_attempt<O: serde::de::DeserializeOwned + Default>(
        &self,
        mut builder: reqwest::RequestBuilder,
        options: &RequestOptions,
        remaining_time: Option<std::time::Duration>,
    ) -> Result<Response<O>> {
        builder = crate::retry_loop::effective_timeout(options, remaining_time)
            .into_iter()
            .fold(builder, |b, t| b.timeout(t));
        let auth_headers = self.cred.headers().await.map_err(Error::authentication)?;
        for (key, value) in auth_headers.iter() {
            builder = builder.header(key, value);
        }
        if let Some(request) = builder.try_clone().and_then(|b| b.build().ok()) {
            tracing::debug!(method = %request.method(), url = %request.url(), "sending request");
        }
        let response = builder.send().await.map_err(Self::map_send_error)?;
        if !response.status().is_success() {
            return self::to_http_error(response).await;
        }
        self::to_http_response(response).await
    }

    fn map_send_error(err: reqwest::Error) -> Error {
        match err {
            e if e.is_timeout() => Error::timeout(e),
            e => Error::io(e),
        }
    }

    fn get_retry_policy(&self, options: &RequestOptions) -> Arc<dyn RetryPolicy> {
        options
            .retry_policy()
            .cloned()
            .or_else(|| self.retry_policy.clone())
            .unwrap_or_else(|| Arc::new(LimitedAttemptCount::new(DEFAULT_ATTEMPTS)))
    }

    fn get_backoff_policy(&self, options: &RequestOptions) -> Arc<dyn BackoffPolicy> {
        options
            .backoff_policy()
            .cloned()
            .or_else(|| self.backoff_policy.clone())
            .unwrap_or_else(|| Arc::new(ExponentialBackoff::default()))
    }

    pub fn get_polling_error_policy(&self, options: &RequestOptions) -> Arc<dyn PollingErrorPolicy> {
        options
            .polling_error_policy()
            .cloned()
            .or_else(|| self.polling_error_policy.clone())
            .unwrap_or_else(|| Arc::new(polling_policy::TransientErrors))
    }

    pub fn get_polling_backoff_policy(
        &self,
        options: &RequestOptions,
    ) -> Arc<dyn PollingBackoffPolicy> {
        options
            .polling_backoff_policy()
            .cloned()
            .or_else(|| self.polling_backoff_policy.clone())
            .unwrap_or_else(|| Arc::new(ExponentialBackoff::default()))
    }
}

/// The body for requests without a payload.
#[derive(serde::Serialize)]
pub struct NoBody;

pub async fn to_http_error<O>(response: reqwest::Response) -> Result<O> {
    let status_code = response.status().as_u16();
    let headers = response.headers().clone();
    let body = response.bytes().await.map_err(Error::io)?;

    let error = match CloudError::from_payload(&body) {
        Some(status) => Error::service_with_http_metadata(status, Some(status_code), Some(headers)),
        None => Error::http(status_code, headers, body),
    };
    Err(error)
}

async fn to_http_response<O: serde::de::DeserializeOwned + Default>(
    response: reqwest::Response,
) -> Result<Response<O>> {
    // Deletes and actions may succeed (200, 202 or 204) without a body.
    let headers = response.headers().clone();
    let body = response.bytes().await.map_err(Error::io)?;

    let response = match body {
        content if content.iter().all(u8::is_ascii_whitespace) => O::default(),
        content => serde_json::from_slice::<O>(&content).map_err(Error::deser)?,
    };

    Ok(Response::from_parts(Parts::new().set_headers(headers), response))
}
