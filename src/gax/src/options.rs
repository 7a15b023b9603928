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

//! Per request options.
//!
//! Every request builder in `cloud-network` implements
//! [RequestOptionsBuilder]. The options set there override the client
//! defaults for that request only.
//!
//! The resource manager decides what is safe to retry from the HTTP method.
//! `GET`, `PUT`, `DELETE` and `HEAD` replace or read the full resource, so
//! repeating them has no additional effect. `POST` actions and `PATCH` tag
//! updates are not retried unless the application says so.
//!
//! # Example
//! ```
//! # use cloud_network_gax::options::*;
//! # use cloud_network_gax::retry_policy::*;
//! fn customize<B: RequestOptionsBuilder>(builder: B) -> B {
//!     builder
//!         .with_user_agent("my-app/1.0")
//!         .with_client_request_id("0f8fad5b-d9cb-469f-a165-70867728950e")
//!         .with_retry_policy(LimitedAttemptCount::new(5))
//! }
//! ```

use crate::backoff_policy::{BackoffPolicy, BackoffPolicyArg};
use crate::polling_policy::{
    PollingBackoffPolicy, PollingBackoffPolicyArg, PollingErrorPolicy, PollingErrorPolicyArg,
};
use crate::retry_policy::{RetryPolicy, RetryPolicyArg};
use std::sync::Arc;
use std::time::Duration;

/// Returns true if requests with `method` can be repeated safely.
pub fn is_idempotent_method(method: &http::Method) -> bool {
    matches!(
        *method,
        http::Method::GET | http::Method::HEAD | http::Method::PUT | http::Method::DELETE
    )
}

/// The options for a single request.
///
/// Applications rarely create this type directly. The request builders embed
/// one, and mocks receive it to verify the options sent with each call.
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    idempotent: Option<bool>,
    user_agent: Option<String>,
    client_request_id: Option<String>,
    attempt_timeout: Option<Duration>,
    retry_policy: Option<Arc<dyn RetryPolicy>>,
    backoff_policy: Option<Arc<dyn BackoffPolicy>>,
    polling_error_policy: Option<Arc<dyn PollingErrorPolicy>>,
    polling_backoff_policy: Option<Arc<dyn PollingBackoffPolicy>>,
}

impl RequestOptions {
    /// The idempotency override, if any.
    pub fn idempotent(&self) -> Option<bool> {
        self.idempotent
    }

    /// Overrides the idempotency derived from the HTTP method.
    ///
    /// Only idempotent requests are retried after a transient error.
    pub fn set_idempotency(&mut self, value: bool) {
        self.idempotent = Some(value);
    }

    /// Uses the idempotency of `method` unless the application set one.
    pub(crate) fn set_default_idempotency(&mut self, method: &http::Method) {
        self.idempotent.get_or_insert(is_idempotent_method(method));
    }

    /// Sets the `User-Agent` header.
    pub fn set_user_agent<T: Into<String>>(&mut self, v: T) {
        self.user_agent = Some(v.into());
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// Sets the `x-ms-client-request-id` header.
    ///
    /// The service echoes this value in its logs. All the attempts of a
    /// request, including retries, share the same id. If unset, the client
    /// generates a random one for each request.
    pub fn set_client_request_id<T: Into<String>>(&mut self, v: T) {
        self.client_request_id = Some(v.into());
    }

    pub fn client_request_id(&self) -> Option<&str> {
        self.client_request_id.as_deref()
    }

    /// Sets the timeout for each attempt.
    ///
    /// The retry policy may shorten it, to honor its own time limit.
    pub fn set_attempt_timeout<T: Into<Duration>>(&mut self, v: T) {
        self.attempt_timeout = Some(v.into());
    }

    pub fn attempt_timeout(&self) -> Option<Duration> {
        self.attempt_timeout
    }

    pub fn retry_policy(&self) -> Option<&Arc<dyn RetryPolicy>> {
        self.retry_policy.as_ref()
    }

    pub fn set_retry_policy<V: Into<RetryPolicyArg>>(&mut self, v: V) {
        self.retry_policy = Some(v.into().into());
    }

    pub fn backoff_policy(&self) -> Option<&Arc<dyn BackoffPolicy>> {
        self.backoff_policy.as_ref()
    }

    /// Sets the backoff policy.
    ///
    /// A `Retry-After` hint from the service takes precedence when it is
    /// longer than the delay computed by this policy.
    pub fn set_backoff_policy<V: Into<BackoffPolicyArg>>(&mut self, v: V) {
        self.backoff_policy = Some(v.into().into());
    }

    pub fn polling_error_policy(&self) -> Option<&Arc<dyn PollingErrorPolicy>> {
        self.polling_error_policy.as_ref()
    }

    /// Sets the policy for errors while polling long-running operations.
    pub fn set_polling_error_policy<V: Into<PollingErrorPolicyArg>>(&mut self, v: V) {
        self.polling_error_policy = Some(v.into().0);
    }

    pub fn polling_backoff_policy(&self) -> Option<&Arc<dyn PollingBackoffPolicy>> {
        self.polling_backoff_policy.as_ref()
    }

    /// Sets the wait between polls of long-running operations.
    pub fn set_polling_backoff_policy<V: Into<PollingBackoffPolicyArg>>(&mut self, v: V) {
        self.polling_backoff_policy = Some(v.into().0);
    }
}

/// Setters for the options of a request, implemented by all request builders.
pub trait RequestOptionsBuilder: internal::RequestBuilder {
    /// If `v` is `true`, treat the request as idempotent.
    fn with_idempotency(self, v: bool) -> Self;

    /// Sets the `User-Agent` header.
    fn with_user_agent<V: Into<String>>(self, v: V) -> Self;

    /// Sets the `x-ms-client-request-id` header.
    fn with_client_request_id<V: Into<String>>(self, v: V) -> Self;

    fn with_attempt_timeout<V: Into<Duration>>(self, v: V) -> Self;

    fn with_retry_policy<V: Into<RetryPolicyArg>>(self, v: V) -> Self;

    fn with_backoff_policy<V: Into<BackoffPolicyArg>>(self, v: V) -> Self;

    fn with_polling_error_policy<V: Into<PollingErrorPolicyArg>>(self, v: V) -> Self;

    fn with_polling_backoff_policy<V: Into<PollingBackoffPolicyArg>>(self, v: V) -> Self;
}

#[doc(hidden)]
pub mod internal {
    //! Implementation details used by the clients. Not part of the public API.
    use super::RequestOptions;

    pub trait RequestBuilder {
        fn request_options(&mut self) -> &mut RequestOptions;
    }

    /// Applies the idempotency of `method`, unless `options` overrides it.
    pub fn set_default_idempotency(
        mut options: RequestOptions,
        method: &http::Method,
    ) -> RequestOptions {
        options.set_default_idempotency(method);
        options
    }
}

impl<T> RequestOptionsBuilder for T
where
    T: internal::RequestBuilder,
{
    fn with_idempotency(mut self, v: bool) -> Self {
        self.request_options().set_idempotency(v);
        self
    }

    fn with_user_agent<V: Into<String>>(mut self, v: V) -> Self {
        self.request_options().set_user_agent(v);
        self
    }

    fn with_client_request_id<V: Into<String>>(mut self, v: V) -> Self {
        self.request_options().set_client_request_id(v);
        self
    }

    fn with_attempt_timeout<V: Into<Duration>>(mut self, v: V) -> Self {
        self.request_options().set_attempt_timeout(v);
        self
    }

    fn with_retry_policy<V: Into<RetryPolicyArg>>(mut self, v: V) -> Self {
        self.request_options().set_retry_policy(v);
        self
    }

    fn with_backoff_policy<V: Into<BackoffPolicyArg>>(mut self, v: V) -> Self {
        self.request_options().set_backoff_policy(v);
        self
    }

    fn with_polling_error_policy<V: Into<PollingErrorPolicyArg>>(mut self, v: V) -> Self {
        self.request_options().set_polling_error_policy(v);
        self
    }

    fn with_polling_backoff_policy<V: Into<PollingBackoffPolicyArg>>(mut self, v: V) -> Self {
        self.request_options().set_polling_backoff_policy(v);
        self
    }
}
