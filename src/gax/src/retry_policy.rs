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

//! Defines traits for retry policies and some common implementations.
//!
//! The client libraries automatically retry requests that fail due to
//! transient errors when the request is idempotent. `GET` and `DELETE` are
//! idempotent, so are `PUT` requests because the resource manager treats them
//! as create-or-update. `POST` actions are not, and the libraries do not retry
//! them unless the application overrides the idempotency.
//!
//! # Example
//! ```
//! # use cloud_network_gax::*;
//! # use cloud_network_gax::retry_policy::*;
//! use std::time::Duration;
//! let policy = TransientErrors
//!     .with_time_limit(Duration::from_secs(60))
//!     .with_attempt_limit(5);
//! ```

use crate::error::Error;
use crate::retry_result::RetryResult;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Determines how errors are handled in the retry loop.
pub trait RetryPolicy: Send + Sync + std::fmt::Debug {
    /// Query the retry policy after an error.
    ///
    /// # Parameters
    /// * `loop_start` - when the retry loop started.
    /// * `attempt_count` - the number of attempts, including the failed one.
    /// * `idempotent` - if `true` the request can be safely retried.
    /// * `error` - the last error.
    fn on_error(
        &self,
        loop_start: Instant,
        attempt_count: u32,
        idempotent: bool,
        error: Error,
    ) -> RetryResult;

    /// The remaining time in the retry policy, if any.
    ///
    /// The retry loop uses this value to set the timeout of each attempt.
    fn remaining_time(&self, _loop_start: Instant, _attempt_count: u32) -> Option<Duration> {
        None
    }
}

/// A helper type to use [RetryPolicy] in client and request options.
#[derive(Clone)]
pub struct RetryPolicyArg(Arc<dyn RetryPolicy>);

impl<T: RetryPolicy + 'static> From<T> for RetryPolicyArg {
    fn from(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl From<Arc<dyn RetryPolicy>> for RetryPolicyArg {
    fn from(value: Arc<dyn RetryPolicy>) -> Self {
        Self(value)
    }
}

impl From<RetryPolicyArg> for Arc<dyn RetryPolicy> {
    fn from(value: RetryPolicyArg) -> Self {
        value.0
    }
}

/// Extension trait for [RetryPolicy].
pub trait RetryPolicyExt: RetryPolicy + Sized {
    /// Decorate a [RetryPolicy] to limit the total elapsed time in the retry
    /// loop.
    fn with_time_limit(self, maximum_duration: Duration) -> LimitedElapsedTime<Self> {
        LimitedElapsedTime::custom(self, maximum_duration)
    }

    /// Decorate a [RetryPolicy] to limit the number of attempts.
    fn with_attempt_limit(self, maximum_attempts: u32) -> LimitedAttemptCount<Self> {
        LimitedAttemptCount::custom(self, maximum_attempts)
    }
}

impl<T: RetryPolicy> RetryPolicyExt for T {}

/// Retries transient errors on idempotent requests.
///
/// The resource manager reports throttling with `429`, and transient service
/// problems with `408`, `500`, `502`, `503` and `504`. I/O errors are
/// transient too. Authentication errors are retried only if the credentials
/// report them as transient, as the request never left the client.
#[derive(Clone, Debug)]
pub struct TransientErrors;

impl TransientErrors {
    const TRANSIENT_CODES: [u16; 6] = [408, 429, 500, 502, 503, 504];

    fn is_transient(error: &Error) -> bool {
        if error.is_io() {
            return true;
        }
        error
            .http_status_code()
            .is_some_and(|code| Self::TRANSIENT_CODES.contains(&code))
    }
}

impl RetryPolicy for TransientErrors {
    fn on_error(
        &self,
        _loop_start: Instant,
        _attempt_count: u32,
        idempotent: bool,
        error: Error,
    ) -> RetryResult {
        if error.is_transient_authentication() {
            return RetryResult::Continue(error);
        }
        if !idempotent {
            return RetryResult::Permanent(error);
        }
        if Self::is_transient(&error) {
            RetryResult::Continue(error)
        } else {
            RetryResult::Permanent(error)
        }
    }
}

/// A retry policy that treats every error as permanent.
#[derive(Clone, Debug)]
pub struct NeverRetry;

impl RetryPolicy for NeverRetry {
    fn on_error(
        &self,
        _loop_start: Instant,
        _attempt_count: u32,
        _idempotent: bool,
        error: Error,
    ) -> RetryResult {
        RetryResult::Exhausted(error)
    }
}

/// Stops retrying after the total elapsed time exceeds a limit.
#[derive(Debug)]
pub struct LimitedElapsedTime<P = TransientErrors>
where
    P: RetryPolicy,
{
    inner: P,
    maximum_duration: Duration,
}

impl LimitedElapsedTime {
    /// Creates a policy that retries transient errors until `maximum_duration`
    /// has elapsed.
    pub fn new(maximum_duration: Duration) -> Self {
        Self::custom(TransientErrors, maximum_duration)
    }
}

impl<P> LimitedElapsedTime<P>
where
    P: RetryPolicy,
{
    pub fn custom(inner: P, maximum_duration: Duration) -> Self {
        Self {
            inner,
            maximum_duration,
        }
    }

    fn deadline(&self, loop_start: Instant) -> Instant {
        loop_start + self.maximum_duration
    }
}

impl<P> RetryPolicy for LimitedElapsedTime<P>
where
    P: RetryPolicy + 'static,
{
    fn on_error(
        &self,
        loop_start: Instant,
        attempt_count: u32,
        idempotent: bool,
        error: Error,
    ) -> RetryResult {
        match self
            .inner
            .on_error(loop_start, attempt_count, idempotent, error)
        {
            RetryResult::Continue(e) if Instant::now() >= self.deadline(loop_start) => {
                RetryResult::Exhausted(e)
            }
            result => result,
        }
    }

    fn remaining_time(&self, loop_start: Instant, attempt_count: u32) -> Option<Duration> {
        let remaining = self
            .deadline(loop_start)
            .saturating_duration_since(Instant::now());
        match self.inner.remaining_time(loop_start, attempt_count) {
            Some(inner) => Some(std::cmp::min(remaining, inner)),
            None => Some(remaining),
        }
    }
}

/// Stops retrying after a number of attempts.
#[derive(Debug)]
pub struct LimitedAttemptCount<P = TransientErrors>
where
    P: RetryPolicy,
{
    inner: P,
    maximum_attempts: u32,
}

impl LimitedAttemptCount {
    /// Creates a policy that retries transient errors, making at most
    /// `maximum_attempts` attempts.
    pub fn new(maximum_attempts: u32) -> Self {
        Self::custom(TransientErrors, maximum_attempts)
    }
}

impl<P> LimitedAttemptCount<P>
where
    P: RetryPolicy,
{
    pub fn custom(inner: P, maximum_attempts: u32) -> Self {
        Self {
            inner,
            maximum_attempts,
        }
    }
}

impl<P> RetryPolicy for LimitedAttemptCount<P>
where
    P: RetryPolicy + 'static,
{
    fn on_error(
        &self,
        loop_start: Instant,
        attempt_count: u32,
        idempotent: bool,
        error: Error,
    ) -> RetryResult {
        match self
            .inner
            .on_error(loop_start, attempt_count, idempotent, error)
        {
            RetryResult::Continue(e) if attempt_count >= self.maximum_attempts => {
                RetryResult::Exhausted(e)
            }
            result => result,
        }
    }

    fn remaining_time(&self, loop_start: Instant, attempt_count: u32) -> Option<Duration> {
        self.inner.remaining_time(loop_start, attempt_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CloudError, CredentialsError};
    use test_case::test_case;

    fn http_error(code: u16) -> Error {
        Error::http(code, http::HeaderMap::new(), bytes::Bytes::new())
    }

    fn service_error(code: u16) -> Error {
        Error::service_with_http_metadata(
            CloudError::new().set_code("Test").set_message("test-only"),
            Some(code),
            None,
        )
    }

    #[test_case(408)]
    #[test_case(429)]
    #[test_case(500)]
    #[test_case(502)]
    #[test_case(503)]
    #[test_case(504)]
    fn transient_codes(code: u16) {
        let p = TransientErrors;
        let now = Instant::now();
        assert!(p.on_error(now, 1, true, http_error(code)).is_continue());
        assert!(p.on_error(now, 1, true, service_error(code)).is_continue());
        assert!(p.on_error(now, 1, false, http_error(code)).is_permanent());
    }

    #[test_case(400)]
    #[test_case(401)]
    #[test_case(403)]
    #[test_case(404)]
    #[test_case(409)]
    fn permanent_codes(code: u16) {
        let p = TransientErrors;
        let now = Instant::now();
        assert!(p.on_error(now, 1, true, http_error(code)).is_permanent());
        assert!(p.on_error(now, 1, true, service_error(code)).is_permanent());
    }

    #[test]
    fn transient_other_errors() {
        let p = TransientErrors;
        let now = Instant::now();
        assert!(p.on_error(now, 1, true, Error::io("err")).is_continue());
        assert!(p.on_error(now, 1, false, Error::io("err")).is_permanent());

        let auth = || Error::authentication(CredentialsError::from_msg(true, "err"));
        assert!(p.on_error(now, 1, true, auth()).is_continue());
        assert!(p.on_error(now, 1, false, auth()).is_continue());
        let auth = || Error::authentication(CredentialsError::from_msg(false, "err"));
        assert!(p.on_error(now, 1, true, auth()).is_permanent());

        assert!(p.on_error(now, 1, true, Error::deser("err")).is_permanent());
        assert!(p.on_error(now, 1, true, Error::other("err")).is_permanent());
        assert!(p.remaining_time(now, 1).is_none());
    }

    #[test]
    fn never_retry() {
        let p = NeverRetry;
        let now = Instant::now();
        assert!(p.on_error(now, 1, true, Error::io("err")).is_exhausted());
        assert!(p.on_error(now, 1, true, http_error(503)).is_exhausted());
        assert!(p.remaining_time(now, 1).is_none());
    }

    #[test]
    fn limited_attempt_count() {
        let p = LimitedAttemptCount::new(3);
        let now = Instant::now();
        assert!(p.on_error(now, 1, true, http_error(503)).is_continue());
        assert!(p.on_error(now, 2, true, http_error(503)).is_continue());
        assert!(p.on_error(now, 3, true, http_error(503)).is_exhausted());
        assert!(p.on_error(now, 1, true, http_error(404)).is_permanent());
        assert!(p.remaining_time(now, 1).is_none());
    }

    #[test]
    fn limited_elapsed_time() {
        let p = LimitedElapsedTime::new(Duration::from_secs(60));
        let now = Instant::now();
        assert!(p.on_error(now, 1, true, http_error(503)).is_continue());
        assert!(p.on_error(now, 1, true, http_error(404)).is_permanent());
        let remaining = p.remaining_time(now, 1);
        assert!(
            remaining.is_some_and(|d| d <= Duration::from_secs(60)),
            "{remaining:?}"
        );

        let past = now - Duration::from_secs(120);
        assert!(p.on_error(past, 1, true, http_error(503)).is_exhausted());
        assert_eq!(p.remaining_time(past, 1), Some(Duration::ZERO));
    }

    #[test]
    fn composed() {
        let p = TransientErrors
            .with_attempt_limit(2)
            .with_time_limit(Duration::from_secs(30));
        let now = Instant::now();
        assert!(p.on_error(now, 1, true, http_error(503)).is_continue());
        assert!(p.on_error(now, 2, true, http_error(503)).is_exhausted());
        let remaining = p.remaining_time(now, 1);
        assert!(
            remaining.is_some_and(|d| d <= Duration::from_secs(30)),
            "{remaining:?}"
        );
    }

    #[test]
    fn retry_policy_arg() {
        let _ = RetryPolicyArg::from(NeverRetry);
        let policy: Arc<dyn RetryPolicy> = Arc::new(LimitedAttemptCount::new(3));
        let arg = RetryPolicyArg::from(policy);
        let _: Arc<dyn RetryPolicy> = arg.into();
    }
}
