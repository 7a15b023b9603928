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

//! Policies to control long-running operation polling loops.
//!
//! Creating or deleting most networking resources is a long-running
//! operation: the service accepts the request and provisions the resource in
//! the background. The client libraries poll the resource until it reaches a
//! terminal state. These policies control how errors during polling are
//! handled, how long the loop may run, and how long to wait between polls.
//!
//! # Example
//! ```
//! # use cloud_network_gax::polling_policy::*;
//! use std::time::Duration;
//! let policy = TransientErrors
//!     .with_time_limit(Duration::from_secs(30 * 60))
//!     .with_attempt_limit(200);
//! ```

use crate::error::Error;
use crate::retry_result::RetryResult;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Determines how errors are handled in the polling loop.
pub trait PollingErrorPolicy: Send + Sync + std::fmt::Debug {
    /// Query the policy after an error while polling.
    fn on_error(&self, loop_start: Instant, attempt_count: u32, error: Error) -> RetryResult;

    /// Called when the operation is still in progress.
    ///
    /// Returns an error if the policy is exhausted.
    fn on_in_progress(
        &self,
        _loop_start: Instant,
        _attempt_count: u32,
        _operation_name: &str,
    ) -> Option<Error> {
        None
    }
}

/// Determines how long to wait between polls.
pub trait PollingBackoffPolicy: Send + Sync + std::fmt::Debug {
    /// The wait period before poll number `attempt_count + 1`.
    fn wait_period(&self, loop_start: Instant, attempt_count: u32) -> Duration;
}

/// A helper type to use [PollingErrorPolicy] in client and request options.
#[derive(Clone)]
pub struct PollingErrorPolicyArg(pub(crate) Arc<dyn PollingErrorPolicy>);

impl<T: PollingErrorPolicy + 'static> From<T> for PollingErrorPolicyArg {
    fn from(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl From<Arc<dyn PollingErrorPolicy>> for PollingErrorPolicyArg {
    fn from(value: Arc<dyn PollingErrorPolicy>) -> Self {
        Self(value)
    }
}

/// A helper type to use [PollingBackoffPolicy] in client and request options.
#[derive(Clone)]
pub struct PollingBackoffPolicyArg(pub(crate) Arc<dyn PollingBackoffPolicy>);

impl<T: PollingBackoffPolicy + 'static> From<T> for PollingBackoffPolicyArg {
    fn from(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl From<Arc<dyn PollingBackoffPolicy>> for PollingBackoffPolicyArg {
    fn from(value: Arc<dyn PollingBackoffPolicy>) -> Self {
        Self(value)
    }
}

/// Extension trait for [PollingErrorPolicy].
pub trait PollingErrorPolicyExt: PollingErrorPolicy + Sized {
    fn with_time_limit(self, maximum_duration: Duration) -> LimitedElapsedTime<Self> {
        LimitedElapsedTime::custom(self, maximum_duration)
    }

    fn with_attempt_limit(self, maximum_attempts: u32) -> LimitedAttemptCount<Self> {
        LimitedAttemptCount::custom(self, maximum_attempts)
    }
}

impl<T: PollingErrorPolicy> PollingErrorPolicyExt for T {}

/// Continue polling on transient errors.
///
/// Polling is always a `GET` request, so the same errors that are transient
/// for idempotent requests are transient while polling.
#[derive(Clone, Debug)]
pub struct TransientErrors;

impl PollingErrorPolicy for TransientErrors {
    fn on_error(&self, loop_start: Instant, attempt_count: u32, error: Error) -> RetryResult {
        use crate::retry_policy::RetryPolicy;
        crate::retry_policy::TransientErrors.on_error(loop_start, attempt_count, true, error)
    }
}

/// Continue polling on any error.
#[derive(Clone, Debug)]
pub struct AlwaysContinue;

impl PollingErrorPolicy for AlwaysContinue {
    fn on_error(&self, _loop_start: Instant, _attempt_count: u32, error: Error) -> RetryResult {
        RetryResult::Continue(error)
    }
}

/// Limits the total time in the polling loop.
#[derive(Debug)]
pub struct LimitedElapsedTime<P = TransientErrors>
where
    P: PollingErrorPolicy,
{
    inner: P,
    maximum_duration: Duration,
}

impl LimitedElapsedTime {
    pub fn new(maximum_duration: Duration) -> Self {
        Self::custom(TransientErrors, maximum_duration)
    }
}

impl<P> LimitedElapsedTime<P>
where
    P: PollingErrorPolicy,
{
    pub fn custom(inner: P, maximum_duration: Duration) -> Self {
        Self {
            inner,
            maximum_duration,
        }
    }

    fn in_progress_impl(&self, start: Instant, operation_name: &str) -> Option<Error> {
        let elapsed = start.elapsed();
        if elapsed < self.maximum_duration {
            return None;
        }
        Some(Error::exhausted(Exhausted::new(
            operation_name,
            "elapsed time",
            format!("{elapsed:?}"),
            format!("{:?}", self.maximum_duration),
        )))
    }
}

impl<P> PollingErrorPolicy for LimitedElapsedTime<P>
where
    P: PollingErrorPolicy + 'static,
{
    fn on_error(&self, start: Instant, count: u32, error: Error) -> RetryResult {
        match self.inner.on_error(start, count, error) {
            RetryResult::Continue(e) if start.elapsed() >= self.maximum_duration => {
                RetryResult::Exhausted(e)
            }
            result => result,
        }
    }

    fn on_in_progress(&self, start: Instant, count: u32, operation_name: &str) -> Option<Error> {
        self.inner
            .on_in_progress(start, count, operation_name)
            .or_else(|| self.in_progress_impl(start, operation_name))
    }
}

/// Limits the number of polling attempts.
#[derive(Debug)]
pub struct LimitedAttemptCount<P = TransientErrors>
where
    P: PollingErrorPolicy,
{
    inner: P,
    maximum_attempts: u32,
}

impl LimitedAttemptCount {
    pub fn new(maximum_attempts: u32) -> Self {
        Self::custom(TransientErrors, maximum_attempts)
    }
}

impl<P> LimitedAttemptCount<P>
where
    P: PollingErrorPolicy,
{
    pub fn custom(inner: P, maximum_attempts: u32) -> Self {
        Self {
            inner,
            maximum_attempts,
        }
    }

    fn in_progress_impl(&self, count: u32, operation_name: &str) -> Option<Error> {
        if count < self.maximum_attempts {
            return None;
        }
        Some(Error::exhausted(Exhausted::new(
            operation_name,
            "attempt count",
            count.to_string(),
            self.maximum_attempts.to_string(),
        )))
    }
}

impl<P> PollingErrorPolicy for LimitedAttemptCount<P>
where
    P: PollingErrorPolicy + 'static,
{
    fn on_error(&self, start: Instant, count: u32, error: Error) -> RetryResult {
        match self.inner.on_error(start, count, error) {
            RetryResult::Continue(e) if count >= self.maximum_attempts => {
                RetryResult::Exhausted(e)
            }
            result => result,
        }
    }

    fn on_in_progress(&self, start: Instant, count: u32, operation_name: &str) -> Option<Error> {
        self.inner
            .on_in_progress(start, count, operation_name)
            .or_else(|| self.in_progress_impl(count, operation_name))
    }
}

/// The polling policy was exhausted while the operation was in progress.
#[derive(Debug)]
pub struct Exhausted {
    operation_name: String,
    limit_name: &'static str,
    value: String,
    limit: String,
}

impl Exhausted {
    pub fn new(
        operation_name: &str,
        limit_name: &'static str,
        value: String,
        limit: String,
    ) -> Self {
        Self {
            operation_name: operation_name.to_string(),
            limit_name,
            value,
            limit,
        }
    }
}

impl std::fmt::Display for Exhausted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "polling loop for {} exhausted, {} value ({}) exceeds limit ({})",
            self.operation_name, self.limit_name, self.value, self.limit
        )
    }
}

impl std::error::Error for Exhausted {}
