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

use crate::Result;
use crate::backoff_policy::BackoffPolicy;
use crate::error::Error;
use crate::options::RequestOptions;
use crate::retry_policy::RetryPolicy;
use crate::retry_result::RetryResult;
use std::sync::Arc;
use std::time::Duration;

/// Runs the retry loop for a given function.
///
/// This functions calls `inner` until it returns a successful response, or
/// the retry policy stops the loop. Between attempts it sleeps for the period
/// dictated by the backoff policy, or longer if the error carries a
/// `Retry-After` hint.
///
/// The `inner` closure receives the remaining time in the retry policy, if
/// any. Use [effective_timeout] to compute the timeout for each attempt.
pub async fn retry_loop<F, S, Response>(
    mut inner: F,
    sleep: S,
    idempotent: bool,
    retry_policy: Arc<dyn RetryPolicy>,
    backoff_policy: Arc<dyn BackoffPolicy>,
) -> Result<Response>
where
    F: AsyncFnMut(Option<Duration>) -> Result<Response> + Send,
    S: AsyncFn(Duration) -> () + Send,
{
    let loop_start = tokio::time::Instant::now().into_std();
    let mut attempt_count = 0;
    loop {
        let remaining_time = retry_policy.remaining_time(loop_start, attempt_count);
        attempt_count += 1;
        let error = match inner(remaining_time).await {
            Ok(r) => return Ok(r),
            Err(e) => e,
        };
        let flow = retry_policy.on_error(loop_start, attempt_count, idempotent, error);
        let retry_after = flow.retry_after();
        let error = match flow {
            RetryResult::Permanent(e) | RetryResult::Exhausted(e) => return Err(e),
            RetryResult::Continue(e) => e,
        };
        let delay = backoff_policy.on_failure_with_hint(loop_start, attempt_count, retry_after);
        let remaining_time = retry_policy.remaining_time(loop_start, attempt_count);
        if remaining_time.is_some_and(|remaining| remaining < delay) {
            return Err(Error::exhausted(error));
        }
        tracing::debug!(attempt_count, ?delay, "retrying request after error: {error}");
        sleep(delay).await;
    }
}

/// Computes the timeout for a single attempt.
///
/// The attempt timeout in the request options, if any, is capped by the
/// remaining time in the retry policy.
pub fn effective_timeout(
    options: &RequestOptions,
    remaining_time: Option<Duration>,
) -> Option<Duration> {
    match (options.attempt_timeout(), remaining_time) {
        (None, None) => None,
        (None, Some(t)) => Some(t),
        (Some(t), None) => Some(t),
        (Some(a), Some(r)) => Some(std::cmp::min(a, r)),
    }
}
