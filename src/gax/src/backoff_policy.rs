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

//! How long to wait between attempts of a request.
//!
//! The clients retry requests that fail with transient errors, such as
//! `429 Too Many Requests` when the subscription is throttled, or `503` while
//! the resource manager is busy. The backoff policy spaces the attempts. When
//! the service sends a `Retry-After` hint the client never waits less than
//! the hint.
//!
//! # Example
//! ```
//! # use cloud_network_gax::*;
//! use exponential_backoff::ExponentialBackoff;
//! use std::time::Duration;
//!
//! let policy = ExponentialBackoff::builder()
//!     .with_initial_delay(Duration::from_millis(500))
//!     .with_maximum_delay(Duration::from_secs(30))
//!     .build()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

/// Computes the delay before the next attempt of a request.
pub trait BackoffPolicy: Send + Sync + std::fmt::Debug {
    /// The delay after `attempt_count` failed attempts.
    ///
    /// # Parameters
    /// * `loop_start` - when the retry loop started.
    /// * `attempt_count` - the number of attempts so far, at least 1.
    fn on_failure(&self, loop_start: Instant, attempt_count: u32) -> Duration;

    /// The delay after a failure, honoring the service `Retry-After` hint.
    ///
    /// Waiting less than the hint only earns another throttling error, so the
    /// hint is a lower bound for the policy's own delay.
    fn on_failure_with_hint(
        &self,
        loop_start: Instant,
        attempt_count: u32,
        retry_after: Option<Duration>,
    ) -> Duration {
        let delay = self.on_failure(loop_start, attempt_count);
        retry_after.map_or(delay, |hint| delay.max(hint))
    }
}

/// Wraps any [BackoffPolicy] for the client and request option setters.
#[derive(Clone)]
pub struct BackoffPolicyArg(pub(crate) Arc<dyn BackoffPolicy>);

impl<T: BackoffPolicy + 'static> From<T> for BackoffPolicyArg {
    fn from(value: T) -> Self {
        Self(Arc::new(value))
    }
}

impl From<Arc<dyn BackoffPolicy>> for BackoffPolicyArg {
    fn from(value: Arc<dyn BackoffPolicy>) -> Self {
        Self(value)
    }
}

impl From<BackoffPolicyArg> for Arc<dyn BackoffPolicy> {
    fn from(value: BackoffPolicyArg) -> Self {
        value.0
    }
}
