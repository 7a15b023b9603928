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

//! The outcome of a retry or polling policy decision.

use crate::error::Error;
use std::time::Duration;

/// What a retry loop should do after an error.
#[derive(Debug)]
pub enum RetryResult {
    /// The error cannot be retried, e.g. a `400 Bad Request`.
    Permanent(Error),
    /// The error could be retried, but the policy ran out of attempts or time.
    Exhausted(Error),
    /// Retry the request.
    Continue(Error),
}

impl RetryResult {
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::Permanent(_))
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted(_))
    }

    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }

    pub fn error(&self) -> &Error {
        match self {
            Self::Permanent(e) | Self::Exhausted(e) | Self::Continue(e) => e,
        }
    }

    pub fn into_error(self) -> Error {
        match self {
            Self::Permanent(e) | Self::Exhausted(e) | Self::Continue(e) => e,
        }
    }

    /// The minimum wait requested by the service before the next attempt.
    ///
    /// Throttled requests (`429`) and busy services (`503`) carry a
    /// `Retry-After` or `x-ms-retry-after-ms` header. Only errors that
    /// continue the loop report it.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Continue(e) => e
                .http_headers()
                .and_then(crate::response::retry_after),
            Self::Permanent(_) | Self::Exhausted(_) => None,
        }
    }
}
