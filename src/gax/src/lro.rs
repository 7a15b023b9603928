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

//! Types and functions to make long-running operations easier to use.
//!
//! Creating, updating and deleting networking resources are long-running
//! operations. The service accepts the request, returns the resource with a
//! non-terminal `provisioningState` (e.g. `Updating`), and completes the work
//! in the background. A [Poller] queries the resource until the provisioning
//! state is terminal.
//!
//! # Example
//! ```no_run
//! # use cloud_network_gax::lro::{Poller, PollingResult};
//! # async fn sample<P: Poller<String>>(mut poller: P) {
//! while let Some(p) = poller.poll().await {
//!     match p {
//!         PollingResult::Completed(r) => { println!("done: {r:?}"); }
//!         PollingResult::InProgress(m) => { println!("in progress: {m:?}"); }
//!         PollingResult::PollingError(e) => { println!("recoverable error: {e}"); }
//!     }
//! }
//! # }
//! ```

use crate::Result;
use crate::error::{CloudError, Error};
use crate::polling_policy::{PollingBackoffPolicy, PollingErrorPolicy};
use crate::retry_result::RetryResult;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

/// The result of polling a long-running operation.
#[derive(Debug)]
pub enum PollingResult<R> {
    /// The operation is still in progress. Includes the latest version of the
    /// resource, if any.
    InProgress(Option<R>),

    /// The operation completed. Includes the final resource, or the error.
    Completed(Result<R>),

    /// An error trying to poll the operation. The polling error policy
    /// decided the error is recoverable.
    PollingError(Error),
}

/// The trait implemented by long-running operation pollers.
pub trait Poller<R>: Send {
    /// Query the current status of the long-running operation.
    ///
    /// Returns `None` once the operation is completed and its result was
    /// returned.
    fn poll(&mut self) -> impl Future<Output = Option<PollingResult<R>>> + Send;

    /// Poll the long-running operation until it completes, sleeping between
    /// polls as dictated by the polling backoff policy.
    fn until_done(self) -> impl Future<Output = Result<R>> + Send;
}

/// Resources with a provisioning state.
pub trait ProvisionedResource {
    /// The `provisioningState` reported by the service, if any.
    fn provisioning_state(&self) -> Option<&str>;
}

/// Terminal provisioning states.
pub const SUCCEEDED: &str = "Succeeded";
pub const FAILED: &str = "Failed";
pub const CANCELED: &str = "Canceled";

/// The error code used when a resource reaches a failed provisioning state.
pub const PROVISIONING_FAILED: &str = "ProvisioningFailed";

/// Creates a poller for create-or-update operations.
///
/// The poller sends the initial request with `start`, then calls `query`
/// until the resource reaches a terminal provisioning state. `Succeeded`, or
/// no provisioning state at all, completes the operation. `Failed` and
/// `Canceled` complete the operation with a service error.
pub fn new_provisioning_poller<R, S, SF, Q, QF>(
    name: String,
    error_policy: Arc<dyn PollingErrorPolicy>,
    backoff_policy: Arc<dyn PollingBackoffPolicy>,
    start: S,
    query: Q,
) -> impl Poller<R>
where
    R: ProvisionedResource + Send,
    S: FnOnce() -> SF + Send + Sync,
    SF: Future<Output = Result<R>> + Send + 'static,
    Q: Fn() -> QF + Send + Sync,
    QF: Future<Output = Result<R>> + Send + 'static,
{
    ProvisioningPoller {
        name,
        error_policy,
        backoff_policy,
        start: Some(start),
        query,
        state: State::NotStarted,
        loop_start: Instant::now(),
        attempt_count: 0,
    }
}

/// Creates a poller for delete operations.
///
/// The poller sends the delete request with `start`, then calls `query`
/// until the service reports the resource as not found.
pub fn new_deletion_poller<R, S, SF, Q, QF>(
    name: String,
    error_policy: Arc<dyn PollingErrorPolicy>,
    backoff_policy: Arc<dyn PollingBackoffPolicy>,
    start: S,
    query: Q,
) -> impl Poller<()>
where
    R: Send,
    S: FnOnce() -> SF + Send + Sync,
    SF: Future<Output = Result<()>> + Send + 'static,
    Q: Fn() -> QF + Send + Sync,
    QF: Future<Output = Result<R>> + Send + 'static,
{
    DeletionPoller {
        name,
        error_policy,
        backoff_policy,
        start: Some(start),
        query,
        state: State::NotStarted,
        loop_start: Instant::now(),
        attempt_count: 0,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum State {
    NotStarted,
    Polling,
    Done,
}

struct ProvisioningPoller<S, Q> {
    name: String,
    error_policy: Arc<dyn PollingErrorPolicy>,
    backoff_policy: Arc<dyn PollingBackoffPolicy>,
    start: Option<S>,
    query: Q,
    state: State,
    loop_start: Instant,
    attempt_count: u32,
}

impl<R, S, SF, Q, QF> Poller<R> for ProvisioningPoller<S, Q>
where
    R: ProvisionedResource + Send,
    S: FnOnce() -> SF + Send + Sync,
    SF: Future<Output = Result<R>> + Send + 'static,
    Q: Fn() -> QF + Send + Sync,
    QF: Future<Output = Result<R>> + Send + 'static,
{
    async fn poll(&mut self) -> Option<PollingResult<R>> {
        match self.state {
            State::Done => None,
            State::NotStarted => {
                let start = self.start.take()?;
                self.loop_start = Instant::now();
                let result = match start().await {
                    Err(e) => PollingResult::Completed(Err(e)),
                    Ok(r) => self.classify(r),
                };
                Some(self.transition(result))
            }
            State::Polling => {
                self.attempt_count += 1;
                let result = match (self.query)().await {
                    Err(e) => self.on_error(e),
                    Ok(r) => self.classify(r),
                };
                let result = self.check_in_progress(result);
                Some(self.transition(result))
            }
        }
    }

    async fn until_done(mut self) -> Result<R> {
        while let Some(p) = self.poll().await {
            match p {
                PollingResult::Completed(r) => return r,
                PollingResult::InProgress(_) | PollingResult::PollingError(_) => (),
            }
            let delay = self
                .backoff_policy
                .wait_period(self.loop_start, self.attempt_count + 1);
            tokio::time::sleep(delay).await;
        }
        Err(Error::other("poller already completed"))
    }
}

impl<S, Q> ProvisioningPoller<S, Q> {
    fn classify<R: ProvisionedResource>(&self, r: R) -> PollingResult<R> {
        match r.provisioning_state() {
            None => PollingResult::Completed(Ok(r)),
            Some(s) if s.eq_ignore_ascii_case(SUCCEEDED) => PollingResult::Completed(Ok(r)),
            Some(s) if s.eq_ignore_ascii_case(FAILED) || s.eq_ignore_ascii_case(CANCELED) => {
                PollingResult::Completed(Err(provisioning_failed(&self.name, s)))
            }
            Some(_) => PollingResult::InProgress(Some(r)),
        }
    }

    fn on_error<R>(&self, e: Error) -> PollingResult<R> {
        polling_error(
            self.error_policy
                .on_error(self.loop_start, self.attempt_count, e),
        )
    }

    fn check_in_progress<R>(&self, result: PollingResult<R>) -> PollingResult<R> {
        check_in_progress(
            &self.error_policy,
            self.loop_start,
            self.attempt_count,
            &self.name,
            result,
        )
    }

    fn transition<R>(&mut self, result: PollingResult<R>) -> PollingResult<R> {
        self.state = match &result {
            PollingResult::Completed(_) => State::Done,
            _ => State::Polling,
        };
        result
    }
}

struct DeletionPoller<S, Q> {
    name: String,
    error_policy: Arc<dyn PollingErrorPolicy>,
    backoff_policy: Arc<dyn PollingBackoffPolicy>,
    start: Option<S>,
    query: Q,
    state: State,
    loop_start: Instant,
    attempt_count: u32,
}

impl<R, S, SF, Q, QF> Poller<()> for DeletionPoller<S, Q>
where
    R: Send,
    S: FnOnce() -> SF + Send + Sync,
    SF: Future<Output = Result<()>> + Send + 'static,
    Q: Fn() -> QF + Send + Sync,
    QF: Future<Output = Result<R>> + Send + 'static,
{
    async fn poll(&mut self) -> Option<PollingResult<()>> {
        let result = match self.state {
            State::Done => return None,
            State::NotStarted => {
                let start = self.start.take()?;
                self.loop_start = Instant::now();
                match start().await {
                    Ok(()) => PollingResult::InProgress(None),
                    Err(e) if e.is_not_found() => PollingResult::Completed(Ok(())),
                    Err(e) => PollingResult::Completed(Err(e)),
                }
            }
            State::Polling => {
                self.attempt_count += 1;
                let result = match (self.query)().await {
                    Ok(_) => PollingResult::InProgress(None),
                    Err(e) if e.is_not_found() => PollingResult::Completed(Ok(())),
                    Err(e) => polling_error(self.error_policy.on_error(
                        self.loop_start,
                        self.attempt_count,
                        e,
                    )),
                };
                check_in_progress(
                    &self.error_policy,
                    self.loop_start,
                    self.attempt_count,
                    &self.name,
                    result,
                )
            }
        };
        self.state = match &result {
            PollingResult::Completed(_) => State::Done,
            _ => State::Polling,
        };
        Some(result)
    }

    async fn until_done(mut self) -> Result<()> {
        while let Some(p) = self.poll().await {
            match p {
                PollingResult::Completed(r) => return r,
                PollingResult::InProgress(_) | PollingResult::PollingError(_) => (),
            }
            let delay = self
                .backoff_policy
                .wait_period(self.loop_start, self.attempt_count + 1);
            tokio::time::sleep(delay).await;
        }
        Err(Error::other("poller already completed"))
    }
}

fn polling_error<R>(flow: RetryResult) -> PollingResult<R> {
    match flow {
        RetryResult::Continue(e) => PollingResult::PollingError(e),
        RetryResult::Exhausted(e) | RetryResult::Permanent(e) => PollingResult::Completed(Err(e)),
    }
}

fn check_in_progress<R>(
    policy: &Arc<dyn PollingErrorPolicy>,
    loop_start: Instant,
    attempt_count: u32,
    name: &str,
    result: PollingResult<R>,
) -> PollingResult<R> {
    match result {
        PollingResult::InProgress(r) => {
            match policy.on_in_progress(loop_start, attempt_count, name) {
                Some(e) => PollingResult::Completed(Err(e)),
                None => PollingResult::InProgress(r),
            }
        }
        other => other,
    }
}

fn provisioning_failed(name: &str, state: &str) -> Error {
    Error::service(
        CloudError::new()
            .set_code(PROVISIONING_FAILED)
            .set_message(format!("the provisioning state for {name} is {state}"))
            .set_target(name),
    )
}
