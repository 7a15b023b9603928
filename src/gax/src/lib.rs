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

//! Runtime support for the cloud networking clients.
//!
//! This crate contains the types and functions shared by the clients in
//! `cloud-network`: errors, request options, retry and polling policies,
//! pagination, credentials, and the HTTP transport.
//!
//! <div class="warning">
//! The <code>http_client</code> and <code>path_parameter</code> modules are
//! <b>not</b> intended for general use. They are used in the implementation
//! of the clients and may change without notice.
//! </div>

/// An alias of [std::result::Result] where the error is always [crate::error::Error].
///
/// This is the result type used by all functions wrapping REST calls.
pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// The core error types used by the clients.
pub mod error;

/// Helpers to validate and encode path parameters.
#[doc(hidden)]
pub mod path_parameter;

/// Defines traits and helpers to convert list operations into streams.
pub mod paginator;

/// The HTTP transport shared by all the clients.
#[doc(hidden)]
pub mod http_client;

pub mod backoff_policy;
pub mod client_builder;
pub mod credentials;
pub mod exponential_backoff;
pub mod lro;
pub mod options;
pub mod polling_policy;
pub mod response;
pub mod retry_loop;
pub mod retry_policy;
pub mod retry_result;
