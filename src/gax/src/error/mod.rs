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

//! Errors returned by the client libraries.
//!
//! The client libraries distinguish between errors detected while trying to
//! send a request (e.g. cannot open a connection), errors trying to receive a
//! response (e.g. the connection is dropped before the full response), and
//! errors returned by the service itself.
//!
//! # Example
//! ```
//! use cloud_network_gax::error::{CloudError, Error};
//! fn handle_error(e: Error) {
//!     if let Some(details) = e.status() {
//!         println!("the service rejected the request: {} {}", details.code, details.message);
//!     }
//! }
//! ```

mod binding;
mod cloud_error;
mod core_error;
mod credentials;

pub use binding::*;
pub use cloud_error::*;
pub use core_error::*;
pub use credentials::*;
