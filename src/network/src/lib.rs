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

//! Client Libraries for Rust - Cloud Network Management
//!
//! This crate contains traits, types, and functions to manage virtual
//! networks, public IP addresses, network interfaces, network security
//! groups, load balancers, application gateways, virtual network gateways,
//! and network watchers.
//!
//! Most applications will use the [NetworkManager] in the [fluent] module.
//! It assembles the request payloads with `define()` / `with_*()` chains,
//! creates any implicit resources (public IP addresses, networks, frontends)
//! and wraps the results in typed accessors. The [client] module provides
//! lower level access to each REST collection.
//!
//! **WARNING:** this crate is under active development. We expect multiple
//! breaking changes in the upcoming releases. We welcome feedback about the
//! APIs, documentation, missing features, bugs, etc.

pub use gax::Result;
pub use gax::error::Error;

pub mod builder;
pub mod client;
pub mod fluent;
pub mod model;
pub mod names;
pub mod region;
pub mod resource_id;
pub mod stub;

pub use fluent::NetworkManager;

pub(crate) mod tracing;
pub(crate) mod transport;

pub(crate) mod info {
    const NAME: &str = env!("CARGO_PKG_NAME");
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    lazy_static::lazy_static! {
        pub(crate) static ref USER_AGENT: String = format!("{NAME}/{VERSION}");
    }
}
