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

//! Parse and build resource ids.
//!
//! Resource ids have the form:
//!
//! ```text
//! /subscriptions/{subscription}/resourceGroups/{group}/providers/{namespace}/{type}/{name}[/{child_type}/{child_name}]*
//! ```
//!
//! The fluent layer uses these helpers to compute the ids of resources
//! before they exist, so a single request can reference other children of
//! the same resource.
//!
//! # Example
//! ```
//! # use cloud_network::resource_id::ResourceId;
//! let id = ResourceId::parse(
//!     "/subscriptions/s1/resourceGroups/rg1/providers/Microsoft.Network/virtualNetworks/vnet1/subnets/subnet1",
//! )?;
//! assert_eq!(id.resource_group_name(), "rg1");
//! assert_eq!(id.resource_type(), "virtualNetworks/subnets");
//! assert_eq!(id.name(), "subnet1");
//! assert_eq!(id.parent().map(|p| p.name().to_string()), Some("vnet1".to_string()));
//! # Ok::<(), cloud_network::Error>(())
//! ```

use crate::Result;
use gax::error::Error;

/// The provider namespace of all the resources in this crate.
pub const NETWORK_NAMESPACE: &str = "Microsoft.Network";

const EXPECTING: &str =
    "/subscriptions/{subscription}/resourceGroups/{group}/providers/{namespace}/{type}/{name}";

/// A parsed resource id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId {
    subscription_id: String,
    resource_group_name: String,
    provider_namespace: String,
    // Pairs of (type, name), starting with the top-level resource.
    segments: Vec<(String, String)>,
}

impl ResourceId {
    /// Creates the id of a top-level networking resource.
    pub fn new<S, G, T, N>(subscription_id: S, resource_group_name: G, resource_type: T, name: N) -> Self
    where
        S: Into<String>,
        G: Into<String>,
        T: Into<String>,
        N: Into<String>,
    {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            provider_namespace: NETWORK_NAMESPACE.to_string(),
            segments: vec![(resource_type.into(), name.into())],
        }
    }

    /// Returns the id of a child resource.
    pub fn child<T: Into<String>, N: Into<String>>(&self, resource_type: T, name: N) -> Self {
        let mut child = self.clone();
        child.segments.push((resource_type.into(), name.into()));
        child
    }

    /// Parses an id. The `subscriptions`, `resourceGroups` and `providers`
    /// keywords are matched ignoring case.
    pub fn parse(id: &str) -> Result<Self> {
        let malformed = || Error::binding(gax::error::BindingError::invalid("id", id, EXPECTING));
        let mut parts = id
            .strip_prefix('/')
            .ok_or_else(malformed)?
            .trim_end_matches('/')
            .split('/');
        let mut keyword = |name: &str| match parts.next() {
            Some(k) if k.eq_ignore_ascii_case(name) => parts.next().filter(|v| !v.is_empty()),
            _ => None,
        };
        let subscription_id = keyword("subscriptions").ok_or_else(malformed)?.to_string();
        let resource_group_name = keyword("resourceGroups").ok_or_else(malformed)?.to_string();
        let provider_namespace = keyword("providers").ok_or_else(malformed)?.to_string();
        let rest = parts.collect::<Vec<_>>();
        if rest.is_empty() || rest.len() % 2 != 0 || rest.iter().any(|s| s.is_empty()) {
            return Err(malformed());
        }
        let segments = rest
            .chunks(2)
            .map(|c| (c[0].to_string(), c[1].to_string()))
            .collect();
        Ok(Self {
            subscription_id,
            resource_group_name,
            provider_namespace,
            segments,
        })
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    pub fn resource_group_name(&self) -> &str {
        &self.resource_group_name
    }

    pub fn provider_namespace(&self) -> &str {
        &self.provider_namespace
    }

    /// The full resource type, e.g. `virtualNetworks/subnets`.
    pub fn resource_type(&self) -> String {
        self.segments
            .iter()
            .map(|(t, _)| t.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// The name of the resource, the last segment of the id.
    pub fn name(&self) -> &str {
        self.segments
            .last()
            .map(|(_, n)| n.as_str())
            .unwrap_or_default()
    }

    /// The id of the parent resource, `None` for top-level resources.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        let mut parent = self.clone();
        parent.segments.pop();
        Some(parent)
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}/providers/{}",
            self.subscription_id, self.resource_group_name, self.provider_namespace
        )?;
        for (t, n) in &self.segments {
            write!(f, "/{t}/{n}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for ResourceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// The resource group in `id`, or `None` if the id does not contain one.
///
/// Unlike [ResourceId::parse] this accepts ids of resource groups.
pub fn resource_group_from_id(id: &str) -> Option<&str> {
    let mut parts = id.split('/');
    parts.find(|p| p.eq_ignore_ascii_case("resourceGroups"))?;
    parts.next().filter(|p| !p.is_empty())
}

/// The last segment of `id`, or `None` if the id is empty.
pub fn name_from_id(id: &str) -> Option<&str> {
    id.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|n| !n.is_empty())
}

/// The id of the parent resource, `None` for top-level or malformed ids.
pub fn parent_id(id: &str) -> Option<String> {
    ResourceId::parse(id).ok()?.parent().map(|p| p.to_string())
}

/// The subscription in `id`, or `None` if the id does not contain one.
pub fn subscription_from_id(id: &str) -> Option<&str> {
    let mut parts = id.split('/');
    parts.find(|p| p.eq_ignore_ascii_case("subscriptions"))?;
    parts.next().filter(|p| !p.is_empty())
}
