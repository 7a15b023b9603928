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

use std::collections::HashMap;

/// Defines a string-valued enumeration.
///
/// The service adds new values over time. These types accept any string, and
/// provide constants for the values known when this crate was released.
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $konst:ident = $value:literal,)* }) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
        #[serde(transparent)]
        pub struct $name(std::borrow::Cow<'static, str>);

        impl $name {
            $(
                $(#[$vmeta])*
                pub const $konst: $name = $name(std::borrow::Cow::Borrowed($value));
            )*

            /// The string value sent to, or received from, the service.
            pub fn value(&self) -> &str {
                &self.0
            }

            /// Compares the value ignoring case.
            ///
            /// The service is not always consistent in the case it uses.
            pub fn matches(&self, other: &Self) -> bool {
                self.0.eq_ignore_ascii_case(&other.0)
            }
        }

        impl std::convert::From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(std::borrow::Cow::Owned(value.to_string()))
            }
        }

        impl std::convert::From<String> for $name {
            fn from(value: String) -> Self {
                Self(std::borrow::Cow::Owned(value))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

pub(crate) use string_enum;

/// Defines a child resource: an `id`, a `name`, an `etag` and the
/// `properties` object.
macro_rules! child_resource {
    ($(#[$meta:meta])* $name:ident, $properties:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
        #[serde(default, rename_all = "camelCase")]
        #[non_exhaustive]
        pub struct $name {
            #[serde(skip_serializing_if = "String::is_empty")]
            pub id: String,
            #[serde(skip_serializing_if = "String::is_empty")]
            pub name: String,
            #[serde(skip_serializing_if = "String::is_empty")]
            pub etag: String,
            pub properties: $properties,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn set_id<T: Into<String>>(mut self, v: T) -> Self {
                self.id = v.into();
                self
            }

            pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
                self.name = v.into();
                self
            }

            pub fn set_properties<T: Into<$properties>>(mut self, v: T) -> Self {
                self.properties = v.into();
                self
            }
        }
    };
}

pub(crate) use child_resource;

string_enum! {
    /// The provisioning state of a resource.
    ProvisioningState {
        SUCCEEDED = "Succeeded",
        UPDATING = "Updating",
        DELETING = "Deleting",
        FAILED = "Failed",
    }
}

string_enum! {
    /// How IP addresses are allocated.
    IpAllocationMethod {
        STATIC = "Static",
        DYNAMIC = "Dynamic",
    }
}

string_enum! {
    IpVersion {
        IPV4 = "IPv4",
        IPV6 = "IPv6",
    }
}

string_enum! {
    /// Transport protocols used by load balancing and NAT rules.
    TransportProtocol {
        TCP = "Tcp",
        UDP = "Udp",
        ALL = "All",
    }
}

string_enum! {
    /// The direction of a packet, or of a security rule.
    Direction {
        INBOUND = "Inbound",
        OUTBOUND = "Outbound",
    }
}

string_enum! {
    /// Whether traffic is allowed or denied.
    Access {
        ALLOW = "Allow",
        DENY = "Deny",
    }
}

/// A reference to another resource, or to a child resource.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct SubResource {
    pub id: String,
}

impl SubResource {
    pub fn new<T: Into<String>>(id: T) -> Self {
        Self { id: id.into() }
    }

    pub fn set_id<T: Into<String>>(mut self, v: T) -> Self {
        self.id = v.into();
        self
    }
}

/// A list of address prefixes, in CIDR notation.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct AddressSpace {
    pub address_prefixes: Vec<String>,
}

impl AddressSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_address_prefixes<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.address_prefixes = v.into_iter().map(|v| v.into()).collect();
        self
    }
}

/// DHCP options for a virtual network.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct DhcpOptions {
    pub dns_servers: Vec<String>,
}

/// BGP settings for gateways.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct BgpSettings {
    pub asn: Option<i64>,
    pub bgp_peering_address: Option<String>,
    pub peer_weight: Option<i32>,
}

impl BgpSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_asn(mut self, v: i64) -> Self {
        self.asn = Some(v);
        self
    }

    pub fn set_bgp_peering_address<T: Into<String>>(mut self, v: T) -> Self {
        self.bgp_peering_address = Some(v.into());
        self
    }

    pub fn set_peer_weight(mut self, v: i32) -> Self {
        self.peer_weight = Some(v);
        self
    }
}

/// Resource tags.
pub type Tags = HashMap<String, String>;

/// A page of results from a list operation.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ListResult<R> {
    pub value: Vec<R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
}

impl<R> std::default::Default for ListResult<R> {
    fn default() -> Self {
        Self {
            value: Vec::new(),
            next_link: None,
        }
    }
}

impl<R> ListResult<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value<T: IntoIterator<Item = R>>(mut self, v: T) -> Self {
        self.value = v.into_iter().collect();
        self
    }

    pub fn set_next_link<T: Into<String>>(mut self, v: T) -> Self {
        self.next_link = Some(v.into());
        self
    }
}

impl<R: Send> gax::paginator::PageableResponse for ListResult<R> {
    type PageItem = R;

    fn items(self) -> Vec<R> {
        self.value
    }

    fn next_page_token(&self) -> String {
        self.next_link.clone().unwrap_or_default()
    }
}

/// The request message for `get` operations.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct GetResourceRequest {
    /// The resource group containing the resource.
    pub resource_group_name: String,
    /// The name of the parent resource. Empty for top-level resources.
    pub parent_name: String,
    pub name: String,
    /// Expands referenced resources in the response, for example
    /// `ipConfigurations` on network interfaces.
    pub expand: Option<String>,
}

impl GetResourceRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_resource_group_name<T: Into<String>>(mut self, v: T) -> Self {
        self.resource_group_name = v.into();
        self
    }

    pub fn set_parent_name<T: Into<String>>(mut self, v: T) -> Self {
        self.parent_name = v.into();
        self
    }

    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    pub fn set_expand<T: Into<String>>(mut self, v: T) -> Self {
        self.expand = Some(v.into());
        self
    }
}

/// The request message for `create_or_update` operations.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct CreateOrUpdateResourceRequest<R> {
    pub resource_group_name: String,
    pub parent_name: String,
    pub name: String,
    /// The desired state of the resource.
    pub resource: R,
}

impl<R: Default> CreateOrUpdateResourceRequest<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_resource_group_name<T: Into<String>>(mut self, v: T) -> Self {
        self.resource_group_name = v.into();
        self
    }

    pub fn set_parent_name<T: Into<String>>(mut self, v: T) -> Self {
        self.parent_name = v.into();
        self
    }

    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    pub fn set_resource<T: Into<R>>(mut self, v: T) -> Self {
        self.resource = v.into();
        self
    }
}

/// The request message for `delete` operations.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct DeleteResourceRequest {
    pub resource_group_name: String,
    pub parent_name: String,
    pub name: String,
}

impl DeleteResourceRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_resource_group_name<T: Into<String>>(mut self, v: T) -> Self {
        self.resource_group_name = v.into();
        self
    }

    pub fn set_parent_name<T: Into<String>>(mut self, v: T) -> Self {
        self.parent_name = v.into();
        self
    }

    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }
}

/// The request message for `list` operations.
///
/// Lists all the resources in the subscription when `resource_group_name`
/// is empty. Child resources require both the resource group and the parent
/// name.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ListResourcesRequest {
    pub resource_group_name: String,
    pub parent_name: String,
    /// The `nextLink` returned by the previous page, empty for the first page.
    pub page_token: String,
}

impl ListResourcesRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_resource_group_name<T: Into<String>>(mut self, v: T) -> Self {
        self.resource_group_name = v.into();
        self
    }

    pub fn set_parent_name<T: Into<String>>(mut self, v: T) -> Self {
        self.parent_name = v.into();
        self
    }

    pub fn set_page_token<T: Into<String>>(mut self, v: T) -> Self {
        self.page_token = v.into();
        self
    }
}

/// The request message for actions on a resource.
///
/// Actions are `POST` requests on a resource, or on a child resource when
/// `parent_name` is not empty. Most actions take some parameters in the
/// request body.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct ActionRequest<P> {
    pub resource_group_name: String,
    pub parent_name: String,
    pub name: String,
    pub parameters: P,
}

impl<P: Default> ActionRequest<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_resource_group_name<T: Into<String>>(mut self, v: T) -> Self {
        self.resource_group_name = v.into();
        self
    }

    pub fn set_parent_name<T: Into<String>>(mut self, v: T) -> Self {
        self.parent_name = v.into();
        self
    }

    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.name = v.into();
        self
    }

    pub fn set_parameters<T: Into<P>>(mut self, v: T) -> Self {
        self.parameters = v.into();
        self
    }
}
