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

//! The data types sent to, and received from, the service.
//!
//! These types mirror the JSON schema of the REST API. Most resources have a
//! handful of top-level fields (`id`, `name`, `location`, `tags`), and nest
//! their remaining fields in a `properties` object.
//!
//! All types provide a `new()` constructor and `set_*` setters that can be
//! chained.
//!
//! # Example
//! ```
//! # use cloud_network::model::*;
//! let network = VirtualNetwork::new()
//!     .set_location("westus")
//!     .set_properties(
//!         VirtualNetworkProperties::new()
//!             .set_address_space(AddressSpace::new().set_address_prefixes(["10.0.0.0/16"]))
//!             .set_subnets([Subnet::new()
//!                 .set_name("subnet1")
//!                 .set_properties(SubnetProperties::new().set_address_prefix("10.0.0.0/24"))]),
//!     );
//! assert_eq!(network.location, "westus");
//! ```

mod application_gateway;
mod common;
mod gateway;
mod load_balancer;
mod network;
mod network_interface;
mod public_ip;
mod security_group;
mod watcher;

pub use application_gateway::*;
pub use common::*;
pub use gateway::*;
pub use load_balancer::*;
pub use network::*;
pub use network_interface::*;
pub use public_ip::*;
pub use security_group::*;
pub use watcher::*;

/// Implemented by all the resources managed through a REST collection.
///
/// Top-level resources live in a resource group. Child resources, such as
/// subnets, live in a collection of their parent resource.
pub trait ResourceModel:
    gax::lro::ProvisionedResource
    + Clone
    + std::fmt::Debug
    + Default
    + serde::Serialize
    + serde::de::DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// The name of the collection in request paths and ids, e.g.
    /// `virtualNetworks`.
    const COLLECTION: &'static str;

    /// The collection of the parent resource, `None` for top-level
    /// resources.
    const PARENT_COLLECTION: Option<&'static str> = None;

    /// The resource id, empty until the resource is created.
    fn id(&self) -> &str;

    /// The resource name.
    fn name(&self) -> &str;
}

/// Implements [ResourceModel] and [gax::lro::ProvisionedResource] for types
/// with `id`, `name` and `properties.provisioning_state` fields.
macro_rules! resource_model {
    ($ty:ty, $collection:literal) => {
        resource_model!($ty, $collection, None);
    };
    ($ty:ty, $collection:literal, $parent:expr) => {
        impl $crate::model::ResourceModel for $ty {
            const COLLECTION: &'static str = $collection;
            const PARENT_COLLECTION: Option<&'static str> = $parent;

            fn id(&self) -> &str {
                &self.id
            }

            fn name(&self) -> &str {
                &self.name
            }
        }

        impl gax::lro::ProvisionedResource for $ty {
            fn provisioning_state(&self) -> Option<&str> {
                self.properties
                    .provisioning_state
                    .as_ref()
                    .map(|s| s.value())
            }
        }
    };
}

resource_model!(VirtualNetwork, "virtualNetworks");
resource_model!(Subnet, "subnets", Some("virtualNetworks"));
resource_model!(
    VirtualNetworkPeering,
    "virtualNetworkPeerings",
    Some("virtualNetworks")
);
resource_model!(PublicIpAddress, "publicIPAddresses");
resource_model!(NetworkInterface, "networkInterfaces");
resource_model!(NetworkSecurityGroup, "networkSecurityGroups");
resource_model!(SecurityRule, "securityRules", Some("networkSecurityGroups"));
resource_model!(LoadBalancer, "loadBalancers");
resource_model!(ApplicationGateway, "applicationGateways");
resource_model!(VirtualNetworkGateway, "virtualNetworkGateways");
resource_model!(VirtualNetworkGatewayConnection, "connections");
resource_model!(LocalNetworkGateway, "localNetworkGateways");
resource_model!(NetworkWatcher, "networkWatchers");
resource_model!(PacketCapture, "packetCaptures", Some("networkWatchers"));
