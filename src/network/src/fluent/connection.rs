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

use super::{
    Collection, Definition, DefinitionError, Draft, NetworkManager, check_region,
    definition_setters, wrapper,
};
use crate::Result;
use crate::model::*;

/// The virtual network gateway connections in a subscription.
pub type Connections = Collection<Connection>;

/// A connection between a virtual network gateway and a local network
/// gateway, another virtual network gateway, or an ExpressRoute circuit.
#[derive(Clone, Debug)]
pub struct Connection {
    manager: NetworkManager,
    inner: VirtualNetworkGatewayConnection,
}

wrapper!(
    Connection,
    VirtualNetworkGatewayConnection,
    virtual_network_gateway_connections
);

impl Connection {
    pub fn connection_type(&self) -> Option<&VirtualNetworkGatewayConnectionType> {
        self.inner.properties.connection_type.as_ref()
    }

    pub fn connection_status(&self) -> Option<&VirtualNetworkGatewayConnectionStatus> {
        self.inner.properties.connection_status.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.connection_status()
            .is_some_and(|s| s.matches(&VirtualNetworkGatewayConnectionStatus::CONNECTED))
    }

    /// The gateway initiating the connection.
    pub fn virtual_network_gateway1_id(&self) -> Option<&str> {
        id(&self.inner.properties.virtual_network_gateway1)
    }

    /// The remote gateway of vnet-to-vnet connections.
    pub fn virtual_network_gateway2_id(&self) -> Option<&str> {
        id(&self.inner.properties.virtual_network_gateway2)
    }

    /// The local network gateway of site-to-site connections.
    pub fn local_network_gateway2_id(&self) -> Option<&str> {
        id(&self.inner.properties.local_network_gateway2)
    }

    /// The ExpressRoute circuit of ExpressRoute connections.
    pub fn peer_id(&self) -> Option<&str> {
        id(&self.inner.properties.peer)
    }

    pub fn shared_key(&self) -> Option<&str> {
        self.inner.properties.shared_key.as_deref()
    }

    pub fn authorization_key(&self) -> Option<&str> {
        self.inner.properties.authorization_key.as_deref()
    }

    pub fn routing_weight(&self) -> Option<i32> {
        self.inner.properties.routing_weight
    }

    pub fn is_bgp_enabled(&self) -> bool {
        self.inner.properties.enable_bgp.unwrap_or_default()
    }

    pub fn uses_policy_based_traffic_selectors(&self) -> bool {
        self.inner
            .properties
            .use_policy_based_traffic_selectors
            .unwrap_or_default()
    }

    pub fn egress_bytes_transferred(&self) -> i64 {
        self.inner.properties.egress_bytes_transferred.unwrap_or_default()
    }

    pub fn ingress_bytes_transferred(&self) -> i64 {
        self.inner.properties.ingress_bytes_transferred.unwrap_or_default()
    }

    /// Starts an update of this connection.
    pub fn update(self) -> ConnectionUpdate {
        ConnectionDefinition {
            draft: Draft::existing(self.manager, self.inner),
        }
    }
}

fn id(reference: &Option<SubResource>) -> Option<&str> {
    reference.as_ref().map(|r| r.id.as_str())
}

impl Collection<Connection> {
    /// Starts the definition of a new connection.
    ///
    /// Prefer [connections()][super::VirtualNetworkGateway::connections] on
    /// the gateway, which fills in the region and resource group.
    pub fn define<T: Into<String>>(&self, name: T) -> ConnectionDefinition {
        ConnectionDefinition {
            draft: Draft::new(
                self.manager.clone(),
                VirtualNetworkGatewayConnection::new().set_name(name),
            ),
        }
    }
}

/// The definition of a new virtual network gateway connection.
///
/// Definitions must set the initiating gateway, and one of
/// [with_site_to_site()][ConnectionDefinition::with_site_to_site],
/// [with_vnet_to_vnet()][ConnectionDefinition::with_vnet_to_vnet], or
/// [with_express_route()][ConnectionDefinition::with_express_route].
#[derive(Clone, Debug)]
pub struct ConnectionDefinition {
    draft: Draft<VirtualNetworkGatewayConnection>,
}

/// Updates use the same setters as new definitions.
pub type ConnectionUpdate = ConnectionDefinition;

impl Definition for ConnectionDefinition {
    type Model = VirtualNetworkGatewayConnection;
}

impl ConnectionDefinition {
    definition_setters!();

    /// Sets the gateway initiating the connection.
    pub fn with_existing_gateway<T: Into<String>>(mut self, gateway_id: T) -> Self {
        self.draft.inner.properties.virtual_network_gateway1 = Some(SubResource::new(gateway_id));
        self
    }

    /// Connects to an on-premises site, described by a local network gateway.
    pub fn with_site_to_site<T: Into<String>>(mut self, local_network_gateway_id: T) -> Self {
        let properties = self.reset_remote(VirtualNetworkGatewayConnectionType::IPSEC);
        properties.local_network_gateway2 = Some(SubResource::new(local_network_gateway_id));
        self
    }

    /// Connects to the gateway of another virtual network.
    pub fn with_vnet_to_vnet<T: Into<String>>(mut self, gateway_id: T) -> Self {
        let properties = self.reset_remote(VirtualNetworkGatewayConnectionType::VNET2VNET);
        properties.virtual_network_gateway2 = Some(SubResource::new(gateway_id));
        self
    }

    /// Connects to an ExpressRoute circuit.
    pub fn with_express_route<T: Into<String>>(mut self, circuit_id: T) -> Self {
        let properties = self.reset_remote(VirtualNetworkGatewayConnectionType::EXPRESS_ROUTE);
        properties.peer = Some(SubResource::new(circuit_id));
        self
    }

    pub fn with_shared_key<T: Into<String>>(mut self, key: T) -> Self {
        self.draft.inner.properties.shared_key = Some(key.into());
        self
    }

    /// Sets the key authorizing the use of a circuit in another subscription.
    pub fn with_authorization_key<T: Into<String>>(mut self, key: T) -> Self {
        self.draft.inner.properties.authorization_key = Some(key.into());
        self
    }

    pub fn with_routing_weight(mut self, weight: i32) -> Self {
        self.draft.inner.properties.routing_weight = Some(weight);
        self
    }

    pub fn with_bgp(mut self) -> Self {
        self.draft.inner.properties.enable_bgp = Some(true);
        self
    }

    pub fn without_bgp(mut self) -> Self {
        self.draft.inner.properties.enable_bgp = Some(false);
        self
    }

    pub fn with_policy_based_traffic_selectors(mut self) -> Self {
        self.draft.inner.properties.use_policy_based_traffic_selectors = Some(true);
        self
    }

    pub async fn create(self) -> Result<Connection> {
        check_region(&self.draft.inner.location, self.draft.name())?;
        self.draft.check_resource_group()?;
        self.validate()?;
        self.draft.submit().await
    }

    pub async fn apply(self) -> Result<Connection> {
        self.validate()?;
        self.draft.submit().await
    }

    fn reset_remote(
        &mut self,
        connection_type: VirtualNetworkGatewayConnectionType,
    ) -> &mut VirtualNetworkGatewayConnectionProperties {
        let properties = &mut self.draft.inner.properties;
        properties.connection_type = Some(connection_type);
        properties.local_network_gateway2 = None;
        properties.virtual_network_gateway2 = None;
        properties.peer = None;
        properties
    }

    fn validate(&self) -> Result<()> {
        use VirtualNetworkGatewayConnectionType as Type;
        let properties = &self.draft.inner.properties;
        let missing = match properties.connection_type.as_ref() {
            _ if properties.virtual_network_gateway1.is_none() => Some("a virtual network gateway"),
            None => Some("a connection type"),
            Some(t) if t.matches(&Type::IPSEC) && properties.local_network_gateway2.is_none() => {
                Some("a local network gateway")
            }
            Some(t) if t.matches(&Type::VNET2VNET) && properties.virtual_network_gateway2.is_none() => {
                Some("a remote virtual network gateway")
            }
            Some(t) if t.matches(&Type::EXPRESS_ROUTE) && properties.peer.is_none() => {
                Some("an ExpressRoute circuit")
            }
            Some(_) => None,
        };
        match missing {
            Some(what) => Err(DefinitionError::Incomplete {
                resource: self.draft.name().to_string(),
                what,
            }
            .into()),
            None => Ok(()),
        }
    }
}
