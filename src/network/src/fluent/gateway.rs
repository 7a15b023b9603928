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
    Collection, Connection, ConnectionDefinition, Definition, DefinitionError, Draft,
    NetworkManager, Wrapper, check_region, create_network, create_public_ip, definition_setters,
    upsert, wrapper,
};
use crate::Result;
use crate::model::*;
use crate::resource_id::parent_id;
use futures::TryStreamExt;

/// The name of the subnet reserved for virtual network gateways.
pub const GATEWAY_SUBNET: &str = "GatewaySubnet";

const DEFAULT_IP_CONFIGURATION: &str = "default";

/// The virtual network gateways in a subscription.
pub type VirtualNetworkGateways = Collection<VirtualNetworkGateway>;

/// A virtual network gateway, the VPN or ExpressRoute endpoint of a network.
#[derive(Clone, Debug)]
pub struct VirtualNetworkGateway {
    manager: NetworkManager,
    inner: crate::model::VirtualNetworkGateway,
}

wrapper!(
    VirtualNetworkGateway,
    crate::model::VirtualNetworkGateway,
    virtual_network_gateways
);

impl VirtualNetworkGateway {
    pub fn gateway_type(&self) -> Option<&VirtualNetworkGatewayType> {
        self.inner.properties.gateway_type.as_ref()
    }

    pub fn vpn_type(&self) -> Option<&VpnType> {
        self.inner.properties.vpn_type.as_ref()
    }

    pub fn sku(&self) -> Option<&VirtualNetworkGatewaySkuName> {
        self.inner.properties.sku.as_ref().and_then(|s| s.name.as_ref())
    }

    pub fn is_bgp_enabled(&self) -> bool {
        self.inner.properties.enable_bgp.unwrap_or_default()
    }

    pub fn is_active_active(&self) -> bool {
        self.inner.properties.active_active.unwrap_or_default()
    }

    pub fn bgp_settings(&self) -> Option<&BgpSettings> {
        self.inner.properties.bgp_settings.as_ref()
    }

    pub fn ip_configurations(&self) -> &[VirtualNetworkGatewayIpConfiguration] {
        &self.inner.properties.ip_configurations
    }

    /// The network where the gateway is deployed.
    pub fn network_id(&self) -> Option<String> {
        self.ip_configurations()
            .iter()
            .find_map(|c| c.properties.subnet.as_ref())
            .and_then(|s| parent_id(&s.id))
    }

    pub fn public_ip_address_id(&self) -> Option<&str> {
        self.ip_configurations()
            .iter()
            .find_map(|c| c.properties.public_ip_address.as_ref())
            .map(|p| p.id.as_str())
    }

    /// Resets the gateway. Active-active gateways reset one instance at a
    /// time.
    pub async fn reset(&mut self) -> Result<()> {
        let inner = self
            .manager
            .client()
            .actions()
            .reset_virtual_network_gateway()
            .set_resource_group_name(self.resource_group_name())
            .set_name(&self.inner.name)
            .send()
            .await?;
        self.inner = inner;
        Ok(())
    }

    /// The connections using this gateway.
    pub fn connections(&self) -> GatewayConnections {
        GatewayConnections {
            manager: self.manager.clone(),
            resource_group_name: self.resource_group_name().to_string(),
            location: self.inner.location.clone(),
            gateway_name: self.inner.name.clone(),
            gateway_id: self.inner.id.clone(),
        }
    }

    /// Lists the connections using this gateway.
    pub async fn list_connections(&self) -> Result<Vec<Connection>> {
        self.connections().list().await
    }

    /// Starts an update of this gateway.
    pub fn update(self) -> VirtualNetworkGatewayUpdate {
        VirtualNetworkGatewayDefinition {
            draft: Draft::existing(self.manager, self.inner),
            network: None,
            new_public_ip: false,
        }
    }
}

/// The connections of a virtual network gateway.
///
/// New connections use the region and the resource group of the gateway.
#[derive(Clone, Debug)]
pub struct GatewayConnections {
    manager: NetworkManager,
    resource_group_name: String,
    location: String,
    gateway_name: String,
    gateway_id: String,
}

impl GatewayConnections {
    /// Starts the definition of a connection from the gateway.
    pub fn define<T: Into<String>>(&self, name: T) -> ConnectionDefinition {
        self.manager
            .virtual_network_gateway_connections()
            .define(name)
            .with_region(self.location.as_str())
            .with_existing_resource_group(&self.resource_group_name)
            .with_existing_gateway(&self.gateway_id)
    }

    pub async fn list(&self) -> Result<Vec<Connection>> {
        let items: Vec<VirtualNetworkGatewayConnection> = self
            .manager
            .client()
            .actions()
            .list_gateway_connections()
            .set_resource_group_name(&self.resource_group_name)
            .set_gateway_name(&self.gateway_name)
            .by_item()
            .try_collect()
            .await?;
        Ok(items
            .into_iter()
            .map(|item| Connection::wrap(self.manager.clone(), item))
            .collect())
    }
}

impl Collection<VirtualNetworkGateway> {
    /// Starts the definition of a new virtual network gateway.
    pub fn define<T: Into<String>>(&self, name: T) -> VirtualNetworkGatewayDefinition {
        VirtualNetworkGatewayDefinition {
            draft: Draft::new(
                self.manager.clone(),
                crate::model::VirtualNetworkGateway::new().set_name(name),
            ),
            network: None,
            new_public_ip: true,
        }
    }
}

#[derive(Clone, Debug)]
enum GatewayNetwork {
    Existing(String),
    New(String),
}

/// The definition of a new virtual network gateway.
///
/// Unless configured otherwise, new gateways are route based VPN gateways
/// using the `Basic` SKU, and get a new public IP address. The gateway is
/// deployed in the [GATEWAY_SUBNET] of its network.
#[derive(Clone, Debug)]
pub struct VirtualNetworkGatewayDefinition {
    draft: Draft<crate::model::VirtualNetworkGateway>,
    network: Option<GatewayNetwork>,
    new_public_ip: bool,
}

/// Updates use the same setters as new definitions.
pub type VirtualNetworkGatewayUpdate = VirtualNetworkGatewayDefinition;

impl Definition for VirtualNetworkGatewayDefinition {
    type Model = crate::model::VirtualNetworkGateway;
}

impl VirtualNetworkGatewayDefinition {
    definition_setters!();

    /// Deploys the gateway in the [GATEWAY_SUBNET] of an existing network.
    pub fn with_existing_network<T: Into<String>>(mut self, network_id: T) -> Self {
        self.network = Some(GatewayNetwork::Existing(network_id.into()));
        self
    }

    /// Deploys the gateway in a new network, with a [GATEWAY_SUBNET] spanning
    /// `address_space`.
    pub fn with_new_network<T: Into<String>>(mut self, address_space: T) -> Self {
        self.network = Some(GatewayNetwork::New(address_space.into()));
        self
    }

    pub fn with_vpn(mut self) -> Self {
        self.draft.inner.properties.gateway_type = Some(VirtualNetworkGatewayType::VPN);
        self
    }

    pub fn with_express_route(mut self) -> Self {
        self.draft.inner.properties.gateway_type = Some(VirtualNetworkGatewayType::EXPRESS_ROUTE);
        self.draft.inner.properties.vpn_type = None;
        self
    }

    pub fn with_route_based_vpn(mut self) -> Self {
        self.draft.inner.properties.gateway_type = Some(VirtualNetworkGatewayType::VPN);
        self.draft.inner.properties.vpn_type = Some(VpnType::ROUTE_BASED);
        self
    }

    pub fn with_policy_based_vpn(mut self) -> Self {
        self.draft.inner.properties.gateway_type = Some(VirtualNetworkGatewayType::VPN);
        self.draft.inner.properties.vpn_type = Some(VpnType::POLICY_BASED);
        self
    }

    pub fn with_sku<T: Into<VirtualNetworkGatewaySkuName>>(mut self, v: T) -> Self {
        self.draft.inner.properties.sku = Some(VirtualNetworkGatewaySku::from(v.into()));
        self
    }

    /// Enables BGP, using `asn` and `peering_address` for the gateway.
    pub fn with_bgp<T: Into<String>>(mut self, asn: i64, peering_address: T) -> Self {
        let properties = &mut self.draft.inner.properties;
        properties.enable_bgp = Some(true);
        properties.bgp_settings = Some(
            BgpSettings::new()
                .set_asn(asn)
                .set_bgp_peering_address(peering_address),
        );
        self
    }

    pub fn without_bgp(mut self) -> Self {
        let properties = &mut self.draft.inner.properties;
        properties.enable_bgp = Some(false);
        properties.bgp_settings = None;
        self
    }

    pub fn with_active_active(mut self) -> Self {
        self.draft.inner.properties.active_active = Some(true);
        self
    }

    pub fn without_active_active(mut self) -> Self {
        self.draft.inner.properties.active_active = Some(false);
        self
    }

    /// Uses a new public IP address, created before the gateway.
    pub fn with_new_public_ip_address(mut self) -> Self {
        self.new_public_ip = true;
        self
    }

    pub fn with_existing_public_ip_address<T: Into<String>>(mut self, id: T) -> Self {
        self.new_public_ip = false;
        self.ip_configuration().properties.public_ip_address = Some(SubResource::new(id));
        self
    }

    /// Creates the gateway, and any implicit resources.
    ///
    /// Gateways take a long time to provision, this waits until the
    /// operation completes.
    pub async fn create(mut self) -> Result<VirtualNetworkGateway> {
        check_region(&self.draft.inner.location, self.draft.name())?;
        self.draft.check_resource_group()?;
        if self.network.is_none() && self.subnet().is_none() {
            return Err(DefinitionError::Incomplete {
                resource: self.draft.name().to_string(),
                what: "a network",
            }
            .into());
        }
        self.reconcile().await?;
        self.draft.submit().await
    }

    pub async fn apply(mut self) -> Result<VirtualNetworkGateway> {
        self.reconcile().await?;
        self.draft.submit().await
    }

    fn subnet(&self) -> Option<&SubResource> {
        self.draft
            .inner
            .properties
            .ip_configurations
            .iter()
            .find_map(|c| c.properties.subnet.as_ref())
    }

    fn ip_configuration(&mut self) -> &mut VirtualNetworkGatewayIpConfiguration {
        let configurations = &mut self.draft.inner.properties.ip_configurations;
        if configurations.is_empty() {
            upsert(
                configurations,
                VirtualNetworkGatewayIpConfiguration::new()
                    .set_name(DEFAULT_IP_CONFIGURATION)
                    .set_properties(
                        VirtualNetworkGatewayIpConfigurationProperties::new()
                            .set_private_ip_allocation_method(IpAllocationMethod::DYNAMIC),
                    ),
            );
        }
        &mut configurations[0]
    }

    fn reconcile_properties(&mut self) {
        let properties = &mut self.draft.inner.properties;
        let gateway_type = properties
            .gateway_type
            .get_or_insert(VirtualNetworkGatewayType::VPN)
            .clone();
        if gateway_type.matches(&VirtualNetworkGatewayType::VPN) {
            properties.vpn_type.get_or_insert(VpnType::ROUTE_BASED);
        }
        if properties.sku.is_none() {
            let sku = if gateway_type.matches(&VirtualNetworkGatewayType::EXPRESS_ROUTE) {
                VirtualNetworkGatewaySkuName::STANDARD
            } else {
                VirtualNetworkGatewaySkuName::BASIC
            };
            properties.sku = Some(VirtualNetworkGatewaySku::from(sku));
        }
    }

    async fn reconcile(&mut self) -> Result<()> {
        self.reconcile_properties();
        let owner = self.draft.name().to_string();
        let network_id = match self.network.take() {
            Some(GatewayNetwork::Existing(id)) => Some(id),
            Some(GatewayNetwork::New(address_space)) => {
                let network = create_network(
                    &self.draft.manager,
                    &self.draft.resource_group_name,
                    &self.draft.inner.location,
                    &owner,
                    &address_space,
                    GATEWAY_SUBNET,
                )
                .await?;
                Some(network.id().to_string())
            }
            None => None,
        };
        if let Some(id) = network_id {
            let subnet = format!("{}/subnets/{GATEWAY_SUBNET}", id.trim_end_matches('/'));
            self.ip_configuration().properties.subnet = Some(SubResource::new(subnet));
        }
        let needs_address = self.new_public_ip
            && self
                .draft
                .inner
                .properties
                .ip_configurations
                .iter()
                .all(|c| c.properties.public_ip_address.is_none());
        if needs_address {
            let address = create_public_ip(
                &self.draft.manager,
                &self.draft.resource_group_name,
                &self.draft.inner.location,
                &owner,
            )
            .await?;
            self.ip_configuration().properties.public_ip_address =
                Some(SubResource::new(address.id()));
        }
        Ok(())
    }
}
