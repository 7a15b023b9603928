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

use super::common::*;

string_enum! {
    VirtualNetworkGatewayType {
        VPN = "Vpn",
        EXPRESS_ROUTE = "ExpressRoute",
    }
}

string_enum! {
    VpnType {
        ROUTE_BASED = "RouteBased",
        POLICY_BASED = "PolicyBased",
    }
}

string_enum! {
    VirtualNetworkGatewaySkuName {
        BASIC = "Basic",
        STANDARD = "Standard",
        HIGH_PERFORMANCE = "HighPerformance",
        ULTRA_PERFORMANCE = "UltraPerformance",
        VPN_GW1 = "VpnGw1",
        VPN_GW2 = "VpnGw2",
        VPN_GW3 = "VpnGw3",
    }
}

string_enum! {
    VirtualNetworkGatewayConnectionType {
        IPSEC = "IPsec",
        VNET2VNET = "Vnet2Vnet",
        EXPRESS_ROUTE = "ExpressRoute",
        VPN_CLIENT = "VPNClient",
    }
}

string_enum! {
    VirtualNetworkGatewayConnectionStatus {
        UNKNOWN = "Unknown",
        CONNECTING = "Connecting",
        CONNECTED = "Connected",
        NOT_CONNECTED = "NotConnected",
    }
}

/// A virtual network gateway, the VPN or ExpressRoute endpoint of a virtual
/// network.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct VirtualNetworkGateway {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub r#type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,
    pub properties: VirtualNetworkGatewayProperties,
}

impl VirtualNetworkGateway {
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

    pub fn set_location<T: Into<String>>(mut self, v: T) -> Self {
        self.location = v.into();
        self
    }

    pub fn set_tags<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tags = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn set_properties<T: Into<VirtualNetworkGatewayProperties>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct VirtualNetworkGatewayProperties {
    pub ip_configurations: Vec<VirtualNetworkGatewayIpConfiguration>,
    pub gateway_type: Option<VirtualNetworkGatewayType>,
    pub vpn_type: Option<VpnType>,
    pub enable_bgp: Option<bool>,
    pub active_active: Option<bool>,
    pub sku: Option<VirtualNetworkGatewaySku>,
    pub bgp_settings: Option<BgpSettings>,
    pub gateway_default_site: Option<SubResource>,
    pub resource_guid: Option<String>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl VirtualNetworkGatewayProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ip_configurations<T>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = VirtualNetworkGatewayIpConfiguration>,
    {
        self.ip_configurations = v.into_iter().collect();
        self
    }

    pub fn set_gateway_type<T: Into<VirtualNetworkGatewayType>>(mut self, v: T) -> Self {
        self.gateway_type = Some(v.into());
        self
    }

    pub fn set_vpn_type<T: Into<VpnType>>(mut self, v: T) -> Self {
        self.vpn_type = Some(v.into());
        self
    }

    pub fn set_enable_bgp(mut self, v: bool) -> Self {
        self.enable_bgp = Some(v);
        self
    }

    pub fn set_active_active(mut self, v: bool) -> Self {
        self.active_active = Some(v);
        self
    }

    pub fn set_sku<T: Into<VirtualNetworkGatewaySku>>(mut self, v: T) -> Self {
        self.sku = Some(v.into());
        self
    }

    pub fn set_bgp_settings<T: Into<BgpSettings>>(mut self, v: T) -> Self {
        self.bgp_settings = Some(v.into());
        self
    }
}

/// The gateway SKU. The tier always matches the name.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct VirtualNetworkGatewaySku {
    pub name: Option<VirtualNetworkGatewaySkuName>,
    pub tier: Option<VirtualNetworkGatewaySkuName>,
    #[serde(skip_serializing)]
    pub capacity: Option<i32>,
}

impl std::convert::From<VirtualNetworkGatewaySkuName> for VirtualNetworkGatewaySku {
    fn from(value: VirtualNetworkGatewaySkuName) -> Self {
        Self {
            name: Some(value.clone()),
            tier: Some(value),
            capacity: None,
        }
    }
}

child_resource!(
    VirtualNetworkGatewayIpConfiguration,
    VirtualNetworkGatewayIpConfigurationProperties
);

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct VirtualNetworkGatewayIpConfigurationProperties {
    #[serde(rename = "privateIPAllocationMethod")]
    pub private_ip_allocation_method: Option<IpAllocationMethod>,
    /// Must be the `GatewaySubnet` of the virtual network.
    pub subnet: Option<SubResource>,
    #[serde(rename = "publicIPAddress")]
    pub public_ip_address: Option<SubResource>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl VirtualNetworkGatewayIpConfigurationProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_private_ip_allocation_method<T: Into<IpAllocationMethod>>(mut self, v: T) -> Self {
        self.private_ip_allocation_method = Some(v.into());
        self
    }

    pub fn set_subnet<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.subnet = Some(v.into());
        self
    }

    pub fn set_public_ip_address<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.public_ip_address = Some(v.into());
        self
    }
}

/// A connection between a virtual network gateway and another gateway, or
/// an ExpressRoute circuit.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct VirtualNetworkGatewayConnection {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub r#type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,
    pub properties: VirtualNetworkGatewayConnectionProperties,
}

impl VirtualNetworkGatewayConnection {
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

    pub fn set_location<T: Into<String>>(mut self, v: T) -> Self {
        self.location = v.into();
        self
    }

    pub fn set_tags<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tags = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn set_properties<T>(mut self, v: T) -> Self
    where
        T: Into<VirtualNetworkGatewayConnectionProperties>,
    {
        self.properties = v.into();
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct VirtualNetworkGatewayConnectionProperties {
    pub connection_type: Option<VirtualNetworkGatewayConnectionType>,
    #[serde(rename = "virtualNetworkGateway1")]
    pub virtual_network_gateway1: Option<SubResource>,
    /// The remote gateway of `Vnet2Vnet` connections.
    #[serde(rename = "virtualNetworkGateway2")]
    pub virtual_network_gateway2: Option<SubResource>,
    /// The remote gateway of `IPsec` connections.
    #[serde(rename = "localNetworkGateway2")]
    pub local_network_gateway2: Option<SubResource>,
    /// The ExpressRoute circuit of `ExpressRoute` connections.
    pub peer: Option<SubResource>,
    pub shared_key: Option<String>,
    pub authorization_key: Option<String>,
    pub routing_weight: Option<i32>,
    pub enable_bgp: Option<bool>,
    pub use_policy_based_traffic_selectors: Option<bool>,
    #[serde(skip_serializing)]
    pub connection_status: Option<VirtualNetworkGatewayConnectionStatus>,
    #[serde(skip_serializing)]
    pub egress_bytes_transferred: Option<i64>,
    #[serde(skip_serializing)]
    pub ingress_bytes_transferred: Option<i64>,
    pub resource_guid: Option<String>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl VirtualNetworkGatewayConnectionProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_connection_type<T>(mut self, v: T) -> Self
    where
        T: Into<VirtualNetworkGatewayConnectionType>,
    {
        self.connection_type = Some(v.into());
        self
    }

    pub fn set_virtual_network_gateway1<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.virtual_network_gateway1 = Some(v.into());
        self
    }

    pub fn set_virtual_network_gateway2<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.virtual_network_gateway2 = Some(v.into());
        self
    }

    pub fn set_local_network_gateway2<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.local_network_gateway2 = Some(v.into());
        self
    }

    pub fn set_peer<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.peer = Some(v.into());
        self
    }

    pub fn set_shared_key<T: Into<String>>(mut self, v: T) -> Self {
        self.shared_key = Some(v.into());
        self
    }

    pub fn set_authorization_key<T: Into<String>>(mut self, v: T) -> Self {
        self.authorization_key = Some(v.into());
        self
    }

    pub fn set_routing_weight(mut self, v: i32) -> Self {
        self.routing_weight = Some(v);
        self
    }

    pub fn set_enable_bgp(mut self, v: bool) -> Self {
        self.enable_bgp = Some(v);
        self
    }

    pub fn set_use_policy_based_traffic_selectors(mut self, v: bool) -> Self {
        self.use_policy_based_traffic_selectors = Some(v);
        self
    }
}

/// A local network gateway, representing an on-premises VPN device.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct LocalNetworkGateway {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub r#type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(skip_serializing_if = "Tags::is_empty")]
    pub tags: Tags,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,
    pub properties: LocalNetworkGatewayProperties,
}

impl LocalNetworkGateway {
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

    pub fn set_location<T: Into<String>>(mut self, v: T) -> Self {
        self.location = v.into();
        self
    }

    pub fn set_tags<T, K, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tags = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn set_properties<T: Into<LocalNetworkGatewayProperties>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct LocalNetworkGatewayProperties {
    pub local_network_address_space: Option<AddressSpace>,
    /// The public IP address of the on-premises device.
    pub gateway_ip_address: Option<String>,
    pub bgp_settings: Option<BgpSettings>,
    pub resource_guid: Option<String>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl LocalNetworkGatewayProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_local_network_address_space<T: Into<AddressSpace>>(mut self, v: T) -> Self {
        self.local_network_address_space = Some(v.into());
        self
    }

    pub fn set_gateway_ip_address<T: Into<String>>(mut self, v: T) -> Self {
        self.gateway_ip_address = Some(v.into());
        self
    }

    pub fn set_bgp_settings<T: Into<BgpSettings>>(mut self, v: T) -> Self {
        self.bgp_settings = Some(v.into());
        self
    }
}
