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

/// A virtual network.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct VirtualNetwork {
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
    pub properties: VirtualNetworkProperties,
}

impl VirtualNetwork {
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

    pub fn set_properties<T: Into<VirtualNetworkProperties>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct VirtualNetworkProperties {
    pub address_space: Option<AddressSpace>,
    pub dhcp_options: Option<DhcpOptions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subnets: Vec<Subnet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub virtual_network_peerings: Vec<VirtualNetworkPeering>,
    pub enable_ddos_protection: Option<bool>,
    pub enable_vm_protection: Option<bool>,
    pub resource_guid: Option<String>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl VirtualNetworkProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_address_space<T: Into<AddressSpace>>(mut self, v: T) -> Self {
        self.address_space = Some(v.into());
        self
    }

    pub fn set_dhcp_options<T: Into<DhcpOptions>>(mut self, v: T) -> Self {
        self.dhcp_options = Some(v.into());
        self
    }

    pub fn set_subnets<T: IntoIterator<Item = Subnet>>(mut self, v: T) -> Self {
        self.subnets = v.into_iter().collect();
        self
    }

    pub fn set_virtual_network_peerings<T>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = VirtualNetworkPeering>,
    {
        self.virtual_network_peerings = v.into_iter().collect();
        self
    }

    pub fn set_enable_ddos_protection(mut self, v: bool) -> Self {
        self.enable_ddos_protection = Some(v);
        self
    }

    pub fn set_enable_vm_protection(mut self, v: bool) -> Self {
        self.enable_vm_protection = Some(v);
        self
    }

    pub fn set_provisioning_state<T: Into<ProvisioningState>>(mut self, v: T) -> Self {
        self.provisioning_state = Some(v.into());
        self
    }
}

/// A subnet in a virtual network.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Subnet {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,
    pub properties: SubnetProperties,
}

impl Subnet {
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

    pub fn set_properties<T: Into<SubnetProperties>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct SubnetProperties {
    pub address_prefix: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address_prefixes: Vec<String>,
    pub network_security_group: Option<SubResource>,
    pub route_table: Option<SubResource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub service_endpoints: Vec<ServiceEndpoint>,
    /// The IP configurations of network interfaces using this subnet.
    #[serde(skip_serializing)]
    pub ip_configurations: Vec<SubResource>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl SubnetProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_address_prefix<T: Into<String>>(mut self, v: T) -> Self {
        self.address_prefix = Some(v.into());
        self
    }

    pub fn set_network_security_group<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.network_security_group = Some(v.into());
        self
    }

    pub fn set_route_table<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.route_table = Some(v.into());
        self
    }

    pub fn set_service_endpoints<T: IntoIterator<Item = ServiceEndpoint>>(mut self, v: T) -> Self {
        self.service_endpoints = v.into_iter().collect();
        self
    }
}

/// A service endpoint enabled on a subnet, e.g. `Microsoft.Storage`.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ServiceEndpoint {
    pub service: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<String>,
}

impl ServiceEndpoint {
    pub fn new<T: Into<String>>(service: T) -> Self {
        Self {
            service: service.into(),
            locations: Vec::new(),
        }
    }
}

string_enum! {
    /// The state of a virtual network peering.
    PeeringState {
        /// The peering exists on one side only.
        INITIATED = "Initiated",
        CONNECTED = "Connected",
        /// The peering on the remote side was deleted.
        DISCONNECTED = "Disconnected",
    }
}

/// A peering between two virtual networks.
///
/// Peerings are directional. Traffic flows only after both networks have a
/// peering that points to the other network.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct VirtualNetworkPeering {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,
    pub properties: VirtualNetworkPeeringProperties,
}

impl VirtualNetworkPeering {
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

    pub fn set_properties<T: Into<VirtualNetworkPeeringProperties>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct VirtualNetworkPeeringProperties {
    pub allow_virtual_network_access: Option<bool>,
    pub allow_forwarded_traffic: Option<bool>,
    pub allow_gateway_transit: Option<bool>,
    pub use_remote_gateways: Option<bool>,
    pub remote_virtual_network: Option<SubResource>,
    pub remote_address_space: Option<AddressSpace>,
    #[serde(skip_serializing)]
    pub peering_state: Option<PeeringState>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl VirtualNetworkPeeringProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_allow_virtual_network_access(mut self, v: bool) -> Self {
        self.allow_virtual_network_access = Some(v);
        self
    }

    pub fn set_allow_forwarded_traffic(mut self, v: bool) -> Self {
        self.allow_forwarded_traffic = Some(v);
        self
    }

    pub fn set_allow_gateway_transit(mut self, v: bool) -> Self {
        self.allow_gateway_transit = Some(v);
        self
    }

    pub fn set_use_remote_gateways(mut self, v: bool) -> Self {
        self.use_remote_gateways = Some(v);
        self
    }

    pub fn set_remote_virtual_network<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.remote_virtual_network = Some(v.into());
        self
    }

    pub fn set_peering_state<T: Into<PeeringState>>(mut self, v: T) -> Self {
        self.peering_state = Some(v.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn serialize_network() -> anyhow::Result<()> {
        let input = VirtualNetwork::new()
            .set_name("vnet1")
            .set_location("westus")
            .set_tags([("env", "test")])
            .set_properties(
                VirtualNetworkProperties::new()
                    .set_address_space(AddressSpace::new().set_address_prefixes(["10.0.0.0/16"]))
                    .set_subnets([Subnet::new().set_name("subnet1").set_properties(
                        SubnetProperties::new()
                            .set_address_prefix("10.0.0.0/24")
                            .set_network_security_group(SubResource::new("/nsg1")),
                    )]),
            );
        let got = serde_json::to_value(&input)?;
        let want = json!({
            "name": "vnet1",
            "location": "westus",
            "tags": {"env": "test"},
            "properties": {
                "addressSpace": {"addressPrefixes": ["10.0.0.0/16"]},
                "subnets": [{
                    "name": "subnet1",
                    "properties": {
                        "addressPrefix": "10.0.0.0/24",
                        "networkSecurityGroup": {"id": "/nsg1"}
                    }
                }]
            }
        });
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn deserialize_peering() -> anyhow::Result<()> {
        let got = serde_json::from_value::<VirtualNetworkPeering>(json!({
            "name": "peer1",
            "properties": {
                "allowVirtualNetworkAccess": true,
                "remoteVirtualNetwork": {"id": "/vnet2"},
                "peeringState": "Connected",
                "unknownField": 42
            }
        }))?;
        assert_eq!(got.properties.peering_state, Some(PeeringState::CONNECTED));
        assert_eq!(
            got.properties.remote_virtual_network,
            Some(SubResource::new("/vnet2"))
        );
        assert_eq!(got.properties.allow_forwarded_traffic, None);
        Ok(())
    }
}
