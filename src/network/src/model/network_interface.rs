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

/// A network interface.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct NetworkInterface {
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
    pub properties: NetworkInterfaceProperties,
}

impl NetworkInterface {
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

    pub fn set_properties<T: Into<NetworkInterfaceProperties>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct NetworkInterfaceProperties {
    pub ip_configurations: Vec<NetworkInterfaceIpConfiguration>,
    pub network_security_group: Option<SubResource>,
    pub dns_settings: Option<NetworkInterfaceDnsSettings>,
    #[serde(rename = "enableIPForwarding")]
    pub enable_ip_forwarding: Option<bool>,
    pub enable_accelerated_networking: Option<bool>,
    /// The virtual machine using this network interface, if any.
    #[serde(skip_serializing)]
    pub virtual_machine: Option<SubResource>,
    #[serde(skip_serializing)]
    pub mac_address: Option<String>,
    #[serde(skip_serializing)]
    pub primary: Option<bool>,
    pub resource_guid: Option<String>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl NetworkInterfaceProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ip_configurations<T>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = NetworkInterfaceIpConfiguration>,
    {
        self.ip_configurations = v.into_iter().collect();
        self
    }

    pub fn set_network_security_group<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.network_security_group = Some(v.into());
        self
    }

    pub fn set_dns_settings<T: Into<NetworkInterfaceDnsSettings>>(mut self, v: T) -> Self {
        self.dns_settings = Some(v.into());
        self
    }

    pub fn set_enable_ip_forwarding(mut self, v: bool) -> Self {
        self.enable_ip_forwarding = Some(v);
        self
    }

    pub fn set_enable_accelerated_networking(mut self, v: bool) -> Self {
        self.enable_accelerated_networking = Some(v);
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct NetworkInterfaceDnsSettings {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dns_servers: Vec<String>,
    #[serde(skip_serializing)]
    pub applied_dns_servers: Vec<String>,
    pub internal_dns_name_label: Option<String>,
    #[serde(skip_serializing)]
    pub internal_fqdn: Option<String>,
}

impl NetworkInterfaceDnsSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_dns_servers<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.dns_servers = v.into_iter().map(|v| v.into()).collect();
        self
    }

    pub fn set_internal_dns_name_label<T: Into<String>>(mut self, v: T) -> Self {
        self.internal_dns_name_label = Some(v.into());
        self
    }
}

/// An IP configuration in a network interface.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct NetworkInterfaceIpConfiguration {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,
    pub properties: NetworkInterfaceIpConfigurationProperties,
}

impl NetworkInterfaceIpConfiguration {
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

    pub fn set_properties<T>(mut self, v: T) -> Self
    where
        T: Into<NetworkInterfaceIpConfigurationProperties>,
    {
        self.properties = v.into();
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct NetworkInterfaceIpConfigurationProperties {
    pub primary: Option<bool>,
    #[serde(rename = "privateIPAddress")]
    pub private_ip_address: Option<String>,
    #[serde(rename = "privateIPAllocationMethod")]
    pub private_ip_allocation_method: Option<IpAllocationMethod>,
    #[serde(rename = "privateIPAddressVersion")]
    pub private_ip_address_version: Option<IpVersion>,
    pub subnet: Option<SubResource>,
    #[serde(rename = "publicIPAddress")]
    pub public_ip_address: Option<SubResource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub load_balancer_backend_address_pools: Vec<SubResource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub load_balancer_inbound_nat_rules: Vec<SubResource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub application_gateway_backend_address_pools: Vec<SubResource>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl NetworkInterfaceIpConfigurationProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_primary(mut self, v: bool) -> Self {
        self.primary = Some(v);
        self
    }

    pub fn set_private_ip_address<T: Into<String>>(mut self, v: T) -> Self {
        self.private_ip_address = Some(v.into());
        self
    }

    pub fn set_private_ip_allocation_method<T: Into<IpAllocationMethod>>(mut self, v: T) -> Self {
        self.private_ip_allocation_method = Some(v.into());
        self
    }

    pub fn set_private_ip_address_version<T: Into<IpVersion>>(mut self, v: T) -> Self {
        self.private_ip_address_version = Some(v.into());
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

    pub fn set_load_balancer_backend_address_pools<T>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = SubResource>,
    {
        self.load_balancer_backend_address_pools = v.into_iter().collect();
        self
    }

    pub fn set_load_balancer_inbound_nat_rules<T>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = SubResource>,
    {
        self.load_balancer_inbound_nat_rules = v.into_iter().collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ip_configuration_field_names() -> anyhow::Result<()> {
        let input = NetworkInterfaceIpConfiguration::new()
            .set_name("primary")
            .set_properties(
                NetworkInterfaceIpConfigurationProperties::new()
                    .set_primary(true)
                    .set_private_ip_allocation_method(IpAllocationMethod::STATIC)
                    .set_private_ip_address("10.0.0.4")
                    .set_subnet(SubResource::new("/subnet1"))
                    .set_public_ip_address(SubResource::new("/pip1")),
            );
        let got = serde_json::to_value(&input)?;
        let want = json!({
            "name": "primary",
            "properties": {
                "primary": true,
                "privateIPAllocationMethod": "Static",
                "privateIPAddress": "10.0.0.4",
                "subnet": {"id": "/subnet1"},
                "publicIPAddress": {"id": "/pip1"}
            }
        });
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn interface_field_names() -> anyhow::Result<()> {
        let input = NetworkInterfaceProperties::new()
            .set_enable_ip_forwarding(true)
            .set_dns_settings(NetworkInterfaceDnsSettings::new().set_dns_servers(["10.0.0.10"]));
        let got = serde_json::to_value(&input)?;
        let want = json!({
            "ipConfigurations": [],
            "enableIPForwarding": true,
            "dnsSettings": {"dnsServers": ["10.0.0.10"]}
        });
        assert_eq!(got, want);
        Ok(())
    }
}
