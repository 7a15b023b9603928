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
    LoadBalancerSkuName {
        BASIC = "Basic",
        STANDARD = "Standard",
    }
}

string_enum! {
    /// The protocol used by load balancer probes.
    ProbeProtocol {
        TCP = "Tcp",
        HTTP = "Http",
        HTTPS = "Https",
    }
}

string_enum! {
    /// How a load balancing rule distributes new connections.
    LoadDistribution {
        DEFAULT = "Default",
        SOURCE_IP = "SourceIP",
        SOURCE_IP_PROTOCOL = "SourceIPProtocol",
    }
}

/// A load balancer.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct LoadBalancer {
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<LoadBalancerSku>,
    pub properties: LoadBalancerProperties,
}

impl LoadBalancer {
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

    pub fn set_sku<T: Into<LoadBalancerSku>>(mut self, v: T) -> Self {
        self.sku = Some(v.into());
        self
    }

    pub fn set_properties<T: Into<LoadBalancerProperties>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct LoadBalancerSku {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<LoadBalancerSkuName>,
}

impl std::convert::From<LoadBalancerSkuName> for LoadBalancerSku {
    fn from(value: LoadBalancerSkuName) -> Self {
        Self { name: Some(value) }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct LoadBalancerProperties {
    #[serde(rename = "frontendIPConfigurations")]
    pub frontend_ip_configurations: Vec<FrontendIpConfiguration>,
    pub backend_address_pools: Vec<BackendAddressPool>,
    pub probes: Vec<Probe>,
    pub load_balancing_rules: Vec<LoadBalancingRule>,
    pub inbound_nat_rules: Vec<InboundNatRule>,
    pub inbound_nat_pools: Vec<InboundNatPool>,
    pub resource_guid: Option<String>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl LoadBalancerProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_frontend_ip_configurations<T>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = FrontendIpConfiguration>,
    {
        self.frontend_ip_configurations = v.into_iter().collect();
        self
    }

    pub fn set_backend_address_pools<T: IntoIterator<Item = BackendAddressPool>>(
        mut self,
        v: T,
    ) -> Self {
        self.backend_address_pools = v.into_iter().collect();
        self
    }

    pub fn set_probes<T: IntoIterator<Item = Probe>>(mut self, v: T) -> Self {
        self.probes = v.into_iter().collect();
        self
    }

    pub fn set_load_balancing_rules<T: IntoIterator<Item = LoadBalancingRule>>(
        mut self,
        v: T,
    ) -> Self {
        self.load_balancing_rules = v.into_iter().collect();
        self
    }

    pub fn set_inbound_nat_rules<T: IntoIterator<Item = InboundNatRule>>(mut self, v: T) -> Self {
        self.inbound_nat_rules = v.into_iter().collect();
        self
    }

    pub fn set_inbound_nat_pools<T: IntoIterator<Item = InboundNatPool>>(mut self, v: T) -> Self {
        self.inbound_nat_pools = v.into_iter().collect();
        self
    }
}

/// A frontend IP configuration.
///
/// Public frontends reference a public IP address, private frontends
/// reference a subnet.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct FrontendIpConfiguration {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<String>,
    pub properties: FrontendIpConfigurationProperties,
}

impl FrontendIpConfiguration {
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

    pub fn set_properties<T: Into<FrontendIpConfigurationProperties>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct FrontendIpConfigurationProperties {
    #[serde(rename = "privateIPAddress")]
    pub private_ip_address: Option<String>,
    #[serde(rename = "privateIPAllocationMethod")]
    pub private_ip_allocation_method: Option<IpAllocationMethod>,
    pub subnet: Option<SubResource>,
    #[serde(rename = "publicIPAddress")]
    pub public_ip_address: Option<SubResource>,
    #[serde(skip_serializing)]
    pub load_balancing_rules: Vec<SubResource>,
    #[serde(skip_serializing)]
    pub inbound_nat_rules: Vec<SubResource>,
    #[serde(skip_serializing)]
    pub inbound_nat_pools: Vec<SubResource>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl FrontendIpConfigurationProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_private_ip_address<T: Into<String>>(mut self, v: T) -> Self {
        self.private_ip_address = Some(v.into());
        self
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

/// A pool of backend addresses.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct BackendAddressPool {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,
    pub properties: BackendAddressPoolProperties,
}

impl BackendAddressPool {
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
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct BackendAddressPoolProperties {
    /// The NIC IP configurations in this pool. Set by associating the NICs.
    #[serde(skip_serializing)]
    pub backend_ip_configurations: Vec<SubResource>,
    #[serde(skip_serializing)]
    pub load_balancing_rules: Vec<SubResource>,
    pub provisioning_state: Option<ProvisioningState>,
}

/// A health probe.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Probe {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,
    pub properties: ProbeProperties,
}

impl Probe {
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

    pub fn set_properties<T: Into<ProbeProperties>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ProbeProperties {
    pub protocol: Option<ProbeProtocol>,
    pub port: Option<i32>,
    pub interval_in_seconds: Option<i32>,
    pub number_of_probes: Option<i32>,
    /// Required for `Http` probes, not allowed for `Tcp` probes.
    pub request_path: Option<String>,
    #[serde(skip_serializing)]
    pub load_balancing_rules: Vec<SubResource>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl ProbeProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_protocol<T: Into<ProbeProtocol>>(mut self, v: T) -> Self {
        self.protocol = Some(v.into());
        self
    }

    pub fn set_port(mut self, v: i32) -> Self {
        self.port = Some(v);
        self
    }

    pub fn set_interval_in_seconds(mut self, v: i32) -> Self {
        self.interval_in_seconds = Some(v);
        self
    }

    pub fn set_number_of_probes(mut self, v: i32) -> Self {
        self.number_of_probes = Some(v);
        self
    }

    pub fn set_request_path<T: Into<String>>(mut self, v: T) -> Self {
        self.request_path = Some(v.into());
        self
    }
}

/// A load balancing rule.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct LoadBalancingRule {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,
    pub properties: LoadBalancingRuleProperties,
}

impl LoadBalancingRule {
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

    pub fn set_properties<T: Into<LoadBalancingRuleProperties>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct LoadBalancingRuleProperties {
    #[serde(rename = "frontendIPConfiguration")]
    pub frontend_ip_configuration: Option<SubResource>,
    pub backend_address_pool: Option<SubResource>,
    pub probe: Option<SubResource>,
    pub protocol: Option<TransportProtocol>,
    pub frontend_port: Option<i32>,
    pub backend_port: Option<i32>,
    pub idle_timeout_in_minutes: Option<i32>,
    #[serde(rename = "enableFloatingIP")]
    pub enable_floating_ip: Option<bool>,
    pub load_distribution: Option<LoadDistribution>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl LoadBalancingRuleProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_frontend_ip_configuration<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.frontend_ip_configuration = Some(v.into());
        self
    }

    pub fn set_backend_address_pool<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.backend_address_pool = Some(v.into());
        self
    }

    pub fn set_probe<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.probe = Some(v.into());
        self
    }

    pub fn set_protocol<T: Into<TransportProtocol>>(mut self, v: T) -> Self {
        self.protocol = Some(v.into());
        self
    }

    pub fn set_frontend_port(mut self, v: i32) -> Self {
        self.frontend_port = Some(v);
        self
    }

    pub fn set_backend_port(mut self, v: i32) -> Self {
        self.backend_port = Some(v);
        self
    }

    pub fn set_idle_timeout_in_minutes(mut self, v: i32) -> Self {
        self.idle_timeout_in_minutes = Some(v);
        self
    }

    pub fn set_enable_floating_ip(mut self, v: bool) -> Self {
        self.enable_floating_ip = Some(v);
        self
    }

    pub fn set_load_distribution<T: Into<LoadDistribution>>(mut self, v: T) -> Self {
        self.load_distribution = Some(v.into());
        self
    }
}

/// An inbound NAT rule, forwarding a frontend port to a single backend NIC.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct InboundNatRule {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,
    pub properties: InboundNatRuleProperties,
}

impl InboundNatRule {
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

    pub fn set_properties<T: Into<InboundNatRuleProperties>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct InboundNatRuleProperties {
    #[serde(rename = "frontendIPConfiguration")]
    pub frontend_ip_configuration: Option<SubResource>,
    /// The NIC IP configuration receiving the traffic.
    #[serde(rename = "backendIPConfiguration", skip_serializing)]
    pub backend_ip_configuration: Option<SubResource>,
    pub protocol: Option<TransportProtocol>,
    pub frontend_port: Option<i32>,
    pub backend_port: Option<i32>,
    pub idle_timeout_in_minutes: Option<i32>,
    #[serde(rename = "enableFloatingIP")]
    pub enable_floating_ip: Option<bool>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl InboundNatRuleProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_frontend_ip_configuration<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.frontend_ip_configuration = Some(v.into());
        self
    }

    pub fn set_protocol<T: Into<TransportProtocol>>(mut self, v: T) -> Self {
        self.protocol = Some(v.into());
        self
    }

    pub fn set_frontend_port(mut self, v: i32) -> Self {
        self.frontend_port = Some(v);
        self
    }

    pub fn set_backend_port(mut self, v: i32) -> Self {
        self.backend_port = Some(v);
        self
    }

    pub fn set_idle_timeout_in_minutes(mut self, v: i32) -> Self {
        self.idle_timeout_in_minutes = Some(v);
        self
    }

    pub fn set_enable_floating_ip(mut self, v: bool) -> Self {
        self.enable_floating_ip = Some(v);
        self
    }
}

/// An inbound NAT pool, used by scale sets to create NAT rules per instance.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct InboundNatPool {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,
    pub properties: InboundNatPoolProperties,
}

impl InboundNatPool {
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

    pub fn set_properties<T: Into<InboundNatPoolProperties>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct InboundNatPoolProperties {
    #[serde(rename = "frontendIPConfiguration")]
    pub frontend_ip_configuration: Option<SubResource>,
    pub protocol: Option<TransportProtocol>,
    pub frontend_port_range_start: Option<i32>,
    pub frontend_port_range_end: Option<i32>,
    pub backend_port: Option<i32>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl InboundNatPoolProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_frontend_ip_configuration<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.frontend_ip_configuration = Some(v.into());
        self
    }

    pub fn set_protocol<T: Into<TransportProtocol>>(mut self, v: T) -> Self {
        self.protocol = Some(v.into());
        self
    }

    pub fn set_frontend_port_range(mut self, start: i32, end: i32) -> Self {
        self.frontend_port_range_start = Some(start);
        self.frontend_port_range_end = Some(end);
        self
    }

    pub fn set_backend_port(mut self, v: i32) -> Self {
        self.backend_port = Some(v);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rule_field_names() -> anyhow::Result<()> {
        let input = LoadBalancingRuleProperties::new()
            .set_frontend_ip_configuration(SubResource::new("/fe"))
            .set_backend_address_pool(SubResource::new("/be"))
            .set_protocol(TransportProtocol::TCP)
            .set_frontend_port(80)
            .set_backend_port(8080)
            .set_enable_floating_ip(false)
            .set_load_distribution(LoadDistribution::SOURCE_IP);
        let got = serde_json::to_value(&input)?;
        let want = json!({
            "frontendIPConfiguration": {"id": "/fe"},
            "backendAddressPool": {"id": "/be"},
            "protocol": "Tcp",
            "frontendPort": 80,
            "backendPort": 8080,
            "enableFloatingIP": false,
            "loadDistribution": "SourceIP"
        });
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn nat_pool_range() -> anyhow::Result<()> {
        let input = InboundNatPoolProperties::new()
            .set_protocol(TransportProtocol::TCP)
            .set_frontend_port_range(5000, 5099)
            .set_backend_port(22);
        let got = serde_json::to_value(&input)?;
        let want = json!({
            "protocol": "Tcp",
            "frontendPortRangeStart": 5000,
            "frontendPortRangeEnd": 5099,
            "backendPort": 22
        });
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn frontend_output_only() -> anyhow::Result<()> {
        let got = serde_json::from_value::<LoadBalancer>(json!({
            "sku": {"name": "Standard"},
            "properties": {
                "frontendIPConfigurations": [{
                    "name": "default",
                    "properties": {
                        "publicIPAddress": {"id": "/pip1"},
                        "loadBalancingRules": [{"id": "/rule1"}]
                    }
                }]
            }
        }))?;
        let frontend = &got.properties.frontend_ip_configurations[0];
        assert_eq!(frontend.properties.load_balancing_rules.len(), 1);
        assert_eq!(
            got.sku.as_ref().and_then(|s| s.name.clone()),
            Some(LoadBalancerSkuName::STANDARD)
        );
        let sent = serde_json::to_value(frontend)?;
        assert_eq!(
            sent,
            json!({"name": "default", "properties": {"publicIPAddress": {"id": "/pip1"}}})
        );
        Ok(())
    }
}
