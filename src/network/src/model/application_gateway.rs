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
    /// The size of an application gateway.
    ApplicationGatewaySkuName {
        STANDARD_SMALL = "Standard_Small",
        STANDARD_MEDIUM = "Standard_Medium",
        STANDARD_LARGE = "Standard_Large",
        WAF_MEDIUM = "WAF_Medium",
        WAF_LARGE = "WAF_Large",
        STANDARD_V2 = "Standard_v2",
        WAF_V2 = "WAF_v2",
    }
}

string_enum! {
    ApplicationGatewayTier {
        STANDARD = "Standard",
        WAF = "WAF",
        STANDARD_V2 = "Standard_v2",
        WAF_V2 = "WAF_v2",
    }
}

string_enum! {
    /// The state of the gateway, changed by the `start` and `stop` actions.
    ApplicationGatewayOperationalState {
        STOPPED = "Stopped",
        STARTING = "Starting",
        RUNNING = "Running",
        STOPPING = "Stopping",
    }
}

string_enum! {
    ApplicationGatewayProtocol {
        HTTP = "Http",
        HTTPS = "Https",
    }
}

string_enum! {
    CookieBasedAffinity {
        ENABLED = "Enabled",
        DISABLED = "Disabled",
    }
}

string_enum! {
    RequestRoutingRuleType {
        BASIC = "Basic",
        PATH_BASED_ROUTING = "PathBasedRouting",
    }
}

/// An application gateway, a layer 7 load balancer.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ApplicationGateway {
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
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<String>,
    pub properties: ApplicationGatewayProperties,
}

impl ApplicationGateway {
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

    pub fn set_properties<T: Into<ApplicationGatewayProperties>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ApplicationGatewayProperties {
    pub sku: Option<ApplicationGatewaySku>,
    #[serde(rename = "gatewayIPConfigurations")]
    pub gateway_ip_configurations: Vec<ApplicationGatewayIpConfiguration>,
    pub ssl_certificates: Vec<ApplicationGatewaySslCertificate>,
    #[serde(rename = "frontendIPConfigurations")]
    pub frontend_ip_configurations: Vec<ApplicationGatewayFrontendIpConfiguration>,
    pub frontend_ports: Vec<ApplicationGatewayFrontendPort>,
    pub probes: Vec<ApplicationGatewayProbe>,
    pub backend_address_pools: Vec<ApplicationGatewayBackendAddressPool>,
    pub backend_http_settings_collection: Vec<ApplicationGatewayBackendHttpSettings>,
    pub http_listeners: Vec<ApplicationGatewayHttpListener>,
    pub request_routing_rules: Vec<ApplicationGatewayRequestRoutingRule>,
    #[serde(skip_serializing)]
    pub operational_state: Option<ApplicationGatewayOperationalState>,
    pub resource_guid: Option<String>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl ApplicationGatewayProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_sku<T: Into<ApplicationGatewaySku>>(mut self, v: T) -> Self {
        self.sku = Some(v.into());
        self
    }

    pub fn set_gateway_ip_configurations<T>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = ApplicationGatewayIpConfiguration>,
    {
        self.gateway_ip_configurations = v.into_iter().collect();
        self
    }

    pub fn set_frontend_ip_configurations<T>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = ApplicationGatewayFrontendIpConfiguration>,
    {
        self.frontend_ip_configurations = v.into_iter().collect();
        self
    }

    pub fn set_frontend_ports<T>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = ApplicationGatewayFrontendPort>,
    {
        self.frontend_ports = v.into_iter().collect();
        self
    }

    pub fn set_backend_address_pools<T>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = ApplicationGatewayBackendAddressPool>,
    {
        self.backend_address_pools = v.into_iter().collect();
        self
    }

    pub fn set_backend_http_settings_collection<T>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = ApplicationGatewayBackendHttpSettings>,
    {
        self.backend_http_settings_collection = v.into_iter().collect();
        self
    }

    pub fn set_http_listeners<T>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = ApplicationGatewayHttpListener>,
    {
        self.http_listeners = v.into_iter().collect();
        self
    }

    pub fn set_request_routing_rules<T>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = ApplicationGatewayRequestRoutingRule>,
    {
        self.request_routing_rules = v.into_iter().collect();
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ApplicationGatewaySku {
    pub name: Option<ApplicationGatewaySkuName>,
    pub tier: Option<ApplicationGatewayTier>,
    /// The number of instances.
    pub capacity: Option<i32>,
}

impl ApplicationGatewaySku {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name<T: Into<ApplicationGatewaySkuName>>(mut self, v: T) -> Self {
        self.name = Some(v.into());
        self
    }

    pub fn set_tier<T: Into<ApplicationGatewayTier>>(mut self, v: T) -> Self {
        self.tier = Some(v.into());
        self
    }

    pub fn set_capacity(mut self, v: i32) -> Self {
        self.capacity = Some(v);
        self
    }
}

child_resource!(
    /// The subnet where the gateway instances are deployed.
    ApplicationGatewayIpConfiguration,
    ApplicationGatewayIpConfigurationProperties
);

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ApplicationGatewayIpConfigurationProperties {
    pub subnet: Option<SubResource>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl ApplicationGatewayIpConfigurationProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_subnet<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.subnet = Some(v.into());
        self
    }
}

child_resource!(
    ApplicationGatewayFrontendIpConfiguration,
    ApplicationGatewayFrontendIpConfigurationProperties
);

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ApplicationGatewayFrontendIpConfigurationProperties {
    #[serde(rename = "privateIPAddress")]
    pub private_ip_address: Option<String>,
    #[serde(rename = "privateIPAllocationMethod")]
    pub private_ip_allocation_method: Option<IpAllocationMethod>,
    pub subnet: Option<SubResource>,
    #[serde(rename = "publicIPAddress")]
    pub public_ip_address: Option<SubResource>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl ApplicationGatewayFrontendIpConfigurationProperties {
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

child_resource!(
    ApplicationGatewayFrontendPort,
    ApplicationGatewayFrontendPortProperties
);

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ApplicationGatewayFrontendPortProperties {
    pub port: Option<i32>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl ApplicationGatewayFrontendPortProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_port(mut self, v: i32) -> Self {
        self.port = Some(v);
        self
    }
}

child_resource!(
    ApplicationGatewayBackendAddressPool,
    ApplicationGatewayBackendAddressPoolProperties
);

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ApplicationGatewayBackendAddressPoolProperties {
    pub backend_addresses: Vec<ApplicationGatewayBackendAddress>,
    #[serde(rename = "backendIPConfigurations", skip_serializing)]
    pub backend_ip_configurations: Vec<SubResource>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl ApplicationGatewayBackendAddressPoolProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_backend_addresses<T>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = ApplicationGatewayBackendAddress>,
    {
        self.backend_addresses = v.into_iter().collect();
        self
    }
}

/// A backend address, either an IP address or a fully qualified domain name.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ApplicationGatewayBackendAddress {
    pub fqdn: Option<String>,
    pub ip_address: Option<String>,
}

impl ApplicationGatewayBackendAddress {
    pub fn from_fqdn<T: Into<String>>(fqdn: T) -> Self {
        Self {
            fqdn: Some(fqdn.into()),
            ip_address: None,
        }
    }

    pub fn from_ip_address<T: Into<String>>(ip_address: T) -> Self {
        Self {
            fqdn: None,
            ip_address: Some(ip_address.into()),
        }
    }
}

child_resource!(
    /// How the gateway connects to the backends.
    ApplicationGatewayBackendHttpSettings,
    ApplicationGatewayBackendHttpSettingsProperties
);

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ApplicationGatewayBackendHttpSettingsProperties {
    pub port: Option<i32>,
    pub protocol: Option<ApplicationGatewayProtocol>,
    pub cookie_based_affinity: Option<CookieBasedAffinity>,
    pub affinity_cookie_name: Option<String>,
    /// In seconds.
    pub request_timeout: Option<i32>,
    pub probe: Option<SubResource>,
    pub host_name: Option<String>,
    pub pick_host_name_from_backend_address: Option<bool>,
    pub path: Option<String>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl ApplicationGatewayBackendHttpSettingsProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_port(mut self, v: i32) -> Self {
        self.port = Some(v);
        self
    }

    pub fn set_protocol<T: Into<ApplicationGatewayProtocol>>(mut self, v: T) -> Self {
        self.protocol = Some(v.into());
        self
    }

    pub fn set_cookie_based_affinity<T: Into<CookieBasedAffinity>>(mut self, v: T) -> Self {
        self.cookie_based_affinity = Some(v.into());
        self
    }

    pub fn set_affinity_cookie_name<T: Into<String>>(mut self, v: T) -> Self {
        self.affinity_cookie_name = Some(v.into());
        self
    }

    pub fn set_request_timeout(mut self, v: i32) -> Self {
        self.request_timeout = Some(v);
        self
    }

    pub fn set_probe<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.probe = Some(v.into());
        self
    }

    pub fn set_host_name<T: Into<String>>(mut self, v: T) -> Self {
        self.host_name = Some(v.into());
        self
    }

    pub fn set_pick_host_name_from_backend_address(mut self, v: bool) -> Self {
        self.pick_host_name_from_backend_address = Some(v);
        self
    }

    pub fn set_path<T: Into<String>>(mut self, v: T) -> Self {
        self.path = Some(v.into());
        self
    }
}

child_resource!(
    ApplicationGatewayHttpListener,
    ApplicationGatewayHttpListenerProperties
);

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ApplicationGatewayHttpListenerProperties {
    #[serde(rename = "frontendIPConfiguration")]
    pub frontend_ip_configuration: Option<SubResource>,
    pub frontend_port: Option<SubResource>,
    pub protocol: Option<ApplicationGatewayProtocol>,
    pub host_name: Option<String>,
    /// Required for `Https` listeners.
    pub ssl_certificate: Option<SubResource>,
    pub require_server_name_indication: Option<bool>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl ApplicationGatewayHttpListenerProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_frontend_ip_configuration<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.frontend_ip_configuration = Some(v.into());
        self
    }

    pub fn set_frontend_port<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.frontend_port = Some(v.into());
        self
    }

    pub fn set_protocol<T: Into<ApplicationGatewayProtocol>>(mut self, v: T) -> Self {
        self.protocol = Some(v.into());
        self
    }

    pub fn set_host_name<T: Into<String>>(mut self, v: T) -> Self {
        self.host_name = Some(v.into());
        self
    }

    pub fn set_ssl_certificate<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.ssl_certificate = Some(v.into());
        self
    }

    pub fn set_require_server_name_indication(mut self, v: bool) -> Self {
        self.require_server_name_indication = Some(v);
        self
    }
}

child_resource!(
    /// Routes the traffic received by a listener to a backend.
    ApplicationGatewayRequestRoutingRule,
    ApplicationGatewayRequestRoutingRuleProperties
);

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ApplicationGatewayRequestRoutingRuleProperties {
    pub rule_type: Option<RequestRoutingRuleType>,
    pub priority: Option<i32>,
    pub http_listener: Option<SubResource>,
    pub backend_address_pool: Option<SubResource>,
    pub backend_http_settings: Option<SubResource>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl ApplicationGatewayRequestRoutingRuleProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rule_type<T: Into<RequestRoutingRuleType>>(mut self, v: T) -> Self {
        self.rule_type = Some(v.into());
        self
    }

    pub fn set_priority(mut self, v: i32) -> Self {
        self.priority = Some(v);
        self
    }

    pub fn set_http_listener<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.http_listener = Some(v.into());
        self
    }

    pub fn set_backend_address_pool<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.backend_address_pool = Some(v.into());
        self
    }

    pub fn set_backend_http_settings<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.backend_http_settings = Some(v.into());
        self
    }
}

child_resource!(
    ApplicationGatewaySslCertificate,
    ApplicationGatewaySslCertificateProperties
);

/// The properties of an SSL certificate.
///
/// The certificate is uploaded as base64-encoded PFX `data` with its
/// `password`. The service returns the public part in `public_cert_data`.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ApplicationGatewaySslCertificateProperties {
    pub data: Option<String>,
    pub password: Option<String>,
    #[serde(skip_serializing)]
    pub public_cert_data: Option<String>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl ApplicationGatewaySslCertificateProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data<T: Into<String>>(mut self, v: T) -> Self {
        self.data = Some(v.into());
        self
    }

    pub fn set_password<T: Into<String>>(mut self, v: T) -> Self {
        self.password = Some(v.into());
        self
    }
}

child_resource!(ApplicationGatewayProbe, ApplicationGatewayProbeProperties);

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct ApplicationGatewayProbeProperties {
    pub protocol: Option<ApplicationGatewayProtocol>,
    pub host: Option<String>,
    pub path: Option<String>,
    /// In seconds.
    pub interval: Option<i32>,
    /// In seconds.
    pub timeout: Option<i32>,
    pub unhealthy_threshold: Option<i32>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl ApplicationGatewayProbeProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_protocol<T: Into<ApplicationGatewayProtocol>>(mut self, v: T) -> Self {
        self.protocol = Some(v.into());
        self
    }

    pub fn set_host<T: Into<String>>(mut self, v: T) -> Self {
        self.host = Some(v.into());
        self
    }

    pub fn set_path<T: Into<String>>(mut self, v: T) -> Self {
        self.path = Some(v.into());
        self
    }

    pub fn set_interval(mut self, v: i32) -> Self {
        self.interval = Some(v);
        self
    }

    pub fn set_timeout(mut self, v: i32) -> Self {
        self.timeout = Some(v);
        self
    }

    pub fn set_unhealthy_threshold(mut self, v: i32) -> Self {
        self.unhealthy_threshold = Some(v);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_names() -> anyhow::Result<()> {
        let input = ApplicationGatewayProperties::new()
            .set_sku(
                ApplicationGatewaySku::new()
                    .set_name(ApplicationGatewaySkuName::STANDARD_SMALL)
                    .set_tier(ApplicationGatewayTier::STANDARD)
                    .set_capacity(1),
            )
            .set_frontend_ports([ApplicationGatewayFrontendPort::new()
                .set_name("port80")
                .set_properties(ApplicationGatewayFrontendPortProperties::new().set_port(80))])
            .set_backend_address_pools([ApplicationGatewayBackendAddressPool::new()
                .set_name("backend1")
                .set_properties(
                    ApplicationGatewayBackendAddressPoolProperties::new().set_backend_addresses([
                        ApplicationGatewayBackendAddress::from_ip_address("11.1.1.1"),
                        ApplicationGatewayBackendAddress::from_fqdn("www.example.com"),
                    ]),
                )]);
        let got = serde_json::to_value(&input)?;
        let want = json!({
            "sku": {"name": "Standard_Small", "tier": "Standard", "capacity": 1},
            "gatewayIPConfigurations": [],
            "sslCertificates": [],
            "frontendIPConfigurations": [],
            "frontendPorts": [{"name": "port80", "properties": {"port": 80}}],
            "probes": [],
            "backendAddressPools": [{
                "name": "backend1",
                "properties": {"backendAddresses": [
                    {"ipAddress": "11.1.1.1"},
                    {"fqdn": "www.example.com"}
                ]}
            }],
            "backendHttpSettingsCollection": [],
            "httpListeners": [],
            "requestRoutingRules": []
        });
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn operational_state() -> anyhow::Result<()> {
        let got = serde_json::from_value::<ApplicationGateway>(json!({
            "name": "appgw1",
            "properties": {"operationalState": "Running", "provisioningState": "Succeeded"}
        }))?;
        assert_eq!(
            got.properties.operational_state,
            Some(ApplicationGatewayOperationalState::RUNNING)
        );
        let sent = serde_json::to_value(&got)?;
        assert!(sent["properties"].get("operationalState").is_none(), "{sent}");
        Ok(())
    }
}
