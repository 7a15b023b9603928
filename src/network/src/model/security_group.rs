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
    /// The protocols matched by a security rule.
    SecurityRuleProtocol {
        TCP = "Tcp",
        UDP = "Udp",
        ICMP = "Icmp",
        ANY = "*",
    }
}

/// A network security group.
///
/// Security groups contain rules that allow or deny traffic to the subnets
/// and network interfaces associated with the group.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct NetworkSecurityGroup {
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
    pub properties: NetworkSecurityGroupProperties,
}

impl NetworkSecurityGroup {
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

    pub fn set_properties<T: Into<NetworkSecurityGroupProperties>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct NetworkSecurityGroupProperties {
    pub security_rules: Vec<SecurityRule>,
    /// The rules created by the service, which cannot be changed.
    #[serde(skip_serializing)]
    pub default_security_rules: Vec<SecurityRule>,
    #[serde(skip_serializing)]
    pub network_interfaces: Vec<SubResource>,
    #[serde(skip_serializing)]
    pub subnets: Vec<SubResource>,
    pub resource_guid: Option<String>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl NetworkSecurityGroupProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_security_rules<T: IntoIterator<Item = SecurityRule>>(mut self, v: T) -> Self {
        self.security_rules = v.into_iter().collect();
        self
    }
}

/// A rule in a network security group.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct SecurityRule {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub etag: String,
    pub properties: SecurityRuleProperties,
}

impl SecurityRule {
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

    pub fn set_properties<T: Into<SecurityRuleProperties>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }
}

/// The properties of a security rule.
///
/// Address and port ranges accept `*` to match any value.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct SecurityRuleProperties {
    pub description: Option<String>,
    pub protocol: Option<SecurityRuleProtocol>,
    pub source_port_range: Option<String>,
    pub destination_port_range: Option<String>,
    pub source_address_prefix: Option<String>,
    pub destination_address_prefix: Option<String>,
    pub access: Option<Access>,
    /// Rules are evaluated in priority order, lower values first.
    pub priority: Option<i32>,
    pub direction: Option<Direction>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl SecurityRuleProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_description<T: Into<String>>(mut self, v: T) -> Self {
        self.description = Some(v.into());
        self
    }

    pub fn set_protocol<T: Into<SecurityRuleProtocol>>(mut self, v: T) -> Self {
        self.protocol = Some(v.into());
        self
    }

    pub fn set_source_port_range<T: Into<String>>(mut self, v: T) -> Self {
        self.source_port_range = Some(v.into());
        self
    }

    pub fn set_destination_port_range<T: Into<String>>(mut self, v: T) -> Self {
        self.destination_port_range = Some(v.into());
        self
    }

    pub fn set_source_address_prefix<T: Into<String>>(mut self, v: T) -> Self {
        self.source_address_prefix = Some(v.into());
        self
    }

    pub fn set_destination_address_prefix<T: Into<String>>(mut self, v: T) -> Self {
        self.destination_address_prefix = Some(v.into());
        self
    }

    pub fn set_access<T: Into<Access>>(mut self, v: T) -> Self {
        self.access = Some(v.into());
        self
    }

    pub fn set_priority(mut self, v: i32) -> Self {
        self.priority = Some(v);
        self
    }

    pub fn set_direction<T: Into<Direction>>(mut self, v: T) -> Self {
        self.direction = Some(v.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rule_field_names() -> anyhow::Result<()> {
        let input = SecurityRule::new().set_name("allow-http").set_properties(
            SecurityRuleProperties::new()
                .set_access(Access::ALLOW)
                .set_direction(Direction::INBOUND)
                .set_protocol(SecurityRuleProtocol::ANY)
                .set_source_address_prefix("*")
                .set_destination_port_range("80")
                .set_priority(100),
        );
        let got = serde_json::to_value(&input)?;
        let want = json!({
            "name": "allow-http",
            "properties": {
                "access": "Allow",
                "direction": "Inbound",
                "protocol": "*",
                "sourceAddressPrefix": "*",
                "destinationPortRange": "80",
                "priority": 100
            }
        });
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn default_rules_are_output_only() -> anyhow::Result<()> {
        let got = serde_json::from_value::<NetworkSecurityGroup>(json!({
            "name": "nsg1",
            "properties": {
                "defaultSecurityRules": [{"name": "AllowVnetInBound"}],
                "subnets": [{"id": "/subnet1"}]
            }
        }))?;
        assert_eq!(got.properties.default_security_rules.len(), 1);
        assert_eq!(got.properties.subnets, vec![SubResource::new("/subnet1")]);
        let sent = serde_json::to_value(&got)?;
        assert_eq!(sent, json!({"name": "nsg1", "properties": {"securityRules": []}}));
        Ok(())
    }
}
