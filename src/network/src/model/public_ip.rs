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
    PublicIpAddressSkuName {
        BASIC = "Basic",
        STANDARD = "Standard",
    }
}

/// A public IP address.
///
/// Dynamic addresses are assigned when the address is associated with a
/// running resource. Static addresses are assigned on creation.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PublicIpAddress {
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
    pub sku: Option<PublicIpAddressSku>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<String>,
    pub properties: PublicIpAddressProperties,
}

impl PublicIpAddress {
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

    pub fn set_sku<T: Into<PublicIpAddressSku>>(mut self, v: T) -> Self {
        self.sku = Some(v.into());
        self
    }

    pub fn set_properties<T: Into<PublicIpAddressProperties>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PublicIpAddressSku {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<PublicIpAddressSkuName>,
}

impl PublicIpAddressSku {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name<T: Into<PublicIpAddressSkuName>>(mut self, v: T) -> Self {
        self.name = Some(v.into());
        self
    }
}

impl std::convert::From<PublicIpAddressSkuName> for PublicIpAddressSku {
    fn from(value: PublicIpAddressSkuName) -> Self {
        Self::new().set_name(value)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PublicIpAddressProperties {
    #[serde(rename = "publicIPAllocationMethod")]
    pub public_ip_allocation_method: Option<IpAllocationMethod>,
    #[serde(rename = "publicIPAddressVersion")]
    pub public_ip_address_version: Option<IpVersion>,
    pub dns_settings: Option<PublicIpAddressDnsSettings>,
    /// The assigned address. Empty for dynamic addresses not in use.
    pub ip_address: Option<String>,
    pub idle_timeout_in_minutes: Option<i32>,
    /// The IP configuration this address is associated with.
    #[serde(skip_serializing)]
    pub ip_configuration: Option<SubResource>,
    pub resource_guid: Option<String>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl PublicIpAddressProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_public_ip_allocation_method<T: Into<IpAllocationMethod>>(mut self, v: T) -> Self {
        self.public_ip_allocation_method = Some(v.into());
        self
    }

    pub fn set_public_ip_address_version<T: Into<IpVersion>>(mut self, v: T) -> Self {
        self.public_ip_address_version = Some(v.into());
        self
    }

    pub fn set_dns_settings<T: Into<PublicIpAddressDnsSettings>>(mut self, v: T) -> Self {
        self.dns_settings = Some(v.into());
        self
    }

    pub fn set_ip_address<T: Into<String>>(mut self, v: T) -> Self {
        self.ip_address = Some(v.into());
        self
    }

    pub fn set_idle_timeout_in_minutes(mut self, v: i32) -> Self {
        self.idle_timeout_in_minutes = Some(v);
        self
    }

    pub fn set_ip_configuration<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.ip_configuration = Some(v.into());
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PublicIpAddressDnsSettings {
    /// The leaf label, combined with the regional domain to form the FQDN.
    pub domain_name_label: Option<String>,
    #[serde(skip_serializing)]
    pub fqdn: Option<String>,
    pub reverse_fqdn: Option<String>,
}

impl PublicIpAddressDnsSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_domain_name_label<T: Into<String>>(mut self, v: T) -> Self {
        self.domain_name_label = Some(v.into());
        self
    }

    pub fn set_fqdn<T: Into<String>>(mut self, v: T) -> Self {
        self.fqdn = Some(v.into());
        self
    }

    pub fn set_reverse_fqdn<T: Into<String>>(mut self, v: T) -> Self {
        self.reverse_fqdn = Some(v.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_names() -> anyhow::Result<()> {
        let input = PublicIpAddress::new()
            .set_location("eastus")
            .set_sku(PublicIpAddressSkuName::STANDARD)
            .set_properties(
                PublicIpAddressProperties::new()
                    .set_public_ip_allocation_method(IpAllocationMethod::STATIC)
                    .set_idle_timeout_in_minutes(10)
                    .set_dns_settings(PublicIpAddressDnsSettings::new().set_domain_name_label("app1")),
            );
        let got = serde_json::to_value(&input)?;
        let want = json!({
            "location": "eastus",
            "sku": {"name": "Standard"},
            "properties": {
                "publicIPAllocationMethod": "Static",
                "idleTimeoutInMinutes": 10,
                "dnsSettings": {"domainNameLabel": "app1"}
            }
        });
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn read_only_fields() -> anyhow::Result<()> {
        let got = serde_json::from_value::<PublicIpAddress>(json!({
            "properties": {
                "ipAddress": "20.1.2.3",
                "dnsSettings": {"domainNameLabel": "app1", "fqdn": "app1.eastus.cloudapp.test"},
                "ipConfiguration": {"id": "/nic1/ipConfigurations/primary"}
            }
        }))?;
        let fqdn = got
            .properties
            .dns_settings
            .as_ref()
            .and_then(|d| d.fqdn.as_deref());
        assert_eq!(fqdn, Some("app1.eastus.cloudapp.test"));
        assert_eq!(got.properties.ip_address.as_deref(), Some("20.1.2.3"));
        let sent = serde_json::to_value(&got)?;
        assert!(sent["properties"].get("ipConfiguration").is_none(), "{sent}");
        Ok(())
    }
}
