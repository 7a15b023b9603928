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

/// The local network gateways in a subscription.
pub type LocalNetworkGateways = Collection<LocalNetworkGateway>;

/// A local network gateway, the on-premises side of a site-to-site
/// connection.
#[derive(Clone, Debug)]
pub struct LocalNetworkGateway {
    manager: NetworkManager,
    inner: crate::model::LocalNetworkGateway,
}

wrapper!(
    LocalNetworkGateway,
    crate::model::LocalNetworkGateway,
    local_network_gateways
);

impl LocalNetworkGateway {
    /// The public IP address of the on-premises VPN device.
    pub fn ip_address(&self) -> Option<&str> {
        self.inner.properties.gateway_ip_address.as_deref()
    }

    /// The address ranges of the on-premises network.
    pub fn address_spaces(&self) -> &[String] {
        self.inner
            .properties
            .local_network_address_space
            .as_ref()
            .map(|a| a.address_prefixes.as_slice())
            .unwrap_or_default()
    }

    pub fn bgp_settings(&self) -> Option<&BgpSettings> {
        self.inner.properties.bgp_settings.as_ref()
    }

    pub fn update(self) -> LocalNetworkGatewayUpdate {
        LocalNetworkGatewayDefinition {
            draft: Draft::existing(self.manager, self.inner),
        }
    }
}

impl Collection<LocalNetworkGateway> {
    pub fn define<T: Into<String>>(&self, name: T) -> LocalNetworkGatewayDefinition {
        LocalNetworkGatewayDefinition {
            draft: Draft::new(
                self.manager.clone(),
                crate::model::LocalNetworkGateway::new().set_name(name),
            ),
        }
    }
}

/// The definition of a new local network gateway.
#[derive(Clone, Debug)]
pub struct LocalNetworkGatewayDefinition {
    draft: Draft<crate::model::LocalNetworkGateway>,
}

/// Updates use the same setters as new definitions.
pub type LocalNetworkGatewayUpdate = LocalNetworkGatewayDefinition;

impl Definition for LocalNetworkGatewayDefinition {
    type Model = crate::model::LocalNetworkGateway;
}

impl LocalNetworkGatewayDefinition {
    definition_setters!();

    pub fn with_ip_address<T: Into<String>>(mut self, ip: T) -> Self {
        self.draft.inner.properties.gateway_ip_address = Some(ip.into());
        self
    }

    /// Adds an address range of the on-premises network, in CIDR notation.
    pub fn with_address_space<T: Into<String>>(mut self, cidr: T) -> Self {
        let cidr = cidr.into();
        let prefixes = &mut self
            .draft
            .inner
            .properties
            .local_network_address_space
            .get_or_insert_with(AddressSpace::new)
            .address_prefixes;
        if !prefixes.contains(&cidr) {
            prefixes.push(cidr);
        }
        self
    }

    pub fn without_address_space(mut self, cidr: &str) -> Self {
        if let Some(space) = self.draft.inner.properties.local_network_address_space.as_mut() {
            space.address_prefixes.retain(|p| p != cidr);
        }
        self
    }

    /// Enables BGP with the on-premises device.
    pub fn with_bgp<T: Into<String>>(mut self, asn: i64, peering_address: T) -> Self {
        self.draft.inner.properties.bgp_settings = Some(
            BgpSettings::new()
                .set_asn(asn)
                .set_bgp_peering_address(peering_address),
        );
        self
    }

    pub fn without_bgp(mut self) -> Self {
        self.draft.inner.properties.bgp_settings = None;
        self
    }

    pub async fn create(self) -> Result<LocalNetworkGateway> {
        check_region(&self.draft.inner.location, self.draft.name())?;
        if self.draft.inner.properties.gateway_ip_address.is_none() {
            return Err(DefinitionError::Incomplete {
                resource: self.draft.name().to_string(),
                what: "an IP address",
            }
            .into());
        }
        self.draft.submit().await
    }

    pub async fn apply(self) -> Result<LocalNetworkGateway> {
        self.draft.submit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> NetworkManager {
        NetworkManager::from_stub("s1", super::super::tests::Unimplemented)
    }

    #[test]
    fn address_spaces() {
        let definition = manager()
            .local_network_gateways()
            .define("lgw1")
            .with_ip_address("40.1.2.3")
            .with_address_space("192.168.0.0/24")
            .with_address_space("192.168.1.0/24")
            .with_address_space("192.168.0.0/24")
            .without_address_space("192.168.1.0/24")
            .with_bgp(65020, "192.168.0.254");
        let properties = &definition.inner().properties;
        assert_eq!(properties.gateway_ip_address.as_deref(), Some("40.1.2.3"));
        assert_eq!(
            properties
                .local_network_address_space
                .clone()
                .unwrap_or_default()
                .address_prefixes,
            vec!["192.168.0.0/24"]
        );
        assert_eq!(
            properties.bgp_settings.as_ref().and_then(|b| b.asn),
            Some(65020)
        );
    }

    #[tokio::test]
    async fn requires_ip_address() {
        let err = manager()
            .local_network_gateways()
            .define("lgw1")
            .with_region("eastus")
            .with_existing_resource_group("rg1")
            .create()
            .await
            .unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        assert!(err.to_string().contains("an IP address"), "{err}");
    }

    #[test]
    fn accessors() {
        let gateway = LocalNetworkGateway {
            manager: manager(),
            inner: crate::model::LocalNetworkGateway::new().set_properties(
                LocalNetworkGatewayProperties::new()
                    .set_gateway_ip_address("40.1.2.3")
                    .set_local_network_address_space(
                        AddressSpace::new().set_address_prefixes(["10.1.0.0/16"]),
                    ),
            ),
        };
        assert_eq!(gateway.ip_address(), Some("40.1.2.3"));
        assert_eq!(gateway.address_spaces(), ["10.1.0.0/16"]);
        assert!(gateway.bgp_settings().is_none());
    }
}
