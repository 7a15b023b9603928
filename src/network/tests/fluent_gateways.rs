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

mod fake;

#[cfg(test)]
mod tests {
    use super::fake::{FakeNetwork, REGION, RESOURCE_GROUP};
    use cloud_network::fluent::VirtualNetworkGateway;
    use cloud_network::model::{
        VirtualNetworkGatewayConnectionType, VirtualNetworkGatewaySkuName, VirtualNetworkGatewayType,
        VpnType,
    };
    use cloud_network::NetworkManager;
    use pretty_assertions::assert_eq;

    type TestResult = anyhow::Result<()>;

    async fn new_gateway(
        manager: &NetworkManager,
        name: &str,
        address_space: &str,
    ) -> cloud_network::Result<VirtualNetworkGateway> {
        manager
            .virtual_network_gateways()
            .define(name)
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .with_new_network(address_space)
            .create()
            .await
    }

    #[tokio::test]
    async fn vpn_gateway_with_new_network() -> TestResult {
        let fake = FakeNetwork::new();
        let manager = fake.manager();
        let gateway = new_gateway(&manager, "gw1", "10.3.0.0/24").await?;

        assert_eq!(gateway.gateway_type(), Some(&VirtualNetworkGatewayType::VPN));
        assert_eq!(gateway.vpn_type(), Some(&VpnType::ROUTE_BASED));
        assert_eq!(gateway.sku(), Some(&VirtualNetworkGatewaySkuName::BASIC));
        assert!(!gateway.is_bgp_enabled());

        let networks = fake.ids("virtualNetworks");
        assert_eq!(networks.len(), 1);
        assert_eq!(gateway.network_id().as_ref(), networks.first());
        let network = manager.networks().get_by_id(&networks[0]).await?;
        assert!(network.subnet("GatewaySubnet").is_some());
        assert_eq!(network.address_spaces(), ["10.3.0.0/24"]);

        assert_eq!(fake.ids("publicIPAddresses").len(), 1);
        assert!(gateway.public_ip_address_id().is_some());
        Ok(())
    }

    #[tokio::test]
    async fn vpn_gateway_update() -> TestResult {
        let fake = FakeNetwork::new();
        let manager = fake.manager();
        let gateway = new_gateway(&manager, "gw1", "10.3.0.0/24").await?;
        let network = gateway.network_id();
        let address = gateway.public_ip_address_id().map(str::to_string);

        let gateway = gateway
            .update()
            .with_sku(VirtualNetworkGatewaySkuName::VPN_GW1)
            .with_bgp(65010, "10.3.0.254")
            .with_active_active()
            .apply()
            .await?;
        assert_eq!(gateway.sku(), Some(&VirtualNetworkGatewaySkuName::VPN_GW1));
        assert!(gateway.is_bgp_enabled());
        assert!(gateway.is_active_active());
        assert_eq!(gateway.bgp_settings().and_then(|b| b.asn), Some(65010));
        assert_eq!(gateway.vpn_type(), Some(&VpnType::ROUTE_BASED));

        // The network and the public address are kept.
        assert_eq!(gateway.network_id(), network);
        assert_eq!(gateway.public_ip_address_id().map(str::to_string), address);
        assert_eq!(fake.ids("virtualNetworks").len(), 1);
        assert_eq!(fake.ids("publicIPAddresses").len(), 1);

        let gateway = gateway.update().without_bgp().apply().await?;
        assert!(!gateway.is_bgp_enabled());
        assert!(gateway.bgp_settings().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn gateway_requires_network() -> TestResult {
        let fake = FakeNetwork::new();
        let err = fake
            .manager()
            .virtual_network_gateways()
            .define("gw1")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .create()
            .await
            .unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        assert!(fake.requests().is_empty(), "{:?}", fake.requests());
        Ok(())
    }

    #[tokio::test]
    async fn site_to_site_connection() -> TestResult {
        let fake = FakeNetwork::new();
        let manager = fake.manager();
        let mut gateway = new_gateway(&manager, "gw1", "10.3.0.0/24").await?;
        let local = manager
            .local_network_gateways()
            .define("onprem")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .with_ip_address("40.1.2.3")
            .with_address_space("192.168.0.0/24")
            .create()
            .await?;
        assert_eq!(local.ip_address(), Some("40.1.2.3"));
        assert_eq!(local.address_spaces(), ["192.168.0.0/24"]);

        let connection = gateway
            .connections()
            .define("to-onprem")
            .with_site_to_site(local.id())
            .with_shared_key("secret")
            .create()
            .await?;
        assert_eq!(
            connection.connection_type(),
            Some(&VirtualNetworkGatewayConnectionType::IPSEC)
        );
        assert_eq!(connection.virtual_network_gateway1_id(), Some(gateway.id()));
        assert_eq!(connection.local_network_gateway2_id(), Some(local.id()));
        assert_eq!(connection.region().name(), REGION);
        assert!(connection.is_connected());

        let names = gateway
            .list_connections()
            .await?
            .into_iter()
            .map(|c| c.name().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["to-onprem"]);

        let other = new_gateway(&manager, "gw2", "10.4.0.0/24").await?;
        assert!(other.list_connections().await?.is_empty());

        gateway.reset().await?;
        assert_eq!(gateway.name(), "gw1");
        Ok(())
    }

    #[tokio::test]
    async fn vnet_to_vnet_connection() -> TestResult {
        let fake = FakeNetwork::new();
        let manager = fake.manager();
        let gw1 = new_gateway(&manager, "gw1", "10.3.0.0/24").await?;
        let gw2 = new_gateway(&manager, "gw2", "10.4.0.0/24").await?;

        let connection = gw1
            .connections()
            .define("gw1-to-gw2")
            .with_vnet_to_vnet(gw2.id())
            .with_shared_key("secret")
            .create()
            .await?;
        assert_eq!(connection.virtual_network_gateway2_id(), Some(gw2.id()));

        // Both gateways see the connection.
        assert_eq!(gw1.list_connections().await?.len(), 1);
        assert_eq!(gw2.list_connections().await?.len(), 1);

        let connection = connection.update().with_routing_weight(5).apply().await?;
        assert_eq!(connection.routing_weight(), Some(5));
        assert_eq!(connection.shared_key(), Some("secret"));
        Ok(())
    }
}
