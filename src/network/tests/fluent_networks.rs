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
    use cloud_network::model::{IpAllocationMethod, PeeringState, SecurityRuleProtocol};
    use cloud_network::region::Region;
    use pretty_assertions::assert_eq;

    type TestResult = anyhow::Result<()>;

    #[tokio::test]
    async fn network_defaults() -> TestResult {
        let fake = FakeNetwork::new();
        let manager = fake.manager();
        let network = manager
            .networks()
            .define("vnet1")
            .with_region(Region::US_WEST)
            .with_existing_resource_group(RESOURCE_GROUP)
            .create()
            .await?;
        assert_eq!(network.address_spaces(), ["10.0.0.0/16"]);
        assert_eq!(network.subnets().len(), 1);
        let subnet = network.subnet("subnet1").map(|s| s.id.clone());
        assert_eq!(subnet, Some(format!("{}/subnets/subnet1", network.id())));
        assert_eq!(network.region(), Region::US_WEST);
        assert_eq!(network.resource_group_name(), RESOURCE_GROUP);
        Ok(())
    }

    #[tokio::test]
    async fn network_lifecycle() -> TestResult {
        let fake = FakeNetwork::new();
        let manager = fake.manager();
        let networks = manager.networks();
        let network = networks
            .define("vnet1")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .with_address_space("10.1.0.0/28")
            .define_subnet("front")
            .with_address_prefix("10.1.0.0/29")
            .attach()
            .with_subnet("back", "10.1.0.8/29")
            .create()
            .await?;
        assert_eq!(network.subnets().len(), 2);

        let network = network.update().without_subnet("back").apply().await?;
        assert!(network.subnet("back").is_none());

        let got = networks.get_by_id(network.id()).await?;
        assert_eq!(got.subnets().len(), 1);
        assert_eq!(networks.list().await?.len(), 1);
        assert_eq!(networks.list_by_resource_group("other").await?.len(), 0);

        networks
            .delete_by_resource_group(RESOURCE_GROUP, "vnet1")
            .await?;
        let err = networks
            .get_by_resource_group(RESOURCE_GROUP, "vnet1")
            .await
            .unwrap_err();
        assert!(err.is_not_found(), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn peering_both_sides() -> TestResult {
        let fake = FakeNetwork::new();
        let manager = fake.manager();
        let mut networks = Vec::new();
        for (name, cidr) in [("vnet1", "10.0.0.0/16"), ("vnet2", "10.1.0.0/16")] {
            let network = manager
                .networks()
                .define(name)
                .with_region(REGION)
                .with_existing_resource_group(RESOURCE_GROUP)
                .with_address_space(cidr)
                .create()
                .await?;
            networks.push(network);
        }
        let (local, remote) = (&networks[0], &networks[1]);

        let peering = local
            .peerings()
            .define("peer")
            .with_remote_network(remote.id())
            .with_traffic_forwarding_between_both_networks()
            .create()
            .await?;
        assert_eq!(peering.state(), Some(&PeeringState::CONNECTED));
        assert!(peering.is_same_subscription());
        assert_eq!(peering.remote_network_id(), remote.id());

        let reverse = peering.get_remote_peering().await?;
        let reverse = reverse.ok_or_else(|| anyhow::anyhow!("missing remote peering"))?;
        assert_eq!(reverse.name(), "peer");
        assert_eq!(reverse.remote_network_id(), local.id());
        assert!(reverse.is_traffic_forwarding_from_remote_network_allowed());

        local.peerings().delete_by_name("peer").await?;
        assert!(local.peerings().list().await?.is_empty());
        assert!(remote.peerings().list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn network_interface_with_implicit_resources() -> TestResult {
        let fake = FakeNetwork::new();
        let manager = fake.manager();
        let nic = manager
            .network_interfaces()
            .define("nic1")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .with_new_primary_network("10.2.0.0/24")
            .with_primary_private_ip_address_static("10.2.0.4")
            .with_new_primary_public_ip_address()
            .with_ip_forwarding()
            .create()
            .await?;
        assert_eq!(fake.ids("virtualNetworks").len(), 1);
        assert_eq!(fake.ids("publicIPAddresses").len(), 1);
        assert_eq!(nic.primary_private_ip(), Some("10.2.0.4"));
        assert_eq!(
            nic.primary_private_ip_allocation_method(),
            Some(&IpAllocationMethod::STATIC)
        );
        assert!(nic.is_ip_forwarding_enabled());
        let subnet = nic.primary_subnet_id().unwrap_or_default();
        assert!(subnet.ends_with("/subnets/subnet1"), "{subnet}");

        let network = nic.get_primary_network().await?;
        assert_eq!(network.map(|n| n.id().to_string()), fake.ids("virtualNetworks").pop());
        let address = nic.get_primary_public_ip_address().await?;
        assert!(address.is_some_and(|a| a.leaf_domain_label().is_some()));
        Ok(())
    }

    #[tokio::test]
    async fn network_interface_update() -> TestResult {
        let fake = FakeNetwork::new();
        let manager = fake.manager();
        let network = manager
            .networks()
            .define("vnet1")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .with_address_space("10.5.0.0/16")
            .with_subnet("front", "10.5.0.0/24")
            .with_subnet("back", "10.5.1.0/24")
            .create()
            .await?;
        let nic = manager
            .network_interfaces()
            .define("nic1")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .with_existing_primary_network(network.id())
            .with_subnet("front")
            .create()
            .await?;
        assert_eq!(
            nic.primary_subnet_id(),
            network.subnet("front").map(|s| s.id.as_str())
        );
        assert!(fake.ids("publicIPAddresses").is_empty());

        let nic = nic
            .update()
            .with_subnet("back")
            .with_primary_private_ip_address_static("10.5.1.10")
            .with_new_primary_public_ip_address()
            .with_dns_server("10.5.0.53")
            .apply()
            .await?;
        assert_eq!(
            nic.primary_subnet_id(),
            network.subnet("back").map(|s| s.id.as_str())
        );
        assert_eq!(nic.primary_network_id().as_deref(), Some(network.id()));
        assert_eq!(nic.primary_private_ip(), Some("10.5.1.10"));
        assert_eq!(
            nic.primary_private_ip_allocation_method(),
            Some(&IpAllocationMethod::STATIC)
        );
        assert_eq!(nic.dns_servers(), ["10.5.0.53"]);
        let addresses = fake.ids("publicIPAddresses");
        assert_eq!(addresses.len(), 1);
        assert_eq!(nic.primary_public_ip_address_id(), addresses.first().map(String::as_str));

        // Updates without network changes keep the subnet and the address.
        let nic = nic.update().without_dns_server("10.5.0.53").apply().await?;
        assert_eq!(
            nic.primary_subnet_id(),
            network.subnet("back").map(|s| s.id.as_str())
        );
        assert!(nic.dns_servers().is_empty());
        assert_eq!(fake.ids("publicIPAddresses").len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn public_ip_static() -> TestResult {
        let fake = FakeNetwork::new();
        let address = fake
            .manager()
            .public_ip_addresses()
            .define("pip1")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .with_static_ip()
            .with_leaf_domain_label("app1")
            .create()
            .await?;
        assert_eq!(address.allocation_method(), Some(&IpAllocationMethod::STATIC));
        assert!(address.ip_address().is_some());
        assert!(!address.has_assigned_network_interface());
        Ok(())
    }

    #[tokio::test]
    async fn security_group_rules() -> TestResult {
        let fake = FakeNetwork::new();
        let group = fake
            .manager()
            .network_security_groups()
            .define("nsg1")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .define_rule("ssh")
            .allow_inbound()
            .from_any_address()
            .from_any_port()
            .to_any_address()
            .to_port(22)
            .with_protocol(SecurityRuleProtocol::TCP)
            .attach()
            .create()
            .await?;
        let rule = group
            .security_rule("ssh")
            .ok_or_else(|| anyhow::anyhow!("missing rule"))?;
        assert_eq!(rule.properties.priority, Some(100));
        assert_eq!(rule.properties.destination_port_range.as_deref(), Some("22"));

        let group = group
            .update()
            .define_rule("https")
            .allow_inbound()
            .to_port(443)
            .attach()
            .apply()
            .await?;
        let priorities = group
            .security_rules()
            .iter()
            .map(|r| (r.name.as_str(), r.properties.priority))
            .collect::<Vec<_>>();
        assert_eq!(priorities, vec![("ssh", Some(100)), ("https", Some(101))]);
        Ok(())
    }
}
