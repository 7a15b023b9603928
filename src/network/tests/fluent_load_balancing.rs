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
    use cloud_network::model::ApplicationGatewayOperationalState;
    use pretty_assertions::assert_eq;

    type TestResult = anyhow::Result<()>;

    #[tokio::test]
    async fn load_balancer_with_implicit_frontend() -> TestResult {
        let fake = FakeNetwork::new();
        let balancer = fake
            .manager()
            .load_balancers()
            .define("lb1")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .define_tcp_probe("tcp")
            .with_port(80)
            .attach()
            .define_load_balancing_rule("http")
            .from_frontend_port(80)
            .attach()
            .create()
            .await?;

        let addresses = fake.ids("publicIPAddresses");
        assert_eq!(addresses.len(), 1);
        let frontends = balancer.public_ip_address_ids().collect::<Vec<_>>();
        assert_eq!(frontends.len(), 1);
        assert!(addresses[0].eq_ignore_ascii_case(frontends[0]), "{addresses:?} {frontends:?}");

        assert_eq!(balancer.backends().len(), 1);
        let rule = balancer
            .load_balancing_rule("http")
            .ok_or_else(|| anyhow::anyhow!("missing rule"))?;
        let expect = |collection: &str, name: &str| {
            Some(format!("{}/{collection}/{name}", balancer.id()))
        };
        assert_eq!(
            rule.properties.frontend_ip_configuration.as_ref().map(|r| r.id.clone()),
            expect("frontendIPConfigurations", "default")
        );
        assert_eq!(
            rule.properties.backend_address_pool.as_ref().map(|r| r.id.clone()),
            expect("backendAddressPools", "default")
        );
        assert_eq!(
            rule.properties.probe.as_ref().map(|r| r.id.clone()),
            expect("probes", "tcp")
        );
        assert_eq!(rule.properties.backend_port, Some(80));
        Ok(())
    }

    #[tokio::test]
    async fn load_balancer_update() -> TestResult {
        let fake = FakeNetwork::new();
        let balancer = fake
            .manager()
            .load_balancers()
            .define("lb1")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .define_tcp_probe("tcp")
            .with_port(80)
            .attach()
            .define_load_balancing_rule("http")
            .from_frontend_port(80)
            .attach()
            .create()
            .await?;
        assert_eq!(fake.ids("publicIPAddresses").len(), 1);

        let sent = fake.requests().len();
        let err = balancer
            .clone()
            .update()
            .define_private_frontend("internal")
            .attach()
            .apply()
            .await
            .unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        assert_eq!(fake.requests().len(), sent, "{:?}", fake.requests());

        let balancer = balancer
            .update()
            .define_load_balancing_rule("https")
            .from_frontend_port(443)
            .to_backend_port(8443)
            .attach()
            .define_inbound_nat_rule("ssh")
            .from_frontend_port(5022)
            .to_backend_port(22)
            .attach()
            .apply()
            .await?;
        // The existing frontend is reused, no new addresses are needed.
        assert_eq!(fake.ids("publicIPAddresses").len(), 1);
        assert_eq!(balancer.frontends().len(), 1);
        assert_eq!(balancer.load_balancing_rules().len(), 2);

        let expect = |collection: &str, name: &str| {
            Some(format!("{}/{collection}/{name}", balancer.id()))
        };
        let rule = balancer
            .load_balancing_rule("https")
            .ok_or_else(|| anyhow::anyhow!("missing rule"))?;
        assert_eq!(rule.properties.backend_port, Some(8443));
        assert_eq!(
            rule.properties.frontend_ip_configuration.as_ref().map(|r| r.id.clone()),
            expect("frontendIPConfigurations", "default")
        );
        assert_eq!(
            rule.properties.backend_address_pool.as_ref().map(|r| r.id.clone()),
            expect("backendAddressPools", "default")
        );
        assert_eq!(
            rule.properties.probe.as_ref().map(|r| r.id.clone()),
            expect("probes", "tcp")
        );
        let nat = balancer
            .inbound_nat_rules()
            .iter()
            .find(|r| r.name == "ssh")
            .ok_or_else(|| anyhow::anyhow!("missing NAT rule"))?;
        assert_eq!(nat.properties.backend_port, Some(22));
        assert_eq!(
            nat.properties.frontend_ip_configuration.as_ref().map(|r| r.id.clone()),
            expect("frontendIPConfigurations", "default")
        );
        Ok(())
    }

    #[tokio::test]
    async fn load_balancer_with_existing_address() -> TestResult {
        let fake = FakeNetwork::new();
        let manager = fake.manager();
        let address = manager
            .public_ip_addresses()
            .define("pip1")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .create()
            .await?;
        let balancer = manager
            .load_balancers()
            .define("lb1")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .define_public_frontend("web")
            .with_existing_public_ip_address(address.id())
            .attach()
            .define_backend("pool")
            .attach()
            .create()
            .await?;
        assert_eq!(fake.ids("publicIPAddresses").len(), 1);
        assert_eq!(
            balancer.public_ip_address_ids().collect::<Vec<_>>(),
            vec![address.id()]
        );
        assert!(balancer.frontend("web").is_some());

        let balancer = balancer.update().without_backend("pool").apply().await?;
        assert!(balancer.backends().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn application_gateway_with_implicit_resources() -> TestResult {
        let fake = FakeNetwork::new();
        let mut gateway = fake
            .manager()
            .application_gateways()
            .define("appgw1")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .with_new_public_ip_address()
            .define_request_routing_rule("rule1")
            .from_public_frontend()
            .from_frontend_http_port(80)
            .to_backend_http_port(8080)
            .to_backend_ip_address("10.0.0.10")
            .attach()
            .create()
            .await?;

        assert_eq!(fake.ids("virtualNetworks").len(), 1);
        assert_eq!(fake.ids("publicIPAddresses").len(), 1);
        assert!(gateway.is_public());
        assert!(!gateway.is_private());
        assert!(gateway.public_ip_address_id().is_some());
        assert!(gateway.gateway_subnet_id().is_some_and(|id| id.ends_with("/subnets/default")));

        let listener = gateway.listener("listener-rule1");
        assert!(listener.is_some(), "{:?}", gateway.listeners());
        let backends = gateway.backends().iter().map(|b| b.name.as_str()).collect::<Vec<_>>();
        assert_eq!(backends, vec!["backend-rule1"]);
        let configurations = gateway
            .backend_http_configurations()
            .iter()
            .map(|c| (c.name.as_str(), c.properties.port))
            .collect::<Vec<_>>();
        assert_eq!(configurations, vec![("config8080", Some(8080))]);
        let ports = gateway
            .frontend_ports()
            .iter()
            .map(|p| (p.name.as_str(), p.properties.port))
            .collect::<Vec<_>>();
        assert_eq!(ports, vec![("port80", Some(80))]);

        assert!(gateway.is_running());
        gateway.stop().await?;
        assert_eq!(
            gateway.operational_state(),
            Some(&ApplicationGatewayOperationalState::STOPPED)
        );
        gateway.start().await?;
        assert!(gateway.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn application_gateway_update() -> TestResult {
        let fake = FakeNetwork::new();
        let gateway = fake
            .manager()
            .application_gateways()
            .define("appgw1")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .with_new_public_ip_address()
            .define_request_routing_rule("rule1")
            .from_public_frontend()
            .from_frontend_http_port(80)
            .to_backend_http_port(8080)
            .to_backend_ip_address("10.0.0.10")
            .attach()
            .create()
            .await?;
        let subnet = gateway.gateway_subnet_id().map(str::to_string);

        let gateway = gateway
            .update()
            .define_request_routing_rule("rule2")
            .from_public_frontend()
            .from_frontend_http_port(8081)
            .to_backend_http_port(8080)
            .to_backend_ip_address("10.0.0.11")
            .attach()
            .apply()
            .await?;
        // The existing network, address and frontend are reused.
        assert_eq!(fake.ids("virtualNetworks").len(), 1);
        assert_eq!(fake.ids("publicIPAddresses").len(), 1);
        assert_eq!(gateway.gateway_subnet_id().map(str::to_string), subnet);
        assert_eq!(gateway.frontends().len(), 1);

        let ports = gateway
            .frontend_ports()
            .iter()
            .map(|p| (p.name.as_str(), p.properties.port))
            .collect::<Vec<_>>();
        assert_eq!(ports, vec![("port80", Some(80)), ("port8081", Some(8081))]);
        let configurations = gateway
            .backend_http_configurations()
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(configurations, vec!["config8080"]);
        let backends = gateway.backends().iter().map(|b| b.name.as_str()).collect::<Vec<_>>();
        assert_eq!(backends, vec!["backend-rule1", "backend-rule2"]);

        let public = gateway
            .public_frontend()
            .ok_or_else(|| anyhow::anyhow!("missing public frontend"))?;
        let listener = gateway
            .listener("listener-rule2")
            .ok_or_else(|| anyhow::anyhow!("missing listener"))?;
        assert_eq!(
            listener.properties.frontend_ip_configuration.as_ref().map(|r| r.id.as_str()),
            Some(public.id.as_str())
        );
        let rule = gateway
            .request_routing_rule("rule2")
            .ok_or_else(|| anyhow::anyhow!("missing rule"))?;
        assert_eq!(
            rule.properties.http_listener.as_ref().map(|r| r.id.as_str()),
            Some(listener.id.as_str())
        );
        Ok(())
    }

    #[tokio::test]
    async fn application_gateway_private_by_default() -> TestResult {
        let fake = FakeNetwork::new();
        let gateway = fake
            .manager()
            .application_gateways()
            .define("appgw1")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .define_request_routing_rule("rule1")
            .from_frontend_http_port(80)
            .to_backend_ip_address("10.0.0.10")
            .attach()
            .create()
            .await?;
        assert!(fake.ids("publicIPAddresses").is_empty());
        assert!(gateway.is_private());
        assert!(!gateway.is_public());

        let gateway = gateway
            .update()
            .without_request_routing_rule("rule1")
            .without_listener("listener-rule1")
            .apply()
            .await?;
        assert!(gateway.request_routing_rules().is_empty());
        assert!(gateway.listeners().is_empty());
        Ok(())
    }
}
