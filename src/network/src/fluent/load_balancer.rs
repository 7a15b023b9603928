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
    Attach, ChildDefinition, Collection, Definition, DefinitionError, Draft, NetworkManager,
    by_name, check_region, create_public_ip, definition_setters, find, references, remove,
    resolve, upsert, wrapper,
};
use crate::Result;
use crate::model::*;

/// The name of the frontend created when a definition does not include any.
pub const DEFAULT_FRONTEND: &str = "default";

/// The name of the backend created when rules need one and the definition
/// does not include any.
pub const DEFAULT_BACKEND: &str = "default";

const FRONTENDS: &str = "frontendIPConfigurations";
const BACKENDS: &str = "backendAddressPools";
const PROBES: &str = "probes";

const DEFAULT_PROBE_INTERVAL_IN_SECONDS: i32 = 15;
const DEFAULT_NUMBER_OF_PROBES: i32 = 2;
const DEFAULT_HTTP_PORT: i32 = 80;

/// The load balancers in a subscription.
pub type LoadBalancers = Collection<LoadBalancer>;

/// A load balancer.
#[derive(Clone, Debug)]
pub struct LoadBalancer {
    manager: NetworkManager,
    inner: crate::model::LoadBalancer,
}

wrapper!(LoadBalancer, crate::model::LoadBalancer, load_balancers);

impl LoadBalancer {
    pub fn sku(&self) -> Option<&LoadBalancerSkuName> {
        self.inner.sku.as_ref().and_then(|s| s.name.as_ref())
    }

    pub fn frontends(&self) -> &[FrontendIpConfiguration] {
        &self.inner.properties.frontend_ip_configurations
    }

    pub fn frontend(&self, name: &str) -> Option<&FrontendIpConfiguration> {
        find(&self.inner.properties.frontend_ip_configurations, name)
    }

    /// The frontends using a public IP address.
    pub fn public_frontends(&self) -> impl Iterator<Item = &FrontendIpConfiguration> {
        self.frontends()
            .iter()
            .filter(|f| f.properties.public_ip_address.is_some())
    }

    /// The frontends using a private address in a subnet.
    pub fn private_frontends(&self) -> impl Iterator<Item = &FrontendIpConfiguration> {
        self.frontends()
            .iter()
            .filter(|f| f.properties.public_ip_address.is_none())
    }

    /// The ids of the public IP addresses used by the frontends.
    pub fn public_ip_address_ids(&self) -> impl Iterator<Item = &str> {
        self.frontends()
            .iter()
            .filter_map(|f| f.properties.public_ip_address.as_ref())
            .map(|p| p.id.as_str())
    }

    pub fn backends(&self) -> &[BackendAddressPool] {
        &self.inner.properties.backend_address_pools
    }

    pub fn backend(&self, name: &str) -> Option<&BackendAddressPool> {
        find(&self.inner.properties.backend_address_pools, name)
    }

    pub fn probes(&self) -> &[Probe] {
        &self.inner.properties.probes
    }

    pub fn http_probes(&self) -> impl Iterator<Item = &Probe> {
        self.probes_with(ProbeProtocol::HTTP)
    }

    pub fn tcp_probes(&self) -> impl Iterator<Item = &Probe> {
        self.probes_with(ProbeProtocol::TCP)
    }

    pub fn load_balancing_rules(&self) -> &[LoadBalancingRule] {
        &self.inner.properties.load_balancing_rules
    }

    pub fn load_balancing_rule(&self, name: &str) -> Option<&LoadBalancingRule> {
        find(&self.inner.properties.load_balancing_rules, name)
    }

    pub fn inbound_nat_rules(&self) -> &[InboundNatRule] {
        &self.inner.properties.inbound_nat_rules
    }

    pub fn inbound_nat_pools(&self) -> &[InboundNatPool] {
        &self.inner.properties.inbound_nat_pools
    }

    /// Starts an update of this load balancer.
    pub fn update(self) -> LoadBalancerUpdate {
        LoadBalancerDefinition {
            draft: Draft::existing(self.manager, self.inner),
        }
    }

    fn probes_with(&self, protocol: ProbeProtocol) -> impl Iterator<Item = &Probe> {
        self.probes().iter().filter(move |p| {
            p.properties
                .protocol
                .as_ref()
                .is_some_and(|v| v.matches(&protocol))
        })
    }
}

impl Collection<LoadBalancer> {
    /// Starts the definition of a new load balancer.
    pub fn define<T: Into<String>>(&self, name: T) -> LoadBalancerDefinition {
        LoadBalancerDefinition {
            draft: Draft::new(
                self.manager.clone(),
                crate::model::LoadBalancer::new().set_name(name),
            ),
        }
    }
}

/// The definition of a new load balancer.
///
/// Before the definition is sent:
/// * A load balancer without frontends gets a public frontend named
///   [DEFAULT_FRONTEND].
/// * Public frontends without an address get a new public IP address.
/// * If rules exist but there are no backends, a backend named
///   [DEFAULT_BACKEND] is added.
/// * Rules without a frontend, or a backend, use the first one. Rules without
///   a probe use the only probe, if there is exactly one.
/// * Rules without a backend port use the frontend port.
#[derive(Clone, Debug)]
pub struct LoadBalancerDefinition {
    draft: Draft<crate::model::LoadBalancer>,
}

/// Updates use the same setters as new definitions.
pub type LoadBalancerUpdate = LoadBalancerDefinition;

impl Definition for LoadBalancerDefinition {
    type Model = crate::model::LoadBalancer;
}

impl LoadBalancerDefinition {
    definition_setters!();

    pub fn with_sku<T: Into<LoadBalancerSkuName>>(mut self, v: T) -> Self {
        self.draft.inner.sku = Some(LoadBalancerSku::from(v.into()));
        self
    }

    /// Starts the definition of a frontend with a public IP address.
    ///
    /// Unless an existing address is provided, a new address is created.
    pub fn define_public_frontend<T: Into<String>>(
        self,
        name: T,
    ) -> ChildDefinition<Self, FrontendIpConfiguration> {
        ChildDefinition::new(self, FrontendIpConfiguration::new().set_name(name))
    }

    /// Starts the definition of a frontend with a private address in a
    /// subnet.
    pub fn define_private_frontend<T: Into<String>>(
        self,
        name: T,
    ) -> ChildDefinition<Self, FrontendIpConfiguration> {
        ChildDefinition::new(
            self,
            FrontendIpConfiguration::new().set_name(name).set_properties(
                FrontendIpConfigurationProperties::new()
                    .set_private_ip_allocation_method(IpAllocationMethod::DYNAMIC),
            ),
        )
    }

    pub fn update_frontend(self, name: &str) -> ChildDefinition<Self, FrontendIpConfiguration> {
        let frontend = find(&self.draft.inner.properties.frontend_ip_configurations, name)
            .cloned()
            .unwrap_or_else(|| FrontendIpConfiguration::new().set_name(name));
        ChildDefinition::new(self, frontend)
    }

    /// Removes a frontend, and clears any references to it.
    pub fn without_frontend(mut self, name: &str) -> Self {
        let properties = &mut self.draft.inner.properties;
        if remove(&mut properties.frontend_ip_configurations, name) {
            for rule in properties.load_balancing_rules.iter_mut() {
                clear_reference(&mut rule.properties.frontend_ip_configuration, name);
            }
            for rule in properties.inbound_nat_rules.iter_mut() {
                clear_reference(&mut rule.properties.frontend_ip_configuration, name);
            }
            for pool in properties.inbound_nat_pools.iter_mut() {
                clear_reference(&mut pool.properties.frontend_ip_configuration, name);
            }
        }
        self
    }

    pub fn define_backend<T: Into<String>>(self, name: T) -> ChildDefinition<Self, BackendAddressPool> {
        ChildDefinition::new(self, BackendAddressPool::new().set_name(name))
    }

    pub fn with_backend<T: Into<String>>(self, name: T) -> Self {
        self.define_backend(name).attach()
    }

    /// Removes a backend, and clears any references to it.
    pub fn without_backend(mut self, name: &str) -> Self {
        let properties = &mut self.draft.inner.properties;
        if remove(&mut properties.backend_address_pools, name) {
            for rule in properties.load_balancing_rules.iter_mut() {
                clear_reference(&mut rule.properties.backend_address_pool, name);
            }
        }
        self
    }

    /// Starts the definition of a TCP probe.
    pub fn define_tcp_probe<T: Into<String>>(self, name: T) -> ChildDefinition<Self, Probe> {
        let probe = Probe::new()
            .set_name(name)
            .set_properties(ProbeProperties::new().set_protocol(ProbeProtocol::TCP));
        ChildDefinition::new(self, probe)
    }

    /// Starts the definition of an HTTP probe. HTTP probes use port 80 and the
    /// `/` path unless configured otherwise.
    pub fn define_http_probe<T: Into<String>>(self, name: T) -> ChildDefinition<Self, Probe> {
        let probe = Probe::new()
            .set_name(name)
            .set_properties(ProbeProperties::new().set_protocol(ProbeProtocol::HTTP));
        ChildDefinition::new(self, probe)
    }

    pub fn update_probe(self, name: &str) -> ChildDefinition<Self, Probe> {
        let probe = find(&self.draft.inner.properties.probes, name)
            .cloned()
            .unwrap_or_else(|| Probe::new().set_name(name));
        ChildDefinition::new(self, probe)
    }

    /// Removes a probe, and clears any references to it.
    pub fn without_probe(mut self, name: &str) -> Self {
        let properties = &mut self.draft.inner.properties;
        if remove(&mut properties.probes, name) {
            for rule in properties.load_balancing_rules.iter_mut() {
                clear_reference(&mut rule.properties.probe, name);
            }
        }
        self
    }

    pub fn define_load_balancing_rule<T: Into<String>>(
        self,
        name: T,
    ) -> ChildDefinition<Self, LoadBalancingRule> {
        ChildDefinition::new(self, LoadBalancingRule::new().set_name(name))
    }

    pub fn update_load_balancing_rule(self, name: &str) -> ChildDefinition<Self, LoadBalancingRule> {
        let rule = find(&self.draft.inner.properties.load_balancing_rules, name)
            .cloned()
            .unwrap_or_else(|| LoadBalancingRule::new().set_name(name));
        ChildDefinition::new(self, rule)
    }

    pub fn without_load_balancing_rule(mut self, name: &str) -> Self {
        remove(&mut self.draft.inner.properties.load_balancing_rules, name);
        self
    }

    pub fn define_inbound_nat_rule<T: Into<String>>(
        self,
        name: T,
    ) -> ChildDefinition<Self, InboundNatRule> {
        ChildDefinition::new(self, InboundNatRule::new().set_name(name))
    }

    pub fn without_inbound_nat_rule(mut self, name: &str) -> Self {
        remove(&mut self.draft.inner.properties.inbound_nat_rules, name);
        self
    }

    pub fn define_inbound_nat_pool<T: Into<String>>(
        self,
        name: T,
    ) -> ChildDefinition<Self, InboundNatPool> {
        ChildDefinition::new(self, InboundNatPool::new().set_name(name))
    }

    pub fn without_inbound_nat_pool(mut self, name: &str) -> Self {
        remove(&mut self.draft.inner.properties.inbound_nat_pools, name);
        self
    }

    /// Creates the load balancer, and any implicit resources.
    pub async fn create(mut self) -> Result<LoadBalancer> {
        check_region(&self.draft.inner.location, self.draft.name())?;
        self.draft.check_resource_group()?;
        self.reconcile().await?;
        self.draft.submit().await
    }

    /// Applies the update, creating any new implicit resources.
    pub async fn apply(mut self) -> Result<LoadBalancer> {
        self.reconcile().await?;
        self.draft.submit().await
    }

    async fn reconcile(&mut self) -> Result<()> {
        self.reconcile_frontends().await?;
        self.reconcile_children()
    }

    async fn reconcile_frontends(&mut self) -> Result<()> {
        let owner = self.draft.name().to_string();
        if self.draft.inner.properties.frontend_ip_configurations.is_empty() {
            tracing::debug!(load_balancer = %owner, frontend = DEFAULT_FRONTEND, "adding default frontend");
            self.draft
                .inner
                .properties
                .frontend_ip_configurations
                .push(FrontendIpConfiguration::new().set_name(DEFAULT_FRONTEND));
        }
        // Private frontends need a subnet, check them all before creating any
        // address.
        if let Some(frontend) = self
            .draft
            .inner
            .properties
            .frontend_ip_configurations
            .iter()
            .find(|f| {
                let p = &f.properties;
                p.private_ip_allocation_method.is_some()
                    && p.subnet.is_none()
                    && p.public_ip_address.is_none()
            })
        {
            return Err(incomplete(&frontend.name, "a subnet"));
        }
        let count = self.draft.inner.properties.frontend_ip_configurations.len();
        for index in 0..count {
            let properties = &self.draft.inner.properties.frontend_ip_configurations[index].properties;
            if properties.public_ip_address.is_some() || properties.subnet.is_some() {
                continue;
            }
            let address = create_public_ip(
                &self.draft.manager,
                &self.draft.resource_group_name,
                &self.draft.inner.location,
                &owner,
            )
            .await?;
            let frontend = &mut self.draft.inner.properties.frontend_ip_configurations[index];
            frontend.properties.public_ip_address = Some(SubResource::new(address.id()));
        }
        Ok(())
    }

    fn reconcile_children(&mut self) -> Result<()> {
        let parent = self.draft.resource_id();
        let properties = &mut self.draft.inner.properties;

        let needs_backend = !properties.load_balancing_rules.is_empty();
        if needs_backend && properties.backend_address_pools.is_empty() {
            tracing::debug!(load_balancer = %parent.name(), backend = DEFAULT_BACKEND, "adding default backend");
            properties
                .backend_address_pools
                .push(BackendAddressPool::new().set_name(DEFAULT_BACKEND));
        }

        let first_frontend = properties
            .frontend_ip_configurations
            .first()
            .map(|f| f.name.clone());
        let first_backend = properties
            .backend_address_pools
            .first()
            .map(|b| b.name.clone());
        let only_probe = match properties.probes.as_slice() {
            [probe] => Some(probe.name.clone()),
            _ => None,
        };

        for probe in properties.probes.iter_mut() {
            let p = &mut probe.properties;
            let is_http = p
                .protocol
                .get_or_insert(ProbeProtocol::TCP)
                .matches(&ProbeProtocol::HTTP);
            if is_http {
                p.port.get_or_insert(DEFAULT_HTTP_PORT);
                p.request_path.get_or_insert_with(|| "/".to_string());
            } else if p.port.is_none() {
                return Err(incomplete(&probe.name, "a port"));
            }
            p.interval_in_seconds
                .get_or_insert(DEFAULT_PROBE_INTERVAL_IN_SECONDS);
            p.number_of_probes.get_or_insert(DEFAULT_NUMBER_OF_PROBES);
        }

        for rule in properties.load_balancing_rules.iter_mut() {
            let r = &mut rule.properties;
            let frontend_port = r
                .frontend_port
                .ok_or_else(|| incomplete(&rule.name, "a frontend port"))?;
            r.protocol.get_or_insert(TransportProtocol::TCP);
            r.backend_port.get_or_insert(frontend_port);
            if r.frontend_ip_configuration.is_none() {
                r.frontend_ip_configuration = first_frontend.clone().and_then(by_name);
            }
            if r.backend_address_pool.is_none() {
                r.backend_address_pool = first_backend.clone().and_then(by_name);
            }
            if r.probe.is_none() {
                r.probe = only_probe.clone().and_then(by_name);
            }
            resolve(&mut r.frontend_ip_configuration, &parent, FRONTENDS);
            resolve(&mut r.backend_address_pool, &parent, BACKENDS);
            resolve(&mut r.probe, &parent, PROBES);
        }

        for rule in properties.inbound_nat_rules.iter_mut() {
            let r = &mut rule.properties;
            let frontend_port = r
                .frontend_port
                .ok_or_else(|| incomplete(&rule.name, "a frontend port"))?;
            r.protocol.get_or_insert(TransportProtocol::TCP);
            r.backend_port.get_or_insert(frontend_port);
            if r.frontend_ip_configuration.is_none() {
                r.frontend_ip_configuration = first_frontend.clone().and_then(by_name);
            }
            resolve(&mut r.frontend_ip_configuration, &parent, FRONTENDS);
        }

        for pool in properties.inbound_nat_pools.iter_mut() {
            let p = &mut pool.properties;
            if p.frontend_port_range_start.is_none() || p.frontend_port_range_end.is_none() {
                return Err(incomplete(&pool.name, "a frontend port range"));
            }
            if p.backend_port.is_none() {
                return Err(incomplete(&pool.name, "a backend port"));
            }
            p.protocol.get_or_insert(TransportProtocol::TCP);
            if p.frontend_ip_configuration.is_none() {
                p.frontend_ip_configuration = first_frontend.clone().and_then(by_name);
            }
            resolve(&mut p.frontend_ip_configuration, &parent, FRONTENDS);
        }
        Ok(())
    }
}

fn incomplete(resource: &str, what: &'static str) -> crate::Error {
    DefinitionError::Incomplete {
        resource: resource.to_string(),
        what,
    }
    .into()
}

fn clear_reference(reference: &mut Option<SubResource>, name: &str) {
    if references(reference, name) {
        *reference = None;
    }
}

impl Attach<FrontendIpConfiguration> for LoadBalancerDefinition {
    fn attach_child(&mut self, child: FrontendIpConfiguration) {
        upsert(&mut self.draft.inner.properties.frontend_ip_configurations, child);
    }
}

impl Attach<BackendAddressPool> for LoadBalancerDefinition {
    fn attach_child(&mut self, child: BackendAddressPool) {
        upsert(&mut self.draft.inner.properties.backend_address_pools, child);
    }
}

impl Attach<Probe> for LoadBalancerDefinition {
    fn attach_child(&mut self, child: Probe) {
        upsert(&mut self.draft.inner.properties.probes, child);
    }
}

impl Attach<LoadBalancingRule> for LoadBalancerDefinition {
    fn attach_child(&mut self, child: LoadBalancingRule) {
        upsert(&mut self.draft.inner.properties.load_balancing_rules, child);
    }
}

impl Attach<InboundNatRule> for LoadBalancerDefinition {
    fn attach_child(&mut self, child: InboundNatRule) {
        upsert(&mut self.draft.inner.properties.inbound_nat_rules, child);
    }
}

impl Attach<InboundNatPool> for LoadBalancerDefinition {
    fn attach_child(&mut self, child: InboundNatPool) {
        upsert(&mut self.draft.inner.properties.inbound_nat_pools, child);
    }
}

impl ChildDefinition<LoadBalancerDefinition, FrontendIpConfiguration> {
    pub fn with_existing_public_ip_address<T: Into<String>>(mut self, id: T) -> Self {
        let properties = &mut self.inner.properties;
        properties.public_ip_address = Some(SubResource::new(id));
        properties.subnet = None;
        properties.private_ip_address = None;
        properties.private_ip_allocation_method = None;
        self
    }

    /// Uses a private address in the subnet `subnet` of the network
    /// `network_id`.
    pub fn with_existing_subnet(mut self, network_id: &str, subnet: &str) -> Self {
        let properties = &mut self.inner.properties;
        properties.subnet = Some(SubResource::new(format!(
            "{}/subnets/{subnet}",
            network_id.trim_end_matches('/')
        )));
        properties.public_ip_address = None;
        properties
            .private_ip_allocation_method
            .get_or_insert(IpAllocationMethod::DYNAMIC);
        self
    }

    pub fn with_private_ip_address_static<T: Into<String>>(mut self, ip: T) -> Self {
        self.inner.properties.private_ip_allocation_method = Some(IpAllocationMethod::STATIC);
        self.inner.properties.private_ip_address = Some(ip.into());
        self
    }

    pub fn with_private_ip_address_dynamic(mut self) -> Self {
        self.inner.properties.private_ip_allocation_method = Some(IpAllocationMethod::DYNAMIC);
        self.inner.properties.private_ip_address = None;
        self
    }
}

impl ChildDefinition<LoadBalancerDefinition, Probe> {
    pub fn with_port(mut self, port: i32) -> Self {
        self.inner.properties.port = Some(port);
        self
    }

    /// Sets the path probed by HTTP probes.
    pub fn with_request_path<T: Into<String>>(mut self, path: T) -> Self {
        self.inner.properties.request_path = Some(path.into());
        self
    }

    pub fn with_interval_in_seconds(mut self, seconds: i32) -> Self {
        self.inner.properties.interval_in_seconds = Some(seconds);
        self
    }

    /// Sets the number of failed probes before a backend is considered
    /// unhealthy.
    pub fn with_number_of_probes(mut self, count: i32) -> Self {
        self.inner.properties.number_of_probes = Some(count);
        self
    }
}

impl ChildDefinition<LoadBalancerDefinition, LoadBalancingRule> {
    pub fn with_protocol<T: Into<TransportProtocol>>(mut self, v: T) -> Self {
        self.inner.properties.protocol = Some(v.into());
        self
    }

    /// Receives traffic on the frontend named `name`.
    pub fn from_frontend<T: Into<String>>(mut self, name: T) -> Self {
        self.inner.properties.frontend_ip_configuration = by_name(name);
        self
    }

    pub fn from_frontend_port(mut self, port: i32) -> Self {
        self.inner.properties.frontend_port = Some(port);
        self
    }

    /// Sends traffic to the backend named `name`.
    pub fn to_backend<T: Into<String>>(mut self, name: T) -> Self {
        self.inner.properties.backend_address_pool = by_name(name);
        self
    }

    pub fn to_backend_port(mut self, port: i32) -> Self {
        self.inner.properties.backend_port = Some(port);
        self
    }

    /// Uses the probe named `name` to check the backend health.
    pub fn with_probe<T: Into<String>>(mut self, name: T) -> Self {
        self.inner.properties.probe = by_name(name);
        self
    }

    pub fn with_idle_timeout_in_minutes(mut self, minutes: i32) -> Self {
        self.inner.properties.idle_timeout_in_minutes = Some(minutes);
        self
    }

    pub fn with_floating_ip(mut self, enabled: bool) -> Self {
        self.inner.properties.enable_floating_ip = Some(enabled);
        self
    }

    pub fn with_load_distribution<T: Into<LoadDistribution>>(mut self, v: T) -> Self {
        self.inner.properties.load_distribution = Some(v.into());
        self
    }
}

impl ChildDefinition<LoadBalancerDefinition, InboundNatRule> {
    pub fn with_protocol<T: Into<TransportProtocol>>(mut self, v: T) -> Self {
        self.inner.properties.protocol = Some(v.into());
        self
    }

    pub fn from_frontend<T: Into<String>>(mut self, name: T) -> Self {
        self.inner.properties.frontend_ip_configuration = by_name(name);
        self
    }

    pub fn from_frontend_port(mut self, port: i32) -> Self {
        self.inner.properties.frontend_port = Some(port);
        self
    }

    pub fn to_backend_port(mut self, port: i32) -> Self {
        self.inner.properties.backend_port = Some(port);
        self
    }

    pub fn with_idle_timeout_in_minutes(mut self, minutes: i32) -> Self {
        self.inner.properties.idle_timeout_in_minutes = Some(minutes);
        self
    }

    pub fn with_floating_ip(mut self, enabled: bool) -> Self {
        self.inner.properties.enable_floating_ip = Some(enabled);
        self
    }
}

impl ChildDefinition<LoadBalancerDefinition, InboundNatPool> {
    pub fn with_protocol<T: Into<TransportProtocol>>(mut self, v: T) -> Self {
        self.inner.properties.protocol = Some(v.into());
        self
    }

    pub fn from_frontend<T: Into<String>>(mut self, name: T) -> Self {
        self.inner.properties.frontend_ip_configuration = by_name(name);
        self
    }

    pub fn from_frontend_port_range(mut self, start: i32, end: i32) -> Self {
        self.inner.properties.frontend_port_range_start = Some(start);
        self.inner.properties.frontend_port_range_end = Some(end);
        self
    }

    pub fn to_backend_port(mut self, port: i32) -> Self {
        self.inner.properties.backend_port = Some(port);
        self
    }
}
