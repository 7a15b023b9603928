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
    Attach, ChildDefinition, Collection, Definition, DefinitionError, Draft, Network,
    NetworkManager, NetworkSecurityGroup, PublicIpAddress, by_name, check_region, create_network,
    create_public_ip, definition_setters, find, remove, resolve, upsert, wrapper,
};
use crate::Result;
use crate::model::*;
use crate::resource_id::{ResourceId, parent_id};

/// The name of the primary IP configuration in new network interfaces.
pub const PRIMARY_IP_CONFIGURATION: &str = "primary";

/// The network interfaces in a subscription.
pub type NetworkInterfaces = Collection<NetworkInterface>;

/// A network interface.
#[derive(Clone, Debug)]
pub struct NetworkInterface {
    manager: NetworkManager,
    inner: crate::model::NetworkInterface,
}

wrapper!(NetworkInterface, crate::model::NetworkInterface, network_interfaces);

impl NetworkInterface {
    pub fn ip_configurations(&self) -> &[NetworkInterfaceIpConfiguration] {
        &self.inner.properties.ip_configurations
    }

    /// The primary IP configuration.
    ///
    /// If the service does not flag any configuration as primary, this is the
    /// first configuration.
    pub fn primary_ip_configuration(&self) -> Option<&NetworkInterfaceIpConfiguration> {
        primary(&self.inner.properties.ip_configurations)
    }

    pub fn primary_private_ip(&self) -> Option<&str> {
        self.primary_ip_configuration()
            .and_then(|c| c.properties.private_ip_address.as_deref())
    }

    pub fn primary_private_ip_allocation_method(&self) -> Option<&IpAllocationMethod> {
        self.primary_ip_configuration()
            .and_then(|c| c.properties.private_ip_allocation_method.as_ref())
    }

    /// The id of the subnet used by the primary IP configuration.
    pub fn primary_subnet_id(&self) -> Option<&str> {
        self.primary_ip_configuration()
            .and_then(|c| c.properties.subnet.as_ref())
            .map(|s| s.id.as_str())
    }

    /// The id of the network used by the primary IP configuration.
    pub fn primary_network_id(&self) -> Option<String> {
        self.primary_subnet_id().and_then(parent_id)
    }

    pub fn primary_public_ip_address_id(&self) -> Option<&str> {
        self.primary_ip_configuration()
            .and_then(|c| c.properties.public_ip_address.as_ref())
            .map(|p| p.id.as_str())
    }

    pub fn network_security_group_id(&self) -> Option<&str> {
        self.inner
            .properties
            .network_security_group
            .as_ref()
            .map(|n| n.id.as_str())
    }

    pub fn is_ip_forwarding_enabled(&self) -> bool {
        self.inner.properties.enable_ip_forwarding.unwrap_or_default()
    }

    pub fn is_accelerated_networking_enabled(&self) -> bool {
        self.inner
            .properties
            .enable_accelerated_networking
            .unwrap_or_default()
    }

    pub fn dns_servers(&self) -> &[String] {
        self.inner
            .properties
            .dns_settings
            .as_ref()
            .map(|d| d.dns_servers.as_slice())
            .unwrap_or_default()
    }

    pub fn applied_dns_servers(&self) -> &[String] {
        self.inner
            .properties
            .dns_settings
            .as_ref()
            .map(|d| d.applied_dns_servers.as_slice())
            .unwrap_or_default()
    }

    pub fn internal_dns_name_label(&self) -> Option<&str> {
        self.inner
            .properties
            .dns_settings
            .as_ref()
            .and_then(|d| d.internal_dns_name_label.as_deref())
    }

    pub fn mac_address(&self) -> Option<&str> {
        self.inner.properties.mac_address.as_deref()
    }

    /// The virtual machine using this interface, if any.
    pub fn virtual_machine_id(&self) -> Option<&str> {
        self.inner
            .properties
            .virtual_machine
            .as_ref()
            .map(|v| v.id.as_str())
    }

    /// Fetches the network used by the primary IP configuration.
    pub async fn get_primary_network(&self) -> Result<Option<Network>> {
        match self.primary_network_id() {
            None => Ok(None),
            Some(id) => self.manager.networks().get_by_id(&id).await.map(Some),
        }
    }

    /// Fetches the public IP address of the primary IP configuration.
    pub async fn get_primary_public_ip_address(&self) -> Result<Option<PublicIpAddress>> {
        match self.primary_public_ip_address_id() {
            None => Ok(None),
            Some(id) => self
                .manager
                .public_ip_addresses()
                .get_by_id(id)
                .await
                .map(Some),
        }
    }

    pub async fn get_network_security_group(&self) -> Result<Option<NetworkSecurityGroup>> {
        match self.network_security_group_id() {
            None => Ok(None),
            Some(id) => self
                .manager
                .network_security_groups()
                .get_by_id(id)
                .await
                .map(Some),
        }
    }

    /// Starts an update of this network interface.
    pub fn update(self) -> NetworkInterfaceUpdate {
        let network = self
            .primary_network_id()
            .map_or(NetworkChoice::Unchanged, NetworkChoice::Existing);
        NetworkInterfaceDefinition {
            draft: Draft::existing(self.manager, self.inner),
            network,
            new_public_ip: false,
        }
    }
}

impl Collection<NetworkInterface> {
    /// Starts the definition of a new network interface.
    pub fn define<T: Into<String>>(&self, name: T) -> NetworkInterfaceDefinition {
        NetworkInterfaceDefinition {
            draft: Draft::new(
                self.manager.clone(),
                crate::model::NetworkInterface::new().set_name(name),
            ),
            network: NetworkChoice::Unchanged,
            new_public_ip: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum NetworkChoice {
    Unchanged,
    Existing(String),
    New(String),
}

/// The definition of a new network interface.
///
/// New interfaces require a primary network, either an existing network or
/// a new one created with the interface. The primary IP configuration is
/// named [PRIMARY_IP_CONFIGURATION] and uses a dynamic private address unless
/// configured otherwise.
#[derive(Clone, Debug)]
pub struct NetworkInterfaceDefinition {
    draft: Draft<crate::model::NetworkInterface>,
    network: NetworkChoice,
    new_public_ip: bool,
}

/// Updates use the same setters as new definitions.
pub type NetworkInterfaceUpdate = NetworkInterfaceDefinition;

impl Definition for NetworkInterfaceDefinition {
    type Model = crate::model::NetworkInterface;
}

impl NetworkInterfaceDefinition {
    definition_setters!();

    /// Uses an existing network for the primary IP configuration.
    ///
    /// Unless [with_subnet][Self::with_subnet] is called, the interface uses
    /// the first subnet in the network.
    pub fn with_existing_primary_network<T: Into<String>>(mut self, network_id: T) -> Self {
        let network_id = network_id.into();
        let subnet = &mut self.primary().properties.subnet;
        // A subnet id from another network no longer applies.
        if subnet
            .as_ref()
            .and_then(|s| parent_id(&s.id))
            .is_some_and(|p| !super::same_id(&p, &network_id))
        {
            *subnet = None;
        }
        self.network = NetworkChoice::Existing(network_id);
        self
    }

    /// Creates a new network, with a single subnet spanning `cidr`, for the
    /// primary IP configuration.
    pub fn with_new_primary_network<T: Into<String>>(mut self, cidr: T) -> Self {
        self.network = NetworkChoice::New(cidr.into());
        self.primary().properties.subnet = None;
        self
    }

    /// Sets the subnet, in the primary network, for the primary IP
    /// configuration.
    pub fn with_subnet<T: Into<String>>(mut self, name: T) -> Self {
        self.primary().properties.subnet = by_name(name);
        self
    }

    pub fn with_primary_private_ip_address_dynamic(mut self) -> Self {
        let properties = &mut self.primary().properties;
        properties.private_ip_allocation_method = Some(IpAllocationMethod::DYNAMIC);
        properties.private_ip_address = None;
        self
    }

    pub fn with_primary_private_ip_address_static<T: Into<String>>(mut self, ip: T) -> Self {
        let properties = &mut self.primary().properties;
        properties.private_ip_allocation_method = Some(IpAllocationMethod::STATIC);
        properties.private_ip_address = Some(ip.into());
        self
    }

    /// Creates a new public IP address for the primary IP configuration.
    pub fn with_new_primary_public_ip_address(mut self) -> Self {
        self.new_public_ip = true;
        self
    }

    pub fn with_existing_primary_public_ip_address<T: Into<String>>(mut self, id: T) -> Self {
        self.new_public_ip = false;
        self.primary().properties.public_ip_address = Some(SubResource::new(id));
        self
    }

    pub fn without_primary_public_ip_address(mut self) -> Self {
        self.new_public_ip = false;
        self.primary().properties.public_ip_address = None;
        self
    }

    pub fn with_existing_network_security_group<T: Into<String>>(mut self, id: T) -> Self {
        self.draft.inner.properties.network_security_group = Some(SubResource::new(id));
        self
    }

    pub fn without_network_security_group(mut self) -> Self {
        self.draft.inner.properties.network_security_group = None;
        self
    }

    /// Adds the primary IP configuration to a load balancer backend pool.
    pub fn with_existing_load_balancer_backend(mut self, load_balancer_id: &str, pool: &str) -> Self {
        let id = format!(
            "{}/backendAddressPools/{pool}",
            load_balancer_id.trim_end_matches('/')
        );
        let pools = &mut self.primary().properties.load_balancer_backend_address_pools;
        if !pools.iter().any(|p| super::same_id(&p.id, &id)) {
            pools.push(SubResource::new(id));
        }
        self
    }

    /// Associates the primary IP configuration with a load balancer inbound
    /// NAT rule.
    pub fn with_existing_load_balancer_inbound_nat_rule(
        mut self,
        load_balancer_id: &str,
        rule: &str,
    ) -> Self {
        let id = format!(
            "{}/inboundNatRules/{rule}",
            load_balancer_id.trim_end_matches('/')
        );
        let rules = &mut self.primary().properties.load_balancer_inbound_nat_rules;
        if !rules.iter().any(|r| super::same_id(&r.id, &id)) {
            rules.push(SubResource::new(id));
        }
        self
    }

    pub fn without_load_balancer_backends(mut self) -> Self {
        self.primary()
            .properties
            .load_balancer_backend_address_pools
            .clear();
        self
    }

    pub fn without_load_balancer_inbound_nat_rules(mut self) -> Self {
        self.primary()
            .properties
            .load_balancer_inbound_nat_rules
            .clear();
        self
    }

    pub fn with_ip_forwarding(mut self) -> Self {
        self.draft.inner.properties.enable_ip_forwarding = Some(true);
        self
    }

    pub fn without_ip_forwarding(mut self) -> Self {
        self.draft.inner.properties.enable_ip_forwarding = Some(false);
        self
    }

    pub fn with_accelerated_networking(mut self) -> Self {
        self.draft.inner.properties.enable_accelerated_networking = Some(true);
        self
    }

    pub fn without_accelerated_networking(mut self) -> Self {
        self.draft.inner.properties.enable_accelerated_networking = Some(false);
        self
    }

    pub fn with_dns_server<T: Into<String>>(mut self, ip: T) -> Self {
        let ip = ip.into();
        let servers = &mut self.dns_settings().dns_servers;
        if !servers.contains(&ip) {
            servers.push(ip);
        }
        self
    }

    pub fn without_dns_server(mut self, ip: &str) -> Self {
        self.dns_settings().dns_servers.retain(|s| s != ip);
        self
    }

    pub fn with_internal_dns_name_label<T: Into<String>>(mut self, label: T) -> Self {
        self.dns_settings().internal_dns_name_label = Some(label.into());
        self
    }

    /// Starts the definition of a secondary IP configuration.
    ///
    /// Unless configured otherwise, secondary configurations use the subnet of
    /// the primary configuration and a dynamic private address.
    pub fn define_secondary_ip_configuration<T: Into<String>>(
        self,
        name: T,
    ) -> ChildDefinition<Self, NetworkInterfaceIpConfiguration> {
        ChildDefinition::new(
            self,
            NetworkInterfaceIpConfiguration::new()
                .set_name(name)
                .set_properties(NetworkInterfaceIpConfigurationProperties::new().set_primary(false)),
        )
    }

    pub fn update_ip_configuration(
        self,
        name: &str,
    ) -> ChildDefinition<Self, NetworkInterfaceIpConfiguration> {
        let configuration = find(&self.draft.inner.properties.ip_configurations, name)
            .cloned()
            .unwrap_or_else(|| NetworkInterfaceIpConfiguration::new().set_name(name));
        ChildDefinition::new(self, configuration)
    }

    /// Removes a secondary IP configuration. The primary configuration cannot
    /// be removed.
    pub fn without_ip_configuration(mut self, name: &str) -> Self {
        let is_primary = primary(&self.draft.inner.properties.ip_configurations)
            .is_some_and(|c| c.name.eq_ignore_ascii_case(name));
        if !is_primary {
            remove(&mut self.draft.inner.properties.ip_configurations, name);
        }
        self
    }

    /// Creates the network interface, and any implicit resources.
    pub async fn create(mut self) -> Result<NetworkInterface> {
        check_region(&self.draft.inner.location, self.draft.name())?;
        self.draft.check_resource_group()?;
        self.reconcile().await?;
        self.draft.submit().await
    }

    /// Applies the update, creating any new implicit resources.
    pub async fn apply(mut self) -> Result<NetworkInterface> {
        self.reconcile().await?;
        self.draft.submit().await
    }

    fn primary(&mut self) -> &mut NetworkInterfaceIpConfiguration {
        let configurations = &mut self.draft.inner.properties.ip_configurations;
        let index = match primary_index(configurations) {
            Some(i) => i,
            None => {
                configurations.push(
                    NetworkInterfaceIpConfiguration::new()
                        .set_name(PRIMARY_IP_CONFIGURATION)
                        .set_properties(
                            NetworkInterfaceIpConfigurationProperties::new().set_primary(true),
                        ),
                );
                configurations.len() - 1
            }
        };
        &mut configurations[index]
    }

    fn dns_settings(&mut self) -> &mut NetworkInterfaceDnsSettings {
        self.draft
            .inner
            .properties
            .dns_settings
            .get_or_insert_with(NetworkInterfaceDnsSettings::new)
    }

    async fn reconcile(&mut self) -> Result<()> {
        let owner = self.draft.name().to_string();
        let network_id = match std::mem::replace(&mut self.network, NetworkChoice::Unchanged) {
            NetworkChoice::New(cidr) => {
                let network = create_network(
                    &self.draft.manager,
                    &self.draft.resource_group_name,
                    &self.draft.inner.location,
                    &owner,
                    &cidr,
                    super::DEFAULT_SUBNET_NAME,
                )
                .await?;
                self.primary().properties.subnet = by_name(super::DEFAULT_SUBNET_NAME);
                Some(network.id().to_string())
            }
            NetworkChoice::Existing(id) => {
                if self.primary().properties.subnet.is_none() {
                    let network = self.draft.manager.networks().get_by_id(&id).await?;
                    let subnet = network
                        .subnets()
                        .first()
                        .ok_or_else(|| DefinitionError::NoSubnets(network.name().to_string()))?;
                    tracing::debug!(network = %id, subnet = %subnet.name, "using first subnet");
                    self.primary().properties.subnet = Some(SubResource::new(&subnet.id));
                }
                Some(id)
            }
            NetworkChoice::Unchanged => self
                .primary()
                .properties
                .subnet
                .as_ref()
                .and_then(|s| parent_id(&s.id)),
        };
        let network_id = network_id.ok_or_else(|| DefinitionError::Incomplete {
            resource: owner.clone(),
            what: "a primary network",
        })?;
        let network = ResourceId::parse(&network_id)?;

        if std::mem::take(&mut self.new_public_ip) {
            let address = create_public_ip(
                &self.draft.manager,
                &self.draft.resource_group_name,
                &self.draft.inner.location,
                &owner,
            )
            .await?;
            self.primary().properties.public_ip_address = Some(SubResource::new(address.id()));
        }

        let primary_subnet = self.primary().properties.subnet.clone();
        for configuration in self.draft.inner.properties.ip_configurations.iter_mut() {
            let properties = &mut configuration.properties;
            if properties.subnet.is_none() {
                properties.subnet = primary_subnet.clone();
            }
            resolve(&mut properties.subnet, &network, "subnets");
            if properties.private_ip_allocation_method.is_none() {
                properties.private_ip_allocation_method = Some(if properties.private_ip_address.is_some() {
                    IpAllocationMethod::STATIC
                } else {
                    IpAllocationMethod::DYNAMIC
                });
            }
        }
        Ok(())
    }
}

impl Attach<NetworkInterfaceIpConfiguration> for NetworkInterfaceDefinition {
    fn attach_child(&mut self, child: NetworkInterfaceIpConfiguration) {
        upsert(&mut self.draft.inner.properties.ip_configurations, child);
    }
}

impl ChildDefinition<NetworkInterfaceDefinition, NetworkInterfaceIpConfiguration> {
    pub fn with_private_ip_address_dynamic(mut self) -> Self {
        self.inner.properties.private_ip_allocation_method = Some(IpAllocationMethod::DYNAMIC);
        self.inner.properties.private_ip_address = None;
        self
    }

    pub fn with_private_ip_address_static<T: Into<String>>(mut self, ip: T) -> Self {
        self.inner.properties.private_ip_allocation_method = Some(IpAllocationMethod::STATIC);
        self.inner.properties.private_ip_address = Some(ip.into());
        self
    }

    pub fn with_private_ip_version<T: Into<IpVersion>>(mut self, v: T) -> Self {
        self.inner.properties.private_ip_address_version = Some(v.into());
        self
    }

    /// Uses a subnet in the primary network.
    pub fn with_subnet<T: Into<String>>(mut self, name: T) -> Self {
        self.inner.properties.subnet = by_name(name);
        self
    }

    pub fn with_existing_public_ip_address<T: Into<String>>(mut self, id: T) -> Self {
        self.inner.properties.public_ip_address = Some(SubResource::new(id));
        self
    }

    pub fn without_public_ip_address(mut self) -> Self {
        self.inner.properties.public_ip_address = None;
        self
    }
}

fn primary_index(configurations: &[NetworkInterfaceIpConfiguration]) -> Option<usize> {
    configurations
        .iter()
        .position(|c| c.properties.primary == Some(true))
        .or_else(|| (!configurations.is_empty()).then_some(0))
}

fn primary(configurations: &[NetworkInterfaceIpConfiguration]) -> Option<&NetworkInterfaceIpConfiguration> {
    primary_index(configurations).map(|i| &configurations[i])
}
