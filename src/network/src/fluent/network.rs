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
    Attach, ChildDefinition, Collection, Definition, Draft, NetworkManager, Peerings, check_region,
    definition_setters, find, remove, upsert, wrapper,
};
use crate::Result;
use crate::model::*;

/// The address space used when a network definition does not include any.
pub const DEFAULT_ADDRESS_SPACE: &str = "10.0.0.0/16";

/// The name of the subnet created when a new network definition does not
/// include any.
pub const DEFAULT_SUBNET_NAME: &str = "subnet1";

/// The virtual networks in a subscription.
pub type Networks = Collection<Network>;

/// A virtual network.
#[derive(Clone, Debug)]
pub struct Network {
    manager: NetworkManager,
    inner: VirtualNetwork,
}

wrapper!(Network, VirtualNetwork, virtual_networks);

impl Network {
    /// The address spaces (CIDR blocks) of the network.
    pub fn address_spaces(&self) -> &[String] {
        self.inner
            .properties
            .address_space
            .as_ref()
            .map(|a| a.address_prefixes.as_slice())
            .unwrap_or_default()
    }

    /// The DNS servers, empty if the network uses the default DNS.
    pub fn dns_server_ips(&self) -> &[String] {
        self.inner
            .properties
            .dhcp_options
            .as_ref()
            .map(|d| d.dns_servers.as_slice())
            .unwrap_or_default()
    }

    pub fn subnets(&self) -> &[Subnet] {
        &self.inner.properties.subnets
    }

    /// Finds a subnet by name, ignoring case.
    pub fn subnet(&self, name: &str) -> Option<&Subnet> {
        find(&self.inner.properties.subnets, name)
    }

    pub fn is_ddos_protection_enabled(&self) -> bool {
        self.inner
            .properties
            .enable_ddos_protection
            .unwrap_or_default()
    }

    pub fn is_vm_protection_enabled(&self) -> bool {
        self.inner.properties.enable_vm_protection.unwrap_or_default()
    }

    /// The peerings of this network.
    pub fn peerings(&self) -> Peerings {
        Peerings::new(self.manager.clone(), self.inner.id.clone())
    }

    /// Starts an update of this network.
    pub fn update(self) -> NetworkUpdate {
        NetworkDefinition {
            draft: Draft::existing(self.manager, self.inner),
        }
    }
}

impl Collection<Network> {
    /// Starts the definition of a new virtual network.
    pub fn define<T: Into<String>>(&self, name: T) -> NetworkDefinition {
        NetworkDefinition {
            draft: Draft::new(self.manager.clone(), VirtualNetwork::new().set_name(name)),
        }
    }
}

/// The definition of a new virtual network.
///
/// If the definition has no address spaces, the network uses
/// [DEFAULT_ADDRESS_SPACE]. If a new network has no subnets, it gets a single
/// subnet named [DEFAULT_SUBNET_NAME] spanning the first address space.
#[derive(Clone, Debug)]
pub struct NetworkDefinition {
    draft: Draft<VirtualNetwork>,
}

/// Updates use the same setters as new definitions.
pub type NetworkUpdate = NetworkDefinition;

impl Definition for NetworkDefinition {
    type Model = VirtualNetwork;
}

impl NetworkDefinition {
    definition_setters!();

    /// Adds an address space (a CIDR block) to the network.
    pub fn with_address_space<T: Into<String>>(mut self, cidr: T) -> Self {
        let cidr = cidr.into();
        let space = self
            .draft
            .inner
            .properties
            .address_space
            .get_or_insert_with(AddressSpace::new);
        if !space.address_prefixes.contains(&cidr) {
            space.address_prefixes.push(cidr);
        }
        self
    }

    pub fn without_address_space(mut self, cidr: &str) -> Self {
        if let Some(space) = self.draft.inner.properties.address_space.as_mut() {
            space.address_prefixes.retain(|p| p != cidr);
        }
        self
    }

    pub fn with_dns_server<T: Into<String>>(mut self, ip_address: T) -> Self {
        self.draft
            .inner
            .properties
            .dhcp_options
            .get_or_insert_with(DhcpOptions::default)
            .dns_servers
            .push(ip_address.into());
        self
    }

    /// Adds a subnet with the given address prefix.
    pub fn with_subnet<N: Into<String>, C: Into<String>>(self, name: N, cidr: C) -> Self {
        self.define_subnet(name).with_address_prefix(cidr).attach()
    }

    /// Replaces all the subnets.
    pub fn with_subnets<T, N, C>(mut self, subnets: T) -> Self
    where
        T: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        self.draft.inner.properties.subnets.clear();
        subnets
            .into_iter()
            .fold(self, |definition, (name, cidr)| definition.with_subnet(name, cidr))
    }

    /// Starts the definition of a new subnet.
    pub fn define_subnet<T: Into<String>>(self, name: T) -> ChildDefinition<Self, Subnet> {
        ChildDefinition::new(self, Subnet::new().set_name(name))
    }

    /// Starts the update of a subnet, or the definition of a new one if the
    /// subnet does not exist.
    pub fn update_subnet(self, name: &str) -> ChildDefinition<Self, Subnet> {
        let subnet = find(&self.draft.inner.properties.subnets, name)
            .cloned()
            .unwrap_or_else(|| Subnet::new().set_name(name));
        ChildDefinition::new(self, subnet)
    }

    pub fn without_subnet(mut self, name: &str) -> Self {
        remove(&mut self.draft.inner.properties.subnets, name);
        self
    }

    pub fn with_ddos_protection(mut self) -> Self {
        self.draft.inner.properties.enable_ddos_protection = Some(true);
        self
    }

    pub fn without_ddos_protection(mut self) -> Self {
        self.draft.inner.properties.enable_ddos_protection = Some(false);
        self
    }

    pub fn with_vm_protection(mut self) -> Self {
        self.draft.inner.properties.enable_vm_protection = Some(true);
        self
    }

    pub fn without_vm_protection(mut self) -> Self {
        self.draft.inner.properties.enable_vm_protection = Some(false);
        self
    }

    /// Creates the network and waits until it is provisioned.
    pub async fn create(mut self) -> Result<Network> {
        check_region(&self.draft.inner.location, self.draft.name())?;
        self.reconcile();
        self.draft.submit().await
    }

    /// Applies the update and waits until it completes.
    pub async fn apply(mut self) -> Result<Network> {
        self.reconcile();
        self.draft.submit().await
    }

    fn reconcile(&mut self) {
        let properties = &mut self.draft.inner.properties;
        let space = properties
            .address_space
            .get_or_insert_with(AddressSpace::new);
        if space.address_prefixes.is_empty() {
            tracing::debug!(
                network = %self.draft.inner.name,
                DEFAULT_ADDRESS_SPACE,
                "using default address space"
            );
            space.address_prefixes.push(DEFAULT_ADDRESS_SPACE.to_string());
        }
        if !self.draft.is_update && properties.subnets.is_empty() {
            let prefix = space.address_prefixes[0].clone();
            tracing::debug!(
                network = %self.draft.inner.name,
                DEFAULT_SUBNET_NAME,
                %prefix,
                "using default subnet"
            );
            properties.subnets.push(
                Subnet::new()
                    .set_name(DEFAULT_SUBNET_NAME)
                    .set_properties(SubnetProperties::new().set_address_prefix(prefix)),
            );
        }
    }
}

impl Attach<Subnet> for NetworkDefinition {
    fn attach_child(&mut self, child: Subnet) {
        upsert(&mut self.draft.inner.properties.subnets, child);
    }
}

impl ChildDefinition<NetworkDefinition, Subnet> {
    /// Sets the address prefix (a CIDR block) of the subnet.
    pub fn with_address_prefix<T: Into<String>>(mut self, cidr: T) -> Self {
        self.inner.properties.address_prefix = Some(cidr.into());
        self
    }

    /// Associates an existing network security group with the subnet.
    pub fn with_existing_network_security_group<T: Into<String>>(mut self, id: T) -> Self {
        self.inner.properties.network_security_group = Some(SubResource::new(id));
        self
    }

    pub fn without_network_security_group(mut self) -> Self {
        self.inner.properties.network_security_group = None;
        self
    }

    /// Associates an existing route table with the subnet.
    pub fn with_existing_route_table<T: Into<String>>(mut self, id: T) -> Self {
        self.inner.properties.route_table = Some(SubResource::new(id));
        self
    }

    pub fn without_route_table(mut self) -> Self {
        self.inner.properties.route_table = None;
        self
    }

    /// Enables a service endpoint, e.g. `Microsoft.Storage`.
    pub fn with_access_from_service<T: Into<String>>(mut self, service: T) -> Self {
        let service = service.into();
        let endpoints = &mut self.inner.properties.service_endpoints;
        if !endpoints
            .iter()
            .any(|e| e.service.eq_ignore_ascii_case(&service))
        {
            endpoints.push(ServiceEndpoint::new(service));
        }
        self
    }

    pub fn without_access_from_service(mut self, service: &str) -> Self {
        self.inner
            .properties
            .service_endpoints
            .retain(|e| !e.service.eq_ignore_ascii_case(service));
        self
    }
}
