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

use super::{DefinitionError, NetworkManager, same_id};
use crate::Result;
use crate::model::*;
use crate::resource_id::{ResourceId, subscription_from_id};
use futures::TryStreamExt;
use gax::lro::Poller;

/// How a peering uses the virtual network gateways of its networks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GatewayUse {
    /// Neither network uses the gateway of the other network.
    #[default]
    None,
    /// The remote network uses the gateway in this network.
    ByRemoteNetwork,
    /// This network uses the gateway in the remote network.
    OnRemoteNetwork,
}

/// The peerings of a virtual network.
///
/// Peerings connect two networks. When both networks are in the same
/// subscription, creating (or deleting) a peering on one network also creates
/// (or deletes) the matching peering on the remote network.
#[derive(Clone, Debug)]
pub struct Peerings {
    manager: NetworkManager,
    network_id: String,
}

impl Peerings {
    pub(crate) fn new(manager: NetworkManager, network_id: String) -> Self {
        Self {
            manager,
            network_id,
        }
    }

    /// The id of the network owning these peerings.
    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    /// Starts the definition of a new peering.
    pub fn define<T: Into<String>>(&self, name: T) -> PeeringDefinition {
        PeeringDefinition {
            manager: self.manager.clone(),
            network_id: self.network_id.clone(),
            inner: VirtualNetworkPeering::new().set_name(name),
            remote: RemoteSettings::default(),
            is_update: false,
        }
    }

    pub async fn get_by_name(&self, name: &str) -> Result<NetworkPeering> {
        let network = ResourceId::parse(&self.network_id)?;
        let inner = get_peering(&self.manager, &network, name).await?;
        Ok(self.wrap(inner))
    }

    /// Finds the peering connecting to `remote_network_id`, if any.
    pub async fn get_by_remote_network(&self, remote_network_id: &str) -> Result<Option<NetworkPeering>> {
        let network = ResourceId::parse(&self.network_id)?;
        let found = find_peering_to(&self.manager, &network, remote_network_id).await?;
        Ok(found.map(|inner| self.wrap(inner)))
    }

    pub async fn list(&self) -> Result<Vec<NetworkPeering>> {
        let network = ResourceId::parse(&self.network_id)?;
        let peerings = list_peerings(&self.manager, &network).await?;
        Ok(peerings.into_iter().map(|inner| self.wrap(inner)).collect())
    }

    /// Deletes a peering, and the matching peering on the remote network.
    ///
    /// The remote peering is only deleted if the remote network is in the
    /// same subscription.
    pub async fn delete_by_name(&self, name: &str) -> Result<()> {
        let network = ResourceId::parse(&self.network_id)?;
        let peering = match get_peering(&self.manager, &network, name).await {
            Ok(p) => p,
            Err(e) if e.is_not_found() => return Ok(()),
            Err(e) => return Err(e),
        };
        delete_peering(&self.manager, &network, name).await?;

        let Some(remote_id) = peering
            .properties
            .remote_virtual_network
            .map(|r| r.id)
            .filter(|id| in_subscription(id, network.subscription_id()))
        else {
            return Ok(());
        };
        let remote = ResourceId::parse(&remote_id)?;
        if let Some(reverse) = find_peering_to(&self.manager, &remote, &self.network_id).await? {
            tracing::debug!(peering = %reverse.name, network = %remote_id, "deleting remote peering");
            delete_peering(&self.manager, &remote, &reverse.name).await?;
        }
        Ok(())
    }

    fn wrap(&self, inner: VirtualNetworkPeering) -> NetworkPeering {
        NetworkPeering {
            manager: self.manager.clone(),
            network_id: self.network_id.clone(),
            inner,
        }
    }
}

/// A peering between two virtual networks.
#[derive(Clone, Debug)]
pub struct NetworkPeering {
    manager: NetworkManager,
    network_id: String,
    inner: VirtualNetworkPeering,
}

impl NetworkPeering {
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The id of the network owning this peering.
    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    pub fn inner(&self) -> &VirtualNetworkPeering {
        &self.inner
    }

    pub fn state(&self) -> Option<&PeeringState> {
        self.inner.properties.peering_state.as_ref()
    }

    pub fn remote_network_id(&self) -> &str {
        self.inner
            .properties
            .remote_virtual_network
            .as_ref()
            .map(|r| r.id.as_str())
            .unwrap_or_default()
    }

    /// Returns true if both networks are in the same subscription.
    pub fn is_same_subscription(&self) -> bool {
        subscription_from_id(&self.network_id)
            .is_some_and(|s| in_subscription(self.remote_network_id(), s))
    }

    pub fn is_access_from_remote_network_allowed(&self) -> bool {
        self.inner
            .properties
            .allow_virtual_network_access
            .unwrap_or_default()
    }

    pub fn is_traffic_forwarding_from_remote_network_allowed(&self) -> bool {
        self.inner
            .properties
            .allow_forwarded_traffic
            .unwrap_or_default()
    }

    pub fn gateway_use(&self) -> GatewayUse {
        let properties = &self.inner.properties;
        if properties.allow_gateway_transit.unwrap_or_default() {
            GatewayUse::ByRemoteNetwork
        } else if properties.use_remote_gateways.unwrap_or_default() {
            GatewayUse::OnRemoteNetwork
        } else {
            GatewayUse::None
        }
    }

    /// Fetches the matching peering on the remote network.
    ///
    /// Returns `None` if the remote network has no peering back to this
    /// network.
    pub async fn get_remote_peering(&self) -> Result<Option<NetworkPeering>> {
        let remote = ResourceId::parse(self.remote_network_id())?;
        let found = find_peering_to(&self.manager, &remote, &self.network_id).await?;
        Ok(found.map(|inner| NetworkPeering {
            manager: self.manager.clone(),
            network_id: remote.to_string(),
            inner,
        }))
    }

    /// Fetches the current state of the peering.
    pub async fn refresh(&mut self) -> Result<()> {
        let network = ResourceId::parse(&self.network_id)?;
        self.inner = get_peering(&self.manager, &network, &self.inner.name).await?;
        Ok(())
    }

    /// Starts an update of this peering.
    pub fn update(self) -> PeeringUpdate {
        PeeringDefinition {
            manager: self.manager,
            network_id: self.network_id,
            inner: self.inner,
            remote: RemoteSettings::default(),
            is_update: true,
        }
    }
}

// The settings for the matching peering on the remote network.
#[derive(Clone, Debug, Default)]
struct RemoteSettings {
    allow_virtual_network_access: Option<bool>,
    allow_forwarded_traffic: Option<bool>,
    allow_gateway_transit: Option<bool>,
    use_remote_gateways: Option<bool>,
}

/// The definition of a new peering.
///
/// Unless disabled, both networks can access each other. If the remote
/// network is in the same subscription, the matching peering on the remote
/// network is created (or updated) to mirror these settings.
#[derive(Clone, Debug)]
pub struct PeeringDefinition {
    manager: NetworkManager,
    network_id: String,
    inner: VirtualNetworkPeering,
    remote: RemoteSettings,
    is_update: bool,
}

/// Updates use the same setters as new definitions.
pub type PeeringUpdate = PeeringDefinition;

impl PeeringDefinition {
    /// Sets the id of the remote network.
    pub fn with_remote_network<T: Into<String>>(mut self, id: T) -> Self {
        self.inner.properties.remote_virtual_network = Some(SubResource::new(id));
        self
    }

    pub fn with_access_between_both_networks(mut self) -> Self {
        self.inner.properties.allow_virtual_network_access = Some(true);
        self.remote.allow_virtual_network_access = Some(true);
        self
    }

    pub fn without_access_from_either_network(mut self) -> Self {
        self.inner.properties.allow_virtual_network_access = Some(false);
        self.remote.allow_virtual_network_access = Some(false);
        self
    }

    /// Allows traffic forwarded by the remote network into this network.
    pub fn with_traffic_forwarding_from_remote_network(mut self) -> Self {
        self.inner.properties.allow_forwarded_traffic = Some(true);
        self
    }

    pub fn without_traffic_forwarding_from_remote_network(mut self) -> Self {
        self.inner.properties.allow_forwarded_traffic = Some(false);
        self
    }

    /// Allows traffic forwarded by this network into the remote network.
    pub fn with_traffic_forwarding_to_remote_network(mut self) -> Self {
        self.remote.allow_forwarded_traffic = Some(true);
        self
    }

    pub fn without_traffic_forwarding_to_remote_network(mut self) -> Self {
        self.remote.allow_forwarded_traffic = Some(false);
        self
    }

    pub fn with_traffic_forwarding_between_both_networks(self) -> Self {
        self.with_traffic_forwarding_from_remote_network()
            .with_traffic_forwarding_to_remote_network()
    }

    /// The remote network uses the virtual network gateway in this network.
    pub fn with_gateway_use_by_remote_network(mut self) -> Self {
        self.inner.properties.allow_gateway_transit = Some(true);
        self.inner.properties.use_remote_gateways = Some(false);
        self.remote.use_remote_gateways = Some(true);
        self.remote.allow_gateway_transit = Some(false);
        self
    }

    /// This network uses the virtual network gateway in the remote network.
    pub fn with_gateway_use_on_remote_network(mut self) -> Self {
        self.inner.properties.use_remote_gateways = Some(true);
        self.inner.properties.allow_gateway_transit = Some(false);
        self.remote.allow_gateway_transit = Some(true);
        self.remote.use_remote_gateways = Some(false);
        self
    }

    pub fn without_gateway_use(mut self) -> Self {
        self.inner.properties.allow_gateway_transit = Some(false);
        self.inner.properties.use_remote_gateways = Some(false);
        self.remote.allow_gateway_transit = Some(false);
        self.remote.use_remote_gateways = Some(false);
        self
    }

    /// The model sent to the service for the local peering.
    pub fn inner(&self) -> &VirtualNetworkPeering {
        &self.inner
    }

    /// Creates the peering, and the matching remote peering.
    pub async fn create(self) -> Result<NetworkPeering> {
        self.submit().await
    }

    /// Applies the update to the peering and the matching remote peering.
    pub async fn apply(self) -> Result<NetworkPeering> {
        self.submit().await
    }

    async fn submit(mut self) -> Result<NetworkPeering> {
        let network = ResourceId::parse(&self.network_id)?;
        let remote_id = self
            .inner
            .properties
            .remote_virtual_network
            .as_ref()
            .map(|r| r.id.clone())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| DefinitionError::Incomplete {
                resource: self.inner.name.clone(),
                what: "a remote network",
            })?;
        if !self.is_update {
            self.inner
                .properties
                .allow_virtual_network_access
                .get_or_insert(true);
        }

        let name = self.inner.name.clone();
        self.manager
            .client()
            .virtual_network_peerings()
            .create_or_update()
            .set_resource_group_name(network.resource_group_name())
            .set_parent_name(network.name())
            .set_name(&name)
            .set_resource(self.inner.clone())
            .poller()
            .until_done()
            .await?;

        if in_subscription(&remote_id, network.subscription_id()) {
            self.reconcile_remote(&network, &remote_id).await?;
        }

        // The peering state changes once the remote side exists.
        let inner = get_peering(&self.manager, &network, &name).await?;
        Ok(NetworkPeering {
            manager: self.manager,
            network_id: self.network_id,
            inner,
        })
    }

    async fn reconcile_remote(&self, network: &ResourceId, remote_id: &str) -> Result<()> {
        let remote = ResourceId::parse(remote_id)?;
        let existing = find_peering_to(&self.manager, &remote, &self.network_id).await?;
        let is_new = existing.is_none();
        let current = existing.unwrap_or_else(|| {
            VirtualNetworkPeering::new()
                .set_name(&self.inner.name)
                .set_properties(
                    VirtualNetworkPeeringProperties::new()
                        .set_remote_virtual_network(SubResource::new(network.to_string())),
                )
        });

        let mut desired = current.clone();
        let properties = &mut desired.properties;
        let local = &self.inner.properties;
        if let Some(v) = self
            .remote
            .allow_virtual_network_access
            .or(local.allow_virtual_network_access)
        {
            properties.allow_virtual_network_access = Some(v);
        }
        if let Some(v) = self.remote.allow_forwarded_traffic {
            properties.allow_forwarded_traffic = Some(v);
        }
        if let Some(v) = self.remote.allow_gateway_transit {
            properties.allow_gateway_transit = Some(v);
        }
        if let Some(v) = self.remote.use_remote_gateways {
            properties.use_remote_gateways = Some(v);
        }
        if !is_new && desired == current {
            return Ok(());
        }

        tracing::debug!(
            peering = %desired.name,
            network = %remote_id,
            is_new,
            "reconciling remote peering"
        );
        self.manager
            .client()
            .virtual_network_peerings()
            .create_or_update()
            .set_resource_group_name(remote.resource_group_name())
            .set_parent_name(remote.name())
            .set_name(&desired.name)
            .set_resource(desired)
            .poller()
            .until_done()
            .await?;
        Ok(())
    }
}

fn in_subscription(id: &str, subscription: &str) -> bool {
    subscription_from_id(id).is_some_and(|s| s.eq_ignore_ascii_case(subscription))
}

async fn get_peering(
    manager: &NetworkManager,
    network: &ResourceId,
    name: &str,
) -> Result<VirtualNetworkPeering> {
    manager
        .client()
        .virtual_network_peerings()
        .get()
        .set_resource_group_name(network.resource_group_name())
        .set_parent_name(network.name())
        .set_name(name)
        .send()
        .await
}

async fn delete_peering(manager: &NetworkManager, network: &ResourceId, name: &str) -> Result<()> {
    manager
        .client()
        .virtual_network_peerings()
        .delete()
        .set_resource_group_name(network.resource_group_name())
        .set_parent_name(network.name())
        .set_name(name)
        .poller()
        .until_done()
        .await
}

async fn list_peerings(manager: &NetworkManager, network: &ResourceId) -> Result<Vec<VirtualNetworkPeering>> {
    manager
        .client()
        .virtual_network_peerings()
        .list()
        .set_resource_group_name(network.resource_group_name())
        .set_parent_name(network.name())
        .by_item()
        .try_collect()
        .await
}

// Finds the peering in `network` pointing to `remote_id`.
async fn find_peering_to(
    manager: &NetworkManager,
    network: &ResourceId,
    remote_id: &str,
) -> Result<Option<VirtualNetworkPeering>> {
    let peerings = list_peerings(manager, network).await?;
    Ok(peerings.into_iter().find(|p| {
        p.properties
            .remote_virtual_network
            .as_ref()
            .is_some_and(|r| same_id(&r.id, remote_id))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_use() {
        let manager = NetworkManager::from_stub("s1", super::super::tests::Unimplemented);
        let peerings = Peerings::new(
            manager,
            "/subscriptions/s1/resourceGroups/rg1/providers/Microsoft.Network/virtualNetworks/vnet1".into(),
        );
        let definition = peerings
            .define("peer1")
            .with_remote_network("/subscriptions/s1/resourceGroups/rg2/providers/Microsoft.Network/virtualNetworks/vnet2")
            .with_gateway_use_by_remote_network();
        assert_eq!(definition.inner().properties.allow_gateway_transit, Some(true));
        assert_eq!(definition.remote.use_remote_gateways, Some(true));

        let peering = NetworkPeering {
            manager: definition.manager.clone(),
            network_id: definition.network_id.clone(),
            inner: definition.inner.clone(),
        };
        assert_eq!(peering.gateway_use(), GatewayUse::ByRemoteNetwork);
        assert!(peering.is_same_subscription());

        let definition = peering.update().with_gateway_use_on_remote_network();
        assert_eq!(definition.remote.allow_gateway_transit, Some(true));
        assert_eq!(definition.inner.properties.use_remote_gateways, Some(true));
        assert_eq!(definition.inner.properties.allow_gateway_transit, Some(false));
    }

    #[test]
    fn other_subscription() {
        assert!(in_subscription("/subscriptions/S1/resourceGroups/rg", "s1"));
        assert!(!in_subscription("/subscriptions/s2/resourceGroups/rg", "s1"));
        assert!(!in_subscription("", "s1"));
    }
}
