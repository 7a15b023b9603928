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
    check_region, definition_setters, wrapper,
};
use crate::Result;
use crate::model::*;
use futures::TryStreamExt;
use gax::lro::Poller;

/// The network watchers in a subscription.
pub type NetworkWatchers = Collection<NetworkWatcher>;

/// A network watcher, the entry point for network diagnostics in a region.
///
/// # Example
/// ```no_run
/// # use cloud_network::NetworkManager;
/// # tokio_test::block_on(async {
/// let manager = NetworkManager::builder().build().await?;
/// let watcher = manager
///     .network_watchers()
///     .get_by_resource_group("NetworkWatcherRG", "NetworkWatcher_westus")
///     .await?;
/// let hop = watcher
///     .next_hop()
///     .with_target_resource_id("/subscriptions/.../virtualMachines/vm1")
///     .with_source_ip_address("10.0.0.4")
///     .with_destination_ip_address("8.8.8.8")
///     .execute()
///     .await?;
/// println!("{:?}", hop.next_hop_type);
/// # anyhow::Ok(()) });
/// ```
#[derive(Clone, Debug)]
pub struct NetworkWatcher {
    manager: NetworkManager,
    inner: crate::model::NetworkWatcher,
}

wrapper!(NetworkWatcher, crate::model::NetworkWatcher, network_watchers);

impl NetworkWatcher {
    /// Returns the resources in `resource_group_name`, and how they are
    /// associated.
    pub async fn topology(&self, resource_group_name: &str) -> Result<Topology> {
        self.topology_with(
            TopologyParameters::new().set_target_resource_group_name(resource_group_name),
        )
        .await
    }

    /// Returns the topology of a network or subnet, as selected by
    /// `parameters`.
    pub async fn topology_with(&self, parameters: TopologyParameters) -> Result<Topology> {
        self.manager
            .client()
            .actions()
            .get_topology()
            .set_resource_group_name(self.resource_group_name())
            .set_name(&self.inner.name)
            .set_parameters(parameters)
            .send()
            .await
    }

    /// Starts a query verifying if a packet is allowed to or from a virtual
    /// machine.
    pub fn verify_ip_flow(&self) -> IpFlowVerification {
        IpFlowVerification {
            watcher: self.clone(),
            parameters: VerificationIpFlowParameters::new(),
        }
    }

    /// Starts a query for the next hop of a packet leaving a virtual machine.
    pub fn next_hop(&self) -> NextHopQuery {
        NextHopQuery {
            watcher: self.clone(),
            parameters: NextHopParameters::new(),
        }
    }

    /// Fetches the flow log settings of a network security group.
    pub async fn get_flow_log_settings(&self, network_security_group_id: &str) -> Result<FlowLogSettings> {
        let inner = self
            .manager
            .client()
            .actions()
            .get_flow_log_status()
            .set_resource_group_name(self.resource_group_name())
            .set_name(&self.inner.name)
            .set_parameters(FlowLogStatusParameters::new(network_security_group_id))
            .send()
            .await?;
        Ok(FlowLogSettings {
            watcher: self.clone(),
            inner,
        })
    }

    /// The packet captures run by this watcher.
    pub fn packet_captures(&self) -> PacketCaptures {
        PacketCaptures {
            watcher: self.clone(),
        }
    }
}

impl Collection<NetworkWatcher> {
    /// Starts the definition of a new network watcher. Each subscription can
    /// have one watcher per region.
    pub fn define<T: Into<String>>(&self, name: T) -> NetworkWatcherDefinition {
        NetworkWatcherDefinition {
            draft: Draft::new(
                self.manager.clone(),
                crate::model::NetworkWatcher::new().set_name(name),
            ),
        }
    }
}

/// The definition of a new network watcher.
#[derive(Clone, Debug)]
pub struct NetworkWatcherDefinition {
    draft: Draft<crate::model::NetworkWatcher>,
}

impl Definition for NetworkWatcherDefinition {
    type Model = crate::model::NetworkWatcher;
}

impl NetworkWatcherDefinition {
    definition_setters!();

    pub async fn create(self) -> Result<NetworkWatcher> {
        check_region(&self.draft.inner.location, self.draft.name())?;
        self.draft.submit().await
    }
}

/// A query verifying if a packet is allowed, as configured by the security
/// rules of the target.
#[derive(Clone, Debug)]
pub struct IpFlowVerification {
    watcher: NetworkWatcher,
    parameters: VerificationIpFlowParameters,
}

impl IpFlowVerification {
    /// Sets the virtual machine sending or receiving the packet.
    pub fn with_target_resource_id<T: Into<String>>(mut self, id: T) -> Self {
        self.parameters.target_resource_id = id.into();
        self
    }

    /// Selects the network interface, for virtual machines with more than
    /// one.
    pub fn with_target_network_interface_id<T: Into<String>>(mut self, id: T) -> Self {
        self.parameters.target_nic_resource_id = Some(id.into());
        self
    }

    pub fn inbound(mut self) -> Self {
        self.parameters.direction = Some(Direction::INBOUND);
        self
    }

    pub fn outbound(mut self) -> Self {
        self.parameters.direction = Some(Direction::OUTBOUND);
        self
    }

    pub fn with_tcp(mut self) -> Self {
        self.parameters.protocol = Some(IpFlowProtocol::TCP);
        self
    }

    pub fn with_udp(mut self) -> Self {
        self.parameters.protocol = Some(IpFlowProtocol::UDP);
        self
    }

    pub fn with_local_ip_address<T: Into<String>>(mut self, ip: T) -> Self {
        self.parameters.local_ip_address = Some(ip.into());
        self
    }

    pub fn with_local_port(mut self, port: u16) -> Self {
        self.parameters.local_port = Some(port.to_string());
        self
    }

    pub fn with_remote_ip_address<T: Into<String>>(mut self, ip: T) -> Self {
        self.parameters.remote_ip_address = Some(ip.into());
        self
    }

    pub fn with_remote_port(mut self, port: u16) -> Self {
        self.parameters.remote_port = Some(port.to_string());
        self
    }

    /// Sends the query.
    pub async fn execute(self) -> Result<VerificationIpFlowResult> {
        let p = &self.parameters;
        let missing = if p.target_resource_id.is_empty() {
            Some("a target resource")
        } else if p.direction.is_none() {
            Some("a direction")
        } else if p.protocol.is_none() {
            Some("a protocol")
        } else if p.local_ip_address.is_none() || p.remote_ip_address.is_none() {
            Some("the local and remote IP addresses")
        } else {
            None
        };
        if let Some(what) = missing {
            return Err(DefinitionError::Incomplete {
                resource: self.watcher.inner.name.clone(),
                what,
            }
            .into());
        }
        // Unset ports match any port.
        let parameters = VerificationIpFlowParameters {
            local_port: p.local_port.clone().or_else(|| Some("*".to_string())),
            remote_port: p.remote_port.clone().or_else(|| Some("*".to_string())),
            ..self.parameters.clone()
        };
        self.watcher
            .manager
            .client()
            .actions()
            .verify_ip_flow()
            .set_resource_group_name(self.watcher.resource_group_name())
            .set_name(&self.watcher.inner.name)
            .set_parameters(parameters)
            .send()
            .await
    }
}

/// A query for the next hop of a packet.
#[derive(Clone, Debug)]
pub struct NextHopQuery {
    watcher: NetworkWatcher,
    parameters: NextHopParameters,
}

impl NextHopQuery {
    /// Sets the virtual machine sending the packet.
    pub fn with_target_resource_id<T: Into<String>>(mut self, id: T) -> Self {
        self.parameters.target_resource_id = id.into();
        self
    }

    pub fn with_target_network_interface_id<T: Into<String>>(mut self, id: T) -> Self {
        self.parameters.target_nic_resource_id = Some(id.into());
        self
    }

    pub fn with_source_ip_address<T: Into<String>>(mut self, ip: T) -> Self {
        self.parameters.source_ip_address = Some(ip.into());
        self
    }

    pub fn with_destination_ip_address<T: Into<String>>(mut self, ip: T) -> Self {
        self.parameters.destination_ip_address = Some(ip.into());
        self
    }

    pub async fn execute(self) -> Result<NextHopResult> {
        let p = &self.parameters;
        if p.target_resource_id.is_empty() || p.source_ip_address.is_none() || p.destination_ip_address.is_none() {
            return Err(DefinitionError::Incomplete {
                resource: self.watcher.inner.name.clone(),
                what: "a target and the source and destination IP addresses",
            }
            .into());
        }
        self.watcher
            .manager
            .client()
            .actions()
            .get_next_hop()
            .set_resource_group_name(self.watcher.resource_group_name())
            .set_name(&self.watcher.inner.name)
            .set_parameters(self.parameters.clone())
            .send()
            .await
    }
}

/// The flow log settings of a network security group.
#[derive(Clone, Debug)]
pub struct FlowLogSettings {
    watcher: NetworkWatcher,
    inner: FlowLogInformation,
}

impl FlowLogSettings {
    /// The network security group.
    pub fn target_resource_id(&self) -> &str {
        &self.inner.target_resource_id
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.properties.enabled
    }

    /// The storage account receiving the logs.
    pub fn storage_id(&self) -> &str {
        &self.inner.properties.storage_id
    }

    pub fn is_retention_enabled(&self) -> bool {
        self.retention_policy().is_some_and(|r| r.enabled)
    }

    /// The number of days the logs are kept, `0` keeps them forever.
    pub fn retention_days(&self) -> i32 {
        self.retention_policy().map(|r| r.days).unwrap_or_default()
    }

    pub fn inner(&self) -> &FlowLogInformation {
        &self.inner
    }

    pub async fn refresh(&mut self) -> Result<()> {
        let settings = self
            .watcher
            .get_flow_log_settings(&self.inner.target_resource_id)
            .await?;
        self.inner = settings.inner;
        Ok(())
    }

    pub fn update(self) -> FlowLogSettingsUpdate {
        FlowLogSettingsUpdate {
            watcher: self.watcher,
            inner: self.inner,
        }
    }

    fn retention_policy(&self) -> Option<&RetentionPolicy> {
        self.inner.properties.retention_policy.as_ref()
    }
}

/// An update of the flow log settings of a network security group.
#[derive(Clone, Debug)]
pub struct FlowLogSettingsUpdate {
    watcher: NetworkWatcher,
    inner: FlowLogInformation,
}

impl FlowLogSettingsUpdate {
    pub fn with_logging(mut self) -> Self {
        self.inner.properties.enabled = true;
        self
    }

    pub fn without_logging(mut self) -> Self {
        self.inner.properties.enabled = false;
        self
    }

    pub fn with_storage_account<T: Into<String>>(mut self, id: T) -> Self {
        self.inner.properties.storage_id = id.into();
        self
    }

    /// Keeps the logs for `days`, `0` keeps them forever.
    pub fn with_retention_policy_days(mut self, days: i32) -> Self {
        self.inner.properties.retention_policy =
            Some(RetentionPolicy::new().set_days(days).set_enabled(true));
        self
    }

    pub fn without_retention_policy(mut self) -> Self {
        self.inner.properties.retention_policy = Some(RetentionPolicy::new().set_enabled(false));
        self
    }

    pub fn inner(&self) -> &FlowLogInformation {
        &self.inner
    }

    pub async fn apply(self) -> Result<FlowLogSettings> {
        if self.inner.properties.enabled && self.inner.properties.storage_id.is_empty() {
            return Err(DefinitionError::Incomplete {
                resource: self.inner.target_resource_id.clone(),
                what: "a storage account",
            }
            .into());
        }
        let inner = self
            .watcher
            .manager
            .client()
            .actions()
            .set_flow_log_configuration()
            .set_resource_group_name(self.watcher.resource_group_name())
            .set_name(&self.watcher.inner.name)
            .set_parameters(self.inner)
            .send()
            .await?;
        Ok(FlowLogSettings {
            watcher: self.watcher,
            inner,
        })
    }
}

/// The packet captures of a network watcher.
#[derive(Clone, Debug)]
pub struct PacketCaptures {
    watcher: NetworkWatcher,
}

impl PacketCaptures {
    /// Starts the definition of a packet capture. The capture starts when it
    /// is created.
    pub fn define<T: Into<String>>(&self, name: T) -> PacketCaptureDefinition {
        PacketCaptureDefinition {
            watcher: self.watcher.clone(),
            inner: crate::model::PacketCapture::new().set_name(name),
        }
    }

    pub async fn get_by_name(&self, name: &str) -> Result<PacketCapture> {
        let inner = self
            .watcher
            .manager
            .client()
            .packet_captures()
            .get()
            .set_resource_group_name(self.watcher.resource_group_name())
            .set_parent_name(&self.watcher.inner.name)
            .set_name(name)
            .send()
            .await?;
        Ok(self.wrap(inner))
    }

    pub async fn list(&self) -> Result<Vec<PacketCapture>> {
        let items: Vec<crate::model::PacketCapture> = self
            .watcher
            .manager
            .client()
            .packet_captures()
            .list()
            .set_resource_group_name(self.watcher.resource_group_name())
            .set_parent_name(&self.watcher.inner.name)
            .by_item()
            .try_collect()
            .await?;
        Ok(items.into_iter().map(|item| self.wrap(item)).collect())
    }

    /// Deletes a packet capture, stopping it if needed.
    pub async fn delete_by_name(&self, name: &str) -> Result<()> {
        self.watcher
            .manager
            .client()
            .packet_captures()
            .delete()
            .set_resource_group_name(self.watcher.resource_group_name())
            .set_parent_name(&self.watcher.inner.name)
            .set_name(name)
            .poller()
            .until_done()
            .await
    }

    fn wrap(&self, inner: crate::model::PacketCapture) -> PacketCapture {
        PacketCapture {
            watcher: self.watcher.clone(),
            inner,
        }
    }
}

/// A packet capture session.
#[derive(Clone, Debug)]
pub struct PacketCapture {
    watcher: NetworkWatcher,
    inner: crate::model::PacketCapture,
}

impl PacketCapture {
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The virtual machine where packets are captured.
    pub fn target_id(&self) -> &str {
        &self.inner.properties.target
    }

    pub fn bytes_to_capture_per_packet(&self) -> Option<i64> {
        self.inner.properties.bytes_to_capture_per_packet
    }

    pub fn total_bytes_per_session(&self) -> Option<i64> {
        self.inner.properties.total_bytes_per_session
    }

    pub fn time_limit_in_seconds(&self) -> Option<i32> {
        self.inner.properties.time_limit_in_seconds
    }

    pub fn storage_location(&self) -> Option<&PacketCaptureStorageLocation> {
        self.inner.properties.storage_location.as_ref()
    }

    pub fn filters(&self) -> &[PacketCaptureFilter] {
        &self.inner.properties.filters
    }

    pub fn provisioning_state(&self) -> Option<&ProvisioningState> {
        self.inner.properties.provisioning_state.as_ref()
    }

    pub fn inner(&self) -> &crate::model::PacketCapture {
        &self.inner
    }

    /// Stops the capture, the captured packets are kept.
    pub async fn stop(&self) -> Result<()> {
        self.watcher
            .manager
            .client()
            .actions()
            .stop_packet_capture()
            .set_resource_group_name(self.watcher.resource_group_name())
            .set_parent_name(&self.watcher.inner.name)
            .set_name(&self.inner.name)
            .send()
            .await
    }

    /// Queries the state of the capture.
    pub async fn get_status(&self) -> Result<PacketCaptureQueryStatusResult> {
        self.watcher
            .manager
            .client()
            .actions()
            .get_packet_capture_status()
            .set_resource_group_name(self.watcher.resource_group_name())
            .set_parent_name(&self.watcher.inner.name)
            .set_name(&self.inner.name)
            .send()
            .await
    }
}

/// The definition of a new packet capture.
///
/// Definitions must set the target virtual machine, and a storage account or
/// a file path on the target.
#[derive(Clone, Debug)]
pub struct PacketCaptureDefinition {
    watcher: NetworkWatcher,
    inner: crate::model::PacketCapture,
}

impl PacketCaptureDefinition {
    /// Captures the packets of the virtual machine `id`.
    pub fn with_target<T: Into<String>>(mut self, id: T) -> Self {
        self.inner.properties.target = id.into();
        self
    }

    /// Saves the capture in a storage account.
    pub fn with_storage_account_id<T: Into<String>>(mut self, id: T) -> Self {
        self.storage_location().storage_id = Some(id.into());
        self
    }

    /// Saves the capture in a file on the target virtual machine.
    pub fn with_file_path<T: Into<String>>(mut self, path: T) -> Self {
        self.storage_location().file_path = Some(path.into());
        self
    }

    /// Limits the bytes captured from each packet, `0` captures whole
    /// packets.
    pub fn with_bytes_to_capture_per_packet(mut self, bytes: i64) -> Self {
        self.inner.properties.bytes_to_capture_per_packet = Some(bytes);
        self
    }

    pub fn with_total_bytes_per_session(mut self, bytes: i64) -> Self {
        self.inner.properties.total_bytes_per_session = Some(bytes);
        self
    }

    pub fn with_time_limit_in_seconds(mut self, seconds: i32) -> Self {
        self.inner.properties.time_limit_in_seconds = Some(seconds);
        self
    }

    /// Starts the definition of a filter. Without filters, all the packets
    /// are captured.
    pub fn define_filter(self) -> ChildDefinition<Self, PacketCaptureFilter> {
        ChildDefinition::new(self, PacketCaptureFilter::new())
    }

    pub fn inner(&self) -> &crate::model::PacketCapture {
        &self.inner
    }

    /// Creates the packet capture, starting the capture session.
    pub async fn create(self) -> Result<PacketCapture> {
        let properties = &self.inner.properties;
        let missing = if properties.target.is_empty() {
            Some("a target")
        } else if properties
            .storage_location
            .as_ref()
            .is_none_or(|s| s.storage_id.is_none() && s.file_path.is_none())
        {
            Some("a storage account or a file path")
        } else {
            None
        };
        if let Some(what) = missing {
            return Err(DefinitionError::Incomplete {
                resource: self.inner.name.clone(),
                what,
            }
            .into());
        }
        let inner = self
            .watcher
            .manager
            .client()
            .packet_captures()
            .create_or_update()
            .set_resource_group_name(self.watcher.resource_group_name())
            .set_parent_name(&self.watcher.inner.name)
            .set_name(&self.inner.name)
            .set_resource(self.inner)
            .poller()
            .until_done()
            .await?;
        Ok(PacketCapture {
            watcher: self.watcher,
            inner,
        })
    }

    fn storage_location(&mut self) -> &mut PacketCaptureStorageLocation {
        self.inner
            .properties
            .storage_location
            .get_or_insert_with(PacketCaptureStorageLocation::new)
    }
}

impl Attach<PacketCaptureFilter> for PacketCaptureDefinition {
    fn attach_child(&mut self, child: PacketCaptureFilter) {
        self.inner.properties.filters.push(child);
    }
}

impl ChildDefinition<PacketCaptureDefinition, PacketCaptureFilter> {
    pub fn with_tcp(mut self) -> Self {
        self.inner.protocol = Some(PacketCaptureProtocol::TCP);
        self
    }

    pub fn with_udp(mut self) -> Self {
        self.inner.protocol = Some(PacketCaptureProtocol::UDP);
        self
    }

    pub fn with_any_protocol(mut self) -> Self {
        self.inner.protocol = Some(PacketCaptureProtocol::ANY);
        self
    }

    /// Matches a local IP address. Use `a-b` for ranges.
    pub fn with_local_ip_address<T: Into<String>>(mut self, ip: T) -> Self {
        self.inner.local_ip_address = Some(ip.into());
        self
    }

    /// Matches any of the local IP addresses.
    pub fn with_local_ip_addresses<I, T>(mut self, ips: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.inner.local_ip_address = Some(join(ips));
        self
    }

    pub fn with_remote_ip_address<T: Into<String>>(mut self, ip: T) -> Self {
        self.inner.remote_ip_address = Some(ip.into());
        self
    }

    pub fn with_remote_ip_addresses<I, T>(mut self, ips: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.inner.remote_ip_address = Some(join(ips));
        self
    }

    pub fn with_local_port(mut self, port: u16) -> Self {
        self.inner.local_port = Some(port.to_string());
        self
    }

    pub fn with_local_port_range(mut self, from: u16, to: u16) -> Self {
        self.inner.local_port = Some(format!("{from}-{to}"));
        self
    }

    pub fn with_remote_port(mut self, port: u16) -> Self {
        self.inner.remote_port = Some(port.to_string());
        self
    }

    pub fn with_remote_port_range(mut self, from: u16, to: u16) -> Self {
        self.inner.remote_port = Some(format!("{from}-{to}"));
        self
    }
}

// The service separates lists of addresses with `;`.
fn join<I, T>(items: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    items
        .into_iter()
        .map(Into::into)
        .collect::<Vec<String>>()
        .join(";")
}
