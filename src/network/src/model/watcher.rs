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
    /// The protocols accepted by IP flow verification.
    IpFlowProtocol {
        TCP = "TCP",
        UDP = "UDP",
    }
}

string_enum! {
    NextHopType {
        INTERNET = "Internet",
        VIRTUAL_APPLIANCE = "VirtualAppliance",
        VIRTUAL_NETWORK_GATEWAY = "VirtualNetworkGateway",
        VNET_LOCAL = "VnetLocal",
        HYPER_NET_GATEWAY = "HyperNetGateway",
        NONE = "None",
    }
}

string_enum! {
    AssociationType {
        ASSOCIATED = "Associated",
        CONTAINS = "Contains",
    }
}

string_enum! {
    /// The protocols matched by packet capture filters.
    PacketCaptureProtocol {
        TCP = "TCP",
        UDP = "UDP",
        ANY = "Any",
    }
}

string_enum! {
    PacketCaptureStatus {
        NOT_STARTED = "NotStarted",
        RUNNING = "Running",
        STOPPED = "Stopped",
        ERROR = "Error",
        UNKNOWN = "Unknown",
    }
}

/// A network watcher, the entry point for network diagnostics in a region.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct NetworkWatcher {
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
    pub properties: NetworkWatcherProperties,
}

impl NetworkWatcher {
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
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct NetworkWatcherProperties {
    pub provisioning_state: Option<ProvisioningState>,
}

/// The parameters of the `topology` action.
///
/// Set one of the target fields.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct TopologyParameters {
    pub target_resource_group_name: Option<String>,
    pub target_virtual_network: Option<SubResource>,
    pub target_subnet: Option<SubResource>,
}

impl TopologyParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_target_resource_group_name<T: Into<String>>(mut self, v: T) -> Self {
        self.target_resource_group_name = Some(v.into());
        self
    }

    pub fn set_target_virtual_network<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.target_virtual_network = Some(v.into());
        self
    }

    pub fn set_target_subnet<T: Into<SubResource>>(mut self, v: T) -> Self {
        self.target_subnet = Some(v.into());
        self
    }
}

/// The network resources in a resource group, and how they are connected.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct Topology {
    pub id: String,
    pub created_date_time: String,
    pub last_modified: String,
    pub resources: Vec<TopologyResource>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct TopologyResource {
    pub name: String,
    pub id: String,
    pub location: String,
    pub associations: Vec<TopologyAssociation>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct TopologyAssociation {
    pub name: String,
    pub resource_id: String,
    pub association_type: Option<AssociationType>,
}

/// The parameters of the `ipFlowVerify` action.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct VerificationIpFlowParameters {
    /// The id of the virtual machine sending or receiving the packet.
    pub target_resource_id: String,
    pub direction: Option<Direction>,
    pub protocol: Option<IpFlowProtocol>,
    pub local_port: Option<String>,
    pub remote_port: Option<String>,
    #[serde(rename = "localIPAddress")]
    pub local_ip_address: Option<String>,
    #[serde(rename = "remoteIPAddress")]
    pub remote_ip_address: Option<String>,
    /// Required when the virtual machine has more than one NIC.
    pub target_nic_resource_id: Option<String>,
}

impl VerificationIpFlowParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_target_resource_id<T: Into<String>>(mut self, v: T) -> Self {
        self.target_resource_id = v.into();
        self
    }

    pub fn set_direction<T: Into<Direction>>(mut self, v: T) -> Self {
        self.direction = Some(v.into());
        self
    }

    pub fn set_protocol<T: Into<IpFlowProtocol>>(mut self, v: T) -> Self {
        self.protocol = Some(v.into());
        self
    }

    pub fn set_local_port<T: Into<String>>(mut self, v: T) -> Self {
        self.local_port = Some(v.into());
        self
    }

    pub fn set_remote_port<T: Into<String>>(mut self, v: T) -> Self {
        self.remote_port = Some(v.into());
        self
    }

    pub fn set_local_ip_address<T: Into<String>>(mut self, v: T) -> Self {
        self.local_ip_address = Some(v.into());
        self
    }

    pub fn set_remote_ip_address<T: Into<String>>(mut self, v: T) -> Self {
        self.remote_ip_address = Some(v.into());
        self
    }

    pub fn set_target_nic_resource_id<T: Into<String>>(mut self, v: T) -> Self {
        self.target_nic_resource_id = Some(v.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct VerificationIpFlowResult {
    pub access: Option<Access>,
    /// The security rule that allowed or denied the packet.
    pub rule_name: String,
}

/// The parameters of the `nextHop` action.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct NextHopParameters {
    pub target_resource_id: String,
    #[serde(rename = "sourceIPAddress")]
    pub source_ip_address: Option<String>,
    #[serde(rename = "destinationIPAddress")]
    pub destination_ip_address: Option<String>,
    pub target_nic_resource_id: Option<String>,
}

impl NextHopParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_target_resource_id<T: Into<String>>(mut self, v: T) -> Self {
        self.target_resource_id = v.into();
        self
    }

    pub fn set_source_ip_address<T: Into<String>>(mut self, v: T) -> Self {
        self.source_ip_address = Some(v.into());
        self
    }

    pub fn set_destination_ip_address<T: Into<String>>(mut self, v: T) -> Self {
        self.destination_ip_address = Some(v.into());
        self
    }

    pub fn set_target_nic_resource_id<T: Into<String>>(mut self, v: T) -> Self {
        self.target_nic_resource_id = Some(v.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct NextHopResult {
    pub next_hop_type: Option<NextHopType>,
    pub next_hop_ip_address: String,
    /// The route table with the matching route, if any.
    pub route_table_id: String,
}

/// The parameters of the `queryFlowLogStatus` action.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct FlowLogStatusParameters {
    /// The id of the network security group.
    pub target_resource_id: String,
}

impl FlowLogStatusParameters {
    pub fn new<T: Into<String>>(target_resource_id: T) -> Self {
        Self {
            target_resource_id: target_resource_id.into(),
        }
    }
}

/// The flow log configuration of a network security group.
///
/// Used as the result of `queryFlowLogStatus`, and as the parameters of
/// `configureFlowLog`.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct FlowLogInformation {
    pub target_resource_id: String,
    pub properties: FlowLogProperties,
}

impl FlowLogInformation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_target_resource_id<T: Into<String>>(mut self, v: T) -> Self {
        self.target_resource_id = v.into();
        self
    }

    pub fn set_properties<T: Into<FlowLogProperties>>(mut self, v: T) -> Self {
        self.properties = v.into();
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct FlowLogProperties {
    /// The storage account where flow logs are written.
    pub storage_id: String,
    pub enabled: bool,
    pub retention_policy: Option<RetentionPolicy>,
}

impl FlowLogProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_storage_id<T: Into<String>>(mut self, v: T) -> Self {
        self.storage_id = v.into();
        self
    }

    pub fn set_enabled(mut self, v: bool) -> Self {
        self.enabled = v;
        self
    }

    pub fn set_retention_policy<T: Into<RetentionPolicy>>(mut self, v: T) -> Self {
        self.retention_policy = Some(v.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct RetentionPolicy {
    /// Zero keeps the logs forever.
    pub days: i32,
    pub enabled: bool,
}

impl RetentionPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_days(mut self, v: i32) -> Self {
        self.days = v;
        self
    }

    pub fn set_enabled(mut self, v: bool) -> Self {
        self.enabled = v;
        self
    }
}

child_resource!(
    /// A packet capture session on a virtual machine.
    PacketCapture,
    PacketCaptureProperties
);

#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PacketCaptureProperties {
    /// The id of the virtual machine.
    pub target: String,
    /// Zero captures the full packet.
    pub bytes_to_capture_per_packet: Option<i64>,
    pub total_bytes_per_session: Option<i64>,
    pub time_limit_in_seconds: Option<i32>,
    pub storage_location: Option<PacketCaptureStorageLocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<PacketCaptureFilter>,
    pub provisioning_state: Option<ProvisioningState>,
}

impl PacketCaptureProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_target<T: Into<String>>(mut self, v: T) -> Self {
        self.target = v.into();
        self
    }

    pub fn set_bytes_to_capture_per_packet(mut self, v: i64) -> Self {
        self.bytes_to_capture_per_packet = Some(v);
        self
    }

    pub fn set_total_bytes_per_session(mut self, v: i64) -> Self {
        self.total_bytes_per_session = Some(v);
        self
    }

    pub fn set_time_limit_in_seconds(mut self, v: i32) -> Self {
        self.time_limit_in_seconds = Some(v);
        self
    }

    pub fn set_storage_location<T: Into<PacketCaptureStorageLocation>>(mut self, v: T) -> Self {
        self.storage_location = Some(v.into());
        self
    }

    pub fn set_filters<T: IntoIterator<Item = PacketCaptureFilter>>(mut self, v: T) -> Self {
        self.filters = v.into_iter().collect();
        self
    }
}

/// Where the capture file is saved: a storage account, a local file on the
/// virtual machine, or both.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PacketCaptureStorageLocation {
    pub storage_id: Option<String>,
    #[serde(skip_serializing)]
    pub storage_path: Option<String>,
    pub file_path: Option<String>,
}

impl PacketCaptureStorageLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_storage_id<T: Into<String>>(mut self, v: T) -> Self {
        self.storage_id = Some(v.into());
        self
    }

    pub fn set_file_path<T: Into<String>>(mut self, v: T) -> Self {
        self.file_path = Some(v.into());
        self
    }
}

/// Selects the packets to capture. Empty fields match any value.
///
/// Addresses and ports accept single values, ranges (`80-90`) and
/// comma-separated lists.
#[serde_with::skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PacketCaptureFilter {
    pub protocol: Option<PacketCaptureProtocol>,
    #[serde(rename = "localIPAddress")]
    pub local_ip_address: Option<String>,
    #[serde(rename = "remoteIPAddress")]
    pub remote_ip_address: Option<String>,
    pub local_port: Option<String>,
    pub remote_port: Option<String>,
}

impl PacketCaptureFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_protocol<T: Into<PacketCaptureProtocol>>(mut self, v: T) -> Self {
        self.protocol = Some(v.into());
        self
    }

    pub fn set_local_ip_address<T: Into<String>>(mut self, v: T) -> Self {
        self.local_ip_address = Some(v.into());
        self
    }

    pub fn set_remote_ip_address<T: Into<String>>(mut self, v: T) -> Self {
        self.remote_ip_address = Some(v.into());
        self
    }

    pub fn set_local_port<T: Into<String>>(mut self, v: T) -> Self {
        self.local_port = Some(v.into());
        self
    }

    pub fn set_remote_port<T: Into<String>>(mut self, v: T) -> Self {
        self.remote_port = Some(v.into());
        self
    }
}

/// The result of the `queryStatus` action on a packet capture.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
#[non_exhaustive]
pub struct PacketCaptureQueryStatusResult {
    pub name: String,
    pub id: String,
    pub capture_start_time: Option<String>,
    pub packet_capture_status: Option<PacketCaptureStatus>,
    pub stop_reason: Option<String>,
    pub packet_capture_error: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ip_flow_parameters() -> anyhow::Result<()> {
        let input = VerificationIpFlowParameters::new()
            .set_target_resource_id("/vm1")
            .set_direction(Direction::OUTBOUND)
            .set_protocol(IpFlowProtocol::TCP)
            .set_local_ip_address("10.0.0.4")
            .set_local_port("100")
            .set_remote_ip_address("8.8.8.8")
            .set_remote_port("80");
        let got = serde_json::to_value(&input)?;
        let want = json!({
            "targetResourceId": "/vm1",
            "direction": "Outbound",
            "protocol": "TCP",
            "localIPAddress": "10.0.0.4",
            "localPort": "100",
            "remoteIPAddress": "8.8.8.8",
            "remotePort": "80"
        });
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn packet_capture() -> anyhow::Result<()> {
        let input = PacketCapture::new().set_properties(
            PacketCaptureProperties::new()
                .set_target("/vm1")
                .set_time_limit_in_seconds(1500)
                .set_storage_location(PacketCaptureStorageLocation::new().set_storage_id("/sa1"))
                .set_filters([PacketCaptureFilter::new()
                    .set_protocol(PacketCaptureProtocol::TCP)
                    .set_local_port("80-90")]),
        );
        let got = serde_json::to_value(&input)?;
        let want = json!({
            "properties": {
                "target": "/vm1",
                "timeLimitInSeconds": 1500,
                "storageLocation": {"storageId": "/sa1"},
                "filters": [{"protocol": "TCP", "localPort": "80-90"}]
            }
        });
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn flow_log_information() -> anyhow::Result<()> {
        let got = serde_json::from_value::<FlowLogInformation>(json!({
            "targetResourceId": "/nsg1",
            "properties": {
                "storageId": "/sa1",
                "enabled": true,
                "retentionPolicy": {"days": 7, "enabled": true}
            }
        }))?;
        assert!(got.properties.enabled);
        assert_eq!(
            got.properties.retention_policy,
            Some(RetentionPolicy::new().set_days(7).set_enabled(true))
        );
        Ok(())
    }
}
