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

//! An in-memory implementation of the service, for the fluent tests.
//!
//! Resources are stored as JSON. Child resources (subnets, peerings, security
//! rules, packet captures) live in the `properties` of their parent, as the
//! service returns them. Every PUT completes immediately with a `Succeeded`
//! provisioning state.

#![allow(dead_code)]

use cloud_network::NetworkManager;
use cloud_network::Result;
use cloud_network::model::*;
use cloud_network::resource_id::ResourceId;
use cloud_network::stub::{NetworkActions, Resources};
use gax::error::{CloudError, Error};
use gax::options::RequestOptions;
use gax::response::Response;
use serde_json::{Value, json};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

pub const SUBSCRIPTION: &str = "sub1";
pub const RESOURCE_GROUP: &str = "rg1";
pub const REGION: &str = "westus";

// Children stored by their own endpoints, kept when the parent is replaced.
const PRESERVED_CHILDREN: [&str; 2] = ["virtualNetworkPeerings", "packetCaptures"];

#[derive(Clone, Debug, Default)]
pub struct FakeNetwork {
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    // Top-level resources, by lowercase id.
    resources: BTreeMap<String, Value>,
    flow_logs: HashMap<String, FlowLogInformation>,
    stopped_captures: HashSet<String>,
    requests: Vec<String>,
    addresses: u8,
}

impl FakeNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manager(&self) -> NetworkManager {
        NetworkManager::from_stub(SUBSCRIPTION, self.clone())
    }

    /// The requests received so far, as `{METHOD} {id}` strings.
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    /// The ids of the stored resources in `collection`.
    pub fn ids(&self, collection: &str) -> Vec<String> {
        self.lock()
            .resources
            .values()
            .filter_map(|v| v["id"].as_str())
            .filter(|id| {
                ResourceId::parse(id).is_ok_and(|r| r.resource_type().eq_ignore_ascii_case(collection))
            })
            .map(str::to_string)
            .collect()
    }

    /// Stores `resource` as if it was created by some other client.
    pub fn insert<R: ResourceModel>(&self, resource_group_name: &str, resource: R) {
        let id = top_level_id::<R>(resource_group_name, resource.name());
        let mut value = serde_json::to_value(resource).unwrap_or_default();
        complete(&id, &mut value, None);
        self.lock().resources.insert(id.to_lowercase(), value);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn top_level_id<R: ResourceModel>(resource_group_name: &str, name: &str) -> String {
    ResourceId::new(SUBSCRIPTION, resource_group_name, R::COLLECTION, name).to_string()
}

fn parent_id<R: ResourceModel>(resource_group_name: &str, parent_name: &str) -> Option<String> {
    R::PARENT_COLLECTION
        .map(|c| ResourceId::new(SUBSCRIPTION, resource_group_name, c, parent_name).to_string())
}

fn not_found(id: &str) -> Error {
    Error::service_with_http_metadata(
        CloudError::new()
            .set_code(CloudError::RESOURCE_NOT_FOUND)
            .set_message(format!("the resource {id} was not found")),
        Some(404),
        None,
    )
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<Response<T>> {
    serde_json::from_value(value)
        .map(Response::from)
        .map_err(Error::deser)
}

// Fills in the fields the service computes: ids, provisioning states, and
// a few resource specific values.
fn complete(id: &str, value: &mut Value, previous: Option<&Value>) {
    value["id"] = json!(id);
    if let Some(name) = id.rsplit('/').next() {
        value["name"] = json!(name);
    }
    value["etag"] = json!(format!("W/\"{}\"", uuid::Uuid::new_v4()));
    if !value["properties"].is_object() {
        value["properties"] = json!({});
    }
    if let (Some(previous), Some(properties)) = (previous, value["properties"].as_object_mut()) {
        for key in PRESERVED_CHILDREN {
            if !properties.contains_key(key) {
                if let Some(old) = previous["properties"].get(key) {
                    properties.insert(key.to_string(), old.clone());
                }
            }
        }
    }
    value["properties"]["provisioningState"] = json!("Succeeded");
    if let Some(properties) = value["properties"].as_object_mut() {
        for (key, items) in properties.iter_mut() {
            let Some(items) = items.as_array_mut() else {
                continue;
            };
            for item in items.iter_mut().filter(|i| i.is_object()) {
                let Some(name) = item["name"].as_str().map(str::to_string) else {
                    continue;
                };
                if item["id"].as_str().is_none_or(str::is_empty) {
                    item["id"] = json!(format!("{id}/{key}/{name}"));
                }
                if item["properties"].is_object() {
                    item["properties"]["provisioningState"] = json!("Succeeded");
                }
            }
        }
    }
}

impl State {
    fn get(&self, id: &str) -> Option<&Value> {
        self.resources.get(&id.to_lowercase())
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Value> {
        self.resources.get_mut(&id.to_lowercase())
    }

    fn children(&self, parent: &str, collection: &str) -> Vec<Value> {
        self.get(parent)
            .and_then(|p| p["properties"][collection].as_array())
            .cloned()
            .unwrap_or_default()
    }

    fn next_address(&mut self) -> String {
        self.addresses = self.addresses.wrapping_add(1);
        format!("20.0.0.{}", self.addresses)
    }

    // Resource specific behavior on create or update.
    fn on_put(&mut self, collection: &str, value: &mut Value) {
        match collection {
            "publicIPAddresses" => {
                let is_static = value["properties"]["publicIPAllocationMethod"]
                    .as_str()
                    .is_some_and(|m| m.eq_ignore_ascii_case("Static"));
                if is_static && value["properties"]["ipAddress"].is_null() {
                    value["properties"]["ipAddress"] = json!(self.next_address());
                }
            }
            "applicationGateways" => {
                if value["properties"]["operationalState"].is_null() {
                    value["properties"]["operationalState"] = json!("Running");
                }
            }
            "connections" => {
                value["properties"]["connectionStatus"] = json!("Connected");
            }
            _ => {}
        }
    }

    // Peerings are `Connected` when both sides exist, `Initiated` otherwise.
    fn update_peering_states(&mut self, network_id: &str) {
        let peerings = self.children(network_id, "virtualNetworkPeerings");
        for peering in peerings {
            let Some(remote) = peering["properties"]["remoteVirtualNetwork"]["id"].as_str() else {
                continue;
            };
            let reverse = self
                .children(remote, "virtualNetworkPeerings")
                .into_iter()
                .find(|p| {
                    p["properties"]["remoteVirtualNetwork"]["id"]
                        .as_str()
                        .is_some_and(|id| id.eq_ignore_ascii_case(network_id))
                });
            let state = if reverse.is_some() { "Connected" } else { "Initiated" };
            let name = peering["name"].as_str().unwrap_or_default().to_string();
            self.set_peering_state(network_id, &name, state);
            if let Some(reverse) = reverse {
                let name = reverse["name"].as_str().unwrap_or_default().to_string();
                self.set_peering_state(remote, &name, state);
            }
        }
    }

    fn set_peering_state(&mut self, network_id: &str, name: &str, state: &str) {
        let Some(items) = self
            .get_mut(network_id)
            .and_then(|n| n["properties"]["virtualNetworkPeerings"].as_array_mut())
        else {
            return;
        };
        for item in items
            .iter_mut()
            .filter(|i| i["name"].as_str().is_some_and(|n| n.eq_ignore_ascii_case(name)))
        {
            item["properties"]["peeringState"] = json!(state);
        }
    }

    fn disconnect_peerings_to(&mut self, network_id: &str) {
        for value in self.resources.values_mut() {
            let Some(items) = value["properties"]["virtualNetworkPeerings"].as_array_mut() else {
                continue;
            };
            for item in items.iter_mut().filter(|p| {
                p["properties"]["remoteVirtualNetwork"]["id"]
                    .as_str()
                    .is_some_and(|id| id.eq_ignore_ascii_case(network_id))
            }) {
                item["properties"]["peeringState"] = json!("Disconnected");
            }
        }
    }
}

impl<R: ResourceModel> Resources<R> for FakeNetwork {
    async fn get(&self, req: GetResourceRequest, _options: RequestOptions) -> Result<Response<R>> {
        let mut state = self.lock();
        let rg = &req.resource_group_name;
        let value = match parent_id::<R>(rg, &req.parent_name) {
            None => {
                let id = top_level_id::<R>(rg, &req.name);
                state.requests.push(format!("GET {id}"));
                state.get(&id).cloned()
            }
            Some(parent) => {
                state.requests.push(format!("GET {parent}/{}/{}", R::COLLECTION, req.name));
                state
                    .children(&parent, R::COLLECTION)
                    .into_iter()
                    .find(|c| c["name"].as_str().is_some_and(|n| n.eq_ignore_ascii_case(&req.name)))
            }
        };
        match value {
            Some(v) => decode(v),
            None => Err(not_found(&req.name)),
        }
    }

    async fn create_or_update(
        &self,
        req: CreateOrUpdateResourceRequest<R>,
        _options: RequestOptions,
    ) -> Result<Response<R>> {
        let mut state = self.lock();
        let rg = req.resource_group_name.clone();
        let mut value = serde_json::to_value(&req.resource).map_err(Error::ser)?;
        match parent_id::<R>(&rg, &req.parent_name) {
            None => {
                let id = top_level_id::<R>(&rg, &req.name);
                state.requests.push(format!("PUT {id}"));
                let previous = state.get(&id).cloned();
                complete(&id, &mut value, previous.as_ref());
                state.on_put(R::COLLECTION, &mut value);
                if let Some(location) = previous.as_ref().map(|p| p["location"].clone()) {
                    if value["location"].as_str().is_none_or(str::is_empty) {
                        value["location"] = location;
                    }
                }
                state.resources.insert(id.to_lowercase(), value.clone());
                if R::COLLECTION == "virtualNetworks" {
                    state.update_peering_states(&id);
                    return decode(state.get(&id).cloned().unwrap_or(value));
                }
                decode(value)
            }
            Some(parent) => {
                let id = format!("{parent}/{}/{}", R::COLLECTION, req.name);
                state.requests.push(format!("PUT {id}"));
                complete(&id, &mut value, None);
                let Some(items) = state.get_mut(&parent).map(|p| {
                    let properties = &mut p["properties"];
                    if !properties[R::COLLECTION].is_array() {
                        properties[R::COLLECTION] = json!([]);
                    }
                    properties[R::COLLECTION].as_array_mut()
                }) else {
                    return Err(not_found(&parent));
                };
                if let Some(items) = items {
                    items.retain(|i| {
                        !i["name"]
                            .as_str()
                            .is_some_and(|n| n.eq_ignore_ascii_case(&req.name))
                    });
                    items.push(value.clone());
                }
                if R::COLLECTION == "virtualNetworkPeerings" {
                    state.update_peering_states(&parent);
                    let stored = state
                        .children(&parent, R::COLLECTION)
                        .into_iter()
                        .find(|c| c["id"] == json!(id));
                    return decode(stored.unwrap_or(value));
                }
                decode(value)
            }
        }
    }

    async fn delete(&self, req: DeleteResourceRequest, _options: RequestOptions) -> Result<Response<()>> {
        let mut state = self.lock();
        let rg = &req.resource_group_name;
        match parent_id::<R>(rg, &req.parent_name) {
            None => {
                let id = top_level_id::<R>(rg, &req.name);
                state.requests.push(format!("DELETE {id}"));
                state.resources.remove(&id.to_lowercase());
                if R::COLLECTION == "virtualNetworks" {
                    state.disconnect_peerings_to(&id);
                }
            }
            Some(parent) => {
                state
                    .requests
                    .push(format!("DELETE {parent}/{}/{}", R::COLLECTION, req.name));
                if let Some(items) = state
                    .get_mut(&parent)
                    .and_then(|p| p["properties"][R::COLLECTION].as_array_mut())
                {
                    items.retain(|i| {
                        !i["name"]
                            .as_str()
                            .is_some_and(|n| n.eq_ignore_ascii_case(&req.name))
                    });
                }
                if R::COLLECTION == "virtualNetworkPeerings" {
                    state.update_peering_states(&parent);
                }
            }
        }
        Ok(Response::from(()))
    }

    async fn list(
        &self,
        req: ListResourcesRequest,
        _options: RequestOptions,
    ) -> Result<Response<ListResult<R>>> {
        let state = self.lock();
        let values = match parent_id::<R>(&req.resource_group_name, &req.parent_name) {
            Some(parent) => state.children(&parent, R::COLLECTION),
            None => state
                .resources
                .values()
                .filter(|v| {
                    v["id"].as_str().and_then(|id| ResourceId::parse(id).ok()).is_some_and(|r| {
                        r.resource_type() == R::COLLECTION
                            && (req.resource_group_name.is_empty()
                                || r.resource_group_name()
                                    .eq_ignore_ascii_case(&req.resource_group_name))
                    })
                })
                .cloned()
                .collect(),
        };
        decode(json!({ "value": values }))
    }
}

impl NetworkActions for FakeNetwork {
    async fn start_application_gateway(
        &self,
        req: ActionRequest<()>,
        _options: RequestOptions,
    ) -> Result<Response<()>> {
        self.set_operational_state(&req, "Running")
    }

    async fn stop_application_gateway(
        &self,
        req: ActionRequest<()>,
        _options: RequestOptions,
    ) -> Result<Response<()>> {
        self.set_operational_state(&req, "Stopped")
    }

    async fn reset_virtual_network_gateway(
        &self,
        req: ActionRequest<()>,
        _options: RequestOptions,
    ) -> Result<Response<VirtualNetworkGateway>> {
        let mut state = self.lock();
        let id = top_level_id::<VirtualNetworkGateway>(&req.resource_group_name, &req.name);
        state.requests.push(format!("POST {id}/reset"));
        match state.get(&id).cloned() {
            Some(v) => decode(v),
            None => Err(not_found(&id)),
        }
    }

    async fn list_gateway_connections(
        &self,
        req: ListResourcesRequest,
        _options: RequestOptions,
    ) -> Result<Response<ListResult<VirtualNetworkGatewayConnection>>> {
        let state = self.lock();
        let gateway = top_level_id::<VirtualNetworkGateway>(&req.resource_group_name, &req.parent_name);
        let values = state
            .resources
            .values()
            .filter(|v| {
                ["virtualNetworkGateway1", "virtualNetworkGateway2"].iter().any(|key| {
                    v["properties"][key]["id"]
                        .as_str()
                        .is_some_and(|id| id.eq_ignore_ascii_case(&gateway))
                })
            })
            .cloned()
            .collect::<Vec<_>>();
        decode(json!({ "value": values }))
    }

    async fn get_topology(
        &self,
        req: ActionRequest<TopologyParameters>,
        _options: RequestOptions,
    ) -> Result<Response<Topology>> {
        let state = self.lock();
        let target = req
            .parameters
            .target_resource_group_name
            .clone()
            .unwrap_or_default();
        let resources = state
            .resources
            .values()
            .filter(|v| {
                v["id"]
                    .as_str()
                    .and_then(|id| ResourceId::parse(id).ok())
                    .is_some_and(|r| r.resource_group_name().eq_ignore_ascii_case(&target))
            })
            .map(|v| json!({ "id": v["id"], "name": v["name"], "location": v["location"] }))
            .collect::<Vec<_>>();
        decode(json!({ "id": uuid::Uuid::new_v4().to_string(), "resources": resources }))
    }

    async fn verify_ip_flow(
        &self,
        req: ActionRequest<VerificationIpFlowParameters>,
        _options: RequestOptions,
    ) -> Result<Response<VerificationIpFlowResult>> {
        // Inbound traffic is only allowed from the virtual network.
        let p = &req.parameters;
        let from_network = p
            .remote_ip_address
            .as_deref()
            .is_some_and(|ip| ip.starts_with("10."));
        let inbound = p.direction.as_ref().is_some_and(|d| d.matches(&Direction::INBOUND));
        let result = if inbound && !from_network {
            json!({ "access": "Deny", "ruleName": "defaultSecurityRules/DenyAllInBound" })
        } else {
            json!({ "access": "Allow", "ruleName": "defaultSecurityRules/AllowVnetInBound" })
        };
        decode(result)
    }

    async fn get_next_hop(
        &self,
        req: ActionRequest<NextHopParameters>,
        _options: RequestOptions,
    ) -> Result<Response<NextHopResult>> {
        let local = req
            .parameters
            .destination_ip_address
            .as_deref()
            .is_some_and(|ip| ip.starts_with("10."));
        let result = if local {
            json!({ "nextHopType": "VnetLocal", "nextHopIpAddress": "" })
        } else {
            json!({ "nextHopType": "Internet", "nextHopIpAddress": "" })
        };
        decode(result)
    }

    async fn get_flow_log_status(
        &self,
        req: ActionRequest<FlowLogStatusParameters>,
        _options: RequestOptions,
    ) -> Result<Response<FlowLogInformation>> {
        let state = self.lock();
        let target = req.parameters.target_resource_id;
        let information = state
            .flow_logs
            .get(&target.to_lowercase())
            .cloned()
            .unwrap_or_else(|| FlowLogInformation::new().set_target_resource_id(target));
        Ok(Response::from(information))
    }

    async fn set_flow_log_configuration(
        &self,
        req: ActionRequest<FlowLogInformation>,
        _options: RequestOptions,
    ) -> Result<Response<FlowLogInformation>> {
        let mut state = self.lock();
        let information = req.parameters;
        state
            .requests
            .push(format!("POST {}/configureFlowLog", information.target_resource_id));
        state.flow_logs.insert(
            information.target_resource_id.to_lowercase(),
            information.clone(),
        );
        Ok(Response::from(information))
    }

    async fn stop_packet_capture(
        &self,
        req: ActionRequest<()>,
        _options: RequestOptions,
    ) -> Result<Response<()>> {
        let mut state = self.lock();
        let id = self.capture_id(&state, &req)?;
        state.requests.push(format!("POST {id}/stop"));
        state.stopped_captures.insert(id.to_lowercase());
        Ok(Response::from(()))
    }

    async fn get_packet_capture_status(
        &self,
        req: ActionRequest<()>,
        _options: RequestOptions,
    ) -> Result<Response<PacketCaptureQueryStatusResult>> {
        let state = self.lock();
        let id = self.capture_id(&state, &req)?;
        let status = if state.stopped_captures.contains(&id.to_lowercase()) {
            "Stopped"
        } else {
            "Running"
        };
        decode(json!({ "id": id, "name": req.name, "packetCaptureStatus": status }))
    }
}

impl FakeNetwork {
    fn set_operational_state(&self, req: &ActionRequest<()>, operational_state: &str) -> Result<Response<()>> {
        let mut state = self.lock();
        let id = top_level_id::<ApplicationGateway>(&req.resource_group_name, &req.name);
        state.requests.push(format!("POST {id}/{operational_state}"));
        let Some(gateway) = state.get_mut(&id) else {
            return Err(not_found(&id));
        };
        gateway["properties"]["operationalState"] = json!(operational_state);
        Ok(Response::from(()))
    }

    fn capture_id(&self, state: &State, req: &ActionRequest<()>) -> Result<String> {
        let watcher = top_level_id::<NetworkWatcher>(&req.resource_group_name, &req.parent_name);
        state
            .children(&watcher, "packetCaptures")
            .into_iter()
            .find(|c| c["name"].as_str().is_some_and(|n| n.eq_ignore_ascii_case(&req.name)))
            .and_then(|c| c["id"].as_str().map(str::to_string))
            .ok_or_else(|| not_found(&req.name))
    }
}
