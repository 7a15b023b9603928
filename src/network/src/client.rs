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

//! Low level clients.
//!
//! These clients map one-to-one to the REST operations. Most applications
//! use the fluent layer in [crate::fluent], which reconciles defaults and
//! chains several of these calls.

use crate::model::*;
use crate::stub::dynamic;
use std::sync::Arc;

/// Implements a client for one collection of resources.
///
/// # Example
/// ```no_run
/// # use cloud_network::client::Network;
/// # async fn sample() -> cloud_network::Result<()> {
/// let client = Network::builder().build().await.expect("a configured client");
/// let network = client
///     .virtual_networks()
///     .get()
///     .set_resource_group_name("rg1")
///     .set_name("vnet1")
///     .send()
///     .await?;
/// println!("{network:?}");
/// # Ok(()) }
/// ```
///
/// # Pooling and Cloning
///
/// `Resources` holds a connection pool internally, it is advised to
/// create one and then reuse it. You do not need to wrap `Resources` in
/// an [Rc](std::rc::Rc) or [Arc] to reuse it, because it already uses an
/// `Arc` internally.
#[derive(Clone, Debug)]
pub struct Resources<R: ResourceModel> {
    inner: Arc<dyn dynamic::Resources<R>>,
}

impl<R: ResourceModel> Resources<R> {
    /// Creates a new client from the provided stub.
    ///
    /// The most common case for calling this function is in tests mocking the
    /// client's behavior.
    pub fn from_stub<T>(stub: T) -> Self
    where
        T: crate::stub::Resources<R> + 'static,
    {
        Self {
            inner: Arc::new(stub),
        }
    }

    pub(crate) fn from_arc(inner: Arc<dyn dynamic::Resources<R>>) -> Self {
        Self { inner }
    }

    /// Gets a resource.
    pub fn get(&self) -> crate::builder::Get<R> {
        crate::builder::Get::new(self.inner.clone())
    }

    /// Creates a resource, or replaces an existing resource.
    ///
    /// The service completes the operation in the background. Use
    /// [poller()][crate::builder::CreateOrUpdate::poller] to wait until the
    /// provisioning state is terminal.
    pub fn create_or_update(&self) -> crate::builder::CreateOrUpdate<R> {
        crate::builder::CreateOrUpdate::new(self.inner.clone())
    }

    /// Deletes a resource.
    pub fn delete(&self) -> crate::builder::Delete<R> {
        crate::builder::Delete::new(self.inner.clone())
    }

    /// Lists the resources in a resource group, in a parent resource, or in
    /// the subscription.
    pub fn list(&self) -> crate::builder::List<R> {
        crate::builder::List::new(self.inner.clone())
    }
}

/// Implements a client for the actions on networking resources.
#[derive(Clone, Debug)]
pub struct Actions {
    inner: Arc<dyn dynamic::NetworkActions>,
}

impl Actions {
    /// Creates a new client from the provided stub.
    pub fn from_stub<T>(stub: T) -> Self
    where
        T: crate::stub::NetworkActions + 'static,
    {
        Self {
            inner: Arc::new(stub),
        }
    }

    pub(crate) fn from_arc(inner: Arc<dyn dynamic::NetworkActions>) -> Self {
        Self { inner }
    }

    /// Starts an application gateway.
    pub fn start_application_gateway(&self) -> crate::builder::StartApplicationGateway {
        crate::builder::StartApplicationGateway::new(self.inner.clone())
    }

    /// Stops an application gateway.
    pub fn stop_application_gateway(&self) -> crate::builder::StopApplicationGateway {
        crate::builder::StopApplicationGateway::new(self.inner.clone())
    }

    /// Resets the primary instance of a virtual network gateway.
    pub fn reset_virtual_network_gateway(&self) -> crate::builder::ResetVirtualNetworkGateway {
        crate::builder::ResetVirtualNetworkGateway::new(self.inner.clone())
    }

    /// Lists the connections of a virtual network gateway.
    pub fn list_gateway_connections(&self) -> crate::builder::ListGatewayConnections {
        crate::builder::ListGatewayConnections::new(self.inner.clone())
    }

    /// Gets the topology of a resource group, as seen by a network watcher.
    pub fn get_topology(&self) -> crate::builder::GetTopology {
        crate::builder::GetTopology::new(self.inner.clone())
    }

    /// Verifies if a packet is allowed or denied to or from a virtual machine.
    pub fn verify_ip_flow(&self) -> crate::builder::VerifyIpFlow {
        crate::builder::VerifyIpFlow::new(self.inner.clone())
    }

    /// Gets the next hop from a virtual machine.
    pub fn get_next_hop(&self) -> crate::builder::GetNextHop {
        crate::builder::GetNextHop::new(self.inner.clone())
    }

    /// Queries the flow log configuration of a network security group.
    pub fn get_flow_log_status(&self) -> crate::builder::GetFlowLogStatus {
        crate::builder::GetFlowLogStatus::new(self.inner.clone())
    }

    /// Configures flow logs on a network security group.
    pub fn set_flow_log_configuration(&self) -> crate::builder::SetFlowLogConfiguration {
        crate::builder::SetFlowLogConfiguration::new(self.inner.clone())
    }

    /// Stops a running packet capture.
    pub fn stop_packet_capture(&self) -> crate::builder::StopPacketCapture {
        crate::builder::StopPacketCapture::new(self.inner.clone())
    }

    /// Queries the status of a packet capture.
    pub fn get_packet_capture_status(&self) -> crate::builder::GetPacketCaptureStatus {
        crate::builder::GetPacketCaptureStatus::new(self.inner.clone())
    }
}

/// Implements a client for all the networking resources.
///
/// Holds one [Resources] client per collection, and an [Actions] client. All
/// of them share the same stub.
///
/// # Configuration
///
/// To configure `Network` use the `with_*` methods in the type returned
/// by [builder()][Network::builder]. The default configuration should
/// work for most applications. Common configuration changes include
///
/// * [with_endpoint()]: by default this client uses the global default
///   endpoint (`https://management.azure.com`). Applications using
///   sovereign clouds, or testing with emulators, may override it.
/// * [with_subscription()]: by default the subscription is read from the
///   `CLOUD_NETWORK_SUBSCRIPTION_ID` environment variable.
/// * [with_credentials()]: by default this client uses the bearer token in
///   `CLOUD_NETWORK_ACCESS_TOKEN`.
///
/// [with_endpoint()]: crate::builder::ClientBuilder::with_endpoint
/// [with_subscription()]: crate::builder::ClientBuilder::with_subscription
/// [with_credentials()]: crate::builder::ClientBuilder::with_credentials
#[derive(Clone, Debug)]
pub struct Network {
    subscription: String,
    virtual_networks: Resources<VirtualNetwork>,
    subnets: Resources<Subnet>,
    virtual_network_peerings: Resources<VirtualNetworkPeering>,
    public_ip_addresses: Resources<PublicIpAddress>,
    network_interfaces: Resources<NetworkInterface>,
    network_security_groups: Resources<NetworkSecurityGroup>,
    security_rules: Resources<SecurityRule>,
    load_balancers: Resources<LoadBalancer>,
    application_gateways: Resources<ApplicationGateway>,
    virtual_network_gateways: Resources<VirtualNetworkGateway>,
    virtual_network_gateway_connections: Resources<VirtualNetworkGatewayConnection>,
    local_network_gateways: Resources<LocalNetworkGateway>,
    network_watchers: Resources<NetworkWatcher>,
    packet_captures: Resources<PacketCapture>,
    actions: Actions,
}

impl Network {
    /// Returns a builder for [Network].
    ///
    /// ```no_run
    /// # tokio_test::block_on(async {
    /// # use cloud_network::client::Network;
    /// let client = Network::builder().with_subscription("my-subscription").build().await?;
    /// # gax::client_builder::Result::<()>::Ok(()) });
    /// ```
    pub fn builder() -> crate::builder::ClientBuilder {
        gax::client_builder::internal::new_builder(crate::builder::client::Factory)
    }

    /// Creates a new client from the provided stub.
    ///
    /// The most common case for calling this function is in tests mocking the
    /// client's behavior. The subscription is used to compute resource ids.
    pub fn from_stub<S, T>(subscription: S, stub: T) -> Self
    where
        S: Into<String>,
        T: crate::stub::Network + 'static,
    {
        Self::from_shared(subscription.into(), Arc::new(stub))
    }

    pub(crate) async fn new(
        config: gax::client_builder::internal::ClientConfig,
    ) -> gax::client_builder::Result<Self> {
        let subscription = config.resolve_subscription()?;
        let tracing = config.tracing;
        let transport = crate::transport::Network::new(config).await?;
        if tracing {
            return Ok(Self::from_shared(
                subscription,
                Arc::new(crate::tracing::Network::new(transport)),
            ));
        }
        Ok(Self::from_shared(subscription, Arc::new(transport)))
    }

    // Each field needs its own trait object, the `Arc<T>` coerces to all of
    // them.
    fn from_shared<T: crate::stub::Network + 'static>(subscription: String, stub: Arc<T>) -> Self {
        Self {
            subscription,
            virtual_networks: Resources::from_arc(stub.clone()),
            subnets: Resources::from_arc(stub.clone()),
            virtual_network_peerings: Resources::from_arc(stub.clone()),
            public_ip_addresses: Resources::from_arc(stub.clone()),
            network_interfaces: Resources::from_arc(stub.clone()),
            network_security_groups: Resources::from_arc(stub.clone()),
            security_rules: Resources::from_arc(stub.clone()),
            load_balancers: Resources::from_arc(stub.clone()),
            application_gateways: Resources::from_arc(stub.clone()),
            virtual_network_gateways: Resources::from_arc(stub.clone()),
            virtual_network_gateway_connections: Resources::from_arc(stub.clone()),
            local_network_gateways: Resources::from_arc(stub.clone()),
            network_watchers: Resources::from_arc(stub.clone()),
            packet_captures: Resources::from_arc(stub.clone()),
            actions: Actions::from_arc(stub),
        }
    }

    /// The subscription of all the resources managed by this client.
    pub fn subscription(&self) -> &str {
        &self.subscription
    }

    pub fn virtual_networks(&self) -> &Resources<VirtualNetwork> {
        &self.virtual_networks
    }

    pub fn subnets(&self) -> &Resources<Subnet> {
        &self.subnets
    }

    pub fn virtual_network_peerings(&self) -> &Resources<VirtualNetworkPeering> {
        &self.virtual_network_peerings
    }

    pub fn public_ip_addresses(&self) -> &Resources<PublicIpAddress> {
        &self.public_ip_addresses
    }

    pub fn network_interfaces(&self) -> &Resources<NetworkInterface> {
        &self.network_interfaces
    }

    pub fn network_security_groups(&self) -> &Resources<NetworkSecurityGroup> {
        &self.network_security_groups
    }

    pub fn security_rules(&self) -> &Resources<SecurityRule> {
        &self.security_rules
    }

    pub fn load_balancers(&self) -> &Resources<LoadBalancer> {
        &self.load_balancers
    }

    pub fn application_gateways(&self) -> &Resources<ApplicationGateway> {
        &self.application_gateways
    }

    pub fn virtual_network_gateways(&self) -> &Resources<VirtualNetworkGateway> {
        &self.virtual_network_gateways
    }

    pub fn virtual_network_gateway_connections(
        &self,
    ) -> &Resources<VirtualNetworkGatewayConnection> {
        &self.virtual_network_gateway_connections
    }

    pub fn local_network_gateways(&self) -> &Resources<LocalNetworkGateway> {
        &self.local_network_gateways
    }

    pub fn network_watchers(&self) -> &Resources<NetworkWatcher> {
        &self.network_watchers
    }

    pub fn packet_captures(&self) -> &Resources<PacketCapture> {
        &self.packet_captures
    }

    pub fn actions(&self) -> &Actions {
        &self.actions
    }
}
