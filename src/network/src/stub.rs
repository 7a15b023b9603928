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

//! Traits to mock the clients in this library.
//!
//! Application developers may need to mock the clients in this library to test
//! how their application works with different (and sometimes hard to trigger)
//! client and service behavior. Such test can define mocks implementing the
//! trait(s) defined in this module, initialize the client with an instance of
//! this mock in their tests, and verify their application responds as expected.

#![allow(rustdoc::broken_intra_doc_links)]

pub(crate) mod dynamic;

use crate::Result;
use crate::model::*;
use gax::options::RequestOptions;
use gax::polling_policy::{PollingBackoffPolicy, PollingErrorPolicy};
use gax::response::Response;
use std::future::Future;
use std::sync::Arc;

/// Defines the trait used to implement [crate::client::Resources].
///
/// Every resource collection in the service supports the same four
/// operations, the trait is generic over the resource type.
///
/// Services gain new RPCs routinely. Consequently, this trait gains new
/// methods too. To avoid breaking applications the trait provides a default
/// implementation of each method. Most of these implementations just panic.
pub trait Resources<R: ResourceModel>: std::fmt::Debug + Send + Sync {
    /// Implements [crate::client::Resources::get].
    fn get(
        &self,
        _req: GetResourceRequest,
        _options: RequestOptions,
    ) -> impl Future<Output = Result<Response<R>>> + Send {
        unimplemented_stub::<Response<R>>()
    }

    /// Implements [crate::client::Resources::create_or_update].
    fn create_or_update(
        &self,
        _req: CreateOrUpdateResourceRequest<R>,
        _options: RequestOptions,
    ) -> impl Future<Output = Result<Response<R>>> + Send {
        unimplemented_stub::<Response<R>>()
    }

    /// Implements [crate::client::Resources::delete].
    fn delete(
        &self,
        _req: DeleteResourceRequest,
        _options: RequestOptions,
    ) -> impl Future<Output = Result<Response<()>>> + Send {
        unimplemented_stub::<Response<()>>()
    }

    /// Implements [crate::client::Resources::list].
    fn list(
        &self,
        _req: ListResourcesRequest,
        _options: RequestOptions,
    ) -> impl Future<Output = Result<Response<ListResult<R>>>> + Send {
        unimplemented_stub::<Response<ListResult<R>>>()
    }

    /// Returns the polling error policy.
    ///
    /// When mocking, this method is typically irrelevant. Do not try to verify
    /// it is called by your mocks.
    fn get_polling_error_policy(&self, _options: &RequestOptions) -> Arc<dyn PollingErrorPolicy> {
        Arc::new(gax::polling_policy::TransientErrors)
    }

    /// Returns the polling backoff policy.
    ///
    /// When mocking, this method is typically irrelevant. Do not try to verify
    /// it is called by your mocks.
    fn get_polling_backoff_policy(
        &self,
        _options: &RequestOptions,
    ) -> Arc<dyn PollingBackoffPolicy> {
        Arc::new(gax::exponential_backoff::ExponentialBackoff::default())
    }
}

/// Defines the trait used to implement [crate::client::Actions].
///
/// Actions are the operations that do not fit the create, read, update,
/// delete pattern. For example, starting an application gateway, or running
/// diagnostics through a network watcher.
pub trait NetworkActions: std::fmt::Debug + Send + Sync {
    /// Implements [crate::client::Actions::start_application_gateway].
    fn start_application_gateway(
        &self,
        _req: ActionRequest<()>,
        _options: RequestOptions,
    ) -> impl Future<Output = Result<Response<()>>> + Send {
        unimplemented_stub::<Response<()>>()
    }

    /// Implements [crate::client::Actions::stop_application_gateway].
    fn stop_application_gateway(
        &self,
        _req: ActionRequest<()>,
        _options: RequestOptions,
    ) -> impl Future<Output = Result<Response<()>>> + Send {
        unimplemented_stub::<Response<()>>()
    }

    /// Implements [crate::client::Actions::reset_virtual_network_gateway].
    fn reset_virtual_network_gateway(
        &self,
        _req: ActionRequest<()>,
        _options: RequestOptions,
    ) -> impl Future<Output = Result<Response<VirtualNetworkGateway>>> + Send {
        unimplemented_stub::<Response<VirtualNetworkGateway>>()
    }

    /// Implements [crate::client::Actions::list_gateway_connections].
    fn list_gateway_connections(
        &self,
        _req: ListResourcesRequest,
        _options: RequestOptions,
    ) -> impl Future<Output = Result<Response<ListResult<VirtualNetworkGatewayConnection>>>> + Send
    {
        unimplemented_stub::<Response<ListResult<VirtualNetworkGatewayConnection>>>()
    }

    /// Implements [crate::client::Actions::get_topology].
    fn get_topology(
        &self,
        _req: ActionRequest<TopologyParameters>,
        _options: RequestOptions,
    ) -> impl Future<Output = Result<Response<Topology>>> + Send {
        unimplemented_stub::<Response<Topology>>()
    }

    /// Implements [crate::client::Actions::verify_ip_flow].
    fn verify_ip_flow(
        &self,
        _req: ActionRequest<VerificationIpFlowParameters>,
        _options: RequestOptions,
    ) -> impl Future<Output = Result<Response<VerificationIpFlowResult>>> + Send {
        unimplemented_stub::<Response<VerificationIpFlowResult>>()
    }

    /// Implements [crate::client::Actions::get_next_hop].
    fn get_next_hop(
        &self,
        _req: ActionRequest<NextHopParameters>,
        _options: RequestOptions,
    ) -> impl Future<Output = Result<Response<NextHopResult>>> + Send {
        unimplemented_stub::<Response<NextHopResult>>()
    }

    /// Implements [crate::client::Actions::get_flow_log_status].
    fn get_flow_log_status(
        &self,
        _req: ActionRequest<FlowLogStatusParameters>,
        _options: RequestOptions,
    ) -> impl Future<Output = Result<Response<FlowLogInformation>>> + Send {
        unimplemented_stub::<Response<FlowLogInformation>>()
    }

    /// Implements [crate::client::Actions::set_flow_log_configuration].
    fn set_flow_log_configuration(
        &self,
        _req: ActionRequest<FlowLogInformation>,
        _options: RequestOptions,
    ) -> impl Future<Output = Result<Response<FlowLogInformation>>> + Send {
        unimplemented_stub::<Response<FlowLogInformation>>()
    }

    /// Implements [crate::client::Actions::stop_packet_capture].
    fn stop_packet_capture(
        &self,
        _req: ActionRequest<()>,
        _options: RequestOptions,
    ) -> impl Future<Output = Result<Response<()>>> + Send {
        unimplemented_stub::<Response<()>>()
    }

    /// Implements [crate::client::Actions::get_packet_capture_status].
    fn get_packet_capture_status(
        &self,
        _req: ActionRequest<()>,
        _options: RequestOptions,
    ) -> impl Future<Output = Result<Response<PacketCaptureQueryStatusResult>>> + Send {
        unimplemented_stub::<Response<PacketCaptureQueryStatusResult>>()
    }
}

/// Implemented by stubs for the complete service.
///
/// [crate::NetworkManager::from_stub] requires a stub implementing every
/// resource collection and all the actions. This trait is implemented
/// automatically for such types.
pub trait Network:
    Resources<VirtualNetwork>
    + Resources<Subnet>
    + Resources<VirtualNetworkPeering>
    + Resources<PublicIpAddress>
    + Resources<NetworkInterface>
    + Resources<NetworkSecurityGroup>
    + Resources<SecurityRule>
    + Resources<LoadBalancer>
    + Resources<ApplicationGateway>
    + Resources<VirtualNetworkGateway>
    + Resources<VirtualNetworkGatewayConnection>
    + Resources<LocalNetworkGateway>
    + Resources<NetworkWatcher>
    + Resources<PacketCapture>
    + NetworkActions
{
}

impl<T> Network for T where
    T: Resources<VirtualNetwork>
        + Resources<Subnet>
        + Resources<VirtualNetworkPeering>
        + Resources<PublicIpAddress>
        + Resources<NetworkInterface>
        + Resources<NetworkSecurityGroup>
        + Resources<SecurityRule>
        + Resources<LoadBalancer>
        + Resources<ApplicationGateway>
        + Resources<VirtualNetworkGateway>
        + Resources<VirtualNetworkGatewayConnection>
        + Resources<LocalNetworkGateway>
        + Resources<NetworkWatcher>
        + Resources<PacketCapture>
        + NetworkActions
{
}

async fn unimplemented_stub<T: Send>() -> Result<T> {
    unimplemented!(concat!(
        "to prevent breaking changes as services gain new RPCs, the stub ",
        "traits provide default implementations of each method. In the client ",
        "libraries, all implementations of the traits override all methods. ",
        "If you are seeing this error, it means the method is not implemented ",
        "by your mock or fake implementation of the stub trait."
    ));
}
