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

use crate::Result;
use crate::model::*;
use gax::options::RequestOptions;
use gax::polling_policy::{PollingBackoffPolicy, PollingErrorPolicy};
use gax::response::Response;
use std::sync::Arc;

/// A dyn-compatible, crate-private version of [super::Resources].
#[async_trait::async_trait]
pub trait Resources<R: ResourceModel>: std::fmt::Debug + Send + Sync {
    async fn get(&self, req: GetResourceRequest, options: RequestOptions) -> Result<Response<R>>;

    async fn create_or_update(
        &self,
        req: CreateOrUpdateResourceRequest<R>,
        options: RequestOptions,
    ) -> Result<Response<R>>;

    async fn delete(
        &self,
        req: DeleteResourceRequest,
        options: RequestOptions,
    ) -> Result<Response<()>>;

    async fn list(
        &self,
        req: ListResourcesRequest,
        options: RequestOptions,
    ) -> Result<Response<ListResult<R>>>;

    fn get_polling_error_policy(&self, options: &RequestOptions) -> Arc<dyn PollingErrorPolicy>;

    fn get_polling_backoff_policy(&self, options: &RequestOptions)
    -> Arc<dyn PollingBackoffPolicy>;
}

/// All implementations of [super::Resources] also implement [Resources].
#[async_trait::async_trait]
impl<R: ResourceModel, T: super::Resources<R>> Resources<R> for T {
    async fn get(&self, req: GetResourceRequest, options: RequestOptions) -> Result<Response<R>> {
        <T as super::Resources<R>>::get(self, req, options).await
    }

    async fn create_or_update(
        &self,
        req: CreateOrUpdateResourceRequest<R>,
        options: RequestOptions,
    ) -> Result<Response<R>> {
        <T as super::Resources<R>>::create_or_update(self, req, options).await
    }

    async fn delete(
        &self,
        req: DeleteResourceRequest,
        options: RequestOptions,
    ) -> Result<Response<()>> {
        <T as super::Resources<R>>::delete(self, req, options).await
    }

    async fn list(
        &self,
        req: ListResourcesRequest,
        options: RequestOptions,
    ) -> Result<Response<ListResult<R>>> {
        <T as super::Resources<R>>::list(self, req, options).await
    }

    fn get_polling_error_policy(&self, options: &RequestOptions) -> Arc<dyn PollingErrorPolicy> {
        <T as super::Resources<R>>::get_polling_error_policy(self, options)
    }

    fn get_polling_backoff_policy(
        &self,
        options: &RequestOptions,
    ) -> Arc<dyn PollingBackoffPolicy> {
        <T as super::Resources<R>>::get_polling_backoff_policy(self, options)
    }
}

/// A dyn-compatible, crate-private version of [super::NetworkActions].
#[async_trait::async_trait]
pub trait NetworkActions: std::fmt::Debug + Send + Sync {
    async fn start_application_gateway(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<()>>;

    async fn stop_application_gateway(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<()>>;

    async fn reset_virtual_network_gateway(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<VirtualNetworkGateway>>;

    async fn list_gateway_connections(
        &self,
        req: ListResourcesRequest,
        options: RequestOptions,
    ) -> Result<Response<ListResult<VirtualNetworkGatewayConnection>>>;

    async fn get_topology(
        &self,
        req: ActionRequest<TopologyParameters>,
        options: RequestOptions,
    ) -> Result<Response<Topology>>;

    async fn verify_ip_flow(
        &self,
        req: ActionRequest<VerificationIpFlowParameters>,
        options: RequestOptions,
    ) -> Result<Response<VerificationIpFlowResult>>;

    async fn get_next_hop(
        &self,
        req: ActionRequest<NextHopParameters>,
        options: RequestOptions,
    ) -> Result<Response<NextHopResult>>;

    async fn get_flow_log_status(
        &self,
        req: ActionRequest<FlowLogStatusParameters>,
        options: RequestOptions,
    ) -> Result<Response<FlowLogInformation>>;

    async fn set_flow_log_configuration(
        &self,
        req: ActionRequest<FlowLogInformation>,
        options: RequestOptions,
    ) -> Result<Response<FlowLogInformation>>;

    async fn stop_packet_capture(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<()>>;

    async fn get_packet_capture_status(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<PacketCaptureQueryStatusResult>>;
}

/// All implementations of [super::NetworkActions] also implement [NetworkActions].
#[async_trait::async_trait]
impl<T: super::NetworkActions> NetworkActions for T {
    async fn start_application_gateway(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<()>> {
        T::start_application_gateway(self, req, options).await
    }

    async fn stop_application_gateway(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<()>> {
        T::stop_application_gateway(self, req, options).await
    }

    async fn reset_virtual_network_gateway(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<VirtualNetworkGateway>> {
        T::reset_virtual_network_gateway(self, req, options).await
    }

    async fn list_gateway_connections(
        &self,
        req: ListResourcesRequest,
        options: RequestOptions,
    ) -> Result<Response<ListResult<VirtualNetworkGatewayConnection>>> {
        T::list_gateway_connections(self, req, options).await
    }

    async fn get_topology(
        &self,
        req: ActionRequest<TopologyParameters>,
        options: RequestOptions,
    ) -> Result<Response<Topology>> {
        T::get_topology(self, req, options).await
    }

    async fn verify_ip_flow(
        &self,
        req: ActionRequest<VerificationIpFlowParameters>,
        options: RequestOptions,
    ) -> Result<Response<VerificationIpFlowResult>> {
        T::verify_ip_flow(self, req, options).await
    }

    async fn get_next_hop(
        &self,
        req: ActionRequest<NextHopParameters>,
        options: RequestOptions,
    ) -> Result<Response<NextHopResult>> {
        T::get_next_hop(self, req, options).await
    }

    async fn get_flow_log_status(
        &self,
        req: ActionRequest<FlowLogStatusParameters>,
        options: RequestOptions,
    ) -> Result<Response<FlowLogInformation>> {
        T::get_flow_log_status(self, req, options).await
    }

    async fn set_flow_log_configuration(
        &self,
        req: ActionRequest<FlowLogInformation>,
        options: RequestOptions,
    ) -> Result<Response<FlowLogInformation>> {
        T::set_flow_log_configuration(self, req, options).await
    }

    async fn stop_packet_capture(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<()>> {
        T::stop_packet_capture(self, req, options).await
    }

    async fn get_packet_capture_status(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<PacketCaptureQueryStatusResult>> {
        T::get_packet_capture_status(self, req, options).await
    }
}
