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

/// Implements a [Network](super::stub::Network) decorator for logging and tracing.
#[derive(Clone, Debug)]
pub struct Network<T>
where
    T: super::stub::Network + std::fmt::Debug + Send + Sync,
{
    inner: T,
}

impl<T> Network<T>
where
    T: super::stub::Network + std::fmt::Debug + Send + Sync,
{
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<R, T> super::stub::Resources<R> for Network<T>
where
    R: ResourceModel,
    T: super::stub::Network + super::stub::Resources<R> + std::fmt::Debug + Send + Sync,
{
    #[tracing::instrument(ret)]
    async fn get(&self, req: GetResourceRequest, options: RequestOptions) -> Result<Response<R>> {
        super::stub::Resources::<R>::get(&self.inner, req, options).await
    }

    #[tracing::instrument(ret)]
    async fn create_or_update(
        &self,
        req: CreateOrUpdateResourceRequest<R>,
        options: RequestOptions,
    ) -> Result<Response<R>> {
        super::stub::Resources::<R>::create_or_update(&self.inner, req, options).await
    }

    #[tracing::instrument(ret)]
    async fn delete(
        &self,
        req: DeleteResourceRequest,
        options: RequestOptions,
    ) -> Result<Response<()>> {
        super::stub::Resources::<R>::delete(&self.inner, req, options).await
    }

    #[tracing::instrument(ret)]
    async fn list(
        &self,
        req: ListResourcesRequest,
        options: RequestOptions,
    ) -> Result<Response<ListResult<R>>> {
        super::stub::Resources::<R>::list(&self.inner, req, options).await
    }

    fn get_polling_error_policy(&self, options: &RequestOptions) -> Arc<dyn PollingErrorPolicy> {
        super::stub::Resources::<R>::get_polling_error_policy(&self.inner, options)
    }

    fn get_polling_backoff_policy(
        &self,
        options: &RequestOptions,
    ) -> Arc<dyn PollingBackoffPolicy> {
        super::stub::Resources::<R>::get_polling_backoff_policy(&self.inner, options)
    }
}

impl<T> super::stub::NetworkActions for Network<T>
where
    T: super::stub::Network + std::fmt::Debug + Send + Sync,
{
    #[tracing::instrument(ret)]
    async fn start_application_gateway(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<()>> {
        self.inner.start_application_gateway(req, options).await
    }

    #[tracing::instrument(ret)]
    async fn stop_application_gateway(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<()>> {
        self.inner.stop_application_gateway(req, options).await
    }

    #[tracing::instrument(ret)]
    async fn reset_virtual_network_gateway(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<VirtualNetworkGateway>> {
        self.inner.reset_virtual_network_gateway(req, options).await
    }

    #[tracing::instrument(ret)]
    async fn list_gateway_connections(
        &self,
        req: ListResourcesRequest,
        options: RequestOptions,
    ) -> Result<Response<ListResult<VirtualNetworkGatewayConnection>>> {
        self.inner.list_gateway_connections(req, options).await
    }

    #[tracing::instrument(ret)]
    async fn get_topology(
        &self,
        req: ActionRequest<TopologyParameters>,
        options: RequestOptions,
    ) -> Result<Response<Topology>> {
        self.inner.get_topology(req, options).await
    }

    #[tracing::instrument(ret)]
    async fn verify_ip_flow(
        &self,
        req: ActionRequest<VerificationIpFlowParameters>,
        options: RequestOptions,
    ) -> Result<Response<VerificationIpFlowResult>> {
        self.inner.verify_ip_flow(req, options).await
    }

    #[tracing::instrument(ret)]
    async fn get_next_hop(
        &self,
        req: ActionRequest<NextHopParameters>,
        options: RequestOptions,
    ) -> Result<Response<NextHopResult>> {
        self.inner.get_next_hop(req, options).await
    }

    #[tracing::instrument(ret)]
    async fn get_flow_log_status(
        &self,
        req: ActionRequest<FlowLogStatusParameters>,
        options: RequestOptions,
    ) -> Result<Response<FlowLogInformation>> {
        self.inner.get_flow_log_status(req, options).await
    }

    #[tracing::instrument(ret)]
    async fn set_flow_log_configuration(
        &self,
        req: ActionRequest<FlowLogInformation>,
        options: RequestOptions,
    ) -> Result<Response<FlowLogInformation>> {
        self.inner.set_flow_log_configuration(req, options).await
    }

    #[tracing::instrument(ret)]
    async fn stop_packet_capture(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<()>> {
        self.inner.stop_packet_capture(req, options).await
    }

    #[tracing::instrument(ret)]
    async fn get_packet_capture_status(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<PacketCaptureQueryStatusResult>> {
        self.inner.get_packet_capture_status(req, options).await
    }
}
