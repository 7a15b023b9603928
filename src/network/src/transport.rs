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
use crate::resource_id::NETWORK_NAMESPACE;
use gax::client_builder::internal::ClientConfig;
use gax::http_client::{NoBody, ReqwestClient};
use gax::options::RequestOptions;
use gax::options::internal::set_default_idempotency;
use gax::path_parameter::{encode, required};
use gax::polling_policy::{PollingBackoffPolicy, PollingErrorPolicy};
use gax::response::Response;
use gax::retry_result::RetryResult;
use reqwest::Method;
use std::sync::Arc;
use std::time::Instant;

/// Implements [super::stub::Network] using REST over HTTP.
#[derive(Clone)]
pub struct Network {
    inner: ReqwestClient,
}

impl std::fmt::Debug for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        f.debug_struct("Network")
            .field("inner", &self.inner)
            .finish()
    }
}

impl Network {
    pub async fn new(config: ClientConfig) -> gax::client_builder::Result<Self> {
        let inner = ReqwestClient::new(config).await?;
        Ok(Self { inner })
    }

    fn resource_group_path(&self, resource_group_name: &str) -> Result<String> {
        let resource_group_name = required("resource_group_name", resource_group_name)?;
        Ok(format!(
            "/subscriptions/{}/resourceGroups/{}/providers/{NETWORK_NAMESPACE}",
            encode(self.inner.subscription()),
            encode(resource_group_name),
        ))
    }

    fn collection_path<R: ResourceModel>(
        &self,
        resource_group_name: &str,
        parent_name: &str,
    ) -> Result<String> {
        let mut path = self.resource_group_path(resource_group_name)?;
        if let Some(parent_collection) = R::PARENT_COLLECTION {
            let parent_name = required("parent_name", parent_name)?;
            path.push_str(&format!("/{parent_collection}/{}", encode(parent_name)));
        }
        path.push('/');
        path.push_str(R::COLLECTION);
        Ok(path)
    }

    fn resource_path<R: ResourceModel>(
        &self,
        resource_group_name: &str,
        parent_name: &str,
        name: &str,
    ) -> Result<String> {
        let collection = self.collection_path::<R>(resource_group_name, parent_name)?;
        let name = required("name", name)?;
        Ok(format!("{collection}/{}", encode(name)))
    }

    fn action_path<R: ResourceModel, P>(&self, req: &ActionRequest<P>, action: &str) -> Result<String> {
        let path = self.resource_path::<R>(&req.resource_group_name, &req.parent_name, &req.name)?;
        Ok(format!("{path}/{action}"))
    }

    // Top-level resources can be listed across the subscription.
    fn list_path<R: ResourceModel>(&self, req: &ListResourcesRequest) -> Result<String> {
        if req.resource_group_name.is_empty() && R::PARENT_COLLECTION.is_none() {
            return Ok(format!(
                "/subscriptions/{}/providers/{NETWORK_NAMESPACE}/{}",
                encode(self.inner.subscription()),
                R::COLLECTION
            ));
        }
        self.collection_path::<R>(&req.resource_group_name, &req.parent_name)
    }

    fn request(&self, method: Method, path: String) -> reqwest::RequestBuilder {
        self.inner.builder(method, path)
    }

    fn request_for_url(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.inner.builder_for_url(method, url)
    }

    fn options(options: RequestOptions, method: &Method) -> RequestOptions {
        let mut options = set_default_idempotency(options, method);
        if options.user_agent().is_none() {
            options.set_user_agent(crate::info::USER_AGENT.as_str());
        }
        options
    }

    async fn list_page<O>(
        &self,
        path: Result<String>,
        page_token: &str,
        options: RequestOptions,
    ) -> Result<Response<O>>
    where
        O: serde::de::DeserializeOwned + Default,
    {
        let options = Self::options(options, &Method::GET);
        let builder = if page_token.is_empty() {
            self.request(Method::GET, path?)
        } else {
            self.request_for_url(Method::GET, page_token)
        };
        self.inner.execute(builder, None::<NoBody>, options).await
    }

    /// Sends an action, following the `Location` header of accepted
    /// requests until the result is available.
    async fn action<I, O>(
        &self,
        path: String,
        body: Option<I>,
        options: RequestOptions,
    ) -> Result<Response<O>>
    where
        I: serde::Serialize,
        O: serde::de::DeserializeOwned + Default,
    {
        let options = Self::options(options, &Method::POST);
        let builder = self.request(Method::POST, path);
        let response = self
            .inner
            .execute::<I, Option<O>>(builder, body, options.clone())
            .await?;
        self.follow_location(response, options).await
    }

    /// Sends an action without a result.
    async fn unit_action<I: serde::Serialize>(
        &self,
        path: String,
        body: Option<I>,
        options: RequestOptions,
    ) -> Result<Response<()>> {
        let response = self
            .action::<I, Option<serde_json::Value>>(path, body, options)
            .await?;
        let (parts, _) = response.into_parts();
        Ok(Response::from_parts(parts, ()))
    }

    async fn follow_location<O>(
        &self,
        response: Response<Option<O>>,
        options: RequestOptions,
    ) -> Result<Response<O>>
    where
        O: serde::de::DeserializeOwned + Default,
    {
        let error_policy = self.inner.get_polling_error_policy(&options);
        let backoff_policy = self.inner.get_polling_backoff_policy(&options);
        // Polls are GET requests.
        let mut options = options;
        options.set_idempotency(true);
        let loop_start = Instant::now();
        let mut attempt_count = 0;
        let (mut parts, mut body) = response.into_parts();
        while body.is_none() {
            let Some(location) = parts.location().map(str::to_string) else {
                break;
            };
            attempt_count += 1;
            if let Some(e) = error_policy.on_in_progress(loop_start, attempt_count, &location) {
                return Err(e);
            }
            let wait = backoff_policy.wait_period(loop_start, attempt_count);
            let wait = parts.retry_after().map_or(wait, |hint| wait.max(hint));
            tokio::time::sleep(wait).await;
            tracing::debug!(%location, attempt_count, "polling action result");
            let builder = self.request_for_url(Method::GET, &location);
            match self
                .inner
                .execute::<NoBody, Option<O>>(builder, None, options.clone())
                .await
            {
                Ok(r) => (parts, body) = r.into_parts(),
                Err(e) => match error_policy.on_error(loop_start, attempt_count, e) {
                    RetryResult::Continue(_) => {}
                    RetryResult::Exhausted(e) | RetryResult::Permanent(e) => return Err(e),
                },
            }
        }
        Ok(Response::from_parts(parts, body.unwrap_or_default()))
    }
}

impl<R: ResourceModel> super::stub::Resources<R> for Network {
    async fn get(&self, req: GetResourceRequest, options: RequestOptions) -> Result<Response<R>> {
        let options = Self::options(options, &Method::GET);
        let path = self.resource_path::<R>(&req.resource_group_name, &req.parent_name, &req.name)?;
        let builder = self.request(Method::GET, path);
        let builder = req
            .expand
            .iter()
            .fold(builder, |b, e| b.query(&[("$expand", e)]));
        self.inner.execute(builder, None::<NoBody>, options).await
    }

    async fn create_or_update(
        &self,
        req: CreateOrUpdateResourceRequest<R>,
        options: RequestOptions,
    ) -> Result<Response<R>> {
        let options = Self::options(options, &Method::PUT);
        let path = self.resource_path::<R>(&req.resource_group_name, &req.parent_name, &req.name)?;
        let builder = self.request(Method::PUT, path);
        self.inner
            .execute(builder, Some(req.resource), options)
            .await
    }

    async fn delete(
        &self,
        req: DeleteResourceRequest,
        options: RequestOptions,
    ) -> Result<Response<()>> {
        let options = Self::options(options, &Method::DELETE);
        let path = self.resource_path::<R>(&req.resource_group_name, &req.parent_name, &req.name)?;
        let builder = self.request(Method::DELETE, path);
        let response = self
            .inner
            .execute::<NoBody, Option<serde_json::Value>>(builder, None, options)
            .await?;
        let (parts, _) = response.into_parts();
        Ok(Response::from_parts(parts, ()))
    }

    async fn list(
        &self,
        req: ListResourcesRequest,
        options: RequestOptions,
    ) -> Result<Response<ListResult<R>>> {
        let path = self.list_path::<R>(&req);
        self.list_page(path, &req.page_token, options).await
    }

    fn get_polling_error_policy(&self, options: &RequestOptions) -> Arc<dyn PollingErrorPolicy> {
        self.inner.get_polling_error_policy(options)
    }

    fn get_polling_backoff_policy(
        &self,
        options: &RequestOptions,
    ) -> Arc<dyn PollingBackoffPolicy> {
        self.inner.get_polling_backoff_policy(options)
    }
}

impl super::stub::NetworkActions for Network {
    async fn start_application_gateway(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<()>> {
        let path = self.action_path::<ApplicationGateway, _>(&req, "start")?;
        self.unit_action(path, None::<NoBody>, options).await
    }

    async fn stop_application_gateway(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<()>> {
        let path = self.action_path::<ApplicationGateway, _>(&req, "stop")?;
        self.unit_action(path, None::<NoBody>, options).await
    }

    async fn reset_virtual_network_gateway(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<VirtualNetworkGateway>> {
        let path = self.action_path::<VirtualNetworkGateway, _>(&req, "reset")?;
        self.action(path, None::<NoBody>, options).await
    }

    async fn list_gateway_connections(
        &self,
        req: ListResourcesRequest,
        options: RequestOptions,
    ) -> Result<Response<ListResult<VirtualNetworkGatewayConnection>>> {
        let path = required("parent_name", &req.parent_name).and_then(|gateway| {
            let path = self.resource_path::<VirtualNetworkGateway>(
                &req.resource_group_name,
                "",
                gateway,
            )?;
            Ok(format!("{path}/connections"))
        });
        self.list_page(path, &req.page_token, options).await
    }

    async fn get_topology(
        &self,
        req: ActionRequest<TopologyParameters>,
        options: RequestOptions,
    ) -> Result<Response<Topology>> {
        let path = self.action_path::<NetworkWatcher, _>(&req, "topology")?;
        self.action(path, Some(req.parameters), options).await
    }

    async fn verify_ip_flow(
        &self,
        req: ActionRequest<VerificationIpFlowParameters>,
        options: RequestOptions,
    ) -> Result<Response<VerificationIpFlowResult>> {
        let path = self.action_path::<NetworkWatcher, _>(&req, "ipFlowVerify")?;
        self.action(path, Some(req.parameters), options).await
    }

    async fn get_next_hop(
        &self,
        req: ActionRequest<NextHopParameters>,
        options: RequestOptions,
    ) -> Result<Response<NextHopResult>> {
        let path = self.action_path::<NetworkWatcher, _>(&req, "nextHop")?;
        self.action(path, Some(req.parameters), options).await
    }

    async fn get_flow_log_status(
        &self,
        req: ActionRequest<FlowLogStatusParameters>,
        options: RequestOptions,
    ) -> Result<Response<FlowLogInformation>> {
        let path = self.action_path::<NetworkWatcher, _>(&req, "queryFlowLogStatus")?;
        self.action(path, Some(req.parameters), options).await
    }

    async fn set_flow_log_configuration(
        &self,
        req: ActionRequest<FlowLogInformation>,
        options: RequestOptions,
    ) -> Result<Response<FlowLogInformation>> {
        let path = self.action_path::<NetworkWatcher, _>(&req, "configureFlowLog")?;
        self.action(path, Some(req.parameters), options).await
    }

    async fn stop_packet_capture(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<()>> {
        let path = self.action_path::<PacketCapture, _>(&req, "stop")?;
        self.unit_action(path, None::<NoBody>, options).await
    }

    async fn get_packet_capture_status(
        &self,
        req: ActionRequest<()>,
        options: RequestOptions,
    ) -> Result<Response<PacketCaptureQueryStatusResult>> {
        let path = self.action_path::<PacketCapture, _>(&req, "queryStatus")?;
        self.action(path, None::<NoBody>, options).await
    }
}
