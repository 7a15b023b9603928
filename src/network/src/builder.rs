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

//! Request builders.
//!
//! Each operation in [crate::client] returns one of these builders. The
//! builders set the request fields, the request options, and send the
//! request.

use crate::Result;
use crate::model::*;
use crate::stub::dynamic;
use gax::options::RequestOptions;
use gax::paginator::{ItemPaginator, Paginator};
use gax::response::Response;
use std::sync::Arc;

/// A builder for [Network][crate::client::Network].
///
/// ```
/// # tokio_test::block_on(async {
/// # use cloud_network::*;
/// # use builder::ClientBuilder;
/// # use client::Network;
/// let builder: ClientBuilder = Network::builder();
/// let client = builder
///     .with_endpoint("https://management.example.com")
///     .with_subscription("my-subscription")
///     .with_credentials(gax::credentials::AnonymousCredentials)
///     .build()
///     .await?;
/// # gax::client_builder::Result::<()>::Ok(()) });
/// ```
pub type ClientBuilder = gax::client_builder::ClientBuilder<client::Factory>;

pub(crate) mod client {
    use super::super::client::Network;
    pub struct Factory;
    impl gax::client_builder::internal::ClientFactory for Factory {
        type Client = Network;
        async fn build(
            self,
            config: gax::client_builder::internal::ClientConfig,
        ) -> gax::client_builder::Result<Self::Client> {
            Self::Client::new(config).await
        }
    }
}

/// A builder for [NetworkManager][crate::NetworkManager].
///
/// Accepts the same configuration as [ClientBuilder].
pub type ManagerBuilder = gax::client_builder::ClientBuilder<manager::Factory>;

pub(crate) mod manager {
    use crate::client::Network;
    use crate::fluent::NetworkManager;
    pub struct Factory;
    impl gax::client_builder::internal::ClientFactory for Factory {
        type Client = NetworkManager;
        async fn build(
            self,
            config: gax::client_builder::internal::ClientConfig,
        ) -> gax::client_builder::Result<Self::Client> {
            Network::new(config).await.map(NetworkManager::new)
        }
    }
}

/// Common implementation for the request builders.
#[derive(Debug)]
pub(crate) struct RequestBuilder<S: ?Sized, Req> {
    stub: Arc<S>,
    request: Req,
    options: RequestOptions,
}

impl<S: ?Sized, Req: Clone> Clone for RequestBuilder<S, Req> {
    fn clone(&self) -> Self {
        Self {
            stub: self.stub.clone(),
            request: self.request.clone(),
            options: self.options.clone(),
        }
    }
}

impl<S: ?Sized, Req: Default> RequestBuilder<S, Req> {
    pub(crate) fn new(stub: Arc<S>) -> Self {
        Self {
            stub,
            request: Req::default(),
            options: RequestOptions::default(),
        }
    }
}

// The name used in polling errors, e.g. `virtualNetworks/vnet1/subnets/subnet1`.
fn operation_name<R: ResourceModel>(parent_name: &str, name: &str) -> String {
    match R::PARENT_COLLECTION {
        Some(parent) => format!("{parent}/{parent_name}/{}/{name}", R::COLLECTION),
        None => format!("{}/{name}", R::COLLECTION),
    }
}

/// The request builder for [Resources::get][crate::client::Resources::get] calls.
///
/// # Example
/// ```no_run
/// # use cloud_network::builder::Get;
/// # use cloud_network::model::VirtualNetwork;
/// # tokio_test::block_on(async {
/// # let client = cloud_network::client::Network::builder().build().await?;
/// let builder: Get<VirtualNetwork> = client.virtual_networks().get();
/// let network = builder
///     .set_resource_group_name("rg1")
///     .set_name("vnet1")
///     .send()
///     .await?;
/// # anyhow::Ok(()) });
/// ```
#[derive(Clone, Debug)]
pub struct Get<R: ResourceModel>(RequestBuilder<dyn dynamic::Resources<R>, GetResourceRequest>);

impl<R: ResourceModel> Get<R> {
    pub(crate) fn new(stub: Arc<dyn dynamic::Resources<R>>) -> Self {
        Self(RequestBuilder::new(stub))
    }

    /// Sets the full request, replacing any prior values.
    pub fn with_request<V: Into<GetResourceRequest>>(mut self, v: V) -> Self {
        self.0.request = v.into();
        self
    }

    /// Sets all the options, replacing any prior values.
    pub fn with_request_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
        self.0.options = v.into();
        self
    }

    /// Sends the request.
    pub async fn send(self) -> Result<R> {
        (*self.0.stub)
            .get(self.0.request, self.0.options)
            .await
            .map(Response::into_body)
    }

    /// Sets the value of [resource_group_name][GetResourceRequest::resource_group_name].
    pub fn set_resource_group_name<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.resource_group_name = v.into();
        self
    }

    /// Sets the value of [parent_name][GetResourceRequest::parent_name].
    pub fn set_parent_name<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.parent_name = v.into();
        self
    }

    /// Sets the value of [name][GetResourceRequest::name].
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.name = v.into();
        self
    }

    /// Sets the value of [expand][GetResourceRequest::expand].
    pub fn set_expand<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.expand = Some(v.into());
        self
    }
}

#[doc(hidden)]
impl<R: ResourceModel> gax::options::internal::RequestBuilder for Get<R> {
    fn request_options(&mut self) -> &mut RequestOptions {
        &mut self.0.options
    }
}

/// The request builder for
/// [Resources::create_or_update][crate::client::Resources::create_or_update] calls.
///
/// # Long running operations
///
/// [send()][CreateOrUpdate::send] returns the resource as accepted by the
/// service, often with a `provisioningState` of `Updating`. Use
/// [poller()][CreateOrUpdate::poller] to wait until the provisioning state is
/// terminal.
#[derive(Clone, Debug)]
pub struct CreateOrUpdate<R: ResourceModel>(
    RequestBuilder<dyn dynamic::Resources<R>, CreateOrUpdateResourceRequest<R>>,
);

impl<R: ResourceModel> CreateOrUpdate<R> {
    pub(crate) fn new(stub: Arc<dyn dynamic::Resources<R>>) -> Self {
        Self(RequestBuilder::new(stub))
    }

    /// Sets the full request, replacing any prior values.
    pub fn with_request<V: Into<CreateOrUpdateResourceRequest<R>>>(mut self, v: V) -> Self {
        self.0.request = v.into();
        self
    }

    /// Sets all the options, replacing any prior values.
    pub fn with_request_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
        self.0.options = v.into();
        self
    }

    /// Sends the request.
    ///
    /// # Long running operations
    ///
    /// Consider using [poller()][CreateOrUpdate::poller] to wait until the
    /// resource is provisioned.
    pub async fn send(self) -> Result<R> {
        (*self.0.stub)
            .create_or_update(self.0.request, self.0.options)
            .await
            .map(Response::into_body)
    }

    /// Creates a [Poller][gax::lro::Poller] to work with `create_or_update`.
    pub fn poller(self) -> impl gax::lro::Poller<R> {
        let stub = self.0.stub.clone();
        let options = self.0.options.clone();
        let name = operation_name::<R>(&self.0.request.parent_name, &self.0.request.name);
        let get = GetResourceRequest::new()
            .set_resource_group_name(&self.0.request.resource_group_name)
            .set_parent_name(&self.0.request.parent_name)
            .set_name(&self.0.request.name);
        let error_policy = stub.get_polling_error_policy(&options);
        let backoff_policy = stub.get_polling_backoff_policy(&options);

        let query = move || {
            let stub = stub.clone();
            let get = get.clone();
            let options = options.clone();
            async move { stub.get(get, options).await.map(Response::into_body) }
        };

        let start = move || self.send();
        gax::lro::new_provisioning_poller(name, error_policy, backoff_policy, start, query)
    }

    /// Sets the value of [resource_group_name][CreateOrUpdateResourceRequest::resource_group_name].
    pub fn set_resource_group_name<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.resource_group_name = v.into();
        self
    }

    /// Sets the value of [parent_name][CreateOrUpdateResourceRequest::parent_name].
    pub fn set_parent_name<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.parent_name = v.into();
        self
    }

    /// Sets the value of [name][CreateOrUpdateResourceRequest::name].
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.name = v.into();
        self
    }

    /// Sets the value of [resource][CreateOrUpdateResourceRequest::resource].
    pub fn set_resource<T: Into<R>>(mut self, v: T) -> Self {
        self.0.request.resource = v.into();
        self
    }
}

#[doc(hidden)]
impl<R: ResourceModel> gax::options::internal::RequestBuilder for CreateOrUpdate<R> {
    fn request_options(&mut self) -> &mut RequestOptions {
        &mut self.0.options
    }
}

/// The request builder for [Resources::delete][crate::client::Resources::delete] calls.
#[derive(Clone, Debug)]
pub struct Delete<R: ResourceModel>(RequestBuilder<dyn dynamic::Resources<R>, DeleteResourceRequest>);

impl<R: ResourceModel> Delete<R> {
    pub(crate) fn new(stub: Arc<dyn dynamic::Resources<R>>) -> Self {
        Self(RequestBuilder::new(stub))
    }

    /// Sets the full request, replacing any prior values.
    pub fn with_request<V: Into<DeleteResourceRequest>>(mut self, v: V) -> Self {
        self.0.request = v.into();
        self
    }

    /// Sets all the options, replacing any prior values.
    pub fn with_request_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
        self.0.options = v.into();
        self
    }

    /// Sends the request.
    ///
    /// The service may return before the resource is deleted. Use
    /// [poller()][Delete::poller] to wait until the resource is gone.
    pub async fn send(self) -> Result<()> {
        (*self.0.stub)
            .delete(self.0.request, self.0.options)
            .await
            .map(Response::into_body)
    }

    /// Creates a [Poller][gax::lro::Poller] to work with `delete`.
    ///
    /// Deleting a resource that does not exist completes successfully.
    pub fn poller(self) -> impl gax::lro::Poller<()> {
        let stub = self.0.stub.clone();
        let options = self.0.options.clone();
        let name = operation_name::<R>(&self.0.request.parent_name, &self.0.request.name);
        let get = GetResourceRequest::new()
            .set_resource_group_name(&self.0.request.resource_group_name)
            .set_parent_name(&self.0.request.parent_name)
            .set_name(&self.0.request.name);
        let error_policy = stub.get_polling_error_policy(&options);
        let backoff_policy = stub.get_polling_backoff_policy(&options);

        let query = move || {
            let stub = stub.clone();
            let get = get.clone();
            let options = options.clone();
            async move { stub.get(get, options).await.map(Response::into_body) }
        };

        let start = move || self.send();
        gax::lro::new_deletion_poller(name, error_policy, backoff_policy, start, query)
    }

    /// Sets the value of [resource_group_name][DeleteResourceRequest::resource_group_name].
    pub fn set_resource_group_name<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.resource_group_name = v.into();
        self
    }

    /// Sets the value of [parent_name][DeleteResourceRequest::parent_name].
    pub fn set_parent_name<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.parent_name = v.into();
        self
    }

    /// Sets the value of [name][DeleteResourceRequest::name].
    pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.name = v.into();
        self
    }
}

#[doc(hidden)]
impl<R: ResourceModel> gax::options::internal::RequestBuilder for Delete<R> {
    fn request_options(&mut self) -> &mut RequestOptions {
        &mut self.0.options
    }
}

/// The request builder for [Resources::list][crate::client::Resources::list] calls.
///
/// # Example
/// ```no_run
/// # use cloud_network::model::PublicIpAddress;
/// # tokio_test::block_on(async {
/// # let client = cloud_network::client::Network::builder().build().await?;
/// let mut items = client
///     .public_ip_addresses()
///     .list()
///     .set_resource_group_name("rg1")
///     .by_item();
/// while let Some(address) = items.next().await {
///     let address: PublicIpAddress = address?;
///     println!("{}", address.name);
/// }
/// # anyhow::Ok(()) });
/// ```
#[derive(Clone, Debug)]
pub struct List<R: ResourceModel>(RequestBuilder<dyn dynamic::Resources<R>, ListResourcesRequest>);

impl<R: ResourceModel> List<R> {
    pub(crate) fn new(stub: Arc<dyn dynamic::Resources<R>>) -> Self {
        Self(RequestBuilder::new(stub))
    }

    /// Sets the full request, replacing any prior values.
    pub fn with_request<V: Into<ListResourcesRequest>>(mut self, v: V) -> Self {
        self.0.request = v.into();
        self
    }

    /// Sets all the options, replacing any prior values.
    pub fn with_request_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
        self.0.options = v.into();
        self
    }

    /// Sends the request, returning a single page.
    pub async fn send(self) -> Result<ListResult<R>> {
        (*self.0.stub)
            .list(self.0.request, self.0.options)
            .await
            .map(Response::into_body)
    }

    /// Streams each page in the collection.
    pub fn by_page(self) -> Paginator<ListResult<R>> {
        let token = self.0.request.page_token.clone();
        let execute = move |token: String| {
            let mut builder = self.clone();
            builder.0.request = builder.0.request.set_page_token(token);
            builder.send()
        };
        Paginator::new(token, execute)
    }

    /// Streams each item in the collection.
    pub fn by_item(self) -> ItemPaginator<ListResult<R>> {
        self.by_page().items()
    }

    /// Sets the value of [resource_group_name][ListResourcesRequest::resource_group_name].
    ///
    /// Leave it empty to list the resources in the subscription.
    pub fn set_resource_group_name<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.resource_group_name = v.into();
        self
    }

    /// Sets the value of [parent_name][ListResourcesRequest::parent_name].
    pub fn set_parent_name<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.parent_name = v.into();
        self
    }

    /// Sets the value of [page_token][ListResourcesRequest::page_token].
    pub fn set_page_token<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.page_token = v.into();
        self
    }
}

#[doc(hidden)]
impl<R: ResourceModel> gax::options::internal::RequestBuilder for List<R> {
    fn request_options(&mut self) -> &mut RequestOptions {
        &mut self.0.options
    }
}

/// The request builder for
/// [Actions::list_gateway_connections][crate::client::Actions::list_gateway_connections] calls.
#[derive(Clone, Debug)]
pub struct ListGatewayConnections(RequestBuilder<dyn dynamic::NetworkActions, ListResourcesRequest>);

impl ListGatewayConnections {
    pub(crate) fn new(stub: Arc<dyn dynamic::NetworkActions>) -> Self {
        Self(RequestBuilder::new(stub))
    }

    /// Sets all the options, replacing any prior values.
    pub fn with_request_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
        self.0.options = v.into();
        self
    }

    /// Sends the request, returning a single page.
    pub async fn send(self) -> Result<ListResult<VirtualNetworkGatewayConnection>> {
        (*self.0.stub)
            .list_gateway_connections(self.0.request, self.0.options)
            .await
            .map(Response::into_body)
    }

    /// Streams each page in the collection.
    pub fn by_page(self) -> Paginator<ListResult<VirtualNetworkGatewayConnection>> {
        let token = self.0.request.page_token.clone();
        let execute = move |token: String| {
            let mut builder = self.clone();
            builder.0.request = builder.0.request.set_page_token(token);
            builder.send()
        };
        Paginator::new(token, execute)
    }

    /// Streams each item in the collection.
    pub fn by_item(self) -> ItemPaginator<ListResult<VirtualNetworkGatewayConnection>> {
        self.by_page().items()
    }

    pub fn set_resource_group_name<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.resource_group_name = v.into();
        self
    }

    /// Sets the name of the virtual network gateway.
    pub fn set_gateway_name<T: Into<String>>(mut self, v: T) -> Self {
        self.0.request.parent_name = v.into();
        self
    }
}

#[doc(hidden)]
impl gax::options::internal::RequestBuilder for ListGatewayConnections {
    fn request_options(&mut self) -> &mut RequestOptions {
        &mut self.0.options
    }
}

/// Defines the request builder for an action.
macro_rules! action_builder {
    ($(#[$meta:meta])* $name:ident, $method:ident, $parameters:ty, $output:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name(RequestBuilder<dyn dynamic::NetworkActions, ActionRequest<$parameters>>);

        impl $name {
            pub(crate) fn new(stub: Arc<dyn dynamic::NetworkActions>) -> Self {
                Self(RequestBuilder::new(stub))
            }

            /// Sets the full request, replacing any prior values.
            pub fn with_request<V: Into<ActionRequest<$parameters>>>(mut self, v: V) -> Self {
                self.0.request = v.into();
                self
            }

            /// Sets all the options, replacing any prior values.
            pub fn with_request_options<V: Into<RequestOptions>>(mut self, v: V) -> Self {
                self.0.options = v.into();
                self
            }

            /// Sends the request.
            ///
            /// Actions accepted by the service for background processing are
            /// polled until their result is available.
            pub async fn send(self) -> Result<$output> {
                (*self.0.stub)
                    .$method(self.0.request, self.0.options)
                    .await
                    .map(Response::into_body)
            }

            /// Sets the value of [resource_group_name][ActionRequest::resource_group_name].
            pub fn set_resource_group_name<T: Into<String>>(mut self, v: T) -> Self {
                self.0.request.resource_group_name = v.into();
                self
            }

            /// Sets the value of [parent_name][ActionRequest::parent_name].
            pub fn set_parent_name<T: Into<String>>(mut self, v: T) -> Self {
                self.0.request.parent_name = v.into();
                self
            }

            /// Sets the value of [name][ActionRequest::name].
            pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
                self.0.request.name = v.into();
                self
            }

            /// Sets the value of [parameters][ActionRequest::parameters].
            pub fn set_parameters<T: Into<$parameters>>(mut self, v: T) -> Self {
                self.0.request.parameters = v.into();
                self
            }
        }

        #[doc(hidden)]
        impl gax::options::internal::RequestBuilder for $name {
            fn request_options(&mut self) -> &mut RequestOptions {
                &mut self.0.options
            }
        }
    };
}

action_builder!(
    /// The request builder for
    /// [Actions::start_application_gateway][crate::client::Actions::start_application_gateway] calls.
    StartApplicationGateway,
    start_application_gateway,
    (),
    ()
);
action_builder!(
    /// The request builder for
    /// [Actions::stop_application_gateway][crate::client::Actions::stop_application_gateway] calls.
    StopApplicationGateway,
    stop_application_gateway,
    (),
    ()
);
action_builder!(
    /// The request builder for
    /// [Actions::reset_virtual_network_gateway][crate::client::Actions::reset_virtual_network_gateway] calls.
    ResetVirtualNetworkGateway,
    reset_virtual_network_gateway,
    (),
    VirtualNetworkGateway
);
action_builder!(
    /// The request builder for [Actions::get_topology][crate::client::Actions::get_topology] calls.
    GetTopology,
    get_topology,
    TopologyParameters,
    Topology
);
action_builder!(
    /// The request builder for [Actions::verify_ip_flow][crate::client::Actions::verify_ip_flow] calls.
    VerifyIpFlow,
    verify_ip_flow,
    VerificationIpFlowParameters,
    VerificationIpFlowResult
);
action_builder!(
    /// The request builder for [Actions::get_next_hop][crate::client::Actions::get_next_hop] calls.
    GetNextHop,
    get_next_hop,
    NextHopParameters,
    NextHopResult
);
action_builder!(
    /// The request builder for
    /// [Actions::get_flow_log_status][crate::client::Actions::get_flow_log_status] calls.
    GetFlowLogStatus,
    get_flow_log_status,
    FlowLogStatusParameters,
    FlowLogInformation
);
action_builder!(
    /// The request builder for
    /// [Actions::set_flow_log_configuration][crate::client::Actions::set_flow_log_configuration] calls.
    SetFlowLogConfiguration,
    set_flow_log_configuration,
    FlowLogInformation,
    FlowLogInformation
);
action_builder!(
    /// The request builder for
    /// [Actions::stop_packet_capture][crate::client::Actions::stop_packet_capture] calls.
    StopPacketCapture,
    stop_packet_capture,
    (),
    ()
);
action_builder!(
    /// The request builder for
    /// [Actions::get_packet_capture_status][crate::client::Actions::get_packet_capture_status] calls.
    GetPacketCaptureStatus,
    get_packet_capture_status,
    (),
    PacketCaptureQueryStatusResult
);

#[cfg(test)]
mod tests {
    use super::*;
    use gax::error::CloudError;
    use gax::lro::Poller;
    use gax::options::RequestOptionsBuilder;

    mockall::mock! {
        #[derive(Debug)]
        Networks {}
        impl crate::stub::Resources<VirtualNetwork> for Networks {
            async fn get(&self, req: GetResourceRequest, options: RequestOptions) -> Result<Response<VirtualNetwork>>;
            async fn create_or_update(&self, req: CreateOrUpdateResourceRequest<VirtualNetwork>, options: RequestOptions) -> Result<Response<VirtualNetwork>>;
            async fn delete(&self, req: DeleteResourceRequest, options: RequestOptions) -> Result<Response<()>>;
            async fn list(&self, req: ListResourcesRequest, options: RequestOptions) -> Result<Response<ListResult<VirtualNetwork>>>;
        }
    }

    mockall::mock! {
        #[derive(Debug)]
        Subnets {}
        impl crate::stub::Resources<Subnet> for Subnets {
            async fn get(&self, req: GetResourceRequest, options: RequestOptions) -> Result<Response<Subnet>>;
            async fn delete(&self, req: DeleteResourceRequest, options: RequestOptions) -> Result<Response<()>>;
        }
    }

    mockall::mock! {
        #[derive(Debug)]
        Actions {}
        impl crate::stub::NetworkActions for Actions {
            async fn verify_ip_flow(&self, req: ActionRequest<VerificationIpFlowParameters>, options: RequestOptions) -> Result<Response<VerificationIpFlowResult>>;
            async fn list_gateway_connections(&self, req: ListResourcesRequest, options: RequestOptions) -> Result<Response<ListResult<VirtualNetworkGatewayConnection>>>;
        }
    }

    fn network(state: ProvisioningState) -> VirtualNetwork {
        VirtualNetwork::new()
            .set_name("vnet1")
            .set_properties(VirtualNetworkProperties::new().set_provisioning_state(state))
    }

    fn not_found() -> gax::error::Error {
        gax::error::Error::service_with_http_metadata(
            CloudError::new().set_code(CloudError::RESOURCE_NOT_FOUND),
            Some(404),
            None,
        )
    }

    #[tokio::test]
    async fn get() -> anyhow::Result<()> {
        let mut mock = MockNetworks::new();
        mock.expect_get()
            .withf(|req, options| {
                req.resource_group_name == "rg1"
                    && req.name == "vnet1"
                    && options.user_agent() == Some("test-agent")
            })
            .return_once(|_, _| Ok(Response::from(network(ProvisioningState::SUCCEEDED))));
        let client = crate::client::Resources::from_stub(mock);
        let got = client
            .get()
            .set_resource_group_name("rg1")
            .set_name("vnet1")
            .with_user_agent("test-agent")
            .send()
            .await?;
        assert_eq!(got.name, "vnet1");
        Ok(())
    }

    #[tokio::test]
    async fn clone_shares_stub() -> anyhow::Result<()> {
        let mut mock = MockNetworks::new();
        mock.expect_get()
            .times(2)
            .withf(|req, _| req.resource_group_name == "rg1" && req.name == "vnet1")
            .returning(|_, _| Ok(Response::from(network(ProvisioningState::SUCCEEDED))));
        let client = crate::client::Resources::from_stub(mock);
        let builder = client.get().set_resource_group_name("rg1").set_name("vnet1");
        let first = builder.clone().send().await?;
        let second = builder.send().await?;
        assert_eq!(first, second);

        let mut mock = MockActions::new();
        mock.expect_list_gateway_connections()
            .times(2)
            .returning(|_, _| Ok(Response::from(ListResult::default())));
        let actions = crate::client::Actions::from_stub(mock);
        let builder = actions.list_gateway_connections().set_resource_group_name("rg1");
        let _ = builder.clone().send().await?;
        let _ = builder.send().await?;
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn create_or_update_poller()-> anyhow::Result<()> {
        let mut seq = mockall::Sequence::new();
        let mut mock = MockNetworks::new();
        mock.expect_create_or_update()
            .once()
            .in_sequence(&mut seq)
            .withf(|req, _| req.name == "vnet1" && req.resource.location == "westus")
            .return_once(|_, _| Ok(Response::from(network(ProvisioningState::UPDATING))));
        mock.expect_get()
            .once()
            .in_sequence(&mut seq)
            .return_once(|_, _| Ok(Response::from(network(ProvisioningState::UPDATING))));
        mock.expect_get()
            .once()
            .in_sequence(&mut seq)
            .withf(|req, _| req.resource_group_name == "rg1" && req.name == "vnet1")
            .return_once(|_, _| Ok(Response::from(network(ProvisioningState::SUCCEEDED))));

        let client = crate::client::Resources::from_stub(mock);
        let got = client
            .create_or_update()
            .set_resource_group_name("rg1")
            .set_name("vnet1")
            .set_resource(VirtualNetwork::new().set_location("westus"))
            .poller()
            .until_done()
            .await?;
        assert_eq!(
            got.properties.provisioning_state,
            Some(ProvisioningState::SUCCEEDED)
        );
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn create_or_update_failed() -> anyhow::Result<()> {
        let mut mock = MockNetworks::new();
        mock.expect_create_or_update()
            .return_once(|_, _| Ok(Response::from(network(ProvisioningState::FAILED))));
        let client = crate::client::Resources::from_stub(mock);
        let err = client
            .create_or_update()
            .set_resource_group_name("rg1")
            .set_name("vnet1")
            .poller()
            .until_done()
            .await
            .unwrap_err();
        let status = err.status().cloned().unwrap_or_default();
        assert_eq!(status.code, gax::lro::PROVISIONING_FAILED);
        assert!(status.message.contains("virtualNetworks/vnet1"), "{status:?}");
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn delete_poller() -> anyhow::Result<()> {
        let mut seq = mockall::Sequence::new();
        let mut mock = MockSubnets::new();
        mock.expect_delete()
            .once()
            .in_sequence(&mut seq)
            .withf(|req, _| req.parent_name == "vnet1" && req.name == "subnet1")
            .return_once(|_, _| Ok(Response::from(())));
        mock.expect_get()
            .once()
            .in_sequence(&mut seq)
            .return_once(|_, _| Ok(Response::from(Subnet::new().set_name("subnet1"))));
        mock.expect_get()
            .once()
            .in_sequence(&mut seq)
            .return_once(|_, _| Err(not_found()));

        let client = crate::client::Resources::from_stub(mock);
        client
            .delete()
            .set_resource_group_name("rg1")
            .set_parent_name("vnet1")
            .set_name("subnet1")
            .poller()
            .until_done()
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn list_by_item() -> anyhow::Result<()> {
        let mut seq = mockall::Sequence::new();
        let mut mock = MockNetworks::new();
        mock.expect_list()
            .once()
            .in_sequence(&mut seq)
            .withf(|req, _| req.resource_group_name == "rg1" && req.page_token.is_empty())
            .return_once(|_, _| {
                Ok(Response::from(
                    ListResult::new()
                        .set_value([network(ProvisioningState::SUCCEEDED).set_name("vnet1")])
                        .set_next_link("https://next"),
                ))
            });
        mock.expect_list()
            .once()
            .in_sequence(&mut seq)
            .withf(|req, _| req.page_token == "https://next")
            .return_once(|_, _| {
                Ok(Response::from(ListResult::new().set_value([
                    VirtualNetwork::new().set_name("vnet2"),
                    VirtualNetwork::new().set_name("vnet3"),
                ])))
            });

        let client = crate::client::Resources::from_stub(mock);
        let mut items = client.list().set_resource_group_name("rg1").by_item();
        let mut names = Vec::new();
        while let Some(item) = items.next().await {
            names.push(item?.name);
        }
        assert_eq!(names, vec!["vnet1", "vnet2", "vnet3"]);
        Ok(())
    }

    #[tokio::test]
    async fn action() -> anyhow::Result<()> {
        let mut mock = MockActions::new();
        mock.expect_verify_ip_flow()
            .withf(|req, _| {
                req.name == "watcher1" && req.parameters.direction == Some(Direction::INBOUND)
            })
            .return_once(|_, _| {
                Ok(Response::from(VerificationIpFlowResult {
                    access: Some(Access::DENY),
                    rule_name: "DenyAllInBound".to_string(),
                }))
            });
        let client = crate::client::Actions::from_stub(mock);
        let got = client
            .verify_ip_flow()
            .set_resource_group_name("rg1")
            .set_name("watcher1")
            .set_parameters(VerificationIpFlowParameters::new().set_direction(Direction::INBOUND))
            .send()
            .await?;
        assert_eq!(got.access, Some(Access::DENY));
        assert_eq!(got.rule_name, "DenyAllInBound");
        Ok(())
    }

    #[tokio::test]
    async fn list_gateway_connections() -> anyhow::Result<()> {
        let mut mock = MockActions::new();
        mock.expect_list_gateway_connections()
            .withf(|req, _| req.resource_group_name == "rg1" && req.parent_name == "gw1")
            .return_once(|_, _| {
                Ok(Response::from(ListResult::new().set_value([
                    VirtualNetworkGatewayConnection::new().set_name("conn1"),
                ])))
            });
        let client = crate::client::Actions::from_stub(mock);
        let page = client
            .list_gateway_connections()
            .set_resource_group_name("rg1")
            .set_gateway_name("gw1")
            .send()
            .await?;
        assert_eq!(page.value.len(), 1);
        Ok(())
    }
}
