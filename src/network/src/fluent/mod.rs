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

//! Fluent interfaces to define, update, and inspect networking resources.
//!
//! The [NetworkManager] exposes one collection per resource type. Each
//! collection can define new resources, and get, list or delete existing
//! ones. Definitions are assembled with `with_*()` setters, and child
//! resources with `define_*()` ... `attach()` chains:
//!
//! ```no_run
//! # use cloud_network::NetworkManager;
//! # use cloud_network::region::Region;
//! # tokio_test::block_on(async {
//! let manager = NetworkManager::builder().build().await?;
//! let network = manager
//!     .networks()
//!     .define("vnet1")
//!     .with_region(Region::US_WEST)
//!     .with_existing_resource_group("rg1")
//!     .with_address_space("10.0.0.0/28")
//!     .define_subnet("front")
//!     .with_address_prefix("10.0.0.0/29")
//!     .attach()
//!     .with_subnet("back", "10.0.0.8/29")
//!     .create()
//!     .await?;
//! println!("{:?}", network.subnets());
//! # anyhow::Ok(()) });
//! ```
//!
//! Before sending a definition, the fluent layer fills in the defaults the
//! service would otherwise reject, and creates any implicit resources. For
//! example, a load balancer without frontends gets a new public IP address
//! and a public frontend.

mod application_gateway;
mod connection;
mod gateway;
mod load_balancer;
mod local_gateway;
mod network;
mod network_interface;
mod peering;
mod public_ip;
mod security_group;
mod watcher;

pub use application_gateway::*;
pub use connection::*;
pub use gateway::*;
pub use load_balancer::*;
pub use local_gateway::*;
pub use network::*;
pub use network_interface::*;
pub use peering::*;
pub use public_ip::*;
pub use security_group::*;
pub use watcher::*;

use crate::Result;
use crate::client;
use crate::model::{
    ApplicationGatewayBackendAddressPool, ApplicationGatewayBackendHttpSettings,
    ApplicationGatewayFrontendIpConfiguration, ApplicationGatewayFrontendPort,
    ApplicationGatewayHttpListener, ApplicationGatewayIpConfiguration, ApplicationGatewayProbe,
    ApplicationGatewayRequestRoutingRule, ApplicationGatewaySslCertificate, BackendAddressPool,
    FrontendIpConfiguration, InboundNatPool, InboundNatRule, LoadBalancingRule,
    NetworkInterfaceIpConfiguration, Probe, ResourceModel, SecurityRule, SubResource, Subnet,
    VirtualNetworkGatewayIpConfiguration,
};
use crate::resource_id::{ResourceId, name_from_id, resource_group_from_id};
use futures::TryStreamExt;
use gax::error::Error;
use gax::error::BindingError;
use gax::lro::Poller;
use std::marker::PhantomData;

/// The entry point to the fluent interfaces.
///
/// # Example
/// ```
/// # use cloud_network::NetworkManager;
/// # tokio_test::block_on(async {
/// let manager = NetworkManager::builder()
///     .with_subscription("my-subscription")
///     .with_credentials(gax::credentials::AccessTokenCredentials::new("my-token"))
///     .build()
///     .await?;
/// assert_eq!(manager.subscription(), "my-subscription");
/// # gax::client_builder::Result::<()>::Ok(()) });
/// ```
#[derive(Clone, Debug)]
pub struct NetworkManager {
    client: client::Network,
}

impl NetworkManager {
    /// Returns a builder for [NetworkManager].
    pub fn builder() -> crate::builder::ManagerBuilder {
        gax::client_builder::internal::new_builder(crate::builder::manager::Factory)
    }

    /// Creates a manager using an existing client.
    pub fn new(client: client::Network) -> Self {
        Self { client }
    }

    /// Creates a manager from the provided stub.
    ///
    /// The most common case for calling this function is in tests faking the
    /// service.
    pub fn from_stub<S, T>(subscription: S, stub: T) -> Self
    where
        S: Into<String>,
        T: crate::stub::Network + 'static,
    {
        Self::new(client::Network::from_stub(subscription, stub))
    }

    /// The low level client used by this manager.
    pub fn client(&self) -> &client::Network {
        &self.client
    }

    /// The subscription of all the resources managed by this manager.
    pub fn subscription(&self) -> &str {
        self.client.subscription()
    }

    pub fn networks(&self) -> Networks {
        Collection::new(self.clone())
    }

    pub fn public_ip_addresses(&self) -> PublicIpAddresses {
        Collection::new(self.clone())
    }

    pub fn network_interfaces(&self) -> NetworkInterfaces {
        Collection::new(self.clone())
    }

    pub fn network_security_groups(&self) -> NetworkSecurityGroups {
        Collection::new(self.clone())
    }

    pub fn load_balancers(&self) -> LoadBalancers {
        Collection::new(self.clone())
    }

    pub fn application_gateways(&self) -> ApplicationGateways {
        Collection::new(self.clone())
    }

    pub fn virtual_network_gateways(&self) -> VirtualNetworkGateways {
        Collection::new(self.clone())
    }

    pub fn virtual_network_gateway_connections(&self) -> Connections {
        Collection::new(self.clone())
    }

    pub fn local_network_gateways(&self) -> LocalNetworkGateways {
        Collection::new(self.clone())
    }

    pub fn network_watchers(&self) -> NetworkWatchers {
        Collection::new(self.clone())
    }

    fn resource_id<R: ResourceModel>(&self, resource_group_name: &str, name: &str) -> ResourceId {
        ResourceId::new(self.subscription(), resource_group_name, R::COLLECTION, name)
    }
}

/// A definition that cannot be sent to the service.
///
/// These errors are returned as [binding][gax::error::Error::is_binding]
/// errors, with this type as their source.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum DefinitionError {
    #[error("the resource group for `{0}` is not set")]
    MissingResourceGroup(String),
    #[error("the region for `{0}` is not set")]
    MissingRegion(String),
    #[error("security rule `{name}` has priority {priority}, the priority must be in [100, 4096]")]
    InvalidPriority { name: String, priority: i32 },
    #[error("the virtual network `{0}` has no subnets")]
    NoSubnets(String),
    #[error("`{resource}` requires {what}")]
    Incomplete { resource: String, what: &'static str },
    #[error("`{0}` does not exist")]
    NotFound(String),
}

impl From<DefinitionError> for Error {
    fn from(value: DefinitionError) -> Self {
        Error::binding(value)
    }
}

/// Implemented by the fluent wrappers of top-level resources.
pub trait Wrapper: Sized {
    /// The model returned by the service.
    type Model: ResourceModel;

    /// Wraps a model returned by the service.
    fn wrap(manager: NetworkManager, inner: Self::Model) -> Self;

    /// The low level client for the resource collection.
    fn resources(manager: &NetworkManager) -> &client::Resources<Self::Model>;
}

/// A collection of top-level resources, e.g., all the virtual networks in a
/// subscription.
///
/// Use the methods in [NetworkManager] to create collections. Each
/// collection also provides a `define()` function to start a new
/// definition.
#[derive(Debug)]
pub struct Collection<W> {
    manager: NetworkManager,
    _wrapper: PhantomData<fn() -> W>,
}

impl<W> Clone for Collection<W> {
    fn clone(&self) -> Self {
        Self::new(self.manager.clone())
    }
}

impl<W> Collection<W> {
    fn new(manager: NetworkManager) -> Self {
        Self {
            manager,
            _wrapper: PhantomData,
        }
    }

    pub fn manager(&self) -> &NetworkManager {
        &self.manager
    }
}

impl<W: Wrapper> Collection<W> {
    /// Gets a resource by its resource group and name.
    pub async fn get_by_resource_group(&self, resource_group_name: &str, name: &str) -> Result<W> {
        let inner = W::resources(&self.manager)
            .get()
            .set_resource_group_name(resource_group_name)
            .set_name(name)
            .send()
            .await?;
        Ok(W::wrap(self.manager.clone(), inner))
    }

    /// Gets a resource by its id.
    pub async fn get_by_id(&self, id: &str) -> Result<W> {
        let id = ResourceId::parse(id)?;
        self.get_by_resource_group(id.resource_group_name(), id.name())
            .await
    }

    /// Lists all the resources in the subscription.
    pub async fn list(&self) -> Result<Vec<W>> {
        self.list_impl("").await
    }

    /// Lists the resources in a resource group.
    pub async fn list_by_resource_group(&self, resource_group_name: &str) -> Result<Vec<W>> {
        if resource_group_name.is_empty() {
            return Err(Error::binding(BindingError::missing("resource_group_name")));
        }
        self.list_impl(resource_group_name).await
    }

    async fn list_impl(&self, resource_group_name: &str) -> Result<Vec<W>> {
        let items: Vec<W::Model> = W::resources(&self.manager)
            .list()
            .set_resource_group_name(resource_group_name)
            .by_item()
            .try_collect()
            .await?;
        Ok(items
            .into_iter()
            .map(|item| W::wrap(self.manager.clone(), item))
            .collect())
    }

    /// Deletes a resource and waits until the deletion completes.
    ///
    /// Deleting a resource that does not exist succeeds.
    pub async fn delete_by_resource_group(&self, resource_group_name: &str, name: &str) -> Result<()> {
        W::resources(&self.manager)
            .delete()
            .set_resource_group_name(resource_group_name)
            .set_name(name)
            .poller()
            .until_done()
            .await
    }

    /// Deletes a resource by its id and waits until the deletion completes.
    pub async fn delete_by_id(&self, id: &str) -> Result<()> {
        let id = ResourceId::parse(id)?;
        self.delete_by_resource_group(id.resource_group_name(), id.name())
            .await
    }
}

/// Implements [Wrapper] and the accessors common to all top-level wrappers.
///
/// The wrapper must have a `manager: NetworkManager` and an `inner` field.
macro_rules! wrapper {
    ($wrapper:ident, $model:ty, $resources:ident) => {
        impl $crate::fluent::Wrapper for $wrapper {
            type Model = $model;

            fn wrap(manager: $crate::fluent::NetworkManager, inner: $model) -> Self {
                Self { manager, inner }
            }

            fn resources(
                manager: &$crate::fluent::NetworkManager,
            ) -> &$crate::client::Resources<$model> {
                manager.client().$resources()
            }
        }

        impl $wrapper {
            /// The resource id.
            pub fn id(&self) -> &str {
                &self.inner.id
            }

            pub fn name(&self) -> &str {
                &self.inner.name
            }

            /// The resource group, extracted from the resource id.
            pub fn resource_group_name(&self) -> &str {
                $crate::resource_id::resource_group_from_id(&self.inner.id).unwrap_or_default()
            }

            pub fn region(&self) -> $crate::region::Region {
                $crate::region::Region::from(self.inner.location.as_str())
            }

            pub fn tags(&self) -> &$crate::model::Tags {
                &self.inner.tags
            }

            /// The model returned by the service.
            pub fn inner(&self) -> &$model {
                &self.inner
            }

            pub fn into_inner(self) -> $model {
                self.inner
            }

            pub fn manager(&self) -> &$crate::fluent::NetworkManager {
                &self.manager
            }

            /// Fetches the current state of the resource.
            pub async fn refresh(&mut self) -> $crate::Result<()> {
                let inner = <Self as $crate::fluent::Wrapper>::resources(&self.manager)
                    .get()
                    .set_resource_group_name(self.resource_group_name())
                    .set_name(&self.inner.name)
                    .send()
                    .await?;
                self.inner = inner;
                Ok(())
            }
        }
    };
}
pub(crate) use wrapper;

/// Implements the setters common to all top-level definitions.
///
/// The definition must have a `draft: Draft<_>` field.
macro_rules! definition_setters {
    () => {
        /// Sets the region. Updates cannot change the region.
        pub fn with_region<T: Into<$crate::region::Region>>(mut self, v: T) -> Self {
            self.draft.inner.location = v.into().name().to_string();
            self
        }

        pub fn with_existing_resource_group<T: Into<String>>(mut self, v: T) -> Self {
            self.draft.resource_group_name = v.into();
            self
        }

        pub fn with_tag<K: Into<String>, V: Into<String>>(mut self, k: K, v: V) -> Self {
            self.draft.inner.tags.insert(k.into(), v.into());
            self
        }

        /// Replaces all the tags.
        pub fn with_tags<T, K, V>(mut self, v: T) -> Self
        where
            T: IntoIterator<Item = (K, V)>,
            K: Into<String>,
            V: Into<String>,
        {
            self.draft.inner.tags = v.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
            self
        }

        pub fn without_tag(mut self, k: &str) -> Self {
            self.draft.inner.tags.remove(k);
            self
        }

        /// The model sent to the service, before any defaults are applied.
        pub fn inner(&self) -> &<Self as $crate::fluent::Definition>::Model {
            &self.draft.inner
        }
    };
}
pub(crate) use definition_setters;

/// Implemented by the definitions of top-level resources.
pub trait Definition {
    /// The model sent to the service.
    type Model: ResourceModel;
}

/// The state shared by all the definitions of top-level resources.
#[derive(Clone, Debug)]
pub(crate) struct Draft<M> {
    manager: NetworkManager,
    resource_group_name: String,
    inner: M,
    is_update: bool,
}

impl<M: ResourceModel> Draft<M> {
    fn new(manager: NetworkManager, inner: M) -> Self {
        Self {
            manager,
            resource_group_name: String::new(),
            inner,
            is_update: false,
        }
    }

    fn existing(manager: NetworkManager, inner: M) -> Self {
        let resource_group_name = resource_group_from_id(inner.id())
            .unwrap_or_default()
            .to_string();
        Self {
            manager,
            resource_group_name,
            inner,
            is_update: true,
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    /// The id of the resource, whether it exists or not.
    fn resource_id(&self) -> ResourceId {
        self.manager
            .resource_id::<M>(&self.resource_group_name, self.inner.name())
    }

    fn check_resource_group(&self) -> Result<()> {
        if self.resource_group_name.is_empty() {
            return Err(DefinitionError::MissingResourceGroup(self.name().to_string()).into());
        }
        Ok(())
    }

    /// Sends the definition and waits until the resource is provisioned.
    async fn submit<W: Wrapper<Model = M>>(self) -> Result<W> {
        self.check_resource_group()?;
        let inner = W::resources(&self.manager)
            .create_or_update()
            .set_resource_group_name(&self.resource_group_name)
            .set_name(self.inner.name())
            .set_resource(self.inner)
            .poller()
            .until_done()
            .await?;
        Ok(W::wrap(self.manager, inner))
    }
}

/// Implemented by the definitions of top-level resources that accept child
/// resources.
pub trait Attach<C> {
    /// Adds `child`, replacing any child with the same name.
    fn attach_child(&mut self, child: C);
}

/// A child resource being defined, or updated, as part of its parent
/// definition.
///
/// Call [attach()][ChildDefinition::attach] to return to the parent
/// definition.
#[derive(Clone, Debug)]
pub struct ChildDefinition<P, C> {
    parent: P,
    inner: C,
}

impl<P: Attach<C>, C> ChildDefinition<P, C> {
    fn new(parent: P, inner: C) -> Self {
        Self { parent, inner }
    }

    /// Adds the child resource to its parent definition.
    pub fn attach(self) -> P {
        let mut parent = self.parent;
        parent.attach_child(self.inner);
        parent
    }

    /// The child resource, as defined so far.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

/// Child resources are identified by name within their parent.
pub(crate) trait ChildModel: Clone {
    fn child_name(&self) -> &str;
}

macro_rules! child_model {
    ($($t:ty),* $(,)?) => {
        $(impl ChildModel for $t {
            fn child_name(&self) -> &str {
                &self.name
            }
        })*
    };
}

child_model!(
    Subnet,
    SecurityRule,
    NetworkInterfaceIpConfiguration,
    FrontendIpConfiguration,
    BackendAddressPool,
    Probe,
    LoadBalancingRule,
    InboundNatRule,
    InboundNatPool,
    ApplicationGatewayIpConfiguration,
    ApplicationGatewayFrontendIpConfiguration,
    ApplicationGatewayFrontendPort,
    ApplicationGatewayBackendAddressPool,
    ApplicationGatewayBackendHttpSettings,
    ApplicationGatewayHttpListener,
    ApplicationGatewayRequestRoutingRule,
    ApplicationGatewaySslCertificate,
    ApplicationGatewayProbe,
    VirtualNetworkGatewayIpConfiguration,
);

/// Adds `item`, replacing any item with the same name.
fn upsert<C: ChildModel>(items: &mut Vec<C>, item: C) {
    match items
        .iter_mut()
        .find(|i| i.child_name().eq_ignore_ascii_case(item.child_name()))
    {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

/// Removes the item named `name`, returns true if it was found.
fn remove<C: ChildModel>(items: &mut Vec<C>, name: &str) -> bool {
    let len = items.len();
    items.retain(|i| !i.child_name().eq_ignore_ascii_case(name));
    items.len() != len
}

fn find<'a, C: ChildModel>(items: &'a [C], name: &str) -> Option<&'a C> {
    items
        .iter()
        .find(|i| i.child_name().eq_ignore_ascii_case(name))
}

/// A reference to a sibling child resource, by name.
///
/// The reference is expanded to the full id by [resolve] before the
/// definition is sent.
fn by_name<T: Into<String>>(name: T) -> Option<SubResource> {
    Some(SubResource::new(name))
}

/// Expands a reference created by [by_name] into the id of the child
/// resource in `collection`.
fn resolve(reference: &mut Option<SubResource>, parent: &ResourceId, collection: &str) {
    if let Some(r) = reference.as_mut().filter(|r| !r.id.is_empty() && !r.id.starts_with('/')) {
        r.id = parent.child(collection, r.id.as_str()).to_string();
    }
}

/// Returns true if `reference` points to the child named `name`.
fn references(reference: &Option<SubResource>, name: &str) -> bool {
    reference
        .as_ref()
        .and_then(|r| name_from_id(&r.id))
        .is_some_and(|n| n.eq_ignore_ascii_case(name))
}

/// Compares two resource ids, ignoring case.
fn same_id(a: &str, b: &str) -> bool {
    a.trim_end_matches('/')
        .eq_ignore_ascii_case(b.trim_end_matches('/'))
}

/// Creates an implicit public IP address for `owner`.
///
/// The address is created in the same resource group and region, and uses
/// the new name as its leaf DNS label.
async fn create_public_ip(
    manager: &NetworkManager,
    resource_group_name: &str,
    location: &str,
    owner: &str,
) -> Result<PublicIpAddress> {
    let name = crate::names::random_resource_name("pip", 20);
    tracing::debug!(%name, %owner, "creating implicit public IP address");
    let address = manager
        .public_ip_addresses()
        .define(&name)
        .with_region(location)
        .with_existing_resource_group(resource_group_name)
        .with_leaf_domain_label(&name)
        .create()
        .await?;
    Ok(address)
}

/// Creates an implicit virtual network for `owner`, with a single subnet
/// spanning the address space.
async fn create_network(
    manager: &NetworkManager,
    resource_group_name: &str,
    location: &str,
    owner: &str,
    address_space: &str,
    subnet_name: &str,
) -> Result<Network> {
    let name = crate::names::random_resource_name("vnet", 24);
    tracing::debug!(%name, %owner, %address_space, "creating implicit virtual network");
    manager
        .networks()
        .define(&name)
        .with_region(location)
        .with_existing_resource_group(resource_group_name)
        .with_address_space(address_space)
        .with_subnet(subnet_name, address_space)
        .create()
        .await
}

fn check_region(location: &str, name: &str) -> Result<()> {
    if location.is_empty() {
        return Err(DefinitionError::MissingRegion(name.to_string()).into());
    }
    Ok(())
}
