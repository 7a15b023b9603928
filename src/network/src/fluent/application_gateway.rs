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
    by_name, check_region, create_network, create_public_ip, definition_setters, find,
    references, remove, resolve, upsert, wrapper,
};
use crate::Result;
use crate::model::*;
use base64::Engine;

/// The address space of the network created when a definition does not
/// include a gateway subnet.
pub const DEFAULT_GATEWAY_ADDRESS_SPACE: &str = "10.0.0.0/24";

/// The name of the subnet, and of the gateway IP configuration, created when
/// a definition does not include a gateway subnet.
pub const DEFAULT_GATEWAY_SUBNET: &str = "default";

/// The name of the implicit public frontend.
pub const PUBLIC_FRONTEND: &str = "public";

/// The name of the implicit private frontend.
pub const PRIVATE_FRONTEND: &str = "private";

const FRONTENDS: &str = "frontendIPConfigurations";
const FRONTEND_PORTS: &str = "frontendPorts";
const SSL_CERTIFICATES: &str = "sslCertificates";
const LISTENERS: &str = "httpListeners";
const BACKENDS: &str = "backendAddressPools";
const BACKEND_HTTP_SETTINGS: &str = "backendHttpSettingsCollection";
const PROBES: &str = "probes";

const DEFAULT_CAPACITY: i32 = 1;
const DEFAULT_HTTP_PORT: i32 = 80;
const DEFAULT_HTTPS_PORT: i32 = 443;
const DEFAULT_REQUEST_TIMEOUT: i32 = 30;
const DEFAULT_PROBE_INTERVAL: i32 = 30;
const DEFAULT_PROBE_TIMEOUT: i32 = 30;
const DEFAULT_UNHEALTHY_THRESHOLD: i32 = 3;

/// The application gateways in a subscription.
pub type ApplicationGateways = Collection<ApplicationGateway>;

/// An application gateway, a layer 7 load balancer.
#[derive(Clone, Debug)]
pub struct ApplicationGateway {
    manager: NetworkManager,
    inner: crate::model::ApplicationGateway,
}

wrapper!(ApplicationGateway, crate::model::ApplicationGateway, application_gateways);

impl ApplicationGateway {
    pub fn size(&self) -> Option<&ApplicationGatewaySkuName> {
        self.sku().and_then(|s| s.name.as_ref())
    }

    pub fn tier(&self) -> Option<&ApplicationGatewayTier> {
        self.sku().and_then(|s| s.tier.as_ref())
    }

    pub fn instance_count(&self) -> Option<i32> {
        self.sku().and_then(|s| s.capacity)
    }

    pub fn operational_state(&self) -> Option<&ApplicationGatewayOperationalState> {
        self.inner.properties.operational_state.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.operational_state()
            .is_some_and(|s| s.matches(&ApplicationGatewayOperationalState::RUNNING))
    }

    /// The subnet where the gateway instances are deployed.
    pub fn gateway_subnet_id(&self) -> Option<&str> {
        self.inner
            .properties
            .gateway_ip_configurations
            .first()
            .and_then(|c| c.properties.subnet.as_ref())
            .map(|s| s.id.as_str())
    }

    pub fn frontends(&self) -> &[ApplicationGatewayFrontendIpConfiguration] {
        &self.inner.properties.frontend_ip_configurations
    }

    pub fn public_frontend(&self) -> Option<&ApplicationGatewayFrontendIpConfiguration> {
        self.frontends()
            .iter()
            .find(|f| f.properties.public_ip_address.is_some())
    }

    pub fn private_frontend(&self) -> Option<&ApplicationGatewayFrontendIpConfiguration> {
        self.frontends()
            .iter()
            .find(|f| f.properties.public_ip_address.is_none())
    }

    /// Returns true if the gateway receives traffic from the internet.
    pub fn is_public(&self) -> bool {
        self.public_frontend().is_some()
    }

    /// Returns true if the gateway receives traffic from its network.
    pub fn is_private(&self) -> bool {
        self.private_frontend().is_some()
    }

    pub fn public_ip_address_id(&self) -> Option<&str> {
        self.public_frontend()
            .and_then(|f| f.properties.public_ip_address.as_ref())
            .map(|p| p.id.as_str())
    }

    pub fn frontend_ports(&self) -> &[ApplicationGatewayFrontendPort] {
        &self.inner.properties.frontend_ports
    }

    pub fn backends(&self) -> &[ApplicationGatewayBackendAddressPool] {
        &self.inner.properties.backend_address_pools
    }

    pub fn backend_http_configurations(&self) -> &[ApplicationGatewayBackendHttpSettings] {
        &self.inner.properties.backend_http_settings_collection
    }

    pub fn listeners(&self) -> &[ApplicationGatewayHttpListener] {
        &self.inner.properties.http_listeners
    }

    pub fn listener(&self, name: &str) -> Option<&ApplicationGatewayHttpListener> {
        find(&self.inner.properties.http_listeners, name)
    }

    pub fn request_routing_rules(&self) -> &[ApplicationGatewayRequestRoutingRule] {
        &self.inner.properties.request_routing_rules
    }

    pub fn request_routing_rule(&self, name: &str) -> Option<&ApplicationGatewayRequestRoutingRule> {
        find(&self.inner.properties.request_routing_rules, name)
    }

    pub fn ssl_certificates(&self) -> &[ApplicationGatewaySslCertificate] {
        &self.inner.properties.ssl_certificates
    }

    pub fn probes(&self) -> &[ApplicationGatewayProbe] {
        &self.inner.properties.probes
    }

    /// Starts the gateway and fetches its new state.
    pub async fn start(&mut self) -> Result<()> {
        self.manager
            .client()
            .actions()
            .start_application_gateway()
            .set_resource_group_name(self.resource_group_name())
            .set_name(&self.inner.name)
            .send()
            .await?;
        self.refresh().await
    }

    /// Stops the gateway and fetches its new state.
    pub async fn stop(&mut self) -> Result<()> {
        self.manager
            .client()
            .actions()
            .stop_application_gateway()
            .set_resource_group_name(self.resource_group_name())
            .set_name(&self.inner.name)
            .send()
            .await?;
        self.refresh().await
    }

    /// Starts an update of this application gateway.
    pub fn update(self) -> ApplicationGatewayUpdate {
        ApplicationGatewayDefinition {
            draft: Draft::existing(self.manager, self.inner),
        }
    }

    fn sku(&self) -> Option<&ApplicationGatewaySku> {
        self.inner.properties.sku.as_ref()
    }
}

impl Collection<ApplicationGateway> {
    /// Starts the definition of a new application gateway.
    pub fn define<T: Into<String>>(&self, name: T) -> ApplicationGatewayDefinition {
        ApplicationGatewayDefinition {
            draft: Draft::new(
                self.manager.clone(),
                crate::model::ApplicationGateway::new().set_name(name),
            ),
        }
    }
}

/// The definition of a new application gateway.
///
/// Before the definition is sent:
/// * The SKU defaults to a single `Standard_Small` instance in the `Standard`
///   tier.
/// * A gateway without a subnet gets a new network, using
///   [DEFAULT_GATEWAY_ADDRESS_SPACE], with a subnet named
///   [DEFAULT_GATEWAY_SUBNET].
/// * Public frontends without an address get a new public IP address.
/// * A gateway without frontends gets a private frontend in the gateway
///   subnet.
///
/// Request routing rules create the listeners, frontend ports, backends, and
/// backend HTTP configurations they need.
#[derive(Clone, Debug)]
pub struct ApplicationGatewayDefinition {
    draft: Draft<crate::model::ApplicationGateway>,
}

/// Updates use the same setters as new definitions.
pub type ApplicationGatewayUpdate = ApplicationGatewayDefinition;

impl Definition for ApplicationGatewayDefinition {
    type Model = crate::model::ApplicationGateway;
}

impl ApplicationGatewayDefinition {
    definition_setters!();

    pub fn with_size<T: Into<ApplicationGatewaySkuName>>(mut self, v: T) -> Self {
        self.sku().name = Some(v.into());
        self
    }

    pub fn with_tier<T: Into<ApplicationGatewayTier>>(mut self, v: T) -> Self {
        self.sku().tier = Some(v.into());
        self
    }

    pub fn with_instance_count(mut self, count: i32) -> Self {
        self.sku().capacity = Some(count);
        self
    }

    /// Deploys the gateway in the subnet `subnet` of the network `network_id`.
    pub fn with_existing_subnet(mut self, network_id: &str, subnet: &str) -> Self {
        let subnet = SubResource::new(format!(
            "{}/subnets/{subnet}",
            network_id.trim_end_matches('/')
        ));
        self.set_gateway_subnet(subnet);
        self
    }

    /// Adds a public frontend using a new public IP address.
    pub fn with_new_public_ip_address(mut self) -> Self {
        self.public_frontend().properties.public_ip_address = None;
        self
    }

    /// Adds a public frontend using an existing public IP address.
    pub fn with_existing_public_ip_address<T: Into<String>>(mut self, id: T) -> Self {
        self.public_frontend().properties.public_ip_address = Some(SubResource::new(id));
        self
    }

    /// Adds a private frontend in the gateway subnet.
    pub fn with_private_frontend(mut self) -> Self {
        self.private_frontend();
        self
    }

    pub fn without_public_frontend(mut self) -> Self {
        let names = self
            .frontends_where(is_public_frontend)
            .collect::<Vec<_>>();
        for name in names {
            self = self.without_frontend(&name);
        }
        self
    }

    pub fn without_private_frontend(mut self) -> Self {
        let names = self
            .frontends_where(|f| !is_public_frontend(f))
            .collect::<Vec<_>>();
        for name in names {
            self = self.without_frontend(&name);
        }
        self
    }

    /// Adds a frontend port named `port{n}`, unless a port with the same
    /// number exists.
    pub fn with_frontend_port(mut self, port: i32) -> Self {
        self.ensure_port(port);
        self
    }

    pub fn with_frontend_port_named<T: Into<String>>(mut self, name: T, port: i32) -> Self {
        upsert(
            &mut self.draft.inner.properties.frontend_ports,
            ApplicationGatewayFrontendPort::new()
                .set_name(name)
                .set_properties(ApplicationGatewayFrontendPortProperties::new().set_port(port)),
        );
        self
    }

    /// Removes a frontend port, and clears any listener references to it.
    pub fn without_frontend_port(mut self, name: &str) -> Self {
        let properties = &mut self.draft.inner.properties;
        if remove(&mut properties.frontend_ports, name) {
            for listener in properties.http_listeners.iter_mut() {
                clear_reference(&mut listener.properties.frontend_port, name);
            }
        }
        self
    }

    pub fn define_backend<T: Into<String>>(
        self,
        name: T,
    ) -> ChildDefinition<Self, ApplicationGatewayBackendAddressPool> {
        ChildDefinition::new(self, ApplicationGatewayBackendAddressPool::new().set_name(name))
    }

    pub fn update_backend(self, name: &str) -> ChildDefinition<Self, ApplicationGatewayBackendAddressPool> {
        let backend = find(&self.draft.inner.properties.backend_address_pools, name)
            .cloned()
            .unwrap_or_else(|| ApplicationGatewayBackendAddressPool::new().set_name(name));
        ChildDefinition::new(self, backend)
    }

    /// Removes a backend, and clears any rule references to it.
    pub fn without_backend(mut self, name: &str) -> Self {
        let properties = &mut self.draft.inner.properties;
        if remove(&mut properties.backend_address_pools, name) {
            for rule in properties.request_routing_rules.iter_mut() {
                clear_reference(&mut rule.properties.backend_address_pool, name);
            }
        }
        self
    }

    pub fn define_backend_http_configuration<T: Into<String>>(
        self,
        name: T,
    ) -> ChildDefinition<Self, ApplicationGatewayBackendHttpSettings> {
        ChildDefinition::new(self, ApplicationGatewayBackendHttpSettings::new().set_name(name))
    }

    pub fn update_backend_http_configuration(
        self,
        name: &str,
    ) -> ChildDefinition<Self, ApplicationGatewayBackendHttpSettings> {
        let settings = find(&self.draft.inner.properties.backend_http_settings_collection, name)
            .cloned()
            .unwrap_or_else(|| ApplicationGatewayBackendHttpSettings::new().set_name(name));
        ChildDefinition::new(self, settings)
    }

    pub fn without_backend_http_configuration(mut self, name: &str) -> Self {
        let properties = &mut self.draft.inner.properties;
        if remove(&mut properties.backend_http_settings_collection, name) {
            for rule in properties.request_routing_rules.iter_mut() {
                clear_reference(&mut rule.properties.backend_http_settings, name);
            }
        }
        self
    }

    pub fn define_listener<T: Into<String>>(
        self,
        name: T,
    ) -> ChildDefinition<Self, ApplicationGatewayHttpListener> {
        ChildDefinition::new(self, ApplicationGatewayHttpListener::new().set_name(name))
    }

    pub fn update_listener(self, name: &str) -> ChildDefinition<Self, ApplicationGatewayHttpListener> {
        let listener = find(&self.draft.inner.properties.http_listeners, name)
            .cloned()
            .unwrap_or_else(|| ApplicationGatewayHttpListener::new().set_name(name));
        ChildDefinition::new(self, listener)
    }

    pub fn without_listener(mut self, name: &str) -> Self {
        let properties = &mut self.draft.inner.properties;
        if remove(&mut properties.http_listeners, name) {
            for rule in properties.request_routing_rules.iter_mut() {
                clear_reference(&mut rule.properties.http_listener, name);
            }
        }
        self
    }

    pub fn define_ssl_certificate<T: Into<String>>(
        self,
        name: T,
    ) -> ChildDefinition<Self, ApplicationGatewaySslCertificate> {
        ChildDefinition::new(self, ApplicationGatewaySslCertificate::new().set_name(name))
    }

    pub fn without_ssl_certificate(mut self, name: &str) -> Self {
        let properties = &mut self.draft.inner.properties;
        if remove(&mut properties.ssl_certificates, name) {
            for listener in properties.http_listeners.iter_mut() {
                clear_reference(&mut listener.properties.ssl_certificate, name);
            }
        }
        self
    }

    /// Starts the definition of a health probe. Probes use HTTP and the `/`
    /// path unless configured otherwise.
    pub fn define_probe<T: Into<String>>(self, name: T) -> ChildDefinition<Self, ApplicationGatewayProbe> {
        ChildDefinition::new(self, ApplicationGatewayProbe::new().set_name(name))
    }

    pub fn without_probe(mut self, name: &str) -> Self {
        let properties = &mut self.draft.inner.properties;
        if remove(&mut properties.probes, name) {
            for settings in properties.backend_http_settings_collection.iter_mut() {
                clear_reference(&mut settings.properties.probe, name);
            }
        }
        self
    }

    /// Starts the definition of a request routing rule.
    pub fn define_request_routing_rule<T: Into<String>>(self, name: T) -> RequestRoutingRuleDefinition {
        RequestRoutingRuleDefinition::new(self, name.into())
    }

    pub fn without_request_routing_rule(mut self, name: &str) -> Self {
        remove(&mut self.draft.inner.properties.request_routing_rules, name);
        self
    }

    /// Creates the application gateway, and any implicit resources.
    pub async fn create(mut self) -> Result<ApplicationGateway> {
        check_region(&self.draft.inner.location, self.draft.name())?;
        self.draft.check_resource_group()?;
        self.reconcile().await?;
        self.draft.submit().await
    }

    /// Applies the update, creating any new implicit resources.
    pub async fn apply(mut self) -> Result<ApplicationGateway> {
        self.reconcile().await?;
        self.draft.submit().await
    }

    fn sku(&mut self) -> &mut ApplicationGatewaySku {
        self.draft
            .inner
            .properties
            .sku
            .get_or_insert_with(ApplicationGatewaySku::new)
    }

    fn gateway_subnet(&self) -> Option<SubResource> {
        self.draft
            .inner
            .properties
            .gateway_ip_configurations
            .first()
            .and_then(|c| c.properties.subnet.clone())
    }

    fn set_gateway_subnet(&mut self, subnet: SubResource) {
        let configurations = &mut self.draft.inner.properties.gateway_ip_configurations;
        match configurations.first_mut() {
            Some(c) => c.properties.subnet = Some(subnet),
            None => configurations.push(
                ApplicationGatewayIpConfiguration::new()
                    .set_name(DEFAULT_GATEWAY_SUBNET)
                    .set_properties(ApplicationGatewayIpConfigurationProperties::new().set_subnet(subnet)),
            ),
        }
    }

    fn frontends_where<F>(&self, predicate: F) -> impl Iterator<Item = String> + '_
    where
        F: Fn(&ApplicationGatewayFrontendIpConfiguration) -> bool + 'static,
    {
        self.draft
            .inner
            .properties
            .frontend_ip_configurations
            .iter()
            .filter(move |f| predicate(f))
            .map(|f| f.name.clone())
    }

    fn without_frontend(mut self, name: &str) -> Self {
        let properties = &mut self.draft.inner.properties;
        if remove(&mut properties.frontend_ip_configurations, name) {
            for listener in properties.http_listeners.iter_mut() {
                clear_reference(&mut listener.properties.frontend_ip_configuration, name);
            }
        }
        self
    }

    fn public_frontend(&mut self) -> &mut ApplicationGatewayFrontendIpConfiguration {
        self.frontend(is_public_frontend, || {
            ApplicationGatewayFrontendIpConfiguration::new().set_name(PUBLIC_FRONTEND)
        })
    }

    fn private_frontend(&mut self) -> &mut ApplicationGatewayFrontendIpConfiguration {
        self.frontend(
            |f| !is_public_frontend(f),
            || {
                ApplicationGatewayFrontendIpConfiguration::new()
                    .set_name(PRIVATE_FRONTEND)
                    .set_properties(
                        ApplicationGatewayFrontendIpConfigurationProperties::new()
                            .set_private_ip_allocation_method(IpAllocationMethod::DYNAMIC),
                    )
            },
        )
    }

    fn frontend<P, N>(&mut self, predicate: P, new: N) -> &mut ApplicationGatewayFrontendIpConfiguration
    where
        P: Fn(&ApplicationGatewayFrontendIpConfiguration) -> bool,
        N: FnOnce() -> ApplicationGatewayFrontendIpConfiguration,
    {
        let frontends = &mut self.draft.inner.properties.frontend_ip_configurations;
        let index = match frontends.iter().position(predicate) {
            Some(i) => i,
            None => {
                frontends.push(new());
                frontends.len() - 1
            }
        };
        &mut frontends[index]
    }

    /// Returns the name of the frontend port using `port`, adding one if
    /// needed.
    fn ensure_port(&mut self, port: i32) -> String {
        let ports = &mut self.draft.inner.properties.frontend_ports;
        if let Some(existing) = ports.iter().find(|p| p.properties.port == Some(port)) {
            return existing.name.clone();
        }
        let name = format!("port{port}");
        ports.push(
            ApplicationGatewayFrontendPort::new()
                .set_name(&name)
                .set_properties(ApplicationGatewayFrontendPortProperties::new().set_port(port)),
        );
        name
    }

    /// Returns the name of the backend HTTP configuration using `port`,
    /// adding one if needed.
    fn ensure_http_settings(&mut self, port: i32) -> String {
        let settings = &mut self.draft.inner.properties.backend_http_settings_collection;
        if let Some(existing) = settings.iter().find(|s| s.properties.port == Some(port)) {
            return existing.name.clone();
        }
        let name = format!("config{port}");
        settings.push(
            ApplicationGatewayBackendHttpSettings::new()
                .set_name(&name)
                .set_properties(ApplicationGatewayBackendHttpSettingsProperties::new().set_port(port)),
        );
        name
    }

    async fn reconcile(&mut self) -> Result<()> {
        let owner = self.draft.name().to_string();
        let sku = self.sku();
        sku.name.get_or_insert(ApplicationGatewaySkuName::STANDARD_SMALL);
        sku.tier.get_or_insert(ApplicationGatewayTier::STANDARD);
        sku.capacity.get_or_insert(DEFAULT_CAPACITY);

        let gateway_subnet = match self.gateway_subnet() {
            Some(s) => s,
            None => {
                let network = create_network(
                    &self.draft.manager,
                    &self.draft.resource_group_name,
                    &self.draft.inner.location,
                    &owner,
                    DEFAULT_GATEWAY_ADDRESS_SPACE,
                    DEFAULT_GATEWAY_SUBNET,
                )
                .await?;
                let subnet = SubResource::new(format!(
                    "{}/subnets/{DEFAULT_GATEWAY_SUBNET}",
                    network.id()
                ));
                self.set_gateway_subnet(subnet.clone());
                subnet
            }
        };

        if self.draft.inner.properties.frontend_ip_configurations.is_empty() {
            tracing::debug!(application_gateway = %owner, frontend = PRIVATE_FRONTEND, "adding private frontend");
            self.private_frontend();
        }
        let count = self.draft.inner.properties.frontend_ip_configurations.len();
        for index in 0..count {
            let frontend = &mut self.draft.inner.properties.frontend_ip_configurations[index];
            if !is_public_frontend(frontend) {
                frontend
                    .properties
                    .subnet
                    .get_or_insert_with(|| gateway_subnet.clone());
                continue;
            }
            if frontend.properties.public_ip_address.is_some() {
                continue;
            }
            let address = create_public_ip(
                &self.draft.manager,
                &self.draft.resource_group_name,
                &self.draft.inner.location,
                &owner,
            )
            .await?;
            self.draft.inner.properties.frontend_ip_configurations[index]
                .properties
                .public_ip_address = Some(SubResource::new(address.id()));
        }
        self.reconcile_children()
    }

    fn reconcile_children(&mut self) -> Result<()> {
        let parent = self.draft.resource_id();
        let properties = &mut self.draft.inner.properties;
        let first_frontend = properties
            .frontend_ip_configurations
            .first()
            .map(|f| f.name.clone());
        let first_port = properties.frontend_ports.first().map(|p| p.name.clone());

        for listener in properties.http_listeners.iter_mut() {
            let l = &mut listener.properties;
            let is_https = l
                .protocol
                .get_or_insert(ApplicationGatewayProtocol::HTTP)
                .matches(&ApplicationGatewayProtocol::HTTPS);
            if is_https && l.ssl_certificate.is_none() {
                return Err(incomplete(&listener.name, "an SSL certificate"));
            }
            if l.frontend_ip_configuration.is_none() {
                l.frontend_ip_configuration = first_frontend.clone().and_then(by_name);
            }
            if l.frontend_port.is_none() {
                l.frontend_port = first_port.clone().and_then(by_name);
            }
            if l.frontend_port.is_none() {
                return Err(incomplete(&listener.name, "a frontend port"));
            }
            resolve(&mut l.frontend_ip_configuration, &parent, FRONTENDS);
            resolve(&mut l.frontend_port, &parent, FRONTEND_PORTS);
            resolve(&mut l.ssl_certificate, &parent, SSL_CERTIFICATES);
        }

        for settings in properties.backend_http_settings_collection.iter_mut() {
            let s = &mut settings.properties;
            s.port.get_or_insert(DEFAULT_HTTP_PORT);
            s.protocol.get_or_insert(ApplicationGatewayProtocol::HTTP);
            s.cookie_based_affinity
                .get_or_insert(CookieBasedAffinity::DISABLED);
            s.request_timeout.get_or_insert(DEFAULT_REQUEST_TIMEOUT);
            resolve(&mut s.probe, &parent, PROBES);
        }

        for probe in properties.probes.iter_mut() {
            let p = &mut probe.properties;
            p.protocol.get_or_insert(ApplicationGatewayProtocol::HTTP);
            p.host.get_or_insert_with(|| "127.0.0.1".to_string());
            p.path.get_or_insert_with(|| "/".to_string());
            p.interval.get_or_insert(DEFAULT_PROBE_INTERVAL);
            p.timeout.get_or_insert(DEFAULT_PROBE_TIMEOUT);
            p.unhealthy_threshold
                .get_or_insert(DEFAULT_UNHEALTHY_THRESHOLD);
        }

        for rule in properties.request_routing_rules.iter_mut() {
            let r = &mut rule.properties;
            r.rule_type.get_or_insert(RequestRoutingRuleType::BASIC);
            for (reference, what) in [
                (&r.http_listener, "a listener"),
                (&r.backend_address_pool, "a backend"),
                (&r.backend_http_settings, "a backend HTTP configuration"),
            ] {
                if reference.is_none() {
                    return Err(incomplete(&rule.name, what));
                }
            }
            resolve(&mut r.http_listener, &parent, LISTENERS);
            resolve(&mut r.backend_address_pool, &parent, BACKENDS);
            resolve(&mut r.backend_http_settings, &parent, BACKEND_HTTP_SETTINGS);
        }
        Ok(())
    }
}

// Public frontends have, or will get, a public IP address. Private frontends
// have a private allocation method or a subnet.
fn is_public_frontend(frontend: &ApplicationGatewayFrontendIpConfiguration) -> bool {
    let p = &frontend.properties;
    p.public_ip_address.is_some() || (p.subnet.is_none() && p.private_ip_allocation_method.is_none())
}

fn incomplete(resource: &str, what: &'static str) -> crate::Error {
    DefinitionError::Incomplete {
        resource: resource.to_string(),
        what,
    }
    .into()
}

fn clear_reference(reference: &mut Option<SubResource>, name: &str) {
    if references(reference, name) {
        *reference = None;
    }
}

macro_rules! attach_children {
    ($($child:ty => $field:ident),* $(,)?) => {
        $(impl Attach<$child> for ApplicationGatewayDefinition {
            fn attach_child(&mut self, child: $child) {
                upsert(&mut self.draft.inner.properties.$field, child);
            }
        })*
    };
}

attach_children!(
    ApplicationGatewayBackendAddressPool => backend_address_pools,
    ApplicationGatewayBackendHttpSettings => backend_http_settings_collection,
    ApplicationGatewayHttpListener => http_listeners,
    ApplicationGatewaySslCertificate => ssl_certificates,
    ApplicationGatewayProbe => probes,
);

impl ChildDefinition<ApplicationGatewayDefinition, ApplicationGatewayBackendAddressPool> {
    pub fn with_ip_address<T: Into<String>>(mut self, ip: T) -> Self {
        let address = ApplicationGatewayBackendAddress::from_ip_address(ip);
        let addresses = &mut self.inner.properties.backend_addresses;
        if !addresses.contains(&address) {
            addresses.push(address);
        }
        self
    }

    pub fn with_fqdn<T: Into<String>>(mut self, fqdn: T) -> Self {
        let address = ApplicationGatewayBackendAddress::from_fqdn(fqdn);
        let addresses = &mut self.inner.properties.backend_addresses;
        if !addresses.contains(&address) {
            addresses.push(address);
        }
        self
    }

    pub fn without_ip_address(mut self, ip: &str) -> Self {
        self.inner
            .properties
            .backend_addresses
            .retain(|a| a.ip_address.as_deref() != Some(ip));
        self
    }

    pub fn without_fqdn(mut self, fqdn: &str) -> Self {
        self.inner
            .properties
            .backend_addresses
            .retain(|a| !a.fqdn.as_deref().is_some_and(|f| f.eq_ignore_ascii_case(fqdn)));
        self
    }
}

impl ChildDefinition<ApplicationGatewayDefinition, ApplicationGatewayBackendHttpSettings> {
    pub fn with_port(mut self, port: i32) -> Self {
        self.inner.properties.port = Some(port);
        self
    }

    pub fn with_http(mut self) -> Self {
        self.inner.properties.protocol = Some(ApplicationGatewayProtocol::HTTP);
        self
    }

    pub fn with_https(mut self) -> Self {
        self.inner.properties.protocol = Some(ApplicationGatewayProtocol::HTTPS);
        self
    }

    pub fn with_cookie_based_affinity(mut self) -> Self {
        self.inner.properties.cookie_based_affinity = Some(CookieBasedAffinity::ENABLED);
        self
    }

    pub fn without_cookie_based_affinity(mut self) -> Self {
        self.inner.properties.cookie_based_affinity = Some(CookieBasedAffinity::DISABLED);
        self
    }

    pub fn with_affinity_cookie_name<T: Into<String>>(mut self, name: T) -> Self {
        self.inner.properties.affinity_cookie_name = Some(name.into());
        self
    }

    pub fn with_request_timeout(mut self, seconds: i32) -> Self {
        self.inner.properties.request_timeout = Some(seconds);
        self
    }

    /// Uses the probe named `name` to check the backend health.
    pub fn with_probe<T: Into<String>>(mut self, name: T) -> Self {
        self.inner.properties.probe = by_name(name);
        self
    }

    pub fn without_probe(mut self) -> Self {
        self.inner.properties.probe = None;
        self
    }

    /// Overrides the host header sent to the backend.
    pub fn with_host_header<T: Into<String>>(mut self, host: T) -> Self {
        self.inner.properties.host_name = Some(host.into());
        self.inner.properties.pick_host_name_from_backend_address = Some(false);
        self
    }

    /// Uses the backend address as the host header.
    pub fn with_host_header_from_backend(mut self) -> Self {
        self.inner.properties.host_name = None;
        self.inner.properties.pick_host_name_from_backend_address = Some(true);
        self
    }

    /// Overrides the path prefix sent to the backend.
    pub fn with_path<T: Into<String>>(mut self, path: T) -> Self {
        self.inner.properties.path = Some(path.into());
        self
    }
}

impl ChildDefinition<ApplicationGatewayDefinition, ApplicationGatewayHttpListener> {
    /// Receives traffic on the public frontend, adding it if needed.
    pub fn with_public_frontend(mut self) -> Self {
        let name = self.parent.public_frontend().name.clone();
        self.inner.properties.frontend_ip_configuration = by_name(name);
        self
    }

    /// Receives traffic on the private frontend, adding it if needed.
    pub fn with_private_frontend(mut self) -> Self {
        let name = self.parent.private_frontend().name.clone();
        self.inner.properties.frontend_ip_configuration = by_name(name);
        self
    }

    /// Receives traffic on `port`, adding a frontend port if needed.
    pub fn with_frontend_port(mut self, port: i32) -> Self {
        let name = self.parent.ensure_port(port);
        self.inner.properties.frontend_port = by_name(name);
        self
    }

    pub fn with_http(mut self) -> Self {
        self.inner.properties.protocol = Some(ApplicationGatewayProtocol::HTTP);
        self
    }

    pub fn with_https(mut self) -> Self {
        self.inner.properties.protocol = Some(ApplicationGatewayProtocol::HTTPS);
        self
    }

    pub fn with_host_name<T: Into<String>>(mut self, host: T) -> Self {
        self.inner.properties.host_name = Some(host.into());
        self
    }

    /// Uses the SSL certificate named `name`, for HTTPS listeners.
    pub fn with_ssl_certificate<T: Into<String>>(mut self, name: T) -> Self {
        self.inner.properties.ssl_certificate = by_name(name);
        self
    }

    pub fn with_server_name_indication(mut self) -> Self {
        self.inner.properties.require_server_name_indication = Some(true);
        self
    }

    pub fn without_server_name_indication(mut self) -> Self {
        self.inner.properties.require_server_name_indication = Some(false);
        self
    }
}

impl ChildDefinition<ApplicationGatewayDefinition, ApplicationGatewaySslCertificate> {
    /// Sets the certificate from the contents of a PFX file.
    pub fn with_pfx_from_bytes(mut self, pfx: &[u8]) -> Self {
        self.inner.properties.data = Some(base64::engine::general_purpose::STANDARD.encode(pfx));
        self
    }

    /// Sets the certificate from the base64-encoded contents of a PFX file.
    pub fn with_pfx_from_base64<T: Into<String>>(mut self, data: T) -> Self {
        self.inner.properties.data = Some(data.into());
        self
    }

    pub fn with_pfx_password<T: Into<String>>(mut self, password: T) -> Self {
        self.inner.properties.password = Some(password.into());
        self
    }
}

impl ChildDefinition<ApplicationGatewayDefinition, ApplicationGatewayProbe> {
    pub fn with_host<T: Into<String>>(mut self, host: T) -> Self {
        self.inner.properties.host = Some(host.into());
        self
    }

    pub fn with_path<T: Into<String>>(mut self, path: T) -> Self {
        self.inner.properties.path = Some(path.into());
        self
    }

    pub fn with_http(mut self) -> Self {
        self.inner.properties.protocol = Some(ApplicationGatewayProtocol::HTTP);
        self
    }

    pub fn with_https(mut self) -> Self {
        self.inner.properties.protocol = Some(ApplicationGatewayProtocol::HTTPS);
        self
    }

    pub fn with_interval_in_seconds(mut self, seconds: i32) -> Self {
        self.inner.properties.interval = Some(seconds);
        self
    }

    pub fn with_timeout_in_seconds(mut self, seconds: i32) -> Self {
        self.inner.properties.timeout = Some(seconds);
        self
    }

    pub fn with_retries_before_unhealthy(mut self, retries: i32) -> Self {
        self.inner.properties.unhealthy_threshold = Some(retries);
        self
    }
}

#[derive(Clone, Debug, Default)]
enum Frontend {
    #[default]
    Any,
    Public,
    Private,
}

/// The definition of a request routing rule.
///
/// A rule connects a listener to a backend, through a backend HTTP
/// configuration. Each of them can be named explicitly, or created from the
/// values set on the rule:
/// * The listener is named `listener-{rule}`. It uses the selected frontend,
///   or the first frontend, and a frontend port named `port{n}`.
/// * The backend is named `backend-{rule}` and contains the addresses set on
///   the rule. Rules without addresses use the first backend.
/// * The backend HTTP configuration is named `config{n}`, where `n` is the
///   backend port. Rules without a backend port use the first configuration.
#[derive(Clone, Debug)]
pub struct RequestRoutingRuleDefinition {
    parent: ApplicationGatewayDefinition,
    inner: ApplicationGatewayRequestRoutingRule,
    listener: Option<String>,
    frontend: Frontend,
    frontend_port: Option<i32>,
    protocol: Option<ApplicationGatewayProtocol>,
    host_name: Option<String>,
    ssl_certificate: Option<String>,
    backend: Option<String>,
    backend_addresses: Vec<ApplicationGatewayBackendAddress>,
    backend_http_settings: Option<String>,
    backend_port: Option<i32>,
    cookie_based_affinity: bool,
}

impl RequestRoutingRuleDefinition {
    fn new(parent: ApplicationGatewayDefinition, name: String) -> Self {
        Self {
            parent,
            inner: ApplicationGatewayRequestRoutingRule::new().set_name(name),
            listener: None,
            frontend: Frontend::Any,
            frontend_port: None,
            protocol: None,
            host_name: None,
            ssl_certificate: None,
            backend: None,
            backend_addresses: Vec::new(),
            backend_http_settings: None,
            backend_port: None,
            cookie_based_affinity: false,
        }
    }

    /// Uses an existing listener, ignoring any frontend settings on the rule.
    pub fn from_listener<T: Into<String>>(mut self, name: T) -> Self {
        self.listener = Some(name.into());
        self
    }

    pub fn from_public_frontend(mut self) -> Self {
        self.frontend = Frontend::Public;
        self
    }

    pub fn from_private_frontend(mut self) -> Self {
        self.frontend = Frontend::Private;
        self
    }

    pub fn from_frontend_http_port(mut self, port: i32) -> Self {
        self.frontend_port = Some(port);
        self.protocol = Some(ApplicationGatewayProtocol::HTTP);
        self
    }

    pub fn from_frontend_https_port(mut self, port: i32) -> Self {
        self.frontend_port = Some(port);
        self.protocol = Some(ApplicationGatewayProtocol::HTTPS);
        self
    }

    pub fn with_host_name<T: Into<String>>(mut self, host: T) -> Self {
        self.host_name = Some(host.into());
        self
    }

    /// Uses the SSL certificate named `name`, for HTTPS rules.
    pub fn with_ssl_certificate<T: Into<String>>(mut self, name: T) -> Self {
        self.ssl_certificate = Some(name.into());
        self
    }

    /// Uses an existing backend.
    pub fn to_backend<T: Into<String>>(mut self, name: T) -> Self {
        self.backend = Some(name.into());
        self
    }

    pub fn to_backend_ip_address<T: Into<String>>(mut self, ip: T) -> Self {
        self.backend_addresses
            .push(ApplicationGatewayBackendAddress::from_ip_address(ip));
        self
    }

    pub fn to_backend_fqdn<T: Into<String>>(mut self, fqdn: T) -> Self {
        self.backend_addresses
            .push(ApplicationGatewayBackendAddress::from_fqdn(fqdn));
        self
    }

    pub fn to_backend_http_port(mut self, port: i32) -> Self {
        self.backend_port = Some(port);
        self
    }

    /// Uses an existing backend HTTP configuration.
    pub fn to_backend_http_configuration<T: Into<String>>(mut self, name: T) -> Self {
        self.backend_http_settings = Some(name.into());
        self
    }

    /// Enables cookie based affinity in the backend HTTP configuration.
    pub fn with_cookie_based_affinity(mut self) -> Self {
        self.cookie_based_affinity = true;
        self
    }

    /// Sets the priority, required by some SKUs. Lower values are evaluated
    /// first.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.inner.properties.priority = Some(priority);
        self
    }

    /// The rule, as defined so far.
    pub fn inner(&self) -> &ApplicationGatewayRequestRoutingRule {
        &self.inner
    }

    /// Adds the rule, and any implicit children, to the gateway definition.
    pub fn attach(self) -> ApplicationGatewayDefinition {
        let Self {
            mut parent,
            mut inner,
            listener,
            frontend,
            frontend_port,
            protocol,
            host_name,
            ssl_certificate,
            backend,
            backend_addresses,
            backend_http_settings,
            backend_port,
            cookie_based_affinity,
        } = self;
        let rule = inner.name.clone();

        let listener = listener.unwrap_or_else(|| {
            let protocol = protocol.unwrap_or(ApplicationGatewayProtocol::HTTP);
            let default_port = if protocol.matches(&ApplicationGatewayProtocol::HTTPS) {
                DEFAULT_HTTPS_PORT
            } else {
                DEFAULT_HTTP_PORT
            };
            let port = parent.ensure_port(frontend_port.unwrap_or(default_port));
            let frontend = match frontend {
                Frontend::Public => Some(parent.public_frontend().name.clone()),
                Frontend::Private => Some(parent.private_frontend().name.clone()),
                Frontend::Any => None,
            };
            let name = format!("listener-{rule}");
            let mut properties = ApplicationGatewayHttpListenerProperties::new().set_protocol(protocol);
            properties.frontend_port = by_name(port);
            properties.frontend_ip_configuration = frontend.and_then(by_name);
            properties.host_name = host_name;
            properties.ssl_certificate = ssl_certificate.and_then(by_name);
            upsert(
                &mut parent.draft.inner.properties.http_listeners,
                ApplicationGatewayHttpListener::new()
                    .set_name(&name)
                    .set_properties(properties),
            );
            name
        });

        let backends = &mut parent.draft.inner.properties.backend_address_pools;
        let backend = match (backend, backend_addresses.is_empty()) {
            (Some(name), _) => Some(name),
            (None, false) => {
                let name = format!("backend-{rule}");
                upsert(
                    backends,
                    ApplicationGatewayBackendAddressPool::new()
                        .set_name(&name)
                        .set_properties(
                            ApplicationGatewayBackendAddressPoolProperties::new()
                                .set_backend_addresses(backend_addresses),
                        ),
                );
                Some(name)
            }
            (None, true) => backends.first().map(|b| b.name.clone()),
        };

        let settings = match (backend_http_settings, backend_port) {
            (Some(name), _) => Some(name),
            (None, Some(port)) => Some(parent.ensure_http_settings(port)),
            (None, None) => parent
                .draft
                .inner
                .properties
                .backend_http_settings_collection
                .first()
                .map(|s| s.name.clone())
                .or_else(|| Some(parent.ensure_http_settings(DEFAULT_HTTP_PORT))),
        };
        if let Some(name) = settings.as_deref().filter(|_| cookie_based_affinity) {
            let collection = &mut parent.draft.inner.properties.backend_http_settings_collection;
            if let Some(s) = collection
                .iter_mut()
                .find(|s| s.name.eq_ignore_ascii_case(name))
            {
                s.properties.cookie_based_affinity = Some(CookieBasedAffinity::ENABLED);
            }
        }

        inner.properties.http_listener = by_name(listener);
        inner.properties.backend_address_pool = backend.and_then(by_name);
        inner.properties.backend_http_settings = settings.and_then(by_name);
        inner
            .properties
            .rule_type
            .get_or_insert(RequestRoutingRuleType::BASIC);
        upsert(&mut parent.draft.inner.properties.request_routing_rules, inner);
        parent
    }
}
