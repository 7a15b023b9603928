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

use super::{Collection, Definition, Draft, NetworkManager, check_region, definition_setters, wrapper};
use crate::Result;
use crate::model::*;

/// The public IP addresses in a subscription.
pub type PublicIpAddresses = Collection<PublicIpAddress>;

/// A public IP address.
#[derive(Clone, Debug)]
pub struct PublicIpAddress {
    manager: NetworkManager,
    inner: crate::model::PublicIpAddress,
}

wrapper!(PublicIpAddress, crate::model::PublicIpAddress, public_ip_addresses);

impl PublicIpAddress {
    /// The assigned IP address.
    ///
    /// Dynamic addresses are only assigned while in use, this is `None` for
    /// dynamic addresses not associated with any resource.
    pub fn ip_address(&self) -> Option<&str> {
        self.inner.properties.ip_address.as_deref()
    }

    pub fn fqdn(&self) -> Option<&str> {
        self.dns_settings().and_then(|d| d.fqdn.as_deref())
    }

    pub fn leaf_domain_label(&self) -> Option<&str> {
        self.dns_settings().and_then(|d| d.domain_name_label.as_deref())
    }

    pub fn reverse_fqdn(&self) -> Option<&str> {
        self.dns_settings().and_then(|d| d.reverse_fqdn.as_deref())
    }

    pub fn idle_timeout_in_minutes(&self) -> Option<i32> {
        self.inner.properties.idle_timeout_in_minutes
    }

    pub fn allocation_method(&self) -> Option<&IpAllocationMethod> {
        self.inner.properties.public_ip_allocation_method.as_ref()
    }

    pub fn version(&self) -> Option<&IpVersion> {
        self.inner.properties.public_ip_address_version.as_ref()
    }

    pub fn sku(&self) -> Option<&PublicIpAddressSkuName> {
        self.inner.sku.as_ref().and_then(|s| s.name.as_ref())
    }

    /// The IP configuration using this address, if any.
    pub fn ip_configuration_id(&self) -> Option<&str> {
        self.inner
            .properties
            .ip_configuration
            .as_ref()
            .map(|c| c.id.as_str())
    }

    /// Returns true if the address is used by a network interface.
    pub fn has_assigned_network_interface(&self) -> bool {
        self.ip_configuration_id()
            .is_some_and(|id| id.contains("/networkInterfaces/"))
    }

    /// Starts an update of this public IP address.
    pub fn update(self) -> PublicIpUpdate {
        PublicIpDefinition {
            draft: Draft::existing(self.manager, self.inner),
        }
    }

    fn dns_settings(&self) -> Option<&PublicIpAddressDnsSettings> {
        self.inner.properties.dns_settings.as_ref()
    }
}

impl Collection<PublicIpAddress> {
    /// Starts the definition of a new public IP address.
    pub fn define<T: Into<String>>(&self, name: T) -> PublicIpDefinition {
        PublicIpDefinition {
            draft: Draft::new(
                self.manager.clone(),
                crate::model::PublicIpAddress::new().set_name(name),
            ),
        }
    }
}

/// The definition of a new public IP address.
///
/// Unless configured otherwise, new addresses use dynamic allocation.
#[derive(Clone, Debug)]
pub struct PublicIpDefinition {
    draft: Draft<crate::model::PublicIpAddress>,
}

/// Updates use the same setters as new definitions.
pub type PublicIpUpdate = PublicIpDefinition;

impl Definition for PublicIpDefinition {
    type Model = crate::model::PublicIpAddress;
}

impl PublicIpDefinition {
    definition_setters!();

    pub fn with_static_ip(mut self) -> Self {
        self.draft.inner.properties.public_ip_allocation_method = Some(IpAllocationMethod::STATIC);
        self
    }

    pub fn with_dynamic_ip(mut self) -> Self {
        self.draft.inner.properties.public_ip_allocation_method = Some(IpAllocationMethod::DYNAMIC);
        self
    }

    /// Sets the leaf DNS label, the address gets a FQDN in the regional
    /// domain.
    pub fn with_leaf_domain_label<T: Into<String>>(mut self, label: T) -> Self {
        self.dns_settings().domain_name_label = Some(label.into());
        self
    }

    pub fn without_leaf_domain_label(mut self) -> Self {
        if let Some(dns) = self.draft.inner.properties.dns_settings.as_mut() {
            dns.domain_name_label = None;
        }
        self
    }

    pub fn with_reverse_fqdn<T: Into<String>>(mut self, fqdn: T) -> Self {
        self.dns_settings().reverse_fqdn = Some(fqdn.into());
        self
    }

    pub fn without_reverse_fqdn(mut self) -> Self {
        if let Some(dns) = self.draft.inner.properties.dns_settings.as_mut() {
            dns.reverse_fqdn = None;
        }
        self
    }

    pub fn with_idle_timeout_in_minutes(mut self, minutes: i32) -> Self {
        self.draft.inner.properties.idle_timeout_in_minutes = Some(minutes);
        self
    }

    pub fn with_ip_version<T: Into<IpVersion>>(mut self, v: T) -> Self {
        self.draft.inner.properties.public_ip_address_version = Some(v.into());
        self
    }

    /// Sets the SKU. Standard addresses always use static allocation.
    pub fn with_sku<T: Into<PublicIpAddressSkuName>>(mut self, v: T) -> Self {
        self.draft.inner.sku = Some(PublicIpAddressSku::from(v.into()));
        self
    }

    /// Creates the address and waits until it is provisioned.
    pub async fn create(mut self) -> Result<PublicIpAddress> {
        check_region(&self.draft.inner.location, self.draft.name())?;
        self.reconcile();
        self.draft.submit().await
    }

    /// Applies the update and waits until it completes.
    pub async fn apply(mut self) -> Result<PublicIpAddress> {
        self.reconcile();
        self.draft.submit().await
    }

    fn dns_settings(&mut self) -> &mut PublicIpAddressDnsSettings {
        self.draft
            .inner
            .properties
            .dns_settings
            .get_or_insert_with(PublicIpAddressDnsSettings::new)
    }

    fn reconcile(&mut self) {
        let is_standard = self
            .draft
            .inner
            .sku
            .as_ref()
            .and_then(|s| s.name.as_ref())
            .is_some_and(|n| n.matches(&PublicIpAddressSkuName::STANDARD));
        let properties = &mut self.draft.inner.properties;
        if is_standard {
            properties.public_ip_allocation_method = Some(IpAllocationMethod::STATIC);
        } else if properties.public_ip_allocation_method.is_none() {
            properties.public_ip_allocation_method = Some(IpAllocationMethod::DYNAMIC);
        }
        if properties
            .dns_settings
            .as_ref()
            .is_some_and(|d| d.domain_name_label.is_none() && d.reverse_fqdn.is_none())
        {
            properties.dns_settings = None;
        }
    }
}
