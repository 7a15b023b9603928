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
    check_region, definition_setters, find, remove, upsert, wrapper,
};
use crate::Result;
use crate::model::*;

/// The lowest (most important) priority for security rules.
pub const MIN_PRIORITY: i32 = 100;

/// The highest (least important) priority for security rules.
pub const MAX_PRIORITY: i32 = 4096;

const ANY: &str = "*";

/// The network security groups in a subscription.
pub type NetworkSecurityGroups = Collection<NetworkSecurityGroup>;

/// A network security group.
#[derive(Clone, Debug)]
pub struct NetworkSecurityGroup {
    manager: NetworkManager,
    inner: crate::model::NetworkSecurityGroup,
}

wrapper!(NetworkSecurityGroup, crate::model::NetworkSecurityGroup, network_security_groups);

impl NetworkSecurityGroup {
    /// The rules defined by the user.
    pub fn security_rules(&self) -> &[SecurityRule] {
        &self.inner.properties.security_rules
    }

    pub fn security_rule(&self, name: &str) -> Option<&SecurityRule> {
        find(&self.inner.properties.security_rules, name)
    }

    /// The rules created by the service.
    pub fn default_security_rules(&self) -> &[SecurityRule] {
        &self.inner.properties.default_security_rules
    }

    /// The ids of the network interfaces associated with this group.
    pub fn network_interface_ids(&self) -> impl Iterator<Item = &str> {
        self.inner
            .properties
            .network_interfaces
            .iter()
            .map(|r| r.id.as_str())
    }

    /// The ids of the subnets associated with this group.
    pub fn subnet_ids(&self) -> impl Iterator<Item = &str> {
        self.inner.properties.subnets.iter().map(|r| r.id.as_str())
    }

    /// Starts an update of this network security group.
    pub fn update(self) -> NetworkSecurityGroupUpdate {
        NetworkSecurityGroupDefinition {
            draft: Draft::existing(self.manager, self.inner),
        }
    }
}

impl Collection<NetworkSecurityGroup> {
    /// Starts the definition of a new network security group.
    pub fn define<T: Into<String>>(&self, name: T) -> NetworkSecurityGroupDefinition {
        NetworkSecurityGroupDefinition {
            draft: Draft::new(
                self.manager.clone(),
                crate::model::NetworkSecurityGroup::new().set_name(name),
            ),
        }
    }
}

/// The definition of a new network security group.
///
/// Rules must set their access and direction. Rules without a priority get
/// the lowest unused priority, starting at [MIN_PRIORITY]. Rules without
/// protocols, ports, or addresses match any value.
#[derive(Clone, Debug)]
pub struct NetworkSecurityGroupDefinition {
    draft: Draft<crate::model::NetworkSecurityGroup>,
}

/// Updates use the same setters as new definitions.
pub type NetworkSecurityGroupUpdate = NetworkSecurityGroupDefinition;

impl Definition for NetworkSecurityGroupDefinition {
    type Model = crate::model::NetworkSecurityGroup;
}

impl NetworkSecurityGroupDefinition {
    definition_setters!();

    /// Starts the definition of a new security rule.
    pub fn define_rule<T: Into<String>>(self, name: T) -> ChildDefinition<Self, SecurityRule> {
        ChildDefinition::new(self, SecurityRule::new().set_name(name))
    }

    /// Starts the update of a security rule, or the definition of a new one if
    /// the rule does not exist.
    pub fn update_rule(self, name: &str) -> ChildDefinition<Self, SecurityRule> {
        let rule = find(&self.draft.inner.properties.security_rules, name)
            .cloned()
            .unwrap_or_else(|| SecurityRule::new().set_name(name));
        ChildDefinition::new(self, rule)
    }

    pub fn without_rule(mut self, name: &str) -> Self {
        remove(&mut self.draft.inner.properties.security_rules, name);
        self
    }

    /// Creates the security group and waits until it is provisioned.
    pub async fn create(mut self) -> Result<NetworkSecurityGroup> {
        check_region(&self.draft.inner.location, self.draft.name())?;
        self.reconcile()?;
        self.draft.submit().await
    }

    /// Applies the update and waits until it completes.
    pub async fn apply(mut self) -> Result<NetworkSecurityGroup> {
        self.reconcile()?;
        self.draft.submit().await
    }

    fn reconcile(&mut self) -> Result<()> {
        let rules = &mut self.draft.inner.properties.security_rules;
        for rule in rules.iter() {
            let properties = &rule.properties;
            if properties.access.is_none() || properties.direction.is_none() {
                return Err(DefinitionError::Incomplete {
                    resource: rule.name.clone(),
                    what: "an access and a direction",
                }
                .into());
            }
            if let Some(priority) = properties
                .priority
                .filter(|p| !(MIN_PRIORITY..=MAX_PRIORITY).contains(p))
            {
                return Err(DefinitionError::InvalidPriority {
                    name: rule.name.clone(),
                    priority,
                }
                .into());
            }
        }

        let mut used = rules
            .iter()
            .filter_map(|r| r.properties.priority)
            .collect::<std::collections::BTreeSet<_>>();
        for rule in rules.iter_mut() {
            let properties = &mut rule.properties;
            if properties.priority.is_none() {
                let priority = (MIN_PRIORITY..=MAX_PRIORITY)
                    .find(|p| !used.contains(p))
                    .ok_or_else(|| DefinitionError::InvalidPriority {
                        name: rule.name.clone(),
                        priority: MAX_PRIORITY + 1,
                    })?;
                tracing::debug!(rule = %rule.name, priority, "assigning rule priority");
                used.insert(priority);
                properties.priority = Some(priority);
            }
            properties
                .protocol
                .get_or_insert(SecurityRuleProtocol::ANY);
            for value in [
                &mut properties.source_port_range,
                &mut properties.destination_port_range,
                &mut properties.source_address_prefix,
                &mut properties.destination_address_prefix,
            ] {
                value.get_or_insert_with(|| ANY.to_string());
            }
        }
        Ok(())
    }
}

impl Attach<SecurityRule> for NetworkSecurityGroupDefinition {
    fn attach_child(&mut self, child: SecurityRule) {
        upsert(&mut self.draft.inner.properties.security_rules, child);
    }
}

impl ChildDefinition<NetworkSecurityGroupDefinition, SecurityRule> {
    pub fn allow_inbound(self) -> Self {
        self.with_access(Access::ALLOW, Direction::INBOUND)
    }

    pub fn allow_outbound(self) -> Self {
        self.with_access(Access::ALLOW, Direction::OUTBOUND)
    }

    pub fn deny_inbound(self) -> Self {
        self.with_access(Access::DENY, Direction::INBOUND)
    }

    pub fn deny_outbound(self) -> Self {
        self.with_access(Access::DENY, Direction::OUTBOUND)
    }

    /// Matches traffic from an address prefix, in CIDR notation, or a
    /// service tag such as `Internet`.
    pub fn from_address<T: Into<String>>(mut self, cidr: T) -> Self {
        self.inner.properties.source_address_prefix = Some(cidr.into());
        self
    }

    pub fn from_any_address(self) -> Self {
        self.from_address(ANY)
    }

    pub fn from_port(mut self, port: i32) -> Self {
        self.inner.properties.source_port_range = Some(port.to_string());
        self
    }

    pub fn from_port_range(mut self, from: i32, to: i32) -> Self {
        self.inner.properties.source_port_range = Some(format!("{from}-{to}"));
        self
    }

    pub fn from_any_port(mut self) -> Self {
        self.inner.properties.source_port_range = Some(ANY.to_string());
        self
    }

    pub fn to_address<T: Into<String>>(mut self, cidr: T) -> Self {
        self.inner.properties.destination_address_prefix = Some(cidr.into());
        self
    }

    pub fn to_any_address(self) -> Self {
        self.to_address(ANY)
    }

    pub fn to_port(mut self, port: i32) -> Self {
        self.inner.properties.destination_port_range = Some(port.to_string());
        self
    }

    pub fn to_port_range(mut self, from: i32, to: i32) -> Self {
        self.inner.properties.destination_port_range = Some(format!("{from}-{to}"));
        self
    }

    pub fn to_any_port(mut self) -> Self {
        self.inner.properties.destination_port_range = Some(ANY.to_string());
        self
    }

    pub fn with_protocol<T: Into<SecurityRuleProtocol>>(mut self, protocol: T) -> Self {
        self.inner.properties.protocol = Some(protocol.into());
        self
    }

    pub fn with_any_protocol(self) -> Self {
        self.with_protocol(SecurityRuleProtocol::ANY)
    }

    /// Sets the priority, in the [MIN_PRIORITY, MAX_PRIORITY] range. Lower
    /// values are evaluated first.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.inner.properties.priority = Some(priority);
        self
    }

    pub fn with_description<T: Into<String>>(mut self, description: T) -> Self {
        self.inner.properties.description = Some(description.into());
        self
    }

    fn with_access(mut self, access: Access, direction: Direction) -> Self {
        self.inner.properties.access = Some(access);
        self.inner.properties.direction = Some(direction);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn manager() -> NetworkManager {
        NetworkManager::from_stub("s1", super::super::tests::Unimplemented)
    }

    #[test]
    fn rule_defaults() -> anyhow::Result<()> {
        let mut definition = manager()
            .network_security_groups()
            .define("nsg1")
            .define_rule("ssh")
            .allow_inbound()
            .to_port(22)
            .with_protocol(SecurityRuleProtocol::TCP)
            .attach()
            .define_rule("web")
            .allow_inbound()
            .from_address("Internet")
            .to_port_range(80, 81)
            .with_priority(100)
            .attach()
            .define_rule("out")
            .deny_outbound()
            .attach();
        definition.reconcile()?;
        let rules = &definition.inner().properties.security_rules;

        let ssh = &rules[0].properties;
        assert_eq!(ssh.priority, Some(101));
        assert_eq!(ssh.protocol, Some(SecurityRuleProtocol::TCP));
        assert_eq!(ssh.destination_port_range.as_deref(), Some("22"));
        assert_eq!(ssh.source_port_range.as_deref(), Some("*"));
        assert_eq!(ssh.source_address_prefix.as_deref(), Some("*"));

        let web = &rules[1].properties;
        assert_eq!(web.priority, Some(100));
        assert_eq!(web.destination_port_range.as_deref(), Some("80-81"));
        assert_eq!(web.source_address_prefix.as_deref(), Some("Internet"));
        assert_eq!(web.protocol, Some(SecurityRuleProtocol::ANY));

        let out = &rules[2].properties;
        assert_eq!(out.priority, Some(102));
        assert_eq!(out.access, Some(Access::DENY));
        assert_eq!(out.direction, Some(Direction::OUTBOUND));
        Ok(())
    }

    #[test_case(99)]
    #[test_case(4097)]
    #[test_case(-1)]
    fn invalid_priority(priority: i32) {
        let mut definition = manager()
            .network_security_groups()
            .define("nsg1")
            .define_rule("rule1")
            .allow_inbound()
            .with_priority(priority)
            .attach();
        let err = definition.reconcile().unwrap_err();
        assert!(err.is_binding(), "{err:?}");
        assert!(err.to_string().contains("rule1"), "{err}");
    }

    #[test_case(100)]
    #[test_case(4096)]
    fn valid_priority(priority: i32) -> anyhow::Result<()> {
        let mut definition = manager()
            .network_security_groups()
            .define("nsg1")
            .define_rule("rule1")
            .deny_inbound()
            .with_priority(priority)
            .attach();
        definition.reconcile()?;
        Ok(())
    }

    #[test]
    fn requires_direction() {
        let mut definition = manager()
            .network_security_groups()
            .define("nsg1")
            .define_rule("rule1")
            .to_port(443)
            .attach();
        let err = definition.reconcile().unwrap_err();
        assert!(err.to_string().contains("direction"), "{err}");
    }

    #[test]
    fn update_and_remove_rules() -> anyhow::Result<()> {
        let existing = crate::model::NetworkSecurityGroup::new()
            .set_id("/subscriptions/s1/resourceGroups/rg1/providers/Microsoft.Network/networkSecurityGroups/nsg1")
            .set_name("nsg1")
            .set_properties(NetworkSecurityGroupProperties::new().set_security_rules([
                SecurityRule::new().set_name("a").set_properties(
                    SecurityRuleProperties::new()
                        .set_access(Access::ALLOW)
                        .set_direction(Direction::INBOUND)
                        .set_priority(200),
                ),
                SecurityRule::new().set_name("b"),
            ]));
        let group = NetworkSecurityGroup {
            manager: manager(),
            inner: existing,
        };
        assert!(group.security_rule("A").is_some());
        let mut update = group
            .update()
            .without_rule("b")
            .update_rule("a")
            .to_port(8080)
            .attach();
        update.reconcile()?;
        let rules = &update.inner().properties.security_rules;
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].properties.priority, Some(200));
        assert_eq!(rules[0].properties.destination_port_range.as_deref(), Some("8080"));
        Ok(())
    }
}
