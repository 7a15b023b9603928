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

mod fake;

#[cfg(test)]
mod tests {
    use super::fake::{FakeNetwork, REGION, RESOURCE_GROUP};
    use cloud_network::NetworkManager;
    use cloud_network::fluent::NetworkWatcher;
    use cloud_network::model::{Access, NextHopType, PacketCaptureStatus};
    use pretty_assertions::assert_eq;

    type TestResult = anyhow::Result<()>;

    const VM_ID: &str =
        "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Compute/virtualMachines/vm1";
    const STORAGE_ID: &str =
        "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Storage/storageAccounts/logs1";

    async fn new_watcher(manager: &NetworkManager) -> cloud_network::Result<NetworkWatcher> {
        manager
            .network_watchers()
            .define("watcher1")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .create()
            .await
    }

    #[tokio::test]
    async fn topology() -> TestResult {
        let fake = FakeNetwork::new();
        let manager = fake.manager();
        let watcher = new_watcher(&manager).await?;
        manager
            .networks()
            .define("vnet1")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .create()
            .await?;
        manager
            .networks()
            .define("vnet2")
            .with_region(REGION)
            .with_existing_resource_group("other")
            .create()
            .await?;

        let topology = watcher.topology(RESOURCE_GROUP).await?;
        let mut names = topology
            .resources
            .iter()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>();
        names.sort();
        assert_eq!(names, vec!["vnet1", "watcher1"]);
        Ok(())
    }

    #[tokio::test]
    async fn verify_ip_flow() -> TestResult {
        let fake = FakeNetwork::new();
        let watcher = new_watcher(&fake.manager()).await?;

        let denied = watcher
            .verify_ip_flow()
            .with_target_resource_id(VM_ID)
            .inbound()
            .with_tcp()
            .with_local_ip_address("10.0.0.4")
            .with_local_port(22)
            .with_remote_ip_address("203.0.113.7")
            .execute()
            .await?;
        assert_eq!(denied.access, Some(Access::DENY));
        assert_eq!(denied.rule_name, "defaultSecurityRules/DenyAllInBound");

        let allowed = watcher
            .verify_ip_flow()
            .with_target_resource_id(VM_ID)
            .inbound()
            .with_tcp()
            .with_local_ip_address("10.0.0.4")
            .with_remote_ip_address("10.0.0.5")
            .execute()
            .await?;
        assert_eq!(allowed.access, Some(Access::ALLOW));
        Ok(())
    }

    #[tokio::test]
    async fn next_hop() -> TestResult {
        let fake = FakeNetwork::new();
        let watcher = new_watcher(&fake.manager()).await?;
        let query = watcher
            .next_hop()
            .with_target_resource_id(VM_ID)
            .with_source_ip_address("10.0.0.4");

        let hop = query.clone().with_destination_ip_address("10.0.1.4").execute().await?;
        assert_eq!(hop.next_hop_type, Some(NextHopType::VNET_LOCAL));
        let hop = query.with_destination_ip_address("8.8.8.8").execute().await?;
        assert_eq!(hop.next_hop_type, Some(NextHopType::INTERNET));
        Ok(())
    }

    #[tokio::test]
    async fn flow_logs() -> TestResult {
        let fake = FakeNetwork::new();
        let manager = fake.manager();
        let watcher = new_watcher(&manager).await?;
        let group = manager
            .network_security_groups()
            .define("nsg1")
            .with_region(REGION)
            .with_existing_resource_group(RESOURCE_GROUP)
            .create()
            .await?;

        let settings = watcher.get_flow_log_settings(group.id()).await?;
        assert!(!settings.is_enabled());
        assert_eq!(settings.target_resource_id(), group.id());

        let mut settings = settings
            .update()
            .with_logging()
            .with_storage_account(STORAGE_ID)
            .with_retention_policy_days(7)
            .apply()
            .await?;
        assert!(settings.is_enabled());
        assert_eq!(settings.storage_id(), STORAGE_ID);
        assert!(settings.is_retention_enabled());
        assert_eq!(settings.retention_days(), 7);

        settings.refresh().await?;
        assert!(settings.is_enabled());
        let settings = settings.update().without_logging().apply().await?;
        assert!(!settings.is_enabled());
        Ok(())
    }

    #[tokio::test]
    async fn packet_capture_lifecycle() -> TestResult {
        let fake = FakeNetwork::new();
        let watcher = new_watcher(&fake.manager()).await?;
        let captures = watcher.packet_captures();

        let capture = captures
            .define("capture1")
            .with_target(VM_ID)
            .with_storage_account_id(STORAGE_ID)
            .with_time_limit_in_seconds(600)
            .define_filter()
            .with_tcp()
            .with_remote_ip_addresses(["203.0.113.7", "203.0.113.8"])
            .with_local_port(443)
            .attach()
            .create()
            .await?;
        assert_eq!(capture.target_id(), VM_ID);
        assert_eq!(capture.time_limit_in_seconds(), Some(600));
        assert_eq!(capture.filters().len(), 1);
        assert_eq!(
            capture.filters()[0].remote_ip_address.as_deref(),
            Some("203.0.113.7;203.0.113.8")
        );

        let status = capture.get_status().await?;
        assert_eq!(status.packet_capture_status, Some(PacketCaptureStatus::RUNNING));
        capture.stop().await?;
        let status = capture.get_status().await?;
        assert_eq!(status.packet_capture_status, Some(PacketCaptureStatus::STOPPED));

        let names = captures
            .list()
            .await?
            .into_iter()
            .map(|c| c.name().to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["capture1"]);
        assert_eq!(captures.get_by_name("capture1").await?.id(), capture.id());

        captures.delete_by_name("capture1").await?;
        assert!(captures.list().await?.is_empty());
        let err = capture.get_status().await.unwrap_err();
        assert!(err.is_not_found(), "{err:?}");
        Ok(())
    }
}
