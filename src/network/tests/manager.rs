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

#[cfg(test)]
mod tests {
    use cloud_network::NetworkManager;
    use gax::client_builder::SUBSCRIPTION_ENV;
    use gax::credentials::AccessTokenCredentials;
    use httptest::{Expectation, Server, matchers::*, responders::*};
    use scoped_env::ScopedEnv;
    use serde_json::json;
    use serial_test::serial;

    type TestResult = anyhow::Result<()>;

    const RG_PATH: &str = "/subscriptions/env-sub/resourceGroups/rg1/providers/Microsoft.Network";

    async fn manager(server: &Server) -> anyhow::Result<NetworkManager> {
        let manager = NetworkManager::builder()
            .with_endpoint(format!("http://{}", server.addr()))
            .with_credentials(AccessTokenCredentials::new("token1"))
            .with_tracing()
            .build()
            .await?;
        Ok(manager)
    }

    #[tokio::test]
    #[serial]
    async fn subscription_from_env() -> TestResult {
        let _e = ScopedEnv::set(SUBSCRIPTION_ENV, "env-sub");
        let _guard = tracing::subscriber::set_default(
            tracing_subscriber::fmt().with_test_writer().finish(),
        );

        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PUT", format!("{RG_PATH}/virtualNetworks/vnet1")),
                request::headers(contains(("authorization", "Bearer token1"))),
                request::body(json_decoded(|body: &serde_json::Value| {
                    body["location"] == "westus"
                        && body["properties"]["addressSpace"]["addressPrefixes"]
                            == json!(["10.0.0.0/16"])
                })),
            ])
            .respond_with(json_encoded(json!({
                "id": format!("{RG_PATH}/virtualNetworks/vnet1"),
                "name": "vnet1",
                "location": "westus",
                "properties": {
                    "addressSpace": {"addressPrefixes": ["10.0.0.0/16"]},
                    "subnets": [{
                        "id": format!("{RG_PATH}/virtualNetworks/vnet1/subnets/subnet1"),
                        "name": "subnet1",
                        "properties": {"addressPrefix": "10.0.0.0/16"}
                    }],
                    "provisioningState": "Succeeded"
                }
            }))),
        );

        let manager = manager(&server).await?;
        assert_eq!(manager.subscription(), "env-sub");
        let network = manager
            .networks()
            .define("vnet1")
            .with_region("westus")
            .with_existing_resource_group("rg1")
            .create()
            .await?;
        assert_eq!(network.resource_group_name(), "rg1");
        assert!(network.subnet("subnet1").is_some());
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn subscription_missing() -> TestResult {
        let _e = ScopedEnv::remove(SUBSCRIPTION_ENV);
        let err = NetworkManager::builder()
            .with_credentials(AccessTokenCredentials::new("token1"))
            .build()
            .await
            .unwrap_err();
        assert!(err.is_subscription(), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn not_found() -> TestResult {
        let _e = ScopedEnv::set(SUBSCRIPTION_ENV, "env-sub");
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path(
                "GET",
                format!("{RG_PATH}/publicIPAddresses/missing"),
            ))
            .respond_with(
                status_code(404).body(
                    json!({"error": {"code": "ResourceNotFound", "message": "not found"}})
                        .to_string(),
                ),
            ),
        );
        let manager = manager(&server).await?;
        let err = manager
            .public_ip_addresses()
            .get_by_resource_group("rg1", "missing")
            .await
            .unwrap_err();
        assert!(err.is_not_found(), "{err:?}");
        Ok(())
    }
}
