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

//! Provide types for client construction.
//!
//! Some applications need to construct clients with custom configuration,
//! for example, they may need to override the endpoint or the credentials
//! used by the client library. The client libraries use a builder to create
//! clients with such configuration.
//!
//! # Example
//! ```no_run
//! # use cloud_network_gax::client_builder::ClientBuilder;
//! # async fn sample<F, C>(builder: ClientBuilder<F>) -> anyhow::Result<()>
//! # where F: cloud_network_gax::client_builder::internal::ClientFactory<Client = C> {
//! let client = builder
//!     .with_endpoint("https://management.example.com")
//!     .with_subscription("00000000-0000-0000-0000-000000000000")
//!     .with_tracing()
//!     .build()
//!     .await?;
//! # Ok(()) }
//! ```

use crate::backoff_policy::{BackoffPolicy, BackoffPolicyArg};
use crate::credentials::Credentials;
use crate::polling_policy::{
    PollingBackoffPolicy, PollingBackoffPolicyArg, PollingErrorPolicy, PollingErrorPolicyArg,
};
use crate::retry_policy::{RetryPolicy, RetryPolicyArg};
use std::sync::Arc;

/// The default endpoint for the resource manager.
pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com";

/// The environment variable with the default subscription id.
pub const SUBSCRIPTION_ENV: &str = "CLOUD_NETWORK_SUBSCRIPTION_ID";

/// The result type for this module.
pub type Result<T> = std::result::Result<T, Error>;

/// Indicates a problem while constructing a client.
///
/// # Examples
/// ```no_run
/// # use cloud_network_gax::client_builder::Error;
/// fn handle(e: Error) {
///     if e.is_default_credentials() {
///         println!("set CLOUD_NETWORK_ACCESS_TOKEN or use with_credentials() {e}");
///     } else if e.is_subscription() {
///         println!("set CLOUD_NETWORK_SUBSCRIPTION_ID or use with_subscription() {e}");
///     }
/// }
/// ```
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    /// If true, the client could not initialize the default credentials.
    pub fn is_default_credentials(&self) -> bool {
        matches!(&self.0, ErrorKind::DefaultCredentials(_))
    }

    /// If true, the client has no subscription configured.
    pub fn is_subscription(&self) -> bool {
        matches!(&self.0, ErrorKind::Subscription)
    }

    /// If true, the client could not initialize the transport client.
    pub fn is_transport(&self) -> bool {
        matches!(&self.0, ErrorKind::Transport(_))
    }

    pub fn cred<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::DefaultCredentials(source.into()))
    }

    pub fn subscription() -> Self {
        Self(ErrorKind::Subscription)
    }

    pub fn transport<T: Into<BoxError>>(source: T) -> Self {
        Self(ErrorKind::Transport(source.into()))
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("could not create default credentials")]
    DefaultCredentials(#[source] BoxError),
    #[error("no subscription id configured, use with_subscription() or set {SUBSCRIPTION_ENV}")]
    Subscription,
    #[error("could not initialize transport client")]
    Transport(#[source] BoxError),
}

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A generic builder for clients.
///
/// Each client provides a `builder()` function returning this type with the
/// right factory.
#[derive(Clone, Debug)]
pub struct ClientBuilder<F> {
    config: internal::ClientConfig,
    factory: F,
}

impl<F> ClientBuilder<F> {
    /// Creates a new client.
    pub async fn build<C>(self) -> Result<C>
    where
        F: internal::ClientFactory<Client = C>,
    {
        self.factory.build(self.config).await
    }

    /// Sets the endpoint.
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.config.endpoint = Some(v.into());
        self
    }

    /// Sets the subscription used to build resource ids and request paths.
    pub fn with_subscription<V: Into<String>>(mut self, v: V) -> Self {
        self.config.subscription = Some(v.into());
        self
    }

    /// Enables tracing.
    ///
    /// The client libraries can be dynamically instrumented with the Tokio
    /// [tracing] framework. Setting this flag enables this instrumentation.
    ///
    /// [tracing]: https://docs.rs/tracing/latest/tracing/
    pub fn with_tracing(mut self) -> Self {
        self.config.tracing = true;
        self
    }

    /// Configure the authentication credentials.
    pub fn with_credentials<T: Into<Credentials>>(mut self, v: T) -> Self {
        self.config.cred = Some(v.into());
        self
    }

    /// Configure the retry policy.
    pub fn with_retry_policy<V: Into<RetryPolicyArg>>(mut self, v: V) -> Self {
        self.config.retry_policy = Some(v.into().into());
        self
    }

    /// Configure the retry backoff policy.
    pub fn with_backoff_policy<V: Into<BackoffPolicyArg>>(mut self, v: V) -> Self {
        self.config.backoff_policy = Some(v.into().into());
        self
    }

    /// Configure the polling error policy for long-running operations.
    pub fn with_polling_error_policy<V: Into<PollingErrorPolicyArg>>(mut self, v: V) -> Self {
        self.config.polling_error_policy = Some(v.into().0);
        self
    }

    /// Configure the polling backoff policy for long-running operations.
    pub fn with_polling_backoff_policy<V: Into<PollingBackoffPolicyArg>>(mut self, v: V) -> Self {
        self.config.polling_backoff_policy = Some(v.into().0);
        self
    }
}

#[doc(hidden)]
pub mod internal {
    use super::*;

    pub trait ClientFactory {
        type Client;
        fn build(self, config: ClientConfig) -> impl Future<Output = Result<Self::Client>>;
    }

    pub fn new_builder<F, C>(factory: F) -> super::ClientBuilder<F>
    where
        F: ClientFactory<Client = C>,
    {
        super::ClientBuilder {
            factory,
            config: ClientConfig::default(),
        }
    }

    /// Configure a client.
    #[derive(Clone, Debug, Default)]
    pub struct ClientConfig {
        pub endpoint: Option<String>,
        pub subscription: Option<String>,
        pub cred: Option<Credentials>,
        pub tracing: bool,
        pub retry_policy: Option<Arc<dyn RetryPolicy>>,
        pub backoff_policy: Option<Arc<dyn BackoffPolicy>>,
        pub polling_error_policy: Option<Arc<dyn PollingErrorPolicy>>,
        pub polling_backoff_policy: Option<Arc<dyn PollingBackoffPolicy>>,
    }

    impl ClientConfig {
        /// The configured subscription, or the value of
        /// `CLOUD_NETWORK_SUBSCRIPTION_ID`.
        pub fn resolve_subscription(&self) -> Result<String> {
            if let Some(s) = self.subscription.as_ref().filter(|s| !s.is_empty()) {
                return Ok(s.clone());
            }
            std::env::var(SUBSCRIPTION_ENV)
                .ok()
                .filter(|s| !s.is_empty())
                .ok_or_else(Error::subscription)
        }

        /// The configured credentials, or the default credentials.
        pub fn resolve_credentials(&self) -> Result<Credentials> {
            if let Some(c) = &self.cred {
                return Ok(c.clone());
            }
            crate::credentials::from_env().map_err(Error::cred)
        }

        /// The configured endpoint, or the default endpoint.
        pub fn resolve_endpoint(&self) -> String {
            self.endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::internal::*;
    use super::*;
    use crate::credentials::{ACCESS_TOKEN_ENV, AnonymousCredentials};
    use crate::exponential_backoff::ExponentialBackoff;
    use scoped_env::ScopedEnv;
    use serial_test::serial;

    #[test]
    fn error_credentials() {
        let source = std::io::Error::other("test-only");
        let error = Error::cred(source);
        assert!(error.is_default_credentials(), "{error:?}");
        assert!(error.to_string().contains("default credentials"), "{error}");
        assert!(!error.is_transport(), "{error:?}");
    }

    #[test]
    fn error_subscription() {
        let error = Error::subscription();
        assert!(error.is_subscription(), "{error:?}");
        assert!(error.to_string().contains(SUBSCRIPTION_ENV), "{error}");
    }

    #[test]
    fn error_transport() {
        let source = std::io::Error::other("test-only");
        let error = Error::transport(source);
        assert!(error.is_transport(), "{error:?}");
        assert!(error.to_string().contains("transport client"), "{error}");
        assert!(!error.is_default_credentials(), "{error:?}");
    }

    struct Factory;
    impl ClientFactory for Factory {
        type Client = ClientConfig;
        async fn build(self, config: ClientConfig) -> Result<Self::Client> {
            Ok(config)
        }
    }

    fn builder() -> ClientBuilder<Factory> {
        new_builder(Factory)
    }

    #[tokio::test]
    async fn build_defaults() {
        let config = builder().build().await.expect("building config never fails");
        assert_eq!(config.endpoint, None);
        assert_eq!(config.subscription, None);
        assert!(config.cred.is_none(), "{config:?}");
        assert!(!config.tracing);
        assert!(config.retry_policy.is_none(), "{config:?}");
        assert!(config.backoff_policy.is_none(), "{config:?}");
        assert!(config.polling_error_policy.is_none(), "{config:?}");
        assert!(config.polling_backoff_policy.is_none(), "{config:?}");
        assert_eq!(config.resolve_endpoint(), DEFAULT_ENDPOINT);
    }

    #[tokio::test]
    async fn build_with_options() {
        let config = builder()
            .with_endpoint("http://localhost:8080")
            .with_subscription("sub-123")
            .with_tracing()
            .with_credentials(AnonymousCredentials)
            .with_retry_policy(crate::retry_policy::LimitedAttemptCount::new(5))
            .with_backoff_policy(ExponentialBackoff::default())
            .with_polling_error_policy(crate::polling_policy::AlwaysContinue)
            .with_polling_backoff_policy(ExponentialBackoff::default())
            .build()
            .await
            .expect("building config never fails");
        assert_eq!(config.resolve_endpoint(), "http://localhost:8080");
        assert_eq!(config.resolve_subscription().ok().as_deref(), Some("sub-123"));
        assert!(config.resolve_credentials().is_ok());
        assert!(config.tracing);
        assert!(config.retry_policy.is_some(), "{config:?}");
        assert!(config.backoff_policy.is_some(), "{config:?}");
        assert!(config.polling_error_policy.is_some(), "{config:?}");
        assert!(config.polling_backoff_policy.is_some(), "{config:?}");
    }

    #[test]
    #[serial]
    fn subscription_from_env() {
        let _e = ScopedEnv::set(SUBSCRIPTION_ENV, "env-sub");
        let config = ClientConfig::default();
        assert_eq!(config.resolve_subscription().ok().as_deref(), Some("env-sub"));
    }

    #[test]
    #[serial]
    fn subscription_missing() {
        let _e = ScopedEnv::remove(SUBSCRIPTION_ENV);
        let config = ClientConfig::default();
        let err = config.resolve_subscription().unwrap_err();
        assert!(err.is_subscription(), "{err:?}");
    }

    #[test]
    #[serial]
    fn credentials_missing() {
        let _e = ScopedEnv::remove(ACCESS_TOKEN_ENV);
        let config = ClientConfig::default();
        let err = config.resolve_credentials().unwrap_err();
        assert!(err.is_default_credentials(), "{err:?}");
    }
}
