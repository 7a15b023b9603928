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

//! Credentials used to authenticate requests.
//!
//! The resource manager accepts OAuth2 bearer tokens. Obtaining such tokens
//! is outside the scope of this crate: applications use their identity
//! platform of choice and wrap the result in a [CredentialsProvider]. For
//! simple scripts and tests, [AccessTokenCredentials] uses a fixed token and
//! [from_env] reads it from the `CLOUD_NETWORK_ACCESS_TOKEN` environment
//! variable.

use crate::error::CredentialsError;
use http::HeaderMap;
use http::header::{AUTHORIZATION, HeaderValue};
use std::future::Future;
use std::sync::Arc;

/// The environment variable consulted by [from_env].
pub const ACCESS_TOKEN_ENV: &str = "CLOUD_NETWORK_ACCESS_TOKEN";

type Result<T> = std::result::Result<T, CredentialsError>;

/// An implementation of [CredentialsProvider].
///
/// Represents a credential used to authenticate requests.
#[derive(Clone, Debug)]
pub struct Credentials {
    // Credentials may be shared across threads, and they are cloned with the
    // clients that hold them.
    inner: Arc<dyn dynamic::CredentialsProvider>,
}

impl<T> std::convert::From<T> for Credentials
where
    T: CredentialsProvider + Send + Sync + 'static,
{
    fn from(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }
}

impl Credentials {
    /// Returns the headers to authenticate a request.
    pub async fn headers(&self) -> Result<HeaderMap> {
        self.inner.headers().await
    }
}

/// Credentials providers implement this trait.
///
/// Applications with custom token sources implement this trait and convert
/// their type into [Credentials].
pub trait CredentialsProvider: std::fmt::Debug {
    /// Asynchronously constructs the auth headers.
    ///
    /// The underlying implementation refreshes the token as needed.
    fn headers(&self) -> impl Future<Output = Result<HeaderMap>> + Send;
}

pub(crate) mod dynamic {
    use super::{HeaderMap, Result};

    /// A dyn-compatible, crate-private version of `CredentialsProvider`.
    #[async_trait::async_trait]
    pub trait CredentialsProvider: Send + Sync + std::fmt::Debug {
        async fn headers(&self) -> Result<HeaderMap>;
    }

    /// The public CredentialsProvider implements the dyn-compatible version.
    #[async_trait::async_trait]
    impl<T> CredentialsProvider for T
    where
        T: super::CredentialsProvider + Send + Sync,
    {
        async fn headers(&self) -> Result<HeaderMap> {
            T::headers(self).await
        }
    }
}

/// Credentials using a fixed bearer token.
///
/// # Example
/// ```
/// # use cloud_network_gax::credentials::{AccessTokenCredentials, Credentials};
/// # tokio_test::block_on(async {
/// let credentials = Credentials::from(AccessTokenCredentials::new("my-token"));
/// let headers = credentials.headers().await?;
/// assert!(headers.contains_key(http::header::AUTHORIZATION));
/// # anyhow::Ok(()) });
/// ```
#[derive(Clone)]
pub struct AccessTokenCredentials {
    token: String,
}

impl AccessTokenCredentials {
    pub fn new<T: Into<String>>(token: T) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for AccessTokenCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenCredentials")
            .field("token", &"[censored]")
            .finish()
    }
}

impl CredentialsProvider for AccessTokenCredentials {
    async fn headers(&self) -> Result<HeaderMap> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|e| CredentialsError::new(false, e))?;
        value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}

/// Credentials that do not add any headers.
///
/// Useful with emulators and in tests.
#[derive(Clone, Debug, Default)]
pub struct AnonymousCredentials;

impl CredentialsProvider for AnonymousCredentials {
    async fn headers(&self) -> Result<HeaderMap> {
        Ok(HeaderMap::new())
    }
}

/// Returns credentials using the bearer token in `CLOUD_NETWORK_ACCESS_TOKEN`.
pub fn from_env() -> Result<Credentials> {
    match std::env::var(ACCESS_TOKEN_ENV) {
        Ok(token) if !token.is_empty() => Ok(AccessTokenCredentials::new(token).into()),
        _ => Err(CredentialsError::from_msg(
            false,
            format!("the {ACCESS_TOKEN_ENV} environment variable is not set"),
        )),
    }
}
