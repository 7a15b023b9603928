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

//! Responses from the resource manager.
//!
//! Most applications only need the body. The headers carry the ids used to
//! troubleshoot a request with support, and the hints the service sends to
//! pace retries and long-running operations.

use http::HeaderMap;
use std::time::Duration;

/// The service-assigned id of the request.
pub const REQUEST_ID_HEADER: &str = "x-ms-request-id";
/// The id shared by all the requests of a single deployment or operation.
pub const CORRELATION_ID_HEADER: &str = "x-ms-correlation-request-id";
/// The id chosen by the client, echoed by the service.
pub const CLIENT_REQUEST_ID_HEADER: &str = "x-ms-client-request-id";
/// The status monitor of an asynchronous operation.
pub const ASYNC_OPERATION_HEADER: &str = "azure-asyncoperation";
/// Like `Retry-After`, in milliseconds.
pub const RETRY_AFTER_MS_HEADER: &str = "x-ms-retry-after-ms";

/// A response from the service.
///
/// # Example
/// ```
/// # use cloud_network_gax::response::Response;
/// let response = Response::from("body".to_string());
/// assert_eq!(response.body().as_str(), "body");
/// assert!(response.request_id().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Response<T> {
    parts: Parts,
    body: T,
}

impl<T> Response<T> {
    /// Creates a response without headers.
    pub fn from(body: T) -> Self {
        Self {
            body,
            parts: Parts::default(),
        }
    }

    pub fn from_parts(parts: Parts, body: T) -> Self {
        Self { parts, body }
    }

    pub fn parts(&self) -> &Parts {
        &self.parts
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    pub fn body(&self) -> &T {
        &self.body
    }

    pub fn into_parts(self) -> (Parts, T) {
        (self.parts, self.body)
    }

    pub fn into_body(self) -> T {
        self.body
    }

    /// The service request id, useful when troubleshooting with support.
    pub fn request_id(&self) -> Option<&str> {
        self.parts.request_id()
    }

    /// The correlation id, shared with any requests this one triggered.
    pub fn correlation_id(&self) -> Option<&str> {
        self.parts.correlation_id()
    }
}

/// The headers of a response.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct Parts {
    pub headers: HeaderMap,
}

impl Parts {
    pub fn new() -> Self {
        Parts::default()
    }

    pub fn set_headers<V>(mut self, v: V) -> Self
    where
        V: Into<HeaderMap>,
    {
        self.headers = v.into();
        self
    }

    pub fn request_id(&self) -> Option<&str> {
        header(&self.headers, REQUEST_ID_HEADER)
    }

    pub fn correlation_id(&self) -> Option<&str> {
        header(&self.headers, CORRELATION_ID_HEADER)
    }

    /// Where to poll for the result of an accepted (`202`) request.
    pub fn location(&self) -> Option<&str> {
        header(&self.headers, http::header::LOCATION.as_str())
    }

    /// The status monitor of an asynchronous `PUT` or `DELETE`.
    pub fn async_operation(&self) -> Option<&str> {
        header(&self.headers, ASYNC_OPERATION_HEADER)
    }

    /// How long the service asks the client to wait before the next request.
    pub fn retry_after(&self) -> Option<Duration> {
        retry_after(&self.headers)
    }
}

/// Parses the retry hint in `headers`.
///
/// The service sends `x-ms-retry-after-ms` with throttling errors and
/// `Retry-After` in seconds with throttling errors and accepted operations.
/// The millisecond header is preferred when both are present. Dates in
/// `Retry-After` are ignored.
pub fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let parse = |name: &str| header(headers, name).and_then(|v| v.trim().parse::<u64>().ok());
    parse(RETRY_AFTER_MS_HEADER)
        .map(Duration::from_millis)
        .or_else(|| parse(http::header::RETRY_AFTER.as_str()).map(Duration::from_secs))
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use test_case::test_case;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        pairs
            .iter()
            .map(|(k, v)| (http::HeaderName::from_static(k), HeaderValue::from_static(v)))
            .collect()
    }

    #[test]
    fn without_headers() {
        let response = Response::from(vec![1, 2, 3]);
        assert!(response.headers().is_empty());
        assert_eq!(response.request_id(), None);
        assert_eq!(response.correlation_id(), None);
        assert_eq!(response.parts().location(), None);
        assert_eq!(response.parts().retry_after(), None);
        assert_eq!(response.into_body(), vec![1, 2, 3]);
    }

    #[test]
    fn tracking_ids() {
        let parts = Parts::new().set_headers(headers(&[
            ("x-ms-request-id", "req-123"),
            ("x-ms-correlation-request-id", "corr-456"),
        ]));
        let response = Response::from_parts(parts, "vnet1");
        assert_eq!(response.request_id(), Some("req-123"));
        assert_eq!(response.correlation_id(), Some("corr-456"));

        let (parts, body) = response.into_parts();
        assert_eq!(body, "vnet1");
        assert_eq!(parts.headers.len(), 2);
    }

    #[test]
    fn operation_headers() {
        let parts = Parts::new().set_headers(headers(&[
            ("location", "https://management.azure.com/operationResults/op1"),
            ("azure-asyncoperation", "https://management.azure.com/operations/op1"),
        ]));
        assert_eq!(
            parts.location(),
            Some("https://management.azure.com/operationResults/op1")
        );
        assert_eq!(
            parts.async_operation(),
            Some("https://management.azure.com/operations/op1")
        );
        let empty = Parts::new().set_headers(headers(&[("location", "")]));
        assert_eq!(empty.location(), None);
    }

    #[test_case(&[("retry-after", "17")], Some(Duration::from_secs(17)); "seconds")]
    #[test_case(&[("retry-after", " 3 ")], Some(Duration::from_secs(3)); "padded")]
    #[test_case(&[("x-ms-retry-after-ms", "250")], Some(Duration::from_millis(250)); "millis")]
    #[test_case(&[("retry-after", "5"), ("x-ms-retry-after-ms", "250")], Some(Duration::from_millis(250)); "millis first")]
    #[test_case(&[("retry-after", "Wed, 21 Oct 2015 07:28:00 GMT")], None; "date")]
    #[test_case(&[("retry-after", "-1")], None; "negative")]
    #[test_case(&[], None; "missing")]
    fn retry_hints(pairs: &[(&'static str, &'static str)], want: Option<Duration>) {
        assert_eq!(retry_after(&headers(pairs)), want);
        assert_eq!(Parts::new().set_headers(headers(pairs)).retry_after(), want);
    }
}
