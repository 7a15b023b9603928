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

/// The error payload returned by the resource manager.
///
/// Failed requests carry a JSON body of the form:
///
/// ```norust
/// {"error": {"code": "ResourceNotFound", "message": "...", "target": "...", "details": [...]}}
/// ```
///
/// The `code` is a string, not a number. Services define their own codes, the
/// most common are listed as associated constants.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct CloudError {
    /// A machine readable error code.
    #[serde(default)]
    pub code: String,

    /// A human readable description of the problem.
    #[serde(default)]
    pub message: String,

    /// The field or resource that caused the error, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Nested errors with more information.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<CloudError>,

    /// Service specific attachments, preserved as raw JSON.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_info: Vec<serde_json::Value>,
}

impl CloudError {
    pub const RESOURCE_NOT_FOUND: &str = "ResourceNotFound";
    pub const NOT_FOUND: &str = "NotFound";
    pub const RESOURCE_GROUP_NOT_FOUND: &str = "ResourceGroupNotFound";
    pub const CONFLICT: &str = "Conflict";
    pub const ANOTHER_OPERATION_IN_PROGRESS: &str = "AnotherOperationInProgress";
    pub const INVALID_PARAMETER: &str = "InvalidParameter";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_code<T: Into<String>>(mut self, v: T) -> Self {
        self.code = v.into();
        self
    }

    pub fn set_message<T: Into<String>>(mut self, v: T) -> Self {
        self.message = v.into();
        self
    }

    pub fn set_target<T: Into<String>>(mut self, v: T) -> Self {
        self.target = Some(v.into());
        self
    }

    pub fn set_details<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<CloudError>,
    {
        self.details = v.into_iter().map(|i| i.into()).collect();
        self
    }

    /// Returns true if the error describes a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.code.as_str(),
            Self::RESOURCE_NOT_FOUND | Self::NOT_FOUND | Self::RESOURCE_GROUP_NOT_FOUND
        )
    }

    /// Parses the error envelope in an HTTP payload.
    ///
    /// Returns `None` if the payload is not a well-formed error envelope.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        #[derive(serde::Deserialize)]
        struct Envelope {
            error: CloudError,
        }
        let envelope = serde_json::from_slice::<Envelope>(payload).ok()?;
        if envelope.error.code.is_empty() && envelope.error.message.is_empty() {
            return None;
        }
        Some(envelope.error)
    }
}

impl std::fmt::Display for CloudError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(target) = &self.target {
            write!(f, " (target: {target})")?;
        }
        Ok(())
    }
}
