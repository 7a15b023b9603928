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

//! Handling of missing path parameters.
//!
//! Resource group names, parent names and resource names are used to build
//! the request path. They are required, and a small helper makes the request
//! builders easier to read.

use crate::error::{BindingError, Error};

/// Returns the value if it is not empty, otherwise a binding error naming the
/// field.
pub fn required<'a>(field_name: &'static str, value: &'a str) -> Result<&'a str, Error> {
    if value.is_empty() {
        return Err(missing(field_name));
    }
    Ok(value)
}

/// A binding error for a missing path parameter.
pub fn missing(field_name: &'static str) -> Error {
    Error::binding(BindingError::missing(field_name))
}

/// Percent-encodes a single path segment.
pub fn encode(segment: &str) -> String {
    percent_encoding::utf8_percent_encode(segment, SEGMENT).to_string()
}

const SEGMENT: &percent_encoding::AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');
