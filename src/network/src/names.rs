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

//! Helpers to generate resource names and DNS labels.

use rand::Rng;

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// The maximum length of a DNS label.
pub const MAX_DNS_LABEL_LEN: usize = 63;

/// Returns `prefix` followed by random lowercase letters and digits.
///
/// The result is at most `max_len` characters long. The prefix is truncated
/// if needed, so at least a few random characters are always included.
pub fn random_resource_name(prefix: &str, max_len: usize) -> String {
    random_resource_name_with(&mut rand::rng(), prefix, max_len)
}

fn random_resource_name_with<R: Rng>(rng: &mut R, prefix: &str, max_len: usize) -> String {
    const MIN_RANDOM: usize = 5;
    let keep = prefix
        .chars()
        .take(max_len.saturating_sub(MIN_RANDOM))
        .collect::<String>();
    let random = (keep.len()..max_len).map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char);
    keep.chars().chain(random).collect()
}

/// Returns true if `label` is a valid DNS label.
///
/// Valid labels start with a lowercase letter, end with a letter or digit,
/// contain only lowercase letters, digits and hyphens, and are at most 63
/// characters long.
pub fn is_valid_dns_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    bytes.len() <= MAX_DNS_LABEL_LEN
        && first.is_ascii_lowercase()
        && (last.is_ascii_lowercase() || last.is_ascii_digit())
        && bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

/// Derives a DNS label from a resource name.
///
/// Lowercases the name, drops characters not allowed in labels, and
/// truncates the result. Returns `None` if nothing usable remains.
pub fn dns_label_from(name: &str) -> Option<String> {
    let label = name
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .skip_while(|c| !c.is_ascii_lowercase())
        .take(MAX_DNS_LABEL_LEN)
        .collect::<String>();
    let label = label.trim_end_matches('-').to_string();
    is_valid_dns_label(&label).then_some(label)
}
