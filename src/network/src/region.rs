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

//! Regions where resources are created.
//!
//! The service returns region names in canonical form (`eastus`), but
//! accepts display names (`East US`) too. [Region] converts both to the
//! canonical form, so regions can be compared.

use std::borrow::Cow;
use std::collections::HashMap;

/// A region, in canonical form.
///
/// # Example
/// ```
/// # use cloud_network::region::Region;
/// assert_eq!(Region::from("East US 2"), Region::US_EAST2);
/// assert_eq!(Region::US_EAST2.label(), Some("East US 2"));
/// assert_eq!(Region::from("mars-central").name(), "mars-central");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Region(Cow<'static, str>);

impl Region {
    pub const US_EAST: Region = Region(Cow::Borrowed("eastus"));
    pub const US_EAST2: Region = Region(Cow::Borrowed("eastus2"));
    pub const US_WEST: Region = Region(Cow::Borrowed("westus"));
    pub const US_WEST2: Region = Region(Cow::Borrowed("westus2"));
    pub const US_CENTRAL: Region = Region(Cow::Borrowed("centralus"));
    pub const US_NORTH_CENTRAL: Region = Region(Cow::Borrowed("northcentralus"));
    pub const US_SOUTH_CENTRAL: Region = Region(Cow::Borrowed("southcentralus"));
    pub const US_WEST_CENTRAL: Region = Region(Cow::Borrowed("westcentralus"));
    pub const CANADA_CENTRAL: Region = Region(Cow::Borrowed("canadacentral"));
    pub const CANADA_EAST: Region = Region(Cow::Borrowed("canadaeast"));
    pub const BRAZIL_SOUTH: Region = Region(Cow::Borrowed("brazilsouth"));
    pub const EUROPE_NORTH: Region = Region(Cow::Borrowed("northeurope"));
    pub const EUROPE_WEST: Region = Region(Cow::Borrowed("westeurope"));
    pub const UK_SOUTH: Region = Region(Cow::Borrowed("uksouth"));
    pub const UK_WEST: Region = Region(Cow::Borrowed("ukwest"));
    pub const ASIA_EAST: Region = Region(Cow::Borrowed("eastasia"));
    pub const ASIA_SOUTHEAST: Region = Region(Cow::Borrowed("southeastasia"));
    pub const JAPAN_EAST: Region = Region(Cow::Borrowed("japaneast"));
    pub const JAPAN_WEST: Region = Region(Cow::Borrowed("japanwest"));
    pub const AUSTRALIA_EAST: Region = Region(Cow::Borrowed("australiaeast"));
    pub const AUSTRALIA_SOUTHEAST: Region = Region(Cow::Borrowed("australiasoutheast"));
    pub const INDIA_CENTRAL: Region = Region(Cow::Borrowed("centralindia"));
    pub const INDIA_SOUTH: Region = Region(Cow::Borrowed("southindia"));
    pub const INDIA_WEST: Region = Region(Cow::Borrowed("westindia"));
    pub const KOREA_CENTRAL: Region = Region(Cow::Borrowed("koreacentral"));
    pub const KOREA_SOUTH: Region = Region(Cow::Borrowed("koreasouth"));

    /// The canonical name, used in requests.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The display name, for well-known regions.
    pub fn label(&self) -> Option<&'static str> {
        KNOWN
            .iter()
            .find(|(r, _)| r.name() == self.name())
            .map(|(_, label)| *label)
    }

    /// All the well-known regions.
    pub fn values() -> impl Iterator<Item = &'static Region> {
        KNOWN.iter().map(|(r, _)| r)
    }
}

const KNOWN: &[(Region, &str)] = &[
    (Region::US_EAST, "East US"),
    (Region::US_EAST2, "East US 2"),
    (Region::US_WEST, "West US"),
    (Region::US_WEST2, "West US 2"),
    (Region::US_CENTRAL, "Central US"),
    (Region::US_NORTH_CENTRAL, "North Central US"),
    (Region::US_SOUTH_CENTRAL, "South Central US"),
    (Region::US_WEST_CENTRAL, "West Central US"),
    (Region::CANADA_CENTRAL, "Canada Central"),
    (Region::CANADA_EAST, "Canada East"),
    (Region::BRAZIL_SOUTH, "Brazil South"),
    (Region::EUROPE_NORTH, "North Europe"),
    (Region::EUROPE_WEST, "West Europe"),
    (Region::UK_SOUTH, "UK South"),
    (Region::UK_WEST, "UK West"),
    (Region::ASIA_EAST, "East Asia"),
    (Region::ASIA_SOUTHEAST, "Southeast Asia"),
    (Region::JAPAN_EAST, "Japan East"),
    (Region::JAPAN_WEST, "Japan West"),
    (Region::AUSTRALIA_EAST, "Australia East"),
    (Region::AUSTRALIA_SOUTHEAST, "Australia Southeast"),
    (Region::INDIA_CENTRAL, "Central India"),
    (Region::INDIA_SOUTH, "South India"),
    (Region::INDIA_WEST, "West India"),
    (Region::KOREA_CENTRAL, "Korea Central"),
    (Region::KOREA_SOUTH, "Korea South"),
];

lazy_static::lazy_static! {
    // Display names and canonical names, lowercased and without spaces.
    static ref BY_KEY: HashMap<String, &'static Region> = KNOWN
        .iter()
        .flat_map(|(r, label)| [(canonical(label), r), (canonical(r.name()), r)])
        .collect();
}

fn canonical(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

impl std::convert::From<&str> for Region {
    fn from(value: &str) -> Self {
        let key = canonical(value);
        match BY_KEY.get(&key) {
            Some(r) => (*r).clone(),
            None => Region(Cow::Owned(key)),
        }
    }
}

impl std::convert::From<String> for Region {
    fn from(value: String) -> Self {
        Region::from(value.as_str())
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("eastus", Region::US_EAST)]
    #[test_case("East US", Region::US_EAST)]
    #[test_case("EASTUS", Region::US_EAST)]
    #[test_case("West Europe", Region::EUROPE_WEST)]
    #[test_case(" korea central ", Region::KOREA_CENTRAL)]
    fn from_str(input: &str, want: Region) {
        assert_eq!(Region::from(input), want);
    }

    #[test]
    fn unknown() {
        let got = Region::from("Mars Central");
        assert_eq!(got.name(), "marscentral");
        assert_eq!(got.label(), None);
        assert_eq!(got.to_string(), "marscentral");
    }

    #[test]
    fn values() {
        assert!(Region::values().any(|r| r == &Region::UK_WEST));
        for r in Region::values() {
            assert!(r.label().is_some(), "{r}");
            assert_eq!(&Region::from(r.name()), r);
        }
    }
}
