//! Station name lookup.

use std::collections::HashMap;

use crate::domain::StationCode;

/// Translation between station codes and full station names.
///
/// Schedules key stops by full name while the upstream API is addressed by
/// code; the engine goes through this trait to get from one to the other.
pub trait StationDirectory {
    /// Returns true if `name` is a known full station name.
    fn is_valid_station(&self, name: &str) -> bool;

    /// Code of the station called `name`.
    fn abbreviation_for(&self, name: &str) -> Option<StationCode>;

    /// Full name of the station with code `code`.
    fn name_for(&self, code: &StationCode) -> Option<&str>;
}

/// Immutable bidirectional code ↔ name map.
#[derive(Debug, Clone, Default)]
pub struct StationNames {
    by_code: HashMap<StationCode, String>,
    by_name: HashMap<String, StationCode>,
    /// Lower-cased name → code, for matching spoken input.
    by_folded_name: HashMap<String, StationCode>,
}

impl StationNames {
    /// Build the lookup from `(code, name)` pairs.
    ///
    /// When a code or a name appears more than once the first entry wins.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (StationCode, String)>) -> Self {
        let mut names = Self::default();

        for (code, name) in pairs {
            if names.by_code.contains_key(&code) || names.by_name.contains_key(&name) {
                continue;
            }
            names
                .by_folded_name
                .entry(name.to_lowercase())
                .or_insert(code);
            names.by_name.insert(name.clone(), code);
            names.by_code.insert(code, name);
        }

        names
    }

    /// Resolve what a rider said to a station.
    ///
    /// Accepts an exact full name, a name differing only in case, or a
    /// station code.
    pub fn resolve(&self, spoken: &str) -> Option<(StationCode, &str)> {
        let spoken = spoken.trim();

        let code = self
            .by_name
            .get(spoken)
            .or_else(|| self.by_folded_name.get(&spoken.to_lowercase()))
            .copied()
            .or_else(|| {
                StationCode::parse_normalized(spoken)
                    .ok()
                    .filter(|c| self.by_code.contains_key(c))
            })?;

        let name = self.by_code.get(&code)?;
        Some((code, name.as_str()))
    }

    /// Every station as `(code, name)`, sorted by code.
    pub fn to_pairs(&self) -> Vec<(StationCode, String)> {
        let mut pairs: Vec<_> = self
            .by_code
            .iter()
            .map(|(code, name)| (*code, name.clone()))
            .collect();
        pairs.sort();
        pairs
    }

    /// Get the number of stations in the lookup.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Check if the lookup is empty.
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

impl StationDirectory for StationNames {
    fn is_valid_station(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    fn abbreviation_for(&self, name: &str) -> Option<StationCode> {
        self.by_name.get(name).copied()
    }

    fn name_for(&self, code: &StationCode) -> Option<&str> {
        self.by_code.get(code).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn names() -> StationNames {
        StationNames::from_pairs(vec![
            (code("CM"), "Chatham".to_string()),
            (code("HB"), "Hoboken".to_string()),
            (code("NY"), "New York Penn Station".to_string()),
        ])
    }

    #[test]
    fn directory_lookups() {
        let names = names();

        assert!(names.is_valid_station("Chatham"));
        assert!(!names.is_valid_station("chatham"));
        assert!(!names.is_valid_station("CM"));
        assert_eq!(names.abbreviation_for("Hoboken"), Some(code("HB")));
        assert_eq!(names.abbreviation_for("Nowhere"), None);
        assert_eq!(names.name_for(&code("NY")), Some("New York Penn Station"));
        assert_eq!(names.name_for(&code("XX")), None);
    }

    #[test]
    fn first_entry_wins() {
        let names = StationNames::from_pairs(vec![
            (code("CM"), "Chatham".to_string()),
            (code("CM"), "Other".to_string()),
            (code("CH"), "Chatham".to_string()),
        ]);

        assert_eq!(names.len(), 1);
        assert_eq!(names.name_for(&code("CM")), Some("Chatham"));
        assert_eq!(names.name_for(&code("CH")), None);
    }

    #[test]
    fn resolve_spoken_input() {
        let names = names();

        assert_eq!(names.resolve("Hoboken"), Some((code("HB"), "Hoboken")));
        assert_eq!(
            names.resolve("new york penn station"),
            Some((code("NY"), "New York Penn Station"))
        );
        assert_eq!(names.resolve(" cm "), Some((code("CM"), "Chatham")));
        assert_eq!(names.resolve("Secaucus"), None);
        assert_eq!(names.resolve("SE"), None);
    }

    #[test]
    fn pairs_sorted_by_code() {
        let pairs = names().to_pairs();

        let codes: Vec<_> = pairs.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(codes, ["CM", "HB", "NY"]);
    }
}
