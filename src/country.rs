//! Country records and the search predicate over them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single country as served by the source endpoint.
///
/// All four fields are required on the wire; extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub region: String,
    pub code: String,
    pub capital: String,
}

impl Country {
    /// Spoken description of a row, e.g. "Japan, Asia. Code JP. Capital Tokyo"
    pub fn accessibility_label(&self) -> String {
        format!(
            "{}, {}. Code {}. Capital {}",
            self.name, self.region, self.code, self.capital
        )
    }

    /// Check whether an already-lowercased term occurs in the name or capital.
    ///
    /// Region and code are deliberately not searched.
    fn matches_lowercase(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term) || self.capital.to_lowercase().contains(term)
    }
}

/// The payload did not have the shape of a country array
#[derive(Debug, Error)]
#[error("Failed to decode countries: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Decode a JSON array of countries, preserving server order.
pub fn decode_countries(bytes: &[u8]) -> Result<Vec<Country>, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Normalize a raw search query.
///
/// Returns `None` for a missing, empty or whitespace-only query, otherwise the
/// trimmed and lowercased term.
pub fn normalize_query(query: Option<&str>) -> Option<String> {
    let term = query.unwrap_or_default().trim();
    if term.is_empty() {
        None
    } else {
        Some(term.to_lowercase())
    }
}

/// Filter countries by a case-insensitive substring of name or capital.
///
/// A blank query keeps every country. Order is always preserved.
pub fn filter_countries(countries: &[Country], query: Option<&str>) -> Vec<Country> {
    match normalize_query(query) {
        None => countries.to_vec(),
        Some(term) => countries
            .iter()
            .filter(|c| c.matches_lowercase(&term))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn country(name: &str, code: &str, capital: &str, region: &str) -> Country {
        Country {
            name: name.to_string(),
            region: region.to_string(),
            code: code.to_string(),
            capital: capital.to_string(),
        }
    }

    pub(crate) fn sample() -> Vec<Country> {
        vec![
            country("Canada", "CA", "Ottawa", "Americas"),
            country("Cameroon", "CM", "Yaounde", "Africa"),
            country("Japan", "JP", "Tokyo", "Asia"),
        ]
    }

    fn names(list: &[Country]) -> Vec<&str> {
        list.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let json = br#"[
            {"name": "Alpha", "code": "AA", "capital": "A City", "region": "A Region",
             "currency": {"code": "AAD"}, "flag": "https://example.com/aa.svg"},
            {"name": "Beta", "code": "BB", "capital": "B City", "region": "B Region"}
        ]"#;

        let countries = decode_countries(json).unwrap();
        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0], country("Alpha", "AA", "A City", "A Region"));
        assert_eq!(countries[1].name, "Beta");
    }

    #[test]
    fn test_decode_rejects_missing_field() {
        let json = br#"[{"name": "Alpha", "code": "AA", "region": "A Region"}]"#;
        let err = decode_countries(json).unwrap_err();
        assert!(err.to_string().contains("capital"), "unexpected error: {}", err);
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        assert!(decode_countries(br#"{"name": "Alpha"}"#).is_err());
        let wrong_type = br#"[{"name": 1, "code": "AA", "capital": "C", "region": "R"}]"#;
        assert!(decode_countries(wrong_type).is_err());
        assert!(decode_countries(b"not json").is_err());
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(decode_countries(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query(None), None);
        assert_eq!(normalize_query(Some("")), None);
        assert_eq!(normalize_query(Some(" \t\n ")), None);
        assert_eq!(normalize_query(Some("  CaN ")), Some("can".to_string()));
    }

    #[test]
    fn test_filter_by_name_or_capital() {
        let countries = sample();
        assert_eq!(names(&filter_countries(&countries, Some("ca"))), ["Canada", "Cameroon"]);
        assert_eq!(names(&filter_countries(&countries, Some("yo"))), ["Japan"]);
        assert_eq!(names(&filter_countries(&countries, Some("OTTAWA"))), ["Canada"]);
    }

    #[test]
    fn test_filter_ignores_region_and_code() {
        let countries = sample();
        assert!(filter_countries(&countries, Some("asia")).is_empty());
        assert!(filter_countries(&countries, Some("jp")).is_empty());
    }

    #[test]
    fn test_filter_blank_query_keeps_all() {
        let countries = sample();
        assert_eq!(filter_countries(&countries, None), countries);
        assert_eq!(filter_countries(&countries, Some("")), countries);
        assert_eq!(filter_countries(&countries, Some("   ")), countries);
    }

    #[test]
    fn test_accessibility_label() {
        let japan = country("Japan", "JP", "Tokyo", "Asia");
        assert_eq!(japan.accessibility_label(), "Japan, Asia. Code JP. Capital Tokyo");
    }
}
