//! Geographic reference data: federative units and municipalities.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Brazilian federative unit, keyed by its two-letter code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GeoState {
    #[schema(example = "SP")]
    pub id: String,
    #[schema(example = "São Paulo")]
    pub name: String,
}

/// Municipality, keyed by its IBGE code when it came from IBGE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Municipality {
    #[schema(example = "3509502")]
    pub id: String,
    #[schema(example = "Campinas")]
    pub name: String,
    #[schema(example = "SP")]
    pub state_id: String,
}

/// Optional state/municipality narrowing for listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFilter {
    pub state: Option<String>,
    pub municipality: Option<String>,
}

impl LocationFilter {
    pub fn new(state: Option<String>, municipality: Option<String>) -> Self {
        Self {
            state: state.filter(|s| !s.is_empty()),
            municipality: municipality.filter(|m| !m.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.municipality.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_strings_do_not_filter() {
        let filter = LocationFilter::new(Some(String::new()), Some(String::new()));
        assert!(filter.is_empty());

        let filter = LocationFilter::new(Some("SP".into()), None);
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_municipality_serializes_state_id() {
        let json = serde_json::to_value(Municipality {
            id: "3550308".into(),
            name: "São Paulo".into(),
            state_id: "SP".into(),
        })
        .unwrap();
        assert_eq!(json["stateId"], "SP");
    }
}
