//! Serde helpers that trim text fields before validation sees them.

use serde::{Deserialize, Deserializer};

/// Deserialize a string with surrounding whitespace removed.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Form {
        #[serde(deserialize_with = "trimmed")]
        name: String,
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        let form: Form = serde_json::from_str(r#"{"name": "   "}"#).unwrap();
        assert_eq!(form.name, "");
    }

    #[test]
    fn test_missing_field_uses_default() {
        let form: Form = serde_json::from_str("{}").unwrap();
        assert_eq!(form.name, "");

        let form: Form = serde_json::from_str(r#"{"name": " Ana "}"#).unwrap();
        assert_eq!(form.name, "Ana");
    }
}
