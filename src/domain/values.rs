//! Small value helpers shared by the domain types.

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

/// Two-letter federative unit code, any case.
pub static STATE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]{2}$").unwrap());

/// State code, or empty for "no state".
pub static STATE_CODE_OR_EMPTY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^$|^[A-Za-z]{2}$").unwrap());

/// Absolute http(s) URL, or empty for "no image".
pub static IMAGE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^$|^https?://\S+$").unwrap());

/// Parse an opaque identifier.
///
/// Returns `None` for anything that is not a well-formed UUID; callers
/// decide whether that means "absent" or "invalid".
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}

/// Treat empty or whitespace-only text as missing.
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Upper-case a state code, rejecting anything that is not two letters.
pub fn normalize_state_code(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    STATE_CODE
        .is_match(trimmed)
        .then(|| trimmed.to_ascii_uppercase())
}
