//! Custom request extractors.

mod trimmed;
mod validated_json;

pub use trimmed::trimmed;
pub use validated_json::ValidatedJson;
