//! Artifact timestamps

use chrono::Utc;

/// Use the caller's timestamp when given, otherwise the current UTC time.
pub fn resolve_generated_at(generated_at: Option<&str>) -> String {
    match generated_at {
        Some(ts) => ts.to_string(),
        None => Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string(),
    }
}
