//! Profile field rules.

use serde_json::Value;

/// Social link keys a profile may carry.
pub const SOCIAL_LINK_KEYS: &[&str] = &["linkedin", "github", "twitter"];

/// `validator` hook for `social_links`: a JSON object whose keys are known
/// networks and whose values are strings.
pub fn social_links_field(links: &Value) -> Result<(), validator::ValidationError> {
    let Some(map) = links.as_object() else {
        return Err(invalid("must be a JSON object"));
    };

    for (key, value) in map {
        if !SOCIAL_LINK_KEYS.contains(&key.as_str()) {
            return Err(invalid(&format!(
                "unknown network '{key}'. Must be one of: {}",
                SOCIAL_LINK_KEYS.join(", ")
            )));
        }
        if !value.is_string() {
            return Err(invalid(&format!("'{key}' must be a string")));
        }
    }
    Ok(())
}

fn invalid(message: &str) -> validator::ValidationError {
    let mut err = validator::ValidationError::new("social_links");
    err.message = Some(message.to_string().into());
    err
}
