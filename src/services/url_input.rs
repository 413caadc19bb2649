//! Address bar input handling: scheme normalization and validation.

use url::Url;

use crate::types::errors::NavigationError;

/// Turns raw address-bar text into the absolute URL that gets recorded and rendered.
///
/// Text without an `http://` or `https://` prefix is treated as `https://`.
/// The returned string is the normalized text itself, not a re-serialized
/// `Url`, so history keys match what the user typed.
pub fn normalize_input(raw: &str) -> Result<String, NavigationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NavigationError::EmptyInput);
    }

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    Url::parse(&candidate).map_err(|e| NavigationError::InvalidUrl(format!("{}: {}", trimmed, e)))?;
    Ok(candidate)
}
