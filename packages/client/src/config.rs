//! Configuration constants and URL composition for the SCB API.

use crate::error::{Result, ScbError};

/// Base URL for SCB's statistical database (SSD) API.
pub const SSD_API_URL: &str = "https://api.scb.se/OV0104/v1/doris";

/// HTTP timeout in seconds.
///
/// Set to 30 seconds to accommodate large table downloads and slow connections.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Validate a language code.
///
/// The API serves each language under its own subtree ("sv", "en"), so a
/// client cannot be constructed without one.
///
/// # Arguments
/// * `language` - The language code to validate
///
/// # Returns
/// * `Ok(())` if non-empty
/// * `Err(ScbError::MissingLanguage)` otherwise
///
/// # Examples
/// ```
/// use scb_client::config::validate_language;
///
/// assert!(validate_language("sv").is_ok());
/// assert!(validate_language("").is_err());
/// ```
pub fn validate_language(language: &str) -> Result<()> {
    if language.trim().is_empty() {
        return Err(ScbError::MissingLanguage);
    }
    Ok(())
}

/// Build the API endpoint URL for a language.
///
/// # Examples
/// ```
/// use scb_client::config::endpoint_url;
///
/// assert_eq!(
///     endpoint_url("en"),
///     "https://api.scb.se/OV0104/v1/doris/en/ssd/"
/// );
/// ```
pub fn endpoint_url(language: &str) -> String {
    endpoint_url_at(SSD_API_URL, language)
}

/// Build the endpoint URL for a language against a custom base URL.
///
/// A trailing slash on `base` is tolerated.
pub fn endpoint_url_at(base: &str, language: &str) -> String {
    format!("{}/{language}/ssd/", base.trim_end_matches('/'))
}

/// Compose the full URL for a catalog path.
///
/// `endpoint` must carry its trailing slash (as produced by [`endpoint_url`]);
/// an empty path yields the catalog root.
///
/// # Examples
/// ```
/// use scb_client::config::{endpoint_url, node_url};
///
/// let endpoint = endpoint_url("en");
/// assert_eq!(
///     node_url(&endpoint, &["BE".to_string(), "BE0101".to_string()]),
///     "https://api.scb.se/OV0104/v1/doris/en/ssd/BE/BE0101"
/// );
/// ```
pub fn node_url(endpoint: &str, segments: &[String]) -> String {
    format!("{endpoint}{}", segments.join("/"))
}
