//! Error types for the SCB client.

use thiserror::Error;

/// Main error type for the SCB client library.
#[derive(Debug, Error)]
pub enum ScbError {
    /// Client constructed without a language code.
    #[error("A language code is required (e.g., \"sv\" or \"en\")")]
    MissingLanguage,

    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// Response body did not match the expected JSON shape.
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// A table operation was invoked while the current path points at an
    /// interior catalog node.
    #[error("Node at {path} is not a table")]
    NotATable { path: String },

    /// A selection referenced a variable the current table does not have.
    #[error("No variable named '{0}' in the current table")]
    UnknownVariable(String),

    /// A selection referenced a label a variable does not carry.
    #[error("Variable '{variable}' has no value labelled '{label}'")]
    UnknownLabel { variable: String, label: String },

    /// Requested response format is not one the API accepts.
    #[error("Invalid response format: '{0}'. Expected one of px, csv, json, xlsx, json-stat, json-stat2, sdmx")]
    InvalidFormat(String),
}

/// Result type alias for SCB client operations.
pub type Result<T> = std::result::Result<T, ScbError>;
