/// Errors that can occur talking to the commerce platform.
#[derive(Debug, thiserror::Error)]
pub enum CommerceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The stored product changed between our read and our write. The write
    /// was rejected as a whole; re-reading gives a fresh version number.
    #[error("Version conflict updating product {id} (expected version {expected})")]
    VersionConflict { id: String, expected: i64 },

    /// The platform rejected the update actions themselves.
    #[error("Validation error updating product {id}: {message}")]
    Validation { id: String, message: String },

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
