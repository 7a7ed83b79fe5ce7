use dressup_core::types::RecordId;

/// Errors from the remote persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend API error ({status}): {body}")]
    Api {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    #[error("{entity} with id {id} not found")]
    NotFound {
        entity: &'static str,
        id: RecordId,
    },

    #[error("Invalid backend endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The image bytes referenced by an upload payload could not be read.
    #[error("Cannot read upload source {uri}: {reason}")]
    Source { uri: String, reason: String },
}
