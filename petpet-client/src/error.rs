use thiserror::Error;

/// Failures surfaced by [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL could not be parsed or joined.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    /// The request never produced a usable response (DNS, connect, TLS,
    /// timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server rejected the request with an application-level error.
    #[error("server rejected request ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected envelope.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A success envelope arrived without the expected payload.
    #[error("response envelope carried no data")]
    MissingData,
}

impl ClientError {
    /// True when the error indicates an invalid or expired token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Api { status: 401, .. })
    }

    /// True when the error indicates a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_api_errors_by_status() {
        let err = ClientError::Api {
            status: 401,
            message: "Invalid or expired token".to_string(),
        };
        assert!(err.is_unauthorized());
        assert!(!err.is_not_found());
    }
}
