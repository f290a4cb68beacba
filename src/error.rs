// Typed errors with thiserror. Surface meaningful messages to JS.
// Missing optional movie fields are never errors; they fall back to defaults.

use thiserror::Error;

/// Engine error types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The request never produced a response (connection refused, CORS, offline).
    #[error("Network failure for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Request to {url} failed with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The prediction endpoint answered with an `error` field.
    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EngineError {
    /// True for failures where the remote side was never reached or refused
    /// the request, as opposed to a well-formed error answer.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            EngineError::Network { .. } | EngineError::HttpStatus { .. }
        )
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EngineError::InvalidConfig("missing field".to_string());
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn http_status_mentions_code_and_url() {
        let err = EngineError::HttpStatus {
            url: "data/comedy.json".to_string(),
            status: 404,
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("data/comedy.json"));
        assert!(err.is_transport_failure());
    }

    #[test]
    fn prediction_error_is_not_transport_failure() {
        assert!(!EngineError::Prediction("Model not loaded".into()).is_transport_failure());
    }

    #[test]
    fn serde_errors_convert() {
        let parse: Result<Vec<u8>, _> = serde_json::from_str("{not json");
        let err: EngineError = parse.unwrap_err().into();
        assert!(matches!(err, EngineError::Serialization(_)));
    }
}
