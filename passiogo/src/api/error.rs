//! PassioGo client error types.

use crate::domain::SystemId;

/// Errors from the PassioGo HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum PassioError {
    /// An argument the upstream is known to reject. Raised before any request.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status code
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response carried a non-empty `error` field
    #[error("API error in response: {payload}")]
    Api { payload: serde_json::Value },

    /// Response body did not have the expected shape
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// No system with this id in the systems list
    #[error("no transportation system with id {0}")]
    SystemNotFound(SystemId),
}

impl PassioError {
    pub(crate) fn invalid(name: &'static str, reason: &'static str) -> Self {
        PassioError::InvalidArgument { name, reason }
    }

    pub(crate) fn json(err: serde_json::Error, body: &str) -> Self {
        PassioError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PassioError::invalid("amount", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid argument `amount`: must be at least 1"
        );

        let err = PassioError::Status {
            status: 502,
            body: "Bad Gateway".into(),
        };
        assert_eq!(err.to_string(), "HTTP status 502: Bad Gateway");

        let err = PassioError::Api {
            payload: serde_json::json!({"error": "bad system"}),
        };
        assert!(err.to_string().contains("bad system"));

        let err = PassioError::SystemNotFound(SystemId::new(3994));
        assert_eq!(err.to_string(), "no transportation system with id 3994");
    }

    #[test]
    fn json_error_truncates_body() {
        let body = "x".repeat(2000);
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        match PassioError::json(parse_err, &body) {
            PassioError::Json { body: Some(b), .. } => assert_eq!(b.len(), 500),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
