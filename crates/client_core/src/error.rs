use thiserror::Error;

/// Why a lookup response could not be turned into a [`crate::types::UvReport`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("payload is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("payload field `{field}` is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("payload is not a JSON object")]
    NotAnObject,
    #[error("payload is not valid JSON: {0}")]
    Undecodable(String),
}

/// Failure of a single lookup, surfaced to the view as the failed state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RetrievalError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("lookup returned status {status}: {}", .message.as_deref().unwrap_or("no details"))]
    BadStatus {
        status: u16,
        message: Option<String>,
    },
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] ProjectionError),
}
