use thiserror::Error;

/// All errors that can occur when querying Sanity.
#[derive(Error, Debug)]
pub enum SanityError {
    /// The query endpoint answered with an HTTP status of 400 or above.
    ///
    /// The response body is not inspected.
    #[error("error making call (HTTP {status_code})")]
    QueryFailed { status_code: u16 },

    /// The request succeeded but the response body carried an `error` value.
    #[error("query error: {error}")]
    RemoteQuery { error: serde_json::Value },

    /// The caller passed something the client refuses to send.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A transport-level HTTP error from reqwest.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body, or a result decoded from it, was not valid JSON for the target type.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SanityError {
    /// The error payload as a JSON value.
    ///
    /// For [`SanityError::RemoteQuery`] this is the remote `error` value verbatim;
    /// every other variant yields its message as a JSON string.
    pub fn payload(&self) -> serde_json::Value {
        match self {
            Self::RemoteQuery { error } => error.clone(),
            other => serde_json::Value::String(other.to_string()),
        }
    }

    /// `true` for [`SanityError::QueryFailed`].
    pub fn is_query_failed(&self) -> bool {
        matches!(self, Self::QueryFailed { .. })
    }
}

/// A convenience alias for `Result<T, SanityError>`.
pub type Result<T> = std::result::Result<T, SanityError>;
