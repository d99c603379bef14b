/// Errors returned by a persistence gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The payload is not a JSON object or fails to decode.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// The backend refused the request (also used by the in-memory gateway
    /// when failure injection is on).
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl GatewayError {
    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Database(e) => matches!(
                e,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            GatewayError::Unavailable(_) => true,
            GatewayError::Serialization(_) | GatewayError::InvalidRecord(_) => false,
        }
    }
}
