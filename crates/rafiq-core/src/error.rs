use thiserror::Error;

/// Failures of the AI request layer.
///
/// Every wrapper returns one of these instead of a bare `None`, so callers
/// can distinguish "no network was attempted" from "the endpoint answered
/// garbage".
#[derive(Debug, Error)]
pub enum AiError {
    /// The connectivity flag is off; no request was issued.
    #[error("offline: request not attempted")]
    Offline,

    /// No API key is configured.
    #[error("no API key configured")]
    MissingKey,

    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    #[error("request failed: {0}")]
    Http(String),

    /// The endpoint answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response arrived but did not decode into the expected shape.
    #[error("unexpected response shape: {0}")]
    Decode(String),

    /// The same logical operation is already in flight.
    #[error("operation '{0}' already in progress")]
    Busy(&'static str),

    /// The operation was cancelled before completing.
    #[error("operation cancelled")]
    Cancelled,
}

impl AiError {
    pub fn http(err: reqwest::Error) -> Self {
        AiError::Http(err.to_string())
    }
}

/// Failures of the slot store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read slot '{slot}': {source}")]
    Read {
        slot: &'static str,
        source: std::io::Error,
    },

    #[error("failed to parse slot '{slot}': {source}")]
    Parse {
        slot: &'static str,
        source: serde_json::Error,
    },

    #[error("failed to write slot '{slot}': {source}")]
    Write {
        slot: &'static str,
        source: std::io::Error,
    },
}

/// Failures of the live audio session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A session is already active; only one may exist per app instance.
    #[error("a live session is already active")]
    AlreadyActive,

    #[error("audio device unavailable: {0}")]
    Audio(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("transport error: {0}")]
    Transport(String),
}
