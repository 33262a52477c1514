//! Error type.

use tungstenite::Error as WsError;

/// Everything that can go wrong while sending.
///
/// None of these are retried; they are reported to the
/// [`LifecycleHandler`](crate::LifecycleHandler) and the run carries on to
/// closing the connection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The endpoint is not a usable WebSocket URL.
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    /// Connecting or the opening handshake failed.
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: WsError,
    },
    /// The payload could not be encoded.
    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),
    /// The connection failed after it was opened.
    #[error("transport error: {0}")]
    Transport(#[from] WsError),
}

/// Result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;
