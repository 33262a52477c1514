//! Sender configuration.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Endpoint of the local barrage dispatcher.
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8080/ws/dy";

/// How long the connection stays open after the payload is sent.
pub const DEFAULT_CLOSE_DELAY: Duration = Duration::from_secs(2);

/// Upper bound for the close handshake once it has been started.
pub const DEFAULT_CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Where to send and how long to linger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderConfig {
    endpoint: String,
    close_delay: Duration,
    close_timeout: Duration,
}

impl Default for SenderConfig {
    fn default() -> Self {
        SenderConfig {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            close_delay: DEFAULT_CLOSE_DELAY,
            close_timeout: DEFAULT_CLOSE_TIMEOUT,
        }
    }
}

impl SenderConfig {
    /// Replaces the endpoint. Only plain `ws` URLs with a host are accepted;
    /// the transport is built without TLS.
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason,
        };
        let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "ws" => {}
            other => return Err(invalid(format!("unsupported scheme {:?}", other))),
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host".to_owned()));
        }
        self.endpoint = endpoint.to_owned();
        Ok(self)
    }

    /// Sets how long to wait between sending and closing.
    pub fn with_close_delay(mut self, delay: Duration) -> Self {
        self.close_delay = delay;
        self
    }

    /// Sets the bound on the close handshake.
    pub fn with_close_timeout(mut self, timeout: Duration) -> Self {
        self.close_timeout = timeout;
        self
    }

    /// The WebSocket URL to connect to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Time between sending and closing.
    pub fn close_delay(&self) -> Duration {
        self.close_delay
    }

    /// Bound on the close handshake.
    pub fn close_timeout(&self) -> Duration {
        self.close_timeout
    }
}
