//! Connection lifecycle notifications.

use log::*;
use tungstenite::protocol::{CloseFrame, Message};

use crate::error::Error;

/// Receives the lifecycle events of one connection.
///
/// Events arrive in order: `on_open` at most once, any number of
/// `on_message` and `on_error`, then `on_close` exactly once if the
/// connection was opened. A failed connection attempt yields a single
/// `on_error` and nothing else.
pub trait LifecycleHandler {
    /// The opening handshake completed.
    fn on_open(&mut self);

    /// A frame arrived from the remote side. Close frames are not passed
    /// here; they are reported by `on_close`.
    fn on_message(&mut self, message: &Message);

    /// Something failed; the run carries on towards closing.
    fn on_error(&mut self, error: &Error);

    /// The connection is gone. `frame` carries the close code and reason the
    /// remote side sent, if any.
    fn on_close(&mut self, frame: Option<&CloseFrame>);
}

/// Reports every event through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHandler;

impl LifecycleHandler for LogHandler {
    fn on_open(&mut self) {
        info!("Connection opened");
    }

    fn on_message(&mut self, message: &Message) {
        match message {
            Message::Text(text) => info!("Received from server: {}", text.as_str()),
            Message::Binary(data) => {
                info!("Received from server: {}", String::from_utf8_lossy(data))
            }
            Message::Ping(_) | Message::Pong(_) => debug!("Received {:?}", message),
            Message::Close(_) | Message::Frame(_) => {}
        }
    }

    fn on_error(&mut self, error: &Error) {
        error!("Error: {}", error);
    }

    fn on_close(&mut self, frame: Option<&CloseFrame>) {
        match frame {
            Some(frame) => info!("Connection closed ({}): {}", frame.code, frame.reason.as_str()),
            None => info!("Connection closed"),
        }
    }
}
