//! One-shot send over a WebSocket connection.

use futures_util::{SinkExt, StreamExt};
use log::*;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::{timeout, timeout_at, Instant};
use tokio_tungstenite::{connect_async, WebSocketStream};
use tungstenite::protocol::{CloseFrame, Message};

use crate::config::SenderConfig;
use crate::error::{Error, Result};
use crate::handler::LifecycleHandler;
use crate::message::ChatMessage;

/// How the linger period ended.
enum Linger {
    /// The delay elapsed with the connection still open.
    Elapsed,
    /// The connection ended during the delay.
    Closed(Option<CloseFrame>),
}

/// Whether the connection can still carry a close frame after a failed send.
/// Encoding fails before anything touches the wire; a transport failure leaves
/// the stream unusable.
fn accepts_close(err: &Error) -> bool {
    !matches!(err, Error::Transport(_))
}

/// Sends one message over a fresh connection, then closes it.
#[derive(Debug, Clone)]
pub struct OneShotSender {
    config: SenderConfig,
    message: ChatMessage,
}

impl OneShotSender {
    /// Creates a sender; nothing is connected until [`run`](Self::run).
    pub fn new(config: SenderConfig, message: ChatMessage) -> Self {
        OneShotSender { config, message }
    }

    /// The message this sender delivers.
    pub fn message(&self) -> &ChatMessage {
        &self.message
    }

    /// Connects, sends the message, waits for the configured delay and
    /// closes the connection, reporting every step to `handler`.
    ///
    /// Failures never escape: they are passed to
    /// [`LifecycleHandler::on_error`]. Once the connection is open it is
    /// closed on every path (dropped outright if the transport failed), and
    /// `on_close` is the last event.
    pub async fn run<H>(&self, handler: &mut H)
    where
        H: LifecycleHandler + ?Sized,
    {
        let endpoint = self.config.endpoint();
        debug!("Connecting to {}", endpoint);
        let (mut stream, response) = match connect_async(endpoint).await {
            Ok(connected) => connected,
            Err(source) => {
                handler.on_error(&Error::Connect { endpoint: endpoint.to_owned(), source });
                return;
            }
        };
        trace!("Handshake response: {:?}", response.status());
        handler.on_open();

        let linger = match self.send(&mut stream).await {
            Ok(()) => self.linger(&mut stream, handler).await,
            Err(err) => {
                handler.on_error(&err);
                if accepts_close(&err) {
                    Linger::Elapsed
                } else {
                    Linger::Closed(None)
                }
            }
        };
        let frame = match linger {
            Linger::Closed(frame) => frame,
            Linger::Elapsed => self.close(&mut stream, handler).await,
        };
        handler.on_close(frame.as_ref());
    }

    async fn send<S>(&self, stream: &mut WebSocketStream<S>) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        info!("Sending {}...", self.message.method);
        let payload = self.message.to_json()?;
        trace!("Payload: {}", payload);
        stream.send(Message::text(payload)).await?;
        info!(
            "Message sent. Closing connection in {:?}...",
            self.config.close_delay()
        );
        Ok(())
    }

    /// Keeps reading until the close delay elapses so replies are reported
    /// while the remote side processes the message.
    async fn linger<S, H>(&self, stream: &mut WebSocketStream<S>, handler: &mut H) -> Linger
    where
        S: AsyncRead + AsyncWrite + Unpin,
        H: LifecycleHandler + ?Sized,
    {
        let deadline = Instant::now() + self.config.close_delay();
        loop {
            match timeout_at(deadline, stream.next()).await {
                Err(_elapsed) => return Linger::Elapsed,
                Ok(None) => return Linger::Closed(None),
                Ok(Some(Ok(Message::Close(frame)))) => {
                    debug!("Remote closed the connection early");
                    self.drain(stream, handler).await;
                    return Linger::Closed(frame);
                }
                Ok(Some(Ok(message))) => handler.on_message(&message),
                Ok(Some(Err(err))) => {
                    handler.on_error(&Error::Transport(err));
                    return Linger::Closed(None);
                }
            }
        }
    }

    /// Starts the close handshake and waits, bounded by the close timeout,
    /// for the remote side to finish it.
    async fn close<S, H>(
        &self,
        stream: &mut WebSocketStream<S>,
        handler: &mut H,
    ) -> Option<CloseFrame>
    where
        S: AsyncRead + AsyncWrite + Unpin,
        H: LifecycleHandler + ?Sized,
    {
        debug!("Closing connection");
        if let Err(err) = stream.close(None).await {
            handler.on_error(&Error::Transport(err));
            return None;
        }
        let reply = async {
            while let Some(next) = stream.next().await {
                match next {
                    Ok(Message::Close(frame)) => {
                        self.drain(stream, handler).await;
                        return frame;
                    }
                    Ok(message) => handler.on_message(&message),
                    Err(err) => {
                        handler.on_error(&Error::Transport(err));
                        return None;
                    }
                }
            }
            None
        };
        match timeout(self.config.close_timeout(), reply).await {
            Ok(frame) => frame,
            Err(_elapsed) => {
                warn!(
                    "Close handshake did not finish within {:?}, dropping connection",
                    self.config.close_timeout()
                );
                None
            }
        }
    }

    /// Reads until the stream ends so the close reply gets flushed.
    async fn drain<S, H>(&self, stream: &mut WebSocketStream<S>, handler: &mut H)
    where
        S: AsyncRead + AsyncWrite + Unpin,
        H: LifecycleHandler + ?Sized,
    {
        let rest = async {
            while let Some(next) = stream.next().await {
                match next {
                    Ok(Message::Close(_)) => {}
                    Ok(message) => handler.on_message(&message),
                    Err(err) => {
                        debug!("Error while draining connection: {}", err);
                        break;
                    }
                }
            }
        };
        if timeout(self.config.close_timeout(), rest).await.is_err() {
            warn!("Connection did not finish closing, dropping it");
        }
    }
}
