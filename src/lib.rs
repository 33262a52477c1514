//! One-shot Webcast message sender.
//!
//! Opens a WebSocket connection to the barrage dispatcher, sends a single
//! JSON-encoded chat message, lingers for a moment so the dispatcher can
//! react, and closes the connection again. It exists to poke a running
//! dispatcher by hand; the protocol work is done by `tokio-tungstenite`.
//!
//! ```no_run
//! use webcast_sender::{ChatMessage, LogHandler, OneShotSender, SenderConfig};
//!
//! # async fn example() {
//! let sender = OneShotSender::new(SenderConfig::default(), ChatMessage::song_request());
//! sender.run(&mut LogHandler).await;
//! # }
//! ```

#![deny(
    missing_debug_implementations,
    unused_must_use,
    unused_mut,
    unused_imports,
    unused_import_braces
)]

pub use tungstenite;

pub mod config;
pub mod error;
mod handler;
pub mod message;
mod sender;

pub use crate::config::SenderConfig;
pub use crate::error::{Error, Result};
pub use crate::handler::{LifecycleHandler, LogHandler};
pub use crate::message::{CastMethod, CastUser, ChatMessage, Gender, LiveRoom};
pub use crate::sender::OneShotSender;
