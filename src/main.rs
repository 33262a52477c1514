//! Sends the canned song request to the local dispatcher once.
//!
//!     cargo run
//!
//! Set `RUST_LOG=debug` to see the connection details.

use log::*;
use webcast_sender::{ChatMessage, LogHandler, OneShotSender, SenderConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = SenderConfig::default();
    info!("Sending a song request to {}", config.endpoint());
    let sender = OneShotSender::new(config, ChatMessage::song_request());
    sender.run(&mut LogHandler).await;
}
