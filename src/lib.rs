//! tgsend - A thin Rust client for the Telegram Bot API send methods
//!
//! Sends text messages, documents, photos and videos to a chat and reports
//! whether Telegram accepted them. Each call is a single stateless POST to
//! `https://api.telegram.org/bot<token>/<method>`.
//!
//! ```no_run
//! use tgsend::{BotClient, FileOptions, InputFile, MessageOptions, VideoOptions};
//!
//! let bot = BotClient::new("123456:YOUR_BOT_TOKEN");
//! bot.send_message("@mychannel", "Build *finished*", &MessageOptions::default())?;
//! bot.send_document(
//!     "@mychannel",
//!     &InputFile::path("report.pdf"),
//!     &FileOptions::with_caption("Nightly report"),
//! )?;
//! bot.send_video(
//!     "@mychannel",
//!     &InputFile::path("demo.mp4"),
//!     &VideoOptions {
//!         width: Some(1920),
//!         height: Some(1080),
//!         ..Default::default()
//!     },
//! )?;
//! # Ok::<(), tgsend::Error>(())
//! ```

pub mod client;
pub mod configuration;
pub mod error;
pub mod redact;
pub mod request;
pub mod transport;

// Re-export main components for easy access
pub use client::{ApiResponse, BotClient};
pub use configuration::{
    ClientOptions, Configuration, FileOptions, MessageOptions, ParseMode, VideoOptions,
};
pub use error::{Error, Result};
pub use request::{Attachment, FormValue, InputFile, MediaKind, OutboundRequest};
pub use transport::{ReqwestTransport, Transport};
