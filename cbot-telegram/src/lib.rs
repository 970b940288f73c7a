//! # cbot-telegram
//!
//! Telegram glue for the command bot: [`BotConfig`] loaded from JSON, the
//! [`Client`] wrapper holding the command registry on top of a chat transport,
//! and the teloxide-backed [`TelegramChat`]. Handles only connectivity and
//! command storage; parsing semantics live in cbot-args.

mod client;
mod config;
mod transport;

pub use client::{Client, CommandSource};
pub use config::BotConfig;
pub use transport::TelegramChat;
