//! # cbot-core
//!
//! Core types for the command bot: the dynamic [`Value`] model flowing through the
//! argument pipeline, the [`ChatClient`] transport trait, error types, and tracing
//! initialization. Transport-agnostic; used by cbot-args and cbot-telegram.

pub mod chat;
pub mod error;
pub mod logger;
pub mod value;

pub use chat::ChatClient;
pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use value::{Kind, Value};
