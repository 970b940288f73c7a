//! Chat transport abstraction.
//!
//! [`ChatClient`] is the seam between the command core and whatever chat service the
//! bot runs on. The core never performs network I/O itself; it only stores commands
//! and hands text to an implementation of this trait.

use crate::error::Result;
use async_trait::async_trait;

/// Abstraction over the chat service connection. Implementations map to a concrete
/// transport (e.g. Telegram); tests can substitute an offline stub.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Connects and processes events until the process stops or authentication
    /// fails fatally.
    async fn connect_and_run(&self) -> Result<()>;

    /// Sends text to the given channel. Best-effort delivery.
    async fn send_message(&self, channel_id: i64, text: &str) -> Result<()>;
}
