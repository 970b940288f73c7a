//! Command registry on top of a chat transport.

use std::collections::HashMap;

use cbot_args::{spec_to_parser, CmdSpec, ParseError, Parser};
use cbot_core::ChatClient;
use tracing::{debug, warn};

/// A command definition: either a declarative spec still to compile or an
/// already-built parser.
pub enum CommandSource {
    Spec(CmdSpec),
    Parser(Parser),
}

impl From<CmdSpec> for CommandSource {
    fn from(spec: CmdSpec) -> Self {
        CommandSource::Spec(spec)
    }
}

impl From<Parser> for CommandSource {
    fn from(parser: Parser) -> Self {
        CommandSource::Parser(parser)
    }
}

/// Wraps a chat transport with a name-to-parser command table.
///
/// Single-owner by design: build the registry before entering the event loop,
/// then read it. A compile failure in [`Client::add_command`] leaves previously
/// registered commands untouched.
pub struct Client<C: ChatClient> {
    chat: C,
    prefix: String,
    commands: HashMap<String, Parser>,
}

impl<C: ChatClient> Client<C> {
    /// New client with an empty command table. `prefix` is the in-chat command
    /// prefix (stored for dispatch).
    pub fn new(chat: C, prefix: impl Into<String>) -> Self {
        Self {
            chat,
            prefix: prefix.into(),
            commands: HashMap::new(),
        }
    }

    /// Registers a command under `name`, compiling a spec when given one. A
    /// duplicate name replaces the previous entry (with a warning).
    pub fn add_command(
        &mut self,
        name: impl Into<String>,
        source: impl Into<CommandSource>,
    ) -> Result<(), ParseError> {
        let name = name.into();
        let mut parser = match source.into() {
            CommandSource::Spec(spec) => spec_to_parser(spec)?,
            CommandSource::Parser(parser) => parser,
        };
        parser.set_prog(name.clone());
        if self.commands.insert(name.clone(), parser).is_some() {
            warn!(command = %name, "replacing existing command");
        } else {
            debug!(command = %name, "registered command");
        }
        Ok(())
    }

    pub fn command(&self, name: &str) -> Option<&Parser> {
        self.commands.get(name)
    }

    pub fn commands(&self) -> impl Iterator<Item = (&str, &Parser)> {
        self.commands.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn chat(&self) -> &C {
        &self.chat
    }

    /// Hands control to the transport until it stops.
    pub async fn run(&self) -> cbot_core::Result<()> {
        self.chat.connect_and_run().await
    }
}
