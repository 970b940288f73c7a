//! Integration tests for [`cbot_telegram::Client`], the command registry.
//!
//! Covers: registering specs and pre-built parsers, prog naming, duplicate-name
//! overwrite semantics, and compile failures leaving earlier commands intact.
//! Uses an offline ChatClient stub; no network I/O.

use async_trait::async_trait;
use cbot_args::{Action, Arg, CmdSpec, ParseError, Parser};
use cbot_core::{ChatClient, Result};
use cbot_telegram::Client;

struct NullChat;

#[async_trait]
impl ChatClient for NullChat {
    async fn connect_and_run(&self) -> Result<()> {
        Ok(())
    }

    async fn send_message(&self, _channel_id: i64, _text: &str) -> Result<()> {
        Ok(())
    }
}

/// **Test: registering a spec compiles it and names the parser.**
///
/// **Setup:** client with an empty table; a spec with one store-true flag.
/// **Action:** `add_command("echo", spec)`.
/// **Expected:** the command is retrievable, its prog is "echo", and it parses.
#[test]
fn test_add_command_from_spec() {
    let mut client = Client::new(NullChat, "!");
    let spec = CmdSpec::new()
        .desc("echo text back")
        .arg(Arg::new("--loud").action(Action::StoreTrue).req(false));
    client.add_command("echo", spec).unwrap();

    let parser = client.command("echo").unwrap();
    assert_eq!(parser.prog(), "echo");
    let ns = parser.parse(["--loud"]).unwrap();
    assert_eq!(ns.get_bool("loud"), Some(true));
}

#[test]
fn test_add_command_from_parser() {
    let mut client = Client::new(NullChat, "!");
    let parser = Parser::new();
    client.add_command("ping", parser).unwrap();

    let stored = client.command("ping").unwrap();
    assert_eq!(stored.prog(), "ping");
    assert!(stored.parse(Vec::<String>::new()).unwrap().is_empty());
}

/// **Test: duplicate names keep the second registration.**
///
/// Documents the current overwrite semantics for duplicate command names.
#[test]
fn test_duplicate_name_keeps_second() {
    let mut client = Client::new(NullChat, "!");
    client
        .add_command("greet", CmdSpec::new().desc("first"))
        .unwrap();
    client
        .add_command("greet", CmdSpec::new().desc("second"))
        .unwrap();

    assert_eq!(client.commands().count(), 1);
    let parser = client.command("greet").unwrap();
    assert_eq!(parser.description(), Some("second"));
}

#[test]
fn test_compile_failure_leaves_registry_intact() {
    let mut client = Client::new(NullChat, "!");
    client.add_command("good", CmdSpec::new()).unwrap();

    let bad = CmdSpec::new().arg(Arg::new(""));
    let err = client.add_command("bad", bad).unwrap_err();
    assert!(matches!(err, ParseError::MalformedFlagName(_)));

    assert!(client.command("good").is_some());
    assert!(client.command("bad").is_none());
}

#[test]
fn test_unknown_command_lookup() {
    let client = Client::new(NullChat, "!");
    assert!(client.command("nope").is_none());
    assert_eq!(client.prefix(), "!");
}

#[tokio::test]
async fn test_run_delegates_to_transport() {
    let client = Client::new(NullChat, "!");
    client.run().await.unwrap();
}
