//! Built-in command definitions, registered at startup.

use anyhow::Result;
use cbot_args::{Action, Arg, Arity, CmdSpec, TypeDesc};
use cbot_core::{ChatClient, Kind};
use cbot_telegram::Client;

/// Registers the built-in commands on the given client.
pub fn register_commands<C: ChatClient>(client: &mut Client<C>) -> Result<()> {
    let echo = CmdSpec::new()
        .desc("echo text back")
        .arg(
            Arg::new("text")
                .n(Arity::OneOrMore)
                .help("text to echo"),
        )
        .arg(
            Arg::new("--count")
                .t(TypeDesc::Prim(Kind::Int))
                .default(1)
                .req(false)
                .help("repeat count"),
        )
        .arg(
            Arg::with_names(["-l", "--loud"])
                .action(Action::StoreTrue)
                .req(false)
                .help("shout the reply"),
        );
    client.add_command("echo", echo)?;

    let roll = CmdSpec::new()
        .desc("roll dice")
        .epilog("e.g. roll --sides 20")
        .arg(
            Arg::new("--sides")
                .t(TypeDesc::Prim(Kind::Int))
                .choices([4, 6, 8, 10, 12, 20])
                .default(6)
                .req(false)
                .help("die size"),
        )
        .arg(
            Arg::with_names(["-n", "--dice"])
                .t(TypeDesc::Prim(Kind::Int))
                .default(1)
                .req(false)
                .dest("count")
                .help("number of dice"),
        );
    client.add_command("roll", roll)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct NullChat;

    #[async_trait]
    impl ChatClient for NullChat {
        async fn connect_and_run(&self) -> cbot_core::Result<()> {
            Ok(())
        }

        async fn send_message(&self, _channel_id: i64, _text: &str) -> cbot_core::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_register_commands() {
        let mut client = Client::new(NullChat, "!");
        register_commands(&mut client).unwrap();
        assert!(client.command("echo").is_some());
        assert!(client.command("roll").is_some());
    }

    #[test]
    fn test_echo_parses() {
        let mut client = Client::new(NullChat, "!");
        register_commands(&mut client).unwrap();
        let parser = client.command("echo").unwrap();
        let ns = parser.parse(["hello", "world", "--count", "2"]).unwrap();
        assert_eq!(ns.get_int("count"), Some(2));
        assert_eq!(ns.get_bool("loud"), Some(false));
    }

    #[test]
    fn test_roll_rejects_bad_die() {
        let mut client = Client::new(NullChat, "!");
        register_commands(&mut client).unwrap();
        let parser = client.command("roll").unwrap();
        assert!(parser.parse(["--sides", "7"]).is_err());
        let ns = parser.parse(["--sides", "20", "-n", "3"]).unwrap();
        assert_eq!(ns.get_int("sides"), Some(20));
        assert_eq!(ns.get_int("count"), Some(3));
    }
}
