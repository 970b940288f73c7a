//! Declarative description of a whole command.

use cbot_core::Value;

use crate::arg::Arg;

/// Spec for one command: top-level parser options plus the ordered argument set.
///
/// Unlike [`Arg`], `desc` and `epilog` use "None means keep the parser default"
/// rather than omit-the-key semantics, because the parser always has these slots.
/// Built once, consumed once by [`crate::spec_to_parser`].
#[derive(Debug, Clone, PartialEq)]
pub struct CmdSpec {
    pub desc: Option<String>,
    pub epilog: Option<String>,
    /// Auto-register a help flag.
    pub help: bool,
    /// Accept unambiguous option-name prefixes.
    pub abbr: bool,
    /// Characters that introduce an option flag.
    pub prefix: String,
    /// Parser-wide fallback for omitted optional arguments without a default.
    pub default: Value,
    pub args: Vec<Arg>,
}

impl Default for CmdSpec {
    fn default() -> Self {
        Self {
            desc: None,
            epilog: None,
            help: true,
            abbr: true,
            prefix: "-".to_string(),
            default: Value::Null,
            args: Vec::new(),
        }
    }
}

impl CmdSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn epilog(mut self, epilog: impl Into<String>) -> Self {
        self.epilog = Some(epilog.into());
        self
    }

    pub fn help(mut self, help: bool) -> Self {
        self.help = help;
        self
    }

    pub fn abbr(mut self, abbr: bool) -> Self {
        self.abbr = abbr;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    /// Appends an argument; declared order is significant for help text and
    /// positional assignment.
    pub fn arg(mut self, arg: Arg) -> Self {
        self.args.push(arg);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let spec = CmdSpec::new();
        assert!(spec.desc.is_none());
        assert!(spec.epilog.is_none());
        assert!(spec.help);
        assert!(spec.abbr);
        assert_eq!(spec.prefix, "-");
        assert_eq!(spec.default, Value::Null);
        assert!(spec.args.is_empty());
    }

    #[test]
    fn test_args_keep_declared_order() {
        let spec = CmdSpec::new()
            .arg(Arg::new("first"))
            .arg(Arg::new("second"))
            .arg(Arg::new("third"));
        let names: Vec<_> = spec.args.iter().map(|a| a.name[0].as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }
}
