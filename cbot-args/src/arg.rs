//! One declared command-line argument.

use cbot_core::Value;

use crate::typedesc::TypeDesc;

/// What the parser does when the argument shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Consume value tokens and store them (the default).
    Store,
    StoreTrue,
    StoreFalse,
    /// Store the registered const without consuming tokens.
    StoreConst,
    /// Accumulate one value per occurrence into a list.
    Append,
    /// Count occurrences.
    Count,
}

/// How many value tokens the argument consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// `?`: one token if available, else the const.
    Optional,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
}

/// Declarative description of a single argument.
///
/// Every `Option` field left as `None` is omitted from the compiled parser
/// configuration entirely, leaving the parser's own context-sensitive default in
/// effect. `req` and `deprecated` are always forwarded. Construct once, hand to
/// the compiler, never mutate.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    /// One or more alias flags; at least one, each non-empty.
    pub name: Vec<String>,
    pub action: Option<Action>,
    pub n: Option<Arity>,
    /// Const value used by [`Action::StoreConst`] and [`Arity::Optional`].
    pub val: Option<Value>,
    /// Note: `Some(Value::Null)` is an explicit null default, distinct from unset.
    pub default: Option<Value>,
    pub t: Option<TypeDesc>,
    /// Allowed values; empty means unconstrained.
    pub choices: Vec<Value>,
    pub req: bool,
    pub help: Option<String>,
    /// Output field name override.
    pub dest: Option<String>,
    pub deprecated: bool,
}

impl Arg {
    /// New argument with a single flag name; everything else unset, required.
    pub fn new(flag: impl Into<String>) -> Self {
        Self {
            name: vec![flag.into()],
            action: None,
            n: None,
            val: None,
            default: None,
            t: None,
            choices: Vec::new(),
            req: true,
            help: None,
            dest: None,
            deprecated: false,
        }
    }

    /// New argument with several alias flags (e.g. `["-v", "--verbose"]`).
    pub fn with_names<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Self::new("");
        out.name = flags.into_iter().map(Into::into).collect();
        out
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn n(mut self, arity: Arity) -> Self {
        self.n = Some(arity);
        self
    }

    pub fn val(mut self, val: impl Into<Value>) -> Self {
        self.val = Some(val.into());
        self
    }

    pub fn default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn t(mut self, t: TypeDesc) -> Self {
        self.t = Some(t);
        self
    }

    pub fn choices<I, V>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn req(mut self, req: bool) -> Self {
        self.req = req;
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn dest(mut self, dest: impl Into<String>) -> Self {
        self.dest = Some(dest.into());
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbot_core::Kind;

    #[test]
    fn test_new_leaves_optionals_unset() {
        let arg = Arg::new("--count");
        assert_eq!(arg.name, vec!["--count".to_string()]);
        assert!(arg.action.is_none());
        assert!(arg.n.is_none());
        assert!(arg.val.is_none());
        assert!(arg.default.is_none());
        assert!(arg.t.is_none());
        assert!(arg.choices.is_empty());
        assert!(arg.req);
        assert!(arg.help.is_none());
        assert!(arg.dest.is_none());
        assert!(!arg.deprecated);
    }

    #[test]
    fn test_explicit_null_default_is_not_unset() {
        let unset = Arg::new("--x");
        let null = Arg::new("--x").default(Value::Null);
        assert!(unset.default.is_none());
        assert_eq!(null.default, Some(Value::Null));
        assert_ne!(unset, null);
    }

    #[test]
    fn test_chained_setters() {
        let arg = Arg::with_names(["-v", "--verbose"])
            .action(Action::StoreTrue)
            .req(false)
            .help("verbose output")
            .deprecated(true);
        assert_eq!(arg.name.len(), 2);
        assert_eq!(arg.action, Some(Action::StoreTrue));
        assert!(!arg.req);
        assert!(arg.deprecated);
        assert_eq!(arg.help.as_deref(), Some("verbose output"));
    }

    #[test]
    fn test_typed_arg() {
        let arg = Arg::new("--count").t(TypeDesc::Prim(Kind::Int)).default(1);
        assert_eq!(arg.t, Some(TypeDesc::Prim(Kind::Int)));
        assert_eq!(arg.default, Some(Value::Int(1)));
    }
}
