//! The imperative parser primitive the spec compiler targets.
//!
//! [`Parser`] mirrors the classic add-argument-with-options surface: register flags
//! or positionals with an [`ArgConfig`] bag, then [`Parser::parse`] an ordered token
//! list into a [`Namespace`]. Knobs left unset in the bag fall back to the parser's
//! own context-sensitive defaults at parse time; that is what makes omission in the
//! declarative layer meaningful.

use std::collections::BTreeMap;

use cbot_core::Value;
use tracing::warn;

use crate::arg::{Action, Arity};
use crate::error::ParseError;
use crate::typedesc::TypeChecker;

/// Configuration bag for a single registered argument. Every unset knob defers to
/// the parser's context-sensitive default: e.g. `required` unset means flag
/// arguments are optional and positionals are required (when their arity needs at
/// least one token).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgConfig {
    pub action: Option<Action>,
    pub nargs: Option<Arity>,
    pub const_: Option<Value>,
    pub default: Option<Value>,
    /// Predicate run on each coerced value token.
    pub ty: Option<TypeChecker>,
    /// Allowed values; empty means unconstrained.
    pub choices: Vec<Value>,
    pub help: Option<String>,
    pub dest: Option<String>,
    pub required: Option<bool>,
    /// Warn when the argument is supplied.
    pub deprecated: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Registered {
    flags: Vec<String>,
    positional: bool,
    dest: String,
    config: ArgConfig,
}

impl Registered {
    /// Minimum number of tokens the argument's arity needs.
    fn min_tokens(&self) -> usize {
        match self.config.nargs {
            None => 1,
            Some(Arity::Exact(k)) => k,
            Some(Arity::Optional) | Some(Arity::ZeroOrMore) => 0,
            Some(Arity::OneOrMore) => 1,
        }
    }

    /// True when the resolved action consumes value tokens.
    fn consumes_values(&self) -> bool {
        matches!(
            self.config.action.unwrap_or(Action::Store),
            Action::Store | Action::Append
        )
    }
}

/// Parse result: output-field-name to value mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    values: BTreeMap<String, Value>,
}

impl Namespace {
    pub fn get(&self, dest: &str) -> Option<&Value> {
        self.values.get(dest)
    }

    pub fn get_bool(&self, dest: &str) -> Option<bool> {
        self.values.get(dest).and_then(Value::as_bool)
    }

    pub fn get_int(&self, dest: &str) -> Option<i64> {
        self.values.get(dest).and_then(Value::as_int)
    }

    pub fn get_str(&self, dest: &str) -> Option<&str> {
        self.values.get(dest).and_then(Value::as_str)
    }

    pub fn contains(&self, dest: &str) -> bool {
        self.values.contains_key(dest)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Argument parser handle: top-level options plus the ordered registered
/// argument list. Built imperatively (directly or by the spec compiler), then
/// used read-only by [`Parser::parse`].
#[derive(Debug, Clone, PartialEq)]
pub struct Parser {
    prog: String,
    description: Option<String>,
    epilog: Option<String>,
    add_help: bool,
    allow_abbrev: bool,
    prefix_chars: String,
    argument_default: Value,
    args: Vec<Registered>,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            prog: String::new(),
            description: None,
            epilog: None,
            add_help: true,
            allow_abbrev: true,
            prefix_chars: "-".to_string(),
            argument_default: Value::Null,
            args: Vec::new(),
        }
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prog(&self) -> &str {
        &self.prog
    }

    /// Sets the displayed program name (used in usage and help).
    pub fn set_prog(&mut self, prog: impl Into<String>) {
        self.prog = prog.into();
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn epilog(&self) -> Option<&str> {
        self.epilog.as_deref()
    }

    pub fn set_epilog(&mut self, epilog: impl Into<String>) {
        self.epilog = Some(epilog.into());
    }

    pub fn set_add_help(&mut self, add_help: bool) {
        self.add_help = add_help;
    }

    pub fn set_allow_abbrev(&mut self, allow_abbrev: bool) {
        self.allow_abbrev = allow_abbrev;
    }

    pub fn set_prefix_chars(&mut self, prefix_chars: impl Into<String>) {
        self.prefix_chars = prefix_chars.into();
    }

    pub fn set_argument_default(&mut self, default: Value) {
        self.argument_default = default;
    }

    /// Registers an argument. Names starting with a prefix character are option
    /// flags (aliases allowed); anything else is a positional (single name only).
    pub fn add_argument(&mut self, flags: Vec<String>, config: ArgConfig) -> Result<(), ParseError> {
        if flags.is_empty() {
            return Err(ParseError::MalformedFlagName("empty flag list".to_string()));
        }
        for flag in &flags {
            if flag.is_empty() {
                return Err(ParseError::MalformedFlagName("empty flag".to_string()));
            }
            if self.is_option_name(flag) && flag.chars().all(|c| self.prefix_chars.contains(c)) {
                return Err(ParseError::MalformedFlagName(flag.clone()));
            }
            if self.args.iter().any(|reg| reg.flags.contains(flag)) {
                return Err(ParseError::DuplicateFlag(flag.clone()));
            }
        }
        let option_like = flags.iter().filter(|f| self.is_option_name(f)).count();
        let positional = option_like == 0;
        if !positional && option_like != flags.len() {
            return Err(ParseError::MalformedFlagName(format!(
                "cannot mix option and positional names: {}",
                flags.join(", ")
            )));
        }
        if positional && flags.len() > 1 {
            return Err(ParseError::MalformedFlagName(format!(
                "positional argument takes a single name: {}",
                flags.join(", ")
            )));
        }
        let dest = self.resolve_dest(&flags, &config, positional);
        self.args.push(Registered {
            flags,
            positional,
            dest,
            config,
        });
        Ok(())
    }

    /// Parses an ordered token list into a [`Namespace`].
    pub fn parse<I, S>(&self, tokens: I) -> Result<Namespace, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let mut out: BTreeMap<String, Value> = BTreeMap::new();
        let mut supplied = vec![false; self.args.len()];
        let mut pending: Vec<String> = Vec::new();
        let mut only_positionals = false;
        let terminator = self.option_terminator();

        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i].clone();
            i += 1;
            if !only_positionals && Some(token.as_str()) == terminator.as_deref() {
                only_positionals = true;
                continue;
            }
            if only_positionals || !self.looks_like_option(&token) {
                pending.push(token);
                continue;
            }

            let (name, inline) = match token.split_once('=') {
                Some((n, v)) => (n.to_string(), Some(v.to_string())),
                None => (token.clone(), None),
            };
            if self.add_help && self.is_help_flag(&name) {
                return Err(ParseError::HelpRequested(self.render_help()));
            }
            let idx = self.resolve_option(&name)?;
            let reg = &self.args[idx];
            if reg.config.deprecated {
                warn!(argument = %name, "argument is deprecated");
            }
            let action = reg.config.action.unwrap_or(Action::Store);
            if !reg.consumes_values() && inline.is_some() {
                return Err(ParseError::InvalidValue(
                    name,
                    "flag does not take a value".to_string(),
                ));
            }
            match action {
                Action::StoreTrue => {
                    out.insert(reg.dest.clone(), Value::Bool(true));
                }
                Action::StoreFalse => {
                    out.insert(reg.dest.clone(), Value::Bool(false));
                }
                Action::StoreConst => {
                    out.insert(
                        reg.dest.clone(),
                        reg.config.const_.clone().unwrap_or(Value::Null),
                    );
                }
                Action::Count => {
                    let next = match out.get(&reg.dest) {
                        Some(Value::Int(n)) => n + 1,
                        Some(_) => 1,
                        None => {
                            reg.config
                                .default
                                .as_ref()
                                .and_then(Value::as_int)
                                .unwrap_or(0)
                                + 1
                        }
                    };
                    out.insert(reg.dest.clone(), Value::Int(next));
                }
                Action::Store | Action::Append => {
                    let value = self.consume_option_values(&name, reg, inline, &tokens, &mut i)?;
                    if action == Action::Append {
                        let list = match out.remove(&reg.dest) {
                            Some(Value::List(mut xs)) => {
                                xs.push(value);
                                xs
                            }
                            _ => vec![value],
                        };
                        out.insert(reg.dest.clone(), Value::List(list));
                    } else {
                        out.insert(reg.dest.clone(), value);
                    }
                }
            }
            supplied[idx] = true;
        }

        self.fill_positionals(&mut out, &mut supplied, &pending)?;

        for (idx, reg) in self.args.iter().enumerate() {
            if supplied[idx] {
                continue;
            }
            let required = reg
                .config
                .required
                .unwrap_or(reg.positional && reg.min_tokens() > 0);
            if required {
                return Err(ParseError::MissingArgument(reg.flags.join("/")));
            }
            out.insert(reg.dest.clone(), self.missing_value(reg));
        }

        Ok(Namespace { values: out })
    }

    /// Renders usage, description, argument listings, and epilog.
    pub fn render_help(&self) -> String {
        let prog = if self.prog.is_empty() {
            "command"
        } else {
            self.prog.as_str()
        };
        let help_flags = self.help_flags();

        let mut usage = format!("usage: {prog}");
        if let Some((short, _)) = &help_flags {
            usage.push_str(&format!(" [{short}]"));
        }
        for reg in self.args.iter().filter(|r| !r.positional) {
            let mut item = reg.flags[0].clone();
            if reg.consumes_values() {
                item.push(' ');
                item.push_str(&reg.dest.to_uppercase());
            }
            usage.push_str(&format!(" [{item}]"));
        }
        for reg in self.args.iter().filter(|r| r.positional) {
            usage.push_str(&format!(" {}", reg.dest));
        }

        let mut out = usage;
        out.push('\n');
        if let Some(description) = &self.description {
            out.push('\n');
            out.push_str(description);
            out.push('\n');
        }

        let positionals: Vec<_> = self.args.iter().filter(|r| r.positional).collect();
        if !positionals.is_empty() {
            out.push_str("\npositional arguments:\n");
            for reg in positionals {
                out.push_str(&Self::help_line(&reg.dest, reg.config.help.as_deref()));
            }
        }

        out.push_str("\noptions:\n");
        if let Some((short, long)) = &help_flags {
            out.push_str(&Self::help_line(
                &format!("{short}, {long}"),
                Some("show this help message and exit"),
            ));
        }
        for reg in self.args.iter().filter(|r| !r.positional) {
            let mut left = reg.flags.join(", ");
            if reg.consumes_values() {
                left.push(' ');
                left.push_str(&reg.dest.to_uppercase());
            }
            out.push_str(&Self::help_line(&left, reg.config.help.as_deref()));
        }

        if let Some(epilog) = &self.epilog {
            out.push('\n');
            out.push_str(epilog);
            out.push('\n');
        }
        out
    }

    fn help_line(left: &str, help: Option<&str>) -> String {
        match help {
            Some(help) if left.len() <= 22 => format!("  {left:<22} {help}\n"),
            Some(help) => format!("  {left}\n{:>24} {help}\n", ""),
            None => format!("  {left}\n"),
        }
    }

    /// Short and long auto-help flags, when enabled and a prefix char exists.
    fn help_flags(&self) -> Option<(String, String)> {
        if !self.add_help {
            return None;
        }
        let p = self.prefix_chars.chars().next()?;
        Some((format!("{p}h"), format!("{p}{p}help")))
    }

    fn is_help_flag(&self, name: &str) -> bool {
        match self.help_flags() {
            Some((short, long)) => name == short || name == long,
            None => false,
        }
    }

    /// `--` (first prefix char doubled) ends option recognition.
    fn option_terminator(&self) -> Option<String> {
        let p = self.prefix_chars.chars().next()?;
        Some(format!("{p}{p}"))
    }

    /// Registration-time test: does this name declare an option flag?
    fn is_option_name(&self, name: &str) -> bool {
        name.chars()
            .next()
            .is_some_and(|c| self.prefix_chars.contains(c))
    }

    /// Parse-time test: does this token look like an option? A bare prefix char
    /// and negative-number-looking tokens are values.
    fn looks_like_option(&self, token: &str) -> bool {
        let mut chars = token.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        if !self.prefix_chars.contains(first) {
            return false;
        }
        let Some(second) = chars.next() else {
            return false;
        };
        !(first == '-' && (second.is_ascii_digit() || second == '.'))
    }

    /// A long flag starts with two prefix characters.
    fn is_long_flag(&self, flag: &str) -> bool {
        let mut chars = flag.chars();
        matches!(
            (chars.next(), chars.next()),
            (Some(a), Some(b)) if self.prefix_chars.contains(a) && self.prefix_chars.contains(b)
        )
    }

    fn resolve_dest(&self, flags: &[String], config: &ArgConfig, positional: bool) -> String {
        if let Some(dest) = &config.dest {
            return dest.clone();
        }
        let name = if positional {
            &flags[0]
        } else {
            flags
                .iter()
                .find(|f| self.is_long_flag(f))
                .unwrap_or(&flags[0])
        };
        name.trim_start_matches(|c: char| self.prefix_chars.contains(c))
            .replace('-', "_")
    }

    fn resolve_option(&self, name: &str) -> Result<usize, ParseError> {
        for (idx, reg) in self.args.iter().enumerate() {
            if !reg.positional && reg.flags.iter().any(|f| f == name) {
                return Ok(idx);
            }
        }
        if self.allow_abbrev && self.is_long_flag(name) {
            let mut hits: Vec<(usize, String)> = Vec::new();
            for (idx, reg) in self.args.iter().enumerate() {
                if reg.positional {
                    continue;
                }
                for flag in &reg.flags {
                    if self.is_long_flag(flag) && flag.starts_with(name) {
                        hits.push((idx, flag.clone()));
                    }
                }
            }
            // Several aliases of the same argument count as one hit.
            hits.dedup_by_key(|(idx, _)| *idx);
            match hits.len() {
                0 => {}
                1 => return Ok(hits[0].0),
                _ => {
                    return Err(ParseError::AmbiguousAbbreviation(
                        name.to_string(),
                        hits.into_iter().map(|(_, f)| f).collect(),
                    ))
                }
            }
        }
        Err(ParseError::UnknownArgument(name.to_string()))
    }

    /// Consumes and converts value tokens for a Store/Append option occurrence.
    fn consume_option_values(
        &self,
        name: &str,
        reg: &Registered,
        inline: Option<String>,
        tokens: &[String],
        i: &mut usize,
    ) -> Result<Value, ParseError> {
        let nargs = reg.config.nargs;
        let mut raw: Vec<String> = Vec::new();
        if let Some(v) = inline {
            raw.push(v);
        } else {
            match nargs {
                None => {
                    self.take_value_token(name, tokens, i, &mut raw)?;
                }
                Some(Arity::Exact(k)) => {
                    for _ in 0..k {
                        self.take_value_token(name, tokens, i, &mut raw)?;
                    }
                }
                Some(Arity::Optional) => {
                    if *i < tokens.len() && !self.looks_like_option(&tokens[*i]) {
                        raw.push(tokens[*i].clone());
                        *i += 1;
                    }
                }
                Some(Arity::ZeroOrMore) | Some(Arity::OneOrMore) => {
                    while *i < tokens.len() && !self.looks_like_option(&tokens[*i]) {
                        raw.push(tokens[*i].clone());
                        *i += 1;
                    }
                }
            }
        }

        let expected = match nargs {
            None => 1,
            Some(Arity::Exact(k)) => k,
            Some(Arity::OneOrMore) => 1.max(raw.len()),
            Some(Arity::Optional) | Some(Arity::ZeroOrMore) => raw.len(),
        };
        if raw.len() != expected || (nargs == Some(Arity::OneOrMore) && raw.is_empty()) {
            return Err(ParseError::ExpectedValue(name.to_string()));
        }

        let mut converted = Vec::with_capacity(raw.len());
        for token in &raw {
            converted.push(self.convert(name, reg, token)?);
        }
        Ok(match nargs {
            None => converted
                .pop()
                .ok_or_else(|| ParseError::ExpectedValue(name.to_string()))?,
            Some(Arity::Optional) => match converted.pop() {
                Some(v) => v,
                None => reg.config.const_.clone().unwrap_or(Value::Null),
            },
            Some(Arity::Exact(_)) | Some(Arity::ZeroOrMore) | Some(Arity::OneOrMore) => {
                Value::List(converted)
            }
        })
    }

    fn take_value_token(
        &self,
        name: &str,
        tokens: &[String],
        i: &mut usize,
        raw: &mut Vec<String>,
    ) -> Result<(), ParseError> {
        if *i >= tokens.len() || self.looks_like_option(&tokens[*i]) {
            return Err(ParseError::ExpectedValue(name.to_string()));
        }
        raw.push(tokens[*i].clone());
        *i += 1;
        Ok(())
    }

    /// Coerces a raw token to a [`Value`], then runs the type predicate and the
    /// choices constraint.
    fn convert(&self, name: &str, reg: &Registered, raw: &str) -> Result<Value, ParseError> {
        let value = Value::from_token(raw);
        if let Some(checker) = &reg.config.ty {
            if !checker.check(&value) {
                return Err(ParseError::InvalidValue(name.to_string(), raw.to_string()));
            }
        }
        if !reg.config.choices.is_empty() && !reg.config.choices.contains(&value) {
            let choices = reg
                .config
                .choices
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ParseError::InvalidChoice(
                name.to_string(),
                raw.to_string(),
                choices,
            ));
        }
        Ok(value)
    }

    /// Assigns leftover non-option tokens to positionals in declared order.
    /// Greedy: a `*`/`+` positional takes everything remaining.
    fn fill_positionals(
        &self,
        out: &mut BTreeMap<String, Value>,
        supplied: &mut [bool],
        pending: &[String],
    ) -> Result<(), ParseError> {
        let mut cursor = 0;
        for (idx, reg) in self.args.iter().enumerate() {
            if !reg.positional {
                continue;
            }
            let available = pending.len() - cursor;
            let min = reg.min_tokens();
            if available < min {
                if reg.config.required == Some(false) && available == 0 {
                    continue;
                }
                return Err(ParseError::MissingArgument(reg.flags.join("/")));
            }
            let take = match reg.config.nargs {
                None => 1,
                Some(Arity::Exact(k)) => k,
                Some(Arity::Optional) => available.min(1),
                Some(Arity::ZeroOrMore) | Some(Arity::OneOrMore) => available,
            };
            if take == 0 {
                continue;
            }
            if reg.config.deprecated {
                warn!(argument = %reg.flags[0], "argument is deprecated");
            }
            let mut converted = Vec::with_capacity(take);
            for token in &pending[cursor..cursor + take] {
                converted.push(self.convert(&reg.flags[0], reg, token)?);
            }
            cursor += take;
            let value = match reg.config.nargs {
                None | Some(Arity::Optional) => converted
                    .pop()
                    .ok_or_else(|| ParseError::ExpectedValue(reg.flags[0].clone()))?,
                _ => Value::List(converted),
            };
            out.insert(reg.dest.clone(), value);
            supplied[idx] = true;
        }
        if cursor < pending.len() {
            return Err(ParseError::UnexpectedArgument(pending[cursor].clone()));
        }
        Ok(())
    }

    /// Value for an argument that never showed up: explicit default, else the
    /// action's own default, else the parser-wide argument default.
    fn missing_value(&self, reg: &Registered) -> Value {
        if let Some(default) = &reg.config.default {
            return default.clone();
        }
        match reg.config.action {
            Some(Action::StoreTrue) => Value::Bool(false),
            Some(Action::StoreFalse) => Value::Bool(true),
            _ => self.argument_default.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_add_argument_rejects_empty_flag_list() {
        let mut parser = Parser::new();
        let err = parser.add_argument(vec![], ArgConfig::default()).unwrap_err();
        assert!(matches!(err, ParseError::MalformedFlagName(_)));
    }

    #[test]
    fn test_add_argument_rejects_empty_flag() {
        let mut parser = Parser::new();
        let err = parser
            .add_argument(flags(&[""]), ArgConfig::default())
            .unwrap_err();
        assert!(matches!(err, ParseError::MalformedFlagName(_)));
    }

    #[test]
    fn test_add_argument_rejects_bare_prefix() {
        let mut parser = Parser::new();
        let err = parser
            .add_argument(flags(&["--"]), ArgConfig::default())
            .unwrap_err();
        assert!(matches!(err, ParseError::MalformedFlagName(_)));
    }

    #[test]
    fn test_add_argument_rejects_duplicate_flag() {
        let mut parser = Parser::new();
        parser
            .add_argument(flags(&["--count"]), ArgConfig::default())
            .unwrap();
        let err = parser
            .add_argument(flags(&["--count"]), ArgConfig::default())
            .unwrap_err();
        assert_eq!(err, ParseError::DuplicateFlag("--count".to_string()));
    }

    #[test]
    fn test_add_argument_rejects_mixed_names() {
        let mut parser = Parser::new();
        let err = parser
            .add_argument(flags(&["--count", "count"]), ArgConfig::default())
            .unwrap_err();
        assert!(matches!(err, ParseError::MalformedFlagName(_)));
    }

    #[test]
    fn test_dest_prefers_long_flag() {
        let mut parser = Parser::new();
        parser
            .add_argument(flags(&["-v", "--verbose-mode"]), ArgConfig::default())
            .unwrap();
        assert_eq!(parser.args[0].dest, "verbose_mode");
    }

    #[test]
    fn test_dest_falls_back_to_first_flag() {
        let mut parser = Parser::new();
        parser
            .add_argument(flags(&["-v"]), ArgConfig::default())
            .unwrap();
        assert_eq!(parser.args[0].dest, "v");
    }

    #[test]
    fn test_dest_override() {
        let mut parser = Parser::new();
        let config = ArgConfig {
            dest: Some("level".to_string()),
            ..ArgConfig::default()
        };
        parser.add_argument(flags(&["-v"]), config).unwrap();
        assert_eq!(parser.args[0].dest, "level");
    }

    #[test]
    fn test_negative_number_is_a_value() {
        let parser = Parser::new();
        assert!(!parser.looks_like_option("-5"));
        assert!(!parser.looks_like_option("-.5"));
        assert!(parser.looks_like_option("--count"));
        assert!(parser.looks_like_option("-x"));
        assert!(!parser.looks_like_option("-"));
        assert!(!parser.looks_like_option("count"));
    }

    #[test]
    fn test_custom_prefix_chars() {
        let mut parser = Parser::new();
        parser.set_prefix_chars("+");
        parser
            .add_argument(flags(&["++jump"]), ArgConfig::default())
            .unwrap();
        assert_eq!(parser.args[0].dest, "jump");
        assert!(parser.looks_like_option("+j"));
        assert!(!parser.looks_like_option("-j"));
    }
}
