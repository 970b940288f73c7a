//! Dynamic values: argument defaults, consts, choices, and parse results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Runtime value carried through the argument pipeline.
///
/// `List` is an open-ended homogeneous-ish sequence, `Tuple` a fixed-arity one;
/// structural type matching treats them as distinct container kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
}

/// Closed set of runtime kinds, one per [`Value`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    List,
    Tuple,
}

impl Kind {
    /// Subkind relation used by primitive matching. `Bool` is a subkind of `Int`,
    /// mirroring the source runtime where booleans are integers; every kind is a
    /// subkind of itself.
    pub fn is_subkind_of(self, other: Kind) -> bool {
        self == other || (self == Kind::Bool && other == Kind::Int)
    }
}

impl Value {
    /// Returns the runtime kind tag of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::List(_) => Kind::List,
            Value::Tuple(_) => Kind::Tuple,
        }
    }

    /// Interprets a raw command-line token as the most specific literal:
    /// `true`/`false`, then integer, then float, falling back to a string.
    pub fn from_token(token: &str) -> Self {
        match token {
            "true" => return Value::Bool(true),
            "false" => return Value::Bool(false),
            _ => {}
        }
        if let Ok(n) = token.parse::<i64>() {
            return Value::Int(n);
        }
        if let Ok(x) = token.parse::<f64>() {
            return Value::Float(x);
        }
        Value::Str(token.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, xs: &[Value]) -> fmt::Result {
            for (i, x) in xs.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{x}")?;
            }
            Ok(())
        }
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::List(xs) => {
                write!(f, "[")?;
                join(f, xs)?;
                write!(f, "]")
            }
            Value::Tuple(xs) => {
                write!(f, "(")?;
                join(f, xs)?;
                write!(f, ")")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(xs: Vec<Value>) -> Self {
        Value::List(xs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_literals() {
        assert_eq!(Value::from_token("true"), Value::Bool(true));
        assert_eq!(Value::from_token("false"), Value::Bool(false));
        assert_eq!(Value::from_token("42"), Value::Int(42));
        assert_eq!(Value::from_token("-7"), Value::Int(-7));
        assert_eq!(Value::from_token("2.5"), Value::Float(2.5));
        assert_eq!(Value::from_token("abc"), Value::Str("abc".to_string()));
        assert_eq!(Value::from_token(""), Value::Str(String::new()));
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(Value::Null.kind(), Kind::Null);
        assert_eq!(Value::Bool(true).kind(), Kind::Bool);
        assert_eq!(Value::List(vec![]).kind(), Kind::List);
        assert_eq!(Value::Tuple(vec![]).kind(), Kind::Tuple);
    }

    #[test]
    fn test_subkind_lattice() {
        assert!(Kind::Bool.is_subkind_of(Kind::Bool));
        assert!(Kind::Bool.is_subkind_of(Kind::Int));
        assert!(!Kind::Int.is_subkind_of(Kind::Bool));
        assert!(!Kind::Int.is_subkind_of(Kind::Float));
        assert!(!Kind::List.is_subkind_of(Kind::Tuple));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Int(3).to_string(), "3");
        let list = Value::List(vec![Value::Int(1), Value::Str("a".into())]);
        assert_eq!(list.to_string(), "[1, a]");
        let tuple = Value::Tuple(vec![Value::Bool(true), Value::Int(2)]);
        assert_eq!(tuple.to_string(), "(true, 2)");
    }
}
