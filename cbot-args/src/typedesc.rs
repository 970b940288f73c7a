//! Structural type descriptors and the recursive matcher.
//!
//! A [`TypeDesc`] describes an allowed value shape: the null type, a primitive
//! kind, a union of descriptors, or a parameterized container. "No type declared"
//! is NOT a variant here; use-sites carry `Option<TypeDesc>` so the absent sentinel
//! stays distinct from the null type.

use cbot_core::{Kind, Value};
use tracing::warn;

use crate::error::TypeError;

/// Container kinds a [`TypeDesc::Generic`] can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    List,
    Tuple,
}

/// Closed structural description of an allowed value shape.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDesc {
    /// Matches only the null value.
    None,
    /// Matches values whose runtime kind is this kind or a subkind of it.
    Prim(Kind),
    /// Matches when any branch matches; flattening is not required, order is
    /// irrelevant.
    Union(Vec<TypeDesc>),
    /// Matches a container of the given kind. One type argument means a
    /// homogeneous container; several mean fixed arity with positional matching.
    /// Zero type arguments is invalid input.
    Generic(Container, Vec<TypeDesc>),
}

/// Structurally matches a value against a descriptor. Pure and recursive; works at
/// arbitrary nesting depth. A mismatch returns `Ok(false)`; only a generic
/// descriptor without type arguments is an error.
pub fn matches(value: &Value, desc: &TypeDesc) -> Result<bool, TypeError> {
    match desc {
        TypeDesc::None => Ok(value.is_null()),
        TypeDesc::Prim(kind) => Ok(value.kind().is_subkind_of(*kind)),
        TypeDesc::Union(branches) => {
            for branch in branches {
                if matches(value, branch)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        TypeDesc::Generic(container, args) => {
            if args.is_empty() {
                return Err(TypeError::InvalidDescriptor);
            }
            let elements = match (container, value) {
                (Container::List, Value::List(xs)) => xs,
                (Container::Tuple, Value::Tuple(xs)) => xs,
                _ => return Ok(false),
            };
            if args.len() == 1 {
                // Homogeneous: empty containers match vacuously.
                for x in elements {
                    if !matches(x, &args[0])? {
                        return Ok(false);
                    }
                }
                Ok(true)
            } else {
                if elements.len() != args.len() {
                    return Ok(false);
                }
                for (x, arg) in elements.iter().zip(args) {
                    if !matches(x, arg)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }
}

/// Per-argument validation predicate the parser runs on each coerced token.
/// Checkers built from equal descriptors behave identically.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeChecker {
    desc: TypeDesc,
}

impl TypeChecker {
    /// True when the value matches the wrapped descriptor. A malformed descriptor
    /// is reported as "no match" after a warning; it never escapes the predicate.
    pub fn check(&self, value: &Value) -> bool {
        match matches(value, &self.desc) {
            Ok(ok) => ok,
            Err(err) => {
                warn!(%err, "type check skipped malformed descriptor");
                false
            }
        }
    }

    pub fn descriptor(&self) -> &TypeDesc {
        &self.desc
    }
}

/// Wraps a descriptor as a [`TypeChecker`] for the parser's `type` knob.
pub fn type_checker(desc: TypeDesc) -> TypeChecker {
    TypeChecker { desc }
}
