//! # cbot-args
//!
//! Declarative command-argument system: a structural [`TypeDesc`] grammar with a
//! recursive matcher, the [`Arg`]/[`CmdSpec`] value objects describing a command's
//! argument set, an argparse-style [`Parser`], and the [`spec_to_parser`] compiler
//! turning a spec into a working parser.
//!
//! Field presence matters throughout: an `Arg` field left unset is omitted from the
//! compiled parser configuration entirely, so the parser's own context-sensitive
//! defaults stay in effect.

pub mod arg;
pub mod compile;
pub mod error;
pub mod parser;
pub mod spec;
pub mod typedesc;

pub use arg::{Action, Arg, Arity};
pub use compile::spec_to_parser;
pub use error::{ParseError, TypeError};
pub use parser::{ArgConfig, Namespace, Parser};
pub use spec::CmdSpec;
pub use typedesc::{matches, type_checker, Container, TypeChecker, TypeDesc};
