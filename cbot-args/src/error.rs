use thiserror::Error;

/// Errors from structural type matching. A descriptor mismatch is an expected
/// outcome and returns `false`; only a descriptor that cannot be decomposed is an
/// error, local to the single `matches` call that saw it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("generic descriptor has no type arguments")]
    InvalidDescriptor,
}

/// Errors from argument registration and parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not a failure: carries the rendered help text for the caller to display.
    #[error("{0}")]
    HelpRequested(String),

    #[error("malformed flag name: {0}")]
    MalformedFlagName(String),

    #[error("conflicting flag: {0}")]
    DuplicateFlag(String),

    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("ambiguous option: {0} could match {1:?}")]
    AmbiguousAbbreviation(String, Vec<String>),

    #[error("argument {0}: expected a value")]
    ExpectedValue(String),

    #[error("argument {0}: invalid value: {1}")]
    InvalidValue(String, String),

    #[error("argument {0}: invalid choice: {1} (choose from {2})")]
    InvalidChoice(String, String, String),

    #[error("missing required argument: {0}")]
    MissingArgument(String),

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}
