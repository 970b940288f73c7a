//! Compiles a declarative [`CmdSpec`] into a configured [`Parser`].

use crate::parser::{ArgConfig, Parser};
use crate::spec::CmdSpec;
use crate::typedesc::type_checker;
use crate::ParseError;

/// Pure translation from spec to parser handle. Top-level knobs map one-to-one;
/// per-argument configuration carries only the fields the [`crate::Arg`] actually
/// set, so the parser's context-sensitive defaults survive omission. The only
/// errors are the registration step's flag-syntax errors; a failure aborts this
/// command's compilation and nothing else.
pub fn spec_to_parser(spec: CmdSpec) -> Result<Parser, ParseError> {
    let mut out = Parser::new();
    if let Some(desc) = spec.desc {
        out.set_description(desc);
    }
    if let Some(epilog) = spec.epilog {
        out.set_epilog(epilog);
    }
    out.set_add_help(spec.help);
    out.set_allow_abbrev(spec.abbr);
    out.set_prefix_chars(spec.prefix);
    out.set_argument_default(spec.default);
    for arg in spec.args {
        let config = ArgConfig {
            action: arg.action,
            nargs: arg.n,
            const_: arg.val,
            default: arg.default,
            ty: arg.t.map(type_checker),
            choices: arg.choices,
            help: arg.help,
            dest: arg.dest,
            required: Some(arg.req),
            deprecated: arg.deprecated,
        };
        out.add_argument(arg.name, config)?;
    }
    Ok(out)
}
