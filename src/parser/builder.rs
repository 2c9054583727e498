//! Derivation of parser definitions from command signatures.

use tracing::debug;

use crate::error::{AutoargsError, Result};
use crate::parser::definitions::{ArgumentSpec, Arity, ParserSpec};
use crate::signature::{Annotation, ParamKind, Parameter, Signature};

/// Builds the parser for `signature`.
///
/// `name` overrides the signature's name as the parser's display name. When a
/// `parent` is given the new parser is nested under it and inherits its
/// command path.
pub fn build_parser(
    signature: &Signature,
    name: Option<&str>,
    parent: Option<ParserSpec>,
) -> Result<ParserSpec> {
    let arguments = signature
        .inspect()?
        .iter()
        .map(build_argument)
        .collect::<Result<Vec<_>>>()?;
    check_positional_layout(&arguments)?;

    let spec = ParserSpec {
        name: name.unwrap_or(signature.name()).to_string(),
        about: signature.doc_text().map(str::to_string),
        arguments,
        parent: parent.map(Box::new),
    };

    debug!(
        parser = %spec.display_name(),
        arguments = spec.arguments.len(),
        "Built parser"
    );

    Ok(spec)
}

/// Builds the parser entry for a single parameter.
pub fn build_argument(param: &Parameter) -> Result<ArgumentSpec> {
    if param.name.starts_with('-') {
        return Err(AutoargsError::name_collision(&param.name));
    }
    if param.kind == ParamKind::VarKeyword {
        return Err(AutoargsError::unsupported_kind(&param.name));
    }

    let mut spec = if param.kind.is_positional() && !param.has_default() {
        ArgumentSpec {
            dest: param.name.clone(),
            flags: vec![param.name.clone()],
            required: param.kind != ParamKind::VarPositional,
            arity: if param.kind == ParamKind::VarPositional {
                Arity::Any
            } else {
                Arity::One
            },
            coercion: None,
            help: None,
            choices: None,
            default: None,
        }
    } else {
        let prefix = if param.name.chars().count() == 1 { "-" } else { "--" };
        ArgumentSpec {
            dest: param.name.clone(),
            flags: vec![format!("{prefix}{}", param.name)],
            required: !param.has_default(),
            arity: Arity::One,
            coercion: None,
            help: None,
            choices: None,
            default: param.default.clone(),
        }
    };

    match &param.annotation {
        Some(Annotation::Coerce(coercion)) => {
            spec.help = coercion.name().map(str::to_string);
            spec.coercion = Some(coercion.clone());
        }
        Some(Annotation::Help(text)) => spec.help = Some(text.clone()),
        Some(Annotation::Choices(choices)) => spec.choices = Some(choices.clone()),
        Some(Annotation::Arity(0)) => {
            return Err(AutoargsError::invalid_signature(format!(
                "'{}' must take at least one value",
                param.name
            )));
        }
        Some(Annotation::Arity(n)) => spec.arity = Arity::Exactly(*n),
        None => {}
    }

    Ok(spec)
}

/// Rejects positional layouts that cannot be split unambiguously.
///
/// A positional taking several values may only be followed by one more
/// positional, and that one must be required and take a fixed count.
fn check_positional_layout(arguments: &[ArgumentSpec]) -> Result<()> {
    let positionals: Vec<&ArgumentSpec> =
        arguments.iter().filter(|arg| arg.is_positional()).collect();
    let Some((last, earlier)) = positionals.split_last() else {
        return Ok(());
    };

    for (index, arg) in earlier.iter().enumerate() {
        if !takes_several(arg.arity) {
            continue;
        }
        let second_to_last = index + 1 == earlier.len();
        if !second_to_last || !last.required || last.arity == Arity::Any {
            return Err(AutoargsError::invalid_signature(format!(
                "positional '{}' takes several values and cannot be followed by '{}'",
                arg.dest,
                positionals[index + 1].dest
            )));
        }
    }

    Ok(())
}

fn takes_several(arity: Arity) -> bool {
    match arity {
        Arity::One => false,
        Arity::Any => true,
        Arity::Exactly(n) => n > 1,
    }
}
