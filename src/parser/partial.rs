//! Parsing of token sequences, including longest-prefix partial parsing.
//!
//! A partial parse tries the whole token sequence first and then shorter and
//! shorter prefixes, dropping one token from the right each time. The first
//! prefix the parser accepts wins and the untried suffix is handed back, so a
//! flat command line can be consumed one subcommand level at a time.
//!
//! clap's `try_get_matches_from` never prints, so rejected attempts stay
//! silent. Only the error that ends the search reaches the caller, which
//! renders it through [`AutoargsError::exit`](crate::error::AutoargsError::exit).

use clap::error::ErrorKind;
use clap::{ArgMatches, ColorChoice};
use tracing::{debug, trace};

use crate::convert::Namespace;
use crate::error::{AutoargsError, Result};
use crate::parser::definitions::{Arity, ParserSpec};
use crate::parser::tokenizer;
use crate::value::Value;

/// Command-line input: either already split, or a string to split shell-style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Tokens(Vec<String>),
    Text(String),
}

impl Input {
    /// Returns the tokens, splitting text input.
    pub fn into_tokens(self) -> Result<Vec<String>> {
        match self {
            Self::Tokens(tokens) => Ok(tokens),
            Self::Text(text) => Ok(tokenizer::split(&text)?),
        }
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for Input {
    fn from(tokens: Vec<String>) -> Self {
        Self::Tokens(tokens)
    }
}

impl From<Vec<&str>> for Input {
    fn from(tokens: Vec<&str>) -> Self {
        Self::Tokens(tokens.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Input {
    fn from(tokens: &[&str]) -> Self {
        Self::Tokens(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Input {
    fn from(tokens: [&str; N]) -> Self {
        Self::Tokens(tokens.iter().map(|t| t.to_string()).collect())
    }
}

/// Result of a parse: the namespace and the tokens that were not consumed.
#[derive(Debug)]
pub struct Parsed {
    pub namespace: Namespace,
    pub remaining: Vec<String>,
    /// Help or version request found in a longer prefix that was passed over.
    ///
    /// The request belongs to whichever level ends up taking `remaining`; if
    /// none can, it is the one to show.
    pub deferred_help: Option<clap::Error>,
}

/// Parses `input` against `spec`.
///
/// Without `partial` the whole input must parse, and a help or version
/// request is returned as an error right away. With `partial`, prefixes are
/// tried from longest to empty and the first accepted one wins. A help or
/// version request does not count as accepted: the search keeps shrinking and
/// the request is carried in [`Parsed::deferred_help`], or returned as the
/// error if no prefix is accepted at all. Otherwise, if even the empty prefix
/// is rejected its error is returned.
pub fn parse_tokens(
    input: impl Into<Input>,
    spec: &ParserSpec,
    partial: bool,
    color: ColorChoice,
) -> Result<Parsed> {
    let tokens = input.into().into_tokens()?;

    if !partial {
        let namespace = parse_once(&tokens, spec, color)?;
        return Ok(Parsed {
            namespace,
            remaining: Vec::new(),
            deferred_help: None,
        });
    }

    let mut deferred_help: Option<clap::Error> = None;
    for end in (0..=tokens.len()).rev() {
        match parse_once(&tokens[..end], spec, color) {
            Ok(namespace) => {
                debug!(
                    parser = %spec.display_name(),
                    consumed = end,
                    remaining = tokens.len() - end,
                    deferred_help = deferred_help.is_some(),
                    "Accepted prefix"
                );
                return Ok(Parsed {
                    namespace,
                    remaining: tokens[end..].to_vec(),
                    deferred_help,
                });
            }
            Err(AutoargsError::Usage(err)) if is_help_request(&err) => {
                trace!(
                    parser = %spec.display_name(),
                    prefix_len = end,
                    "Passing over help request"
                );
                if deferred_help.is_none() {
                    deferred_help = Some(err);
                }
            }
            Err(AutoargsError::Usage(err)) if end > 0 => {
                trace!(
                    parser = %spec.display_name(),
                    prefix_len = end,
                    kind = ?err.kind(),
                    "Rejected prefix"
                );
            }
            Err(AutoargsError::Usage(err)) => {
                return Err(deferred_help.unwrap_or(err).into());
            }
            Err(err) => return Err(err),
        }
    }

    // Only reachable when no prefix was accepted and the empty one asked for help.
    match deferred_help {
        Some(help) => Err(help.into()),
        None => Err(AutoargsError::internal("prefix search ended without a result")),
    }
}

/// Help and version requests are displays, not successful parses.
fn is_help_request(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

fn parse_once(tokens: &[String], spec: &ParserSpec, color: ColorChoice) -> Result<Namespace> {
    let matches = spec.to_clap(color).try_get_matches_from(tokens)?;
    to_namespace(spec, &matches)
}

/// Reads every argument of `spec` out of `matches`, applying defaults.
fn to_namespace(spec: &ParserSpec, matches: &ArgMatches) -> Result<Namespace> {
    let mut namespace = Namespace::new();

    for arg in &spec.arguments {
        let parsed = match arg.arity {
            Arity::One => matches
                .try_get_one::<Value>(&arg.dest)
                .map_err(|e| AutoargsError::internal(e.to_string()))?
                .cloned(),
            Arity::Any | Arity::Exactly(_) => matches
                .try_get_many::<Value>(&arg.dest)
                .map_err(|e| AutoargsError::internal(e.to_string()))?
                .map(|values| Value::List(values.cloned().collect())),
        };

        let value = match (parsed, &arg.default, arg.arity) {
            (Some(value), _, _) => value,
            (None, Some(default), _) => default.clone(),
            (None, None, Arity::Any) => Value::List(Vec::new()),
            (None, None, _) => Value::None,
        };
        namespace.insert(arg.dest.clone(), value);
    }

    Ok(namespace)
}
