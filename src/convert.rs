//! Conversion from parsed namespaces to call arguments.

use std::collections::HashMap;

use crate::error::{AutoargsError, Result};
use crate::signature::{ParamKind, Signature};
use crate::value::Value;

/// Parsed values keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    values: HashMap<String, Value>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn require(&self, name: &str) -> Result<Value> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| AutoargsError::missing_argument(name))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Namespace {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Positional and keyword arguments for one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArguments {
    /// Positional values, in order.
    pub positional: Vec<Value>,
    /// Keyword values in signature order.
    pub keyword: Vec<(String, Value)>,
}

impl CallArguments {
    /// Looks up a keyword argument.
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keyword.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Returns the positional argument at `index`, or [`Value::None`].
    pub fn arg(&self, index: usize) -> &Value {
        const NONE: &Value = &Value::None;
        self.positional.get(index).unwrap_or(NONE)
    }
}

/// Splits a namespace into positional and keyword arguments for `signature`.
///
/// Parameters are visited in declaration order. Positional-or-keyword values
/// are passed positionally while `default_to_arg` is set and nothing has
/// forced keyword form yet; after a variadic positional parameter every later
/// parameter is passed by keyword.
pub fn to_call_arguments(
    signature: &Signature,
    namespace: &Namespace,
    default_to_arg: bool,
) -> Result<CallArguments> {
    let mut args = CallArguments::default();
    let mut args_finished = false;

    for param in signature.inspect()? {
        let value = namespace.require(&param.name)?;
        match param.kind {
            ParamKind::VarPositional => {
                if args_finished {
                    return Err(AutoargsError::internal(format!(
                        "variadic '{}' follows keyword arguments",
                        param.name
                    )));
                }
                match value {
                    Value::List(items) => args.positional.extend(items),
                    Value::None => {}
                    single => args.positional.push(single),
                }
                args_finished = true;
            }
            ParamKind::PositionalOnly => {
                if args_finished {
                    return Err(AutoargsError::internal(format!(
                        "positional-only '{}' follows keyword arguments",
                        param.name
                    )));
                }
                args.positional.push(value);
            }
            ParamKind::PositionalOrKeyword if !args_finished && default_to_arg => {
                args.positional.push(value);
            }
            _ => {
                args_finished = true;
                args.keyword.push((param.name.clone(), value));
            }
        }
    }

    Ok(args)
}
