//! Declarative command signatures.
//!
//! A [`Signature`] lists a command's parameters in declaration order together
//! with their binding kind, default and annotation. Parser building and
//! argument conversion are both driven from it.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{AutoargsError, Result};
use crate::value::Value;

/// Binding category of a parameter, following ordinary call-binding rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParamKind {
    /// Bound only by position.
    PositionalOnly,
    /// Bound by position or by name.
    PositionalOrKeyword,
    /// Collects any number of trailing positional values (`*args`).
    VarPositional,
    /// Bound only by name.
    KeywordOnly,
    /// Collects arbitrary named values (`**kwargs`). Not supported by the parser builder.
    VarKeyword,
}

impl ParamKind {
    /// Returns true if values of this kind can be bound positionally.
    pub fn is_positional(self) -> bool {
        matches!(
            self,
            Self::PositionalOnly | Self::PositionalOrKeyword | Self::VarPositional
        )
    }

    /// Returns true if values of this kind can be bound by name.
    pub fn is_keyword(self) -> bool {
        matches!(self, Self::PositionalOrKeyword | Self::KeywordOnly)
    }
}

type CoerceFn = dyn Fn(&str) -> std::result::Result<Value, String> + Send + Sync;

/// A conversion from a raw command-line string into a [`Value`].
#[derive(Clone)]
pub struct Coercion {
    name: Option<String>,
    func: Arc<CoerceFn>,
}

impl Coercion {
    /// Creates a named coercion. The name is shown as help text.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            func: Arc::new(func),
        }
    }

    /// Creates a coercion without a human-readable name.
    pub fn anonymous<F>(func: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            name: None,
            func: Arc::new(func),
        }
    }

    /// Parses base-10 integers.
    pub fn int() -> Self {
        Self::new("int", |raw| {
            raw.trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| format!("invalid int value: '{raw}'"))
        })
    }

    /// Parses floating point numbers.
    pub fn float() -> Self {
        Self::new("float", |raw| {
            raw.trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| format!("invalid float value: '{raw}'"))
        })
    }

    /// Keeps the raw string.
    pub fn string() -> Self {
        Self::new("str", |raw| Ok(Value::Str(raw.to_string())))
    }

    /// Accepts the usual spellings of true and false.
    pub fn boolean() -> Self {
        Self::new("bool", |raw| match raw.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Value::Bool(true)),
            "0" | "false" | "no" | "off" => Ok(Value::Bool(false)),
            _ => Err(format!("invalid bool value: '{raw}'")),
        })
    }

    /// Returns the coercion's human-readable name, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Applies the coercion to a raw token.
    pub fn apply(&self, raw: &str) -> std::result::Result<Value, String> {
        (self.func)(raw)
    }
}

impl fmt::Debug for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coercion")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Extra information attached to a parameter that shapes its parser entry.
#[derive(Debug, Clone)]
pub enum Annotation {
    /// Convert tokens with this function; a named coercion also provides help text.
    Coerce(Coercion),
    /// Help text.
    Help(String),
    /// Restrict values to this set.
    Choices(Vec<String>),
    /// Consume exactly this many tokens.
    Arity(usize),
}

impl From<Coercion> for Annotation {
    fn from(coercion: Coercion) -> Self {
        Self::Coerce(coercion)
    }
}

impl From<&str> for Annotation {
    fn from(help: &str) -> Self {
        Self::Help(help.to_string())
    }
}

impl From<String> for Annotation {
    fn from(help: String) -> Self {
        Self::Help(help)
    }
}

impl From<usize> for Annotation {
    fn from(arity: usize) -> Self {
        Self::Arity(arity)
    }
}

impl<const N: usize> From<[&str; N]> for Annotation {
    fn from(choices: [&str; N]) -> Self {
        Self::Choices(choices.iter().map(|c| c.to_string()).collect())
    }
}

impl From<Vec<String>> for Annotation {
    fn from(choices: Vec<String>) -> Self {
        Self::Choices(choices)
    }
}

/// A single declared parameter.
#[derive(Debug, Clone)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Binding kind.
    pub kind: ParamKind,
    /// Default value, if the parameter has one.
    pub default: Option<Value>,
    /// Optional annotation.
    pub annotation: Option<Annotation>,
}

impl Parameter {
    /// Creates a parameter of the given kind with no default or annotation.
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            annotation: None,
        }
    }

    pub fn positional_only(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::PositionalOnly)
    }

    pub fn positional(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::PositionalOrKeyword)
    }

    pub fn var_positional(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::VarPositional)
    }

    pub fn keyword_only(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::KeywordOnly)
    }

    pub fn var_keyword(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::VarKeyword)
    }

    /// Sets the default value.
    pub fn with_default(self, default: impl Into<Value>) -> Self {
        Self {
            default: Some(default.into()),
            ..self
        }
    }

    /// Sets the annotation.
    pub fn annotated(self, annotation: impl Into<Annotation>) -> Self {
        Self {
            annotation: Some(annotation.into()),
            ..self
        }
    }

    /// Returns true if the parameter carries a default.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// The ordered parameter list of a command, plus its display name and doc.
#[derive(Debug, Clone)]
pub struct Signature {
    name: String,
    doc: Option<String>,
    params: Vec<Parameter>,
}

impl Signature {
    /// Creates an empty signature for a command with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            params: Vec::new(),
        }
    }

    /// Appends a parameter.
    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    /// Sets the doc string used as parser description.
    pub fn doc(self, doc: impl Into<String>) -> Self {
        Self {
            doc: Some(doc.into()),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc_text(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Returns the parameters as declared, without validation.
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Returns the validated parameter list.
    ///
    /// Fails with `UnsupportedParameterKind` on a variadic keyword parameter and
    /// with `InvalidSignature` when the declaration breaks call-binding rules.
    pub fn inspect(&self) -> Result<&[Parameter]> {
        let mut seen = HashSet::new();
        let mut previous = ParamKind::PositionalOnly;
        let mut saw_default = false;

        for param in &self.params {
            if param.kind == ParamKind::VarKeyword {
                return Err(AutoargsError::unsupported_kind(&param.name));
            }
            if !seen.insert(param.name.as_str()) {
                return Err(AutoargsError::invalid_signature(format!(
                    "duplicate parameter '{}' in '{}'",
                    param.name, self.name
                )));
            }
            if param.kind < previous {
                return Err(AutoargsError::invalid_signature(format!(
                    "parameter '{}' of kind {:?} follows kind {:?}",
                    param.name, param.kind, previous
                )));
            }
            if param.kind == ParamKind::VarPositional && previous == ParamKind::VarPositional {
                return Err(AutoargsError::invalid_signature(format!(
                    "'{}' declares more than one variadic positional parameter",
                    self.name
                )));
            }
            if matches!(
                param.kind,
                ParamKind::PositionalOnly | ParamKind::PositionalOrKeyword
            ) {
                if saw_default && !param.has_default() {
                    return Err(AutoargsError::invalid_signature(format!(
                        "non-default parameter '{}' follows default parameter",
                        param.name
                    )));
                }
                saw_default |= param.has_default();
            }
            previous = param.kind;
        }

        Ok(&self.params)
    }
}
