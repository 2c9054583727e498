//! Declarative parser definitions.
//!
//! An [`ArgumentSpec`] describes one parser entry and a [`ParserSpec`] an
//! ordered set of them. Both are plain data derived from a signature and are
//! lowered to a `clap::Command` only when tokens are parsed, which keeps
//! parser building testable without invoking clap.

use std::ffi::OsStr;

use clap::builder::{PossibleValuesParser, TypedValueParser, ValueParser};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ColorChoice};

use crate::signature::Coercion;
use crate::value::Value;

/// Number of tokens an argument consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one token.
    One,
    /// Any number of tokens, including none.
    Any,
    /// A fixed number of tokens.
    Exactly(usize),
}

/// Definition of one parser argument.
#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    /// Namespace key the parsed value is stored under.
    pub dest: String,
    /// `name` for a positional argument, `-n` or `--name` for a flag.
    pub flags: Vec<String>,
    /// Whether the argument must be present.
    pub required: bool,
    /// Token count.
    pub arity: Arity,
    /// Conversion applied to each token.
    pub coercion: Option<Coercion>,
    /// Help text.
    pub help: Option<String>,
    /// Allowed values.
    pub choices: Option<Vec<String>>,
    /// Value used when the argument is absent.
    pub default: Option<Value>,
}

impl ArgumentSpec {
    /// Returns true if the argument is bound by position rather than by flag.
    pub fn is_positional(&self) -> bool {
        self.flags.iter().all(|flag| !flag.starts_with('-'))
    }

    fn value_parser(&self) -> ValueParser {
        match &self.choices {
            Some(choices) => PossibleValuesParser::new(choices.clone())
                .map(Value::Str)
                .into(),
            None => self.coercion.clone().unwrap_or_else(Coercion::string).into(),
        }
    }

    /// Lowers the definition to a clap argument.
    pub fn to_clap(&self) -> Arg {
        let mut arg = Arg::new(self.dest.clone())
            .required(self.required)
            .allow_negative_numbers(true)
            .value_parser(self.value_parser());

        for flag in &self.flags {
            if let Some(long) = flag.strip_prefix("--") {
                arg = arg.long(long.to_string());
            } else if let Some(short) = flag.strip_prefix('-').and_then(|s| s.chars().next()) {
                arg = arg.short(short);
            }
        }

        arg = match self.arity {
            Arity::One => arg.num_args(1).action(ArgAction::Set),
            Arity::Any => arg.num_args(0..).action(ArgAction::Append),
            Arity::Exactly(n) => arg.num_args(n).action(ArgAction::Set),
        };

        if let Some(help) = &self.help {
            arg = arg.help(help.clone());
        }

        arg
    }
}

/// Definition of a parser: its name, description, arguments, and the parser it is nested under.
#[derive(Debug, Clone)]
pub struct ParserSpec {
    /// Display name of this level.
    pub name: String,
    /// Description shown in help.
    pub about: Option<String>,
    /// Argument definitions in signature order.
    pub arguments: Vec<ArgumentSpec>,
    /// Parser of the enclosing level, if nested.
    pub parent: Option<Box<ParserSpec>>,
}

impl ParserSpec {
    /// Returns the names from the root parser down to this one.
    pub fn path(&self) -> Vec<&str> {
        let mut names = vec![self.name.as_str()];
        let mut current = self.parent.as_deref();
        while let Some(spec) = current {
            names.push(spec.name.as_str());
            current = spec.parent.as_deref();
        }
        names.reverse();
        names
    }

    /// Returns the full command path used in usage lines, e.g. `prog sub1 sub2`.
    pub fn display_name(&self) -> String {
        self.path().join(" ")
    }

    /// Returns the nesting depth (0 for a root parser).
    pub fn depth(&self) -> usize {
        self.path().len() - 1
    }

    /// Looks up an argument definition by destination name.
    pub fn argument(&self, dest: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|arg| arg.dest == dest)
    }

    /// Lowers the definition to a clap command that parses bare tokens.
    pub fn to_clap(&self, color: ColorChoice) -> clap::Command {
        let mut cmd = clap::Command::new(self.name.clone())
            .bin_name(self.display_name())
            .no_binary_name(true)
            .disable_help_subcommand(true)
            .color(color);

        if let Some(about) = &self.about {
            cmd = cmd.about(about.clone());
        }

        // A parameter named `h` or `help` takes over the flag.
        let shadows_help = self
            .arguments
            .iter()
            .flat_map(|arg| arg.flags.iter())
            .any(|flag| flag == "-h" || flag == "--help");
        if shadows_help {
            cmd = cmd.disable_help_flag(true);
        }

        cmd.args(self.arguments.iter().map(ArgumentSpec::to_clap))
    }
}

impl TypedValueParser for Coercion {
    type Value = Value;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let raw = value
            .to_str()
            .ok_or_else(|| clap::Error::new(ErrorKind::InvalidUtf8).with_cmd(cmd))?;

        self.apply(raw).map_err(|reason| {
            let arg = arg
                .map(ToString::to_string)
                .unwrap_or_else(|| "...".to_string());
            clap::Error::raw(
                ErrorKind::ValueValidation,
                format!("invalid value '{raw}' for '{arg}': {reason}\n"),
            )
            .with_cmd(cmd)
        })
    }
}
