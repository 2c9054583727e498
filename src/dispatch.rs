//! Entry points and the recursive subcommand dispatcher.
//!
//! Every entry point composes the same steps: build a parser from a
//! signature, parse tokens, convert the namespace into call arguments and
//! invoke. [`Dispatcher::recursive_call`] repeats those steps on whatever the
//! previous invocation returned until the tokens run out, which gives
//! `prog sub1 sub2 --flag value` style command lines without declaring where
//! one level's arguments stop.

use clap::ColorChoice;
use tracing::debug;

use crate::config::Settings;
use crate::convert::{to_call_arguments, CallArguments, Namespace};
use crate::error::{AutoargsError, Result};
use crate::parser::{build_parser, parse_tokens, Input, Parsed, ParserSpec};
use crate::target::{Command, Target};
use crate::value::Value;

/// Runs commands against command-line input using a fixed set of settings.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    settings: Settings,
}

impl Dispatcher {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn color(&self) -> ColorChoice {
        self.settings.color.into()
    }

    /// Builds the parser for a command without parsing anything.
    pub fn parser(&self, command: &Command) -> Result<ParserSpec> {
        build_parser(command.signature(), None, None)
    }

    /// Parses the whole input into a namespace.
    pub fn parse(&self, command: &Command, input: impl Into<Input>) -> Result<Namespace> {
        let spec = self.parser(command)?;
        let Parsed { namespace, .. } = parse_tokens(input, &spec, false, self.color())?;
        Ok(namespace)
    }

    /// Parses the whole input and returns the arguments the command would be called with.
    pub fn call_args(&self, command: &Command, input: impl Into<Input>) -> Result<CallArguments> {
        let namespace = self.parse(command, input)?;
        to_call_arguments(command.signature(), &namespace, self.settings.default_to_arg)
    }

    /// Parses the whole input and invokes the command.
    pub fn call(&self, command: &Command, input: impl Into<Input>) -> Result<Value> {
        let args = self.call_args(command, input)?;
        command.invoke(args)
    }

    /// Dispatches the input through as many levels as it takes to consume it.
    ///
    /// Each level parses the longest prefix its parser accepts, invokes the
    /// command and continues with the returned target on the leftover tokens.
    /// At least one level always runs, so empty input still parses (and
    /// reports missing arguments or help) at the top level. A help request
    /// travels down to the deepest level that can take it. Levels after the
    /// first are named after the tokens that selected them.
    pub fn recursive_call(
        &self,
        target: impl Into<Target>,
        input: impl Into<Input>,
        name: Option<&str>,
    ) -> Result<Value> {
        let mut tokens = input.into().into_tokens()?;
        let mut target = target.into();
        let mut name = name.map(str::to_string);
        let mut parent: Option<ParserSpec> = None;

        loop {
            let command = target.into_command(name.as_deref());
            let spec = build_parser(command.signature(), name.as_deref(), parent.take())?;
            let Parsed {
                namespace,
                remaining,
                deferred_help,
            } = parse_tokens(tokens.clone(), &spec, true, self.color())?;

            let args =
                to_call_arguments(command.signature(), &namespace, self.settings.default_to_arg)?;
            let result = command.invoke(args)?;

            let consumed = &tokens[..tokens.len() - remaining.len()];
            debug!(
                level = spec.depth(),
                command = %spec.display_name(),
                consumed = consumed.len(),
                remaining = remaining.len(),
                "Dispatched level"
            );

            if remaining.is_empty() {
                return Ok(result);
            }

            // A passed-over help request is shown when nothing can take the rest.
            target = match (result.into_target(), deferred_help) {
                (Some(next), _) => next,
                (None, Some(help)) => return Err(help.into()),
                (None, None) => {
                    return Err(AutoargsError::not_dispatchable(format!(
                        "'{}' cannot take the remaining arguments {:?}",
                        spec.display_name(),
                        remaining
                    )));
                }
            };
            name = Some(level_name(consumed));
            parent = Some(spec);
            tokens = remaining;
        }
    }
}

/// Names a nested level after the tokens that selected it.
///
/// A single token is used as is; several are shown as a quoted list.
fn level_name(consumed: &[String]) -> String {
    match consumed {
        [single] => single.clone(),
        many => {
            let quoted: Vec<String> = many.iter().map(|t| format!("'{t}'")).collect();
            format!("[{}]", quoted.join(", "))
        }
    }
}

/// Builds the parser for a command with default settings.
pub fn parser(command: &Command) -> Result<ParserSpec> {
    Dispatcher::default().parser(command)
}

/// Parses input into a namespace with default settings.
pub fn parse(command: &Command, input: impl Into<Input>) -> Result<Namespace> {
    Dispatcher::default().parse(command, input)
}

/// Parses input into call arguments with default settings.
pub fn call_args(command: &Command, input: impl Into<Input>) -> Result<CallArguments> {
    Dispatcher::default().call_args(command, input)
}

/// Parses input and invokes the command with default settings.
pub fn call(command: &Command, input: impl Into<Input>) -> Result<Value> {
    Dispatcher::default().call(command, input)
}

/// Dispatches input recursively with default settings.
pub fn recursive_call(target: impl Into<Target>, input: impl Into<Input>) -> Result<Value> {
    Dispatcher::default().recursive_call(target, input, None)
}

/// Runs a command or table as a program's entry point.
pub fn autorun(target: impl Into<Target>, args: impl Into<Input>) -> Result<Value> {
    recursive_call(target, args)
}

/// Entry points bound to the command itself.
impl Command {
    /// See [`Dispatcher::parser`].
    pub fn parser(&self) -> Result<ParserSpec> {
        parser(self)
    }

    /// See [`Dispatcher::parse`].
    pub fn parse(&self, input: impl Into<Input>) -> Result<Namespace> {
        parse(self, input)
    }

    /// See [`Dispatcher::call_args`].
    pub fn call_args(&self, input: impl Into<Input>) -> Result<CallArguments> {
        call_args(self, input)
    }

    /// See [`Dispatcher::call`].
    pub fn call(&self, input: impl Into<Input>) -> Result<Value> {
        call(self, input)
    }

    /// See [`Dispatcher::recursive_call`].
    pub fn recursive_call(&self, input: impl Into<Input>) -> Result<Value> {
        recursive_call(self.clone(), input)
    }
}
