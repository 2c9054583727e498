//! autoargs - command-line parsers derived from command signatures.
//!
//! Describe a command's parameters once with a [`Signature`], and autoargs
//! builds the matching clap parser, turns parsed tokens back into positional
//! and keyword arguments, and invokes the command. Commands that return other
//! commands (or lookup [`Table`]s) chain into multi-level subcommands through
//! [`recursive_call`].
//!
//! ```no_run
//! use autoargs::{Coercion, Command, Parameter, Signature, Value};
//!
//! let my_sum = Command::new(
//!     Signature::new("my_sum")
//!         .param(Parameter::positional("a").annotated(Coercion::int()))
//!         .param(Parameter::positional("b").annotated(Coercion::int())),
//!     |args| Ok(Value::Int(args.arg(0).as_int()? + args.arg(1).as_int()?)),
//! );
//! assert_eq!(my_sum.call("1 2").unwrap(), Value::Int(3));
//! ```

pub mod config;
pub mod convert;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod parser;
pub mod signature;
pub mod target;
pub mod value;

pub use config::{ColorMode, Settings};
pub use convert::{to_call_arguments, CallArguments, Namespace};
pub use dispatch::{autorun, call, call_args, parse, parser, recursive_call, Dispatcher};
pub use error::{AutoargsError, OrExit, Result};
pub use parser::{build_parser, parse_tokens, Input, ParserSpec};
pub use signature::{Annotation, Coercion, ParamKind, Parameter, Signature};
pub use target::{Command, Table, Target};
pub use value::Value;
