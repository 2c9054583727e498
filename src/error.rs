//! Error types for autoargs.
//!
//! Defines the error enum shared by signature inspection, parser building,
//! parsing, conversion and dispatch.

use thiserror::Error;

/// Main error type for autoargs operations.
#[derive(Error, Debug)]
pub enum AutoargsError {
    /// A `**kwargs`-style parameter was declared; variadic keyword capture is not supported.
    #[error("Unsupported parameter kind: '{name}' captures variadic keywords")]
    UnsupportedParameterKind { name: String },

    /// A parameter name starts with the flag prefix and would collide with flag syntax.
    #[error("Name collision: parameter '{name}' starts with '-'")]
    NameCollision { name: String },

    /// The signature violates ordinary call-binding rules (ordering, duplicates).
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// The command line was rejected by the parser (or help/version was requested).
    #[error("{0}")]
    Usage(#[from] clap::Error),

    /// A required parameter had no entry in the parsed namespace.
    #[error("Missing argument: '{0}'")]
    MissingArgument(String),

    /// Tokens remained but the previous level returned something that cannot be dispatched.
    #[error("Not dispatchable: {0}")]
    NotDispatchable(String),

    /// A value had a different type than a command body expected.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Shell-style splitting of a command string failed.
    #[error("Tokenize error: {0}")]
    Tokenize(String),

    /// A command body reported a failure.
    #[error("Invocation error: {0}")]
    Invocation(String),

    /// Configuration errors (unreadable or invalid config file).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AutoargsError {
    /// Creates an unsupported-parameter-kind error for the named parameter.
    pub fn unsupported_kind(name: impl Into<String>) -> Self {
        Self::UnsupportedParameterKind { name: name.into() }
    }

    /// Creates a name-collision error for the named parameter.
    pub fn name_collision(name: impl Into<String>) -> Self {
        Self::NameCollision { name: name.into() }
    }

    /// Creates an invalid-signature error with the given message.
    pub fn invalid_signature(msg: impl Into<String>) -> Self {
        Self::InvalidSignature(msg.into())
    }

    /// Creates a missing-argument error for the named parameter.
    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::MissingArgument(name.into())
    }

    /// Creates a not-dispatchable error with the given message.
    pub fn not_dispatchable(msg: impl Into<String>) -> Self {
        Self::NotDispatchable(msg.into())
    }

    /// Creates a tokenize error with the given message.
    pub fn tokenize(msg: impl Into<String>) -> Self {
        Self::Tokenize(msg.into())
    }

    /// Creates an invocation error with the given message.
    pub fn invocation(msg: impl Into<String>) -> Self {
        Self::Invocation(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnsupportedParameterKind { .. } => "Unsupported Parameter Kind",
            Self::NameCollision { .. } => "Name Collision",
            Self::InvalidSignature(_) => "Invalid Signature",
            Self::Usage(_) => "Usage Error",
            Self::MissingArgument(_) => "Missing Argument",
            Self::NotDispatchable(_) => "Dispatch Error",
            Self::TypeMismatch { .. } => "Type Error",
            Self::Tokenize(_) => "Tokenize Error",
            Self::Invocation(_) => "Invocation Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// Returns the process exit status this error terminates with.
    ///
    /// Usage errors report clap's own status (2 for bad input, 0 for help and version).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(err) => err.exit_code(),
            _ => 1,
        }
    }

    /// Terminates the process the way the underlying parser does.
    ///
    /// Usage errors are rendered and exited by clap itself; everything else is
    /// printed to stderr with its category and exits with status 1.
    pub fn exit(self) -> ! {
        match self {
            Self::Usage(err) => err.exit(),
            other => {
                eprintln!("{}: {}", other.category(), other);
                std::process::exit(other.exit_code());
            }
        }
    }
}

/// Result type alias using AutoargsError.
pub type Result<T> = std::result::Result<T, AutoargsError>;

/// Unwraps a result or terminates the process through [`AutoargsError::exit`].
pub trait OrExit<T> {
    /// Returns the success value, exiting the process on error.
    fn or_exit(self) -> T;
}

impl<T> OrExit<T> for Result<T> {
    fn or_exit(self) -> T {
        self.unwrap_or_else(|err| err.exit())
    }
}
