//! Command-line arguments of the `autoargs` binary.
//!
//! Only the binary's own options are declared here; everything after them is
//! handed untouched to the recursive dispatcher.

use clap::Parser;
use std::path::PathBuf;

/// How the final result is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text.
    #[default]
    Text,
    /// JSON.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}. Expected: text or json")),
        }
    }
}

/// Dispatch a command line through the built-in demo commands.
#[derive(Parser, Debug)]
#[command(name = "autoargs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH", env = "AUTOARGS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for the result
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub output: OutputFormat,

    /// Command line to dispatch, e.g. `f3 --op sum 1 2 3`
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(autoargs::Settings::default_path)
    }
}
