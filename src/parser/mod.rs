//! Parser derivation and token parsing.
//!
//! Signatures are turned into declarative [`ParserSpec`]s, which are lowered
//! to clap commands to parse token sequences into namespaces.

pub mod builder;
pub mod definitions;
pub mod partial;
pub mod tokenizer;

pub use builder::{build_argument, build_parser};
pub use definitions::{ArgumentSpec, Arity, ParserSpec};
pub use partial::{parse_tokens, Input, Parsed};
pub use tokenizer::{split, SplitError};
