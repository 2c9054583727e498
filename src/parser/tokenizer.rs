//! Shell-style splitting of command strings.
//!
//! Follows POSIX shell word rules:
//! - Whitespace separates words
//! - Single quotes keep everything literally: `'a b'` → `a b`
//! - Double quotes group words; a backslash escapes only `\` and `"`
//! - Outside quotes a backslash escapes the next character
//! - Adjacent quoted and unquoted pieces form one word: `a"b c"d` → `ab cd`

use std::iter::Peekable;
use std::str::Chars;

/// Characters a backslash escapes inside double quotes.
const DOUBLE_QUOTE_ESCAPES: &[char] = &['\\', '"'];

/// Splits `input` into words.
pub fn split(input: &str) -> Result<Vec<String>, SplitError> {
    let mut words = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        // Skip whitespace
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }
        words.push(collect_word(&mut chars, input)?);
    }

    Ok(words)
}

/// Collects one word, joining quoted and unquoted pieces until whitespace.
fn collect_word(chars: &mut Peekable<Chars<'_>>, input: &str) -> Result<String, SplitError> {
    let mut word = String::new();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            break;
        }
        chars.next();

        match c {
            '\'' => collect_single_quoted(chars, &mut word, input)?,
            '"' => collect_double_quoted(chars, &mut word, input)?,
            '\\' => match chars.next() {
                Some(escaped) => word.push(escaped),
                None => {
                    return Err(SplitError::new(input, "No escaped character")
                        .with_hint("Remove the trailing backslash or escape it as \\\\"));
                }
            },
            _ => word.push(c),
        }
    }

    Ok(word)
}

/// Collects characters up to the closing single quote, literally.
fn collect_single_quoted(
    chars: &mut Peekable<Chars<'_>>,
    word: &mut String,
    input: &str,
) -> Result<(), SplitError> {
    for c in chars.by_ref() {
        if c == '\'' {
            return Ok(());
        }
        word.push(c);
    }
    Err(SplitError::new(input, "No closing quotation"))
}

/// Collects characters up to the closing double quote, handling escapes.
fn collect_double_quoted(
    chars: &mut Peekable<Chars<'_>>,
    word: &mut String,
    input: &str,
) -> Result<(), SplitError> {
    while let Some(c) = chars.next() {
        match c {
            '"' => return Ok(()),
            '\\' => match chars.next() {
                Some(escaped) if DOUBLE_QUOTE_ESCAPES.contains(&escaped) => word.push(escaped),
                Some(other) => {
                    // Unknown escape, keep as-is
                    word.push('\\');
                    word.push(other);
                }
                None => break,
            },
            _ => word.push(c),
        }
    }
    Err(SplitError::new(input, "No closing quotation"))
}

/// Split error with context for helpful error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitError {
    /// The input that failed to split.
    pub input: String,
    /// Error message describing what went wrong.
    pub message: String,
    /// Optional hint for how to fix the error.
    pub hint: Option<String>,
}

impl SplitError {
    /// Creates a new split error.
    pub fn new(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// Adds a hint to the error.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        Self {
            hint: Some(hint.into()),
            ..self
        }
    }
}

impl std::fmt::Display for SplitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.message, self.input)?;
        if let Some(hint) = &self.hint {
            write!(f, "\nHint: {}", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for SplitError {}

impl From<SplitError> for crate::error::AutoargsError {
    fn from(err: SplitError) -> Self {
        Self::tokenize(err.to_string())
    }
}
