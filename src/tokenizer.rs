//! Splitting the raw arguments text into `key=value` tokens.
//!
//! Two strategies are supported, selected with [`Delimiting`]:
//!
//! ```text
//! whitespace:   name=Alice age=30          -> (name, "Alice"), (age, "30")
//! key-pattern:  msg=hello world level=2    -> (msg, "hello world"), (level, "2")
//! ```
//!
//! Under the key-pattern strategy a key is any run of `[a-z_-]` immediately followed by `=`,
//! wherever it appears. A value therefore cannot contain text such as `q=1` without being
//! cut short there.

use crate::options::Delimiting;
use crate::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Pattern recognizing a key under [`Delimiting::KeyPattern`].
pub const KEY_PATTERN: &str = r"[a-z_\-]+=";

fn key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(KEY_PATTERN).expect("KEY_PATTERN is a valid regex"))
}

/// One `key=value` pair, in input order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub index: usize,
    pub key: &'a str,
    pub value: &'a str,
}

/// Returns `true` if `name` could be recognized as a key by [`Delimiting::KeyPattern`].
///
/// # Examples
///
/// ```rust
/// use argspec::tokenizer::is_pattern_key;
///
/// assert!(is_pattern_key("dest_dir"));
/// assert!(is_pattern_key("log-level"));
/// assert!(!is_pattern_key("Dest"));
/// assert!(!is_pattern_key("v2"));
/// ```
#[must_use]
pub fn is_pattern_key(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == '_' || c == '-')
}

/// Splits `input` into ordered tokens.
///
/// # Errors
///
/// Returns a `MalformedInput` error when a token cannot be split into a non-empty key and
/// a value.
///
/// # Examples
///
/// ```rust
/// use argspec::{tokenizer::tokenize, Delimiting};
///
/// let tokens = tokenize("a=1 b=x=y", Delimiting::Whitespace).unwrap();
/// assert_eq!(tokens[1].key, "b");
/// assert_eq!(tokens[1].value, "x=y");
///
/// assert!(tokenize("a=1 oops", Delimiting::Whitespace).is_err());
/// ```
pub fn tokenize(input: &str, delimiting: Delimiting) -> Result<Vec<Token<'_>>> {
    let tokens = match delimiting {
        Delimiting::Whitespace => split_whitespace(input)?,
        Delimiting::KeyPattern => split_key_pattern(input)?,
    };
    tracing::debug!(
        strategy = delimiting.as_str(),
        count = tokens.len(),
        "tokenized arguments"
    );
    Ok(tokens)
}

fn split_whitespace(input: &str) -> Result<Vec<Token<'_>>> {
    input
        .split_whitespace()
        .enumerate()
        .map(|(index, raw)| {
            let (key, value) = raw.split_once('=').ok_or_else(|| {
                Error::malformed_input(index, &format!("\"{}\" is not a key=value pair", raw))
            })?;
            if key.is_empty() {
                return Err(Error::malformed_input(index, "empty argument name"));
            }
            Ok(Token { index, key, value })
        })
        .collect()
}

fn split_key_pattern(input: &str) -> Result<Vec<Token<'_>>> {
    let keys: Vec<_> = key_pattern().find_iter(input).collect();

    let leading_end = keys.first().map_or(input.len(), |m| m.start());
    if !input[..leading_end].trim().is_empty() {
        return Err(Error::malformed_input(
            0,
            "text found before the first argument name",
        ));
    }

    let mut tokens = Vec::with_capacity(keys.len());
    for (index, found) in keys.iter().enumerate() {
        let key = &input[found.start()..found.end() - 1];
        let value_end = keys.get(index + 1).map_or(input.len(), |next| next.start());
        let raw = &input[found.end()..value_end];

        if raw.is_empty() {
            return Err(Error::malformed_input(
                index,
                &format!("argument \"{}\" has no value", key),
            ));
        }

        tokens.push(Token {
            index,
            key,
            value: strip_separator(raw),
        });
    }
    Ok(tokens)
}

/// Drops the single whitespace character separating a value from what follows it.
fn strip_separator(raw: &str) -> &str {
    match raw.chars().next_back() {
        Some(last) if last.is_whitespace() => &raw[..raw.len() - last.len_utf8()],
        _ => raw,
    }
}
