//! Configuration options for argument validation.
//!
//! This module provides types to customize how the raw arguments file is read:
//!
//! - [`ValidatorOptions`]: Main configuration struct
//! - [`Delimiting`]: How `key=value` tokens are separated from each other
//! - [`DuplicateKeys`]: What happens when a key is supplied twice
//!
//! ## Examples
//!
//! ```rust
//! use argspec::{argspec, validate_with_options, Delimiting, ValidatorOptions};
//!
//! let spec = argspec!({ "msg": {}, "level": { type: "int" } });
//!
//! // Values may contain spaces when keys delimit tokens
//! let options = ValidatorOptions::new().with_delimiting(Delimiting::KeyPattern);
//! let params = validate_with_options(&spec, "msg=hello world level=2", options).unwrap();
//! assert_eq!(params.get_str("msg"), Some("hello world"));
//! ```

/// Strategy used to split the raw input into `key=value` tokens.
///
/// The two strategies are not interchangeable:
///
/// - **Whitespace**: tokens are separated by runs of whitespace and each token is split on
///   its first `=`. Values cannot contain whitespace, keys can be anything but empty.
/// - **KeyPattern**: keys must match `[a-z_-]+` and be immediately followed by `=`. A value
///   runs up to the next such key (or the end of input), so it may contain whitespace, but it
///   must not itself contain text that looks like `key=`.
///
/// # Examples
///
/// ```rust
/// use argspec::Delimiting;
///
/// assert_eq!(Delimiting::default(), Delimiting::Whitespace);
/// assert_eq!(Delimiting::KeyPattern.as_str(), "key-pattern");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiting {
    #[default]
    Whitespace,
    KeyPattern,
}

impl Delimiting {
    /// Returns a short name for this strategy, used in log output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Delimiting::Whitespace => "whitespace",
            Delimiting::KeyPattern => "key-pattern",
        }
    }
}

/// Policy for keys that appear more than once in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    /// Fail with a `MalformedInput` error naming the key
    #[default]
    Reject,
    /// Keep the later occurrence
    LastWins,
}

/// Configuration options for a validation run.
///
/// # Examples
///
/// ```rust
/// use argspec::{Delimiting, DuplicateKeys, ValidatorOptions};
///
/// // Defaults: whitespace tokens, trimmed strings, duplicates rejected
/// let options = ValidatorOptions::new();
/// assert!(options.trim_strings);
///
/// let options = ValidatorOptions::new()
///     .with_delimiting(Delimiting::KeyPattern)
///     .with_trim_strings(false)
///     .with_duplicate_keys(DuplicateKeys::LastWins);
/// assert_eq!(options.duplicate_keys, DuplicateKeys::LastWins);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatorOptions {
    pub delimiting: Delimiting,
    pub trim_strings: bool,
    pub duplicate_keys: DuplicateKeys,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        ValidatorOptions {
            delimiting: Delimiting::default(),
            trim_strings: true,
            duplicate_keys: DuplicateKeys::default(),
        }
    }
}

impl ValidatorOptions {
    /// Creates default options (whitespace tokens, trimmed strings, duplicates rejected).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the token delimiting strategy.
    #[must_use]
    pub fn with_delimiting(mut self, delimiting: Delimiting) -> Self {
        self.delimiting = delimiting;
        self
    }

    /// Controls whether `string` values have surrounding whitespace removed.
    ///
    /// Every other type always trims. Only matters for [`Delimiting::KeyPattern`], where
    /// values can carry whitespace at all.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argspec::ValidatorOptions;
    ///
    /// let options = ValidatorOptions::new().with_trim_strings(false);
    /// assert!(!options.trim_strings);
    /// ```
    #[must_use]
    pub fn with_trim_strings(mut self, trim: bool) -> Self {
        self.trim_strings = trim;
        self
    }

    /// Sets the policy for keys supplied more than once.
    #[must_use]
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }
}
