//! The validation pipeline.
//!
//! A [`Validator`] turns a raw arguments text into a complete [`ParamMap`] in four passes:
//!
//! 1. **Specification check**: field names must be usable with the chosen [`Delimiting`].
//!    Runs before any input is looked at.
//! 2. **Tokenizing**: the input is split into ordered `key=value` tokens.
//! 3. **Per-token validation** in input order, so the first bad token is the one reported:
//!    unknown keys, duplicates, unknown type names and type-rule failures.
//! 4. **Reconciliation** in specification order: defaults are filled in verbatim, unsupplied
//!    `list` fields become empty lists, anything else becomes [`Value::Absent`], and only then
//!    are `required` fields checked.
//!
//! # Examples
//!
//! ```rust
//! use argspec::{argspec, validate, Value};
//!
//! let spec = argspec!({
//!     "name": { required: true },
//!     "tags": { type: "list" },
//!     "nick": {},
//!     "port": { type: "int", required: true, default: 8080 },
//! });
//!
//! let params = validate(&spec, "name=web").unwrap();
//! assert_eq!(params.get_str("name"), Some("web"));
//! assert_eq!(params.get("tags"), Some(&Value::List(vec![])));
//! assert!(params.is_absent("nick"));
//! assert_eq!(params.get_i64("port"), Some(8080));
//! ```

use crate::options::{Delimiting, DuplicateKeys, ValidatorOptions};
use crate::spec::ArgumentSpec;
use crate::tokenizer::{self, Token};
use crate::{coerce, Error, ParamMap, Result, Value};
use indexmap::IndexMap;

/// Validates raw argument text against an [`ArgumentSpec`].
///
/// The validator never mutates the specification and never writes output; failures are
/// returned as [`Error`] values for the caller to report.
#[derive(Clone, Debug)]
pub struct Validator<'s> {
    spec: &'s ArgumentSpec,
    options: ValidatorOptions,
}

impl<'s> Validator<'s> {
    /// Creates a validator with default options.
    #[must_use]
    pub fn new(spec: &'s ArgumentSpec) -> Self {
        Self::with_options(spec, ValidatorOptions::default())
    }

    #[must_use]
    pub fn with_options(spec: &'s ArgumentSpec, options: ValidatorOptions) -> Self {
        Validator { spec, options }
    }

    #[must_use]
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Runs the full pipeline over `input`.
    ///
    /// # Errors
    ///
    /// Returns the first error found, in pipeline order: specification errors, then
    /// input errors, then per-token errors in input order, then missing required fields
    /// in specification order.
    pub fn validate(&self, input: &str) -> Result<ParamMap> {
        self.check_spec()?;
        let tokens = tokenizer::tokenize(input, self.options.delimiting)?;
        let supplied = self.coerce_tokens(&tokens)?;
        self.reconcile(supplied)
    }

    /// Validates raw bytes, replacing invalid UTF-8 sequences with U+FFFD first.
    ///
    /// # Errors
    ///
    /// As [`Validator::validate`].
    pub fn validate_bytes(&self, input: &[u8]) -> Result<ParamMap> {
        let text = String::from_utf8_lossy(input);
        if let std::borrow::Cow::Owned(_) = text {
            tracing::warn!("arguments are not valid UTF-8; invalid sequences were replaced");
        }
        self.validate(&text)
    }

    fn check_spec(&self) -> Result<()> {
        for name in self.spec.names() {
            if name.is_empty() {
                return Err(Error::invalid_specification("field names must not be empty"));
            }
            if self.options.delimiting == Delimiting::KeyPattern
                && !tokenizer::is_pattern_key(name)
            {
                return Err(Error::invalid_specification(format!(
                    "field \"{}\" can never be supplied: names must match [a-z_-]+",
                    name
                )));
            }
        }
        Ok(())
    }

    fn coerce_tokens<'t>(&self, tokens: &[Token<'t>]) -> Result<IndexMap<&'t str, Value>> {
        let mut supplied: IndexMap<&'t str, Value> = IndexMap::with_capacity(tokens.len());

        for token in tokens {
            let field = self
                .spec
                .get(token.key)
                .ok_or_else(|| Error::unknown_argument(token.key))?;

            if supplied.contains_key(token.key) {
                match self.options.duplicate_keys {
                    DuplicateKeys::Reject => return Err(Error::duplicate_argument(token.key)),
                    DuplicateKeys::LastWins => {
                        tracing::warn!(key = token.key, "argument supplied again; keeping the later value")
                    }
                }
            }

            let field_type = field.field_type(token.key)?;
            let value = coerce::coerce(
                token.key,
                field_type,
                token.value,
                self.options.trim_strings,
            )?;
            tracing::debug!(
                index = token.index,
                key = token.key,
                field_type = field_type.as_str(),
                "argument accepted"
            );
            supplied.insert(token.key, value);
        }

        Ok(supplied)
    }

    fn reconcile(&self, mut supplied: IndexMap<&str, Value>) -> Result<ParamMap> {
        let mut params = ParamMap::with_capacity(self.spec.len());

        for (name, field) in self.spec {
            let value = match supplied.swap_remove(name.as_str()) {
                Some(value) => value,
                None => match &field.default {
                    Some(default) => {
                        tracing::debug!(field = name.as_str(), "using default");
                        default.clone()
                    }
                    None if field.is_list() => Value::List(Vec::new()),
                    None => Value::Absent,
                },
            };

            if field.required && value.is_absent() {
                return Err(Error::missing_required(name));
            }
            params.insert(name.clone(), value);
        }

        Ok(params)
    }
}
