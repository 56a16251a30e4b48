//! # argspec
//!
//! Argument-specification validation, type coercion and guaranteed JSON result reporting for
//! single-shot module executables.
//!
//! ## What is a module?
//!
//! A module is a small executable invoked with one argument: the path of a file holding a flat
//! set of `key=value` tokens. It validates those tokens against a declared field specification,
//! does its work, and replies with exactly one JSON object on standard output before exiting
//! with status 0 (success) or 1 (failure). Whatever goes wrong, including a panic in the
//! module's own logic, the caller still receives a well-formed document.
//!
//! ## Key Features
//!
//! - **Declarative specifications**: fields with a `type`, a `required` flag and a `default`,
//!   written with the [`argspec!`] macro, the builder API or loaded from JSON
//! - **Typed coercion**: `string`, `bool`, `int`, `float`, `number`, `directory`, `list` and `uri`
//! - **Complete parameter maps**: every declared field is present, holding a value, its default,
//!   an empty list or the explicit [`Value::Absent`] marker
//! - **Precise diagnostics**: every error names the offending field or token
//! - **Structured termination**: one Result Document per process, even on panics
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! argspec = "0.1"
//! ```
//!
//! ### Validating arguments
//!
//! ```rust
//! use argspec::{argspec, validate};
//!
//! let spec = argspec!({
//!     "name": {},
//!     "age": { type: "int" },
//! });
//!
//! let params = validate(&spec, "name=Alice age=30").unwrap();
//! assert_eq!(params.get_str("name"), Some("Alice"));
//! assert_eq!(params.get_i64("age"), Some(30));
//! ```
//!
//! ### Writing a module
//!
//! ```no_run
//! use argspec::{argspec, supervise, Module};
//! use serde_json::json;
//!
//! fn main() {
//!     supervise(|| {
//!         let module = Module::new(&argspec!({ "count": { type: "int", required: true } }))?;
//!         let count = module.params().get_i64("count").unwrap_or_default();
//!         Ok(module.success(&json!({ "count": count })))
//!     })
//! }
//! ```
//!
//! Invoked with a file containing `count=3`, this prints `{"count":3,"changed":false}` and
//! exits with status 0. A missing `count`, a non-numeric value or a panic inside the closure
//! all print a `{..., "failed": true}` document and exit with status 1.
//!
//! ## `number` versus `int` and `float`
//!
//! `int` and `float` convert the text to a native number. `number` only checks that the text is
//! numeric and keeps it as text, so `19.990` stays `"19.990"`. Use `number` (or `string`) for
//! values such as prices where the exact decimal representation matters; `float` rounds.
//!
//! ## Delimiting strategies
//!
//! By default tokens are separated by whitespace, so values cannot contain spaces. With
//! [`Delimiting::KeyPattern`] a key is any `[a-z_-]+` run followed by `=` and its value is
//! everything up to the next key:
//!
//! ```rust
//! use argspec::{argspec, validate_with_options, Delimiting, ValidatorOptions};
//!
//! let spec = argspec!({ "msg": {}, "level": { type: "int" } });
//! let options = ValidatorOptions::new().with_delimiting(Delimiting::KeyPattern);
//!
//! let params = validate_with_options(&spec, "msg=hello world level=2", options).unwrap();
//! assert_eq!(params.get_str("msg"), Some("hello world"));
//! ```
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - validating a literal argument string
//! - **`spec_from_json.rs`** - loading a specification document
//! - **`key_pattern.rs`** - values containing whitespace
//!
//! Run any example with: `cargo run --example <name>`

pub mod coerce;
pub mod error;
pub mod macros;
pub mod map;
pub mod module;
pub mod options;
pub mod report;
pub mod spec;
pub mod supervisor;
pub mod tokenizer;
pub mod validator;
pub mod value;

pub use error::{Error, ErrorKind, Result};
pub use map::ParamMap;
pub use module::{decode_json, Module};
pub use options::{Delimiting, DuplicateKeys, ValidatorOptions};
pub use report::{exit_json, fail_json, Status, Termination};
pub use spec::{ArgumentSpec, FieldSpec, FieldType};
pub use supervisor::{guard, supervise, Fault};
pub use validator::Validator;
pub use value::{Number, Value};

/// Validates `input` against `spec` with default options.
///
/// # Examples
///
/// ```rust
/// use argspec::{argspec, validate, ErrorKind};
///
/// let spec = argspec!({ "tags": { type: "list" } });
///
/// let params = validate(&spec, "tags=a,b,c").unwrap();
/// assert_eq!(params.get_list("tags"), Some(vec!["a", "b", "c"]));
///
/// let err = validate(&spec, "tags=").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::ValidationFailure);
/// ```
///
/// # Errors
///
/// Returns the first specification, input or validation error found.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn validate(spec: &ArgumentSpec, input: &str) -> Result<ParamMap> {
    Validator::new(spec).validate(input)
}

/// Validates `input` against `spec` with custom options.
///
/// # Errors
///
/// Returns the first specification, input or validation error found.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn validate_with_options(
    spec: &ArgumentSpec,
    input: &str,
    options: ValidatorOptions,
) -> Result<ParamMap> {
    Validator::with_options(spec, options).validate(input)
}

/// Validates raw bytes against `spec`, decoding them as UTF-8 lossily.
///
/// # Errors
///
/// Returns the first specification, input or validation error found.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn validate_bytes(spec: &ArgumentSpec, input: &[u8]) -> Result<ParamMap> {
    Validator::new(spec).validate_bytes(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_name_and_age() {
        let spec = argspec!({ "name": {}, "age": { type: "int" } });
        let params = validate(&spec, "name=Alice age=30").unwrap();

        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"name":"Alice","age":30}"#
        );
    }

    #[test]
    fn test_absent_serializes_as_null() {
        let spec = argspec!({ "name": {}, "nick": {} });
        let params = validate(&spec, "name=Bob").unwrap();
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"name":"Bob","nick":null}"#
        );
    }

    #[test]
    fn test_validate_bytes() {
        let spec = argspec!({ "name": {} });
        let params = validate_bytes(&spec, b"name=caf\xc3\xa9").unwrap();
        assert_eq!(params.get_str("name"), Some("café"));
    }

    #[test]
    fn test_options_are_applied() {
        let spec = argspec!({ "msg": {} });
        let options = ValidatorOptions::new()
            .with_delimiting(Delimiting::KeyPattern)
            .with_trim_strings(false);
        let params = validate_with_options(&spec, "msg= padded  ", options).unwrap();
        assert_eq!(params.get_str("msg"), Some(" padded "));
    }
}
