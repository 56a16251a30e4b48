//! The entry point a module executable builds first.
//!
//! A module is invoked with a single argument: the path of a file holding its raw
//! `key=value` arguments. [`Module::new`] reads that file, validates it against the
//! module's [`ArgumentSpec`] and hands back the complete parameter map. Everything after
//! that is the module's own logic, ending in [`Module::success`] or [`Module::failure`].
//!
//! ```no_run
//! use argspec::{argspec, Module};
//!
//! let module = Module::new_or_fail(&argspec!({
//!     "path": { type: "directory", required: true },
//!     "recurse": { type: "bool", default: false },
//! }));
//!
//! let path = module.params().get_str("path").unwrap_or_default().to_string();
//! module.exit_json(&serde_json::json!({ "path": path }));
//! ```

use crate::options::ValidatorOptions;
use crate::report::{self, Termination};
use crate::spec::ArgumentSpec;
use crate::validator::Validator;
use crate::{Error, ParamMap, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// A module invocation whose arguments passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct Module {
    params: ParamMap,
}

impl Module {
    /// Validates the arguments file named by the last process argument, with default options.
    ///
    /// # Errors
    ///
    /// Returns a `MalformedInput` error when no path was given or the file cannot be read,
    /// and any validation error otherwise.
    pub fn new(spec: &ArgumentSpec) -> Result<Self> {
        Self::with_options(spec, ValidatorOptions::default())
    }

    /// As [`Module::new`], with explicit validator options.
    ///
    /// # Errors
    ///
    /// As [`Module::new`].
    pub fn with_options(spec: &ArgumentSpec, options: ValidatorOptions) -> Result<Self> {
        let path = std::env::args_os()
            .skip(1)
            .last()
            .ok_or_else(|| Error::malformed_input(0, "no arguments file was given"))?;
        Self::from_file(spec, path, options)
    }

    /// Validates the process arguments, or emits the failure document and exits.
    ///
    /// The process never returns from a failed validation.
    pub fn new_or_fail(spec: &ArgumentSpec) -> Self {
        Self::with_options_or_fail(spec, ValidatorOptions::default())
    }

    /// As [`Module::new_or_fail`], with explicit validator options.
    pub fn with_options_or_fail(spec: &ArgumentSpec, options: ValidatorOptions) -> Self {
        match Self::with_options(spec, options) {
            Ok(module) => module,
            Err(err) => Termination::from_error(&err).terminate(),
        }
    }

    /// Validates the contents of the arguments file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error when the file cannot be read, and any validation error otherwise.
    pub fn from_file<P: AsRef<Path>>(
        spec: &ArgumentSpec,
        path: P,
        options: ValidatorOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            Error::io(&format!("cannot read arguments file {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "read arguments file");
        let params = Validator::with_options(spec, options).validate_bytes(&bytes)?;
        Ok(Module { params })
    }

    /// Validates arguments given directly as text.
    ///
    /// # Errors
    ///
    /// Returns any validation error.
    pub fn from_input(spec: &ArgumentSpec, input: &str, options: ValidatorOptions) -> Result<Self> {
        let params = Validator::with_options(spec, options).validate(input)?;
        Ok(Module { params })
    }

    #[must_use]
    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    #[must_use]
    pub fn into_params(self) -> ParamMap {
        self.params
    }

    /// Decodes a JSON argument value into `T`.
    ///
    /// # Errors
    ///
    /// Returns a `DecodeFailure` error when `text` is not valid JSON for `T`.
    pub fn decode_json<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        decode_json(text)
    }

    pub fn success<T: Serialize + ?Sized>(&self, fields: &T) -> Termination {
        Termination::success(fields)
    }

    pub fn failure<T: Serialize + ?Sized>(&self, fields: &T) -> Termination {
        Termination::failure(fields)
    }

    /// Emits a success document and exits with status 0.
    pub fn exit_json<T: Serialize + ?Sized>(&self, fields: &T) -> ! {
        report::exit_json(fields)
    }

    /// Emits a failure document and exits with status 1.
    pub fn fail_json<T: Serialize + ?Sized>(&self, fields: &T) -> ! {
        report::fail_json(fields)
    }
}

/// Decodes JSON text into any deserializable type.
///
/// # Errors
///
/// Returns a `DecodeFailure` error when `text` is not valid JSON for `T`.
///
/// # Examples
///
/// ```rust
/// use argspec::{decode_json, ErrorKind};
///
/// let ports: Vec<u16> = decode_json("[80, 443]").unwrap();
/// assert_eq!(ports, vec![80, 443]);
///
/// let err = decode_json::<Vec<u16>>("[80,").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::DecodeFailure);
/// ```
pub fn decode_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{FieldSpec, FieldType};
    use crate::{ErrorKind, Value};
    use serde_json::json;
    use std::io::Write;

    fn spec() -> ArgumentSpec {
        ArgumentSpec::new()
            .field("name", FieldSpec::new().required())
            .field("retries", FieldSpec::new().with_type(FieldType::Int).with_default(3))
    }

    #[test]
    fn test_from_input() {
        let module = Module::from_input(&spec(), "name=web", ValidatorOptions::default()).unwrap();
        assert_eq!(module.params().get_str("name"), Some("web"));
        assert_eq!(module.params().get_i64("retries"), Some(3));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name=db retries=5").unwrap();

        let module = Module::from_file(&spec(), file.path(), ValidatorOptions::default()).unwrap();
        let params = module.into_params();
        assert_eq!(params.get("retries"), Some(&Value::from(5)));
    }

    #[test]
    fn test_missing_file_is_malformed_input() {
        let err = Module::from_file(
            &spec(),
            "/nonexistent/argspec/args",
            ValidatorOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.to_string().contains("/nonexistent/argspec/args"));
    }

    #[test]
    fn test_validation_error_propagates() {
        let err = Module::from_input(&spec(), "retries=2", ValidatorOptions::default()).unwrap_err();
        assert_eq!(err, Error::missing_required("name"));
    }

    #[test]
    fn test_terminations() {
        let module = Module::from_input(&spec(), "name=x", ValidatorOptions::default()).unwrap();
        assert_eq!(
            module.success(&json!({"count": 3})).document(),
            r#"{"count":3,"changed":false}"#
        );
        assert_eq!(module.failure(&()).exit_code(), 1);
    }

    #[test]
    fn test_decode_json() {
        let module = Module::from_input(&spec(), "name=x", ValidatorOptions::default()).unwrap();
        let decoded: serde_json::Value = module.decode_json(r#"{"a": [1, 2]}"#).unwrap();
        assert_eq!(decoded, json!({"a": [1, 2]}));

        let err = module.decode_json::<u8>("300").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure);
    }
}
