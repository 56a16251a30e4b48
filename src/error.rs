//! Error types for specification loading, argument validation and result reporting.
//!
//! Every failure the crate can produce is a variant of [`Error`]. Variants are grouped
//! into the coarse categories of [`ErrorKind`], whose names are what ends up in the
//! `"kind"` key of a failure Result Document.
//!
//! ## Error Categories
//!
//! - **Specification errors**: the field specification itself is malformed (caller defect)
//! - **Input errors**: the raw token stream cannot be split into `key=value` pairs
//! - **Argument errors**: unknown keys, values failing their type rule, missing required fields
//! - **Reporting errors**: the Result Document could not be encoded
//!
//! ## Examples
//!
//! ```rust
//! use argspec::{argspec, validate, ErrorKind};
//!
//! let spec = argspec!({ "age": { type: "int" } });
//! let err = validate(&spec, "age=old").unwrap_err();
//!
//! assert_eq!(err.kind(), ErrorKind::ValidationFailure);
//! assert!(err.to_string().contains("\"age\""));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while validating module arguments.
///
/// Messages name the offending field or token so that the resulting failure document
/// is diagnosable without access to the module's source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A field descriptor is not a record
    #[error("Argument keyword \"{field}\" is not a record")]
    InvalidDescriptor { field: String },

    /// A field declares a type name that is not recognized
    #[error("\"{type_name}\" is not a valid argument type (key: \"{field}\")")]
    UnknownType { field: String, type_name: String },

    /// Any other defect in the field specification
    #[error("Invalid argument specification: {0}")]
    InvalidSpecification(String),

    /// The raw input could not be split into key/value pairs
    #[error("Argument at index {index} is invalid: {msg}")]
    MalformedInput { index: usize, msg: String },

    /// The same key was supplied more than once
    #[error("Argument \"{0}\" was supplied more than once")]
    DuplicateArgument(String),

    /// A supplied key is not declared in the specification
    #[error("Argument \"{0}\" is invalid")]
    UnknownArgument(String),

    /// A supplied value does not satisfy its declared type
    #[error("{msg} (key: \"{field}\")")]
    Validation { field: String, msg: String },

    /// A required field has neither a supplied value nor a default
    #[error("Argument \"{0}\" is required")]
    MissingRequired(String),

    /// The Result Document could not be encoded
    #[error("Failed to encode JSON: {0}")]
    Serialization(String),

    /// JSON text handed to the decoding helper is invalid
    #[error("Failed to decode JSON: {0}")]
    Decode(String),

    /// The arguments file could not be read
    #[error("IO error: {0}")]
    Io(String),
}

/// Coarse classification of an [`Error`], stable across releases.
///
/// # Examples
///
/// ```rust
/// use argspec::ErrorKind;
///
/// assert_eq!(ErrorKind::MissingRequiredArgument.as_str(), "MissingRequiredArgument");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidSpecification,
    MalformedInput,
    UnknownArgument,
    ValidationFailure,
    MissingRequiredArgument,
    SerializationFailure,
    DecodeFailure,
    UntrappedFault,
}

impl ErrorKind {
    /// Returns the name written to the `"kind"` key of failure documents.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidSpecification => "InvalidSpecification",
            ErrorKind::MalformedInput => "MalformedInput",
            ErrorKind::UnknownArgument => "UnknownArgument",
            ErrorKind::ValidationFailure => "ValidationFailure",
            ErrorKind::MissingRequiredArgument => "MissingRequiredArgument",
            ErrorKind::SerializationFailure => "SerializationFailure",
            ErrorKind::DecodeFailure => "DecodeFailure",
            ErrorKind::UntrappedFault => "UntrappedFault",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Returns the taxonomy category of this error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argspec::{Error, ErrorKind};
    ///
    /// assert_eq!(Error::unknown_argument("x").kind(), ErrorKind::UnknownArgument);
    /// assert_eq!(Error::duplicate_argument("x").kind(), ErrorKind::MalformedInput);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidDescriptor { .. }
            | Error::UnknownType { .. }
            | Error::InvalidSpecification(_) => ErrorKind::InvalidSpecification,
            Error::MalformedInput { .. } | Error::DuplicateArgument(_) | Error::Io(_) => {
                ErrorKind::MalformedInput
            }
            Error::UnknownArgument(_) => ErrorKind::UnknownArgument,
            Error::Validation { .. } => ErrorKind::ValidationFailure,
            Error::MissingRequired(_) => ErrorKind::MissingRequiredArgument,
            Error::Serialization(_) => ErrorKind::SerializationFailure,
            Error::Decode(_) => ErrorKind::DecodeFailure,
        }
    }

    /// Returns the field this error is about, when there is one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::InvalidDescriptor { field }
            | Error::UnknownType { field, .. }
            | Error::Validation { field, .. } => Some(field),
            Error::DuplicateArgument(field)
            | Error::UnknownArgument(field)
            | Error::MissingRequired(field) => Some(field),
            _ => None,
        }
    }

    /// Creates an error for a descriptor that is not a record.
    pub fn invalid_descriptor(field: &str) -> Self {
        Error::InvalidDescriptor {
            field: field.to_string(),
        }
    }

    /// Creates an error for an unrecognized type name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argspec::Error;
    ///
    /// let err = Error::unknown_type("an_arg", "___");
    /// assert!(err.to_string().starts_with("\"___\" is not a valid argument type"));
    /// ```
    pub fn unknown_type(field: &str, type_name: &str) -> Self {
        Error::UnknownType {
            field: field.to_string(),
            type_name: type_name.to_string(),
        }
    }

    /// Creates a generic specification error.
    pub fn invalid_specification<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidSpecification(msg.to_string())
    }

    /// Creates an error for a token that cannot be split into a key and a value.
    pub fn malformed_input(index: usize, msg: &str) -> Self {
        Error::MalformedInput {
            index,
            msg: msg.to_string(),
        }
    }

    /// Creates an error for a key supplied more than once.
    pub fn duplicate_argument(key: &str) -> Self {
        Error::DuplicateArgument(key.to_string())
    }

    /// Creates an error for an undeclared key.
    pub fn unknown_argument(key: &str) -> Self {
        Error::UnknownArgument(key.to_string())
    }

    /// Creates a type-rule failure naming the field and the expected form.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argspec::Error;
    ///
    /// let err = Error::validation("port", "Expected a numeric value to convert to integer");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Expected a numeric value to convert to integer (key: \"port\")"
    /// );
    /// ```
    pub fn validation<T: fmt::Display>(field: &str, msg: T) -> Self {
        Error::Validation {
            field: field.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an error for a required field left unset after default reconciliation.
    pub fn missing_required(field: &str) -> Self {
        Error::MissingRequired(field.to_string())
    }

    /// Creates an error for a Result Document that could not be encoded.
    pub fn serialization<T: fmt::Display>(msg: T) -> Self {
        Error::Serialization(msg.to_string())
    }

    /// Creates an error for JSON text that could not be decoded.
    pub fn decode<T: fmt::Display>(msg: T) -> Self {
        Error::Decode(msg.to_string())
    }

    /// Creates an I/O error for an unreadable arguments or specification file.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
