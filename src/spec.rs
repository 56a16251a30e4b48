//! Field specifications.
//!
//! An [`ArgumentSpec`] is an ordered mapping from field name to [`FieldSpec`]. Each field
//! carries a type name (defaulting to `string`), a `required` flag and an optional default.
//! Specifications are built in code, with the [`argspec!`](crate::argspec) macro, or loaded
//! from a JSON document.
//!
//! # Types
//!
//! | Type name | Trimmed | Result | Rejected when |
//! |-----------|---------|--------|---------------|
//! | `string` | optional | text | never |
//! | `bool`, `boolean` | yes | `true` for `yes`/`true`, `false` for `no`/`false` (any case) | any other word |
//! | `int`, `integer` | yes | 64-bit integer | non-numeric text |
//! | `float` | yes | 64-bit float | non-numeric text |
//! | `number` | yes | the numeric **text**, unchanged | non-numeric text |
//! | `directory` | yes | the path text | no such directory |
//! | `list` | yes | strings split on `,`, empty segments dropped | no segments left |
//! | `uri`, `url` | yes | the URI text | unparsable, or no scheme or host |
//!
//! `float` values are binary floating point and lose precision for decimal quantities such
//! as currency. Declare such fields as `number` (validated, kept as text) or `string`.
//!
//! # JSON documents
//!
//! ```rust
//! use argspec::ArgumentSpec;
//!
//! let spec = ArgumentSpec::from_json_str(r#"{
//!     "name": {},
//!     "age":  {"type": "int", "required": true},
//!     "tags": {"type": "list", "default": ["a"]}
//! }"#).unwrap();
//!
//! assert_eq!(spec.len(), 3);
//! assert!(spec.get("age").unwrap().required);
//! ```
//!
//! Every descriptor must be an object; `"age": 3` is rejected as an invalid specification,
//! distinct from any error about the input data.

use crate::{Error, Result, Value};
use indexmap::IndexMap;
use std::path::Path;
use std::str::FromStr;

/// The type rules a field can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FieldType {
    #[default]
    String,
    Bool,
    Int,
    Float,
    Number,
    Directory,
    List,
    Uri,
}

impl FieldType {
    /// Resolves a type name, including the `boolean`, `integer` and `url` aliases.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argspec::FieldType;
    ///
    /// assert_eq!(FieldType::from_name("integer"), Some(FieldType::Int));
    /// assert_eq!(FieldType::from_name("url"), Some(FieldType::Uri));
    /// assert_eq!(FieldType::from_name("Int"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<FieldType> {
        let field_type = match name {
            "string" => FieldType::String,
            "bool" | "boolean" => FieldType::Bool,
            "int" | "integer" => FieldType::Int,
            "float" => FieldType::Float,
            "number" => FieldType::Number,
            "directory" => FieldType::Directory,
            "list" => FieldType::List,
            "uri" | "url" => FieldType::Uri,
            _ => return None,
        };
        Some(field_type)
    }

    /// Returns the canonical type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Bool => "bool",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Number => "number",
            FieldType::Directory => "directory",
            FieldType::List => "list",
            FieldType::Uri => "uri",
        }
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FieldType::from_name(s)
            .ok_or_else(|| Error::invalid_specification(format!("unknown type \"{}\"", s)))
    }
}

/// The descriptor of a single field.
///
/// The type is kept as a name and only resolved when a value for the field is validated,
/// so a specification with an unrecognized type name fails only if that field is supplied.
///
/// # Examples
///
/// ```rust
/// use argspec::{FieldSpec, FieldType, Value};
///
/// let field = FieldSpec::new()
///     .with_type(FieldType::Int)
///     .required()
///     .with_default(8080);
///
/// assert_eq!(field.field_type("port").unwrap(), FieldType::Int);
/// assert_eq!(field.default, Some(Value::from(8080)));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FieldSpec {
    pub type_name: Option<String>,
    pub required: bool,
    pub default: Option<Value>,
}

impl FieldSpec {
    /// Creates a descriptor for an optional `string` field without a default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.type_name = Some(field_type.as_str().to_string());
        self
    }

    /// Sets the type by name. Unrecognized names are reported when the field is validated.
    #[must_use]
    pub fn with_type_name(mut self, name: &str) -> Self {
        self.type_name = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn required(self) -> Self {
        self.with_required(true)
    }

    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the default used when the field is not supplied.
    ///
    /// The default is used verbatim; no type rule is applied to it. An absent value clears it.
    #[must_use]
    pub fn with_default<V: Into<Value>>(mut self, default: V) -> Self {
        let default = default.into();
        self.default = if default.is_absent() {
            None
        } else {
            Some(default)
        };
        self
    }

    /// Resolves the declared type, defaulting to `string`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownType`] naming `field` when the type name is not recognized.
    pub fn field_type(&self, field: &str) -> Result<FieldType> {
        match self.type_name.as_deref() {
            None => Ok(FieldType::String),
            Some(name) => {
                FieldType::from_name(name).ok_or_else(|| Error::unknown_type(field, name))
            }
        }
    }

    /// Returns `true` if the field declares the `list` type.
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.type_name.as_deref().and_then(FieldType::from_name) == Some(FieldType::List)
    }

    fn from_json(field: &str, descriptor: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(mut record) = descriptor else {
            return Err(Error::invalid_descriptor(field));
        };

        let type_name = match record.remove("type") {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(name)) => Some(name),
            Some(other) => {
                return Err(Error::invalid_specification(format!(
                    "type of \"{}\" must be a string, found {}",
                    field, other
                )))
            }
        };

        let required = match record.remove("required") {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::Bool(required)) => required,
            Some(other) => {
                return Err(Error::invalid_specification(format!(
                    "required flag of \"{}\" must be a boolean, found {}",
                    field, other
                )))
            }
        };

        let default = record.remove("default").map(Value::from);

        if !record.is_empty() {
            tracing::debug!(
                field,
                ignored = ?record.keys().collect::<Vec<_>>(),
                "ignoring unknown descriptor keys"
            );
        }

        Ok(FieldSpec {
            type_name,
            required,
            default: default.filter(|value| !value.is_absent()),
        })
    }
}

/// An ordered field specification.
///
/// # Examples
///
/// ```rust
/// use argspec::{ArgumentSpec, FieldSpec, FieldType};
///
/// let spec = ArgumentSpec::new()
///     .field("name", FieldSpec::new().required())
///     .field("tags", FieldSpec::new().with_type(FieldType::List));
///
/// let names: Vec<_> = spec.names().collect();
/// assert_eq!(names, vec!["name", "tags"]);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ArgumentSpec {
    fields: IndexMap<String, FieldSpec>,
}

impl ArgumentSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, builder style. A repeated name replaces the earlier descriptor.
    #[must_use]
    pub fn field(mut self, name: &str, spec: FieldSpec) -> Self {
        self.insert(name, spec);
        self
    }

    pub fn insert(&mut self, name: &str, spec: FieldSpec) -> Option<FieldSpec> {
        self.fields.insert(name.to_string(), spec)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the declared field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, FieldSpec> {
        self.fields.iter()
    }

    /// Builds a specification from a parsed JSON document.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidSpecification` error if the document is not an object, if any
    /// descriptor is not an object, or if a descriptor's `type`/`required` has the wrong shape.
    pub fn from_json_value(document: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(entries) = document else {
            return Err(Error::invalid_specification(
                "specification must be an object of field descriptors",
            ));
        };

        let mut spec = ArgumentSpec::new();
        for (name, descriptor) in entries {
            let field = FieldSpec::from_json(&name, descriptor)?;
            spec.insert(&name, field);
        }
        Ok(spec)
    }

    /// Parses a specification from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidSpecification` error for invalid JSON or a malformed document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let document: serde_json::Value =
            serde_json::from_str(text).map_err(Error::invalid_specification)?;
        Self::from_json_value(document)
    }

    /// Reads and parses a specification file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, otherwise as [`Self::from_json_str`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::io(&format!(
                "Failed to read specification {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&text)
    }
}

impl<'a> IntoIterator for &'a ArgumentSpec {
    type Item = (&'a String, &'a FieldSpec);
    type IntoIter = indexmap::map::Iter<'a, String, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<(String, FieldSpec)> for ArgumentSpec {
    fn from_iter<T: IntoIterator<Item = (String, FieldSpec)>>(iter: T) -> Self {
        ArgumentSpec {
            fields: IndexMap::from_iter(iter),
        }
    }
}
