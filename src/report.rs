//! Result Documents and process termination.
//!
//! A module ends by writing exactly one JSON object to standard output and exiting:
//!
//! ```text
//! success:  {..fields.., "changed": false}   exit 0
//! failure:  {..fields.., "failed": true}     exit 1
//! ```
//!
//! [`Termination`] is the rendered form of that final step. Building one never fails: when
//! the caller's fields cannot be encoded as a JSON object, a minimal fallback failure
//! document is produced instead. Writing it and exiting is done by
//! [`Termination::terminate`], or by the [`exit_json`](crate::exit_json) and
//! [`fail_json`](crate::fail_json) shortcuts.
//!
//! ## Examples
//!
//! ```rust
//! use argspec::Termination;
//! use serde_json::json;
//!
//! let done = Termination::success(&json!({"count": 3}));
//! assert_eq!(done.document(), r#"{"count":3,"changed":false}"#);
//! assert_eq!(done.exit_code(), 0);
//!
//! let failed = Termination::failure(&json!({"msg": "boom", "failed": false}));
//! assert_eq!(failed.document(), r#"{"msg":"boom","failed":true}"#);
//! assert_eq!(failed.exit_code(), 1);
//! ```

use crate::{Error, ErrorKind};
use serde::Serialize;
use serde_json::{Map, Value as Json};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// Exit status used for every failure path.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Last-resort document if even the fallback cannot be encoded.
const STATIC_FALLBACK: &str = r#"{"failed":true,"msg":"Failed to encode JSON"}"#;

static EMITTED: AtomicBool = AtomicBool::new(false);

/// Terminal state of a module run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Succeeded,
    Failed,
}

impl Status {
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Status::Succeeded => 0,
            Status::Failed => FAILURE_EXIT_CODE,
        }
    }
}

/// A rendered Result Document together with the exit status that goes with it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use = "a termination does nothing until it is written or terminated"]
pub struct Termination {
    status: Status,
    document: String,
}

impl Termination {
    /// Renders a success document: the caller's fields plus a boolean `changed`.
    ///
    /// An existing `changed` entry keeps its position and is converted to a boolean by JSON
    /// truthiness; a missing one is appended as `false`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argspec::Termination;
    /// use serde_json::json;
    ///
    /// let t = Termination::success(&json!({"changed": 1, "msg": "ok"}));
    /// assert_eq!(t.document(), r#"{"changed":true,"msg":"ok"}"#);
    /// ```
    pub fn success<T: Serialize + ?Sized>(fields: &T) -> Self {
        match to_object(fields) {
            Ok(mut object) => {
                let changed = object.get("changed").map_or(false, truthy);
                object.insert("changed".to_string(), Json::Bool(changed));
                Self::render(Status::Succeeded, object)
            }
            Err(err) => Self::fallback(&err),
        }
    }

    /// Renders a failure document: the caller's fields with `failed` forced to `true`.
    pub fn failure<T: Serialize + ?Sized>(fields: &T) -> Self {
        match to_object(fields) {
            Ok(mut object) => {
                object.insert("failed".to_string(), Json::Bool(true));
                Self::render(Status::Failed, object)
            }
            Err(err) => Self::fallback(&err),
        }
    }

    /// Renders the failure document for an [`Error`], carrying its message, kind and field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argspec::{Error, Termination};
    ///
    /// let t = Termination::from_error(&Error::missing_required("site"));
    /// assert_eq!(
    ///     t.document(),
    ///     r#"{"msg":"Argument \"site\" is required","kind":"MissingRequiredArgument","field":"site","failed":true}"#
    /// );
    /// ```
    pub fn from_error(err: &Error) -> Self {
        let mut object = Map::new();
        object.insert("msg".to_string(), Json::String(err.to_string()));
        object.insert("kind".to_string(), Json::String(err.kind().as_str().to_string()));
        if let Some(field) = err.field() {
            object.insert("field".to_string(), Json::String(field.to_string()));
        }
        Self::failure(&object)
    }

    fn render(status: Status, object: Map<String, Json>) -> Self {
        match serde_json::to_string(&object) {
            Ok(document) => Termination { status, document },
            Err(err) => Self::fallback(&Error::serialization(err)),
        }
    }

    fn fallback(err: &Error) -> Self {
        tracing::error!(error = %err, "result document could not be encoded");
        let mut object = Map::new();
        object.insert("failed".to_string(), Json::Bool(true));
        object.insert("msg".to_string(), Json::String(err.to_string()));
        object.insert(
            "kind".to_string(),
            Json::String(ErrorKind::SerializationFailure.as_str().to_string()),
        );
        let document =
            serde_json::to_string(&object).unwrap_or_else(|_| STATIC_FALLBACK.to_string());
        Termination {
            status: Status::Failed,
            document,
        }
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Status::Succeeded
    }

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }

    /// The JSON text of the Result Document.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Writes the document to `writer` and flushes it.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(self.document.as_bytes())?;
        writer.flush()
    }

    /// Writes the document to standard output and exits the process with its status.
    ///
    /// Only the first termination in a process writes anything; the document and the exit
    /// are the last things that happen.
    pub fn terminate(self) -> ! {
        if EMITTED.swap(true, Ordering::SeqCst) {
            tracing::warn!("a result document was already emitted; exiting without another");
        } else if let Err(err) = self.write_to(io::stdout().lock()) {
            tracing::error!(error = %err, "failed to write result document");
        }
        std::process::exit(self.exit_code())
    }
}

/// Writes a success document to standard output and exits with status 0.
pub fn exit_json<T: Serialize + ?Sized>(fields: &T) -> ! {
    Termination::success(fields).terminate()
}

/// Writes a failure document to standard output and exits with status 1.
pub fn fail_json<T: Serialize + ?Sized>(fields: &T) -> ! {
    Termination::failure(fields).terminate()
}

fn to_object<T: Serialize + ?Sized>(fields: &T) -> crate::Result<Map<String, Json>> {
    match serde_json::to_value(fields).map_err(Error::serialization)? {
        Json::Object(object) => Ok(object),
        Json::Null => Ok(Map::new()),
        other => Err(Error::serialization(format!(
            "result fields must be a JSON object, found {}",
            json_type(&other)
        ))),
    }
}

fn json_type(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

fn truthy(value: &Json) -> bool {
    match value {
        Json::Null => false,
        Json::Bool(b) => *b,
        Json::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Json::String(s) => !s.is_empty() && s != "0",
        Json::Array(items) => !items.is_empty(),
        Json::Object(object) => !object.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::{Serialize, Serializer};
    use serde_json::json;
    use std::collections::BTreeMap;

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot encode this"))
        }
    }

    #[test]
    fn test_success_appends_changed() {
        let t = Termination::success(&json!({"count": 3}));
        assert_eq!(t.document(), r#"{"count":3,"changed":false}"#);
        assert!(t.is_success());
    }

    #[test]
    fn test_success_with_no_fields() {
        assert_eq!(Termination::success(&()).document(), r#"{"changed":false}"#);
        assert_eq!(
            Termination::success(&json!({"changed": true})).document(),
            r#"{"changed":true}"#
        );
    }

    #[test]
    fn test_changed_truthiness() {
        for (input, expected) in [
            (json!(null), false),
            (json!(0), false),
            (json!(""), false),
            (json!("0"), false),
            (json!([]), false),
            (json!(2), true),
            (json!("yes"), true),
            (json!([1]), true),
        ] {
            let t = Termination::success(&json!({ "changed": input.clone() }));
            let doc: Json = serde_json::from_str(t.document()).unwrap();
            assert_eq!(doc["changed"], json!(expected), "{}", input);
        }
    }

    #[test]
    fn test_failure_forces_failed_flag() {
        assert_eq!(Termination::failure(&()).document(), r#"{"failed":true}"#);

        let t = Termination::failure(&json!({"failed": false, "msg": "x"}));
        assert_eq!(t.document(), r#"{"failed":true,"msg":"x"}"#);
        assert_eq!(t.exit_code(), FAILURE_EXIT_CODE);
    }

    #[test]
    fn test_struct_fields_keep_declaration_order() {
        #[derive(Serialize)]
        struct Report {
            path: &'static str,
            size: u64,
        }

        let t = Termination::success(&Report {
            path: "/tmp/x",
            size: 10,
        });
        assert_eq!(t.document(), r#"{"path":"/tmp/x","size":10,"changed":false}"#);
    }

    #[test]
    fn test_unencodable_fields_fall_back() {
        let t = Termination::success(&Unencodable);
        assert_eq!(t.status(), Status::Failed);

        let doc: Json = serde_json::from_str(t.document()).unwrap();
        assert_eq!(doc["failed"], json!(true));
        assert_eq!(doc["kind"], json!("SerializationFailure"));
        assert!(doc["msg"].as_str().unwrap().contains("cannot encode this"));
    }

    #[test]
    fn test_non_object_fields_fall_back() {
        let t = Termination::failure(&vec![1, 2]);
        let doc: Json = serde_json::from_str(t.document()).unwrap();
        assert!(doc["msg"].as_str().unwrap().contains("an array"));
        assert_eq!(t.exit_code(), 1);
    }

    #[test]
    fn test_non_string_map_keys_fall_back() {
        let mut fields = BTreeMap::new();
        fields.insert(vec![1u8], "x");
        let t = Termination::success(&fields);
        assert_eq!(t.status(), Status::Failed);
    }

    #[test]
    fn test_from_error_document() {
        let t = Termination::from_error(&Error::malformed_input(2, "no value"));
        let doc: Json = serde_json::from_str(t.document()).unwrap();
        assert_eq!(doc["kind"], json!("MalformedInput"));
        assert!(doc.get("field").is_none());
        assert_eq!(doc["failed"], json!(true));
    }

    #[test]
    fn test_write_to() {
        let mut buffer = Vec::new();
        Termination::success(&json!({"a": 1}))
            .write_to(&mut buffer)
            .unwrap();
        assert_eq!(buffer, br#"{"a":1,"changed":false}"#);
    }
}
