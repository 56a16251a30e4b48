//! The fault boundary around a module's business logic.
//!
//! [`supervise`] runs the module body inside a structured boundary and always ends the
//! process through a [`Termination`]:
//!
//! - the body returns `Ok(termination)`: that document is emitted
//! - the body returns `Err(error)`: a failure document carrying the error chain
//! - the body panics: a failure document carrying the panic message, its source location
//!   and a backtrace
//!
//! Since the body must hand back a [`Termination`], a run that ends without reporting
//! anything cannot be expressed. [`guard`] is the same boundary without the exit, for tests
//! and embedding.
//!
//! Panics are only caught when the binary is built with `panic = "unwind"` (the default).
//!
//! # Examples
//!
//! ```rust
//! use argspec::{guard, Termination};
//! use serde_json::json;
//!
//! let t = guard(|| Ok(Termination::success(&json!({"count": 3}))));
//! assert_eq!(t.document(), r#"{"count":3,"changed":false}"#);
//!
//! let t = guard(|| anyhow::bail!("disk full"));
//! assert!(t.document().contains(r#""msg":"disk full""#));
//! assert_eq!(t.exit_code(), 1);
//! ```

use crate::{Error, ErrorKind, Termination};
use serde::Serialize;
use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe, Location};
use std::sync::Once;

static PANIC_HOOK: Once = Once::new();

thread_local! {
    static GUARDED: Cell<bool> = Cell::new(false);
    static LAST_FAULT: RefCell<Option<Fault>> = RefCell::new(None);
}

/// Diagnostic details of a trapped fault, as written to the failure document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Fault {
    pub msg: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bt: Vec<String>,
}

impl Fault {
    /// Describes an error returned by the module body.
    ///
    /// Errors that are (or wrap) an [`Error`] keep its kind; anything else is an
    /// `UntrappedFault`.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        let known = err.chain().find_map(|cause| cause.downcast_ref::<Error>());
        Fault {
            msg: format!("{:#}", err),
            kind: known.map_or(ErrorKind::UntrappedFault, Error::kind).as_str(),
            field: known.and_then(Error::field).map(str::to_string),
            file: None,
            line: None,
            column: None,
            bt: backtrace_lines(err.backtrace()),
        }
    }

    fn from_panic(payload: &(dyn Any + Send), location: Option<&Location<'_>>) -> Self {
        Fault {
            msg: payload_message(payload),
            kind: ErrorKind::UntrappedFault.as_str(),
            field: None,
            file: location.map(|l| l.file().to_string()),
            line: location.map(|l| l.line()),
            column: location.map(|l| l.column()),
            bt: backtrace_lines(&Backtrace::force_capture()),
        }
    }

    fn from_payload(payload: &(dyn Any + Send)) -> Self {
        Fault {
            msg: payload_message(payload),
            kind: ErrorKind::UntrappedFault.as_str(),
            field: None,
            file: None,
            line: None,
            column: None,
            bt: Vec::new(),
        }
    }
}

/// Runs `body` inside the fault boundary and returns the resulting [`Termination`].
///
/// The first call installs a process-wide panic hook. It records panics raised on a thread
/// that is inside `guard` and hands every other panic to the hook that was there before.
pub fn guard<F>(body: F) -> Termination
where
    F: FnOnce() -> anyhow::Result<Termination>,
{
    install_panic_hook();

    let was_guarded = GUARDED.with(|guarded| guarded.replace(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(body));
    GUARDED.with(|guarded| guarded.set(was_guarded));

    match outcome {
        Ok(Ok(termination)) => termination,
        Ok(Err(err)) => {
            let fault = Fault::from_error(&err);
            tracing::error!(msg = %fault.msg, kind = fault.kind, "module returned an error");
            Termination::failure(&fault)
        }
        Err(payload) => {
            let fault = LAST_FAULT
                .with(|slot| slot.borrow_mut().take())
                .unwrap_or_else(|| Fault::from_payload(payload.as_ref()));
            Termination::failure(&fault)
        }
    }
}

/// Runs `body` inside the fault boundary, emits its Result Document and exits.
///
/// # Examples
///
/// ```no_run
/// use argspec::{argspec, supervise, Module};
///
/// fn main() {
///     supervise(|| {
///         let module = Module::new(&argspec!({ "name": { required: true } }))?;
///         let name = module.params().get_str("name").unwrap_or_default();
///         Ok(module.success(&serde_json::json!({ "greeting": format!("hello {}", name) })))
///     })
/// }
/// ```
pub fn supervise<F>(body: F) -> !
where
    F: FnOnce() -> anyhow::Result<Termination>,
{
    guard(body).terminate()
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if GUARDED.with(Cell::get) {
                let fault = Fault::from_panic(info.payload(), info.location());
                tracing::error!(msg = %fault.msg, file = ?fault.file, line = ?fault.line, "module panicked");
                LAST_FAULT.with(|slot| *slot.borrow_mut() = Some(fault));
            } else {
                previous(info);
            }
        }));
    });
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "module panicked with a non-string payload".to_string()
    }
}

fn backtrace_lines(backtrace: &Backtrace) -> Vec<String> {
    if backtrace.status() != BacktraceStatus::Captured {
        return Vec::new();
    }
    backtrace
        .to_string()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as Json};

    fn parse(t: &Termination) -> Json {
        serde_json::from_str(t.document()).unwrap()
    }

    #[test]
    fn test_success_passes_through() {
        let t = guard(|| Ok(Termination::success(&json!({"count": 3}))));
        assert_eq!(t.document(), r#"{"count":3,"changed":false}"#);
        assert_eq!(t.exit_code(), 0);
    }

    #[test]
    fn test_explicit_failure_passes_through() {
        let t = guard(|| Ok(Termination::failure(&json!({"msg": "nope"}))));
        assert_eq!(t.document(), r#"{"msg":"nope","failed":true}"#);
    }

    #[test]
    fn test_panic_becomes_failure_document() {
        let t = guard(|| {
            let items: Vec<u32> = Vec::new();
            if items.is_empty() {
                panic!("no items to process");
            }
            Ok(Termination::success(&()))
        });

        let doc = parse(&t);
        assert_eq!(t.exit_code(), 1);
        assert_eq!(doc["failed"], json!(true));
        assert_eq!(doc["kind"], json!("UntrappedFault"));
        assert_eq!(doc["msg"], json!("no items to process"));
        assert!(doc["file"].as_str().unwrap().ends_with("supervisor.rs"));
        assert!(doc["line"].as_u64().unwrap() > 0);
        assert!(doc["bt"].is_array());
    }

    #[test]
    fn test_formatted_panic_message() {
        let t = guard(|| panic!("bad index {}", 7));
        assert_eq!(parse(&t)["msg"], json!("bad index 7"));
    }

    #[test]
    fn test_argspec_error_keeps_kind() {
        let t = guard(|| Err(Error::missing_required("site").into()));
        let doc = parse(&t);
        assert_eq!(doc["kind"], json!("MissingRequiredArgument"));
        assert_eq!(doc["field"], json!("site"));
        assert_eq!(doc["msg"], json!("Argument \"site\" is required"));
    }

    #[test]
    fn test_context_chain_is_reported() {
        use anyhow::Context;

        let t = guard(|| {
            let loaded: Result<Termination, Error> = Err(Error::unknown_argument("colour"));
            Ok(loaded.context("while loading arguments")?)
        });
        let doc = parse(&t);
        assert_eq!(doc["kind"], json!("UnknownArgument"));
        assert_eq!(
            doc["msg"],
            json!("while loading arguments: Argument \"colour\" is invalid")
        );
    }

    #[test]
    fn test_foreign_error_is_untrapped_fault() {
        let t = guard(|| {
            let n: i32 = "abc".parse()?;
            Ok(Termination::success(&json!({ "n": n })))
        });
        assert_eq!(parse(&t)["kind"], json!("UntrappedFault"));
    }

    #[test]
    fn test_nested_guards() {
        let t = guard(|| {
            let inner = guard(|| panic!("inner"));
            assert_eq!(inner.exit_code(), 1);
            panic!("outer");
        });
        assert_eq!(parse(&t)["msg"], json!("outer"));
    }

    #[test]
    fn test_payload_messages() {
        assert_eq!(payload_message(&"static"), "static");
        assert_eq!(payload_message(&String::from("owned")), "owned");
        assert_eq!(
            payload_message(&42u8),
            "module panicked with a non-string payload"
        );
    }
}
