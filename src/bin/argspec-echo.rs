//! Demo module: validates its arguments file and echoes the parameters back.
//!
//! ```text
//! $ echo 'count=3' > args
//! $ argspec-echo --spec count.json args
//! {"count":3,"changed":false}
//! ```
//!
//! As for every module, the arguments file is the last process argument.
//!
//! Logs go to standard error, filtered by `ARGSPEC_LOG` (default `warn`).

use anyhow::Context;
use argspec::{
    supervise, ArgumentSpec, Delimiting, DuplicateKeys, ErrorKind, Module, Termination,
    ValidatorOptions,
};
use clap::error::ErrorKind as CliErrorKind;
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "argspec-echo", version)]
#[command(about = "Validate a module arguments file and echo the parameters as a Result Document")]
struct Args {
    /// Specification document: a JSON object of field descriptors
    #[arg(long)]
    spec: Option<PathBuf>,

    /// Delimit tokens by the key pattern instead of whitespace
    #[arg(long, default_value_t = false)]
    key_pattern: bool,

    /// Keep surrounding whitespace in string values
    #[arg(long, default_value_t = false)]
    keep_whitespace: bool,

    /// Let a repeated key overwrite the earlier value instead of failing
    #[arg(long, default_value_t = false)]
    allow_duplicates: bool,

    /// Panic after validation
    #[arg(long, default_value_t = false)]
    panic: bool,

    /// Report a failure with this message after validation
    #[arg(long)]
    fail: Option<String>,

    /// File holding the raw key=value arguments; must be the last argument
    args_file: PathBuf,
}

impl Args {
    fn options(&self) -> ValidatorOptions {
        let delimiting = if self.key_pattern {
            Delimiting::KeyPattern
        } else {
            Delimiting::Whitespace
        };
        let duplicate_keys = if self.allow_duplicates {
            DuplicateKeys::LastWins
        } else {
            DuplicateKeys::Reject
        };
        ValidatorOptions::new()
            .with_delimiting(delimiting)
            .with_trim_strings(!self.keep_whitespace)
            .with_duplicate_keys(duplicate_keys)
    }

    fn load_spec(&self) -> anyhow::Result<ArgumentSpec> {
        match &self.spec {
            Some(path) => ArgumentSpec::from_path(path)
                .with_context(|| format!("loading specification {}", path.display())),
            None => Ok(ArgumentSpec::new()),
        }
    }
}

fn main() {
    init_tracing();

    supervise(|| {
        let args = match Args::try_parse() {
            Ok(args) => args,
            Err(err) => return Ok(cli_termination(&err)),
        };
        tracing::debug!(?args, "parsed command line");

        let spec = args.load_spec()?;
        if std::env::args_os().last().as_deref() != Some(args.args_file.as_os_str()) {
            tracing::warn!(
                args_file = %args.args_file.display(),
                "arguments file is not the last argument; the last argument is read instead"
            );
        }
        let module = Module::with_options_or_fail(&spec, args.options());

        if args.panic {
            panic!(
                "panic requested after validating {} parameters",
                module.params().len()
            );
        }
        if let Some(msg) = &args.fail {
            return Ok(module.failure(&json!({ "msg": msg })));
        }
        Ok(module.success(module.params()))
    })
}

fn cli_termination(err: &clap::Error) -> Termination {
    let text = err.to_string();
    match err.kind() {
        CliErrorKind::DisplayHelp | CliErrorKind::DisplayVersion => {
            Termination::success(&json!({ "msg": text.trim_end() }))
        }
        _ => Termination::failure(&json!({
            "msg": text.trim_end(),
            "kind": ErrorKind::MalformedInput.as_str(),
        })),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ARGSPEC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    // Standard output carries the Result Document only.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
