//! Loading a specification document and rendering the Result Document a module would emit.
//!
//! Run with: `cargo run --example spec_from_json`

use argspec::{validate, ArgumentSpec, Termination};

const SPEC: &str = r#"{
    "site":    { "type": "uri", "required": true },
    "retries": { "type": "int", "default": 3 },
    "price":   { "type": "number" },
    "verbose": { "type": "boolean", "default": null }
}"#;

fn main() -> anyhow::Result<()> {
    let spec = ArgumentSpec::from_json_str(SPEC)?;

    for input in [
        "site=https://example.com price=19.990",
        "retries=5",
        "site=example.com",
    ] {
        let termination = match validate(&spec, input) {
            Ok(params) => Termination::success(&params),
            Err(err) => Termination::from_error(&err),
        };
        println!("{:<40} -> {}", input, termination.document());
    }
    Ok(())
}
