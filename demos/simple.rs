//! Validating a literal argument string against a macro-built specification.
//!
//! Run with: `cargo run --example simple`

use argspec::{argspec, validate, Value};

fn main() {
    let spec = argspec!({
        "name": { required: true },
        "age": { type: "int" },
        "admin": { type: "bool", default: false },
        "groups": { type: "list" },
        "nick": {},
    });

    match validate(&spec, "name=Alice age=30 groups=wheel,,staff") {
        Ok(params) => {
            for (name, value) in &params {
                match value {
                    Value::Absent => println!("{:>8}: (not supplied)", name),
                    other => println!("{:>8}: {}", name, other),
                }
            }
        }
        Err(err) => eprintln!("validation failed: {}", err),
    }

    // The first bad token in the input is the one reported
    if let Err(err) = validate(&spec, "name=Bob age=thirty admin=maybe") {
        println!("\n{} ({})", err, err.kind());
    }
}
