//! Values containing whitespace, using key-pattern delimiting.
//!
//! Run with: `cargo run --example key_pattern`

use argspec::{argspec, validate_with_options, Delimiting, ValidatorOptions};

fn main() {
    let spec = argspec!({
        "msg": { required: true },
        "dest_dir": { type: "directory", default: "/tmp" },
        "log-level": { type: "int", default: 1 },
    });
    let input = "msg=disk usage above 90% log-level=3\n";

    let whitespace = ValidatorOptions::new();
    match validate_with_options(&spec, input, whitespace) {
        Ok(params) => println!("whitespace:  {:?}", params.get_str("msg")),
        Err(err) => println!("whitespace:  {}", err),
    }

    let key_pattern = ValidatorOptions::new().with_delimiting(Delimiting::KeyPattern);
    match validate_with_options(&spec, input, key_pattern) {
        Ok(params) => {
            println!("key-pattern: {:?}", params.get_str("msg"));
            println!("             log-level = {:?}", params.get_i64("log-level"));
        }
        Err(err) => println!("key-pattern: {}", err),
    }
}
