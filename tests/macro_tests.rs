use argspec::{argspec, validate, ArgumentSpec, FieldSpec, FieldType, Value};

#[test]
fn test_argspec_macro_empty() {
    let spec = argspec!({});
    assert_eq!(spec, ArgumentSpec::new());
    assert!(validate(&spec, "").unwrap().is_empty());
}

#[test]
fn test_argspec_macro_defaults_to_string() {
    let spec = argspec!({ "name": {} });
    let field = spec.get("name").unwrap();

    assert_eq!(field.field_type("name").unwrap(), FieldType::String);
    assert!(!field.required);
    assert_eq!(field.default, None);
}

#[test]
fn test_argspec_macro_field_order() {
    let spec = argspec!({
        "zeta": {},
        "alpha": {},
        "mid": {},
    });
    assert_eq!(spec.names().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_argspec_macro_any_key_order() {
    let a = argspec!({ "n": { type: "int", required: true, default: 1 } });
    let b = argspec!({ "n": { default: 1, required: true, type: "int" } });
    assert_eq!(a, b);
}

#[test]
fn test_argspec_macro_defaults() {
    let spec = argspec!({
        "flag": { type: "bool", default: true },
        "ratio": { type: "float", default: 0.5 },
        "name": { default: "anon" },
        "tags": { type: "list", default: vec!["a", "b"] },
        "cleared": { default: Value::Absent },
    });

    assert_eq!(spec.get("flag").unwrap().default, Some(Value::Bool(true)));
    assert_eq!(spec.get("ratio").unwrap().default, Some(Value::from(0.5)));
    assert_eq!(spec.get("name").unwrap().default, Some(Value::from("anon")));
    assert_eq!(
        spec.get("tags").unwrap().default,
        Some(Value::from(vec!["a", "b"]))
    );
    assert_eq!(spec.get("cleared").unwrap().default, None);
}

#[test]
fn test_argspec_macro_matches_json() {
    let from_macro = argspec!({
        "site": { type: "uri", required: true },
        "port": { type: "int", default: 443 },
    });
    let from_json = ArgumentSpec::from_json_str(
        r#"{"site": {"type": "uri", "required": true}, "port": {"type": "int", "default": 443}}"#,
    )
    .unwrap();
    assert_eq!(from_macro, from_json);
}

#[test]
fn test_argspec_macro_with_runtime_values() {
    let default_dir = std::env::temp_dir().display().to_string();
    let spec = argspec!({ "dir": { type: "directory", default: default_dir.as_str() } });

    let params = validate(&spec, "").unwrap();
    assert_eq!(params.get_str("dir"), Some(default_dir.as_str()));
}

#[test]
fn test_argspec_macro_equals_builder() {
    let spec = argspec!({ "count": { type: "int", required: true } });
    let built = ArgumentSpec::new().field(
        "count",
        FieldSpec::new().with_type(FieldType::Int).required(),
    );
    assert_eq!(spec, built);
}
