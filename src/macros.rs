/// Builds an [`ArgumentSpec`](crate::ArgumentSpec) from a JSON-like literal.
///
/// Each field maps to a descriptor block accepting `type`, `required` and `default`, in any
/// order. Fields keep the order in which they are written.
///
/// ```rust
/// use argspec::{argspec, FieldType, Value};
///
/// let spec = argspec!({
///     "name": { required: true },
///     "port": { type: "int", default: 8080 },
///     "tags": { type: "list" },
/// });
///
/// assert_eq!(spec.names().collect::<Vec<_>>(), vec!["name", "port", "tags"]);
/// assert!(spec.get("name").unwrap().required);
/// assert_eq!(spec.get("port").unwrap().default, Some(Value::from(8080)));
/// assert_eq!(spec.get("tags").unwrap().field_type("tags").unwrap(), FieldType::List);
/// ```
#[macro_export]
macro_rules! argspec {
    (@field $field:expr;) => {
        $field
    };

    (@field $field:expr; type : $type_name:expr $(, $($rest:tt)*)?) => {
        $crate::argspec!(@field $field.with_type_name($type_name); $($($rest)*)?)
    };

    (@field $field:expr; required : $required:expr $(, $($rest:tt)*)?) => {
        $crate::argspec!(@field $field.with_required($required); $($($rest)*)?)
    };

    (@field $field:expr; default : $default:expr $(, $($rest:tt)*)?) => {
        $crate::argspec!(@field $field.with_default($default); $($($rest)*)?)
    };

    // Handle empty specification
    ({}) => {
        $crate::ArgumentSpec::new()
    };

    ({ $($name:literal : { $($body:tt)* }),* $(,)? }) => {
        $crate::ArgumentSpec::new()
            $(.field($name, $crate::argspec!(@field $crate::FieldSpec::new(); $($body)*)))*
    };
}

#[cfg(test)]
mod tests {
    use crate::{ArgumentSpec, FieldSpec, FieldType, Value};

    #[test]
    fn test_argspec_empty() {
        assert!(argspec!({}).is_empty());
    }

    #[test]
    fn test_argspec_empty_descriptor() {
        let spec = argspec!({ "name": {} });
        assert_eq!(spec.get("name"), Some(&FieldSpec::new()));
    }

    #[test]
    fn test_argspec_matches_builder() {
        let from_macro = argspec!({
            "name": { required: true },
            "age": { type: "int", default: 30 },
            "dirs": { default: vec!["/tmp"], type: "list", required: false, },
        });
        let built = ArgumentSpec::new()
            .field("name", FieldSpec::new().required())
            .field("age", FieldSpec::new().with_type(FieldType::Int).with_default(30))
            .field(
                "dirs",
                FieldSpec::new()
                    .with_type(FieldType::List)
                    .with_default(vec!["/tmp"]),
            );
        assert_eq!(from_macro, built);
    }

    #[test]
    fn test_argspec_expressions() {
        let strict = true;
        let spec = argspec!({ "level": { type: "bool", required: strict, default: Value::Bool(false) } });
        let level = spec.get("level").unwrap();
        assert!(level.required);
        assert_eq!(level.default, Some(Value::Bool(false)));
    }

    #[test]
    fn test_argspec_keeps_unknown_type_names() {
        let spec = argspec!({ "x": { type: "___" } });
        assert!(spec.get("x").unwrap().field_type("x").is_err());
    }
}
