use argspec::tokenizer::tokenize;
use argspec::{
    argspec, validate, validate_with_options, ArgumentSpec, Delimiting, FieldSpec, FieldType,
    Termination, ValidatorOptions,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Field names made of `[a-z_]` only, so both strategies can recognize them.
fn field_name(i: usize) -> String {
    let suffix: String = i
        .to_string()
        .bytes()
        .map(|digit| char::from(b'a' + (digit - b'0')))
        .collect();
    format!("field_{}", suffix)
}

fn wide_spec(fields: usize) -> ArgumentSpec {
    (0..fields)
        .map(|i| {
            let field_type = match i % 4 {
                0 => FieldType::String,
                1 => FieldType::Int,
                2 => FieldType::Bool,
                _ => FieldType::List,
            };
            (field_name(i), FieldSpec::new().with_type(field_type))
        })
        .collect()
}

fn wide_input(fields: usize) -> String {
    (0..fields)
        .map(|i| match i % 4 {
            0 => format!("{}=value{}", field_name(i), i),
            1 => format!("{}={}", field_name(i), i * 7),
            2 => format!("{}=yes", field_name(i)),
            _ => format!("{}=a,b,c", field_name(i)),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn benchmark_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    let input = "msg=hello world dest_dir=/tmp/out log-level=2 tags=a,b,c force=yes";

    group.bench_function("whitespace", |b| {
        b.iter(|| tokenize(black_box(input), Delimiting::Whitespace))
    });
    group.bench_function("key_pattern", |b| {
        b.iter(|| tokenize(black_box(input), Delimiting::KeyPattern))
    });

    group.finish();
}

fn benchmark_validate_simple(c: &mut Criterion) {
    let spec = argspec!({
        "name": { required: true },
        "age": { type: "int" },
        "admin": { type: "bool", default: false },
        "groups": { type: "list" },
        "site": { type: "uri" },
    });
    let input = "name=Alice age=30 groups=wheel,staff site=https://example.com";

    c.bench_function("validate_simple", |b| {
        b.iter(|| validate(black_box(&spec), black_box(input)))
    });
}

fn benchmark_validate_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_wide");

    for size in [10, 50, 200].iter() {
        let spec = wide_spec(*size);
        let input = wide_input(*size);

        group.bench_with_input(BenchmarkId::new("whitespace", size), &input, |b, input| {
            b.iter(|| validate(black_box(&spec), black_box(input)))
        });

        let options = ValidatorOptions::new().with_delimiting(Delimiting::KeyPattern);
        group.bench_with_input(BenchmarkId::new("key_pattern", size), &input, |b, input| {
            b.iter(|| validate_with_options(black_box(&spec), black_box(input), options.clone()))
        });
    }

    group.finish();
}

fn benchmark_render_result(c: &mut Criterion) {
    let spec = wide_spec(50);
    let params = validate(&spec, &wide_input(50)).unwrap();

    c.bench_function("render_success_document", |b| {
        b.iter(|| Termination::success(black_box(&params)))
    });
}

criterion_group!(
    benches,
    benchmark_tokenize,
    benchmark_validate_simple,
    benchmark_validate_wide,
    benchmark_render_result
);
criterion_main!(benches);
