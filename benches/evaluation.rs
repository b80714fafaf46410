//! Benchmarks for built-in evaluation and atom codecs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use swrl_builtins::{parse_atom, AtomCodec, BuiltinArgument, BuiltinAtom, EvaluationMode, Evaluator, Relation};

fn numeric_relation(rows: usize) -> Relation {
    let mut relation = Relation::new(["?X", "?Y", "?Z"]).unwrap();
    for i in 0..rows as i64 {
        let y = i * 7 + 3;
        let z = (i % 9) + 1;
        relation
            .push_tokens([format!("{}^^int", y % z), format!("{}^^int", y), format!("{}^^int", z)])
            .unwrap();
    }
    relation
}

fn text_relation(rows: usize) -> Relation {
    let mut relation = Relation::new(["?X", "?Y", "?Z"]).unwrap();
    for i in 0..rows {
        relation
            .push_tokens([format!("tail{}", i), format!("head{}:tail{}", i, i), ":".to_string()])
            .unwrap();
    }
    relation
}

fn var(name: &str) -> BuiltinArgument {
    BuiltinArgument::variable(name)
}

fn filter_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let evaluator = Evaluator::new();
    let modulo = BuiltinAtom::modulo(var("X"), var("Y"), var("Z"));
    let after = BuiltinAtom::substring_after(var("X"), var("Y"), var("Z"));

    for rows in [100, 1_000, 10_000] {
        let numbers = numeric_relation(rows);
        group.bench_with_input(BenchmarkId::new("mod", rows), &numbers, |b, table| {
            b.iter(|| black_box(evaluator.evaluate(&modulo, table).unwrap().len()));
        });

        let strings = text_relation(rows);
        group.bench_with_input(BenchmarkId::new("substringAfter", rows), &strings, |b, table| {
            b.iter(|| black_box(evaluator.evaluate(&after, table).unwrap().len()));
        });
    }

    group.finish();
}

fn bind_benchmark(c: &mut Criterion) {
    let evaluator = Evaluator::new().with_mode(EvaluationMode::Bind);
    let atom = BuiltinAtom::add(var("X"), var("Y"), var("Z"));
    let mut table = Relation::new(["?X", "?Y", "?Z"]).unwrap();
    for i in 0..1_000 {
        table
            .push_row(vec![None, Some(format!("{}^^int", i)), Some("1.5^^double".to_string())])
            .unwrap();
    }

    c.bench_function("bind_add_1000", |b| {
        b.iter(|| black_box(evaluator.run(&atom, &table).unwrap().len()));
    });
}

fn codec_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let codec = AtomCodec::default();
    let atom = BuiltinAtom::modulo(var("X"), BuiltinArgument::literal("13^^int"), BuiltinArgument::literal("5.0^^float"));
    let xml = codec.to_xml(&atom).unwrap();
    let notation = atom.to_string();

    group.bench_function("xml_encode", |b| {
        b.iter(|| black_box(codec.to_xml(&atom).unwrap()));
    });

    group.bench_function("xml_decode", |b| {
        b.iter(|| black_box(codec.from_xml(&xml).unwrap()));
    });

    group.bench_function("notation_parse", |b| {
        b.iter(|| black_box(parse_atom(&notation).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, filter_benchmark, bind_benchmark, codec_benchmark);
criterion_main!(benches);
