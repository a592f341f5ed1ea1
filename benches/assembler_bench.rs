use std::io::Cursor;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use wikidata_processor::filtering::{StatementFilter, TrailingTag, TripleFilter};
use wikidata_processor::io::LineScanner;
use wikidata_processor::processing::Statements;

// bench protocol:
//
// Synthetic wikidata-like dump with a mix of
// - single line tagged statements (one language out of 4)
// - untagged single line statements
// - multi line blocks ending with a tagged literal
fn dump(nb_entities: usize) -> String {
    let langs = ["en", "fr", "de", "ja"];
    let mut out = String::from(
        "@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n@prefix schema: <http://schema.org/> .\n",
    );
    for i in 0..nb_entities {
        let lang = langs[i % langs.len()];
        out.push_str(&format!(
            "<http://www.wikidata.org/entity/Q{i}> rdfs:label \"label {i}\"@{lang} .\n"
        ));
        out.push_str(&format!(
            "<http://www.wikidata.org/entity/Q{i}> <http://www.wikidata.org/prop/direct/P31> <http://www.wikidata.org/entity/Q5> .\n"
        ));
        out.push_str(&format!(
            "<http://www.wikidata.org/entity/Q{i}> schema:name \"name {i}\"@{lang} ;\n    schema:description \"description {i}\"@{lang} .\n"
        ));
    }
    out
}

fn assemble(input: &str) -> usize {
    Statements::new(LineScanner::new(Cursor::new(input.as_bytes())))
        .filter_map(Result::ok)
        .count()
}

fn filter_with<F: StatementFilter>(input: &str, mut filter: F) -> usize {
    Statements::new(LineScanner::new(Cursor::new(input.as_bytes())))
        .filter_map(Result::ok)
        .filter(|st| matches!(filter.apply(st), Ok(Some(_))))
        .count()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("statements");
    for nb_entities in [1_000, 10_000] {
        let input = dump(nb_entities);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("assemble", nb_entities), &input, |b, i| {
            b.iter(|| assemble(i))
        });
        group.bench_with_input(BenchmarkId::new("tag", nb_entities), &input, |b, i| {
            b.iter(|| filter_with(i, TrailingTag::new("en")))
        });
        group.bench_with_input(BenchmarkId::new("triples", nb_entities), &input, |b, i| {
            b.iter(|| filter_with(i, TripleFilter::new("en")))
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
