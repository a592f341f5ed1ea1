use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use wikidata_processor::config::{FilterKind, PipelineConfig};
use wikidata_processor::error::Error;
use wikidata_processor::io::{ShardWriter, Source};
use wikidata_processor::pipelines::{LangFilter, Pipeline};

const DUMP: &str = "@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix schema: <http://schema.org/> .
<http://www.wikidata.org/entity/Q31> rdfs:label \"Belgium\"@en .
<http://www.wikidata.org/entity/Q31> rdfs:label \"Belgique\"@fr .
<http://www.wikidata.org/entity/Q31> schema:description \"country in western Europe\"@en .
<http://www.wikidata.org/entity/Q31> <http://www.wikidata.org/prop/direct/P31>
    <http://www.wikidata.org/entity/Q6256> .
<http://www.wikidata.org/entity/Q31> schema:name \"Belgium\"@en ;
    rdfs:label \"Belgium\"@en ;
    <http://www.w3.org/2000/01/rdf-schema#label> \"Belgium\"@en .
";

fn read_shard(dst: &Path, index: u64) -> String {
    let f = File::open(ShardWriter::shard_path(dst, index)).unwrap();
    let mut out = String::new();
    GzDecoder::new(f).read_to_string(&mut out).unwrap();
    out
}

fn read_all_shards(dst: &Path) -> Vec<String> {
    (0..)
        .map(|i| ShardWriter::shard_path(dst, i))
        .take_while(|p| p.exists())
        .enumerate()
        .map(|(i, _)| read_shard(dst, i as u64))
        .collect()
}

fn statements(n: usize, lang: impl Fn(usize) -> &'static str) -> String {
    (0..n)
        .map(|i| format!("<http://e/{}> <http://e/p> \"v{}\"@{} .\n", i, i, lang(i)))
        .collect()
}

fn run(input: PathBuf, dst: &Path, lang: &str, chunk_size: u64, filter: FilterKind) -> Vec<String> {
    let config = PipelineConfig::new(lang, dst.to_path_buf(), chunk_size)
        .unwrap()
        .with_filter(filter);
    LangFilter::new(config, Source::File(input)).run().unwrap();
    read_all_shards(dst)
}

#[test]
fn five_statements_one_french() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dump.nt");
    let lang = |i: usize| if i == 2 { "fr" } else { "en" };
    std::fs::write(&input, statements(5, lang)).unwrap();

    let dst = dir.path().join("out");
    let shards = run(input, &dst, "en", 100, FilterKind::Tag);

    assert_eq!(shards.len(), 1);
    let lines: Vec<&str> = shards[0].lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|l| l.ends_with("@en .")));
    assert!(!shards[0].contains("<http://e/2>"));
}

#[test]
fn two_by_two() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dump.nt");
    std::fs::write(&input, statements(4, |_| "en")).unwrap();

    let dst = dir.path().join("out");
    let shards = run(input, &dst, "en", 2, FilterKind::Tag);

    assert_eq!(shards.len(), 2);
    for shard in &shards {
        assert_eq!(shard.lines().count(), 2);
    }
    assert!(shards[0].starts_with("<http://e/0>"));
    assert!(shards[1].starts_with("<http://e/2>"));
}

#[test]
fn shards_concatenate_to_accepted_statements() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dump.nt");
    let lang = |i: usize| if i % 3 == 0 { "de" } else { "en" };
    let content = statements(50, lang);
    std::fs::write(&input, &content).unwrap();

    let dst = dir.path().join("out");
    let shards = run(input, &dst, "en", 7, FilterKind::Tag);

    let expected: String = content
        .lines()
        .filter(|l| l.ends_with("@en ."))
        .map(|l| format!("{}\n", l))
        .collect();
    assert_eq!(shards.concat(), expected);
    // 33 accepted statements
    assert_eq!(shards.len(), 5);
    assert_eq!(shards.last().unwrap().lines().count(), 5);
}

#[test]
fn trailing_partial_statement_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dump.ttl");
    std::fs::write(
        &input,
        "<http://e/1> <http://e/p> \"a\"@en .\n<http://e/2> <http://e/p>\n    \"b\"@en",
    )
    .unwrap();

    let dst = dir.path().join("out");
    let config = PipelineConfig::new("en", dst.clone(), 10).unwrap();
    let stats = LangFilter::new(config, Source::File(input)).run().unwrap();

    assert_eq!(stats.statements, 1);
    assert!(stats.dropped_bytes > 0);
    assert_eq!(read_shard(&dst, 0), "<http://e/1> <http://e/p> \"a\"@en .\n");
}

#[test]
fn gzip_and_bzip2_inputs() {
    let dir = tempfile::tempdir().unwrap();

    let gz = dir.path().join("dump.ttl.gz");
    let mut enc = GzEncoder::new(File::create(&gz).unwrap(), flate2::Compression::default());
    enc.write_all(DUMP.as_bytes()).unwrap();
    enc.finish().unwrap();

    let bz = dir.path().join("dump.ttl.bz2");
    let mut enc = bzip2::write::BzEncoder::new(
        File::create(&bz).unwrap(),
        bzip2::Compression::default(),
    );
    enc.write_all(DUMP.as_bytes()).unwrap();
    enc.finish().unwrap();

    let from_gz = run(gz, &dir.path().join("gz"), "en", 100, FilterKind::Tag);
    let from_bz = run(bz, &dir.path().join("bz"), "en", 100, FilterKind::Tag);
    assert_eq!(from_gz, from_bz);
    assert!(!from_gz[0].contains("Belgique"));
    assert!(from_gz[0].contains("@prefix rdfs:"));
}

#[test]
fn structural_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dump.ttl");
    std::fs::write(&input, DUMP).unwrap();

    let shards = run(
        input,
        &dir.path().join("out"),
        "en",
        100,
        FilterKind::Triples,
    );
    assert_eq!(shards.len(), 1);
    let lines: Vec<&str> = shards[0].lines().collect();

    // the last statement holds the same label twice: it's only emitted once for that statement
    let label = "<http://www.wikidata.org/entity/Q31> <http://www.w3.org/2000/01/rdf-schema#label> \"Belgium\"@en .";
    assert_eq!(lines.iter().filter(|l| **l == label).count(), 2);
    assert!(lines.contains(
        &"<http://www.wikidata.org/entity/Q31> <http://schema.org/description> \"country in western Europe\"@en ."
    ));
    assert!(lines.contains(
        &"<http://www.wikidata.org/entity/Q31> <http://schema.org/name> \"Belgium\"@en ."
    ));
    assert!(!shards[0].contains("Belgique"));
    assert!(!shards[0].contains("P31"));
    assert_eq!(lines.len(), 4);
}

#[test]
fn missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig::new("en", dir.path().join("out"), 10).unwrap();
    let res = LangFilter::new(config, Source::File(dir.path().join("missing.gz"))).run();
    assert!(matches!(res, Err(Error::Source(_, _))));
}

#[test]
fn output_dir_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dump.nt");
    std::fs::write(&input, "").unwrap();

    let dst = dir.path().join("a").join("b");
    let shards = run(input, &dst, "en", 10, FilterKind::Tag);
    assert_eq!(shards, vec![String::new()]);
}
