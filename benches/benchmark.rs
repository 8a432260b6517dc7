use criterion::{black_box, criterion_group, criterion_main, Criterion};

use std::fmt::Write as _;
use std::sync::Arc;

use versemap::catalog::{Book, Catalog};
use versemap::construct::Verse;
use versemap::mapper::VerseMapper;
use versemap::source::TextRuleSource;

pub fn criterion_benchmark(c: &mut Criterion) {
    // a single book with 50 chapters of 31 verses, fully ruled 1:1
    let books = vec![Book::new("Gen", vec![31; 50])];
    let mut catalog = Catalog::new("KJV", books.clone());
    let synodal = catalog.add_scheme("Synodal", books.clone());
    let vulgate = catalog.add_scheme("Vulgate", books.clone());
    let bare = catalog.add_scheme("Bare", books);

    let mut script = String::new();
    for chapter in 1..=50u16 {
        for verse in 1..=31u16 {
            writeln!(script, "Gen.{chapter}.{verse} = Gen.{chapter}.{verse}").unwrap();
        }
    }
    let source = TextRuleSource::new()
        .with("Synodal", &script)
        .with("Vulgate", &script);
    let mapper = VerseMapper::new(Arc::new(catalog), Arc::new(source));
    let hub = mapper.catalog().hub();
    let verse = Verse::new(synodal, "Gen", 25, 10);

    // warm the cache so the measurements cover lookup, not loading
    mapper.map(&verse, vulgate);
    mapper.map(&verse, bare);

    c.bench_function("map identity", |b| {
        b.iter(|| mapper.map(black_box(&verse), synodal))
    });
    c.bench_function("map to hub", |b| {
        b.iter(|| mapper.map(black_box(&verse), hub))
    });
    c.bench_function("map two hops", |b| {
        b.iter(|| mapper.map(black_box(&verse), vulgate))
    });
    c.bench_function("map guessed target", |b| {
        b.iter(|| mapper.map(black_box(&verse), bare))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
