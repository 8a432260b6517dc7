use std::sync::Arc;

use versemap::catalog::{Book, Catalog};
use versemap::construct::{Part, QualifiedVerse, Verse};
use versemap::error::VersemapError;
use versemap::mapper::VerseMapper;
use versemap::source::{parse_rules, FileRuleSource};

fn catalog() -> Catalog {
    let books = vec![Book::new("Gen", vec![31, 25]), Book::new("Ps", vec![6, 12])];
    let mut catalog = Catalog::new("KJV", books.clone());
    catalog.add_scheme("Synodal", books);
    catalog
}

#[test]
fn parses_plain_split_part_and_absent_rules() {
    let catalog = catalog();
    let synodal = catalog.scheme_by_name("Synodal").unwrap();
    let hub = catalog.hub_scheme();
    let text = "\
# leading comment

Gen.1.5 = Gen.1.6
Ps.3.1 = Ps.3.1!a Ps.3.2!b
Gen.2.3 = ?
";
    let rules = parse_rules(text, &synodal, &hub).unwrap();
    assert_eq!(rules.len(), 4);

    assert_eq!(rules[0].source(), &Verse::new(synodal.id(), "Gen", 1, 5));
    assert_eq!(
        rules[0].target(),
        &QualifiedVerse::mapped(Verse::new(hub.id(), "Gen", 1, 6), Part::Whole)
    );

    // the split keeps rule order and carries its parts
    assert_eq!(rules[1].source(), &Verse::new(synodal.id(), "Ps", 3, 1));
    assert_eq!(
        rules[1].target(),
        &QualifiedVerse::mapped(
            Verse::new(hub.id(), "Ps", 3, 1),
            Part::Section("a".to_owned())
        )
    );
    assert_eq!(
        rules[2].target(),
        &QualifiedVerse::mapped(
            Verse::new(hub.id(), "Ps", 3, 2),
            Part::Section("b".to_owned())
        )
    );

    assert_eq!(rules[3].target(), &QualifiedVerse::unmappable(Part::Whole));
}

#[test]
fn malformed_line_reports_its_line_number() {
    let catalog = catalog();
    let synodal = catalog.scheme_by_name("Synodal").unwrap();
    let hub = catalog.hub_scheme();
    let text = "Gen.1.5 = Gen.1.6\n\nGen.1.x = Gen.1.7\n";
    let err = parse_rules(text, &synodal, &hub).unwrap_err();
    match err {
        VersemapError::Parse { line, .. } => assert_eq!(line, Some(3)),
        other => panic!("expected a parse error, got {other}"),
    }
}

#[test]
fn part_tag_on_the_scheme_side_is_rejected() {
    let catalog = catalog();
    let synodal = catalog.scheme_by_name("Synodal").unwrap();
    let hub = catalog.hub_scheme();
    let err = parse_rules("Gen.1.5!a = Gen.1.6\n", &synodal, &hub).unwrap_err();
    assert!(matches!(err, VersemapError::Parse { line: Some(1), .. }));
}

#[test]
fn file_source_reads_per_scheme_mapping_files() {
    let dir = std::env::temp_dir().join("versemap_test_mappings");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("Synodal.map"), "Gen.1.5 = Gen.1.6\n").unwrap();

    let mapper = VerseMapper::new(
        Arc::new(catalog()),
        Arc::new(FileRuleSource::new(&dir)),
    );
    let synodal = mapper.catalog().scheme_by_name("Synodal").unwrap().id();
    let hub = mapper.catalog().hub();
    let result = mapper.map(&Verse::new(synodal, "Gen", 1, 5), hub);
    assert!(result.contains(&Verse::new(hub, "Gen", 1, 6)));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_mapping_file_degrades_to_guess_mode() {
    let dir = std::env::temp_dir().join("versemap_test_no_mappings");
    std::fs::create_dir_all(&dir).unwrap();

    let mapper = VerseMapper::new(
        Arc::new(catalog()),
        Arc::new(FileRuleSource::new(&dir)),
    );
    let synodal = mapper.catalog().scheme_by_name("Synodal").unwrap().id();
    let hub = mapper.catalog().hub();
    // no Synodal.map exists, so the same coordinates are assumed
    let result = mapper.map(&Verse::new(synodal, "Gen", 1, 2), hub);
    assert_eq!(result.len(), 1);
    assert!(result.contains(&Verse::new(hub, "Gen", 1, 2)));

    let _ = std::fs::remove_dir_all(&dir);
}
