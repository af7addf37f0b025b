//! Dataset loading tests: plain and gzipped files, missing and malformed input.

mod common;

use std::io::Write;

use commander_deck_check::dataset::{load_all_printings, parse_str};
use commander_deck_check::{CardIndex, DeckCheckError};
use flate2::write::GzEncoder;
use flate2::Compression;

#[test]
fn loads_plain_json() {
    let (path, _tmp) = common::sample_dataset_file();
    let dataset = load_all_printings(&path).unwrap();

    assert_eq!(dataset.data.len(), 4);
    assert_eq!(dataset.meta.unwrap().version, "5.2.2+20261001");
}

#[test]
fn loads_gzipped_json() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("AllPrintings.json.gz");
    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder
        .write_all(common::sample_all_printings().to_string().as_bytes())
        .unwrap();
    encoder.finish().unwrap();

    let index = CardIndex::from_path(&path).unwrap();
    assert_eq!(index.len(), 28);
}

#[test]
fn missing_file_is_a_dataset_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = load_all_printings(tmp.path().join("nope.json")).unwrap_err();

    assert!(matches!(err, DeckCheckError::Dataset(_)));
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn truncated_document_is_a_dataset_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("AllPrintings.json");
    std::fs::write(&path, r#"{"data": {"TST": {"cards": [{"name": "Sol"#).unwrap();

    let err = load_all_printings(&path).unwrap_err();
    assert!(matches!(err, DeckCheckError::Dataset(_)));
    assert!(err.to_string().contains("malformed AllPrintings document"));
}

#[test]
fn document_without_data_is_rejected() {
    assert!(matches!(
        parse_str(r#"{"meta": {"version": "1"}}"#),
        Err(DeckCheckError::Dataset(_))
    ));
}

#[test]
fn malformed_card_objects_do_not_reject_the_set() {
    let dataset = parse_str(
        r#"{"data": {"TST": {"code": "TST", "cards": [
            "junk",
            {"name": 7},
            {"name": "Sol Ring", "type": "Artifact", "manaCost": "{1}"}
        ]}}}"#,
    )
    .unwrap();
    assert_eq!(dataset.card_count(), 3);

    let index = CardIndex::build(dataset).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index.printing_count(), 1);
}

#[test]
fn building_twice_gives_identical_indexes() {
    let (path, _tmp) = common::sample_dataset_file();
    let first = CardIndex::from_path(&path).unwrap();
    let second = CardIndex::from_path(&path).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.name, b.name);
        assert_eq!(a.color_identity, b.color_identity);
        assert_eq!(a.types, b.types);
        assert_eq!(a.faces, b.faces);
        assert_eq!(a.deck_limit, b.deck_limit);
    }
}

#[test]
fn set_key_order_does_not_change_the_index() {
    let value = common::sample_all_printings();
    let data = value["data"].as_object().unwrap();
    // Write the sets in reverse key order by hand; a serde_json map would re-sort them.
    let sets: Vec<String> = data
        .iter()
        .rev()
        .map(|(code, set)| format!("{}: {}", serde_json::Value::from(code.as_str()), set))
        .collect();
    let reversed = format!("{{\"data\": {{{}}}}}", sets.join(", "));

    let tmp = tempfile::tempdir().unwrap();
    let path_b = tmp.path().join("Reversed.json");
    std::fs::write(&path_b, reversed).unwrap();

    let (path_a, _tmp_a) = common::write_dataset(&value);
    let a = CardIndex::from_path(&path_a).unwrap();
    let b = CardIndex::from_path(&path_b).unwrap();

    let sol_a = a.lookup_exact("Sol Ring").unwrap();
    let sol_b = b.lookup_exact("Sol Ring").unwrap();
    assert_eq!(a.len(), b.len());
    assert_eq!(sol_a.faces, sol_b.faces);
    assert_eq!(sol_a.printings, sol_b.printings);
    assert_eq!(sol_a.id, sol_b.id);
}
