use iching_core::{Book, SeedDataset, SeedError};

#[test]
fn book_builds_from_caller_supplied_json() {
    let json = serde_json::to_string(&SeedDataset::bundled().unwrap()).unwrap();
    let dataset = SeedDataset::from_json_str(&json).unwrap();
    let book = Book::from_dataset(&dataset).unwrap();
    assert_eq!(book.hexagrams().len(), 64);
    assert_eq!(book.trigrams().len(), 8);
    assert_eq!(book.hexagram(44).unwrap().binary(), "111110");
}

#[test]
fn trigram_lines_are_kept_as_supplied() {
    let mut dataset = SeedDataset::bundled().unwrap();
    // Zhen is "001"; these lines repeat the binary instead of mirroring it.
    assert_eq!(dataset.trigrams[2].binary, "001");
    dataset.trigrams[2].lines = vec![0, 0, 1];
    let json = serde_json::to_string(&dataset).unwrap();

    let loaded = SeedDataset::from_json_str(&json).unwrap();
    assert_eq!(loaded.trigrams[2].lines, vec![0, 0, 1]);
    let book = Book::from_dataset(&loaded).unwrap();
    let bundled = Book::bundled();

    let thunder = book.trigram(3).unwrap();
    assert_eq!(thunder.binary(), "001");
    assert_eq!(thunder.lines(), vec![1, 0, 0]);

    let holders = book.hexagrams_with_trigram(thunder, None);
    assert_eq!(holders.len(), 15);
    for hexagram in holders {
        let expected = bundled.hexagram(hexagram.number()).unwrap();
        assert_eq!(hexagram.binary(), expected.binary());
        assert_eq!(hexagram.top_trigram().binary(), &hexagram.binary()[..3]);
        assert_eq!(hexagram.bottom_trigram().binary(), &hexagram.binary()[3..]);
        assert_eq!(
            hexagram.top_trigram().number(),
            expected.top_trigram().number()
        );
        assert_eq!(
            hexagram.bottom_trigram().number(),
            expected.bottom_trigram().number()
        );
    }
}

#[test]
fn book_rejects_hexagram_with_unknown_trigram_slice() {
    let mut dataset = SeedDataset::bundled().unwrap();
    // Swap two trigram patterns so hexagram declarations no longer line up.
    let first = dataset.trigrams[0].clone();
    dataset.trigrams[0].binary = dataset.trigrams[1].binary.clone();
    dataset.trigrams[0].lines = dataset.trigrams[1].lines.clone();
    dataset.trigrams[1].binary = first.binary;
    dataset.trigrams[1].lines = first.lines;

    let err = Book::from_dataset(&dataset).err().unwrap();
    assert!(matches!(err, SeedError::TrigramMismatch { hexagram: 1, .. }), "{err}");
}

#[test]
fn duplicate_characters_are_rejected() {
    let mut dataset = SeedDataset::bundled().unwrap();
    dataset.hexagrams[5].character = dataset.hexagrams[4].character.clone();
    let err = dataset.validate().unwrap_err();
    assert!(matches!(err, SeedError::DuplicateCharacter { .. }));
}

#[test]
fn out_of_order_numbers_are_rejected() {
    let mut dataset = SeedDataset::bundled().unwrap();
    dataset.hexagrams.swap(10, 11);
    let err = dataset.validate().unwrap_err();
    assert!(matches!(err, SeedError::NumberOutOfOrder { index: 10, number: 12, .. }));
}

#[test]
fn records_use_camel_case_wire_names() {
    let dataset = SeedDataset::bundled().unwrap();
    let json = serde_json::to_value(&dataset).unwrap();
    assert_eq!(json["trigrams"][0]["familyRelationship"], "father");
    assert_eq!(json["hexagrams"][43]["topTrigram"], 1);
    assert_eq!(json["hexagrams"][43]["bottomTrigram"], 6);
}
