use iching_core::{hexagram, Book, ChangeError, LookupError};

#[test]
fn change_to_reports_xor_in_both_orderings() {
    let book = Book::bundled();
    let creative = book.hexagram(1).unwrap();

    let change = book.change_to(creative, 64).unwrap();
    assert_eq!(change.binary(), "010101");
    assert_eq!(change.changing_lines(), vec![1, 0, 1, 0, 1, 0]);

    let change = book.change_to(creative, 43).unwrap();
    assert_eq!(change.binary(), "100000");
    assert_eq!(change.changing_lines(), vec![0, 0, 0, 0, 0, 1]);
}

#[test]
fn change_to_keeps_from_and_to() {
    let book = Book::bundled();
    let duration = book.hexagram(32).unwrap();
    let change = book.change_to(duration, 15).unwrap();

    assert!(std::sync::Arc::ptr_eq(change.from(), duration));
    assert_eq!(change.to().number(), 15);
    assert_eq!(change.binary(), "001010");
}

#[test]
fn change_to_between_neighbours() {
    let book = Book::bundled();
    let small_taming = book.hexagram(9).unwrap();
    let change = book.change_to(small_taming, 10).unwrap();
    assert_eq!(change.binary(), "001100");
    assert_eq!(change.changing_lines(), vec![0, 0, 1, 1, 0, 0]);
}

#[test]
fn change_lines_resolves_target_hexagram() {
    let book = Book::bundled();
    let creative = book.hexagram(1).unwrap();

    assert!(book.change_lines(creative, &[0, 0, 0, 0, 0, 0]).unwrap().is_none());

    let change = book
        .change_lines(creative, &[1, 0, 0, 0, 0, 0])
        .unwrap()
        .unwrap();
    assert_eq!(change.binary(), "000001");
    assert_eq!(change.to().number(), 44);

    let change = book
        .change_lines(creative, &[1, 1, 1, 1, 1, 1])
        .unwrap()
        .unwrap();
    assert_eq!(change.to().number(), 2);
}

#[test]
fn change_lines_matches_change_to() {
    let book = Book::bundled();
    for from in book.hexagrams() {
        for change in book.changes(from).unwrap() {
            let replayed = book
                .change_lines(from, &change.changing_lines())
                .unwrap()
                .unwrap();
            assert_eq!(replayed.to().number(), change.to().number());
        }
    }
}

#[test]
fn change_lines_rejects_malformed_flips() {
    let book = Book::bundled();
    let creative = book.hexagram(1).unwrap();

    for flips in [&[1, 0, 1, 0, 1][..], &[1, 0, 1, 0, 1, 0, 1][..], &[][..]] {
        let err = book.change_lines(creative, flips).unwrap_err();
        assert_eq!(err, ChangeError::InvalidFlipLength(flips.len()));
        assert!(err
            .to_string()
            .starts_with("lines argument must be an array of 6 zeros and ones"));
    }

    let err = book.change_lines(creative, &[1, 0, 0, 0, 0, 255]).unwrap_err();
    assert_eq!(err, ChangeError::InvalidLineValue { index: 5, value: 255 });
}

#[test]
fn every_hexagram_has_63_distinct_changes() {
    let book = Book::bundled();
    for number in 1..=64 {
        let from = hexagram(number).unwrap();
        let changes = book.changes(&from).unwrap();
        assert_eq!(changes.len(), 63);
        assert!(changes.iter().all(|c| c.to().number() != number));
        assert!(changes.iter().all(|c| c.binary() != "000000"));

        let targets: Vec<u32> = changes.iter().map(|c| c.to().number()).collect();
        let expected: Vec<u32> = (1..=64).filter(|n| *n != number).collect();
        assert_eq!(targets, expected);
    }
}

#[test]
fn changes_are_reference_stable() {
    let book = Book::bundled();
    let from = book.hexagram(1).unwrap();
    let first = book.changes(from).unwrap();
    let second = book.changes(from).unwrap();
    assert!(std::ptr::eq(first.as_ptr(), second.as_ptr()));
}

#[test]
fn change_to_unknown_target_is_not_found() {
    let book = Book::bundled();
    let creative = book.hexagram(1).unwrap();
    assert_eq!(
        book.change_to(creative, 0).unwrap_err(),
        LookupError::HexagramNotFound(0)
    );
}
