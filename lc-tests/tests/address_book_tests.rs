//! Integration Tests für das Adressbuch
//!
//! Diese Tests laufen auf dem Host (x86_64)

mod common;

use common::{MockTransport, address};
use lc_core::{AddressBook, LampError, LivingColors};

// ============================================================================
// Tests: AddressBook
// ============================================================================

#[test]
fn test_insert_same_address_twice() {
    let mut book: AddressBook = AddressBook::new();
    book.insert(address(9)).unwrap();

    let first = book.insert(address(1)).unwrap();
    let second = book.insert(address(1)).unwrap();

    assert_eq!(first, second);
    assert_eq!(book.count(), 2);
}

#[test]
fn test_insert_beyond_capacity_fails() {
    let mut book: AddressBook = AddressBook::new();
    for n in 0..6 {
        book.insert(address(n)).unwrap();
    }

    assert_eq!(book.insert(address(6)), Err(LampError::Full));
    assert_eq!(book.count(), 6);
}

#[test]
fn test_clear_removes_all_entries() {
    let mut book: AddressBook = AddressBook::new();
    for n in 0..4 {
        book.insert(address(n)).unwrap();
    }

    book.clear();

    assert_eq!(book.count(), 0);
    for index in 0..4 {
        assert_eq!(book.get(index), None);
    }
}

#[test]
fn test_get_out_of_range_is_absent() {
    let mut book: AddressBook = AddressBook::new();
    book.insert(address(0)).unwrap();
    assert_eq!(book.get(1), None);
    assert_eq!(book.get(255), None);
}

#[test]
fn test_capacity_scenario() {
    let mut book: AddressBook = AddressBook::new();

    // 6 verschiedene Adressen -> Index 0..5
    for n in 0..6u8 {
        assert_eq!(book.insert(address(n + 1)), Ok(n));
    }

    // 7. Adresse passt nicht mehr
    assert_eq!(book.insert(address(7)), Err(LampError::Full));

    // Adresse #3 nochmal -> ursprünglicher Platz
    assert_eq!(book.insert(address(3)), Ok(2));
    assert_eq!(book.count(), 6);
}

#[test]
fn test_indices_stay_contiguous() {
    let mut book: AddressBook = AddressBook::new();
    for n in 0..3 {
        book.insert(address(n)).unwrap();
    }
    let stored: Vec<_> = book.iter().copied().collect();
    assert_eq!(stored, vec![address(0), address(1), address(2)]);
}

// ============================================================================
// Tests: Adressverwaltung über LivingColors
// ============================================================================

#[test]
fn test_engine_add_and_get_lamp() {
    let mut lamps: LivingColors<MockTransport> = LivingColors::new(MockTransport::new());

    assert_eq!(lamps.max_num_lamps(), 6);
    assert_eq!(lamps.num_lamps(), 0);
    assert_eq!(lamps.add_lamp(address(1)), Ok(0));
    assert_eq!(lamps.get_lamp(0), Some(address(1)));
    assert_eq!(lamps.get_lamp(1), None);

    lamps.clear_lamps();
    assert_eq!(lamps.num_lamps(), 0);
    assert_eq!(lamps.get_lamp(0), None);

    // Adressverwaltung berührt den Funk-Chip nicht
    assert!(lamps.transport().ops.is_empty());
}
