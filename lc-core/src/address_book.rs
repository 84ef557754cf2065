//! Adressbuch für gelernte Lampen
//!
//! Feste Kapazität, Einträge liegen lückenlos ab Index 0. Einfügen ist
//! idempotent, bei voller Kapazität wird nichts überschrieben.

use heapless::Vec;

use crate::traits::LampError;
use crate::types::LampAddress;

/// Maximale Anzahl speicherbarer Lampen
pub const MAX_LAMPS: usize = 6;

#[derive(Debug, Default)]
pub struct AddressBook<const N: usize = MAX_LAMPS> {
    entries: Vec<LampAddress, N>,
}

impl<const N: usize> AddressBook<N> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn capacity(&self) -> u8 {
        N as u8
    }

    /// Anzahl gültiger Einträge
    pub fn count(&self) -> u8 {
        self.entries.len() as u8
    }

    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    /// Index einer bereits gespeicherten Adresse
    pub fn position(&self, address: &LampAddress) -> Option<u8> {
        self.entries
            .iter()
            .position(|entry| entry == address)
            .map(|index| index as u8)
    }

    /// Speichert eine Adresse und liefert ihren Index
    ///
    /// Bekannte Adressen behalten ihren Index. Ist das Buch voll, schlägt
    /// das Einfügen mit [`LampError::Full`] fehl.
    pub fn insert(&mut self, address: LampAddress) -> Result<u8, LampError> {
        if let Some(index) = self.position(&address) {
            return Ok(index);
        }
        let index = self.count();
        self.entries.push(address).map_err(|_| LampError::Full)?;
        Ok(index)
    }

    pub fn get(&self, index: u8) -> Option<LampAddress> {
        self.entries.get(usize::from(index)).copied()
    }

    /// Löscht alle Einträge
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &LampAddress> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(n: u8) -> LampAddress {
        LampAddress::new([n, 0, 0, 0, 0xEE, 0, 0, 0, n])
    }

    #[test]
    fn test_new_book_is_empty() {
        let book: AddressBook = AddressBook::new();
        assert_eq!(book.capacity(), 6);
        assert_eq!(book.count(), 0);
        assert_eq!(book.get(0), None);
    }

    #[test]
    fn test_insert_appends_in_order() {
        let mut book: AddressBook<3> = AddressBook::new();
        assert_eq!(book.insert(address(1)), Ok(0));
        assert_eq!(book.insert(address(2)), Ok(1));
        assert_eq!(book.get(1), Some(address(2)));
        assert_eq!(book.count(), 2);
    }

    #[test]
    fn test_full_book_keeps_entries() {
        let mut book: AddressBook<2> = AddressBook::new();
        book.insert(address(1)).unwrap();
        book.insert(address(2)).unwrap();
        assert!(book.is_full());
        assert_eq!(book.insert(address(3)), Err(LampError::Full));
        assert_eq!(book.position(&address(3)), None);
        // bekannte Adresse geht auch bei vollem Buch
        assert_eq!(book.insert(address(1)), Ok(0));
    }
}
