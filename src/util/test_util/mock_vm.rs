//! A minimal binding for testing promotion end to end.
//!
//! `MockVM`'s object model is the simplest one that still exercises every
//! seam: an object reference points at the object's first word, that word
//! holds the object's total size in bytes, and payload words follow. Copying
//! an object is a raw byte copy of the whole representation.

use crate::util::constants::BYTES_IN_WORD;
use crate::util::{Address, ObjectReference};
use crate::vm::{ObjectModel, VMBinding};

#[derive(Default)]
pub struct MockVM;

impl VMBinding for MockVM {
    type VMObjectModel = MockObjectModel;
}

pub struct MockObjectModel;

impl ObjectModel<MockVM> for MockObjectModel {
    fn get_current_size(object: ObjectReference) -> usize {
        unsafe { object.to_raw_address().load::<usize>() }
    }

    fn ref_to_address(object: ObjectReference) -> Address {
        object.to_raw_address()
    }

    fn copy_to(object: ObjectReference, to: Address, bytes: usize) {
        let from = Self::ref_to_address(object);
        unsafe {
            std::ptr::copy_nonoverlapping::<u8>(from.to_ptr(), to.to_mut_ptr(), bytes);
        }
    }
}

/// An object in `MockVM`'s representation, owned by the test: one size word
/// followed by `words - 1` payload words. Keep the instance alive for as long
/// as its reference is used.
pub struct MockObject {
    storage: Box<[usize]>,
}

impl MockObject {
    /// An object of `words` words (at least one, for the size header), with
    /// every payload word set to `fill`.
    pub fn with_fill(words: usize, fill: usize) -> MockObject {
        assert!(words >= 1);
        let mut storage = vec![fill; words].into_boxed_slice();
        storage[0] = words * BYTES_IN_WORD;
        MockObject { storage }
    }

    pub fn reference(&self) -> ObjectReference {
        ObjectReference::from_raw_address(Address::from_ptr(self.storage.as_ptr()))
    }

    /// The object's size in bytes, as its own header declares it.
    pub fn bytes(&self) -> usize {
        self.storage[0]
    }

    /// The representation as raw bytes, for comparing against a promoted
    /// copy.
    pub fn as_bytes(&self) -> &[u8] {
        unsafe {
            std::slice::from_raw_parts(self.storage.as_ptr() as *const u8, self.bytes())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_comes_from_the_header_word() {
        let object = MockObject::with_fill(5, 0xAB);
        assert_eq!(object.bytes(), 5 * BYTES_IN_WORD);
        assert_eq!(
            MockObjectModel::get_current_size(object.reference()),
            5 * BYTES_IN_WORD
        );
    }

    #[test]
    fn copy_reproduces_the_representation() {
        let object = MockObject::with_fill(4, 0x5A5A);
        let mut target = vec![0usize; 4];
        MockObjectModel::copy_to(
            object.reference(),
            Address::from_ptr(target.as_ptr()),
            object.bytes(),
        );
        assert_eq!(target[0], object.bytes());
        assert_eq!(&target[1..], &[0x5A5A, 0x5A5A, 0x5A5A]);
    }
}
