use crate::util::{Address, ObjectReference};

/// The VM-side view of a managed object, as far as this crate needs one:
/// a size and a way to reproduce the object's bytes at a new address. The
/// crate treats everything between those bytes as opaque; headers, fields
/// and layout belong to the binding.
///
/// All methods are static: the binding's object model is stateless from this
/// crate's point of view, selected through [`crate::vm::VMBinding::VMObjectModel`].
pub trait ObjectModel<VM: crate::vm::VMBinding> {
    /// Return the current size in bytes of the given object, including any
    /// header the binding wants carried along on promotion.
    fn get_current_size(object: ObjectReference) -> usize;

    /// Return the in-memory address of the object's first byte, i.e. the
    /// source address a promotion copies from.
    fn ref_to_address(object: ObjectReference) -> Address;

    /// Reproduce `bytes` bytes of the object's representation at `to`. The
    /// target range is inside the region and is not covered by the primary
    /// heap's bookkeeping; the implementation must not assume it is.
    ///
    /// `to` is a range freshly reserved for this object, so it never
    /// overlaps the source.
    fn copy_to(object: ObjectReference, to: Address, bytes: usize);
}
