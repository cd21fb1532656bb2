//! The interface between this crate and the VM that embeds it.
//!
//! The crate is runtime-neutral: it never interprets object contents. A VM
//! binding ties its own object representation in by implementing
//! [`ObjectModel`] and naming that implementation in a [`VMBinding`] type,
//! which parameterizes [`crate::TierSpace`].

mod object_model;
pub use self::object_model::ObjectModel;

/// A VM binding. The implementing type is never instantiated by this crate;
/// it only carries the associated types through generics.
pub trait VMBinding
where
    Self: Sized + 'static + Send + Sync + Default,
{
    /// The binding's object model: object sizes and raw-copy semantics.
    type VMObjectModel: ObjectModel<Self>;
}
