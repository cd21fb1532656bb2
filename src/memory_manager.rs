//! VM-to-tierspace interface: safe Rust APIs.
//!
//! This module provides a safe Rust API for the crate. We expect a VM
//! binding to inherit and extend this API by:
//! 1. adding their VM-specific functions
//! 2. exposing the functions to native if necessary, with the binding
//!    managing the unsafety of the FFI surface.
//!
//! Every function here is a thin, documented wrapper over a
//! [`TierSpace`] method; bindings that prefer calling methods directly lose
//! nothing.

use crate::error::TierSpaceError;
use crate::tierspace::TierSpaceBuilder;
use crate::tierspace::TierSpace;
use crate::util::{Address, ObjectReference};
use crate::vm::VMBinding;

/// Initialize a tierspace instance. A VM should call this once per instance
/// it wants, after setting options on the builder and before calling any of
/// the other functions with the returned instance.
///
/// We expect a binding to initialize the crate in the following steps:
///
/// 1. Create a [`TierSpaceBuilder`].
/// 2. Set options via [`process()`]/[`process_bulk()`], environment
///    variables (`TIERSPACE_*`), or direct field access on
///    `builder.options`.
/// 3. Call this function to obtain the instance.
/// 4. Call [`create_region()`] once the collector is ready to promote.
///
/// Note that this method will attempt to initialize a logger. If the VM
/// would like to use its own logger, it should initialize the logger before
/// calling this method.
///
/// Arguments:
/// * `builder`: The reference to a tierspace builder.
pub fn tierspace_init<VM: VMBinding>(builder: &TierSpaceBuilder) -> Box<TierSpace<VM>> {
    match crate::util::logger::try_init() {
        Ok(_) => debug!("tierspace initialized the logger."),
        Err(_) => debug!(
            "tierspace failed to initialize the logger. Possibly a logger has been initialized by user."
        ),
    }
    let space = builder.build();
    info!(
        "Initialized tierspace {} (features: {})",
        crate::build_info::TIERSPACE_PKG_VERSION,
        crate::build_info::TIERSPACE_FEATURES
    );
    Box::new(space)
}

/// Process an option. Returns true if the option is set successfully.
///
/// Arguments:
/// * `builder`: The builder to set the option on.
/// * `name`: The name of the option, in camelCase or snake_case.
/// * `value`: The value of the option, in string format.
pub fn process(builder: &mut TierSpaceBuilder, name: &str, value: &str) -> bool {
    builder.set_option(name, value)
}

/// Process multiple options, one from each whitespace-separated
/// `name=value` pair. Returns true only if all the options are processed
/// successfully.
///
/// Arguments:
/// * `builder`: The builder to set the options on.
/// * `options`: The option string, e.g. `"regionSize=1g backing=Anonymous"`.
pub fn process_bulk(builder: &mut TierSpaceBuilder, options: &str) -> bool {
    for opt in options.split_ascii_whitespace() {
        let kv_pair: Vec<&str> = opt.split('=').collect();
        if kv_pair.len() != 2 {
            return false;
        }
        if !process(builder, kv_pair[0], kv_pair[1]) {
            return false;
        }
    }
    true
}

/// Create the instance's region, sized by the `region_size` option. Fails
/// with [`TierSpaceError::RegionAlreadyExists`] on a second call.
///
/// Arguments:
/// * `space`: A reference to the tierspace instance.
pub fn create_region<VM: VMBinding>(space: &TierSpace<VM>) -> Result<(), TierSpaceError> {
    space.create_region()
}

/// Promote an object into the region: reserve `bytes` bytes, copy the
/// object's representation there through the binding's object model, and
/// return the new address. Fails with
/// [`TierSpaceError::OutOfRegionSpace`] when the object does not fit, in
/// which case nothing was copied; recovery belongs to the collector.
///
/// Arguments:
/// * `space`: A reference to the tierspace instance.
/// * `object`: The object to promote.
/// * `bytes`: The object's size, as the collector computed it.
pub fn promote<VM: VMBinding>(
    space: &TierSpace<VM>,
    object: ObjectReference,
    bytes: usize,
) -> Result<Address, TierSpaceError> {
    space.promote(object, bytes)
}

/// [`promote()`], with the size obtained from the binding's object model.
///
/// Arguments:
/// * `space`: A reference to the tierspace instance.
/// * `object`: The object to promote.
pub fn promote_object<VM: VMBinding>(
    space: &TierSpace<VM>,
    object: ObjectReference,
) -> Result<Address, TierSpaceError> {
    space.promote_object(object)
}

/// Is the address inside the instance's region? O(1), lock-free, safe to
/// call concurrently with promotions from other threads.
///
/// Arguments:
/// * `space`: A reference to the tierspace instance.
/// * `addr`: The address to test.
pub fn is_in_region<VM: VMBinding>(space: &TierSpace<VM>, addr: Address) -> bool {
    space.is_in_region(addr)
}

/// Is the object (by its binding-defined address) inside the instance's
/// region?
///
/// Arguments:
/// * `space`: A reference to the tierspace instance.
/// * `object`: The object to test.
pub fn is_object_in_region<VM: VMBinding>(space: &TierSpace<VM>, object: ObjectReference) -> bool {
    space.is_object_in_region(object)
}

/// Record an object as a trace entry point. Always succeeds.
///
/// Arguments:
/// * `space`: A reference to the tierspace instance.
/// * `reference`: The root to record.
pub fn push_root<VM: VMBinding>(space: &TierSpace<VM>, reference: ObjectReference) {
    space.push_root(reference)
}

/// Remove and return the most recently recorded root. Fails with
/// [`TierSpaceError::EmptyRootStack`] when nothing is queued.
///
/// Arguments:
/// * `space`: A reference to the tierspace instance.
pub fn pop_root<VM: VMBinding>(space: &TierSpace<VM>) -> Result<ObjectReference, TierSpaceError> {
    space.pop_root()
}

/// The first address of the region (zero before [`create_region()`]).
///
/// Arguments:
/// * `space`: A reference to the tierspace instance.
pub fn region_start<VM: VMBinding>(space: &TierSpace<VM>) -> Address {
    space.region().start()
}

/// The next free address in the region.
///
/// Arguments:
/// * `space`: A reference to the tierspace instance.
pub fn region_cursor<VM: VMBinding>(space: &TierSpace<VM>) -> Address {
    space.region().cursor()
}

/// Bytes of the region not yet reserved.
///
/// Arguments:
/// * `space`: A reference to the tierspace instance.
pub fn free_bytes<VM: VMBinding>(space: &TierSpace<VM>) -> usize {
    space.region().free_bytes()
}
