use std::marker::PhantomData;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crate::backing::{BackingStore, MmapBackingStore};
use crate::error::TierSpaceError;
use crate::global_state::GlobalState;
use crate::region::RegionResource;
use crate::roots::RootStack;
use crate::util::conversions;
use crate::util::options::Options;
use crate::util::{Address, ObjectReference};
use crate::vm::{ObjectModel, VMBinding};

/// Builds a [`TierSpace`] instance.
///
/// The builder owns the option set; an embedder mutates `options` (or calls
/// [`TierSpaceBuilder::set_option`]) before building. Environment variables
/// with the `TIERSPACE_` prefix are applied when the builder is created.
pub struct TierSpaceBuilder {
    /// The options for this instance.
    pub options: Options,
    backing: Option<Arc<dyn BackingStore>>,
}

impl TierSpaceBuilder {
    pub fn new() -> Self {
        TierSpaceBuilder {
            options: Options::default(),
            backing: None,
        }
    }

    /// Set an option by name ("regionSize" or "region_size" forms both
    /// work). Returns false if the name is unknown or the value invalid.
    pub fn set_option(&mut self, name: &str, value: &str) -> bool {
        self.options.set_from_camelcase_str(name, value)
    }

    /// Use the given store instead of the one `options.backing` selects.
    /// This is how an embedder donates an address range it already owns.
    pub fn set_backing(&mut self, backing: Arc<dyn BackingStore>) {
        self.backing = Some(backing);
    }

    /// Build a TierSpace instance with the current configuration.
    pub fn build<VM: VMBinding>(&self) -> TierSpace<VM> {
        TierSpace::new(self)
    }
}

impl Default for TierSpaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// An instance of the second-tier region manager: the region itself, the
/// root stack, the backing store they were configured with, and counters.
///
/// There is no process-wide state; independent instances coexist freely and
/// every operation goes through a `&TierSpace` (usually via the
/// [`crate::memory_manager`] functions). The instance is `Sync`: membership
/// tests are lock-free, reservations serialize on the region's internal
/// lock, and the root stack carries its own.
pub struct TierSpace<VM: VMBinding> {
    options: Arc<Options>,
    backing: Arc<dyn BackingStore>,
    region: RegionResource,
    roots: RootStack,
    state: GlobalState,
    phantom: PhantomData<VM>,
}

impl<VM: VMBinding> TierSpace<VM> {
    pub(crate) fn new(builder: &TierSpaceBuilder) -> Self {
        let options = Arc::new(builder.options.clone());
        let backing = builder
            .backing
            .clone()
            .unwrap_or_else(|| Arc::new(MmapBackingStore::from_selector(&options.backing)));
        TierSpace {
            options,
            backing,
            region: RegionResource::new(),
            roots: RootStack::new(),
            state: GlobalState::default(),
            phantom: PhantomData,
        }
    }

    /// Create the region: reserve `options.region_size` bytes from the
    /// backing store and reset the cursor to the range's start. One region
    /// per instance; a second call fails with
    /// [`TierSpaceError::RegionAlreadyExists`].
    pub fn create_region(&self) -> Result<(), TierSpaceError> {
        let extent = self.options.region_size.0;
        self.region.create(self.backing.as_ref(), extent)?;
        info!(
            "region created: [{}, {}), {} pages",
            self.region.start(),
            self.region.stop(),
            conversions::bytes_to_pages_up(extent)
        );
        Ok(())
    }

    /// Copy `bytes` bytes of `object` into the region and return the new
    /// address. The copy itself is delegated to the binding's object model;
    /// this crate never looks inside the bytes. Installing a forwarding
    /// indication at the old location stays with the collector.
    ///
    /// On [`TierSpaceError::OutOfRegionSpace`] nothing is copied and the
    /// cursor is unchanged; there is no retry and no fallback here.
    pub fn promote(
        &self,
        object: ObjectReference,
        bytes: usize,
    ) -> Result<Address, TierSpaceError> {
        let to = match self.region.reserve(bytes) {
            Ok(to) => to,
            Err(e) => {
                self.state.failed_reservations.fetch_add(1, Ordering::Relaxed);
                return Err(e);
            }
        };
        VM::VMObjectModel::copy_to(object, to, bytes);
        self.state.record_promotion(bytes);
        if self.options.verbose_region_ops {
            trace!("promoted {} ({} bytes) to {}", object, bytes, to);
        }
        Ok(to)
    }

    /// [`TierSpace::promote`], with the size taken from the object model.
    pub fn promote_object(&self, object: ObjectReference) -> Result<Address, TierSpaceError> {
        let bytes = VM::VMObjectModel::get_current_size(object);
        self.promote(object, bytes)
    }

    /// Is `addr` inside the region? Lock-free; safe concurrently with
    /// everything, including promotions.
    pub fn is_in_region(&self, addr: Address) -> bool {
        self.region.contains(addr)
    }

    /// Is the object's address (as the binding defines it) inside the
    /// region?
    pub fn is_object_in_region(&self, object: ObjectReference) -> bool {
        self.region.contains(object.to_address::<VM>())
    }

    /// Record `reference` as a trace entry point.
    pub fn push_root(&self, reference: ObjectReference) {
        self.roots.push(reference);
        self.state.roots_pushed.fetch_add(1, Ordering::Relaxed);
    }

    /// Hand the most recently recorded root to the tracer.
    pub fn pop_root(&self) -> Result<ObjectReference, TierSpaceError> {
        let reference = self.roots.pop()?;
        self.state.roots_popped.fetch_add(1, Ordering::Relaxed);
        Ok(reference)
    }

    pub fn region(&self) -> &RegionResource {
        &self.region
    }

    pub fn roots(&self) -> &RootStack {
        &self.roots
    }

    pub fn get_options(&self) -> &Options {
        &self.options
    }

    pub fn get_state(&self) -> &GlobalState {
        &self.state
    }
}

impl<VM: VMBinding> Drop for TierSpace<VM> {
    fn drop(&mut self) {
        if self.region.is_created() {
            debug!(
                "region teardown: {} objects / {} bytes promoted, {} failed reservations, {} roots unconsumed",
                self.state.get_objects_promoted(),
                self.state.get_bytes_promoted(),
                self.state.get_failed_reservations(),
                self.roots.len()
            );
            self.backing.release(self.region.start(), self.region.extent());
        }
    }
}
