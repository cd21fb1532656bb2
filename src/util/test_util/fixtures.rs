// Not every test uses every fixture or helper. We simply allow dead code in
// this module.
#![allow(dead_code)]

use atomic_refcell::AtomicRefCell;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::Once;

use crate::backing::ExternalRange;
use crate::memory_manager;
use crate::util::options::RegionSize;
use crate::util::test_util::mock_vm::MockVM;
use crate::util::Address;
use crate::TierSpace;
use crate::TierSpaceBuilder;

pub trait FixtureContent {
    fn create() -> Self;
}

/// Lazily creates its content on first use and shares it between all tests
/// of a module. Tests that only read, or that only go through the content's
/// own synchronization, can run in parallel.
pub struct Fixture<T: FixtureContent> {
    content: AtomicRefCell<Option<Box<T>>>,
    once: Once,
}

unsafe impl<T: FixtureContent> Sync for Fixture<T> {}

impl<T: FixtureContent> Fixture<T> {
    pub fn new() -> Self {
        Self {
            content: AtomicRefCell::new(None),
            once: Once::new(),
        }
    }

    pub fn with_fixture<F: Fn(&T)>(&self, func: F) {
        self.once.call_once(|| {
            let content = Box::new(T::create());
            let mut borrow = self.content.borrow_mut();
            *borrow = Some(content);
        });
        let borrow = self.content.borrow();
        func(borrow.as_ref().unwrap())
    }
}

impl<T: FixtureContent> Default for Fixture<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// SerialFixture ensures all `with_fixture()` calls will be executed
/// serially. Use it when tests observe state their siblings mutate, such as
/// the region cursor.
pub struct SerialFixture<T: FixtureContent> {
    content: Mutex<Option<Box<T>>>,
}

impl<T: FixtureContent> SerialFixture<T> {
    pub fn new() -> Self {
        Self {
            content: Mutex::new(None),
        }
    }

    pub fn with_fixture<F: Fn(&T)>(&self, func: F) {
        let mut c = self.content.lock().unwrap();
        if c.is_none() {
            *c = Some(Box::new(T::create()));
        }
        func(c.as_ref().unwrap())
    }
}

impl<T: FixtureContent> Default for SerialFixture<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A ready-to-promote instance: anonymous backing, a 1 MiB region already
/// created. The instance is leaked to `'static` for the lifetime of the
/// fixture, matching how bindings hold their instance.
pub struct TierSpaceFixture {
    pub space: &'static TierSpace<MockVM>,
}

impl FixtureContent for TierSpaceFixture {
    fn create() -> Self {
        Self::create_with_builder(|builder| {
            builder.options.region_size = RegionSize(1 << 20);
        })
    }
}

impl TierSpaceFixture {
    pub fn create_with_builder<F>(with_builder: F) -> Self
    where
        F: FnOnce(&mut TierSpaceBuilder),
    {
        let mut builder = TierSpaceBuilder::new();
        with_builder(&mut builder);

        let space = memory_manager::tierspace_init(&builder);
        let space_ptr = Box::into_raw(space);
        let space_static: &'static TierSpace<MockVM> = unsafe { &*space_ptr };

        memory_manager::create_region(space_static).unwrap();

        TierSpaceFixture {
            space: space_static,
        }
    }
}

impl Drop for TierSpaceFixture {
    fn drop(&mut self) {
        let space_ptr: *const TierSpace<MockVM> = self.space as _;
        let _ = unsafe { Box::from_raw(space_ptr as *mut TierSpace<MockVM>) };
    }
}

/// An instance whose region sits at exact, caller-chosen bounds, donated as
/// an external range. Nothing may write through these addresses: the fixture
/// is for reserve and membership arithmetic, never for promotion copies.
pub struct RegionFixture {
    pub space: TierSpace<MockVM>,
    pub start: Address,
    pub stop: Address,
}

impl RegionFixture {
    pub fn over(start: usize, extent: usize) -> Self {
        let start = unsafe { Address::from_usize(start) };
        let mut builder = TierSpaceBuilder::new();
        builder.options.region_size = RegionSize(extent);
        builder.set_backing(Arc::new(ExternalRange::new(start, extent)));
        let space: TierSpace<MockVM> = builder.build();
        space.create_region().unwrap();
        RegionFixture {
            space,
            start,
            stop: start + extent,
        }
    }
}
