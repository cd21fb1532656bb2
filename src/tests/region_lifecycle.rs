//! Instance and region lifecycle, driven through the `memory_manager` API.

use crate::error::TierSpaceError;
use crate::memory_manager;
use crate::util::options::RegionSize;
use crate::util::test_util::fixtures::RegionFixture;
use crate::util::test_util::fixtures::TierSpaceFixture;
use crate::util::test_util::mock_vm::MockVM;
use crate::util::Address;
use crate::{TierSpace, TierSpaceBuilder};

#[test]
fn a_fresh_instance_has_no_region() {
    let space: TierSpace<MockVM> = TierSpaceBuilder::new().build();
    assert!(!space.region().is_created());
    assert_eq!(memory_manager::region_start(&space), Address::ZERO);
    assert_eq!(memory_manager::region_cursor(&space), Address::ZERO);
    assert_eq!(memory_manager::free_bytes(&space), 0);
}

#[test]
fn create_region_publishes_bounds_and_cursor() {
    let fixture = RegionFixture::over(0x4000, 0x2000);
    assert_eq!(memory_manager::region_start(&fixture.space), fixture.start);
    assert_eq!(memory_manager::region_cursor(&fixture.space), fixture.start);
    assert_eq!(memory_manager::free_bytes(&fixture.space), 0x2000);
}

#[test]
fn recreation_is_rejected_and_harmless() {
    let fixture = RegionFixture::over(0x4000, 0x1000);
    fixture.space.region().reserve(0x80).unwrap();
    assert_eq!(
        memory_manager::create_region(&fixture.space),
        Err(TierSpaceError::RegionAlreadyExists)
    );
    // The live region keeps its bounds and its progress.
    assert_eq!(memory_manager::region_start(&fixture.space), fixture.start);
    assert_eq!(
        memory_manager::region_cursor(&fixture.space),
        fixture.start + 0x80usize
    );
}

#[test]
fn each_creation_starts_with_a_fresh_cursor() {
    // Exhaust one instance completely; another instance's region over the
    // same range starts with its cursor back at the start address.
    let first = RegionFixture::over(0x1000, 0x1000);
    first.space.region().reserve(0x1000).unwrap();
    assert_eq!(memory_manager::free_bytes(&first.space), 0);

    let second = RegionFixture::over(0x1000, 0x1000);
    assert_eq!(memory_manager::region_cursor(&second.space), second.start);
    assert_eq!(memory_manager::free_bytes(&second.space), 0x1000);
}

#[test]
fn instances_are_independent() {
    let a = RegionFixture::over(0x10_0000, 0x1000);
    let b = RegionFixture::over(0x20_0000, 0x1000);
    a.space.region().reserve(0x100).unwrap();
    assert_eq!(memory_manager::region_cursor(&b.space), b.start);
    assert!(memory_manager::is_in_region(&a.space, a.start));
    assert!(!memory_manager::is_in_region(&b.space, a.start));
    assert!(!memory_manager::is_in_region(&a.space, b.start));
}

#[test]
fn a_created_region_is_writable() {
    let fixture = TierSpaceFixture::create_with_builder(|builder| {
        builder.options.region_size = RegionSize(1 << 16);
    });
    let start = memory_manager::region_start(fixture.space);
    assert_eq!(memory_manager::free_bytes(fixture.space), 1 << 16);
    unsafe {
        start.store(0x5EED_F00Dusize);
        assert_eq!(start.load::<usize>(), 0x5EED_F00D);
    }
}

#[test]
fn options_flow_through_the_builder() {
    let mut builder = TierSpaceBuilder::new();
    assert!(memory_manager::process_bulk(
        &mut builder,
        "regionSize=64k verboseRegionOps=true"
    ));
    assert_eq!(builder.options.region_size, RegionSize(64 << 10));
    assert!(builder.options.verbose_region_ops);
    assert!(!memory_manager::process(&mut builder, "noSuchOption", "1"));
    assert!(!memory_manager::process_bulk(&mut builder, "regionSize"));
}
