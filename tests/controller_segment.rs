// Exercises the shared-memory entry points against the controller's real
// segment name, so they share /tmp/Controller and must run serially.
// Run with: cargo test --test controller_segment -- --nocapture

#![cfg(unix)]

use interop_core::ffi::{
    interop_read_object_from_shared_memory, interop_write_object_to_shared_memory,
};
use interop_core::Core::SlotArray::{SlotArray, CONTROL_SEGMENT, CONTROL_SEGMENT_SIZE};
use interop_core::Structs::CustomRecord;

#[test]
#[serial_test::serial]
fn test_write_then_read_slot() {
    // Play the controller: create the segment before the guest touches it.
    let slots = SlotArray::create(CONTROL_SEGMENT, CONTROL_SEGMENT_SIZE).unwrap();

    assert_eq!(interop_write_object_to_shared_memory(2), 0);
    assert_eq!(interop_read_object_from_shared_memory(2), 0);

    // The bytes the entry point wrote are visible to the controller's view.
    let record = slots.read(2).unwrap();
    assert_eq!(record.text(), "Quare Id Faciam");
    assert_eq!(record.value, 75.46943);
}

#[test]
#[serial_test::serial]
fn test_controller_written_slot_is_readable() {
    let slots = SlotArray::create(CONTROL_SEGMENT, CONTROL_SEGMENT_SIZE).unwrap();
    slots.write(5, &CustomRecord::new("from the controller", 42.0)).unwrap();

    assert_eq!(interop_read_object_from_shared_memory(5), 0);
}

#[test]
#[serial_test::serial]
fn test_partial_tail_slot_is_a_short_read() {
    let _slots = SlotArray::create(CONTROL_SEGMENT, CONTROL_SEGMENT_SIZE).unwrap();

    // Slot 31 has only 8 of 264 bytes; -6: short read
    assert_eq!(interop_read_object_from_shared_memory(31), -6);
    assert_eq!(interop_write_object_to_shared_memory(31), -6);
}

#[test]
#[serial_test::serial]
fn test_negative_index_is_invalid() {
    let _slots = SlotArray::create(CONTROL_SEGMENT, CONTROL_SEGMENT_SIZE).unwrap();

    // -2: invalid argument
    assert_eq!(interop_read_object_from_shared_memory(-1), -2);
    assert_eq!(interop_write_object_to_shared_memory(-1), -2);
}

#[test]
#[serial_test::serial]
fn test_missing_segment_is_reported() {
    let path = interop_core::Core::SharedMemory::segment_path(CONTROL_SEGMENT);
    let _ = std::fs::remove_file(&path);

    // -5: segment missing or unusable
    assert_eq!(interop_read_object_from_shared_memory(0), -5);
    assert_eq!(interop_write_object_to_shared_memory(0), -5);
}
