// In demos/host_drive.rs
//
// Plays the controller side of the exchange in-process: creates the shared
// segment, binds host functions, then drives every exported entry point once.
// Run with: cargo run --example host_drive

use interop_core::ffi::{
    interop_bind_host_api, interop_delegate_roundabout, interop_pass_object_to_host,
    interop_print_obj_properties, interop_read_object_from_shared_memory,
    interop_write_object_to_shared_memory,
};
use interop_core::Host::api::{ParseRecordFn, PrintHostedObjFn, ProcessRecordFn};
use interop_core::Core::SlotArray::{SlotArray, CONTROL_SEGMENT, CONTROL_SEGMENT_SIZE};
use interop_core::Structs::CustomRecord;

/// Host export printing the record handed over by address.
unsafe extern "C" fn print_hosted_obj_properties(obj: *const CustomRecord) {
    let record = std::ptr::read_unaligned(obj);
    println!(
        "[host] print_hosted_obj_properties: TextProperty=\"{}\"; DoubleProperty={}",
        record.text(),
        record.value
    );
}

/// Host export routing the record through the delegate it was handed.
unsafe extern "C" fn process_custom_object(obj: *mut CustomRecord, callback: ParseRecordFn) {
    if !callback(obj) {
        eprintln!("[host] process_custom_object: delegate reported failure");
    }
}

fn main() -> std::io::Result<()> {
    // The controller creates the segment before loading the guest library.
    let slots = SlotArray::create(CONTROL_SEGMENT, CONTROL_SEGMENT_SIZE)?;
    println!(
        "[host] created segment \"{}\" ({} bytes, {} slots)",
        CONTROL_SEGMENT,
        slots.size(),
        slots.slot_count()
    );

    let rc = interop_bind_host_api(
        Some(print_hosted_obj_properties as PrintHostedObjFn),
        Some(process_custom_object as ProcessRecordFn),
    );
    assert_eq!(rc, 0, "binding the host table failed: {}", rc);

    // Struct decoding: pass a default record by address.
    let example = CustomRecord::default();
    interop_print_obj_properties(&example as *const CustomRecord);

    // Pointer passing and delegate marshaling.
    interop_pass_object_to_host();
    interop_delegate_roundabout();

    // Shared-memory slot IO, plus the short-read path on the partial tail.
    interop_write_object_to_shared_memory(2);
    interop_read_object_from_shared_memory(2);
    interop_read_object_from_shared_memory(31);

    let record = slots.read(2)?;
    println!(
        "[host] slot 2 now holds: TextProperty=\"{}\"; DoubleProperty={}",
        record.text(),
        record.value
    );

    Ok(())
}
