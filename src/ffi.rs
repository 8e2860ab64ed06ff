// Exported entry points the controller invokes after loading the library.
// Each one is a standalone marshaling example: struct decoding, pointer
// passing, delegate roundtrips, and shared-memory slot IO.

use crate::Core::SlotArray::{SlotArray, CONTROL_SEGMENT, RECORD_SIZE};
use crate::Host::api;
use crate::Host::api::{ParseRecordFn, PrintHostedObjFn, ProcessRecordFn};
use crate::Structs::CustomRecord;
use std::ptr;

// Error codes
const INTEROP_SUCCESS: i32 = 0;
const INTEROP_ERROR_NULL_POINTER: i32 = -1;
const INTEROP_ERROR_INVALID_ARG: i32 = -2;
const INTEROP_ERROR_ALLOCATION_FAILED: i32 = -3;
const INTEROP_ERROR_HOST_NOT_BOUND: i32 = -4;
const INTEROP_ERROR_SEGMENT: i32 = -5;
const INTEROP_ERROR_SHORT_READ: i32 = -6;

/// Raw buffer holding one record for the duration of a single host call.
/// The analog of the managed side's CoTaskMem scratch allocation.
struct RecordBuffer {
    ptr: *mut CustomRecord,
}

impl RecordBuffer {
    fn new(record: &CustomRecord) -> Option<Self> {
        let ptr = unsafe { libc::malloc(RECORD_SIZE) as *mut CustomRecord };
        if ptr.is_null() {
            return None;
        }
        unsafe { ptr::write_unaligned(ptr, *record) };
        Some(Self { ptr })
    }
}

impl Drop for RecordBuffer {
    fn drop(&mut self) {
        unsafe { libc::free(self.ptr as *mut libc::c_void) };
    }
}

// -----------------------------------------------------------------------------
// Delegates passed back to the host
// -----------------------------------------------------------------------------

/// Prints the properties of the record provided.
extern "C" fn print_record_properties(obj: *mut CustomRecord) -> bool {
    if obj.is_null() {
        return false;
    }

    let decoded = unsafe { ptr::read_unaligned(obj as *const CustomRecord) };
    println!(
        "[guest] print_record_properties: TextProp=\"{}\"; DoubleProp={}",
        decoded.text(),
        decoded.value
    );

    true
}

/// Edits the properties of the record provided and prints them.
/// The edits land on the decoded copy only; the pointed-to bytes are left
/// untouched, as on the managed side of the original exchange.
extern "C" fn edit_record_properties(obj: *mut CustomRecord) -> bool {
    if obj.is_null() {
        return false;
    }

    let mut decoded = unsafe { ptr::read_unaligned(obj as *const CustomRecord) };
    decoded.set_text("Dolor sit amet");
    decoded.value = 3.145628;

    println!(
        "[guest] edit_record_properties: TextProp=\"{}\"; DoubleProp={}",
        decoded.text(),
        decoded.value
    );

    true
}

// -----------------------------------------------------------------------------
// Host binding
// -----------------------------------------------------------------------------

/// Register the host's exports with the guest.
///
/// # Arguments
/// * `print_hosted_obj` - Host function printing a record passed by address.
/// * `process_custom_object` - Host function invoking a delegate on a record.
///
/// # Returns
/// * 0 on success, negative error code otherwise.
#[no_mangle]
pub extern "C" fn interop_bind_host_api(
    print_hosted_obj: Option<PrintHostedObjFn>,
    process_custom_object: Option<ProcessRecordFn>,
) -> i32 {
    match (print_hosted_obj, process_custom_object) {
        (Some(print_fn), Some(process_fn)) => {
            api::bind(print_fn, process_fn);
            INTEROP_SUCCESS
        }
        _ => INTEROP_ERROR_NULL_POINTER,
    }
}

// -----------------------------------------------------------------------------
// Entry points
// -----------------------------------------------------------------------------

/// Print the properties of the record the host passes by address.
///
/// # Arguments
/// * `obj` - Pointer to a `CustomRecord`.
///
/// # Returns
/// * 0 on success, negative error code otherwise.
#[no_mangle]
pub extern "C" fn interop_print_obj_properties(obj: *const CustomRecord) -> i32 {
    if obj.is_null() {
        return INTEROP_ERROR_NULL_POINTER;
    }

    let decoded = unsafe { ptr::read_unaligned(obj) };
    println!(
        "[guest] interop_print_obj_properties: TextProp=\"{}\"; DoubleProp={}",
        decoded.text(),
        decoded.value
    );

    INTEROP_SUCCESS
}

/// Build a record, copy it into a raw buffer, and hand its address to the
/// host's print function. The buffer lives for exactly this call.
#[no_mangle]
pub extern "C" fn interop_pass_object_to_host() -> i32 {
    let print_fn = match api::current().print_hosted_obj() {
        Some(f) => f,
        None => {
            eprintln!("FFI Error: PrintHostedObjProperties not bound, call interop_bind_host_api first");
            return INTEROP_ERROR_HOST_NOT_BOUND;
        }
    };

    let record = CustomRecord::new("Dolor Sit", 324.7677);
    let buffer = match RecordBuffer::new(&record) {
        Some(b) => b,
        None => {
            eprintln!("FFI Error: Failed to allocate record buffer");
            return INTEROP_ERROR_ALLOCATION_FAILED;
        }
    };

    unsafe { print_fn(buffer.ptr) };

    INTEROP_SUCCESS
}

/// Build a record and route it through the host's process function twice,
/// once with the printing delegate and once with the editing delegate.
#[no_mangle]
pub extern "C" fn interop_delegate_roundabout() -> i32 {
    let process_fn = match api::current().process_custom_object() {
        Some(f) => f,
        None => {
            eprintln!("FFI Error: ProcessCustomObject not bound, call interop_bind_host_api first");
            return INTEROP_ERROR_HOST_NOT_BOUND;
        }
    };

    let record = CustomRecord::new("Amet", 1123.567);
    let buffer = match RecordBuffer::new(&record) {
        Some(b) => b,
        None => {
            eprintln!("FFI Error: Failed to allocate record buffer");
            return INTEROP_ERROR_ALLOCATION_FAILED;
        }
    };

    unsafe {
        process_fn(buffer.ptr, print_record_properties as ParseRecordFn);
        process_fn(buffer.ptr, edit_record_properties as ParseRecordFn);
    }

    INTEROP_SUCCESS
}

/// Read a record from the controller's segment, treated as a record array,
/// at the slot index given.
///
/// # Returns
/// * 0 on success.
/// * `INTEROP_ERROR_SHORT_READ` if fewer bytes remain than one record needs.
/// * `INTEROP_ERROR_SEGMENT` if the controller's segment is missing.
#[no_mangle]
pub extern "C" fn interop_read_object_from_shared_memory(index: i32) -> i32 {
    let index = match usize::try_from(index) {
        Ok(i) => i,
        Err(_) => return INTEROP_ERROR_INVALID_ARG,
    };

    let slots = match SlotArray::open(CONTROL_SEGMENT) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("FFI Error: Failed to open segment \"{}\": {}", CONTROL_SEGMENT, e);
            return INTEROP_ERROR_SEGMENT;
        }
    };

    match slots.read(index) {
        Ok(decoded) => {
            println!(
                "[guest] interop_read_object_from_shared_memory: TextProp=\"{}\"; DoubleProp={}",
                decoded.text(),
                decoded.value
            );
            INTEROP_SUCCESS
        }
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            println!(
                "[guest] interop_read_object_from_shared_memory failed, {} (slot {})",
                e, index
            );
            INTEROP_ERROR_SHORT_READ
        }
        Err(e) => {
            eprintln!("FFI Error: Failed to read slot {}: {}", index, e);
            INTEROP_ERROR_SEGMENT
        }
    }
}

/// Write a record into the controller's segment at the slot index given.
#[no_mangle]
pub extern "C" fn interop_write_object_to_shared_memory(index: i32) -> i32 {
    let index = match usize::try_from(index) {
        Ok(i) => i,
        Err(_) => return INTEROP_ERROR_INVALID_ARG,
    };

    let slots = match SlotArray::open(CONTROL_SEGMENT) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("FFI Error: Failed to open segment \"{}\": {}", CONTROL_SEGMENT, e);
            return INTEROP_ERROR_SEGMENT;
        }
    };

    let record = CustomRecord::new("Quare Id Faciam", 75.46943);
    match slots.write(index, &record) {
        Ok(()) => INTEROP_SUCCESS,
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            println!(
                "[guest] interop_write_object_to_shared_memory failed, {} (slot {})",
                e, index
            );
            INTEROP_ERROR_SHORT_READ
        }
        Err(e) => {
            eprintln!("FFI Error: Failed to write slot {}: {}", index, e);
            INTEROP_ERROR_SEGMENT
        }
    }
}
