use crate::Core::SlotArray::SlotArray;
use crate::Host::api::HostApi;
use crate::Structs::CustomRecordRef;
use std::fmt;

/// Debug function for SlotArray
///
/// Provides a safe debug representation that shows:
/// - Base address of the mapped segment
/// - Segment size and whole-slot count
pub fn debug_slot_array(slots: &SlotArray, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SlotArray")
        .field("base", &format_args!("{:p}", slots.as_ptr()))
        .field("size", &slots.size())
        .field("slot_count", &slots.slot_count())
        .finish()
}

/// Debug function for HostApi
///
/// Shows which host exports are bound without exposing their addresses.
pub fn debug_host_api(api: &HostApi, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("HostApi")
        .field("print_hosted_obj", &api.print_hosted_obj().is_some())
        .field("process_custom_object", &api.process_custom_object().is_some())
        .finish()
}

/// Debug function for CustomRecordRef
///
/// Safely displays the text pointer without dereferencing it.
pub fn debug_custom_record_ref(record: &CustomRecordRef, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CustomRecordRef")
        .field("text", &format_args!("{:p}", record.text))
        .field("value", &record.value)
        .finish()
}
