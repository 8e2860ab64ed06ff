// Host-provided function table.
// The controller cannot be linked against at build time, so it hands its
// exports to the guest as function pointers once after loading the library.
// Entry points that call back into the host look the pointers up here.

use crate::Structs::CustomRecord;
use lazy_static::lazy_static;
use parking_lot::RwLock;

/// Delegate shape for functions manipulating a [`CustomRecord`] in place.
/// Returns `true` on successful completion of the task, else `false`.
pub type ParseRecordFn = unsafe extern "C" fn(obj: *mut CustomRecord) -> bool;

/// Host export that prints the properties of the record passed by address.
pub type PrintHostedObjFn = unsafe extern "C" fn(obj: *const CustomRecord);

/// Host export that invokes `callback` on the record passed by address.
pub type ProcessRecordFn = unsafe extern "C" fn(obj: *mut CustomRecord, callback: ParseRecordFn);

/// Function pointers the controller registered after loading the library.
#[derive(Default, Clone, Copy)]
pub struct HostApi {
    print_hosted_obj: Option<PrintHostedObjFn>,
    process_custom_object: Option<ProcessRecordFn>,
}

impl HostApi {
    pub fn print_hosted_obj(&self) -> Option<PrintHostedObjFn> {
        self.print_hosted_obj
    }

    pub fn process_custom_object(&self) -> Option<ProcessRecordFn> {
        self.process_custom_object
    }
}

impl std::fmt::Debug for HostApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::Debug::StructDebug::debug_host_api(self, f)
    }
}

lazy_static! {
    static ref HOST_API: RwLock<HostApi> = RwLock::new(HostApi::default());
}

/// Install the host's exports. Rebinding replaces the previous table.
pub fn bind(print_hosted_obj: PrintHostedObjFn, process_custom_object: ProcessRecordFn) {
    *HOST_API.write() = HostApi {
        print_hosted_obj: Some(print_hosted_obj),
        process_custom_object: Some(process_custom_object),
    };
}

/// Drop the bound table. Subsequent host calls fail until the controller
/// rebinds.
pub fn clear() {
    *HOST_API.write() = HostApi::default();
}

/// Snapshot of the currently bound table.
pub fn current() -> HostApi {
    *HOST_API.read()
}
