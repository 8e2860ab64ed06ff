// Module naming follows project convention (host-facing interop modules)
#[allow(non_snake_case)]
pub mod Core {
    pub mod SharedMemory;
    pub mod SlotArray;
    pub use SharedMemory::{create_shared_memory, open_shared_memory, RawHandle, SharedMemoryBackend};
    pub use SlotArray::{CONTROL_SEGMENT, CONTROL_SEGMENT_SIZE, RECORD_SIZE}; // re-export for stable path; the struct stays at SlotArray::SlotArray
}
#[allow(non_snake_case)]
pub mod Structs {
    pub mod Record_Structs;
    pub use Record_Structs::{CustomRecord, CustomRecordRef, TEXT_CAPACITY}; // re-export for stable path
}
#[allow(non_snake_case)]
pub mod Host {
    pub mod api;
}
#[allow(non_snake_case)]
pub mod Debug {
    pub mod StructDebug;
}

pub mod ffi;
