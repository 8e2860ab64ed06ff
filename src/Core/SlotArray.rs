// Fixed-size record slots over a shared memory segment.
// Slot i occupies the bytes [i * RECORD_SIZE, (i + 1) * RECORD_SIZE).
// The segment carries no occupancy metadata and no synchronization; the
// controller coordinates access between processes.

use crate::Core::SharedMemory::{
    create_shared_memory, open_shared_memory, SharedMemoryBackend,
};
use crate::Structs::CustomRecord;
use std::io;

/// Segment name the controller creates at startup.
pub const CONTROL_SEGMENT: &str = "Controller";

/// Size of the controller's segment in bytes.
pub const CONTROL_SEGMENT_SIZE: usize = 8192;

/// Byte size of one slot.
pub const RECORD_SIZE: usize = std::mem::size_of::<CustomRecord>();

/// View of a shared memory segment as a flat array of [`CustomRecord`] slots.
pub struct SlotArray {
    shm: Box<dyn SharedMemoryBackend>,
}

impl SlotArray {
    /// Attach to an existing named segment.
    pub fn open(name: &str) -> io::Result<Self> {
        Ok(Self {
            shm: open_shared_memory(name)?,
        })
    }

    /// Create (or truncate) a named segment of `size` bytes.
    pub fn create(name: &str, size: usize) -> io::Result<Self> {
        Ok(Self {
            shm: create_shared_memory(name, size)?,
        })
    }

    /// Number of whole slots that fit in the segment. A partial tail slot
    /// does not count; reads of it fail the short-read check instead.
    pub fn slot_count(&self) -> usize {
        self.shm.size() / RECORD_SIZE
    }

    /// Total size of the underlying segment in bytes.
    pub fn size(&self) -> usize {
        self.shm.size()
    }

    pub(crate) fn as_ptr(&self) -> *mut u8 {
        self.shm.as_ptr()
    }

    fn slot_offset(&self, index: usize) -> io::Result<usize> {
        let offset = index.checked_mul(RECORD_SIZE).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Slot index {} overflows the segment offset", index),
            )
        })?;

        let available = self.shm.size().saturating_sub(offset);
        if available < RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("read {} bytes out of {} expected", available, RECORD_SIZE),
            ));
        }

        Ok(offset)
    }

    /// Read the record at `index`. Fails with `UnexpectedEof` when fewer than
    /// `RECORD_SIZE` bytes remain past the slot offset, so a torn tail slot is
    /// never decoded into a partially-initialized record.
    pub fn read(&self, index: usize) -> io::Result<CustomRecord> {
        let offset = self.slot_offset(index)?;
        // Shared mapping, another process may be writing: take a const view
        // only, never a unique reference.
        let bytes =
            unsafe { std::slice::from_raw_parts(self.shm.as_ptr().add(offset), RECORD_SIZE) };
        CustomRecord::read_from(bytes)
    }

    /// Write `record` into the slot at `index`, with the same availability
    /// check as [`read`](Self::read).
    pub fn write(&self, index: usize, record: &CustomRecord) -> io::Result<()> {
        let offset = self.slot_offset(index)?;
        let bytes =
            unsafe { std::slice::from_raw_parts_mut(self.shm.as_ptr().add(offset), RECORD_SIZE) };
        record.write_to(bytes)
    }
}

impl std::fmt::Debug for SlotArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::Debug::StructDebug::debug_slot_array(self, f)
    }
}
