// Fixed-layout records exchanged with the native host.

use std::io;
use std::os::raw::c_char;

// no heap-backed fields in CustomRecord; keep as plain bytes + f64 for ABI

/// Capacity of the inline text buffer, NUL terminator included.
pub const TEXT_CAPACITY: usize = 256;

/// Sample record crossing the host/guest boundary by address.
/// ABI-stable: `text` is a NUL-terminated single-byte string at offset 0,
/// `value` an IEEE-754 double at offset 256. Size 264, align 8.
#[repr(C)]
#[derive(Copy, Clone)]
pub struct CustomRecord {
    pub text: [u8; TEXT_CAPACITY],
    pub value: f64,
}

/// Reference-flavored variant of [`CustomRecord`] with a pointer-sized text
/// field. It does NOT share `CustomRecord`'s byte layout (8 + 8 bytes vs
/// 256 + 8) and must never be passed where the host expects the inline
/// variant. Kept so layout tests can flag the mismatch.
#[repr(C)]
#[derive(Copy, Clone)]
pub struct CustomRecordRef {
    pub text: *const c_char,
    pub value: f64,
}

impl std::fmt::Debug for CustomRecordRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::Debug::StructDebug::debug_custom_record_ref(self, f)
    }
}

impl Default for CustomRecord {
    fn default() -> Self {
        // Defaults the host ships in its header.
        Self::new("Lorem Ipsum", 6.5333)
    }
}

impl CustomRecord {
    pub fn new(text: &str, value: f64) -> Self {
        let mut record = Self {
            text: [0u8; TEXT_CAPACITY],
            value,
        };
        record.set_text(text);
        record
    }

    /// Copy `text` into the inline buffer, truncating to `TEXT_CAPACITY - 1`
    /// bytes. The buffer is always NUL terminated.
    pub fn set_text(&mut self, text: &str) {
        let bytes = text.as_bytes();
        let len = bytes.len().min(TEXT_CAPACITY - 1);
        self.text[..len].copy_from_slice(&bytes[..len]);
        for b in &mut self.text[len..] {
            *b = 0;
        }
    }

    /// Text up to the first NUL, lossily decoded.
    pub fn text(&self) -> String {
        let end = self
            .text
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(TEXT_CAPACITY);
        String::from_utf8_lossy(&self.text[..end]).into_owned()
    }

    /// Decode a record from `bytes`. Fails with `UnexpectedEof` when fewer
    /// bytes are available than the record occupies, rather than returning a
    /// partially-initialized record.
    pub fn read_from(bytes: &[u8]) -> io::Result<Self> {
        let size = std::mem::size_of::<Self>();
        if bytes.len() < size {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("read {} bytes out of {} expected", bytes.len(), size),
            ));
        }
        // Unaligned read: the source buffer carries no alignment guarantee.
        Ok(unsafe { std::ptr::read_unaligned(bytes.as_ptr() as *const Self) })
    }

    /// Encode this record into `bytes` at its fixed layout.
    pub fn write_to(&self, bytes: &mut [u8]) -> io::Result<()> {
        let size = std::mem::size_of::<Self>();
        if bytes.len() < size {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("buffer holds {} bytes, {} needed", bytes.len(), size),
            ));
        }
        unsafe { std::ptr::write_unaligned(bytes.as_mut_ptr() as *mut Self, *self) };
        Ok(())
    }
}

impl std::fmt::Debug for CustomRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomRecord")
            .field("text", &self.text())
            .field("value", &self.value)
            .finish()
    }
}
