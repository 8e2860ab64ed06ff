// Shared memory backend abstraction for Unix hosts.
// The controller process creates a plain file under /tmp and maps it; the
// guest maps the same file. Matches the host's naming scheme, where the
// segment "Controller" lives at /tmp/Controller.

use std::fmt::Debug;
use std::io;

#[cfg(unix)]
use std::fs::OpenOptions;
#[cfg(unix)]
use std::os::fd::{AsRawFd, IntoRawFd};
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;
#[cfg(unix)]
use std::ptr::NonNull;

/// Shared memory backend trait for cross-platform memory mapping
pub trait SharedMemoryBackend: Send + Sync + Debug {
    /// Get a pointer to the mapped memory region
    fn as_ptr(&self) -> *mut u8;

    /// Get the size of the mapped region in bytes
    fn size(&self) -> usize;

    /// Get the underlying file descriptor
    fn raw_handle(&self) -> RawHandle;
}

/// Platform-specific handle type
#[derive(Debug, Clone, Copy)]
pub enum RawHandle {
    /// Unix file descriptor
    Fd(i32),
}

/// Filesystem path backing the named segment.
pub fn segment_path(name: &str) -> String {
    format!("/tmp/{}", name)
}

/// Create (or truncate) a named shared memory segment of `size` bytes.
///
/// # Arguments
/// * `name` - Name of the segment; backed by `/tmp/<name>`
/// * `size` - Size of the region in bytes
#[cfg(unix)]
pub fn create_shared_memory(name: &str, size: usize) -> io::Result<Box<dyn SharedMemoryBackend>> {
    Ok(Box::new(UnixSharedMemory::create(name, size)?))
}

/// Attach to an existing named segment, mapping the whole backing file.
///
/// # Arguments
/// * `name` - Name of the segment to attach to
///
/// # Returns
/// `NotFound` if the controller has not created the segment yet.
#[cfg(unix)]
pub fn open_shared_memory(name: &str) -> io::Result<Box<dyn SharedMemoryBackend>> {
    Ok(Box::new(UnixSharedMemory::open(name)?))
}

#[cfg(not(unix))]
pub fn create_shared_memory(_name: &str, _size: usize) -> io::Result<Box<dyn SharedMemoryBackend>> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "Shared memory only supported on Unix hosts",
    ))
}

#[cfg(not(unix))]
pub fn open_shared_memory(_name: &str) -> io::Result<Box<dyn SharedMemoryBackend>> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "Shared memory only supported on Unix hosts",
    ))
}

#[cfg(unix)]
#[derive(Debug)]
pub struct UnixSharedMemory {
    ptr: NonNull<u8>,
    size: usize,
    fd: i32,
}

#[cfg(unix)]
unsafe impl Send for UnixSharedMemory {}
#[cfg(unix)]
unsafe impl Sync for UnixSharedMemory {}

#[cfg(unix)]
impl UnixSharedMemory {
    /// Create or truncate the backing file and map it.
    pub fn create(name: &str, size: usize) -> io::Result<Self> {
        let path = segment_path(name);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(&path)
            .map_err(|e| {
                io::Error::new(
                    io::ErrorKind::Other,
                    format!("Failed to create shared memory file at {}: {}", path, e),
                )
            })?;

        if unsafe { libc::ftruncate(file.as_raw_fd(), size as libc::off_t) } != 0 {
            return Err(io::Error::last_os_error());
        }

        // Keep the file descriptor alive past the File
        let fd = file.into_raw_fd();

        let ptr = unsafe { Self::map(fd, size) }?;

        Ok(Self {
            ptr: NonNull::new(ptr)
                .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "mmap returned null"))?,
            size,
            fd,
        })
    }

    /// Map an existing segment at whatever size the controller gave it.
    pub fn open(name: &str) -> io::Result<Self> {
        let path = segment_path(name);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Failed to open shared memory at {}: {}", path, e),
                )
            })?;

        let size = file.metadata()?.len() as usize;
        if size == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Shared memory at {} is empty", path),
            ));
        }

        let fd = file.into_raw_fd();
        let ptr = unsafe { Self::map(fd, size) }?;

        Ok(Self {
            ptr: NonNull::new(ptr)
                .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "mmap returned null"))?,
            size,
            fd,
        })
    }

    unsafe fn map(fd: i32, size: usize) -> io::Result<*mut u8> {
        let ptr = libc::mmap(
            std::ptr::null_mut(),
            size,
            libc::PROT_READ | libc::PROT_WRITE,
            libc::MAP_SHARED,
            fd,
            0,
        );

        if ptr == libc::MAP_FAILED {
            let err = io::Error::last_os_error();
            libc::close(fd);
            return Err(err);
        }

        Ok(ptr as *mut u8)
    }
}

#[cfg(unix)]
impl Drop for UnixSharedMemory {
    fn drop(&mut self) {
        unsafe {
            libc::munmap(self.ptr.as_ptr() as *mut libc::c_void, self.size);
            libc::close(self.fd);
        }
    }
}

#[cfg(unix)]
impl SharedMemoryBackend for UnixSharedMemory {
    fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    fn size(&self) -> usize {
        self.size
    }

    fn raw_handle(&self) -> RawHandle {
        RawHandle::Fd(self.fd)
    }
}
