// Shared memory backend tests for Unix hosts
// Run with: cargo test --test shared_memory -- --nocapture

#[cfg(unix)]
mod unix_tests {
    use interop_core::Core::{create_shared_memory, open_shared_memory};

    #[test]
    fn test_create_shared_memory() {
        let size = 4096;
        let shm = create_shared_memory("interop_test_create", size).unwrap();

        assert_eq!(shm.size(), size);
        assert!(!shm.as_ptr().is_null());

        // Test writing to the memory
        unsafe {
            let slice = std::slice::from_raw_parts_mut(shm.as_ptr(), size);
            slice[0] = 0x42;
            assert_eq!(slice[0], 0x42);
        }
    }

    #[test]
    fn test_shared_memory_size() {
        let sizes = vec![1024, 4096, 8192, 65536];

        for size in sizes {
            let shm = create_shared_memory("interop_test_sizes", size).unwrap();
            assert_eq!(shm.size(), size);
        }
    }

    #[test]
    fn test_shared_memory_read_write() {
        let size = 8192;
        let shm = create_shared_memory("interop_test_rw", size).unwrap();

        unsafe {
            let slice = std::slice::from_raw_parts_mut(shm.as_ptr(), size);

            // Write test pattern
            for i in 0..100 {
                slice[i] = (i % 256) as u8;
            }

            // Read back
            for i in 0..100 {
                assert_eq!(slice[i], (i % 256) as u8);
            }
        }
    }

    #[test]
    fn test_raw_handle() {
        let shm = create_shared_memory("interop_test_handle", 4096).unwrap();
        let handle = shm.raw_handle();

        match handle {
            interop_core::Core::RawHandle::Fd(fd) => {
                assert!(fd > 0, "File descriptor should be positive");
            }
        }
    }

    #[test]
    fn test_open_missing_segment() {
        let result = open_shared_memory("interop_test_never_created");
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    #[serial_test::serial]
    fn test_open_sees_creator_writes() {
        // Two mappings of the same named segment observe each other's bytes,
        // the way the controller and the guest do across processes.
        let size = 4096;
        let creator = create_shared_memory("interop_test_shared_view", size).unwrap();
        let opener = open_shared_memory("interop_test_shared_view").unwrap();

        assert_eq!(opener.size(), size);

        unsafe {
            let w = std::slice::from_raw_parts_mut(creator.as_ptr(), size);
            w[0] = 0xFF;
            w[1000] = 0xAA;

            let r = std::slice::from_raw_parts(opener.as_ptr(), size);
            assert_eq!(r[0], 0xFF);
            assert_eq!(r[1000], 0xAA);
        }
    }

    #[test]
    fn test_mmap_zero_initialized() {
        // create truncates the backing file, so a fresh segment reads as zeros
        let size = 1024;
        let shm = create_shared_memory("interop_test_zero", size).unwrap();

        unsafe {
            let slice = std::slice::from_raw_parts(shm.as_ptr(), size);
            for i in 0..size {
                assert_eq!(slice[i], 0, "Fresh segment should be zero-initialized");
            }
        }
    }
}

#[cfg(not(unix))]
mod non_unix_tests {
    use interop_core::Core::{create_shared_memory, open_shared_memory};

    #[test]
    fn test_unsupported_platform() {
        assert_eq!(
            create_shared_memory("interop_test", 4096).unwrap_err().kind(),
            std::io::ErrorKind::Unsupported
        );
        assert_eq!(
            open_shared_memory("interop_test").unwrap_err().kind(),
            std::io::ErrorKind::Unsupported
        );
    }
}
