//! Configuration constants for pagestore.

/// Size of a page in bytes (4KB).
///
/// Matches the OS page size on most systems, so whole-page reads and writes
/// line up with the kernel's own I/O granularity.
///
/// With 4KB pages and 32-bit page numbers:
/// - Max pages: 2^32 = 4,294,967,296
/// - Max file size: 4,294,967,296 × 4KB = 16TB
pub const PAGE_SIZE: usize = 4096;

/// Maximum number of pages addressable with a u32 page number.
pub const MAX_PAGES: u64 = (u32::MAX as u64) + 1;

/// Maximum theoretical page file size in bytes.
pub const MAX_FILE_SIZE_BYTES: u64 = MAX_PAGES * PAGE_SIZE as u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_is_power_of_two() {
        assert!(PAGE_SIZE.is_power_of_two());
        assert_eq!(PAGE_SIZE, 4096);
    }

    #[test]
    fn test_max_file_size() {
        // 16TB = 16 * 1024^4 bytes
        let expected = 16 * 1024u64 * 1024 * 1024 * 1024;
        assert_eq!(MAX_FILE_SIZE_BYTES, expected);
    }
}
