//! Word-granular frame memory

use crate::word::WORD_SIZE;
use primitive_types::U256;

/// Byte-addressable frame memory
///
/// Grows in 32-byte words, never shrinks within a frame's lifetime, and
/// zero-initializes every newly allocated byte. Size queries are separated
/// from growth so callers can price an access before mutating anything.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Create new empty memory
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Current memory size in bytes (always a multiple of 32)
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Word-aligned size the memory would have after touching
    /// `[offset, offset + len)`
    ///
    /// Pure: does not grow. Returns the current size when `len == 0` or the
    /// range already fits. The end offset saturates rather than wrapping.
    pub fn size_after(&self, offset: usize, len: usize) -> usize {
        if len == 0 {
            return self.data.len();
        }
        let end = offset.saturating_add(len);
        if end <= self.data.len() {
            self.data.len()
        } else {
            end.div_ceil(WORD_SIZE).saturating_mul(WORD_SIZE)
        }
    }

    /// Grow to at least `size` bytes, zero-filling; never shrinks
    pub fn grow(&mut self, size: usize) {
        if size > self.data.len() {
            self.data.resize(size, 0);
        }
    }

    /// Load a 32-byte word, reading zero for bytes past the current size
    pub fn load_word(&self, offset: usize) -> U256 {
        let mut buf = [0u8; WORD_SIZE];
        let end = offset.saturating_add(WORD_SIZE).min(self.data.len());
        if offset < end {
            buf[..end - offset].copy_from_slice(&self.data[offset..end]);
        }
        U256::from_big_endian(&buf)
    }

    /// Store a 32-byte word, growing to cover it
    pub fn store_word(&mut self, offset: usize, value: &U256) {
        let size = self.size_after(offset, WORD_SIZE);
        self.grow(size);
        let mut buf = [0u8; WORD_SIZE];
        value.to_big_endian(&mut buf);
        self.data[offset..offset + WORD_SIZE].copy_from_slice(&buf);
    }

    /// Read `len` bytes starting at `offset`, zero-filled past the current size
    pub fn read(&self, offset: usize, len: usize) -> Vec<u8> {
        if len == 0 {
            return Vec::new();
        }
        let mut result = vec![0u8; len];
        let end = offset.saturating_add(len).min(self.data.len());
        if offset < end {
            result[..end - offset].copy_from_slice(&self.data[offset..end]);
        }
        result
    }

    /// Write `len` bytes at `offset`, sourced from `src[src_offset..]`
    ///
    /// Destination bytes whose source index falls at or beyond `src.len()`
    /// are written as zero; the source is conceptually zero-padded to
    /// infinity. Grows memory to cover the destination range. A `len` of
    /// zero writes nothing and leaves the size unchanged.
    pub fn write_padded(&mut self, offset: usize, src_offset: usize, len: usize, src: &[u8]) {
        if len == 0 {
            return;
        }
        let size = self.size_after(offset, len);
        self.grow(size);

        let dst = &mut self.data[offset..offset + len];
        let available = src.len().saturating_sub(src_offset);
        let copied = available.min(len);
        if copied > 0 {
            dst[..copied].copy_from_slice(&src[src_offset..src_offset + copied]);
        }
        dst[copied..].fill(0);
    }

    /// Get raw data slice
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_after_alignment() {
        let mem = Memory::new();
        assert_eq!(mem.size_after(0, 0), 0);
        assert_eq!(mem.size_after(0, 1), 32);
        assert_eq!(mem.size_after(0, 32), 32);
        assert_eq!(mem.size_after(0, 33), 64);
        assert_eq!(mem.size_after(10, 30), 64);
    }

    #[test]
    fn test_size_after_within_current() {
        let mut mem = Memory::new();
        mem.grow(96);
        assert_eq!(mem.size_after(0, 10), 96);
        assert_eq!(mem.size_after(64, 32), 96);
        assert_eq!(mem.size_after(64, 33), 128);
        // Zero length never extends, whatever the offset
        assert_eq!(mem.size_after(1_000_000, 0), 96);
    }

    #[test]
    fn test_size_after_saturates() {
        let mem = Memory::new();
        // An extreme range must not wrap around to a small size
        let size = mem.size_after(usize::MAX - 10, 100);
        assert!(size >= usize::MAX - WORD_SIZE);
    }

    #[test]
    fn test_grow_zero_fills_and_never_shrinks() {
        let mut mem = Memory::new();
        mem.grow(64);
        assert_eq!(mem.size(), 64);
        assert!(mem.data().iter().all(|&b| b == 0));

        mem.grow(32);
        assert_eq!(mem.size(), 64);
    }

    #[test]
    fn test_store_load_word() {
        let mut mem = Memory::new();
        let value = U256::from(0x1234_5678_90AB_CDEFu64);

        mem.store_word(0, &value);
        assert_eq!(mem.load_word(0), value);
        assert_eq!(mem.size(), 32);

        // Crossing a word boundary
        mem.store_word(48, &value);
        assert_eq!(mem.load_word(48), value);
        assert_eq!(mem.size(), 96);
    }

    #[test]
    fn test_load_word_uninitialized() {
        let mem = Memory::new();
        assert_eq!(mem.load_word(0), U256::zero());
        assert_eq!(mem.load_word(1000), U256::zero());
    }

    #[test]
    fn test_read_zero_filled() {
        let mut mem = Memory::new();
        mem.write_padded(0, 0, 5, &[1, 2, 3, 4, 5]);

        assert_eq!(mem.read(0, 5), vec![1, 2, 3, 4, 5]);
        // Past the written bytes but within the grown word: zeros
        assert_eq!(mem.read(3, 5), vec![4, 5, 0, 0, 0]);
        // Entirely past the current size: zeros
        assert_eq!(mem.read(100, 4), vec![0, 0, 0, 0]);
        assert!(mem.read(0, 0).is_empty());
    }

    #[test]
    fn test_write_padded_full_source() {
        let mut mem = Memory::new();
        mem.write_padded(0, 0, 5, &[10, 20, 30, 40, 50]);
        assert_eq!(mem.read(0, 5), vec![10, 20, 30, 40, 50]);
        assert_eq!(mem.size(), 32);
    }

    #[test]
    fn test_write_padded_beyond_source() {
        let mut mem = Memory::new();
        let src = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10];

        // Source offset 5, 10 bytes requested: 5 real bytes then 5 zeros
        mem.write_padded(0, 5, 10, &src);
        assert_eq!(mem.read(0, 10), vec![6, 7, 8, 9, 10, 0, 0, 0, 0, 0]);

        // Source offset entirely past the end: all zeros
        mem.write_padded(0, 100, 4, &src);
        assert_eq!(mem.read(0, 4), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_write_padded_overwrites_with_zeros() {
        let mut mem = Memory::new();
        mem.write_padded(0, 0, 8, &[0xFF; 8]);

        // Re-copying from a 3-byte source must zero the stale tail
        mem.write_padded(0, 0, 8, &[1, 2, 3]);
        assert_eq!(mem.read(0, 8), vec![1, 2, 3, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_write_padded_zero_length() {
        let mut mem = Memory::new();
        mem.write_padded(100, 0, 0, &[1, 2, 3]);
        assert_eq!(mem.size(), 0);
    }
}
