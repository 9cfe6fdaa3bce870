//! Saturating conversions from stack words to machine-size offsets

use primitive_types::U256;

/// Width in bytes of a stack word, and the memory growth granule
pub const WORD_SIZE: usize = 32;

/// Clamp a 256-bit word to `u64`, saturating at `u64::MAX`
///
/// Every place a stack word becomes an offset or length goes through this
/// (or [`clamped_to_usize`]); a plain truncating cast would let an oversized
/// operand wrap around to a small value and bypass gas accounting.
pub fn clamped_to_u64(value: &U256) -> u64 {
    if value.bits() > 64 {
        u64::MAX
    } else {
        value.low_u64()
    }
}

/// Clamp a 256-bit word to `usize`, saturating at `usize::MAX`
pub fn clamped_to_usize(value: &U256) -> usize {
    usize::try_from(clamped_to_u64(value)).unwrap_or(usize::MAX)
}

/// Number of 32-byte words needed to hold `bytes` bytes
pub fn words_for_bytes(bytes: u64) -> u64 {
    bytes.div_ceil(WORD_SIZE as u64)
}
