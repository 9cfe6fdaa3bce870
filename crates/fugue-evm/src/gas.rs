//! Gas cost calculation

use crate::word::words_for_bytes;

/// Fork-specific cost constants
///
/// Operations never hard-code numbers; they go through a [`GasCalculator`]
/// built from a schedule, so a fork can reprice instructions without touching
/// operation logic. The defaults mirror the mainnet-era schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GasSchedule {
    /// Zero tier (STOP, RETURN)
    pub zero: u64,
    /// Base tier (POP, MSIZE, CODESIZE, CALLDATASIZE)
    pub base: u64,
    /// Very-low tier (ADD, PUSH, MLOAD, MSTORE, copy-family base)
    pub very_low: u64,
    /// Per 32-byte word copied by a copy-family instruction
    pub copy_word: u64,
    /// Linear coefficient of the memory cost formula
    pub memory_word: u64,
    /// Divisor of the quadratic memory cost component
    pub memory_quad_divisor: u64,
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            zero: 0,
            base: 2,
            very_low: 3,
            copy_word: 3,
            memory_word: 3,
            memory_quad_divisor: 512,
        }
    }
}

/// Cost functions consumed by operations
///
/// Injected into the dispatcher per fork. Implementations must be pure:
/// identical inputs always yield identical costs, independent of anything
/// else in the program. Consensus reproducibility depends on it.
pub trait GasCalculator: Send + Sync {
    /// Cost of a zero-tier instruction
    fn zero_tier_cost(&self) -> u64;

    /// Cost of a base-tier instruction
    fn base_tier_cost(&self) -> u64;

    /// Cost of a very-low-tier instruction
    fn very_low_tier_cost(&self) -> u64;

    /// Surcharge for extending memory from `current_size` to `new_size`
    /// bytes; zero when `new_size <= current_size`
    ///
    /// Superlinear in the new size so large allocations become increasingly
    /// expensive. Both sizes are in bytes; the formula works on word counts.
    fn memory_expansion_cost(&self, current_size: usize, new_size: usize) -> u64;

    /// Full cost of a copy-family instruction: very-low base, per-word copy
    /// cost for `read_size` bytes, and the expansion surcharge for growing
    /// memory from `current_size` to `new_size`
    fn copy_operation_cost(&self, read_size: u64, current_size: usize, new_size: usize) -> u64;
}

/// Schedule-driven calculator used by all current forks
#[derive(Clone, Debug, Default)]
pub struct StandardGasCalculator {
    schedule: GasSchedule,
}

impl StandardGasCalculator {
    /// Create a calculator from a schedule
    pub fn new(schedule: GasSchedule) -> Self {
        Self { schedule }
    }

    /// Total memory cost for a word count: linear term plus quadratic term
    ///
    /// Computed in 128-bit then clamped, so saturated word counts price at
    /// `u64::MAX` instead of wrapping to something affordable.
    fn memory_cost(&self, words: u64) -> u64 {
        let words = words as u128;
        let linear = words * self.schedule.memory_word as u128;
        let quadratic = words * words / self.schedule.memory_quad_divisor.max(1) as u128;
        u64::try_from(linear + quadratic).unwrap_or(u64::MAX)
    }
}

impl GasCalculator for StandardGasCalculator {
    fn zero_tier_cost(&self) -> u64 {
        self.schedule.zero
    }

    fn base_tier_cost(&self) -> u64 {
        self.schedule.base
    }

    fn very_low_tier_cost(&self) -> u64 {
        self.schedule.very_low
    }

    fn memory_expansion_cost(&self, current_size: usize, new_size: usize) -> u64 {
        if new_size <= current_size {
            return 0;
        }
        let new_cost = self.memory_cost(words_for_bytes(new_size as u64));
        let old_cost = self.memory_cost(words_for_bytes(current_size as u64));
        new_cost.saturating_sub(old_cost)
    }

    fn copy_operation_cost(&self, read_size: u64, current_size: usize, new_size: usize) -> u64 {
        let words = words_for_bytes(read_size);
        self.schedule
            .very_low
            .saturating_add(words.saturating_mul(self.schedule.copy_word))
            .saturating_add(self.memory_expansion_cost(current_size, new_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc() -> StandardGasCalculator {
        StandardGasCalculator::default()
    }

    #[test]
    fn test_tier_costs() {
        assert_eq!(calc().zero_tier_cost(), 0);
        assert_eq!(calc().base_tier_cost(), 2);
        assert_eq!(calc().very_low_tier_cost(), 3);
    }

    #[test]
    fn test_memory_expansion_quadratic() {
        let c = calc();
        // 1 word: 3*1 + 1/512 = 3
        assert_eq!(c.memory_expansion_cost(0, 32), 3);
        // 2 words: 3*2 + 4/512 = 6
        assert_eq!(c.memory_expansion_cost(0, 64), 6);
        // 32 words: 3*32 + 1024/512 = 98
        assert_eq!(c.memory_expansion_cost(0, 1024), 98);
        // 512 words: 3*512 + 512 = 2048
        assert_eq!(c.memory_expansion_cost(0, 16384), 2048);
    }

    #[test]
    fn test_memory_expansion_zero_within_bound() {
        let c = calc();
        assert_eq!(c.memory_expansion_cost(32, 32), 0);
        assert_eq!(c.memory_expansion_cost(64, 32), 0);
        assert_eq!(c.memory_expansion_cost(1024, 512), 0);
    }

    #[test]
    fn test_memory_expansion_incremental() {
        let c = calc();
        // Charging 0->32 then 32->64 equals charging 0->64 directly
        let direct = c.memory_expansion_cost(0, 64);
        let stepped = c.memory_expansion_cost(0, 32) + c.memory_expansion_cost(32, 64);
        assert_eq!(direct, stepped);
    }

    #[test]
    fn test_memory_expansion_saturates() {
        let c = calc();
        // A saturated size must price at u64::MAX, never wrap small
        assert_eq!(c.memory_expansion_cost(0, usize::MAX), u64::MAX);
    }

    #[test]
    fn test_copy_cost_word_rounding() {
        let c = calc();
        // No expansion: base 3 + 3 per word
        assert_eq!(c.copy_operation_cost(0, 64, 64), 3);
        assert_eq!(c.copy_operation_cost(1, 64, 64), 6);
        assert_eq!(c.copy_operation_cost(32, 64, 64), 6);
        assert_eq!(c.copy_operation_cost(33, 64, 64), 9);
        assert_eq!(c.copy_operation_cost(64, 64, 64), 9);
    }

    #[test]
    fn test_copy_cost_with_expansion() {
        let c = calc();
        // 32 bytes into empty memory: 3 base + 3 copy + 3 expansion
        assert_eq!(c.copy_operation_cost(32, 0, 32), 9);
    }

    #[test]
    fn test_copy_cost_saturated_read_size() {
        let c = calc();
        // An absurd read size is deterministically enormous
        let cost = c.copy_operation_cost(u64::MAX, 0, usize::MAX);
        assert_eq!(cost, u64::MAX);
    }

    #[test]
    fn test_custom_schedule() {
        let c = StandardGasCalculator::new(GasSchedule {
            zero: 0,
            base: 5,
            very_low: 7,
            copy_word: 10,
            memory_word: 4,
            memory_quad_divisor: 256,
        });
        assert_eq!(c.base_tier_cost(), 5);
        // 1 word: 4*1 + 1/256 = 4
        assert_eq!(c.memory_expansion_cost(0, 32), 4);
        // base 7 + 2 words * 10
        assert_eq!(c.copy_operation_cost(40, 32, 32), 27);
    }
}
