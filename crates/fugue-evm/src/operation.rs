//! The operation execution contract

use crate::error::HaltReason;
use crate::frame::MessageFrame;
use crate::gas::GasCalculator;
use primitive_types::U256;

/// What one instruction execution produced
///
/// An explicit sum rather than a nullable halt field: either the instruction
/// completed and `cost` should be charged, or it must halt the frame. The
/// cost is reported in both cases so metering and tracing stay accurate on
/// failure paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationResult {
    /// The instruction completed; charge `cost` and continue
    Complete {
        /// Full cost of the instruction, every component included
        cost: u64,
    },
    /// The instruction must halt the frame; charge up to the budget and stop
    Halt {
        /// Computed cost, reported even though it may exceed the budget
        cost: u64,
        /// Why the frame halts
        reason: HaltReason,
    },
}

impl OperationResult {
    /// A completed instruction with the given cost
    pub fn complete(cost: u64) -> Self {
        Self::Complete { cost }
    }

    /// A halting instruction with the given cost and reason
    pub fn halt(cost: u64, reason: HaltReason) -> Self {
        Self::Halt { cost, reason }
    }

    /// The cost component, whichever variant
    pub fn cost(&self) -> u64 {
        match self {
            Self::Complete { cost } | Self::Halt { cost, .. } => *cost,
        }
    }

    /// The halt reason, if any
    pub fn halt_reason(&self) -> Option<HaltReason> {
        match self {
            Self::Complete { .. } => None,
            Self::Halt { reason, .. } => Some(*reason),
        }
    }
}

/// One instruction handler
///
/// Exactly one value per opcode lives in the registry; it is immutable and
/// shared. The contract every implementation observes:
///
/// - The dispatcher has already verified the declared stack inputs are
///   present and the declared outputs will fit, so operand pops cannot fail.
/// - Operands are popped first; inputs are consumed even when the
///   instruction then halts.
/// - The full cost (static tiers plus any dynamic component) is computed and
///   compared against the remaining budget *before* any memory or stack
///   mutation beyond operand consumption. An unaffordable instruction
///   returns [`OperationResult::Halt`] with the computed cost and mutates
///   nothing further.
pub trait Operation: Send + Sync {
    /// Opcode byte this operation is registered under
    fn opcode(&self) -> u8;

    /// Human-readable instruction name
    fn mnemonic(&self) -> &'static str;

    /// Number of stack items consumed
    fn stack_inputs(&self) -> usize;

    /// Number of stack items produced
    fn stack_outputs(&self) -> usize;

    /// Bytes of immediate operand data following the opcode in code
    fn immediate_size(&self) -> usize {
        0
    }

    /// Execute against a frame, reporting cost and an optional halt
    fn execute(&self, frame: &mut MessageFrame, gas: &dyn GasCalculator) -> OperationResult;
}

/// Pop two operands, top first
pub(crate) fn pop2(frame: &mut MessageFrame) -> Result<(U256, U256), HaltReason> {
    let a = frame.pop()?;
    let b = frame.pop()?;
    Ok((a, b))
}

/// Pop three operands, top first
pub(crate) fn pop3(frame: &mut MessageFrame) -> Result<(U256, U256, U256), HaltReason> {
    let a = frame.pop()?;
    let b = frame.pop()?;
    let c = frame.pop()?;
    Ok((a, b, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_accessors() {
        let ok = OperationResult::complete(9);
        assert_eq!(ok.cost(), 9);
        assert_eq!(ok.halt_reason(), None);

        let halted = OperationResult::halt(42, HaltReason::InsufficientGas);
        assert_eq!(halted.cost(), 42);
        assert_eq!(halted.halt_reason(), Some(HaltReason::InsufficientGas));
    }
}
