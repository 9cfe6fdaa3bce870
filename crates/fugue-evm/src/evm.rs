//! Fetch-decode-execute loop

use crate::error::{ExecutionOutcome, HaltReason};
use crate::frame::{FrameState, MessageFrame};
use crate::gas::{GasCalculator, StandardGasCalculator};
use crate::operation::OperationResult;
use crate::registry::OperationRegistry;
use crate::stack::MAX_STACK;
use std::sync::Arc;
use tracing::{debug, trace};

/// The instruction dispatcher
///
/// Immutable once built; the registry and gas calculator are read-only, so
/// one `Evm` can drive any number of frames, concurrently if each frame is
/// private to its caller. Execution within a frame is strictly sequential
/// and deterministic, and there is no cancellation path other than gas
/// exhaustion or a fatal halt.
pub struct Evm {
    registry: OperationRegistry,
    gas_calculator: Arc<dyn GasCalculator>,
}

impl Evm {
    /// Create a dispatcher from a registry and gas calculator
    pub fn new(registry: OperationRegistry, gas_calculator: Arc<dyn GasCalculator>) -> Self {
        Self {
            registry,
            gas_calculator,
        }
    }

    /// Dispatcher with the core instruction set and default gas schedule
    pub fn standard() -> Self {
        Self::new(
            OperationRegistry::standard(),
            Arc::new(StandardGasCalculator::default()),
        )
    }

    /// Run a frame to completion or halt, reporting the outcome
    pub fn execute(&self, frame: &mut MessageFrame) -> ExecutionOutcome {
        let initial_gas = frame.gas_remaining();

        while frame.state() == FrameState::Running {
            self.step(frame);
        }

        let halt = match frame.state() {
            FrameState::Halted(reason) => {
                debug!(reason = %reason, gas_remaining = frame.gas_remaining(), "frame halted");
                Some(reason)
            }
            _ => None,
        };

        ExecutionOutcome {
            gas_used: initial_gas - frame.gas_remaining(),
            gas_remaining: frame.gas_remaining(),
            output: frame.output().to_vec(),
            halt,
        }
    }

    /// Execute one instruction
    ///
    /// Fetches the opcode at the program counter (past the end of code is an
    /// implicit stop), resolves it, verifies stack preconditions, runs the
    /// operation, charges its cost, and adopts any halt it signaled.
    pub fn step(&self, frame: &mut MessageFrame) {
        let Some(opcode) = frame.code().get(frame.pc()) else {
            frame.set_completed(Vec::new());
            return;
        };

        let Some(op) = self.registry.get(opcode) else {
            frame.set_halted(HaltReason::InvalidOperation(opcode));
            return;
        };

        // Stack preconditions, checked before the operation runs
        if frame.stack_len() < op.stack_inputs() {
            frame.set_halted(HaltReason::StackUnderflow);
            return;
        }
        if frame.stack_len() - op.stack_inputs() + op.stack_outputs() > MAX_STACK {
            frame.set_halted(HaltReason::StackOverflow);
            return;
        }

        trace!(
            pc = frame.pc(),
            op = op.mnemonic(),
            gas = frame.gas_remaining(),
            "step"
        );

        match op.execute(frame, self.gas_calculator.as_ref()) {
            OperationResult::Complete { cost } => {
                if !frame.charge_gas(cost) {
                    frame.set_halted(HaltReason::InsufficientGas);
                    return;
                }
                if frame.state() == FrameState::Running {
                    frame.advance_pc(1 + op.immediate_size());
                }
            }
            OperationResult::Halt { cost, reason } => {
                // Charge what the budget covers; the budget clamps at zero
                frame.charge_gas(cost);
                frame.set_halted(reason);
            }
        }
    }
}

impl Default for Evm {
    fn default() -> Self {
        Self::standard()
    }
}
