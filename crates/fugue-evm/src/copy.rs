//! Copy-family instructions
//!
//! Each pops destination offset, source offset, and byte count, prices the
//! copy (base + per-word + memory expansion against the post-expansion
//! size), checks the budget, and only then writes. Source reads past the end
//! of the source buffer yield zero bytes.

use crate::error::HaltReason;
use crate::frame::MessageFrame;
use crate::gas::GasCalculator;
use crate::operation::{pop3, Operation, OperationResult};
use crate::word::clamped_to_usize;

/// CODECOPY (0x39): copy bytes from the frame's code into memory
pub struct CodeCopyOperation;

impl Operation for CodeCopyOperation {
    fn opcode(&self) -> u8 {
        0x39
    }

    fn mnemonic(&self) -> &'static str {
        "CODECOPY"
    }

    fn stack_inputs(&self) -> usize {
        3
    }

    fn stack_outputs(&self) -> usize {
        0
    }

    fn execute(&self, frame: &mut MessageFrame, gas: &dyn GasCalculator) -> OperationResult {
        let (dest_word, src_word, len_word) = match pop3(frame) {
            Ok(operands) => operands,
            Err(reason) => return OperationResult::halt(0, reason),
        };
        let dest = clamped_to_usize(&dest_word);
        let src = clamped_to_usize(&src_word);
        let len = clamped_to_usize(&len_word);

        let new_size = frame.memory_size_after(dest, len);
        let cost = gas.copy_operation_cost(len as u64, frame.memory_size(), new_size);
        if cost > frame.gas_remaining() {
            return OperationResult::halt(cost, HaltReason::InsufficientGas);
        }

        let code = frame.code().clone();
        frame.write_memory_padded(dest, src, len, code.as_slice());

        OperationResult::complete(cost)
    }
}

/// CALLDATACOPY (0x37): copy bytes from the call input into memory
pub struct CallDataCopyOperation;

impl Operation for CallDataCopyOperation {
    fn opcode(&self) -> u8 {
        0x37
    }

    fn mnemonic(&self) -> &'static str {
        "CALLDATACOPY"
    }

    fn stack_inputs(&self) -> usize {
        3
    }

    fn stack_outputs(&self) -> usize {
        0
    }

    fn execute(&self, frame: &mut MessageFrame, gas: &dyn GasCalculator) -> OperationResult {
        let (dest_word, src_word, len_word) = match pop3(frame) {
            Ok(operands) => operands,
            Err(reason) => return OperationResult::halt(0, reason),
        };
        let dest = clamped_to_usize(&dest_word);
        let src = clamped_to_usize(&src_word);
        let len = clamped_to_usize(&len_word);

        let new_size = frame.memory_size_after(dest, len);
        let cost = gas.copy_operation_cost(len as u64, frame.memory_size(), new_size);
        if cost > frame.gas_remaining() {
            return OperationResult::halt(cost, HaltReason::InsufficientGas);
        }

        let input = frame.input_data().clone();
        frame.write_memory_padded(dest, src, len, &input);

        OperationResult::complete(cost)
    }
}
