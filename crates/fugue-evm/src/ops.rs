//! Core instruction set

use crate::error::HaltReason;
use crate::frame::MessageFrame;
use crate::gas::GasCalculator;
use crate::operation::{pop2, Operation, OperationResult};
use crate::word::{clamped_to_usize, WORD_SIZE};
use primitive_types::U256;

/// STOP (0x00): end the frame normally with no output
pub struct StopOperation;

impl Operation for StopOperation {
    fn opcode(&self) -> u8 {
        0x00
    }

    fn mnemonic(&self) -> &'static str {
        "STOP"
    }

    fn stack_inputs(&self) -> usize {
        0
    }

    fn stack_outputs(&self) -> usize {
        0
    }

    fn execute(&self, frame: &mut MessageFrame, gas: &dyn GasCalculator) -> OperationResult {
        frame.set_completed(Vec::new());
        OperationResult::complete(gas.zero_tier_cost())
    }
}

/// ADD (0x01): wrapping 256-bit addition
pub struct AddOperation;

impl Operation for AddOperation {
    fn opcode(&self) -> u8 {
        0x01
    }

    fn mnemonic(&self) -> &'static str {
        "ADD"
    }

    fn stack_inputs(&self) -> usize {
        2
    }

    fn stack_outputs(&self) -> usize {
        1
    }

    fn execute(&self, frame: &mut MessageFrame, gas: &dyn GasCalculator) -> OperationResult {
        let (a, b) = match pop2(frame) {
            Ok(operands) => operands,
            Err(reason) => return OperationResult::halt(0, reason),
        };
        let cost = gas.very_low_tier_cost();
        if cost > frame.gas_remaining() {
            return OperationResult::halt(cost, HaltReason::InsufficientGas);
        }
        if let Err(reason) = frame.push(a.overflowing_add(b).0) {
            return OperationResult::halt(cost, reason);
        }
        OperationResult::complete(cost)
    }
}

/// POP (0x50): discard the top of the stack
pub struct PopOperation;

impl Operation for PopOperation {
    fn opcode(&self) -> u8 {
        0x50
    }

    fn mnemonic(&self) -> &'static str {
        "POP"
    }

    fn stack_inputs(&self) -> usize {
        1
    }

    fn stack_outputs(&self) -> usize {
        0
    }

    fn execute(&self, frame: &mut MessageFrame, gas: &dyn GasCalculator) -> OperationResult {
        if let Err(reason) = frame.pop() {
            return OperationResult::halt(0, reason);
        }
        let cost = gas.base_tier_cost();
        if cost > frame.gas_remaining() {
            return OperationResult::halt(cost, HaltReason::InsufficientGas);
        }
        OperationResult::complete(cost)
    }
}

/// MLOAD (0x51): load a 32-byte word from memory
pub struct MLoadOperation;

impl Operation for MLoadOperation {
    fn opcode(&self) -> u8 {
        0x51
    }

    fn mnemonic(&self) -> &'static str {
        "MLOAD"
    }

    fn stack_inputs(&self) -> usize {
        1
    }

    fn stack_outputs(&self) -> usize {
        1
    }

    fn execute(&self, frame: &mut MessageFrame, gas: &dyn GasCalculator) -> OperationResult {
        let offset = match frame.pop() {
            Ok(word) => clamped_to_usize(&word),
            Err(reason) => return OperationResult::halt(0, reason),
        };
        let new_size = frame.memory_size_after(offset, WORD_SIZE);
        let cost = gas
            .very_low_tier_cost()
            .saturating_add(gas.memory_expansion_cost(frame.memory_size(), new_size));
        if cost > frame.gas_remaining() {
            return OperationResult::halt(cost, HaltReason::InsufficientGas);
        }
        frame.grow_memory(new_size);
        let value = frame.load_memory_word(offset);
        if let Err(reason) = frame.push(value) {
            return OperationResult::halt(cost, reason);
        }
        OperationResult::complete(cost)
    }
}

/// MSTORE (0x52): store a 32-byte word to memory
pub struct MStoreOperation;

impl Operation for MStoreOperation {
    fn opcode(&self) -> u8 {
        0x52
    }

    fn mnemonic(&self) -> &'static str {
        "MSTORE"
    }

    fn stack_inputs(&self) -> usize {
        2
    }

    fn stack_outputs(&self) -> usize {
        0
    }

    fn execute(&self, frame: &mut MessageFrame, gas: &dyn GasCalculator) -> OperationResult {
        let (offset_word, value) = match pop2(frame) {
            Ok(operands) => operands,
            Err(reason) => return OperationResult::halt(0, reason),
        };
        let offset = clamped_to_usize(&offset_word);
        let new_size = frame.memory_size_after(offset, WORD_SIZE);
        let cost = gas
            .very_low_tier_cost()
            .saturating_add(gas.memory_expansion_cost(frame.memory_size(), new_size));
        if cost > frame.gas_remaining() {
            return OperationResult::halt(cost, HaltReason::InsufficientGas);
        }
        frame.store_memory_word(offset, &value);
        OperationResult::complete(cost)
    }
}

/// MSIZE (0x59): current memory size in bytes
pub struct MSizeOperation;

impl Operation for MSizeOperation {
    fn opcode(&self) -> u8 {
        0x59
    }

    fn mnemonic(&self) -> &'static str {
        "MSIZE"
    }

    fn stack_inputs(&self) -> usize {
        0
    }

    fn stack_outputs(&self) -> usize {
        1
    }

    fn execute(&self, frame: &mut MessageFrame, gas: &dyn GasCalculator) -> OperationResult {
        let cost = gas.base_tier_cost();
        if cost > frame.gas_remaining() {
            return OperationResult::halt(cost, HaltReason::InsufficientGas);
        }
        let size = U256::from(frame.memory_size() as u64);
        if let Err(reason) = frame.push(size) {
            return OperationResult::halt(cost, reason);
        }
        OperationResult::complete(cost)
    }
}

/// CODESIZE (0x38): length of the frame's code
pub struct CodeSizeOperation;

impl Operation for CodeSizeOperation {
    fn opcode(&self) -> u8 {
        0x38
    }

    fn mnemonic(&self) -> &'static str {
        "CODESIZE"
    }

    fn stack_inputs(&self) -> usize {
        0
    }

    fn stack_outputs(&self) -> usize {
        1
    }

    fn execute(&self, frame: &mut MessageFrame, gas: &dyn GasCalculator) -> OperationResult {
        let cost = gas.base_tier_cost();
        if cost > frame.gas_remaining() {
            return OperationResult::halt(cost, HaltReason::InsufficientGas);
        }
        let size = U256::from(frame.code().len() as u64);
        if let Err(reason) = frame.push(size) {
            return OperationResult::halt(cost, reason);
        }
        OperationResult::complete(cost)
    }
}

/// CALLDATASIZE (0x36): length of the frame's call input
pub struct CallDataSizeOperation;

impl Operation for CallDataSizeOperation {
    fn opcode(&self) -> u8 {
        0x36
    }

    fn mnemonic(&self) -> &'static str {
        "CALLDATASIZE"
    }

    fn stack_inputs(&self) -> usize {
        0
    }

    fn stack_outputs(&self) -> usize {
        1
    }

    fn execute(&self, frame: &mut MessageFrame, gas: &dyn GasCalculator) -> OperationResult {
        let cost = gas.base_tier_cost();
        if cost > frame.gas_remaining() {
            return OperationResult::halt(cost, HaltReason::InsufficientGas);
        }
        let size = U256::from(frame.input_data().len() as u64);
        if let Err(reason) = frame.push(size) {
            return OperationResult::halt(cost, reason);
        }
        OperationResult::complete(cost)
    }
}

/// RETURN (0xF3): end the frame normally with a memory range as output
pub struct ReturnOperation;

impl Operation for ReturnOperation {
    fn opcode(&self) -> u8 {
        0xF3
    }

    fn mnemonic(&self) -> &'static str {
        "RETURN"
    }

    fn stack_inputs(&self) -> usize {
        2
    }

    fn stack_outputs(&self) -> usize {
        0
    }

    fn execute(&self, frame: &mut MessageFrame, gas: &dyn GasCalculator) -> OperationResult {
        let (offset_word, len_word) = match pop2(frame) {
            Ok(operands) => operands,
            Err(reason) => return OperationResult::halt(0, reason),
        };
        let offset = clamped_to_usize(&offset_word);
        let len = clamped_to_usize(&len_word);
        let new_size = frame.memory_size_after(offset, len);
        let cost = gas
            .zero_tier_cost()
            .saturating_add(gas.memory_expansion_cost(frame.memory_size(), new_size));
        if cost > frame.gas_remaining() {
            return OperationResult::halt(cost, HaltReason::InsufficientGas);
        }
        frame.grow_memory(new_size);
        let output = frame.read_memory(offset, len);
        frame.set_completed(output);
        OperationResult::complete(cost)
    }
}

const PUSH_MNEMONICS: [&str; 32] = [
    "PUSH1", "PUSH2", "PUSH3", "PUSH4", "PUSH5", "PUSH6", "PUSH7", "PUSH8", "PUSH9", "PUSH10",
    "PUSH11", "PUSH12", "PUSH13", "PUSH14", "PUSH15", "PUSH16", "PUSH17", "PUSH18", "PUSH19",
    "PUSH20", "PUSH21", "PUSH22", "PUSH23", "PUSH24", "PUSH25", "PUSH26", "PUSH27", "PUSH28",
    "PUSH29", "PUSH30", "PUSH31", "PUSH32",
];

/// PUSHn (0x60..=0x7F): push an n-byte immediate from code
///
/// Immediate bytes past the end of code read as zero in the low positions,
/// matching the zero-padded-to-infinity view of code.
pub struct PushOperation {
    len: usize,
}

impl PushOperation {
    /// Create PUSHn for `len` immediate bytes (1..=32)
    pub fn new(len: usize) -> Self {
        debug_assert!((1..=32).contains(&len));
        Self { len }
    }
}

impl Operation for PushOperation {
    fn opcode(&self) -> u8 {
        0x5F + self.len as u8
    }

    fn mnemonic(&self) -> &'static str {
        PUSH_MNEMONICS[self.len - 1]
    }

    fn stack_inputs(&self) -> usize {
        0
    }

    fn stack_outputs(&self) -> usize {
        1
    }

    fn immediate_size(&self) -> usize {
        self.len
    }

    fn execute(&self, frame: &mut MessageFrame, gas: &dyn GasCalculator) -> OperationResult {
        let cost = gas.very_low_tier_cost();
        if cost > frame.gas_remaining() {
            return OperationResult::halt(cost, HaltReason::InsufficientGas);
        }

        let code = frame.code().as_slice();
        let start = frame.pc() + 1;
        let mut buf = [0u8; 32];
        for i in 0..self.len {
            if let Some(&byte) = code.get(start + i) {
                buf[32 - self.len + i] = byte;
            }
        }
        if let Err(reason) = frame.push(U256::from_big_endian(&buf)) {
            return OperationResult::halt(cost, reason);
        }
        OperationResult::complete(cost)
    }
}
