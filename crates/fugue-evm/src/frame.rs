//! Per-call execution context

use crate::code::Code;
use crate::error::HaltReason;
use crate::memory::Memory;
use crate::stack::Stack;
use bytes::Bytes;
use primitive_types::U256;

/// Whether a frame is still executing or how it ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameState {
    /// Instructions are still being executed
    Running,
    /// The frame finished normally (STOP, RETURN, or end of code)
    Completed,
    /// The frame hit a fatal condition; terminal, nothing executes after it
    Halted(HaltReason),
}

/// Mutable execution context for one call
///
/// Owns the stack, memory, gas budget, and halt state; shares the immutable
/// code and call input. Created fresh per call and discarded once its
/// outcome has been reported.
#[derive(Clone, Debug)]
pub struct MessageFrame {
    stack: Stack,
    memory: Memory,
    code: Code,
    input_data: Bytes,
    pc: usize,
    gas_remaining: u64,
    state: FrameState,
    output: Vec<u8>,
}

impl MessageFrame {
    /// Create a frame over `code` with a gas budget
    pub fn new(code: Code, gas: u64) -> Self {
        Self {
            stack: Stack::new(),
            memory: Memory::new(),
            code,
            input_data: Bytes::new(),
            pc: 0,
            gas_remaining: gas,
            state: FrameState::Running,
            output: Vec::new(),
        }
    }

    /// Attach call input data
    pub fn with_input(mut self, input: Bytes) -> Self {
        self.input_data = input;
        self
    }

    // ==================== Stack ====================

    /// Push a word onto the stack
    pub fn push(&mut self, value: U256) -> Result<(), HaltReason> {
        self.stack.push(value)
    }

    /// Pop a word off the stack
    pub fn pop(&mut self) -> Result<U256, HaltReason> {
        self.stack.pop()
    }

    /// Peek at the stack without popping (0 = top)
    pub fn peek(&self, depth: usize) -> Result<&U256, HaltReason> {
        self.stack.peek_at(depth)
    }

    /// Current stack depth
    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    // ==================== Memory ====================

    /// Current memory size in bytes
    pub fn memory_size(&self) -> usize {
        self.memory.size()
    }

    /// Word-aligned memory size after touching `[offset, offset + len)`,
    /// without growing
    pub fn memory_size_after(&self, offset: usize, len: usize) -> usize {
        self.memory.size_after(offset, len)
    }

    /// Grow memory to at least `size` bytes
    pub fn grow_memory(&mut self, size: usize) {
        self.memory.grow(size);
    }

    /// Read a memory range, zero-filled past the current size
    pub fn read_memory(&self, offset: usize, len: usize) -> Vec<u8> {
        self.memory.read(offset, len)
    }

    /// Load a 32-byte word from memory
    pub fn load_memory_word(&self, offset: usize) -> U256 {
        self.memory.load_word(offset)
    }

    /// Store a 32-byte word to memory, growing to cover it
    pub fn store_memory_word(&mut self, offset: usize, value: &U256) {
        self.memory.store_word(offset, value);
    }

    /// Write `len` bytes at `offset` from `src[src_offset..]`, zero-filling
    /// beyond the source's end
    pub fn write_memory_padded(&mut self, offset: usize, src_offset: usize, len: usize, src: &[u8]) {
        self.memory.write_padded(offset, src_offset, len, src);
    }

    // ==================== Code and input ====================

    /// The frame's code
    pub fn code(&self) -> &Code {
        &self.code
    }

    /// The frame's call input data
    pub fn input_data(&self) -> &Bytes {
        &self.input_data
    }

    // ==================== Gas ====================

    /// Remaining gas budget
    pub fn gas_remaining(&self) -> u64 {
        self.gas_remaining
    }

    /// Charge `cost` against the budget
    ///
    /// Returns `false` when the budget cannot cover the cost, in which case
    /// the budget is clamped to zero; it never goes negative.
    pub fn charge_gas(&mut self, cost: u64) -> bool {
        if cost > self.gas_remaining {
            self.gas_remaining = 0;
            false
        } else {
            self.gas_remaining -= cost;
            true
        }
    }

    // ==================== Control ====================

    /// Current program counter
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Advance the program counter by `n` bytes
    pub fn advance_pc(&mut self, n: usize) {
        self.pc = self.pc.saturating_add(n);
    }

    /// Current frame state
    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Mark the frame completed, optionally with output bytes
    pub fn set_completed(&mut self, output: Vec<u8>) {
        self.output = output;
        self.state = FrameState::Completed;
    }

    /// Mark the frame halted with a fatal reason
    pub fn set_halted(&mut self, reason: HaltReason) {
        self.state = FrameState::Halted(reason);
    }

    /// Output bytes produced by the frame
    pub fn output(&self) -> &[u8] {
        &self.output
    }
}
