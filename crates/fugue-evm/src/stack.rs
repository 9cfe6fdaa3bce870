//! Bounded operand stack

use crate::error::HaltReason;
use primitive_types::U256;

/// Maximum stack depth
pub const MAX_STACK: usize = 1024;

/// Operand stack (max 1024 items, 256-bit each)
#[derive(Clone, Debug)]
pub struct Stack {
    data: Vec<U256>,
}

impl Stack {
    /// Create a new empty stack
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Push a value onto the stack
    pub fn push(&mut self, value: U256) -> Result<(), HaltReason> {
        if self.data.len() >= MAX_STACK {
            return Err(HaltReason::StackOverflow);
        }
        self.data.push(value);
        Ok(())
    }

    /// Pop a value from the stack
    pub fn pop(&mut self) -> Result<U256, HaltReason> {
        self.data.pop().ok_or(HaltReason::StackUnderflow)
    }

    /// Peek at the top of the stack without popping
    pub fn peek(&self) -> Result<&U256, HaltReason> {
        self.data.last().ok_or(HaltReason::StackUnderflow)
    }

    /// Peek at a specific depth (0 = top)
    pub fn peek_at(&self, depth: usize) -> Result<&U256, HaltReason> {
        if depth >= self.data.len() {
            return Err(HaltReason::StackUnderflow);
        }
        Ok(&self.data[self.data.len() - 1 - depth])
    }

    /// Get current stack depth
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
