//! Halt reasons and execution outcomes

use thiserror::Error;

/// Fatal reasons a frame stops executing
///
/// These are terminal values attached to the frame and surfaced in the
/// [`ExecutionOutcome`], never panics or unwinding. Re-running the same
/// frame reproduces the same halt, so retries are pointless.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// The instruction's cost exceeded the remaining gas budget
    #[error("insufficient gas")]
    InsufficientGas,

    /// An operation needed more stack items than were present
    #[error("stack underflow")]
    StackUnderflow,

    /// A push would exceed the stack bound (max 1024)
    #[error("stack overflow (max 1024)")]
    StackOverflow,

    /// The opcode byte has no registered operation
    #[error("invalid operation: 0x{0:02x}")]
    InvalidOperation(u8),
}

/// Final accounting for one frame's execution
///
/// Gas consumed is reported even on failure paths; correct accounting of
/// spent resources is part of the external contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Gas consumed by the frame
    pub gas_used: u64,
    /// Gas left in the frame's budget
    pub gas_remaining: u64,
    /// Bytes produced by RETURN, empty otherwise
    pub output: Vec<u8>,
    /// Halt reason, `None` on ordinary completion
    pub halt: Option<HaltReason>,
}

impl ExecutionOutcome {
    /// Whether the frame completed without a fatal halt
    pub fn is_success(&self) -> bool {
        self.halt.is_none()
    }
}
