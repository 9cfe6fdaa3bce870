//! # fugue-evm
//!
//! Deterministic, gas-metered bytecode interpreter for the Fugue VM.
//!
//! This crate provides:
//! - The per-call execution frame (stack, memory, code, gas, halt state)
//! - The operation execution contract and core instruction set
//! - Fork-configurable gas cost calculation
//! - The fetch-decode-execute dispatcher
//!
//! Execution is single-threaded and strictly deterministic: identical
//! frames produce identical outcomes, which is a correctness requirement
//! for independent re-execution, not an optimization.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod code;
pub mod copy;
pub mod error;
pub mod evm;
pub mod frame;
pub mod gas;
pub mod memory;
pub mod operation;
pub mod ops;
pub mod registry;
pub mod stack;
pub mod word;

pub use code::Code;
pub use error::{ExecutionOutcome, HaltReason};
pub use evm::Evm;
pub use frame::{FrameState, MessageFrame};
pub use gas::{GasCalculator, GasSchedule, StandardGasCalculator};
pub use operation::{Operation, OperationResult};
pub use registry::OperationRegistry;
