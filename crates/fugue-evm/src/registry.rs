//! Opcode dispatch table

use crate::copy::{CallDataCopyOperation, CodeCopyOperation};
use crate::operation::Operation;
use crate::ops::{
    AddOperation, CallDataSizeOperation, CodeSizeOperation, MLoadOperation, MSizeOperation,
    MStoreOperation, PopOperation, PushOperation, ReturnOperation, StopOperation,
};
use std::array;
use std::sync::Arc;

/// Opcode byte → operation mapping
///
/// Built once per fork configuration and then only read; unknown opcodes
/// resolve to `None` and halt the frame with INVALID_OPERATION.
pub struct OperationRegistry {
    table: [Option<Arc<dyn Operation>>; 256],
}

impl OperationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            table: array::from_fn(|_| None),
        }
    }

    /// Registry with the core instruction set
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(StopOperation));
        registry.register(Arc::new(AddOperation));
        registry.register(Arc::new(CallDataSizeOperation));
        registry.register(Arc::new(CallDataCopyOperation));
        registry.register(Arc::new(CodeSizeOperation));
        registry.register(Arc::new(CodeCopyOperation));
        registry.register(Arc::new(PopOperation));
        registry.register(Arc::new(MLoadOperation));
        registry.register(Arc::new(MStoreOperation));
        registry.register(Arc::new(MSizeOperation));
        registry.register(Arc::new(ReturnOperation));
        for len in 1..=32 {
            registry.register(Arc::new(PushOperation::new(len)));
        }
        registry
    }

    /// Register an operation under its own opcode, replacing any previous one
    pub fn register(&mut self, op: Arc<dyn Operation>) {
        let opcode = op.opcode() as usize;
        self.table[opcode] = Some(op);
    }

    /// Resolve an opcode byte
    pub fn get(&self, opcode: u8) -> Option<&dyn Operation> {
        self.table[opcode as usize].as_deref()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_contents() {
        let registry = OperationRegistry::standard();

        assert_eq!(registry.get(0x00).unwrap().mnemonic(), "STOP");
        assert_eq!(registry.get(0x01).unwrap().mnemonic(), "ADD");
        assert_eq!(registry.get(0x36).unwrap().mnemonic(), "CALLDATASIZE");
        assert_eq!(registry.get(0x37).unwrap().mnemonic(), "CALLDATACOPY");
        assert_eq!(registry.get(0x38).unwrap().mnemonic(), "CODESIZE");
        assert_eq!(registry.get(0x39).unwrap().mnemonic(), "CODECOPY");
        assert_eq!(registry.get(0x50).unwrap().mnemonic(), "POP");
        assert_eq!(registry.get(0x51).unwrap().mnemonic(), "MLOAD");
        assert_eq!(registry.get(0x52).unwrap().mnemonic(), "MSTORE");
        assert_eq!(registry.get(0x59).unwrap().mnemonic(), "MSIZE");
        assert_eq!(registry.get(0xF3).unwrap().mnemonic(), "RETURN");
        assert_eq!(registry.get(0x60).unwrap().mnemonic(), "PUSH1");
        assert_eq!(registry.get(0x7F).unwrap().mnemonic(), "PUSH32");
    }

    #[test]
    fn test_unknown_opcodes_unresolved() {
        let registry = OperationRegistry::standard();
        assert!(registry.get(0xEF).is_none());
        assert!(registry.get(0x21).is_none());
    }

    #[test]
    fn test_descriptors_consistent() {
        let registry = OperationRegistry::standard();
        for opcode in 0..=255u8 {
            if let Some(op) = registry.get(opcode) {
                assert_eq!(op.opcode(), opcode);
                assert!(!op.mnemonic().is_empty());
            }
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = OperationRegistry::new();
        assert!(registry.get(0x00).is_none());
    }
}
