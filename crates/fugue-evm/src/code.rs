//! Immutable program bytecode

use bytes::Bytes;

/// Program bytecode for one frame
///
/// Backed by [`Bytes`] so nested frames share the buffer instead of copying
/// it; cloning is O(1). Reads past the end are defined to yield nothing
/// (callers zero-fill), never an error.
#[derive(Clone, Debug, Default)]
pub struct Code {
    bytes: Bytes,
}

impl Code {
    /// Wrap existing bytes as code
    pub fn new(bytes: Bytes) -> Self {
        Self { bytes }
    }

    /// Code length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the code is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Opcode byte at `pc`, `None` past the end
    pub fn get(&self, pc: usize) -> Option<u8> {
        self.bytes.get(pc).copied()
    }

    /// Raw code bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for Code {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Code {
    fn from(bytes: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(bytes))
    }
}
