#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use mzscope_core::decode::{Instruction, InstructionSource};

/// Deterministic instruction source scripted per address.
///
/// `decode_one` ignores the buffer contents and replays whatever the test
/// scripted, so explorer and session behavior can be pinned down without
/// crafting real machine code.
#[derive(Default)]
pub struct ScriptedSource {
    insns: HashMap<u64, Instruction>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script an instruction of `size` bytes at `addr`. The raw bytes are
    /// filler; only their length matters to the stream.
    pub fn push(&mut self, addr: u64, size: usize, mnemonic: &str, operands: &str) {
        self.insns.insert(
            addr,
            Instruction {
                address: addr,
                bytes: vec![0x90; size],
                mnemonic: mnemonic.to_string(),
                operands: operands.to_string(),
            },
        );
    }
}

impl InstructionSource for ScriptedSource {
    fn decode_one(&self, _data: &[u8], addr: u64) -> Option<Instruction> {
        self.insns.get(&addr).cloned()
    }
}

/// Wrapper that records every address handed to `decode_one`.
pub struct CountingSource {
    pub inner: ScriptedSource,
    pub decoded: RefCell<Vec<u64>>,
}

impl CountingSource {
    pub fn new(inner: ScriptedSource) -> Self {
        Self { inner, decoded: RefCell::new(Vec::new()) }
    }
}

impl InstructionSource for CountingSource {
    fn decode_one(&self, data: &[u8], addr: u64) -> Option<Instruction> {
        self.decoded.borrow_mut().push(addr);
        self.inner.decode_one(data, addr)
    }
}
