use capstone::arch;
use capstone::prelude::*;
use capstone::Capstone;

use crate::decode::{DecodeError, Instruction, InstructionSource};

/// Capstone-backed decoder for 16-bit real-mode x86.
pub struct CapstoneSource {
    cs: Capstone,
}

impl CapstoneSource {
    pub fn new() -> Result<Self, DecodeError> {
        let cs = Capstone::new()
            .x86()
            .mode(arch::x86::ArchMode::Mode16)
            .build()
            .map_err(|e| DecodeError::Init(e.to_string()))?;
        Ok(Self { cs })
    }
}

impl InstructionSource for CapstoneSource {
    fn decode_one(&self, data: &[u8], addr: u64) -> Option<Instruction> {
        let offset = addr as usize;
        if offset >= data.len() {
            return None;
        }
        // Disassemble the tail starting at `addr` so capstone reports
        // absolute addresses; one instruction per call keeps the stream lazy.
        let insns = self.cs.disasm_count(&data[offset..], addr, 1).ok()?;
        let insn = insns.iter().next()?;
        Some(Instruction {
            address: insn.address(),
            bytes: insn.bytes().to_vec(),
            mnemonic: insn.mnemonic().unwrap_or("").to_string(),
            operands: insn.op_str().unwrap_or("").to_string(),
        })
    }
}
