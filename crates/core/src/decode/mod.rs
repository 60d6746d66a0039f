//! Instruction-source seam over the disassembler.
//!
//! The decoder itself is an external collaborator: anything that can turn
//! bytes at an address into one [`Instruction`] satisfies
//! [`InstructionSource`]. The default implementation wraps capstone in
//! 16-bit x86 mode ([`CapstoneSource`]); tests script their own sources.

mod capstone;

pub use self::capstone::CapstoneSource;

use thiserror::Error;

/// Error type for constructing a decoder.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("capstone init failed: {0}")]
    Init(String),
}

/// One decoded instruction. Opaque and immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Linear address of the first byte.
    pub address: u64,
    /// Raw encoding; its length is the instruction size.
    pub bytes: Vec<u8>,
    pub mnemonic: String,
    /// Operand text as the decoder rendered it (e.g. `0x527c` or
    /// `0x527:0xc`).
    pub operands: String,
}

impl Instruction {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Address of the byte after this instruction.
    pub fn end(&self) -> u64 {
        self.address + self.size()
    }
}

/// Capability to decode a single instruction at an address.
///
/// Implementations return `None` when `addr` is outside `data` or the
/// bytes there do not form a valid instruction.
pub trait InstructionSource {
    fn decode_one(&self, data: &[u8], addr: u64) -> Option<Instruction>;
}

/// Lazy, densely packed instruction stream.
///
/// Each yielded instruction starts where the previous one ended; the
/// stream terminates at the first address that fails to decode.
pub struct InstructionStream<'a> {
    source: &'a dyn InstructionSource,
    data: &'a [u8],
    next: u64,
}

impl<'a> Iterator for InstructionStream<'a> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        let insn = self.source.decode_one(self.data, self.next)?;
        if insn.size() == 0 {
            // A zero-size instruction would never advance; treat it as
            // end of stream.
            return None;
        }
        self.next = insn.end();
        Some(insn)
    }
}

/// Decode a stream of instructions starting at `start`.
pub fn stream<'a>(
    source: &'a dyn InstructionSource,
    data: &'a [u8],
    start: u64,
) -> InstructionStream<'a> {
    InstructionStream { source, data, next: start }
}
