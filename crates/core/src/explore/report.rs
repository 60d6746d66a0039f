//! Function partition renderer.
//!
//! Partitions the address space into pseudo-functions bounded by the
//! discovered call targets and replays the decode for each one. No target
//! resolution happens here; the exploration result already carries
//! everything this printer needs besides the raw decode.

use std::io::{self, Write};

use crate::decode::{stream, InstructionSource};
use crate::explore::Exploration;
use crate::image::Image;

fn ends_basic_block(mnemonic: &str) -> bool {
    mnemonic.starts_with("jmp") || mnemonic.starts_with("ret")
}

/// Render the discovered regions as bounded pseudo-functions.
///
/// Boundaries are the sorted `calls` keys plus a terminal sentinel past
/// any buffer, so every decoded instruction falls into exactly one
/// half-open segment. Jump targets get a `* ` marker; a blank line after
/// each `jmp*`/`ret*` delimits basic blocks.
pub fn write_function_map<W: Write>(
    out: &mut W,
    image: &Image,
    source: &dyn InstructionSource,
    map: &Exploration,
) -> io::Result<()> {
    let mut boundaries: Vec<u64> = map.calls.keys().copied().collect();
    boundaries.push(u64::MAX);

    for pair in boundaries.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        writeln!(out, "#function 0x{start:x}")?;
        if let Some(sites) = map.calls.get(&start) {
            for site in sites {
                writeln!(out, "{site}")?;
            }
        }
        for insn in stream(source, image.bytes(), start) {
            if insn.address >= end {
                break;
            }
            let marker = if map.jump_targets.contains(&insn.address) { "* " } else { "  " };
            writeln!(out, "{marker}0x{:x}:\t{}\t{}", insn.address, insn.mnemonic, insn.operands)?;
            if ends_basic_block(&insn.mnemonic) {
                writeln!(out)?;
            }
        }
        writeln!(out)?;
    }

    Ok(())
}
