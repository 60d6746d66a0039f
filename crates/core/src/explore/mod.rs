//! Reachability explorer.
//!
//! A worklist-driven linear sweep that follows jump and call targets from
//! a seed address to approximate which bytes are code. This is unsound by
//! design: indirect targets (register or memory operands) are not modeled;
//! each one is recorded as a diagnostic and dropped. The result value is
//! pure so the algorithm can be tested independently of any printing.

pub mod report;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::decode::{stream, InstructionSource};
use crate::image::Image;
use crate::util::parse_number;

/// Everything one exploration run discovered.
///
/// `calls` always maps the seed to a synthetic `entry` description, so its
/// keys double as the pseudo-function boundaries for
/// [`report::write_function_map`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exploration {
    /// Linear addresses decoded as instruction starts.
    pub visited: BTreeSet<u64>,
    /// Destinations of jump-family instructions, kept for annotation only.
    pub jump_targets: BTreeSet<u64>,
    /// Call target -> human-readable call-site descriptions.
    pub calls: BTreeMap<u64, BTreeSet<String>>,
    /// Unresolved-target reports, one per skipped instruction.
    pub diagnostics: Vec<String>,
}

fn is_jump(mnemonic: &str) -> bool {
    mnemonic.starts_with('j')
}

fn is_call(mnemonic: &str) -> bool {
    mnemonic == "call" || mnemonic == "lcall"
}

/// Resolve operand text to a linear address: first as a plain integer
/// literal, then as a `segment:offset` pair. `None` means the target is
/// indirect (or otherwise unprintable) and must be skipped.
fn resolve_target(operands: &str) -> Option<u64> {
    if let Some(addr) = parse_number(operands) {
        return Some(addr);
    }
    let (segment, offset) = operands.split_once(':')?;
    Some(Image::to_linear(parse_number(segment)?, parse_number(offset)?))
}

/// Explore reachable code from `seed`.
///
/// Terminates for any finite buffer: `visited` only grows and a stream
/// stops at the first already-visited address, so every worklist entry
/// either contributes new addresses or dies immediately.
pub fn explore(image: &Image, source: &dyn InstructionSource, seed: u64) -> Exploration {
    let mut out = Exploration::default();
    out.calls.entry(seed).or_default().insert("entry".to_string());

    let mut worklist = vec![seed];
    while let Some(start) = worklist.pop() {
        for insn in stream(source, image.bytes(), start) {
            if !out.visited.insert(insn.address) {
                // The rest of this stream was covered by a prior pass.
                break;
            }

            let mnemonic = insn.mnemonic.as_str();
            if !is_jump(mnemonic) && !is_call(mnemonic) {
                continue;
            }

            match resolve_target(&insn.operands) {
                Some(target) => {
                    worklist.push(target);
                    if is_call(mnemonic) {
                        out.calls.entry(target).or_default().insert(format!(
                            "called from 0x{:x}: {} {}",
                            insn.address, mnemonic, insn.operands
                        ));
                    } else {
                        out.jump_targets.insert(target);
                    }
                }
                None => out.diagnostics.push(format!(
                    "unresolved branch target at 0x{:x}: {} {}",
                    insn.address, mnemonic, insn.operands
                )),
            }
        }
    }

    out
}
