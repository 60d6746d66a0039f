//! mzscope-core
//!
//! Core library for exploring segmented 16-bit MZ executables.
//!
//! This crate defines the address space and MZ header model, the
//! instruction-source seam over the disassembler, the reachability
//! explorer with its function-partition renderer, the persistent label
//! table, and the interactive navigation session.
//!
//! The goal is to keep all substantive logic here so it is fully testable
//! and reusable from multiple frontends (CLI, scripting bindings, etc.).

pub mod decode;
pub mod explore;
pub mod image;
pub mod labels;
pub mod session;
pub mod util;

/// Library version, as baked in at compile time. The interactive session
/// banner reports it.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
