use anyhow::{anyhow, Result};
use mzscope_core::util::parse_number;

pub mod commands;

/// Parse an address argument in any standard integer base, with a
/// CLI-friendly error message.
pub fn parse_address_arg(s: &str) -> Result<u64> {
    parse_number(s)
        .ok_or_else(|| anyhow!("Invalid address '{s}' (expected decimal or 0x/0o/0b literal)"))
}
