//! Command surface for the interactive session.
//!
//! One tagged variant per verb, parsed from a raw input line and
//! dispatched by exhaustive matching in the frontend. Parsing never
//! touches session state, so a malformed line aborts only itself.

use thiserror::Error;

use crate::session::Mode;
use crate::util::{parse_hex_bytes, parse_number};

/// Error type for malformed command lines. Always recoverable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownVerb(String),

    #[error("bad address: {0}")]
    BadAddress(String),

    #[error("bad count: {0}")]
    BadCount(String),

    #[error("bad hex pattern: {0}")]
    BadPattern(String),

    #[error("unknown mode: {0} (expected hex, bin, or asm)")]
    UnknownMode(String),

    #[error("missing argument for {0}")]
    MissingArgument(&'static str),
}

/// A parsed interactive command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Persist the label table.
    Save,
    /// Print the MZ header.
    Header,
    /// Persist and leave the session.
    Quit,
    /// Move the cursor and regenerate the stream.
    Goto(u64),
    /// Replace the stream with a byte-pattern search.
    Find(Vec<u8>),
    /// Pull `count` lines; `restart` first resets the stream to the cursor.
    Show { count: usize, restart: bool },
    /// Switch display mode.
    SetMode(Mode),
    /// Attach a label at the given address, or at the cursor.
    Label { name: String, address: Option<u64> },
    /// Empty input: pull exactly one more line.
    Next,
}

impl Command {
    /// Parse one input line. Empty (or whitespace-only) input is the
    /// "repeat current line" command.
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Command::Next);
        }

        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or("");
        match verb {
            "save" => Ok(Command::Save),
            "header" => Ok(Command::Header),
            "quit" => Ok(Command::Quit),
            "goto" => {
                let arg = parts.next().ok_or(CommandError::MissingArgument("goto"))?;
                let address =
                    parse_number(arg).ok_or_else(|| CommandError::BadAddress(arg.to_string()))?;
                Ok(Command::Goto(address))
            }
            "find" => {
                let rest: Vec<&str> = parts.collect();
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("find"));
                }
                let joined = rest.join(" ");
                let pattern =
                    parse_hex_bytes(&joined).ok_or(CommandError::BadPattern(joined))?;
                Ok(Command::Find(pattern))
            }
            "show" => {
                let arg = parts.next().ok_or(CommandError::MissingArgument("show"))?;
                let (restart, digits) = match arg.strip_prefix('!') {
                    Some(rest) => (true, rest),
                    None => (false, arg),
                };
                let count = parse_number(digits)
                    .ok_or_else(|| CommandError::BadCount(arg.to_string()))?;
                Ok(Command::Show { count: count as usize, restart })
            }
            "mode" => {
                let arg = parts.next().ok_or(CommandError::MissingArgument("mode"))?;
                let mode = match arg {
                    "hex" => Mode::Hex,
                    "bin" | "binary" => Mode::Binary,
                    "asm" | "disasm" => Mode::Disasm,
                    other => return Err(CommandError::UnknownMode(other.to_string())),
                };
                Ok(Command::SetMode(mode))
            }
            "label" => {
                let name = parts.next().ok_or(CommandError::MissingArgument("label"))?;
                let address = match parts.next() {
                    Some(arg) => Some(
                        parse_number(arg)
                            .ok_or_else(|| CommandError::BadAddress(arg.to_string()))?,
                    ),
                    None => None,
                };
                Ok(Command::Label { name: name.to_string(), address })
            }
            other => Err(CommandError::UnknownVerb(other.to_string())),
        }
    }
}
