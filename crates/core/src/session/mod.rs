//! Interactive navigation state machine.
//!
//! A [`Session`] owns the cursor, the display mode, the label table, and
//! the current lazy line stream. Every transition (`goto`, `set_mode`,
//! `find`, explicit reset) rebuilds the stream from scratch; it is never
//! patched incrementally. A stream is forward-only: once it returns
//! `None` it returns `None` forever.

pub mod command;

use std::collections::VecDeque;

use crate::decode::InstructionSource;
use crate::image::Image;
use crate::labels::LabelTable;

/// Display modes for the line stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Hex,
    Binary,
    Disasm,
}

/// Lazy producer of display lines.
///
/// One variant per stream kind; each carries only positional state and
/// reads the session's shared data on every pull, which keeps all four
/// streams genuinely lazy.
enum LineProducer {
    Hex { pos: u64 },
    Binary { pos: u64 },
    Disasm { next: u64, pending: VecDeque<String> },
    Search { pattern: Vec<u8>, next: usize },
}

impl LineProducer {
    fn for_mode(mode: Mode, cursor: u64) -> Self {
        match mode {
            Mode::Hex => LineProducer::Hex { pos: cursor },
            Mode::Binary => LineProducer::Binary { pos: cursor },
            Mode::Disasm => LineProducer::Disasm { next: cursor, pending: VecDeque::new() },
        }
    }
}

/// One interactive browsing session over an image.
pub struct Session {
    image: Image,
    labels: LabelTable,
    source: Box<dyn InstructionSource>,
    cursor: u64,
    mode: Mode,
    producer: LineProducer,
}

impl Session {
    /// Start a session at address 0 in disassembly mode.
    pub fn new(image: Image, labels: LabelTable, source: Box<dyn InstructionSource>) -> Self {
        let mode = Mode::Disasm;
        let producer = LineProducer::for_mode(mode, 0);
        Self { image, labels, source, cursor: 0, mode, producer }
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Rebuild the line stream from the cursor in the current mode.
    pub fn reset(&mut self) {
        self.producer = LineProducer::for_mode(self.mode, self.cursor);
    }

    /// Move the cursor and regenerate the stream.
    pub fn goto(&mut self, address: u64) {
        self.cursor = address;
        self.reset();
    }

    /// Switch display mode and regenerate the stream from the cursor.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }

    /// Replace the stream with a search over the whole buffer. Cursor and
    /// mode are untouched; the next mode transition discards the search.
    pub fn find(&mut self, pattern: Vec<u8>) {
        self.producer = LineProducer::Search { pattern, next: 0 };
    }

    /// Attach a label at `address`, or at the cursor when absent.
    pub fn label(&mut self, name: impl Into<String>, address: Option<u64>) {
        self.labels.attach(address.unwrap_or(self.cursor), name);
    }

    /// Pull the next display line; `None` is the end-of-data sentinel and
    /// repeats indefinitely once reached.
    pub fn next_line(&mut self) -> Option<String> {
        let data = self.image.bytes();
        match &mut self.producer {
            LineProducer::Hex { pos } => hex_line(data, self.cursor, pos),
            LineProducer::Binary { pos } => binary_line(data, self.cursor, pos),
            LineProducer::Disasm { next, pending } => {
                disasm_line(&*self.source, data, &self.labels, self.cursor, next, pending)
            }
            LineProducer::Search { pattern, next } => search_line(data, pattern, next),
        }
    }
}

fn printable(byte: u8) -> char {
    if (0x20..0x7f).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}

fn marker_for(line_addr: u64, cursor: u64) -> &'static str {
    if line_addr == cursor {
        "->"
    } else {
        "  "
    }
}

/// 16 bytes per line as two 8-byte hex groups plus an ASCII rendering.
fn hex_line(data: &[u8], cursor: u64, pos: &mut u64) -> Option<String> {
    let base = *pos;
    if base >= data.len() as u64 {
        return None;
    }
    let end = (base + 16).min(data.len() as u64);
    let chunk = &data[base as usize..end as usize];
    *pos = end;

    let mut groups = [String::new(), String::new()];
    for (i, byte) in chunk.iter().enumerate() {
        let group = &mut groups[i / 8];
        if !group.is_empty() {
            group.push(' ');
        }
        group.push_str(&format!("{byte:02x}"));
    }
    let ascii: String = chunk.iter().map(|&b| printable(b)).collect();

    Some(format!(
        "{} 0x{:06x}: {:<23}  {:<23}  |{}|",
        marker_for(base, cursor),
        base,
        groups[0],
        groups[1],
        ascii
    ))
}

/// One byte per line: binary string, decimal value, ASCII character.
fn binary_line(data: &[u8], cursor: u64, pos: &mut u64) -> Option<String> {
    let addr = *pos;
    if addr >= data.len() as u64 {
        return None;
    }
    let byte = data[addr as usize];
    *pos += 1;
    Some(format!(
        "{} 0x{:06x}: {:08b}  {:>3}  {}",
        marker_for(addr, cursor),
        addr,
        byte,
        byte,
        printable(byte)
    ))
}

/// Sequential decode from the cursor, with one pseudo-line per label
/// before its instruction. Label lines are buffered so each pull still
/// yields exactly one line.
fn disasm_line(
    source: &dyn InstructionSource,
    data: &[u8],
    labels: &LabelTable,
    cursor: u64,
    next: &mut u64,
    pending: &mut VecDeque<String>,
) -> Option<String> {
    if let Some(line) = pending.pop_front() {
        return Some(line);
    }
    let insn = source.decode_one(data, *next)?;
    if insn.size() == 0 {
        return None;
    }
    for name in labels.lookup(insn.address) {
        pending.push_back(format!("{name}:"));
    }
    let raw: String = insn.bytes.iter().map(|b| format!("{b:02x}")).collect();
    pending.push_back(format!(
        "{} 0x{:x}: {:<10}  {:<6}  {}",
        marker_for(insn.address, cursor),
        insn.address,
        raw,
        insn.mnemonic,
        insn.operands
    ));
    *next = insn.end();
    pending.pop_front()
}

/// Successive non-overlapping matches of `pattern`, each rendered as the
/// match offset plus a preview of the bytes found there.
fn search_line(data: &[u8], pattern: &[u8], next: &mut usize) -> Option<String> {
    let n = pattern.len();
    if n == 0 {
        return None;
    }
    let mut i = *next;
    while i + n <= data.len() {
        if &data[i..i + n] == pattern {
            *next = i + n;
            let end = (i + 16).min(data.len());
            let preview: Vec<String> =
                data[i..end].iter().map(|b| format!("{b:02x}")).collect();
            return Some(format!("  0x{:06x}: {}", i, preview.join(" ")));
        }
        i += 1;
    }
    *next = data.len();
    None
}
