#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

/// Minimal MZ executable: a valid header with entry CS:IP = 0x0:0x20
/// followed by a short code run at 0x20 (jmp over a ret, then a call back
/// to the entry).
pub fn mz_fixture_bytes() -> Vec<u8> {
    let mut bytes = b"MZ".to_vec();
    let fields: [u16; 13] = [
        0x90,   // last page size
        0x01,   // page count
        0x00,   // relocation count
        0x02,   // header paragraphs
        0x00,   // min extra alloc
        0xFFFF, // max extra alloc
        0x00,   // initial ss
        0xB8,   // initial sp
        0x00,   // checksum
        0x20,   // entry ip
        0x00,   // entry cs
        0x1C,   // reloc table offset
        0x00,   // overlay number
    ];
    for field in fields {
        bytes.extend_from_slice(&field.to_le_bytes());
    }
    bytes.resize(0x20, 0);
    // 0x20: jmp 0x24; 0x22: ret; 0x23: nop; 0x24: call 0x20; 0x27: ret
    bytes.extend_from_slice(&[0xEB, 0x02, 0xC3, 0x90, 0xE8, 0xF9, 0xFF, 0xC3]);
    bytes
}

/// Write the fixture into a fresh temp dir and hand back both.
pub fn write_mz_fixture() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("game.exe");
    std::fs::write(&path, mz_fixture_bytes()).expect("write fixture");
    (dir, path)
}
